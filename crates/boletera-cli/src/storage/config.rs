use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::atomic::write_bytes_atomic;
use super::paths::AppPaths;
use super::StorageResult;

/// Optional CLI defaults, persisted beside the state files.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CliConfig {
    /// Directory artifacts are written to when `--out` is not given.
    pub default_out_dir: Option<PathBuf>,
    /// Series name used when `--series` is not given on exports.
    pub default_series: Option<String>,
}

pub fn load_or_create_config(paths: &AppPaths) -> StorageResult<CliConfig> {
    let path = paths.config_path();
    if path.exists() {
        let content = std::fs::read_to_string(&path)?;
        let config: CliConfig = toml::from_str(&content)?;
        return Ok(config);
    }

    let config = CliConfig::default();
    let encoded = toml::to_string_pretty(&config)?;
    write_bytes_atomic(&path, encoded.as_bytes())?;
    Ok(config)
}
