use std::path::{Path, PathBuf};

/// Filesystem layout of the application data directory.
///
/// Resolution order: explicit flag, `BOLETERA_DATA_DIR`, then
/// `boletera_data` under the working directory.
#[derive(Debug, Clone)]
pub struct AppPaths {
    data_dir: PathBuf,
}

impl AppPaths {
    pub fn resolve(explicit: Option<PathBuf>) -> Self {
        let data_dir = explicit
            .or_else(|| std::env::var_os("BOLETERA_DATA_DIR").map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from("boletera_data"));
        Self { data_dir }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Directory holding one file per storage key.
    pub fn state_dir(&self) -> PathBuf {
        self.data_dir.join("state")
    }

    pub fn config_path(&self) -> PathBuf {
        self.data_dir.join("config.toml")
    }

    pub fn log_path(&self) -> PathBuf {
        self.data_dir.join("logs.jsonl")
    }
}
