mod atomic;
mod config;
mod file_store;
mod paths;

pub use atomic::write_bytes_atomic;
pub use config::{CliConfig, load_or_create_config};
pub use file_store::FileStore;
pub use paths::AppPaths;

use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("toml decode error: {0}")]
    TomlDecode(#[from] toml::de::Error),
    #[error("toml encode error: {0}")]
    TomlEncode(#[from] toml::ser::Error),
    #[error("invalid storage state: {0}")]
    Invalid(String),
}

pub type StorageResult<T> = Result<T, StorageError>;
