use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StockError {
    #[error("Data directory not found at {0}. Run 'stockdash init' to create it.")]
    DataDirNotFound(PathBuf),

    #[error("Data file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Data directory already exists at {0}")]
    AlreadyInitialized(PathBuf),

    #[error("No data to export for {0}")]
    NoData(String),

    #[error("Failed to serialize output: {0}")]
    Serialize(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, StockError>;
