use std::path::PathBuf;
use thiserror::Error;

pub type MessageResult<T> = Result<T, MessageError>;

#[derive(Error, Debug)]
pub enum MessageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{0}")]
    MissingPath(String),

    #[error("Invalid message file {}: {message}", path.display())]
    Catalog { path: PathBuf, message: String },

    #[error("Excel error: {0}")]
    Workbook(String),
}

impl MessageError {
    /// Build a catalog error for the file at `path`
    pub fn catalog(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        MessageError::Catalog {
            path: path.into(),
            message: message.into(),
        }
    }
}
