use thiserror::Error;

pub type Result<T> = std::result::Result<T, ProcessingError>;

#[derive(Error, Debug)]
pub enum ProcessingError {
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Configuration source error: {0}")]
    ConfigSource(#[from] config::ConfigError),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Invalid coordinate: {0}")]
    InvalidCoordinate(String),

    #[error("Missing required data: {0}")]
    MissingData(String),
}

impl From<tempfile::PersistError> for ProcessingError {
    fn from(err: tempfile::PersistError) -> Self {
        ProcessingError::Io(err.error)
    }
}
