use thiserror::Error;

#[derive(Error, Debug)]
pub enum MemfitError {
    #[error("Malformed size: {0} (expected '<non-negative integer> <unit>')")]
    MalformedSize(String),

    #[error("Unknown unit: {0} (valid units: KB, MB)")]
    UnknownUnit(String),

    #[error("Invalid size: {0} (sizes must be non-negative)")]
    InvalidSize(i64),

    #[error("Unknown strategy: {0} (valid options: first-fit, best-fit, worst-fit)")]
    UnknownStrategy(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Configuration validation failed: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, MemfitError>;
