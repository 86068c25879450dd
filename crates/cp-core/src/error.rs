use thiserror::Error;

#[derive(Error, Debug)]
pub enum CpError {
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("Encoding error: {0}")]
    Encoding(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CpError>;
