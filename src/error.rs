use thiserror::Error;

#[derive(Error, Debug)]
pub enum SahayakError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Forecast fetch failure: {0}")]
    FetchFailure(String),

    #[error("SMS transport error: {0}")]
    Transport(String),
}

pub type Result<T> = std::result::Result<T, SahayakError>;
