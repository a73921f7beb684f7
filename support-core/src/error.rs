use thiserror::Error;

#[derive(Error, Debug)]
pub enum SupportError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Persistence error: {0}")]
    Persistence(#[from] sqlx::Error),

    #[error("Initialization error: {0}")]
    Initialization(String),

    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl SupportError {
    /// Stable tag reported to callers alongside the message.
    pub fn kind(&self) -> &'static str {
        match self {
            SupportError::Validation(_) => "validation",
            SupportError::Persistence(_) => "persistence",
            SupportError::Initialization(_) => "initialization",
            SupportError::Config(_) => "config",
            SupportError::Io(_) => "io",
        }
    }
}
