use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("no config directory found")]
    NoConfigDir,

    #[error("credential file I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("credential file is not valid JSON: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("JWT error: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),
}
