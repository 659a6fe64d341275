use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConnectError {
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Carries the message shown to the user as-is.
    #[error("{0}")]
    Validation(String),

    #[error("Persistence error: {0}")]
    Persistence(#[from] eyre::Report),

    #[error("Internal server error: {0}")]
    Internal(#[from] Box<dyn std::error::Error + Send + Sync>),
}

impl ConnectError {
    pub fn validation(message: impl Into<String>) -> Self {
        ConnectError::Validation(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ConnectError::NotFound(message.into())
    }
}

pub type ConnectResult<T> = Result<T, ConnectError>;
