use core_types::DocumentError;
use thiserror::Error;

/// Failure while materializing a markup node into a document.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error(transparent)]
    Document(#[from] DocumentError),
    /// A template function or accessor rejected its input.
    #[error("template function failed: {0}")]
    Func(String),
}

impl BuildError {
    pub fn func(message: impl Into<String>) -> Self {
        BuildError::Func(message.into())
    }
}
