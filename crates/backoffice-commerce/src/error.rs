//! Commerce error types.

use backoffice_data::FetchError;
use thiserror::Error;

/// Errors returned by the service facades.
#[derive(Error, Debug)]
pub enum CommerceError {
    /// The payload failed local checks; nothing was sent.
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Transport failure or non-2xx answer from the server.
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl CommerceError {
    /// HTTP status of a server rejection.
    pub fn status(&self) -> Option<u16> {
        match self {
            CommerceError::Fetch(e) => e.status(),
            _ => None,
        }
    }

    /// The server's own message for a rejection, if it sent one.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            CommerceError::Fetch(FetchError::HttpError { message, .. }) => Some(message.as_str()),
            _ => None,
        }
    }

    /// Whether the failure happened before anything was sent.
    pub fn is_validation(&self) -> bool {
        matches!(self, CommerceError::ValidationError(_))
    }
}

impl From<serde_json::Error> for CommerceError {
    fn from(e: serde_json::Error) -> Self {
        CommerceError::SerializationError(e.to_string())
    }
}

/// Fail with a [`CommerceError::ValidationError`] unless `condition` holds.
pub(crate) fn ensure(condition: bool, message: impl Into<String>) -> Result<(), CommerceError> {
    if condition {
        Ok(())
    } else {
        Err(CommerceError::ValidationError(message.into()))
    }
}
