// client/src/error.rs

use thiserror::Error;

/// Failures at the REST boundary. Every variant is recoverable: pages surface
/// a notification and keep their previous state.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The backend answered with `success: false`, whatever the transport
    /// status was. Carries the envelope's message and detail list.
    #[error("{message}")]
    Rejected { message: String, details: Vec<String> },

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("unexpected response body: {0}")]
    Decode(String),

    #[error("server returned status {0}")]
    Status(u16),

    #[error("not authenticated")]
    Unauthorized,
}

impl ApiError {
    pub fn rejected(message: impl Into<String>) -> Self {
        ApiError::Rejected { message: message.into(), details: Vec::new() }
    }
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;
