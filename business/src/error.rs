use thiserror::Error;

/// Failure of a call against the techops service.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The request never produced a response (connection refused, DNS, TLS...).
    #[error("request failed: {0}")]
    Transport(String),

    /// The service answered with a non-2xx status.
    #[error("API returned status: {status}")]
    Status { status: u16 },

    /// The body could not be decoded into the expected shape.
    #[error("failed to decode {what}: {message}")]
    Decode { what: &'static str, message: String },

    /// The request body could not be encoded.
    #[error("failed to encode request: {0}")]
    Encode(String),

    /// The service accepted the call but flagged it as failed.
    #[error("rejected by service: {}", messages.join("; "))]
    Rejected { messages: Vec<String> },
}

impl ApiError {
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport(message.into())
    }

    pub fn decode(what: &'static str, err: impl std::fmt::Display) -> Self {
        Self::Decode {
            what,
            message: err.to_string(),
        }
    }
}

/// A typed API result.
pub type ApiResult<T> = Result<T, ApiError>;
