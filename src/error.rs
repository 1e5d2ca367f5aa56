use thiserror::Error;

/// Errors returned by [`EtsClient`](crate::EtsClient) operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum EtsError {
    /// The request could not be sent or the response body could not be read
    /// (connection refused, DNS failure, timeout).
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The response body was not valid JSON, or the payload did not have the
    /// expected shape.
    #[error("protocol error: {0}")]
    Protocol(String),

    /// Login was rejected, either by HTTP status or by the response envelope.
    #[error("authentication failed: {0}")]
    Authentication(String),

    /// The response envelope reported `Success: false`. Carries the server
    /// message verbatim.
    #[error("API error: {0}")]
    Api(String),

    /// An operation that needs a session token was called before
    /// `authenticate` or `set_token`.
    #[error("not authenticated: call authenticate() first")]
    NotAuthenticated,

    /// The document passed to a submission call did not serialize to a JSON
    /// object.
    #[error("invalid document: {0}")]
    InvalidDocument(String),

    /// Base URL and path did not form a valid URL.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),
}

impl EtsError {
    /// Server-supplied message for authentication and API failures.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Authentication(msg) | Self::Api(msg) => Some(msg),
            _ => None,
        }
    }
}
