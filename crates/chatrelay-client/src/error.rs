//! Client error types.

use chatrelay_types::ErrorCategory;
use thiserror::Error;

/// Errors that can occur when talking to the relay.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The base URL could not be parsed or joined.
    #[error("invalid relay url: {0}")]
    Url(#[from] url::ParseError),

    /// HTTP request failed
    #[error("{0}")]
    Request(#[from] reqwest::Error),

    /// Relay answered with a non-success status
    #[error("relay returned status {status}: {body}")]
    Status { status: u16, body: String },
}

impl ClientError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ClientError::Request(e) if e.is_decode() => ErrorCategory::ResponseShape,
            ClientError::Request(_) | ClientError::Status { .. } => ErrorCategory::Transport,
            ClientError::Url(_) => ErrorCategory::Unclassified,
        }
    }

    /// Text shown in the transcript in place of a reply.
    pub fn render(&self) -> String {
        self.category().render(self)
    }
}
