//! LLM error types.

use chatrelay_types::ErrorCategory;
use thiserror::Error;

/// Errors that can occur when making LLM API calls.
#[derive(Debug, Error)]
pub enum LLMError {
    /// HTTP request failed
    #[error("http request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// API returned an error response
    #[error("api error (status {status}): {message}")]
    Api { status: u16, message: String },

    /// Rate limited (429)
    #[error("rate limited (retry after {retry_after:?}s)")]
    RateLimit { retry_after: Option<u64> },

    /// Response decoded but did not carry any generated text
    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

impl LLMError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            LLMError::Request(e) if e.is_decode() => ErrorCategory::ResponseShape,
            LLMError::Request(_) => ErrorCategory::Transport,
            LLMError::MalformedResponse(_) => ErrorCategory::ResponseShape,
            LLMError::Api { .. } | LLMError::RateLimit { .. } => ErrorCategory::Unclassified,
        }
    }
}

/// Pass a successful response through, or turn a failed one into an `LLMError`.
///
/// 429 maps to `RateLimit`. Other statuses map to `Api`, preferring the
/// provider's `error.message` over the raw body.
pub async fn check_response(response: reqwest::Response) -> Result<reqwest::Response, LLMError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    if status.as_u16() == 429 {
        let retry_after = response
            .headers()
            .get("retry-after")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse::<u64>().ok());
        return Err(LLMError::RateLimit { retry_after });
    }

    let body = response.text().await.unwrap_or_default();
    Err(LLMError::Api {
        status: status.as_u16(),
        message: extract_error_message(&body),
    })
}

/// Both Gemini and OpenAI-compatible APIs report `{"error": {"message": ...}}`.
fn extract_error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| {
            v.get("error")
                .and_then(|e| e.get("message"))
                .and_then(|m| m.as_str())
                .map(str::to_string)
        })
        .unwrap_or_else(|| body.trim().to_string())
}
