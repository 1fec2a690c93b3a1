//! Provider identifiers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Model used for Google invocations that do not name one.
pub const DEFAULT_GOOGLE_MODEL: &str = "gemini-1.5-flash";

/// Model used for Groq invocations that do not name one.
pub const DEFAULT_GROQ_MODEL: &str = "llama-3.1-8b-instant";

/// Hosted LLM providers the relay can forward to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    Google,
    Groq,
}

impl Provider {
    /// Every supported provider, in catalog order.
    pub const ALL: [Provider; 2] = [Provider::Google, Provider::Groq];

    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::Google => "google",
            Provider::Groq => "groq",
        }
    }

    /// Human-facing label for selectors.
    pub fn display_name(&self) -> &'static str {
        match self {
            Provider::Google => "Google",
            Provider::Groq => "Groq",
        }
    }

    /// Documented fallback model when an invocation omits `model`.
    pub fn default_model(&self) -> &'static str {
        match self {
            Provider::Google => DEFAULT_GOOGLE_MODEL,
            Provider::Groq => DEFAULT_GROQ_MODEL,
        }
    }

    /// Route prefix, e.g. `/google-chat-api`.
    pub fn route_prefix(&self) -> String {
        format!("/{}-chat-api", self.as_str())
    }

    pub fn invoke_path(&self) -> String {
        format!("{}/invoke", self.route_prefix())
    }

    pub fn batch_path(&self) -> String {
        format!("{}/batch", self.route_prefix())
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when parsing a provider name that is not supported.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown provider '{0}' (expected one of: google, groq)")]
pub struct UnknownProvider(pub String);

impl FromStr for Provider {
    type Err = UnknownProvider;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "google" => Ok(Provider::Google),
            "groq" => Ok(Provider::Groq),
            _ => Err(UnknownProvider(s.to_string())),
        }
    }
}
