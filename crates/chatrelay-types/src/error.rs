//! Failure categories and their textual rendering.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Coarse classification of a failed invocation.
///
/// The wire contract has no structured error: failures travel in
/// `output.content` like any other reply. The category only decides which
/// prefix the flattened text carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// Network or transport failure reaching the remote side.
    Transport,
    /// The remote side answered with something we could not interpret.
    ResponseShape,
    /// Anything else (API refusals, missing credentials, ...).
    Unclassified,
}

impl ErrorCategory {
    pub fn prefix(&self) -> &'static str {
        match self {
            ErrorCategory::Transport => "Request Error",
            ErrorCategory::ResponseShape => "Response parsing error",
            ErrorCategory::Unclassified => "Error",
        }
    }

    /// Flatten an error into the text returned in place of generated output.
    pub fn render(&self, detail: impl fmt::Display) -> String {
        format!("{}: {}", self.prefix(), detail)
    }
}
