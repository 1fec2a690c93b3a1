//! Canonical prompt template shared by every provider.

use super::types::Message;

/// System message sent ahead of every user input.
pub const SYSTEM_PROMPT: &str = "You are a helpful assistant.";

/// Build the two-turn prompt for a single user input.
///
/// The input is passed through untouched, empty strings included.
pub fn build_prompt(input: &str) -> Vec<Message> {
    vec![Message::system(SYSTEM_PROMPT), Message::user(input)]
}
