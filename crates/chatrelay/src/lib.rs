//! chatrelay - a minimal relay that forwards chat prompts to hosted LLM providers.

// ============================================================================
// Always Available
// ============================================================================

pub mod build_info;
pub mod catalog;
pub mod config;
pub mod dispatch;
pub mod llm;

// ============================================================================
// Server-only (behind `server` feature)
// ============================================================================

#[cfg(feature = "server")]
pub mod handlers;
#[cfg(feature = "server")]
pub mod server;
