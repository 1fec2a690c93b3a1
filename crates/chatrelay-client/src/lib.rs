//! HTTP client for the chatrelay service.

mod client;
mod error;

pub use client::{NO_CONTENT, RelayClient};
pub use error::ClientError;
