//! Wire contract between the chatrelay service and its clients.
//!
//! Everything that crosses the HTTP boundary lives here so the relay and the
//! chat UI cannot drift apart: provider names, request/response envelopes,
//! the model catalog shape, and how failures are flattened into text.

mod api;
mod error;
mod provider;

pub use api::{
    BatchMetadata, BatchRequest, BatchResponse, InvocationInput, InvocationOutput, InvokeRequest,
    InvokeResponse, ModelsResponse, RunMetadata,
};
pub use error::ErrorCategory;
pub use provider::{DEFAULT_GOOGLE_MODEL, DEFAULT_GROQ_MODEL, Provider, UnknownProvider};
