//! LLM provider clients for chat completions.

mod error;
mod gemini;
mod openai;
pub mod prompt;
mod provider;
mod registry;
mod types;

pub use error::LLMError;
pub use gemini::GeminiProvider;
pub use openai::OpenAICompatibleProvider;
pub use provider::LLMProvider;
pub use registry::ProviderRegistry;
pub use types::{ChatRequest, ChatResponse, Message, Role, Usage};
