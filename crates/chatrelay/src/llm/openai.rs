//! OpenAI-compatible LLM provider.
//!
//! Groq exposes the OpenAI chat completions format, so this one client serves it.

use async_trait::async_trait;
use reqwest::Client;

use super::error::{LLMError, check_response};
use super::provider::LLMProvider;
use super::types::{ChatRequest, ChatResponse, Message, Usage};

/// OpenAI-compatible provider.
pub struct OpenAICompatibleProvider {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl OpenAICompatibleProvider {
    #[must_use]
    pub fn new(client: Client, base_url: String, api_key: Option<String>) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        }
    }
}

#[async_trait]
impl LLMProvider for OpenAICompatibleProvider {
    async fn chat(&self, request: ChatRequest) -> Result<ChatResponse, LLMError> {
        let url = format!("{}/chat/completions", self.base_url);

        let mut req = self
            .client
            .post(&url)
            .header("Content-Type", "application/json");

        if let Some(ref key) = self.api_key {
            req = req.header("Authorization", format!("Bearer {}", key));
        }

        let response = check_response(req.json(&request).send().await?).await?;
        let completion: CompletionResponse = response.json().await?;
        from_completion(completion)
    }
}

// ============================================================================
// Response Types
// ============================================================================

#[derive(serde::Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    model: Option<String>,
    choices: Vec<Choice>,
    #[serde(default)]
    usage: Option<Usage>,
}

#[derive(serde::Deserialize)]
struct Choice {
    message: Message,
    #[serde(default)]
    finish_reason: Option<String>,
}

fn from_completion(completion: CompletionResponse) -> Result<ChatResponse, LLMError> {
    let Some(choice) = completion.choices.into_iter().next() else {
        return Err(LLMError::MalformedResponse(
            "response contained no choices".to_string(),
        ));
    };

    Ok(ChatResponse {
        content: choice.message.content,
        model: completion.model,
        finish_reason: choice.finish_reason,
        usage: completion.usage,
    })
}
