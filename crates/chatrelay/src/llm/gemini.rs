//! Google Gemini provider with native `generateContent` format.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::error::{LLMError, check_response};
use super::provider::LLMProvider;
use super::types::{ChatRequest, ChatResponse, Role, Usage};

/// Gemini provider (Google AI Studio API).
pub struct GeminiProvider {
    client: Client,
    base_url: String,
    api_key: String,
}

impl GeminiProvider {
    #[must_use]
    pub fn new(client: Client, base_url: String, api_key: String) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        }
    }
}

#[async_trait]
impl LLMProvider for GeminiProvider {
    async fn chat(&self, request: ChatRequest) -> Result<ChatResponse, LLMError> {
        let url = format!("{}/models/{}:generateContent", self.base_url, request.model);
        let body = to_request(&request);

        let response = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await?;

        let response = check_response(response).await?;
        let generated: GenerateResponse = response.json().await?;
        from_response(generated)
    }
}

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content>,
    contents: Vec<Content>,
}

#[derive(Serialize, Deserialize)]
struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Serialize, Deserialize)]
struct Part {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    prompt_feedback: Option<PromptFeedback>,
    #[serde(default)]
    usage_metadata: Option<UsageMetadata>,
    #[serde(default)]
    model_version: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    #[serde(default)]
    content: Option<Content>,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    #[serde(default)]
    block_reason: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UsageMetadata {
    #[serde(default)]
    prompt_token_count: u32,
    #[serde(default)]
    candidates_token_count: u32,
    #[serde(default)]
    total_token_count: u32,
}

fn text_content(role: Option<&str>, text: &str) -> Content {
    Content {
        role: role.map(str::to_string),
        parts: vec![Part {
            text: Some(text.to_string()),
        }],
    }
}

fn to_request(request: &ChatRequest) -> GenerateRequest {
    let mut system_instruction = None;
    let mut contents = Vec::new();

    for msg in &request.messages {
        match msg.role {
            // Gemini takes the system prompt as a separate field
            Role::System => system_instruction = Some(text_content(None, &msg.content)),
            Role::User => contents.push(text_content(Some("user"), &msg.content)),
            Role::Assistant => contents.push(text_content(Some("model"), &msg.content)),
        }
    }

    GenerateRequest {
        system_instruction,
        contents,
    }
}

fn from_response(response: GenerateResponse) -> Result<ChatResponse, LLMError> {
    let Some(candidate) = response.candidates.into_iter().next() else {
        let reason = response
            .prompt_feedback
            .and_then(|f| f.block_reason)
            .map(|r| format!("prompt blocked ({r})"))
            .unwrap_or_else(|| "response contained no candidates".to_string());
        return Err(LLMError::MalformedResponse(reason));
    };

    let content = candidate
        .content
        .map(|c| {
            c.parts
                .into_iter()
                .filter_map(|p| p.text)
                .collect::<Vec<_>>()
                .join("")
        })
        .unwrap_or_default();

    Ok(ChatResponse {
        content,
        model: response.model_version,
        finish_reason: candidate.finish_reason,
        usage: response.usage_metadata.map(|u| Usage {
            prompt_tokens: u.prompt_token_count,
            completion_tokens: u.candidates_token_count,
            total_tokens: u.total_token_count,
        }),
    })
}

#[cfg(test)]
mod tests {
    use axum::Json;
    use axum::Router;
    use axum::extract::Path;
    use axum::http::{HeaderMap, StatusCode};
    use axum::routing::post;
    use serde_json::{Value, json};

    use super::*;
    use crate::llm::prompt::build_prompt;
    use crate::llm::testing::{spawn_upstream, unreachable_base_url};
    use chatrelay_types::ErrorCategory;

    fn request(model: &str, input: &str) -> ChatRequest {
        ChatRequest {
            model: model.to_string(),
            messages: build_prompt(input),
        }
    }

    #[test]
    fn system_prompt_moves_to_system_instruction() {
        let body = serde_json::to_value(to_request(&request("gemini-2.5-flash", "Hi"))).unwrap();
        assert_eq!(
            body["systemInstruction"]["parts"][0]["text"],
            "You are a helpful assistant."
        );
        assert!(body["systemInstruction"].get("role").is_none());
        assert_eq!(body["contents"].as_array().unwrap().len(), 1);
        assert_eq!(body["contents"][0]["role"], "user");
        assert_eq!(body["contents"][0]["parts"][0]["text"], "Hi");
    }

    #[test]
    fn parts_are_concatenated() {
        let response: GenerateResponse = serde_json::from_value(json!({
            "candidates": [{
                "content": {"role": "model", "parts": [{"text": "Hello, "}, {"text": "world"}]},
                "finishReason": "STOP"
            }],
            "usageMetadata": {"promptTokenCount": 4, "candidatesTokenCount": 2, "totalTokenCount": 6},
            "modelVersion": "gemini-2.5-flash"
        }))
        .unwrap();

        let response = from_response(response).unwrap();
        assert_eq!(response.content, "Hello, world");
        assert_eq!(response.finish_reason.as_deref(), Some("STOP"));
        assert_eq!(response.model.as_deref(), Some("gemini-2.5-flash"));
        assert_eq!(
            response.usage,
            Some(Usage {
                prompt_tokens: 4,
                completion_tokens: 2,
                total_tokens: 6
            })
        );
    }

    #[test]
    fn blocked_prompt_is_malformed() {
        let response: GenerateResponse =
            serde_json::from_value(json!({"promptFeedback": {"blockReason": "SAFETY"}})).unwrap();
        let err = from_response(response).unwrap_err();
        assert_eq!(err.to_string(), "malformed response: prompt blocked (SAFETY)");
        assert_eq!(err.category(), ErrorCategory::ResponseShape);
    }

    #[tokio::test]
    async fn chat_posts_to_generate_content() {
        let app = Router::new().route(
            "/models/{model}",
            post(
                |Path(model): Path<String>, headers: HeaderMap, Json(body): Json<Value>| async move {
                    assert_eq!(model, "gemini-2.5-flash-lite:generateContent");
                    assert_eq!(
                        headers.get("x-goog-api-key").unwrap().to_str().unwrap(),
                        "g-key"
                    );
                    assert_eq!(body["contents"][0]["parts"][0]["text"], "");
                    Json(json!({
                        "candidates": [{"content": {"parts": [{"text": "empty prompt received"}]}}]
                    }))
                },
            ),
        );
        let base_url = spawn_upstream(app).await;

        let provider = GeminiProvider::new(Client::new(), base_url, "g-key".to_string());
        let response = provider
            .chat(request("gemini-2.5-flash-lite", ""))
            .await
            .unwrap();
        assert_eq!(response.content, "empty prompt received");
        assert!(response.usage.is_none());
    }

    #[tokio::test]
    async fn invalid_model_is_api_error() {
        let app = Router::new().route(
            "/models/{model}",
            post(|| async {
                (
                    StatusCode::NOT_FOUND,
                    Json(json!({"error": {
                        "code": 404,
                        "message": "models/bogus is not found",
                        "status": "NOT_FOUND"
                    }})),
                )
            }),
        );
        let base_url = spawn_upstream(app).await;

        let provider = GeminiProvider::new(Client::new(), base_url, "g-key".to_string());
        let err = provider.chat(request("bogus", "x")).await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "api error (status 404): models/bogus is not found"
        );
    }

    #[tokio::test]
    async fn unreachable_host_is_transport_error() {
        let provider = GeminiProvider::new(Client::new(), unreachable_base_url(), "k".to_string());
        let err = provider.chat(request("m", "x")).await.unwrap_err();
        assert_eq!(err.category(), ErrorCategory::Transport);
    }
}
