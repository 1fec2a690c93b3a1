//! Request and response envelopes.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::provider::Provider;

// ============================================================================
// Invoke
// ============================================================================

/// The prompt and model of a single invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvocationInput {
    /// Free text, forwarded as-is (empty strings included).
    #[serde(default)]
    pub input: String,
    /// Opaque model identifier; the provider default is used when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}

impl InvocationInput {
    pub fn new(input: impl Into<String>, model: Option<String>) -> Self {
        Self {
            input: input.into(),
            model,
        }
    }
}

/// Body of `POST /{provider}-chat-api/invoke`.
///
/// `config` and `kwargs` belong to the generic invoke convention and are
/// accepted but never consulted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvokeRequest {
    pub input: InvocationInput,
    #[serde(default)]
    pub config: Map<String, Value>,
    #[serde(default)]
    pub kwargs: Map<String, Value>,
}

impl InvokeRequest {
    pub fn new(input: InvocationInput) -> Self {
        Self {
            input,
            config: Map::new(),
            kwargs: Map::new(),
        }
    }
}

/// Text produced by one invocation: generated output or a flattened error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvocationOutput {
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunMetadata {
    pub run_id: String,
}

/// Body returned by `POST /{provider}-chat-api/invoke`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvokeResponse {
    pub output: InvocationOutput,
    pub metadata: RunMetadata,
}

// ============================================================================
// Batch
// ============================================================================

/// Body of `POST /{provider}-chat-api/batch`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchRequest {
    pub inputs: Vec<InvocationInput>,
    #[serde(default)]
    pub config: Map<String, Value>,
    #[serde(default)]
    pub kwargs: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchMetadata {
    pub run_ids: Vec<String>,
}

/// Body returned by `POST /{provider}-chat-api/batch`, one output per input.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchResponse {
    pub output: Vec<InvocationOutput>,
    pub metadata: BatchMetadata,
}

// ============================================================================
// Models
// ============================================================================

/// Body returned by `GET /models`: ordered model identifiers per provider.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelsResponse {
    #[serde(default)]
    pub google: Vec<String>,
    #[serde(default)]
    pub groq: Vec<String>,
}

impl ModelsResponse {
    pub fn models(&self, provider: Provider) -> &[String] {
        match provider {
            Provider::Google => &self.google,
            Provider::Groq => &self.groq,
        }
    }

    pub fn models_mut(&mut self, provider: Provider) -> &mut Vec<String> {
        match provider {
            Provider::Google => &mut self.google,
            Provider::Groq => &mut self.groq,
        }
    }

    /// Single-entry catalog used when the relay cannot be reached.
    pub fn fallback() -> Self {
        let mut catalog = Self::default();
        for provider in Provider::ALL {
            catalog
                .models_mut(provider)
                .push(provider.default_model().to_string());
        }
        catalog
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invoke_request_without_config_or_kwargs() {
        let json = r#"{"input": {"input": "Hello", "model": "gemma2-9b-it"}}"#;
        let request: InvokeRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.input.input, "Hello");
        assert_eq!(request.input.model.as_deref(), Some("gemma2-9b-it"));
        assert!(request.config.is_empty());
        assert!(request.kwargs.is_empty());
    }

    #[test]
    fn invoke_request_with_missing_model_and_input() {
        let request: InvokeRequest =
            serde_json::from_str(r#"{"input": {}, "config": {}, "kwargs": {}}"#).unwrap();
        assert_eq!(request.input.input, "");
        assert!(request.input.model.is_none());

        let request: InvokeRequest =
            serde_json::from_str(r#"{"input": {"input": "hi", "model": null}}"#).unwrap();
        assert!(request.input.model.is_none());
    }

    #[test]
    fn invoke_request_serializes_empty_envelope_fields() {
        let request = InvokeRequest::new(InvocationInput::new("Hi", Some("m".to_string())));
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["input"]["input"], "Hi");
        assert_eq!(value["input"]["model"], "m");
        assert_eq!(value["config"], serde_json::json!({}));
        assert_eq!(value["kwargs"], serde_json::json!({}));
    }

    #[test]
    fn invocation_input_omits_absent_model() {
        let json = serde_json::to_string(&InvocationInput::new("x", None)).unwrap();
        assert!(!json.contains("model"));
    }

    #[test]
    fn models_response_lookup_and_fallback() {
        let catalog = ModelsResponse::fallback();
        assert_eq!(catalog.models(Provider::Google), ["gemini-1.5-flash"]);
        assert_eq!(catalog.models(Provider::Groq), ["llama-3.1-8b-instant"]);
    }

    #[test]
    fn models_response_wire_shape() {
        let catalog = ModelsResponse {
            google: vec!["a".to_string()],
            groq: vec!["b".to_string(), "c".to_string()],
        };
        let value = serde_json::to_value(&catalog).unwrap();
        assert_eq!(value, serde_json::json!({"google": ["a"], "groq": ["b", "c"]}));
    }
}
