//! Chat session state: selection, catalog and transcript.

use chatrelay_types::{ModelsResponse, Provider};

use crate::backend::ChatBackend;
use crate::transcript::{ChatMessage, ChatRole, Transcript};

pub struct ChatSession {
    backend: Box<dyn ChatBackend>,
    catalog: ModelsResponse,
    provider: Provider,
    model: String,
    transcript: Transcript,
}

impl ChatSession {
    /// Start a session on `provider`, using the first catalog model unless one is given.
    pub fn new(
        backend: Box<dyn ChatBackend>,
        catalog: ModelsResponse,
        provider: Provider,
        model: Option<String>,
    ) -> Self {
        let model = model.unwrap_or_else(|| first_model(&catalog, provider));
        Self {
            backend,
            catalog,
            provider,
            model,
            transcript: Transcript::new(),
        }
    }

    pub fn provider(&self) -> Provider {
        self.provider
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn catalog(&self) -> &ModelsResponse {
        &self.catalog
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// Switch provider and reset the model to its first catalog entry.
    pub fn select_provider(&mut self, provider: Provider) {
        self.provider = provider;
        self.model = first_model(&self.catalog, provider);
    }

    /// Switch model. Returns `false` when the id is not in the catalog; it is
    /// used anyway and left to the provider to accept or reject.
    pub fn select_model(&mut self, model: impl Into<String>) -> bool {
        self.model = model.into();
        self.catalog
            .models(self.provider)
            .iter()
            .any(|m| *m == self.model)
    }

    /// Record the prompt, wait for the reply, and record that too.
    pub async fn submit(&mut self, prompt: String) -> &ChatMessage {
        self.transcript.push(ChatRole::User, prompt.as_str());
        let reply = self.backend.send(self.provider, &prompt, &self.model).await;
        self.transcript.push(ChatRole::Assistant, reply)
    }

    pub fn clear(&mut self) {
        self.transcript.clear();
    }
}

fn first_model(catalog: &ModelsResponse, provider: Provider) -> String {
    catalog
        .models(provider)
        .first()
        .cloned()
        .unwrap_or_else(|| provider.default_model().to_string())
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;

    use super::*;

    #[derive(Default)]
    struct FakeBackend {
        calls: Arc<Mutex<Vec<(Provider, String, String)>>>,
    }

    #[async_trait]
    impl ChatBackend for FakeBackend {
        async fn models(&self) -> anyhow::Result<ModelsResponse> {
            Ok(ModelsResponse::default())
        }

        async fn send(&self, provider: Provider, input: &str, model: &str) -> String {
            self.calls
                .lock()
                .unwrap()
                .push((provider, input.to_string(), model.to_string()));
            format!("echo: {input}")
        }
    }

    fn catalog() -> ModelsResponse {
        ModelsResponse {
            google: vec!["gemini-2.5-flash".to_string()],
            groq: vec![
                "llama-3.3-70b-versatile".to_string(),
                "gemma2-9b-it".to_string(),
            ],
        }
    }

    #[test]
    fn starts_on_first_catalog_model() {
        let session = ChatSession::new(
            Box::new(FakeBackend::default()),
            catalog(),
            Provider::Groq,
            None,
        );
        assert_eq!(session.model(), "llama-3.3-70b-versatile");
    }

    #[test]
    fn empty_catalog_falls_back_to_default() {
        let session = ChatSession::new(
            Box::new(FakeBackend::default()),
            ModelsResponse::default(),
            Provider::Google,
            None,
        );
        assert_eq!(session.model(), "gemini-1.5-flash");
    }

    #[test]
    fn switching_provider_resets_model() {
        let mut session = ChatSession::new(
            Box::new(FakeBackend::default()),
            catalog(),
            Provider::Groq,
            Some("gemma2-9b-it".to_string()),
        );
        session.select_provider(Provider::Google);
        assert_eq!(session.provider(), Provider::Google);
        assert_eq!(session.model(), "gemini-2.5-flash");
    }

    #[test]
    fn unlisted_model_is_kept_but_flagged() {
        let mut session = ChatSession::new(
            Box::new(FakeBackend::default()),
            catalog(),
            Provider::Groq,
            None,
        );
        assert!(session.select_model("gemma2-9b-it"));
        assert!(!session.select_model("custom-model"));
        assert_eq!(session.model(), "custom-model");
    }

    #[tokio::test]
    async fn submit_records_user_then_assistant() {
        let backend = FakeBackend::default();
        let calls = backend.calls.clone();
        let mut session = ChatSession::new(Box::new(backend), catalog(), Provider::Groq, None);

        let reply = session.submit("first".to_string()).await.clone();
        assert_eq!(reply.role, ChatRole::Assistant);
        assert_eq!(reply.content, "echo: first");
        session.submit("second".to_string()).await;

        let messages = session.transcript().messages();
        let turns: Vec<_> = messages
            .iter()
            .map(|m| (m.role, m.content.as_str()))
            .collect();
        assert_eq!(
            turns,
            [
                (ChatRole::User, "first"),
                (ChatRole::Assistant, "echo: first"),
                (ChatRole::User, "second"),
                (ChatRole::Assistant, "echo: second"),
            ]
        );

        let calls = calls.lock().unwrap();
        assert_eq!(
            calls[0],
            (
                Provider::Groq,
                "first".to_string(),
                "llama-3.3-70b-versatile".to_string()
            )
        );
    }

    #[tokio::test]
    async fn clear_empties_transcript() {
        let mut session = ChatSession::new(
            Box::new(FakeBackend::default()),
            catalog(),
            Provider::Google,
            None,
        );
        session.submit("hi".to_string()).await;
        session.clear();
        assert!(session.transcript().is_empty());
    }
}
