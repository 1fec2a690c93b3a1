//! Where prompts go: a remote relay, or the dispatcher run in-process.

use async_trait::async_trait;
use chatrelay::dispatch::Dispatcher;
use chatrelay_client::RelayClient;
use chatrelay_types::{InvocationInput, ModelsResponse, Provider};

#[async_trait]
pub trait ChatBackend: Send + Sync {
    /// Model identifiers per provider.
    async fn models(&self) -> anyhow::Result<ModelsResponse>;

    /// Generated text, or a description of what went wrong.
    async fn send(&self, provider: Provider, input: &str, model: &str) -> String;
}

/// Talks to a relay over HTTP.
pub struct RelayBackend {
    client: RelayClient,
}

impl RelayBackend {
    pub fn new(client: RelayClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ChatBackend for RelayBackend {
    async fn models(&self) -> anyhow::Result<ModelsResponse> {
        Ok(self.client.models().await?)
    }

    async fn send(&self, provider: Provider, input: &str, model: &str) -> String {
        self.client.invoke_text(provider, input, Some(model)).await
    }
}

/// Calls providers directly with this process's credentials.
pub struct DirectBackend {
    dispatcher: Dispatcher,
}

impl DirectBackend {
    pub fn new(dispatcher: Dispatcher) -> Self {
        Self { dispatcher }
    }
}

#[async_trait]
impl ChatBackend for DirectBackend {
    async fn models(&self) -> anyhow::Result<ModelsResponse> {
        Ok(self.dispatcher.catalog().to_response())
    }

    async fn send(&self, provider: Provider, input: &str, model: &str) -> String {
        let input = InvocationInput::new(input, Some(model.to_string()));
        self.dispatcher.invoke(provider, &input).await.output.content
    }
}
