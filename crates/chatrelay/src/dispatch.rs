//! Request dispatch and response normalization across providers.
//!
//! The dispatcher owns the only provider-agnostic logic in the relay: pick
//! the model, build the canonical prompt, call the provider, and flatten the
//! outcome into text. Internally outcomes stay typed (`Generation` vs
//! `DispatchError`); they only become plain strings in [`Dispatcher::invoke`].

use std::sync::Arc;

use chatrelay_types::{ErrorCategory, InvocationInput, InvocationOutput, Provider};
use futures::future::join_all;
use thiserror::Error;
use tracing::{Instrument, debug, info_span, warn};
use ulid::Ulid;

use crate::catalog::ModelCatalog;
use crate::config::Config;
use crate::llm::prompt::build_prompt;
use crate::llm::{ChatRequest, LLMError, ProviderRegistry, Usage};

/// Successful generation.
#[derive(Debug, Clone)]
pub struct Generation {
    pub content: String,
    /// Model identifier the request was sent with.
    pub model: String,
    pub usage: Option<Usage>,
}

/// Why a generation failed.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("provider '{0}' is not configured (missing API key)")]
    NotConfigured(Provider),

    #[error(transparent)]
    Llm(#[from] LLMError),
}

impl DispatchError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            DispatchError::NotConfigured(_) => ErrorCategory::Unclassified,
            DispatchError::Llm(e) => e.category(),
        }
    }

    /// Text returned to callers in place of generated output.
    pub fn render(&self) -> String {
        self.category().render(self)
    }
}

/// One invocation as seen by the HTTP layer.
#[derive(Debug, Clone)]
pub struct Invocation {
    pub run_id: String,
    pub output: InvocationOutput,
}

/// Routes invocations to the configured providers.
#[derive(Clone)]
pub struct Dispatcher {
    registry: ProviderRegistry,
    catalog: Arc<ModelCatalog>,
}

impl Dispatcher {
    pub fn new(registry: ProviderRegistry, catalog: Arc<ModelCatalog>) -> Self {
        Self { registry, catalog }
    }

    /// Build the registry and catalog from config, reading credentials through `lookup`.
    pub fn from_config(config: &Config, lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self::new(
            ProviderRegistry::from_config(config, lookup),
            Arc::new(ModelCatalog::from_config(config)),
        )
    }

    pub fn catalog(&self) -> &ModelCatalog {
        &self.catalog
    }

    /// Providers that have credentials.
    pub fn configured_providers(&self) -> Vec<Provider> {
        self.registry.providers()
    }

    /// Requested model, or the provider default when none was given.
    pub fn resolve_model(&self, provider: Provider, model: Option<&str>) -> String {
        model
            .map(str::to_string)
            .unwrap_or_else(|| self.catalog.default_model(provider).to_string())
    }

    /// Generate text for `input` with the given provider.
    pub async fn generate(
        &self,
        provider: Provider,
        input: &InvocationInput,
    ) -> Result<Generation, DispatchError> {
        let model = self.resolve_model(provider, input.model.as_deref());
        let implementation = self
            .registry
            .get(provider)
            .ok_or(DispatchError::NotConfigured(provider))?;

        let request = ChatRequest {
            model: model.clone(),
            messages: build_prompt(&input.input),
        };
        let response = implementation.chat(request).await?;

        debug!(
            served_by = response.model.as_deref().unwrap_or(&model),
            finish_reason = response.finish_reason.as_deref().unwrap_or("unknown"),
            total_tokens = response.usage.map(|u| u.total_tokens),
            "Generation complete"
        );

        Ok(Generation {
            content: response.content,
            model,
            usage: response.usage,
        })
    }

    /// Generate text and flatten any failure into the returned content.
    pub async fn invoke(&self, provider: Provider, input: &InvocationInput) -> Invocation {
        let run_id = Ulid::new().to_string();
        let model = self.resolve_model(provider, input.model.as_deref());
        let span = info_span!("invoke", run_id = %run_id, provider = %provider, model = %model);

        let content = async {
            match self.generate(provider, input).await {
                Ok(generation) => generation.content,
                Err(e) => {
                    warn!(error = %e, category = ?e.category(), "Invocation failed");
                    e.render()
                }
            }
        }
        .instrument(span)
        .await;

        Invocation {
            run_id,
            output: InvocationOutput { content },
        }
    }

    /// Invoke every input concurrently, preserving input order in the result.
    pub async fn invoke_batch(
        &self,
        provider: Provider,
        inputs: &[InvocationInput],
    ) -> Vec<Invocation> {
        join_all(inputs.iter().map(|input| self.invoke(provider, input))).await
    }
}
