//! Provider registry for managing LLM provider instances.

use std::collections::HashMap;
use std::sync::Arc;

use chatrelay_types::Provider;
use reqwest::Client;
use tracing::{info, warn};

use super::gemini::GeminiProvider;
use super::openai::OpenAICompatibleProvider;
use super::provider::LLMProvider;
use crate::config::Config;

/// Registry of LLM providers, keyed by provider type.
#[derive(Clone, Default)]
pub struct ProviderRegistry {
    providers: HashMap<Provider, Arc<dyn LLMProvider>>,
}

impl ProviderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Initialize providers from config, reading API keys through `lookup`.
    ///
    /// Providers whose key is missing are left unregistered; invoking them
    /// fails at dispatch time rather than at startup.
    pub fn from_config(config: &Config, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let client = Client::new();
        let mut registry = Self::new();

        for provider in Provider::ALL {
            let settings = config.provider(provider);
            let Some(api_key) = lookup(&settings.api_key_env).filter(|k| !k.is_empty()) else {
                warn!(
                    provider = %provider,
                    env = %settings.api_key_env,
                    "API key not set, provider disabled"
                );
                continue;
            };

            let implementation: Arc<dyn LLMProvider> = match provider {
                Provider::Google => Arc::new(GeminiProvider::new(
                    client.clone(),
                    settings.base_url.clone(),
                    api_key,
                )),
                Provider::Groq => Arc::new(OpenAICompatibleProvider::new(
                    client.clone(),
                    settings.base_url.clone(),
                    Some(api_key),
                )),
            };
            registry.register(provider, implementation);
            info!(provider = %provider, base_url = %settings.base_url, "Registered provider");
        }

        if registry.providers.is_empty() {
            warn!("No LLM providers configured. Set GOOGLE_API_KEY or GROQ_API_KEY.");
        }

        registry
    }

    /// Register a provider implementation.
    pub fn register(&mut self, provider: Provider, implementation: Arc<dyn LLMProvider>) {
        self.providers.insert(provider, implementation);
    }

    /// Get a provider by type.
    pub fn get(&self, provider: Provider) -> Option<Arc<dyn LLMProvider>> {
        self.providers.get(&provider).cloned()
    }

    /// Registered providers, in catalog order.
    pub fn providers(&self) -> Vec<Provider> {
        Provider::ALL
            .into_iter()
            .filter(|p| self.providers.contains_key(p))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registers_only_providers_with_keys() {
        let config = Config::default();
        let registry = ProviderRegistry::from_config(&config, |name| {
            (name == "GROQ_API_KEY").then(|| "gsk_test".to_string())
        });
        assert!(registry.get(Provider::Groq).is_some());
        assert!(registry.get(Provider::Google).is_none());
        assert_eq!(registry.providers(), [Provider::Groq]);
    }

    #[test]
    fn empty_key_counts_as_missing() {
        let config = Config::default();
        let registry = ProviderRegistry::from_config(&config, |_| Some(String::new()));
        assert!(registry.get(Provider::Google).is_none());
        assert!(registry.get(Provider::Groq).is_none());
    }

    #[test]
    fn honors_custom_key_variable() {
        let mut config = Config::default();
        config.providers.google.api_key_env = Some("ALT_GOOGLE".to_string());
        let registry = ProviderRegistry::from_config(&config, |name| match name {
            "ALT_GOOGLE" => Some("k".to_string()),
            _ => None,
        });
        assert!(registry.get(Provider::Google).is_some());
    }
}
