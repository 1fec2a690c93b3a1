//! Static model catalog, fixed at startup.

use std::collections::HashMap;

use chatrelay_types::{ModelsResponse, Provider};

use crate::config::Config;

#[derive(Debug, Clone)]
struct Entry {
    default_model: String,
    models: Vec<String>,
}

/// Model identifiers offered per provider.
///
/// Nothing here is checked against the upstream provider; listed models may
/// be stale and unlisted ones are still forwarded.
#[derive(Debug, Clone)]
pub struct ModelCatalog {
    entries: HashMap<Provider, Entry>,
}

impl ModelCatalog {
    pub fn from_config(config: &Config) -> Self {
        let entries = Provider::ALL
            .into_iter()
            .map(|provider| {
                let settings = config.provider(provider);
                let entry = Entry {
                    default_model: settings.default_model,
                    models: settings.models,
                };
                (provider, entry)
            })
            .collect();
        Self { entries }
    }

    /// Ordered model identifiers for a provider, as configured.
    pub fn models(&self, provider: Provider) -> &[String] {
        self.entries
            .get(&provider)
            .map(|e| e.models.as_slice())
            .unwrap_or_default()
    }

    /// Model substituted when an invocation does not name one.
    pub fn default_model(&self, provider: Provider) -> &str {
        self.entries
            .get(&provider)
            .map(|e| e.default_model.as_str())
            .unwrap_or_else(|| provider.default_model())
    }

    pub fn contains(&self, provider: Provider, model: &str) -> bool {
        self.models(provider).iter().any(|m| m == model)
    }

    /// Wire form served by `GET /models`.
    pub fn to_response(&self) -> ModelsResponse {
        let mut response = ModelsResponse::default();
        for provider in Provider::ALL {
            *response.models_mut(provider) = self.models(provider).to_vec();
        }
        response
    }
}

impl Default for ModelCatalog {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}
