use std::io::ErrorKind;
use std::path::Path;

use tokio::fs;

use chatrelay_types::Provider;
use serde::Deserialize;
use thiserror::Error;

// ============================================================================
// Config (root)
// ============================================================================

#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub providers: ProvidersConfig,
}

impl Config {
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = match fs::read_to_string(path).await {
            Ok(c) => c,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(ConfigError::Io(e)),
        };
        Ok(serde_saphyr::from_str(&contents)?)
    }

    /// Apply environment overrides (`PORT`).
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<(), ConfigError> {
        if let Some(value) = lookup("PORT") {
            self.server.port = value.trim().parse().map_err(|_| ConfigError::InvalidEnv {
                name: "PORT".to_string(),
                value,
            })?;
        }
        Ok(())
    }

    /// Effective settings for a provider, with built-in defaults filled in.
    pub fn provider(&self, provider: Provider) -> ProviderSettings {
        let overrides = self.providers.get(provider);
        ProviderSettings {
            base_url: overrides
                .base_url
                .clone()
                .unwrap_or_else(|| default_base_url(provider).to_string()),
            api_key_env: overrides
                .api_key_env
                .clone()
                .unwrap_or_else(|| default_api_key_env(provider).to_string()),
            default_model: overrides
                .default_model
                .clone()
                .unwrap_or_else(|| provider.default_model().to_string()),
            models: overrides
                .models
                .clone()
                .unwrap_or_else(|| default_models(provider)),
        }
    }
}

// ============================================================================
// ServerConfig
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Optional HTTP-layer timeout. Unset means requests wait on the provider
    /// for as long as the transport allows.
    #[serde(default)]
    pub request_timeout_seconds: Option<u64>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            request_timeout_seconds: None,
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8000
}

// ============================================================================
// ProvidersConfig
// ============================================================================

#[derive(Debug, Default, Deserialize)]
pub struct ProvidersConfig {
    #[serde(default)]
    pub google: ProviderConfig,
    #[serde(default)]
    pub groq: ProviderConfig,
}

impl ProvidersConfig {
    pub fn get(&self, provider: Provider) -> &ProviderConfig {
        match provider {
            Provider::Google => &self.google,
            Provider::Groq => &self.groq,
        }
    }
}

/// Per-provider overrides. Anything left unset falls back to the built-in value.
#[derive(Debug, Default, Deserialize)]
pub struct ProviderConfig {
    #[serde(default)]
    pub base_url: Option<String>,
    /// Name of the environment variable holding the API key.
    #[serde(default)]
    pub api_key_env: Option<String>,
    #[serde(default)]
    pub default_model: Option<String>,
    #[serde(default)]
    pub models: Option<Vec<String>>,
}

/// Fully resolved provider settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderSettings {
    pub base_url: String,
    pub api_key_env: String,
    pub default_model: String,
    pub models: Vec<String>,
}

fn default_base_url(provider: Provider) -> &'static str {
    match provider {
        Provider::Google => "https://generativelanguage.googleapis.com/v1beta",
        Provider::Groq => "https://api.groq.com/openai/v1",
    }
}

fn default_api_key_env(provider: Provider) -> &'static str {
    match provider {
        Provider::Google => "GOOGLE_API_KEY",
        Provider::Groq => "GROQ_API_KEY",
    }
}

fn default_models(provider: Provider) -> Vec<String> {
    let models: &[&str] = match provider {
        Provider::Google => &["gemini-2.5-flash", "gemini-2.5-flash-lite"],
        Provider::Groq => &[
            "llama-3.3-70b-versatile",
            "llama-3.1-8b-instant",
            "meta-llama/llama-4-maverick-17b-128e-instruct",
            "gemma2-9b-it",
            "deepseek-r1-distill-llama-70b",
        ],
    };
    models.iter().map(|m| m.to_string()).collect()
}

// ============================================================================
// ConfigError
// ============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    Yaml(#[from] serde_saphyr::Error),

    #[error("invalid value for {name}: '{value}'")]
    InvalidEnv { name: String, value: String },
}

// ============================================================================
// Tests
// ============================================================================
