//! Relay HTTP client.

use chatrelay_types::{InvocationInput, InvokeRequest, ModelsResponse, Provider};
use reqwest::Client;
use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::error::ClientError;

/// Shown when the relay answers without `output.content`.
pub const NO_CONTENT: &str = "No content received";

/// Client for one relay instance.
#[derive(Clone)]
pub struct RelayClient {
    http: Client,
    base_url: Url,
}

impl RelayClient {
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(http: Client, base_url: &str) -> Result<Self, ClientError> {
        let mut base_url = Url::parse(base_url)?;
        // Url::join replaces the last segment unless the path ends with '/'
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url, ClientError> {
        Ok(self.base_url.join(path.trim_start_matches('/'))?)
    }

    /// Send one prompt and return the relay's `output.content`.
    ///
    /// A reply without `output.content` yields [`NO_CONTENT`] rather than an error.
    pub async fn invoke(
        &self,
        provider: Provider,
        input: &str,
        model: Option<&str>,
    ) -> Result<String, ClientError> {
        let url = self.endpoint(&provider.invoke_path())?;
        let body = InvokeRequest::new(InvocationInput::new(input, model.map(str::to_string)));
        debug!(%url, model = model.unwrap_or("<default>"), "Invoking relay");

        let response = self.http.post(url).json(&body).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let reply: Value = response.json().await?;
        Ok(reply
            .get("output")
            .and_then(|o| o.get("content"))
            .and_then(Value::as_str)
            .unwrap_or(NO_CONTENT)
            .to_string())
    }

    /// Like [`invoke`](Self::invoke), but failures come back as display text.
    pub async fn invoke_text(&self, provider: Provider, input: &str, model: Option<&str>) -> String {
        match self.invoke(provider, input, model).await {
            Ok(content) => content,
            Err(e) => e.render(),
        }
    }

    /// Fetch the relay's model catalog.
    pub async fn models(&self) -> Result<ModelsResponse, ClientError> {
        let url = self.endpoint("models")?;
        let response = self.http.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response.json().await?)
    }
}
