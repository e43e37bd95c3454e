//! Gemini gateway implementation
//!
//! One POST to `{base_url}/models/{model}:generateContent?key=...` per
//! submission. The key travels as a query parameter, so transport errors are
//! stripped of their URL before they are surfaced or logged.

use super::types::{GenerateContentRequest, GenerateContentResponse};
use crate::config::FileBackendConfig;
use async_trait::async_trait;
use consilium_application::ports::director_gateway::{DirectorGateway, GatewayError};
use consilium_domain::{Credential, DirectorPrompt};
use std::time::Duration;
use tracing::{debug, info};

/// Connection settings for [`GeminiGateway`]
#[derive(Debug, Clone)]
pub struct GeminiSettings {
    pub base_url: String,
    pub model: String,
    pub temperature: f64,
    pub timeout: Option<Duration>,
}

impl From<&FileBackendConfig> for GeminiSettings {
    fn from(config: &FileBackendConfig) -> Self {
        Self {
            base_url: config.base_url.clone(),
            model: config.model.clone(),
            temperature: config.temperature,
            timeout: config.timeout(),
        }
    }
}

/// [`DirectorGateway`] backed by the Gemini REST API
pub struct GeminiGateway {
    client: reqwest::Client,
    endpoint: String,
    temperature: f64,
}

impl GeminiGateway {
    /// Build a gateway with its own HTTP client
    pub fn new(settings: GeminiSettings) -> Result<Self, GatewayError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = settings.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| GatewayError::ConnectionError(e.without_url().to_string()))?;

        let endpoint = format!(
            "{}/models/{}:generateContent",
            settings.base_url.trim_end_matches('/'),
            settings.model
        );
        info!(model = %settings.model, "Gemini gateway ready");

        Ok(Self {
            client,
            endpoint,
            temperature: settings.temperature,
        })
    }

    /// Endpoint without the key parameter
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

fn transport_error(error: reqwest::Error) -> GatewayError {
    if error.is_timeout() {
        GatewayError::Timeout
    } else {
        GatewayError::ConnectionError(error.without_url().to_string())
    }
}

#[async_trait]
impl DirectorGateway for GeminiGateway {
    async fn generate(
        &self,
        prompt: &DirectorPrompt,
        credential: &Credential,
    ) -> Result<String, GatewayError> {
        let body = GenerateContentRequest::single_prompt(prompt.as_str(), self.temperature);
        debug!(endpoint = %self.endpoint, "Sending generateContent request");

        let response = self
            .client
            .post(&self.endpoint)
            .query(&[("key", credential.expose())])
            .json(&body)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GatewayError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let envelope: GenerateContentResponse = response.json().await.map_err(|e| {
            if e.is_decode() {
                GatewayError::InvalidResponse(e.without_url().to_string())
            } else {
                transport_error(e)
            }
        })?;

        envelope.first_text().ok_or(GatewayError::EmptyPayload)
    }
}
