use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::configuration::LlmSettings;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Generation API error (status {status}): {message}")]
    Api { status: u16, message: String },
}

/// A text completion backend.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, LlmError>;
}

/// Client for a locally running Ollama server's `/api/generate` endpoint.
pub struct OllamaClient {
    client: Client,
    url: String,
    model: String,
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
}

#[derive(Deserialize)]
struct GenerateResponse {
    response: String,
}

impl OllamaClient {
    pub fn new(settings: &LlmSettings) -> Self {
        OllamaClient {
            client: Client::new(),
            url: format!("{}/api/generate", settings.base_url.trim_end_matches('/')),
            model: settings.model.clone(),
        }
    }
}

#[async_trait]
impl TextGenerator for OllamaClient {
    async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
        let res = self
            .client
            .post(&self.url)
            .json(&GenerateRequest {
                model: &self.model,
                prompt,
                stream: false,
            })
            .send()
            .await?;

        let status = res.status();
        if !status.is_success() {
            let message = res.text().await.unwrap_or_default();
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body = res.json::<GenerateResponse>().await?;
        log::info!("Generated {} chars with {}", body.response.len(), self.model);

        Ok(body.response.trim().to_string())
    }
}
