//! HTTP client for the remote classification capability
//!
//! Speaks the OpenAI-style chat completions protocol, which the hosted
//! inference providers this crawler targets all expose.

use crate::config::ClassifierConfig;
use crate::ValidatorError;
use async_trait::async_trait;
use serde_json::{json, Value};
use std::time::Duration;

/// Capability contract for the opaque remote classifier
///
/// The validator builds a prompt and hands it to this trait; everything
/// about transport, authentication, and providers lives behind it.
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Submits one prompt and returns the raw completion text.
    async fn complete(&self, prompt: &str) -> Result<String, ValidatorError>;
}

/// Chat-completions client backed by reqwest
///
/// The credential comes from the configuration, falling back to the
/// `LLM_API_KEY` environment variable. A missing credential surfaces at
/// call time so the crawl can fail closed instead of refusing to start.
pub struct HttpLlmClient {
    http: reqwest::Client,
    api_key: Option<String>,
    model: String,
    api_base_url: String,
}

impl HttpLlmClient {
    /// Builds a client from the classifier configuration
    ///
    /// # Arguments
    ///
    /// * `config` - Classifier configuration (base URL, model, timeout,
    ///   optional credential)
    ///
    /// # Returns
    ///
    /// * `Ok(HttpLlmClient)` - Ready to submit batches
    /// * `Err(ValidatorError)` - The HTTP client could not be built
    pub fn new(config: &ClassifierConfig) -> Result<Self, ValidatorError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .build()?;

        let api_key = config
            .api_key
            .clone()
            .or_else(|| std::env::var("LLM_API_KEY").ok());

        Ok(Self {
            http,
            api_key,
            model: config.model.clone(),
            api_base_url: config.api_base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl LlmClient for HttpLlmClient {
    async fn complete(&self, prompt: &str) -> Result<String, ValidatorError> {
        let api_key = self
            .api_key
            .as_ref()
            .ok_or(ValidatorError::MissingCredentials)?;

        let request_body = json!({
            "model": self.model,
            "messages": [
                {
                    "role": "user",
                    "content": prompt
                }
            ],
            "temperature": 0.0
        });

        let url = format!("{}/chat/completions", self.api_base_url);
        let response = self
            .http
            .post(&url)
            .header("Authorization", format!("Bearer {}", api_key))
            .json(&request_body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(ValidatorError::Api { status, body });
        }

        let body: Value = response.json().await?;

        body["choices"][0]["message"]["content"]
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| {
                ValidatorError::MalformedResponse(
                    "missing choices[0].message.content".to_string(),
                )
            })
    }
}
