use crate::error::{NarrativeError, Result};
use reqwest::Client;
use serde_json::json;
use std::time::Duration;
use tokio::time::timeout;

pub const DEFAULT_MAX_TOKENS: u32 = 4096;
pub const DEFAULT_TEMPERATURE: f32 = 0.2;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Client for an OpenAI-compatible chat-completion endpoint.
#[derive(Clone)]
pub struct AssistClient {
    client: Client,
    endpoint: String,
    api_key: String,
    model: String,
}

impl AssistClient {
    pub fn new(endpoint: String, api_key: String, model: String) -> Self {
        Self {
            client: Client::new(),
            endpoint,
            api_key,
            model,
        }
    }

    /// Sends one chat completion and returns the first choice's content. The
    /// whole exchange runs under a per-request deadline.
    pub async fn generate(
        &self,
        prompt: &str,
        max_tokens: u32,
        temperature: f32,
    ) -> Result<String> {
        let body = json!({
            "model": self.model,
            "messages": [{"role": "user", "content": prompt}],
            "max_tokens": max_tokens,
            "temperature": temperature,
        });

        let mut request = self.client.post(&self.endpoint).json(&body);
        if !self.api_key.is_empty() {
            request = request.bearer_auth(&self.api_key);
        }

        let exchange = async {
            let response = request
                .send()
                .await
                .map_err(|e| NarrativeError::AssistError(e.to_string()))?;

            let status = response.status();
            if !status.is_success() {
                let text = response.text().await.unwrap_or_default();
                return Err(NarrativeError::AssistError(format!(
                    "chat completion failed (status {}): {}",
                    status, text
                )));
            }

            let payload: serde_json::Value = response
                .json()
                .await
                .map_err(|e| NarrativeError::AssistError(e.to_string()))?;

            payload
                .get("choices")
                .and_then(|c| c.get(0))
                .and_then(|c| c.get("message"))
                .and_then(|m| m.get("content"))
                .and_then(|c| c.as_str())
                .map(|s| s.trim().to_string())
                .ok_or_else(|| {
                    NarrativeError::AssistError(
                        "response missing choices[0].message.content".to_string(),
                    )
                })
        };

        timeout(REQUEST_TIMEOUT, exchange).await.map_err(|_| {
            NarrativeError::AssistError(format!(
                "chat completion timed out after {}s",
                REQUEST_TIMEOUT.as_secs()
            ))
        })?
    }
}
