//! OpenAI-compatible `/v1/completions` provider.

use super::LlmClient;
use crate::model::{GenerationRequest, LlmResponse};
use async_trait::async_trait;
use serde_json::json;

pub struct CompletionClient {
    pub endpoint: String,
    pub model: String,
    pub api_key: Option<String>,
    client: reqwest::Client,
}

impl CompletionClient {
    pub fn new(endpoint: String, model: String) -> Self {
        Self {
            endpoint,
            model,
            api_key: None,
            client: reqwest::Client::new(),
        }
    }

    pub fn with_api_key(mut self, api_key: String) -> Self {
        self.api_key = Some(api_key);
        self
    }
}

#[async_trait]
impl LlmClient for CompletionClient {
    async fn greedy_until(&self, request: &GenerationRequest) -> anyhow::Result<LlmResponse> {
        let mut body = json!({
            "model": self.model,
            "prompt": request.prompt,
            "temperature": 0.0,
            "stop": request.stop_sequences,
        });
        if let Some(max_tokens) = request.max_tokens {
            body["max_tokens"] = json!(max_tokens);
        }

        let mut req = self
            .client
            .post(&self.endpoint)
            .header("Content-Type", "application/json")
            .json(&body);
        if let Some(key) = &self.api_key {
            req = req.header("Authorization", format!("Bearer {}", key));
        }

        let resp = req.send().await?;
        if !resp.status().is_success() {
            let status = resp.status();
            let error_text = resp.text().await.unwrap_or_else(|_| String::new());
            anyhow::bail!(
                "completion API error (status {}): {}",
                status,
                error_text
            );
        }

        let body: serde_json::Value = resp.json().await?;
        let choices = body
            .get("choices")
            .and_then(|v| v.as_array())
            .ok_or_else(|| anyhow::anyhow!("completion API response missing choices"))?;
        if choices.len() != 1 {
            anyhow::bail!(
                "expected exactly one completion choice, got {}",
                choices.len()
            );
        }
        let text = choices[0]
            .pointer("/text")
            .and_then(|v| v.as_str())
            .ok_or_else(|| anyhow::anyhow!("completion API response missing text"))?
            .to_string();

        Ok(LlmResponse {
            text,
            provider: "openai-completions".to_string(),
            model: self.model.clone(),
            meta: json!({}),
        })
    }

    fn provider_name(&self) -> &'static str {
        "openai-completions"
    }
}
