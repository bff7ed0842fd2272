//! Scripted in-process provider for tests.

use super::LlmClient;
use crate::model::{GenerationRequest, LlmResponse};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

/// Returns scripted continuations in order (repeating the last one when the
/// script runs out) and records every request it receives.
pub struct FakeClient {
    model: String,
    responses: Mutex<VecDeque<String>>,
    requests: Mutex<Vec<GenerationRequest>>,
}

impl FakeClient {
    pub fn new(model: String) -> Self {
        Self {
            model,
            responses: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn with_response(self, text: String) -> Self {
        self.responses
            .lock()
            .expect("fake responses lock")
            .push_back(text);
        self
    }

    /// Requests seen so far, in call order.
    pub fn requests(&self) -> Vec<GenerationRequest> {
        self.requests.lock().expect("fake requests lock").clone()
    }
}

#[async_trait]
impl LlmClient for FakeClient {
    async fn greedy_until(&self, request: &GenerationRequest) -> anyhow::Result<LlmResponse> {
        self.requests
            .lock()
            .expect("fake requests lock")
            .push(request.clone());
        let mut responses = self.responses.lock().expect("fake responses lock");
        let text = if responses.len() > 1 {
            responses.pop_front().expect("non-empty script")
        } else {
            responses
                .front()
                .cloned()
                .ok_or_else(|| anyhow::anyhow!("FakeClient has no scripted response"))?
        };
        Ok(LlmResponse {
            text,
            provider: "fake".to_string(),
            model: self.model.clone(),
            meta: serde_json::json!({}),
        })
    }

    fn provider_name(&self) -> &'static str {
        "fake"
    }
}
