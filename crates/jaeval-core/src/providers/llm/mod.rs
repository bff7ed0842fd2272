//! Generation providers.

pub mod fake;
pub mod openai;

use crate::model::{GenerationRequest, LlmResponse};
use async_trait::async_trait;

pub use fake::FakeClient;
pub use openai::CompletionClient;

/// A greedy-decoding generation capability. Exactly one continuation string
/// is expected back per request.
#[async_trait]
pub trait LlmClient: Send + Sync {
    async fn greedy_until(&self, request: &GenerationRequest) -> anyhow::Result<LlmResponse>;

    fn provider_name(&self) -> &'static str;
}
