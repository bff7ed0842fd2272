//! Shared data model for the harness.

use serde::{Deserialize, Serialize};

/// A titled passage provided as candidate supporting text for a question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContextDocument {
    pub title: String,
    pub text: String,
}

/// One dataset example. Immutable once loaded; records are processed
/// independently of each other.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QaRecord {
    pub qid: String,
    pub question: String,
    pub answer: String,
    #[serde(default)]
    pub documents: Vec<ContextDocument>,
}

/// A greedy-decoding generation request: complete `prompt` until one of the
/// stop sequences or until `max_tokens` new tokens, whichever comes first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub prompt: String,
    pub stop_sequences: Vec<String>,
    pub max_tokens: Option<usize>,
}

/// One continuation from a provider.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LlmResponse {
    pub text: String,
    pub provider: String,
    pub model: String,
    #[serde(default)]
    pub meta: serde_json::Value,
}
