pub mod console;
pub mod json;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One corpus-level metric value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricValue {
    pub name: String,
    pub value: f64,
    pub higher_is_better: bool,
}

/// Per-example row in the report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExampleRow {
    pub qid: String,
    pub prediction_text: String,
    pub exact_match: f64,
    pub f1: f64,
    pub duration_ms: u64,
}

/// Everything one evaluation run produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunArtifacts {
    pub task: String,
    pub model: String,
    pub provider: String,
    pub started_at: DateTime<Utc>,
    pub examples: Vec<ExampleRow>,
    pub aggregate: Vec<MetricValue>,
}
