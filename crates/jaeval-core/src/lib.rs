//! Core of the jaeval harness: data model, dataset loading, the task adapter
//! contract, generation providers, the evaluation runner, and reports.

pub mod config;
pub mod dataset;
pub mod engine;
pub mod errors;
pub mod model;
pub mod providers;
pub mod report;
pub mod task;

pub use config::EvalConfig;
pub use engine::runner::{RunOptions, Runner};
pub use model::{ContextDocument, GenerationRequest, LlmResponse, QaRecord};
pub use report::RunArtifacts;
pub use task::Task;
