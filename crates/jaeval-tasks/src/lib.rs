//! Task adapters and the task registry.

pub mod rcqa;

pub use rcqa::{PromptTemplate, RcqaTask};

use jaeval_core::task::Task;

/// All registered tasks, one per prompt template variant.
pub fn construct_tasks() -> Vec<Box<dyn Task>> {
    PromptTemplate::ALL
        .into_iter()
        .map(|t| Box::new(RcqaTask::new(t)) as Box<dyn Task>)
        .collect()
}

/// Resolve a registry name like `rcqa-1.0-0.2` to its task.
pub fn lookup(name: &str) -> Option<RcqaTask> {
    PromptTemplate::ALL
        .into_iter()
        .map(RcqaTask::new)
        .find(|t| t.name() == name)
}
