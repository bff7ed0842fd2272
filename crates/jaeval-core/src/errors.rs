//! Typed error kinds callers dispatch on; everything else travels as
//! `anyhow::Error` with context.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum HarnessError {
    #[error("config file not found: {}", .0.display())]
    MissingConfig(PathBuf),

    #[error("failed to parse config {}: {detail}", .path.display())]
    ConfigParse { path: PathBuf, detail: String },

    #[error("dataset error in {}: {detail}", .path.display())]
    Dataset { path: PathBuf, detail: String },

    #[error("unknown task: {0}")]
    UnknownTask(String),
}

impl HarnessError {
    /// True for errors the CLI reports as configuration mistakes (exit code
    /// 2) rather than run failures.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            HarnessError::MissingConfig(_)
                | HarnessError::ConfigParse { .. }
                | HarnessError::UnknownTask(_)
        )
    }
}
