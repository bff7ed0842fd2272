//! YAML eval config (`jaeval.yaml`) and its settings block.

use crate::errors::HarnessError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

fn default_version() -> u32 {
    1
}

fn default_true() -> bool {
    true
}

fn default_timeout() -> u64 {
    30
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EvalConfig {
    #[serde(default = "default_version")]
    pub version: u32,
    /// Registry name, e.g. `rcqa-1.0-0.1`.
    pub task: String,
    /// Model identifier forwarded to the provider.
    pub model: String,
    /// Completion endpoint URL, e.g. `http://localhost:8080/v1/completions`.
    pub endpoint: String,
    pub dataset: DatasetPaths,
    #[serde(default)]
    pub settings: Settings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DatasetPaths {
    /// Train split, required only for few-shot evaluation.
    #[serde(default)]
    pub train: Option<PathBuf>,
    pub test: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    #[serde(default)]
    pub num_fewshot: usize,
    /// Cap generation length at the token count of the gold answer.
    #[serde(default = "default_true")]
    pub dynamic_max_length: bool,
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
    #[serde(default)]
    pub seed: Option<u64>,
    /// Evaluate at most this many test documents.
    #[serde(default)]
    pub limit: Option<usize>,
    /// Cap on context documents per prompt; task default when unset.
    #[serde(default)]
    pub top_k: Option<usize>,
    #[serde(default)]
    pub tokenizer: TokenizerKind,
    /// Test-split record ids to exclude, matched byte-exactly.
    #[serde(default)]
    pub remove_ids: Vec<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            num_fewshot: 0,
            dynamic_max_length: true,
            timeout_seconds: default_timeout(),
            seed: None,
            limit: None,
            top_k: None,
            tokenizer: TokenizerKind::default(),
            remove_ids: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenizerKind {
    #[default]
    Char,
    None,
}

impl EvalConfig {
    pub fn from_yaml_file(path: &Path) -> Result<Self, HarnessError> {
        let raw = std::fs::read_to_string(path)
            .map_err(|_| HarnessError::MissingConfig(path.to_path_buf()))?;
        serde_yaml::from_str(&raw).map_err(|e| HarnessError::ConfigParse {
            path: path.to_path_buf(),
            detail: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const MINIMAL: &str = "\
task: rcqa-1.0-0.1
model: my-model
endpoint: http://localhost:8080/v1/completions
dataset:
  test: data/test.jsonl
";

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut f = tempfile::NamedTempFile::new().expect("tempfile");
        f.write_all(contents.as_bytes()).expect("write config");
        f
    }

    #[test]
    fn minimal_config_gets_defaults() {
        let f = write_config(MINIMAL);
        let cfg = EvalConfig::from_yaml_file(f.path()).expect("load");
        assert_eq!(cfg.version, 1);
        assert_eq!(cfg.settings.num_fewshot, 0);
        assert!(cfg.settings.dynamic_max_length);
        assert_eq!(cfg.settings.timeout_seconds, 30);
        assert_eq!(cfg.settings.tokenizer, TokenizerKind::Char);
        assert!(cfg.dataset.train.is_none());
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let f = write_config(&format!("{}typo_field: 1\n", MINIMAL));
        let err = EvalConfig::from_yaml_file(f.path()).expect_err("unknown field");
        assert!(matches!(err, HarnessError::ConfigParse { .. }));
        assert!(err.to_string().contains("typo_field"));
    }

    #[test]
    fn missing_file_is_a_distinct_error() {
        let err = EvalConfig::from_yaml_file(Path::new("does/not/exist.yaml"))
            .expect_err("missing file");
        assert!(matches!(err, HarnessError::MissingConfig(_)));
    }

    #[test]
    fn settings_block_round_trips() {
        let f = write_config(&format!(
            "{}settings:\n  num_fewshot: 2\n  dynamic_max_length: false\n  tokenizer: none\n  remove_ids: [\"q-3\"]\n",
            MINIMAL
        ));
        let cfg = EvalConfig::from_yaml_file(f.path()).expect("load");
        assert_eq!(cfg.settings.num_fewshot, 2);
        assert!(!cfg.settings.dynamic_max_length);
        assert_eq!(cfg.settings.tokenizer, TokenizerKind::None);
        assert_eq!(cfg.settings.remove_ids, vec!["q-3".to_string()]);
    }
}
