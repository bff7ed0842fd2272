//! JSONL dataset loading and id-based exclusion.

use crate::config::DatasetPaths;
use crate::errors::HarnessError;
use crate::model::QaRecord;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Train/test splits for one dataset. The train split is empty unless the
/// config names a train file.
#[derive(Debug, Clone, Default)]
pub struct DatasetSplits {
    pub train: Vec<QaRecord>,
    pub test: Vec<QaRecord>,
}

impl DatasetSplits {
    pub fn load(paths: &DatasetPaths) -> Result<Self, HarnessError> {
        let train = match &paths.train {
            Some(p) => load_jsonl(p)?,
            None => Vec::new(),
        };
        let test = load_jsonl(&paths.test)?;
        tracing::info!(
            train = train.len(),
            test = test.len(),
            "loaded dataset splits"
        );
        Ok(Self { train, test })
    }
}

/// Load one `QaRecord` per line. Blank lines are skipped; a malformed line
/// is an error naming the line number.
pub fn load_jsonl(path: &Path) -> Result<Vec<QaRecord>, HarnessError> {
    let file = File::open(path).map_err(|e| HarnessError::Dataset {
        path: path.to_path_buf(),
        detail: e.to_string(),
    })?;
    let mut records = Vec::new();
    for (idx, line) in BufReader::new(file).lines().enumerate() {
        let line = line.map_err(|e| HarnessError::Dataset {
            path: path.to_path_buf(),
            detail: format!("line {}: {}", idx + 1, e),
        })?;
        if line.trim().is_empty() {
            continue;
        }
        let record: QaRecord =
            serde_json::from_str(&line).map_err(|e| HarnessError::Dataset {
                path: path.to_path_buf(),
                detail: format!("line {}: {}", idx + 1, e),
            })?;
        records.push(record);
    }
    Ok(records)
}

/// Drop records whose qid appears in `remove_ids`. Matching is byte-exact:
/// ids are opaque keys, so no case folding or whitespace trimming.
pub fn exclude_ids(records: Vec<QaRecord>, remove_ids: &[String]) -> Vec<QaRecord> {
    if remove_ids.is_empty() {
        return records;
    }
    let before = records.len();
    let kept: Vec<QaRecord> = records
        .into_iter()
        .filter(|r| !remove_ids.iter().any(|id| id == &r.qid))
        .collect();
    if kept.len() != before {
        tracing::debug!(removed = before - kept.len(), "excluded records by id");
    }
    kept
}
