//! JSON report writer.

use crate::report::RunArtifacts;
use std::path::Path;

pub fn save_json(artifacts: &RunArtifacts, path: &Path) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(artifacts)?;
    std::fs::write(path, json)?;
    tracing::info!(path = %path.display(), "wrote JSON report");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::{ExampleRow, MetricValue};

    #[test]
    fn report_round_trips_through_json() -> anyhow::Result<()> {
        let artifacts = RunArtifacts {
            task: "rcqa-1.0-0.1".to_string(),
            model: "m".to_string(),
            provider: "fake".to_string(),
            started_at: chrono::Utc::now(),
            examples: vec![ExampleRow {
                qid: "q-1".to_string(),
                prediction_text: "東京".to_string(),
                exact_match: 1.0,
                f1: 1.0,
                duration_ms: 12,
            }],
            aggregate: vec![MetricValue {
                name: "exact_match".to_string(),
                value: 1.0,
                higher_is_better: true,
            }],
        };

        let dir = tempfile::tempdir()?;
        let path = dir.path().join("report.json");
        save_json(&artifacts, &path)?;

        let text = std::fs::read_to_string(&path)?;
        let parsed: RunArtifacts = serde_json::from_str(&text)?;
        assert_eq!(parsed.task, "rcqa-1.0-0.1");
        assert_eq!(parsed.examples.len(), 1);
        assert_eq!(parsed.aggregate[0].name, "exact_match");
        Ok(())
    }
}
