//! The contract the harness expects from any task adapter.

use crate::model::{GenerationRequest, QaRecord};
use crate::providers::tokenizer::Tokenizer;
use crate::report::MetricValue;
use jaeval_metrics::{QaPrediction, QaReference};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

/// Per-example scoring output: the prediction/reference pair kept for corpus
/// aggregation, plus the example's own metric values.
#[derive(Debug, Clone)]
pub struct ExampleResult {
    pub qid: String,
    pub prediction: QaPrediction,
    pub reference: QaReference,
    pub exact_match: f64,
    pub f1: f64,
}

pub trait Task: Send + Sync + std::fmt::Debug {
    /// Registry name, e.g. `rcqa-1.0-0.1`.
    fn name(&self) -> String;
    fn version(&self) -> &'static str;
    fn prompt_version(&self) -> &'static str;
    /// Zero-shot preamble prepended to every prompt.
    fn description(&self) -> &str;

    fn has_training_docs(&self) -> bool;
    fn has_validation_docs(&self) -> bool;
    fn has_test_docs(&self) -> bool;

    /// Apply the task's id-exclusion list to the test split.
    fn filter_test_docs(&self, docs: Vec<QaRecord>) -> Vec<QaRecord>;

    /// Document-to-prompt formatting. The result ends in the template's
    /// fixed answer cue, ready for completion.
    fn doc_to_text(&self, doc: &QaRecord) -> String;

    /// The gold continuation for a document.
    fn doc_to_target(&self, doc: &QaRecord) -> String;

    /// Separator between few-shot examples.
    fn fewshot_sep(&self) -> &str {
        "\n\n"
    }

    /// Description, `k` sampled train examples, then the prompt for `doc`.
    fn fewshot_context(
        &self,
        doc: &QaRecord,
        k: usize,
        train: &[QaRecord],
        rng: &mut StdRng,
    ) -> anyhow::Result<String> {
        if k == 0 {
            return Ok(format!("{}{}", self.description(), self.doc_to_text(doc)));
        }
        anyhow::ensure!(
            self.has_training_docs(),
            "task {} has no training docs for {}-shot evaluation",
            self.name(),
            k
        );
        anyhow::ensure!(
            !train.is_empty(),
            "{}-shot evaluation requested but the train split is empty",
            k
        );
        let mut pool: Vec<&QaRecord> = train.iter().filter(|r| r.qid != doc.qid).collect();
        pool.shuffle(rng);
        let shots: Vec<String> = pool
            .into_iter()
            .take(k)
            .map(|d| format!("{}{}", self.doc_to_text(d), self.doc_to_target(d)))
            .collect();
        Ok(format!(
            "{}{}{}{}",
            self.description(),
            shots.join(self.fewshot_sep()),
            self.fewshot_sep(),
            self.doc_to_text(doc)
        ))
    }

    /// Build the generation request for a document: the full context string,
    /// the template's stop sequence, and (when dynamic max length is on and
    /// a tokenizer is available) a token budget equal to the gold answer's
    /// encoded length.
    fn construct_request(
        &self,
        doc: &QaRecord,
        ctx: &str,
        tokenizer: Option<&dyn Tokenizer>,
    ) -> GenerationRequest;

    /// Score one example. Errors unless `results` holds exactly one output.
    fn process_results(&self, doc: &QaRecord, results: &[String]) -> anyhow::Result<ExampleResult>;

    /// Reduce the full prediction/reference list to corpus-level metrics.
    fn aggregate(
        &self,
        predictions: &[QaPrediction],
        references: &[QaReference],
    ) -> anyhow::Result<Vec<MetricValue>>;

    fn higher_is_better(&self) -> Vec<(&'static str, bool)>;
}
