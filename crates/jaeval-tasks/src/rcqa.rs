//! RCQA: Japanese reading-comprehension question answering.
//!
//! Each record carries a ranked list of candidate context documents, a
//! question, and a gold answer span. The adapter concatenates up to
//! `top_k` documents with the question under one of four fixed prompt
//! templates and scores the greedy continuation with exact-match / F1.

use jaeval_core::dataset;
use jaeval_core::model::{GenerationRequest, QaRecord};
use jaeval_core::providers::tokenizer::Tokenizer;
use jaeval_core::report::MetricValue;
use jaeval_core::task::{ExampleResult, Task};
use jaeval_metrics::{GoldAnswers, QaPrediction, QaReference};

pub const VERSION: &str = "1.0";

/// Default cap on context documents per prompt.
pub const TOP_K_LIMIT: usize = 10;

const JA_ALPACA_INSTRUCTION: &str = "与えられた文脈から、質問に対する答えを抜き出してください。";

/// The four fixed prompt formatting strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptTemplate {
    /// `[題名]`/`[問題]`-labelled template (jaqket style).
    Jaqket,
    /// Plain 文章/質問/回答 template (fintan style).
    Fintan,
    /// Instruction-following template (japanese-alpaca style).
    JaAlpaca,
    /// Dialogue template with `<NL>` separators (rinna instruction-sft style).
    RinnaSft,
}

impl PromptTemplate {
    pub const ALL: [PromptTemplate; 4] = [
        PromptTemplate::Jaqket,
        PromptTemplate::Fintan,
        PromptTemplate::JaAlpaca,
        PromptTemplate::RinnaSft,
    ];

    pub fn prompt_version(self) -> &'static str {
        match self {
            PromptTemplate::Jaqket => "0.1",
            PromptTemplate::Fintan => "0.2",
            PromptTemplate::JaAlpaca => "0.3",
            PromptTemplate::RinnaSft => "0.4",
        }
    }

    /// Separator between context documents; also the stop sequence.
    pub fn sep(self) -> &'static str {
        match self {
            PromptTemplate::RinnaSft => "<NL>",
            _ => "\n",
        }
    }

    pub fn fewshot_sep(self) -> &'static str {
        match self {
            PromptTemplate::RinnaSft => "<NL>",
            _ => "\n\n",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            PromptTemplate::Jaqket => "[題名]と[問題]から[質問]に対する[答え]を抜き出しなさい\n\n",
            PromptTemplate::Fintan => {
                "質問に対する回答を文章から一言で抽出してください。回答は名詞で答えてください。\n\n"
            }
            PromptTemplate::JaAlpaca => {
                "以下は、タスクを説明する指示と、文脈のある入力の組み合わせです。要求を適切に満たす応答を書きなさい。\n\n"
            }
            PromptTemplate::RinnaSft => {
                "ユーザー: 与えられた文脈から、質問に対する答えを抜き出してください。<NL>システム: 分かりました。<NL>"
            }
        }
    }
}

#[derive(Debug)]
pub struct RcqaTask {
    template: PromptTemplate,
    top_k: usize,
    remove_ids: Vec<String>,
    dynamic_max_length: bool,
}

impl RcqaTask {
    pub fn new(template: PromptTemplate) -> Self {
        Self {
            template,
            top_k: TOP_K_LIMIT,
            remove_ids: Vec::new(),
            dynamic_max_length: true,
        }
    }

    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    pub fn with_remove_ids(mut self, remove_ids: Vec<String>) -> Self {
        self.remove_ids = remove_ids;
        self
    }

    pub fn with_dynamic_max_length(mut self, on: bool) -> Self {
        self.dynamic_max_length = on;
        self
    }

    pub fn template(&self) -> PromptTemplate {
        self.template
    }

    /// Body texts of the top-k documents joined by the separator. Used by
    /// every template except the titled jaqket one.
    fn context_block(&self, doc: &QaRecord) -> String {
        doc.documents
            .iter()
            .take(self.top_k)
            .map(|d| d.text.as_str())
            .collect::<Vec<_>>()
            .join(self.template.sep())
    }
}

impl Task for RcqaTask {
    fn name(&self) -> String {
        format!("rcqa-{}-{}", VERSION, self.template.prompt_version())
    }

    fn version(&self) -> &'static str {
        VERSION
    }

    fn prompt_version(&self) -> &'static str {
        self.template.prompt_version()
    }

    fn description(&self) -> &str {
        self.template.description()
    }

    fn has_training_docs(&self) -> bool {
        true
    }

    fn has_validation_docs(&self) -> bool {
        false
    }

    fn has_test_docs(&self) -> bool {
        true
    }

    fn filter_test_docs(&self, docs: Vec<QaRecord>) -> Vec<QaRecord> {
        dataset::exclude_ids(docs, &self.remove_ids)
    }

    fn doc_to_text(&self, doc: &QaRecord) -> String {
        let sep = self.template.sep();
        match self.template {
            PromptTemplate::Jaqket => {
                let context = doc
                    .documents
                    .iter()
                    .take(self.top_k)
                    .map(|d| format!("[題名]:{}{}[問題]:{}", d.title, sep, d.text))
                    .collect::<Vec<_>>()
                    .join(sep);
                format!("{}{}[質問]:{}{}[答え]:", context, sep, doc.question, sep)
            }
            PromptTemplate::Fintan => format!(
                "文章:{}{}質問:{}{}回答:",
                self.context_block(doc),
                sep,
                doc.question,
                sep
            ),
            PromptTemplate::JaAlpaca => {
                let input = format!("文脈：{}\n質問：{}", self.context_block(doc), doc.question);
                format!(
                    "### 指示:\n{}\n\n### 入力:\n{}\n\n### 応答:\n",
                    JA_ALPACA_INSTRUCTION, input
                )
            }
            PromptTemplate::RinnaSft => {
                let input = format!(
                    "文脈：{}{}質問：{}",
                    self.context_block(doc),
                    sep,
                    doc.question
                );
                format!("ユーザー: {}{}システム: ", input, sep)
            }
        }
    }

    fn doc_to_target(&self, doc: &QaRecord) -> String {
        doc.answer.clone()
    }

    fn fewshot_sep(&self) -> &str {
        self.template.fewshot_sep()
    }

    fn construct_request(
        &self,
        doc: &QaRecord,
        ctx: &str,
        tokenizer: Option<&dyn Tokenizer>,
    ) -> GenerationRequest {
        let max_tokens = if self.dynamic_max_length {
            tokenizer.map(|t| t.encode(&doc.answer, false).len())
        } else {
            None
        };
        GenerationRequest {
            prompt: ctx.to_string(),
            stop_sequences: vec![self.template.sep().to_string()],
            max_tokens,
        }
    }

    fn process_results(&self, doc: &QaRecord, results: &[String]) -> anyhow::Result<ExampleResult> {
        anyhow::ensure!(
            results.len() == 1,
            "results should hold exactly one string element, but is {:?}",
            results
        );
        let continuation = &results[0];

        let prediction = QaPrediction {
            id: doc.qid.clone(),
            prediction_text: continuation.clone(),
        };
        // answer_start is a placeholder the metric never reads.
        let reference = QaReference {
            id: doc.qid.clone(),
            answers: GoldAnswers {
                text: vec![doc.answer.clone()],
                answer_start: vec![-1],
            },
        };

        let scores = jaeval_metrics::compute(
            std::slice::from_ref(&prediction),
            std::slice::from_ref(&reference),
        )?;
        Ok(ExampleResult {
            qid: doc.qid.clone(),
            prediction,
            reference,
            exact_match: scores.exact_match,
            f1: scores.f1,
        })
    }

    fn aggregate(
        &self,
        predictions: &[QaPrediction],
        references: &[QaReference],
    ) -> anyhow::Result<Vec<MetricValue>> {
        let scores = jaeval_metrics::compute(predictions, references)?;
        Ok(vec![
            MetricValue {
                name: "exact_match".to_string(),
                value: scores.exact_match,
                higher_is_better: true,
            },
            MetricValue {
                name: "f1".to_string(),
                value: scores.f1,
                higher_is_better: true,
            },
        ])
    }

    fn higher_is_better(&self) -> Vec<(&'static str, bool)> {
        vec![("exact_match", true), ("f1", true)]
    }
}
