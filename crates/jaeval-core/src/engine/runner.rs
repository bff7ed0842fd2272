//! The evaluation loop: one record at a time, no shared mutable state.

use crate::dataset::DatasetSplits;
use crate::providers::llm::LlmClient;
use crate::providers::tokenizer::Tokenizer;
use crate::report::{console, ExampleRow, RunArtifacts};
use crate::task::Task;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;
use std::time::Instant;
use tokio::time::{timeout, Duration};

#[derive(Debug, Clone)]
pub struct RunOptions {
    pub num_fewshot: usize,
    pub timeout_seconds: u64,
    pub seed: Option<u64>,
    pub limit: Option<usize>,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            num_fewshot: 0,
            timeout_seconds: 30,
            seed: None,
            limit: None,
        }
    }
}

pub struct Runner {
    pub client: Arc<dyn LlmClient>,
    pub tokenizer: Option<Arc<dyn Tokenizer>>,
    pub options: RunOptions,
}

impl Runner {
    /// Evaluate `task` over the test split: build each prompt, issue the
    /// generation request under the configured timeout, score the single
    /// continuation, then aggregate corpus metrics.
    pub async fn run_task(
        &self,
        task: &dyn Task,
        data: &DatasetSplits,
    ) -> anyhow::Result<RunArtifacts> {
        anyhow::ensure!(
            task.has_test_docs(),
            "task {} exposes no test split",
            task.name()
        );
        let mut docs = task.filter_test_docs(data.test.clone());
        if let Some(limit) = self.options.limit {
            docs.truncate(limit);
        }
        let total = docs.len();
        if total == 0 {
            tracing::warn!(task = %task.name(), "no test documents to evaluate");
        }

        // Few-shot sampling needs a seed; generate one when missing so the
        // run can be reproduced from the log line.
        let seed = match (self.options.num_fewshot, self.options.seed) {
            (0, seed) => seed.unwrap_or(0),
            (_, Some(seed)) => seed,
            (_, None) => {
                let seed = rand::random();
                eprintln!("Info: no seed provided, using generated seed: {}", seed);
                seed
            }
        };
        let mut rng = StdRng::seed_from_u64(seed);

        let started_at = chrono::Utc::now();
        let mut examples = Vec::with_capacity(total);
        let mut predictions = Vec::with_capacity(total);
        let mut references = Vec::with_capacity(total);
        let mut model_label = String::new();

        for (done, doc) in docs.iter().enumerate() {
            let ctx =
                task.fewshot_context(doc, self.options.num_fewshot, &data.train, &mut rng)?;
            let request = task.construct_request(doc, &ctx, self.tokenizer.as_deref());
            tracing::debug!(
                qid = %doc.qid,
                prompt_chars = request.prompt.chars().count(),
                max_tokens = ?request.max_tokens,
                "issuing generation request"
            );

            let start = Instant::now();
            let fut = self.client.greedy_until(&request);
            let resp = timeout(Duration::from_secs(self.options.timeout_seconds), fut)
                .await
                .map_err(|_| {
                    anyhow::anyhow!(
                        "provider timeout after {}s on {}",
                        self.options.timeout_seconds,
                        doc.qid
                    )
                })??;
            model_label = resp.model.clone();

            let scored = task.process_results(doc, std::slice::from_ref(&resp.text))?;
            examples.push(ExampleRow {
                qid: scored.qid.clone(),
                prediction_text: resp.text,
                exact_match: scored.exact_match,
                f1: scored.f1,
                duration_ms: start.elapsed().as_millis() as u64,
            });
            predictions.push(scored.prediction);
            references.push(scored.reference);
            console::emit_progress(done + 1, total);
        }

        let aggregate = task.aggregate(&predictions, &references)?;
        for m in &aggregate {
            tracing::info!(task = %task.name(), metric = %m.name, value = m.value, "aggregate score");
        }

        Ok(RunArtifacts {
            task: task.name(),
            model: model_label,
            provider: self.client.provider_name().to_string(),
            started_at,
            examples,
            aggregate,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset;
    use crate::model::{ContextDocument, GenerationRequest, LlmResponse, QaRecord};
    use crate::providers::llm::FakeClient;
    use crate::providers::tokenizer::CharTokenizer;
    use crate::report::MetricValue;
    use crate::task::ExampleResult;
    use async_trait::async_trait;
    use jaeval_metrics::{GoldAnswers, QaPrediction, QaReference};

    /// Minimal QA task for exercising the loop without the rcqa adapters.
    #[derive(Debug)]
    struct EchoTask;

    impl Task for EchoTask {
        fn name(&self) -> String {
            "echo-1.0-0.1".to_string()
        }
        fn version(&self) -> &'static str {
            "1.0"
        }
        fn prompt_version(&self) -> &'static str {
            "0.1"
        }
        fn description(&self) -> &str {
            ""
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
            dataset::exclude_ids(docs, &[])
        }
        fn doc_to_text(&self, doc: &QaRecord) -> String {
            format!("質問:{}\n答え:", doc.question)
        }
        fn doc_to_target(&self, doc: &QaRecord) -> String {
            doc.answer.clone()
        }
        fn construct_request(
            &self,
            doc: &QaRecord,
            ctx: &str,
            tokenizer: Option<&dyn Tokenizer>,
        ) -> GenerationRequest {
            GenerationRequest {
                prompt: ctx.to_string(),
                stop_sequences: vec!["\n".to_string()],
                max_tokens: tokenizer.map(|t| t.encode(&doc.answer, false).len()),
            }
        }
        fn process_results(
            &self,
            doc: &QaRecord,
            results: &[String],
        ) -> anyhow::Result<ExampleResult> {
            anyhow::ensure!(results.len() == 1, "expected one result");
            let prediction = QaPrediction {
                id: doc.qid.clone(),
                prediction_text: results[0].clone(),
            };
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

    fn record(qid: &str, question: &str, answer: &str) -> QaRecord {
        QaRecord {
            qid: qid.to_string(),
            question: question.to_string(),
            answer: answer.to_string(),
            documents: vec![ContextDocument {
                title: "t".to_string(),
                text: "x".to_string(),
            }],
        }
    }

    fn splits(test: Vec<QaRecord>) -> DatasetSplits {
        DatasetSplits {
            train: Vec::new(),
            test,
        }
    }

    #[tokio::test]
    async fn run_scores_and_aggregates_with_fake_client() -> anyhow::Result<()> {
        let client = Arc::new(
            FakeClient::new("fake-model".to_string())
                .with_response("東京".to_string())
                .with_response("大阪".to_string()),
        );
        let runner = Runner {
            client: client.clone(),
            tokenizer: Some(Arc::new(CharTokenizer)),
            options: RunOptions::default(),
        };
        let data = splits(vec![
            record("q-1", "首都は？", "東京"),
            record("q-2", "古都は？", "京都"),
        ]);

        let artifacts = runner.run_task(&EchoTask, &data).await?;
        assert_eq!(artifacts.examples.len(), 2);
        assert_eq!(artifacts.model, "fake-model");
        assert_eq!(artifacts.provider, "fake");
        assert_eq!(artifacts.examples[0].exact_match, 1.0);
        assert_eq!(artifacts.examples[1].exact_match, 0.0);
        let em = artifacts
            .aggregate
            .iter()
            .find(|m| m.name == "exact_match")
            .expect("exact_match metric");
        assert_eq!(em.value, 0.5);
        assert!(em.higher_is_better);

        // Request construction flowed through: stop sequence + answer-length cap.
        let requests = client.requests();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].stop_sequences, vec!["\n".to_string()]);
        assert_eq!(requests[0].max_tokens, Some(2));
        assert!(requests[0].prompt.contains("首都は？"));
        Ok(())
    }

    #[tokio::test]
    async fn limit_caps_evaluated_documents() -> anyhow::Result<()> {
        let client = Arc::new(FakeClient::new("fake-model".to_string()).with_response("東京".to_string()));
        let runner = Runner {
            client,
            tokenizer: None,
            options: RunOptions {
                limit: Some(1),
                ..RunOptions::default()
            },
        };
        let data = splits(vec![
            record("q-1", "首都は？", "東京"),
            record("q-2", "古都は？", "京都"),
        ]);
        let artifacts = runner.run_task(&EchoTask, &data).await?;
        assert_eq!(artifacts.examples.len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn empty_test_split_aggregates_to_zeros_without_error() -> anyhow::Result<()> {
        let client = Arc::new(FakeClient::new("fake-model".to_string()));
        let runner = Runner {
            client,
            tokenizer: None,
            options: RunOptions::default(),
        };
        let artifacts = runner.run_task(&EchoTask, &splits(Vec::new())).await?;
        assert!(artifacts.examples.is_empty());
        assert_eq!(artifacts.aggregate.len(), 2);
        assert_eq!(artifacts.aggregate[0].value, 0.0);
        Ok(())
    }

    struct SlowClient;

    #[async_trait]
    impl LlmClient for SlowClient {
        async fn greedy_until(
            &self,
            _request: &GenerationRequest,
        ) -> anyhow::Result<LlmResponse> {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            Ok(LlmResponse::default())
        }
        fn provider_name(&self) -> &'static str {
            "slow"
        }
    }

    #[tokio::test(start_paused = true)]
    async fn provider_timeout_is_reported_with_the_qid() {
        let runner = Runner {
            client: Arc::new(SlowClient),
            tokenizer: None,
            options: RunOptions {
                timeout_seconds: 1,
                ..RunOptions::default()
            },
        };
        let data = splits(vec![record("q-slow", "首都は？", "東京")]);
        let err = runner
            .run_task(&EchoTask, &data)
            .await
            .expect_err("timeout");
        assert!(err.to_string().contains("timeout"));
        assert!(err.to_string().contains("q-slow"));
    }
}
