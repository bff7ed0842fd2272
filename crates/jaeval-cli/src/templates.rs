/// Starter config written by `jaeval init`.
pub const STARTER_CONFIG: &str = r#"version: 1
task: rcqa-1.0-0.1
model: my-model
endpoint: http://localhost:8080/v1/completions
dataset:
  # train: data/rcqa/train.jsonl
  test: data/rcqa/test.jsonl
settings:
  num_fewshot: 0
  dynamic_max_length: true
  timeout_seconds: 30
  tokenizer: char
  remove_ids: []
"#;
