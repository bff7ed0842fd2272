use crate::cli::args::RunArgs;
use crate::exit_codes;
use jaeval_core::config::{EvalConfig, TokenizerKind};
use jaeval_core::dataset::DatasetSplits;
use jaeval_core::errors::HarnessError;
use jaeval_core::providers::llm::CompletionClient;
use jaeval_core::providers::tokenizer::{CharTokenizer, Tokenizer};
use jaeval_core::report::{console, json};
use jaeval_core::task::Task;
use jaeval_core::{RunOptions, Runner};
use std::sync::Arc;

pub async fn run(args: RunArgs) -> anyhow::Result<i32> {
    match execute(args).await {
        Ok(()) => Ok(exit_codes::SUCCESS),
        Err(e) => {
            let code = match e.downcast_ref::<HarnessError>() {
                Some(err) if err.is_config_error() => exit_codes::CONFIG_ERROR,
                _ => exit_codes::RUN_ERROR,
            };
            eprintln!("error: {e:#}");
            Ok(code)
        }
    }
}

async fn execute(args: RunArgs) -> anyhow::Result<()> {
    let mut cfg = EvalConfig::from_yaml_file(&args.config)?;
    apply_overrides(&mut cfg, &args);

    tracing::info!(task = %cfg.task, model = %cfg.model, "starting evaluation run");
    let task = build_task(&cfg)?;
    let data = DatasetSplits::load(&cfg.dataset)?;

    let mut client = CompletionClient::new(cfg.endpoint.clone(), cfg.model.clone());
    if let Some(key) = args.api_key {
        client = client.with_api_key(key);
    }

    let tokenizer: Option<Arc<dyn Tokenizer>> = match cfg.settings.tokenizer {
        TokenizerKind::Char => Some(Arc::new(CharTokenizer)),
        TokenizerKind::None => None,
    };

    let runner = Runner {
        client: Arc::new(client),
        tokenizer,
        options: RunOptions {
            num_fewshot: cfg.settings.num_fewshot,
            timeout_seconds: cfg.settings.timeout_seconds,
            seed: cfg.settings.seed,
            limit: cfg.settings.limit,
        },
    };

    let artifacts = runner.run_task(task.as_ref(), &data).await?;
    console::print_summary(&artifacts);
    if let Some(path) = &args.output {
        json::save_json(&artifacts, path)?;
    }
    Ok(())
}

fn apply_overrides(cfg: &mut EvalConfig, args: &RunArgs) {
    if let Some(task) = &args.task {
        cfg.task = task.clone();
    }
    if let Some(model) = &args.model {
        cfg.model = model.clone();
    }
    if let Some(endpoint) = &args.endpoint {
        cfg.endpoint = endpoint.clone();
    }
    if let Some(limit) = args.limit {
        cfg.settings.limit = Some(limit);
    }
    if let Some(num_fewshot) = args.num_fewshot {
        cfg.settings.num_fewshot = num_fewshot;
    }
    if let Some(seed) = args.seed {
        cfg.settings.seed = Some(seed);
    }
    if let Some(dynamic) = args.dynamic_max_length {
        cfg.settings.dynamic_max_length = dynamic;
    }
}

fn build_task(cfg: &EvalConfig) -> anyhow::Result<Box<dyn Task>> {
    let task = jaeval_tasks::lookup(&cfg.task)
        .ok_or_else(|| HarnessError::UnknownTask(cfg.task.clone()))?
        .with_remove_ids(cfg.settings.remove_ids.clone())
        .with_dynamic_max_length(cfg.settings.dynamic_max_length);
    let task = match cfg.settings.top_k {
        Some(top_k) => task.with_top_k(top_k),
        None => task,
    };
    Ok(Box::new(task))
}
