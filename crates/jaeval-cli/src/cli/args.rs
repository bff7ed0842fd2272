use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "jaeval",
    version,
    about = "Evaluation harness for Japanese language models"
)]
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run a task against a completion endpoint
    Run(RunArgs),
    /// List registered tasks
    Tasks,
    /// Write a starter config file
    Init(InitArgs),
    Version,
}

#[derive(clap::Args, Debug, Clone)]
pub struct RunArgs {
    #[arg(long, default_value = "jaeval.yaml")]
    pub config: PathBuf,

    /// Override the configured task name
    #[arg(long)]
    pub task: Option<String>,

    #[arg(long)]
    pub model: Option<String>,

    #[arg(long)]
    pub endpoint: Option<String>,

    /// Evaluate at most this many test documents
    #[arg(long)]
    pub limit: Option<usize>,

    #[arg(long)]
    pub num_fewshot: Option<usize>,

    #[arg(long)]
    pub seed: Option<u64>,

    /// Cap generation at the gold answer's token count
    #[arg(long, env = "DYNAMIC_MAX_LENGTH")]
    pub dynamic_max_length: Option<bool>,

    /// Write the JSON report here
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// API key for the completion endpoint
    #[arg(long, env = "JAEVAL_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,
}

#[derive(clap::Args, Debug, Clone)]
pub struct InitArgs {
    #[arg(long, default_value = "jaeval.yaml")]
    pub config: PathBuf,

    /// Overwrite an existing file
    #[arg(long)]
    pub force: bool,
}
