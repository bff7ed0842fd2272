use super::args::{Cli, Command};

pub mod init;
pub mod run;
pub mod tasks;

use crate::exit_codes::SUCCESS;

pub async fn dispatch(cli: Cli) -> anyhow::Result<i32> {
    match cli.cmd {
        Command::Run(args) => run::run(args).await,
        Command::Tasks => tasks::run(),
        Command::Init(args) => init::run(args),
        Command::Version => {
            println!("jaeval {}", env!("CARGO_PKG_VERSION"));
            Ok(SUCCESS)
        }
    }
}
