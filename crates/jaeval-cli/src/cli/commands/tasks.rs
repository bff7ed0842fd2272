use crate::exit_codes::SUCCESS;
use jaeval_core::task::Task;

pub fn run() -> anyhow::Result<i32> {
    for task in jaeval_tasks::construct_tasks() {
        let summary = task.description().lines().next().unwrap_or("").trim_end();
        println!(
            "{:<16} prompt v{:<4} {}",
            task.name(),
            task.prompt_version(),
            summary
        );
    }
    Ok(SUCCESS)
}
