use crate::cli::args::InitArgs;
use crate::exit_codes::SUCCESS;
use crate::templates;

pub fn run(args: InitArgs) -> anyhow::Result<i32> {
    if args.config.exists() && !args.force {
        anyhow::bail!(
            "{} already exists (use --force to overwrite)",
            args.config.display()
        );
    }
    std::fs::write(&args.config, templates::STARTER_CONFIG)?;
    eprintln!("Wrote {}", args.config.display());
    Ok(SUCCESS)
}
