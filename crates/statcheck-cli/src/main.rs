//! Statcheck CLI - Fact-check statistical claims in news articles.

use clap::Parser;
use statcheck_cli::commands::{self, Context};
use statcheck_cli::{Cli, Command, Config, Formatter};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Log to stderr so stdout stays parseable; `RUST_LOG` wins unless `--verbose`.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();
}

async fn run(cli: Cli) -> statcheck_cli::Result<()> {
    let config = Config::load(cli.config.as_deref())?;

    // Determine output format
    let format = cli
        .format
        .map(Into::into)
        .unwrap_or(config.settings.format);

    // Determine color setting
    let color_enabled = !cli.no_color && config.settings.color;

    let formatter = Formatter::new(format, color_enabled);
    let context = Context::new(config, cli.registry, cli.snapshot);

    match cli.command {
        Command::Check(args) => commands::execute_check(args, &context, &formatter).await?,
        Command::Batch(args) => commands::execute_batch(args, &context, &formatter).await?,
        Command::Series => commands::execute_series(&context, &formatter)?,
        Command::Score(args) => commands::execute_score(args, &context, &formatter)?,
        Command::Watch(args) => commands::execute_watch(args, &context, &formatter).await?,
    }

    Ok(())
}
