//! Watch command implementation.

use super::Context;
use crate::cli::WatchArgs;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use statcheck_pipeline::{BatchReport, JsonArticleFile, PipelineWorker};
use std::time::Duration;

/// Execute the watch command.
pub async fn execute_watch(args: WatchArgs, context: &Context, formatter: &Formatter) -> Result<()> {
    let interval = interval_from(args.interval, context.config.pipeline.interval())?;

    let pipeline = context.pipeline()?;
    let mut worker = PipelineWorker::new(pipeline, JsonArticleFile::new(&args.articles), interval);

    match args.cycles {
        Some(cycles) => {
            for batch in worker.run_cycles(cycles).await? {
                println!("{}", formatter.format_batch(&batch)?);
            }
        }
        None => worker.run(|batch| print_batch(formatter, &batch)).await?,
    }

    if formatter.format() != crate::config::OutputFormat::Json {
        eprintln!("{}", formatter.success(&format!("Completed {} run(s)", worker.metrics().runs)));
    }
    Ok(())
}

fn interval_from(minutes: Option<u64>, configured: Duration) -> Result<Duration> {
    match minutes {
        None => Ok(configured),
        Some(0) => Err(CliError::InvalidInput(
            "Interval must be at least one minute".to_string(),
        )),
        Some(minutes) => minutes
            .checked_mul(60)
            .map(Duration::from_secs)
            .ok_or_else(|| CliError::InvalidInput(format!("Interval of {} minutes is too large", minutes))),
    }
}

fn print_batch(formatter: &Formatter, batch: &BatchReport) {
    match formatter.format_batch(batch) {
        Ok(rendered) => println!("{}", rendered),
        Err(e) => tracing::error!("Failed to render batch: {}", e),
    }
}
