//! Batch command implementation.

use super::Context;
use crate::cli::BatchArgs;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use statcheck_pipeline::{ArticleSource, JsonArticleFile};

/// Execute the batch command.
pub async fn execute_batch(args: BatchArgs, context: &Context, formatter: &Formatter) -> Result<()> {
    let articles = JsonArticleFile::new(&args.articles).fetch_articles()?;
    if articles.is_empty() {
        return Err(CliError::InvalidInput(format!(
            "{} contains no articles",
            args.articles.display()
        )));
    }

    let pipeline = context.pipeline()?;
    let batch = pipeline.run_batch(&articles).await?;

    println!("{}", formatter.format_batch(&batch)?);
    Ok(())
}
