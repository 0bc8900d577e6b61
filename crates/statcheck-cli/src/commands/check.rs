//! Check command implementation.

use super::{read_text, Context};
use crate::cli::CheckArgs;
use crate::error::Result;
use crate::output::Formatter;
use statcheck_pipeline::Article;

/// Execute the check command.
pub async fn execute_check(args: CheckArgs, context: &Context, formatter: &Formatter) -> Result<()> {
    let text = read_text(&args.input)?;
    let article = Article::new(args.url, args.input.title, text);

    let pipeline = context.pipeline()?;
    let report = pipeline.run_article(&article).await?;

    println!("{}", formatter.format_article(&report)?);
    Ok(())
}
