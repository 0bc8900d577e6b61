//! Score command implementation.

use super::{read_text, Context};
use crate::cli::ScoreArgs;
use crate::error::Result;
use crate::output::Formatter;

/// Execute the score command.
pub fn execute_score(args: ScoreArgs, context: &Context, formatter: &Formatter) -> Result<()> {
    let text = read_text(&args.input)?;
    let pipeline = context.pipeline()?;
    let (signals, score) = pipeline.score(&args.input.title, &text);

    println!("{}", formatter.format_score(&signals, &score)?);
    Ok(())
}
