//! Series command implementation.

use super::Context;
use crate::error::Result;
use crate::output::Formatter;

/// Execute the series command.
pub fn execute_series(context: &Context, formatter: &Formatter) -> Result<()> {
    let registry = context.registry()?;
    println!("{}", formatter.format_series(registry.series())?);
    Ok(())
}
