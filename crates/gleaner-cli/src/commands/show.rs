//! Show command implementation.
//!
//! Reads a result file back for display. Every read goes through the
//! permitted-root resolver, so traversal or symlink tricks cannot reach
//! files outside the output directory.

use crate::cli::ShowArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use gleaner_output::PermittedRoot;

/// Execute the show command.
pub fn execute_show(args: ShowArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let output_dir = args.output.unwrap_or_else(|| config.batch.output_dir.clone());

    let root = PermittedRoot::new(&output_dir)?;
    let contents = root.read(&args.file)?;
    let value: serde_json::Value = serde_json::from_str(&contents)?;

    println!("{}", formatter.format_json(&value)?);
    Ok(())
}
