//! Shared output helpers.

use serde::Serialize;

use crate::cli::{GlobalOpts, OutputFormat};
use crate::error::CliError;

/// Print `value` as JSON, or run `plain` for human output.
pub fn emit<T: Serialize>(
    global: &GlobalOpts,
    value: &T,
    plain: impl FnOnce(&T),
) -> Result<(), CliError> {
    match global.output {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(value)?),
        OutputFormat::Plain => plain(value),
    }
    Ok(())
}
