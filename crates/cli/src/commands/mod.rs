//! Command handlers for the newsrag CLI.

pub mod ask;
pub mod ingest;
pub mod serve;
pub mod stats;

pub use ask::AskCommand;
pub use ingest::IngestCommand;
pub use serve::ServeCommand;
pub use stats::StatsCommand;

use newsrag_core::AppResult;
use serde::Serialize;

/// Print a value as pretty JSON on stdout.
pub(crate) fn print_json<T: Serialize>(value: &T) -> AppResult<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
