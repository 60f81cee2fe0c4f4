//! Command implementations.

pub mod dry_run;
pub mod upload;

use crate::cli::Cli;
use crate::progress::CliProgress;

/// Spinner only on an interactive stderr, and never with --quiet or --json.
fn show_progress(cli: &Cli) -> bool {
    !cli.quiet && !cli.json && CliProgress::should_show()
}
