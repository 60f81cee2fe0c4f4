//! Dry-run command implementation: archive only, no network.

use super::show_progress;
use crate::cli::Cli;
use crate::error::add_deposit_context;
use crate::output::OutputFormatter;
use crate::progress::CliProgress;
use anyhow::Result;
use depozip_core::archive::archive_directory_with_progress;
use depozip_core::archive::resolve_root;
use depozip_core::archive_directory;

pub fn execute(cli: &Cli, formatter: &dyn OutputFormatter) -> Result<()> {
    let request = cli.upload_request();

    let root = add_deposit_context(resolve_root(&request.directory), &cli.dir, cli.sandbox)?;
    let metadata = add_deposit_context(request.metadata(&root), &cli.dir, cli.sandbox)?;

    formatter.format_ignore_set(&request.archive.ignore);

    let archive = if show_progress(cli) {
        let mut progress = CliProgress::new();
        archive_directory_with_progress(&root, &request.archive, &mut progress)
    } else {
        archive_directory(&root, &request.archive)
    };
    let archive = add_deposit_context(archive, &cli.dir, cli.sandbox)?;

    formatter.format_dry_run(&metadata, &archive)
}
