//! Upload command implementation.

use super::show_progress;
use crate::cli::Cli;
use crate::error::add_deposit_context;
use crate::error::convert_remote_error;
use crate::output::OutputFormatter;
use crate::progress::CliProgress;
use anyhow::Result;
use depozip_core::RemoteError;
use depozip_core::ZenodoClient;
use depozip_core::ZenodoConfig;
use depozip_core::archive::resolve_root;
use depozip_core::upload_directory;
use depozip_core::upload_directory_with_progress;

pub fn execute(cli: &Cli, formatter: &dyn OutputFormatter) -> Result<()> {
    let request = cli.upload_request();

    // Reject bad input before spending time on the archive
    let root = add_deposit_context(resolve_root(&request.directory), &cli.dir, cli.sandbox)?;
    add_deposit_context(request.metadata(&root), &cli.dir, cli.sandbox)?;

    let config = ZenodoConfig::from_env(cli.sandbox);
    if config.token.is_none() {
        return Err(convert_remote_error(
            RemoteError::MissingToken {
                var: config.token_var(),
            },
            cli.sandbox,
        ));
    }
    let client = ZenodoClient::new(config).map_err(|e| convert_remote_error(e, cli.sandbox))?;

    formatter.format_ignore_set(&request.archive.ignore);

    let result = if show_progress(cli) {
        let mut progress = CliProgress::new();
        upload_directory_with_progress(&request, &client, &mut progress)
    } else {
        upload_directory(&request, &client)
    };
    let result = add_deposit_context(result, &cli.dir, cli.sandbox)?;

    formatter.format_archive_summary(&result.archive_path, &result.archive_report);
    if !cli.publish() {
        formatter.format_warning(
            "Deposition left as a draft; publish it from the Zenodo web interface",
        );
    }
    formatter.format_upload_result(&result, cli.publish())
}
