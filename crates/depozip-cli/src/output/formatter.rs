//! Output formatter trait for CLI results.

use anyhow::Result;
use depozip_core::CreatedArchive;
use depozip_core::IgnoreSet;
use depozip_core::Metadata;
use depozip_core::UploadResult;
use depozip_core::archive::ArchiveReport;
use std::path::Path;

/// Common output formatter trait
///
/// Results go to stdout. Diagnostics go to stderr and are gated by the
/// formatter's verbosity.
pub trait OutputFormatter {
    /// Format the outcome of an upload
    fn format_upload_result(&self, result: &UploadResult, published: bool) -> Result<()>;

    /// Format the outcome of a dry run
    fn format_dry_run(&self, metadata: &Metadata, archive: &CreatedArchive) -> Result<()>;

    /// Describe a finished archive
    fn format_archive_summary(&self, path: &Path, report: &ArchiveReport);

    /// Describe the names and suffixes left out of the archive
    fn format_ignore_set(&self, ignore: &IgnoreSet);

    /// Format warning message
    fn format_warning(&self, message: &str);
}
