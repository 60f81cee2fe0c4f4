//! Progress reporting for archive-then-upload runs.

use crate::archive::ArchiveReport;
use std::path::Path;

/// Callback invoked at each stage of an upload.
///
/// Implementors can display progress bars or log stages. All methods are
/// called on the caller's thread, in order.
///
/// # Examples
///
/// ```
/// use depozip_core::ProgressCallback;
/// use depozip_core::archive::ArchiveReport;
/// use std::path::Path;
///
/// struct Printer;
///
/// impl ProgressCallback for Printer {
///     fn on_entry_added(&mut self, arcname: &str, _size: u64) {
///         println!("added {arcname}");
///     }
///
///     fn on_archive_complete(&mut self, path: &Path, report: &ArchiveReport) {
///         println!("{} files in {}", report.files_added, path.display());
///     }
///
///     fn on_upload_start(&mut self, _archive: &Path) {}
///
///     fn on_complete(&mut self) {}
/// }
/// ```
pub trait ProgressCallback {
    /// Called after a file has been written to the archive.
    fn on_entry_added(&mut self, arcname: &str, size: u64);

    /// Called once the archive is fully written.
    fn on_archive_complete(&mut self, path: &Path, report: &ArchiveReport);

    /// Called before the archive is handed to the deposition client.
    fn on_upload_start(&mut self, archive: &Path);

    /// Called when the deposition client returned successfully.
    fn on_complete(&mut self);
}

/// No-op implementation of `ProgressCallback`.
#[derive(Debug, Default)]
pub struct NoopProgress;

impl ProgressCallback for NoopProgress {
    fn on_entry_added(&mut self, _arcname: &str, _size: u64) {}

    fn on_archive_complete(&mut self, _path: &Path, _report: &ArchiveReport) {}

    fn on_upload_start(&mut self, _archive: &Path) {}

    fn on_complete(&mut self) {}
}
