//! Archive creation reporting.

use std::time::Duration;

/// Statistics about a created archive.
///
/// # Examples
///
/// ```
/// use depozip_core::archive::ArchiveReport;
///
/// let mut report = ArchiveReport::default();
/// report.bytes_read = 1000;
/// report.archive_size = 250;
///
/// assert_eq!(report.compression_ratio(), 4.0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ArchiveReport {
    /// Number of files written to the archive.
    pub files_added: usize,

    /// Uncompressed bytes read from the source files.
    pub bytes_read: u64,

    /// Size of the finished archive on disk.
    pub archive_size: u64,

    /// Entries that passed filtering but were not archived.
    pub files_skipped: usize,

    /// Duration of the archiving step.
    pub duration: Duration,

    /// Warnings generated while archiving.
    pub warnings: Vec<String>,

    /// Arcnames left out by the ignore set. An ignored directory is listed
    /// once; its contents are never read.
    pub ignored: Vec<String>,
}

impl ArchiveReport {
    /// Creates a new empty report.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a warning message to the report.
    pub fn add_warning(&mut self, msg: impl Into<String>) {
        self.warnings.push(msg.into());
    }

    /// Returns whether any warnings were generated.
    #[must_use]
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Records an entry left out by the ignore set.
    pub fn add_ignored(&mut self, arcname: impl Into<String>) {
        self.ignored.push(arcname.into());
    }

    /// Returns uncompressed / compressed size, or 0.0 if either is zero.
    #[must_use]
    pub fn compression_ratio(&self) -> f64 {
        if self.archive_size == 0 || self.bytes_read == 0 {
            return 0.0;
        }
        self.bytes_read as f64 / self.archive_size as f64
    }
}
