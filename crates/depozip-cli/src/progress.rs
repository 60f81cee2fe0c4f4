//! Progress spinner for archive and upload stages.

use console::Term;
use depozip_core::ProgressCallback;
use depozip_core::archive::ArchiveReport;
use indicatif::ProgressBar;
use indicatif::ProgressStyle;
use std::path::Path;
use std::time::Duration;

/// CLI spinner implementing `ProgressCallback`.
///
/// Shows the current stage, the number of files archived so far and the
/// bytes read. Draws on stderr and cleans up on drop.
pub struct CliProgress {
    bar: ProgressBar,
    bytes_read: u64,
}

impl CliProgress {
    #[must_use]
    pub fn new() -> Self {
        let bar = ProgressBar::new_spinner();

        // Template: "⠋ Archiving 42 files (15.2 MB) src/data.csv"
        bar.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {prefix:.bold} {pos} files {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        bar.set_prefix("Archiving");
        bar.enable_steady_tick(Duration::from_millis(100));

        Self { bar, bytes_read: 0 }
    }

    /// Checks if we should show progress (TTY detection).
    #[must_use]
    pub fn should_show() -> bool {
        Term::stderr().is_term()
    }
}

impl Default for CliProgress {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for CliProgress {
    fn drop(&mut self) {
        self.bar.finish_and_clear();
    }
}

impl ProgressCallback for CliProgress {
    fn on_entry_added(&mut self, arcname: &str, size: u64) {
        self.bytes_read += size;
        self.bar.inc(1);
        self.bar
            .set_message(format!("({}) {arcname}", humanize_bytes(self.bytes_read)));
    }

    fn on_archive_complete(&mut self, _path: &Path, report: &ArchiveReport) {
        self.bar.set_message(format!(
            "({} compressed)",
            humanize_bytes(report.archive_size)
        ));
    }

    fn on_upload_start(&mut self, archive: &Path) {
        self.bar.set_prefix("Uploading");
        let name = archive
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        self.bar.set_message(name);
    }

    fn on_complete(&mut self) {
        self.bar.finish_and_clear();
    }
}

/// Converts bytes to human-readable format (KB, MB, GB, TB).
pub fn humanize_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;
    const TB: u64 = GB * 1024;

    if bytes >= TB {
        format!("{:.1} TB", bytes as f64 / TB as f64)
    } else if bytes >= GB {
        format!("{:.1} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{bytes} B")
    }
}
