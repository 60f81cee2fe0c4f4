//! Human-readable output formatter with colors and styling.

use super::formatter::OutputFormatter;
use crate::progress::humanize_bytes;
use anyhow::Result;
use anyhow::anyhow;
use console::Term;
use console::style;
use depozip_core::CreatedArchive;
use depozip_core::IgnoreSet;
use depozip_core::Metadata;
use depozip_core::UploadResult;
use depozip_core::archive::ArchiveReport;
use std::path::Path;

pub struct HumanFormatter {
    verbosity: u8,
    quiet: bool,
    use_colors: bool,
    out: Term,
    err: Term,
}

impl HumanFormatter {
    pub fn new(verbosity: u8, quiet: bool) -> Self {
        Self {
            verbosity,
            quiet,
            use_colors: console::colors_enabled_stderr(),
            out: Term::stdout(),
            err: Term::stderr(),
        }
    }

    /// Writes a diagnostic line if the verbosity reaches `level`.
    fn diag(&self, level: u8, line: &str) {
        if !self.quiet && self.verbosity >= level {
            let _ = self.err.write_line(line);
        }
    }

    fn check_mark(&self) -> String {
        if self.use_colors {
            format!("{} ", style("✓").green().bold())
        } else {
            String::new()
        }
    }

    fn summary_lines(path: &Path, report: &ArchiveReport) -> Vec<String> {
        let mut lines = vec![
            format!("Archive: {}", path.display()),
            format!("  Files added:      {}", format_number(report.files_added)),
            format!("  Total size:       {}", humanize_bytes(report.bytes_read)),
            format!("  Archive size:     {}", humanize_bytes(report.archive_size)),
        ];
        if report.archive_size > 0 && report.bytes_read > 0 {
            lines.push(format!(
                "  Compression:      {:.1}x",
                report.compression_ratio()
            ));
        }
        if report.files_skipped > 0 {
            lines.push(format!("  Files skipped:    {}", report.files_skipped));
        }
        lines
    }
}

impl OutputFormatter for HumanFormatter {
    fn format_upload_result(&self, result: &UploadResult, published: bool) -> Result<()> {
        let url = result.html_url().ok_or_else(|| {
            anyhow!(
                "Deposition {} has no landing page link\n\
                 HINT: Re-run with --json to inspect the full response.",
                result.deposition_id
            )
        })?;

        let action = if published {
            "Published deposition"
        } else {
            "Created draft deposition"
        };
        self.diag(
            1,
            &format!("{}{action} {}", self.check_mark(), result.deposition_id),
        );

        self.out.write_line(url)?;
        Ok(())
    }

    fn format_dry_run(&self, metadata: &Metadata, archive: &CreatedArchive) -> Result<()> {
        self.format_archive_summary(&archive.path, &archive.report);

        self.diag(1, &format!("  Title:            {}", metadata.title));
        let creators: Vec<_> = metadata.creators.iter().map(|c| c.name.as_str()).collect();
        self.diag(1, &format!("  Creators:         {}", creators.join("; ")));
        self.diag(1, &format!("  License:          {}", metadata.license));

        self.out.write_line(&archive.path.display().to_string())?;
        Ok(())
    }

    fn format_archive_summary(&self, path: &Path, report: &ArchiveReport) {
        for line in Self::summary_lines(path, report) {
            self.diag(1, &line);
        }

        self.diag(2, &format!("  Duration:         {:?}", report.duration));
        if !report.ignored.is_empty() {
            self.diag(2, "  Ignored:");
            for arcname in &report.ignored {
                self.diag(2, &format!("    - {arcname}"));
            }
        }
        if report.has_warnings() {
            self.diag(2, "  Warnings:");
            for warning in &report.warnings {
                self.diag(2, &format!("    - {warning}"));
            }
        }
    }

    fn format_ignore_set(&self, ignore: &IgnoreSet) {
        let names: Vec<_> = ignore.names().collect();
        let suffixes: Vec<_> = ignore.suffixes().collect();
        self.diag(2, &format!("Ignoring names:    {}", names.join(", ")));
        self.diag(2, &format!("Ignoring suffixes: {}", suffixes.join(", ")));
    }

    fn format_warning(&self, message: &str) {
        if self.quiet {
            return;
        }

        if self.use_colors {
            let _ = self
                .err
                .write_line(&format!("{} {message}", style("⚠").yellow().bold()));
        } else {
            let _ = self.err.write_line(&format!("WARNING: {message}"));
        }
    }
}

fn format_number(n: usize) -> String {
    let s = n.to_string();
    let mut result = String::new();

    for (count, c) in s.chars().rev().enumerate() {
        if count > 0 && count % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }

    result.chars().rev().collect()
}
