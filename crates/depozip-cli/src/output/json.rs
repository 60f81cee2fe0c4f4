//! JSON output formatter for machine-readable results.
//!
//! Only results are written; stdout always holds a single JSON document.

use super::formatter::OutputFormatter;
use anyhow::Result;
use depozip_core::CreatedArchive;
use depozip_core::IgnoreSet;
use depozip_core::Metadata;
use depozip_core::UploadResult;
use depozip_core::archive::ArchiveReport;
use serde::Serialize;
use std::io::Write;
use std::io::{self};
use std::path::Path;

pub struct JsonFormatter;

#[derive(Serialize)]
struct ArchiveOutput {
    path: String,
    files_added: usize,
    bytes_read: u64,
    archive_size: u64,
    files_skipped: usize,
    duration_ms: u128,
    warnings: Vec<String>,
    ignored: Vec<String>,
}

impl ArchiveOutput {
    fn new(path: &Path, report: &ArchiveReport) -> Self {
        Self {
            path: path.display().to_string(),
            files_added: report.files_added,
            bytes_read: report.bytes_read,
            archive_size: report.archive_size,
            files_skipped: report.files_skipped,
            duration_ms: report.duration.as_millis(),
            warnings: report.warnings.clone(),
            ignored: report.ignored.clone(),
        }
    }
}

#[derive(Serialize)]
struct DryRunOutput<'a> {
    archive: ArchiveOutput,
    metadata: &'a Metadata,
}

impl JsonFormatter {
    fn output<T: Serialize + ?Sized>(value: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(value)?;
        writeln!(io::stdout(), "{json}")?;
        Ok(())
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_upload_result(&self, result: &UploadResult, _published: bool) -> Result<()> {
        Self::output(&result.response)
    }

    fn format_dry_run(&self, metadata: &Metadata, archive: &CreatedArchive) -> Result<()> {
        Self::output(&DryRunOutput {
            archive: ArchiveOutput::new(&archive.path, &archive.report),
            metadata,
        })
    }

    fn format_archive_summary(&self, _path: &Path, _report: &ArchiveReport) {}

    fn format_ignore_set(&self, _ignore: &IgnoreSet) {}

    fn format_warning(&self, _message: &str) {}
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_dry_run_output_structure() {
        let metadata = Metadata::dataset("T", "D", ["Doe, Jane"], "CC0-1.0").unwrap();
        let report = ArchiveReport {
            files_added: 2,
            bytes_read: 10,
            archive_size: 8,
            ignored: vec!["build".to_string()],
            ..ArchiveReport::default()
        };
        let output = DryRunOutput {
            archive: ArchiveOutput::new(&PathBuf::from("/tmp/t.zip"), &report),
            metadata: &metadata,
        };

        let json = serde_json::to_value(&output).unwrap();
        assert_eq!(json["archive"]["path"], "/tmp/t.zip");
        assert_eq!(json["archive"]["files_added"], 2);
        assert_eq!(json["archive"]["ignored"][0], "build");
        assert_eq!(json["metadata"]["creators"][0]["name"], "Doe, Jane");
    }
}
