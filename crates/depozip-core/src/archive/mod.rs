//! Directory archiving.
//!
//! Turns a directory into a single deflate-compressed ZIP file, leaving out
//! ignored names and suffixes. Entry names are always relative to the
//! archived directory and use forward slashes.

pub mod config;
pub mod filters;
pub mod report;
pub mod walker;
pub mod zip;

// Re-exports for public API
pub use config::ALWAYS_IGNORE_SUFFIXES;
pub use config::ArchiveConfig;
pub use config::DEFAULT_IGNORE_NAMES;
pub use config::IgnoreSet;
pub use report::ArchiveReport;
pub use walker::FilteredEntry;
pub use walker::FilteredWalker;

use crate::DepositError;
use crate::NoopProgress;
use crate::ProgressCallback;
use crate::Result;
use std::fs;
use std::path::Path;
use std::path::PathBuf;
use tempfile::NamedTempFile;

/// A finished archive on disk.
#[derive(Debug, Clone)]
pub struct CreatedArchive {
    /// Location of the archive.
    pub path: PathBuf,

    /// Statistics gathered while writing it.
    pub report: ArchiveReport,
}

/// Resolves `dir` to an absolute, canonical directory path.
///
/// # Errors
///
/// Returns [`DepositError::NotADirectory`] if `dir` does not exist or is not a
/// directory.
pub fn resolve_root(dir: &Path) -> Result<PathBuf> {
    let resolved = fs::canonicalize(dir).map_err(|_| DepositError::NotADirectory {
        path: std::path::absolute(dir).unwrap_or_else(|_| dir.to_path_buf()),
    })?;
    if !resolved.is_dir() {
        return Err(DepositError::NotADirectory { path: resolved });
    }
    Ok(resolved)
}

/// Archives `dir` according to `config`.
///
/// With no `config.output` the archive lands in a new file in the system
/// temporary directory named after the directory, e.g.
/// `/tmp/project-a1B2c3.zip`. The file is kept after the call returns.
///
/// # Examples
///
/// ```no_run
/// use depozip_core::archive::ArchiveConfig;
/// use depozip_core::archive::archive_directory;
///
/// let archive = archive_directory("./project", &ArchiveConfig::default())?;
/// println!(
///     "{} files in {}",
///     archive.report.files_added,
///     archive.path.display()
/// );
/// # Ok::<(), depozip_core::DepositError>(())
/// ```
///
/// # Errors
///
/// Returns an error if `dir` is not a directory, the configuration is
/// invalid, or writing the archive fails. On error no archive is left at the
/// output location.
pub fn archive_directory<P: AsRef<Path>>(dir: P, config: &ArchiveConfig) -> Result<CreatedArchive> {
    archive_directory_with_progress(dir, config, &mut NoopProgress)
}

/// Archives `dir`, reporting each added file to `progress`.
///
/// # Errors
///
/// See [`archive_directory`].
pub fn archive_directory_with_progress<P: AsRef<Path>>(
    dir: P,
    config: &ArchiveConfig,
    progress: &mut dyn ProgressCallback,
) -> Result<CreatedArchive> {
    let root = resolve_root(dir.as_ref())?;
    config.validate()?;

    let (mut staging, destination) = match &config.output {
        Some(output) => {
            let (parent, file_name) = split_output(output)?;
            // Staged next to the destination so the final rename stays on
            // one filesystem.
            let staging = tempfile::Builder::new()
                .prefix(".depozip-")
                .suffix(".zip.part")
                .tempfile_in(&parent)?;
            (staging, Some(parent.join(file_name)))
        }
        None => {
            let prefix = root
                .file_name()
                .and_then(|name| name.to_str())
                .map_or_else(|| "archive-".to_string(), |name| format!("{name}-"));
            let temp_dir = fs::canonicalize(std::env::temp_dir())?;
            let staging = tempfile::Builder::new()
                .prefix(&prefix)
                .suffix(".zip")
                .tempfile_in(temp_dir)?;
            (staging, None)
        }
    };

    let mut exclude = vec![staging.path().to_path_buf()];
    exclude.extend(destination.iter().cloned());

    let mut report = zip::write_zip(staging.as_file_mut(), &root, config, &exclude, progress)?;
    staging.as_file().sync_all()?;
    report.archive_size = staging.as_file().metadata()?.len();

    let path = persist(staging, destination)?;
    progress.on_archive_complete(&path, &report);

    Ok(CreatedArchive { path, report })
}

/// Splits an output path into its canonical parent directory and file name.
fn split_output(output: &Path) -> Result<(PathBuf, PathBuf)> {
    let absolute = std::path::absolute(output)?;
    let file_name = absolute.file_name().ok_or_else(|| {
        DepositError::invalid_input(format!(
            "archive output has no file name: {}",
            output.display()
        ))
    })?;
    let parent = absolute.parent().unwrap_or_else(|| Path::new("/"));
    let parent = fs::canonicalize(parent).map_err(|_| DepositError::NotADirectory {
        path: parent.to_path_buf(),
    })?;
    Ok((parent, PathBuf::from(file_name)))
}

/// Moves a finished staging file to its destination, or keeps it in place.
fn persist(staging: NamedTempFile, destination: Option<PathBuf>) -> Result<PathBuf> {
    match destination {
        Some(destination) => {
            staging.persist(&destination).map_err(|e| e.error)?;
            Ok(destination)
        }
        None => {
            let (_file, path) = staging.keep().map_err(|e| e.error)?;
            Ok(path)
        }
    }
}
