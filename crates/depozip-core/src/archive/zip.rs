//! ZIP writing for filtered directory trees.

use crate::ProgressCallback;
use crate::Result;
use crate::archive::config::ArchiveConfig;
use crate::archive::report::ArchiveReport;
use crate::archive::walker::EntryType;
use crate::archive::walker::FilteredEntry;
use crate::archive::walker::FilteredWalker;
use std::fs;
use std::fs::File;
use std::io::Read;
use std::io::Seek;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use zip::CompressionMethod;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

/// Writes every archivable file under `root` into a ZIP stream.
///
/// Paths listed in `exclude` are never archived, whether reached directly or
/// through a symlink; the caller passes the archive's own location here so an
/// output inside `root` is not swallowed. `exclude` must hold canonical paths.
///
/// # Errors
///
/// Returns an error if traversal fails, a source file cannot be read, or the
/// writer fails.
pub fn write_zip<W: Write + Seek>(
    writer: W,
    root: &Path,
    config: &ArchiveConfig,
    exclude: &[PathBuf],
    progress: &mut dyn ProgressCallback,
) -> Result<ArchiveReport> {
    let mut zip = ZipWriter::new(writer);
    let mut report = ArchiveReport::default();
    let start = std::time::Instant::now();

    let options = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .compression_level(config.compression_level.map(i64::from));

    // Reusable buffer for file copying
    let mut buffer = vec![0u8; 64 * 1024];

    for entry in FilteredWalker::new(root, config).walk() {
        let entry = entry?;

        if entry.entry_type == EntryType::Ignored {
            report.add_ignored(entry.arcname);
            continue;
        }

        if is_excluded(&entry.path, exclude) {
            report.files_skipped += 1;
            report.add_warning(format!("Skipped archive output: {}", entry.arcname));
            continue;
        }

        match &entry.entry_type {
            EntryType::File => {
                add_file_to_zip(&mut zip, &entry, &options, &mut report, &mut buffer)?;
                progress.on_entry_added(&entry.arcname, entry.size);
            }
            EntryType::Symlink { target } => {
                // ZIP has no portable symlink entry
                report.files_skipped += 1;
                report.add_warning(format!(
                    "Skipped symlink: {} -> {}",
                    entry.arcname,
                    target.display()
                ));
            }
            EntryType::Ignored => {}
        }
    }

    zip.finish()
        .map_err(|e| std::io::Error::other(format!("failed to finish ZIP archive: {e}")))?;

    report.duration = start.elapsed();

    Ok(report)
}

/// Checks `path`, and the file it resolves to, against the excluded paths.
fn is_excluded(path: &Path, exclude: &[PathBuf]) -> bool {
    if exclude.iter().any(|excluded| excluded == path) {
        return true;
    }
    fs::canonicalize(path).is_ok_and(|resolved| exclude.contains(&resolved))
}

/// Adds a single file to the ZIP archive.
fn add_file_to_zip<W: Write + Seek>(
    zip: &mut ZipWriter<W>,
    entry: &FilteredEntry,
    options: &SimpleFileOptions,
    report: &mut ArchiveReport,
    buffer: &mut [u8],
) -> Result<()> {
    let mut file = File::open(&entry.path)?;
    let metadata = file.metadata()?;

    let file_options = options.large_file(metadata.len() >= u64::from(u32::MAX));
    #[cfg(unix)]
    let file_options = {
        use std::os::unix::fs::PermissionsExt;
        file_options.unix_permissions(metadata.permissions().mode())
    };

    zip.start_file(entry.arcname.as_str(), file_options)
        .map_err(|e| std::io::Error::other(format!("failed to start file in ZIP: {e}")))?;

    let mut bytes_read = 0u64;
    loop {
        let n = file.read(buffer)?;
        if n == 0 {
            break;
        }
        zip.write_all(&buffer[..n])?;
        bytes_read += n as u64;
    }

    report.files_added += 1;
    report.bytes_read += bytes_read;

    Ok(())
}
