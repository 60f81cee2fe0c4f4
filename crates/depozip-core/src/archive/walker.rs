//! Directory tree walking with ignore filtering.
//!
//! Ignored directories are pruned during traversal, so nothing below them is
//! ever read.

use crate::DepositError;
use crate::Result;
use crate::archive::config::ArchiveConfig;
use crate::archive::filters;
use std::fs;
use std::path::Path;
use std::path::PathBuf;
use walkdir::WalkDir;

/// Walks an archive root and yields every entry with its classification.
///
/// Directories are traversed but never yielded, except ignored ones, which
/// are yielded once as [`EntryType::Ignored`] and not descended. A symlink
/// to a regular file is yielded as [`EntryType::File`] and archived with the
/// target's content. Other symlinks are yielded as [`EntryType::Symlink`]
/// unless `follow_symlinks` is set, in which case the link target is walked
/// like a regular entry.
///
/// # Examples
///
/// ```no_run
/// use depozip_core::archive::ArchiveConfig;
/// use depozip_core::archive::walker::EntryType;
/// use depozip_core::archive::walker::FilteredWalker;
/// use std::path::Path;
///
/// let config = ArchiveConfig::default();
/// let walker = FilteredWalker::new(Path::new("./project"), &config);
///
/// for entry in walker.walk() {
///     let entry = entry.unwrap();
///     if entry.entry_type == EntryType::File {
///         println!("Would add: {}", entry.arcname);
///     }
/// }
/// ```
pub struct FilteredWalker<'a> {
    root: &'a Path,
    config: &'a ArchiveConfig,
}

impl<'a> FilteredWalker<'a> {
    /// Creates a walker over `root`.
    #[must_use]
    pub fn new(root: &'a Path, config: &'a ArchiveConfig) -> Self {
        Self { root, config }
    }

    /// Returns an iterator over the walked entries.
    ///
    /// # Errors
    ///
    /// Entries may error if a directory cannot be read, metadata cannot be
    /// read, or a path is not valid UTF-8.
    pub fn walk(&self) -> impl Iterator<Item = Result<FilteredEntry>> + '_ {
        let mut entries = WalkDir::new(self.root)
            .follow_links(self.config.follow_symlinks)
            .into_iter();

        std::iter::from_fn(move || {
            loop {
                let entry = match entries.next()? {
                    Ok(entry) => entry,
                    Err(e) => {
                        return Some(Err(DepositError::Io(std::io::Error::other(format!(
                            "walkdir error: {e}"
                        )))));
                    }
                };

                // The root itself is never matched against the ignore set.
                if entry.depth() > 0 && self.config.ignore.contains_os_name(entry.file_name()) {
                    if entry.file_type().is_dir() {
                        entries.skip_current_dir();
                    }
                    return Some(self.ignored_entry(entry.path()));
                }

                if let Some(item) = self.build_filtered_entry(&entry).transpose() {
                    return Some(item);
                }
            }
        })
    }

    fn ignored_entry(&self, path: &Path) -> Result<FilteredEntry> {
        Ok(FilteredEntry {
            path: path.to_path_buf(),
            arcname: filters::arcname(path, self.root)?,
            entry_type: EntryType::Ignored,
            size: 0,
        })
    }

    /// Builds a `FilteredEntry`, or `Ok(None)` for directories and special
    /// files.
    fn build_filtered_entry(&self, entry: &walkdir::DirEntry) -> Result<Option<FilteredEntry>> {
        let file_type = entry.file_type();
        if file_type.is_dir() {
            return Ok(None);
        }

        let path = entry.path();
        let entry_type = if file_type.is_symlink() {
            // Links to regular files are stored with the target's content;
            // directory links are never descended.
            match fs::metadata(path) {
                Ok(target) if target.is_file() => EntryType::File,
                _ => EntryType::Symlink {
                    target: fs::read_link(path).map_err(|e| {
                        DepositError::Io(std::io::Error::other(format!(
                            "cannot read symlink target for {}: {e}",
                            path.display()
                        )))
                    })?,
                },
            }
        } else if file_type.is_file() {
            EntryType::File
        } else {
            // Sockets, FIFOs and devices are not regular files.
            return Ok(None);
        };

        let relative = path.strip_prefix(self.root).unwrap_or(path);
        if filters::should_skip(relative, entry_type == EntryType::File, &self.config.ignore) {
            return self.ignored_entry(path).map(Some);
        }

        let size = if entry_type == EntryType::File {
            fs::metadata(path)
                .map_err(|e| {
                    DepositError::Io(std::io::Error::other(format!(
                        "cannot read metadata for {}: {e}",
                        path.display()
                    )))
                })?
                .len()
        } else {
            0
        };

        Ok(Some(FilteredEntry {
            path: path.to_path_buf(),
            arcname: filters::arcname(path, self.root)?,
            entry_type,
            size,
        }))
    }
}

/// A walked entry with its arcname.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilteredEntry {
    /// Full filesystem path to the entry.
    pub path: PathBuf,

    /// Forward-slash path relative to the archive root.
    pub arcname: String,

    /// Type of entry.
    pub entry_type: EntryType,

    /// Size in bytes of the content to archive (0 unless a file).
    pub size: u64,
}

/// Type of a walked entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryType {
    /// Regular file, or a symlink to one.
    File,

    /// Symbolic link that is not archived: a directory link that was not
    /// followed, or a dangling link.
    Symlink {
        /// Target of the symlink.
        target: PathBuf,
    },

    /// Left out by the ignore set.
    Ignored,
}
