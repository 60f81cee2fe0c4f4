//! Configuration for directory archiving.

use crate::DepositError;
use crate::Result;
use std::collections::BTreeSet;
use std::ffi::OsStr;
use std::path::Path;
use std::path::PathBuf;

/// Directory and file names skipped at any depth.
pub const DEFAULT_IGNORE_NAMES: &[&str] = &[
    ".git",
    ".venv",
    ".mypy_cache",
    ".ruff_cache",
    ".pytest_cache",
    ".DS_Store",
    "__pycache__",
    "build",
    "dist",
    "htmlcov",
];

/// File suffixes that are never archived, wherever they appear.
pub const ALWAYS_IGNORE_SUFFIXES: &[&str] = &[".pyc", ".pyo"];

/// Names and suffixes excluded from an archive.
///
/// Starts from [`DEFAULT_IGNORE_NAMES`] and [`ALWAYS_IGNORE_SUFFIXES`]. Extra
/// names can be added; defaults can never be removed.
///
/// # Examples
///
/// ```
/// use depozip_core::archive::IgnoreSet;
///
/// let ignore = IgnoreSet::default().with_names(["node_modules"]);
/// assert!(ignore.contains_name("node_modules"));
/// assert!(ignore.contains_name(".git"));
/// assert!(ignore.has_ignored_suffix("module.pyc"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IgnoreSet {
    names: BTreeSet<String>,
    suffixes: BTreeSet<String>,
}

impl Default for IgnoreSet {
    fn default() -> Self {
        Self {
            names: DEFAULT_IGNORE_NAMES.iter().map(|&s| s.to_string()).collect(),
            suffixes: ALWAYS_IGNORE_SUFFIXES
                .iter()
                .map(|&s| s.to_string())
                .collect(),
        }
    }
}

impl IgnoreSet {
    /// Creates an ignore set holding only the defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds names to the set, keeping everything already present.
    #[must_use]
    pub fn with_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extend(names);
        self
    }

    /// Adds names to the set in place.
    pub fn extend<I, S>(&mut self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.names.extend(
            names
                .into_iter()
                .map(Into::<String>::into)
                .filter(|name| !name.is_empty()),
        );
    }

    /// Returns `true` if `name` is an ignored path segment.
    #[must_use]
    pub fn contains_name(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// Returns `true` if `name` is an ignored path segment.
    ///
    /// Non-UTF-8 names never match.
    #[must_use]
    pub fn contains_os_name(&self, name: &OsStr) -> bool {
        name.to_str().is_some_and(|name| self.contains_name(name))
    }

    /// Returns `true` if the final suffix of `file_name` is always ignored.
    ///
    /// Only the last suffix counts, and a leading dot does not start one:
    /// `.pyc` on its own has no suffix.
    ///
    /// # Examples
    ///
    /// ```
    /// use depozip_core::archive::IgnoreSet;
    ///
    /// let ignore = IgnoreSet::default();
    /// assert!(ignore.has_ignored_suffix("cache.pyc"));
    /// assert!(!ignore.has_ignored_suffix("cache.pyc.txt"));
    /// assert!(!ignore.has_ignored_suffix(".pyc"));
    /// ```
    #[must_use]
    pub fn has_ignored_suffix(&self, file_name: impl AsRef<Path>) -> bool {
        file_name
            .as_ref()
            .extension()
            .and_then(OsStr::to_str)
            .is_some_and(|ext| self.suffixes.contains(&format!(".{ext}")))
    }

    /// Ignored names, sorted.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    /// Always-ignored suffixes, sorted.
    pub fn suffixes(&self) -> impl Iterator<Item = &str> {
        self.suffixes.iter().map(String::as_str)
    }
}

/// Configuration for [`archive_directory`](crate::archive::archive_directory).
///
/// # Examples
///
/// ```
/// use depozip_core::archive::ArchiveConfig;
///
/// let config = ArchiveConfig::default()
///     .with_extra_ignore(["target"])
///     .with_compression_level(9);
/// assert!(config.ignore.contains_name("target"));
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct ArchiveConfig {
    /// Names and suffixes to leave out.
    ///
    /// Default: [`IgnoreSet::default`].
    pub ignore: IgnoreSet,

    /// Where to write the archive.
    ///
    /// `None` writes a fresh file in the system temporary directory, so
    /// repeated runs never overwrite each other.
    ///
    /// Default: `None`.
    pub output: Option<PathBuf>,

    /// Deflate level (1-9). `None` uses the zip crate default.
    ///
    /// Default: `Some(6)`.
    pub compression_level: Option<u8>,

    /// Archive the targets of symlinks instead of skipping the links.
    ///
    /// Default: `false`.
    pub follow_symlinks: bool,
}

impl Default for ArchiveConfig {
    fn default() -> Self {
        Self {
            ignore: IgnoreSet::default(),
            output: None,
            compression_level: Some(6),
            follow_symlinks: false,
        }
    }
}

impl ArchiveConfig {
    /// Creates a new `ArchiveConfig` with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds names to the ignore set.
    #[must_use]
    pub fn with_extra_ignore<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ignore.extend(names);
        self
    }

    /// Sets the output path.
    #[must_use]
    pub fn with_output(mut self, output: Option<PathBuf>) -> Self {
        self.output = output;
        self
    }

    /// Sets the compression level.
    ///
    /// Out-of-range values are reported by [`validate`](Self::validate).
    #[must_use]
    pub fn with_compression_level(mut self, level: u8) -> Self {
        self.compression_level = Some(level);
        self
    }

    /// Sets whether symlinks are followed.
    #[must_use]
    pub fn with_follow_symlinks(mut self, follow: bool) -> Self {
        self.follow_symlinks = follow;
        self
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the compression level is outside 1-9 or the
    /// output path has no file name.
    pub fn validate(&self) -> Result<()> {
        if let Some(level) = self.compression_level
            && !(1..=9).contains(&level)
        {
            return Err(DepositError::invalid_input(format!(
                "compression level must be 1-9, got {level}"
            )));
        }
        if let Some(output) = &self.output
            && output.file_name().is_none()
        {
            return Err(DepositError::invalid_input(format!(
                "archive output has no file name: {}",
                output.display()
            )));
        }
        Ok(())
    }
}
