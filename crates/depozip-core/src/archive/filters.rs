//! Path filtering and arcname computation.

use crate::DepositError;
use crate::Result;
use crate::archive::config::IgnoreSet;
use std::path::Component;
use std::path::Path;

/// Checks if a path relative to the archive root should be left out.
///
/// A path is skipped if any of its segments is an ignored name, or if it is
/// a file whose final suffix is always ignored.
///
/// # Examples
///
/// ```
/// use depozip_core::archive::IgnoreSet;
/// use depozip_core::archive::filters;
/// use std::path::Path;
///
/// let ignore = IgnoreSet::default();
/// assert!(filters::should_skip(Path::new(".git/config"), true, &ignore));
/// assert!(filters::should_skip(Path::new("src/cache.pyc"), true, &ignore));
/// assert!(!filters::should_skip(Path::new("src/main.py"), true, &ignore));
/// ```
#[must_use]
pub fn should_skip(relative: &Path, is_file: bool, ignore: &IgnoreSet) -> bool {
    if has_ignored_segment(relative, ignore) {
        return true;
    }

    is_file && ignore.has_ignored_suffix(relative)
}

/// Returns `true` if any normal segment of `relative` is an ignored name.
#[must_use]
pub fn has_ignored_segment(relative: &Path, ignore: &IgnoreSet) -> bool {
    relative.components().any(|component| match component {
        Component::Normal(name) => ignore.contains_os_name(name),
        _ => false,
    })
}

/// Computes the arcname of `path` inside an archive of `root`.
///
/// The arcname is the path relative to `root`, joined with forward slashes
/// on every platform.
///
/// # Errors
///
/// Returns an error if `path` is not under `root`, equals `root`, or is not
/// valid UTF-8.
///
/// # Examples
///
/// ```
/// use depozip_core::archive::filters;
/// use std::path::Path;
///
/// let name = filters::arcname(
///     Path::new("/data/project/src/main.rs"),
///     Path::new("/data/project"),
/// )
/// .unwrap();
/// assert_eq!(name, "src/main.rs");
/// ```
pub fn arcname(path: &Path, root: &Path) -> Result<String> {
    let relative = path.strip_prefix(root).map_err(|_| {
        DepositError::invalid_input(format!(
            "{} is not under archive root {}",
            path.display(),
            root.display()
        ))
    })?;

    let mut segments = Vec::new();
    for component in relative.components() {
        match component {
            Component::Normal(name) => {
                let name = name.to_str().ok_or_else(|| {
                    DepositError::invalid_input(format!(
                        "path is not valid UTF-8: {}",
                        path.display()
                    ))
                })?;
                segments.push(name);
            }
            Component::CurDir => {}
            _ => {
                return Err(DepositError::invalid_input(format!(
                    "unexpected component in {}",
                    relative.display()
                )));
            }
        }
    }

    if segments.is_empty() {
        return Err(DepositError::invalid_input(format!(
            "{} is the archive root itself",
            path.display()
        )));
    }

    Ok(segments.join("/"))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_should_skip_ignored_directory_anywhere() {
        let ignore = IgnoreSet::default();
        assert!(should_skip(Path::new(".git"), false, &ignore));
        assert!(should_skip(Path::new(".git/config"), true, &ignore));
        assert!(should_skip(Path::new("pkg/__pycache__/m.py"), true, &ignore));
        assert!(should_skip(Path::new("a/b/build/out.o"), true, &ignore));
    }

    #[test]
    fn test_should_skip_ignored_file_name() {
        let ignore = IgnoreSet::default();
        assert!(should_skip(Path::new(".DS_Store"), true, &ignore));
        assert!(should_skip(Path::new("docs/.DS_Store"), true, &ignore));
    }

    #[test]
    fn test_should_skip_matches_whole_segments_only() {
        let ignore = IgnoreSet::default();
        assert!(!should_skip(Path::new(".github/workflows/ci.yml"), true, &ignore));
        assert!(!should_skip(Path::new("builder/main.rs"), true, &ignore));
        assert!(!should_skip(Path::new("distance.csv"), true, &ignore));
    }

    #[test]
    fn test_should_skip_suffix_only_for_files() {
        let ignore = IgnoreSet::default();
        assert!(should_skip(Path::new("cache.pyc"), true, &ignore));
        assert!(should_skip(Path::new("deep/dir/x.pyo"), true, &ignore));
        assert!(!should_skip(Path::new("odd.pyc"), false, &ignore));
    }

    #[test]
    fn test_should_skip_extra_names() {
        let ignore = IgnoreSet::default().with_names(["secrets"]);
        assert!(should_skip(Path::new("secrets/key.pem"), true, &ignore));
        assert!(!should_skip(Path::new("public/key.pub"), true, &ignore));
    }

    #[test]
    fn test_arcname_nested() {
        let root = Path::new("/home/user/project");
        let name = arcname(Path::new("/home/user/project/a/b/c.txt"), root).unwrap();
        assert_eq!(name, "a/b/c.txt");
    }

    #[test]
    fn test_arcname_top_level() {
        let root = Path::new("/home/user/project");
        let name = arcname(Path::new("/home/user/project/README.md"), root).unwrap();
        assert_eq!(name, "README.md");
    }

    #[test]
    fn test_arcname_not_under_root() {
        let root = Path::new("/home/user/project");
        let result = arcname(Path::new("/home/other/file.txt"), root);
        assert!(result.unwrap_err().is_invalid_input());
    }

    #[test]
    fn test_arcname_root_itself() {
        let root = Path::new("/home/user/project");
        assert!(arcname(root, root).is_err());
    }
}
