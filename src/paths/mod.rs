//! Path helpers for presenting datasets to the operator.

use std::path::{Path, PathBuf};

/// Removes `prefix` from `path` when `path` lies under it.
///
/// Paths outside `prefix` are returned unchanged.
///
/// # Examples
///
/// ```
/// use std::path::{Path, PathBuf};
/// use rowseek::paths::remove_path_prefix;
///
/// let path = Path::new("/srv/rowseek/bases/leak1.csv");
/// let result = remove_path_prefix(path, "/srv/rowseek/bases");
/// assert_eq!(result, PathBuf::from("leak1.csv"));
///
/// let unchanged = remove_path_prefix(path, "/tmp");
/// assert_eq!(unchanged, path);
/// ```
pub fn remove_path_prefix<P: AsRef<Path>, Q: AsRef<Path>>(path: P, prefix: Q) -> PathBuf {
    let path = path.as_ref();
    path.strip_prefix(prefix.as_ref())
        .map(Path::to_path_buf)
        .unwrap_or_else(|_| path.to_path_buf())
}

/// The short name shown in result titles: the file name, or the whole path
/// when it has none.
pub fn dataset_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests;
