//! Dataset discovery.
//!
//! Lists the dataset files sitting directly in the dataset directory. The
//! directory is re-listed on every call, so files added or removed while the
//! tool runs are picked up by the next search.

use globset::{GlobBuilder, GlobMatcher};
use ignore::WalkBuilder;
use std::path::{Path, PathBuf};

use crate::error::DiscoverError;
use crate::telemetry::{LogMessage, log_with_context};

/// Extension used when none is configured.
pub const DEFAULT_EXTENSION: &str = "csv";

/// Configuration options for dataset discovery.
#[derive(Debug, Clone)]
pub struct DiscoverOptions {
    /// File extension (without the dot) that marks a dataset.
    /// Compared case-insensitively.
    pub extension: String,

    /// Whether files whose name starts with a dot are considered.
    pub include_hidden: bool,
}

impl Default for DiscoverOptions {
    fn default() -> Self {
        Self {
            extension: DEFAULT_EXTENSION.to_string(),
            include_hidden: false,
        }
    }
}

/// Lists the dataset files directly inside `directory`, sorted by path.
///
/// Subdirectories are not descended into.
///
/// # Errors
///
/// Returns [`DiscoverError::Unavailable`] if `directory` does not exist,
/// [`DiscoverError::NotADirectory`] if it is a file, and
/// [`DiscoverError::Extension`] if the configured extension cannot form a
/// glob. An existing but empty directory is `Ok` with no paths.
pub fn discover_datasets(
    directory: &Path,
    options: &DiscoverOptions,
) -> Result<Vec<PathBuf>, DiscoverError> {
    if !directory.exists() {
        return Err(DiscoverError::Unavailable(directory.to_path_buf()));
    }
    if !directory.is_dir() {
        return Err(DiscoverError::NotADirectory(directory.to_path_buf()));
    }

    let matcher = extension_matcher(&options.extension)?;

    let mut builder = WalkBuilder::new(directory);
    builder
        .max_depth(Some(1))
        .hidden(!options.include_hidden)
        .ignore(false)
        .git_ignore(false)
        .git_exclude(false)
        .git_global(false)
        .parents(false);

    let mut files = Vec::new();
    for result in builder.build() {
        match result {
            Ok(entry) => {
                let path = entry.path();
                let is_dataset = path.is_file()
                    && path
                        .file_name()
                        .is_some_and(|name| matcher.is_match(Path::new(name)));
                if is_dataset {
                    files.push(path.to_path_buf());
                }
            }
            Err(err) => {
                log_with_context(
                    log::Level::Warn,
                    LogMessage {
                        message: format!("Error listing dataset directory: {err}"),
                        module: "discover",
                        context: Some(vec![("directory", directory.display().to_string())]),
                    },
                );
            }
        }
    }

    files.sort();

    log_with_context(
        log::Level::Info,
        LogMessage {
            message: format!("Discovered {} dataset(s)", files.len()),
            module: "discover",
            context: Some(vec![("directory", directory.display().to_string())]),
        },
    );

    Ok(files)
}

fn extension_matcher(extension: &str) -> Result<GlobMatcher, DiscoverError> {
    let extension = extension.trim_start_matches('.');
    GlobBuilder::new(&format!("*.{extension}"))
        .case_insensitive(true)
        .literal_separator(true)
        .build()
        .map(|glob| glob.compile_matcher())
        .map_err(|source| DiscoverError::Extension {
            extension: extension.to_string(),
            source,
        })
}
