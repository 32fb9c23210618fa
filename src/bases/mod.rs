//! Dataset directory management: listing and removing dataset files.
//!
//! This is the only part of the crate that writes to the dataset directory,
//! and only on an explicit request.

use anyhow::{Context, Result, bail};
use chrono::{DateTime, Local};
use std::fs;
use std::path::{Path, PathBuf};

use crate::discover::{DiscoverOptions, discover_datasets};
use crate::paths::remove_path_prefix;
use crate::render::TableRenderer;

/// A dataset file as shown in the management listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetInfo {
    pub path: PathBuf,
    /// Path relative to the dataset directory
    pub name: String,
    pub size_bytes: u64,
    pub modified: Option<DateTime<Local>>,
}

/// Creates the dataset directory if it does not exist yet.
pub fn ensure_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create dataset directory {}", dir.display()))
}

/// Lists the datasets in `dir`, in the same order a search visits them.
pub fn list_datasets(dir: &Path, options: &DiscoverOptions) -> Result<Vec<DatasetInfo>> {
    let files = discover_datasets(dir, options)?;

    files
        .into_iter()
        .map(|path| {
            let metadata = fs::metadata(&path)
                .with_context(|| format!("Failed to read metadata for {}", path.display()))?;
            Ok(DatasetInfo {
                name: remove_path_prefix(&path, dir).display().to_string(),
                size_bytes: metadata.len(),
                modified: metadata.modified().ok().map(DateTime::<Local>::from),
                path,
            })
        })
        .collect()
}

/// Deletes the `number`-th dataset (1-based, as numbered by
/// [`list_datasets`]) and returns what was removed.
pub fn remove_dataset(dir: &Path, options: &DiscoverOptions, number: usize) -> Result<DatasetInfo> {
    let datasets = list_datasets(dir, options)?;
    if datasets.is_empty() {
        bail!("No datasets available in {}", dir.display());
    }
    let Some(info) = number
        .checked_sub(1)
        .and_then(|index| datasets.get(index))
        .cloned()
    else {
        bail!(
            "Invalid dataset number {number}: expected 1..={}",
            datasets.len()
        );
    };

    fs::remove_file(&info.path)
        .with_context(|| format!("Failed to remove {}", info.path.display()))?;
    log::info!(target: "bases", "Removed dataset {}", info.path.display());
    Ok(info)
}

/// Renders a numbered listing: name, size in KB and modification time.
pub fn render_listing(datasets: &[DatasetInfo], renderer: &TableRenderer) -> String {
    let headers = ["#", "File name", "Size", "Modified"].map(str::to_string);
    let rows: Vec<_> = datasets
        .iter()
        .enumerate()
        .map(|(i, info)| {
            vec![
                Some((i + 1).to_string()),
                Some(info.name.clone()),
                Some(format!("{} KB", info.size_bytes / 1024)),
                info.modified
                    .map(|time| time.format("%Y-%m-%d %H:%M:%S").to_string()),
            ]
        })
        .collect();

    // File names are never cut short in the listing
    let renderer = TableRenderer {
        max_cell_width: usize::MAX,
        ..renderer.clone()
    };
    renderer.render_table("Available datasets:", &headers, &rows)
}

#[cfg(test)]
mod tests;
