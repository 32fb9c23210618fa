//! Column-aware search across every dataset in a directory.
//!
//! [`search_datasets`] returns a lazy [`SearchStream`] of [`SearchEvent`]s:
//! one event per non-empty (file, column) result and one per failure. Files
//! are loaded one at a time, only when the stream reaches them, so callers
//! can show results while later files are still unread. [`search`] drives a
//! stream into a [`SearchSink`] and reports whether anything matched.
//!
//! A file that cannot be loaded, or a column whose match aborts, is reported
//! as an event and skipped. Nothing short of an unusable directory stops a
//! search early, and even that only ends it with zero results.

pub mod matcher;

use log::Level;
use serde::Serialize;
use std::collections::VecDeque;
use std::path::{Path, PathBuf};

use crate::classify::{Category, classify_columns};
use crate::dataset::{LoadOptions, Row, load_table};
use crate::discover::{DiscoverOptions, discover_datasets};
use crate::error::MatchError;
use crate::paths::dataset_name;
use crate::telemetry::{LogMessage, log_with_context};

pub use matcher::ColumnMatcher;

/// Configuration options for a search.
#[derive(Debug, Clone)]
pub struct SearchOptions {
    /// Directory holding the datasets
    pub bases_dir: PathBuf,

    /// Which files count as datasets
    pub discover: DiscoverOptions,

    /// How dataset files are parsed
    pub load: LoadOptions,
}

impl SearchOptions {
    pub fn new(bases_dir: impl Into<PathBuf>) -> Self {
        Self {
            bases_dir: bases_dir.into(),
            discover: DiscoverOptions::default(),
            load: LoadOptions::default(),
        }
    }
}

/// The matched rows of one (file, column) pair.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct MatchBatch {
    /// Dataset the rows came from
    pub file_path: PathBuf,

    /// Display name of the dataset
    pub dataset: String,

    /// Column the query matched in
    pub column: String,

    /// All column names of the dataset
    pub headers: Vec<String>,

    /// Matched rows with all of their columns, untruncated
    pub rows: Vec<Row>,
}

/// Something the search wants the caller to know about, in the order it
/// happened.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SearchEvent {
    /// Rows matched in one column of one dataset
    Matches(MatchBatch),

    /// The dataset directory could not be listed
    DirectoryUnavailable { directory: PathBuf, error: String },

    /// A dataset could not be loaded and was skipped
    DatasetFailed { file_path: PathBuf, error: String },

    /// Matching one column aborted; the rest of the dataset was still searched
    ColumnFailed {
        file_path: PathBuf,
        column: String,
        error: String,
    },
}

impl SearchEvent {
    /// Whether this event is a failure rather than a result.
    pub fn is_warning(&self) -> bool {
        !matches!(self, SearchEvent::Matches(_))
    }
}

/// Running totals for a search.
#[derive(Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchSummary {
    pub datasets_found: usize,
    pub datasets_searched: usize,
    pub datasets_failed: usize,
    pub columns_searched: usize,
    pub columns_failed: usize,
    pub batches: usize,
    pub matched_rows: usize,
}

impl SearchSummary {
    /// Whether at least one row matched anywhere.
    pub fn found(&self) -> bool {
        self.matched_rows > 0
    }
}

/// Receives search events as soon as they are produced.
pub trait SearchSink {
    fn on_event(&mut self, event: &SearchEvent);
}

impl SearchSink for Vec<SearchEvent> {
    fn on_event(&mut self, event: &SearchEvent) {
        self.push(event.clone());
    }
}

/// Lazy, single-pass sequence of search events.
///
/// Each call to `next` either returns a buffered event or loads and searches
/// the next dataset.
pub struct SearchStream {
    category: Category,
    matcher: Result<ColumnMatcher, MatchError>,
    load: LoadOptions,
    files: std::vec::IntoIter<PathBuf>,
    pending: VecDeque<SearchEvent>,
    summary: SearchSummary,
}

impl SearchStream {
    /// Totals for everything yielded so far.
    pub fn summary(&self) -> &SearchSummary {
        &self.summary
    }

    fn search_dataset(&mut self, path: &Path) {
        let table = match load_table(path, &self.load) {
            Ok(table) => table,
            Err(err) => {
                log_with_context(
                    Level::Warn,
                    LogMessage {
                        message: format!("Skipping dataset: {err}"),
                        module: "search",
                        context: Some(vec![("file_path", path.display().to_string())]),
                    },
                );
                self.summary.datasets_failed += 1;
                self.pending.push_back(SearchEvent::DatasetFailed {
                    file_path: path.to_path_buf(),
                    error: err.to_string(),
                });
                return;
            }
        };
        self.summary.datasets_searched += 1;

        let columns = classify_columns(&table.headers, self.category);
        log_with_context(
            Level::Debug,
            LogMessage {
                message: format!("{} relevant column(s)", columns.len()),
                module: "search",
                context: Some(vec![
                    ("file_path", path.display().to_string()),
                    ("category", self.category.to_string()),
                    ("rows", table.len().to_string()),
                ]),
            },
        );

        for column in columns {
            self.summary.columns_searched += 1;
            let result = match &self.matcher {
                Ok(matcher) => matcher.filter(&table, &column),
                Err(err) => Err(err.clone()),
            };

            match result {
                Ok(rows) if rows.is_empty() => {}
                Ok(rows) => {
                    self.summary.batches += 1;
                    self.summary.matched_rows += rows.len();
                    self.pending.push_back(SearchEvent::Matches(MatchBatch {
                        file_path: path.to_path_buf(),
                        dataset: dataset_name(path),
                        column,
                        headers: table.headers.clone(),
                        rows,
                    }));
                }
                Err(err) => {
                    log_with_context(
                        Level::Warn,
                        LogMessage {
                            message: format!("Skipping column: {err}"),
                            module: "search",
                            context: Some(vec![
                                ("file_path", path.display().to_string()),
                                ("column", column.clone()),
                            ]),
                        },
                    );
                    self.summary.columns_failed += 1;
                    self.pending.push_back(SearchEvent::ColumnFailed {
                        file_path: path.to_path_buf(),
                        column,
                        error: err.to_string(),
                    });
                }
            }
        }
    }
}

impl Iterator for SearchStream {
    type Item = SearchEvent;

    fn next(&mut self) -> Option<SearchEvent> {
        loop {
            if let Some(event) = self.pending.pop_front() {
                return Some(event);
            }
            let path = self.files.next()?;
            self.search_dataset(&path);
        }
    }
}

/// Starts a search for `query` in the columns relevant to `category`.
///
/// The dataset directory is listed now; datasets are read as the returned
/// stream is consumed. An unusable directory yields a single
/// [`SearchEvent::DirectoryUnavailable`] and nothing else.
pub fn search_datasets(query: &str, category: Category, options: &SearchOptions) -> SearchStream {
    let mut pending = VecDeque::new();
    let mut summary = SearchSummary::default();

    let files = match discover_datasets(&options.bases_dir, &options.discover) {
        Ok(files) => files,
        Err(err) => {
            log_with_context(
                Level::Warn,
                LogMessage {
                    message: format!("No datasets to search: {err}"),
                    module: "search",
                    context: Some(vec![(
                        "directory",
                        options.bases_dir.display().to_string(),
                    )]),
                },
            );
            pending.push_back(SearchEvent::DirectoryUnavailable {
                directory: options.bases_dir.clone(),
                error: err.to_string(),
            });
            Vec::new()
        }
    };
    summary.datasets_found = files.len();

    SearchStream {
        category,
        matcher: ColumnMatcher::new(query),
        load: options.load.clone(),
        files: files.into_iter(),
        pending,
        summary,
    }
}

/// Runs a full search, handing each event to `sink` as it is produced, and
/// returns the totals.
pub fn search_with_summary<S: SearchSink + ?Sized>(
    query: &str,
    category: Category,
    options: &SearchOptions,
    sink: &mut S,
) -> SearchSummary {
    let mut stream = search_datasets(query, category, options);
    for event in stream.by_ref() {
        sink.on_event(&event);
    }
    stream.summary().clone()
}

/// Runs a full search and returns `true` if at least one row matched in any
/// dataset.
///
/// # Examples
///
/// ```no_run
/// use rowseek::classify::Category;
/// use rowseek::search::{SearchEvent, SearchOptions, search};
///
/// let mut events: Vec<SearchEvent> = Vec::new();
/// let found = search("bob", Category::Username, &SearchOptions::new("bases"), &mut events);
/// if !found {
///     println!("No matches found.");
/// }
/// ```
pub fn search<S: SearchSink + ?Sized>(
    query: &str,
    category: Category,
    options: &SearchOptions,
    sink: &mut S,
) -> bool {
    search_with_summary(query, category, options, sink).found()
}
