//! Dataset loading.
//!
//! A dataset is a delimited text file with a header row. Every cell is
//! kept as text; empty cells become `None`. Rows that cannot be decoded or
//! that carry more fields than the header are dropped and counted, so one
//! damaged line never costs the rest of the file.

mod unescape;

use csv::{ReaderBuilder, StringRecord};
use log::Level;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::DatasetError;
use crate::telemetry::{LogMessage, log_with_context};
use unescape::quote_escaped_fields;

/// One data row. `None` marks a missing value.
pub type Row = Vec<Option<String>>;

/// Parsing options for dataset files.
#[derive(Debug, Clone)]
pub struct LoadOptions {
    /// Field delimiter byte.
    pub delimiter: u8,

    /// Quote byte.
    pub quote: u8,

    /// Escape byte. Takes the next byte literally, in quoted and bare
    /// fields alike. `None` only accepts doubled quotes.
    pub escape: Option<u8>,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            quote: b'"',
            escape: Some(b'\\'),
        }
    }
}

/// A loaded dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    /// Where the table was read from
    pub path: PathBuf,

    /// Column names, deduplicated (`email`, `email.1`, ...)
    pub headers: Vec<String>,

    /// Data rows, each exactly `headers.len()` cells long
    pub rows: Vec<Row>,

    /// Number of rows dropped while parsing
    pub skipped_rows: usize,
}

impl Table {
    /// Position of the column called `name`.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|header| header == name)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Loads the dataset at `path`.
///
/// # Errors
///
/// Returns an error when the file cannot be read, has no header row, or its
/// header cannot be decoded as UTF-8. Individual malformed rows are
/// skipped rather than reported.
pub fn load_table(path: &Path, options: &LoadOptions) -> Result<Table, DatasetError> {
    let bytes = fs::read(path).map_err(|source| DatasetError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let data = quote_escaped_fields(&bytes, options.delimiter, options.quote, options.escape);

    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .delimiter(options.delimiter)
        .quote(options.quote)
        .escape(options.escape)
        .from_reader(&*data);

    let raw_headers = reader
        .headers()
        .map_err(|source| DatasetError::Csv {
            path: path.to_path_buf(),
            source,
        })?
        .clone();
    if raw_headers.is_empty() {
        return Err(DatasetError::MissingHeader(path.to_path_buf()));
    }
    let headers = dedupe_headers(&raw_headers);
    let width = headers.len();

    let mut rows = Vec::new();
    let mut skipped_rows = 0;

    for (index, result) in reader.records().enumerate() {
        let record = match result {
            Ok(record) => record,
            Err(err) => {
                skipped_rows += 1;
                log_skipped_row(path, index, &err.to_string());
                continue;
            }
        };

        if record.len() > width {
            skipped_rows += 1;
            log_skipped_row(
                path,
                index,
                &format!("expected {width} fields, saw {}", record.len()),
            );
            continue;
        }

        rows.push(to_row(&record, width));
    }

    Ok(Table {
        path: path.to_path_buf(),
        headers,
        rows,
        skipped_rows,
    })
}

fn to_row(record: &StringRecord, width: usize) -> Row {
    (0..width)
        .map(|i| match record.get(i) {
            Some("") | None => None,
            Some(value) => Some(value.to_string()),
        })
        .collect()
}

/// Renames repeated column names by appending `.1`, `.2`, ... so that every
/// column can be addressed by name.
fn dedupe_headers(record: &StringRecord) -> Vec<String> {
    let mut seen = HashSet::new();
    record
        .iter()
        .map(|name| {
            let mut candidate = name.to_string();
            let mut n = 0;
            while !seen.insert(candidate.clone()) {
                n += 1;
                candidate = format!("{name}.{n}");
            }
            candidate
        })
        .collect()
}

fn log_skipped_row(path: &Path, index: usize, reason: &str) {
    log_with_context(
        Level::Debug,
        LogMessage {
            message: format!("Skipping malformed row: {reason}"),
            module: "dataset",
            context: Some(vec![
                ("file_path", path.display().to_string()),
                ("row", (index + 1).to_string()),
            ]),
        },
    );
}
