//! Terminal rendering of search results.
//!
//! Every (file, column) batch becomes its own titled, box-drawn table.
//! Cell values are cut to a fixed width for display only; the batch keeps
//! the full values.

use colored::Colorize;
use serde::Serialize;
use unicode_width::UnicodeWidthStr;
use std::io::{self, Write};

use crate::dataset::Row;
use crate::search::matcher::strip_color_escapes;
use crate::search::{MatchBatch, SearchEvent, SearchSink, SearchSummary};

/// Cell width used when none is configured.
pub const DEFAULT_MAX_CELL_WIDTH: usize = 30;

/// Marker shown for missing values.
pub const MISSING_MARKER: &str = "N/A";

/// Renders match batches as text tables.
#[derive(Debug, Clone)]
pub struct TableRenderer {
    /// Maximum number of characters shown per data cell
    pub max_cell_width: usize,

    /// Whether to emit terminal colors
    pub color: bool,
}

impl Default for TableRenderer {
    fn default() -> Self {
        Self {
            max_cell_width: DEFAULT_MAX_CELL_WIDTH,
            color: true,
        }
    }
}

/// A cell ready for layout: the visible text plus whether it is the
/// missing-value marker.
struct Cell {
    text: String,
    missing: bool,
}

impl TableRenderer {
    /// Title line for a batch.
    pub fn title(&self, batch: &MatchBatch) -> String {
        let title = format!("Results from {} (column: {})", batch.dataset, batch.column);
        if self.color {
            title.blue().bold().to_string()
        } else {
            title
        }
    }

    /// Renders one batch: its title followed by the table.
    pub fn render(&self, batch: &MatchBatch) -> String {
        self.render_table(&self.title(batch), &batch.headers, &batch.rows)
    }

    /// Renders `rows` under `headers` as a box-drawn table preceded by
    /// `title`.
    pub fn render_table(&self, title: &str, headers: &[String], rows: &[Row]) -> String {
        let headers: Vec<Cell> = headers
            .iter()
            .map(|h| Cell {
                text: single_line(&strip_color_escapes(h)),
                missing: false,
            })
            .collect();
        let rows: Vec<Vec<Cell>> = rows
            .iter()
            .map(|row| {
                (0..headers.len())
                    .map(|i| self.display_cell(row.get(i).and_then(|c| c.as_deref())))
                    .collect()
            })
            .collect();

        let widths: Vec<usize> = (0..headers.len())
            .map(|i| {
                rows.iter()
                    .map(|row| display_width(&row[i].text))
                    .chain(std::iter::once(display_width(&headers[i].text)))
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        let mut out = String::new();
        out.push('\n');
        out.push_str(title);
        out.push('\n');
        out.push_str(&border(&widths, '╒', '═', '╤', '╕'));
        out.push_str(&self.line(&headers, &widths, true));
        out.push_str(&border(&widths, '╞', '═', '╪', '╡'));
        for (n, row) in rows.iter().enumerate() {
            if n > 0 {
                out.push_str(&border(&widths, '├', '─', '┼', '┤'));
            }
            out.push_str(&self.line(row, &widths, false));
        }
        out.push_str(&border(&widths, '╘', '═', '╧', '╛'));
        out
    }

    /// Display form of one data cell: escapes stripped, kept on one line and
    /// cut to `max_cell_width` characters.
    pub fn display_value(&self, value: Option<&str>) -> String {
        self.display_cell(value).text
    }

    fn display_cell(&self, value: Option<&str>) -> Cell {
        match value {
            None => Cell {
                text: MISSING_MARKER.to_string(),
                missing: true,
            },
            Some(value) => {
                let clean = single_line(&strip_color_escapes(value));
                Cell {
                    text: truncate_chars(&clean, self.max_cell_width).to_string(),
                    missing: false,
                }
            }
        }
    }

    fn line(&self, cells: &[Cell], widths: &[usize], header: bool) -> String {
        let mut line = String::from("│");
        for (cell, width) in cells.iter().zip(widths) {
            let pad = width - display_width(&cell.text);
            let left = pad / 2;
            let right = pad - left;
            line.push(' ');
            line.push_str(&" ".repeat(left));
            line.push_str(&self.paint(cell, header));
            line.push_str(&" ".repeat(right));
            line.push_str(" │");
        }
        line.push('\n');
        line
    }

    fn paint(&self, cell: &Cell, header: bool) -> String {
        if !self.color {
            return cell.text.clone();
        }
        if header {
            cell.text.blue().bold().to_string()
        } else if cell.missing {
            cell.text.yellow().to_string()
        } else {
            cell.text.white().to_string()
        }
    }

    /// One-line notice for a failure event.
    pub fn warning(&self, event: &SearchEvent) -> Option<String> {
        let text = match event {
            SearchEvent::Matches(_) => return None,
            SearchEvent::DirectoryUnavailable { directory, error } => {
                format!("Dataset directory {} unavailable: {error}", directory.display())
            }
            SearchEvent::DatasetFailed { file_path, error } => {
                format!("Error processing file {}: {error}", file_path.display())
            }
            SearchEvent::ColumnFailed {
                file_path,
                column,
                error,
            } => format!(
                "Error in search query for {} (column: {column}): {error}",
                file_path.display()
            ),
        };
        Some(if self.color {
            text.red().to_string()
        } else {
            text
        })
    }
}

/// Returns at most the first `max` characters of `value`.
///
/// # Examples
///
/// ```
/// use rowseek::render::truncate_chars;
///
/// assert_eq!(truncate_chars("abcdef", 3), "abc");
/// assert_eq!(truncate_chars("ab", 3), "ab");
/// assert_eq!(truncate_chars("жёлтый", 2), "жё");
/// ```
pub fn truncate_chars(value: &str, max: usize) -> &str {
    match value.char_indices().nth(max) {
        Some((end, _)) => &value[..end],
        None => value,
    }
}

/// Terminal columns taken by `value`; wide characters count twice.
fn display_width(value: &str) -> usize {
    UnicodeWidthStr::width(value)
}

fn single_line(value: &str) -> String {
    value.replace(['\r', '\n'], " ")
}

fn border(widths: &[usize], left: char, fill: char, cross: char, right: char) -> String {
    let mut line = String::new();
    line.push(left);
    for (i, width) in widths.iter().enumerate() {
        if i > 0 {
            line.push(cross);
        }
        line.extend(std::iter::repeat_n(fill, width + 2));
    }
    line.push(right);
    line.push('\n');
    line
}

/// Prints tables and warnings to a writer as events arrive.
///
/// The first write error is kept and returned by [`ConsoleSink::finish`];
/// later events are dropped.
pub struct ConsoleSink<W: Write> {
    out: W,
    renderer: TableRenderer,
    error: Option<io::Error>,
}

impl<W: Write> ConsoleSink<W> {
    pub fn new(out: W, renderer: TableRenderer) -> Self {
        Self {
            out,
            renderer,
            error: None,
        }
    }

    /// Flushes the writer and reports the first write error, if any.
    pub fn finish(mut self) -> io::Result<W> {
        if let Some(err) = self.error.take() {
            return Err(err);
        }
        self.out.flush()?;
        Ok(self.out)
    }

    fn write_event(&mut self, event: &SearchEvent) -> io::Result<()> {
        match event {
            SearchEvent::Matches(batch) => writeln!(self.out, "{}", self.renderer.render(batch)),
            other => match self.renderer.warning(other) {
                Some(text) => writeln!(self.out, "\n{text}"),
                None => Ok(()),
            },
        }
    }
}

impl<W: Write> SearchSink for ConsoleSink<W> {
    fn on_event(&mut self, event: &SearchEvent) {
        if self.error.is_some() {
            return;
        }
        if let Err(err) = self.write_event(event) {
            self.error = Some(err);
        }
    }
}

/// Writes each event as one JSON object per line.
///
/// [`JsonSink::finish_with_summary`] closes the stream with a `summary`
/// line, so a search without results still prints exactly one object.
pub struct JsonSink<W: Write> {
    out: W,
    error: Option<anyhow::Error>,
}

/// The closing line of a JSON stream.
#[derive(Serialize)]
struct SummaryLine<'a> {
    event: &'static str,
    found: bool,
    #[serde(flatten)]
    summary: &'a SearchSummary,
}

impl<W: Write> JsonSink<W> {
    pub fn new(out: W) -> Self {
        Self { out, error: None }
    }

    /// Flushes the writer and reports the first error, if any.
    pub fn finish(mut self) -> anyhow::Result<W> {
        if let Some(err) = self.error.take() {
            return Err(err);
        }
        self.out.flush()?;
        Ok(self.out)
    }

    /// Writes the `summary` line, then behaves like [`JsonSink::finish`].
    pub fn finish_with_summary(mut self, summary: &SearchSummary) -> anyhow::Result<W> {
        self.write_line(&SummaryLine {
            event: "summary",
            found: summary.found(),
            summary,
        });
        self.finish()
    }

    fn write_line<T: Serialize>(&mut self, value: &T) {
        if self.error.is_some() {
            return;
        }
        let result = serde_json::to_writer(&mut self.out, value)
            .map_err(anyhow::Error::from)
            .and_then(|()| writeln!(self.out).map_err(anyhow::Error::from));
        if let Err(err) = result {
            self.error = Some(err);
        }
    }
}

impl<W: Write> SearchSink for JsonSink<W> {
    fn on_event(&mut self, event: &SearchEvent) {
        self.write_line(event);
    }
}

#[cfg(test)]
mod tests;
