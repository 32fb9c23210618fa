//! Literal, case-insensitive matching of a query against one column.

use regex::{Regex, RegexBuilder};
use std::borrow::Cow;
use std::sync::LazyLock;

use crate::dataset::{Row, Table};
use crate::error::MatchError;

/// SGR color sequences such as `ESC[37m` or `ESC[1;32m`.
static COLOR_ESCAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\x1b\[[0-9;]*m").expect("color escape pattern is valid"));

/// Removes terminal color sequences left behind by earlier rendering.
///
/// # Examples
///
/// ```
/// use rowseek::search::matcher::strip_color_escapes;
///
/// assert_eq!(strip_color_escapes("\x1b[37mbob\x1b[0m"), "bob");
/// assert_eq!(strip_color_escapes("plain"), "plain");
/// ```
pub fn strip_color_escapes(value: &str) -> Cow<'_, str> {
    COLOR_ESCAPE.replace_all(value, "")
}

/// Matches cells that contain the query as a literal substring, ignoring case.
#[derive(Debug, Clone)]
pub struct ColumnMatcher {
    pattern: Regex,
}

impl ColumnMatcher {
    /// Builds a matcher for `query`.
    ///
    /// The query is escaped first, so characters like `.`, `*` or `(` only
    /// ever match themselves.
    ///
    /// # Errors
    ///
    /// Returns [`MatchError::Pattern`] if the escaped query still cannot be
    /// compiled, e.g. because it exceeds the regex size limit.
    pub fn new(query: &str) -> Result<Self, MatchError> {
        let pattern = RegexBuilder::new(&regex::escape(query))
            .case_insensitive(true)
            .build()?;
        Ok(Self { pattern })
    }

    /// Whether a single cell matches. Missing cells never do.
    pub fn matches(&self, cell: Option<&str>) -> bool {
        cell.is_some_and(|value| self.pattern.is_match(&strip_color_escapes(value)))
    }

    /// Returns every row of `table` whose `column` cell matches, with all of
    /// its columns, in table order.
    ///
    /// # Errors
    ///
    /// Returns [`MatchError::UnknownColumn`] if `table` has no such column.
    pub fn filter(&self, table: &Table, column: &str) -> Result<Vec<Row>, MatchError> {
        let index = table
            .column_index(column)
            .ok_or_else(|| MatchError::UnknownColumn(column.to_string()))?;

        Ok(table
            .rows
            .iter()
            .filter(|row| self.matches(row.get(index).and_then(|cell| cell.as_deref())))
            .cloned()
            .collect())
    }
}

#[cfg(test)]
#[path = "matcher_tests.rs"]
mod tests;
