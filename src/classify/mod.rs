//! Heuristic column classification.
//!
//! A column is relevant to a search category when its lowercased name
//! contains one of the category's keywords. The keyword table is plain data
//! so adding a category never touches the matcher.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CategoryError;

/// What kind of record the operator is looking for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Phone,
    Email,
    Username,
}

/// Keywords per category. Every keyword is lowercase.
pub const CATEGORY_KEYWORDS: &[(Category, &[&str])] = &[
    (Category::Phone, &["phone", "number", "tel"]),
    (Category::Email, &["email", "mail", "e-mail"]),
    (
        Category::Username,
        &["user", "nick", "login", "username", "account"],
    ),
];

impl Category {
    /// All categories, in menu order.
    pub const ALL: [Category; 3] = [Category::Phone, Category::Email, Category::Username];

    /// The lowercase keyword substrings that mark a column as relevant.
    pub fn keywords(self) -> &'static [&'static str] {
        CATEGORY_KEYWORDS
            .iter()
            .find(|(category, _)| *category == self)
            .map(|(_, keywords)| *keywords)
            .unwrap_or(&[])
    }

    /// Whether a column with this name holds data of this category.
    pub fn is_relevant(self, column: &str) -> bool {
        let column = column.to_lowercase();
        self.keywords().iter().any(|kw| column.contains(kw))
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Phone => "phone",
            Category::Email => "email",
            Category::Username => "username",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = CategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Category::ALL
            .into_iter()
            .find(|category| category.as_str() == wanted)
            .ok_or_else(|| CategoryError::Unsupported(s.to_string()))
    }
}

/// Returns the columns relevant to `category`, in their original order.
///
/// An empty result means the dataset has nothing to search for this
/// category; it is not an error.
///
/// # Examples
///
/// ```
/// use rowseek::classify::{Category, classify_columns};
///
/// let columns = ["id", "PhoneNumber", "Address", "tel_home"];
/// let relevant = classify_columns(&columns, Category::Phone);
/// assert_eq!(relevant, vec!["PhoneNumber", "tel_home"]);
/// ```
pub fn classify_columns<S: AsRef<str>>(columns: &[S], category: Category) -> Vec<String> {
    columns
        .iter()
        .filter_map(|column| {
            let name: &str = column.as_ref();
            category.is_relevant(name).then(|| name.to_string())
        })
        .collect()
}
