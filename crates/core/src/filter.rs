//! Record filtering: free-text search + categorical filter.
//!
//! Every list screen narrows its records with the same rule:
//!
//! - a non-empty search term must appear (case-insensitively) in at least one
//!   of the record's searchable fields;
//! - a category filter other than "all" must equal the record's category
//!   exactly (case-sensitive);
//! - both clauses must hold.
//!
//! Filtering is pure and total: no input makes it fail.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

/// Sentinel used by the UI shell's filter dropdowns to mean "no constraint".
pub const ALL: &str = "all";

/// A record that can be narrowed by [`RecordFilter`].
pub trait Searchable {
    /// Fields eligible for substring search.
    fn search_fields(&self) -> Vec<Cow<'_, str>>;

    /// Classification attribute compared against a [`CategoryFilter`].
    fn category(&self) -> &str;
}

/// Exact-match constraint on a record's category; `All` disables it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CategoryFilter {
    #[default]
    All,
    Exact(String),
}

impl CategoryFilter {
    /// Parse a dropdown value. `"all"` and the empty string disable the filter.
    pub fn parse(value: &str) -> Self {
        if value.is_empty() || value == ALL {
            Self::All
        } else {
            Self::Exact(value.to_string())
        }
    }

    pub fn exact(value: impl Into<String>) -> Self {
        Self::Exact(value.into())
    }

    pub fn admits(&self, category: &str) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Exact(expected) => expected == category,
        }
    }
}

impl From<&str> for CategoryFilter {
    fn from(value: &str) -> Self {
        Self::parse(value)
    }
}

impl From<Option<&str>> for CategoryFilter {
    fn from(value: Option<&str>) -> Self {
        value.map(Self::parse).unwrap_or_default()
    }
}

/// Evaluate one record against a search term and a category filter.
pub fn matches<R>(record: &R, search_term: &str, category: &CategoryFilter) -> bool
where
    R: Searchable + ?Sized,
{
    matches_search(record, search_term) && category.admits(record.category())
}

fn matches_search<R>(record: &R, search_term: &str) -> bool
where
    R: Searchable + ?Sized,
{
    if search_term.is_empty() {
        return true;
    }
    let needle = search_term.to_lowercase();
    record
        .search_fields()
        .iter()
        .any(|field| field.to_lowercase().contains(&needle))
}

/// A search term and category filter captured from the UI shell.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RecordFilter {
    pub search_term: String,
    pub category: CategoryFilter,
}

impl RecordFilter {
    pub fn new(search_term: impl Into<String>, category: impl Into<CategoryFilter>) -> Self {
        Self {
            search_term: search_term.into(),
            category: category.into(),
        }
    }

    /// Filter that admits every record.
    pub fn everything() -> Self {
        Self::default()
    }

    pub fn is_unconstrained(&self) -> bool {
        self.search_term.is_empty() && self.category == CategoryFilter::All
    }

    pub fn matches<R>(&self, record: &R) -> bool
    where
        R: Searchable + ?Sized,
    {
        matches(record, &self.search_term, &self.category)
    }

    /// Narrow a list, preserving its order.
    pub fn apply<'a, R>(&self, records: &'a [R]) -> Vec<&'a R>
    where
        R: Searchable,
    {
        if self.is_unconstrained() {
            return records.iter().collect();
        }
        records.iter().filter(|r| self.matches(*r)).collect()
    }
}
