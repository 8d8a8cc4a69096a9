//! Free-text filtering over in-memory record collections.
//!
//! A query is split on whitespace into lower-cased terms. A record matches when every term
//! occurs somewhere in the space-joined, lower-cased values of the searched fields, so
//! `"john manager"` finds a record named "John Smith" whose field is "Manager". Filtering is
//! stable and never reorders or mutates the input.

use std::fmt::Debug;
use std::sync::Arc;

use serde::Serialize;

/// A record type with a fixed set of columns eligible for free-text matching.
pub trait SearchableRecord {
    type Field: Copy + Debug + 'static;

    /// Columns searched when the caller does not pick its own.
    const SEARCH_FIELDS: &'static [Self::Field];

    /// Value of `field`, `None` when the backend left it empty.
    fn field_value(&self, field: Self::Field) -> Option<&str>;
}

/// Parsed free-text query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    raw: String,
    terms: Vec<String>,
}

impl SearchQuery {
    pub fn parse(raw: &str) -> Self {
        let terms = raw
            .split_whitespace()
            .map(str::to_lowercase)
            .collect();
        Self {
            raw: raw.trim().to_string(),
            terms,
        }
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    /// Empty or whitespace-only queries match everything.
    pub fn is_blank(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn matches<R>(&self, record: &R, fields: &[R::Field]) -> bool
    where
        R: SearchableRecord,
    {
        if self.is_blank() {
            return true;
        }
        let haystack = haystack(record, fields);
        self.terms.iter().all(|term| haystack.contains(term.as_str()))
    }
}

fn haystack<R: SearchableRecord>(record: &R, fields: &[R::Field]) -> String {
    fields
        .iter()
        .map(|field| record.field_value(*field).unwrap_or_default().to_lowercase())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Records matching every term of `query` across `fields`, in their original order.
pub fn search<R>(records: &[R], query: &str, fields: &[R::Field]) -> Vec<R>
where
    R: SearchableRecord + Clone,
{
    let query = SearchQuery::parse(query);
    if query.is_blank() {
        return records.to_vec();
    }
    records
        .iter()
        .filter(|record| query.matches(*record, fields))
        .cloned()
        .collect()
}

/// Owned snapshot of one record type, searched over that type's default field set.
#[derive(Debug, Clone)]
pub struct RecordSearchIndex<R> {
    records: Arc<Vec<R>>,
}

impl<R> Default for RecordSearchIndex<R> {
    fn default() -> Self {
        Self {
            records: Arc::new(Vec::new()),
        }
    }
}

impl<R> RecordSearchIndex<R>
where
    R: SearchableRecord + Clone,
{
    pub fn new(records: Vec<R>) -> Self {
        Self {
            records: Arc::new(records),
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[R] {
        &self.records
    }

    /// Copy of the index without the records `remove` selects. Order is kept.
    pub fn without<F>(&self, remove: F) -> Self
    where
        F: Fn(&R) -> bool,
    {
        Self::new(
            self.records
                .iter()
                .filter(|record| !remove(record))
                .cloned()
                .collect(),
        )
    }

    pub fn search(&self, query: &str) -> Vec<R> {
        search(&self.records, query, R::SEARCH_FIELDS)
    }

    pub fn search_fields(&self, query: &str, fields: &[R::Field]) -> Vec<R> {
        search(&self.records, query, fields)
    }

    /// Search and attach the advisory notice a UI would show for the result.
    pub fn outcome(&self, query: &str) -> SearchOutcome<R> {
        let rows = self.search(query);
        SearchOutcome {
            query: query.trim().to_string(),
            total: self.len(),
            matched: rows.len(),
            notice: SearchNotice::for_result(self.len(), rows.len(), query),
            rows,
        }
    }
}

/// Advisory message derived from a search result. Not part of the filtering contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SearchNotice {
    /// Nothing has been loaded yet.
    Loading,
    NoMatches { query: String },
    Found { count: usize },
}

impl SearchNotice {
    pub fn for_result(total: usize, matched: usize, query: &str) -> Self {
        if total == 0 {
            SearchNotice::Loading
        } else if matched == 0 {
            SearchNotice::NoMatches {
                query: query.trim().to_string(),
            }
        } else {
            SearchNotice::Found { count: matched }
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SearchOutcome<R> {
    pub query: String,
    pub total: usize,
    pub matched: usize,
    pub notice: SearchNotice,
    pub rows: Vec<R>,
}
