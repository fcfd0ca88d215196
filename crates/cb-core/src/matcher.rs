//! Corpus filtering
//!
//! Substring containment over the (domain, payload) corpus, in two
//! modes: token mode for normalized CSP source expressions, free-text
//! mode for everything else. Both scan linearly in dataset order; the
//! corpus is a few hundred records, so no index is warranted.

use serde::Serialize;

use crate::dataset::{BypassRecord, Dataset};

/// Result of one query: matching records in dataset order.
///
/// Recomputed on every query, never persisted. `count` always equals
/// `matches.len()`; it is carried separately because badge rendering
/// consumes the count without the records.
#[derive(Debug, Clone, Default, Serialize)]
pub struct QueryResult {
    pub count: usize,
    pub matches: Vec<BypassRecord>,
}

impl QueryResult {
    fn from_matches(matches: Vec<BypassRecord>) -> Self {
        Self {
            count: matches.len(),
            matches,
        }
    }
}

/// Token mode: a record matches when ANY token is a substring of its
/// domain or payload. Matching is case-sensitive; callers lower-case
/// the CSP input upstream.
pub fn match_tokens(tokens: &[String], dataset: &Dataset) -> QueryResult {
    if tokens.is_empty() {
        return QueryResult::default();
    }

    let matches = dataset
        .records
        .iter()
        .filter(|record| {
            tokens
                .iter()
                .any(|t| record.domain.contains(t.as_str()) || record.payload.contains(t.as_str()))
        })
        .cloned()
        .collect();

    QueryResult::from_matches(matches)
}

/// Free-text mode: case-insensitive substring search over both fields.
/// `query` is expected lower-cased by the caller.
pub fn match_free_text(query: &str, dataset: &Dataset) -> QueryResult {
    if query.is_empty() {
        return QueryResult::default();
    }

    let matches = dataset
        .records
        .iter()
        .filter(|record| {
            record.domain.to_lowercase().contains(query)
                || record.payload.to_lowercase().contains(query)
        })
        .cloned()
        .collect();

    QueryResult::from_matches(matches)
}
