//! Top-level query dispatch
//!
//! Decides whether the input looks like a CSP (carries a script-src or
//! default-src directive) or a free-text search, and runs the matcher
//! in the corresponding mode. Both the background worker and the popup
//! go through this single entry point.

use log::debug;

use crate::dataset::Dataset;
use crate::directive::extract_directive;
use crate::matcher::{match_free_text, match_tokens, QueryResult};
use crate::normalize::normalize_sources;

/// Resolve a raw input against the dataset snapshot.
///
/// Total over its inputs: empty input or an empty dataset yields a
/// zero result. A directive whose sources normalize to nothing (only
/// keyword sources, say) deliberately falls through to free-text
/// matching on the whole input.
pub fn resolve(raw_input: &str, dataset: &Dataset) -> QueryResult {
    let input = raw_input.trim().to_lowercase();
    if input.is_empty() {
        return QueryResult::default();
    }

    if let Some(directive_value) = extract_directive(&input) {
        let tokens = normalize_sources(directive_value);
        if !tokens.is_empty() {
            debug!(
                "directive query: {} token(s) against {} record(s)",
                tokens.len(),
                dataset.len()
            );
            return match_tokens(&tokens, dataset);
        }
    }

    debug!("free-text query against {} record(s)", dataset.len());
    match_free_text(&input, dataset)
}
