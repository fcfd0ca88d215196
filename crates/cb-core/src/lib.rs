//! CSPBypass Checker Core Library
//!
//! This crate provides the matching engine that decides whether a
//! Content-Security-Policy is known to be bypassable, by matching its
//! allowed source expressions against a corpus of (domain, payload)
//! bypass records.
//!
//! # Architecture
//!
//! The engine is pure, synchronous computation over immutable inputs:
//! a `Dataset` snapshot is handed in by the caching collaborator
//! (`cb-cache`) and is never mutated here. Every query is independent
//! and stateless, so the same resolver serves both the background
//! worker and the popup without a logic fork.
//!
//! # Modules
//!
//! - `dataset`: bypass corpus model and TSV parsing
//! - `directive`: script-src / default-src extraction from a raw CSP
//! - `normalize`: source expressions into substring match tokens
//! - `matcher`: token and free-text filtering over the corpus
//! - `resolver`: top-level query dispatch (CSP vs. free-text search)
//! - `badge`: numeric badge text ("", "42", "999+")
//! - `page`: CSP source selection (meta tag vs. HTTP header)
//! - `session`: per-tab detected-CSP and count bookkeeping

pub mod badge;
pub mod dataset;
pub mod directive;
pub mod matcher;
pub mod normalize;
pub mod page;
pub mod resolver;
pub mod session;

// Re-export commonly used types
pub use badge::badge_text;
pub use dataset::{parse_tsv, BypassRecord, Dataset};
pub use directive::extract_directive;
pub use matcher::{match_free_text, match_tokens, QueryResult};
pub use normalize::normalize_sources;
pub use page::{select_csp, CspSource, DetectedCsp};
pub use resolver::resolve;
pub use session::{SessionState, TabId};
