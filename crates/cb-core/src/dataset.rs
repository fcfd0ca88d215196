//! Bypass corpus model and TSV parsing
//!
//! The corpus is a community-maintained TSV file: a header line, then
//! one `<domain><whitespace><payload>` record per line. The payload is
//! everything after the first whitespace run and may itself contain
//! whitespace.

use std::time::{Duration, SystemTime};

use serde::Serialize;

/// How long a fetched dataset is considered fresh.
pub const FRESHNESS_WINDOW: Duration = Duration::from_secs(6 * 60 * 60);

/// One known bypass technique: the hosting domain and the exact
/// source expression or script snippet that achieves the bypass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BypassRecord {
    pub domain: String,
    pub payload: String,
}

/// A snapshot of the bypass corpus plus its retrieval time.
///
/// Owned by the caching collaborator and handed to the matching engine
/// by reference. A stale snapshot is still usable (staleness is
/// acceptable over absence); `is_fresh` only drives refresh decisions.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub records: Vec<BypassRecord>,
    pub fetched_at: SystemTime,
}

impl Dataset {
    pub fn new(records: Vec<BypassRecord>, fetched_at: SystemTime) -> Self {
        Self { records, fetched_at }
    }

    /// Parse a raw TSV body retrieved at `fetched_at`.
    pub fn from_tsv(text: &str, fetched_at: SystemTime) -> Self {
        Self::new(parse_tsv(text), fetched_at)
    }

    /// An empty snapshot, usable as a zero-result fallback.
    pub fn empty() -> Self {
        Self::new(Vec::new(), SystemTime::UNIX_EPOCH)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Whether the snapshot is still within the freshness window.
    pub fn is_fresh(&self, now: SystemTime) -> bool {
        match now.duration_since(self.fetched_at) {
            Ok(age) => age < FRESHNESS_WINDOW,
            // Clock went backwards; treat as fresh rather than refetch-loop.
            Err(_) => true,
        }
    }
}

/// Parse the corpus TSV into records, in file order.
///
/// The first line is a header and is discarded. A line that does not
/// produce both a non-empty domain and a non-empty payload is silently
/// dropped, never an error.
pub fn parse_tsv(text: &str) -> Vec<BypassRecord> {
    text.trim()
        .lines()
        .skip(1)
        .filter_map(parse_line)
        .collect()
}

fn parse_line(line: &str) -> Option<BypassRecord> {
    let line = line.trim();

    // First run of non-whitespace is the domain, remainder is the
    // payload. The payload is not split further.
    let split_at = line.find(char::is_whitespace)?;
    let domain = &line[..split_at];
    let payload = line[split_at..].trim_start();

    if domain.is_empty() || payload.is_empty() {
        return None;
    }

    Some(BypassRecord {
        domain: domain.to_string(),
        payload: payload.to_string(),
    })
}
