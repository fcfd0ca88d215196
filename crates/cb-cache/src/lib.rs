//! Dataset fetching and caching
//!
//! The bypass corpus lives in a TSV file on GitHub. This crate owns
//! the retrieval policy the matching core deliberately does not have:
//! a fetched copy is kept on disk with its retrieval timestamp and
//! served without a network round-trip while younger than six hours.
//! When a refresh fails, the stale copy is served instead — staleness
//! is acceptable over absence. Only when there is no copy at all does
//! an error reach the caller.

use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use cb_core::Dataset;

/// Upstream corpus location.
pub const DEFAULT_DATA_URL: &str =
    "https://raw.githubusercontent.com/renniepak/CSPBypass/refs/heads/main/data.tsv";

const STATE_FILE: &str = "cspbypass_data.json";

/// Error type for dataset acquisition.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("unexpected HTTP status {0}")]
    Http(u16),
    #[error("request failed: {0}")]
    Fetch(#[from] reqwest::Error),
    #[error("cache I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("cache state invalid: {0}")]
    State(#[from] serde_json::Error),
}

/// Where to fetch from and where to cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    pub url: String,
    pub cache_dir: PathBuf,
}

impl CacheConfig {
    pub fn new(cache_dir: impl Into<PathBuf>) -> Self {
        Self {
            url: DEFAULT_DATA_URL.to_string(),
            cache_dir: cache_dir.into(),
        }
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }
}

/// On-disk cache state: the raw TSV body plus its retrieval time in
/// unix milliseconds.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct CacheState {
    body: String,
    fetched_at_ms: u64,
}

impl CacheState {
    fn fetched_at(&self) -> SystemTime {
        SystemTime::UNIX_EPOCH + Duration::from_millis(self.fetched_at_ms)
    }

    fn to_dataset(&self) -> Dataset {
        Dataset::from_tsv(&self.body, self.fetched_at())
    }
}

/// The caching collaborator: hands dataset snapshots to the core.
pub struct DatasetCache {
    config: CacheConfig,
    client: reqwest::Client,
}

impl DatasetCache {
    pub fn new(config: CacheConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }

    /// Obtain a dataset, preferring the cached copy while fresh.
    ///
    /// Falls back to the stale copy when the refresh fails; errors only
    /// when no copy exists at all.
    pub async fn load(&self) -> Result<Dataset, CacheError> {
        let state = self.read_state().unwrap_or_else(|e| {
            warn!("ignoring unreadable cache state: {e}");
            None
        });

        if let Some(state) = &state {
            let dataset = state.to_dataset();
            if dataset.is_fresh(SystemTime::now()) {
                debug!("using cached dataset ({} records)", dataset.len());
                return Ok(dataset);
            }
        }

        match self.refresh().await {
            Ok(dataset) => Ok(dataset),
            Err(e) => match state {
                Some(state) => {
                    warn!("refresh failed ({e}); serving stale dataset");
                    Ok(state.to_dataset())
                }
                None => Err(e),
            },
        }
    }

    /// Fetch a fresh dataset unconditionally and cache it.
    pub async fn refresh(&self) -> Result<Dataset, CacheError> {
        info!("fetching dataset from {}", self.config.url);
        let response = self.client.get(&self.config.url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(CacheError::Http(status.as_u16()));
        }
        let body = response.text().await?;

        let fetched_at_ms = SystemTime::now()
            .duration_since(SystemTime::UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0);
        let state = CacheState { body, fetched_at_ms };
        self.write_state(&state)?;

        let dataset = state.to_dataset();
        info!("dataset refreshed: {} records", dataset.len());
        Ok(dataset)
    }

    /// The cached dataset regardless of freshness, if one exists.
    pub fn cached(&self) -> Result<Option<Dataset>, CacheError> {
        Ok(self.read_state()?.map(|state| state.to_dataset()))
    }

    fn state_path(&self) -> PathBuf {
        self.config.cache_dir.join(STATE_FILE)
    }

    fn read_state(&self) -> Result<Option<CacheState>, CacheError> {
        let path = self.state_path();
        if !path.exists() {
            return Ok(None);
        }
        let text = std::fs::read_to_string(&path)?;
        let state: CacheState = serde_json::from_str(&text)?;
        Ok(Some(state))
    }

    fn write_state(&self, state: &CacheState) -> Result<(), CacheError> {
        std::fs::create_dir_all(&self.config.cache_dir)?;
        let text = serde_json::to_string(state)?;
        write_atomically(&self.state_path(), &text)?;
        Ok(())
    }
}

// Write via a sibling temp file so a crash mid-write cannot leave a
// truncated state file behind.
fn write_atomically(path: &Path, text: &str) -> std::io::Result<()> {
    let tmp = path.with_extension("json.tmp");
    std::fs::write(&tmp, text)?;
    std::fs::rename(&tmp, path)
}
