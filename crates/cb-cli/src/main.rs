//! CSPBypass CLI
//!
//! Query the known-bypass corpus with a CSP string or a free-text
//! search, and manage the local dataset cache.

use std::time::SystemTime;

use clap::{Parser, Subcommand};
use serde::Serialize;

use cb_cache::{CacheConfig, DatasetCache};
use cb_core::{badge_text, parse_tsv, resolve, Dataset};

#[derive(Parser)]
#[command(name = "cb-cli")]
#[command(about = "CSP bypass checker: match a policy against the known-bypass corpus")]
struct Cli {
    /// Directory for the cached dataset
    #[arg(long, default_value = ".cspbypass-cache", global = true)]
    cache_dir: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve a CSP string or free-text search against the corpus
    Query {
        /// CSP string (e.g. "script-src 'self' *.example.com") or search text
        input: String,

        /// Read the corpus from a local TSV file instead of the cache
        #[arg(short, long)]
        file: Option<String>,

        /// Use the cached copy only, never the network
        #[arg(long)]
        offline: bool,

        /// Maximum number of matches to list
        #[arg(short, long, default_value_t = 10)]
        limit: usize,

        /// Emit the full result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Force a dataset refresh
    Fetch,

    /// Show cached dataset stats
    Info,
}

#[tokio::main]
async fn main() {
    env_logger::init();
    let cli = Cli::parse();
    let cache = DatasetCache::new(CacheConfig::new(&cli.cache_dir));

    let result = match cli.command {
        Commands::Query {
            input,
            file,
            offline,
            limit,
            json,
        } => cmd_query(&cache, &input, file.as_deref(), offline, limit, json).await,
        Commands::Fetch => cmd_fetch(&cache).await,
        Commands::Info => cmd_info(&cache),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

#[derive(Serialize)]
struct QueryOutput<'a> {
    count: usize,
    badge: String,
    matches: &'a [cb_core::BypassRecord],
}

async fn cmd_query(
    cache: &DatasetCache,
    input: &str,
    file: Option<&str>,
    offline: bool,
    limit: usize,
    json: bool,
) -> Result<(), String> {
    let dataset = match file {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .map_err(|e| format!("Failed to read '{}': {}", path, e))?;
            Dataset::new(parse_tsv(&text), SystemTime::now())
        }
        None => load_dataset(cache, offline).await?,
    };

    let result = resolve(input, &dataset);
    let badge = badge_text(result.count);

    if json {
        let output = QueryOutput {
            count: result.count,
            badge,
            matches: &result.matches,
        };
        let text = serde_json::to_string_pretty(&output)
            .map_err(|e| format!("Failed to encode result: {}", e))?;
        println!("{text}");
        return Ok(());
    }

    println!(
        "{} known bypass(es) for this input ({} records scanned)",
        result.count,
        dataset.len()
    );
    if result.count > 999 {
        println!("Badge: {badge}");
    }

    for record in result.matches.iter().take(limit) {
        println!();
        println!("  {}", record.domain);
        println!("    {}", record.payload);
    }
    if result.count > limit {
        println!();
        println!("  ... and {} more (raise --limit to see them)", result.count - limit);
    }

    Ok(())
}

async fn cmd_fetch(cache: &DatasetCache) -> Result<(), String> {
    let dataset = cache
        .refresh()
        .await
        .map_err(|e| format!("Failed to refresh dataset: {}", e))?;

    println!("Dataset refreshed: {} records", dataset.len());
    Ok(())
}

fn cmd_info(cache: &DatasetCache) -> Result<(), String> {
    let dataset = cache
        .cached()
        .map_err(|e| format!("Failed to read cache: {}", e))?
        .ok_or_else(|| "No cached dataset. Run 'cb-cli fetch' first.".to_string())?;

    let now = SystemTime::now();
    println!("Cached dataset:");
    println!("  Records:   {}", dataset.len());
    println!("  Age:       {}", format_age(dataset.fetched_at, now));
    println!(
        "  Fresh:     {}",
        if dataset.is_fresh(now) { "yes" } else { "no (will refresh on next query)" }
    );

    Ok(())
}

async fn load_dataset(cache: &DatasetCache, offline: bool) -> Result<Dataset, String> {
    if offline {
        return cache
            .cached()
            .map_err(|e| format!("Failed to read cache: {}", e))?
            .ok_or_else(|| "No cached dataset and --offline given. Run 'cb-cli fetch' first.".to_string());
    }

    cache
        .load()
        .await
        .map_err(|e| format!("Failed to load dataset: {}", e))
}

fn format_age(fetched_at: SystemTime, now: SystemTime) -> String {
    match now.duration_since(fetched_at) {
        Ok(age) => {
            let secs = age.as_secs();
            if secs < 60 {
                format!("{}s", secs)
            } else if secs < 3600 {
                format!("{}m", secs / 60)
            } else {
                format!("{}h {}m", secs / 3600, (secs % 3600) / 60)
            }
        }
        Err(_) => "in the future".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_format_age() {
        let now = SystemTime::now();
        assert_eq!(format_age(now - Duration::from_secs(30), now), "30s");
        assert_eq!(format_age(now - Duration::from_secs(5 * 60), now), "5m");
        assert_eq!(format_age(now - Duration::from_secs(7 * 3600 + 120), now), "7h 2m");
    }
}
