//! Byte-weighted language breakdown across a user's public repositories.
//!
//! Listing and per-repo language maps come from the REST API; everything
//! after the network boundary is a pure merge over the fetched maps.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::Semaphore;
use tracing::{debug, warn};

use crate::client::GithubClient;
use crate::error::{ApiError, Result};
use crate::fetch::CancelToken;
use crate::models::{LanguageTotal, Repo};
use crate::repos::list_public_repos;

// Most recently pushed repos considered for language maps.
const MAX_LANGUAGE_REPOS: usize = 40;
const MAX_CONCURRENT_REQUESTS: usize = 10;
// Shares at or below this percentage are dropped as slivers.
const MIN_SHARE_PCT: f64 = 0.1;
const MAX_ENTRIES: usize = 12;

/// Raw per-repo language map: language name to byte count.
pub type LanguageMap = HashMap<String, u64>;

/// Aggregate language shares for `user`'s public repositories.
///
/// Forks and archived repos are excluded; the remaining most recently pushed
/// [`MAX_LANGUAGE_REPOS`] are fetched concurrently and merged. A rate-limit
/// failure on any single fetch fails the whole operation; other per-repo
/// failures contribute zero bytes. An empty result is valid.
pub async fn fetch_language_breakdown(
    client: &GithubClient,
    user: &str,
    cancel: &CancelToken,
) -> Result<Vec<LanguageTotal>> {
    cancel.ensure_live()?;
    let repos = list_public_repos(client, user, cancel).await?;
    let candidates = language_candidates(repos);
    debug!(user, candidates = candidates.len(), "fetching language maps");

    let semaphore = Arc::new(Semaphore::new(MAX_CONCURRENT_REQUESTS));
    let mut handles = Vec::with_capacity(candidates.len());

    for repo in candidates {
        let client = client.clone();
        let sem = Arc::clone(&semaphore);
        let cancel = cancel.clone();

        let handle = tokio::spawn(async move {
            let outcome = fetch_repo_languages(&client, &repo.languages_url, sem, &cancel).await;
            (repo.name, outcome)
        });

        handles.push(handle);
    }

    // Join in spawn order
    let mut outcomes = Vec::with_capacity(handles.len());
    for handle in handles {
        match handle.await {
            Ok(outcome) => outcomes.push(outcome),
            Err(e) => warn!(error = %e, "language fetch task failed to join"),
        }
    }

    cancel.ensure_live()?;
    let totals = merge_language_maps(outcomes)?;
    Ok(build_totals(totals))
}

async fn fetch_repo_languages(
    client: &GithubClient,
    languages_url: &str,
    semaphore: Arc<Semaphore>,
    cancel: &CancelToken,
) -> Result<LanguageMap> {
    let _permit = semaphore
        .acquire()
        .await
        .map_err(|_| ApiError::Cancelled)?;
    cancel.ensure_live()?;
    client.get_json(languages_url).await
}

/// Repos eligible for language aggregation: no forks, nothing archived,
/// capped at the most recently pushed [`MAX_LANGUAGE_REPOS`]. The listing
/// arrives push-sorted, so a plain prefix take suffices.
fn language_candidates(repos: Vec<Repo>) -> Vec<Repo> {
    repos
        .into_iter()
        .filter(|r| !r.fork && !r.archived)
        .take(MAX_LANGUAGE_REPOS)
        .collect()
}

/// Merge per-repo outcomes into byte totals per language.
///
/// The first rate-limit failure wins and discards the whole merge; any other
/// failure is absorbed as zero bytes for that repo and logged.
fn merge_language_maps(outcomes: Vec<(String, Result<LanguageMap>)>) -> Result<LanguageMap> {
    let mut totals: LanguageMap = HashMap::new();

    for (repo, outcome) in outcomes {
        match outcome {
            Ok(map) => {
                for (language, bytes) in map {
                    let entry = totals.entry(language).or_insert(0);
                    *entry = entry.saturating_add(bytes);
                }
            }
            Err(err) if err.is_rate_limit() => return Err(err),
            Err(err) => {
                warn!(repo = %repo, error = %err, "language fetch failed, counting zero bytes");
            }
        }
    }

    Ok(totals)
}

/// Shape byte totals into the outward list: shares of the grand total,
/// slivers dropped, sorted by weight, at most [`MAX_ENTRIES`] entries.
fn build_totals(totals: LanguageMap) -> Vec<LanguageTotal> {
    let grand: u64 = totals.values().copied().fold(0, u64::saturating_add);

    let mut entries: Vec<LanguageTotal> = totals
        .into_iter()
        .map(|(name, bytes)| LanguageTotal {
            name,
            bytes,
            share: if grand > 0 {
                bytes as f64 / grand as f64 * 100.0
            } else {
                0.0
            },
        })
        .filter(|t| t.share > MIN_SHARE_PCT)
        .collect();

    // Heaviest first; names break ties so output is deterministic
    entries.sort_by(|a, b| b.bytes.cmp(&a.bytes).then_with(|| a.name.cmp(&b.name)));
    entries.truncate(MAX_ENTRIES);
    entries
}
