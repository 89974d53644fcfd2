//! Repository listing endpoints.

use tracing::debug;

use crate::client::{GithubClient, API_BASE};
use crate::error::Result;
use crate::fetch::CancelToken;
use crate::models::Repo;

const PER_PAGE: usize = 100;
// Listing depth is capped at 200 repos.
const MAX_PAGES: u32 = 2;

fn repos_page_url(user: &str, page: u32) -> String {
    format!(
        "{}/users/{}/repos?per_page={}&page={}&type=public&sort=pushed",
        API_BASE, user, PER_PAGE, page
    )
}

fn recent_repos_url(user: &str, limit: usize) -> String {
    format!(
        "{}/users/{}/repos?sort=updated&per_page={}",
        API_BASE, user, limit
    )
}

/// Next page to fetch after `page` came back with `batch_len` repos, or
/// `None` when the walk ends. Only a full page below [`MAX_PAGES`] continues.
fn next_page(page: u32, batch_len: usize) -> Option<u32> {
    if batch_len < PER_PAGE || page >= MAX_PAGES {
        None
    } else {
        Some(page + 1)
    }
}

/// List public repositories sorted by most recent push, paginating up to
/// [`MAX_PAGES`]. A short page ends the walk early.
pub(crate) async fn list_public_repos(
    client: &GithubClient,
    user: &str,
    cancel: &CancelToken,
) -> Result<Vec<Repo>> {
    let mut repos: Vec<Repo> = Vec::new();
    let mut page = 1;

    loop {
        cancel.ensure_live()?;
        let batch: Vec<Repo> = client.get_json(&repos_page_url(user, page)).await?;
        let batch_len = batch.len();
        repos.extend(batch);

        match next_page(page, batch_len) {
            Some(next) => page = next,
            None => break,
        }
    }

    debug!(user, count = repos.len(), "listed public repositories");
    Ok(repos)
}

/// The most recently updated public repositories, newest first.
pub async fn fetch_recent_repos(
    client: &GithubClient,
    user: &str,
    limit: usize,
) -> Result<Vec<Repo>> {
    let mut repos: Vec<Repo> = client.get_json(&recent_repos_url(user, limit)).await?;
    repos.truncate(limit);
    Ok(repos)
}
