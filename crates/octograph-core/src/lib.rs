#![deny(clippy::all)]

mod client;
mod contributions;
mod error;
mod fetch;
mod languages;
mod models;
mod repos;

pub use client::GithubClient;
pub use contributions::{assign_levels, fetch_contribution_calendar};
pub use error::{ApiError, Result};
pub use fetch::{CancelToken, FetchState};
pub use languages::{fetch_language_breakdown, LanguageMap};
pub use models::{ContributionCalendar, ContributionDay, ContributionWeek, LanguageTotal, Repo};
pub use repos::fetch_recent_repos;
