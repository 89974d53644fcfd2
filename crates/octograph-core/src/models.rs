//! Typed shapes for the GitHub fetch boundary.
//!
//! Everything crossing the network boundary is deserialized into these
//! structs; missing upstream fields default instead of failing the whole
//! payload.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Repository descriptor from `GET /users/{user}/repos`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Repo {
    pub name: String,
    pub html_url: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub fork: bool,
    #[serde(default)]
    pub archived: bool,
    #[serde(default)]
    pub stargazers_count: u32,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub languages_url: String,
    #[serde(default)]
    pub pushed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// One language's aggregated byte weight across the scanned repositories.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LanguageTotal {
    pub name: String,
    pub bytes: u64,
    /// Percentage of the grand byte total, in `0.0..=100.0`.
    pub share: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContributionDay {
    pub date: NaiveDate,
    #[serde(default)]
    pub count: u32,
    /// Intensity bucket in `0..=4`; 0 exactly when `count` is 0.
    #[serde(default)]
    pub level: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContributionWeek {
    #[serde(default)]
    pub days: Vec<ContributionDay>,
}

/// A year of contribution activity: chronological weeks plus the total count.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributionCalendar {
    pub weeks: Vec<ContributionWeek>,
    pub total: u32,
}

impl ContributionCalendar {
    pub fn is_empty(&self) -> bool {
        self.weeks.iter().all(|w| w.days.is_empty())
    }

    /// Sum of the day counts, independent of the reported total. Saturates
    /// at `u32::MAX`.
    pub fn counted_total(&self) -> u32 {
        let total = self
            .weeks
            .iter()
            .flat_map(|w| w.days.iter())
            .map(|d| u64::from(d.count))
            .fold(0, u64::saturating_add);
        total.min(u64::from(u32::MAX)) as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_deserializes_github_payload() {
        let json = r#"{
            "name": "octograph",
            "html_url": "https://github.com/someone/octograph",
            "description": "GitHub stats in the terminal",
            "fork": false,
            "archived": false,
            "stargazers_count": 42,
            "language": "Rust",
            "languages_url": "https://api.github.com/repos/someone/octograph/languages",
            "pushed_at": "2025-06-01T12:00:00Z",
            "updated_at": "2025-06-02T08:30:00Z"
        }"#;

        let repo: Repo = serde_json::from_str(json).unwrap();
        assert_eq!(repo.name, "octograph");
        assert!(!repo.fork);
        assert_eq!(repo.stargazers_count, 42);
        assert_eq!(repo.language.as_deref(), Some("Rust"));
        assert!(repo.pushed_at.is_some());
    }

    #[test]
    fn test_repo_tolerates_missing_optional_fields() {
        let json = r#"{
            "name": "bare",
            "html_url": "https://github.com/someone/bare"
        }"#;

        let repo: Repo = serde_json::from_str(json).unwrap();
        assert!(!repo.fork);
        assert!(!repo.archived);
        assert_eq!(repo.stargazers_count, 0);
        assert!(repo.description.is_none());
        assert!(repo.updated_at.is_none());
    }

    #[test]
    fn test_contribution_day_defaults_count_and_level() {
        let day: ContributionDay = serde_json::from_str(r#"{"date": "2025-03-04"}"#).unwrap();
        assert_eq!(day.count, 0);
        assert_eq!(day.level, 0);
    }

    #[test]
    fn test_calendar_counted_total() {
        let calendar = ContributionCalendar {
            weeks: vec![
                ContributionWeek {
                    days: vec![
                        ContributionDay {
                            date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
                            count: 3,
                            level: 1,
                        },
                        ContributionDay {
                            date: NaiveDate::from_ymd_opt(2025, 1, 2).unwrap(),
                            count: 0,
                            level: 0,
                        },
                    ],
                },
                ContributionWeek {
                    days: vec![ContributionDay {
                        date: NaiveDate::from_ymd_opt(2025, 1, 8).unwrap(),
                        count: 7,
                        level: 4,
                    }],
                },
            ],
            total: 10,
        };

        assert_eq!(calendar.counted_total(), 10);
        assert!(!calendar.is_empty());
    }

    #[test]
    fn test_counted_total_saturates() {
        let day = |d: u32, count: u32| ContributionDay {
            date: NaiveDate::from_ymd_opt(2025, 1, d).unwrap(),
            count,
            level: 4,
        };
        let calendar = ContributionCalendar {
            weeks: vec![ContributionWeek {
                days: vec![day(1, u32::MAX), day(2, u32::MAX)],
            }],
            total: 0,
        };
        assert_eq!(calendar.counted_total(), u32::MAX);
    }

    #[test]
    fn test_empty_calendar() {
        let calendar = ContributionCalendar {
            weeks: Vec::new(),
            total: 0,
        };
        assert!(calendar.is_empty());
        assert_eq!(calendar.counted_total(), 0);
    }
}
