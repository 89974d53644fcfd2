//! Contribution calendar for a single year.
//!
//! With a token the GraphQL API gives exact per-year data and intensity
//! levels are derived locally from the count distribution. Without one, a
//! public pre-aggregated endpoint is used and its weeks/total are accepted
//! as-is.

use serde::Deserialize;
use tracing::debug;

use crate::client::GithubClient;
use crate::error::{ApiError, Result};
use crate::fetch::CancelToken;
use crate::models::{ContributionCalendar, ContributionDay, ContributionWeek};

const FALLBACK_BASE: &str = "https://github-contributions-api.jogruber.de/v4";

const CALENDAR_QUERY: &str = "query($login: String!, $from: DateTime!, $to: DateTime!) {
  user(login: $login) {
    contributionsCollection(from: $from, to: $to) {
      contributionCalendar {
        totalContributions
        weeks {
          contributionDays { date contributionCount }
        }
      }
    }
  }
}";

/// Structs for the GraphQL `contributionsCollection` response.

#[derive(Deserialize)]
struct GraphQlResponse {
    #[serde(default)]
    data: Option<GraphQlData>,
}

#[derive(Deserialize)]
struct GraphQlData {
    #[serde(default)]
    user: Option<GraphQlUser>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GraphQlUser {
    #[serde(default)]
    contributions_collection: Option<ContributionsCollection>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ContributionsCollection {
    contribution_calendar: CalendarPayload,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CalendarPayload {
    #[serde(default)]
    total_contributions: u32,
    #[serde(default)]
    weeks: Vec<WeekPayload>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct WeekPayload {
    #[serde(default)]
    contribution_days: Vec<DayPayload>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct DayPayload {
    date: chrono::NaiveDate,
    #[serde(default)]
    contribution_count: u32,
}

/// Structs for the public fallback endpoint.

#[derive(Deserialize)]
struct FallbackResponse {
    #[serde(default)]
    weeks: Vec<ContributionWeek>,
    // Number in the documented shape, but some endpoint versions send a
    // per-year object; anything non-numeric counts as absent
    #[serde(default)]
    total: serde_json::Value,
}

/// Fetch the contribution calendar for `year`.
///
/// The token routes between the GraphQL path (levels derived locally) and
/// the public fallback path (levels accepted as delivered). Empty weeks are
/// a valid result.
pub async fn fetch_contribution_calendar(
    client: &GithubClient,
    user: &str,
    year: i32,
    cancel: &CancelToken,
) -> Result<ContributionCalendar> {
    cancel.ensure_live()?;

    let calendar = if client.has_token() {
        fetch_calendar_graphql(client, user, year).await?
    } else {
        fetch_calendar_fallback(client, user, year).await?
    };

    cancel.ensure_live()?;
    debug!(user, year, total = calendar.total, "fetched contribution calendar");
    Ok(calendar)
}

async fn fetch_calendar_graphql(
    client: &GithubClient,
    user: &str,
    year: i32,
) -> Result<ContributionCalendar> {
    let body = serde_json::json!({
        "query": CALENDAR_QUERY,
        "variables": {
            "login": user,
            "from": format!("{}-01-01T00:00:00Z", year),
            "to": format!("{}-12-31T23:59:59Z", year),
        }
    });

    let response: GraphQlResponse = client.post_graphql(&body).await?;
    let calendar = extract_calendar(response).ok_or_else(|| ApiError::Decode {
        message: format!("no contribution calendar for {}", user),
    })?;

    let mut weeks: Vec<ContributionWeek> = calendar
        .weeks
        .into_iter()
        .map(|w| ContributionWeek {
            days: w
                .contribution_days
                .into_iter()
                .map(|d| ContributionDay {
                    date: d.date,
                    count: d.contribution_count,
                    level: 0,
                })
                .collect(),
        })
        .collect();

    assign_levels(&mut weeks);

    Ok(ContributionCalendar {
        weeks,
        total: calendar.total_contributions,
    })
}

fn extract_calendar(response: GraphQlResponse) -> Option<CalendarPayload> {
    Some(
        response
            .data?
            .user?
            .contributions_collection?
            .contribution_calendar,
    )
}

fn fallback_url(user: &str, year: i32) -> String {
    format!("{}/{}?y={}", FALLBACK_BASE, user, year)
}

async fn fetch_calendar_fallback(
    client: &GithubClient,
    user: &str,
    year: i32,
) -> Result<ContributionCalendar> {
    let response: FallbackResponse = client
        .get_public_json(&fallback_url(user, year))
        .await?;

    let mut calendar = ContributionCalendar {
        weeks: response.weeks,
        total: 0,
    };
    calendar.total = match response.total.as_u64() {
        Some(total) => total.min(u64::from(u32::MAX)) as u32,
        None => calendar.counted_total(),
    };

    Ok(calendar)
}

/// Assign intensity levels in place from the distribution of day counts.
///
/// Cut points are nearest-rank quantiles over the non-zero counts, so a
/// profile with a few heavy days still shows graded mid-range activity.
pub fn assign_levels(weeks: &mut [ContributionWeek]) {
    let nonzero: Vec<u32> = weeks
        .iter()
        .flat_map(|w| w.days.iter())
        .map(|d| d.count)
        .filter(|c| *c > 0)
        .collect();
    let cuts = quantile_cuts(nonzero);

    for week in weeks.iter_mut() {
        for day in week.days.iter_mut() {
            day.level = level_for(day.count, cuts);
        }
    }
}

/// Nearest-rank cut points at the 25th/50th/75th percentile of the non-zero
/// counts. All zero when there are no non-zero counts.
fn quantile_cuts(mut nonzero: Vec<u32>) -> (u32, u32, u32) {
    if nonzero.is_empty() {
        return (0, 0, 0);
    }
    nonzero.sort_unstable();

    let cut = |p: f64| nonzero[((nonzero.len() - 1) as f64 * p).floor() as usize];
    (cut(0.25), cut(0.5), cut(0.75))
}

fn level_for(count: u32, cuts: (u32, u32, u32)) -> u8 {
    if count == 0 {
        0
    } else if count <= cuts.0 {
        1
    } else if count <= cuts.1 {
        2
    } else if count <= cuts.2 {
        3
    } else {
        4
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn day(date: &str, count: u32) -> ContributionDay {
        ContributionDay {
            date: date.parse::<NaiveDate>().unwrap(),
            count,
            level: 0,
        }
    }

    #[test]
    fn test_quantile_cuts_nearest_rank() {
        let cuts = quantile_cuts(vec![1, 1, 2, 3, 5, 8, 13]);
        assert_eq!(cuts, (1, 3, 5));
    }

    #[test]
    fn test_quantile_cuts_empty() {
        assert_eq!(quantile_cuts(Vec::new()), (0, 0, 0));
    }

    #[test]
    fn test_quantile_cuts_single_value() {
        assert_eq!(quantile_cuts(vec![7]), (7, 7, 7));
    }

    #[test]
    fn test_quantile_cuts_unsorted_input() {
        assert_eq!(quantile_cuts(vec![13, 1, 5, 2, 8, 1, 3]), (1, 3, 5));
    }

    #[test]
    fn test_quantile_cuts_non_decreasing() {
        for counts in [
            vec![4, 4, 4, 4],
            vec![1, 2],
            vec![9, 1, 1, 1, 1, 1, 1, 40],
            vec![100],
        ] {
            let (t1, t2, t3) = quantile_cuts(counts);
            assert!(t1 <= t2);
            assert!(t2 <= t3);
        }
    }

    #[test]
    fn test_level_tiers() {
        let cuts = (1, 3, 5);
        assert_eq!(level_for(0, cuts), 0);
        assert_eq!(level_for(1, cuts), 1);
        assert_eq!(level_for(2, cuts), 2);
        assert_eq!(level_for(3, cuts), 2);
        assert_eq!(level_for(5, cuts), 3);
        assert_eq!(level_for(8, cuts), 4);
        assert_eq!(level_for(13, cuts), 4);
    }

    #[test]
    fn test_level_zero_only_for_zero_count() {
        let cuts = (0, 0, 0);
        assert_eq!(level_for(0, cuts), 0);
        // With no non-zero history any activity lands in the top bucket
        assert_eq!(level_for(1, cuts), 4);
    }

    #[test]
    fn test_assign_levels_across_weeks() {
        let mut weeks = vec![
            ContributionWeek {
                days: vec![
                    day("2025-01-01", 1),
                    day("2025-01-02", 0),
                    day("2025-01-03", 2),
                ],
            },
            ContributionWeek {
                days: vec![
                    day("2025-01-08", 3),
                    day("2025-01-09", 5),
                    day("2025-01-10", 8),
                    day("2025-01-11", 13),
                    day("2025-01-12", 1),
                ],
            },
        ];

        assign_levels(&mut weeks);

        let levels: Vec<u8> = weeks
            .iter()
            .flat_map(|w| w.days.iter())
            .map(|d| d.level)
            .collect();
        assert_eq!(levels, vec![1, 0, 2, 2, 3, 4, 4, 1]);
        assert!(levels.iter().all(|l| *l <= 4));
    }

    #[test]
    fn test_assign_levels_uniform_counts() {
        let mut weeks = vec![ContributionWeek {
            days: vec![day("2025-02-01", 4), day("2025-02-02", 4)],
        }];

        assign_levels(&mut weeks);
        assert!(weeks[0].days.iter().all(|d| d.level == 1));
    }

    #[test]
    fn test_assign_levels_all_zero() {
        let mut weeks = vec![ContributionWeek {
            days: vec![day("2025-02-01", 0), day("2025-02-02", 0)],
        }];

        assign_levels(&mut weeks);
        assert!(weeks[0].days.iter().all(|d| d.level == 0));
    }

    #[test]
    fn test_fallback_url() {
        assert_eq!(
            fallback_url("octocat", 2025),
            "https://github-contributions-api.jogruber.de/v4/octocat?y=2025"
        );
    }

    #[test]
    fn test_graphql_response_shape() {
        let json = r#"{
            "data": {
                "user": {
                    "contributionsCollection": {
                        "contributionCalendar": {
                            "totalContributions": 12,
                            "weeks": [
                                {
                                    "contributionDays": [
                                        {"date": "2025-01-01", "contributionCount": 4},
                                        {"date": "2025-01-02", "contributionCount": 8}
                                    ]
                                }
                            ]
                        }
                    }
                }
            }
        }"#;

        let response: GraphQlResponse = serde_json::from_str(json).unwrap();
        let calendar = extract_calendar(response).unwrap();
        assert_eq!(calendar.total_contributions, 12);
        assert_eq!(calendar.weeks.len(), 1);
        assert_eq!(calendar.weeks[0].contribution_days[1].contribution_count, 8);
    }

    #[test]
    fn test_graphql_missing_user_yields_no_calendar() {
        let response: GraphQlResponse =
            serde_json::from_str(r#"{"data": {"user": null}}"#).unwrap();
        assert!(extract_calendar(response).is_none());

        let response: GraphQlResponse = serde_json::from_str(r#"{"data": null}"#).unwrap();
        assert!(extract_calendar(response).is_none());
    }

    #[test]
    fn test_fallback_response_defaults() {
        let response: FallbackResponse = serde_json::from_str("{}").unwrap();
        assert!(response.weeks.is_empty());
        assert!(response.total.as_u64().is_none());
    }

    #[test]
    fn test_fallback_response_with_weeks() {
        let json = r#"{
            "total": 10,
            "weeks": [
                {"days": [
                    {"date": "2025-01-01", "count": 3, "level": 1},
                    {"date": "2025-01-02", "count": 7, "level": 4}
                ]}
            ]
        }"#;

        let response: FallbackResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.total.as_u64(), Some(10));
        assert_eq!(response.weeks[0].days[1].level, 4);
    }

    #[test]
    fn test_fallback_total_object_counts_as_absent() {
        let response: FallbackResponse =
            serde_json::from_str(r#"{"total": {"2025": 42}, "weeks": []}"#).unwrap();
        assert!(response.total.as_u64().is_none());
    }
}
