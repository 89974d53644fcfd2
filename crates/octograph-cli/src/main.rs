mod tui;

use anyhow::Result;
use chrono::Datelike;
use clap::{CommandFactory, Parser, Subcommand};

/// Recent-repo grid size, matching the profile page layout.
const RECENT_REPO_LIMIT: usize = 12;

#[derive(Parser)]
#[command(name = "octograph")]
#[command(author, version, about = "GitHub profile statistics in the terminal")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// GitHub handle; opens the interactive view when no subcommand is given
    user: Option<String>,

    #[arg(short, long, default_value = "green")]
    theme: String,

    #[arg(long, help = "GitHub token (defaults to GITHUB_TOKEN, then GH_TOKEN)")]
    token: Option<String>,

    #[arg(long, help = "Contribution year (YYYY)")]
    year: Option<i32>,

    #[arg(long)]
    debug: bool,

    #[arg(long, help = "Disable colored output")]
    no_color: bool,
}

#[derive(Subcommand)]
enum Commands {
    #[command(about = "Show the language breakdown for a user")]
    Languages {
        user: String,
        #[arg(long, help = "GitHub token (defaults to GITHUB_TOKEN, then GH_TOKEN)")]
        token: Option<String>,
        #[arg(long, help = "Output as JSON")]
        json: bool,
        #[arg(long, help = "Disable spinner")]
        no_spinner: bool,
    },
    #[command(about = "Show the contribution calendar for a user")]
    Calendar {
        user: String,
        #[arg(long, help = "Contribution year (YYYY)")]
        year: Option<i32>,
        #[arg(long, help = "GitHub token (defaults to GITHUB_TOKEN, then GH_TOKEN)")]
        token: Option<String>,
        #[arg(long, help = "Output as JSON")]
        json: bool,
        #[arg(long, help = "Disable spinner")]
        no_spinner: bool,
    },
    #[command(about = "Show recently updated repositories for a user")]
    Repos {
        user: String,
        #[arg(long, help = "GitHub token (defaults to GITHUB_TOKEN, then GH_TOKEN)")]
        token: Option<String>,
        #[arg(long, help = "Output as JSON")]
        json: bool,
        #[arg(long, help = "Disable spinner")]
        no_spinner: bool,
    },
    #[command(about = "Open the interactive profile view")]
    Tui {
        user: String,
        #[arg(long, help = "Contribution year (YYYY)")]
        year: Option<i32>,
        #[arg(long, help = "GitHub token (defaults to GITHUB_TOKEN, then GH_TOKEN)")]
        token: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.no_color {
        colored::control::set_override(false);
    }
    if cli.debug {
        init_debug_logging();
    }

    match cli.command {
        Some(Commands::Languages {
            user,
            token,
            json,
            no_spinner,
        }) => run_languages_report(&user, resolve_token(token), json, no_spinner),
        Some(Commands::Calendar {
            user,
            year,
            token,
            json,
            no_spinner,
        }) => {
            let year = year.unwrap_or_else(current_year);
            run_calendar_report(&user, year, resolve_token(token), json, no_spinner)
        }
        Some(Commands::Repos {
            user,
            token,
            json,
            no_spinner,
        }) => run_repos_report(&user, resolve_token(token), json, no_spinner),
        Some(Commands::Tui { user, year, token }) => {
            let year = year.unwrap_or_else(current_year);
            tui::run(&user, year, resolve_token(token), &cli.theme)
        }
        None => match cli.user {
            Some(user) => {
                let year = cli.year.unwrap_or_else(current_year);
                tui::run(&user, year, resolve_token(cli.token), &cli.theme)
            }
            None => {
                Cli::command().print_help()?;
                println!();
                Ok(())
            }
        },
    }
}

fn init_debug_logging() {
    tracing_subscriber::fmt()
        .with_env_filter("octograph_core=debug,octograph=debug")
        .with_writer(std::io::stderr)
        .init();
}

/// Flag wins over `GITHUB_TOKEN`, which wins over `GH_TOKEN`. Blank values
/// are treated as absent.
fn resolve_token(flag: Option<String>) -> Option<String> {
    [
        flag,
        std::env::var("GITHUB_TOKEN").ok(),
        std::env::var("GH_TOKEN").ok(),
    ]
    .into_iter()
    .flatten()
    .find(|t| !t.trim().is_empty())
}

fn current_year() -> i32 {
    chrono::Utc::now().year()
}

fn run_languages_report(
    user: &str,
    token: Option<String>,
    json: bool,
    no_spinner: bool,
) -> Result<()> {
    use octograph_core::{fetch_language_breakdown, CancelToken, GithubClient};
    use tokio::runtime::Runtime;

    let spinner = make_spinner(
        json || no_spinner,
        format!("Fetching languages for {}...", user),
    );

    let client = GithubClient::new(token);
    let cancel = CancelToken::new();
    let rt = Runtime::new()?;
    let result = rt.block_on(async { fetch_language_breakdown(&client, user, &cancel).await });

    if let Some(pb) = spinner {
        pb.finish_and_clear();
    }

    let totals = match result {
        Ok(totals) => totals,
        Err(err) => return report_fetch_error(&err, json),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&totals)?);
        return Ok(());
    }

    if totals.is_empty() {
        println!("\n  No public language data for {}.\n", user);
        return Ok(());
    }

    use comfy_table::{ContentArrangement, Table};

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Language", "Bytes", "Share"]);

    for total in &totals {
        table.add_row(vec![
            total.name.clone(),
            format_bytes(total.bytes),
            format!("{:.1}%", total.share),
        ]);
    }

    println!("{table}");
    Ok(())
}

fn run_calendar_report(
    user: &str,
    year: i32,
    token: Option<String>,
    json: bool,
    no_spinner: bool,
) -> Result<()> {
    use octograph_core::{fetch_contribution_calendar, CancelToken, GithubClient};
    use tokio::runtime::Runtime;

    let spinner = make_spinner(
        json || no_spinner,
        format!("Fetching {} contributions for {}...", year, user),
    );

    let client = GithubClient::new(token);
    let cancel = CancelToken::new();
    let rt = Runtime::new()?;
    let result =
        rt.block_on(async { fetch_contribution_calendar(&client, user, year, &cancel).await });

    if let Some(pb) = spinner {
        pb.finish_and_clear();
    }

    let calendar = match result {
        Ok(calendar) => calendar,
        Err(err) => return report_fetch_error(&err, json),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&calendar)?);
        return Ok(());
    }

    if calendar.is_empty() {
        println!("\n  No contributions found for {} in {}.\n", user, year);
        return Ok(());
    }

    print_heatmap(&calendar);
    println!(
        "\n      {} contributions in {}\n",
        format_count(calendar.total as u64),
        year
    );
    Ok(())
}

fn run_repos_report(user: &str, token: Option<String>, json: bool, no_spinner: bool) -> Result<()> {
    use octograph_core::{fetch_recent_repos, GithubClient};
    use tokio::runtime::Runtime;

    let spinner = make_spinner(
        json || no_spinner,
        format!("Fetching repositories for {}...", user),
    );

    let client = GithubClient::new(token);
    let rt = Runtime::new()?;
    let result = rt.block_on(async { fetch_recent_repos(&client, user, RECENT_REPO_LIMIT).await });

    if let Some(pb) = spinner {
        pb.finish_and_clear();
    }

    let repos = match result {
        Ok(repos) => repos,
        Err(err) => return report_fetch_error(&err, json),
    };

    if json {
        #[derive(serde::Serialize)]
        #[serde(rename_all = "camelCase")]
        struct RepoJson {
            name: String,
            html_url: String,
            description: Option<String>,
            fork: bool,
            stargazers_count: u32,
            language: Option<String>,
            updated_at: Option<chrono::DateTime<chrono::Utc>>,
        }

        let output: Vec<RepoJson> = repos
            .into_iter()
            .map(|r| RepoJson {
                name: r.name,
                html_url: r.html_url,
                description: r.description,
                fork: r.fork,
                stargazers_count: r.stargazers_count,
                language: r.language,
                updated_at: r.updated_at,
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    if repos.is_empty() {
        println!("\n  No public repositories for {}.\n", user);
        return Ok(());
    }

    use comfy_table::{ContentArrangement, Table};

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Name", "Stars", "Language", "Updated", "Description"]);

    for repo in &repos {
        let name = if repo.fork {
            format!("{} (fork)", repo.name)
        } else {
            repo.name.clone()
        };
        table.add_row(vec![
            name,
            format_count(repo.stargazers_count as u64),
            repo.language.clone().unwrap_or_else(|| "-".to_string()),
            format_relative(repo.updated_at),
            repo.description.clone().unwrap_or_default(),
        ]);
    }

    println!("{table}");
    Ok(())
}

fn make_spinner(suppress: bool, message: String) -> Option<indicatif::ProgressBar> {
    use indicatif::{ProgressBar, ProgressStyle};

    if suppress {
        return None;
    }
    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner());
    pb.set_message(message);
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    Some(pb)
}

fn report_fetch_error(err: &octograph_core::ApiError, json: bool) -> Result<()> {
    use colored::Colorize;

    if json {
        #[derive(serde::Serialize)]
        #[serde(rename_all = "camelCase")]
        struct ErrorOutput {
            error: String,
            #[serde(skip_serializing_if = "Option::is_none")]
            status: Option<u16>,
        }
        println!(
            "{}",
            serde_json::to_string_pretty(&ErrorOutput {
                error: err.to_string(),
                status: err.status(),
            })?
        );
        std::process::exit(1);
    }

    println!("\n  {}", err.to_string().red());
    if err.is_rate_limit() {
        println!(
            "{}\n",
            "  Supply a token via --token or GITHUB_TOKEN to raise the rate limit.".bright_black()
        );
    } else {
        println!();
    }
    std::process::exit(1);
}

const HEATMAP_COLORS: [(u8, u8, u8); 5] = [
    (22, 27, 34),
    (14, 68, 41),
    (0, 109, 50),
    (38, 166, 65),
    (57, 211, 83),
];

const MONTH_LABELS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

fn print_heatmap(calendar: &octograph_core::ContributionCalendar) {
    use colored::Colorize;

    const DAY_LABELS: [&str; 7] = ["   ", "Mon", "   ", "Wed", "   ", "Fri", "   "];

    println!();
    println!("      {}", month_label_row(&calendar.weeks));

    for (row, label) in DAY_LABELS.iter().enumerate() {
        let mut line = String::new();
        for week in &calendar.weeks {
            let day = week
                .days
                .iter()
                .find(|d| d.date.weekday().num_days_from_sunday() as usize == row);
            match day {
                Some(day) => {
                    let (r, g, b) = HEATMAP_COLORS[day.level.min(4) as usize];
                    line.push_str(&"██".truecolor(r, g, b).to_string());
                }
                None => line.push_str("  "),
            }
        }
        println!("  {} {}", label, line);
    }

    let mut legend = String::from("Less ");
    for (r, g, b) in HEATMAP_COLORS {
        legend.push_str(&"██".truecolor(r, g, b).to_string());
        legend.push(' ');
    }
    legend.push_str("More");
    println!("\n      {}", legend);
}

/// Month names positioned over the week columns where the month changes.
fn month_label_row(weeks: &[octograph_core::ContributionWeek]) -> String {
    let mut row = vec![' '; weeks.len() * 2];
    let mut last_month = 0;
    let mut next_free = 0;
    for (idx, week) in weeks.iter().enumerate() {
        let Some(first) = week.days.first() else {
            continue;
        };
        let month = first.date.month();
        if month == last_month {
            continue;
        }
        last_month = month;
        let col = idx * 2;
        let label = MONTH_LABELS[(month - 1) as usize];
        if col < next_free || col + label.len() > row.len() {
            continue;
        }
        for (j, ch) in label.chars().enumerate() {
            row[col + j] = ch;
        }
        next_free = col + label.len() + 1;
    }
    row.into_iter().collect::<String>().trim_end().to_string()
}

fn format_bytes(n: u64) -> String {
    if n >= 1_073_741_824 {
        format!("{:.1} GB", n as f64 / 1_073_741_824.0)
    } else if n >= 1_048_576 {
        format!("{:.1} MB", n as f64 / 1_048_576.0)
    } else if n >= 1024 {
        format!("{:.1} KB", n as f64 / 1024.0)
    } else {
        format!("{} B", n)
    }
}

fn format_count(n: u64) -> String {
    let s = n.to_string();
    let mut result = String::new();
    for (i, c) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.insert(0, ',');
        }
        result.insert(0, c);
    }
    result
}

fn format_relative(time: Option<chrono::DateTime<chrono::Utc>>) -> String {
    let Some(time) = time else {
        return "unknown".to_string();
    };
    let days = (chrono::Utc::now() - time).num_days().max(0);
    if days == 0 {
        "today".to_string()
    } else if days == 1 {
        "yesterday".to_string()
    } else if days < 30 {
        format!("{} days ago", days)
    } else if days < 365 {
        let months = days / 30;
        format!("{} month{} ago", months, if months == 1 { "" } else { "s" })
    } else {
        let years = days / 365;
        format!("{} year{} ago", years, if years == 1 { "" } else { "s" })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use octograph_core::{ContributionDay, ContributionWeek};

    fn week_of(dates: &[(i32, u32, u32)]) -> ContributionWeek {
        ContributionWeek {
            days: dates
                .iter()
                .map(|&(y, m, d)| ContributionDay {
                    date: NaiveDate::from_ymd_opt(y, m, d).unwrap(),
                    count: 0,
                    level: 0,
                })
                .collect(),
        }
    }

    #[test]
    fn test_resolve_token_prefers_flag() {
        assert_eq!(
            resolve_token(Some("abc123".to_string())),
            Some("abc123".to_string())
        );
    }

    #[test]
    fn test_format_bytes_units() {
        assert_eq!(format_bytes(512), "512 B");
        assert_eq!(format_bytes(2048), "2.0 KB");
        assert_eq!(format_bytes(1_572_864), "1.5 MB");
        assert_eq!(format_bytes(3_221_225_472), "3.0 GB");
    }

    #[test]
    fn test_format_count_groups_thousands() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(1_000), "1,000");
        assert_eq!(format_count(1_234_567), "1,234,567");
    }

    #[test]
    fn test_format_relative_without_timestamp() {
        assert_eq!(format_relative(None), "unknown");
    }

    #[test]
    fn test_format_relative_recent() {
        let now = chrono::Utc::now();
        assert_eq!(format_relative(Some(now)), "today");
        assert_eq!(
            format_relative(Some(now - chrono::Duration::days(1))),
            "yesterday"
        );
        assert_eq!(
            format_relative(Some(now - chrono::Duration::days(5))),
            "5 days ago"
        );
        assert_eq!(
            format_relative(Some(now - chrono::Duration::days(40))),
            "1 month ago"
        );
        assert_eq!(
            format_relative(Some(now - chrono::Duration::days(800))),
            "2 years ago"
        );
    }

    #[test]
    fn test_month_label_row_marks_month_changes() {
        let weeks = vec![
            week_of(&[(2025, 1, 5)]),
            week_of(&[(2025, 1, 12)]),
            week_of(&[(2025, 2, 2)]),
            week_of(&[(2025, 2, 9)]),
        ];
        let row = month_label_row(&weeks);
        assert!(row.starts_with("Jan"));
        assert!(row.contains("Feb"));
    }

    #[test]
    fn test_month_label_row_skips_overlapping_labels() {
        // Month changes on adjacent weeks would overlap at 2-cell pitch; the
        // second label is dropped rather than overwritten.
        let weeks = vec![week_of(&[(2025, 1, 26)]), week_of(&[(2025, 2, 2)])];
        let row = month_label_row(&weeks);
        assert!(row.starts_with("Jan"));
        assert!(!row.contains("Feb"));
    }

    #[test]
    fn test_month_label_row_empty_weeks() {
        assert_eq!(month_label_row(&[]), "");
        let weeks = vec![ContributionWeek { days: Vec::new() }];
        assert_eq!(month_label_row(&weeks), "");
    }
}
