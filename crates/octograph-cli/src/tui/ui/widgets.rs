use std::collections::HashMap;

use once_cell::sync::Lazy;
use ratatui::style::Color;

/// GitHub's linguist colors for common languages.
static LANG_COLORS: Lazy<HashMap<&'static str, Color>> = Lazy::new(|| {
    HashMap::from([
        ("JavaScript", Color::Rgb(241, 224, 90)), // #F1E05A
        ("TypeScript", Color::Rgb(49, 120, 198)), // #3178C6
        ("Rust", Color::Rgb(222, 165, 132)),      // #DEA584
        ("Python", Color::Rgb(53, 114, 165)),     // #3572A5
        ("Go", Color::Rgb(0, 173, 216)),          // #00ADD8
        ("Java", Color::Rgb(176, 114, 25)),       // #B07219
        ("C", Color::Rgb(85, 85, 85)),            // #555555
        ("C++", Color::Rgb(243, 75, 125)),        // #F34B7D
        ("C#", Color::Rgb(23, 134, 0)),           // #178600
        ("Ruby", Color::Rgb(112, 21, 22)),        // #701516
        ("PHP", Color::Rgb(79, 93, 149)),         // #4F5D95
        ("Swift", Color::Rgb(240, 81, 56)),       // #F05138
        ("Kotlin", Color::Rgb(169, 123, 255)),    // #A97BFF
        ("Dart", Color::Rgb(0, 180, 171)),        // #00B4AB
        ("HTML", Color::Rgb(227, 76, 38)),        // #E34C26
        ("CSS", Color::Rgb(86, 61, 124)),         // #563D7C
        ("Shell", Color::Rgb(137, 224, 81)),      // #89E051
        ("Vue", Color::Rgb(65, 184, 131)),        // #41B883
        ("Svelte", Color::Rgb(255, 62, 0)),       // #FF3E00
        ("Elixir", Color::Rgb(110, 74, 126)),     // #6E4A7E
        ("Haskell", Color::Rgb(94, 80, 134)),     // #5E5086
        ("Lua", Color::Rgb(0, 0, 128)),           // #000080
        ("Zig", Color::Rgb(236, 145, 92)),        // #EC915C
        ("Jupyter Notebook", Color::Rgb(218, 91, 11)), // #DA5B0B
    ])
});

const FALLBACK_COLOR: Color = Color::Rgb(139, 148, 158); // #8B949E

pub fn language_color(name: &str) -> Color {
    LANG_COLORS.get(name).copied().unwrap_or(FALLBACK_COLOR)
}

pub fn format_bytes(n: u64) -> String {
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

pub fn format_count(n: u64) -> String {
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

pub fn format_relative(time: Option<chrono::DateTime<chrono::Utc>>) -> String {
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

pub fn truncate(s: &str, max_width: usize) -> String {
    if s.chars().count() <= max_width {
        s.to_string()
    } else if max_width == 0 {
        String::new()
    } else {
        let truncated: String = s.chars().take(max_width.saturating_sub(1)).collect();
        format!("{}…", truncated)
    }
}
