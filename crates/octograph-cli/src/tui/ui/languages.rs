use octograph_core::LanguageTotal;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};

use super::widgets::{format_bytes, language_color, truncate};
use crate::tui::app::App;

pub fn render(frame: &mut Frame, app: &App, area: Rect, totals: &[LanguageTotal]) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.border))
        .title(Span::styled(
            " Most Used Languages ",
            Style::default()
                .fg(app.theme.highlight)
                .add_modifier(Modifier::BOLD),
        ))
        .style(Style::default().bg(app.theme.background));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    if totals.is_empty() {
        let empty = Paragraph::new("No public language data")
            .style(Style::default().fg(app.theme.muted))
            .alignment(Alignment::Center);
        frame.render_widget(empty, inner);
        return;
    }

    if inner.height > 0 {
        render_share_bar(frame, Rect::new(inner.x, inner.y, inner.width, 1), totals);
    }

    let visible = inner.height.saturating_sub(2) as usize;
    let start = app.scroll_offset.min(totals.len());

    for (i, total) in totals.iter().enumerate().skip(start).take(visible) {
        let y = inner.y + 2 + (i - start) as u16;
        if y >= inner.y + inner.height {
            break;
        }

        let is_selected = i == app.selected_index;
        let marker = if is_selected { "> " } else { "  " };
        let name_style = if is_selected {
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(app.theme.foreground)
        };

        let line = Line::from(vec![
            Span::styled(marker, Style::default().fg(app.theme.highlight)),
            Span::styled(
                "■ ",
                Style::default().fg(language_color(&total.name)),
            ),
            Span::styled(format!("{:<16}", truncate(&total.name, 16)), name_style),
            Span::styled(
                format!("{:>6.1}%", total.share),
                Style::default().fg(app.theme.highlight),
            ),
            Span::raw("  "),
            Span::styled(
                format_bytes(total.bytes),
                Style::default().fg(app.theme.muted),
            ),
        ]);

        frame.render_widget(
            Paragraph::new(line),
            Rect::new(inner.x, y, inner.width, 1),
        );
    }
}

/// One-row bar split into per-language segments proportional to share,
/// like the breakdown bar on a repository page.
fn render_share_bar(frame: &mut Frame, area: Rect, totals: &[LanguageTotal]) {
    let total_share: f64 = totals.iter().map(|t| t.share).sum();
    if total_share <= 0.0 || area.width == 0 {
        return;
    }

    let mut spans = Vec::new();
    let mut used = 0u16;
    for total in totals {
        let width = ((total.share / total_share) * area.width as f64).round() as u16;
        let width = width.min(area.width.saturating_sub(used));
        if width == 0 {
            continue;
        }
        spans.push(Span::styled(
            "█".repeat(width as usize),
            Style::default().fg(language_color(&total.name)),
        ));
        used += width;
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
