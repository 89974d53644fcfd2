use chrono::Datelike;
use octograph_core::ContributionCalendar;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};

use super::widgets::format_count;
use crate::tui::app::App;

const CELL_WIDTH: u16 = 2;
const MONTH_LABELS: &[&str] = &[
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];
const DAY_LABELS: &[&str] = &["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

pub fn render(frame: &mut Frame, app: &App, area: Rect, calendar: &ContributionCalendar) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.border))
        .title(Span::styled(
            format!(" Contributions · {} ", app.year),
            Style::default()
                .fg(app.theme.highlight)
                .add_modifier(Modifier::BOLD),
        ))
        .style(Style::default().bg(app.theme.background));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    if calendar.is_empty() {
        let center = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Percentage(40),
                Constraint::Length(1),
                Constraint::Percentage(40),
            ])
            .split(inner)[1];
        let empty = Paragraph::new(format!("No contributions in {}", app.year))
            .style(Style::default().fg(app.theme.muted))
            .alignment(Alignment::Center);
        frame.render_widget(empty, center);
        return;
    }

    let is_narrow = app.is_narrow();
    let label_width = if is_narrow { 2u16 } else { 4u16 };
    let graph_start_x = inner.x + label_width;
    let graph_start_y = inner.y + 2;

    for (day_idx, label) in DAY_LABELS.iter().enumerate() {
        if day_idx % 2 == 1 {
            let y = graph_start_y + day_idx as u16;
            if y < inner.y + inner.height {
                let display_label = if is_narrow { "" } else { *label };
                let text =
                    Paragraph::new(display_label).style(Style::default().fg(app.theme.muted));
                frame.render_widget(text, Rect::new(inner.x, y, label_width, 1));
            }
        }
    }

    let max_weeks = (inner.width.saturating_sub(label_width) / CELL_WIDTH) as usize;
    let weeks_to_show = calendar.weeks.len().min(max_weeks);
    let start_week = calendar.weeks.len().saturating_sub(weeks_to_show);

    for (week_idx, week) in calendar.weeks.iter().skip(start_week).enumerate() {
        let x = graph_start_x + (week_idx as u16 * CELL_WIDTH);

        // Weeks at the year boundary carry fewer than seven days; place each
        // day by its actual weekday rather than its position in the list.
        for day in &week.days {
            let y = graph_start_y + day.date.weekday().num_days_from_sunday() as u16;

            if x >= inner.x + inner.width || y >= inner.y + inner.height {
                continue;
            }

            let cell = Paragraph::new("██")
                .style(Style::default().fg(app.theme.level_color(day.level)));
            frame.render_widget(cell, Rect::new(x, y, CELL_WIDTH, 1));
        }
    }

    let month_y = inner.y;
    let mut current_month: Option<usize> = None;

    for (week_idx, week) in calendar.weeks.iter().skip(start_week).enumerate() {
        if let Some(day) = week.days.first() {
            let month = day.date.month0() as usize;
            if current_month != Some(month) {
                current_month = Some(month);
                let x = graph_start_x + (week_idx as u16 * CELL_WIDTH);
                if x + 3 < inner.x + inner.width && month < MONTH_LABELS.len() {
                    let label =
                        Paragraph::new(MONTH_LABELS[month]).style(Style::default().fg(app.theme.muted));
                    frame.render_widget(label, Rect::new(x, month_y, 3, 1));
                }
            }
        }
    }

    let legend_y = graph_start_y + 8;
    if legend_y < inner.y + inner.height {
        let legend_spans = vec![
            Span::styled("Less ", Style::default().fg(app.theme.muted)),
            Span::styled("██", Style::default().fg(app.theme.levels[0])),
            Span::raw(" "),
            Span::styled("██", Style::default().fg(app.theme.levels[1])),
            Span::raw(" "),
            Span::styled("██", Style::default().fg(app.theme.levels[2])),
            Span::raw(" "),
            Span::styled("██", Style::default().fg(app.theme.levels[3])),
            Span::raw(" "),
            Span::styled("██", Style::default().fg(app.theme.levels[4])),
            Span::styled(" More", Style::default().fg(app.theme.muted)),
        ];
        frame.render_widget(
            Paragraph::new(Line::from(legend_spans)),
            Rect::new(graph_start_x, legend_y, inner.width.saturating_sub(label_width), 1),
        );
    }

    let total_y = legend_y + 2;
    if total_y < inner.y + inner.height {
        let total_line = Line::from(vec![
            Span::styled(
                format_count(calendar.total as u64),
                Style::default()
                    .fg(app.theme.highlight)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!(" contributions in {}", app.year),
                Style::default().fg(app.theme.foreground),
            ),
        ]);
        frame.render_widget(
            Paragraph::new(total_line),
            Rect::new(graph_start_x, total_y, inner.width.saturating_sub(label_width), 1),
        );
    }
}
