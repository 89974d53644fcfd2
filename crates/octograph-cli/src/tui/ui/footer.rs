use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};

use super::spinner::scanner_spans;
use crate::tui::app::App;

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.border))
        .style(Style::default().bg(app.theme.background));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let row_constraints = if inner.height >= 2 {
        vec![Constraint::Length(1), Constraint::Length(1)]
    } else {
        vec![Constraint::Length(1)]
    };

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(row_constraints)
        .split(inner);

    render_help_row(frame, app, rows[0]);

    if rows.len() >= 2 {
        render_status_row(frame, app, rows[1]);
    }
}

fn render_help_row(frame: &mut Frame, app: &App, area: Rect) {
    let is_very_narrow = app.is_very_narrow();

    let spans = if is_very_narrow {
        vec![
            Span::styled("↑↓", Style::default().fg(app.theme.muted)),
            Span::styled("·", Style::default().fg(app.theme.muted)),
            Span::styled("←→", Style::default().fg(app.theme.muted)),
            Span::styled("·", Style::default().fg(app.theme.muted)),
            Span::styled("[ ]", Style::default().fg(app.theme.muted)),
            Span::styled("·", Style::default().fg(app.theme.muted)),
            Span::styled("[t]", Style::default().fg(Color::Magenta)),
            Span::styled("·", Style::default().fg(app.theme.muted)),
            Span::styled("[r]", Style::default().fg(Color::Yellow)),
            Span::styled("·", Style::default().fg(app.theme.muted)),
            Span::styled("q", Style::default().fg(app.theme.muted)),
        ]
    } else {
        vec![
            Span::styled(
                "←→/tab view • ↑↓ scroll • [ ] year • y copy • ",
                Style::default().fg(app.theme.muted),
            ),
            Span::styled(
                format!("[t:{}]", app.theme.name.as_str()),
                Style::default().fg(Color::Magenta),
            ),
            Span::styled(" • ", Style::default().fg(app.theme.muted)),
            Span::styled("[r:reload]", Style::default().fg(Color::Yellow)),
            Span::styled(" • q quit", Style::default().fg(app.theme.muted)),
        ]
    };

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_status_row(frame: &mut Frame, app: &App, area: Rect) {
    let mut spans: Vec<Span> = Vec::new();

    if app.is_fetching() {
        spans.extend(scanner_spans(app.spinner_frame));
        spans.push(Span::raw(" "));
        spans.push(Span::styled(
            "Fetching from GitHub...",
            Style::default().fg(app.theme.muted),
        ));
    } else if let Some(ref msg) = app.status_message {
        spans.push(Span::styled(
            msg.clone(),
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        ));
    } else {
        spans.push(Span::styled(
            format!("{} · {}", app.user, app.year),
            Style::default().fg(app.theme.muted),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
