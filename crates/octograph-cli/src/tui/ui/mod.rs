mod calendar;
mod footer;
mod languages;
mod repos;
mod spinner;
mod widgets;

use octograph_core::{ApiError, FetchState};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph, Tabs};

use crate::tui::app::{App, Tab};

pub fn render(frame: &mut Frame, app: &mut App) {
    let area = frame.area();
    if area.width == 0 || area.height == 0 {
        return;
    }

    app.handle_resize(area.width, area.height);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(4),
        ])
        .split(area);

    // Keep scroll stepping in sync with what the active view actually draws.
    app.max_visible_items = visible_list_rows(app.current_tab, chunks[1]);

    render_header(frame, app, chunks[0]);

    match app.current_tab {
        Tab::Languages => match &app.languages {
            FetchState::Ready(totals) => languages::render(frame, app, chunks[1], totals),
            FetchState::Failed(err) => render_error(frame, app, chunks[1], err),
            _ => render_loading(frame, app, chunks[1], "Fetching language data..."),
        },
        Tab::Calendar => match &app.calendar {
            FetchState::Ready(cal) => calendar::render(frame, app, chunks[1], cal),
            FetchState::Failed(err) => render_error(frame, app, chunks[1], err),
            _ => render_loading(frame, app, chunks[1], "Fetching contribution data..."),
        },
        Tab::Repos => match &app.repos {
            FetchState::Ready(repos) => repos::render(frame, app, chunks[1], repos),
            FetchState::Failed(err) => render_error(frame, app, chunks[1], err),
            _ => render_loading(frame, app, chunks[1], "Fetching repositories..."),
        },
    }

    footer::render(frame, app, chunks[2]);
}

fn visible_list_rows(tab: Tab, body: Rect) -> usize {
    match tab {
        // Borders plus the share bar and its gap row.
        Tab::Languages => (body.height.saturating_sub(4) as usize).max(1),
        // Two rows per repository inside the borders.
        Tab::Repos => ((body.height.saturating_sub(2) / 2) as usize).max(1),
        Tab::Calendar => 1,
    }
}

fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let titles: Vec<Line> = Tab::all().iter().map(|t| Line::from(t.as_str())).collect();
    let selected = Tab::all()
        .iter()
        .position(|&t| t == app.current_tab)
        .unwrap_or(0);

    let tabs = Tabs::new(titles)
        .select(selected)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(app.theme.border))
                .style(Style::default().bg(app.theme.background))
                .title(Span::styled(
                    format!(" octograph · {} ", app.user),
                    Style::default()
                        .fg(app.theme.highlight)
                        .add_modifier(Modifier::BOLD),
                )),
        )
        .style(Style::default().fg(app.theme.muted))
        .highlight_style(
            Style::default()
                .fg(app.theme.foreground)
                .add_modifier(Modifier::BOLD),
        );

    frame.render_widget(tabs, area);
}

fn render_loading(frame: &mut Frame, app: &App, area: Rect, message: &str) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.border))
        .style(Style::default().bg(app.theme.background));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let center = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(40),
            Constraint::Length(3),
            Constraint::Percentage(40),
        ])
        .split(inner)[1];

    let mut spans = spinner::scanner_spans(app.spinner_frame);
    spans.push(Span::raw("  "));
    spans.push(Span::styled(
        message.to_string(),
        Style::default().fg(app.theme.muted),
    ));

    let paragraph = Paragraph::new(Line::from(spans)).alignment(Alignment::Center);
    frame.render_widget(paragraph, center);
}

fn render_error(frame: &mut Frame, app: &App, area: Rect, err: &ApiError) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.border))
        .style(Style::default().bg(app.theme.background));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let center = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(40),
            Constraint::Length(3),
            Constraint::Percentage(40),
        ])
        .split(inner)[1];

    let mut lines = vec![Line::from(Span::styled(
        format!("Error: {}", err),
        Style::default().fg(Color::Red),
    ))];
    if err.is_rate_limit() {
        lines.push(Line::from(Span::styled(
            "Supply a token via --token or GITHUB_TOKEN to raise the rate limit",
            Style::default().fg(app.theme.muted),
        )));
    }

    let paragraph = Paragraph::new(lines).alignment(Alignment::Center);
    frame.render_widget(paragraph, center);
}
