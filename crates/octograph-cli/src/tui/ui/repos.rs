use octograph_core::Repo;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};

use super::widgets::{format_count, format_relative, language_color, truncate};
use crate::tui::app::App;

pub fn render(frame: &mut Frame, app: &App, area: Rect, repos: &[Repo]) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.border))
        .title(Span::styled(
            " Recent Repositories ",
            Style::default()
                .fg(app.theme.highlight)
                .add_modifier(Modifier::BOLD),
        ))
        .style(Style::default().bg(app.theme.background));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    if repos.is_empty() {
        let empty = Paragraph::new("No public repositories")
            .style(Style::default().fg(app.theme.muted))
            .alignment(Alignment::Center);
        frame.render_widget(empty, inner);
        return;
    }

    let visible = (inner.height / 2) as usize;
    let start = app.scroll_offset.min(repos.len());

    for (i, repo) in repos.iter().enumerate().skip(start).take(visible) {
        let y = inner.y + ((i - start) as u16) * 2;
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
            Style::default()
                .fg(app.theme.foreground)
                .add_modifier(Modifier::BOLD)
        };

        let mut spans = vec![
            Span::styled(marker, Style::default().fg(app.theme.highlight)),
            Span::styled(repo.name.clone(), name_style),
        ];
        if repo.fork {
            spans.push(Span::styled(
                " (fork)",
                Style::default().fg(app.theme.muted),
            ));
        }
        spans.push(Span::styled(
            format!("  ★ {}", format_count(repo.stargazers_count as u64)),
            Style::default().fg(Color::Yellow),
        ));
        if let Some(language) = &repo.language {
            spans.push(Span::styled(
                "  ● ",
                Style::default().fg(language_color(language)),
            ));
            spans.push(Span::styled(
                language.clone(),
                Style::default().fg(app.theme.muted),
            ));
        }
        spans.push(Span::styled(
            format!("  updated {}", format_relative(repo.updated_at)),
            Style::default().fg(app.theme.muted),
        ));

        frame.render_widget(
            Paragraph::new(Line::from(spans)),
            Rect::new(inner.x, y, inner.width, 1),
        );

        let desc_y = y + 1;
        if desc_y < inner.y + inner.height {
            if let Some(description) = &repo.description {
                let desc = truncate(description, inner.width.saturating_sub(5) as usize);
                frame.render_widget(
                    Paragraph::new(format!("    {}", desc))
                        .style(Style::default().fg(app.theme.muted)),
                    Rect::new(inner.x, desc_y, inner.width, 1),
                );
            }
        }
    }
}
