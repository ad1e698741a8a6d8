//! # Sidebar UI
//!
//! Resolution list with due badges, shown beside every screen.

use crate::api::DueReminder;
use crate::core::format::truncate_text;
use crate::tui::ui::titled_block;
use crate::tui::{App, Screen};
use ratatui::prelude::*;
use ratatui::widgets::{List, ListItem, ListState, Paragraph};

const DUE_BADGE: &str = " Due";

pub fn render_sidebar(frame: &mut Frame, app: &App, due: &[DueReminder], area: Rect) {
    let block = titled_block("Resolutions");

    if app.resolutions.is_empty() {
        let text = if app.resolutions_loaded {
            "No resolutions yet"
        } else {
            "Loading..."
        };
        let paragraph = Paragraph::new(text)
            .block(block)
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(paragraph, area);
        return;
    }

    // Borders, highlight symbol and badge
    let title_width = (area.width as usize).saturating_sub(4 + DUE_BADGE.len());
    let open_id = match app.current_screen {
        Screen::Detail => app.detail.id,
        _ => None,
    };

    let items: Vec<ListItem> = app
        .sidebar_entries(due)
        .into_iter()
        .map(|entry| {
            let title_style = if open_id == Some(entry.resolution.id) {
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            let mut spans = vec![Span::styled(
                truncate_text(&entry.resolution.title, title_width),
                title_style,
            )];
            if entry.due {
                spans.push(Span::styled(
                    DUE_BADGE,
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                ));
            }
            ListItem::new(Line::from(spans))
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");

    let mut state = ListState::default().with_selected(Some(app.sidebar_index));
    frame.render_stateful_widget(list, area, &mut state);
}
