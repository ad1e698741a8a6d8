//! # Reminder Banner UI
//!
//! Overdue reminder notice above the current screen. Entries are numbered and
//! `o` steps through them; the list scrolls to keep the next one visible.

use crate::core::format::pluralize;
use crate::features::reminders::BannerView;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};

/// Entry rows shown at once
pub const VISIBLE_ENTRIES: usize = 5;

/// First entry row shown so that `selected` stays in view
fn window_start(selected: usize, total: usize) -> usize {
    if total <= VISIBLE_ENTRIES {
        0
    } else {
        selected
            .saturating_sub(VISIBLE_ENTRIES - 1)
            .min(total - VISIBLE_ENTRIES)
    }
}

pub fn render_banner(frame: &mut Frame, view: &BannerView, selected: usize, area: Rect) {
    let mut lines = vec![Line::from(vec![
        Span::styled(
            format!("You have {}", view.headline),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ),
        Span::raw(". Time for a check-in!"),
    ])];

    let start = window_start(selected, view.entries.len());
    for (index, entry) in view
        .entries
        .iter()
        .enumerate()
        .skip(start)
        .take(VISIBLE_ENTRIES)
    {
        let overdue = match entry.days_overdue {
            Some(0) => "due today".to_string(),
            Some(days) => format!("{} overdue", pluralize(days as usize, "day")),
            None => "overdue".to_string(),
        };
        let (marker, title_style) = if index == selected {
            ("> ", Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        } else {
            ("  ", Style::default().fg(Color::White))
        };
        lines.push(Line::from(vec![
            Span::raw(marker),
            Span::styled(format!("{}. ", index + 1), Style::default().fg(Color::DarkGray)),
            Span::styled(entry.title.clone(), title_style),
            Span::styled(format!(" ({})", overdue), Style::default().fg(Color::DarkGray)),
        ]));
    }

    let position = if view.entries.len() > VISIBLE_ENTRIES {
        format!("   [{}/{}]", selected + 1, view.entries.len())
    } else {
        String::new()
    };
    lines.push(Line::from(Span::styled(
        format!("o: open next   x: dismiss{}", position),
        Style::default().fg(Color::DarkGray),
    )));

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow))
        .title(" Reminders ");
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_keeps_selection_visible() {
        assert_eq!(window_start(0, 3), 0);
        assert_eq!(window_start(4, 8), 0);
        assert_eq!(window_start(5, 8), 1);
        assert_eq!(window_start(7, 8), 3);
    }
}
