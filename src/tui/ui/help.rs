//! # Help UI
//!
//! Keybindings and usage help.

use crate::tui::ui::titled_block;
use crate::tui::App;
use ratatui::prelude::*;
use ratatui::widgets::{Paragraph, Wrap};

/// Render the help screen
pub fn render_help(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    render_keybindings(frame, chunks[0]);
    render_about(frame, app, chunks[1]);
}

fn render_keybindings(frame: &mut Frame, area: Rect) {
    let keybindings = vec![
        ("General", vec![
            ("q", "Quit application"),
            ("Ctrl+c", "Force quit"),
            ("?", "Show this help"),
            ("1", "Dashboard"),
            ("Esc", "Go back / Cancel"),
            ("r", "Refresh"),
        ]),
        ("Resolutions", vec![
            ("j / Down", "Move down"),
            ("k / Up", "Move up"),
            ("Enter", "Open selected"),
            ("g / G", "Top / bottom"),
            ("n", "New resolution"),
        ]),
        ("Detail", vec![
            ("i", "New check-in"),
            ("c", "Mark complete"),
            ("f / s", "Cycle / save reminder"),
            ("d, then y", "Delete"),
            ("PgUp/PgDn", "Scroll check-ins"),
        ]),
        ("Reminders", vec![
            ("o", "Open next overdue"),
            ("x", "Dismiss banner"),
        ]),
        ("Text Input", vec![
            ("Enter", "Next field / submit"),
            ("Tab", "Next field"),
            ("Esc", "Cancel input"),
        ]),
    ];

    let mut lines = vec![];

    for (section, bindings) in keybindings {
        lines.push(Line::from(vec![Span::styled(
            section,
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )]));

        for (key, desc) in bindings {
            lines.push(Line::from(vec![
                Span::styled(format!("  {:<15}", key), Style::default().fg(Color::Cyan)),
                Span::raw(desc),
            ]));
        }

        lines.push(Line::from(""));
    }

    let paragraph = Paragraph::new(lines)
        .block(titled_block("Keybindings"))
        .style(Style::default().fg(Color::White));

    frame.render_widget(paragraph, area);
}

fn render_about(frame: &mut Frame, app: &App, area: Rect) {
    let policy = match app.banner.policy() {
        crate::features::reminders::DismissPolicy::Contents => {
            "Dismissed reminders come back when the overdue set changes."
        }
        crate::features::reminders::DismissPolicy::Session => {
            "Dismissed reminders stay hidden until restart."
        }
    };

    let lines = vec![
        Line::from("Track New Year's resolutions, log check-ins and get"),
        Line::from("feedback on how each one is going."),
        Line::from(""),
        Line::from("Overdue reminders are checked in the background and"),
        Line::from("marked with a Due badge in the list."),
        Line::from(""),
        Line::from(Span::styled(policy, Style::default().fg(Color::DarkGray))),
    ];

    let paragraph = Paragraph::new(lines)
        .block(titled_block("About"))
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}
