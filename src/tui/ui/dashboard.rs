//! # Dashboard UI
//!
//! Summary cards, sentiment breakdown, quick-add form and activity feed.

use crate::tui::state::{FormKind, FormState};
use crate::tui::ui::{titled_block, tone_color};
use crate::tui::App;
use ratatui::prelude::*;
use ratatui::widgets::{List, ListItem, Paragraph, Wrap};

/// Render the dashboard screen
pub fn render_dashboard(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Summary cards
            Constraint::Length(7), // Overdue + sentiment breakdown
            Constraint::Min(0),    // Quick add + activity
        ])
        .split(area);

    render_cards(frame, app, chunks[0]);
    render_breakdown(frame, app, chunks[1]);

    let bottom = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(chunks[2]);

    match app.form.as_ref() {
        Some(form) if form.kind == FormKind::NewResolution => render_form(frame, form, bottom[0]),
        _ => render_quick_add_hint(frame, bottom[0]),
    }
    render_activity_feed(frame, app, bottom[1]);
}

fn render_cards(frame: &mut Frame, app: &App, area: Rect) {
    let Some(cards) = app.dashboard.cards() else {
        let text = if app.dashboard.loading {
            "Loading summary..."
        } else {
            "Summary unavailable (r to retry)"
        };
        let paragraph = Paragraph::new(text)
            .block(titled_block("Summary"))
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(paragraph, area);
        return;
    };

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(vec![Constraint::Ratio(1, cards.len() as u32); cards.len()])
        .split(area);

    for ((title, value), column) in cards.into_iter().zip(columns.iter()) {
        let paragraph = Paragraph::new(Span::styled(
            value,
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ))
        .alignment(Alignment::Center)
        .block(titled_block(title));
        frame.render_widget(paragraph, *column);
    }
}

fn render_breakdown(frame: &mut Frame, app: &App, area: Rect) {
    let mut lines = vec![];

    if let Some(summary) = &app.dashboard.summary {
        let overdue_color = if summary.overdue_reminders > 0 {
            Color::Red
        } else {
            Color::Green
        };
        lines.push(Line::from(vec![
            Span::raw("Overdue reminders: "),
            Span::styled(
                summary.overdue_reminders.to_string(),
                Style::default().fg(overdue_color),
            ),
        ]));
        lines.push(Line::from(""));

        for (sentiment, count) in summary.breakdown_by_category() {
            lines.push(Line::from(vec![
                Span::styled(
                    format!("  {:<10}", sentiment.label()),
                    Style::default().fg(tone_color(sentiment.tone())),
                ),
                Span::raw(count.to_string()),
            ]));
        }
    }

    let paragraph = Paragraph::new(lines).block(titled_block("Sentiment"));
    frame.render_widget(paragraph, area);
}

fn render_quick_add_hint(frame: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from("Set a new goal for the year."),
        Line::from(""),
        Line::from(vec![
            Span::styled("n", Style::default().fg(Color::Cyan)),
            Span::raw("  New resolution"),
        ]),
    ];
    let paragraph = Paragraph::new(lines).block(titled_block("Quick Add"));
    frame.render_widget(paragraph, area);
}

/// Render a text-entry form; shared with the detail screen
pub fn render_form(frame: &mut Frame, form: &FormState, area: Rect) {
    let mut lines = vec![];

    for (i, field) in form.fields.iter().enumerate() {
        let focused = i == form.focus && !form.submitting;
        let label_style = if focused {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };
        let required = if field.required { "*" } else { "" };
        lines.push(Line::from(Span::styled(
            format!("{}{}", field.label, required),
            label_style,
        )));

        let value = if field.value.is_empty() {
            Span::styled(field.placeholder, Style::default().fg(Color::DarkGray))
        } else {
            Span::raw(field.value.clone())
        };
        let cursor = if focused { "_" } else { "" };
        lines.push(Line::from(vec![Span::raw("  "), value, Span::raw(cursor)]));
        lines.push(Line::from(""));
    }

    lines.push(Line::from(vec![
        Span::styled(
            format!("[{}]", form.submit_label()),
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            "  Enter: next/submit  Tab: field  Esc: cancel",
            Style::default().fg(Color::DarkGray),
        ),
    ]));

    let paragraph = Paragraph::new(lines)
        .block(titled_block(form.title()))
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

fn render_activity_feed(frame: &mut Frame, app: &App, area: Rect) {
    let items: Vec<ListItem> = app
        .activity_log
        .iter()
        .rev()
        .take(area.height.saturating_sub(2) as usize)
        .map(|entry| ListItem::new(entry.as_str()))
        .collect();

    let list = List::new(items)
        .block(titled_block("Activity"))
        .style(Style::default().fg(Color::White));

    frame.render_widget(list, area);
}
