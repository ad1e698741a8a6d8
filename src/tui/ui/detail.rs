//! # Resolution Detail UI
//!
//! A single resolution: header, reminder settings, check-in form and the
//! check-in timeline.

use crate::api::{Frequency, ResolutionDetail};
use crate::core::format::format_date;
use crate::tui::state::FormKind;
use crate::tui::ui::dashboard::render_form;
use crate::tui::ui::{status_color, titled_block, tone_color};
use crate::tui::App;
use ratatui::prelude::*;
use ratatui::widgets::{Paragraph, Wrap};

/// Render the detail screen
pub fn render_detail(frame: &mut Frame, app: &App, area: Rect) {
    let Some(detail) = app.detail.detail.as_ref() else {
        let paragraph = Paragraph::new("Loading resolution...")
            .block(titled_block("Resolution"))
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(paragraph, area);
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(7), // Header
            Constraint::Min(0),    // Reminder/check-in + timeline
            Constraint::Length(1), // Actions
        ])
        .split(area);

    render_header(frame, detail, chunks[0]);

    let middle = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(chunks[1]);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(6), Constraint::Min(0)])
        .split(middle[0]);

    render_reminder_settings(frame, app, detail, left[0]);
    match app.form.as_ref() {
        Some(form) if matches!(form.kind, FormKind::CheckIn { .. }) => {
            render_form(frame, form, left[1])
        }
        _ => {
            let hint = Paragraph::new(Line::from(vec![
                Span::styled("i", Style::default().fg(Color::Cyan)),
                Span::raw("  Add a check-in"),
            ]))
            .block(titled_block("Check-in"));
            frame.render_widget(hint, left[1]);
        }
    }

    render_timeline(frame, app, detail, middle[1]);
    render_actions(frame, app, chunks[2]);
}

fn render_header(frame: &mut Frame, detail: &ResolutionDetail, area: Rect) {
    let resolution = &detail.resolution;
    let mut lines = vec![
        Line::from(vec![
            Span::styled(
                resolution.title.clone(),
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            ),
            Span::raw("  "),
            Span::styled(
                format!("[{}]", resolution.status.label()),
                Style::default().fg(status_color(resolution.status)),
            ),
        ]),
        Line::from(resolution.description.clone()),
    ];

    let mut tags = vec![];
    if let Some(category) = &resolution.category {
        tags.push(Span::styled(format!("#{} ", category), Style::default().fg(Color::Magenta)));
    }
    if let Some(priority) = resolution.priority {
        tags.push(Span::styled(format!("P{}", priority), Style::default().fg(Color::Yellow)));
    }
    lines.push(Line::from(tags));

    let mut dates = vec![
        Span::styled("Created: ", Style::default().fg(Color::DarkGray)),
        Span::raw(format_date(&resolution.created_at)),
    ];
    if let Some(target) = &resolution.target_date {
        dates.push(Span::styled("   Target: ", Style::default().fg(Color::DarkGray)));
        dates.push(Span::raw(format_date(target)));
    }
    lines.push(Line::from(dates));

    let paragraph = Paragraph::new(lines)
        .block(titled_block("Resolution"))
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}

fn render_reminder_settings(frame: &mut Frame, app: &App, detail: &ResolutionDetail, area: Rect) {
    let selected = app.detail.frequency;
    let options: Vec<Span> = Frequency::SELECTABLE
        .iter()
        .flat_map(|f| {
            let style = if *f == selected {
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            [Span::styled(f.label(), style), Span::raw(" ")]
        })
        .collect();

    let current = match &detail.reminder {
        Some(reminder) => {
            let mut spans = vec![
                Span::styled("Next due: ", Style::default().fg(Color::DarkGray)),
                Span::raw(format_date(&reminder.next_due)),
            ];
            if !reminder.is_active {
                spans.push(Span::styled(" (paused)", Style::default().fg(Color::Yellow)));
            }
            Line::from(spans)
        }
        None => Line::from(Span::styled("No reminder set", Style::default().fg(Color::DarkGray))),
    };

    let save = if app.detail.saving_reminder {
        "Saving..."
    } else {
        "f: frequency  s: save"
    };

    let lines = vec![
        Line::from(options),
        current,
        Line::from(Span::styled(save, Style::default().fg(Color::DarkGray))),
    ];

    let paragraph = Paragraph::new(lines).block(titled_block("Reminder"));
    frame.render_widget(paragraph, area);
}

fn render_timeline(frame: &mut Frame, app: &App, detail: &ResolutionDetail, area: Rect) {
    let timeline = detail.timeline();
    let title = format!("Check-ins ({})", timeline.len());

    if timeline.is_empty() {
        let paragraph = Paragraph::new("No check-ins yet. Add your first one!")
            .block(titled_block(&title))
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(paragraph, area);
        return;
    }

    let mut lines = vec![];
    for check_in in timeline.iter().skip(app.detail.timeline_scroll) {
        let sentiment = check_in.sentiment_category();
        let mut heading = vec![Span::styled(
            format_date(&check_in.created_at),
            Style::default().fg(Color::Cyan),
        )];
        if let Some(badge) = sentiment.badge(check_in.sentiment_score) {
            heading.push(Span::raw("  "));
            heading.push(Span::styled(
                badge,
                Style::default().fg(tone_color(sentiment.tone())),
            ));
        }
        lines.push(Line::from(heading));
        lines.push(Line::from(check_in.note.clone()));
        if let Some(feedback) = &check_in.ai_feedback {
            lines.push(Line::from(Span::styled(
                format!("Coach: {}", feedback),
                Style::default().fg(Color::Magenta),
            )));
        }
        lines.push(Line::from(""));
    }

    let paragraph = Paragraph::new(lines)
        .block(titled_block(&title))
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}

fn render_actions(frame: &mut Frame, app: &App, area: Rect) {
    let mut spans = vec![];
    if app.detail.can_complete() {
        spans.push(Span::styled("c", Style::default().fg(Color::Cyan)));
        spans.push(Span::raw(":Mark Complete  "));
    }
    let delete = if app.detail.deleting { ":Deleting...  " } else { ":Delete  " };
    spans.push(Span::styled("d", Style::default().fg(Color::Cyan)));
    spans.push(Span::raw(delete));
    spans.push(Span::styled("PgUp/PgDn", Style::default().fg(Color::Cyan)));
    spans.push(Span::raw(":Scroll  "));
    spans.push(Span::styled("Esc", Style::default().fg(Color::Cyan)));
    spans.push(Span::raw(":Back"));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
