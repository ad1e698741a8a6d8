//! # TUI UI Components
//!
//! Ratatui-based UI rendering for each screen. The sidebar and the reminder
//! banner are drawn around every screen.

mod banner;
mod dashboard;
mod detail;
mod help;
mod sidebar;

pub use banner::{render_banner, VISIBLE_ENTRIES};
pub use dashboard::render_dashboard;
pub use detail::render_detail;
pub use help::render_help;
pub use sidebar::render_sidebar;

use crate::api::ResolutionStatus;
use crate::features::reminders::BannerView;
use crate::features::sentiment::Tone;
use crate::tui::app::InputMode;
use crate::tui::{App, Screen};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph, Tabs};

const SIDEBAR_WIDTH: u16 = 28;

/// Main render function - dispatches to screen-specific renderers
pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Tab bar
            Constraint::Min(0),    // Sidebar + content
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    render_tabs(frame, app, chunks[0]);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(0)])
        .split(chunks[1]);

    let due = app.due_reminders();
    render_sidebar(frame, app, &due, body[0]);

    let today = chrono::Local::now().date_naive();
    let banner = app.banner_view(today);
    let content = layout_with_banner(banner.as_ref(), body[1]);
    if let (Some(view), Some(area)) = (banner.as_ref(), content.banner) {
        render_banner(frame, view, app.banner_selection(view.entries.len()), area);
    }

    match app.current_screen {
        Screen::Dashboard => render_dashboard(frame, app, content.main),
        Screen::Detail => render_detail(frame, app, content.main),
        Screen::Help => render_help(frame, app, content.main),
    }

    render_status_bar(frame, app, chunks[2]);
}

struct ContentAreas {
    banner: Option<Rect>,
    main: Rect,
}

fn layout_with_banner(view: Option<&BannerView>, area: Rect) -> ContentAreas {
    let Some(view) = view else {
        return ContentAreas { banner: None, main: area };
    };
    // Headline, visible entries, hint, borders
    let height = (view.entries.len().min(VISIBLE_ENTRIES) as u16) + 4;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(height), Constraint::Min(0)])
        .split(area);
    ContentAreas {
        banner: Some(chunks[0]),
        main: chunks[1],
    }
}

/// Render the tab bar
fn render_tabs(frame: &mut Frame, app: &App, area: Rect) {
    let titles: Vec<Line> = Screen::all()
        .iter()
        .map(|s| {
            let style = if *s == app.current_screen {
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            Line::from(format!("[{}] {}", s.key(), s.title())).style(style)
        })
        .collect();

    let tabs = Tabs::new(titles)
        .block(Block::default().borders(Borders::ALL).title(" Resolutions "))
        .select(Screen::all().iter().position(|s| *s == app.current_screen).unwrap_or(0))
        .style(Style::default().fg(Color::White))
        .highlight_style(Style::default().fg(Color::Yellow));

    frame.render_widget(tabs, area);
}

/// Render the status bar
fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let sync_status = match app.reminders_polled_at() {
        Some(at) => Span::styled(
            format!("● Reminders {}", at.format("%H:%M")),
            Style::default().fg(Color::Green),
        ),
        None => Span::styled("● Reminders pending", Style::default().fg(Color::Yellow)),
    };

    let mode_status = match app.input_mode {
        InputMode::Normal => Span::raw(""),
        InputMode::Editing => Span::styled(
            " [EDITING] ",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
    };

    let help_hint = Span::styled(" q:Quit ?:Help ", Style::default().fg(Color::DarkGray));

    // Error or status message
    let message = if let Some(err) = &app.error_message {
        Span::styled(format!(" Error: {} ", err), Style::default().fg(Color::Red))
    } else if let Some(status) = &app.status_message {
        Span::styled(format!(" {} ", status), Style::default().fg(Color::Green))
    } else {
        Span::raw("")
    };

    let status_line = Line::from(vec![
        sync_status,
        Span::raw(" | "),
        mode_status,
        message,
        Span::raw(" "),
        help_hint,
    ]);

    let paragraph = Paragraph::new(status_line).style(Style::default().bg(Color::DarkGray));

    frame.render_widget(paragraph, area);
}

/// Helper to create a block with title
pub fn titled_block(title: &str) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ", title))
}

pub fn tone_color(tone: Tone) -> Color {
    match tone {
        Tone::Good => Color::Green,
        Tone::Bad => Color::Red,
        Tone::Caution => Color::Yellow,
        Tone::Muted => Color::DarkGray,
    }
}

pub fn status_color(status: ResolutionStatus) -> Color {
    match status {
        ResolutionStatus::Active => Color::Cyan,
        ResolutionStatus::Completed => Color::Green,
        ResolutionStatus::Abandoned => Color::DarkGray,
        ResolutionStatus::Unknown => Color::Magenta,
    }
}
