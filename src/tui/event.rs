//! # TUI Event Handling
//!
//! Keyboard input, tick events and API results, merged into one channel.

use crate::api::{CheckIn, DashboardSummary, Reminder, Resolution, ResolutionDetail, ResolutionStatus};
use crossterm::event::{self, Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::time::Duration;
use tokio::sync::mpsc;

/// Result of a background API call, with the error already rendered to text
pub type Outcome<T> = Result<T, String>;

/// Completed API calls, delivered back to the UI loop
#[derive(Debug)]
pub enum ApiEvent {
    ResolutionsLoaded(Outcome<Vec<Resolution>>),
    SummaryLoaded(Outcome<DashboardSummary>),
    DetailLoaded {
        id: i64,
        result: Outcome<ResolutionDetail>,
    },
    ResolutionCreated(Outcome<Resolution>),
    CheckInCreated {
        id: i64,
        result: Outcome<CheckIn>,
    },
    StatusUpdated {
        id: i64,
        status: ResolutionStatus,
        result: Outcome<Resolution>,
    },
    ResolutionDeleted {
        id: i64,
        result: Outcome<()>,
    },
    ReminderSaved {
        id: i64,
        result: Outcome<Reminder>,
    },
}

/// TUI events
#[derive(Debug)]
pub enum Event {
    /// Keyboard input
    Key(KeyEvent),
    /// Terminal resize
    Resize(u16, u16),
    /// API call finished
    Api(ApiEvent),
    /// Tick for periodic updates
    Tick,
}

/// Event handler that combines keyboard, API and tick events
pub struct EventHandler {
    /// Event receiver
    rx: mpsc::UnboundedReceiver<Event>,
}

impl EventHandler {
    /// Create a new event handler; the sender is used to deliver API results
    pub fn new(tick_rate: Duration) -> (Self, mpsc::UnboundedSender<Event>) {
        let (tx, rx) = mpsc::unbounded_channel();

        // Spawn keyboard event handler
        let key_tx = tx.clone();
        std::thread::spawn(move || loop {
            if event::poll(tick_rate).unwrap_or(false) {
                match event::read() {
                    Ok(CrosstermEvent::Key(key)) if key.kind == KeyEventKind::Press => {
                        if key_tx.send(Event::Key(key)).is_err() {
                            break;
                        }
                    }
                    Ok(CrosstermEvent::Resize(w, h)) => {
                        if key_tx.send(Event::Resize(w, h)).is_err() {
                            break;
                        }
                    }
                    _ => {}
                }
            } else if key_tx.send(Event::Tick).is_err() {
                break;
            }
        });

        (EventHandler { rx }, tx)
    }

    /// Receive the next event
    pub async fn next(&mut self) -> Option<Event> {
        self.rx.recv().await
    }
}

/// Key action result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// No action
    None,
    /// Quit the application
    Quit,
    /// Switch to screen
    SwitchScreen(crate::tui::Screen),
    /// Move sidebar selection up
    Up,
    /// Move sidebar selection down
    Down,
    /// Open the selected resolution
    Select,
    /// Go back / Cancel
    Back,
    /// Start the new-resolution form
    NewResolution,
    /// Start the check-in form
    NewCheckIn,
    /// Submit the form or advance to its next field
    SubmitInput,
    /// Cancel text input
    CancelInput,
    /// Next form field
    NextField,
    /// Previous form field
    PrevField,
    /// Character input
    Char(char),
    /// Backspace
    Backspace,
    /// Refresh data and poll reminders now
    Refresh,
    /// Dismiss the reminder banner
    DismissBanner,
    /// Open the first overdue resolution
    OpenDue,
    /// Mark the open resolution complete
    MarkComplete,
    /// Ask to delete the open resolution
    Delete,
    /// Confirm a pending delete
    Confirm,
    /// Cycle reminder frequency
    CycleFrequency,
    /// Save reminder settings
    SaveReminder,
    /// Scroll the check-in timeline
    PageUp,
    PageDown,
    /// Jump to the first sidebar entry
    Home,
    /// Jump to the last sidebar entry
    End,
}

/// Map a key event to an action
pub fn map_key_event(key: KeyEvent, in_edit_mode: bool) -> KeyAction {
    if in_edit_mode {
        match key.code {
            KeyCode::Esc => KeyAction::CancelInput,
            KeyCode::Enter => KeyAction::SubmitInput,
            KeyCode::Tab => KeyAction::NextField,
            KeyCode::BackTab => KeyAction::PrevField,
            KeyCode::Backspace => KeyAction::Backspace,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                KeyAction::CancelInput
            }
            KeyCode::Char(c) => KeyAction::Char(c),
            _ => KeyAction::None,
        }
    } else {
        match (key.code, key.modifiers) {
            // Quit
            (KeyCode::Char('q'), KeyModifiers::NONE) => KeyAction::Quit,
            (KeyCode::Char('c'), KeyModifiers::CONTROL) => KeyAction::Quit,

            // Screen switching
            (KeyCode::Char('1'), KeyModifiers::NONE) => {
                KeyAction::SwitchScreen(crate::tui::Screen::Dashboard)
            }
            (KeyCode::Char('?'), _) => KeyAction::SwitchScreen(crate::tui::Screen::Help),

            // Navigation
            (KeyCode::Up, _) | (KeyCode::Char('k'), KeyModifiers::NONE) => KeyAction::Up,
            (KeyCode::Down, _) | (KeyCode::Char('j'), KeyModifiers::NONE) => KeyAction::Down,
            (KeyCode::Enter, _) => KeyAction::Select,
            (KeyCode::Esc, _) => KeyAction::Back,
            (KeyCode::PageUp, _) => KeyAction::PageUp,
            (KeyCode::PageDown, _) => KeyAction::PageDown,
            (KeyCode::Home, _) | (KeyCode::Char('g'), KeyModifiers::NONE) => KeyAction::Home,
            (KeyCode::End, _) | (KeyCode::Char('G'), KeyModifiers::SHIFT) => KeyAction::End,

            // Forms
            (KeyCode::Char('n'), KeyModifiers::NONE) => KeyAction::NewResolution,
            (KeyCode::Char('i'), KeyModifiers::NONE) => KeyAction::NewCheckIn,

            // Actions
            (KeyCode::Char('r'), KeyModifiers::NONE) => KeyAction::Refresh,
            (KeyCode::Char('x'), KeyModifiers::NONE) => KeyAction::DismissBanner,
            (KeyCode::Char('o'), KeyModifiers::NONE) => KeyAction::OpenDue,
            (KeyCode::Char('c'), KeyModifiers::NONE) => KeyAction::MarkComplete,
            (KeyCode::Char('d'), KeyModifiers::NONE) => KeyAction::Delete,
            (KeyCode::Char('y'), KeyModifiers::NONE) => KeyAction::Confirm,
            (KeyCode::Char('f'), KeyModifiers::NONE) => KeyAction::CycleFrequency,
            (KeyCode::Char('s'), KeyModifiers::NONE) => KeyAction::SaveReminder,

            _ => KeyAction::None,
        }
    }
}
