//! # TUI Application Core
//!
//! Main application state and screen navigation. Input and API results are
//! turned into [`Request`]s, which the binary executes against the backend.

use crate::api::{
    CheckInCreate, DueReminder, Frequency, ReminderUpdate, Resolution, ResolutionCreate, ResolutionStatus,
};
use crate::core::format::truncate_text;
use crate::features::reminders::{annotate, BannerState, BannerView, DismissPolicy, ReminderSnapshot, SidebarEntry};
use crate::tui::event::{ApiEvent, KeyAction};
use crate::tui::state::{DashboardState, DetailState, FormState, FormSubmission};
use chrono::NaiveDate;
use log::{debug, warn};
use tokio::sync::watch;

/// Available screens in the TUI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Dashboard,
    Detail,
    Help,
}

impl Screen {
    pub fn title(&self) -> &'static str {
        match self {
            Screen::Dashboard => "Dashboard",
            Screen::Detail => "Resolution",
            Screen::Help => "Help",
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            Screen::Dashboard => "1",
            Screen::Detail => "Enter",
            Screen::Help => "?",
        }
    }

    pub fn all() -> &'static [Screen] {
        &[Screen::Dashboard, Screen::Detail, Screen::Help]
    }
}

/// Input mode for text entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Editing,
}

/// Backend work requested by the UI
#[derive(Debug, Clone, PartialEq)]
pub enum Request {
    LoadResolutions,
    LoadSummary,
    LoadDetail(i64),
    CreateResolution(ResolutionCreate),
    CreateCheckIn { resolution_id: i64, body: CheckInCreate },
    UpdateStatus { id: i64, status: ResolutionStatus },
    DeleteResolution(i64),
    SaveReminder { resolution_id: i64, body: ReminderUpdate },
    /// Poll due reminders now
    RefreshReminders,
}

/// Main application state
pub struct App {
    /// Current screen
    pub current_screen: Screen,
    /// Whether the app should quit
    pub should_quit: bool,
    /// Resolution list shown in the sidebar
    pub resolutions: Vec<Resolution>,
    /// Whether the sidebar list has loaded at least once
    pub resolutions_loaded: bool,
    /// Selected sidebar row
    pub sidebar_index: usize,
    /// Dashboard summary cache
    pub dashboard: DashboardState,
    /// Open resolution
    pub detail: DetailState,
    /// Reminder banner dismissal
    pub banner: BannerState,
    /// Banner entry the next `OpenDue` opens
    pub banner_cursor: usize,
    /// Due reminders published by the poller
    reminders: watch::Receiver<ReminderSnapshot>,
    /// Current input mode
    pub input_mode: InputMode,
    /// Active form, if any
    pub form: Option<FormState>,
    /// Error message to display
    pub error_message: Option<String>,
    /// Status message to display
    pub status_message: Option<String>,
    /// Activity log (recent events)
    pub activity_log: Vec<String>,
}

impl App {
    pub fn new(reminders: watch::Receiver<ReminderSnapshot>, dismiss_policy: DismissPolicy) -> Self {
        App {
            current_screen: Screen::Dashboard,
            should_quit: false,
            resolutions: Vec::new(),
            resolutions_loaded: false,
            sidebar_index: 0,
            dashboard: DashboardState::new(),
            detail: DetailState::new(),
            banner: BannerState::new(dismiss_policy),
            banner_cursor: 0,
            reminders,
            input_mode: InputMode::Normal,
            form: None,
            error_message: None,
            status_message: None,
            activity_log: Vec::new(),
        }
    }

    /// Requests issued when the UI first mounts
    pub fn startup_requests(&mut self) -> Vec<Request> {
        self.dashboard.start_refresh();
        vec![Request::LoadResolutions, Request::LoadSummary]
    }

    // ------------------------------------------------------------------------
    // Reminder projections
    // ------------------------------------------------------------------------

    /// Current due reminders
    pub fn due_reminders(&self) -> Vec<DueReminder> {
        self.reminders.borrow().reminders.clone()
    }

    /// When the reminder set was last refreshed
    pub fn reminders_polled_at(&self) -> Option<chrono::DateTime<chrono::Local>> {
        self.reminders.borrow().polled_at
    }

    /// Banner entry highlighted as the next one `o` opens
    pub fn banner_selection(&self, entries: usize) -> usize {
        if entries == 0 {
            0
        } else {
            self.banner_cursor % entries
        }
    }

    pub fn banner_view(&self, today: NaiveDate) -> Option<BannerView> {
        self.banner.view(&self.due_reminders(), today)
    }

    pub fn sidebar_entries<'a>(&'a self, reminders: &[DueReminder]) -> Vec<SidebarEntry<'a>> {
        annotate(&self.resolutions, reminders)
    }

    /// Pick up a new reminder snapshot; returns true if it changed
    pub fn sync_reminders(&mut self) -> bool {
        if !self.reminders.has_changed().unwrap_or(false) {
            return false;
        }
        let count = self.reminders.borrow_and_update().reminders.len();
        self.add_activity(format!("Reminders refreshed: {} due", count));
        true
    }

    // ------------------------------------------------------------------------
    // Navigation
    // ------------------------------------------------------------------------

    /// Switch screens; every route change reloads the sidebar list
    pub fn navigate(&mut self, screen: Screen) -> Vec<Request> {
        let mut requests = Vec::new();
        match screen {
            Screen::Detail => {
                if let Some(id) = self.detail.id {
                    self.current_screen = Screen::Detail;
                    requests.push(Request::LoadDetail(id));
                } else {
                    return requests;
                }
            }
            Screen::Dashboard => {
                self.current_screen = Screen::Dashboard;
                self.dashboard.start_refresh();
                requests.push(Request::LoadSummary);
            }
            Screen::Help => self.current_screen = Screen::Help,
        }
        self.input_mode = InputMode::Normal;
        self.form = None;
        requests.push(Request::LoadResolutions);
        requests
    }

    /// Open the detail screen for a resolution
    pub fn open_resolution(&mut self, id: i64) -> Vec<Request> {
        self.detail.open(id);
        if let Some(index) = self.resolutions.iter().position(|r| r.id == id) {
            self.sidebar_index = index;
        }
        self.navigate(Screen::Detail)
    }

    pub fn selected_resolution(&self) -> Option<&Resolution> {
        self.resolutions.get(self.sidebar_index)
    }

    /// Move selection up
    pub fn select_previous(&mut self) {
        if self.sidebar_index > 0 {
            self.sidebar_index -= 1;
        }
    }

    /// Move selection down
    pub fn select_next(&mut self) {
        if self.sidebar_index < self.resolutions.len().saturating_sub(1) {
            self.sidebar_index += 1;
        }
    }

    // ------------------------------------------------------------------------
    // Input
    // ------------------------------------------------------------------------

    /// Apply a key action, returning the backend work it needs
    pub fn handle_action(&mut self, action: KeyAction) -> Vec<Request> {
        if self.detail.confirm_delete && action != KeyAction::Confirm {
            self.detail.confirm_delete = false;
            self.status_message = Some("Delete cancelled".to_string());
            return Vec::new();
        }

        match action {
            KeyAction::None => Vec::new(),
            KeyAction::Quit => {
                self.should_quit = true;
                Vec::new()
            }
            KeyAction::SwitchScreen(screen) => {
                self.clear_messages();
                self.navigate(screen)
            }
            KeyAction::Up => {
                self.select_previous();
                Vec::new()
            }
            KeyAction::Down => {
                self.select_next();
                Vec::new()
            }
            KeyAction::Home => {
                self.sidebar_index = 0;
                Vec::new()
            }
            KeyAction::End => {
                self.sidebar_index = self.resolutions.len().saturating_sub(1);
                Vec::new()
            }
            KeyAction::Select => match self.selected_resolution().map(|r| r.id) {
                Some(id) => {
                    self.clear_messages();
                    self.open_resolution(id)
                }
                None => Vec::new(),
            },
            KeyAction::Back => match self.current_screen {
                Screen::Dashboard => Vec::new(),
                Screen::Detail | Screen::Help => self.navigate(Screen::Dashboard),
            },
            KeyAction::NewResolution => {
                let requests = if self.current_screen == Screen::Dashboard {
                    Vec::new()
                } else {
                    self.navigate(Screen::Dashboard)
                };
                self.start_form(FormState::new_resolution());
                requests
            }
            KeyAction::NewCheckIn => {
                if self.current_screen == Screen::Detail && self.detail.detail.is_some() {
                    if let Some(id) = self.detail.id {
                        self.start_form(FormState::check_in(id));
                    }
                }
                Vec::new()
            }
            KeyAction::SubmitInput => self.submit_form(),
            KeyAction::CancelInput => {
                self.form = None;
                self.input_mode = InputMode::Normal;
                Vec::new()
            }
            KeyAction::NextField => {
                if let Some(form) = self.form.as_mut() {
                    form.next_field();
                }
                Vec::new()
            }
            KeyAction::PrevField => {
                if let Some(form) = self.form.as_mut() {
                    form.prev_field();
                }
                Vec::new()
            }
            KeyAction::Char(c) => {
                if let Some(form) = self.form.as_mut() {
                    form.input_char(c);
                }
                Vec::new()
            }
            KeyAction::Backspace => {
                if let Some(form) = self.form.as_mut() {
                    form.backspace();
                }
                Vec::new()
            }
            KeyAction::Refresh => {
                let mut requests = vec![Request::RefreshReminders, Request::LoadResolutions];
                match self.current_screen {
                    Screen::Dashboard => {
                        self.dashboard.start_refresh();
                        requests.push(Request::LoadSummary);
                    }
                    Screen::Detail => {
                        if let Some(id) = self.detail.id {
                            requests.push(Request::LoadDetail(id));
                        }
                    }
                    Screen::Help => {}
                }
                self.status_message = Some("Refreshing...".to_string());
                requests
            }
            KeyAction::DismissBanner => {
                let due = self.due_reminders();
                self.banner.dismiss(&due);
                Vec::new()
            }
            KeyAction::OpenDue => {
                let due = self.due_reminders();
                if due.is_empty() {
                    return Vec::new();
                }
                let index = self.banner_cursor % due.len();
                self.banner_cursor = (index + 1) % due.len();
                self.open_resolution(due[index].resolution_id)
            }
            KeyAction::MarkComplete => {
                if self.current_screen == Screen::Detail && self.detail.can_complete() {
                    if let Some(id) = self.detail.id {
                        return vec![Request::UpdateStatus {
                            id,
                            status: ResolutionStatus::Completed,
                        }];
                    }
                }
                Vec::new()
            }
            KeyAction::Delete => {
                if self.current_screen == Screen::Detail && !self.detail.deleting {
                    if let Some(detail) = &self.detail.detail {
                        self.status_message = Some(format!(
                            "Delete \"{}\"? This cannot be undone. Press y to confirm, any other key to cancel",
                            truncate_text(&detail.resolution.title, 40)
                        ));
                        self.detail.confirm_delete = true;
                    }
                }
                Vec::new()
            }
            KeyAction::Confirm => {
                if !self.detail.confirm_delete {
                    return Vec::new();
                }
                self.detail.confirm_delete = false;
                match self.detail.id {
                    Some(id) => {
                        self.detail.deleting = true;
                        self.status_message = Some("Deleting...".to_string());
                        vec![Request::DeleteResolution(id)]
                    }
                    None => Vec::new(),
                }
            }
            KeyAction::CycleFrequency => {
                if self.current_screen == Screen::Detail {
                    self.detail.cycle_frequency();
                }
                Vec::new()
            }
            KeyAction::SaveReminder => {
                if self.current_screen != Screen::Detail
                    || self.detail.saving_reminder
                    || !Frequency::SELECTABLE.contains(&self.detail.frequency)
                {
                    return Vec::new();
                }
                match (self.detail.id, self.detail.detail.is_some()) {
                    (Some(id), true) => {
                        self.detail.saving_reminder = true;
                        vec![Request::SaveReminder {
                            resolution_id: id,
                            body: ReminderUpdate {
                                frequency: self.detail.frequency,
                                is_active: true,
                            },
                        }]
                    }
                    _ => Vec::new(),
                }
            }
            KeyAction::PageUp => {
                self.detail.scroll_up(5);
                Vec::new()
            }
            KeyAction::PageDown => {
                self.detail.scroll_down(5);
                Vec::new()
            }
        }
    }

    fn start_form(&mut self, form: FormState) {
        if self.form.as_ref().is_some_and(|f| f.submitting) {
            return;
        }
        self.form = Some(form);
        self.input_mode = InputMode::Editing;
        self.clear_messages();
    }

    /// Enter advances through fields; on the last field it submits
    fn submit_form(&mut self) -> Vec<Request> {
        let Some(form) = self.form.as_mut() else {
            return Vec::new();
        };
        if form.submitting {
            return Vec::new();
        }
        if !form.on_last_field() {
            form.next_field();
            return Vec::new();
        }

        match form.validate() {
            Ok(submission) => {
                form.submitting = true;
                self.input_mode = InputMode::Normal;
                self.error_message = None;
                match submission {
                    FormSubmission::Resolution(body) => vec![Request::CreateResolution(body)],
                    FormSubmission::CheckIn { resolution_id, body } => {
                        vec![Request::CreateCheckIn { resolution_id, body }]
                    }
                }
            }
            Err(message) => {
                self.error_message = Some(message);
                Vec::new()
            }
        }
    }

    /// Keep the form on screen after a failed submit so it can be retried
    fn resume_form(&mut self) {
        if let Some(form) = self.form.as_mut() {
            form.submitting = false;
            self.input_mode = InputMode::Editing;
        }
    }

    // ------------------------------------------------------------------------
    // API results
    // ------------------------------------------------------------------------

    /// Apply a finished API call, returning follow-up work
    pub fn handle_api_event(&mut self, event: ApiEvent) -> Vec<Request> {
        match event {
            ApiEvent::ResolutionsLoaded(Ok(resolutions)) => {
                self.resolutions = resolutions;
                self.resolutions_loaded = true;
                if self.sidebar_index >= self.resolutions.len() {
                    self.sidebar_index = self.resolutions.len().saturating_sub(1);
                }
                Vec::new()
            }
            ApiEvent::ResolutionsLoaded(Err(e)) => {
                debug!("Sidebar refresh failed: {}", e);
                Vec::new()
            }
            ApiEvent::SummaryLoaded(Ok(summary)) => {
                self.dashboard.set_summary(summary);
                Vec::new()
            }
            ApiEvent::SummaryLoaded(Err(e)) => {
                warn!("Dashboard summary failed: {}", e);
                self.dashboard.fail_refresh();
                Vec::new()
            }
            ApiEvent::DetailLoaded { id, result } => {
                if !self.detail.is_showing(id) {
                    debug!("Ignoring detail for {} (no longer open)", id);
                    return Vec::new();
                }
                match result {
                    Ok(detail) => {
                        self.detail.set_detail(detail);
                        Vec::new()
                    }
                    Err(e) => {
                        warn!("Failed to load resolution {}: {}", id, e);
                        self.detail.close();
                        self.error_message = Some("Could not load resolution".to_string());
                        self.navigate(Screen::Dashboard)
                    }
                }
            }
            ApiEvent::ResolutionCreated(Ok(resolution)) => {
                self.form = None;
                self.input_mode = InputMode::Normal;
                self.add_activity(format!("Created \"{}\"", resolution.title));
                self.status_message = Some(format!("Created \"{}\"", resolution.title));
                self.open_resolution(resolution.id)
            }
            ApiEvent::ResolutionCreated(Err(e)) => {
                warn!("Create resolution failed: {}", e);
                self.error_message = Some("Failed to create resolution. Please try again.".to_string());
                self.resume_form();
                Vec::new()
            }
            ApiEvent::CheckInCreated { id, result } => match result {
                Ok(check_in) => {
                    self.form = None;
                    self.input_mode = InputMode::Normal;
                    let sentiment = check_in.sentiment_category();
                    let badge = sentiment
                        .badge(check_in.sentiment_score)
                        .map(|b| format!(" ({})", b))
                        .unwrap_or_default();
                    self.status_message = Some(format!("Check-in saved{}", badge));
                    self.add_activity(format!("Check-in on #{}{}", id, badge));
                    if self.detail.is_showing(id) {
                        self.detail.push_check_in(check_in);
                    }
                    Vec::new()
                }
                Err(e) => {
                    warn!("Check-in for {} failed: {}", id, e);
                    self.error_message = Some("Failed to submit check-in. Please try again.".to_string());
                    self.resume_form();
                    Vec::new()
                }
            },
            ApiEvent::StatusUpdated { id, status, result } => match result {
                Ok(_) => {
                    if self.detail.is_showing(id) {
                        self.detail.set_status(status);
                    }
                    self.status_message = Some(format!("Marked {}", status.label()));
                    self.add_activity(format!("#{} marked {}", id, status.label()));
                    vec![Request::LoadResolutions]
                }
                Err(e) => {
                    warn!("Status update for {} failed: {}", id, e);
                    self.error_message = Some("Failed to update status".to_string());
                    Vec::new()
                }
            },
            ApiEvent::ResolutionDeleted { id, result } => match result {
                Ok(()) => {
                    self.resolutions.retain(|r| r.id != id);
                    self.add_activity(format!("Deleted #{}", id));
                    self.status_message = Some("Resolution deleted".to_string());
                    let mut requests = vec![Request::RefreshReminders];
                    if self.detail.is_showing(id) {
                        self.detail.close();
                        requests.extend(self.navigate(Screen::Dashboard));
                    }
                    requests
                }
                Err(e) => {
                    warn!("Delete of {} failed: {}", id, e);
                    self.detail.deleting = false;
                    self.error_message = Some("Failed to delete resolution".to_string());
                    Vec::new()
                }
            },
            ApiEvent::ReminderSaved { id, result } => match result {
                Ok(reminder) => {
                    self.status_message = Some(format!(
                        "Reminder set: {} (next due {})",
                        reminder.frequency,
                        crate::core::format::format_date(&reminder.next_due)
                    ));
                    if self.detail.is_showing(id) {
                        self.detail.set_reminder(reminder);
                    }
                    vec![Request::RefreshReminders]
                }
                Err(e) => {
                    warn!("Saving reminder for {} failed: {}", id, e);
                    self.detail.saving_reminder = false;
                    self.error_message = Some("Failed to save reminder".to_string());
                    Vec::new()
                }
            },
        }
    }

    // ------------------------------------------------------------------------
    // Messages
    // ------------------------------------------------------------------------

    /// Add an activity log entry
    pub fn add_activity(&mut self, msg: String) {
        let timestamp = chrono::Local::now().format("%H:%M:%S").to_string();
        self.activity_log.push(format!("[{}] {}", timestamp, msg));

        // Keep only last 100 entries
        if self.activity_log.len() > 100 {
            self.activity_log.remove(0);
        }
    }

    pub fn clear_messages(&mut self) {
        self.error_message = None;
        self.status_message = None;
    }
}
