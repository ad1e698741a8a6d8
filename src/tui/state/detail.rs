//! # Resolution Detail State
//!
//! The open resolution, its reminder settings selection and pending actions.

use crate::api::{CheckIn, Frequency, Reminder, ResolutionDetail, ResolutionStatus};

/// State for the resolution detail screen
pub struct DetailState {
    /// Id of the resolution being shown (set before the load completes)
    pub id: Option<i64>,
    pub detail: Option<ResolutionDetail>,
    pub loading: bool,
    /// Frequency selected in reminder settings (not yet saved)
    pub frequency: Frequency,
    pub saving_reminder: bool,
    /// Waiting for the user to confirm deletion
    pub confirm_delete: bool,
    pub deleting: bool,
    /// Scroll offset in the check-in timeline
    pub timeline_scroll: usize,
}

impl DetailState {
    pub fn new() -> Self {
        DetailState {
            id: None,
            detail: None,
            loading: false,
            frequency: Frequency::default(),
            saving_reminder: false,
            confirm_delete: false,
            deleting: false,
            timeline_scroll: 0,
        }
    }

    /// Begin showing resolution `id`, clearing state from the previous one
    pub fn open(&mut self, id: i64) {
        *self = DetailState::new();
        self.id = Some(id);
        self.loading = true;
    }

    /// Whether a load result for `id` still applies
    pub fn is_showing(&self, id: i64) -> bool {
        self.id == Some(id)
    }

    pub fn set_detail(&mut self, detail: ResolutionDetail) {
        self.frequency = selectable(detail.reminder.as_ref().map(|r| r.frequency));
        self.detail = Some(detail);
        self.loading = false;
    }

    pub fn close(&mut self) {
        *self = DetailState::new();
    }

    /// Append a newly created check-in
    pub fn push_check_in(&mut self, check_in: CheckIn) {
        if let Some(detail) = self.detail.as_mut() {
            detail.check_ins.push(check_in);
        }
    }

    pub fn set_reminder(&mut self, reminder: Reminder) {
        self.saving_reminder = false;
        self.frequency = selectable(Some(reminder.frequency));
        if let Some(detail) = self.detail.as_mut() {
            detail.reminder = Some(reminder);
        }
    }

    pub fn set_status(&mut self, status: ResolutionStatus) {
        if let Some(detail) = self.detail.as_mut() {
            detail.resolution.status = status;
        }
    }

    pub fn cycle_frequency(&mut self) {
        self.frequency = self.frequency.next();
    }

    /// "Mark Complete" is offered only for active resolutions
    pub fn can_complete(&self) -> bool {
        self.detail
            .as_ref()
            .map(|d| d.resolution.status == ResolutionStatus::Active)
            .unwrap_or(false)
    }

    pub fn scroll_up(&mut self, amount: usize) {
        self.timeline_scroll = self.timeline_scroll.saturating_sub(amount);
    }

    pub fn scroll_down(&mut self, amount: usize) {
        let max = self
            .detail
            .as_ref()
            .map(|d| d.check_ins.len().saturating_sub(1))
            .unwrap_or(0);
        self.timeline_scroll = (self.timeline_scroll + amount).min(max);
    }
}

/// Cadences the backend does not accept fall back to the default
fn selectable(frequency: Option<Frequency>) -> Frequency {
    match frequency {
        Some(f) if Frequency::SELECTABLE.contains(&f) => f,
        _ => Frequency::default(),
    }
}

impl Default for DetailState {
    fn default() -> Self {
        Self::new()
    }
}
