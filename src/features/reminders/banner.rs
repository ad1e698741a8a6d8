//! # Reminder Banner
//!
//! Projection of the due-reminder set into the overdue notice, plus the
//! session-local dismissal state.

use crate::api::DueReminder;
use crate::core::format::{days_overdue, pluralize};
use anyhow::anyhow;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// How a dismissal interacts with later poll results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DismissPolicy {
    /// Dismissal holds only while the set contents stay the same
    #[default]
    Contents,
    /// Dismissal hides the banner for the rest of the session
    Session,
}

impl FromStr for DismissPolicy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "contents" => Ok(DismissPolicy::Contents),
            "session" => Ok(DismissPolicy::Session),
            other => Err(anyhow!(
                "Unknown dismiss policy '{}' (expected 'contents' or 'session')",
                other
            )),
        }
    }
}

/// Identity of a reminder batch: sorted (resolution_id, next_due) pairs
type BatchKey = Vec<(i64, String)>;

fn batch_key(reminders: &[DueReminder]) -> BatchKey {
    let mut key: BatchKey = reminders
        .iter()
        .map(|r| (r.resolution_id, r.next_due.clone()))
        .collect();
    key.sort();
    key
}

/// One line of the banner, linking to a resolution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BannerEntry {
    pub resolution_id: i64,
    pub title: String,
    pub days_overdue: Option<i64>,
}

/// What the banner shows when visible
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BannerView {
    pub headline: String,
    pub entries: Vec<BannerEntry>,
}

/// Dismissal state for the banner
#[derive(Debug, Clone)]
pub struct BannerState {
    policy: DismissPolicy,
    dismissed: Option<BatchKey>,
}

impl BannerState {
    pub fn new(policy: DismissPolicy) -> Self {
        BannerState {
            policy,
            dismissed: None,
        }
    }

    pub fn policy(&self) -> DismissPolicy {
        self.policy
    }

    /// Dismiss the batch currently shown; no-op for an empty set
    pub fn dismiss(&mut self, reminders: &[DueReminder]) {
        if !reminders.is_empty() {
            self.dismissed = Some(batch_key(reminders));
        }
    }

    pub fn is_dismissed(&self, reminders: &[DueReminder]) -> bool {
        match (&self.dismissed, self.policy) {
            (None, _) => false,
            (Some(_), DismissPolicy::Session) => true,
            (Some(key), DismissPolicy::Contents) => *key == batch_key(reminders),
        }
    }

    /// Banner contents, or None when there is nothing to show
    pub fn view(&self, reminders: &[DueReminder], today: NaiveDate) -> Option<BannerView> {
        if reminders.is_empty() || self.is_dismissed(reminders) {
            return None;
        }
        Some(BannerView {
            headline: pluralize(reminders.len(), "overdue reminder"),
            entries: reminders
                .iter()
                .map(|r| BannerEntry {
                    resolution_id: r.resolution_id,
                    title: r.resolution_title.clone(),
                    days_overdue: days_overdue(&r.next_due, today),
                })
                .collect(),
        })
    }
}

impl Default for BannerState {
    fn default() -> Self {
        Self::new(DismissPolicy::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Frequency;

    fn due(id: i64, next_due: &str) -> DueReminder {
        DueReminder {
            resolution_id: id,
            resolution_title: format!("Resolution {}", id),
            frequency: Frequency::Weekly,
            next_due: next_due.to_string(),
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, 10).unwrap()
    }

    #[test]
    fn test_empty_set_renders_nothing() {
        let state = BannerState::default();
        assert_eq!(state.view(&[], today()), None);
    }

    #[test]
    fn test_headline_and_entries() {
        let state = BannerState::default();
        let one = state.view(&[due(1, "2026-01-08")], today()).unwrap();
        assert_eq!(one.headline, "1 overdue reminder");
        assert_eq!(one.entries[0].days_overdue, Some(2));

        let reminders = vec![due(3, "2026-01-09"), due(1, "bad")];
        let two = state.view(&reminders, today()).unwrap();
        assert_eq!(two.headline, "2 overdue reminders");
        let ids: Vec<i64> = two.entries.iter().map(|e| e.resolution_id).collect();
        assert_eq!(ids, vec![3, 1]);
        assert_eq!(two.entries[1].days_overdue, None);
    }

    #[test]
    fn test_session_policy_stays_hidden_after_new_data() {
        let mut state = BannerState::new(DismissPolicy::Session);
        let first = vec![due(1, "2026-01-08")];
        state.dismiss(&first);
        assert_eq!(state.view(&first, today()), None);

        let second = vec![due(1, "2026-01-08"), due(2, "2026-01-09")];
        assert_eq!(state.view(&second, today()), None);
    }

    #[test]
    fn test_contents_policy_hidden_for_identical_batch() {
        let mut state = BannerState::new(DismissPolicy::Contents);
        let batch = vec![due(1, "2026-01-08"), due(2, "2026-01-09")];
        state.dismiss(&batch);

        // Same contents in a different order from a later poll
        let repoll = vec![due(2, "2026-01-09"), due(1, "2026-01-08")];
        assert_eq!(state.view(&repoll, today()), None);
    }

    #[test]
    fn test_contents_policy_reappears_when_set_changes() {
        let mut state = BannerState::new(DismissPolicy::Contents);
        state.dismiss(&[due(1, "2026-01-08")]);

        let grown = vec![due(1, "2026-01-08"), due(2, "2026-01-09")];
        assert!(state.view(&grown, today()).is_some());

        let advanced = vec![due(1, "2026-01-09")];
        assert!(state.view(&advanced, today()).is_some());
    }

    #[test]
    fn test_dismissing_empty_set_is_noop() {
        let mut state = BannerState::new(DismissPolicy::Session);
        state.dismiss(&[]);
        assert!(state.view(&[due(1, "2026-01-08")], today()).is_some());
    }

    #[test]
    fn test_policy_from_str() {
        assert_eq!("contents".parse::<DismissPolicy>().unwrap(), DismissPolicy::Contents);
        assert_eq!("Session".parse::<DismissPolicy>().unwrap(), DismissPolicy::Session);
        assert!("forever".parse::<DismissPolicy>().is_err());
    }
}
