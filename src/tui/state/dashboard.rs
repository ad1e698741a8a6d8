//! # Dashboard State
//!
//! Cached dashboard summary with refresh tracking.

use crate::api::DashboardSummary;

/// Summary cache
pub struct DashboardState {
    pub summary: Option<DashboardSummary>,
    pub loading: bool,
}

impl DashboardState {
    pub fn new() -> Self {
        DashboardState {
            summary: None,
            loading: false,
        }
    }

    /// Mark refresh as started
    pub fn start_refresh(&mut self) {
        self.loading = true;
    }

    /// Store a fresh summary
    pub fn set_summary(&mut self, summary: DashboardSummary) {
        self.summary = Some(summary);
        self.loading = false;
    }

    /// Stop the loading indicator, keeping whatever was cached
    pub fn fail_refresh(&mut self) {
        self.loading = false;
    }

    /// Cards shown at the top of the dashboard: (title, value)
    pub fn cards(&self) -> Option<Vec<(&'static str, String)>> {
        let summary = self.summary.as_ref()?;
        Some(vec![
            ("Active", summary.active_resolutions.to_string()),
            ("Completed", summary.completed_resolutions.to_string()),
            ("Check-ins", summary.total_check_ins.to_string()),
            ("Avg Sentiment", summary.average_sentiment_label()),
        ])
    }
}

impl Default for DashboardState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_cards() {
        let mut state = DashboardState::new();
        assert!(state.cards().is_none());

        state.start_refresh();
        state.set_summary(DashboardSummary {
            total_resolutions: 4,
            active_resolutions: 3,
            completed_resolutions: 1,
            abandoned_resolutions: 0,
            total_check_ins: 12,
            average_sentiment_score: Some(0.3333),
            overdue_reminders: 2,
            sentiment_breakdown: HashMap::new(),
        });

        assert!(!state.loading);
        let cards = state.cards().unwrap();
        assert_eq!(cards[0], ("Active", "3".to_string()));
        assert_eq!(cards[2], ("Check-ins", "12".to_string()));
        assert_eq!(cards[3], ("Avg Sentiment", "0.33".to_string()));
    }
}
