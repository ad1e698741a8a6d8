//! # API Types
//!
//! Wire types for the resolutions backend. Field names follow the JSON the
//! backend emits.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use crate::features::sentiment::Sentiment;

// ============================================================================
// Enumerations
// ============================================================================

/// Reminder cadence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Daily,
    #[default]
    Weekly,
    Biweekly,
    Monthly,
    /// Cadence this client does not know about
    #[serde(other)]
    Unknown,
}

impl Frequency {
    /// Cadences offered in reminder settings, in cycling order
    pub const SELECTABLE: [Frequency; 4] = [
        Frequency::Daily,
        Frequency::Weekly,
        Frequency::Biweekly,
        Frequency::Monthly,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Frequency::Daily => "Daily",
            Frequency::Weekly => "Weekly",
            Frequency::Biweekly => "Biweekly",
            Frequency::Monthly => "Monthly",
            Frequency::Unknown => "Unknown",
        }
    }

    /// Next selectable cadence (Unknown restarts at Daily)
    pub fn next(&self) -> Self {
        match self {
            Frequency::Daily => Frequency::Weekly,
            Frequency::Weekly => Frequency::Biweekly,
            Frequency::Biweekly => Frequency::Monthly,
            Frequency::Monthly | Frequency::Unknown => Frequency::Daily,
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Resolution lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResolutionStatus {
    #[default]
    Active,
    Completed,
    Abandoned,
    #[serde(other)]
    Unknown,
}

impl ResolutionStatus {
    pub fn label(&self) -> &'static str {
        match self {
            ResolutionStatus::Active => "active",
            ResolutionStatus::Completed => "completed",
            ResolutionStatus::Abandoned => "abandoned",
            ResolutionStatus::Unknown => "unknown",
        }
    }
}

// ============================================================================
// Resolutions
// ============================================================================

/// Resolution summary as returned by list/create/update
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resolution {
    pub id: i64,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub priority: Option<i64>,
    #[serde(default)]
    pub target_date: Option<String>,
    pub status: ResolutionStatus,
    pub created_at: String,
    pub updated_at: String,
}

/// Resolution with its check-ins and reminder
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolutionDetail {
    #[serde(flatten)]
    pub resolution: Resolution,
    #[serde(default)]
    pub check_ins: Vec<CheckIn>,
    #[serde(default)]
    pub reminder: Option<Reminder>,
}

impl ResolutionDetail {
    /// Check-ins ordered newest first
    pub fn timeline(&self) -> Vec<&CheckIn> {
        let mut sorted: Vec<&CheckIn> = self.check_ins.iter().collect();
        sorted.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        sorted
    }
}

/// Body of `POST /api/resolutions`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolutionCreate {
    pub title: String,
    pub description: String,
    pub target_date: Option<String>,
}

/// Body of `PUT /api/resolutions/{id}`; unset fields are left untouched
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ResolutionUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ResolutionStatus>,
}

// ============================================================================
// Check-ins
// ============================================================================

/// A progress note, optionally annotated by the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckIn {
    pub id: i64,
    pub resolution_id: i64,
    pub note: String,
    #[serde(default)]
    pub sentiment: Option<String>,
    #[serde(default)]
    pub sentiment_score: Option<f64>,
    #[serde(default)]
    pub ai_feedback: Option<String>,
    pub created_at: String,
}

impl CheckIn {
    pub fn sentiment_category(&self) -> Sentiment {
        Sentiment::classify(self.sentiment.as_deref())
    }
}

/// Body of `POST /api/resolutions/{id}/check-ins`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CheckInCreate {
    pub note: String,
}

// ============================================================================
// Reminders
// ============================================================================

/// Per-resolution reminder configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reminder {
    pub id: i64,
    pub resolution_id: i64,
    pub frequency: Frequency,
    pub next_due: String,
    pub is_active: bool,
}

/// Body of `PUT /api/resolutions/{id}/reminder`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReminderUpdate {
    pub frequency: Frequency,
    pub is_active: bool,
}

/// A reminder whose next-due date has passed
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DueReminder {
    pub resolution_id: i64,
    pub resolution_title: String,
    pub frequency: Frequency,
    pub next_due: String,
}

// ============================================================================
// Dashboard
// ============================================================================

/// Aggregate statistics for the dashboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardSummary {
    pub total_resolutions: u64,
    pub active_resolutions: u64,
    pub completed_resolutions: u64,
    pub abandoned_resolutions: u64,
    pub total_check_ins: u64,
    #[serde(default)]
    pub average_sentiment_score: Option<f64>,
    pub overdue_reminders: u64,
    #[serde(default)]
    pub sentiment_breakdown: HashMap<String, u64>,
}

impl DashboardSummary {
    /// Average sentiment to two decimals, or "N/A"
    pub fn average_sentiment_label(&self) -> String {
        match self.average_sentiment_score {
            Some(score) => format!("{:.2}", score),
            None => "N/A".to_string(),
        }
    }

    /// Breakdown counts grouped by sentiment category, in display order
    pub fn breakdown_by_category(&self) -> Vec<(Sentiment, u64)> {
        let mut counts: HashMap<Sentiment, u64> = HashMap::new();
        for (label, count) in &self.sentiment_breakdown {
            *counts.entry(Sentiment::classify(Some(label))).or_insert(0) += count;
        }
        Sentiment::ALL
            .iter()
            .filter_map(|s| counts.get(s).map(|c| (*s, *c)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check_in(id: i64, created_at: &str) -> CheckIn {
        CheckIn {
            id,
            resolution_id: 1,
            note: format!("note {}", id),
            sentiment: None,
            sentiment_score: None,
            ai_feedback: None,
            created_at: created_at.to_string(),
        }
    }

    #[test]
    fn test_due_reminder_decodes_backend_json() {
        let json = r#"[{"resolution_id":2,"resolution_title":"Read 12 books","frequency":"biweekly","next_due":"2026-01-10"}]"#;
        let due: Vec<DueReminder> = serde_json::from_str(json).unwrap();

        assert_eq!(due.len(), 1);
        assert_eq!(due[0].resolution_id, 2);
        assert_eq!(due[0].frequency, Frequency::Biweekly);
        assert_eq!(due[0].next_due, "2026-01-10");
    }

    #[test]
    fn test_unknown_frequency_does_not_fail_decode() {
        let json = r#"{"resolution_id":1,"resolution_title":"x","frequency":"hourly","next_due":"2026-01-10"}"#;
        let due: DueReminder = serde_json::from_str(json).unwrap();
        assert_eq!(due.frequency, Frequency::Unknown);
    }

    #[test]
    fn test_frequency_cycle_wraps() {
        let mut f = Frequency::Daily;
        for expected in [Frequency::Weekly, Frequency::Biweekly, Frequency::Monthly, Frequency::Daily] {
            f = f.next();
            assert_eq!(f, expected);
        }
        assert_eq!(Frequency::Unknown.next(), Frequency::Daily);
    }

    #[test]
    fn test_resolution_detail_flattens_summary() {
        let json = r#"{
            "id": 7, "title": "Run 5k", "description": "Couch to 5k",
            "category": "health", "priority": 2, "target_date": null,
            "status": "active", "created_at": "2026-01-01T10:00:00",
            "updated_at": "2026-01-02T10:00:00",
            "check_ins": [],
            "reminder": {"id": 3, "resolution_id": 7, "frequency": "daily", "next_due": "2026-01-03", "is_active": true}
        }"#;
        let detail: ResolutionDetail = serde_json::from_str(json).unwrap();

        assert_eq!(detail.resolution.id, 7);
        assert_eq!(detail.resolution.category.as_deref(), Some("health"));
        assert_eq!(detail.resolution.status, ResolutionStatus::Active);
        assert_eq!(detail.reminder.unwrap().frequency, Frequency::Daily);
    }

    #[test]
    fn test_update_skips_unset_fields() {
        let update = ResolutionUpdate {
            status: Some(ResolutionStatus::Completed),
            ..Default::default()
        };
        let json = serde_json::to_string(&update).unwrap();
        assert_eq!(json, r#"{"status":"completed"}"#);
    }

    #[test]
    fn test_reminder_update_serialization() {
        let body = ReminderUpdate {
            frequency: Frequency::Monthly,
            is_active: true,
        };
        let json = serde_json::to_string(&body).unwrap();
        assert_eq!(json, r#"{"frequency":"monthly","is_active":true}"#);
    }

    #[test]
    fn test_timeline_newest_first() {
        let detail = ResolutionDetail {
            resolution: Resolution {
                id: 1,
                title: "t".to_string(),
                description: "d".to_string(),
                category: None,
                priority: None,
                target_date: None,
                status: ResolutionStatus::Active,
                created_at: "2026-01-01T00:00:00".to_string(),
                updated_at: "2026-01-01T00:00:00".to_string(),
            },
            check_ins: vec![
                check_in(1, "2026-01-02T09:00:00"),
                check_in(2, "2026-01-05T09:00:00"),
                check_in(3, "2026-01-03T09:00:00"),
            ],
            reminder: None,
        };

        let ids: Vec<i64> = detail.timeline().iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![2, 3, 1]);
    }

    #[test]
    fn test_summary_labels() {
        let mut summary: DashboardSummary = serde_json::from_str(
            r#"{"total_resolutions":3,"active_resolutions":2,"completed_resolutions":1,
                "abandoned_resolutions":0,"total_check_ins":5,"average_sentiment_score":null,
                "overdue_reminders":1}"#,
        )
        .unwrap();
        assert_eq!(summary.average_sentiment_label(), "N/A");
        assert!(summary.sentiment_breakdown.is_empty());

        summary.average_sentiment_score = Some(0.456);
        assert_eq!(summary.average_sentiment_label(), "0.46");
    }

    #[test]
    fn test_breakdown_by_category_orders_and_folds_unknown() {
        let mut summary: DashboardSummary = serde_json::from_str(
            r#"{"total_resolutions":0,"active_resolutions":0,"completed_resolutions":0,
                "abandoned_resolutions":0,"total_check_ins":0,"overdue_reminders":0,
                "sentiment_breakdown":{"neutral":2,"positive":4}}"#,
        )
        .unwrap();
        summary.sentiment_breakdown.insert("mixed".to_string(), 1);

        let breakdown = summary.breakdown_by_category();
        assert_eq!(
            breakdown,
            vec![(Sentiment::Positive, 4), (Sentiment::Neutral, 2), (Sentiment::Absent, 1)]
        );
    }
}
