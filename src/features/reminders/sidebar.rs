//! # Sidebar Badges
//!
//! Joins the resolution list with the due-reminder set so the sidebar can
//! flag overdue resolutions. Output order follows the resolution list.

use crate::api::{DueReminder, Resolution};
use std::collections::HashSet;

/// A sidebar row
#[derive(Debug, Clone, PartialEq)]
pub struct SidebarEntry<'a> {
    pub resolution: &'a Resolution,
    pub due: bool,
}

/// Ids present in both collections, looked up from the smaller side
pub fn due_ids(resolutions: &[Resolution], reminders: &[DueReminder]) -> HashSet<i64> {
    if reminders.len() <= resolutions.len() {
        let lookup: HashSet<i64> = reminders.iter().map(|r| r.resolution_id).collect();
        resolutions
            .iter()
            .map(|r| r.id)
            .filter(|id| lookup.contains(id))
            .collect()
    } else {
        let lookup: HashSet<i64> = resolutions.iter().map(|r| r.id).collect();
        reminders
            .iter()
            .map(|r| r.resolution_id)
            .filter(|id| lookup.contains(id))
            .collect()
    }
}

/// Mark each resolution that has a due reminder
pub fn annotate<'a>(
    resolutions: &'a [Resolution],
    reminders: &[DueReminder],
) -> Vec<SidebarEntry<'a>> {
    let due = due_ids(resolutions, reminders);
    resolutions
        .iter()
        .map(|resolution| SidebarEntry {
            resolution,
            due: due.contains(&resolution.id),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{Frequency, ResolutionStatus};

    fn resolution(id: i64) -> Resolution {
        Resolution {
            id,
            title: format!("Resolution {}", id),
            description: String::new(),
            category: None,
            priority: None,
            target_date: None,
            status: ResolutionStatus::Active,
            created_at: "2026-01-01T00:00:00".to_string(),
            updated_at: "2026-01-01T00:00:00".to_string(),
        }
    }

    fn due(id: i64) -> DueReminder {
        DueReminder {
            resolution_id: id,
            resolution_title: format!("Resolution {}", id),
            frequency: Frequency::Weekly,
            next_due: "2026-01-01".to_string(),
        }
    }

    #[test]
    fn test_marks_only_due_resolution() {
        let resolutions = vec![resolution(1), resolution(2)];
        let entries = annotate(&resolutions, &[due(2)]);

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].resolution.id, 1);
        assert!(!entries[0].due);
        assert_eq!(entries[1].resolution.id, 2);
        assert!(entries[1].due);
    }

    #[test]
    fn test_order_follows_resolution_list() {
        let resolutions = vec![resolution(5), resolution(3), resolution(9)];
        let entries = annotate(&resolutions, &[due(9), due(5)]);
        let ids: Vec<(i64, bool)> = entries.iter().map(|e| (e.resolution.id, e.due)).collect();
        assert_eq!(ids, vec![(5, true), (3, false), (9, true)]);
    }

    #[test]
    fn test_due_ids_ignores_unknown_resolutions() {
        let resolutions = vec![resolution(1)];
        let reminders = vec![due(1), due(7), due(8)];
        let ids = due_ids(&resolutions, &reminders);
        assert_eq!(ids, HashSet::from([1]));
    }

    #[test]
    fn test_empty_inputs() {
        assert!(annotate(&[], &[due(1)]).is_empty());
        let resolutions = vec![resolution(1)];
        assert!(!annotate(&resolutions, &[])[0].due);
    }
}
