//! Audit action labels and the mutation diff classifier.
//!
//! [`classify`] maps an update payload plus the entity's prior state to a
//! semantic action label. The rules live in an ordered decision table: the
//! first row whose predicate matches wins, and its enricher may add
//! rule-specific detail fields. New action kinds are added by inserting a row
//! at the right priority, not by reordering branches.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Semantic label attached to every audit record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Created,
    Updated,
    StatusChanged,
    Assigned,
    Deleted,
    Commented,
}

impl Action {
    /// String form used in stored records and log output.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Updated => "updated",
            Self::StatusChanged => "status_changed",
            Self::Assigned => "assigned",
            Self::Deleted => "deleted",
            Self::Commented => "commented",
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row of the classification table.
struct Rule {
    action: Action,
    matches: fn(old: Option<&Value>, fields: &Map<String, Value>) -> bool,
    enrich: fn(old: Option<&Value>, details: &mut Map<String, Value>),
}

fn no_enrich(_old: Option<&Value>, _details: &mut Map<String, Value>) {}

/// Ordered by priority; the fallback row must stay last.
const RULES: &[Rule] = &[
    // No prior read was performed: the mutation is a creation.
    Rule {
        action: Action::Created,
        matches: |old, _fields| old.is_none(),
        enrich: no_enrich,
    },
    // The payload moves `status` to a different value.
    Rule {
        action: Action::StatusChanged,
        matches: |old, fields| match (old.and_then(|o| o.get("status")), fields.get("status")) {
            (Some(prev), Some(next)) => prev != next,
            _ => false,
        },
        enrich: |old, details| {
            if let Some(prev) = old.and_then(|o| o.get("status")) {
                details.insert("old_status".into(), prev.clone());
            }
        },
    },
    // The payload (re)assigns the entity.
    Rule {
        action: Action::Assigned,
        matches: |_old, fields| fields.contains_key("assigned_to"),
        enrich: no_enrich,
    },
    // Fallback.
    Rule {
        action: Action::Updated,
        matches: |_old, _fields| true,
        enrich: no_enrich,
    },
];

/// Classify a mutation and build its audit detail payload.
///
/// `old` is the entity's prior state when the caller performed a pre-read
/// (tasks), or the merged post-update row otherwise; `None` marks a creation.
/// A merged row compares equal to the payload, so the status rule cannot fire
/// for it. The returned details always carry the full changed field/value set
/// from `fields`, plus any rule-specific additions such as `old_status`.
///
/// `deleted` and `commented` are asserted directly by the calling operation
/// and never pass through this table.
pub fn classify(old: Option<&Value>, fields: &Map<String, Value>) -> (Action, Map<String, Value>) {
    let mut details = fields.clone();
    for rule in RULES {
        if (rule.matches)(old, fields) {
            (rule.enrich)(old, &mut details);
            return (rule.action, details);
        }
    }
    unreachable!("classification table has a fallback row")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fields(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn absent_prior_state_is_created() {
        let (action, details) = classify(None, &fields(json!({"title": "New task"})));
        assert_eq!(action, Action::Created);
        assert_eq!(details.get("title").unwrap(), "New task");
    }

    #[test]
    fn status_change_records_old_status() {
        let old = json!({"status": "TODO", "title": "t"});
        let (action, details) = classify(Some(&old), &fields(json!({"status": "DONE"})));
        assert_eq!(action, Action::StatusChanged);
        assert_eq!(details.get("old_status").unwrap(), "TODO");
        assert_eq!(details.get("status").unwrap(), "DONE");
    }

    #[test]
    fn unchanged_status_is_not_a_status_change() {
        let old = json!({"status": "TODO"});
        let (action, _) = classify(Some(&old), &fields(json!({"status": "TODO"})));
        assert_eq!(action, Action::Updated);
    }

    #[test]
    fn assignment_wins_over_plain_update() {
        let old = json!({"status": "TODO", "assigned_to": null});
        let (action, details) =
            classify(Some(&old), &fields(json!({"assigned_to": "Priya", "team": "QA"})));
        assert_eq!(action, Action::Assigned);
        assert_eq!(details.get("assigned_to").unwrap(), "Priya");
    }

    #[test]
    fn status_change_takes_priority_over_assignment() {
        let old = json!({"status": "TODO"});
        let (action, details) = classify(
            Some(&old),
            &fields(json!({"status": "IN_PROGRESS", "assigned_to": "Priya"})),
        );
        assert_eq!(action, Action::StatusChanged);
        assert_eq!(details.get("old_status").unwrap(), "TODO");
    }

    #[test]
    fn merged_row_rename_is_updated() {
        // Entities without a pre-read classify against the merged row, which
        // already equals the payload.
        let merged = json!({"name": "Renamed", "description": "d"});
        let (action, details) = classify(Some(&merged), &fields(json!({"name": "Renamed"})));
        assert_eq!(action, Action::Updated);
        assert_eq!(details.get("name").unwrap(), "Renamed");
    }

    #[test]
    fn any_other_field_is_updated() {
        let old = json!({"status": "TODO"});
        let (action, details) = classify(Some(&old), &fields(json!({"title": "Renamed"})));
        assert_eq!(action, Action::Updated);
        assert_eq!(details.get("title").unwrap(), "Renamed");
    }

    #[test]
    fn action_string_forms() {
        assert_eq!(Action::StatusChanged.as_str(), "status_changed");
        assert_eq!(serde_json::to_string(&Action::Commented).unwrap(), "\"commented\"");
    }
}
