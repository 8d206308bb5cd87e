//! The authoritative ESD workstation status record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::events::Event;

/// The mutable ESD status for the single monitored workstation.
///
/// Created once at process start with all booleans `false` and no history;
/// mutated for the lifetime of the process. Serializes with the
/// `camelCase` keys the dashboard and sensor firmware expect, alerts
/// included.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EsdStatus {
    /// Whether the IR sensor currently detects an operator.
    pub operator_present: bool,
    /// Whether the wrist strap touch sensor reads continuity.
    pub wrist_strap_connected: bool,
    /// Whether the grounding circuit reads continuity.
    pub properly_grounded: bool,
    /// When the most recent sensor reading was applied, if any.
    pub last_update: Option<DateTime<Utc>>,
    /// Bounded status-change history, most recent first (at most 50).
    pub alerts: Vec<Event>,
}

impl EsdStatus {
    /// Capture the boolean fields and last-update time as a snapshot.
    ///
    /// The snapshot excludes `alerts` so that events embedded in the log
    /// do not recursively carry the log itself.
    pub const fn snapshot(&self) -> StatusSnapshot {
        StatusSnapshot {
            operator_present: self.operator_present,
            wrist_strap_connected: self.wrist_strap_connected,
            properly_grounded: self.properly_grounded,
            last_update: self.last_update,
        }
    }
}

/// A point-in-time copy of the status fields, embedded in each [`Event`].
///
/// Deliberately excludes the alert history. The wire key on events is
/// `esdStatus`, matching what observers already consume.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusSnapshot {
    /// Operator presence at event creation time.
    pub operator_present: bool,
    /// Wrist strap continuity at event creation time.
    pub wrist_strap_connected: bool,
    /// Grounding continuity at event creation time.
    pub properly_grounded: bool,
    /// The `last_update` value at event creation time.
    pub last_update: Option<DateTime<Utc>>,
}

/// One of the three independently tracked sensor fields.
///
/// Returned by the status store to report which fields a reading changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusField {
    /// Operator presence (IR sensor).
    Operator,
    /// Wrist strap continuity (touch sensor).
    WristStrap,
    /// Grounding continuity.
    Grounding,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_status_is_empty_and_false() {
        let status = EsdStatus::default();
        assert!(!status.operator_present);
        assert!(!status.wrist_strap_connected);
        assert!(!status.properly_grounded);
        assert!(status.last_update.is_none());
        assert!(status.alerts.is_empty());
    }

    #[test]
    fn status_serializes_camel_case() {
        let json = serde_json::to_value(EsdStatus::default()).unwrap_or_default();
        assert!(json.get("operatorPresent").is_some());
        assert!(json.get("wristStrapConnected").is_some());
        assert!(json.get("properlyGrounded").is_some());
        assert!(json.get("lastUpdate").is_some());
        assert!(json.get("alerts").is_some());
    }

    #[test]
    fn snapshot_copies_fields_without_alerts() {
        let status = EsdStatus {
            operator_present: true,
            wrist_strap_connected: false,
            properly_grounded: true,
            last_update: Some(Utc::now()),
            alerts: Vec::new(),
        };
        let snap = status.snapshot();
        assert!(snap.operator_present);
        assert!(!snap.wrist_strap_connected);
        assert!(snap.properly_grounded);
        assert_eq!(snap.last_update, status.last_update);

        let json = serde_json::to_value(snap).unwrap_or_default();
        assert!(json.get("alerts").is_none());
    }
}
