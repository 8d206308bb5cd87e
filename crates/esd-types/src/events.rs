//! Logged status-change and safety-violation events.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::EventId;
use crate::safety::SafetyClassification;
use crate::status::{StatusField, StatusSnapshot};

/// The category of a logged event.
///
/// Each sensor field has its own change event; a reading that leaves the
/// station unsafe additionally produces a [`SafetyViolation`] event, so a
/// single reading can log up to four events.
///
/// [`SafetyViolation`]: EventType::SafetyViolation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventType {
    /// Operator presence flipped.
    OperatorStatusChange,
    /// Wrist strap continuity flipped.
    WristStrapStatusChange,
    /// Grounding continuity flipped.
    GroundingStatusChange,
    /// A reading left the station in a non-safe classification.
    SafetyViolation,
}

impl StatusField {
    /// The change-event category for this sensor field.
    pub const fn event_type(self) -> EventType {
        match self {
            Self::Operator => EventType::OperatorStatusChange,
            Self::WristStrap => EventType::WristStrapStatusChange,
            Self::Grounding => EventType::GroundingStatusChange,
        }
    }
}

/// A single immutable entry in the bounded alert history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// Unique event identifier (UUID v7, creation-ordered).
    pub id: EventId,
    /// The category of event.
    #[serde(rename = "type")]
    pub event_type: EventType,
    /// Type-specific payload serialized as JSON.
    pub details: serde_json::Value,
    /// Real-world timestamp when the event was created.
    pub timestamp: DateTime<Utc>,
    /// Status fields at the time of the event (alerts excluded).
    #[serde(rename = "esdStatus")]
    pub status_snapshot: StatusSnapshot,
}

impl Event {
    /// Build a `*_STATUS_CHANGE` event for one flipped sensor field.
    pub fn field_change(
        field: StatusField,
        previous: bool,
        current: bool,
        status_snapshot: StatusSnapshot,
    ) -> Self {
        Self {
            id: EventId::new(),
            event_type: field.event_type(),
            details: serde_json::json!({
                "previous": previous,
                "current": current,
            }),
            timestamp: Utc::now(),
            status_snapshot,
        }
    }

    /// Build a `SAFETY_VIOLATION` event carrying the classification and
    /// the three current sensor booleans.
    pub fn safety_violation(
        classification: SafetyClassification,
        status_snapshot: StatusSnapshot,
    ) -> Self {
        Self {
            id: EventId::new(),
            event_type: EventType::SafetyViolation,
            details: serde_json::json!({
                "safetyStatus": classification,
                "operatorPresent": status_snapshot.operator_present,
                "wristStrapConnected": status_snapshot.wrist_strap_connected,
                "properlyGrounded": status_snapshot.properly_grounded,
            }),
            timestamp: Utc::now(),
            status_snapshot,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot() -> StatusSnapshot {
        StatusSnapshot {
            operator_present: true,
            wrist_strap_connected: false,
            properly_grounded: true,
            last_update: None,
        }
    }

    #[test]
    fn field_change_carries_previous_and_current() {
        let event = Event::field_change(StatusField::WristStrap, true, false, snapshot());
        assert_eq!(event.event_type, EventType::WristStrapStatusChange);
        assert_eq!(event.details.get("previous"), Some(&serde_json::json!(true)));
        assert_eq!(event.details.get("current"), Some(&serde_json::json!(false)));
    }

    #[test]
    fn violation_carries_classification_and_booleans() {
        let event =
            Event::safety_violation(SafetyClassification::WristStrapNotConnected, snapshot());
        assert_eq!(event.event_type, EventType::SafetyViolation);
        assert_eq!(
            event.details.get("safetyStatus"),
            Some(&serde_json::json!("WRIST_STRAP_NOT_CONNECTED"))
        );
        assert_eq!(
            event.details.get("operatorPresent"),
            Some(&serde_json::json!(true))
        );
    }

    #[test]
    fn event_type_serializes_screaming_snake() {
        let json = serde_json::to_value(EventType::OperatorStatusChange).unwrap_or_default();
        assert_eq!(json, "OPERATOR_STATUS_CHANGE");
    }

    #[test]
    fn event_wire_keys_match_observers() {
        let event = Event::field_change(StatusField::Operator, false, true, snapshot());
        let json = serde_json::to_value(&event).unwrap_or_default();
        assert!(json.get("type").is_some());
        assert!(json.get("details").is_some());
        assert!(json.get("timestamp").is_some());
        assert!(json.get("esdStatus").is_some());
    }
}
