//! The authoritative, internally synchronized status store.

use chrono::Utc;
use esd_types::{EsdStatus, Event, SafetyClassification, StatusField, StatusSnapshot};
use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::classify::classify;
use crate::event_log::EventLog;

/// Fields guarded together so a reading is applied atomically.
///
/// The booleans and the event log live under one lock: a reader can never
/// observe a status whose fields are updated but whose change events have
/// not yet been appended.
#[derive(Debug, Default)]
struct StoreInner {
    /// Whether the IR sensor currently detects an operator.
    operator_present: bool,
    /// Whether the wrist strap touch sensor reads continuity.
    wrist_strap_connected: bool,
    /// Whether the grounding circuit reads continuity.
    properly_grounded: bool,
    /// When the most recent reading was applied, if any.
    last_update: Option<chrono::DateTime<Utc>>,
    /// Bounded history of change and violation events.
    log: EventLog,
}

impl StoreInner {
    /// The full status record including a copy of the alert history.
    fn status(&self) -> EsdStatus {
        EsdStatus {
            operator_present: self.operator_present,
            wrist_strap_connected: self.wrist_strap_connected,
            properly_grounded: self.properly_grounded,
            last_update: self.last_update,
            alerts: self.log.snapshot(),
        }
    }

    /// The status fields as a snapshot, without copying the log.
    const fn snapshot(&self) -> StatusSnapshot {
        StatusSnapshot {
            operator_present: self.operator_present,
            wrist_strap_connected: self.wrist_strap_connected,
            properly_grounded: self.properly_grounded,
            last_update: self.last_update,
        }
    }

    /// Classification recomputed from the current fields.
    const fn classification(&self) -> SafetyClassification {
        classify(
            self.operator_present,
            self.wrist_strap_connected,
            self.properly_grounded,
        )
    }
}

/// The result of applying one sensor reading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadingOutcome {
    /// Classification of the status after the reading was applied.
    pub classification: SafetyClassification,
    /// The fields whose value differed from the previous reading.
    pub changed: Vec<StatusField>,
}

/// The single mutable ESD status record for the process.
///
/// Constructed once at startup with all booleans `false` and an empty
/// history, then shared by reference with every component that needs it.
/// All mutation goes through internally synchronized methods.
#[derive(Debug, Default)]
pub struct StatusStore {
    /// Status fields plus event log under one lock.
    inner: RwLock<StoreInner>,
}

impl StatusStore {
    /// Create a store with all booleans `false` and no history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one sensor reading.
    ///
    /// Captures the previous field values, assigns the new ones, stamps
    /// `last_update`, appends one change event per flipped field, then
    /// classifies the new status and appends a violation event when the
    /// classification is not `SAFE`. Up to four events per reading.
    ///
    /// Returns the classification and the set of changed fields. Callers
    /// broadcast on every reading regardless of whether anything changed;
    /// observers rely on the update as a heartbeat.
    pub async fn apply_reading(
        &self,
        operator_present: bool,
        wrist_strap_connected: bool,
        properly_grounded: bool,
    ) -> ReadingOutcome {
        let mut inner = self.inner.write().await;

        let previous = [
            inner.operator_present,
            inner.wrist_strap_connected,
            inner.properly_grounded,
        ];

        inner.operator_present = operator_present;
        inner.wrist_strap_connected = wrist_strap_connected;
        inner.properly_grounded = properly_grounded;
        inner.last_update = Some(Utc::now());

        let snapshot = inner.snapshot();
        let current = [operator_present, wrist_strap_connected, properly_grounded];
        let fields = [
            StatusField::Operator,
            StatusField::WristStrap,
            StatusField::Grounding,
        ];

        let mut changed = Vec::new();
        for ((field, prev), curr) in fields.iter().zip(previous).zip(current) {
            if prev != curr {
                changed.push(*field);
                let event = Event::field_change(*field, prev, curr, snapshot);
                info!(event_type = ?event.event_type, previous = prev, current = curr, "ESD event");
                inner.log.append(event);
            }
        }

        let classification = inner.classification();
        if !classification.is_safe() {
            warn!(%classification, "ESD safety violation");
            inner
                .log
                .append(Event::safety_violation(classification, snapshot));
        }

        ReadingOutcome {
            classification,
            changed,
        }
    }

    /// A defensive copy of the current status, alerts included.
    pub async fn status(&self) -> EsdStatus {
        self.inner.read().await.status()
    }

    /// The classification recomputed from the current fields.
    pub async fn classification(&self) -> SafetyClassification {
        self.inner.read().await.classification()
    }

    /// Status and classification read under a single lock acquisition,
    /// so the pair is always mutually consistent.
    pub async fn status_and_classification(&self) -> (EsdStatus, SafetyClassification) {
        let inner = self.inner.read().await;
        (inner.status(), inner.classification())
    }

    /// A defensive copy of the alert history, newest first.
    pub async fn alerts(&self) -> Vec<Event> {
        self.inner.read().await.log.snapshot()
    }

    /// Clear the alert history.
    pub async fn clear_alerts(&self) {
        self.inner.write().await.log.clear();
    }
}

#[cfg(test)]
mod tests {
    use esd_types::EventType;

    use super::*;

    #[tokio::test]
    async fn initial_reading_all_true_logs_three_changes_no_violation() {
        let store = StatusStore::new();
        let outcome = store.apply_reading(true, true, true).await;

        assert_eq!(outcome.classification, SafetyClassification::Safe);
        assert_eq!(outcome.changed.len(), 3);

        let alerts = store.alerts().await;
        assert_eq!(alerts.len(), 3);
        assert!(
            alerts
                .iter()
                .all(|e| e.event_type != EventType::SafetyViolation)
        );
    }

    #[tokio::test]
    async fn operator_loss_logs_one_change_and_one_violation() {
        let store = StatusStore::new();
        store.apply_reading(true, true, true).await;
        store.clear_alerts().await;

        let outcome = store.apply_reading(false, true, true).await;
        assert_eq!(outcome.classification, SafetyClassification::NoOperator);
        assert_eq!(outcome.changed, vec![StatusField::Operator]);

        let alerts = store.alerts().await;
        assert_eq!(alerts.len(), 2);
        // Violation is appended after the change event, so it sits at the
        // head of the newest-first log.
        assert_eq!(
            alerts.first().map(|e| e.event_type),
            Some(EventType::SafetyViolation)
        );
        assert_eq!(
            alerts.get(1).map(|e| e.event_type),
            Some(EventType::OperatorStatusChange)
        );
    }

    #[tokio::test]
    async fn repeated_reading_logs_no_new_events() {
        let store = StatusStore::new();
        store.apply_reading(true, true, true).await;
        let before = store.alerts().await.len();

        let outcome = store.apply_reading(true, true, true).await;
        assert!(outcome.changed.is_empty());
        assert_eq!(outcome.classification, SafetyClassification::Safe);
        assert_eq!(store.alerts().await.len(), before);
    }

    #[tokio::test]
    async fn unsafe_reading_with_no_change_still_logs_violation() {
        let store = StatusStore::new();
        store.apply_reading(false, false, false).await;
        let before = store.alerts().await.len();

        // Same values again: no change events, but the station is still
        // unsafe, so each reading logs a fresh violation.
        let outcome = store.apply_reading(false, false, false).await;
        assert!(outcome.changed.is_empty());
        assert_eq!(
            store.alerts().await.len(),
            before.saturating_add(1)
        );
        assert_eq!(outcome.classification, SafetyClassification::NoOperator);
    }

    #[tokio::test]
    async fn clear_then_transition_repopulates_from_one() {
        let store = StatusStore::new();
        store.apply_reading(true, true, true).await;
        store.clear_alerts().await;
        assert!(store.alerts().await.is_empty());

        store.apply_reading(true, false, true).await;
        let alerts = store.alerts().await;
        // One change event plus one violation.
        assert_eq!(alerts.len(), 2);
    }

    #[tokio::test]
    async fn last_update_is_stamped() {
        let store = StatusStore::new();
        assert!(store.status().await.last_update.is_none());
        store.apply_reading(true, true, true).await;
        assert!(store.status().await.last_update.is_some());
    }

    #[tokio::test]
    async fn event_snapshot_reflects_post_reading_fields() {
        let store = StatusStore::new();
        store.apply_reading(true, false, true).await;

        let alerts = store.alerts().await;
        let violation = alerts
            .iter()
            .find(|e| e.event_type == EventType::SafetyViolation);
        let snapshot = violation.map(|e| e.status_snapshot);
        assert_eq!(snapshot.map(|s| s.operator_present), Some(true));
        assert_eq!(snapshot.map(|s| s.wrist_strap_connected), Some(false));
    }

    #[tokio::test]
    async fn status_and_classification_are_consistent() {
        let store = StatusStore::new();
        store.apply_reading(true, true, false).await;
        let (status, classification) = store.status_and_classification().await;
        assert!(!status.properly_grounded);
        assert_eq!(
            classification,
            SafetyClassification::NotProperlyGrounded
        );
    }
}
