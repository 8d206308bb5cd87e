//! Bounded, insertion-ordered event history.

use esd_types::Event;

/// Maximum events retained in the log.
pub const MAX_EVENTS: usize = 50;

/// In-memory ring of status-change events, newest first.
///
/// Appends insert at the head; once the log exceeds [`MAX_EVENTS`] the
/// oldest entries are evicted from the tail.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    /// All retained events, newest first.
    events: Vec<Event>,
}

impl EventLog {
    /// Create a new empty event log.
    pub const fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Insert an event at the head of the log.
    ///
    /// If the log exceeds [`MAX_EVENTS`], the oldest entry is removed.
    pub fn append(&mut self, event: Event) {
        self.events.insert(0, event);
        if self.events.len() > MAX_EVENTS {
            self.events.truncate(MAX_EVENTS);
        }
    }

    /// Remove all events from the log.
    pub fn clear(&mut self) {
        self.events.clear();
    }

    /// Return a defensive copy of the retained events, newest first.
    ///
    /// Readers get their own `Vec` so they can never observe a data race
    /// against a concurrent append.
    pub fn snapshot(&self) -> Vec<Event> {
        self.events.clone()
    }

    /// Number of retained events.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether the log holds no events.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use esd_types::{StatusField, StatusSnapshot};

    use super::*;

    fn change_event(n: bool) -> Event {
        Event::field_change(
            StatusField::Operator,
            !n,
            n,
            StatusSnapshot {
                operator_present: n,
                wrist_strap_connected: false,
                properly_grounded: false,
                last_update: None,
            },
        )
    }

    #[test]
    fn append_inserts_at_head() {
        let mut log = EventLog::new();
        log.append(change_event(false));
        log.append(change_event(true));

        let snapshot = log.snapshot();
        assert_eq!(snapshot.len(), 2);
        assert_eq!(
            snapshot.first().and_then(|e| e.details.get("current")),
            Some(&serde_json::json!(true))
        );
    }

    #[test]
    fn append_evicts_oldest_beyond_capacity() {
        let mut log = EventLog::new();
        let mut ids = Vec::new();
        for i in 0..51_usize {
            let event = change_event(i.is_multiple_of(2));
            ids.push(event.id);
            log.append(event);
        }

        assert_eq!(log.len(), MAX_EVENTS);
        // The first (oldest) appended event is gone; the rest survive,
        // newest first.
        let snapshot = log.snapshot();
        assert_eq!(snapshot.first().map(|e| e.id), ids.last().copied());
        assert_eq!(snapshot.last().map(|e| e.id), ids.get(1).copied());
        assert!(!snapshot.iter().any(|e| Some(e.id) == ids.first().copied()));
    }

    #[test]
    fn clear_empties_the_log() {
        let mut log = EventLog::new();
        log.append(change_event(true));
        log.clear();
        assert!(log.is_empty());
        assert!(log.snapshot().is_empty());
    }

    #[test]
    fn snapshot_is_a_defensive_copy() {
        let mut log = EventLog::new();
        log.append(change_event(true));
        let snapshot = log.snapshot();
        log.clear();
        assert_eq!(snapshot.len(), 1);
    }
}
