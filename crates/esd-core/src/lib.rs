//! Status/event core for the ESD monitor.
//!
//! This crate holds the pure logic of the system, free of any transport
//! concerns:
//!
//! - [`classify`] -- pure mapping from the three sensor booleans to a
//!   [`SafetyClassification`](esd_types::SafetyClassification)
//! - [`EventLog`] -- bounded, newest-first history of status events
//! - [`StatusStore`] -- the single authoritative status record, with
//!   classification and event logging applied atomically per reading
//!
//! The observer server wires these into its `WebSocket`/HTTP surface; this
//! crate never blocks on I/O.

pub mod classify;
pub mod event_log;
pub mod store;

// Re-export primary items for convenience.
pub use classify::classify;
pub use event_log::{EventLog, MAX_EVENTS};
pub use store::{ReadingOutcome, StatusStore};
