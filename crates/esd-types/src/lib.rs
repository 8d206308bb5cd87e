//! Shared type definitions for the ESD monitoring workspace.
//!
//! This crate is the single source of truth for all types used across the
//! workspace: the status record, logged events, the derived safety
//! classification, and the JSON wire messages.
//!
//! # Modules
//!
//! - [`ids`] -- Type-safe UUID wrappers for events and observer clients
//! - [`safety`] -- The derived [`SafetyClassification`] label
//! - [`status`] -- The [`EsdStatus`] record and per-event snapshots
//! - [`events`] -- Logged status-change and violation [`Event`]s
//! - [`wire`] -- Inbound/outbound JSON messages for the persistent connection

pub mod events;
pub mod ids;
pub mod safety;
pub mod status;
pub mod wire;

// Re-export all public types at crate root for convenience.
pub use events::{Event, EventType};
pub use ids::{ClientId, EventId};
pub use safety::SafetyClassification;
pub use status::{EsdStatus, StatusField, StatusSnapshot};
pub use wire::{InboundMessage, OutboundMessage};
