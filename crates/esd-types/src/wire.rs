//! JSON wire messages exchanged over the persistent sensor/observer
//! connection.
//!
//! Both directions are discriminated by a `type` field. Field names are
//! `camelCase` to match what the sensor firmware sends and what observer
//! dashboards already parse. Every outbound message carries an RFC 3339
//! timestamp.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::events::Event;
use crate::safety::SafetyClassification;
use crate::status::EsdStatus;

/// A message received from the sensor-side connection.
///
/// Sensor readings arrive as raw numbers where exactly `1` means the
/// condition holds; any other value, or a missing field, means it does
/// not. Commands carry a free-form name so unrecognized commands can be
/// ignored without failing the parse.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type")]
pub enum InboundMessage {
    /// A periodic reading of the three ESD sensors.
    #[serde(rename = "esd_sensor_data", rename_all = "camelCase")]
    SensorData {
        /// IR sensor value; `1` means an operator is present.
        #[serde(default)]
        ir_sensor: i64,
        /// Touch sensor value; `1` means the wrist strap is connected.
        #[serde(default)]
        touch_sensor: i64,
        /// Ground circuit value; `1` means the station is grounded.
        #[serde(default)]
        ground_status: i64,
    },
    /// A control command (`get_status`, `get_alerts`, `clear_alerts`).
    #[serde(rename = "system_command")]
    SystemCommand {
        /// The command name. Unknown names are silently ignored.
        command: String,
    },
}

/// A message sent to a connection, either as a direct reply or as a
/// broadcast to every registered observer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type")]
pub enum OutboundMessage {
    /// Unsolicited status broadcast, also pushed on initial connect.
    #[serde(rename = "esd_status_update", rename_all = "camelCase")]
    StatusUpdate {
        /// The full status record including the alert history.
        status: EsdStatus,
        /// Classification derived from the current booleans.
        safety_status: SafetyClassification,
        /// When this message was built.
        timestamp: DateTime<Utc>,
    },
    /// Per-sender acknowledgment of a sensor reading.
    #[serde(rename = "esd_data_ack")]
    DataAck {
        /// Always `true`; the reading was applied.
        received: bool,
        /// When this message was built.
        timestamp: DateTime<Utc>,
    },
    /// Reply to the `get_status` command.
    #[serde(rename = "esd_status_response", rename_all = "camelCase")]
    StatusResponse {
        /// The full status record including the alert history.
        status: EsdStatus,
        /// Classification derived from the current booleans.
        safety_status: SafetyClassification,
        /// When this message was built.
        timestamp: DateTime<Utc>,
    },
    /// Reply to the `get_alerts` command.
    #[serde(rename = "esd_alerts_response")]
    AlertsResponse {
        /// The bounded alert history, most recent first.
        alerts: Vec<Event>,
        /// When this message was built.
        timestamp: DateTime<Utc>,
    },
    /// Confirmation that the alert history was cleared.
    #[serde(rename = "esd_alerts_cleared")]
    AlertsCleared {
        /// When this message was built.
        timestamp: DateTime<Utc>,
    },
    /// Error acknowledgment for a malformed inbound message.
    #[serde(rename = "error")]
    Error {
        /// Human-readable description of what was wrong.
        message: String,
        /// When this message was built.
        timestamp: DateTime<Utc>,
    },
}

impl OutboundMessage {
    /// Build an `esd_status_update` broadcast for the given status.
    pub fn status_update(status: EsdStatus, safety_status: SafetyClassification) -> Self {
        Self::StatusUpdate {
            status,
            safety_status,
            timestamp: Utc::now(),
        }
    }

    /// Build an `esd_data_ack` reply.
    pub fn data_ack() -> Self {
        Self::DataAck {
            received: true,
            timestamp: Utc::now(),
        }
    }

    /// Build an `esd_status_response` reply.
    pub fn status_response(status: EsdStatus, safety_status: SafetyClassification) -> Self {
        Self::StatusResponse {
            status,
            safety_status,
            timestamp: Utc::now(),
        }
    }

    /// Build an `esd_alerts_response` reply.
    pub fn alerts_response(alerts: Vec<Event>) -> Self {
        Self::AlertsResponse {
            alerts,
            timestamp: Utc::now(),
        }
    }

    /// Build an `esd_alerts_cleared` confirmation.
    pub fn alerts_cleared() -> Self {
        Self::AlertsCleared {
            timestamp: Utc::now(),
        }
    }

    /// Build an `error` reply.
    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            message: message.into(),
            timestamp: Utc::now(),
        }
    }
}
