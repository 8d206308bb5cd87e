//! Safety classification derived from the three sensor booleans.

use serde::{Deserialize, Serialize};

/// The derived safety label for the workstation.
///
/// Classification is always recomputed from the current sensor booleans,
/// never stored. The variant order mirrors the precedence of the
/// classification rules: an absent operator dominates all other faults,
/// then a disconnected wrist strap, then missing grounding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SafetyClassification {
    /// No operator detected at the station.
    NoOperator,
    /// Operator present but the wrist strap has no continuity.
    WristStrapNotConnected,
    /// Operator and wrist strap OK but the station is not grounded.
    NotProperlyGrounded,
    /// All three sensor conditions are satisfied.
    Safe,
}

impl SafetyClassification {
    /// Whether this classification represents a safe working state.
    pub const fn is_safe(self) -> bool {
        matches!(self, Self::Safe)
    }

    /// The wire spelling of this classification (`NO_OPERATOR`, ...).
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NoOperator => "NO_OPERATOR",
            Self::WristStrapNotConnected => "WRIST_STRAP_NOT_CONNECTED",
            Self::NotProperlyGrounded => "NOT_PROPERLY_GROUNDED",
            Self::Safe => "SAFE",
        }
    }
}

impl core::fmt::Display for SafetyClassification {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_to_wire_spelling() {
        let json = serde_json::to_value(SafetyClassification::WristStrapNotConnected)
            .unwrap_or_default();
        assert_eq!(json, "WRIST_STRAP_NOT_CONNECTED");
    }

    #[test]
    fn display_matches_serde() {
        for c in [
            SafetyClassification::NoOperator,
            SafetyClassification::WristStrapNotConnected,
            SafetyClassification::NotProperlyGrounded,
            SafetyClassification::Safe,
        ] {
            let json = serde_json::to_value(c).unwrap_or_default();
            assert_eq!(json, c.to_string());
        }
    }

    #[test]
    fn only_safe_is_safe() {
        assert!(SafetyClassification::Safe.is_safe());
        assert!(!SafetyClassification::NoOperator.is_safe());
        assert!(!SafetyClassification::WristStrapNotConnected.is_safe());
        assert!(!SafetyClassification::NotProperlyGrounded.is_safe());
    }
}
