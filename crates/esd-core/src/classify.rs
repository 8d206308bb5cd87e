//! Pure safety classification over the three sensor booleans.

use esd_types::SafetyClassification;

/// Derive the safety classification from the three sensor readings.
///
/// The rules are evaluated in a fixed precedence order: an absent
/// operator dominates every other fault, then missing wrist-strap
/// continuity, then missing ground continuity. Every boolean combination
/// has a defined result and the function has no side effects.
pub const fn classify(
    operator_present: bool,
    wrist_strap_connected: bool,
    properly_grounded: bool,
) -> SafetyClassification {
    if !operator_present {
        return SafetyClassification::NoOperator;
    }
    if !wrist_strap_connected {
        return SafetyClassification::WristStrapNotConnected;
    }
    if !properly_grounded {
        return SafetyClassification::NotProperlyGrounded;
    }
    SafetyClassification::Safe
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_truth_table() {
        use SafetyClassification::{
            NoOperator, NotProperlyGrounded, Safe, WristStrapNotConnected,
        };

        let expectations = [
            ((false, false, false), NoOperator),
            ((false, false, true), NoOperator),
            ((false, true, false), NoOperator),
            ((false, true, true), NoOperator),
            ((true, false, false), WristStrapNotConnected),
            ((true, false, true), WristStrapNotConnected),
            ((true, true, false), NotProperlyGrounded),
            ((true, true, true), Safe),
        ];

        for ((operator, strap, ground), expected) in expectations {
            assert_eq!(
                classify(operator, strap, ground),
                expected,
                "classify({operator}, {strap}, {ground})"
            );
        }
    }

    #[test]
    fn no_operator_dominates_other_faults() {
        assert_eq!(
            classify(false, false, false),
            SafetyClassification::NoOperator
        );
    }

    #[test]
    fn wrist_strap_dominates_grounding() {
        assert_eq!(
            classify(true, false, false),
            SafetyClassification::WristStrapNotConnected
        );
    }
}
