//! Purchase status state machine.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::{StateMachine, ValidationError};

/// Lifecycle of a ledger row.
///
/// Absence of a row is the implicit initial state. A verified successful
/// payment creates the row as `Completed`; `Refunded` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PurchaseStatus {
    Completed,
    Refunded,
}

impl PurchaseStatus {
    /// Storage and wire representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            PurchaseStatus::Completed => "completed",
            PurchaseStatus::Refunded => "refunded",
        }
    }
}

impl StateMachine for PurchaseStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        matches!(
            (self, target),
            (PurchaseStatus::Completed, PurchaseStatus::Refunded)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        match self {
            PurchaseStatus::Completed => vec![PurchaseStatus::Refunded],
            PurchaseStatus::Refunded => vec![],
        }
    }
}

impl fmt::Display for PurchaseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PurchaseStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "completed" => Ok(PurchaseStatus::Completed),
            "refunded" => Ok(PurchaseStatus::Refunded),
            other => Err(ValidationError::invalid_format(
                "status",
                format!("unknown purchase status '{}'", other),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn completed_can_be_refunded() {
        assert_eq!(
            PurchaseStatus::Completed.transition_to(PurchaseStatus::Refunded),
            Ok(PurchaseStatus::Refunded)
        );
    }

    #[test]
    fn refunded_is_terminal() {
        assert!(PurchaseStatus::Refunded.is_terminal());
        assert!(PurchaseStatus::Refunded
            .transition_to(PurchaseStatus::Completed)
            .is_err());
    }

    #[test]
    fn completed_cannot_transition_to_itself() {
        assert!(!PurchaseStatus::Completed.can_transition_to(&PurchaseStatus::Completed));
    }

    #[test]
    fn can_transition_to_is_consistent_with_valid_transitions() {
        for status in [PurchaseStatus::Completed, PurchaseStatus::Refunded] {
            for target in status.valid_transitions() {
                assert!(status.can_transition_to(&target));
            }
        }
    }

    #[test]
    fn parses_storage_representation() {
        assert_eq!("completed".parse::<PurchaseStatus>().unwrap(), PurchaseStatus::Completed);
        assert_eq!("refunded".parse::<PurchaseStatus>().unwrap(), PurchaseStatus::Refunded);
        assert!("pending".parse::<PurchaseStatus>().is_err());
    }

    #[test]
    fn serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&PurchaseStatus::Refunded).unwrap(),
            "\"refunded\""
        );
    }
}
