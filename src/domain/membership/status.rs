//! Membership lifecycle state machines.
//!
//! Two independent lifecycles apply to a membership record:
//!
//! - [`MembershipStatus`] - the member-facing subscription state. Only
//!   `Active` memberships participate in expiry notification.
//! - [`DocState`] - the record's submission state. Invoice generation
//!   fires only at `Submitted`.

use crate::domain::foundation::StateMachine;
use serde::{Deserialize, Serialize};

/// Member-facing subscription status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MembershipStatus {
    /// Newly created, not yet confirmed.
    Draft,

    /// Confirmed subscription within its period.
    Active,

    /// Period ended without renewal.
    Expired,

    /// Cancelled before or during its period.
    Cancelled,
}

impl MembershipStatus {
    /// Returns true if this status participates in expiry notification.
    pub fn is_notifiable(&self) -> bool {
        matches!(self, MembershipStatus::Active)
    }
}

impl StateMachine for MembershipStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        use MembershipStatus::*;
        matches!(
            (self, target),
            (Draft, Active)
                | (Draft, Cancelled)
                | (Active, Expired)
                | (Active, Cancelled)
                | (Expired, Active) // Renewal
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use MembershipStatus::*;
        match self {
            Draft => vec![Active, Cancelled],
            Active => vec![Expired, Cancelled],
            Expired => vec![Active],
            Cancelled => vec![],
        }
    }
}

/// Record submission state.
///
/// Mirrors the classic document workflow: a draft can be edited freely,
/// a submitted record has downstream effects (billing), and cancellation
/// is the only way out of submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocState {
    /// Editable, no downstream effects yet.
    Draft,

    /// Confirmed. Invoice generation fires here.
    Submitted,

    /// Revoked after submission.
    Cancelled,
}

impl StateMachine for DocState {
    fn can_transition_to(&self, target: &Self) -> bool {
        use DocState::*;
        matches!((self, target), (Draft, Submitted) | (Submitted, Cancelled))
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use DocState::*;
        match self {
            Draft => vec![Submitted],
            Submitted => vec![Cancelled],
            Cancelled => vec![],
        }
    }
}
