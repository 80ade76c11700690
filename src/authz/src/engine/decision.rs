//! Access decision types

use serde::{Deserialize, Serialize};
use std::fmt;

/// Why a decision came out the way it did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DecisionReason {
    /// Principal ranks below the descriptor's role floor
    RoleTooLow,
    /// Principal lacks the required capability (or the name is unrecognized)
    CapabilityMissing,
    /// Principal's department does not match the descriptor's
    DepartmentMismatch,
    /// Principal is a superuser; no other check ran
    SuperuserOverride,
    /// Every declared constraint passed
    Allowed,
}

impl DecisionReason {
    pub const ALL: [DecisionReason; 5] = [
        DecisionReason::RoleTooLow,
        DecisionReason::CapabilityMissing,
        DecisionReason::DepartmentMismatch,
        DecisionReason::SuperuserOverride,
        DecisionReason::Allowed,
    ];

    /// Whether this reason grants access
    pub const fn allows(self) -> bool {
        matches!(self, DecisionReason::SuperuserOverride | DecisionReason::Allowed)
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            DecisionReason::RoleTooLow => "RoleTooLow",
            DecisionReason::CapabilityMissing => "CapabilityMissing",
            DecisionReason::DepartmentMismatch => "DepartmentMismatch",
            DecisionReason::SuperuserOverride => "SuperuserOverride",
            DecisionReason::Allowed => "Allowed",
        }
    }
}

impl fmt::Display for DecisionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Verdict of a single evaluation
///
/// `allowed` is derived from the reason, so the two can never disagree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "DecisionWire", into = "DecisionWire")]
pub struct AccessDecision {
    reason: DecisionReason,
}

impl AccessDecision {
    pub const fn from_reason(reason: DecisionReason) -> Self {
        Self { reason }
    }

    pub const fn allowed(self) -> bool {
        self.reason.allows()
    }

    pub const fn denied(self) -> bool {
        !self.allowed()
    }

    pub const fn reason(self) -> DecisionReason {
        self.reason
    }
}

impl From<DecisionReason> for AccessDecision {
    fn from(reason: DecisionReason) -> Self {
        Self::from_reason(reason)
    }
}

/// Serialized shape: `{"allowed": bool, "reason": "..."}`
#[derive(Serialize, Deserialize)]
struct DecisionWire {
    allowed: bool,
    reason: DecisionReason,
}

impl From<AccessDecision> for DecisionWire {
    fn from(decision: AccessDecision) -> Self {
        Self {
            allowed: decision.allowed(),
            reason: decision.reason,
        }
    }
}

impl From<DecisionWire> for AccessDecision {
    // The reason is authoritative; a disagreeing `allowed` flag is ignored
    fn from(wire: DecisionWire) -> Self {
        Self::from_reason(wire.reason)
    }
}
