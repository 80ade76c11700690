//! Access evaluator
//!
//! Composes the role resolver, the capability table and the department
//! filter into one decision per `(principal, descriptor)` pair.
//!
//! # Pipeline
//!
//! ```text
//! superuser? ──yes──▶ SuperuserOverride
//!     │no
//! role floor ──fail──▶ RoleTooLow
//!     │
//! capability ──fail──▶ CapabilityMissing
//!     │
//! department ──fail──▶ DepartmentMismatch
//!     │
//!  Allowed
//! ```
//!
//! Every step short-circuits. The evaluator holds no state, performs no I/O
//! and never caches: each call recomputes from the principal snapshot it is
//! given, so a role downgrade takes effect on the very next evaluation.

pub mod decision;
pub mod descriptor;
pub mod metrics;

pub use decision::{AccessDecision, DecisionReason};
pub use descriptor::ResourceDescriptor;
pub use metrics::{DecisionMetrics, MetricsSnapshot};

use crate::capability::has_capability;
use crate::principal::Principal;
use crate::role::is_at_least;
use crate::scope::department_allowed;

/// Anything that carries a [`ResourceDescriptor`]
///
/// Lets the order-stable filter work directly over navigation entries,
/// catalog entries or bare descriptors.
pub trait Protected {
    fn descriptor(&self) -> &ResourceDescriptor;
}

impl Protected for ResourceDescriptor {
    fn descriptor(&self) -> &ResourceDescriptor {
        self
    }
}

impl<T: Protected + ?Sized> Protected for &T {
    fn descriptor(&self) -> &ResourceDescriptor {
        (**self).descriptor()
    }
}

/// Stateless access evaluator
///
/// Zero-sized and `Copy`; share it freely across threads.
#[derive(Debug, Clone, Copy, Default)]
pub struct AccessEvaluator;

impl AccessEvaluator {
    pub const fn new() -> Self {
        Self
    }

    /// Decide whether `principal` may use the surface described by `descriptor`
    pub fn evaluate(&self, principal: &Principal, descriptor: &ResourceDescriptor) -> AccessDecision {
        AccessDecision::from_reason(Self::reason_for(principal, descriptor))
    }

    /// Evaluate each descriptor; the result has the same length and order as the input
    pub fn evaluate_list<P: Protected>(&self, principal: &Principal, items: &[P]) -> Vec<AccessDecision> {
        items
            .iter()
            .map(|item| self.evaluate(principal, item.descriptor()))
            .collect()
    }

    /// The allowed subset of `items`, in input order
    pub fn allowed<'a, P: Protected>(&self, principal: &Principal, items: &'a [P]) -> Vec<&'a P> {
        items
            .iter()
            .filter(|item| self.evaluate(principal, item.descriptor()).allowed())
            .collect()
    }

    fn reason_for(principal: &Principal, descriptor: &ResourceDescriptor) -> DecisionReason {
        if principal.role().is_superuser() {
            return DecisionReason::SuperuserOverride;
        }

        if !is_at_least(principal, descriptor.minimum_role()) {
            return DecisionReason::RoleTooLow;
        }

        if let Some(capability) = descriptor.required_capability() {
            if !has_capability(principal, capability) {
                return DecisionReason::CapabilityMissing;
            }
        }

        if !department_allowed(principal, descriptor.required_department()) {
            return DecisionReason::DepartmentMismatch;
        }

        DecisionReason::Allowed
    }
}

/// Shorthand for [`AccessEvaluator::evaluate`]
pub fn evaluate(principal: &Principal, descriptor: &ResourceDescriptor) -> AccessDecision {
    AccessEvaluator.evaluate(principal, descriptor)
}

/// Shorthand for [`AccessEvaluator::evaluate_list`]
pub fn evaluate_list<P: Protected>(principal: &Principal, items: &[P]) -> Vec<AccessDecision> {
    AccessEvaluator.evaluate_list(principal, items)
}
