//! Decision counters for service observability
//!
//! Recorded by the hosting service after it evaluates, never by the
//! evaluator itself.

use super::decision::{AccessDecision, DecisionReason};
use std::sync::atomic::{AtomicU64, Ordering};

/// Point-in-time copy of the counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub role_too_low: u64,
    pub capability_missing: u64,
    pub department_mismatch: u64,
    pub superuser_override: u64,
    pub allowed: u64,
}

impl MetricsSnapshot {
    pub fn total(&self) -> u64 {
        self.role_too_low
            + self.capability_missing
            + self.department_mismatch
            + self.superuser_override
            + self.allowed
    }

    pub fn denied(&self) -> u64 {
        self.role_too_low + self.capability_missing + self.department_mismatch
    }

    /// Fraction of decisions that allowed
    pub fn allow_rate(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            0.0
        } else {
            (self.allowed + self.superuser_override) as f64 / total as f64
        }
    }

    pub fn count(&self, reason: DecisionReason) -> u64 {
        match reason {
            DecisionReason::RoleTooLow => self.role_too_low,
            DecisionReason::CapabilityMissing => self.capability_missing,
            DecisionReason::DepartmentMismatch => self.department_mismatch,
            DecisionReason::SuperuserOverride => self.superuser_override,
            DecisionReason::Allowed => self.allowed,
        }
    }
}

/// Lock-free per-reason decision counters
#[derive(Debug, Default)]
pub struct DecisionMetrics {
    counters: [AtomicU64; 5],
}

impl DecisionMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, decision: AccessDecision) {
        self.counters[Self::slot(decision.reason())].fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_all(&self, decisions: &[AccessDecision]) {
        for decision in decisions {
            self.record(*decision);
        }
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        let load = |reason| self.counters[Self::slot(reason)].load(Ordering::Relaxed);
        MetricsSnapshot {
            role_too_low: load(DecisionReason::RoleTooLow),
            capability_missing: load(DecisionReason::CapabilityMissing),
            department_mismatch: load(DecisionReason::DepartmentMismatch),
            superuser_override: load(DecisionReason::SuperuserOverride),
            allowed: load(DecisionReason::Allowed),
        }
    }

    /// Render the counters in Prometheus text exposition format
    pub fn render_prometheus(&self) -> String {
        let snapshot = self.snapshot();
        let mut out = String::new();
        out.push_str("# HELP access_decisions_total Access decisions by reason\n");
        out.push_str("# TYPE access_decisions_total counter\n");
        for reason in DecisionReason::ALL {
            out.push_str(&format!(
                "access_decisions_total{{reason=\"{}\",allowed=\"{}\"}} {}\n",
                reason,
                reason.allows(),
                snapshot.count(reason)
            ));
        }
        out
    }

    const fn slot(reason: DecisionReason) -> usize {
        match reason {
            DecisionReason::RoleTooLow => 0,
            DecisionReason::CapabilityMissing => 1,
            DecisionReason::DepartmentMismatch => 2,
            DecisionReason::SuperuserOverride => 3,
            DecisionReason::Allowed => 4,
        }
    }
}
