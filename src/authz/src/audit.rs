//! Audit context for state-changing actions
//!
//! The evaluator never logs. A consumer that receives an allowing decision
//! and completes the corresponding mutation builds an [`AuditRecord`] from
//! the same inputs and hands it to an [`AuditSink`].

use crate::catalog::CatalogEntry;
use crate::engine::{AccessDecision, DecisionReason, ResourceDescriptor};
use crate::error::{AuthzError, Result};
use crate::gate::Permission;
use crate::principal::Principal;
use crate::role::Role;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

/// Who did what to which resource, and why it was allowed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditRecord {
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub principal_id: String,
    pub role: Role,
    pub resource_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permission: Option<Permission>,
    pub reason: DecisionReason,
}

impl AuditRecord {
    /// Build a record for a mutation performed under `decision`
    ///
    /// Fails with [`AuthzError::NotAllowed`] if the decision denied; a denied
    /// action has no mutation to audit.
    pub fn for_mutation(
        principal: &Principal,
        resource_id: impl Into<String>,
        descriptor: &ResourceDescriptor,
        decision: AccessDecision,
    ) -> Result<Self> {
        let resource_id = resource_id.into();

        if decision.denied() {
            return Err(AuthzError::NotAllowed(format!(
                "{} on {} was denied ({})",
                principal.id(),
                resource_id,
                decision.reason()
            )));
        }

        Ok(Self {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            principal_id: principal.id().to_string(),
            role: principal.role(),
            resource_id,
            resource_label: None,
            permission: descriptor.permission(),
            reason: decision.reason(),
        })
    }

    /// Build a record for a mutation on a catalog entry, carrying its label
    pub fn for_entry(principal: &Principal, entry: &CatalogEntry, decision: AccessDecision) -> Result<Self> {
        Ok(Self::for_mutation(principal, entry.id.as_str(), &entry.descriptor, decision)?
            .with_resource_label(entry.label.as_str()))
    }

    pub fn with_resource_label(mut self, label: impl Into<String>) -> Self {
        self.resource_label = Some(label.into());
        self
    }
}

/// Destination for audit records
pub trait AuditSink: Send + Sync {
    fn record(&self, record: AuditRecord) -> Result<()>;
}

/// Emits each record as a structured `tracing` event on the `audit` target
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingAuditSink;

impl AuditSink for TracingAuditSink {
    fn record(&self, record: AuditRecord) -> Result<()> {
        let permission = record
            .permission
            .map(|p| p.to_string())
            .unwrap_or_else(|| "-".to_string());
        let label = record.resource_label.as_deref().unwrap_or("-");

        info!(
            target: "audit",
            audit_id = %record.id,
            principal = %record.principal_id,
            role = %record.role,
            resource = %record.resource_id,
            label = %label,
            permission = %permission,
            reason = %record.reason,
            "mutation recorded"
        );
        Ok(())
    }
}

/// Keeps records in memory, oldest first
#[derive(Debug, Default)]
pub struct MemoryAuditSink {
    records: Mutex<Vec<AuditRecord>>,
}

impl MemoryAuditSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> Vec<AuditRecord> {
        self.records.lock().clone()
    }

    pub fn for_principal(&self, principal_id: &str) -> Vec<AuditRecord> {
        self.records
            .lock()
            .iter()
            .filter(|record| record.principal_id == principal_id)
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.lock().is_empty()
    }
}

impl AuditSink for MemoryAuditSink {
    fn record(&self, record: AuditRecord) -> Result<()> {
        self.records.lock().push(record);
        Ok(())
    }
}
