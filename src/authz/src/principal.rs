//! Authenticated principal presented to the engine
//!
//! A [`Principal`] is an immutable snapshot. Refreshing a principal's role,
//! department or capabilities builds a new value; nothing in this crate
//! mutates one in place, so concurrent evaluations never see a half-updated
//! principal.

use crate::capability::{Capability, CapabilitySet};
use crate::error::{AuthzError, Result};
use crate::role::Role;
use crate::scope::Department;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::warn;

/// Department value upstream identity data uses for "none assigned"
const NO_DEPARTMENT: &str = "none";

/// Authenticated actor being evaluated for access
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "PrincipalRecord", into = "PrincipalRecord")]
pub struct Principal {
    id: String,
    role: Role,
    department: Option<Department>,
    capabilities: CapabilitySet,
}

impl Principal {
    /// Create a principal with no department and no capabilities
    pub fn new(id: impl Into<String>, role: Role) -> Self {
        Self {
            id: id.into(),
            role,
            department: None,
            capabilities: CapabilitySet::new(),
        }
    }

    pub fn with_department(mut self, department: Department) -> Self {
        self.department = Some(department);
        self
    }

    /// Set a single capability flag
    pub fn with_capability(mut self, capability: Capability, granted: bool) -> Self {
        self.capabilities = self.capabilities.with(capability, granted);
        self
    }

    /// Replace the whole capability set
    pub fn with_capabilities(mut self, capabilities: CapabilitySet) -> Self {
        self.capabilities = capabilities;
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn department(&self) -> Option<Department> {
        self.department
    }

    pub fn capabilities(&self) -> &CapabilitySet {
        &self.capabilities
    }
}

/// Principal as delivered by the upstream identity layer
///
/// Role and department are plain strings here; converting into a
/// [`Principal`] rejects names outside the compiled sets. Capability keys
/// this build does not know are dropped, so they can never grant anything.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrincipalRecord {
    pub id: String,

    pub role: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,

    #[serde(default)]
    pub capabilities: BTreeMap<String, bool>,
}

impl TryFrom<PrincipalRecord> for Principal {
    type Error = AuthzError;

    fn try_from(record: PrincipalRecord) -> Result<Self> {
        if record.id.trim().is_empty() {
            return Err(AuthzError::InvalidInput(
                "Principal id cannot be empty".to_string(),
            ));
        }

        let role: Role = record.role.parse()?;

        let department = match record.department.as_deref() {
            None | Some("") | Some(NO_DEPARTMENT) => None,
            Some(name) => Some(name.parse::<Department>()?),
        };

        let mut capabilities = CapabilitySet::new();
        for (name, granted) in record.capabilities {
            match Capability::parse(&name) {
                Some(cap) => capabilities = capabilities.with(cap, granted),
                None => warn!(
                    principal = %record.id,
                    capability = %name,
                    "Dropping unrecognized capability from principal record"
                ),
            }
        }

        Ok(Self {
            id: record.id,
            role,
            department,
            capabilities,
        })
    }
}

impl From<Principal> for PrincipalRecord {
    fn from(principal: Principal) -> Self {
        Self {
            id: principal.id,
            role: principal.role.as_str().to_string(),
            department: principal.department.map(|d| d.as_str().to_string()),
            capabilities: principal
                .capabilities
                .flags()
                .map(|(cap, granted)| (cap.as_str().to_string(), granted))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_principal_builder() {
        let principal = Principal::new("user:ines@example.com", Role::LeadAdmin)
            .with_department(Department::Hr)
            .with_capability(Capability::CanViewEvaluations, true);

        assert_eq!(principal.id(), "user:ines@example.com");
        assert_eq!(principal.role(), Role::LeadAdmin);
        assert_eq!(principal.department(), Some(Department::Hr));
        assert!(principal.capabilities().is_granted(Capability::CanViewEvaluations));
    }

    #[test]
    fn test_refresh_builds_new_value() {
        let before = Principal::new("user:ana", Role::Manager).with_department(Department::Sales);
        let after = before.clone().with_department(Department::Marketing);

        assert_eq!(before.department(), Some(Department::Sales));
        assert_eq!(after.department(), Some(Department::Marketing));
    }

    #[test]
    fn test_deserialize_from_identity_record() {
        let principal: Principal = serde_json::from_value(json!({
            "id": "user:ana",
            "role": "power_manager",
            "department": "finance",
            "capabilities": {
                "canManageFinancials": true,
                "canViewClients": false
            }
        }))
        .unwrap();

        assert_eq!(principal.role(), Role::PowerManager);
        assert_eq!(principal.department(), Some(Department::Finance));
        assert!(principal.capabilities().is_granted(Capability::CanManageFinancials));
        assert!(!principal.capabilities().is_granted(Capability::CanViewClients));
    }

    #[test]
    fn test_missing_department_variants() {
        for department in [json!(null), json!("none"), json!("")] {
            let principal: Principal = serde_json::from_value(json!({
                "id": "user:new-hire",
                "role": "viewer",
                "department": department,
            }))
            .unwrap();
            assert_eq!(principal.department(), None);
        }

        let principal: Principal =
            serde_json::from_value(json!({ "id": "user:new-hire", "role": "viewer" })).unwrap();
        assert_eq!(principal.department(), None);
        assert!(principal.capabilities().is_empty());
    }

    #[test]
    fn test_unknown_role_rejected() {
        let record = PrincipalRecord {
            id: "user:ana".to_string(),
            role: "owner".to_string(),
            department: None,
            capabilities: BTreeMap::new(),
        };

        assert!(matches!(
            Principal::try_from(record),
            Err(AuthzError::UnknownRole(role)) if role == "owner"
        ));
    }

    #[test]
    fn test_unknown_department_rejected() {
        let result: std::result::Result<Principal, _> = serde_json::from_value(json!({
            "id": "user:ana",
            "role": "admin",
            "department": "research",
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_empty_id_rejected() {
        let record = PrincipalRecord {
            id: "  ".to_string(),
            role: "admin".to_string(),
            department: None,
            capabilities: BTreeMap::new(),
        };
        assert!(matches!(
            Principal::try_from(record),
            Err(AuthzError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_unknown_capability_dropped() {
        let principal: Principal = serde_json::from_value(json!({
            "id": "user:ana",
            "role": "admin",
            "capabilities": { "canLaunchRockets": true, "canViewReports": true }
        }))
        .unwrap();

        assert_eq!(
            principal.capabilities().granted().collect::<Vec<_>>(),
            vec![Capability::CanViewReports]
        );
    }

    #[test]
    fn test_serialize_as_identity_record() {
        let principal = Principal::new("user:ana", Role::Admin)
            .with_department(Department::CustomerSupport)
            .with_capability(Capability::CanViewClients, true);

        let value = serde_json::to_value(&principal).unwrap();
        assert_eq!(
            value,
            json!({
                "id": "user:ana",
                "role": "admin",
                "department": "customer_support",
                "capabilities": { "canViewClients": true }
            })
        );

        let back: Principal = serde_json::from_value(value).unwrap();
        assert_eq!(back, principal);
    }
}
