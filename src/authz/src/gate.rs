//! Generic permission gates
//!
//! A permission gate guards a `(module, action)` pair such as "delete an HR
//! record" instead of a named navigation entry. The compiled
//! [`PermissionMatrix`] turns such a pair into default requirements; call
//! sites can tighten the result with the usual descriptor builders.

use crate::capability::Capability;
use crate::error::AuthzError;
use crate::role::Role;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Functional area a gated action belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Module {
    Hr,
    Quality,
    Marketing,
    Finance,
    Sales,
    Operations,
    Clients,
    Reports,
    Users,
    Projects,
}

impl Module {
    pub const ALL: [Module; 10] = [
        Module::Hr,
        Module::Quality,
        Module::Marketing,
        Module::Finance,
        Module::Sales,
        Module::Operations,
        Module::Clients,
        Module::Reports,
        Module::Users,
        Module::Projects,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Module::Hr => "hr",
            Module::Quality => "quality",
            Module::Marketing => "marketing",
            Module::Finance => "finance",
            Module::Sales => "sales",
            Module::Operations => "operations",
            Module::Clients => "clients",
            Module::Reports => "reports",
            Module::Users => "users",
            Module::Projects => "projects",
        }
    }
}

impl FromStr for Module {
    type Err = AuthzError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Module::ALL
            .into_iter()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| AuthzError::UnknownModule(s.to_string()))
    }
}

impl fmt::Display for Module {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// CRUD action on a module
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    View,
    Create,
    Update,
    Delete,
}

impl Action {
    pub const ALL: [Action; 4] = [Action::View, Action::Create, Action::Update, Action::Delete];

    pub const fn as_str(self) -> &'static str {
        match self {
            Action::View => "view",
            Action::Create => "create",
            Action::Update => "update",
            Action::Delete => "delete",
        }
    }

    /// Whether the action changes state (and so should be audited)
    pub const fn is_mutation(self) -> bool {
        !matches!(self, Action::View)
    }
}

impl FromStr for Action {
    type Err = AuthzError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Action::ALL
            .into_iter()
            .find(|a| a.as_str() == s)
            .ok_or_else(|| AuthzError::UnknownAction(s.to_string()))
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A `(module, action)` pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Permission {
    pub module: Module,
    pub action: Action,
}

impl Permission {
    pub const fn new(module: Module, action: Action) -> Self {
        Self { module, action }
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.module, self.action)
    }
}

/// Compiled default requirements for permission gates
///
/// | action | role floor |
/// |---|---|
/// | view | none |
/// | create, update | `restricted_admin` |
/// | delete | `admin` |
///
/// Module capabilities: hr → `canViewEvaluations`, finance →
/// `canManageFinancials`, clients → `canViewClients`, reports →
/// `canViewReports`, users → `canManageUsers`, quality (create only) →
/// `canCreateAuditSheets`, projects (mutations only) → `canManageProjects`.
#[derive(Debug, Clone, Copy, Default)]
pub struct PermissionMatrix;

impl PermissionMatrix {
    pub const fn role_floor(self, action: Action) -> Option<Role> {
        match action {
            Action::View => None,
            Action::Create | Action::Update => Some(Role::RestrictedAdmin),
            Action::Delete => Some(Role::Admin),
        }
    }

    pub const fn capability(self, permission: Permission) -> Option<Capability> {
        match (permission.module, permission.action) {
            (Module::Hr, _) => Some(Capability::CanViewEvaluations),
            (Module::Finance, _) => Some(Capability::CanManageFinancials),
            (Module::Clients, _) => Some(Capability::CanViewClients),
            (Module::Reports, _) => Some(Capability::CanViewReports),
            (Module::Users, _) => Some(Capability::CanManageUsers),
            (Module::Quality, Action::Create) => Some(Capability::CanCreateAuditSheets),
            (Module::Projects, action) if action.is_mutation() => {
                Some(Capability::CanManageProjects)
            }
            _ => None,
        }
    }
}
