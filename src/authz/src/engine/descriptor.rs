//! Resource descriptors
//!
//! Declared once per protected surface (navigation entry, field group, row
//! action, report panel). Every constraint is optional; a descriptor with
//! none of them is open to any authenticated principal.

use crate::capability::CapabilityRef;
use crate::gate::{Action, Module, Permission, PermissionMatrix};
use crate::role::Role;
use crate::scope::Department;
use serde::{Deserialize, Serialize};

/// Declared access requirements of a protected surface
///
/// # Example
///
/// ```rust
/// use roster_authz::{Capability, Department, ResourceDescriptor, Role};
///
/// let payroll = ResourceDescriptor::open()
///     .min_role(Role::Manager)
///     .capability(Capability::CanManageFinancials)
///     .department(Department::Finance);
///
/// assert_eq!(payroll.minimum_role(), Some(Role::Manager));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ResourceDescriptor {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    minimum_role: Option<Role>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    required_capability: Option<CapabilityRef>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    department: Option<Department>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    permission: Option<Permission>,
}

impl ResourceDescriptor {
    /// Descriptor with no constraints
    pub fn open() -> Self {
        Self::default()
    }

    /// Permission gate for `(module, action)` with the compiled default
    /// requirements from [`PermissionMatrix`]
    pub fn gate(module: Module, action: Action) -> Self {
        let permission = Permission::new(module, action);
        let matrix = PermissionMatrix;

        Self {
            minimum_role: matrix.role_floor(action),
            required_capability: matrix.capability(permission).map(CapabilityRef::Known),
            department: None,
            permission: Some(permission),
        }
    }

    /// Raise the role floor; a floor that is already higher is kept
    pub fn min_role(mut self, role: Role) -> Self {
        self.minimum_role = Some(self.minimum_role.map_or(role, |floor| floor.max(role)));
        self
    }

    /// Require a capability; accepts a [`Capability`](crate::Capability) or a
    /// configured name
    ///
    /// A descriptor carries a single capability requirement. Once one is set,
    /// later calls leave it in place so a gate can never be loosened.
    pub fn capability(mut self, capability: impl Into<CapabilityRef>) -> Self {
        if self.required_capability.is_none() {
            self.required_capability = Some(capability.into());
        }
        self
    }

    pub fn department(mut self, department: Department) -> Self {
        self.department = Some(department);
        self
    }

    /// Tag the descriptor with a `(module, action)` pair without applying
    /// the matrix defaults
    pub fn action(mut self, module: Module, action: Action) -> Self {
        self.permission = Some(Permission::new(module, action));
        self
    }

    pub fn minimum_role(&self) -> Option<Role> {
        self.minimum_role
    }

    pub fn required_capability(&self) -> Option<&CapabilityRef> {
        self.required_capability.as_ref()
    }

    pub fn required_department(&self) -> Option<Department> {
        self.department
    }

    pub fn permission(&self) -> Option<Permission> {
        self.permission
    }

    /// True when no role, capability or department constraint is declared
    pub fn is_unconstrained(&self) -> bool {
        self.minimum_role.is_none() && self.required_capability.is_none() && self.department.is_none()
    }
}
