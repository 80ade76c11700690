//! Descriptor catalog
//!
//! The set of protected surfaces an application declares at startup,
//! either in code or loaded from JSON:
//!
//! ```json
//! {
//!   "resources": [
//!     { "id": "dashboard", "label": "Dashboard", "group": "General", "availableTo": "all" },
//!     { "id": "payroll", "label": "Payroll", "group": "Finance",
//!       "minimumRole": "manager", "requiredCapability": "canManageFinancials",
//!       "department": "finance" },
//!     { "id": "hr.delete", "label": "Delete HR record",
//!       "gate": { "module": "hr", "action": "delete" } }
//!   ]
//! }
//! ```
//!
//! Role, department, module and action names must be known to this build.
//! Capability names are not checked: an unknown one loads, never grants, and
//! is reported through [`DescriptorCatalog::unrecognized_capabilities`].

use crate::capability::{Capability, CapabilityRef};
use crate::engine::{Protected, ResourceDescriptor};
use crate::error::{AuthzError, Result};
use crate::gate::{Action, Module, Permission};
use crate::navigation::{NavGroup, NavItem};
use crate::role::Role;
use crate::scope::Department;
use serde::Deserialize;
use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use tracing::{debug, info, warn};

/// Group label for entries that do not name one
pub const DEFAULT_GROUP: &str = "General";

/// Legacy availability tag mapped onto a role floor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AvailableTo {
    All,
    Admin,
    Lead,
    Manager,
    Power,
    Superuser,
}

impl AvailableTo {
    /// Role floor the tag stands for; `All` has none
    pub const fn role_floor(self) -> Option<Role> {
        match self {
            AvailableTo::All => None,
            AvailableTo::Admin => Some(Role::Admin),
            AvailableTo::Lead => Some(Role::LeadAdmin),
            AvailableTo::Manager => Some(Role::Manager),
            AvailableTo::Power => Some(Role::PowerManager),
            AvailableTo::Superuser => Some(Role::Superuser),
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            AvailableTo::All => "all",
            AvailableTo::Admin => "admin",
            AvailableTo::Lead => "lead",
            AvailableTo::Manager => "manager",
            AvailableTo::Power => "power",
            AvailableTo::Superuser => "superuser",
        }
    }

    /// Descriptor carrying only the tag's role floor
    pub fn descriptor(self) -> ResourceDescriptor {
        match self.role_floor() {
            Some(role) => ResourceDescriptor::open().min_role(role),
            None => ResourceDescriptor::open(),
        }
    }
}

impl FromStr for AvailableTo {
    type Err = AuthzError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(AvailableTo::All),
            "admin" => Ok(AvailableTo::Admin),
            "lead" => Ok(AvailableTo::Lead),
            "manager" => Ok(AvailableTo::Manager),
            "power" => Ok(AvailableTo::Power),
            "superuser" => Ok(AvailableTo::Superuser),
            other => Err(AuthzError::Catalog(format!(
                "Unknown availableTo tag '{}'",
                other
            ))),
        }
    }
}

impl fmt::Display for AvailableTo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One protected surface in the catalog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    pub id: String,
    pub label: String,
    pub group: Option<String>,
    pub path: Option<String>,
    pub descriptor: ResourceDescriptor,
}

impl CatalogEntry {
    pub fn new(id: impl Into<String>, label: impl Into<String>, descriptor: ResourceDescriptor) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            group: None,
            path: None,
            descriptor,
        }
    }

    pub fn in_group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    pub fn at_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }
}

impl Protected for CatalogEntry {
    fn descriptor(&self) -> &ResourceDescriptor {
        &self.descriptor
    }
}

/// Catalog file shape
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct CatalogFile {
    resources: Vec<EntryRecord>,
}

/// Catalog entry as written in configuration
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct EntryRecord {
    id: String,
    #[serde(default)]
    label: Option<String>,
    #[serde(default)]
    group: Option<String>,
    #[serde(default)]
    path: Option<String>,
    #[serde(default)]
    available_to: Option<String>,
    #[serde(default)]
    minimum_role: Option<Role>,
    #[serde(default)]
    required_capability: Option<CapabilityRef>,
    #[serde(default)]
    department: Option<Department>,
    /// Permission gate with the compiled matrix defaults applied
    #[serde(default)]
    gate: Option<Permission>,
    /// `(module, action)` tag only
    #[serde(default)]
    permission: Option<Permission>,
}

impl TryFrom<EntryRecord> for CatalogEntry {
    type Error = AuthzError;

    fn try_from(record: EntryRecord) -> Result<Self> {
        if record.available_to.is_some() && record.minimum_role.is_some() {
            return Err(AuthzError::Catalog(format!(
                "Entry '{}' sets both availableTo and minimumRole",
                record.id
            )));
        }
        if record.gate.is_some() && record.permission.is_some() {
            return Err(AuthzError::Catalog(format!(
                "Entry '{}' sets both gate and permission",
                record.id
            )));
        }

        let mut descriptor = match record.gate {
            Some(gate) => ResourceDescriptor::gate(gate.module, gate.action),
            None => ResourceDescriptor::open(),
        };

        if let Some(tag) = record.available_to.as_deref() {
            let tag: AvailableTo = tag.parse()?;
            if let Some(role) = tag.role_floor() {
                descriptor = descriptor.min_role(role);
            }
        }
        if let Some(role) = record.minimum_role {
            descriptor = descriptor.min_role(role);
        }
        if let Some(capability) = record.required_capability {
            if let Some(gated) = descriptor.required_capability() {
                if *gated != capability {
                    return Err(AuthzError::Catalog(format!(
                        "Entry '{}' requires {} but its gate already requires {}",
                        record.id, capability, gated
                    )));
                }
            }
            descriptor = descriptor.capability(capability);
        }
        if let Some(department) = record.department {
            descriptor = descriptor.department(department);
        }
        if let Some(permission) = record.permission {
            descriptor = descriptor.action(permission.module, permission.action);
        }

        let label = record.label.unwrap_or_else(|| record.id.clone());

        Ok(Self {
            id: record.id,
            label,
            group: record.group,
            path: record.path,
            descriptor,
        })
    }
}

/// Ordered, id-indexed set of catalog entries
#[derive(Debug, Clone, Default)]
pub struct DescriptorCatalog {
    entries: Vec<CatalogEntry>,
    index: HashMap<String, usize>,
}

impl DescriptorCatalog {
    /// Build a catalog, rejecting empty or duplicate ids
    pub fn from_entries(entries: Vec<CatalogEntry>) -> Result<Self> {
        let mut index = HashMap::with_capacity(entries.len());

        for (position, entry) in entries.iter().enumerate() {
            if entry.id.trim().is_empty() {
                return Err(AuthzError::Catalog(format!(
                    "Entry at position {} has an empty id",
                    position
                )));
            }
            if index.insert(entry.id.clone(), position).is_some() {
                return Err(AuthzError::Catalog(format!("Duplicate entry id '{}'", entry.id)));
            }
        }

        let catalog = Self { entries, index };

        for (id, name) in catalog.unrecognized_capabilities() {
            warn!(
                entry = %id,
                capability = %name,
                "Catalog entry requires an unrecognized capability; it will always be denied"
            );
        }

        Ok(catalog)
    }

    /// Parse a catalog from its JSON representation
    pub fn from_json_str(json: &str) -> Result<Self> {
        let file: CatalogFile = serde_json::from_str(json)?;
        let entries = file
            .resources
            .into_iter()
            .map(CatalogEntry::try_from)
            .collect::<Result<Vec<_>>>()?;

        let catalog = Self::from_entries(entries)?;
        debug!("Parsed catalog with {} entries", catalog.len());
        Ok(catalog)
    }

    /// Load a catalog from a JSON file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let catalog = Self::from_json_str(&json)?;
        info!("Loaded {} catalog entries from {}", catalog.len(), path.display());
        Ok(catalog)
    }

    /// Compiled default catalog
    pub fn builtin() -> Self {
        let entries = vec![
            CatalogEntry::new("dashboard", "Dashboard", ResourceDescriptor::open())
                .in_group(DEFAULT_GROUP)
                .at_path("/"),
            CatalogEntry::new("projects", "Projects", ResourceDescriptor::gate(Module::Projects, Action::View))
                .in_group(DEFAULT_GROUP)
                .at_path("/projects"),
            CatalogEntry::new(
                "clients",
                "Clients",
                ResourceDescriptor::open().capability(Capability::CanViewClients),
            )
            .in_group("Sales")
            .at_path("/clients"),
            CatalogEntry::new(
                "evaluations",
                "Evaluations",
                ResourceDescriptor::open()
                    .min_role(Role::Admin)
                    .capability(Capability::CanViewEvaluations)
                    .department(Department::Hr),
            )
            .in_group("People")
            .at_path("/hr/evaluations"),
            CatalogEntry::new("users", "Users", ResourceDescriptor::gate(Module::Users, Action::View))
                .in_group("People")
                .at_path("/users"),
            CatalogEntry::new(
                "audit-sheets",
                "Audit sheets",
                ResourceDescriptor::gate(Module::Quality, Action::Create),
            )
            .in_group("Quality")
            .at_path("/quality/audits"),
            CatalogEntry::new(
                "reports",
                "Reports",
                AvailableTo::Manager
                    .descriptor()
                    .capability(Capability::CanViewReports),
            )
            .in_group("Insights")
            .at_path("/reports"),
            CatalogEntry::new(
                "financials",
                "Financials",
                AvailableTo::Power
                    .descriptor()
                    .capability(Capability::CanManageFinancials)
                    .department(Department::Finance),
            )
            .in_group("Insights")
            .at_path("/finance"),
            CatalogEntry::new("system", "System settings", AvailableTo::Superuser.descriptor())
                .in_group("Administration")
                .at_path("/system"),
        ];

        Self::from_entries(entries).expect("builtin catalog entries are valid")
    }

    pub fn get(&self, id: &str) -> Option<&CatalogEntry> {
        self.index.get(id).map(|&position| &self.entries[position])
    }

    /// Like [`get`](Self::get) but reports a missing id as an error
    pub fn require(&self, id: &str) -> Result<&CatalogEntry> {
        self.get(id)
            .ok_or_else(|| AuthzError::ResourceNotFound(id.to_string()))
    }

    /// Entries in declaration order
    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// `(entry id, capability name)` for every entry naming an unknown capability
    pub fn unrecognized_capabilities(&self) -> Vec<(&str, &str)> {
        self.entries
            .iter()
            .filter_map(|entry| match entry.descriptor.required_capability() {
                Some(CapabilityRef::Unrecognized(name)) => Some((entry.id.as_str(), name.as_str())),
                _ => None,
            })
            .collect()
    }

    /// Navigation tree: entries with a path, grouped by first appearance of
    /// their group label
    pub fn navigation(&self) -> Vec<NavGroup> {
        let mut groups: Vec<NavGroup> = Vec::new();

        for entry in &self.entries {
            let Some(path) = &entry.path else {
                continue;
            };
            let label = entry.group.as_deref().unwrap_or(DEFAULT_GROUP);
            let item = NavItem::new(&entry.id, &entry.label, entry.descriptor.clone()).at_path(path);

            match groups.iter_mut().find(|group| group.label == label) {
                Some(group) => group.items.push(item),
                None => groups.push(NavGroup::new(label, vec![item])),
            }
        }

        groups
    }
}
