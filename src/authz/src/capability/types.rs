//! Capability type definitions

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Named boolean grant, independent of role rank
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Capability {
    CanViewEvaluations,
    CanManageFinancials,
    CanViewClients,
    CanViewReports,
    CanCreateAuditSheets,
    CanManageUsers,
    CanManageProjects,
    CanViewAnalytics,
}

impl Capability {
    /// Every compiled-in capability
    pub const ALL: [Capability; 8] = [
        Capability::CanViewEvaluations,
        Capability::CanManageFinancials,
        Capability::CanViewClients,
        Capability::CanViewReports,
        Capability::CanCreateAuditSheets,
        Capability::CanManageUsers,
        Capability::CanManageProjects,
        Capability::CanViewAnalytics,
    ];

    /// Wire name of the capability
    pub const fn as_str(self) -> &'static str {
        match self {
            Capability::CanViewEvaluations => "canViewEvaluations",
            Capability::CanManageFinancials => "canManageFinancials",
            Capability::CanViewClients => "canViewClients",
            Capability::CanViewReports => "canViewReports",
            Capability::CanCreateAuditSheets => "canCreateAuditSheets",
            Capability::CanManageUsers => "canManageUsers",
            Capability::CanManageProjects => "canManageProjects",
            Capability::CanViewAnalytics => "canViewAnalytics",
        }
    }

    /// Look up a capability by its wire name
    pub fn parse(name: &str) -> Option<Self> {
        Capability::ALL.into_iter().find(|cap| cap.as_str() == name)
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Capability named by a resource descriptor
///
/// Descriptors declared in code use [`CapabilityRef::Known`]. Descriptors
/// loaded from configuration may name a capability this build does not
/// know; those parse into [`CapabilityRef::Unrecognized`] and never grant.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CapabilityRef {
    Known(Capability),
    Unrecognized(String),
}

impl CapabilityRef {
    pub fn name(&self) -> &str {
        match self {
            CapabilityRef::Known(cap) => cap.as_str(),
            CapabilityRef::Unrecognized(name) => name,
        }
    }

    pub fn known(&self) -> Option<Capability> {
        match self {
            CapabilityRef::Known(cap) => Some(*cap),
            CapabilityRef::Unrecognized(_) => None,
        }
    }
}

impl From<Capability> for CapabilityRef {
    fn from(cap: Capability) -> Self {
        CapabilityRef::Known(cap)
    }
}

impl From<String> for CapabilityRef {
    fn from(name: String) -> Self {
        match Capability::parse(&name) {
            Some(cap) => CapabilityRef::Known(cap),
            None => CapabilityRef::Unrecognized(name),
        }
    }
}

impl From<&str> for CapabilityRef {
    fn from(name: &str) -> Self {
        CapabilityRef::from(name.to_string())
    }
}

impl From<CapabilityRef> for String {
    fn from(cap: CapabilityRef) -> Self {
        match cap {
            CapabilityRef::Known(cap) => cap.as_str().to_string(),
            CapabilityRef::Unrecognized(name) => name,
        }
    }
}

impl FromStr for CapabilityRef {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(CapabilityRef::from(s))
    }
}

impl fmt::Display for CapabilityRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Capability flags held by a principal
///
/// A flag may be present and `false`; only present-and-`true` grants.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CapabilitySet {
    flags: BTreeMap<Capability, bool>,
}

impl CapabilitySet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, cap: Capability, granted: bool) -> Self {
        self.flags.insert(cap, granted);
        self
    }

    pub fn grant(self, cap: Capability) -> Self {
        self.with(cap, true)
    }

    pub fn is_granted(&self, cap: Capability) -> bool {
        self.flags.get(&cap).copied().unwrap_or(false)
    }

    /// Every flag, granted or not, in capability order
    pub fn flags(&self) -> impl Iterator<Item = (Capability, bool)> + '_ {
        self.flags.iter().map(|(cap, granted)| (*cap, *granted))
    }

    pub fn granted(&self) -> impl Iterator<Item = Capability> + '_ {
        self.flags().filter(|(_, granted)| *granted).map(|(cap, _)| cap)
    }

    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }
}

impl FromIterator<Capability> for CapabilitySet {
    fn from_iter<I: IntoIterator<Item = Capability>>(iter: I) -> Self {
        Self {
            flags: iter.into_iter().map(|cap| (cap, true)).collect(),
        }
    }
}

impl FromIterator<(Capability, bool)> for CapabilitySet {
    fn from_iter<I: IntoIterator<Item = (Capability, bool)>>(iter: I) -> Self {
        Self {
            flags: iter.into_iter().collect(),
        }
    }
}
