//! Navigation tree filtering
//!
//! A consumer-side fold over per-leaf decisions: allowed items stay in
//! declaration order and a group whose items are all denied disappears.
//! The evaluator knows nothing about groups.

use crate::engine::{AccessEvaluator, Protected, ResourceDescriptor};
use crate::principal::Principal;
use serde::Serialize;

/// A navigable entry guarded by a descriptor
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavItem {
    pub id: String,
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(skip)]
    pub descriptor: ResourceDescriptor,
}

impl NavItem {
    pub fn new(id: impl Into<String>, label: impl Into<String>, descriptor: ResourceDescriptor) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            path: None,
            descriptor,
        }
    }

    pub fn at_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }
}

impl Protected for NavItem {
    fn descriptor(&self) -> &ResourceDescriptor {
        &self.descriptor
    }
}

/// Labeled group of navigation items
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavGroup {
    pub label: String,
    pub items: Vec<NavItem>,
}

impl NavGroup {
    pub fn new(label: impl Into<String>, items: Vec<NavItem>) -> Self {
        Self {
            label: label.into(),
            items,
        }
    }
}

/// Group as rendered for one principal
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VisibleGroup<'a> {
    pub label: &'a str,
    pub items: Vec<&'a NavItem>,
}

/// Filter `groups` down to what `principal` may see
///
/// Groups keep their order, items keep their order within each group, and a
/// group with no allowed items is omitted.
pub fn visible_groups<'a>(principal: &Principal, groups: &'a [NavGroup]) -> Vec<VisibleGroup<'a>> {
    let evaluator = AccessEvaluator::new();

    groups
        .iter()
        .filter_map(|group| {
            let items = evaluator.allowed(principal, &group.items);
            if items.is_empty() {
                None
            } else {
                Some(VisibleGroup {
                    label: &group.label,
                    items,
                })
            }
        })
        .collect()
}
