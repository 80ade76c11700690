//! # Roster Access Engine
//!
//! Access-control decisions for navigation, field gates, row actions and
//! report panels, made by one evaluator so every call site agrees.
//!
//! ## Features
//!
//! - **Role hierarchy** with a fixed, explicitly ranked total order
//! - **Capability flags** independent of role rank, failing closed on unknown names
//! - **Department scoping** with exact matching and a superuser bypass
//! - **Typed decisions** that always carry a reason
//! - **Descriptor catalog** loadable from JSON, including legacy `availableTo` tags
//! - **HTTP decision service** for out-of-process consumers
//!
//! ## Example
//!
//! ```rust
//! use roster_authz::{
//!     AccessEvaluator, Department, DecisionReason, Principal, ResourceDescriptor, Role,
//! };
//!
//! let principal = Principal::new("user:ines@example.com", Role::LeadAdmin)
//!     .with_department(Department::Hr);
//!
//! let evaluations = ResourceDescriptor::open()
//!     .min_role(Role::Admin)
//!     .department(Department::Hr);
//!
//! let decision = AccessEvaluator::new().evaluate(&principal, &evaluations);
//! assert!(decision.allowed());
//! assert_eq!(decision.reason(), DecisionReason::Allowed);
//! ```

pub mod audit;
pub mod capability;
pub mod catalog;
pub mod config;
pub mod engine;
pub mod error;
pub mod gate;
pub mod http;
pub mod navigation;
pub mod principal;
pub mod role;
pub mod scope;

// Re-export commonly used types
pub use audit::{AuditRecord, AuditSink, MemoryAuditSink, TracingAuditSink};
pub use capability::{has_capability, Capability, CapabilityRef, CapabilitySet};
pub use catalog::{AvailableTo, CatalogEntry, DescriptorCatalog};
pub use engine::{
    evaluate, evaluate_list, AccessDecision, AccessEvaluator, DecisionReason, Protected,
    ResourceDescriptor,
};
pub use error::{AuthzError, Result};
pub use gate::{Action, Module, Permission, PermissionMatrix};
pub use navigation::{visible_groups, NavGroup, NavItem, VisibleGroup};
pub use principal::{Principal, PrincipalRecord};
pub use role::{is_at_least, rank_at_least, Role};
pub use scope::{department_allowed, Department};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
