//! Capability table
//!
//! Per-principal boolean grants that are orthogonal to role rank. A lower
//! role can hold a capability a higher role lacks; only the superuser holds
//! every capability without an explicit grant.

mod table;
mod types;

pub use table::has_capability;
pub use types::{Capability, CapabilityRef, CapabilitySet};
