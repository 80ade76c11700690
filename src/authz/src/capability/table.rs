//! Capability lookup

use super::types::CapabilityRef;
use crate::principal::Principal;

/// Whether `principal` holds `capability`
///
/// Superusers hold every capability implicitly. Everyone else needs the flag
/// present and set. A name this build does not recognize is never granted.
pub fn has_capability(principal: &Principal, capability: &CapabilityRef) -> bool {
    if principal.role().is_superuser() {
        return true;
    }

    match capability {
        CapabilityRef::Known(cap) => principal.capabilities().is_granted(*cap),
        CapabilityRef::Unrecognized(_) => false,
    }
}
