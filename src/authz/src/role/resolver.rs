//! Role hierarchy resolution
//!
//! The single place where role thresholds are compared. Call sites ask
//! "does this principal rank at least this high" instead of rebuilding
//! chains like `is_manager || is_power_manager || is_superuser`.

use super::types::Role;
use crate::principal::Principal;

/// True iff `principal_role` sits at or above `threshold` in the role order
#[inline]
pub fn rank_at_least(principal_role: Role, threshold: Role) -> bool {
    principal_role.rank_at_least(threshold)
}

/// Threshold check against a principal; an absent threshold always passes
#[inline]
pub fn is_at_least(principal: &Principal, threshold: Option<Role>) -> bool {
    match threshold {
        Some(threshold) => rank_at_least(principal.role(), threshold),
        None => true,
    }
}
