//! Role hierarchy module
//!
//! A fixed, compile-time total order over roles and the resolver that
//! answers threshold questions against it.
//!
//! # Example
//!
//! ```rust
//! use roster_authz::role::{rank_at_least, Role};
//!
//! assert!(rank_at_least(Role::PowerManager, Role::Manager));
//! assert!(!rank_at_least(Role::Admin, Role::Manager));
//! ```

mod resolver;
mod types;

pub use resolver::{is_at_least, rank_at_least};
pub use types::Role;
