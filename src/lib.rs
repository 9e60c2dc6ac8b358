//! # workforce-acl
//!
//! Access control engine for workforce and HR applications. Decides, given a
//! user's role and permission set, whether a screen, route, or navigation
//! entry may be shown.
//!
//! ## Features
//!
//! - **Wildcard permission matching**: `"tasks.create"` style permission
//!   strings with `"tasks.*"` resource wildcards and a universal `"admin.*"`
//! - **Role hierarchy**: seniority comparisons over a static rank table
//! - **Decision caching**: a TTL-bounded memo over the permission check,
//!   observably equivalent to the uncached evaluator
//! - **Gate constructs**: a conditional-render gate and a route guard built
//!   on one shared evaluation pipeline
//! - **Navigation filtering**: recursive role-gated filtering of a menu tree
//!
//! Decisions are advisory UX gating. The server is assumed to enforce real
//! authorization independently; this engine never acts as a security
//! boundary.
//!
//! ## Quick Start
//!
//! ```rust
//! use workforce_acl::{AclConfig, AclEngine, Role, SessionRecord};
//! use workforce_acl::{AccessRequirements, RouteGuard};
//!
//! # fn main() -> workforce_acl::Result<()> {
//! let engine = AclEngine::new(AclConfig::default())?;
//!
//! // Session with no explicit permissions falls back to role defaults.
//! engine.install_session(&SessionRecord {
//!     role: Some(Role::Employee),
//!     permissions: vec![],
//! });
//!
//! assert!(engine.can("leaves.create"));
//! assert!(!engine.can("leaves.approve"));
//!
//! let guard = RouteGuard::new(AccessRequirements::any_role([Role::Admin, Role::Hr]));
//! let outcome = guard.resolve(&engine, "approvals-screen", None);
//! assert!(!outcome.is_granted());
//! # Ok(())
//! # }
//! ```

#![warn(clippy::all)]

pub mod acl;
pub mod config;
pub mod utils;

// Re-export main types
pub use acl::cache::{DecisionCache, DecisionCacheStats};
pub use acl::gate::{
    ACCESS_DENIED_MESSAGE, AccessGate, AccessRequirements, GuardOutcome, RouteGuard,
};
pub use acl::navigation::NavigationNode;
pub use acl::session::{AccessContext, SessionRecord, derive_access};
pub use acl::types::{AccessDecision, Role};
pub use acl::AclEngine;
pub use config::{AclConfig, CacheConfig};
pub use utils::error::{AclError, Result};
