//! Access control engine
//!
//! This module provides the full decision pipeline: session-derived access
//! context, pure permission evaluation, a TTL decision cache, gate/guard
//! constructs, and role-gated navigation filtering.

pub mod cache;
pub mod evaluator;
pub mod gate;
pub mod hierarchy;
pub mod navigation;
pub mod session;
#[cfg(test)]
mod tests;
pub mod types;

// Re-export commonly used types
pub use cache::{DecisionCache, DecisionCacheStats};
pub use gate::{ACCESS_DENIED_MESSAGE, AccessGate, AccessRequirements, GuardOutcome, RouteGuard};
pub use navigation::NavigationNode;
pub use session::{AccessContext, SessionRecord, derive_access};
pub use types::{AccessDecision, Role};

use crate::config::AclConfig;
use crate::utils::error::{AclError, Result};
use parking_lot::RwLock;
use tracing::{debug, info};

/// Main access control engine.
///
/// Owns the decision cache and the current session snapshot. Explicitly
/// constructed and injected rather than process-global; the convention is
/// one instance per application process, shared by reference.
///
/// All convenience selectors ([`can`], [`has_role`], ...) fail closed when
/// no session is installed. Only [`context`] and the gate constructs built
/// on it fail loud, since evaluating a gate with no session wiring is a
/// programmer error rather than a runtime access decision.
///
/// [`can`]: Self::can
/// [`has_role`]: Self::has_role
/// [`context`]: Self::context
#[derive(Debug)]
pub struct AclEngine {
    config: AclConfig,
    cache: DecisionCache,
    session: RwLock<Option<AccessContext>>,
}

impl AclEngine {
    /// Create a new engine from validated configuration.
    pub fn new(config: AclConfig) -> Result<Self> {
        config.validate()?;
        info!(
            cache_enabled = config.cache.enabled,
            cache_ttl_secs = config.cache.ttl_secs,
            "initializing access control engine"
        );
        let cache = DecisionCache::new(config.cache.clone());
        Ok(Self {
            config,
            cache,
            session: RwLock::new(None),
        })
    }

    /// The engine configuration.
    pub fn config(&self) -> &AclConfig {
        &self.config
    }

    /// The decision cache.
    pub fn cache(&self) -> &DecisionCache {
        &self.cache
    }

    /// Derive and install the access context for a session.
    ///
    /// Clears the decision cache: entries computed for a previous permission
    /// set must never survive a session change.
    pub fn install_session(&self, record: &SessionRecord) {
        let ctx = derive_access(record);
        debug!(
            role = ctx.role.map(|r| r.as_str()),
            permissions = ctx.permissions.len(),
            "installing session context"
        );
        *self.session.write() = Some(ctx);
        self.cache.clear();
    }

    /// Drop the session context, e.g. on logout. Clears the decision cache.
    pub fn clear_session(&self) {
        *self.session.write() = None;
        self.cache.clear();
        info!("session context cleared");
    }

    /// The current access context, if a session was installed.
    ///
    /// An installed unauthenticated session (`role: None`) is still `Some`;
    /// `None` means no session was ever installed.
    pub fn try_context(&self) -> Option<AccessContext> {
        self.session.read().clone()
    }

    /// The current access context, or a [`AclError::Session`] error when no
    /// session was installed.
    pub fn require_context(&self) -> Result<AccessContext> {
        self.try_context()
            .ok_or_else(|| AclError::session("no session context installed"))
    }

    /// The current access context.
    ///
    /// # Panics
    ///
    /// Panics when no session context was ever installed. Gates and guards
    /// evaluated through an unwired engine indicate a setup bug; install a
    /// session (even an unauthenticated one) with
    /// [`install_session`](Self::install_session) first.
    pub fn context(&self) -> AccessContext {
        match self.try_context() {
            Some(ctx) => ctx,
            None => panic!(
                "access gate evaluated before a session context was installed; \
                 call AclEngine::install_session first"
            ),
        }
    }

    /// Cached single-permission check against the current session.
    ///
    /// Denies when no session is installed or the session is
    /// unauthenticated.
    pub fn can(&self, permission: &str) -> bool {
        match self.try_context() {
            Some(ctx) if ctx.is_authenticated() => self.cache.get(&ctx.permissions, permission),
            _ => false,
        }
    }

    /// Any-of permission check against the current session.
    pub fn can_any(&self, required: &[String]) -> bool {
        match self.try_context() {
            Some(ctx) if ctx.is_authenticated() => {
                evaluator::has_any_permission(&ctx.permissions, required)
            }
            _ => false,
        }
    }

    /// All-of permission check against the current session.
    pub fn can_all(&self, required: &[String]) -> bool {
        match self.try_context() {
            Some(ctx) if ctx.is_authenticated() => {
                evaluator::has_all_permissions(&ctx.permissions, required)
            }
            _ => false,
        }
    }

    /// Resource/action check against the current session.
    pub fn can_access(&self, resource: &str, action: &str) -> bool {
        match self.try_context() {
            Some(ctx) if ctx.is_authenticated() => {
                evaluator::can_access_resource(&ctx.permissions, resource, action)
            }
            _ => false,
        }
    }

    /// Returns `true` if the current session holds exactly this role.
    pub fn has_role(&self, role: Role) -> bool {
        self.try_context().and_then(|ctx| ctx.role) == Some(role)
    }

    /// Returns `true` if the current role is at least as senior as `role`.
    pub fn is_at_least(&self, role: Role) -> bool {
        self.try_context()
            .and_then(|ctx| ctx.role)
            .is_some_and(|current| evaluator::is_role_at_least(current, role))
    }

    /// The navigation menu filtered and sorted for the current role.
    ///
    /// Empty when no session is installed or the session is
    /// unauthenticated. Uses the configured tree, falling back to the
    /// built-in default menu.
    pub fn navigation(&self) -> Vec<NavigationNode> {
        let Some(role) = self.try_context().and_then(|ctx| ctx.role) else {
            return Vec::new();
        };
        if self.config.navigation.is_empty() {
            navigation::filter_navigation(&navigation::default_navigation(), role)
        } else {
            navigation::filter_navigation(&self.config.navigation, role)
        }
    }
}
