//! Access gate constructs
//!
//! Two reusable decision points over one evaluation pipeline: a
//! conditional-render gate and a route/screen guard. Both return
//! discriminated results that calling code maps onto its own presentation.

use super::AclEngine;
use super::cache::DecisionCache;
use super::evaluator;
use super::session::AccessContext;
use super::types::{AccessDecision, Role};
use tracing::debug;

/// Built-in message rendered when a route guard denies without a fallback.
pub const ACCESS_DENIED_MESSAGE: &str = "Access Denied";

/// Combined permission and role requirements for a gate.
///
/// Precedence, evaluated in order and short-circuiting:
///
/// 1. unauthenticated sessions are denied unconditionally;
/// 2. a single [`permission`] wins over a [`permissions`] list; the list is
///    any-of by default, all-of when [`require_all`] is set; no permission
///    requirement grants by default;
/// 3. a single [`role`] is exact equality, else [`roles`] is membership; no
///    role requirement passes through;
/// 4. the final decision is the AND of steps 2 and 3.
///
/// [`permission`]: field@AccessRequirements::permission
/// [`permissions`]: field@AccessRequirements::permissions
/// [`require_all`]: field@AccessRequirements::require_all
/// [`role`]: field@AccessRequirements::role
/// [`roles`]: field@AccessRequirements::roles
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccessRequirements {
    /// Single required permission, takes precedence over `permissions`
    pub permission: Option<String>,
    /// Required permission list
    pub permissions: Option<Vec<String>>,
    /// Require every listed permission instead of any
    pub require_all: bool,
    /// Single required role, takes precedence over `roles`
    pub role: Option<Role>,
    /// Allowed role list
    pub roles: Option<Vec<Role>>,
}

impl AccessRequirements {
    /// No requirements: any authenticated session is granted.
    pub fn none() -> Self {
        Self::default()
    }

    /// Require a single permission.
    pub fn permission(permission: impl Into<String>) -> Self {
        Self {
            permission: Some(permission.into()),
            ..Self::default()
        }
    }

    /// Require at least one of the listed permissions.
    pub fn any_of<I, S>(permissions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            permissions: Some(permissions.into_iter().map(Into::into).collect()),
            require_all: false,
            ..Self::default()
        }
    }

    /// Require every listed permission.
    pub fn all_of<I, S>(permissions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            permissions: Some(permissions.into_iter().map(Into::into).collect()),
            require_all: true,
            ..Self::default()
        }
    }

    /// Require an exact role.
    pub fn role(role: Role) -> Self {
        Self {
            role: Some(role),
            ..Self::default()
        }
    }

    /// Require membership in a role list.
    pub fn any_role(roles: impl IntoIterator<Item = Role>) -> Self {
        Self {
            roles: Some(roles.into_iter().collect()),
            ..Self::default()
        }
    }

    /// Add an exact role requirement on top of existing requirements.
    pub fn and_role(mut self, role: Role) -> Self {
        self.role = Some(role);
        self
    }

    /// Add a role-list requirement on top of existing requirements.
    pub fn and_any_role(mut self, roles: impl IntoIterator<Item = Role>) -> Self {
        self.roles = Some(roles.into_iter().collect());
        self
    }
}

/// Evaluate combined requirements against an access context.
///
/// The single-permission path goes through the decision cache; list checks
/// are cheap compositions and evaluate directly.
pub fn evaluate(
    ctx: &AccessContext,
    requirements: &AccessRequirements,
    cache: &DecisionCache,
) -> AccessDecision {
    if !ctx.is_authenticated() {
        return AccessDecision::Denied;
    }

    let permission_ok = if let Some(required) = &requirements.permission {
        cache.get(&ctx.permissions, required)
    } else if let Some(required) = &requirements.permissions {
        if requirements.require_all {
            evaluator::has_all_permissions(&ctx.permissions, required)
        } else {
            evaluator::has_any_permission(&ctx.permissions, required)
        }
    } else {
        true
    };
    if !permission_ok {
        debug!(role = ?ctx.role, "access denied by permission requirement");
        return AccessDecision::Denied;
    }

    let role_ok = if let Some(required) = requirements.role {
        ctx.role == Some(required)
    } else if let Some(required) = &requirements.roles {
        ctx.role.is_some_and(|role| required.contains(&role))
    } else {
        true
    };
    if !role_ok {
        debug!(role = ?ctx.role, "access denied by role requirement");
        return AccessDecision::Denied;
    }

    AccessDecision::Granted
}

/// Conditional-render gate.
///
/// Decides whether a piece of UI may render for the current session.
///
/// # Panics
///
/// Evaluating a gate before a session context was installed on the engine is
/// a wiring bug and panics; see [`AclEngine::context`].
#[derive(Debug, Clone)]
pub struct AccessGate {
    requirements: AccessRequirements,
}

impl AccessGate {
    /// Create a gate with the given requirements.
    pub fn new(requirements: AccessRequirements) -> Self {
        Self { requirements }
    }

    /// Evaluate the gate for the engine's current session.
    pub fn evaluate(&self, engine: &AclEngine) -> AccessDecision {
        evaluate(&engine.context(), &self.requirements, engine.cache())
    }

    /// Map the decision onto content: `content` when granted, `fallback`
    /// when denied (default: nothing).
    pub fn select<T>(&self, engine: &AclEngine, content: T, fallback: Option<T>) -> Option<T> {
        match self.evaluate(engine) {
            AccessDecision::Granted => Some(content),
            AccessDecision::Denied => fallback,
        }
    }

    /// Callback mode: hand the boolean to `render` and return its result.
    pub fn render_with<T>(&self, engine: &AclEngine, render: impl FnOnce(bool) -> T) -> T {
        render(self.evaluate(engine).is_granted())
    }
}

/// What a route guard resolved to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardOutcome<T> {
    /// Requirements met, render the screen
    Granted(T),
    /// Denied, render the caller-supplied fallback
    Fallback(T),
    /// Denied, render the built-in access denied view
    AccessDenied,
    /// Denied, render nothing
    Hidden,
}

impl<T> GuardOutcome<T> {
    /// Returns `true` if the screen itself was granted.
    pub fn is_granted(&self) -> bool {
        matches!(self, Self::Granted(_))
    }

    /// The built-in denial message, for the [`AccessDenied`] outcome.
    ///
    /// [`AccessDenied`]: Self::AccessDenied
    pub fn denied_message(&self) -> Option<&'static str> {
        match self {
            Self::AccessDenied => Some(ACCESS_DENIED_MESSAGE),
            _ => None,
        }
    }
}

/// Route/screen guard.
///
/// On denial renders the caller-supplied fallback if present, else the
/// built-in access denied view, or nothing when constructed with
/// [`RouteGuard::silent`].
///
/// # Panics
///
/// Like [`AccessGate`], resolving a guard before a session context was
/// installed panics.
#[derive(Debug, Clone)]
pub struct RouteGuard {
    requirements: AccessRequirements,
    show_fallback: bool,
}

impl RouteGuard {
    /// Create a guard that shows the built-in denied view when no fallback
    /// is supplied.
    pub fn new(requirements: AccessRequirements) -> Self {
        Self {
            requirements,
            show_fallback: true,
        }
    }

    /// Create a guard that renders nothing on denial without a fallback.
    pub fn silent(requirements: AccessRequirements) -> Self {
        Self {
            requirements,
            show_fallback: false,
        }
    }

    /// Evaluate the guard for the engine's current session.
    pub fn evaluate(&self, engine: &AclEngine) -> AccessDecision {
        evaluate(&engine.context(), &self.requirements, engine.cache())
    }

    /// Resolve the guard to a render outcome.
    pub fn resolve<T>(&self, engine: &AclEngine, screen: T, fallback: Option<T>) -> GuardOutcome<T> {
        if self.evaluate(engine).is_granted() {
            return GuardOutcome::Granted(screen);
        }
        match fallback {
            Some(view) => GuardOutcome::Fallback(view),
            None if self.show_fallback => GuardOutcome::AccessDenied,
            None => GuardOutcome::Hidden,
        }
    }
}
