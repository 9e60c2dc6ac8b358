//! Session-derived access context
//!
//! The auth provider is an external collaborator; the derivation rule here
//! is the part this crate owns: explicit permissions from the server always
//! win, role defaults are the fallback for sessions without a fine-grained
//! grant.

use super::types::{Role, UNIVERSAL_WILDCARD, perms};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Raw session data as supplied by the authentication provider.
///
/// Refreshed on login, logout, token refresh, and profile update.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionRecord {
    /// Declared role, `None` when unauthenticated
    #[serde(default)]
    pub role: Option<Role>,
    /// Explicit permission grant, may be empty
    #[serde(default)]
    pub permissions: Vec<String>,
}

/// Immutable access snapshot flowing into every evaluation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccessContext {
    /// Active role, `None` when unauthenticated
    pub role: Option<Role>,
    /// Effective permission set
    pub permissions: Vec<String>,
}

impl AccessContext {
    /// Returns `true` if a role is present.
    pub fn is_authenticated(&self) -> bool {
        self.role.is_some()
    }
}

/// Static role to default-permissions fallback table.
static ROLE_DEFAULT_PERMISSIONS: Lazy<HashMap<Role, Vec<&'static str>>> = Lazy::new(|| {
    HashMap::from([
        (Role::Admin, vec![UNIVERSAL_WILDCARD]),
        (
            Role::Manager,
            vec![
                perms::DASHBOARD_VIEW,
                "tasks.*",
                "projects.*",
                perms::EMPLOYEES_VIEW,
                perms::LEAVES_APPROVE,
                perms::REPORTS_VIEW,
            ],
        ),
        (
            Role::Hr,
            vec![
                perms::DASHBOARD_VIEW,
                "employees.*",
                "leaves.*",
                perms::USERS_VIEW,
                perms::REPORTS_VIEW,
            ],
        ),
        (
            Role::Supervisor,
            vec![
                perms::DASHBOARD_VIEW,
                perms::TASKS_VIEW,
                perms::TASKS_ASSIGN,
                perms::LEAVES_VIEW,
                perms::EMPLOYEES_VIEW,
            ],
        ),
        (
            Role::Employee,
            vec![
                perms::DASHBOARD_VIEW,
                perms::LEAVES_CREATE,
                perms::TASKS_VIEW,
                perms::ASSETS_VIEW,
            ],
        ),
        (Role::Provider, vec![perms::DASHBOARD_VIEW, perms::TASKS_VIEW]),
        (Role::Guest, vec![]),
    ])
});

/// Default permission set granted to a role when the server supplies no
/// explicit permission list.
pub fn default_permissions_for(role: Role) -> Vec<String> {
    ROLE_DEFAULT_PERMISSIONS
        .get(&role)
        .map(|permissions| permissions.iter().map(|p| (*p).to_string()).collect())
        .unwrap_or_default()
}

/// Derive the effective access context from a session record.
///
/// Unauthenticated sessions get an empty permission set. An explicit
/// non-empty permission list is used verbatim; otherwise the role's default
/// permissions apply.
pub fn derive_access(session: &SessionRecord) -> AccessContext {
    let Some(role) = session.role else {
        return AccessContext {
            role: None,
            permissions: Vec::new(),
        };
    };
    let permissions = if session.permissions.is_empty() {
        default_permissions_for(role)
    } else {
        session.permissions.clone()
    };
    AccessContext {
        role: Some(role),
        permissions,
    }
}
