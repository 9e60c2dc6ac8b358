//! Access control type definitions

use serde::{Deserialize, Serialize};
use std::fmt;

/// Universal wildcard permission. A set containing it passes every check.
pub const UNIVERSAL_WILDCARD: &str = "admin.*";

/// User role within the organization.
///
/// Exactly one role is active per session, fixed until re-authentication.
/// Roles are coarse-grained tags used for hierarchy comparisons and
/// menu/route gating; fine-grained capabilities are permission strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Full system access
    Admin,
    /// Project and team management
    Manager,
    /// Human resources operations
    Hr,
    /// Team supervision and task assignment
    Supervisor,
    /// Regular employee
    Employee,
    /// External service provider
    Provider,
    /// Unprivileged visitor
    Guest,
}

impl Role {
    /// Returns the role name as used in configuration and permission tables.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Manager => "manager",
            Self::Hr => "hr",
            Self::Supervisor => "supervisor",
            Self::Employee => "employee",
            Self::Provider => "provider",
            Self::Guest => "guest",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of an access evaluation.
///
/// Calling code maps this onto whatever presentation it owns: render
/// children, render a fallback, hide a menu entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessDecision {
    /// Access is granted
    Granted,
    /// Access is denied
    Denied,
}

impl AccessDecision {
    /// Returns `true` if access was granted.
    pub fn is_granted(&self) -> bool {
        matches!(self, Self::Granted)
    }

    /// Returns `true` if access was denied.
    pub fn is_denied(&self) -> bool {
        matches!(self, Self::Denied)
    }

    /// Build a decision from a boolean check result.
    pub fn from_bool(granted: bool) -> Self {
        if granted { Self::Granted } else { Self::Denied }
    }
}

/// Permission vocabulary for the workforce domain.
///
/// A closed, hand-authored catalog. The matching rules in
/// [`crate::acl::evaluator`] are the behavioral contract; this list only
/// keeps call sites free of string typos.
pub mod perms {
    /// View the dashboard
    pub const DASHBOARD_VIEW: &str = "dashboard.view";
    /// View user accounts
    pub const USERS_VIEW: &str = "users.view";
    /// Create and update user accounts
    pub const USERS_EDIT: &str = "users.edit";
    /// View the employee directory
    pub const EMPLOYEES_VIEW: &str = "employees.view";
    /// Create and update employee records
    pub const EMPLOYEES_EDIT: &str = "employees.edit";
    /// View tasks
    pub const TASKS_VIEW: &str = "tasks.view";
    /// Create tasks
    pub const TASKS_CREATE: &str = "tasks.create";
    /// Assign tasks to employees
    pub const TASKS_ASSIGN: &str = "tasks.assign";
    /// View projects
    pub const PROJECTS_VIEW: &str = "projects.view";
    /// Create and update projects
    pub const PROJECTS_EDIT: &str = "projects.edit";
    /// View leave requests
    pub const LEAVES_VIEW: &str = "leaves.view";
    /// Submit leave requests
    pub const LEAVES_CREATE: &str = "leaves.create";
    /// Approve or reject leave requests
    pub const LEAVES_APPROVE: &str = "leaves.approve";
    /// View company assets
    pub const ASSETS_VIEW: &str = "assets.view";
    /// Assign and update company assets
    pub const ASSETS_EDIT: &str = "assets.edit";
    /// View reports
    pub const REPORTS_VIEW: &str = "reports.view";
    /// Change application settings
    pub const SETTINGS_EDIT: &str = "settings.edit";
}
