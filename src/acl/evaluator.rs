//! Permission evaluation
//!
//! Pure, stateless decision functions over a permission set. No I/O, no
//! state, no panics: malformed inputs degrade to a denial, never an error.

use super::hierarchy::role_rank;
use super::types::{Role, UNIVERSAL_WILDCARD};

/// Check a single permission against a permission set.
///
/// Grants when any of the following holds:
/// - the set contains the universal wildcard `"admin.*"`,
/// - the set contains `required` verbatim,
/// - `required` splits into `resource.action` and the set contains
///   `"<resource>.*"`.
///
/// An empty set always denies. A `required` string without a `.` separator
/// degrades to exact matching only. This is the single source of truth for
/// permission matching; every other check composes it.
pub fn has_permission(set: &[String], required: &str) -> bool {
    if set.is_empty() {
        return false;
    }
    if set.iter().any(|p| p == UNIVERSAL_WILDCARD) {
        return true;
    }
    if set.iter().any(|p| p == required) {
        return true;
    }
    match required.split_once('.') {
        Some((resource, _action)) => {
            let wildcard = format!("{resource}.*");
            set.iter().any(|p| *p == wildcard)
        }
        None => false,
    }
}

/// Check whether the set satisfies at least one of the required permissions.
///
/// An empty set denies. An empty requirement list is treated as "nothing
/// required" and grants, given a non-empty set.
pub fn has_any_permission(set: &[String], required: &[String]) -> bool {
    if set.is_empty() {
        return false;
    }
    if required.is_empty() {
        return true;
    }
    required.iter().any(|r| has_permission(set, r))
}

/// Check whether the set satisfies every required permission.
///
/// Same empty-set and empty-requirement edge cases as
/// [`has_any_permission`].
pub fn has_all_permissions(set: &[String], required: &[String]) -> bool {
    if set.is_empty() {
        return false;
    }
    if required.is_empty() {
        return true;
    }
    required.iter().all(|r| has_permission(set, r))
}

/// Check access to an action on a resource.
pub fn can_access_resource(set: &[String], resource: &str, action: &str) -> bool {
    let required = format!("{resource}.{action}");
    has_permission(set, &required)
}

/// Returns `true` if `role` is at least as senior as `required`.
///
/// Reflexive: every role is at least as senior as itself.
pub fn is_role_at_least(role: Role, required: Role) -> bool {
    role_rank(role) >= role_rank(required)
}

/// Items that may carry a permission requirement, e.g. menu entries or
/// dashboard widgets.
pub trait RequiredPermission {
    /// The permission needed to keep this item, if any.
    fn required_permission(&self) -> Option<&str>;
}

/// Keep the items whose permission requirement (if any) is satisfied by the
/// set. Relative order of surviving items is preserved.
pub fn filter_by_required_permission<'a, T: RequiredPermission>(
    items: &'a [T],
    set: &[String],
) -> Vec<&'a T> {
    items
        .iter()
        .filter(|item| match item.required_permission() {
            None => true,
            Some(required) => has_permission(set, required),
        })
        .collect()
}
