//! Role hierarchy rank table
//!
//! Ranks reflect organizational seniority and are used only for
//! "is at least as senior as" comparisons, never for permission derivation.

use super::types::Role;
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Static role rank table, strictly ordered by seniority.
static ROLE_RANKS: Lazy<HashMap<Role, u8>> = Lazy::new(|| {
    HashMap::from([
        (Role::Admin, 70),
        (Role::Manager, 60),
        (Role::Hr, 50),
        (Role::Supervisor, 40),
        (Role::Employee, 30),
        (Role::Provider, 20),
        (Role::Guest, 10),
    ])
});

/// Returns the seniority rank for a role. A role missing from the table
/// ranks 0, below every configured role.
pub fn role_rank(role: Role) -> u8 {
    ROLE_RANKS.get(&role).copied().unwrap_or(0)
}
