//! Tests for the access control engine

#[cfg(test)]
mod tests {
    use crate::acl::AclEngine;
    use crate::acl::cache::DecisionCache;
    use crate::acl::evaluator::{
        RequiredPermission, can_access_resource, filter_by_required_permission,
        has_all_permissions, has_any_permission, has_permission, is_role_at_least,
    };
    use crate::acl::gate::{
        ACCESS_DENIED_MESSAGE, AccessGate, AccessRequirements, GuardOutcome, RouteGuard,
    };
    use crate::acl::navigation::{NavigationNode, default_navigation, filter_navigation};
    use crate::acl::session::{SessionRecord, default_permissions_for, derive_access};
    use crate::acl::types::{AccessDecision, Role};
    use crate::config::{AclConfig, CacheConfig};
    use std::time::Duration;

    fn set(permissions: &[&str]) -> Vec<String> {
        permissions.iter().map(|p| p.to_string()).collect()
    }

    fn engine_with(role: Option<Role>, permissions: &[&str]) -> AclEngine {
        let engine = AclEngine::new(AclConfig::default()).unwrap();
        engine.install_session(&SessionRecord {
            role,
            permissions: set(permissions),
        });
        engine
    }

    // --- evaluator ---

    #[test]
    fn universal_wildcard_grants_everything() {
        let permissions = set(&["admin.*"]);
        assert!(has_permission(&permissions, "tasks.create"));
        assert!(has_permission(&permissions, "users.delete"));
        assert!(has_permission(&permissions, "anything.at-all"));
        assert!(has_permission(&permissions, "no-separator"));
    }

    #[test]
    fn empty_set_always_denies() {
        let empty: Vec<String> = Vec::new();
        assert!(!has_permission(&empty, "tasks.create"));
        assert!(!has_permission(&empty, "admin.*"));
        assert!(!has_permission(&empty, ""));
    }

    #[test]
    fn resource_wildcard_matches_own_resource_only() {
        let permissions = set(&["tasks.*"]);
        assert!(has_permission(&permissions, "tasks.create"));
        assert!(has_permission(&permissions, "tasks.view"));
        assert!(!has_permission(&permissions, "users.create"));
    }

    #[test]
    fn exact_match_grants() {
        let permissions = set(&["leaves.create", "dashboard.view"]);
        assert!(has_permission(&permissions, "leaves.create"));
        assert!(!has_permission(&permissions, "leaves.approve"));
    }

    #[test]
    fn malformed_permission_degrades_to_exact_match() {
        // No `.` separator: wildcard expansion is skipped, never a crash
        let permissions = set(&["standalone"]);
        assert!(has_permission(&permissions, "standalone"));
        assert!(!has_permission(&set(&["standalone.*"]), "standalone"));
    }

    #[test]
    fn any_permission_is_vacuously_true_on_empty_requirements() {
        let permissions = set(&["tasks.view"]);
        assert!(has_any_permission(&permissions, &[]));
        // ...but an empty set still denies, requirements or not
        assert!(!has_any_permission(&[], &[]));
        assert!(!has_any_permission(&[], &set(&["tasks.view"])));
    }

    #[test]
    fn any_permission_needs_one_match() {
        let permissions = set(&["tasks.view"]);
        assert!(has_any_permission(&permissions, &set(&["tasks.view", "users.edit"])));
        assert!(!has_any_permission(&permissions, &set(&["users.edit", "leaves.approve"])));
    }

    #[test]
    fn all_permissions_needs_every_match() {
        let permissions = set(&["tasks.view"]);
        assert!(!has_all_permissions(&permissions, &set(&["tasks.view", "tasks.edit"])));

        let wildcard = set(&["tasks.*"]);
        assert!(has_all_permissions(&wildcard, &set(&["tasks.view", "tasks.edit"])));

        assert!(has_all_permissions(&permissions, &[]));
        assert!(!has_all_permissions(&[], &[]));
    }

    #[test]
    fn resource_action_composition() {
        let permissions = set(&["tasks.*", "dashboard.view"]);
        assert!(can_access_resource(&permissions, "tasks", "create"));
        assert!(can_access_resource(&permissions, "dashboard", "view"));
        assert!(!can_access_resource(&permissions, "users", "edit"));
    }

    #[test]
    fn role_hierarchy_comparisons() {
        assert!(is_role_at_least(Role::Admin, Role::Employee));
        assert!(!is_role_at_least(Role::Employee, Role::Admin));
        assert!(is_role_at_least(Role::Guest, Role::Guest));
        assert!(is_role_at_least(Role::Hr, Role::Supervisor));
        assert!(!is_role_at_least(Role::Provider, Role::Employee));
    }

    struct MenuItem {
        label: &'static str,
        required: Option<&'static str>,
    }

    impl RequiredPermission for MenuItem {
        fn required_permission(&self) -> Option<&str> {
            self.required
        }
    }

    #[test]
    fn filter_keeps_unrestricted_and_granted_items_in_order() {
        let items = [
            MenuItem { label: "home", required: None },
            MenuItem { label: "payroll", required: Some("payroll.view") },
            MenuItem { label: "tasks", required: Some("tasks.view") },
            MenuItem { label: "about", required: None },
        ];
        let permissions = set(&["tasks.*"]);
        let surviving = filter_by_required_permission(&items, &permissions);
        let labels: Vec<&str> = surviving.iter().map(|i| i.label).collect();
        assert_eq!(labels, vec!["home", "tasks", "about"]);
    }

    // --- session derivation ---

    #[test]
    fn unauthenticated_session_derives_empty() {
        let ctx = derive_access(&SessionRecord {
            role: None,
            permissions: set(&["tasks.view"]),
        });
        assert!(!ctx.is_authenticated());
        assert!(ctx.permissions.is_empty());
    }

    #[test]
    fn explicit_permissions_override_role_defaults() {
        let ctx = derive_access(&SessionRecord {
            role: Some(Role::Employee),
            permissions: set(&["reports.view"]),
        });
        assert_eq!(ctx.permissions, set(&["reports.view"]));
        // Role defaults are not mixed in
        assert!(!has_permission(&ctx.permissions, "leaves.create"));
    }

    #[test]
    fn empty_permission_list_falls_back_to_role_defaults() {
        let ctx = derive_access(&SessionRecord {
            role: Some(Role::Employee),
            permissions: vec![],
        });
        assert!(has_permission(&ctx.permissions, "leaves.create"));
        assert!(has_permission(&ctx.permissions, "dashboard.view"));
        assert!(!has_permission(&ctx.permissions, "leaves.approve"));
    }

    #[test]
    fn admin_default_is_the_universal_wildcard() {
        let defaults = default_permissions_for(Role::Admin);
        assert!(has_permission(&defaults, "users.delete"));
        assert!(has_permission(&defaults, "settings.edit"));
    }

    #[test]
    fn guest_default_is_empty() {
        assert!(default_permissions_for(Role::Guest).is_empty());
    }

    // --- decision cache ---

    #[test]
    fn cached_decision_is_idempotent_and_not_recomputed() {
        let cache = DecisionCache::new(CacheConfig::default());
        let permissions = set(&["tasks.*"]);

        assert!(cache.get(&permissions, "tasks.create"));
        assert!(cache.get(&permissions, "tasks.create"));

        let stats = cache.stats();
        assert_eq!(stats.evaluations, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.hits, 1);
    }

    #[test]
    fn clear_forces_recomputation() {
        let cache = DecisionCache::new(CacheConfig::default());
        let permissions = set(&["tasks.*"]);

        assert!(cache.get(&permissions, "tasks.create"));
        cache.clear();
        assert!(cache.is_empty());
        assert!(cache.get(&permissions, "tasks.create"));

        assert_eq!(cache.stats().evaluations, 2);
    }

    #[test]
    fn expired_entry_is_recomputed() {
        let cache = DecisionCache::new(CacheConfig {
            ttl_secs: 0,
            ..CacheConfig::default()
        });
        let permissions = set(&["tasks.*"]);

        assert!(cache.get(&permissions, "tasks.create"));
        std::thread::sleep(Duration::from_millis(5));
        assert!(cache.get(&permissions, "tasks.create"));

        let stats = cache.stats();
        assert_eq!(stats.evaluations, 2);
        assert_eq!(stats.hits, 0);
    }

    #[test]
    fn purge_expired_counts_evictions() {
        let cache = DecisionCache::new(CacheConfig {
            ttl_secs: 0,
            ..CacheConfig::default()
        });
        let permissions = set(&["tasks.*"]);
        cache.get(&permissions, "tasks.create");
        cache.get(&permissions, "tasks.view");
        std::thread::sleep(Duration::from_millis(5));

        cache.purge_expired();
        assert!(cache.is_empty());
        assert_eq!(cache.stats().evictions, 2);
    }

    #[test]
    fn disabled_cache_stays_equivalent_and_stores_nothing() {
        let cache = DecisionCache::new(CacheConfig {
            enabled: false,
            ..CacheConfig::default()
        });
        let permissions = set(&["tasks.*"]);

        assert!(cache.get(&permissions, "tasks.create"));
        assert!(!cache.get(&permissions, "users.edit"));
        assert!(cache.is_empty());
        assert_eq!(cache.stats().evaluations, 2);
    }

    #[test]
    fn cache_matches_uncached_evaluator() {
        let cache = DecisionCache::new(CacheConfig::default());
        let sets = [
            set(&[]),
            set(&["admin.*"]),
            set(&["tasks.*"]),
            set(&["leaves.create", "dashboard.view"]),
        ];
        let checks = ["tasks.create", "leaves.create", "users.edit", "malformed"];
        for permissions in &sets {
            for check in checks {
                assert_eq!(
                    cache.get(permissions, check),
                    has_permission(permissions, check),
                    "cache diverged for {permissions:?} / {check}"
                );
            }
        }
    }

    // --- gates and guards ---

    #[test]
    fn unauthenticated_is_denied_even_without_requirements() {
        let engine = engine_with(None, &[]);
        let gate = AccessGate::new(AccessRequirements::none());
        assert_eq!(gate.evaluate(&engine), AccessDecision::Denied);
    }

    #[test]
    fn no_requirements_grant_any_authenticated_session() {
        let engine = engine_with(Some(Role::Guest), &["dashboard.view"]);
        let gate = AccessGate::new(AccessRequirements::none());
        assert_eq!(gate.evaluate(&engine), AccessDecision::Granted);
    }

    #[test]
    fn single_permission_takes_precedence_over_list() {
        let engine = engine_with(Some(Role::Employee), &["dashboard.view"]);
        // The list alone would grant, but the single permission wins and denies
        let requirements = AccessRequirements {
            permission: Some("users.edit".to_string()),
            permissions: Some(set(&["dashboard.view"])),
            ..AccessRequirements::default()
        };
        let gate = AccessGate::new(requirements);
        assert_eq!(gate.evaluate(&engine), AccessDecision::Denied);
    }

    #[test]
    fn permission_list_any_and_all_modes() {
        let engine = engine_with(Some(Role::Employee), &["dashboard.view"]);

        let any = AccessGate::new(AccessRequirements::any_of(["dashboard.view", "users.edit"]));
        assert_eq!(any.evaluate(&engine), AccessDecision::Granted);

        let all = AccessGate::new(AccessRequirements::all_of(["dashboard.view", "users.edit"]));
        assert_eq!(all.evaluate(&engine), AccessDecision::Denied);
    }

    #[test]
    fn role_requirement_is_exact_equality() {
        let engine = engine_with(Some(Role::Hr), &[]);
        assert_eq!(
            AccessGate::new(AccessRequirements::role(Role::Hr)).evaluate(&engine),
            AccessDecision::Granted
        );
        // Seniority does not satisfy an exact role requirement
        let admin = engine_with(Some(Role::Admin), &[]);
        assert_eq!(
            AccessGate::new(AccessRequirements::role(Role::Hr)).evaluate(&admin),
            AccessDecision::Denied
        );
    }

    #[test]
    fn role_list_is_membership() {
        let gate = AccessGate::new(AccessRequirements::any_role([Role::Admin, Role::Hr]));
        assert_eq!(
            gate.evaluate(&engine_with(Some(Role::Hr), &[])),
            AccessDecision::Granted
        );
        assert_eq!(
            gate.evaluate(&engine_with(Some(Role::Employee), &[])),
            AccessDecision::Denied
        );
    }

    #[test]
    fn permission_and_role_requirements_both_must_pass() {
        let requirements =
            AccessRequirements::permission("leaves.approve").and_any_role([Role::Hr, Role::Manager]);
        let gate = AccessGate::new(requirements);

        // Hr with leave approval: both steps pass
        assert_eq!(
            gate.evaluate(&engine_with(Some(Role::Hr), &["leaves.*"])),
            AccessDecision::Granted
        );
        // Right permission, wrong role
        assert_eq!(
            gate.evaluate(&engine_with(Some(Role::Employee), &["leaves.*"])),
            AccessDecision::Denied
        );
        // Right role, missing permission
        assert_eq!(
            gate.evaluate(&engine_with(Some(Role::Hr), &["dashboard.view"])),
            AccessDecision::Denied
        );
    }

    #[test]
    fn gate_select_maps_to_content_or_fallback() {
        let engine = engine_with(Some(Role::Employee), &[]);

        let granted = AccessGate::new(AccessRequirements::permission("leaves.create"));
        assert_eq!(granted.select(&engine, "form", Some("upgrade")), Some("form"));

        let denied = AccessGate::new(AccessRequirements::permission("leaves.approve"));
        assert_eq!(denied.select(&engine, "form", Some("upgrade")), Some("upgrade"));
        assert_eq!(denied.select(&engine, "form", None), None);
    }

    #[test]
    fn gate_render_callback_receives_the_decision() {
        let engine = engine_with(Some(Role::Employee), &[]);
        let gate = AccessGate::new(AccessRequirements::permission("leaves.approve"));
        let rendered = gate.render_with(&engine, |granted| {
            if granted { "approve-button" } else { "read-only-note" }
        });
        assert_eq!(rendered, "read-only-note");
    }

    #[test]
    fn route_guard_outcomes() {
        let guard = RouteGuard::new(AccessRequirements::role(Role::Admin));

        let admin = engine_with(Some(Role::Admin), &[]);
        assert_eq!(guard.resolve(&admin, "settings", None), GuardOutcome::Granted("settings"));

        let employee = engine_with(Some(Role::Employee), &[]);
        assert_eq!(
            guard.resolve(&employee, "settings", Some("home")),
            GuardOutcome::Fallback("home")
        );

        let outcome = guard.resolve(&employee, "settings", None);
        assert_eq!(outcome, GuardOutcome::AccessDenied);
        assert_eq!(outcome.denied_message(), Some(ACCESS_DENIED_MESSAGE));

        let silent = RouteGuard::silent(AccessRequirements::role(Role::Admin));
        assert_eq!(silent.resolve(&employee, "settings", None), GuardOutcome::Hidden);
    }

    #[test]
    fn route_guard_role_list_scenario() {
        let guard = RouteGuard::new(AccessRequirements::any_role([Role::Admin, Role::Hr]));

        let hr = engine_with(Some(Role::Hr), &[]);
        assert!(guard.resolve(&hr, "approvals", None).is_granted());

        let employee = engine_with(Some(Role::Employee), &[]);
        assert_eq!(guard.resolve(&employee, "approvals", None), GuardOutcome::AccessDenied);
    }

    #[test]
    #[should_panic(expected = "session context")]
    fn gate_without_installed_session_panics() {
        let engine = AclEngine::new(AclConfig::default()).unwrap();
        let gate = AccessGate::new(AccessRequirements::none());
        let _ = gate.evaluate(&engine);
    }

    // --- engine ---

    #[test]
    fn selectors_fail_closed_without_a_session() {
        let engine = AclEngine::new(AclConfig::default()).unwrap();
        assert!(!engine.can("dashboard.view"));
        assert!(!engine.can_any(&set(&["dashboard.view"])));
        assert!(!engine.can_all(&[]));
        assert!(!engine.can_access("tasks", "view"));
        assert!(!engine.has_role(Role::Guest));
        assert!(!engine.is_at_least(Role::Guest));
        assert!(engine.navigation().is_empty());
        assert!(engine.try_context().is_none());
        assert!(engine.require_context().is_err());
    }

    #[test]
    fn engine_selectors_follow_the_session() {
        let engine = engine_with(Some(Role::Manager), &[]);
        assert!(engine.can("tasks.assign"));
        assert!(engine.can("leaves.approve"));
        assert!(!engine.can("settings.edit"));
        assert!(engine.can_access("projects", "edit"));
        assert!(engine.has_role(Role::Manager));
        assert!(engine.is_at_least(Role::Supervisor));
        assert!(!engine.is_at_least(Role::Admin));
    }

    #[test]
    fn installing_a_session_clears_cached_decisions() {
        let engine = engine_with(Some(Role::Employee), &[]);
        assert!(engine.can("leaves.create"));
        assert_eq!(engine.cache().stats().evaluations, 1);

        // Same check after a permission change must be recomputed
        engine.install_session(&SessionRecord {
            role: Some(Role::Employee),
            permissions: set(&["dashboard.view"]),
        });
        assert!(!engine.can("leaves.create"));
        assert_eq!(engine.cache().stats().evaluations, 2);
    }

    #[test]
    fn clear_session_denies_and_empties_the_cache() {
        let engine = engine_with(Some(Role::Admin), &[]);
        assert!(engine.can("settings.edit"));
        engine.clear_session();
        assert!(!engine.can("settings.edit"));
        assert!(engine.cache().is_empty());
        assert!(engine.try_context().is_none());
    }

    // --- navigation ---

    fn two_level_tree(parent_role: Role, child_role: Role) -> Vec<NavigationNode> {
        vec![NavigationNode {
            title: "Parent".to_string(),
            route: "/parent".to_string(),
            icon: String::new(),
            roles: vec![parent_role],
            visible: true,
            order: 0,
            children: Some(vec![NavigationNode {
                title: "Child".to_string(),
                route: "/parent/child".to_string(),
                icon: String::new(),
                roles: vec![child_role],
                visible: true,
                order: 0,
                children: None,
            }]),
        }]
    }

    #[test]
    fn parent_and_child_role_gates_are_independent() {
        let tree = two_level_tree(Role::Manager, Role::Hr);

        // Parent's role sees the parent with no children
        let for_manager = filter_navigation(&tree, Role::Manager);
        assert_eq!(for_manager.len(), 1);
        assert!(for_manager[0].children.is_none());

        // Child's role is excluded at the parent, so nothing survives
        let for_hr = filter_navigation(&tree, Role::Hr);
        assert!(for_hr.is_empty());
    }

    #[test]
    fn invisible_nodes_are_filtered() {
        let mut tree = two_level_tree(Role::Manager, Role::Manager);
        tree[0].visible = false;
        assert!(filter_navigation(&tree, Role::Manager).is_empty());
    }

    #[test]
    fn surviving_siblings_are_sorted_by_order() {
        let mut tree = default_navigation();
        tree.reverse();
        let filtered = filter_navigation(&tree, Role::Admin);
        let orders: Vec<i32> = filtered.iter().map(|n| n.order).collect();
        let mut sorted = orders.clone();
        sorted.sort_unstable();
        assert_eq!(orders, sorted);
    }

    #[test]
    fn default_menu_is_role_gated() {
        let tree = default_navigation();

        let for_admin = filter_navigation(&tree, Role::Admin);
        assert!(for_admin.iter().any(|n| n.route == "/settings"));
        assert!(for_admin.iter().any(|n| n.route == "/people"));

        let employee = filter_navigation(&tree, Role::Employee);
        assert!(employee.iter().all(|n| n.route != "/settings"));
        assert!(employee.iter().any(|n| n.route == "/leaves"));
    }

    #[test]
    fn navigation_tree_parses_from_json() {
        let json = r#"[
            {"title": "Dashboard", "route": "/dashboard", "roles": ["employee"]},
            {"title": "Admin", "route": "/admin", "roles": ["admin"], "order": 5}
        ]"#;
        let tree = NavigationNode::tree_from_json(json).unwrap();
        assert_eq!(tree.len(), 2);
        assert!(tree[0].visible);
        assert_eq!(tree[1].order, 5);
        let filtered = filter_navigation(&tree, Role::Employee);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].route, "/dashboard");
    }
}
