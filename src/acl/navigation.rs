//! Navigation menu filtering
//!
//! The menu is a static tree authored in configuration; it is filtered per
//! render for the active role, never mutated.

use super::types::Role;
use crate::utils::error::Result;
use serde::{Deserialize, Serialize};

/// One entry in the navigation menu tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NavigationNode {
    /// Display title
    pub title: String,
    /// Target route
    pub route: String,
    /// Icon reference
    #[serde(default)]
    pub icon: String,
    /// Roles allowed to see this entry
    pub roles: Vec<Role>,
    /// Explicit visibility flag
    #[serde(default = "default_visible")]
    pub visible: bool,
    /// Ordering key, ascending
    #[serde(default)]
    pub order: i32,
    /// Child entries
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<NavigationNode>>,
}

fn default_visible() -> bool {
    true
}

impl NavigationNode {
    /// Parse a navigation tree from a JSON document.
    pub fn tree_from_json(content: &str) -> Result<Vec<NavigationNode>> {
        Ok(serde_json::from_str(content)?)
    }
}

/// Filter a navigation tree for a role.
///
/// A node survives when it is visible and its role list contains `role`.
/// Children are filtered recursively and dropped to `None` when empty.
/// Parent and child role lists gate independently: a parent visible to the
/// role may survive with no children, while a child visible to another role
/// disappears with its excluded parent. Surviving siblings are sorted by
/// their ordering key.
pub fn filter_navigation(nodes: &[NavigationNode], role: Role) -> Vec<NavigationNode> {
    let mut surviving: Vec<NavigationNode> = nodes
        .iter()
        .filter(|node| node.visible && node.roles.contains(&role))
        .map(|node| {
            let children = node
                .children
                .as_deref()
                .map(|children| filter_navigation(children, role))
                .filter(|children| !children.is_empty());
            NavigationNode {
                children,
                ..node.clone()
            }
        })
        .collect();
    surviving.sort_by_key(|node| node.order);
    surviving
}

/// Hand-authored default menu, used when configuration supplies none.
pub fn default_navigation() -> Vec<NavigationNode> {
    let all = vec![
        Role::Admin,
        Role::Manager,
        Role::Hr,
        Role::Supervisor,
        Role::Employee,
        Role::Provider,
    ];
    let management = vec![Role::Admin, Role::Manager, Role::Supervisor];
    let people = vec![Role::Admin, Role::Hr];
    vec![
        NavigationNode {
            title: "Dashboard".to_string(),
            route: "/dashboard".to_string(),
            icon: "home".to_string(),
            roles: all.clone(),
            visible: true,
            order: 0,
            children: None,
        },
        NavigationNode {
            title: "Tasks".to_string(),
            route: "/tasks".to_string(),
            icon: "check-square".to_string(),
            roles: all,
            visible: true,
            order: 10,
            children: None,
        },
        NavigationNode {
            title: "Projects".to_string(),
            route: "/projects".to_string(),
            icon: "briefcase".to_string(),
            roles: management,
            visible: true,
            order: 20,
            children: None,
        },
        NavigationNode {
            title: "People".to_string(),
            route: "/people".to_string(),
            icon: "users".to_string(),
            roles: people.clone(),
            visible: true,
            order: 30,
            children: Some(vec![
                NavigationNode {
                    title: "Directory".to_string(),
                    route: "/people/directory".to_string(),
                    icon: "book".to_string(),
                    roles: people.clone(),
                    visible: true,
                    order: 0,
                    children: None,
                },
                NavigationNode {
                    title: "Leave Approvals".to_string(),
                    route: "/people/leaves".to_string(),
                    icon: "calendar".to_string(),
                    roles: people,
                    visible: true,
                    order: 1,
                    children: None,
                },
            ]),
        },
        NavigationNode {
            title: "My Leaves".to_string(),
            route: "/leaves".to_string(),
            icon: "calendar".to_string(),
            roles: vec![Role::Employee, Role::Supervisor, Role::Manager, Role::Hr],
            visible: true,
            order: 40,
            children: None,
        },
        NavigationNode {
            title: "Assets".to_string(),
            route: "/assets".to_string(),
            icon: "box".to_string(),
            roles: vec![Role::Admin, Role::Manager, Role::Employee],
            visible: true,
            order: 50,
            children: None,
        },
        NavigationNode {
            title: "Settings".to_string(),
            route: "/settings".to_string(),
            icon: "settings".to_string(),
            roles: vec![Role::Admin],
            visible: true,
            order: 60,
            children: None,
        },
    ]
}
