//! Hardwired role table.

use std::collections::{HashMap, HashSet};

use tracing::trace;

use super::{principal_key, RoleScope, RoleSource};
use crate::http::authorization::principal::Principal;

/// A fixed role table: role name to the set of principal ids holding it.
///
/// Built once at startup and never mutated, so it needs no locking. Scopes
/// are ignored: holding `owner` here means holding it everywhere.
///
/// # Example
/// ```
/// use actix_authorization_core::http::authorization::{HardwiredRoles, RoleScope, RoleSource, User};
///
/// let roles = HardwiredRoles::new()
///     .with_role("admin", &["1"])
///     .with_role("editor", &["1", "2"]);
///
/// let bob = User::new("2", "bob");
/// assert!(roles.has_role(Some(&bob), "editor", &RoleScope::Global));
/// assert!(!roles.has_role(Some(&bob), "admin", &RoleScope::Global));
/// ```
#[derive(Debug, Clone, Default)]
pub struct HardwiredRoles {
    roles: HashMap<String, HashSet<String>>,
}

impl HardwiredRoles {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Grants `role` to every listed principal id (builder pattern).
    pub fn with_role(mut self, role: &str, principal_ids: &[&str]) -> Self {
        let holders = self.roles.entry(role.to_string()).or_default();
        for id in principal_ids {
            holders.insert(id.to_string());
        }
        self
    }

    /// Returns the roles held by a principal id, sorted.
    pub fn roles_of(&self, principal_id: &str) -> Vec<&str> {
        let mut roles: Vec<&str> = self
            .roles
            .iter()
            .filter(|(_, holders)| holders.contains(principal_id))
            .map(|(role, _)| role.as_str())
            .collect();
        roles.sort_unstable();
        roles
    }
}

impl RoleSource for HardwiredRoles {
    fn has_role(&self, principal: Option<&dyn Principal>, role: &str, scope: &RoleScope) -> bool {
        let Some(id) = principal_key(principal) else {
            return false;
        };

        let granted = self
            .roles
            .get(role)
            .is_some_and(|holders| holders.contains(id));
        trace!(principal = id, role, %scope, granted, "hardwired role lookup");
        granted
    }
}
