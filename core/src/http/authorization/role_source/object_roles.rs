//! Object roles table: grants scoped to classes and instances.

use std::collections::HashSet;
use std::sync::{PoisonError, RwLock};

use tracing::{debug, trace};

use super::{principal_key, RoleScope, RoleSource};
use crate::http::authorization::principal::Principal;

/// A single `(principal, role, scope)` grant.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RoleGrant {
    principal_id: String,
    role: String,
    scope: RoleScope,
}

impl RoleGrant {
    pub fn new(principal_id: impl Into<String>, role: impl Into<String>, scope: RoleScope) -> Self {
        RoleGrant {
            principal_id: principal_id.into(),
            role: role.into(),
            scope,
        }
    }

    pub fn principal_id(&self) -> &str {
        &self.principal_id
    }

    pub fn role(&self) -> &str {
        &self.role
    }

    pub fn scope(&self) -> &RoleScope {
        &self.scope
    }
}

/// In-memory table of object-scoped role grants.
///
/// The same role can be granted on different objects independently. A grant
/// with [`RoleScope::Global`] satisfies every query for that role, and a class
/// grant satisfies queries on any instance of the class.
///
/// Reads take a shared lock, so concurrent evaluations never block each other;
/// grants and revocations take the write lock.
///
/// # Example
/// ```
/// use actix_authorization_core::http::authorization::{
///     ModelRef, ObjectRolesTable, RoleScope, RoleSource, User,
/// };
///
/// let workshop = ModelRef::new("Workshop", "1");
/// let roles = ObjectRolesTable::new();
/// roles.grant("7", "moderator", RoleScope::instance(workshop.clone()));
///
/// let user = User::new("7", "mod");
/// assert!(roles.has_role(Some(&user), "moderator", &RoleScope::instance(workshop)));
/// assert!(!roles.has_role(Some(&user), "moderator", &RoleScope::Global));
/// ```
#[derive(Debug, Default)]
pub struct ObjectRolesTable {
    grants: RwLock<HashSet<RoleGrant>>,
}

impl ObjectRolesTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a grant (builder pattern).
    pub fn with_grant(self, principal_id: &str, role: &str, scope: RoleScope) -> Self {
        self.grant(principal_id, role, scope);
        self
    }

    /// Grants `role` on `scope`. Returns false if the grant already existed.
    pub fn grant(&self, principal_id: &str, role: &str, scope: RoleScope) -> bool {
        let grant = RoleGrant::new(principal_id, role, scope);
        debug!(principal = principal_id, role, scope = %grant.scope, "granting role");
        self.write().insert(grant)
    }

    /// Removes exactly the grant of `role` on `scope`. Returns false if absent.
    pub fn revoke(&self, principal_id: &str, role: &str, scope: RoleScope) -> bool {
        let grant = RoleGrant::new(principal_id, role, scope);
        debug!(principal = principal_id, role, scope = %grant.scope, "revoking role");
        self.write().remove(&grant)
    }

    /// Removes every grant the principal holds on exactly `scope`.
    ///
    /// Returns the number of grants removed.
    pub fn revoke_all_for(&self, principal_id: &str, scope: &RoleScope) -> usize {
        let mut grants = self.write();
        let before = grants.len();
        grants.retain(|g| !(g.principal_id == principal_id && &g.scope == scope));
        before - grants.len()
    }

    /// Returns the roles granted to the principal on exactly `scope`, sorted.
    pub fn roles_for(&self, principal_id: &str, scope: &RoleScope) -> Vec<String> {
        let mut roles: Vec<String> = self
            .read()
            .iter()
            .filter(|g| g.principal_id == principal_id && &g.scope == scope)
            .map(|g| g.role.clone())
            .collect();
        roles.sort_unstable();
        roles
    }

    /// Returns true if the principal holds any role on exactly `scope`.
    pub fn has_roles_for(&self, principal_id: &str, scope: &RoleScope) -> bool {
        self.read()
            .iter()
            .any(|g| g.principal_id == principal_id && &g.scope == scope)
    }

    /// Returns the principal ids that hold `role` on `scope`, counting global
    /// and class grants that cover it. Sorted and deduplicated.
    pub fn principals_with(&self, role: &str, scope: &RoleScope) -> Vec<String> {
        let mut ids: Vec<String> = self
            .read()
            .iter()
            .filter(|g| g.role == role && g.scope.covers(scope))
            .map(|g| g.principal_id.clone())
            .collect();
        ids.sort_unstable();
        ids.dedup();
        ids
    }

    /// Returns the number of grants.
    pub fn len(&self) -> usize {
        self.read().len()
    }

    /// Returns true if the table holds no grants.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, HashSet<RoleGrant>> {
        self.grants.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, HashSet<RoleGrant>> {
        self.grants.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl RoleSource for ObjectRolesTable {
    fn has_role(&self, principal: Option<&dyn Principal>, role: &str, scope: &RoleScope) -> bool {
        let Some(id) = principal_key(principal) else {
            return false;
        };

        let granted = self
            .read()
            .iter()
            .any(|g| g.principal_id == id && g.role == role && g.scope.covers(scope));
        trace!(principal = id, role, %scope, granted, "object role lookup");
        granted
    }
}
