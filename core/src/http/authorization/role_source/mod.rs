//! Role sources answering "does this user hold this role".
//!
//! Two interchangeable backends implement [`RoleSource`]:
//!
//! - [`HardwiredRoles`] - a fixed role table built at startup, no object scoping
//! - [`ObjectRolesTable`] - grants scoped globally, to a model class or to a
//!   single model instance
//!
//! The evaluator only sees the trait, so a deployment picks one at startup
//! (see [`RoleSourceKind`](super::RoleSourceKind)).

mod hardwired;
mod object_roles;

pub use hardwired::HardwiredRoles;
pub use object_roles::{ObjectRolesTable, RoleGrant};

use std::fmt;

use super::model::ModelRef;
use super::principal::Principal;

/// What a role check is scoped to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RoleScope {
    /// No object: a site-wide role
    Global,
    /// Every instance of a model class
    Class(String),
    /// A single model instance
    Instance(ModelRef),
}

impl RoleScope {
    pub fn class(name: impl Into<String>) -> Self {
        RoleScope::Class(name.into())
    }

    pub fn instance(model: ModelRef) -> Self {
        RoleScope::Instance(model)
    }

    /// Returns true if a grant made on `self` applies to a query on `query`.
    ///
    /// Global grants apply everywhere; class grants apply to the class and its
    /// instances; instance grants apply only to that instance.
    pub fn covers(&self, query: &RoleScope) -> bool {
        match (self, query) {
            (RoleScope::Global, _) => true,
            (RoleScope::Class(granted), RoleScope::Class(asked)) => granted == asked,
            (RoleScope::Class(granted), RoleScope::Instance(model)) => granted == model.class(),
            (RoleScope::Instance(granted), RoleScope::Instance(asked)) => granted == asked,
            _ => false,
        }
    }
}

impl fmt::Display for RoleScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoleScope::Global => write!(f, "global"),
            RoleScope::Class(name) => write!(f, "class {}", name),
            RoleScope::Instance(model) => write!(f, "{}", model),
        }
    }
}

/// Backend answering role-membership queries.
///
/// Implementations must:
/// - return `false` for an absent principal or one without an id
/// - return `false` for role names they know nothing about
/// - be read-only and safe to query concurrently
///
/// # Example
/// ```
/// use actix_authorization_core::http::authorization::{Principal, RoleScope, RoleSource};
///
/// struct EveryoneIsAdmin;
///
/// impl RoleSource for EveryoneIsAdmin {
///     fn has_role(&self, principal: Option<&dyn Principal>, role: &str, _scope: &RoleScope) -> bool {
///         principal.is_some() && role == "admin"
///     }
/// }
/// ```
pub trait RoleSource: Send + Sync {
    /// Checks whether `principal` holds `role` on `scope`.
    fn has_role(&self, principal: Option<&dyn Principal>, role: &str, scope: &RoleScope) -> bool;
}

/// Returns the key role tables are indexed by, if the principal has one.
pub(crate) fn principal_key(principal: Option<&dyn Principal>) -> Option<&str> {
    principal
        .filter(|p| p.supports_roles())
        .and_then(|p| p.principal_id())
}
