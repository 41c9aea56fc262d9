//! Principals: the acting users an expression is evaluated for.

use std::fmt;
use std::sync::Arc;

/// The capabilities a user value must offer to take part in role checks.
///
/// Both capabilities are checked by the gate once per evaluation when guests
/// are not allowed:
/// - `principal_id` returning `None` fails with `UserDoesntImplementId`
/// - `supports_roles` returning `false` fails with `UserDoesntImplementRoles`
///
/// # Example
/// ```
/// use actix_authorization_core::http::authorization::Principal;
///
/// #[derive(Debug)]
/// struct ServiceAccount {
///     name: String,
/// }
///
/// impl Principal for ServiceAccount {
///     fn principal_id(&self) -> Option<&str> {
///         Some(&self.name)
///     }
/// }
/// ```
pub trait Principal: fmt::Debug + Send + Sync {
    /// Identifier used as the key for role grants.
    fn principal_id(&self) -> Option<&str>;

    /// Whether role sources may be queried for this principal.
    fn supports_roles(&self) -> bool {
        true
    }
}

/// Outcome of looking up the current user.
///
/// `NotAuthenticated` is the explicit "no one is logged in" marker an
/// authentication layer hands back, as opposed to having no way to look a
/// user up at all.
#[derive(Debug, Clone)]
pub enum Actor {
    User(Arc<dyn Principal>),
    NotAuthenticated,
}

impl Actor {
    /// Wraps a principal.
    pub fn user<P: Principal + 'static>(principal: P) -> Self {
        Actor::User(Arc::new(principal))
    }

    /// Returns the principal, if authenticated.
    pub fn principal(&self) -> Option<&Arc<dyn Principal>> {
        match self {
            Actor::User(principal) => Some(principal),
            Actor::NotAuthenticated => None,
        }
    }

    /// Returns true if a principal is present.
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Actor::User(_))
    }
}

impl From<Option<Arc<dyn Principal>>> for Actor {
    fn from(principal: Option<Arc<dyn Principal>>) -> Self {
        principal.map_or(Actor::NotAuthenticated, Actor::User)
    }
}

/// A plain user record.
///
/// # Example
/// ```
/// use actix_authorization_core::http::authorization::{Principal, User};
///
/// let user = User::new("42", "alice");
/// assert_eq!(user.principal_id(), Some("42"));
/// assert_eq!(user.get_username(), "alice");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct User {
    id: String,
    username: String,
}

impl User {
    /// Creates a new user.
    pub fn new(id: impl Into<String>, username: impl Into<String>) -> Self {
        User {
            id: id.into(),
            username: username.into(),
        }
    }

    /// Returns the user id.
    pub fn get_id(&self) -> &str {
        &self.id
    }

    /// Returns the username.
    pub fn get_username(&self) -> &str {
        &self.username
    }
}

impl Principal for User {
    fn principal_id(&self) -> Option<&str> {
        Some(&self.id)
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "User {{ id: {}, username: {} }}", self.id, self.username)
    }
}
