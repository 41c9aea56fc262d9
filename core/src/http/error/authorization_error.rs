//! Authorization error types.
//!
//! Every variant is a programming or configuration mistake. A legitimate
//! denial is never an error: it is a `false` verdict.

use derive_more::{Display, Error};

use crate::http::authorization::expression::ParseError;

/// Errors raised while deciding a permission check.
#[derive(Debug, Display, Error)]
pub enum AuthorizationError {
    /// No user could be looked up and guests are not allowed.
    #[display("couldn't find a current user, and nothing appropriate was supplied in the options")]
    CannotObtainUserObject,

    /// The resolved user has no identity.
    #[display("user doesn't implement an id")]
    UserDoesntImplementId,

    /// The resolved user cannot take part in role lookups.
    #[display("user doesn't implement role lookup")]
    UserDoesntImplementRoles,

    /// An uppercase atom named a class that is not registered.
    #[display("couldn't find model class: {name}")]
    CannotObtainModelClass { name: String },

    /// A model operand was neither an option nor a request binding.
    #[display("couldn't find model ({name}) in the options or the request bindings")]
    CannotObtainModelObject { name: String },

    /// The expression text is malformed.
    #[display("syntax error: {_0}")]
    Syntax(ParseError),
}

impl From<ParseError> for AuthorizationError {
    fn from(err: ParseError) -> Self {
        AuthorizationError::Syntax(err)
    }
}

/// Errors raised while loading configuration.
#[derive(Debug, Display, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// The role source setting names no known backend.
    #[display("unknown role source: '{value}'")]
    UnknownRoleSource { value: String },
}
