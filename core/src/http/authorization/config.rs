//! Authorization configuration.
//!
//! Read once at startup and handed to the gate; nothing here is global.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::http::error::ConfigError;

const LOGIN_REQUIRED_REDIRECTION: &str = "/login";
const PERMISSION_DENIED_REDIRECTION: &str = "/permission_denied";
const LOGIN_REQUIRED_MESSAGE: &str = "Login is required to access the requested page.";
const PERMISSION_DENIED_MESSAGE: &str = "Permission denied. You cannot access the requested page.";

/// Which role source backs the deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum RoleSourceKind {
    /// Fixed role table, see [`HardwiredRoles`](super::HardwiredRoles)
    #[serde(rename = "hardwired")]
    Hardwired,
    /// Object-scoped grants, see [`ObjectRolesTable`](super::ObjectRolesTable)
    #[default]
    #[serde(rename = "object roles", alias = "object_roles")]
    ObjectRoles,
}

impl FromStr for RoleSourceKind {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "hardwired" => Ok(RoleSourceKind::Hardwired),
            "object roles" | "object_roles" => Ok(RoleSourceKind::ObjectRoles),
            _ => Err(ConfigError::UnknownRoleSource {
                value: value.to_string(),
            }),
        }
    }
}

impl fmt::Display for RoleSourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoleSourceKind::Hardwired => write!(f, "hardwired"),
            RoleSourceKind::ObjectRoles => write!(f, "object roles"),
        }
    }
}

/// Authorization settings.
///
/// # Example
/// ```
/// use actix_authorization_core::http::authorization::{AuthorizationConfig, RoleSourceKind};
///
/// let config = AuthorizationConfig::new()
///     .role_source(RoleSourceKind::Hardwired)
///     .login_required_redirection("/session/new");
///
/// assert_eq!(config.get_login_required_redirection(), "/session/new");
/// assert_eq!(config.get_permission_denied_redirection(), "/permission_denied");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AuthorizationConfig {
    role_source: RoleSourceKind,
    login_required_redirection: String,
    permission_denied_redirection: String,
    login_required_message: String,
    permission_denied_message: String,
}

impl Default for AuthorizationConfig {
    fn default() -> Self {
        AuthorizationConfig {
            role_source: RoleSourceKind::default(),
            login_required_redirection: LOGIN_REQUIRED_REDIRECTION.to_string(),
            permission_denied_redirection: PERMISSION_DENIED_REDIRECTION.to_string(),
            login_required_message: LOGIN_REQUIRED_MESSAGE.to_string(),
            permission_denied_message: PERMISSION_DENIED_MESSAGE.to_string(),
        }
    }
}

impl AuthorizationConfig {
    /// Creates the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads overrides from the process environment.
    ///
    /// - `AUTHORIZATION_MIXIN` - `hardwired` or `object roles`
    /// - `LOGIN_REQUIRED_REDIRECTION`
    /// - `PERMISSION_DENIED_REDIRECTION`
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads overrides through `lookup`, keyed like [`from_env`](Self::from_env).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(kind) = lookup("AUTHORIZATION_MIXIN") {
            config.role_source = kind.parse()?;
        }
        if let Some(location) = lookup("LOGIN_REQUIRED_REDIRECTION") {
            config.login_required_redirection = location;
        }
        if let Some(location) = lookup("PERMISSION_DENIED_REDIRECTION") {
            config.permission_denied_redirection = location;
        }

        Ok(config)
    }

    pub fn role_source(mut self, kind: RoleSourceKind) -> Self {
        self.role_source = kind;
        self
    }

    pub fn login_required_redirection(mut self, location: impl Into<String>) -> Self {
        self.login_required_redirection = location.into();
        self
    }

    pub fn permission_denied_redirection(mut self, location: impl Into<String>) -> Self {
        self.permission_denied_redirection = location.into();
        self
    }

    pub fn login_required_message(mut self, message: impl Into<String>) -> Self {
        self.login_required_message = message.into();
        self
    }

    pub fn permission_denied_message(mut self, message: impl Into<String>) -> Self {
        self.permission_denied_message = message.into();
        self
    }

    pub fn get_role_source(&self) -> RoleSourceKind {
        self.role_source
    }

    pub fn get_login_required_redirection(&self) -> &str {
        &self.login_required_redirection
    }

    pub fn get_permission_denied_redirection(&self) -> &str {
        &self.permission_denied_redirection
    }

    pub fn get_login_required_message(&self) -> &str {
        &self.login_required_message
    }

    pub fn get_permission_denied_message(&self) -> &str {
        &self.permission_denied_message
    }
}
