//! Per-call permission options.

use std::collections::HashMap;
use std::fmt;

use super::model::{Authorizable, ModelRef};
use super::principal::Actor;

/// Options accepted by [`AuthorizationGate::check`] and
/// [`AuthorizationGate::enforce`].
///
/// [`AuthorizationGate::check`]: super::AuthorizationGate::check
/// [`AuthorizationGate::enforce`]: super::AuthorizationGate::enforce
///
/// # Example
/// ```
/// use actix_authorization_core::http::authorization::{Actor, ModelRef, PermitOptions, User};
///
/// let options = PermitOptions::new()
///     .allow_guests(true)
///     .user(Actor::user(User::new("1", "alice")))
///     .bind("workshop", &ModelRef::new("Workshop", "4"))
///     .permission_denied_redirection("/workshops");
/// ```
pub struct PermitOptions {
    allow_guests: bool,
    redirect: Option<bool>,
    user: Option<Actor>,
    user_lookup: Option<Box<dyn Fn() -> Actor>>,
    bindings: HashMap<String, ModelRef>,
    login_required_redirection: Option<String>,
    permission_denied_redirection: Option<String>,
    login_required_message: Option<String>,
    permission_denied_message: Option<String>,
}

impl PermitOptions {
    /// Creates options with guests disallowed and the caller's redirect default.
    pub fn new() -> Self {
        PermitOptions {
            allow_guests: false,
            redirect: None,
            user: None,
            user_lookup: None,
            bindings: HashMap::new(),
            login_required_redirection: None,
            permission_denied_redirection: None,
            login_required_message: None,
            permission_denied_message: None,
        }
    }

    /// Allows evaluation without a user (default: false).
    pub fn allow_guests(mut self, allow: bool) -> Self {
        self.allow_guests = allow;
        self
    }

    /// Requests (or suppresses) the denial action.
    ///
    /// Defaults to off for `check` and on for `enforce`.
    pub fn redirect(mut self, redirect: bool) -> Self {
        self.redirect = Some(redirect);
        self
    }

    /// Supplies the acting user explicitly, bypassing every lookup.
    pub fn user(mut self, actor: Actor) -> Self {
        self.user = Some(actor);
        self
    }

    /// Supplies a hook used to look the acting user up.
    pub fn user_lookup<F>(mut self, lookup: F) -> Self
    where
        F: Fn() -> Actor + 'static,
    {
        self.user_lookup = Some(Box::new(lookup));
        self
    }

    /// Binds a model under `name`. Option bindings shadow request bindings.
    pub fn bind(mut self, name: &str, model: &dyn Authorizable) -> Self {
        self.bindings.insert(name.to_string(), model.model_ref());
        self
    }

    pub fn login_required_redirection(mut self, location: impl Into<String>) -> Self {
        self.login_required_redirection = Some(location.into());
        self
    }

    pub fn permission_denied_redirection(mut self, location: impl Into<String>) -> Self {
        self.permission_denied_redirection = Some(location.into());
        self
    }

    pub fn login_required_message(mut self, message: impl Into<String>) -> Self {
        self.login_required_message = Some(message.into());
        self
    }

    pub fn permission_denied_message(mut self, message: impl Into<String>) -> Self {
        self.permission_denied_message = Some(message.into());
        self
    }

    pub(crate) fn guests_allowed(&self) -> bool {
        self.allow_guests
    }

    pub(crate) fn redirect_or(&self, default: bool) -> bool {
        self.redirect.unwrap_or(default)
    }

    pub(crate) fn explicit_user(&self) -> Option<&Actor> {
        self.user.as_ref()
    }

    pub(crate) fn lookup_hook(&self) -> Option<&dyn Fn() -> Actor> {
        self.user_lookup.as_deref()
    }

    pub(crate) fn bindings(&self) -> &HashMap<String, ModelRef> {
        &self.bindings
    }

    pub(crate) fn login_required_location(&self) -> Option<&str> {
        self.login_required_redirection.as_deref()
    }

    pub(crate) fn permission_denied_location(&self) -> Option<&str> {
        self.permission_denied_redirection.as_deref()
    }

    pub(crate) fn login_required_notice(&self) -> Option<&str> {
        self.login_required_message.as_deref()
    }

    pub(crate) fn permission_denied_notice(&self) -> Option<&str> {
        self.permission_denied_message.as_deref()
    }
}

impl Default for PermitOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for PermitOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PermitOptions")
            .field("allow_guests", &self.allow_guests)
            .field("redirect", &self.redirect)
            .field("user", &self.user)
            .field("user_lookup", &self.user_lookup.is_some())
            .field("bindings", &self.bindings)
            .finish_non_exhaustive()
    }
}
