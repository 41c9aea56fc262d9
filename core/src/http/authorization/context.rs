//! Per-request and per-evaluation context.

use std::collections::HashMap;
use std::sync::Arc;

use super::model::{Authorizable, ModelRef};
use super::principal::{Actor, Principal};

/// What a handler knows about the current request.
///
/// Holds the ambient current user, when an authentication layer provides
/// one, and the records the handler has already loaded, bound by name so
/// expressions can refer to them (`owner of :document`).
///
/// # Example
/// ```
/// use actix_authorization_core::http::authorization::{Actor, ModelRef, RequestScope, User};
///
/// let scope = RequestScope::new()
///     .with_current_user(Actor::user(User::new("1", "alice")))
///     .bind("document", &ModelRef::new("Document", "3"));
///
/// assert!(scope.binding("document").is_some());
/// ```
#[derive(Debug, Clone, Default)]
pub struct RequestScope {
    current_user: Option<Actor>,
    bindings: HashMap<String, ModelRef>,
}

impl RequestScope {
    /// Creates a scope with no current-user accessor and no bindings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the ambient current user (builder pattern).
    pub fn with_current_user(mut self, actor: Actor) -> Self {
        self.current_user = Some(actor);
        self
    }

    /// Binds a loaded record under `name` (builder pattern).
    pub fn bind(mut self, name: &str, model: &dyn Authorizable) -> Self {
        self.insert(name, model);
        self
    }

    /// Binds a loaded record under `name`.
    pub fn insert(&mut self, name: &str, model: &dyn Authorizable) {
        self.bindings.insert(name.to_string(), model.model_ref());
    }

    /// Returns the ambient current user, or `None` if no accessor exists.
    pub fn current_user(&self) -> Option<&Actor> {
        self.current_user.as_ref()
    }

    /// Returns the record bound under `name`.
    pub fn binding(&self, name: &str) -> Option<&ModelRef> {
        self.bindings.get(name)
    }

    pub(crate) fn bindings(&self) -> &HashMap<String, ModelRef> {
        &self.bindings
    }
}

/// Everything one evaluation reads. Built fresh by the gate for each check
/// and never shared.
#[derive(Debug, Clone, Default)]
pub struct EvaluationContext {
    user: Option<Arc<dyn Principal>>,
    options: HashMap<String, ModelRef>,
    bindings: HashMap<String, ModelRef>,
}

impl EvaluationContext {
    /// Creates a context for `user`; `None` evaluates as a guest.
    pub fn new(user: Option<Arc<dyn Principal>>) -> Self {
        EvaluationContext {
            user,
            ..Self::default()
        }
    }

    /// Adds a per-call option binding (builder pattern).
    pub fn with_option(mut self, name: &str, model: &dyn Authorizable) -> Self {
        self.options.insert(name.to_string(), model.model_ref());
        self
    }

    /// Adds a request binding (builder pattern).
    pub fn with_binding(mut self, name: &str, model: &dyn Authorizable) -> Self {
        self.bindings.insert(name.to_string(), model.model_ref());
        self
    }

    pub(crate) fn with_maps(
        mut self,
        options: HashMap<String, ModelRef>,
        bindings: HashMap<String, ModelRef>,
    ) -> Self {
        self.options = options;
        self.bindings = bindings;
        self
    }

    /// Returns the acting user.
    pub fn user(&self) -> Option<&dyn Principal> {
        self.user.as_deref()
    }

    /// Returns the per-call option bound under `name`.
    pub fn option(&self, name: &str) -> Option<&ModelRef> {
        self.options.get(name)
    }

    /// Returns the request binding under `name`.
    pub fn binding(&self, name: &str) -> Option<&ModelRef> {
        self.bindings.get(name)
    }
}
