//! Permission gate: the public entry point for authorization checks.

use std::sync::Arc;

use tracing::{debug, warn};

use super::config::AuthorizationConfig;
use super::context::{EvaluationContext, RequestScope};
use super::expression::{ExpressionCache, ExpressionEvaluator};
use super::model::ModelRegistry;
use super::options::PermitOptions;
use super::principal::{Actor, Principal};
use super::role_source::RoleSource;
use crate::http::error::AuthorizationError;

/// Why a check was denied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenialReason {
    /// No user was identified
    LoginRequired,
    /// A user was identified but the expression evaluated to false
    PermissionDenied,
}

/// The outcome of a successfully evaluated check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Allowed,
    Denied(DenialReason),
}

impl Verdict {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Verdict::Allowed)
    }
}

/// The denial action handed to the integration layer.
///
/// Carries where to send the client and what to tell them; performing the
/// redirect is up to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Denial {
    reason: DenialReason,
    location: String,
    message: String,
}

impl Denial {
    pub fn reason(&self) -> DenialReason {
        self.reason
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Decides whether the acting user may perform a guarded action.
///
/// Holds the configuration, the role source chosen at startup, the model
/// class namespace and a cache of parsed expressions. Cheap to share behind
/// `web::Data`; every check builds its own evaluation context.
///
/// # Example
/// ```
/// use std::sync::Arc;
/// use actix_authorization_core::http::authorization::{
///     Actor, AuthorizationConfig, AuthorizationGate, HardwiredRoles, PermitOptions,
///     RequestScope, User,
/// };
///
/// let roles = HardwiredRoles::new().with_role("admin", &["1"]);
/// let gate = AuthorizationGate::new(AuthorizationConfig::default(), Arc::new(roles));
///
/// let scope = RequestScope::new().with_current_user(Actor::user(User::new("1", "alice")));
/// assert!(gate.check("admin", &scope, PermitOptions::new()).unwrap());
/// assert!(!gate.check("editor", &scope, PermitOptions::new()).unwrap());
/// ```
pub struct AuthorizationGate {
    config: AuthorizationConfig,
    evaluator: ExpressionEvaluator,
    cache: ExpressionCache,
}

impl AuthorizationGate {
    /// Creates a gate with an empty model class namespace.
    pub fn new(config: AuthorizationConfig, source: Arc<dyn RoleSource>) -> Self {
        AuthorizationGate {
            config,
            evaluator: ExpressionEvaluator::new(source, Arc::new(ModelRegistry::new())),
            cache: ExpressionCache::new(),
        }
    }

    /// Creates a gate that resolves class atoms against `models`.
    pub fn with_models(
        config: AuthorizationConfig,
        source: Arc<dyn RoleSource>,
        models: ModelRegistry,
    ) -> Self {
        AuthorizationGate {
            config,
            evaluator: ExpressionEvaluator::new(source, Arc::new(models)),
            cache: ExpressionCache::new(),
        }
    }

    /// Returns the configuration.
    pub fn config(&self) -> &AuthorizationConfig {
        &self.config
    }

    /// Returns the parsed expression cache.
    pub fn cache(&self) -> &ExpressionCache {
        &self.cache
    }

    /// Checks an expression without triggering a denial action.
    ///
    /// # Returns
    /// * `Ok(true)` - Access granted
    /// * `Ok(false)` - Access denied
    /// * `Err(AuthorizationError)` - Configuration or programming error
    pub fn check(
        &self,
        expression: &str,
        scope: &RequestScope,
        options: PermitOptions,
    ) -> Result<bool, AuthorizationError> {
        Ok(self.decide(expression, scope, &options)?.is_allowed())
    }

    /// Checks an expression and calls `on_denied` when access is denied.
    ///
    /// The denial action runs only when redirection is requested, which is
    /// the default here; pass `PermitOptions::redirect(false)` to suppress it.
    pub fn enforce<F>(
        &self,
        expression: &str,
        scope: &RequestScope,
        options: PermitOptions,
        on_denied: F,
    ) -> Result<bool, AuthorizationError>
    where
        F: FnOnce(Denial),
    {
        match self.decide(expression, scope, &options)? {
            Verdict::Allowed => Ok(true),
            Verdict::Denied(reason) => {
                if options.redirect_or(true) {
                    on_denied(self.denial(reason, &options));
                }
                Ok(false)
            }
        }
    }

    /// Checks an expression and returns the denial action, if any.
    ///
    /// Convenience for handlers:
    /// ```ignore
    /// if let Some(denial) = gate.permit("admin", &scope, PermitOptions::new())? {
    ///     return Ok(denial.into_response());
    /// }
    /// ```
    pub fn permit(
        &self,
        expression: &str,
        scope: &RequestScope,
        options: PermitOptions,
    ) -> Result<Option<Denial>, AuthorizationError> {
        let mut denied = None;
        self.enforce(expression, scope, options, |denial| denied = Some(denial))?;
        Ok(denied)
    }

    /// Runs the check and returns the verdict.
    pub fn decide(
        &self,
        expression: &str,
        scope: &RequestScope,
        options: &PermitOptions,
    ) -> Result<Verdict, AuthorizationError> {
        let actor = self.resolve_user(scope, options)?;
        let user: Option<Arc<dyn Principal>> = actor.as_ref().and_then(|a| a.principal().cloned());

        if !options.guests_allowed() {
            match &user {
                None => {
                    debug!(expression, "no authenticated user, login required");
                    return Ok(Verdict::Denied(DenialReason::LoginRequired));
                }
                Some(principal) => check_capabilities(&**principal)?,
            }
        }

        let parsed = self.cache.get_or_parse(expression)?;
        let ctx = EvaluationContext::new(user)
            .with_maps(options.bindings().clone(), scope.bindings().clone());

        let allowed = self
            .evaluator
            .evaluate(parsed.ast(), &ctx)
            .inspect_err(|err| warn!(expression, error = %err, "authorization expression failed"))?;

        let verdict = if allowed {
            Verdict::Allowed
        } else if ctx.user().is_some() {
            Verdict::Denied(DenialReason::PermissionDenied)
        } else {
            Verdict::Denied(DenialReason::LoginRequired)
        };
        debug!(expression, ?verdict, "authorization decided");
        Ok(verdict)
    }

    /// Looks the acting user up: explicit option, lookup hook, then the
    /// request's current user.
    ///
    /// `Ok(None)` means no lookup was possible and guests are allowed.
    fn resolve_user(
        &self,
        scope: &RequestScope,
        options: &PermitOptions,
    ) -> Result<Option<Actor>, AuthorizationError> {
        if let Some(actor) = options.explicit_user() {
            return Ok(Some(actor.clone()));
        }
        if let Some(lookup) = options.lookup_hook() {
            return Ok(Some(lookup()));
        }
        if let Some(actor) = scope.current_user() {
            return Ok(Some(actor.clone()));
        }

        if options.guests_allowed() {
            Ok(None)
        } else {
            warn!("no user lookup available and guests are not allowed");
            Err(AuthorizationError::CannotObtainUserObject)
        }
    }

    fn denial(&self, reason: DenialReason, options: &PermitOptions) -> Denial {
        let (location, message) = match reason {
            DenialReason::LoginRequired => (
                options
                    .login_required_location()
                    .unwrap_or(self.config.get_login_required_redirection()),
                options
                    .login_required_notice()
                    .unwrap_or(self.config.get_login_required_message()),
            ),
            DenialReason::PermissionDenied => (
                options
                    .permission_denied_location()
                    .unwrap_or(self.config.get_permission_denied_redirection()),
                options
                    .permission_denied_notice()
                    .unwrap_or(self.config.get_permission_denied_message()),
            ),
        };

        Denial {
            reason,
            location: location.to_string(),
            message: message.to_string(),
        }
    }
}

fn check_capabilities(principal: &dyn Principal) -> Result<(), AuthorizationError> {
    if principal.principal_id().is_none() {
        return Err(AuthorizationError::UserDoesntImplementId);
    }
    if !principal.supports_roles() {
        return Err(AuthorizationError::UserDoesntImplementRoles);
    }
    Ok(())
}
