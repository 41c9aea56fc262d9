//! Operand resolution.
//!
//! Turns the atoms of an expression into something a role source can be
//! asked about. Lowercase atoms are ambiguous until evaluation time: the same
//! word is a bound object in one request and a plain role in another.

use tracing::trace;

use super::ast::{ModelKind, ModelReference};
use crate::http::authorization::context::EvaluationContext;
use crate::http::authorization::model::{ModelClass, ModelRef, ModelRegistry};
use crate::http::authorization::role_source::RoleScope;
use crate::http::error::AuthorizationError;

/// A resolved atom.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operand {
    /// A plain role name, checked globally
    RoleName(String),
    /// A model instance found in the options or the request bindings
    BoundObject { name: String, model: ModelRef },
    /// A registered model class
    ModelClass(ModelClass),
}

impl Operand {
    /// Returns the scope a role check on this operand is made against.
    pub fn scope(&self) -> RoleScope {
        match self {
            Operand::RoleName(_) => RoleScope::Global,
            Operand::BoundObject { model, .. } => RoleScope::Instance(model.clone()),
            Operand::ModelClass(class) => RoleScope::Class(class.name().to_string()),
        }
    }
}

/// Resolves atoms against an evaluation context and the model namespace.
#[derive(Debug, Clone, Copy)]
pub struct Resolver<'a> {
    models: &'a ModelRegistry,
}

impl<'a> Resolver<'a> {
    pub fn new(models: &'a ModelRegistry) -> Self {
        Resolver { models }
    }

    /// Resolves a bare or `:`-prefixed atom.
    ///
    /// Order: per-call options, then request bindings, then a role name.
    /// Never fails.
    pub fn resolve_atom(&self, name: &str, ctx: &EvaluationContext) -> Operand {
        if let Some(model) = ctx.option(name) {
            trace!(atom = name, %model, "atom bound by options");
            return Operand::BoundObject {
                name: name.to_string(),
                model: model.clone(),
            };
        }

        if let Some(model) = ctx.binding(name) {
            trace!(atom = name, %model, "atom bound by request");
            return Operand::BoundObject {
                name: name.to_string(),
                model: model.clone(),
            };
        }

        trace!(atom = name, "atom is a role name");
        Operand::RoleName(name.to_string())
    }

    /// Resolves an uppercase atom to a registered class.
    pub fn resolve_class(&self, name: &str) -> Result<ModelClass, AuthorizationError> {
        self.models
            .lookup(name)
            .cloned()
            .ok_or_else(|| AuthorizationError::CannotObtainModelClass {
                name: name.to_string(),
            })
    }

    /// Resolves the model operand of a scoped role (`role of :model`).
    ///
    /// There is no role fallback here: an instance that is neither an option
    /// nor a request binding fails with `CannotObtainModelObject`.
    pub fn resolve_model(
        &self,
        reference: &ModelReference,
        ctx: &EvaluationContext,
    ) -> Result<Operand, AuthorizationError> {
        match reference.kind {
            ModelKind::Class => self.resolve_class(&reference.name).map(Operand::ModelClass),
            ModelKind::Instance => match self.resolve_atom(&reference.name, ctx) {
                bound @ Operand::BoundObject { .. } => Ok(bound),
                _ => Err(AuthorizationError::CannotObtainModelObject {
                    name: reference.name.clone(),
                }),
            },
        }
    }
}
