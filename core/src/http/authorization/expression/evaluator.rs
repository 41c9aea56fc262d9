//! Expression evaluator.
//!
//! Evaluates an authorization expression AST against an evaluation context.

use std::sync::Arc;

use tracing::trace;

use super::ast::{BinaryOp, Expression, ModelKind, UnaryOp};
use super::resolver::{Operand, Resolver};
use crate::http::authorization::context::EvaluationContext;
use crate::http::authorization::model::ModelRegistry;
use crate::http::authorization::role_source::{RoleScope, RoleSource};
use crate::http::error::AuthorizationError;

/// Evaluates authorization expressions against a role source.
///
/// # Example
/// ```
/// use std::sync::Arc;
/// use actix_authorization_core::http::authorization::expression::{
///     AuthorizationExpression, ExpressionEvaluator,
/// };
/// use actix_authorization_core::http::authorization::{
///     EvaluationContext, HardwiredRoles, ModelRegistry, User,
/// };
///
/// let roles = HardwiredRoles::new().with_role("admin", &["1"]);
/// let evaluator = ExpressionEvaluator::new(Arc::new(roles), Arc::new(ModelRegistry::new()));
///
/// let expr = AuthorizationExpression::parse("admin and not banned").unwrap();
/// let ctx = EvaluationContext::new(Some(Arc::new(User::new("1", "alice"))));
/// assert!(evaluator.evaluate(expr.ast(), &ctx).unwrap());
/// ```
#[derive(Clone)]
pub struct ExpressionEvaluator {
    source: Arc<dyn RoleSource>,
    models: Arc<ModelRegistry>,
}

impl ExpressionEvaluator {
    /// Creates an evaluator over a role source and a model namespace.
    pub fn new(source: Arc<dyn RoleSource>, models: Arc<ModelRegistry>) -> Self {
        ExpressionEvaluator { source, models }
    }

    /// Returns the model namespace.
    pub fn models(&self) -> &ModelRegistry {
        &self.models
    }

    /// Evaluates an expression.
    ///
    /// # Returns
    /// * `Ok(true)` - Access granted
    /// * `Ok(false)` - Access denied
    /// * `Err(AuthorizationError)` - An atom could not be resolved
    pub fn evaluate(
        &self,
        expr: &Expression,
        ctx: &EvaluationContext,
    ) -> Result<bool, AuthorizationError> {
        let resolver = Resolver::new(&self.models);

        match expr {
            Expression::RoleCheck { role, quoted: true } => {
                Ok(self.query(ctx, role, &RoleScope::Global))
            }

            Expression::RoleCheck {
                role,
                quoted: false,
            } => {
                let operand = resolver.resolve_atom(role, ctx);
                Ok(self.query(ctx, role, &operand.scope()))
            }

            Expression::Model(reference) => {
                let operand = match reference.kind {
                    ModelKind::Instance => resolver.resolve_atom(&reference.name, ctx),
                    ModelKind::Class => Operand::ModelClass(resolver.resolve_class(&reference.name)?),
                };
                Ok(self.query(ctx, &reference.name, &operand.scope()))
            }

            Expression::ScopedRole { role, model } => {
                let operand = resolver.resolve_model(model, ctx)?;
                Ok(self.query(ctx, role, &operand.scope()))
            }

            Expression::Binary { left, op, right } => {
                let left_result = self.evaluate(left, ctx)?;

                match op {
                    BinaryOp::And => {
                        // Short-circuit: if left is false, don't evaluate right
                        if !left_result {
                            return Ok(false);
                        }
                        self.evaluate(right, ctx)
                    }
                    BinaryOp::Or => {
                        // Short-circuit: if left is true, don't evaluate right
                        if left_result {
                            return Ok(true);
                        }
                        self.evaluate(right, ctx)
                    }
                }
            }

            Expression::Unary { op, expr } => {
                let result = self.evaluate(expr, ctx)?;
                match op {
                    UnaryOp::Not => Ok(!result),
                }
            }

            Expression::Group(inner) => self.evaluate(inner, ctx),
        }
    }

    fn query(&self, ctx: &EvaluationContext, role: &str, scope: &RoleScope) -> bool {
        let granted = self.source.has_role(ctx.user(), role, scope);
        trace!(role, %scope, granted, "role check");
        granted
    }
}
