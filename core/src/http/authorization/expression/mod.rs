//! Authorization expression language.
//!
//! # Overview
//! An expression combines role names and model references with boolean
//! operators. It is parsed once, cached, and evaluated per request.
//!
//! # Syntax
//!
//! ## Atoms
//! - `admin` - a role, unless `admin` is bound to a model in the options or
//!   the request, in which case the role `admin` is checked on that model
//! - `:document` - same resolution as a bare word
//! - `Document` - a registered model class
//! - `'site admin'` - a quoted role name, never a model
//!
//! ## Scoped roles
//! - `moderator of :workshop` (also `for`, `in`, `on`, `to`, `at`, `by`)
//! - `owner(:document)`
//! - `reviewer of Document`
//!
//! ## Operators
//! - `and` / `&&` - Logical AND
//! - `or` / `||` - Logical OR
//! - `not` / `!` - Logical NOT
//! - `(` `)` - Grouping
//!
//! Keywords are case-insensitive; `not` binds tightest, then `and`, then `or`.
//! Nesting is limited to [`MAX_DEPTH`] levels; deeper input is a
//! [`ParseError::TooDeep`].
//!
//! # Examples
//! ```
//! use actix_authorization_core::http::authorization::expression::{
//!     AuthorizationExpression, Expression,
//! };
//!
//! let expr = AuthorizationExpression::parse("admin or owner of :document").unwrap();
//! assert!(matches!(expr.ast(), Expression::Binary { .. }));
//! ```

mod ast;
mod cache;
mod evaluator;
mod parser;
mod resolver;

pub use ast::{BinaryOp, Expression, ModelKind, ModelReference, UnaryOp};
pub use cache::ExpressionCache;
pub use evaluator::ExpressionEvaluator;
pub use parser::{AuthorizationExpression, ParseError, MAX_DEPTH};
pub use resolver::{Operand, Resolver};
