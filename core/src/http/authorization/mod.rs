//! Role-expression authorization.
//!
//! # Module Structure
//!
//! - `expression` - Parser, resolver, evaluator and parse cache
//! - `role_source` - Role backends (HardwiredRoles, ObjectRolesTable)
//! - `principal` - Acting users (Principal, Actor, User)
//! - `model` - Models roles are scoped to (Authorizable, ModelRegistry)
//! - `context` - Per-request scope and per-evaluation context
//! - `options` - Per-call options
//! - `config` - Startup configuration
//! - `gate` - The permission gate
//! - `web` - Actix Web extractor, responder and error mapping
//!
//! # Flow
//! ```text
//! expression text -> parser -> AST -> evaluator (resolver + role source) -> verdict
//! ```
//! The gate resolves the user, applies the guest policy, evaluates, and
//! either returns the verdict (`check`) or hands a [`Denial`] to the caller
//! (`enforce`, `permit`).

pub use config::{AuthorizationConfig, RoleSourceKind};
pub use context::{EvaluationContext, RequestScope};
pub use gate::{AuthorizationGate, Denial, DenialReason, Verdict};
pub use model::{Authorizable, ModelClass, ModelRef, ModelRegistry};
pub use options::PermitOptions;
pub use principal::{Actor, Principal, User};
pub use role_source::{HardwiredRoles, ObjectRolesTable, RoleGrant, RoleScope, RoleSource};

mod config;
mod context;
mod gate;
mod model;
mod options;
mod principal;

pub mod expression;
pub mod role_source;
pub mod web;
