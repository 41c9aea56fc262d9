//! # Actix Authorization Core
//!
//! Role-expression authorization for Actix Web handlers.
//!
//! A handler attaches a textual expression such as
//! `"admin or owner of :document"` to an action. The
//! [`AuthorizationGate`](http::authorization::AuthorizationGate) resolves the
//! acting user, parses and evaluates the expression against a pluggable
//! [`RoleSource`](http::authorization::RoleSource) and returns a verdict.
//!
//! ## Modules
//!
//! - [`http::authorization`] - Expression engine, role sources and the gate
//! - [`http::error`] - Error types

pub mod http;
