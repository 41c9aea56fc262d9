//! Demo application wiring for the authorization gate.
//!
//! Shared by the demo binary and the integration tests.

pub mod fixtures;

use actix_web::web;

pub use fixtures::{build_gate, identify, USER_HEADER};

/// Registers every demo route.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(handlers::public::login)
        .service(handlers::public::permission_denied)
        .service(handlers::public::home)
        .service(handlers::documents::show_document)
        .service(handlers::documents::edit_document)
        .service(handlers::documents::review_queue)
        .service(handlers::admin::dashboard)
        .service(handlers::admin::misconfigured);
}
