//! Common test utilities and configuration.
//!
//! This module provides shared test infrastructure including:
//! - Demo users as actors
//! - A role source that counts the queries it answers
//! - Test app builder

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use actix_web::dev::{Service, ServiceResponse};
use actix_web::{test, web, App, HttpMessage};
use lazy_static::lazy_static;

use actix_authorization_core::http::authorization::{
    Actor, AuthorizationConfig, AuthorizationGate, Principal, RequestScope, RoleScope,
    RoleSource, RoleSourceKind, User,
};
use actix_authorization_test::{build_gate, configure, identify, USER_HEADER};

// =============================================================================
// Test Users
// =============================================================================

lazy_static! {
    /// admin
    pub static ref ALICE: Actor = Actor::user(User::new("1", "alice"));
    /// editor, owner of Document#1
    pub static ref BOB: Actor = Actor::user(User::new("2", "bob"));
    /// reviewer of the Document class
    pub static ref CAROL: Actor = Actor::user(User::new("3", "carol"));
    /// banned
    pub static ref DAVE: Actor = Actor::user(User::new("4", "dave"));
}

/// A user object without an identifier.
#[derive(Debug)]
pub struct Nameless;

impl Principal for Nameless {
    fn principal_id(&self) -> Option<&str> {
        None
    }
}

/// A user object that cannot hold roles.
#[derive(Debug)]
pub struct Roleless;

impl Principal for Roleless {
    fn principal_id(&self) -> Option<&str> {
        Some("9")
    }

    fn supports_roles(&self) -> bool {
        false
    }
}

/// A request scope whose current user is `actor`.
pub fn scope_of(actor: &Actor) -> RequestScope {
    RequestScope::new().with_current_user(actor.clone())
}

/// A gate over the demo grants.
pub fn gate(kind: RoleSourceKind) -> AuthorizationGate {
    build_gate(AuthorizationConfig::new().role_source(kind))
}

// =============================================================================
// Counting Role Source
// =============================================================================

/// Wraps a role source and records every query it answers.
pub struct CountingSource {
    inner: Arc<dyn RoleSource>,
    calls: AtomicUsize,
    asked: Mutex<Vec<String>>,
}

impl CountingSource {
    pub fn new(inner: impl RoleSource + 'static) -> Self {
        CountingSource {
            inner: Arc::new(inner),
            calls: AtomicUsize::new(0),
            asked: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn asked(&self) -> Vec<String> {
        self.asked.lock().unwrap().clone()
    }
}

impl RoleSource for CountingSource {
    fn has_role(&self, principal: Option<&dyn Principal>, role: &str, scope: &RoleScope) -> bool {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.asked.lock().unwrap().push(role.to_string());
        self.inner.has_role(principal, role, scope)
    }
}

// =============================================================================
// Test App
// =============================================================================

/// Builds the demo app over the given role source.
pub async fn create_test_app(
    kind: RoleSourceKind,
) -> impl Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error> {
    test::init_service(
        App::new()
            .app_data(web::Data::new(gate(kind)))
            .wrap_fn(|req, srv| {
                let actor = identify(req.headers());
                req.extensions_mut().insert(actor);
                srv.call(req)
            })
            .configure(configure),
    )
    .await
}

/// Header identifying a demo user.
pub fn as_user(id: &str) -> (&'static str, String) {
    (USER_HEADER, id.to_string())
}
