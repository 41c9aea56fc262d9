//! Demo users, role grants and gate construction.

use std::sync::Arc;

use actix_web::http::header::HeaderMap;

use actix_authorization_core::http::authorization::{
    Actor, AuthorizationConfig, AuthorizationGate, HardwiredRoles, ModelRef, ModelRegistry,
    ObjectRolesTable, RoleScope, RoleSource, RoleSourceKind, User,
};

/// Header the demo authentication layer reads the user id from.
pub const USER_HEADER: &str = "X-User";

/// Demo users as `(id, username)`.
///
/// - 1 alice: admin
/// - 2 bob: editor, owner of Document#1
/// - 3 carol: reviewer of the Document class
/// - 4 dave: banned
pub const USERS: &[(&str, &str)] = &[("1", "alice"), ("2", "bob"), ("3", "carol"), ("4", "dave")];

/// Looks the acting user up from the request headers.
pub fn identify(headers: &HeaderMap) -> Actor {
    headers
        .get(USER_HEADER)
        .and_then(|value| value.to_str().ok())
        .and_then(|id| USERS.iter().find(|(user_id, _)| *user_id == id))
        .map(|(id, username)| Actor::user(User::new(*id, *username)))
        .unwrap_or(Actor::NotAuthenticated)
}

/// Returns the `Document` model for an id.
pub fn document(id: &str) -> ModelRef {
    ModelRef::new("Document", id)
}

/// Grants of the demo users, as an object-scoped table.
pub fn object_roles() -> ObjectRolesTable {
    ObjectRolesTable::new()
        .with_grant("1", "admin", RoleScope::Global)
        .with_grant("2", "editor", RoleScope::Global)
        .with_grant("2", "owner", RoleScope::instance(document("1")))
        .with_grant("3", "reviewer", RoleScope::class("Document"))
        .with_grant("4", "banned", RoleScope::Global)
}

/// Grants of the demo users, as a fixed table that ignores model scopes.
pub fn hardwired_roles() -> HardwiredRoles {
    HardwiredRoles::new()
        .with_role("admin", &["1"])
        .with_role("editor", &["2"])
        .with_role("owner", &["2"])
        .with_role("reviewer", &["3"])
        .with_role("banned", &["4"])
}

/// Model classes class atoms may name.
pub fn models() -> ModelRegistry {
    ModelRegistry::new()
        .with_class("Document")
        .with_class("Workshop")
}

/// Builds the gate with the role source the configuration selects.
pub fn build_gate(config: AuthorizationConfig) -> AuthorizationGate {
    let source: Arc<dyn RoleSource> = match config.get_role_source() {
        RoleSourceKind::Hardwired => Arc::new(hardwired_roles()),
        RoleSourceKind::ObjectRoles => Arc::new(object_roles()),
    };
    AuthorizationGate::with_models(config, source, models())
}
