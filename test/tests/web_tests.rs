//! HTTP tests for the demo routes.
//!
//! Denials surface as `302 Found` redirects, resolution errors as `500`.

mod common;

use actix_web::http::{header, StatusCode};
use actix_web::test;

use actix_authorization_core::http::authorization::RoleSourceKind;

use common::{as_user, create_test_app};

fn location(resp: &actix_web::dev::ServiceResponse) -> &str {
    resp.headers()
        .get(header::LOCATION)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
}

// =============================================================================
// Guest Routes
// =============================================================================

#[actix_web::test]
async fn test_home_open_to_guests() {
    let app = create_test_app(RoleSourceKind::ObjectRoles).await;

    let req = test::TestRequest::get().uri("/").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body = test::read_body(resp).await;
    assert_eq!(body, "Welcome, guest!");
}

#[actix_web::test]
async fn test_home_greets_user() {
    let app = create_test_app(RoleSourceKind::ObjectRoles).await;

    let req = test::TestRequest::get()
        .uri("/")
        .insert_header(as_user("2"))
        .to_request();
    let body = test::call_and_read_body(&app, req).await;
    assert_eq!(body, "Welcome, user 2!");
}

#[actix_web::test]
async fn test_home_closed_to_banned_user() {
    let app = create_test_app(RoleSourceKind::ObjectRoles).await;

    let req = test::TestRequest::get()
        .uri("/")
        .insert_header(as_user("4"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(location(&resp), "/permission_denied");
}

// =============================================================================
// Document Routes
// =============================================================================

#[actix_web::test]
async fn test_document_requires_login() {
    let app = create_test_app(RoleSourceKind::ObjectRoles).await;

    let req = test::TestRequest::get().uri("/documents/1").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(location(&resp), "/login");
}

#[actix_web::test]
async fn test_unknown_user_requires_login() {
    let app = create_test_app(RoleSourceKind::ObjectRoles).await;

    let req = test::TestRequest::get()
        .uri("/documents/1")
        .insert_header(as_user("999"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(location(&resp), "/login");
}

#[actix_web::test]
async fn test_document_owner_allowed() {
    let app = create_test_app(RoleSourceKind::ObjectRoles).await;

    let req = test::TestRequest::get()
        .uri("/documents/1")
        .insert_header(as_user("2"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body = test::read_body(resp).await;
    assert_eq!(body, "Document 1");
}

#[actix_web::test]
async fn test_other_document_denied_to_owner() {
    let app = create_test_app(RoleSourceKind::ObjectRoles).await;

    let req = test::TestRequest::get()
        .uri("/documents/2")
        .insert_header(as_user("2"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(location(&resp), "/permission_denied");
}

#[actix_web::test]
async fn test_document_reviewer_and_admin_allowed() {
    let app = create_test_app(RoleSourceKind::ObjectRoles).await;

    for user in ["1", "3"] {
        let req = test::TestRequest::get()
            .uri("/documents/2")
            .insert_header(as_user(user))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK, "user {}", user);
    }
}

#[actix_web::test]
async fn test_hardwired_owner_sees_every_document() {
    let app = create_test_app(RoleSourceKind::Hardwired).await;

    let req = test::TestRequest::get()
        .uri("/documents/2")
        .insert_header(as_user("2"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn test_edit_own_document() {
    let app = create_test_app(RoleSourceKind::ObjectRoles).await;

    let req = test::TestRequest::post()
        .uri("/documents/1/edit")
        .insert_header(as_user("2"))
        .to_request();
    let body = test::call_and_read_body(&app, req).await;
    assert_eq!(body, "Document 1 updated");
}

#[actix_web::test]
async fn test_edit_denial_redirects_to_document() {
    let app = create_test_app(RoleSourceKind::ObjectRoles).await;

    let req = test::TestRequest::post()
        .uri("/documents/2/edit")
        .insert_header(as_user("2"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(location(&resp), "/documents/2");
}

#[actix_web::test]
async fn test_review_queue() {
    let app = create_test_app(RoleSourceKind::ObjectRoles).await;

    let req = test::TestRequest::get()
        .uri("/reviews")
        .insert_header(as_user("3"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::get()
        .uri("/reviews")
        .insert_header(as_user("1"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FOUND);
}

// =============================================================================
// Admin Routes
// =============================================================================

#[actix_web::test]
async fn test_admin_dashboard() {
    let app = create_test_app(RoleSourceKind::Hardwired).await;

    let req = test::TestRequest::get()
        .uri("/admin")
        .insert_header(as_user("1"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::get()
        .uri("/admin")
        .insert_header(as_user("2"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(location(&resp), "/permission_denied");
}

#[actix_web::test]
async fn test_unbound_model_is_a_server_error() {
    let app = create_test_app(RoleSourceKind::ObjectRoles).await;

    let req = test::TestRequest::get()
        .uri("/admin/audit")
        .insert_header(as_user("1"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body = test::read_body(resp).await;
    assert!(String::from_utf8_lossy(&body).contains("ledger"));
}

#[actix_web::test]
async fn test_unbound_model_still_requires_login() {
    let app = create_test_app(RoleSourceKind::ObjectRoles).await;

    let req = test::TestRequest::get().uri("/admin/audit").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(location(&resp), "/login");
}
