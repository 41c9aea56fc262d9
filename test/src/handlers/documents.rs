//! Document routes, guarded by object-scoped roles.

use actix_web::{get, post, web, HttpResponse};

use actix_authorization_core::http::authorization::{AuthorizationGate, PermitOptions, RequestScope};
use actix_authorization_core::http::error::AuthorizationError;

use crate::fixtures::document;

/// Shows a document to its owner, to reviewers of any document and to admins.
#[get("/documents/{id}")]
pub async fn show_document(
    gate: web::Data<AuthorizationGate>,
    scope: RequestScope,
    path: web::Path<String>,
) -> Result<HttpResponse, AuthorizationError> {
    let id = path.into_inner();
    let scope = scope.bind("document", &document(&id));

    let expression = "admin or owner of :document or reviewer of Document";
    if let Some(denial) = gate.permit(expression, &scope, PermitOptions::new())? {
        return Ok(denial.into_response());
    }
    Ok(HttpResponse::Ok().body(format!("Document {}", id)))
}

/// Edits a document. The model is passed per call instead of bound to the
/// request, and a denied user is sent back to the document page.
#[post("/documents/{id}/edit")]
pub async fn edit_document(
    gate: web::Data<AuthorizationGate>,
    scope: RequestScope,
    path: web::Path<String>,
) -> Result<HttpResponse, AuthorizationError> {
    let id = path.into_inner();
    let options = PermitOptions::new()
        .bind("document", &document(&id))
        .permission_denied_redirection(format!("/documents/{}", id));

    let expression = "(editor and owner(:document) or admin) and not banned";
    if let Some(denial) = gate.permit(expression, &scope, options)? {
        return Ok(denial.into_response());
    }
    Ok(HttpResponse::Ok().body(format!("Document {} updated", id)))
}

/// Lists documents awaiting review.
#[get("/reviews")]
pub async fn review_queue(
    gate: web::Data<AuthorizationGate>,
    scope: RequestScope,
) -> Result<HttpResponse, AuthorizationError> {
    if let Some(denial) = gate.permit("reviewer of Document", &scope, PermitOptions::new())? {
        return Ok(denial.into_response());
    }
    Ok(HttpResponse::Ok().body("Review queue"))
}
