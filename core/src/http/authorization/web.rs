//! Actix Web glue.
//!
//! Only the thin edges live here: reading the current user from request
//! extensions, turning a [`Denial`] into a redirect and mapping errors to
//! responses. Registering checks and flash messaging are left to the app.

use std::future::{ready, Ready};

use actix_web::body::BoxBody;
use actix_web::dev::Payload;
use actix_web::http::{header, StatusCode};
use actix_web::{FromRequest, HttpMessage, HttpRequest, HttpResponse, Responder, ResponseError};

use super::context::RequestScope;
use super::gate::Denial;
use super::principal::Actor;
use crate::http::error::AuthorizationError;

/// Builds a scope whose current user is the [`Actor`] an authentication
/// middleware stored in the request extensions.
///
/// A request without one is treated as [`Actor::NotAuthenticated`].
///
/// # Usage
/// ```ignore
/// async fn handler(
///     gate: web::Data<AuthorizationGate>,
///     scope: RequestScope,
/// ) -> Result<HttpResponse, AuthorizationError> {
///     if let Some(denial) = gate.permit("admin", &scope, PermitOptions::new())? {
///         return Ok(denial.into_response());
///     }
///     Ok(HttpResponse::Ok().finish())
/// }
/// ```
impl FromRequest for RequestScope {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let actor = req
            .extensions()
            .get::<Actor>()
            .cloned()
            .unwrap_or(Actor::NotAuthenticated);
        ready(Ok(RequestScope::new().with_current_user(actor)))
    }
}

impl Denial {
    /// Converts the denial into a `302 Found` redirect.
    pub fn into_response(self) -> HttpResponse {
        HttpResponse::Found()
            .append_header((header::LOCATION, self.location()))
            .finish()
    }
}

impl Responder for Denial {
    type Body = BoxBody;

    fn respond_to(self, _req: &HttpRequest) -> HttpResponse<Self::Body> {
        self.into_response()
    }
}

impl ResponseError for AuthorizationError {
    fn status_code(&self) -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).body(self.to_string())
    }
}
