//! Actix Authorization Demo Application
//!
//! Guards routes with role expressions evaluated against a role source.

use actix_web::dev::Service;
use actix_web::{web, App, HttpMessage, HttpServer};
use tracing::info;
use tracing_subscriber::EnvFilter;

use actix_authorization_core::http::authorization::AuthorizationConfig;
use actix_authorization_test::{build_gate, configure, identify, USER_HEADER};

fn print_startup_info(config: &AuthorizationConfig) {
    println!("=== Actix Authorization Demo ===");
    println!();
    println!("Server: http://127.0.0.1:8080");
    println!("Role source: {}", config.get_role_source());
    println!();
    println!("Users (send the id in the {} header):", USER_HEADER);
    println!("  1 alice - admin");
    println!("  2 bob   - editor, owner of Document#1");
    println!("  3 carol - reviewer of Document");
    println!("  4 dave  - banned");
    println!();
    println!("Routes:");
    println!("  GET  /                    - not banned (guests allowed)");
    println!("  GET  /documents/{{id}}      - admin or owner of :document or reviewer of Document");
    println!("  POST /documents/{{id}}/edit - (editor and owner(:document) or admin) and not banned");
    println!("  GET  /reviews             - reviewer of Document");
    println!("  GET  /admin               - admin");
    println!("  GET  /admin/audit         - auditor of :ledger (never bound, fails)");
    println!();
    println!("Examples:");
    println!("  curl -i -H '{}: 2' http://127.0.0.1:8080/documents/1", USER_HEADER);
    println!("  curl -i -H '{}: 2' http://127.0.0.1:8080/documents/2   # 302 /permission_denied", USER_HEADER);
    println!("  curl -i http://127.0.0.1:8080/admin                    # 302 /login");
    println!();
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = AuthorizationConfig::from_env().map_err(std::io::Error::other)?;
    print_startup_info(&config);
    info!(role_source = %config.get_role_source(), "starting authorization demo");

    let gate = web::Data::new(build_gate(config));

    HttpServer::new(move || {
        App::new()
            .app_data(gate.clone())
            .wrap_fn(|req, srv| {
                let actor = identify(req.headers());
                req.extensions_mut().insert(actor);
                srv.call(req)
            })
            .configure(configure)
    })
    .bind("127.0.0.1:8080")?
    .run()
    .await
}
