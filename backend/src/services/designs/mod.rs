//! Read-only access to the label template catalog under `/api/designs`.
//!
//! *   **`GET /`**: every template with its editable fields.
//! *   **`GET /{design_id}`**: one template, `404` for an unknown id.

use crate::catalog::{self, TEMPLATES};
use actix_web::web::{get, scope};
use actix_web::{web, HttpResponse, Responder, Scope};

const API_PATH: &str = "/api/designs";

pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("", get().to(list))
        .route("/{design_id}", get().to(get_design))
}

async fn list() -> impl Responder {
    HttpResponse::Ok().json(TEMPLATES)
}

async fn get_design(design_id: web::Path<String>) -> impl Responder {
    match catalog::find(&design_id) {
        Some(template) => HttpResponse::Ok().json(template),
        None => HttpResponse::NotFound().body(format!("Design '{design_id}' not found")),
    }
}
