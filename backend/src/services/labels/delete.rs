use crate::services::{failure, AppState};
use actix_web::{web, HttpResponse, Responder};

/// `DELETE /api/labels/{label_id}`: returns the deleted label.
pub async fn process(state: web::Data<AppState>, label_id: web::Path<String>) -> impl Responder {
    match state.maintainer().delete_label(&label_id) {
        Ok(label) => HttpResponse::Ok().json(label),
        Err(e) => failure("Delete label", e),
    }
}
