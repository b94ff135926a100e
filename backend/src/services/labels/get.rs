use crate::error::ServiceError;
use crate::services::{failure, AppState};
use crate::store::collections;
use actix_web::{web, HttpResponse, Responder};

pub async fn process(state: web::Data<AppState>, label_id: web::Path<String>) -> impl Responder {
    let label_id = label_id.into_inner();
    let result = collections::get_label(state.store.as_ref(), &label_id)
        .map_err(ServiceError::from)
        .and_then(|label| label.ok_or_else(|| ServiceError::label_not_found(&label_id)));
    match result {
        Ok(label) => HttpResponse::Ok().json(label),
        Err(e) => failure("Get label", e),
    }
}
