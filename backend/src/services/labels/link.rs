use crate::services::{failure, AppState};
use crate::error::ServiceError;
use actix_web::{web, HttpResponse, Responder};
use common::requests::{LinkRequest, RelinkRequest};

/// `POST /api/labels/link`: both records after the link.
pub async fn link(state: web::Data<AppState>, payload: web::Json<LinkRequest>) -> impl Responder {
    let result = payload
        .validate()
        .map_err(ServiceError::Validation)
        .and_then(|_| state.maintainer().link(&payload.label_id, &payload.product_id));
    match result {
        Ok(pair) => HttpResponse::Ok().json(pair),
        Err(e) => failure("Link label", e),
    }
}

/// `POST /api/labels/unlink`: both records after the unlink. Unlinking a
/// pair that is not linked succeeds without changing anything.
pub async fn unlink(state: web::Data<AppState>, payload: web::Json<LinkRequest>) -> impl Responder {
    let result = payload
        .validate()
        .map_err(ServiceError::Validation)
        .and_then(|_| state.maintainer().unlink(&payload.label_id, &payload.product_id));
    match result {
        Ok(pair) => HttpResponse::Ok().json(pair),
        Err(e) => failure("Unlink label", e),
    }
}

/// `POST /api/labels/relink`: the label and both products afterwards.
pub async fn relink(
    state: web::Data<AppState>,
    payload: web::Json<RelinkRequest>,
) -> impl Responder {
    let result = payload.validate().map_err(ServiceError::Validation).and_then(|_| {
        state.maintainer().relink(
            &payload.label_id,
            &payload.old_product_id,
            &payload.new_product_id,
        )
    });
    match result {
        Ok(relinked) => HttpResponse::Ok().json(relinked),
        Err(e) => failure("Relink label", e),
    }
}
