use crate::error::ServiceError;
use crate::services::{failure, AppState};
use crate::store::collections;
use actix_web::{web, HttpResponse, Responder};
use common::model::design::DesignAssignment;
use common::requests::SetDesignRequest;

/// `PUT /api/products/{product_id}/design`: the stored design assignment.
pub async fn process(
    state: web::Data<AppState>,
    product_id: web::Path<String>,
    payload: web::Json<SetDesignRequest>,
) -> impl Responder {
    match set_design(&state, &product_id, &payload) {
        Ok(design) => HttpResponse::Ok().json(design),
        Err(e) => failure("Set design", e),
    }
}

fn set_design(
    state: &AppState,
    product_id: &str,
    req: &SetDesignRequest,
) -> Result<DesignAssignment, ServiceError> {
    let label_id = match req.label_id.as_deref().map(str::trim) {
        Some(id) if !id.is_empty() => id.to_string(),
        _ => collections::get_product(state.store.as_ref(), product_id)?
            .ok_or_else(|| ServiceError::product_not_found(product_id))?
            .label_id
            .ok_or_else(|| {
                ServiceError::Validation(format!("Product '{product_id}' has no label"))
            })?,
    };
    state
        .maintainer()
        .set_design(product_id, &label_id, &req.selection)
}
