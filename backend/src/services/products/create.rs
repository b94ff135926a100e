use crate::error::ServiceError;
use crate::services::{failure, AppState};
use actix_web::{web, HttpResponse, Responder};
use common::model::product::Product;
use common::requests::ProductRequest;

/// `POST /api/products`: `201 Created` with the stored product.
pub async fn process(
    state: web::Data<AppState>,
    payload: web::Json<ProductRequest>,
) -> impl Responder {
    match create_product(&state, payload.into_inner()) {
        Ok(product) => HttpResponse::Created().json(product),
        Err(e) => failure("Create product", e),
    }
}

fn create_product(state: &AppState, req: ProductRequest) -> Result<Product, ServiceError> {
    req.validate().map_err(ServiceError::Validation)?;
    state
        .maintainer()
        .create_product(req.fields, req.label_id.as_deref(), req.design.as_ref())
}
