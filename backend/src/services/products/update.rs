use crate::error::ServiceError;
use crate::services::{failure, AppState};
use actix_web::{web, HttpResponse, Responder};
use common::model::product::Product;
use common::requests::ProductRequest;

/// `PUT /api/products/{product_id}`: the product as stored afterwards.
pub async fn process(
    state: web::Data<AppState>,
    product_id: web::Path<String>,
    payload: web::Json<ProductRequest>,
) -> impl Responder {
    match update_product(&state, &product_id, payload.into_inner()) {
        Ok(product) => HttpResponse::Ok().json(product),
        Err(e) => failure("Update product", e),
    }
}

fn update_product(
    state: &AppState,
    product_id: &str,
    req: ProductRequest,
) -> Result<Product, ServiceError> {
    req.validate().map_err(ServiceError::Validation)?;
    state.maintainer().update_product(
        product_id,
        req.fields,
        req.label_id.as_deref(),
        req.design.as_ref(),
    )
}
