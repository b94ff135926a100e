use crate::error::ServiceError;
use crate::services::{failure, AppState};
use crate::store::collections;
use actix_web::{web, HttpResponse, Responder};
use common::model::design::DesignAssignment;
use common::model::product::Product;
use serde::Serialize;

/// A product as loaded into the edit form: its fields plus the design chosen
/// for it on the label it is linked to.
#[derive(Debug, Serialize)]
pub struct ProductDetail {
    #[serde(flatten)]
    pub product: Product,
    pub design: Option<DesignAssignment>,
}

pub async fn process(state: web::Data<AppState>, product_id: web::Path<String>) -> impl Responder {
    match product_detail(&state, &product_id) {
        Ok(detail) => HttpResponse::Ok().json(detail),
        Err(e) => failure("Get product", e),
    }
}

fn product_detail(state: &AppState, product_id: &str) -> Result<ProductDetail, ServiceError> {
    let store = state.store.as_ref();
    let product = collections::get_product(store, product_id)?
        .ok_or_else(|| ServiceError::product_not_found(product_id))?;
    let design = match product.label_id.as_deref() {
        Some(label_id) => collections::get_design(store, &product.id, label_id)?,
        None => None,
    };
    Ok(ProductDetail { product, design })
}
