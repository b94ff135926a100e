use crate::services::{failure, AppState};
use actix_web::{web, HttpResponse, Responder};

pub async fn process(state: web::Data<AppState>, product_id: web::Path<String>) -> impl Responder {
    match state.maintainer().delete_product(&product_id) {
        Ok(product) => HttpResponse::Ok().json(product),
        Err(e) => failure("Delete product", e),
    }
}
