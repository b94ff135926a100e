use crate::error::ServiceError;
use crate::services::{failure, AppState};
use crate::store::{collections, Filter};
use actix_web::{web, HttpResponse, Responder};
use common::model::product::Product;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    search: Option<String>,
}

pub async fn process(state: web::Data<AppState>, query: web::Query<ListQuery>) -> impl Responder {
    match list_products(&state, query.search.as_deref()) {
        Ok(products) => HttpResponse::Ok().json(products),
        Err(e) => failure("List products", e),
    }
}

fn list_products(state: &AppState, search: Option<&str>) -> Result<Vec<Product>, ServiceError> {
    let mut products = collections::list_products(state.store.as_ref(), &Filter::All)?;
    if let Some(term) = search.map(str::trim).filter(|s| !s.is_empty()) {
        let term = term.to_lowercase();
        products.retain(|p| matches_search(p, &term));
    }
    products.sort_by(|a, b| a.fields.name.to_lowercase().cmp(&b.fields.name.to_lowercase()));
    Ok(products)
}

fn matches_search(product: &Product, term: &str) -> bool {
    let fields = &product.fields;
    [&fields.name, &fields.brand, &fields.sku, &fields.gtin]
        .iter()
        .any(|value| value.to_lowercase().contains(term))
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::model::product::ProductFields;

    #[test]
    fn search_matches_any_identifying_field() {
        let product = Product::new(
            "p1",
            ProductFields {
                name: "Arroz Tipo 1".into(),
                brand: "Tio Zé".into(),
                sku: "ARZ-5".into(),
                price: 22.0,
                gtin: "7891234567890".into(),
                ..Default::default()
            },
        );
        assert!(matches_search(&product, "arroz"));
        assert!(matches_search(&product, "tio"));
        assert!(matches_search(&product, "arz-5"));
        assert!(matches_search(&product, "78912"));
        assert!(!matches_search(&product, "feijão"));
    }
}
