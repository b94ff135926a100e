use crate::error::ServiceError;
use crate::services::{failure, AppState};
use crate::store::{collections, Filter};
use actix_web::{web, HttpResponse, Responder};
use common::model::label::Label;
use common::model::product::Product;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    search: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailableQuery {
    product_id: Option<String>,
}

/// A label row as shown in the label table.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelListItem {
    #[serde(flatten)]
    pub label: Label,
    pub product_name: Option<String>,
    pub product_sku: Option<String>,
}

pub async fn process(state: web::Data<AppState>, query: web::Query<ListQuery>) -> impl Responder {
    match list_labels(&state, query.search.as_deref()) {
        Ok(items) => HttpResponse::Ok().json(items),
        Err(e) => failure("List labels", e),
    }
}

/// Labels a product form may offer: the unlinked ones plus the one already
/// linked to `productId`.
pub async fn available(
    state: web::Data<AppState>,
    query: web::Query<AvailableQuery>,
) -> impl Responder {
    let mut allowed = vec![Value::Null];
    if let Some(product_id) = query.product_id.as_deref() {
        allowed.push(Value::from(product_id));
    }
    match collections::list_labels(state.store.as_ref(), &Filter::is_in("productId", allowed)) {
        Ok(labels) => HttpResponse::Ok().json(labels),
        Err(e) => failure("List available labels", e.into()),
    }
}

fn list_labels(state: &AppState, search: Option<&str>) -> Result<Vec<LabelListItem>, ServiceError> {
    let store = state.store.as_ref();
    let products: HashMap<String, Product> = collections::list_products(store, &Filter::All)?
        .into_iter()
        .map(|p| (p.id.clone(), p))
        .collect();
    let term = search.map(str::trim).filter(|s| !s.is_empty()).map(str::to_lowercase);

    let mut items: Vec<LabelListItem> = collections::list_labels(store, &Filter::All)?
        .into_iter()
        .filter_map(|label| {
            let product = label.product_id.as_deref().and_then(|id| products.get(id));
            if let Some(term) = &term {
                if !matches_search(&label, product, term) {
                    return None;
                }
            }
            Some(LabelListItem {
                product_name: product.map(|p| p.fields.name.clone()),
                product_sku: product.map(|p| p.fields.sku.clone()),
                label,
            })
        })
        .collect();
    items.sort_by(|a, b| a.label.mac_address.cmp(&b.label.mac_address));
    Ok(items)
}

/// `term` must already be lowercase.
fn matches_search(label: &Label, product: Option<&Product>, term: &str) -> bool {
    if label.mac_address.to_lowercase().contains(term) {
        return true;
    }
    product.is_some_and(|p| {
        p.fields.name.to_lowercase().contains(term) || p.fields.sku.to_lowercase().contains(term)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::model::product::ProductFields;

    #[test]
    fn search_covers_mac_and_linked_product() {
        let mut label = Label::new("00:1A:2B:3C:4D:5E");
        let product = Product::new(
            "p1",
            ProductFields {
                name: "Leite Integral".into(),
                sku: "SKU-77".into(),
                price: 1.0,
                ..Default::default()
            },
        );
        label.product_id = Some("p1".into());

        assert!(matches_search(&label, None, "4d:5e"));
        assert!(matches_search(&label, Some(&product), "integral"));
        assert!(matches_search(&label, Some(&product), "sku-77"));
        assert!(!matches_search(&label, None, "integral"));
        assert!(!matches_search(&label, Some(&product), "café"));
    }
}
