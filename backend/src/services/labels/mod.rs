//! # Label Service Module
//!
//! Routes under `/api/labels`. Labels are keyed by their normalized MAC
//! address; linking a label to a product always goes through the linkage
//! maintainer so both sides, the design assignment and the firmware sync
//! record stay in step.
//!
//! ## Registered Routes
//!
//! *   **`POST /`**: registers a label from `{ "macAddress": ... }`.
//! *   **`GET /`**: lists labels with their linked product's name and SKU;
//!     `?search=` filters on MAC, product name or SKU.
//! *   **`GET /available`**: labels free to link; `?productId=` also keeps the
//!     one already linked to that product.
//! *   **`GET /{label_id}`**: one label.
//! *   **`DELETE /{label_id}`**: unlinks and deletes a label.
//! *   **`POST /link`**, **`POST /unlink`**, **`POST /relink`**: change the
//!     label/product link.

mod create;
mod delete;
mod get;
mod link;
mod list;

use actix_web::web::{delete, get, post, scope};
use actix_web::Scope;

const API_PATH: &str = "/api/labels";

pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("", post().to(create::process))
        .route("", get().to(list::process))
        .route("/available", get().to(list::available))
        .route("/link", post().to(link::link))
        .route("/unlink", post().to(link::unlink))
        .route("/relink", post().to(link::relink))
        .route("/{label_id}", get().to(get::process))
        .route("/{label_id}", delete().to(delete::process))
}

#[cfg(test)]
mod tests {
    use super::configure_routes;
    use crate::services::products;
    use crate::services::test_support;
    use actix_web::http::StatusCode;
    use actix_web::{test, web, App};
    use serde_json::{json, Value};

    #[actix_web::test]
    async fn create_link_and_list() {
        let state = test_support::state();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state.clone()))
                .service(configure_routes())
                .service(products::configure_routes()),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/labels")
            .set_json(json!({ "macAddress": "00:1A:2B:3C:4D:5E" }))
            .to_request();
        let label: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(label["id"], "001A2B3C4D5E");

        let req = test::TestRequest::post()
            .uri("/api/products")
            .set_json(json!({ "name": "Leite", "sku": "000123", "price": 4.99 }))
            .to_request();
        let product: Value = test::call_and_read_body_json(&app, req).await;
        let product_id = product["id"].as_str().unwrap().to_string();

        let req = test::TestRequest::post()
            .uri("/api/labels/link")
            .set_json(json!({ "labelId": "001A2B3C4D5E", "productId": product_id }))
            .to_request();
        let pair: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(pair["label"]["productId"], product_id.as_str());
        assert_eq!(pair["product"]["labelId"], "001A2B3C4D5E");

        let req = test::TestRequest::get()
            .uri("/api/labels?search=leite")
            .to_request();
        let listed: Vec<Value> = test::call_and_read_body_json(&app, req).await;
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0]["productName"], "Leite");
        assert_eq!(listed[0]["productSku"], "000123");

        let req = test::TestRequest::get()
            .uri("/api/labels/available")
            .to_request();
        let free: Vec<Value> = test::call_and_read_body_json(&app, req).await;
        assert!(free.is_empty());

        let req = test::TestRequest::get()
            .uri(&format!("/api/labels/available?productId={product_id}"))
            .to_request();
        let free: Vec<Value> = test::call_and_read_body_json(&app, req).await;
        assert_eq!(free.len(), 1);
    }

    #[actix_web::test]
    async fn blank_mac_is_a_bad_request() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(test_support::state()))
                .service(configure_routes()),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/labels")
            .set_json(json!({ "macAddress": "" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn duplicate_label_conflicts_and_missing_label_is_404() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(test_support::state()))
                .service(configure_routes()),
        )
        .await;

        for expected in [StatusCode::CREATED, StatusCode::CONFLICT] {
            let req = test::TestRequest::post()
                .uri("/api/labels")
                .set_json(json!({ "macAddress": "AA:BB:CC:DD:EE:FF" }))
                .to_request();
            assert_eq!(test::call_service(&app, req).await.status(), expected);
        }

        let req = test::TestRequest::delete()
            .uri("/api/labels/FFFFFFFFFFFF")
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);

        let req = test::TestRequest::delete()
            .uri("/api/labels/AABBCCDDEEFF")
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
        let req = test::TestRequest::get()
            .uri("/api/labels/AABBCCDDEEFF")
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);
    }
}
