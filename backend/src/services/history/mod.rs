//! The command log under `/api/history`.
//!
//! `GET /?limit=` returns the most recent entries, newest first. `limit`
//! defaults to and is capped at [`HISTORY_LIMIT`]. `DELETE /` empties the
//! log.

use crate::audit::{clear_entries, recent_entries, HISTORY_LIMIT};
use crate::services::{failure, AppState};
use actix_web::web::{delete, get, scope};
use actix_web::{web, HttpResponse, Responder, Scope};
use log::info;
use serde::Deserialize;
use serde_json::json;

const API_PATH: &str = "/api/history";

#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    limit: Option<usize>,
}

pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("", get().to(process))
        .route("", delete().to(clear))
}

async fn process(state: web::Data<AppState>, query: web::Query<HistoryQuery>) -> impl Responder {
    let limit = query.limit.unwrap_or(HISTORY_LIMIT);
    match recent_entries(state.store.as_ref(), limit) {
        Ok(entries) => HttpResponse::Ok().json(entries),
        Err(e) => failure("Read history", e.into()),
    }
}

async fn clear(state: web::Data<AppState>) -> impl Responder {
    match clear_entries(state.store.as_ref()) {
        Ok(deleted) => {
            info!("Command log cleared, {deleted} entries removed");
            HttpResponse::Ok().json(json!({ "deleted": deleted }))
        }
        Err(e) => failure("Clear history", e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::{labels, test_support};
    use actix_web::{test, App};
    use serde_json::Value;

    #[actix_web::test]
    async fn mutations_are_logged_and_limited() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(test_support::state()))
                .service(configure_routes())
                .service(labels::configure_routes()),
        )
        .await;

        for mac in ["AA:00:00:00:00:01", "AA:00:00:00:00:02"] {
            let req = test::TestRequest::post()
                .uri("/api/labels")
                .set_json(json!({ "macAddress": mac }))
                .to_request();
            test::call_service(&app, req).await;
        }
        let req = test::TestRequest::delete()
            .uri("/api/labels/AA0000000001")
            .to_request();
        test::call_service(&app, req).await;

        let req = test::TestRequest::get().uri("/api/history").to_request();
        let entries: Vec<Value> = test::call_and_read_body_json(&app, req).await;
        assert_eq!(entries.len(), 3);
        assert!(entries
            .iter()
            .any(|e| e["command"].as_str().unwrap().starts_with("Exclusão da etiqueta")));

        let req = test::TestRequest::get()
            .uri("/api/history?limit=1")
            .to_request();
        let entries: Vec<Value> = test::call_and_read_body_json(&app, req).await;
        assert_eq!(entries.len(), 1);
    }

    #[actix_web::test]
    async fn clear_empties_the_log() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(test_support::state()))
                .service(configure_routes())
                .service(labels::configure_routes()),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/labels")
            .set_json(json!({ "macAddress": "AA:00:00:00:00:01" }))
            .to_request();
        test::call_service(&app, req).await;

        let req = test::TestRequest::delete().uri("/api/history").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["deleted"], 1);

        let req = test::TestRequest::get().uri("/api/history").to_request();
        let entries: Vec<Value> = test::call_and_read_body_json(&app, req).await;
        assert!(entries.is_empty());
    }
}
