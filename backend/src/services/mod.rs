//! HTTP API. Each sub-module owns one `/api/...` scope and registers its
//! routes through `configure_routes`.

pub mod designs;
pub mod history;
pub mod labels;
pub mod layouts;
pub mod products;

use crate::audit::{AuditSink, StoreAuditSink};
use crate::error::ServiceError;
use crate::layout::LayoutSuggester;
use crate::linkage::LinkageMaintainer;
use crate::store::DocumentStore;
use actix_web::{HttpResponse, ResponseError};
use log::{error, warn};
use std::sync::Arc;

/// Handles shared by every request, injected as `web::Data<AppState>`.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn DocumentStore>,
    pub audit: Arc<dyn AuditSink>,
    pub suggester: Arc<dyn LayoutSuggester>,
}

impl AppState {
    pub fn new(store: Arc<dyn DocumentStore>, suggester: Arc<dyn LayoutSuggester>) -> Self {
        let audit = Arc::new(StoreAuditSink::new(store.clone()));
        Self {
            store,
            audit,
            suggester,
        }
    }

    pub fn maintainer(&self) -> LinkageMaintainer<'_> {
        LinkageMaintainer::new(self.store.as_ref(), self.audit.as_ref())
    }
}

/// Logs a failed request and renders the error.
fn failure(action: &str, err: ServiceError) -> HttpResponse {
    match &err {
        ServiceError::Store(_) | ServiceError::Upstream(_) => error!("{action} failed: {err}"),
        _ => warn!("{action} rejected: {err}"),
    }
    err.error_response()
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::AppState;
    use crate::error::ServiceError;
    use crate::layout::{LayoutSuggester, SuggestFuture};
    use crate::store::SqliteStore;
    use common::model::layout::{LayoutSuggestion, LayoutSuggestionInput, LayoutSuggestions};
    use std::sync::Arc;

    /// Answers every request with one canned suggestion, or fails when the
    /// product is named `"fail"`.
    pub struct CannedSuggester;

    impl LayoutSuggester for CannedSuggester {
        fn suggest<'a>(&'a self, input: &'a LayoutSuggestionInput) -> SuggestFuture<'a> {
            Box::pin(async move {
                if input.product_name == "fail" {
                    return Err(ServiceError::Upstream("model unavailable".into()));
                }
                Ok(LayoutSuggestions {
                    layout_suggestions: vec![LayoutSuggestion {
                        description: format!("Price first for {}", input.product_name),
                        visual_representation: "[ PRICE ]\n[ name ]".into(),
                        justification: "Price is read from a distance".into(),
                    }],
                })
            })
        }
    }

    pub fn state() -> AppState {
        AppState::new(
            Arc::new(SqliteStore::open_in_memory().unwrap()),
            Arc::new(CannedSuggester),
        )
    }
}
