//! Error taxonomy shared by every service.
//!
//! Handlers turn a [`ServiceError`] into an HTTP response through
//! [`ResponseError`]; the body is always a plain, human-readable message.

use crate::store::StoreError;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// A referenced label or product id has no backing document.
    #[error("{kind} '{id}' not found")]
    NotFound { kind: &'static str, id: String },

    /// A required field is missing or malformed. Raised before any write.
    #[error("{0}")]
    Validation(String),

    /// The requested link would give a label or product a second partner.
    #[error("{0}")]
    Conflict(String),

    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// The layout suggestion model failed or answered with garbage.
    #[error("layout service error: {0}")]
    Upstream(String),
}

impl ServiceError {
    pub fn label_not_found(id: &str) -> Self {
        ServiceError::NotFound {
            kind: "Label",
            id: id.to_string(),
        }
    }

    pub fn product_not_found(id: &str) -> Self {
        ServiceError::NotFound {
            kind: "Product",
            id: id.to_string(),
        }
    }
}

impl ResponseError for ServiceError {
    fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::NotFound { .. } => StatusCode::NOT_FOUND,
            ServiceError::Validation(_) => StatusCode::BAD_REQUEST,
            ServiceError::Conflict(_) => StatusCode::CONFLICT,
            ServiceError::Store(_) => StatusCode::SERVICE_UNAVAILABLE,
            ServiceError::Upstream(_) => StatusCode::BAD_GATEWAY,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).body(self.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_maps_to_404() {
        let err = ServiceError::label_not_found("001A2B3C4D5E");
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(err.to_string(), "Label '001A2B3C4D5E' not found");
    }

    #[test]
    fn store_failures_are_unavailable() {
        let err: ServiceError = StoreError::Backend("disk full".into()).into();
        assert_eq!(err.status_code(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
