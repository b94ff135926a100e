//! # Product Service Module
//!
//! Routes under `/api/products`. Writes that touch a label (creating a
//! product with a label, moving the label on update, choosing a design,
//! deleting) go through the linkage maintainer.
//!
//! ## Registered Routes
//!
//! *   **`POST /`**: creates a product, optionally linked to a free label and
//!     with a design for the pair.
//! *   **`GET /`**: lists products; `?search=` filters on name, brand, SKU or
//!     GTIN.
//! *   **`GET /{product_id}`**: the product and the design assigned to it on
//!     its current label.
//! *   **`PUT /{product_id}`**: replaces the product fields and moves the
//!     label link when `labelId` changes.
//! *   **`DELETE /{product_id}`**: unlinks and deletes a product.
//! *   **`PUT /{product_id}/design`**: chooses a template for the product and
//!     a label, defaulting to the linked one.

mod create;
mod delete;
mod design;
mod get;
mod list;
mod update;

use actix_web::web::{delete, get, post, put, scope};
use actix_web::Scope;

const API_PATH: &str = "/api/products";

pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("", post().to(create::process))
        .route("", get().to(list::process))
        .route("/{product_id}", get().to(get::process))
        .route("/{product_id}", put().to(update::process))
        .route("/{product_id}", delete().to(delete::process))
        .route("/{product_id}/design", put().to(design::process))
}
