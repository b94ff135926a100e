use crate::error::ServiceError;
use crate::services::{failure, AppState};
use actix_web::{web, HttpResponse, Responder};
use common::model::label::Label;
use common::requests::CreateLabelRequest;

/// `POST /api/labels`: `201 Created` with the stored label.
pub async fn process(
    state: web::Data<AppState>,
    payload: web::Json<CreateLabelRequest>,
) -> impl Responder {
    match create_label(&state, &payload) {
        Ok(label) => HttpResponse::Created().json(label),
        Err(e) => failure("Create label", e),
    }
}

fn create_label(state: &AppState, req: &CreateLabelRequest) -> Result<Label, ServiceError> {
    req.validate().map_err(ServiceError::Validation)?;
    state.maintainer().create_label(&req.mac_address)
}
