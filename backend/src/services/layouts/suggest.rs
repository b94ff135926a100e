use crate::error::ServiceError;
use crate::job_controller::state::{JobUpdate, JobsState};
use crate::services::{failure, AppState};
use actix_web::{web, HttpResponse, Responder};
use common::jobs::JobStatus;
use common::model::layout::LayoutSuggestionInput;
use log::{info, warn};
use serde_json::json;

pub(crate) async fn process(
    state: web::Data<AppState>,
    jobs: web::Data<JobsState>,
    payload: web::Json<LayoutSuggestionInput>,
) -> impl Responder {
    let input = payload.into_inner();
    if let Err(message) = input.validate() {
        return failure("Suggest layouts", ServiceError::Validation(message));
    }

    let job_id = jobs.register().await;
    let suggester = state.suggester.clone();
    let tx = jobs.tx.clone();
    let id = job_id.clone();

    tokio::spawn(async move {
        let status = match suggester.suggest(&input).await {
            Ok(suggestions) => match serde_json::to_string(&suggestions) {
                Ok(body) => {
                    info!(
                        "Layout job {id}: {} suggestions",
                        suggestions.layout_suggestions.len()
                    );
                    JobStatus::Completed(body)
                }
                Err(e) => JobStatus::Failed(e.to_string()),
            },
            Err(e) => {
                warn!("Layout job {id} failed: {e}");
                JobStatus::Failed(e.to_string())
            }
        };
        let _ = tx.send(JobUpdate { job_id: id, status }).await;
    });

    HttpResponse::Ok().json(json!({ "job_id": job_id }))
}
