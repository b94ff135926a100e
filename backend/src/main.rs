mod audit;
mod catalog;
mod config;
mod error;
mod job_controller;
mod layout;
mod linkage;
mod services;
mod store;

use crate::config::Config;
use crate::job_controller::state::JobsState;
use crate::layout::GeminiLayoutSuggester;
use crate::services::AppState;
use crate::store::SqliteStore;
use actix_web::{web, App, HttpServer};
use env_logger::Env;
use log::{info, warn};
use std::io;
use std::sync::Arc;

#[actix_web::main]
async fn main() -> io::Result<()> {
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    let config = Config::from_env().map_err(io::Error::other)?;
    if config.genai.api_key.is_none() {
        warn!("GEMINI_API_KEY is not set, layout suggestions will fail");
    }

    let store = SqliteStore::open(&config.db_path).map_err(io::Error::other)?;
    info!("Document store at {}", config.db_path.display());
    let state = AppState::new(
        Arc::new(store),
        Arc::new(GeminiLayoutSuggester::new(config.genai.clone())),
    );

    // Initialize job controller state
    let (jobs_state, rx) = JobsState::new();
    let updater_state = jobs_state.clone();
    tokio::spawn(async move {
        job_controller::state::start_job_updater(updater_state, rx).await;
    });

    info!("Server running at http://{}:{}", config.host, config.port);

    HttpServer::new(move || {
        App::new()
            .app_data(web::JsonConfig::default().limit(1024 * 1024)) // 1 MB
            .app_data(web::Data::new(state.clone()))
            .app_data(web::Data::new(jobs_state.clone()))
            .service(services::labels::configure_routes())
            .service(services::products::configure_routes())
            .service(services::designs::configure_routes())
            .service(services::history::configure_routes())
            .service(services::layouts::configure_routes())
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
