use crate::error::Result;
use crate::models::{CurationOutcome, RawSelectionRequest};
use crate::services::CurationEngine;
use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;

pub struct AppState {
    pub curation_engine: Arc<CurationEngine>,
}

#[derive(Debug, Serialize)]
struct Health {
    status: &'static str,
}

pub fn curate_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(health))
        .route("/curate", post(curate))
}

async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

async fn curate(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RawSelectionRequest>,
) -> Result<Json<CurationOutcome>> {
    let outcome = state.curation_engine.curate(req).await?;
    tracing::info!("Curation finished with {} tracks", outcome.track_count());
    Ok(Json(outcome))
}
