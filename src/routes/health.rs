use axum::{extract::State, routing::get, Json, Router};
use serde_json::{json, Value};

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health))
}

async fn health(State(state): State<AppState>) -> Json<Value> {
    let dataset = state.dataset();
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "records": dataset.records.len(),
        "loaded_at": dataset.loaded_at,
    }))
}
