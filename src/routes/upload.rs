use axum::extract::Multipart;
use axum::{extract::State, routing::post, Json, Router};
use chrono::NaiveDate;
use serde::Serialize;

use crate::error::AppError;
use crate::pipeline::load;
use crate::state::AppState;
use crate::types::record::{Dataset, SkippedRow};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/upload", post(upload))
        .route("/api/reload", post(reload))
}

#[derive(Serialize)]
struct DatasetResponse {
    source: String,
    record_count: usize,
    skipped: Vec<SkippedRow>,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
}

impl DatasetResponse {
    fn from_dataset(dataset: &Dataset) -> Self {
        let bounds = dataset.date_bounds();
        Self {
            source: dataset.source.clone(),
            record_count: dataset.records.len(),
            skipped: dataset.skipped.clone(),
            start: bounds.map(|(start, _)| start),
            end: bounds.map(|(_, end)| end),
        }
    }
}

/// Replaces the active dataset with an uploaded CSV. A file that fails to
/// load leaves the previous dataset in place.
async fn upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<DatasetResponse>, AppError> {
    let mut file_bytes: Option<Vec<u8>> = None;
    let mut filename: Option<String> = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        AppError::BadRequest(format!("Failed to read multipart field: {}", e))
    })? {
        let name = field.name().unwrap_or("").to_string();

        if name == "file" {
            filename = field.file_name().map(|s| s.to_string());
            file_bytes = Some(field.bytes().await.map_err(|e| {
                AppError::BadRequest(format!("Failed to read file bytes: {}", e))
            })?.to_vec());
        }
    }

    let bytes = file_bytes.ok_or_else(|| AppError::BadRequest("No file provided".to_string()))?;
    let filename = filename.ok_or_else(|| AppError::BadRequest("No filename provided".to_string()))?;

    if !filename.to_lowercase().ends_with(".csv") {
        return Err(AppError::BadRequest("Unsupported file format".to_string()));
    }

    tracing::info!("Parsing uploaded dataset: {}", filename);

    let dataset = load::load_bytes(&bytes, format!("upload:{}", filename))?;
    let response = DatasetResponse::from_dataset(&dataset);
    state.replace_dataset(dataset);

    Ok(Json(response))
}

/// Re-reads the configured dataset file.
async fn reload(State(state): State<AppState>) -> Result<Json<DatasetResponse>, AppError> {
    let path = state.config.dataset_path.clone();
    tracing::info!("Reloading dataset from {}", path.display());

    let dataset = tokio::task::spawn_blocking(move || load::load_path(&path))
        .await
        .map_err(|e| AppError::Internal(format!("Reload task failed: {}", e)))??;

    let response = DatasetResponse::from_dataset(&dataset);
    state.replace_dataset(dataset);

    Ok(Json(response))
}
