use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("Failed to read dataset: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("Missing required column: {0}")]
    MissingColumn(&'static str),
    #[error("Row {row}: invalid date '{value}'")]
    InvalidDate { row: usize, value: String },
    #[error("Row {row}: invalid step count '{value}'")]
    InvalidStepCount { row: usize, value: String },
}

#[derive(Debug, thiserror::Error)]
pub enum DeriveError {
    #[error("Malformed temperature range: '{0}'")]
    MalformedTemperature(String),
}

#[derive(Debug, thiserror::Error)]
pub enum CalendarError {
    #[error("Invalid calendar month: {year}-{month:02}")]
    InvalidMonth { year: i32, month: u32 },
}

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("SVG generation failed: {0}")]
    SvgError(String),
}

#[derive(Debug, thiserror::Error)]
pub enum RasterError {
    #[error("PNG rendering failed: {0}")]
    RenderFailed(String),
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error(transparent)]
    Calendar(#[from] CalendarError),
    #[error(transparent)]
    Render(#[from] RenderError),
    #[error(transparent)]
    Raster(#[from] RasterError),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Invalid request: {0}")]
    BadRequest(String),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Load(LoadError::Io(_)) => (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()),
            AppError::Load(_) | AppError::Calendar(_) | AppError::BadRequest(_) => {
                (StatusCode::BAD_REQUEST, self.to_string())
            }
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, self.to_string()),
            AppError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()),
            AppError::Render(_) | AppError::Raster(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, self.to_string())
            }
        };

        let body = Json(json!({
            "error": message
        }));

        (status, body).into_response()
    }
}
