use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    routing::get,
    Router,
};
use serde::Deserialize;

use crate::error::AppError;
use crate::pipeline::{calendar, filter, rasterize, render};
use crate::routes::dashboard::select_month;
use crate::routes::query::FilterQuery;
use crate::state::AppState;
use crate::types::viz::{Background, OutputConfig, RenderOptions};

pub fn router() -> Router<AppState> {
    Router::new().route("/api/calendar.png", get(calendar_png))
}

#[derive(Debug, Default, Deserialize)]
struct ImageQuery {
    width: Option<u32>,
    height: Option<u32>,
    background: Option<String>,
}

fn validate_dimensions(width: u32, height: u32) -> Result<(), AppError> {
    const MIN_DIM: u32 = 320;
    const MAX_DIM: u32 = 2048;

    if !(MIN_DIM..=MAX_DIM).contains(&width) || !(MIN_DIM..=MAX_DIM).contains(&height) {
        return Err(AppError::BadRequest(format!(
            "Invalid dimensions: {}x{}. Width/height must be between {} and {}",
            width, height, MIN_DIM, MAX_DIM
        )));
    }
    Ok(())
}

fn parse_background(value: Option<&str>) -> Result<Background, AppError> {
    let Some(value) = value else {
        return Ok(Background::default());
    };
    Background::parse(value).ok_or_else(|| {
        AppError::BadRequest(format!(
            "Invalid background: {}. Use 'white', 'transparent', or a #RRGGBB color",
            value
        ))
    })
}

async fn calendar_png(
    State(state): State<AppState>,
    Query(query): Query<FilterQuery>,
    Query(image): Query<ImageQuery>,
) -> Result<impl IntoResponse, AppError> {
    let mut options = RenderOptions::calendar_defaults();
    match (image.width, image.height) {
        (Some(width), Some(height)) => {
            validate_dimensions(width, height)?;
            options.width = width;
            options.height = height;
        }
        (None, None) => {}
        _ => {
            return Err(AppError::BadRequest(
                "Both width and height must be provided together".to_string(),
            ))
        }
    }
    let background = parse_background(image.background.as_deref())?;

    let dataset = state.dataset();
    let criteria = query.criteria(&dataset)?;
    let view = filter::apply(&dataset.records, &criteria);
    let months = calendar::available_months(&view);
    let ym = select_month(&query, &months)?
        .ok_or_else(|| AppError::NotFound("No data for the selected filters".to_string()))?;

    let month = calendar::map_month(ym, &calendar::restrict_to_month(&view, ym))?;

    tracing::info!(
        "Rendering calendar for {} ({}x{})",
        month.label,
        options.width,
        options.height
    );

    let svg = render::render_calendar_svg(&month, &options)?;
    let png = rasterize::rasterize(&svg, &OutputConfig::for_calendar(&options, background))?;

    tracing::info!("Generated PNG: {} bytes", png.len());

    Ok((StatusCode::OK, [(header::CONTENT_TYPE, "image/png")], png))
}
