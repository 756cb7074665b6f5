use axum::{extract::State, routing::get, Json, Router};
use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use crate::state::AppState;
use crate::types::filter::{temperature_choices, DateWindow, DayFilter, ALL_LOCATIONS};
use crate::types::record::{SkippedRow, STEP_GOAL};

pub fn router() -> Router<AppState> {
    Router::new().route("/api/options", get(options))
}

#[derive(Serialize)]
struct DateBounds {
    start: NaiveDate,
    end: NaiveDate,
}

#[derive(Serialize)]
struct OptionsResponse {
    goal: u32,
    date_ranges: Vec<&'static str>,
    locations: Vec<String>,
    days: Vec<&'static str>,
    temperatures: Vec<&'static str>,
    bounds: Option<DateBounds>,
    record_count: usize,
    skipped: Vec<SkippedRow>,
    source: String,
    loaded_at: DateTime<Utc>,
}

async fn options(State(state): State<AppState>) -> Json<OptionsResponse> {
    let dataset = state.dataset();

    let mut locations = vec![ALL_LOCATIONS.to_string()];
    locations.extend(dataset.locations());

    Json(OptionsResponse {
        goal: STEP_GOAL,
        date_ranges: DateWindow::presets(),
        locations,
        days: DayFilter::choices(),
        temperatures: temperature_choices(),
        bounds: dataset
            .date_bounds()
            .map(|(start, end)| DateBounds { start, end }),
        record_count: dataset.records.len(),
        skipped: dataset.skipped.clone(),
        source: dataset.source.clone(),
        loaded_at: dataset.loaded_at,
    })
}
