use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::Serialize;

use crate::error::AppError;
use crate::pipeline::{aggregate, calendar, filter};
use crate::routes::query::FilterQuery;
use crate::state::AppState;
use crate::types::calendar::{CalendarMonth, MonthOption, YearMonth};
use crate::types::filter::FilterCriteria;
use crate::types::summary::{GroupMean, Kpis, Timeline};

pub fn router() -> Router<AppState> {
    Router::new().route("/api/dashboard", get(dashboard))
}

#[derive(Serialize)]
struct DashboardResponse {
    filters: FilterCriteria,
    record_count: usize,
    kpis: Kpis,
    by_weekday: Vec<GroupMean>,
    by_temperature: Vec<GroupMean>,
    by_location: Vec<GroupMean>,
    timeline: Timeline,
    months: Vec<MonthOption>,
    selected_month: Option<String>,
    calendar: Option<CalendarMonth>,
}

async fn dashboard(
    State(state): State<AppState>,
    Query(query): Query<FilterQuery>,
) -> Result<Json<DashboardResponse>, AppError> {
    let dataset = state.dataset();
    let criteria = query.criteria(&dataset)?;
    let view = filter::apply(&dataset.records, &criteria);

    let months = calendar::available_months(&view);
    let selected = select_month(&query, &months)?;
    let calendar = match selected {
        Some(ym) => Some(calendar::map_month(ym, &calendar::restrict_to_month(&view, ym))?),
        None => None,
    };

    tracing::info!(
        "Dashboard for {:?}: {} of {} records",
        criteria,
        view.len(),
        dataset.records.len()
    );

    Ok(Json(DashboardResponse {
        record_count: view.len(),
        kpis: aggregate::kpis(&view),
        by_weekday: aggregate::by_weekday(&view),
        by_temperature: aggregate::by_temperature(&view),
        by_location: aggregate::by_location(&view),
        timeline: aggregate::timeline(&view),
        months: months.iter().copied().map(MonthOption::from).collect(),
        selected_month: selected.map(|ym| ym.key()),
        calendar,
        filters: criteria,
    }))
}

/// The requested month when it is one of `months`, otherwise the first
/// available month. `None` only when the view is empty.
pub(crate) fn select_month(query: &FilterQuery, months: &[YearMonth]) -> Result<Option<YearMonth>, AppError> {
    match query.month()? {
        Some(ym) if months.contains(&ym) => Ok(Some(ym)),
        Some(ym) => Err(AppError::BadRequest(format!(
            "Month {} has no data for the selected filters",
            ym.key()
        ))),
        None => Ok(months.first().copied()),
    }
}
