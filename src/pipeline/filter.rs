use chrono::{Duration, NaiveDate};

use crate::types::filter::{DateWindow, DayFilter, FilterCriteria, FilteredView};
use crate::types::record::DailyRecord;

pub fn apply(records: &[DailyRecord], criteria: &FilterCriteria) -> FilteredView {
    let window = resolve_window(criteria.window, records);

    let matched: Vec<DailyRecord> = records
        .iter()
        .filter(|r| window.map_or(true, |(start, end)| r.date >= start && r.date <= end))
        .filter(|r| criteria.location.as_ref().map_or(true, |loc| &r.location == loc))
        .filter(|r| match &criteria.day {
            None => true,
            Some(DayFilter::DayType(day_type)) => r.day_type == *day_type,
            Some(DayFilter::Weekday(name)) => &r.day_of_week == name,
        })
        .filter(|r| criteria.temp_bucket.map_or(true, |bucket| r.temp_bucket == bucket))
        .cloned()
        .collect();

    tracing::debug!(
        "Filter {:?} matched {} of {} records",
        criteria,
        matched.len(),
        records.len()
    );

    FilteredView::from_records(matched)
}

/// Inclusive `[start, end]`, or `None` when the window does not restrict.
/// Relative windows anchor on the latest date in `records`.
pub fn resolve_window(window: DateWindow, records: &[DailyRecord]) -> Option<(NaiveDate, NaiveDate)> {
    match window {
        DateWindow::All => None,
        DateWindow::LastDays { days } => {
            let max = records.iter().map(|r| r.date).max()?;
            Some((max - Duration::days(days), max))
        }
        DateWindow::Custom { start, end } => Some((start, end)),
    }
}
