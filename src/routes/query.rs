use chrono::NaiveDate;
use serde::Deserialize;

use crate::error::AppError;
use crate::types::calendar::YearMonth;
use crate::types::filter::{DateWindow, DayFilter, FilterCriteria, ALL_DAYS, ALL_LOCATIONS, ALL_TEMPERATURES};
use crate::types::record::{Dataset, TempBucket};

/// Filter selections shared by the dashboard and calendar endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct FilterQuery {
    pub range: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
    pub location: Option<String>,
    pub day: Option<String>,
    pub temp: Option<String>,
    pub month: Option<String>,
}

impl FilterQuery {
    pub fn criteria(&self, dataset: &Dataset) -> Result<FilterCriteria, AppError> {
        Ok(FilterCriteria {
            window: self.window(dataset)?,
            location: self
                .location
                .as_deref()
                .filter(|loc| !loc.is_empty() && *loc != ALL_LOCATIONS)
                .map(str::to_string),
            day: self.day_filter()?,
            temp_bucket: self.temp_bucket()?,
        })
    }

    /// The explicitly requested calendar month, if any.
    pub fn month(&self) -> Result<Option<YearMonth>, AppError> {
        match self.month.as_deref() {
            None | Some("") => Ok(None),
            Some(value) => YearMonth::from_str(value).map(Some).ok_or_else(|| {
                AppError::BadRequest(format!("Invalid month: {}. Use YYYY-MM", value))
            }),
        }
    }

    fn window(&self, dataset: &Dataset) -> Result<DateWindow, AppError> {
        let is_custom = match self.range.as_deref() {
            Some(range) => matches!(range.to_lowercase().as_str(), "custom" | "custom range"),
            None => self.start.is_some() || self.end.is_some(),
        };

        if !is_custom {
            let Some(range) = self.range.as_deref() else {
                return Ok(DateWindow::All);
            };
            return DateWindow::from_str(range).ok_or_else(|| {
                AppError::BadRequest(format!(
                    "Invalid range: {}. Use 'all', 'last30', 'last60', or 'custom'",
                    range
                ))
            });
        }

        let bounds = dataset.date_bounds();
        let start = match self.start.as_deref() {
            Some(value) => parse_date(value)?,
            None => bounds.map(|(min, _)| min).ok_or_else(|| {
                AppError::BadRequest("Custom range needs a start date".to_string())
            })?,
        };
        let end = match self.end.as_deref() {
            Some(value) => parse_date(value)?,
            None => bounds.map(|(_, max)| max).ok_or_else(|| {
                AppError::BadRequest("Custom range needs an end date".to_string())
            })?,
        };

        if start > end {
            return Err(AppError::BadRequest(format!(
                "Custom range starts after it ends: {} > {}",
                start, end
            )));
        }

        Ok(DateWindow::Custom { start, end })
    }

    fn day_filter(&self) -> Result<Option<DayFilter>, AppError> {
        match self.day.as_deref() {
            None | Some("") | Some(ALL_DAYS) => Ok(None),
            Some(value) => DayFilter::from_str(value).map(Some).ok_or_else(|| {
                AppError::BadRequest(format!(
                    "Invalid day: {}. Use 'All Days', 'Weekdays', 'Weekends', or a weekday name",
                    value
                ))
            }),
        }
    }

    fn temp_bucket(&self) -> Result<Option<TempBucket>, AppError> {
        match self.temp.as_deref() {
            None | Some("") | Some(ALL_TEMPERATURES) => Ok(None),
            Some(value) => parse_temp_bucket(value).map(Some).ok_or_else(|| {
                AppError::BadRequest(format!("Invalid temperature range: {}", value))
            }),
        }
    }
}

/// Accepts the bucket labels with or without their `°C` suffix.
fn parse_temp_bucket(value: &str) -> Option<TempBucket> {
    TempBucket::from_label(value).or_else(|| {
        let bare = value.trim_end_matches(&['C', 'c'][..]).trim_end_matches(&['°', 'º'][..]);
        TempBucket::from_label(&format!("{}°C", bare))
    })
}

fn parse_date(value: &str) -> Result<NaiveDate, AppError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| AppError::BadRequest(format!("Invalid date: {}. Use YYYY-MM-DD", value)))
}
