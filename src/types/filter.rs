use std::ops::Deref;

use chrono::NaiveDate;
use serde::Serialize;

use crate::types::record::{is_canonical_weekday, DailyRecord, DayType, TempBucket, WEEKDAYS};

pub const ALL_DAYS: &str = "All Days";
pub const ALL_LOCATIONS: &str = "All Locations";
pub const ALL_TEMPERATURES: &str = "All Temperatures";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum DateWindow {
    All,
    /// `[max(date) - days, max(date)]` over the records being filtered.
    LastDays { days: i64 },
    Custom { start: NaiveDate, end: NaiveDate },
}

impl DateWindow {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "all" | "all days" => Some(DateWindow::All),
            "last30" | "last 30 days" => Some(DateWindow::LastDays { days: 30 }),
            "last60" | "last 60 days" => Some(DateWindow::LastDays { days: 60 }),
            _ => None,
        }
    }

    pub fn presets() -> Vec<&'static str> {
        vec!["All Days", "Last 30 Days", "Last 60 Days", "Custom Range"]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum DayFilter {
    DayType(DayType),
    Weekday(String),
}

impl DayFilter {
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "Weekdays" => Some(DayFilter::DayType(DayType::Weekday)),
            "Weekends" => Some(DayFilter::DayType(DayType::Weekend)),
            day if is_canonical_weekday(day) => Some(DayFilter::Weekday(day.to_string())),
            _ => None,
        }
    }

    pub fn choices() -> Vec<&'static str> {
        let mut choices = vec![ALL_DAYS, "Weekdays", "Weekends"];
        choices.extend(WEEKDAYS);
        choices
    }
}

/// One user selection; every field is optional and they AND together.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilterCriteria {
    pub window: DateWindow,
    pub location: Option<String>,
    pub day: Option<DayFilter>,
    pub temp_bucket: Option<TempBucket>,
}

impl Default for FilterCriteria {
    fn default() -> Self {
        Self {
            window: DateWindow::All,
            location: None,
            day: None,
            temp_bucket: None,
        }
    }
}

pub fn temperature_choices() -> Vec<&'static str> {
    let mut choices = vec![ALL_TEMPERATURES];
    choices.extend(TempBucket::ALL.iter().map(|bucket| bucket.label()));
    choices
}

/// Records that passed a [`FilterCriteria`], ordered by date ascending.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilteredView {
    records: Vec<DailyRecord>,
}

impl FilteredView {
    pub fn from_records(mut records: Vec<DailyRecord>) -> Self {
        records.sort_by_key(|r| r.date);
        Self { records }
    }
}

impl Deref for FilteredView {
    type Target = [DailyRecord];

    fn deref(&self) -> &Self::Target {
        &self.records
    }
}
