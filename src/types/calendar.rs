use serde::{Deserialize, Serialize};

use crate::types::palette::Tier;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

impl YearMonth {
    /// Parses `YYYY-MM`.
    pub fn from_str(s: &str) -> Option<Self> {
        let (year, month) = s.trim().split_once('-')?;
        let year: i32 = year.parse().ok()?;
        let month: u32 = month.parse().ok()?;
        if !(1..=12).contains(&month) {
            return None;
        }
        Some(Self { year, month })
    }

    pub fn key(&self) -> String {
        format!("{}-{:02}", self.year, self.month)
    }

    pub fn month_name(&self) -> &'static str {
        month_name(self.month)
    }

    pub fn label(&self) -> String {
        format!("{} {}", self.month_name(), self.year)
    }
}

pub fn month_name(month: u32) -> &'static str {
    match month {
        1 => "January",
        2 => "February",
        3 => "March",
        4 => "April",
        5 => "May",
        6 => "June",
        7 => "July",
        8 => "August",
        9 => "September",
        10 => "October",
        11 => "November",
        12 => "December",
        _ => "",
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalendarRecord {
    pub step_count: u32,
    pub location: String,
    pub temperature_range: String,
    pub tier: Tier,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalendarCell {
    /// Week of the month counted from the top, starting at 0.
    pub week_row: usize,
    /// Monday = 0 .. Sunday = 6.
    pub weekday_col: usize,
    /// Row in plot coordinates, where the first week has the largest value.
    pub display_row: usize,
    pub day: u32,
    pub year: i32,
    pub month: u32,
    pub record: Option<CalendarRecord>,
    pub color: &'static str,
    pub size: f64,
    pub tooltip: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalendarMonth {
    pub year: i32,
    pub month: u32,
    pub label: String,
    pub total_weeks: usize,
    pub cells: Vec<CalendarCell>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthOption {
    pub key: String,
    pub label: String,
}

impl From<YearMonth> for MonthOption {
    fn from(ym: YearMonth) -> Self {
        Self {
            key: ym.key(),
            label: ym.label(),
        }
    }
}
