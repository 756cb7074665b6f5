use std::collections::BTreeSet;

use chrono::{Datelike, NaiveDate};

use crate::error::CalendarError;
use crate::types::calendar::{CalendarCell, CalendarMonth, CalendarRecord, YearMonth};
use crate::types::palette::{Tier, CALENDAR_NO_DATA};
use crate::types::record::{DailyRecord, STEP_GOAL};

const SIZE_BASE: f64 = 30.0;
const SIZE_SPAN: f64 = 25.0;
const SIZE_RATIO_CAP: f64 = 1.5;
const NO_DATA_SIZE: f64 = 35.0;

/// Distinct months present in `records`, oldest first.
pub fn available_months(records: &[DailyRecord]) -> Vec<YearMonth> {
    records
        .iter()
        .map(|r| YearMonth {
            year: r.date.year(),
            month: r.date.month(),
        })
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

pub fn restrict_to_month(records: &[DailyRecord], ym: YearMonth) -> Vec<DailyRecord> {
    records
        .iter()
        .filter(|r| r.date.year() == ym.year && r.date.month() == ym.month)
        .cloned()
        .collect()
}

/// Lays out every day of `ym` on a Monday-first week grid. `records` should
/// already be restricted to the month; days without a record become
/// "no data" cells.
pub fn map_month(ym: YearMonth, records: &[DailyRecord]) -> Result<CalendarMonth, CalendarError> {
    let invalid = || CalendarError::InvalidMonth {
        year: ym.year,
        month: ym.month,
    };
    let first = NaiveDate::from_ymd_opt(ym.year, ym.month, 1).ok_or_else(invalid)?;
    let days = days_in_month(first).ok_or_else(invalid)?;

    let offset = first.weekday().num_days_from_monday() as usize;
    let total_weeks = (offset + days as usize).div_ceil(7);

    let mut cells = Vec::with_capacity(days as usize);
    for day in 1..=days {
        let date = first.with_day(day).ok_or_else(invalid)?;
        let slot = offset + day as usize - 1;
        let week_row = slot / 7;
        let weekday_col = slot % 7;
        let record = records.iter().find(|r| r.date == date);
        cells.push(build_cell(ym, day, week_row, weekday_col, total_weeks, record));
    }

    Ok(CalendarMonth {
        year: ym.year,
        month: ym.month,
        label: ym.label(),
        total_weeks,
        cells,
    })
}

/// Marker diameter for a recorded day, capped at 150% of the goal.
pub fn cell_size(step_count: u32) -> f64 {
    let ratio = (step_count as f64 / STEP_GOAL as f64).min(SIZE_RATIO_CAP);
    SIZE_BASE + ratio * SIZE_SPAN
}

fn build_cell(
    ym: YearMonth,
    day: u32,
    week_row: usize,
    weekday_col: usize,
    total_weeks: usize,
    record: Option<&DailyRecord>,
) -> CalendarCell {
    let heading = format!("{} {}, {}", ym.month_name(), day, ym.year);
    let display_row = total_weeks - week_row - 1;

    let (record, color, size, tooltip) = match record {
        Some(r) => {
            let tier = Tier::classify(r.step_count);
            let tooltip = format!(
                "{heading}\nSteps: {}\nLocation: {}\nTemperature: {}\nStatus: {}",
                group_thousands(r.step_count as u64),
                r.location,
                r.temperature_range,
                tier.status()
            );
            (
                Some(CalendarRecord {
                    step_count: r.step_count,
                    location: r.location.clone(),
                    temperature_range: r.temperature_range.clone(),
                    tier,
                }),
                tier.calendar_color(),
                cell_size(r.step_count),
                tooltip,
            )
        }
        None => (None, CALENDAR_NO_DATA, NO_DATA_SIZE, format!("{heading}\nNo data")),
    };

    CalendarCell {
        week_row,
        weekday_col,
        display_row,
        day,
        year: ym.year,
        month: ym.month,
        record,
        color,
        size,
        tooltip,
    }
}

fn days_in_month(first: NaiveDate) -> Option<u32> {
    let next = if first.month() == 12 {
        NaiveDate::from_ymd_opt(first.year() + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(first.year(), first.month() + 1, 1)?
    };
    Some((next - first).num_days() as u32)
}

/// `12345` -> `"12,345"`.
pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
