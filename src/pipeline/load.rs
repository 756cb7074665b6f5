use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::{NaiveDate, NaiveDateTime, Utc};

use crate::error::LoadError;
use crate::pipeline::derive;
use crate::types::record::{Dataset, RawRecord};

const DATE: &str = "Date";
const STEP_COUNT: &str = "Step Count";
const LOCATION: &str = "Location";
const TEMPERATURE: &str = "Temperature";
const DAY_OF_WEEK: &str = "Day of week";

struct Columns {
    date: usize,
    step_count: usize,
    location: usize,
    temperature: usize,
    day_of_week: usize,
}

impl Columns {
    fn resolve(headers: &csv::StringRecord) -> Result<Self, LoadError> {
        let find = |name: &'static str| {
            headers
                .iter()
                .position(|h| h.trim_start_matches('\u{feff}').trim() == name)
                .ok_or(LoadError::MissingColumn(name))
        };

        Ok(Self {
            date: find(DATE)?,
            step_count: find(STEP_COUNT)?,
            location: find(LOCATION)?,
            temperature: find(TEMPERATURE)?,
            day_of_week: find(DAY_OF_WEEK)?,
        })
    }
}

pub fn load_path(path: &Path) -> Result<Dataset, LoadError> {
    let file = File::open(path)?;
    load_reader(file, path.display().to_string())
}

pub fn load_bytes(bytes: &[u8], source: impl Into<String>) -> Result<Dataset, LoadError> {
    load_reader(bytes, source)
}

/// Reads the whole table; a schema problem fails the load, a malformed
/// temperature only drops its row.
pub fn load_reader<R: Read>(reader: R, source: impl Into<String>) -> Result<Dataset, LoadError> {
    let source = source.into();
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    let columns = Columns::resolve(&headers)?;

    let mut rows = Vec::new();
    for (idx, result) in rdr.records().enumerate() {
        // Row 1 is the header.
        let row = idx + 2;
        let record = result?;
        if record.iter().all(|field| field.is_empty()) {
            continue;
        }
        rows.push((row, parse_row(&record, &columns, row)?));
    }

    let (mut records, skipped) = derive::derive_all(rows);
    records.sort_by_key(|r| r.date);

    tracing::info!(
        "Loaded {} records from {} ({} skipped)",
        records.len(),
        source,
        skipped.len()
    );

    Ok(Dataset {
        records,
        skipped,
        source,
        loaded_at: Utc::now(),
    })
}

fn parse_row(record: &csv::StringRecord, columns: &Columns, row: usize) -> Result<RawRecord, LoadError> {
    let field = |idx: usize| record.get(idx).unwrap_or("").to_string();

    let date_value = field(columns.date);
    let date = parse_date(&date_value).ok_or(LoadError::InvalidDate {
        row,
        value: date_value.clone(),
    })?;

    let steps_value = field(columns.step_count);
    let step_count = parse_step_count(&steps_value).ok_or(LoadError::InvalidStepCount {
        row,
        value: steps_value.clone(),
    })?;

    Ok(RawRecord {
        date,
        step_count,
        location: field(columns.location),
        temperature_range: field(columns.temperature),
        day_of_week: field(columns.day_of_week),
    })
}

fn parse_date(value: &str) -> Option<NaiveDate> {
    for format in ["%Y-%m-%d", "%d/%m/%Y"] {
        if let Ok(date) = NaiveDate::parse_from_str(value, format) {
            return Some(date);
        }
    }
    // Spreadsheet exports often carry a midnight time component.
    for format in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(datetime) = NaiveDateTime::parse_from_str(value, format) {
            return Some(datetime.date());
        }
    }
    None
}

fn parse_step_count(value: &str) -> Option<u32> {
    let cleaned = value.replace(',', "");
    if let Ok(steps) = cleaned.parse::<u32>() {
        return Some(steps);
    }
    let steps: f64 = cleaned.parse().ok()?;
    if steps.is_finite() && steps >= 0.0 && steps.fract() == 0.0 && steps <= u32::MAX as f64 {
        Some(steps as u32)
    } else {
        None
    }
}
