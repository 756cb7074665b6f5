use crate::error::DeriveError;
use crate::types::record::{DailyRecord, DayType, RawRecord, SkippedRow, TempBucket};

/// Enriches one raw row. Pure: the output depends only on the raw fields.
pub fn derive(raw: &RawRecord) -> Result<DailyRecord, DeriveError> {
    let avg_temperature = parse_avg_temperature(&raw.temperature_range)?;

    Ok(DailyRecord {
        date: raw.date,
        step_count: raw.step_count,
        location: raw.location.clone(),
        temperature_range: raw.temperature_range.clone(),
        avg_temperature,
        temp_bucket: TempBucket::from_avg(avg_temperature),
        day_of_week: raw.day_of_week.clone(),
        day_type: DayType::classify(&raw.day_of_week),
    })
}

/// `"18-22ºC"` -> `20.0`.
pub fn parse_avg_temperature(range: &str) -> Result<f64, DeriveError> {
    let malformed = || DeriveError::MalformedTemperature(range.to_string());

    let body = range
        .trim()
        .trim_end_matches(&['C', 'c'][..])
        .trim_end_matches(&['º', '°'][..])
        .trim();

    let bounds: Vec<&str> = body.split('-').collect();
    if bounds.len() != 2 {
        return Err(malformed());
    }

    let min: i32 = bounds[0].trim().parse().map_err(|_| malformed())?;
    let max: i32 = bounds[1].trim().parse().map_err(|_| malformed())?;

    Ok((min as f64 + max as f64) / 2.0)
}

/// Derives every row, setting aside the ones whose temperature cannot be
/// parsed. `rows` carries the source row number for reporting.
pub fn derive_all(rows: Vec<(usize, RawRecord)>) -> (Vec<DailyRecord>, Vec<SkippedRow>) {
    let mut records = Vec::with_capacity(rows.len());
    let mut skipped = Vec::new();

    for (row, raw) in rows {
        match derive(&raw) {
            Ok(record) => records.push(record),
            Err(e) => {
                tracing::warn!("Skipping row {} ({}): {}", row, raw.date, e);
                skipped.push(SkippedRow {
                    row,
                    reason: e.to_string(),
                });
            }
        }
    }

    (records, skipped)
}
