use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Daily step target used by every goal comparison.
pub const STEP_GOAL: u32 = 11_000;

pub const WEEKDAYS: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// One dataset row before any derivation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawRecord {
    pub date: NaiveDate,
    pub step_count: u32,
    pub location: String,
    pub temperature_range: String,
    pub day_of_week: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyRecord {
    pub date: NaiveDate,
    pub step_count: u32,
    pub location: String,
    pub temperature_range: String,
    pub avg_temperature: f64,
    pub temp_bucket: TempBucket,
    pub day_of_week: String,
    pub day_type: DayType,
}

impl DailyRecord {
    pub fn met_goal(&self) -> bool {
        self.step_count >= STEP_GOAL
    }

    /// The raw fields this record was derived from.
    pub fn raw(&self) -> RawRecord {
        RawRecord {
            date: self.date,
            step_count: self.step_count,
            location: self.location.clone(),
            temperature_range: self.temperature_range.clone(),
            day_of_week: self.day_of_week.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TempBucket {
    #[serde(rename = "<10°C")]
    Below10,
    #[serde(rename = "10-15°C")]
    From10To15,
    #[serde(rename = "15-20°C")]
    From15To20,
    #[serde(rename = "20-25°C")]
    From20To25,
    #[serde(rename = "25-30°C")]
    From25To30,
    #[serde(rename = "30-35°C")]
    From30To35,
    #[serde(rename = "35+°C")]
    Above35,
}

impl TempBucket {
    pub const ALL: [TempBucket; 7] = [
        TempBucket::Below10,
        TempBucket::From10To15,
        TempBucket::From15To20,
        TempBucket::From20To25,
        TempBucket::From25To30,
        TempBucket::From30To35,
        TempBucket::Above35,
    ];

    /// Half-open bands `[lower, upper)`; the top band is unbounded and
    /// anything below zero lands in the lowest band.
    pub fn from_avg(avg_temperature: f64) -> Self {
        match avg_temperature {
            t if t < 10.0 => TempBucket::Below10,
            t if t < 15.0 => TempBucket::From10To15,
            t if t < 20.0 => TempBucket::From15To20,
            t if t < 25.0 => TempBucket::From20To25,
            t if t < 30.0 => TempBucket::From25To30,
            t if t < 35.0 => TempBucket::From30To35,
            _ => TempBucket::Above35,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TempBucket::Below10 => "<10°C",
            TempBucket::From10To15 => "10-15°C",
            TempBucket::From15To20 => "15-20°C",
            TempBucket::From20To25 => "20-25°C",
            TempBucket::From25To30 => "25-30°C",
            TempBucket::From30To35 => "30-35°C",
            TempBucket::Above35 => "35+°C",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|bucket| bucket.label() == label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DayType {
    Weekday,
    Weekend,
}

impl DayType {
    pub fn classify(day_of_week: &str) -> Self {
        match day_of_week {
            "Saturday" | "Sunday" => DayType::Weekend,
            _ => DayType::Weekday,
        }
    }
}

pub fn is_canonical_weekday(name: &str) -> bool {
    WEEKDAYS.contains(&name)
}

/// A row that was dropped during load instead of failing the whole dataset.
#[derive(Debug, Clone, Serialize)]
pub struct SkippedRow {
    pub row: usize,
    pub reason: String,
}

/// The derived dataset shared by every request until the next reload.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub records: Vec<DailyRecord>,
    pub skipped: Vec<SkippedRow>,
    pub source: String,
    pub loaded_at: DateTime<Utc>,
}

impl Dataset {
    pub fn empty(source: impl Into<String>) -> Self {
        Self {
            records: Vec::new(),
            skipped: Vec::new(),
            source: source.into(),
            loaded_at: Utc::now(),
        }
    }

    pub fn date_bounds(&self) -> Option<(NaiveDate, NaiveDate)> {
        let min = self.records.iter().map(|r| r.date).min()?;
        let max = self.records.iter().map(|r| r.date).max()?;
        Some((min, max))
    }

    pub fn locations(&self) -> Vec<String> {
        let mut locations: Vec<String> = self.records.iter().map(|r| r.location.clone()).collect();
        locations.sort();
        locations.dedup();
        locations
    }
}
