use chrono::NaiveDate;
use serde::Serialize;

use crate::types::palette::Tier;
use crate::types::record::TempBucket;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KpiSummary {
    pub avg_steps: f64,
    pub avg_vs_goal: f64,
    pub goal_pct: f64,
    pub goal_pct_vs_half: f64,
    pub max_steps: u32,
    pub min_steps: u32,
    pub best_weekday: Option<String>,
    pub best_location: String,
    pub best_temp_bucket: TempBucket,
    pub longest_streak: usize,
}

/// KPIs for a view; an empty view has no summary rather than NaN fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Kpis {
    NoData,
    Summary(KpiSummary),
}

impl Kpis {
    pub fn summary(&self) -> Option<&KpiSummary> {
        match self {
            Kpis::Summary(summary) => Some(summary),
            Kpis::NoData => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupMean {
    pub label: String,
    pub mean: f64,
    pub days: usize,
    pub color: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimelinePoint {
    pub date: NaiveDate,
    pub step_count: u32,
    pub avg_temperature: f64,
    pub tier: Tier,
    pub goal_met: bool,
    pub location: String,
    pub temperature_range: String,
    pub color: &'static str,
    /// Marker diameter; scales with temperature.
    pub size: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GoalLine {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub steps: u32,
    pub color: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Timeline {
    pub points: Vec<TimelinePoint>,
    pub goal_line: Option<GoalLine>,
}
