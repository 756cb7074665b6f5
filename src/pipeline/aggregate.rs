use std::collections::BTreeMap;

use crate::types::palette::{mean_color, Tier, GOAL_LINE, GREEN, RED};
use crate::types::record::{is_canonical_weekday, DailyRecord, TempBucket, STEP_GOAL, WEEKDAYS};
use crate::types::summary::{GoalLine, GroupMean, KpiSummary, Kpis, Timeline, TimelinePoint};

const TIMELINE_SIZE_MIN: f64 = 15.0;
const TIMELINE_SIZE_MAX: f64 = 40.0;

#[derive(Default, Clone, Copy)]
struct Accum {
    sum: u64,
    count: usize,
}

impl Accum {
    fn push(&mut self, steps: u32) {
        self.sum += steps as u64;
        self.count += 1;
    }

    fn mean(&self) -> f64 {
        self.sum as f64 / self.count as f64
    }
}

pub fn kpis(records: &[DailyRecord]) -> Kpis {
    let (Some(avg_steps), Some(goal_pct)) = (mean_steps(records), goal_pct(records)) else {
        return Kpis::NoData;
    };
    let (Some(best_location), Some(best_temp_bucket)) = (best_location(records), best_temp_bucket(records)) else {
        return Kpis::NoData;
    };

    let max_steps = records.iter().map(|r| r.step_count).max().unwrap_or(0);
    let min_steps = records.iter().map(|r| r.step_count).min().unwrap_or(0);

    Kpis::Summary(KpiSummary {
        avg_steps,
        avg_vs_goal: avg_steps - STEP_GOAL as f64,
        goal_pct,
        goal_pct_vs_half: goal_pct - 50.0,
        max_steps,
        min_steps,
        best_weekday: best_weekday(records),
        best_location,
        best_temp_bucket,
        longest_streak: longest_streak(records),
    })
}

pub fn mean_steps(records: &[DailyRecord]) -> Option<f64> {
    if records.is_empty() {
        return None;
    }
    let total: u64 = records.iter().map(|r| r.step_count as u64).sum();
    Some(total as f64 / records.len() as f64)
}

pub fn goal_pct(records: &[DailyRecord]) -> Option<f64> {
    if records.is_empty() {
        return None;
    }
    let met = records.iter().filter(|r| r.met_goal()).count();
    Some(met as f64 / records.len() as f64 * 100.0)
}

/// Longest run of goal-met records in date order. Runs are positional: a
/// date missing from `records` does not end a run, only a present record
/// below goal does.
pub fn longest_streak(records: &[DailyRecord]) -> usize {
    let mut ordered: Vec<&DailyRecord> = records.iter().collect();
    ordered.sort_by_key(|r| r.date);

    let mut longest = 0;
    let mut current = 0;
    for record in ordered {
        if record.met_goal() {
            current += 1;
            longest = longest.max(current);
        } else {
            current = 0;
        }
    }
    longest
}

/// Highest mean among the canonical weekday names present; the earliest
/// weekday (Monday first) wins a tie.
pub fn best_weekday(records: &[DailyRecord]) -> Option<String> {
    let groups = group_by(records, |r| r.day_of_week.clone());
    first_max(
        WEEKDAYS
            .iter()
            .filter_map(|day| groups.get(*day).map(|acc| (day.to_string(), acc.mean()))),
    )
}

/// Ties go to the alphabetically first location.
pub fn best_location(records: &[DailyRecord]) -> Option<String> {
    let groups = group_by(records, |r| r.location.clone());
    first_max(groups.into_iter().map(|(location, acc)| (location, acc.mean())))
}

/// Ties go to the colder bucket.
pub fn best_temp_bucket(records: &[DailyRecord]) -> Option<TempBucket> {
    let groups = group_by(records, |r| r.temp_bucket);
    first_max(groups.into_iter().map(|(bucket, acc)| (bucket, acc.mean())))
}

/// Canonical weekdays Monday first, then any other labels in sorted order.
pub fn by_weekday(records: &[DailyRecord]) -> Vec<GroupMean> {
    let groups = group_by(records, |r| r.day_of_week.clone());

    let canonical = WEEKDAYS
        .iter()
        .filter_map(|day| groups.get(*day).map(|acc| group_mean(day.to_string(), acc)));
    let other = groups
        .iter()
        .filter(|(day, _)| !is_canonical_weekday(day))
        .map(|(day, acc)| group_mean(day.clone(), acc));

    canonical.chain(other).collect()
}

pub fn by_temperature(records: &[DailyRecord]) -> Vec<GroupMean> {
    group_by(records, |r| r.temp_bucket)
        .into_iter()
        .map(|(bucket, acc)| group_mean(bucket.label().to_string(), &acc))
        .collect()
}

/// Highest mean first.
pub fn by_location(records: &[DailyRecord]) -> Vec<GroupMean> {
    let mut means: Vec<GroupMean> = group_by(records, |r| r.location.clone())
        .into_iter()
        .map(|(location, acc)| group_mean(location, &acc))
        .collect();
    means.sort_by(|a, b| b.mean.total_cmp(&a.mean));
    means
}

pub fn timeline(records: &[DailyRecord]) -> Timeline {
    let mut ordered: Vec<&DailyRecord> = records.iter().collect();
    ordered.sort_by_key(|r| r.date);

    let points: Vec<TimelinePoint> = ordered
        .iter()
        .map(|r| {
            let goal_met = r.met_goal();
            TimelinePoint {
                date: r.date,
                step_count: r.step_count,
                avg_temperature: r.avg_temperature,
                tier: Tier::classify(r.step_count),
                goal_met,
                location: r.location.clone(),
                temperature_range: r.temperature_range.clone(),
                color: if goal_met { GREEN } else { RED },
                size: timeline_marker_size(r.avg_temperature),
            }
        })
        .collect();

    let goal_line = match (points.first(), points.last()) {
        (Some(first), Some(last)) => Some(GoalLine {
            start: first.date,
            end: last.date,
            steps: STEP_GOAL,
            color: GOAL_LINE,
        }),
        _ => None,
    };

    Timeline { points, goal_line }
}

/// Marker diameter grows with temperature: 8°C maps to the minimum and the
/// scale spans 30 degrees.
pub fn timeline_marker_size(avg_temperature: f64) -> f64 {
    let size = TIMELINE_SIZE_MIN + ((avg_temperature - 8.0) / 30.0) * 25.0;
    size.clamp(TIMELINE_SIZE_MIN, TIMELINE_SIZE_MAX)
}

fn group_by<K: Ord>(records: &[DailyRecord], key: impl Fn(&DailyRecord) -> K) -> BTreeMap<K, Accum> {
    let mut groups: BTreeMap<K, Accum> = BTreeMap::new();
    for record in records {
        groups.entry(key(record)).or_default().push(record.step_count);
    }
    groups
}

fn group_mean(label: String, acc: &Accum) -> GroupMean {
    let mean = acc.mean();
    GroupMean {
        label,
        mean,
        days: acc.count,
        color: mean_color(mean),
    }
}

/// The first key holding the maximum value, in iteration order.
fn first_max<K>(values: impl Iterator<Item = (K, f64)>) -> Option<K> {
    let mut best: Option<(K, f64)> = None;
    for (key, value) in values {
        let replace = best.as_ref().map_or(true, |(_, best_value)| value > *best_value);
        if replace {
            best = Some((key, value));
        }
    }
    best.map(|(key, _)| key)
}
