use serde::Serialize;

use crate::types::record::STEP_GOAL;

pub const GREEN: &str = "#59cd90";
pub const RED: &str = "#ee6055";
pub const AMBER: &str = "#fac05e";
pub const GOAL_LINE: &str = "#3fa7d6";

pub const CALENDAR_MET: &str = "#10b981";
pub const CALENDAR_CLOSE: &str = "#f59e0b";
pub const CALENDAR_MISSED: &str = "#ef4444";
pub const CALENDAR_NO_DATA: &str = "#e2e8f0";

/// A day's step count relative to the goal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    Met,
    Close,
    Missed,
}

impl Tier {
    pub fn classify(step_count: u32) -> Self {
        let steps = step_count as f64;
        let goal = STEP_GOAL as f64;
        if steps >= goal {
            Tier::Met
        } else if steps >= 0.8 * goal {
            Tier::Close
        } else {
            Tier::Missed
        }
    }

    pub fn calendar_color(&self) -> &'static str {
        match self {
            Tier::Met => CALENDAR_MET,
            Tier::Close => CALENDAR_CLOSE,
            Tier::Missed => CALENDAR_MISSED,
        }
    }

    /// Swatch used in chart legends.
    pub fn legend_color(&self) -> &'static str {
        match self {
            Tier::Met => GREEN,
            Tier::Close => AMBER,
            Tier::Missed => RED,
        }
    }

    pub fn legend_label(&self) -> &'static str {
        match self {
            Tier::Met => "Goal Met (≥11k)",
            Tier::Close => "Close (≥80%)",
            Tier::Missed => "Below Goal",
        }
    }

    pub fn status(&self) -> &'static str {
        match self {
            Tier::Met => "Goal Met",
            Tier::Close => "Close",
            Tier::Missed => "Missed",
        }
    }
}

/// Bar colour for a grouped mean: the bar charts only distinguish met/missed.
pub fn mean_color(mean: f64) -> &'static str {
    if mean >= STEP_GOAL as f64 {
        GREEN
    } else {
        RED
    }
}

pub fn parse_hex_color(hex: &str) -> Option<(u8, u8, u8)> {
    let value = hex.trim_start_matches('#');
    if value.len() != 6 || !value.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let r = u8::from_str_radix(&value[0..2], 16).ok()?;
    let g = u8::from_str_radix(&value[2..4], 16).ok()?;
    let b = u8::from_str_radix(&value[4..6], 16).ok()?;
    Some((r, g, b))
}
