use crate::error::RenderError;
use crate::types::calendar::{CalendarCell, CalendarMonth};
use crate::types::palette::Tier;
use crate::types::viz::RenderOptions;

const DAY_LABELS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];
const HEADER_COLOR: &str = "#64748b";
const FONT_FAMILY: &str = "DejaVu Sans, Arial, sans-serif";
/// Marker sizes are expressed for a cell roughly this many pixels across.
const REFERENCE_CELL: f64 = 70.0;
const TITLE_HEIGHT: f64 = 36.0;

struct Grid {
    left: f64,
    top: f64,
    cell_w: f64,
    cell_h: f64,
    total_weeks: usize,
}

impl Grid {
    fn x(&self, col: usize) -> f64 {
        self.left + (col as f64 + 0.5) * self.cell_w
    }

    /// `display_row` grows upward, SVG y grows downward.
    fn y(&self, display_row: usize) -> f64 {
        self.top + (self.total_weeks as f64 - display_row as f64 - 0.5) * self.cell_h
    }
}

pub fn render_calendar_svg(month: &CalendarMonth, options: &RenderOptions) -> Result<String, RenderError> {
    let width = options.width as f64;
    let height = options.height as f64;
    let padding = options.padding as f64;
    let legend_height = options.legend_height as f64;

    if month.total_weeks == 0 {
        return Err(RenderError::SvgError("Calendar has no weeks".to_string()));
    }

    let grid_width = width - 2.0 * padding;
    // One extra row for the weekday header.
    let grid_height = height - 2.0 * padding - TITLE_HEIGHT - legend_height;
    if grid_width <= 0.0 || grid_height <= 0.0 {
        return Err(RenderError::SvgError("Invalid viewport size".to_string()));
    }

    let cell_w = grid_width / 7.0;
    let cell_h = grid_height / (month.total_weeks as f64 + 1.0);
    let grid = Grid {
        left: padding,
        top: padding + TITLE_HEIGHT + cell_h,
        cell_w,
        cell_h,
        total_weeks: month.total_weeks,
    };
    let scale = cell_w.min(cell_h) / REFERENCE_CELL;

    let title = format!(
        r##"<text x="{:.1}" y="{:.1}" font-family="{}" font-size="20" font-weight="bold" fill="#1e293b" text-anchor="middle">{}</text>"##,
        width / 2.0,
        padding + TITLE_HEIGHT * 0.7,
        FONT_FAMILY,
        xml_escape(&month.label)
    );

    let header = build_header(&grid, padding + TITLE_HEIGHT + cell_h * 0.5, scale);
    let cells: String = month
        .cells
        .iter()
        .map(|cell| build_cell(cell, &grid, scale))
        .collect();
    let legend = build_legend(width, height - padding - legend_height * 0.5);

    Ok(format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="0 0 {} {}">
  {}
  {}
  {}
  {}
</svg>"#,
        width, height, width, height, title, header, cells, legend
    ))
}

fn build_header(grid: &Grid, y: f64, scale: f64) -> String {
    let font_size = (14.0 * scale).max(9.0);
    DAY_LABELS
        .iter()
        .enumerate()
        .map(|(col, label)| {
            format!(
                r#"<text x="{:.1}" y="{:.1}" font-family="{}" font-size="{:.1}" font-weight="bold" fill="{}" text-anchor="middle" dominant-baseline="middle">{}</text>"#,
                grid.x(col),
                y,
                FONT_FAMILY,
                font_size,
                HEADER_COLOR,
                label
            )
        })
        .collect()
}

fn build_cell(cell: &CalendarCell, grid: &Grid, scale: f64) -> String {
    let cx = grid.x(cell.weekday_col);
    let cy = grid.y(cell.display_row);
    let radius = cell.size / 2.0 * scale;
    let font_size = (12.0 * scale).max(8.0);

    format!(
        r#"<circle cx="{:.2}" cy="{:.2}" r="{:.2}" fill="{}" fill-opacity="0.9" stroke="white" stroke-width="2"/><text x="{:.2}" y="{:.2}" font-family="{}" font-size="{:.1}" font-weight="bold" fill="white" text-anchor="middle" dominant-baseline="central">{}</text>"#,
        cx, cy, radius, cell.color, cx, cy, FONT_FAMILY, font_size, cell.day
    )
}

fn build_legend(width: f64, y: f64) -> String {
    let tiers = [Tier::Met, Tier::Close, Tier::Missed];
    let slot = width / tiers.len() as f64;
    tiers
        .iter()
        .enumerate()
        .map(|(idx, tier)| {
            let x = slot * idx as f64 + slot * 0.25;
            format!(
                r#"<circle cx="{:.1}" cy="{:.1}" r="7.5" fill="{}"/><text x="{:.1}" y="{:.1}" font-family="{}" font-size="13" fill="{}" dominant-baseline="central">{}</text>"#,
                x,
                y,
                tier.legend_color(),
                x + 14.0,
                y,
                FONT_FAMILY,
                HEADER_COLOR,
                xml_escape(tier.legend_label())
            )
        })
        .collect()
}

fn xml_escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
