use chrono::NaiveDate;
use stepviz_rs::error::CalendarError;
use stepviz_rs::pipeline::calendar::{available_months, cell_size, group_thousands, map_month, restrict_to_month};
use stepviz_rs::pipeline::derive::derive;
use stepviz_rs::pipeline::rasterize::rasterize;
use stepviz_rs::pipeline::render::render_calendar_svg;
use stepviz_rs::types::calendar::YearMonth;
use stepviz_rs::types::palette::{Tier, CALENDAR_CLOSE, CALENDAR_MET, CALENDAR_MISSED, CALENDAR_NO_DATA};
use stepviz_rs::types::record::{DailyRecord, RawRecord};
use stepviz_rs::types::viz::{Background, OutputConfig, RenderOptions};

fn record(date: &str, steps: u32) -> DailyRecord {
    let date = NaiveDate::parse_from_str(date, "%Y-%m-%d").expect("date");
    derive(&RawRecord {
        date,
        step_count: steps,
        location: "Park".to_string(),
        temperature_range: "10-15ºC".to_string(),
        day_of_week: date.format("%A").to_string(),
    })
    .expect("derive")
}

const JANUARY_2025: YearMonth = YearMonth { year: 2025, month: 1 };

#[test]
fn first_day_lands_on_its_weekday_column() {
    // 2025-01-01 is a Wednesday.
    let month = map_month(JANUARY_2025, &[]).expect("calendar");

    assert_eq!(month.cells.len(), 31);
    assert_eq!(month.total_weeks, 5);
    let first = &month.cells[0];
    assert_eq!(first.day, 1);
    assert_eq!(first.week_row, 0);
    assert_eq!(first.weekday_col, 2);
}

#[test]
fn display_rows_put_the_first_week_on_top() {
    let month = map_month(JANUARY_2025, &[]).expect("calendar");

    let first = &month.cells[0];
    assert_eq!(first.display_row, month.total_weeks - 1);

    // 2025-01-31 is a Friday in the fifth week.
    let last = &month.cells[30];
    assert_eq!((last.week_row, last.weekday_col, last.display_row), (4, 4, 0));

    for cell in &month.cells {
        assert_eq!(cell.display_row, month.total_weeks - cell.week_row - 1);
    }
}

#[test]
fn week_counts_follow_the_month_shape() {
    // February 2021 starts on a Monday and fills exactly four weeks.
    let feb = map_month(YearMonth { year: 2021, month: 2 }, &[]).expect("calendar");
    assert_eq!(feb.total_weeks, 4);
    assert_eq!(feb.cells[0].weekday_col, 0);

    // March 2025 starts on a Saturday and spills into a sixth week.
    let march = map_month(YearMonth { year: 2025, month: 3 }, &[]).expect("calendar");
    assert_eq!(march.total_weeks, 6);
    assert_eq!(march.cells[30].week_row, 5);

    let leap = map_month(YearMonth { year: 2024, month: 2 }, &[]).expect("calendar");
    assert_eq!(leap.cells.len(), 29);
}

#[test]
fn recorded_days_are_tiered_and_sized() {
    let records = vec![
        record("2025-01-01", 11000),
        record("2025-01-02", 8800),
        record("2025-01-03", 5500),
        record("2025-01-04", 30000),
    ];

    let month = map_month(JANUARY_2025, &records).expect("calendar");

    let met = &month.cells[0];
    assert_eq!(met.color, CALENDAR_MET);
    assert_eq!(met.record.as_ref().map(|r| r.tier), Some(Tier::Met));
    assert_eq!(met.size, 55.0);

    let close = &month.cells[1];
    assert_eq!(close.color, CALENDAR_CLOSE);
    assert!((close.size - 50.0).abs() < 1e-9);

    let missed = &month.cells[2];
    assert_eq!(missed.color, CALENDAR_MISSED);
    assert!((missed.size - 42.5).abs() < 1e-9);

    // Capped at 150% of goal.
    assert_eq!(month.cells[3].size, 67.5);
    assert_eq!(cell_size(16500), cell_size(40000));
}

#[test]
fn days_without_records_are_neutral() {
    let month = map_month(JANUARY_2025, &[record("2025-01-01", 12000)]).expect("calendar");

    let empty = &month.cells[9];
    assert_eq!(empty.day, 10);
    assert!(empty.record.is_none());
    assert_eq!(empty.color, CALENDAR_NO_DATA);
    assert_eq!(empty.size, 35.0);
    assert_eq!(empty.tooltip, "January 10, 2025\nNo data");
}

#[test]
fn tooltips_keep_full_context() {
    let month = map_month(JANUARY_2025, &[record("2025-01-01", 12345)]).expect("calendar");
    let tooltip = &month.cells[0].tooltip;
    assert!(tooltip.starts_with("January 1, 2025"));
    assert!(tooltip.contains("Steps: 12,345"));
    assert!(tooltip.contains("Location: Park"));
    assert!(tooltip.contains("Temperature: 10-15ºC"));
    assert!(tooltip.contains("Status: Goal Met"));
}

#[test]
fn invalid_month_is_rejected() {
    let err = map_month(YearMonth { year: 2025, month: 13 }, &[]).expect_err("should fail");
    assert!(matches!(err, CalendarError::InvalidMonth { year: 2025, month: 13 }));
}

#[test]
fn months_are_distinct_and_ordered() {
    let records = vec![
        record("2025-02-03", 9000),
        record("2024-12-31", 9000),
        record("2025-01-05", 9000),
        record("2025-02-10", 9000),
    ];

    let months = available_months(&records);
    let keys: Vec<String> = months.iter().map(|m| m.key()).collect();
    assert_eq!(keys, vec!["2024-12", "2025-01", "2025-02"]);

    let feb = restrict_to_month(&records, months[2]);
    assert_eq!(feb.len(), 2);
}

#[test]
fn year_month_parsing() {
    assert_eq!(YearMonth::from_str("2025-03"), Some(YearMonth { year: 2025, month: 3 }));
    assert_eq!(YearMonth::from_str("2025-3"), Some(YearMonth { year: 2025, month: 3 }));
    assert_eq!(YearMonth::from_str("2025-00"), None);
    assert_eq!(YearMonth::from_str("March"), None);
    assert_eq!(YearMonth { year: 2025, month: 3 }.label(), "March 2025");
}

#[test]
fn thousands_grouping() {
    assert_eq!(group_thousands(0), "0");
    assert_eq!(group_thousands(999), "999");
    assert_eq!(group_thousands(11000), "11,000");
    assert_eq!(group_thousands(1234567), "1,234,567");
}

#[test]
fn svg_has_one_marker_per_day() {
    let month = map_month(JANUARY_2025, &[record("2025-01-01", 12000)]).expect("calendar");

    let svg = render_calendar_svg(&month, &RenderOptions::calendar_defaults()).expect("svg");

    assert!(svg.starts_with("<svg"));
    assert!(svg.contains("January 2025"));
    assert!(svg.contains(">Mon<"));
    // 31 days plus three legend swatches.
    assert_eq!(svg.matches("<circle").count(), 34);
    assert!(svg.contains(CALENDAR_MET));
}

#[test]
fn svg_rejects_a_degenerate_viewport() {
    let month = map_month(JANUARY_2025, &[]).expect("calendar");
    let mut options = RenderOptions::calendar_defaults();
    options.height = 80;
    assert!(render_calendar_svg(&month, &options).is_err());
}

#[test]
fn background_choices() {
    assert_eq!(Background::parse("white"), Some(Background::WHITE));
    assert_eq!(Background::parse("transparent"), Some(Background::Transparent));
    assert_eq!(Background::parse("#10b981"), Some(Background::Solid(0x10, 0xb9, 0x81)));
    assert_eq!(Background::parse("10B981"), Some(Background::Solid(0x10, 0xb9, 0x81)));
    assert_eq!(Background::parse("#aébcd"), None);
    assert_eq!(Background::parse("#12345"), None);
    assert_eq!(Background::parse("plaid"), None);
    assert_eq!(Background::default(), Background::WHITE);
}

#[test]
fn png_keeps_the_calendar_aspect() {
    let month = map_month(JANUARY_2025, &[record("2025-01-01", 12000)]).expect("calendar");
    let options = RenderOptions::calendar_defaults();
    let svg = render_calendar_svg(&month, &options).expect("svg");

    let output = OutputConfig {
        width: options.width * 2,
        height: options.height,
        background: Background::Transparent,
    };
    let png = rasterize(&svg, &output).expect("png");
    let pixmap = tiny_skia::Pixmap::decode_png(&png).expect("decode");

    assert_eq!((pixmap.width(), pixmap.height()), (1400, 600));
    // The 700px-wide calendar is centred, leaving the side margins empty.
    let margin = pixmap.pixel(10, 300).expect("pixel");
    assert_eq!(margin.alpha(), 0);

    let white = rasterize(&svg, &OutputConfig::for_calendar(&options, Background::WHITE)).expect("png");
    let pixmap = tiny_skia::Pixmap::decode_png(&white).expect("decode");
    let corner = pixmap.pixel(0, 0).expect("pixel");
    assert_eq!((corner.red(), corner.green(), corner.blue(), corner.alpha()), (255, 255, 255, 255));
}
