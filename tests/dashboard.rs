use axum::{body::to_bytes, http::Request, Router};
use serde_json::Value;
use stepviz_rs::{config::Config, pipeline::load::load_bytes, routes, state::AppState};
use tower::ServiceExt;

const SAMPLE: &str = "Location,Temperature,Date,Step Count,Day of week\n\
    Park,10-15ºC,2025-01-01,12000,Wednesday\n\
    Office,18-22ºC,2025-01-02,9000,Thursday\n\
    Park,20-26ºC,2025-01-03,11500,Friday\n\
    Home,5-8ºC,2025-01-04,4000,Saturday\n\
    Park,30-36ºC,2025-01-05,15000,Sunday\n\
    Office,bad,2025-01-06,13000,Monday\n\
    Home,12-16ºC,2025-02-03,11000,Monday\n\
    Office,15-19ºC,2025-02-04,8800,Tuesday\n";

fn app() -> Router {
    let dataset = load_bytes(SAMPLE.as_bytes(), "sample").expect("sample dataset");
    let state = AppState::with_dataset(Config::default(), dataset);
    Router::new()
        .merge(routes::health::router())
        .merge(routes::options::router())
        .merge(routes::dashboard::router())
        .merge(routes::calendar::router())
        .with_state(state)
}

async fn get(uri: &str) -> (axum::http::StatusCode, Vec<u8>) {
    let response = app()
        .oneshot(
            Request::builder()
                .uri(uri)
                .method("GET")
                .body(axum::body::Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body bytes");
    (status, body.to_vec())
}

async fn get_json(uri: &str) -> (axum::http::StatusCode, Value) {
    let (status, body) = get(uri).await;
    (status, serde_json::from_slice(&body).expect("json"))
}

#[tokio::test]
async fn unfiltered_dashboard_summarizes_everything() {
    let (status, json) = get_json("/api/dashboard").await;

    assert_eq!(status, axum::http::StatusCode::OK);
    assert_eq!(json["record_count"], 7);
    assert_eq!(json["kpis"]["status"], "summary");
    assert_eq!(json["kpis"]["max_steps"], 15000);
    assert_eq!(json["kpis"]["min_steps"], 4000);
    assert_eq!(json["kpis"]["best_weekday"], "Sunday");
    assert_eq!(json["kpis"]["best_location"], "Park");
    assert_eq!(json["kpis"]["best_temp_bucket"], "30-35°C");
    assert_eq!(json["kpis"]["longest_streak"], 2);

    assert_eq!(json["by_location"][0]["label"], "Park");
    assert_eq!(json["by_weekday"][0]["label"], "Monday");
    assert_eq!(json["timeline"]["points"].as_array().map(Vec::len), Some(7));
    assert_eq!(json["timeline"]["goal_line"]["steps"], 11000);

    let months: Vec<&str> = json["months"]
        .as_array()
        .expect("months")
        .iter()
        .filter_map(|m| m["key"].as_str())
        .collect();
    assert_eq!(months, vec!["2025-01", "2025-02"]);
    assert_eq!(json["selected_month"], "2025-01");
    assert_eq!(json["calendar"]["cells"].as_array().map(Vec::len), Some(31));
}

#[tokio::test]
async fn filters_compose() {
    let (status, json) = get_json("/api/dashboard?day=Weekends&location=Park").await;

    assert_eq!(status, axum::http::StatusCode::OK);
    assert_eq!(json["record_count"], 1);
    assert_eq!(json["kpis"]["avg_steps"], 15000.0);
    assert_eq!(json["filters"]["location"], "Park");
    assert_eq!(json["filters"]["day"]["kind"], "day_type");
}

#[tokio::test]
async fn relative_window_and_temperature_filter() {
    let (_, last30) = get_json("/api/dashboard?range=last30").await;
    assert_eq!(last30["record_count"], 3);

    let (_, mild) = get_json("/api/dashboard?temp=10-15%C2%B0C").await;
    assert_eq!(mild["record_count"], 2);

    let (_, bare) = get_json("/api/dashboard?temp=10-15").await;
    assert_eq!(bare["record_count"], 2);
}

#[tokio::test]
async fn custom_window_defaults_missing_bound() {
    let (status, json) = get_json("/api/dashboard?range=custom&start=2025-01-04").await;

    assert_eq!(status, axum::http::StatusCode::OK);
    assert_eq!(json["record_count"], 4);
    assert_eq!(json["filters"]["window"]["end"], "2025-02-04");
}

#[tokio::test]
async fn selecting_a_month_maps_that_month() {
    let (status, json) = get_json("/api/dashboard?month=2025-02").await;

    assert_eq!(status, axum::http::StatusCode::OK);
    assert_eq!(json["calendar"]["label"], "February 2025");
    let cells = json["calendar"]["cells"].as_array().expect("cells");
    assert_eq!(cells.len(), 28);
    // 2025-02-03 is a Monday in the second week.
    assert_eq!(cells[2]["weekday_col"], 0);
    assert_eq!(cells[2]["week_row"], 1);
    assert_eq!(cells[2]["record"]["step_count"], 11000);
    assert!(cells[0]["record"].is_null());
}

#[tokio::test]
async fn no_match_reports_no_data() {
    let (status, json) = get_json("/api/dashboard?location=Moon").await;

    assert_eq!(status, axum::http::StatusCode::OK);
    assert_eq!(json["record_count"], 0);
    assert_eq!(json["kpis"], serde_json::json!({ "status": "no_data" }));
    assert_eq!(json["by_weekday"], serde_json::json!([]));
    assert!(json["calendar"].is_null());
    assert!(json["selected_month"].is_null());
}

#[tokio::test]
async fn invalid_selections_are_bad_requests() {
    for uri in [
        "/api/dashboard?range=last90",
        "/api/dashboard?day=Someday",
        "/api/dashboard?temp=hot",
        "/api/dashboard?range=custom&start=2025-02-01&end=2025-01-01",
        "/api/dashboard?start=yesterday",
        "/api/dashboard?month=2025-13",
        "/api/dashboard?month=2025-03",
    ] {
        let (status, json) = get_json(uri).await;
        assert_eq!(status, axum::http::StatusCode::BAD_REQUEST, "{uri}");
        assert!(json["error"].is_string(), "{uri}");
    }
}

#[tokio::test]
async fn options_list_filter_choices() {
    let (status, json) = get_json("/api/options").await;

    assert_eq!(status, axum::http::StatusCode::OK);
    assert_eq!(json["goal"], 11000);
    assert_eq!(
        json["locations"],
        serde_json::json!(["All Locations", "Home", "Office", "Park"])
    );
    assert_eq!(json["days"][0], "All Days");
    assert_eq!(json["temperatures"][1], "<10°C");
    assert_eq!(json["bounds"]["start"], "2025-01-01");
    assert_eq!(json["record_count"], 7);
    assert_eq!(json["skipped"][0]["row"], 7);
}

#[tokio::test]
async fn calendar_png_returns_image() {
    let response = app()
        .oneshot(
            Request::builder()
                .uri("/api/calendar.png?month=2025-01&width=700&height=600")
                .method("GET")
                .body(axum::body::Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");

    assert_eq!(response.status(), axum::http::StatusCode::OK);
    let content_type = response
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();
    assert_eq!(content_type, "image/png");
    let body = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body bytes");
    assert!(body.len() > 100);
    assert_eq!(&body[1..4], b"PNG");
}

#[tokio::test]
async fn calendar_png_without_data_is_not_found() {
    let (status, _) = get("/api/calendar.png?location=Moon").await;
    assert_eq!(status, axum::http::StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn calendar_png_validates_dimensions() {
    let (status, _) = get("/api/calendar.png?width=700").await;
    assert_eq!(status, axum::http::StatusCode::BAD_REQUEST);

    let (status, _) = get("/api/calendar.png?width=100&height=100").await;
    assert_eq!(status, axum::http::StatusCode::BAD_REQUEST);

    let (status, _) = get("/api/calendar.png?background=plaid").await;
    assert_eq!(status, axum::http::StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn calendar_png_rejects_non_ascii_background() {
    // "#aébcd" is six bytes but not six hex digits.
    let (status, body) = get("/api/calendar.png?background=%23a%C3%A9bcd").await;
    assert_eq!(status, axum::http::StatusCode::BAD_REQUEST);
    let json: Value = serde_json::from_slice(&body).expect("json");
    assert!(json["error"]
        .as_str()
        .is_some_and(|msg| msg.contains("Invalid background")));

    let (status, _) = get("/api/calendar.png?background=%23102A3f&month=2025-01").await;
    assert_eq!(status, axum::http::StatusCode::OK);
}
