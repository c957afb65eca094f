//! Router tests driven through `tower::ServiceExt::oneshot`.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use tower::ServiceExt;

use energydash_core::dataset::{Dataset, EnergyRecord};
use energydash_web::{router, AppState};

fn state() -> AppState {
    let mut records = Vec::new();
    for (algorithm, values) in [
        ("Bubble Sort", [5.0, 6.0, 7.0, 8.0, 9.0]),
        ("Quick Sort", [3.0, 4.0, 5.0, 2.0, 6.0]),
        ("Merge Sort", [8.0, 7.0, 9.0, 6.0, 10.0]),
    ] {
        for v in values {
            records.push(EnergyRecord::new(algorithm, "Small", v));
        }
    }
    records.push(EnergyRecord::new("Bubble Sort", "Large", 50.0));
    records.push(EnergyRecord::new("Quick Sort", "Large", 20.0));
    AppState::new(Arc::new(Dataset::from_records(records)), "Small")
}

async fn get(uri: &str) -> (StatusCode, String) {
    let response = router(state())
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

async fn get_json(uri: &str) -> serde_json::Value {
    let (status, body) = get(uri).await;
    assert_eq!(status, StatusCode::OK, "{uri}: {body}");
    serde_json::from_str(&body).unwrap()
}

#[tokio::test]
async fn health_check() {
    let (status, body) = get("/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "ok");
}

#[tokio::test]
async fn unknown_route_is_404() {
    let (status, _) = get("/nope").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn dashboard_defaults() {
    let (status, html) = get("/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("Sorting Algorithm Energy Consumption Dashboard"));
    assert!(html.contains("Energy Consumption for Input Size: Small"));
    assert!(html.contains("Page 1 of 2 (17 rows)"));
    assert!(html.contains("F-Statistic: 8.67, Critical Value: 3.89. Decision: Reject the null hypothesis."));
    // The freeform calculator stays blank until clicked
    assert!(html.contains(r#"name="n_clicks" value="0""#));
}

#[tokio::test]
async fn dashboard_selected_sizes_and_page() {
    let (_, html) = get("/?input_size=Large&anova_input_size=Large&page=0&goto=1").await;
    assert!(html.contains("Energy Consumption for Input Size: Large"));
    assert!(html.contains("Page 2 of 2 (17 rows)"));
    assert!(html.contains("Critical Value: undefined"));
}

#[tokio::test]
async fn dashboard_calculate_button() {
    let (_, html) = get(
        "/?group1=5%2C6%2C7%2C8%2C9&group2=3%2C4%2C5%2C2%2C6&group3=8%2C7%2C9%2C6%2C10&n_clicks=0&calculate=1",
    )
    .await;
    assert!(html.contains(r#"name="n_clicks" value="1""#));
    assert_eq!(
        html.matches("Decision: Reject the null hypothesis.").count(),
        2
    );
}

#[tokio::test]
async fn dashboard_escapes_user_input() {
    let (_, html) = get("/?group1=%3Cscript%3E&n_clicks=1").await;
    assert!(!html.contains("<script>"));
    assert!(html.contains("&lt;script&gt;"));
    assert!(html.contains("Please enter valid numeric values."));
}

#[tokio::test]
async fn dashboard_unknown_size_is_escaped() {
    let (status, html) = get("/?input_size=%3Ci%3E").await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("No measurements for input size &#39;&lt;i&gt;&#39;."));
}

#[tokio::test]
async fn api_dataset_pages() {
    let json = get_json("/api/dataset?page=1").await;
    assert_eq!(json["page"], 1);
    assert_eq!(json["page_count"], 2);
    assert_eq!(json["total_rows"], 17);
    assert_eq!(json["rows"].as_array().unwrap().len(), 7);
    assert_eq!(json["columns"][0], "Algorithm");
}

#[tokio::test]
async fn api_input_sizes() {
    let json = get_json("/api/input-sizes").await;
    assert_eq!(json["input_sizes"], serde_json::json!(["Small", "Large"]));
    assert_eq!(json["default"], "Small");
}

#[tokio::test]
async fn api_graph() {
    let json = get_json("/api/graph?input_size=Small").await;
    assert_eq!(json["chart"]["bars"].as_array().unwrap().len(), 15);
    assert_eq!(json["chart"]["bars"][5]["color_index"], 1);
    assert!(json["summary"]
        .as_str()
        .unwrap()
        .starts_with("ANOVA Results:\nF-Statistic: 8.67\nP-Value: 0.0047"));
}

#[tokio::test]
async fn api_anova() {
    let json = get_json("/api/anova").await;
    assert_eq!(json["table"][0]["source"], "Between Groups");
    assert_eq!(json["table"][0]["df"], 2);
    assert_eq!(json["table"][1]["df"], 12);
    assert!(json["table"][2]["f"].is_null());
}

#[tokio::test]
async fn api_general_anova_requires_click() {
    let json = get_json("/api/anova/general?group1=1,2&group2=3,4").await;
    assert_eq!(json["conclusion"], "");
    assert!(json["table"].as_array().unwrap().is_empty());

    let json = get_json("/api/anova/general?n_clicks=1&group1=1,2&group2=3,4").await;
    assert!(json["conclusion"].as_str().unwrap().starts_with("F-Statistic: 8.00"));
}

#[tokio::test]
async fn api_general_anova_too_few_groups() {
    let json = get_json("/api/anova/general?n_clicks=1&group1=1,2").await;
    assert_eq!(json["conclusion"], "Please enter values for at least two groups.");
}

#[tokio::test]
async fn bad_query_is_rejected() {
    let (status, _) = get("/api/dataset?page=minus").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
