use axum::http::StatusCode;
use chrono::{TimeZone, Utc};
use pretty_assertions::assert_eq;
use serde_json::Value;

use crate::test_utils::TestContext;

#[tokio::test]
async fn test_health_reports_ok() {
    let server = TestContext::new().server();

    let response = server.get("/health").await;

    response.assert_status(StatusCode::OK);
    assert_eq!(response.json::<Value>()["status"], "ok");
}

#[tokio::test]
async fn test_server_time_uses_the_injected_clock() {
    let now = Utc.with_ymd_and_hms(2025, 3, 4, 12, 30, 0).unwrap();
    let server = TestContext::new().at(now).rejecting_overlaps().server();

    let body: Value = server.get("/api/time").await.json();

    assert_eq!(body["now"], "2025-03-04T12:30:00Z");
    assert_eq!(body["rejectOverlappingSlots"], true);
}
