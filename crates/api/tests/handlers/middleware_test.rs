use axum::http::StatusCode;
use codeconnect_api::middleware::error_handling::{
    handle_panic, map_error, AppError, GENERIC_FAILURE_MESSAGE,
};
use codeconnect_core::errors::ConnectError;
use rstest::rstest;

#[rstest]
#[case::not_found(ConnectError::not_found("Time slot missing"), StatusCode::NOT_FOUND)]
#[case::validation(ConnectError::validation("End time must be after start time"), StatusCode::BAD_REQUEST)]
#[case::persistence(ConnectError::Persistence(eyre::eyre!("connection refused")), StatusCode::INTERNAL_SERVER_ERROR)]
#[case::internal(
    ConnectError::Internal(Box::new(std::io::Error::new(std::io::ErrorKind::Other, "disk"))),
    StatusCode::INTERNAL_SERVER_ERROR
)]
fn test_errors_map_to_status_codes(#[case] error: ConnectError, #[case] expected: StatusCode) {
    let response = map_error(error);

    assert_eq!(response.status(), expected);
}

#[tokio::test]
async fn test_persistence_failures_hide_their_cause() {
    let response = map_error(ConnectError::Persistence(eyre::eyre!("password authentication failed")));
    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();

    assert_eq!(json["error"], GENERIC_FAILURE_MESSAGE);
}

#[tokio::test]
async fn test_validation_messages_are_returned_verbatim() {
    let response = map_error(ConnectError::validation("Please fill in all required fields"));
    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();

    assert_eq!(json["error"], "Please fill in all required fields");
}

#[test]
fn test_eyre_reports_become_persistence_errors() {
    let error: AppError = eyre::eyre!("pool timed out").into();

    assert!(matches!(error.0, ConnectError::Persistence(_)));
}

#[tokio::test]
async fn test_panics_become_generic_internal_errors() {
    let response = handle_panic(Box::new("index out of bounds".to_string()));

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["error"], GENERIC_FAILURE_MESSAGE);
}
