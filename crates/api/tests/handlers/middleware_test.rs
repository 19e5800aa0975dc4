use axum::{body::to_bytes, http::StatusCode};
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::Value;
use visitday_api::middleware::error_handling::{conflict_on_duplicate, map_error};
use visitday_core::errors::VisitError;

#[rstest]
#[case(VisitError::NotFound("Program missing".to_string()), StatusCode::NOT_FOUND)]
#[case(VisitError::Validation("Name is required".to_string()), StatusCode::BAD_REQUEST)]
#[case(VisitError::Conflict("Appointment is already booked".to_string()), StatusCode::CONFLICT)]
#[case(VisitError::Database(eyre::eyre!("connection refused")), StatusCode::INTERNAL_SERVER_ERROR)]
#[tokio::test]
async fn test_error_status_mapping(#[case] error: VisitError, #[case] expected: StatusCode) {
    let response = map_error(error);

    assert_eq!(response.status(), expected);
}

#[tokio::test]
async fn test_error_handling_internal() {
    let error = VisitError::Internal(Box::new(std::io::Error::new(
        std::io::ErrorKind::Other,
        "Internal error",
    )));

    let response = map_error(error);

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_error_body_carries_message() {
    let response = map_error(VisitError::Conflict("Appointment 42 is already booked".to_string()));

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();

    assert_eq!(body["error"], "Conflict: Appointment 42 is already booked");
}

#[test]
fn test_non_database_failure_is_not_a_conflict() {
    let error = conflict_on_duplicate(eyre::eyre!("pool timed out"), "VIP already exists");

    assert!(matches!(error, VisitError::Database(_)));
}
