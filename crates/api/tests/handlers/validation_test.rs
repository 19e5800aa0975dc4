//! Requests rejected before any database access.

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::{json, Value};
use uuid::Uuid;
use visitday_api::{config::parse_log_level, handlers::report::report_slug};

use crate::test_utils::test_server;

#[tokio::test]
async fn test_blank_department_name_is_rejected() {
    let server = test_server();

    let response = server
        .post("/api/departments")
        .json(&json!({ "name": "   " }))
        .expect_failure()
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<Value>()["error"],
        "Validation error: Department name is required"
    );
}

#[rstest]
#[case(0)]
#[case(-15)]
#[tokio::test]
async fn test_non_positive_slot_length_is_rejected(#[case] length: i32) {
    let server = test_server();

    let response = server
        .post(&format!("/api/departments/{}/programs", Uuid::new_v4()))
        .json(&json!({
            "name": "Graduate Visit Weekend",
            "default_appointment_length": length,
            "held_on_dates": ["2026-03-14"]
        }))
        .expect_failure()
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_blank_vip_name_is_rejected() {
    let server = test_server();

    let response = server
        .post(&format!("/api/programs/{}/vips", Uuid::new_v4()))
        .json(&json!({ "name": "", "title": "Professor", "profile_url": null, "ranking": 1 }))
        .expect_failure()
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_blank_question_is_rejected() {
    let server = test_server();

    let response = server
        .post(&format!("/api/programs/{}/questionnaires", Uuid::new_v4()))
        .json(&json!({ "title": "Dietary needs", "questions": ["Any allergies?", " "] }))
        .expect_failure()
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<Value>()["error"],
        "Validation error: Questions must not be blank"
    );
}

#[tokio::test]
async fn test_malformed_id_is_rejected() {
    let server = test_server();

    let response = server
        .post("/api/appointments/not-a-uuid/release")
        .expect_failure()
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[rstest]
#[case("Graduate Visit Weekend", "graduate-visit-weekend")]
#[case("  Physics & Astronomy 2026 ", "physics-astronomy-2026")]
#[case("***", "program")]
fn test_report_slug(#[case] name: &str, #[case] expected: &str) {
    assert_eq!(report_slug(name), expected);
}

#[rstest]
#[case("debug", tracing::Level::DEBUG)]
#[case("WARN", tracing::Level::WARN)]
#[case("verbose", tracing::Level::INFO)]
fn test_parse_log_level(#[case] value: &str, #[case] expected: tracing::Level) {
    assert_eq!(parse_log_level(value), expected);
}

#[tokio::test]
async fn test_department_storage_failure_is_server_error() {
    let server = test_server();

    let response = server
        .post("/api/departments")
        .json(&json!({ "name": "Chemistry" }))
        .expect_failure()
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
}
