use chrono::{NaiveDate, Utc};
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::{from_str, json, to_value};
use serde_test::{assert_tokens, Token};
use uuid::Uuid;
use visitday_core::models::{
    appointment::{
        Appointment, AppointmentResponse, AppointmentStatus, SelectionAction, TransitionError,
    },
    schedule::{Block, CreateScheduleRequest},
    student::{format_umid, format_umid_number},
    upload::{UploadKind, UploadResult},
};

fn open_appointment() -> Appointment {
    let start = NaiveDate::from_ymd_opt(2026, 3, 14)
        .unwrap()
        .and_hms_opt(9, 0, 0)
        .unwrap();
    Appointment {
        id: Uuid::new_v4(),
        program_id: Uuid::new_v4(),
        vip_id: Uuid::new_v4(),
        student_id: None,
        start_time: start,
        end_time: start + chrono::Duration::minutes(30),
        created_at: Utc::now(),
    }
}

#[test]
fn test_claim_books_available_appointment() {
    let mut appointment = open_appointment();
    let student_id = Uuid::new_v4();

    let selection = appointment.claim(student_id).expect("slot should be open");

    assert_eq!(appointment.status(), AppointmentStatus::Booked);
    assert_eq!(appointment.student_id, Some(student_id));
    assert_eq!(selection.appointment_id, appointment.id);
    assert_eq!(selection.user_id, student_id);
    assert_eq!(selection.action, SelectionAction::Selected);
}

#[test]
fn test_second_claim_is_rejected_without_change() {
    let mut appointment = open_appointment();
    let first = Uuid::new_v4();
    appointment.claim(first).unwrap();

    let result = appointment.claim(Uuid::new_v4());

    assert_eq!(result, Err(TransitionError::AlreadyBooked(appointment.id)));
    assert_eq!(appointment.student_id, Some(first));
}

#[test]
fn test_release_frees_booked_appointment() {
    let mut appointment = open_appointment();
    let student_id = Uuid::new_v4();
    appointment.claim(student_id).unwrap();

    let selection = appointment.release().expect("slot should be booked");

    assert!(appointment.is_available());
    assert_eq!(selection.user_id, student_id);
    assert_eq!(selection.action, SelectionAction::Deleted);
}

#[test]
fn test_release_of_available_appointment_is_rejected() {
    let mut appointment = open_appointment();

    assert_eq!(
        appointment.release(),
        Err(TransitionError::NotBooked(appointment.id))
    );
    assert!(appointment.is_available());
}

#[test]
fn test_selection_action_tokens() {
    assert_tokens(
        &SelectionAction::Selected,
        &[Token::UnitVariant {
            name: "SelectionAction",
            variant: "selected",
        }],
    );
    assert_tokens(
        &SelectionAction::Deleted,
        &[Token::UnitVariant {
            name: "SelectionAction",
            variant: "deleted",
        }],
    );
    assert_eq!(SelectionAction::parse("deleted"), Some(SelectionAction::Deleted));
    assert_eq!(SelectionAction::parse("cancelled"), None);
}

#[test]
fn test_appointment_response_reports_status() {
    let mut appointment = open_appointment();
    appointment.claim(Uuid::new_v4()).unwrap();

    let value = to_value(AppointmentResponse::from(appointment)).unwrap();

    assert_eq!(value["status"], json!("booked"));
    assert_eq!(value["start_time"], json!("2026-03-14T09:00:00"));
}

#[test]
fn test_schedule_request_deserializes_tagged_blocks() {
    let request: CreateScheduleRequest = from_str(
        r#"{
            "days": [
                {
                    "date": "2026-03-14",
                    "blocks": [
                        { "type": "single", "start": "9:00 AM" },
                        { "type": "range", "start": "13:00", "end": "15:00" }
                    ]
                },
                { "date": "2026-03-15" }
            ]
        }"#,
    )
    .expect("Failed to deserialize schedule request");

    assert_eq!(request.days.len(), 2);
    assert_eq!(
        request.days[0].blocks,
        vec![
            Block::Single {
                start: "9:00 AM".to_string()
            },
            Block::Range {
                start: "13:00".to_string(),
                end: "15:00".to_string()
            },
        ]
    );
    assert!(request.days[1].blocks.is_empty());
}

#[rstest]
#[case(Some("1234567"), Some("01234567"))]
#[case(Some("1234567.0"), Some("01234567"))]
#[case(Some("12345678"), Some("12345678"))]
#[case(Some("ABC12345"), Some("ABC12345"))]
#[case(Some("  00042 "), Some("00000042"))]
#[case(Some(""), None)]
#[case(None, None)]
fn test_format_umid(#[case] raw: Option<&str>, #[case] expected: Option<&str>) {
    assert_eq!(format_umid(raw).as_deref(), expected);
}

#[test]
fn test_format_umid_number_pads_to_eight_digits() {
    assert_eq!(format_umid_number(1234567), "01234567");
    assert_eq!(format_umid_number(7), "00000007");
}

#[test]
fn test_upload_result_aborted_has_single_error() {
    let result = UploadResult::aborted("connection reset");

    assert_eq!(
        result,
        UploadResult {
            success_count: 0,
            failure_count: 0,
            errors: vec!["connection reset".to_string()],
        }
    );
    assert_eq!(
        UploadKind::Students.expected_columns(),
        ["Email", "Last Name", "First Name", "UMID"]
    );
}
