use chrono::Utc;
use mockall::predicate;
use pretty_assertions::assert_eq;
use uuid::Uuid;
use visitday_core::{
    models::{appointment::Appointment, student::Student, vip::Vip},
    services::upload::{import_appointments, import_students},
    spreadsheet::Sheet,
    store::WriteError,
};
use visitday_db::mock::repositories::MockBatch;

fn vip() -> Vip {
    Vip {
        id: Uuid::new_v4(),
        program_id: Uuid::new_v4(),
        name: "Katherine Johnson".to_string(),
        title: None,
        profile_url: None,
        ranking: None,
        created_at: Utc::now(),
    }
}

fn sheet(contents: &str) -> Sheet {
    Sheet::read("rows.csv", contents.as_bytes()).unwrap()
}

#[tokio::test]
async fn test_upload_commits_after_all_rows() {
    let vip = vip();
    let mut batch = MockBatch::new();
    batch
        .expect_insert_appointment()
        .times(2)
        .returning(|new| {
            Ok(Appointment {
                id: Uuid::new_v4(),
                program_id: new.program_id,
                vip_id: new.vip_id,
                student_id: None,
                start_time: new.start_time,
                end_time: new.end_time,
                created_at: Utc::now(),
            })
        });
    batch.expect_commit().times(1).returning(|| Ok(()));
    batch.expect_rollback().never();

    let result = import_appointments(
        batch,
        &vip,
        &sheet("Start Time,End Time\n2026-03-14 09:00,2026-03-14 09:30\n2026-03-14 09:30,2026-03-14 10:00\n"),
    )
    .await;

    assert_eq!(result.success_count, 2);
    assert_eq!(result.failure_count, 0);
}

#[tokio::test]
async fn test_rejected_row_is_counted_not_fatal() {
    let vip = vip();
    let mut batch = MockBatch::new();
    batch
        .expect_insert_appointment()
        .times(1)
        .returning(|_| {
            Err(WriteError::Rejected(
                "An appointment with this VIP already starts at that time".to_string(),
            ))
        });
    batch.expect_commit().times(1).returning(|| Ok(()));

    let result = import_appointments(
        batch,
        &vip,
        &sheet("Start Time,End Time\n2026-03-14 09:00,2026-03-14 09:30\n"),
    )
    .await;

    assert_eq!(result.success_count, 0);
    assert_eq!(result.failure_count, 1);
    assert_eq!(
        result.errors,
        vec![
            "Row 2 (2026-03-14 09:00, 2026-03-14 09:30): An appointment with this VIP already starts at that time"
                .to_string()
        ]
    );
}

#[tokio::test]
async fn test_fatal_row_rolls_back_and_stops() {
    let program_id = Uuid::new_v4();
    let mut batch = MockBatch::new();
    batch
        .expect_find_or_create_student()
        .with(predicate::function(|s: &visitday_core::models::student::NewStudent| {
            s.email == "ada@example.edu"
        }))
        .times(1)
        .returning(|_| Err(WriteError::Fatal(eyre::eyre!("server closed the connection"))));
    batch.expect_rollback().times(1).returning(|| Ok(()));
    batch.expect_commit().never();

    let result = import_students(
        batch,
        program_id,
        &sheet("Email,Last Name,First Name,UMID\nada@example.edu,Lovelace,Ada,1\nalan@example.edu,Turing,Alan,2\n"),
    )
    .await;

    assert_eq!(result.success_count, 0);
    assert_eq!(result.failure_count, 0);
    assert_eq!(result.errors, vec!["server closed the connection".to_string()]);
}

#[tokio::test]
async fn test_student_rows_are_normalized_before_writing() {
    let program_id = Uuid::new_v4();
    let mut batch = MockBatch::new();
    batch
        .expect_find_or_create_student()
        .withf(move |s| {
            s.program_id == program_id
                && s.email == "grace@example.edu"
                && s.umid.as_deref() == Some("00000042")
                && s.first_name.as_deref() == Some("Grace")
        })
        .times(1)
        .returning(|s| {
            Ok(Student {
                id: Uuid::new_v4(),
                program_id: s.program_id,
                email: s.email.clone(),
                first_name: s.first_name.clone(),
                last_name: s.last_name.clone(),
                umid: s.umid.clone(),
                created_at: Utc::now(),
            })
        });
    batch.expect_commit().times(1).returning(|| Ok(()));

    let result = import_students(
        batch,
        program_id,
        &sheet("Email,Last Name,First Name,UMID\n Grace@Example.edu ,Hopper,Grace,42\n"),
    )
    .await;

    assert_eq!(result.success_count, 1);
    assert!(result.errors.is_empty());
}
