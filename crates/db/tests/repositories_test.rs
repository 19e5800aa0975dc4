//! Runs against PostgreSQL when `TEST_DATABASE_URL` is set; skipped otherwise.

use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use uuid::Uuid;
use visitday_core::{
    models::{
        appointment::{NewAppointment, SelectionAction, SelectionOutcome, TransitionError},
        student::NewStudent,
        vip::NewVip,
    },
    store::{AppointmentWriter, RosterWriter, UnitOfWork, WriteError},
};
use visitday_db::{
    mock::create_test_pool,
    repositories::{appointment, batch::PgBatch, department, program, vip},
    DbPool,
};

struct Fixture {
    program_id: Uuid,
    vip_id: Uuid,
    student_id: Uuid,
}

async fn fixture(pool: &DbPool) -> Fixture {
    let department = department::create_department(pool, "Physics").await.unwrap();
    let program = program::create_program(pool, department.id, &format!("Visit {}", Uuid::new_v4()), 30, &[])
        .await
        .unwrap();
    let vip = vip::create_vip(
        pool,
        &NewVip {
            program_id: program.id,
            name: "Lise Meitner".to_string(),
            title: Some("Professor".to_string()),
            profile_url: None,
            ranking: Some(1),
        },
    )
    .await
    .unwrap();

    let mut batch = PgBatch::begin(pool).await.unwrap();
    let student = batch
        .find_or_create_student(&NewStudent {
            program_id: program.id,
            email: "chien-shiung@example.edu".to_string(),
            first_name: Some("Chien-Shiung".to_string()),
            last_name: Some("Wu".to_string()),
            umid: Some("01234567".to_string()),
        })
        .await
        .unwrap();
    batch.commit().await.unwrap();

    Fixture {
        program_id: program.id,
        vip_id: vip.id,
        student_id: student.id,
    }
}

fn slot(fixture: &Fixture, hour: u32) -> NewAppointment {
    let start = NaiveDate::from_ymd_opt(2026, 3, 14)
        .unwrap()
        .and_hms_opt(hour, 0, 0)
        .unwrap();
    NewAppointment {
        program_id: fixture.program_id,
        vip_id: fixture.vip_id,
        start_time: start,
        end_time: start + chrono::Duration::minutes(30),
    }
}

#[tokio::test]
async fn test_claim_and_release_write_audit_trail() {
    let Some(pool) = create_test_pool().await else {
        return;
    };
    let fixture = fixture(&pool).await;

    let mut batch = PgBatch::begin(&pool).await.unwrap();
    let created = batch.insert_appointment(&slot(&fixture, 9)).await.unwrap();
    batch.commit().await.unwrap();

    let claimed = appointment::claim_appointment(&pool, created.id, fixture.student_id)
        .await
        .unwrap()
        .unwrap();
    assert!(matches!(
        claimed,
        SelectionOutcome::Applied { ref appointment, ref selection }
            if appointment.student_id == Some(fixture.student_id)
                && selection.action == SelectionAction::Selected
    ));

    let again = appointment::claim_appointment(&pool, created.id, fixture.student_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(
        again,
        SelectionOutcome::Rejected(TransitionError::AlreadyBooked(created.id))
    );
    assert_eq!(
        appointment::get_selections_by_appointment_id(&pool, created.id)
            .await
            .unwrap()
            .len(),
        1
    );

    let released = appointment::release_appointment(&pool, created.id).await.unwrap().unwrap();
    assert!(matches!(
        released,
        SelectionOutcome::Applied { ref appointment, .. } if appointment.student_id.is_none()
    ));
    let not_booked = appointment::release_appointment(&pool, created.id).await.unwrap().unwrap();
    assert_eq!(
        not_booked,
        SelectionOutcome::Rejected(TransitionError::NotBooked(created.id))
    );

    let actions: Vec<_> = appointment::get_selections_by_appointment_id(&pool, created.id)
        .await
        .unwrap()
        .into_iter()
        .map(|s| s.action)
        .collect();
    assert_eq!(actions, vec![SelectionAction::Selected, SelectionAction::Deleted]);
}

#[tokio::test]
async fn test_unknown_appointment_is_none() {
    let Some(pool) = create_test_pool().await else {
        return;
    };

    let outcome = appointment::claim_appointment(&pool, Uuid::new_v4(), Uuid::new_v4())
        .await
        .unwrap();
    assert!(outcome.is_none());
}

#[tokio::test]
async fn test_duplicate_slot_is_rejected_and_batch_continues() {
    let Some(pool) = create_test_pool().await else {
        return;
    };
    let fixture = fixture(&pool).await;

    let mut batch = PgBatch::begin(&pool).await.unwrap();
    batch.insert_appointment(&slot(&fixture, 9)).await.unwrap();
    let duplicate = batch.insert_appointment(&slot(&fixture, 9)).await;
    assert!(matches!(duplicate, Err(WriteError::Rejected(ref m)) if m.contains("already starts")));
    batch.insert_appointment(&slot(&fixture, 10)).await.unwrap();
    batch.commit().await.unwrap();

    let appointments = appointment::get_appointments_by_program_id(&pool, fixture.program_id, None)
        .await
        .unwrap();
    assert_eq!(appointments.len(), 2);
}

#[tokio::test]
async fn test_overlong_student_row_is_rejected_and_siblings_commit() {
    let Some(pool) = create_test_pool().await else {
        return;
    };
    let fixture = fixture(&pool).await;

    let student = |email: String, umid: Option<&str>| NewStudent {
        program_id: fixture.program_id,
        email,
        first_name: Some("Emmy".to_string()),
        last_name: Some("Noether".to_string()),
        umid: umid.map(str::to_string),
    };

    let mut batch = PgBatch::begin(&pool).await.unwrap();
    let overlong = batch
        .find_or_create_student(&student(format!("{}@example.edu", "e".repeat(300)), None))
        .await;
    assert!(matches!(overlong, Err(WriteError::Rejected(_))));
    let long_umid = batch
        .find_or_create_student(&student("noether@example.edu".to_string(), Some(&"9".repeat(40))))
        .await;
    assert!(matches!(long_umid, Err(WriteError::Rejected(_))));
    let kept = batch
        .find_or_create_student(&student("emmy@example.edu".to_string(), Some("00000007")))
        .await
        .unwrap();
    batch.commit().await.unwrap();

    let stored = visitday_db::repositories::student::get_student_by_id(&pool, kept.id)
        .await
        .unwrap();
    assert!(stored.is_some());
}
