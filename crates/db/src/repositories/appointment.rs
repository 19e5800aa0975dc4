use crate::models::{DbAppointment, DbAppointmentSelection};
use chrono::Utc;
use eyre::Result;
use sqlx::{Pool, Postgres};
use uuid::Uuid;
use visitday_core::models::appointment::{
    Appointment, AppointmentSelection, AppointmentStatus, NewSelection, SelectionOutcome,
    TransitionError,
};

pub async fn get_appointment_by_id(pool: &Pool<Postgres>, id: Uuid) -> Result<Option<DbAppointment>> {
    let appointment = sqlx::query_as::<_, DbAppointment>(
        r#"
        SELECT id, program_id, vip_id, student_id, start_time, end_time, created_at
        FROM appointments
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(appointment)
}

pub async fn get_appointments_by_program_id(
    pool: &Pool<Postgres>,
    program_id: Uuid,
    status: Option<AppointmentStatus>,
) -> Result<Vec<DbAppointment>> {
    let booked = status.map(|s| s == AppointmentStatus::Booked);

    let appointments = sqlx::query_as::<_, DbAppointment>(
        r#"
        SELECT id, program_id, vip_id, student_id, start_time, end_time, created_at
        FROM appointments
        WHERE program_id = $1
          AND ($2::BOOLEAN IS NULL OR (student_id IS NOT NULL) = $2)
        ORDER BY start_time ASC, vip_id ASC
        "#,
    )
    .bind(program_id)
    .bind(booked)
    .fetch_all(pool)
    .await?;

    Ok(appointments)
}

/// Deletes a slot. Its selection history is kept.
pub async fn delete_appointment(pool: &Pool<Postgres>, id: Uuid) -> Result<bool> {
    let result = sqlx::query(
        r#"
        DELETE FROM appointments
        WHERE id = $1
        "#,
    )
    .bind(id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// Books an open slot for a student.
///
/// Returns `None` when the appointment does not exist.
pub async fn claim_appointment(
    pool: &Pool<Postgres>,
    id: Uuid,
    student_id: Uuid,
) -> Result<Option<SelectionOutcome>> {
    apply_transition(pool, id, move |appointment| appointment.claim(student_id)).await
}

/// Frees a booked slot.
///
/// Returns `None` when the appointment does not exist.
pub async fn release_appointment(pool: &Pool<Postgres>, id: Uuid) -> Result<Option<SelectionOutcome>> {
    apply_transition(pool, id, |appointment| appointment.release()).await
}

/// Locks the row, applies `transition` and writes the slot together with its
/// audit record in one transaction. A rejected transition writes nothing.
async fn apply_transition<F>(pool: &Pool<Postgres>, id: Uuid, transition: F) -> Result<Option<SelectionOutcome>>
where
    F: FnOnce(&mut Appointment) -> Result<NewSelection, TransitionError> + Send,
{
    let mut tx = pool.begin().await?;

    let row = sqlx::query_as::<_, DbAppointment>(
        r#"
        SELECT id, program_id, vip_id, student_id, start_time, end_time, created_at
        FROM appointments
        WHERE id = $1
        FOR UPDATE
        "#,
    )
    .bind(id)
    .fetch_optional(&mut *tx)
    .await?;

    let Some(row) = row else {
        tx.rollback().await?;
        return Ok(None);
    };

    let mut appointment = Appointment::from(row);
    let new_selection = match transition(&mut appointment) {
        Ok(selection) => selection,
        Err(rejected) => {
            tracing::debug!("Appointment {} transition rejected: {}", id, rejected);
            tx.rollback().await?;
            return Ok(Some(SelectionOutcome::Rejected(rejected)));
        }
    };

    let updated = sqlx::query_as::<_, DbAppointment>(
        r#"
        UPDATE appointments
        SET student_id = $2
        WHERE id = $1
        RETURNING id, program_id, vip_id, student_id, start_time, end_time, created_at
        "#,
    )
    .bind(id)
    .bind(appointment.student_id)
    .fetch_one(&mut *tx)
    .await?;

    let selection = sqlx::query_as::<_, DbAppointmentSelection>(
        r#"
        INSERT INTO appointment_selections (id, appointment_id, user_id, action, created_at)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING id, appointment_id, user_id, action, created_at
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(new_selection.appointment_id)
    .bind(new_selection.user_id)
    .bind(new_selection.action.as_str())
    .bind(Utc::now())
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;

    tracing::debug!(
        "Appointment {} {} by {}",
        id,
        new_selection.action.as_str(),
        new_selection.user_id
    );

    Ok(Some(SelectionOutcome::Applied {
        appointment: updated.into(),
        selection: selection.try_into()?,
    }))
}

/// Audit trail of a slot, oldest first
pub async fn get_selections_by_appointment_id(
    pool: &Pool<Postgres>,
    appointment_id: Uuid,
) -> Result<Vec<AppointmentSelection>> {
    let rows = sqlx::query_as::<_, DbAppointmentSelection>(
        r#"
        SELECT id, appointment_id, user_id, action, created_at
        FROM appointment_selections
        WHERE appointment_id = $1
        ORDER BY created_at ASC
        "#,
    )
    .bind(appointment_id)
    .fetch_all(pool)
    .await?;

    rows.into_iter().map(AppointmentSelection::try_from).collect()
}
