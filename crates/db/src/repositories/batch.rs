//! Transactional writer used by schedule generation and spreadsheet uploads.
//!
//! Every row is written inside its own savepoint so a constraint violation
//! only undoes that row and the surrounding transaction stays usable.

use crate::models::{DbAppointment, DbStudent, DbVip};
use async_trait::async_trait;
use chrono::Utc;
use eyre::Result;
use sqlx::error::{DatabaseError, ErrorKind};
use sqlx::{Pool, Postgres, Transaction};
use uuid::Uuid;
use visitday_core::models::{
    appointment::{Appointment, NewAppointment},
    student::{NewStudent, Student},
    vip::{NewVip, Vip},
};
use visitday_core::store::{AppointmentWriter, RosterWriter, UnitOfWork, WriteError};

pub struct PgBatch {
    tx: Transaction<'static, Postgres>,
}

impl PgBatch {
    pub async fn begin(pool: &Pool<Postgres>) -> Result<Self> {
        let tx = pool.begin().await?;
        Ok(Self { tx })
    }

    async fn savepoint(&mut self) -> Result<(), WriteError> {
        sqlx::query("SAVEPOINT batch_row")
            .execute(&mut *self.tx)
            .await
            .map_err(|e| WriteError::Fatal(e.into()))?;
        Ok(())
    }

    /// Releases the row savepoint on success and rolls back to it when the
    /// database refused the row.
    async fn settle<T: Send>(&mut self, written: Result<T, sqlx::Error>) -> Result<T, WriteError> {
        match written {
            Ok(row) => {
                sqlx::query("RELEASE SAVEPOINT batch_row")
                    .execute(&mut *self.tx)
                    .await
                    .map_err(|e| WriteError::Fatal(e.into()))?;
                Ok(row)
            }
            Err(sqlx::Error::Database(db_error)) if is_row_rejection(db_error.as_ref()) => {
                sqlx::query("ROLLBACK TO SAVEPOINT batch_row")
                    .execute(&mut *self.tx)
                    .await
                    .map_err(|e| WriteError::Fatal(e.into()))?;
                Err(WriteError::Rejected(rejection_message(db_error.as_ref())))
            }
            Err(e) => Err(WriteError::Fatal(e.into())),
        }
    }
}

fn is_row_rejection(error: &dyn DatabaseError) -> bool {
    matches!(
        error.kind(),
        ErrorKind::UniqueViolation
            | ErrorKind::CheckViolation
            | ErrorKind::ForeignKeyViolation
            | ErrorKind::NotNullViolation
    ) || is_data_exception(error.code().as_deref())
}

/// SQLSTATE class 22 covers values the row itself carries, such as an
/// overlong string (22001) or a NUL byte (22021).
fn is_data_exception(code: Option<&str>) -> bool {
    code.is_some_and(|code| code.starts_with("22"))
}

fn rejection_message(error: &dyn DatabaseError) -> String {
    match error.constraint() {
        Some("appointments_vip_start_key") => {
            "An appointment with this VIP already starts at that time".to_string()
        }
        Some("valid_time_range") => "End time must be after start time".to_string(),
        _ => error.message().to_string(),
    }
}

#[async_trait]
impl AppointmentWriter for PgBatch {
    async fn insert_appointment(&mut self, appointment: &NewAppointment) -> Result<Appointment, WriteError> {
        self.savepoint().await?;

        let written = sqlx::query_as::<_, DbAppointment>(
            r#"
            INSERT INTO appointments (id, program_id, vip_id, student_id, start_time, end_time, created_at)
            VALUES ($1, $2, $3, NULL, $4, $5, $6)
            RETURNING id, program_id, vip_id, student_id, start_time, end_time, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(appointment.program_id)
        .bind(appointment.vip_id)
        .bind(appointment.start_time)
        .bind(appointment.end_time)
        .bind(Utc::now())
        .fetch_one(&mut *self.tx)
        .await;

        self.settle(written).await.map(Appointment::from)
    }
}

#[async_trait]
impl RosterWriter for PgBatch {
    async fn find_or_create_student(&mut self, student: &NewStudent) -> Result<Student, WriteError> {
        self.savepoint().await?;

        // The no-op update makes RETURNING yield the existing row on conflict
        let written = sqlx::query_as::<_, DbStudent>(
            r#"
            INSERT INTO students (id, program_id, email, first_name, last_name, umid, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT (program_id, email)
            DO UPDATE SET email = EXCLUDED.email
            RETURNING id, program_id, email, first_name, last_name, umid, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(student.program_id)
        .bind(&student.email)
        .bind(&student.first_name)
        .bind(&student.last_name)
        .bind(&student.umid)
        .bind(Utc::now())
        .fetch_one(&mut *self.tx)
        .await;

        self.settle(written).await.map(Student::from)
    }

    async fn find_or_create_vip(&mut self, vip: &NewVip) -> Result<Vip, WriteError> {
        self.savepoint().await?;

        let written = sqlx::query_as::<_, DbVip>(
            r#"
            INSERT INTO vips (id, program_id, name, title, profile_url, ranking, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT (program_id, name)
            DO UPDATE SET name = EXCLUDED.name
            RETURNING id, program_id, name, title, profile_url, ranking, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(vip.program_id)
        .bind(&vip.name)
        .bind(&vip.title)
        .bind(&vip.profile_url)
        .bind(vip.ranking)
        .bind(Utc::now())
        .fetch_one(&mut *self.tx)
        .await;

        self.settle(written).await.map(Vip::from)
    }
}

#[async_trait]
impl UnitOfWork for PgBatch {
    async fn commit(self) -> eyre::Result<()> {
        self.tx.commit().await?;
        Ok(())
    }

    async fn rollback(self) -> eyre::Result<()> {
        self.tx.rollback().await?;
        Ok(())
    }
}
