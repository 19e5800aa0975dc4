use crate::models::DbProgram;
use chrono::{NaiveDate, Utc};
use eyre::Result;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

pub async fn create_program(
    pool: &Pool<Postgres>,
    department_id: Uuid,
    name: &str,
    default_appointment_length: i32,
    held_on_dates: &[NaiveDate],
) -> Result<DbProgram> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    tracing::debug!(
        "Creating program: id={}, department_id={}, name={}, held_on_dates={}",
        id,
        department_id,
        name,
        held_on_dates.len()
    );

    let program = sqlx::query_as::<_, DbProgram>(
        r#"
        INSERT INTO programs (id, department_id, name, default_appointment_length, held_on_dates, created_at)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING id, department_id, name, default_appointment_length, held_on_dates, created_at
        "#,
    )
    .bind(id)
    .bind(department_id)
    .bind(name)
    .bind(default_appointment_length)
    .bind(held_on_dates)
    .bind(now)
    .fetch_one(pool)
    .await?;

    Ok(program)
}

pub async fn get_program_by_id(pool: &Pool<Postgres>, id: Uuid) -> Result<Option<DbProgram>> {
    let program = sqlx::query_as::<_, DbProgram>(
        r#"
        SELECT id, department_id, name, default_appointment_length, held_on_dates, created_at
        FROM programs
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(program)
}
