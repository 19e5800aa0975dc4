use crate::models::DbDepartment;
use chrono::Utc;
use eyre::Result;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

pub async fn create_department(pool: &Pool<Postgres>, name: &str) -> Result<DbDepartment> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    let department = sqlx::query_as::<_, DbDepartment>(
        r#"
        INSERT INTO departments (id, name, created_at)
        VALUES ($1, $2, $3)
        RETURNING id, name, created_at
        "#,
    )
    .bind(id)
    .bind(name)
    .bind(now)
    .fetch_one(pool)
    .await?;

    Ok(department)
}

pub async fn get_department_by_id(pool: &Pool<Postgres>, id: Uuid) -> Result<Option<DbDepartment>> {
    let department = sqlx::query_as::<_, DbDepartment>(
        r#"
        SELECT id, name, created_at
        FROM departments
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(department)
}
