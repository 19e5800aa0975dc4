use crate::models::DbStudent;
use eyre::Result;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

pub async fn get_student_by_id(pool: &Pool<Postgres>, id: Uuid) -> Result<Option<DbStudent>> {
    let student = sqlx::query_as::<_, DbStudent>(
        r#"
        SELECT id, program_id, email, first_name, last_name, umid, created_at
        FROM students
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(student)
}

/// Students of a program in report order
pub async fn get_students_by_program_id(pool: &Pool<Postgres>, program_id: Uuid) -> Result<Vec<DbStudent>> {
    let students = sqlx::query_as::<_, DbStudent>(
        r#"
        SELECT id, program_id, email, first_name, last_name, umid, created_at
        FROM students
        WHERE program_id = $1
        ORDER BY last_name ASC NULLS LAST, first_name ASC NULLS LAST, email ASC
        "#,
    )
    .bind(program_id)
    .fetch_all(pool)
    .await?;

    Ok(students)
}
