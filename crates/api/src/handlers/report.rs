use axum::{
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use uuid::Uuid;
use visitday_core::{
    errors::VisitError,
    models::program::Program,
    reports::{render_appointment_report, render_student_report},
};

use super::load_program;
use crate::{middleware::error_handling::AppError, ApiState};

#[axum::debug_handler]
pub async fn student_report(
    State(state): State<Arc<ApiState>>,
    Path(program_id): Path<Uuid>,
) -> Result<Response, AppError> {
    let program = load_program(&state.db_pool, program_id).await?;

    let (questions, rows) = visitday_db::repositories::report::student_report(&state.db_pool, program.id)
        .await
        .map_err(VisitError::Database)?;
    let body = render_student_report(&questions, &rows).map_err(|e| VisitError::Internal(Box::new(e)))?;

    Ok(csv_attachment(&program, "students", body))
}

#[axum::debug_handler]
pub async fn appointment_report(
    State(state): State<Arc<ApiState>>,
    Path(program_id): Path<Uuid>,
) -> Result<Response, AppError> {
    let program = load_program(&state.db_pool, program_id).await?;

    let rows = visitday_db::repositories::report::appointment_report(&state.db_pool, program.id)
        .await
        .map_err(VisitError::Database)?;
    let body = render_appointment_report(&rows).map_err(|e| VisitError::Internal(Box::new(e)))?;

    Ok(csv_attachment(&program, "appointments", body))
}

fn csv_attachment(program: &Program, report: &str, body: Vec<u8>) -> Response {
    let disposition = format!(
        "attachment; filename=\"{}-{}.csv\"",
        report_slug(&program.name),
        report
    );

    (
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        body,
    )
        .into_response()
}

/// Lowercases a program name into a filename-safe slug.
pub fn report_slug(name: &str) -> String {
    let slug = name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_lowercase() } else { '-' })
        .collect::<String>()
        .split('-')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("-");

    if slug.is_empty() { "program".to_string() } else { slug }
}
