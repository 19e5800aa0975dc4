pub mod appointment;
pub mod department;
pub mod program;
pub mod questionnaire;
pub mod report;
pub mod schedule;
pub mod upload;
pub mod vip;

use sqlx::PgPool;
use uuid::Uuid;
use visitday_core::{
    errors::VisitError,
    models::{program::Program, vip::Vip},
};

use crate::middleware::error_handling::AppError;

pub(crate) async fn load_program(pool: &PgPool, id: Uuid) -> Result<Program, AppError> {
    let program = visitday_db::repositories::program::get_program_by_id(pool, id)
        .await
        .map_err(VisitError::Database)?
        .ok_or_else(|| VisitError::NotFound(format!("Program with ID {} not found", id)))?;

    Ok(program.into())
}

pub(crate) async fn load_vip(pool: &PgPool, id: Uuid) -> Result<Vip, AppError> {
    let vip = visitday_db::repositories::vip::get_vip_by_id(pool, id)
        .await
        .map_err(VisitError::Database)?
        .ok_or_else(|| VisitError::NotFound(format!("VIP with ID {} not found", id)))?;

    Ok(vip.into())
}

pub(crate) fn require_text(value: &str, field: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(VisitError::Validation(format!("{} is required", field)).into());
    }
    Ok(())
}
