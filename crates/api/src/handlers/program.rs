use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;
use visitday_core::{
    errors::VisitError,
    models::program::{CreateProgramRequest, Program},
};

use super::{load_program, require_text};
use crate::{
    middleware::error_handling::AppError,
    ApiState,
};

#[axum::debug_handler]
pub async fn create_program(
    State(state): State<Arc<ApiState>>,
    Path(department_id): Path<Uuid>,
    Json(payload): Json<CreateProgramRequest>,
) -> Result<Json<Program>, AppError> {
    require_text(&payload.name, "Program name")?;
    if payload.default_appointment_length <= 0 {
        return Err(VisitError::Validation(format!(
            "Default appointment length must be a positive number of minutes, got {}",
            payload.default_appointment_length
        ))
        .into());
    }

    visitday_db::repositories::department::get_department_by_id(&state.db_pool, department_id)
        .await
        .map_err(VisitError::Database)?
        .ok_or_else(|| {
            VisitError::NotFound(format!("Department with ID {} not found", department_id))
        })?;

    let mut held_on_dates = payload.held_on_dates.clone();
    held_on_dates.sort();
    held_on_dates.dedup();

    let program = visitday_db::repositories::program::create_program(
        &state.db_pool,
        department_id,
        payload.name.trim(),
        payload.default_appointment_length,
        &held_on_dates,
    )
    .await
    .map_err(VisitError::Database)?;

    info!("Created program {} ({})", program.name, program.id);
    Ok(Json(program.into()))
}

#[axum::debug_handler]
pub async fn get_program(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<Program>, AppError> {
    Ok(Json(load_program(&state.db_pool, id).await?))
}
