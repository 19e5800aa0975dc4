use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;
use uuid::Uuid;
use visitday_core::{
    errors::VisitError,
    models::department::{CreateDepartmentRequest, Department},
};

use super::require_text;
use crate::{
    middleware::error_handling::AppError,
    ApiState,
};

#[axum::debug_handler]
pub async fn create_department(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<CreateDepartmentRequest>,
) -> Result<Json<Department>, AppError> {
    require_text(&payload.name, "Department name")?;

    let department =
        visitday_db::repositories::department::create_department(&state.db_pool, payload.name.trim())
            .await
            .map_err(VisitError::Database)?;

    Ok(Json(department.into()))
}

#[axum::debug_handler]
pub async fn get_department(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<Department>, AppError> {
    let department = visitday_db::repositories::department::get_department_by_id(&state.db_pool, id)
        .await
        .map_err(VisitError::Database)?
        .ok_or_else(|| VisitError::NotFound(format!("Department with ID {} not found", id)))?;

    Ok(Json(department.into()))
}
