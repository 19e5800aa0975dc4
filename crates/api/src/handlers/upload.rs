use axum::{
    extract::{Multipart, Path, State},
    Json,
};
use std::sync::Arc;
use uuid::Uuid;
use visitday_core::{
    errors::VisitError,
    models::upload::{UploadKind, UploadResult},
    services::upload::{check_sheet, import_appointments, import_students, import_vips},
    spreadsheet::Sheet,
};
use visitday_db::repositories::batch::PgBatch;

use super::{load_program, load_vip};
use crate::{middleware::error_handling::AppError, ApiState};

/// Multipart field carrying the spreadsheet
pub const FILE_FIELD: &str = "file";

#[axum::debug_handler]
pub async fn upload_students(
    State(state): State<Arc<ApiState>>,
    Path(program_id): Path<Uuid>,
    multipart: Multipart,
) -> Result<Json<UploadResult>, AppError> {
    let program = load_program(&state.db_pool, program_id).await?;
    let sheet = read_sheet(multipart, UploadKind::Students).await?;

    let batch = PgBatch::begin(&state.db_pool)
        .await
        .map_err(VisitError::Database)?;
    Ok(Json(import_students(batch, program.id, &sheet).await))
}

#[axum::debug_handler]
pub async fn upload_vips(
    State(state): State<Arc<ApiState>>,
    Path(program_id): Path<Uuid>,
    multipart: Multipart,
) -> Result<Json<UploadResult>, AppError> {
    let program = load_program(&state.db_pool, program_id).await?;
    let sheet = read_sheet(multipart, UploadKind::Vips).await?;

    let batch = PgBatch::begin(&state.db_pool)
        .await
        .map_err(VisitError::Database)?;
    Ok(Json(import_vips(batch, program.id, &sheet).await))
}

#[axum::debug_handler]
pub async fn upload_appointments(
    State(state): State<Arc<ApiState>>,
    Path(vip_id): Path<Uuid>,
    multipart: Multipart,
) -> Result<Json<UploadResult>, AppError> {
    let vip = load_vip(&state.db_pool, vip_id).await?;
    let sheet = read_sheet(multipart, UploadKind::Appointments).await?;

    let batch = PgBatch::begin(&state.db_pool)
        .await
        .map_err(VisitError::Database)?;
    Ok(Json(import_appointments(batch, &vip, &sheet).await))
}

/// Pulls the `file` field out of the form and parses it by its filename.
async fn read_sheet(mut multipart: Multipart, kind: UploadKind) -> Result<Sheet, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| VisitError::Validation(format!("Malformed upload: {}", e)))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let filename = field.file_name().unwrap_or_default().to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| VisitError::Validation(format!("Malformed upload: {}", e)))?;

        let sheet = Sheet::read(&filename, &bytes).map_err(|e| VisitError::Validation(e.to_string()))?;
        check_sheet(&sheet, kind).map_err(VisitError::Validation)?;
        return Ok(sheet);
    }

    Err(VisitError::Validation(format!("Missing multipart field '{}'", FILE_FIELD)).into())
}
