use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;
use visitday_core::{
    errors::VisitError,
    models::schedule::{CreateScheduleRequest, ScheduleResult},
    services::schedule_creator,
};
use visitday_db::repositories::batch::PgBatch;

use super::{load_program, load_vip};
use crate::{middleware::error_handling::AppError, ApiState};

/// Runs the schedule creator for one VIP. Validation problems and rejected
/// slots come back inside the result body rather than as an error status.
#[axum::debug_handler]
pub async fn create_schedule(
    State(state): State<Arc<ApiState>>,
    Path(vip_id): Path<Uuid>,
    Json(payload): Json<CreateScheduleRequest>,
) -> Result<Json<ScheduleResult>, AppError> {
    let vip = load_vip(&state.db_pool, vip_id).await?;
    let program = load_program(&state.db_pool, vip.program_id).await?;

    let batch = PgBatch::begin(&state.db_pool)
        .await
        .map_err(VisitError::Database)?;
    let result = schedule_creator::create_schedule(batch, &program, &vip, &payload.days).await;

    info!(
        "Schedule for VIP {}: {} appointments created, {} errors",
        vip.id,
        result.appointments.len(),
        result.errors.len()
    );
    Ok(Json(result))
}
