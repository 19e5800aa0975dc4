use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;
use uuid::Uuid;
use visitday_core::{
    errors::VisitError,
    models::vip::{CreateVipRequest, NewVip, Vip},
};

use super::{load_program, require_text};
use crate::{
    middleware::error_handling::{conflict_on_duplicate, AppError},
    ApiState,
};

#[axum::debug_handler]
pub async fn create_vip(
    State(state): State<Arc<ApiState>>,
    Path(program_id): Path<Uuid>,
    Json(payload): Json<CreateVipRequest>,
) -> Result<Json<Vip>, AppError> {
    require_text(&payload.name, "VIP name")?;
    let program = load_program(&state.db_pool, program_id).await?;

    let new_vip = NewVip {
        program_id: program.id,
        name: payload.name.trim().to_string(),
        title: payload.title,
        profile_url: payload.profile_url,
        ranking: payload.ranking,
    };

    let vip = visitday_db::repositories::vip::create_vip(&state.db_pool, &new_vip)
        .await
        .map_err(|e| {
            conflict_on_duplicate(
                e,
                format!("A VIP named '{}' already exists in program '{}'", new_vip.name, program.name),
            )
        })?;

    Ok(Json(vip.into()))
}

#[axum::debug_handler]
pub async fn list_vips(
    State(state): State<Arc<ApiState>>,
    Path(program_id): Path<Uuid>,
) -> Result<Json<Vec<Vip>>, AppError> {
    load_program(&state.db_pool, program_id).await?;

    let vips = visitday_db::repositories::vip::get_vips_by_program_id(&state.db_pool, program_id)
        .await
        .map_err(VisitError::Database)?;

    Ok(Json(vips.into_iter().map(Into::into).collect()))
}
