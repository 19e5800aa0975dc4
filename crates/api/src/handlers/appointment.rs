use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;
use visitday_core::{
    errors::VisitError,
    models::appointment::{
        Appointment, AppointmentResponse, AppointmentSelection, AppointmentStatus,
        ClaimAppointmentRequest, SelectionOutcome, SelectionResponse,
    },
};

use super::load_program;
use crate::{middleware::error_handling::AppError, ApiState};

#[derive(Debug, Deserialize)]
pub struct AppointmentFilter {
    pub status: Option<AppointmentStatus>,
}

#[axum::debug_handler]
pub async fn list_appointments(
    State(state): State<Arc<ApiState>>,
    Path(program_id): Path<Uuid>,
    Query(filter): Query<AppointmentFilter>,
) -> Result<Json<Vec<AppointmentResponse>>, AppError> {
    load_program(&state.db_pool, program_id).await?;

    let appointments = visitday_db::repositories::appointment::get_appointments_by_program_id(
        &state.db_pool,
        program_id,
        filter.status,
    )
    .await
    .map_err(VisitError::Database)?;

    Ok(Json(
        appointments
            .into_iter()
            .map(|a| Appointment::from(a).into())
            .collect(),
    ))
}

#[axum::debug_handler]
pub async fn claim_appointment(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<ClaimAppointmentRequest>,
) -> Result<Json<SelectionResponse>, AppError> {
    let appointment = load_appointment(&state, id).await?;

    let student = visitday_db::repositories::student::get_student_by_id(&state.db_pool, payload.student_id)
        .await
        .map_err(VisitError::Database)?
        .ok_or_else(|| {
            VisitError::NotFound(format!("Student with ID {} not found", payload.student_id))
        })?;
    if student.program_id != appointment.program_id {
        return Err(VisitError::Validation(format!(
            "Student {} is not registered for the program of appointment {}",
            student.email, id
        ))
        .into());
    }

    let outcome = visitday_db::repositories::appointment::claim_appointment(&state.db_pool, id, student.id)
        .await
        .map_err(VisitError::Database)?;

    let response = into_response(id, outcome)?;
    info!("Appointment {} claimed by student {}", id, student.id);
    Ok(Json(response))
}

#[axum::debug_handler]
pub async fn release_appointment(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<SelectionResponse>, AppError> {
    let outcome = visitday_db::repositories::appointment::release_appointment(&state.db_pool, id)
        .await
        .map_err(VisitError::Database)?;

    let response = into_response(id, outcome)?;
    info!("Appointment {} released", id);
    Ok(Json(response))
}

#[axum::debug_handler]
pub async fn delete_appointment(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    let deleted = visitday_db::repositories::appointment::delete_appointment(&state.db_pool, id)
        .await
        .map_err(VisitError::Database)?;

    if !deleted {
        return Err(VisitError::NotFound(format!("Appointment with ID {} not found", id)).into());
    }
    Ok(StatusCode::NO_CONTENT)
}

/// Lists the claim/release history of a slot, oldest first. History outlives
/// the slot, so a deleted appointment still reports its trail.
#[axum::debug_handler]
pub async fn list_selections(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<AppointmentSelection>>, AppError> {
    let selections =
        visitday_db::repositories::appointment::get_selections_by_appointment_id(&state.db_pool, id)
            .await
            .map_err(VisitError::Database)?;

    Ok(Json(selections))
}

async fn load_appointment(state: &ApiState, id: Uuid) -> Result<Appointment, AppError> {
    let appointment = visitday_db::repositories::appointment::get_appointment_by_id(&state.db_pool, id)
        .await
        .map_err(VisitError::Database)?
        .ok_or_else(|| VisitError::NotFound(format!("Appointment with ID {} not found", id)))?;

    Ok(appointment.into())
}

fn into_response(id: Uuid, outcome: Option<SelectionOutcome>) -> Result<SelectionResponse, AppError> {
    match outcome {
        Some(SelectionOutcome::Applied { appointment, selection }) => Ok(SelectionResponse {
            appointment: appointment.into(),
            selection,
        }),
        Some(SelectionOutcome::Rejected(reason)) => Err(VisitError::Conflict(reason.to_string()).into()),
        None => Err(VisitError::NotFound(format!("Appointment with ID {} not found", id)).into()),
    }
}
