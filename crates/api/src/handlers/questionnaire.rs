use axum::{
    extract::{Path, State},
    Json,
};
use std::collections::HashSet;
use std::sync::Arc;
use uuid::Uuid;
use visitday_core::{
    errors::VisitError,
    models::questionnaire::{
        CreateQuestionnaireRequest, QuestionnaireResponse, SubmitResponsesRequest,
        SubmitResponsesResponse,
    },
};

use super::{load_program, require_text};
use crate::{middleware::error_handling::AppError, ApiState};

#[axum::debug_handler]
pub async fn create_questionnaire(
    State(state): State<Arc<ApiState>>,
    Path(program_id): Path<Uuid>,
    Json(payload): Json<CreateQuestionnaireRequest>,
) -> Result<Json<QuestionnaireResponse>, AppError> {
    require_text(&payload.title, "Questionnaire title")?;
    if payload.questions.iter().any(|q| q.trim().is_empty()) {
        return Err(VisitError::Validation("Questions must not be blank".to_string()).into());
    }
    load_program(&state.db_pool, program_id).await?;

    let (questionnaire, questions) = visitday_db::repositories::questionnaire::create_questionnaire(
        &state.db_pool,
        program_id,
        payload.title.trim(),
        &payload.questions,
    )
    .await
    .map_err(VisitError::Database)?;

    Ok(Json(QuestionnaireResponse {
        id: questionnaire.id,
        program_id: questionnaire.program_id,
        title: questionnaire.title,
        questions: questions.into_iter().map(Into::into).collect(),
    }))
}

#[axum::debug_handler]
pub async fn submit_responses(
    State(state): State<Arc<ApiState>>,
    Path(questionnaire_id): Path<Uuid>,
    Json(payload): Json<SubmitResponsesRequest>,
) -> Result<Json<SubmitResponsesResponse>, AppError> {
    let questionnaire =
        visitday_db::repositories::questionnaire::get_questionnaire_by_id(&state.db_pool, questionnaire_id)
            .await
            .map_err(VisitError::Database)?
            .ok_or_else(|| {
                VisitError::NotFound(format!("Questionnaire with ID {} not found", questionnaire_id))
            })?;

    let student = visitday_db::repositories::student::get_student_by_id(&state.db_pool, payload.student_id)
        .await
        .map_err(VisitError::Database)?
        .ok_or_else(|| {
            VisitError::NotFound(format!("Student with ID {} not found", payload.student_id))
        })?;
    if student.program_id != questionnaire.program_id {
        return Err(VisitError::Validation(format!(
            "Student {} is not registered for the program of questionnaire {}",
            student.email, questionnaire_id
        ))
        .into());
    }

    let known: HashSet<Uuid> =
        visitday_db::repositories::questionnaire::get_questions_by_questionnaire_id(&state.db_pool, questionnaire_id)
            .await
            .map_err(VisitError::Database)?
            .into_iter()
            .map(|q| q.id)
            .collect();
    if let Some(unknown) = payload.answers.iter().find(|a| !known.contains(&a.question_id)) {
        return Err(VisitError::Validation(format!(
            "Question {} does not belong to questionnaire {}",
            unknown.question_id, questionnaire_id
        ))
        .into());
    }

    let saved = visitday_db::repositories::questionnaire::save_answers(&state.db_pool, student.id, &payload.answers)
        .await
        .map_err(VisitError::Database)?;

    Ok(Json(SubmitResponsesResponse {
        questionnaire_id,
        student_id: student.id,
        saved,
    }))
}
