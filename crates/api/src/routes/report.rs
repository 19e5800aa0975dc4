use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/api/programs/:id/questionnaires",
            post(handlers::questionnaire::create_questionnaire),
        )
        .route(
            "/api/questionnaires/:id/responses",
            post(handlers::questionnaire::submit_responses),
        )
        .route(
            "/api/programs/:id/reports/students",
            get(handlers::report::student_report),
        )
        .route(
            "/api/programs/:id/reports/appointments",
            get(handlers::report::appointment_report),
        )
}
