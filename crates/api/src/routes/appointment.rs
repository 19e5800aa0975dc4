use axum::{
    routing::{delete, get, post},
    Router,
};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/api/programs/:id/appointments",
            get(handlers::appointment::list_appointments),
        )
        .route(
            "/api/appointments/:id",
            delete(handlers::appointment::delete_appointment),
        )
        .route(
            "/api/appointments/:id/claim",
            post(handlers::appointment::claim_appointment),
        )
        .route(
            "/api/appointments/:id/release",
            post(handlers::appointment::release_appointment),
        )
        .route(
            "/api/appointments/:id/selections",
            get(handlers::appointment::list_selections),
        )
}
