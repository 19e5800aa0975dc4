use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/api/departments", post(handlers::department::create_department))
        .route("/api/departments/:id", get(handlers::department::get_department))
        .route(
            "/api/departments/:id/programs",
            post(handlers::program::create_program),
        )
        .route("/api/programs/:id", get(handlers::program::get_program))
}
