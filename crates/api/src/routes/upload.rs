use axum::{routing::post, Router};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/api/programs/:id/uploads/students",
            post(handlers::upload::upload_students),
        )
        .route(
            "/api/programs/:id/uploads/vips",
            post(handlers::upload::upload_vips),
        )
        .route(
            "/api/vips/:id/uploads/appointments",
            post(handlers::upload::upload_appointments),
        )
}
