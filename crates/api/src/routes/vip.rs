use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/api/programs/:id/vips",
            get(handlers::vip::list_vips).post(handlers::vip::create_vip),
        )
        .route("/api/vips/:id/schedule", post(handlers::schedule::create_schedule))
}
