//! # VisitDay API
//!
//! HTTP surface for visit-day scheduling: departments, programs, VIPs,
//! appointment slots, spreadsheet uploads and CSV reports.
//!
//! Routes live in [`routes`], one module per resource, and call into
//! [`handlers`]. Handlers talk to the `visitday-db` repositories and run the
//! `visitday-core` services; every failure is rendered by
//! [`middleware::error_handling::AppError`].

pub mod config;
pub mod handlers;
pub mod middleware;
pub mod routes;

use std::{sync::Arc, time::Duration};

use axum::{
    error_handling::HandleErrorLayer,
    extract::DefaultBodyLimit,
    http::{header, HeaderValue, Method, StatusCode},
    BoxError, Router,
};
use eyre::{Result, WrapErr};
use sqlx::PgPool;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tracing::info;
use tracing_subscriber::FmtSubscriber;

/// State shared by every handler
pub struct ApiState {
    pub db_pool: PgPool,
}

/// Builds the router with every endpoint attached to `state`.
pub fn app(state: Arc<ApiState>) -> Router {
    Router::new()
        .merge(routes::health::routes())
        .merge(routes::program::routes())
        .merge(routes::vip::routes())
        .merge(routes::appointment::routes())
        .merge(routes::upload::routes())
        .merge(routes::report::routes())
        .with_state(state)
}

/// Installs logging, wraps [`app`] in the configured layers and serves it
/// until the listener fails.
pub async fn start_server(config: config::ApiConfig, db_pool: PgPool) -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let mut app = app(Arc::new(ApiState { db_pool }))
        .layer(DefaultBodyLimit::max(config.max_upload_bytes));

    if let Some(origins) = &config.cors_origins {
        app = app.layer(cors_layer(origins)?);
    }

    let app = app.layer(
        ServiceBuilder::new()
            .layer(HandleErrorLayer::new(|_: BoxError| async {
                StatusCode::REQUEST_TIMEOUT
            }))
            .timeout(Duration::from_secs(config.request_timeout)),
    );

    let addr = config.server_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!(
        "VisitDay API listening on http://{} (upload limit {} bytes)",
        addr, config.max_upload_bytes
    );
    axum::serve(listener, app).await?;

    Ok(())
}

fn cors_layer(origins: &[String]) -> Result<CorsLayer> {
    let origins = origins
        .iter()
        .map(|origin| origin.parse::<HeaderValue>())
        .collect::<Result<Vec<_>, _>>()
        .wrap_err("Invalid API_CORS_ORIGINS value")?;

    Ok(CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .expose_headers([header::CONTENT_DISPOSITION])
        .allow_origin(origins)
        .allow_credentials(true))
}
