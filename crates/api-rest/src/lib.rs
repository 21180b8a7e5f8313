//! # API REST
//!
//! REST API implementation for the doctor directory.
//!
//! Handles:
//! - HTTP endpoints with axum under the `/v1/doctors` prefix
//! - OpenAPI documentation served at `/api-docs/openapi.json`
//! - REST-specific concerns (JSON envelopes, status codes, CORS, request tracing)
//!
//! Uses `api-shared` for wire types and `doctor-core` for all data operations.

#![warn(rust_2018_idioms)]

pub mod error;
pub mod handlers;

use axum::{routing::get, Router};
use doctor_core::DoctorService;
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub use error::ApiError;
pub use handlers::ApiDoc;

/// Application state shared across REST API handlers.
#[derive(Clone)]
pub struct AppState {
    pub doctor_service: DoctorService,
}

/// Builds the router. Both `/v1/doctors` and `/v1/doctors/` accept list and create.
pub fn app(doctor_service: DoctorService) -> Router {
    use handlers::*;

    Router::new()
        .route("/health", get(health))
        .route("/v1/doctors", get(list_doctors).post(create_doctor))
        .route("/v1/doctors/", get(list_doctors).post(create_doctor))
        .route("/v1/doctors/search", get(search_doctors))
        .route(
            "/v1/doctors/:id",
            get(get_doctor).put(update_doctor).delete(delete_doctor),
        )
        .route("/api-docs/openapi.json", get(openapi_json))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(AppState { doctor_service })
}

/// Serves the API on an already-bound listener until the server stops.
///
/// # Errors
///
/// Returns the I/O error that stopped the server.
pub async fn serve(listener: TcpListener, doctor_service: DoctorService) -> std::io::Result<()> {
    axum::serve(listener, app(doctor_service)).await
}
