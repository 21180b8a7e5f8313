//! Mapping from core errors to HTTP responses.
//!
//! | Core error                 | Status | Body                         |
//! |----------------------------|--------|------------------------------|
//! | `Validation`               | 400    | `{error, fields}`            |
//! | `NotFound`                 | 404    | `{error: "Doctor not found"}`|
//! | `NoMatches`                | 404    | `{message}`                  |
//! | anything else              | 500    | `{error: "Internal error"}`  |
//!
//! Body and query strings that axum cannot decode are 400 with the same `{error, fields}` shape.

use api_shared::{
    no_doctors_with_specialty, ErrorRes, FieldErrorRes, MessageRes, DOCTOR_NOT_FOUND,
};
use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use doctor_core::{DoctorError, FieldError};

#[derive(Debug)]
pub enum ApiError {
    Core(DoctorError),
    /// A rejected request whose message differs from the core error text.
    BadRequest {
        message: String,
        fields: Vec<FieldError>,
    },
    /// The blocking task running a service call did not complete.
    Internal(String),
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>, fields: Vec<FieldError>) -> Self {
        Self::BadRequest {
            message: message.into(),
            fields,
        }
    }
}

impl From<DoctorError> for ApiError {
    fn from(err: DoctorError) -> Self {
        Self::Core(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::bad_request(
            "Request body must be a JSON object",
            vec![FieldError::new("body", rejection.body_text())],
        )
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::bad_request(
            "Invalid query string",
            vec![FieldError::new("query", rejection.body_text())],
        )
    }
}

fn bad_request_body(message: String, fields: Vec<FieldError>) -> ErrorRes {
    ErrorRes {
        error: message,
        fields: fields.into_iter().map(FieldErrorRes::from).collect(),
    }
}

fn internal_error() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorRes::new("Internal error")),
    )
        .into_response()
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Core(DoctorError::Validation(fields)) => (
                StatusCode::BAD_REQUEST,
                Json(bad_request_body("Invalid doctor data".into(), fields)),
            )
                .into_response(),
            ApiError::Core(DoctorError::NotFound(_)) => {
                (StatusCode::NOT_FOUND, Json(ErrorRes::new(DOCTOR_NOT_FOUND))).into_response()
            }
            ApiError::Core(DoctorError::NoMatches(query)) => (
                StatusCode::NOT_FOUND,
                Json(MessageRes {
                    message: no_doctors_with_specialty(&query),
                }),
            )
                .into_response(),
            ApiError::Core(err) => {
                if err.is_store_error() {
                    tracing::error!("Record store error: {:?}", err);
                } else {
                    tracing::error!("Doctor service error: {:?}", err);
                }
                internal_error()
            }
            ApiError::BadRequest { message, fields } => (
                StatusCode::BAD_REQUEST,
                Json(bad_request_body(message, fields)),
            )
                .into_response(),
            ApiError::Internal(reason) => {
                tracing::error!("Request task failed: {}", reason);
                internal_error()
            }
        }
    }
}
