//! REST handlers for the doctor endpoints.
//!
//! Service calls are synchronous and may touch the filesystem, so each one runs on the blocking
//! thread pool via [`run_blocking`].

use crate::error::ApiError;
use crate::AppState;
use api_shared::{
    doctor_deleted, CreateDoctorReq, DoctorMessageRes, DoctorRes, ErrorRes, FieldErrorRes,
    HealthRes, HealthService, ListDoctorsRes, MessageRes, SearchParams, UpdateDoctorReq,
    DOCTOR_ADDED, DOCTOR_UPDATED, SPECIALTY_REQUIRED,
};
use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    response::Json,
};
use doctor_core::{DoctorError, DoctorResult};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        health,
        list_doctors,
        create_doctor,
        get_doctor,
        update_doctor,
        search_doctors,
        delete_doctor,
    ),
    components(schemas(
        HealthRes,
        DoctorRes,
        ListDoctorsRes,
        CreateDoctorReq,
        UpdateDoctorReq,
        DoctorMessageRes,
        MessageRes,
        ErrorRes,
        FieldErrorRes,
    ))
)]
pub struct ApiDoc;

async fn run_blocking<T, F>(f: F) -> Result<T, ApiError>
where
    F: FnOnce() -> DoctorResult<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))?
        .map_err(ApiError::from)
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check response", body = HealthRes)
    )
)]
/// Health check endpoint for monitoring and load balancers.
#[axum::debug_handler]
pub async fn health(State(_state): State<AppState>) -> Json<HealthRes> {
    Json(HealthService::check_health())
}

#[utoipa::path(
    get,
    path = "/v1/doctors/",
    responses(
        (status = 200, description = "All doctors", body = ListDoctorsRes),
        (status = 500, description = "Internal server error", body = ErrorRes)
    )
)]
/// List every doctor in store order.
#[axum::debug_handler]
pub async fn list_doctors(State(state): State<AppState>) -> Result<Json<ListDoctorsRes>, ApiError> {
    let service = state.doctor_service.clone();
    let doctors = run_blocking(move || service.list_all()).await?;
    Ok(Json(doctors.into()))
}

#[utoipa::path(
    post,
    path = "/v1/doctors",
    request_body = CreateDoctorReq,
    responses(
        (status = 201, description = "Doctor created", body = DoctorMessageRes),
        (status = 400, description = "Missing or invalid fields", body = ErrorRes),
        (status = 500, description = "Internal server error", body = ErrorRes)
    )
)]
/// Create a doctor; the identifier is assigned by the server.
#[axum::debug_handler]
pub async fn create_doctor(
    State(state): State<AppState>,
    payload: Result<Json<CreateDoctorReq>, JsonRejection>,
) -> Result<(StatusCode, Json<DoctorMessageRes>), ApiError> {
    let Json(req) = payload?;
    let service = state.doctor_service.clone();
    let doctor = run_blocking(move || service.create(req.into())).await?;
    Ok((
        StatusCode::CREATED,
        Json(DoctorMessageRes {
            message: DOCTOR_ADDED.into(),
            doctor: doctor.into(),
        }),
    ))
}

#[utoipa::path(
    get,
    path = "/v1/doctors/{id}",
    params(("id" = String, Path, description = "Doctor identifier, e.g. scd1")),
    responses(
        (status = 200, description = "Doctor found", body = DoctorRes),
        (status = 404, description = "Doctor not found", body = ErrorRes)
    )
)]
#[axum::debug_handler]
pub async fn get_doctor(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DoctorRes>, ApiError> {
    let service = state.doctor_service.clone();
    let doctor = run_blocking(move || service.get(&id)).await?;
    Ok(Json(doctor.into()))
}

#[utoipa::path(
    put,
    path = "/v1/doctors/{id}",
    params(("id" = String, Path, description = "Doctor identifier, e.g. scd1")),
    request_body = UpdateDoctorReq,
    responses(
        (status = 200, description = "Doctor updated", body = DoctorMessageRes),
        (status = 400, description = "Invalid phone or availability", body = ErrorRes),
        (status = 404, description = "Doctor not found", body = ErrorRes),
        (status = 500, description = "Internal server error", body = ErrorRes)
    )
)]
/// Update `phone` and/or `availability`. Other members of the body are ignored.
#[axum::debug_handler]
pub async fn update_doctor(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateDoctorReq>, JsonRejection>,
) -> Result<Json<DoctorMessageRes>, ApiError> {
    let Json(req) = payload?;
    let service = state.doctor_service.clone();
    let doctor = run_blocking(move || service.update(&id, req.into())).await?;
    Ok(Json(DoctorMessageRes {
        message: DOCTOR_UPDATED.into(),
        doctor: doctor.into(),
    }))
}

#[utoipa::path(
    get,
    path = "/v1/doctors/search",
    params(SearchParams),
    responses(
        (status = 200, description = "Matching doctors", body = ListDoctorsRes),
        (status = 400, description = "Missing specialty or malformed query string", body = ErrorRes),
        (status = 404, description = "No doctor matches", body = MessageRes)
    )
)]
/// Case-insensitive substring search over specialty.
#[axum::debug_handler]
pub async fn search_doctors(
    State(state): State<AppState>,
    params: Result<Query<SearchParams>, QueryRejection>,
) -> Result<Json<ListDoctorsRes>, ApiError> {
    let Query(params) = params?;
    let service = state.doctor_service.clone();
    let result = run_blocking(move || service.search_by_specialty(params.specialty.as_deref())).await;
    match result {
        Ok(doctors) => Ok(Json(doctors.into())),
        Err(ApiError::Core(DoctorError::Validation(fields))) => {
            Err(ApiError::bad_request(SPECIALTY_REQUIRED, fields))
        }
        Err(e) => Err(e),
    }
}

#[utoipa::path(
    delete,
    path = "/v1/doctors/{id}",
    params(("id" = String, Path, description = "Doctor identifier, e.g. scd1")),
    responses(
        (status = 200, description = "Doctor deleted", body = MessageRes),
        (status = 404, description = "Doctor not found", body = ErrorRes)
    )
)]
#[axum::debug_handler]
pub async fn delete_doctor(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageRes>, ApiError> {
    let service = state.doctor_service.clone();
    let deleted = run_blocking(move || service.delete(&id)).await?;
    Ok(Json(MessageRes {
        message: doctor_deleted(&deleted.to_string()),
    }))
}

pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
