//! The doctor routes.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use db::{
    models::{Doctor, DoctorFields},
    store::doctors,
};
use serde::{Deserialize, Serialize};
use tracing::instrument;
use utoipa::{IntoParams, ToSchema};

use crate::{AppState, error::Result};

/// Fields accepted when creating a doctor.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateDoctor {
    pub doctor_id: String,
    pub first_name: String,
    pub last_name: String,
    pub phone_number: String,
    pub email: String,
}

/// Fields accepted when replacing a doctor.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UpdateDoctor {
    pub first_name: String,
    pub last_name: String,
    pub phone_number: String,
    pub email: String,
}

/// Name pair for the case-insensitive search.
#[derive(Debug, Deserialize, IntoParams)]
pub struct NameQuery {
    pub first_name: String,
    pub last_name: String,
}

/// List all doctors
#[utoipa::path(
    get,
    path = "/doctors",
    responses(
        (status = 200, description = "All doctors, ordered by surname", body = Vec<Doctor>)
    )
)]
#[instrument(skip(db))]
#[axum::debug_handler]
pub async fn list(State(AppState { db, .. }): State<AppState>) -> Result<Json<Vec<Doctor>>> {
    Ok(Json(doctors::list(&db).await?))
}

/// Search doctors by first and last name
///
/// Matching is case-insensitive equality on both fields, so querying
/// `john`/`smith` finds a stored `John`/`Smith`.
#[utoipa::path(
    get,
    path = "/doctors/search",
    params(NameQuery),
    responses((status = 200, description = "Matching doctors", body = Vec<Doctor>))
)]
#[instrument(skip(db))]
#[axum::debug_handler]
pub async fn search(
    State(AppState { db, .. }): State<AppState>,
    Query(query): Query<NameQuery>,
) -> Result<Json<Vec<Doctor>>> {
    Ok(Json(
        doctors::search(&db, &query.first_name, &query.last_name).await?,
    ))
}

/// Add a new doctor
#[utoipa::path(
    post,
    path = "/doctors",
    request_body = CreateDoctor,
    responses((status = 200, description = "Confirmation text"))
)]
#[instrument(skip(db, payload))]
#[axum::debug_handler]
pub async fn create(
    State(AppState { db, .. }): State<AppState>,
    Json(payload): Json<CreateDoctor>,
) -> Result<&'static str> {
    let fields = DoctorFields {
        first_name: payload.first_name,
        last_name: payload.last_name,
        phone_number: payload.phone_number,
        email: payload.email,
    };
    doctors::insert(&db, &payload.doctor_id, &fields).await?;

    Ok("Doctor added successfully.")
}

/// Replace a doctor's mutable fields
#[utoipa::path(
    put,
    path = "/doctors/{id}",
    params(("id" = String, Path, description = "Doctor id")),
    request_body = UpdateDoctor,
    responses((status = 200, description = "Confirmation text"))
)]
#[instrument(skip(db, payload))]
#[axum::debug_handler]
pub async fn replace(
    State(AppState { db, .. }): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateDoctor>,
) -> Result<&'static str> {
    let fields = DoctorFields {
        first_name: payload.first_name,
        last_name: payload.last_name,
        phone_number: payload.phone_number,
        email: payload.email,
    };
    doctors::update(&db, &id, &fields).await?;

    Ok("Doctor updated successfully.")
}

/// Delete a doctor
#[utoipa::path(
    delete,
    path = "/doctors/{id}",
    params(("id" = String, Path, description = "Doctor id")),
    responses((status = 200, description = "Confirmation text"))
)]
#[instrument(skip(db))]
#[axum::debug_handler]
pub async fn remove(
    State(AppState { db, .. }): State<AppState>,
    Path(id): Path<String>,
) -> Result<&'static str> {
    doctors::delete(&db, &id).await?;

    Ok("Doctor deleted successfully.")
}
