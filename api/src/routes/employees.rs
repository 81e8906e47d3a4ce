//! The employee routes.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use db::{
    models::{Employee, EmployeeFields},
    store::employees,
};
use serde::{Deserialize, Serialize};
use tracing::instrument;
use utoipa::{IntoParams, ToSchema};

use crate::{AppState, error::Result};

/// Fields accepted when creating an employee.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateEmployee {
    pub employee_id: String,
    pub first_name: String,
    pub last_name: String,
    pub phone_number: String,
}

/// Fields accepted when replacing an employee.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UpdateEmployee {
    pub first_name: String,
    pub last_name: String,
    pub phone_number: String,
}

/// Name pair for the case-insensitive search.
#[derive(Debug, Deserialize, IntoParams)]
pub struct NameQuery {
    pub first_name: String,
    pub last_name: String,
}

/// List all employees
#[utoipa::path(
    get,
    path = "/employees",
    responses(
        (status = 200, description = "All employees, ordered by surname", body = Vec<Employee>)
    )
)]
#[instrument(skip(db))]
#[axum::debug_handler]
pub async fn list(State(AppState { db, .. }): State<AppState>) -> Result<Json<Vec<Employee>>> {
    Ok(Json(employees::list(&db).await?))
}

/// Search employees by first and last name
///
/// Matching is case-insensitive equality on both fields.
#[utoipa::path(
    get,
    path = "/employees/search",
    params(NameQuery),
    responses((status = 200, description = "Matching employees", body = Vec<Employee>))
)]
#[instrument(skip(db))]
#[axum::debug_handler]
pub async fn search(
    State(AppState { db, .. }): State<AppState>,
    Query(query): Query<NameQuery>,
) -> Result<Json<Vec<Employee>>> {
    Ok(Json(
        employees::search(&db, &query.first_name, &query.last_name).await?,
    ))
}

/// Add a new employee
///
/// The employee id comes from the caller and is trusted to be unique.
#[utoipa::path(
    post,
    path = "/employees",
    request_body = CreateEmployee,
    responses((status = 200, description = "Confirmation text"))
)]
#[instrument(skip(db, payload))]
#[axum::debug_handler]
pub async fn create(
    State(AppState { db, .. }): State<AppState>,
    Json(payload): Json<CreateEmployee>,
) -> Result<&'static str> {
    let fields = EmployeeFields {
        first_name: payload.first_name,
        last_name: payload.last_name,
        phone_number: payload.phone_number,
    };
    employees::insert(&db, &payload.employee_id, &fields).await?;

    Ok("Employee added successfully")
}

/// Replace an employee's mutable fields
#[utoipa::path(
    put,
    path = "/employees/{id}",
    params(("id" = String, Path, description = "Employee id")),
    request_body = UpdateEmployee,
    responses((status = 200, description = "Confirmation text"))
)]
#[instrument(skip(db, payload))]
#[axum::debug_handler]
pub async fn replace(
    State(AppState { db, .. }): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateEmployee>,
) -> Result<&'static str> {
    let fields = EmployeeFields {
        first_name: payload.first_name,
        last_name: payload.last_name,
        phone_number: payload.phone_number,
    };
    employees::update(&db, &id, &fields).await?;

    Ok("Employee updated successfully")
}

/// Delete an employee
#[utoipa::path(
    delete,
    path = "/employees/{id}",
    params(("id" = String, Path, description = "Employee id")),
    responses((status = 200, description = "Confirmation text"))
)]
#[instrument(skip(db))]
#[axum::debug_handler]
pub async fn remove(
    State(AppState { db, .. }): State<AppState>,
    Path(id): Path<String>,
) -> Result<&'static str> {
    employees::delete(&db, &id).await?;

    Ok("Employee deleted successfully")
}
