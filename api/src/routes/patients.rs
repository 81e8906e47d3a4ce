//! The patient routes.
//!
//! Patients carry two free-text columns (allergies, medical history). Reads
//! return them materialized; absent values come back as the literal `"None"`.

use axum::{
    Json,
    extract::{Path, State},
};
use db::{
    dates, freetext,
    models::{Patient, PatientFields},
    store::patients,
};
use serde::{Deserialize, Serialize};
use tracing::instrument;
use utoipa::ToSchema;

use crate::{
    AppState,
    error::{AppError, Result},
};

/// Fields accepted when creating a patient. Keys keep the UPPERCASE casing
/// the existing frontend sends.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub struct CreatePatient {
    pub patient_id: String,
    pub first_name: String,
    pub last_name: String,
    /// Birth date in `YYYY-MM-DD`.
    pub bday: String,
    pub gender: String,
    pub address: String,
    pub phone_number: String,
    pub allergies: Option<String>,
    pub medical_history: Option<String>,
}

/// Fields accepted when replacing a patient.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub struct UpdatePatient {
    pub first_name: String,
    pub last_name: String,
    pub bday: String,
    pub gender: String,
    pub address: String,
    pub phone_number: String,
    pub allergies: Option<String>,
    pub medical_history: Option<String>,
}

fn fields(payload: UpdatePatient) -> Result<PatientFields> {
    let bday = dates::parse_iso(&payload.bday).map_err(eyre::Report::new)?;
    Ok(PatientFields {
        first_name: payload.first_name,
        last_name: payload.last_name,
        bday,
        gender: payload.gender,
        address: payload.address,
        phone_number: payload.phone_number,
        allergies: freetext::normalize(payload.allergies),
        medical_history: freetext::normalize(payload.medical_history),
    })
}

/// List all patients
#[utoipa::path(
    get,
    path = "/patients",
    responses(
        (status = 200, description = "All patients, ordered by id", body = Vec<Patient>)
    )
)]
#[instrument(skip(db))]
#[axum::debug_handler]
pub async fn list(State(AppState { db, .. }): State<AppState>) -> Result<Json<Vec<Patient>>> {
    Ok(Json(patients::list(&db).await?))
}

/// Get a single patient
#[utoipa::path(
    get,
    path = "/patients/{id}",
    params(("id" = String, Path, description = "Patient id")),
    responses(
        (status = 200, description = "The patient", body = Patient),
        (status = 404, description = "No patient with this id"),
    )
)]
#[instrument(skip(db))]
#[axum::debug_handler]
pub async fn get(
    State(AppState { db, .. }): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Patient>> {
    patients::get(&db, &id)
        .await?
        .map(Json)
        .ok_or(AppError::NotFound("Patient not found."))
}

/// Add a new patient
#[utoipa::path(
    post,
    path = "/patients",
    request_body = CreatePatient,
    responses((status = 200, description = "Confirmation text"))
)]
#[instrument(skip(db, payload))]
#[axum::debug_handler]
pub async fn create(
    State(AppState { db, .. }): State<AppState>,
    Json(payload): Json<CreatePatient>,
) -> Result<&'static str> {
    let id = payload.patient_id;
    let fields = fields(UpdatePatient {
        first_name: payload.first_name,
        last_name: payload.last_name,
        bday: payload.bday,
        gender: payload.gender,
        address: payload.address,
        phone_number: payload.phone_number,
        allergies: payload.allergies,
        medical_history: payload.medical_history,
    })?;
    patients::insert(&db, &id, &fields).await?;

    Ok("Patient added successfully.")
}

/// Replace a patient's mutable fields
#[utoipa::path(
    put,
    path = "/patients/{id}",
    params(("id" = String, Path, description = "Patient id")),
    request_body = UpdatePatient,
    responses((status = 200, description = "Confirmation text"))
)]
#[instrument(skip(db, payload))]
#[axum::debug_handler]
pub async fn replace(
    State(AppState { db, .. }): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<UpdatePatient>,
) -> Result<&'static str> {
    let fields = fields(payload)?;
    patients::update(&db, &id, &fields).await?;

    Ok("Patient updated successfully")
}

/// Delete a patient
#[utoipa::path(
    delete,
    path = "/patients/{id}",
    params(("id" = String, Path, description = "Patient id")),
    responses((status = 200, description = "Confirmation text"))
)]
#[instrument(skip(db))]
#[axum::debug_handler]
pub async fn remove(
    State(AppState { db, .. }): State<AppState>,
    Path(id): Path<String>,
) -> Result<&'static str> {
    patients::delete(&db, &id).await?;

    Ok("Patient deleted successfully.")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload() -> UpdatePatient {
        UpdatePatient {
            first_name: "Marie".to_string(),
            last_name: "Lux".to_string(),
            bday: "1998-04-17".to_string(),
            gender: "female".to_string(),
            address: "12 High St".to_string(),
            phone_number: "555-0199".to_string(),
            allergies: Some(String::new()),
            medical_history: None,
        }
    }

    #[test]
    fn fields_parse_the_birth_date() {
        let fields = fields(payload()).unwrap();
        assert_eq!(
            fields.bday,
            chrono::NaiveDate::from_ymd_opt(1998, 4, 17).unwrap()
        );
    }

    #[test]
    fn fields_fold_empty_free_text_to_null() {
        let fields = fields(payload()).unwrap();
        assert_eq!(fields.allergies, None);
        assert_eq!(fields.medical_history, None);
    }

    #[test]
    fn fields_reject_unparseable_birth_dates() {
        let mut bad = payload();
        bad.bday = "17/04/1998".to_string();
        assert!(fields(bad).is_err());
    }
}
