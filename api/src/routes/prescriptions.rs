//! The prescription routes, including the read-only joined projection used
//! by the dispensing panel.

use axum::{
    Json,
    extract::{Path, State},
};
use db::{
    dates, freetext,
    models::{Prescription, PrescriptionDetails, PrescriptionFields},
    store::prescriptions,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::instrument;
use utoipa::ToSchema;

use crate::{
    AppState, coerce,
    error::{AppError, Result},
};

const INVALID_IDS: &str = "Invalid or missing `ids` payload";

/// Fields accepted when creating a prescription. Keys keep the UPPERCASE
/// casing the existing frontend sends.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub struct CreatePrescription {
    pub prescription_id: String,
    pub doctor_id: String,
    pub patient_id: String,
    #[schema(value_type = Object)]
    pub med_id: Value,
    #[schema(value_type = Object)]
    pub quantity: Value,
    /// Optional filling date in `YYYY-MM-DD`; empty means not filled yet.
    pub date_of_filling: Option<String>,
    pub dosage: Option<String>,
}

/// Fields accepted when replacing a prescription.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub struct UpdatePrescription {
    pub doctor_id: String,
    pub patient_id: String,
    #[schema(value_type = Object)]
    pub med_id: Value,
    #[schema(value_type = Object)]
    pub quantity: Value,
    pub date_of_filling: Option<String>,
    pub dosage: Option<String>,
}

/// Body of the batch delete route.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PrescriptionIdList {
    pub ids: Vec<String>,
}

fn fields(payload: UpdatePrescription) -> Result<PrescriptionFields> {
    let date_of_filling = match payload.date_of_filling.as_deref() {
        Some(raw) if !raw.is_empty() => Some(dates::parse_iso(raw).map_err(eyre::Report::new)?),
        _ => None,
    };

    Ok(PrescriptionFields {
        doctor_id: payload.doctor_id,
        patient_id: payload.patient_id,
        med_id: coerce::as_int("MED_ID", &payload.med_id)?,
        quantity: coerce::as_int("QUANTITY", &payload.quantity)?,
        date_of_filling,
        dosage: freetext::normalize(payload.dosage),
    })
}

/// Validates the `{ids: [...]}` body of the batch delete.
///
/// A missing or non-array id set is a client error. An empty list is
/// accepted and deletes nothing.
fn batch_ids(body: &Value) -> Result<Vec<String>> {
    let ids = body
        .get("ids")
        .and_then(Value::as_array)
        .ok_or(AppError::BadRequest(INVALID_IDS))?;

    ids.iter()
        .map(|id| coerce::as_text("ids", id).map_err(AppError::Internal))
        .collect()
}

/// List all prescriptions
#[utoipa::path(
    get,
    path = "/prescriptions",
    responses(
        (status = 200, description = "All prescriptions, ordered by id", body = Vec<Prescription>)
    )
)]
#[instrument(skip(db))]
#[axum::debug_handler]
pub async fn list(State(AppState { db, .. }): State<AppState>) -> Result<Json<Vec<Prescription>>> {
    Ok(Json(prescriptions::list(&db).await?))
}

/// Add a new prescription
///
/// Referenced doctor, patient and medicine ids are bound as given; no
/// existence check is performed.
#[utoipa::path(
    post,
    path = "/prescriptions",
    request_body = CreatePrescription,
    responses((status = 200, description = "Confirmation text"))
)]
#[instrument(skip(db, payload))]
#[axum::debug_handler]
pub async fn create(
    State(AppState { db, .. }): State<AppState>,
    Json(payload): Json<CreatePrescription>,
) -> Result<&'static str> {
    let id = payload.prescription_id;
    let fields = fields(UpdatePrescription {
        doctor_id: payload.doctor_id,
        patient_id: payload.patient_id,
        med_id: payload.med_id,
        quantity: payload.quantity,
        date_of_filling: payload.date_of_filling,
        dosage: payload.dosage,
    })?;
    prescriptions::insert(&db, &id, &fields).await?;

    Ok("Prescription added successfully")
}

/// Replace a prescription's mutable fields
#[utoipa::path(
    put,
    path = "/prescriptions/{id}",
    params(("id" = String, Path, description = "Prescription id")),
    request_body = UpdatePrescription,
    responses((status = 200, description = "Confirmation text"))
)]
#[instrument(skip(db, payload))]
#[axum::debug_handler]
pub async fn replace(
    State(AppState { db, .. }): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<UpdatePrescription>,
) -> Result<&'static str> {
    let fields = fields(payload)?;
    prescriptions::update(&db, &id, &fields).await?;

    Ok("Prescription updated successfully")
}

/// Delete a batch of prescriptions
#[utoipa::path(
    delete,
    path = "/prescriptions",
    request_body = PrescriptionIdList,
    responses(
        (status = 200, description = "Confirmation text"),
        (status = 400, description = "Missing or non-array id set"),
    )
)]
#[instrument(skip(db, body))]
#[axum::debug_handler]
pub async fn remove_batch(
    State(AppState { db, .. }): State<AppState>,
    Json(body): Json<Value>,
) -> Result<&'static str> {
    let ids = batch_ids(&body)?;
    prescriptions::delete_batch(&db, &ids).await?;

    Ok("Prescriptions deleted successfully")
}

/// List prescriptions with display details
///
/// Read-only joined projection carrying the names of the referenced patient,
/// doctor and medication next to the ids, so clients do not have to join.
#[utoipa::path(
    get,
    path = "/patients-with-prescriptions",
    responses(
        (status = 200, description = "Joined prescription rows", body = Vec<PrescriptionDetails>)
    )
)]
#[instrument(skip(db))]
#[axum::debug_handler]
pub async fn list_with_details(
    State(AppState { db, .. }): State<AppState>,
) -> Result<Json<Vec<PrescriptionDetails>>> {
    Ok(Json(prescriptions::list_with_details(&db).await?))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn batch_ids_accepts_strings_and_numbers() {
        let ids = batch_ids(&json!({"ids": ["RX1", 7]})).unwrap();
        assert_eq!(ids, vec!["RX1".to_string(), "7".to_string()]);
    }

    #[test]
    fn batch_ids_accepts_an_empty_list() {
        assert_eq!(batch_ids(&json!({"ids": []})).unwrap(), Vec::<String>::new());
    }

    #[test]
    fn batch_ids_rejects_missing_or_non_array_payloads() {
        assert!(matches!(
            batch_ids(&json!({})),
            Err(AppError::BadRequest(INVALID_IDS))
        ));
        assert!(matches!(
            batch_ids(&json!({"ids": "RX1"})),
            Err(AppError::BadRequest(INVALID_IDS))
        ));
    }

    #[test]
    fn fields_treat_an_empty_filling_date_as_not_filled() {
        let fields = fields(UpdatePrescription {
            doctor_id: "D1".to_string(),
            patient_id: "P1".to_string(),
            med_id: json!(7),
            quantity: json!("2"),
            date_of_filling: Some(String::new()),
            dosage: Some(String::new()),
        })
        .unwrap();

        assert_eq!(fields.date_of_filling, None);
        assert_eq!(fields.dosage, None);
        assert_eq!(fields.quantity, 2);
    }

    #[test]
    fn fields_parse_the_filling_date() {
        let fields = fields(UpdatePrescription {
            doctor_id: "D1".to_string(),
            patient_id: "P1".to_string(),
            med_id: json!(7),
            quantity: json!(2),
            date_of_filling: Some("2024-12-01".to_string()),
            dosage: Some("1 tablet twice daily".to_string()),
        })
        .unwrap();

        assert_eq!(
            fields.date_of_filling,
            chrono::NaiveDate::from_ymd_opt(2024, 12, 1)
        );
    }
}
