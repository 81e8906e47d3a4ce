//! The medicine routes.
//!
//! Numeric fields arrive as numbers or strings and are coerced before
//! binding. Expiry passes through the legacy `DD-MON-YY` form on write, so
//! the stored date is whatever parses back from that representation.

use axum::{
    Json,
    extract::{Path, State},
};
use db::{
    dates, freetext,
    models::{Medicine, MedicineFields},
    store::medicines,
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

/// Fields accepted when creating a medicine. Keys keep the UPPERCASE casing
/// the existing frontend sends; numeric fields may be numbers or strings.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub struct CreateMedicine {
    #[schema(value_type = Object)]
    pub med_id: Value,
    pub name: String,
    #[serde(rename = "TYPE")]
    pub kind: String,
    pub description: Option<String>,
    pub restrictions: Option<String>,
    #[schema(value_type = Object)]
    pub stock: Value,
    #[schema(value_type = Object)]
    pub price: Value,
    /// Expiry date, `YYYY-MM-DD` or `DD-MON-YY`.
    pub expiry: Option<String>,
    #[schema(value_type = Object)]
    pub reorder: Value,
}

/// Fields accepted when replacing a medicine.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub struct UpdateMedicine {
    pub name: String,
    #[serde(rename = "TYPE")]
    pub kind: String,
    pub description: Option<String>,
    pub restrictions: Option<String>,
    #[schema(value_type = Object)]
    pub stock: Value,
    #[schema(value_type = Object)]
    pub price: Value,
    pub expiry: Option<String>,
    #[schema(value_type = Object)]
    pub reorder: Value,
}

/// Body of the batch delete route.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MedicineIdList {
    pub ids: Vec<i64>,
}

fn fields(payload: UpdateMedicine) -> Result<MedicineFields> {
    let expiry = match payload.expiry.as_deref() {
        Some(raw) if !raw.is_empty() => {
            Some(dates::parse_expiry(raw).map_err(eyre::Report::new)?)
        }
        _ => None,
    };

    Ok(MedicineFields {
        name: payload.name,
        kind: payload.kind,
        description: freetext::normalize(payload.description),
        restrictions: freetext::normalize(payload.restrictions),
        stock: coerce::as_int("STOCK", &payload.stock)?,
        price: coerce::as_float("PRICE", &payload.price)?,
        expiry,
        reorder: coerce::as_int("REORDER", &payload.reorder)?,
    })
}

/// Validates the `{ids: [...]}` body of the batch delete.
///
/// A missing, non-array or empty id set is a client error and must be
/// rejected before any database call.
fn batch_ids(body: &Value) -> Result<Vec<i64>> {
    let ids = body
        .get("ids")
        .and_then(Value::as_array)
        .ok_or(AppError::BadRequest(INVALID_IDS))?;

    if ids.is_empty() {
        return Err(AppError::BadRequest(INVALID_IDS));
    }

    ids.iter()
        .map(|id| coerce::as_int("ids", id).map_err(AppError::Internal))
        .collect()
}

/// List all medicines
#[utoipa::path(
    get,
    path = "/medicines",
    responses(
        (status = 200, description = "All medicines, ordered by id", body = Vec<Medicine>)
    )
)]
#[instrument(skip(db))]
#[axum::debug_handler]
pub async fn list(State(AppState { db, .. }): State<AppState>) -> Result<Json<Vec<Medicine>>> {
    Ok(Json(medicines::list(&db).await?))
}

/// Add a new medicine
#[utoipa::path(
    post,
    path = "/medicines",
    request_body = CreateMedicine,
    responses((status = 200, description = "Confirmation text"))
)]
#[instrument(skip(db, payload))]
#[axum::debug_handler]
pub async fn create(
    State(AppState { db, .. }): State<AppState>,
    Json(payload): Json<CreateMedicine>,
) -> Result<&'static str> {
    let id = coerce::as_int("MED_ID", &payload.med_id)?;
    let fields = fields(UpdateMedicine {
        name: payload.name,
        kind: payload.kind,
        description: payload.description,
        restrictions: payload.restrictions,
        stock: payload.stock,
        price: payload.price,
        expiry: payload.expiry,
        reorder: payload.reorder,
    })?;
    medicines::insert(&db, id, &fields).await?;

    Ok("Medicine added successfully")
}

/// Replace a medicine's mutable fields
#[utoipa::path(
    put,
    path = "/medicines/{id}",
    params(("id" = i64, Path, description = "Medicine id")),
    request_body = UpdateMedicine,
    responses((status = 200, description = "Confirmation text"))
)]
#[instrument(skip(db, payload))]
#[axum::debug_handler]
pub async fn replace(
    State(AppState { db, .. }): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateMedicine>,
) -> Result<&'static str> {
    let fields = fields(payload)?;
    medicines::update(&db, id, &fields).await?;

    Ok("Medicine updated successfully")
}

/// Delete a batch of medicines
///
/// Removes exactly the rows named in `ids` with a single statement.
#[utoipa::path(
    delete,
    path = "/medicines",
    request_body = MedicineIdList,
    responses(
        (status = 200, description = "Confirmation text"),
        (status = 400, description = "Missing, empty or non-array id set"),
    )
)]
#[instrument(skip(db, body))]
#[axum::debug_handler]
pub async fn remove_batch(
    State(AppState { db, .. }): State<AppState>,
    Json(body): Json<Value>,
) -> Result<&'static str> {
    let ids = batch_ids(&body)?;
    medicines::delete_batch(&db, &ids).await?;

    Ok("Medicines deleted successfully")
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn batch_ids_accepts_numbers_and_numeric_strings() {
        let ids = batch_ids(&json!({"ids": [1, "2", 3]})).unwrap();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn batch_ids_rejects_missing_payload() {
        assert!(matches!(
            batch_ids(&json!({})),
            Err(AppError::BadRequest(INVALID_IDS))
        ));
    }

    #[test]
    fn batch_ids_rejects_non_array_payload() {
        assert!(matches!(
            batch_ids(&json!({"ids": "1,2,3"})),
            Err(AppError::BadRequest(INVALID_IDS))
        ));
    }

    #[test]
    fn batch_ids_rejects_an_empty_list() {
        assert!(matches!(
            batch_ids(&json!({"ids": []})),
            Err(AppError::BadRequest(INVALID_IDS))
        ));
    }

    #[test]
    fn fields_coerce_stringly_numbers() {
        let fields = fields(UpdateMedicine {
            name: "Aspirin".to_string(),
            kind: "Analgesic".to_string(),
            description: Some(String::new()),
            restrictions: None,
            stock: json!("120"),
            price: json!("4.50"),
            expiry: Some("2024-11-29".to_string()),
            reorder: json!(20),
        })
        .unwrap();

        assert_eq!(fields.stock, 120);
        assert_eq!(fields.price, 4.5);
        assert_eq!(fields.description, None);
        assert_eq!(
            fields.expiry,
            chrono::NaiveDate::from_ymd_opt(2024, 11, 29)
        );
    }

    #[test]
    fn fields_treat_an_empty_expiry_as_absent() {
        let fields = fields(UpdateMedicine {
            name: "Saline".to_string(),
            kind: "Solution".to_string(),
            description: None,
            restrictions: None,
            stock: json!(1),
            price: json!(1),
            expiry: Some(String::new()),
            reorder: json!(1),
        })
        .unwrap();

        assert_eq!(fields.expiry, None);
    }
}
