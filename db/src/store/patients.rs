//! Patient statements.
//!
//! Allergies and medical history are free-text columns; rows are
//! materialized with their display placeholders while the connection that
//! produced them is still held.

use sqlx::{Row as _, postgres::PgRow};
use tracing::instrument;

use crate::{
    Db, freetext,
    models::{Patient, PatientFields},
};

const ALLERGIES_PLACEHOLDER: &str = "None";
const HISTORY_PLACEHOLDER: &str = "None";

const COLUMNS: &str = "patient_id, first_name, last_name, bday, gender, address, phone_number, \
                       allergies, medical_history";

fn from_row(row: &PgRow) -> Result<Patient, sqlx::Error> {
    Ok(Patient {
        patient_id: row.try_get("patient_id")?,
        first_name: row.try_get("first_name")?,
        last_name: row.try_get("last_name")?,
        bday: row.try_get("bday")?,
        gender: row.try_get("gender")?,
        address: row.try_get("address")?,
        phone_number: row.try_get("phone_number")?,
        allergies: freetext::materialize(row.try_get("allergies")?, ALLERGIES_PLACEHOLDER),
        medical_history: freetext::materialize(
            row.try_get("medical_history")?,
            HISTORY_PLACEHOLDER,
        ),
    })
}

#[instrument(skip(db))]
pub async fn list(db: &Db) -> Result<Vec<Patient>, sqlx::Error> {
    db.fetch_mapped(
        &format!("SELECT {COLUMNS} FROM patient ORDER BY patient_id ASC"),
        &[],
        |row| from_row(row),
    )
    .await
}

#[instrument(skip(db))]
pub async fn get(db: &Db, id: &str) -> Result<Option<Patient>, sqlx::Error> {
    db.fetch_opt_mapped(
        &format!("SELECT {COLUMNS} FROM patient WHERE patient_id = $1"),
        &[id.into()],
        |row| from_row(row),
    )
    .await
}

#[instrument(skip(db, fields))]
pub async fn insert(db: &Db, id: &str, fields: &PatientFields) -> Result<(), sqlx::Error> {
    db.run(
        "INSERT INTO patient (patient_id, first_name, last_name, bday, gender, address, \
         phone_number, allergies, medical_history) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)",
        &[
            id.into(),
            fields.first_name.as_str().into(),
            fields.last_name.as_str().into(),
            fields.bday.into(),
            fields.gender.as_str().into(),
            fields.address.as_str().into(),
            fields.phone_number.as_str().into(),
            fields.allergies.clone().into(),
            fields.medical_history.clone().into(),
        ],
    )
    .await?;
    Ok(())
}

#[instrument(skip(db, fields))]
pub async fn update(db: &Db, id: &str, fields: &PatientFields) -> Result<(), sqlx::Error> {
    db.run(
        "UPDATE patient SET \
         first_name = $1, last_name = $2, bday = $3, gender = $4, address = $5, \
         phone_number = $6, allergies = $7, medical_history = $8 \
         WHERE patient_id = $9",
        &[
            fields.first_name.as_str().into(),
            fields.last_name.as_str().into(),
            fields.bday.into(),
            fields.gender.as_str().into(),
            fields.address.as_str().into(),
            fields.phone_number.as_str().into(),
            fields.allergies.clone().into(),
            fields.medical_history.clone().into(),
            id.into(),
        ],
    )
    .await?;
    Ok(())
}

#[instrument(skip(db))]
pub async fn delete(db: &Db, id: &str) -> Result<(), sqlx::Error> {
    db.run("DELETE FROM patient WHERE patient_id = $1", &[id.into()])
        .await?;
    Ok(())
}
