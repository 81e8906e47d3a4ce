//! Prescription statements, including the read-only joined projection.

use sqlx::{Row as _, postgres::PgRow};
use tracing::instrument;

use crate::{
    Db, freetext,
    models::{Prescription, PrescriptionDetails, PrescriptionFields},
};

const DOSAGE_PLACEHOLDER: &str = "N/A";

const COLUMNS: &str =
    "prescription_id, doctor_id, patient_id, med_id, quantity, date_of_filling, dosage";

fn from_row(row: &PgRow) -> Result<Prescription, sqlx::Error> {
    Ok(Prescription {
        prescription_id: row.try_get("prescription_id")?,
        doctor_id: row.try_get("doctor_id")?,
        patient_id: row.try_get("patient_id")?,
        med_id: row.try_get("med_id")?,
        quantity: row.try_get("quantity")?,
        date_of_filling: row.try_get("date_of_filling")?,
        dosage: freetext::materialize(row.try_get("dosage")?, DOSAGE_PLACEHOLDER),
    })
}

#[instrument(skip(db))]
pub async fn list(db: &Db) -> Result<Vec<Prescription>, sqlx::Error> {
    db.fetch_mapped(
        &format!("SELECT {COLUMNS} FROM prescription ORDER BY prescription_id ASC"),
        &[],
        |row| from_row(row),
    )
    .await
}

#[instrument(skip(db, fields))]
pub async fn insert(db: &Db, id: &str, fields: &PrescriptionFields) -> Result<(), sqlx::Error> {
    db.run(
        "INSERT INTO prescription \
         (prescription_id, doctor_id, patient_id, med_id, quantity, date_of_filling, dosage) \
         VALUES ($1, $2, $3, $4, $5, $6, $7)",
        &[
            id.into(),
            fields.doctor_id.as_str().into(),
            fields.patient_id.as_str().into(),
            fields.med_id.into(),
            fields.quantity.into(),
            fields.date_of_filling.into(),
            fields.dosage.clone().into(),
        ],
    )
    .await?;
    Ok(())
}

#[instrument(skip(db, fields))]
pub async fn update(db: &Db, id: &str, fields: &PrescriptionFields) -> Result<(), sqlx::Error> {
    db.run(
        "UPDATE prescription \
         SET doctor_id = $1, patient_id = $2, med_id = $3, quantity = $4, \
         date_of_filling = $5, dosage = $6 \
         WHERE prescription_id = $7",
        &[
            fields.doctor_id.as_str().into(),
            fields.patient_id.as_str().into(),
            fields.med_id.into(),
            fields.quantity.into(),
            fields.date_of_filling.into(),
            fields.dosage.clone().into(),
            id.into(),
        ],
    )
    .await?;
    Ok(())
}

/// Deletes every row whose id appears in the list. One statement,
/// all-or-nothing; an empty list deletes nothing.
#[instrument(skip(db))]
pub async fn delete_batch(db: &Db, ids: &[String]) -> Result<u64, sqlx::Error> {
    db.run(
        "DELETE FROM prescription WHERE prescription_id = ANY($1)",
        &[ids.to_vec().into()],
    )
    .await
}

/// The joined projection: prescriptions with the display names of the
/// patient, doctor and medication they reference.
#[instrument(skip(db))]
pub async fn list_with_details(db: &Db) -> Result<Vec<PrescriptionDetails>, sqlx::Error> {
    db.fetch_mapped(
        "SELECT p.prescription_id, \
                pa.first_name AS patient_first_name, \
                pa.last_name AS patient_last_name, \
                d.first_name AS doctor_first_name, \
                d.last_name AS doctor_last_name, \
                m.name AS medication_name, \
                p.quantity, \
                p.dosage, \
                p.date_of_filling \
         FROM prescription p \
         JOIN patient pa ON pa.patient_id = p.patient_id \
         JOIN doctor d ON d.doctor_id = p.doctor_id \
         JOIN medicine m ON m.med_id = p.med_id \
         ORDER BY p.prescription_id ASC",
        &[],
        |row| {
            Ok(PrescriptionDetails {
                prescription_id: row.try_get("prescription_id")?,
                patient_first_name: row.try_get("patient_first_name")?,
                patient_last_name: row.try_get("patient_last_name")?,
                doctor_first_name: row.try_get("doctor_first_name")?,
                doctor_last_name: row.try_get("doctor_last_name")?,
                medication_name: row.try_get("medication_name")?,
                quantity: row.try_get("quantity")?,
                dosage: freetext::materialize(row.try_get("dosage")?, DOSAGE_PLACEHOLDER),
                date_of_filling: row.try_get("date_of_filling")?,
            })
        },
    )
    .await
}
