//! Doctor statements.

use sqlx::FromRow as _;
use tracing::instrument;

use crate::{
    Db,
    models::{Doctor, DoctorFields},
};

const COLUMNS: &str = "doctor_id, first_name, last_name, phone_number, email";

#[instrument(skip(db))]
pub async fn list(db: &Db) -> Result<Vec<Doctor>, sqlx::Error> {
    db.fetch_mapped(
        &format!("SELECT {COLUMNS} FROM doctor ORDER BY last_name"),
        &[],
        |row| Doctor::from_row(row),
    )
    .await
}

/// Case-insensitive equality on both name fields.
#[instrument(skip(db))]
pub async fn search(db: &Db, first_name: &str, last_name: &str) -> Result<Vec<Doctor>, sqlx::Error> {
    db.fetch_mapped(
        &format!(
            "SELECT {COLUMNS} FROM doctor \
             WHERE LOWER(first_name) = LOWER($1) AND LOWER(last_name) = LOWER($2)"
        ),
        &[first_name.into(), last_name.into()],
        |row| Doctor::from_row(row),
    )
    .await
}

#[instrument(skip(db, fields))]
pub async fn insert(db: &Db, id: &str, fields: &DoctorFields) -> Result<(), sqlx::Error> {
    db.run(
        "INSERT INTO doctor (doctor_id, first_name, last_name, phone_number, email) \
         VALUES ($1, $2, $3, $4, $5)",
        &[
            id.into(),
            fields.first_name.as_str().into(),
            fields.last_name.as_str().into(),
            fields.phone_number.as_str().into(),
            fields.email.as_str().into(),
        ],
    )
    .await?;
    Ok(())
}

#[instrument(skip(db, fields))]
pub async fn update(db: &Db, id: &str, fields: &DoctorFields) -> Result<(), sqlx::Error> {
    db.run(
        "UPDATE doctor \
         SET first_name = $1, last_name = $2, phone_number = $3, email = $4 \
         WHERE doctor_id = $5",
        &[
            fields.first_name.as_str().into(),
            fields.last_name.as_str().into(),
            fields.phone_number.as_str().into(),
            fields.email.as_str().into(),
            id.into(),
        ],
    )
    .await?;
    Ok(())
}

#[instrument(skip(db))]
pub async fn delete(db: &Db, id: &str) -> Result<(), sqlx::Error> {
    db.run("DELETE FROM doctor WHERE doctor_id = $1", &[id.into()])
        .await?;
    Ok(())
}
