//! Employee statements.

use sqlx::FromRow as _;
use tracing::instrument;

use crate::{
    Db,
    models::{Employee, EmployeeFields},
};

const COLUMNS: &str = "employee_id, first_name, last_name, phone_number";

#[instrument(skip(db))]
pub async fn list(db: &Db) -> Result<Vec<Employee>, sqlx::Error> {
    db.fetch_mapped(
        &format!("SELECT {COLUMNS} FROM employee ORDER BY last_name"),
        &[],
        |row| Employee::from_row(row),
    )
    .await
}

/// Case-insensitive equality on both name fields.
#[instrument(skip(db))]
pub async fn search(
    db: &Db,
    first_name: &str,
    last_name: &str,
) -> Result<Vec<Employee>, sqlx::Error> {
    db.fetch_mapped(
        &format!(
            "SELECT {COLUMNS} FROM employee \
             WHERE LOWER(first_name) = LOWER($1) AND LOWER(last_name) = LOWER($2)"
        ),
        &[first_name.into(), last_name.into()],
        |row| Employee::from_row(row),
    )
    .await
}

#[instrument(skip(db, fields))]
pub async fn insert(db: &Db, id: &str, fields: &EmployeeFields) -> Result<(), sqlx::Error> {
    db.run(
        "INSERT INTO employee (employee_id, first_name, last_name, phone_number) \
         VALUES ($1, $2, $3, $4)",
        &[
            id.into(),
            fields.first_name.as_str().into(),
            fields.last_name.as_str().into(),
            fields.phone_number.as_str().into(),
        ],
    )
    .await?;
    Ok(())
}

#[instrument(skip(db, fields))]
pub async fn update(db: &Db, id: &str, fields: &EmployeeFields) -> Result<(), sqlx::Error> {
    db.run(
        "UPDATE employee SET first_name = $1, last_name = $2, phone_number = $3 \
         WHERE employee_id = $4",
        &[
            fields.first_name.as_str().into(),
            fields.last_name.as_str().into(),
            fields.phone_number.as_str().into(),
            id.into(),
        ],
    )
    .await?;
    Ok(())
}

#[instrument(skip(db))]
pub async fn delete(db: &Db, id: &str) -> Result<(), sqlx::Error> {
    db.run("DELETE FROM employee WHERE employee_id = $1", &[id.into()])
        .await?;
    Ok(())
}
