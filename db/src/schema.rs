//! Table bootstrap for the pharmacy schema.
//!
//! No foreign keys between prescriptions and the entities they reference:
//! referential integrity was never enforced by the application, and deletes
//! must keep working row-by-row.

use crate::Db;

const TABLES: &[&str] = &[
    r#"
CREATE TABLE IF NOT EXISTS employee (
    employee_id  TEXT PRIMARY KEY,
    first_name   TEXT NOT NULL,
    last_name    TEXT NOT NULL,
    phone_number TEXT NOT NULL
)
"#,
    r#"
CREATE TABLE IF NOT EXISTS doctor (
    doctor_id    TEXT PRIMARY KEY,
    first_name   TEXT NOT NULL,
    last_name    TEXT NOT NULL,
    phone_number TEXT NOT NULL,
    email        TEXT NOT NULL
)
"#,
    r#"
CREATE TABLE IF NOT EXISTS patient (
    patient_id      TEXT PRIMARY KEY,
    first_name      TEXT NOT NULL,
    last_name       TEXT NOT NULL,
    bday            DATE NOT NULL,
    gender          TEXT NOT NULL,
    address         TEXT NOT NULL,
    phone_number    TEXT NOT NULL,
    allergies       TEXT,
    medical_history TEXT
)
"#,
    r#"
CREATE TABLE IF NOT EXISTS medicine (
    med_id       BIGINT PRIMARY KEY,
    name         TEXT NOT NULL,
    "type"       TEXT NOT NULL,
    description  TEXT,
    restrictions TEXT,
    stock        BIGINT NOT NULL,
    price        DOUBLE PRECISION NOT NULL,
    expiry       DATE,
    reorder      BIGINT NOT NULL
)
"#,
    r#"
CREATE TABLE IF NOT EXISTS prescription (
    prescription_id TEXT PRIMARY KEY,
    doctor_id       TEXT NOT NULL,
    patient_id      TEXT NOT NULL,
    med_id          BIGINT NOT NULL,
    quantity        BIGINT NOT NULL,
    date_of_filling DATE,
    dosage          TEXT
)
"#,
];

/// Creates all tables that do not exist yet. Each statement runs on its own
/// connection with autocommit semantics, like every other statement in the
/// system.
pub async fn ensure_schema(db: &Db) -> Result<(), sqlx::Error> {
    for table in TABLES {
        db.run(table, &[]).await?;
    }
    Ok(())
}
