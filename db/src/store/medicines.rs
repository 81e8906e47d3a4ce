//! Medicine statements.

use sqlx::{Row as _, postgres::PgRow};
use tracing::instrument;

use crate::{
    Db, freetext,
    models::{Medicine, MedicineFields},
};

const DESCRIPTION_PLACEHOLDER: &str = "No description available";
const RESTRICTIONS_PLACEHOLDER: &str = "No restrictions";

const COLUMNS: &str =
    "med_id, name, \"type\", description, restrictions, stock, price, expiry, reorder";

fn from_row(row: &PgRow) -> Result<Medicine, sqlx::Error> {
    Ok(Medicine {
        med_id: row.try_get("med_id")?,
        name: row.try_get("name")?,
        kind: row.try_get("type")?,
        description: freetext::materialize(row.try_get("description")?, DESCRIPTION_PLACEHOLDER),
        restrictions: freetext::materialize(row.try_get("restrictions")?, RESTRICTIONS_PLACEHOLDER),
        stock: row.try_get("stock")?,
        price: row.try_get("price")?,
        expiry: row.try_get("expiry")?,
        reorder: row.try_get("reorder")?,
    })
}

#[instrument(skip(db))]
pub async fn list(db: &Db) -> Result<Vec<Medicine>, sqlx::Error> {
    db.fetch_mapped(
        &format!("SELECT {COLUMNS} FROM medicine ORDER BY med_id"),
        &[],
        |row| from_row(row),
    )
    .await
}

#[instrument(skip(db, fields))]
pub async fn insert(db: &Db, id: i64, fields: &MedicineFields) -> Result<(), sqlx::Error> {
    db.run(
        "INSERT INTO medicine (med_id, name, \"type\", description, restrictions, stock, price, \
         expiry, reorder) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)",
        &[
            id.into(),
            fields.name.as_str().into(),
            fields.kind.as_str().into(),
            fields.description.clone().into(),
            fields.restrictions.clone().into(),
            fields.stock.into(),
            fields.price.into(),
            fields.expiry.into(),
            fields.reorder.into(),
        ],
    )
    .await?;
    Ok(())
}

#[instrument(skip(db, fields))]
pub async fn update(db: &Db, id: i64, fields: &MedicineFields) -> Result<(), sqlx::Error> {
    db.run(
        "UPDATE medicine \
         SET name = $1, \"type\" = $2, description = $3, restrictions = $4, stock = $5, \
         price = $6, expiry = $7, reorder = $8 \
         WHERE med_id = $9",
        &[
            fields.name.as_str().into(),
            fields.kind.as_str().into(),
            fields.description.clone().into(),
            fields.restrictions.clone().into(),
            fields.stock.into(),
            fields.price.into(),
            fields.expiry.into(),
            fields.reorder.into(),
            id.into(),
        ],
    )
    .await?;
    Ok(())
}

/// Deletes every row whose id appears in the list. One statement,
/// all-or-nothing; returns the number of removed rows.
#[instrument(skip(db))]
pub async fn delete_batch(db: &Db, ids: &[i64]) -> Result<u64, sqlx::Error> {
    db.run(
        "DELETE FROM medicine WHERE med_id = ANY($1)",
        &[ids.to_vec().into()],
    )
    .await
}
