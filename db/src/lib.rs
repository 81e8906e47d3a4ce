//! Data-access layer for the hospital-pharmacy API.
//!
//! Every call acquires one pooled connection, executes a single statement
//! with autocommit semantics and hands the connection back when its guard
//! drops. There are no multi-statement transactions anywhere in the system.
//!
//! Reads that involve free-text columns must finish materializing their rows
//! before the connection is released; [`Db::fetch_mapped`] enforces that by
//! running the row mapping while the guard is still alive.

use chrono::NaiveDate;
use sqlx::{
    PgPool, Postgres,
    pool::PoolConnection,
    postgres::{PgArguments, PgRow},
    query::Query,
};

pub mod dates;
pub mod freetext;
pub mod models;
pub mod schema;
pub mod store;

/// A positional bind value for a SQL statement.
///
/// The variants cover every column type in the schema. `From` conversions
/// allow call sites to pass arguments as `&[id.into(), name.into()]`.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Text(String),
    OptText(Option<String>),
    Int(i64),
    Double(f64),
    Date(NaiveDate),
    OptDate(Option<NaiveDate>),
    IntList(Vec<i64>),
    TextList(Vec<String>),
}

impl From<&str> for SqlValue {
    fn from(value: &str) -> Self {
        SqlValue::Text(value.to_string())
    }
}

impl From<String> for SqlValue {
    fn from(value: String) -> Self {
        SqlValue::Text(value)
    }
}

impl From<Option<String>> for SqlValue {
    fn from(value: Option<String>) -> Self {
        SqlValue::OptText(value)
    }
}

impl From<i64> for SqlValue {
    fn from(value: i64) -> Self {
        SqlValue::Int(value)
    }
}

impl From<f64> for SqlValue {
    fn from(value: f64) -> Self {
        SqlValue::Double(value)
    }
}

impl From<NaiveDate> for SqlValue {
    fn from(value: NaiveDate) -> Self {
        SqlValue::Date(value)
    }
}

impl From<Option<NaiveDate>> for SqlValue {
    fn from(value: Option<NaiveDate>) -> Self {
        SqlValue::OptDate(value)
    }
}

impl From<Vec<i64>> for SqlValue {
    fn from(value: Vec<i64>) -> Self {
        SqlValue::IntList(value)
    }
}

impl From<Vec<String>> for SqlValue {
    fn from(value: Vec<String>) -> Self {
        SqlValue::TextList(value)
    }
}

fn bind_all<'q>(
    mut query: Query<'q, Postgres, PgArguments>,
    args: &[SqlValue],
) -> Query<'q, Postgres, PgArguments> {
    for arg in args {
        query = match arg {
            SqlValue::Text(v) => query.bind(v.clone()),
            SqlValue::OptText(v) => query.bind(v.clone()),
            SqlValue::Int(v) => query.bind(*v),
            SqlValue::Double(v) => query.bind(*v),
            SqlValue::Date(v) => query.bind(*v),
            SqlValue::OptDate(v) => query.bind(*v),
            SqlValue::IntList(v) => query.bind(v.clone()),
            SqlValue::TextList(v) => query.bind(v.clone()),
        };
    }
    query
}

/// Handle to the connection pool.
#[derive(Clone)]
pub struct Db {
    pool: PgPool,
}

impl Db {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Executes one read statement and returns the result rows together with
    /// the connection they were fetched on.
    ///
    /// The caller controls when the connection goes back to the pool by
    /// dropping the guard. Row post-processing that depends on the
    /// connection must happen before the drop.
    pub async fn fetch_raw(
        &self,
        statement: &str,
        args: &[SqlValue],
    ) -> Result<(PoolConnection<Postgres>, Vec<PgRow>), sqlx::Error> {
        let mut conn = self.pool.acquire().await?;
        let rows = bind_all(sqlx::query(statement), args)
            .fetch_all(&mut *conn)
            .await?;
        Ok((conn, rows))
    }

    /// Executes a read statement and maps every row while the connection is
    /// still held. The connection is released on all paths, success or
    /// failure, once mapping finishes.
    pub async fn fetch_mapped<T>(
        &self,
        statement: &str,
        args: &[SqlValue],
        map: impl Fn(&PgRow) -> Result<T, sqlx::Error>,
    ) -> Result<Vec<T>, sqlx::Error> {
        let (conn, rows) = self.fetch_raw(statement, args).await?;
        let mapped = rows.iter().map(&map).collect::<Result<Vec<_>, _>>();
        drop(conn);
        mapped
    }

    /// Like [`Db::fetch_mapped`], but expects at most one row.
    pub async fn fetch_opt_mapped<T>(
        &self,
        statement: &str,
        args: &[SqlValue],
        map: impl Fn(&PgRow) -> Result<T, sqlx::Error>,
    ) -> Result<Option<T>, sqlx::Error> {
        let (conn, rows) = self.fetch_raw(statement, args).await?;
        let mapped = rows.first().map(map).transpose();
        drop(conn);
        mapped
    }

    /// Executes one write statement and returns the affected row count.
    pub async fn run(&self, statement: &str, args: &[SqlValue]) -> Result<u64, sqlx::Error> {
        let mut conn = self.pool.acquire().await?;
        let result = bind_all(sqlx::query(statement), args)
            .execute(&mut *conn)
            .await?;
        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sql_value_conversions() {
        assert_eq!(SqlValue::from("a"), SqlValue::Text("a".to_string()));
        assert_eq!(SqlValue::from(5i64), SqlValue::Int(5));
        assert_eq!(SqlValue::from(None::<String>), SqlValue::OptText(None));
        assert_eq!(
            SqlValue::from(vec![1i64, 2, 3]),
            SqlValue::IntList(vec![1, 2, 3])
        );
    }
}
