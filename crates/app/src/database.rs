//! Database connection management

use std::str::FromStr;

use sqlx::{
    PgPool, Postgres, Row, Transaction, migrate::MigrateError, postgres::PgPoolOptions,
    postgres::PgRow,
};

#[derive(Debug, Clone)]
pub struct Db {
    pool: PgPool,
}

impl Db {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Begin a transaction.
    ///
    /// # Errors
    ///
    /// Returns an error when a connection cannot be acquired or the transaction cannot start.
    pub async fn begin(&self) -> Result<Transaction<'static, Postgres>, sqlx::Error> {
        self.pool.begin().await
    }
}

/// Connect to `PostgreSQL`.
///
/// # Errors
///
/// Returns an error if the connection cannot be established.
pub async fn connect(database_url: &str, max_connections: u32) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await
}

/// Apply the embedded schema migrations.
///
/// # Errors
///
/// Returns an error if any migration fails to apply.
pub async fn migrate(pool: &PgPool) -> Result<(), MigrateError> {
    sqlx::migrate!("../../migrations").run(pool).await
}

/// Builds an `ILIKE` pattern matching `search` anywhere in the column.
pub(crate) fn contains_pattern(search: &str) -> String {
    let mut pattern = String::with_capacity(search.len() + 2);

    pattern.push('%');

    for ch in search.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            pattern.push('\\');
        }

        pattern.push(ch);
    }

    pattern.push('%');

    pattern
}

/// Decode a non-negative `BIGINT` column.
pub(crate) fn try_get_amount(row: &PgRow, column: &str) -> sqlx::Result<u64> {
    let value: i64 = row.try_get(column)?;

    u64::try_from(value).map_err(|source| sqlx::Error::ColumnDecode {
        index: column.to_string(),
        source: Box::new(source),
    })
}

/// Decode a nullable non-negative `BIGINT` column.
pub(crate) fn try_get_optional_amount(row: &PgRow, column: &str) -> sqlx::Result<Option<u64>> {
    row.try_get::<Option<i64>, _>(column)?
        .map(|value| {
            u64::try_from(value).map_err(|source| sqlx::Error::ColumnDecode {
                index: column.to_string(),
                source: Box::new(source),
            })
        })
        .transpose()
}

/// Decode a `TEXT` column holding one of the variants of `T`.
pub(crate) fn try_get_enum<T>(row: &PgRow, column: &str) -> sqlx::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let value: String = row.try_get(column)?;

    parse_column(column, &value)
}

/// Decode a `TEXT[]` column whose elements are variants of `T`.
pub(crate) fn try_get_enum_array<T>(row: &PgRow, column: &str) -> sqlx::Result<Vec<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let values: Vec<String> = row.try_get(column)?;

    values
        .iter()
        .map(|value| parse_column(column, value))
        .collect()
}

/// Converts an amount into the `BIGINT` representation used by the schema.
pub(crate) fn amount_to_db(column: &str, amount: u64) -> sqlx::Result<i64> {
    i64::try_from(amount).map_err(|source| sqlx::Error::ColumnDecode {
        index: column.to_string(),
        source: Box::new(source),
    })
}

/// Converts a `COUNT(*)` result.
pub(crate) fn count_from_db(count: i64) -> sqlx::Result<u64> {
    u64::try_from(count).map_err(|source| sqlx::Error::ColumnDecode {
        index: "count".to_string(),
        source: Box::new(source),
    })
}

fn parse_column<T>(column: &str, value: &str) -> sqlx::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    value.parse().map_err(|source| sqlx::Error::ColumnDecode {
        index: column.to_string(),
        source: Box::new(source),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contains_pattern_wraps_search_in_wildcards() {
        assert_eq!(contains_pattern("shoes"), "%shoes%");
    }

    #[test]
    fn contains_pattern_escapes_like_metacharacters() {
        assert_eq!(contains_pattern("50%_off\\"), "%50\\%\\_off\\\\%");
    }

    #[test]
    fn amount_to_db_rejects_overflow() {
        assert!(amount_to_db("price", u64::MAX).is_err());
        assert_eq!(amount_to_db("price", 10_00).ok(), Some(1000));
    }
}
