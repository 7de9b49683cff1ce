//! Row decoding helpers
//!
//! Money, quantities and order numbers are unsigned in the domain but
//! signed in Postgres; these helpers convert at the row boundary and
//! surface impossible values as decode errors rather than panics.

use sqlx::{Row, postgres::PgRow};

pub(crate) fn try_get_u64(row: &PgRow, col: &str) -> Result<u64, sqlx::Error> {
    let value: i64 = row.try_get(col)?;

    u64::try_from(value).map_err(|e| sqlx::Error::ColumnDecode {
        index: col.to_string(),
        source: Box::new(e),
    })
}

pub(crate) fn try_get_u32(row: &PgRow, col: &str) -> Result<u32, sqlx::Error> {
    let value: i32 = row.try_get(col)?;

    u32::try_from(value).map_err(|e| sqlx::Error::ColumnDecode {
        index: col.to_string(),
        source: Box::new(e),
    })
}

pub(crate) fn try_get_opt_u32(row: &PgRow, col: &str) -> Result<Option<u32>, sqlx::Error> {
    let value: Option<i32> = row.try_get(col)?;

    value
        .map(|v| {
            u32::try_from(v).map_err(|e| sqlx::Error::ColumnDecode {
                index: col.to_string(),
                source: Box::new(e),
            })
        })
        .transpose()
}

/// Decode a TEXT enum column through one of the core `parse` functions.
pub(crate) fn try_get_variant<T>(
    row: &PgRow,
    col: &str,
    parse: fn(&str) -> Option<T>,
) -> Result<T, sqlx::Error> {
    let text: String = row.try_get(col)?;

    parse(&text).ok_or_else(|| sqlx::Error::ColumnDecode {
        index: col.to_string(),
        source: format!("unknown variant `{text}`").into(),
    })
}

/// Encode an unsigned domain value for a `BIGINT` column.
pub(crate) fn u64_to_db(value: u64, col: &str) -> Result<i64, sqlx::Error> {
    i64::try_from(value).map_err(|e| sqlx::Error::ColumnDecode {
        index: col.to_string(),
        source: Box::new(e),
    })
}
