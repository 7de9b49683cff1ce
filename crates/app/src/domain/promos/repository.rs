//! Promo codes repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};
use uuid::Uuid;

use crate::domain::{
    promos::models::{NewPromoCode, PromoCodeRecord},
    rows::{u64_to_db, try_get_u64},
};

const FIND_CODE_SQL: &str = include_str!("sql/find_code.sql");
const CREATE_CODE_SQL: &str = include_str!("sql/create_code.sql");
const DEACTIVATE_CODE_SQL: &str = include_str!("sql/deactivate_code.sql");
const LIST_CODES_SQL: &str = include_str!("sql/list_codes.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgPromoCodesRepository;

impl PgPromoCodesRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Look up a code by its normalized form.
    pub(crate) async fn find_code(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        event: Uuid,
        normalized: &str,
    ) -> Result<Option<PromoCodeRecord>, sqlx::Error> {
        query_as::<Postgres, PromoCodeRecord>(FIND_CODE_SQL)
            .bind(event)
            .bind(normalized)
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn create_code(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        event: Uuid,
        code: &NewPromoCode,
    ) -> Result<PromoCodeRecord, sqlx::Error> {
        query_as::<Postgres, PromoCodeRecord>(CREATE_CODE_SQL)
            .bind(code.uuid)
            .bind(event)
            .bind(&code.code)
            .bind(u64_to_db(code.discount, "discount")?)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn deactivate_code(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        event: Uuid,
        normalized: &str,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DEACTIVATE_CODE_SQL)
            .bind(event)
            .bind(normalized)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn list_codes(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        event: Uuid,
    ) -> Result<Vec<PromoCodeRecord>, sqlx::Error> {
        query_as::<Postgres, PromoCodeRecord>(LIST_CODES_SQL)
            .bind(event)
            .fetch_all(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for PromoCodeRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: row.try_get("uuid")?,
            event: row.try_get("event_uuid")?,
            code: row.try_get("code")?,
            discount: try_get_u64(row, "discount")?,
            active: row.try_get("active")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
        })
    }
}
