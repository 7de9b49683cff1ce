//! Catalogue repository

use barrique::pricing::ProductKind;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as};
use uuid::Uuid;

use crate::domain::{
    catalogue::models::{CatalogueProduct, CatalogueSlot},
    rows::{try_get_u64, try_get_opt_u32, try_get_u32, try_get_variant},
};

const LIST_PRODUCTS_SQL: &str = include_str!("sql/list_products.sql");
const LIST_SLOTS_SQL: &str = include_str!("sql/list_slots.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgCatalogueRepository;

impl PgCatalogueRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_products(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        event: Uuid,
    ) -> Result<Vec<CatalogueProduct>, sqlx::Error> {
        query_as::<Postgres, CatalogueProduct>(LIST_PRODUCTS_SQL)
            .bind(event)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn list_slots(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        event: Uuid,
    ) -> Result<Vec<CatalogueSlot>, sqlx::Error> {
        query_as::<Postgres, CatalogueSlot>(LIST_SLOTS_SQL)
            .bind(event)
            .fetch_all(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for CatalogueProduct {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: row.try_get("uuid")?,
            name: row.try_get("name")?,
            unit_price: try_get_u64(row, "unit_price")?,
            kind: try_get_variant(row, "kind", ProductKind::parse)?,
            available: try_get_opt_u32(row, "available")?,
            sort_order: row.try_get("sort_order")?,
        })
    }
}

impl<'r> FromRow<'r, PgRow> for CatalogueSlot {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: row.try_get("uuid")?,
            starts_at: row.try_get::<SqlxTimestamp, _>("starts_at")?.to_jiff(),
            ends_at: row.try_get::<SqlxTimestamp, _>("ends_at")?.to_jiff(),
            capacity: try_get_u32(row, "capacity")?,
            remaining: row.try_get("remaining")?,
        })
    }
}
