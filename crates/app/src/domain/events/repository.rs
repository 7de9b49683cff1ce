//! Events repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};
use uuid::Uuid;

use crate::domain::{
    events::models::{Event, NewEvent},
    rows::{u64_to_db, try_get_u64, try_get_u32},
};

const GET_EVENT_SQL: &str = include_str!("sql/get_event.sql");
const CREATE_EVENT_SQL: &str = include_str!("sql/create_event.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgEventsRepository;

impl PgEventsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn get_event(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        event: Uuid,
    ) -> Result<Event, sqlx::Error> {
        query_as::<Postgres, Event>(GET_EVENT_SQL)
            .bind(event)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn create_event(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        event: &NewEvent,
    ) -> Result<(), sqlx::Error> {
        query(CREATE_EVENT_SQL)
            .bind(event.uuid)
            .bind(&event.name)
            .bind(event.tiered_discount_enabled)
            .bind(i64::from(event.bundle_size))
            .bind(event.delivery_enabled)
            .bind(u64_to_db(event.delivery_fee, "delivery_fee")?)
            .execute(&mut **tx)
            .await?;

        Ok(())
    }
}

impl<'r> FromRow<'r, PgRow> for Event {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: row.try_get("uuid")?,
            name: row.try_get("name")?,
            tiered_discount_enabled: row.try_get("tiered_discount_enabled")?,
            bundle_size: try_get_u32(row, "bundle_size")?,
            delivery_enabled: row.try_get("delivery_enabled")?,
            delivery_fee: try_get_u64(row, "delivery_fee")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
        })
    }
}
