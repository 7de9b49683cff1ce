//! Orders repository

use std::collections::HashMap;

use barrique::{
    payment::PaymentMethod,
    pricing::{Fulfilment, ProductKind, Totals},
    status::OrderStatus,
};
use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as, query_scalar};
use uuid::Uuid;

use crate::domain::{
    catalogue::models::ProductRecord,
    orders::models::{Customer, Order, OrderLine, SlotOccupancy},
    rows::{u64_to_db, try_get_u64, try_get_opt_u32, try_get_u32, try_get_variant},
};

const LOCK_PRODUCTS_SQL: &str = include_str!("sql/lock_products.sql");
const ALLOCATED_QUANTITIES_SQL: &str = include_str!("sql/allocated_quantities.sql");
const LOCK_SLOT_SQL: &str = include_str!("sql/lock_slot.sql");
const SLOT_USAGE_SQL: &str = include_str!("sql/slot_usage.sql");
const NEXT_ORDER_NUMBER_SQL: &str = include_str!("sql/next_order_number.sql");
const CREATE_ORDER_SQL: &str = include_str!("sql/create_order.sql");
const CREATE_ORDER_LINE_SQL: &str = include_str!("sql/create_order_line.sql");
const GET_ORDER_SQL: &str = include_str!("sql/get_order.sql");
const GET_ORDER_LINES_SQL: &str = include_str!("sql/get_order_lines.sql");
const GET_STATUS_FOR_UPDATE_SQL: &str = include_str!("sql/get_status_for_update.sql");
const SET_STATUS_SQL: &str = include_str!("sql/set_status.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgOrdersRepository;

impl PgOrdersRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Lock and return the product rows for a submission. Products are
    /// locked in uuid order so rival submissions cannot deadlock.
    pub(crate) async fn lock_products(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        event: Uuid,
        products: &[Uuid],
    ) -> Result<Vec<ProductRecord>, sqlx::Error> {
        query_as::<Postgres, ProductRecord>(LOCK_PRODUCTS_SQL)
            .bind(event)
            .bind(products.to_vec())
            .fetch_all(&mut **tx)
            .await
    }

    /// Units allocated to non-cancelled orders, per product.
    pub(crate) async fn allocated_quantities(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        products: &[Uuid],
    ) -> Result<HashMap<Uuid, u64>, sqlx::Error> {
        let rows = query(ALLOCATED_QUANTITIES_SQL)
            .bind(products.to_vec())
            .fetch_all(&mut **tx)
            .await?;

        rows.iter()
            .map(|row| {
                let product: Uuid = row.try_get("product_uuid")?;
                let allocated = try_get_u64(row, "allocated")?;

                Ok((product, allocated))
            })
            .collect()
    }

    /// Lock the slot row and read its current usage.
    pub(crate) async fn lock_slot(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        event: Uuid,
        slot: Uuid,
    ) -> Result<Option<SlotOccupancy>, sqlx::Error> {
        let Some(row) = query(LOCK_SLOT_SQL)
            .bind(event)
            .bind(slot)
            .fetch_optional(&mut **tx)
            .await?
        else {
            return Ok(None);
        };

        let capacity = try_get_u32(&row, "capacity")?;

        let used: i64 = query_scalar(SLOT_USAGE_SQL)
            .bind(slot)
            .fetch_one(&mut **tx)
            .await?;

        Ok(Some(SlotOccupancy {
            uuid: slot,
            capacity,
            used,
        }))
    }

    pub(crate) async fn next_order_number(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<u64, sqlx::Error> {
        let number: i64 = query_scalar(NEXT_ORDER_NUMBER_SQL)
            .fetch_one(&mut **tx)
            .await?;

        u64::try_from(number).map_err(|e| sqlx::Error::ColumnDecode {
            index: "number".to_string(),
            source: Box::new(e),
        })
    }

    /// Insert the order header and all of its lines. The surrounding
    /// transaction makes the unit atomic: either every row exists or none.
    pub(crate) async fn create_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: &Order,
    ) -> Result<(), sqlx::Error> {
        query(CREATE_ORDER_SQL)
            .bind(order.uuid)
            .bind(order.event)
            .bind(u64_to_db(order.number, "number")?)
            .bind(&order.code)
            .bind(&order.customer.name)
            .bind(&order.customer.email)
            .bind(order.customer.phone.as_deref())
            .bind(order.fulfilment.as_str())
            .bind(order.slot)
            .bind(order.payment.as_str())
            .bind(&order.payment_reference)
            .bind(u64_to_db(order.totals.subtotal, "subtotal")?)
            .bind(u64_to_db(order.totals.tiered_discount, "tiered_discount")?)
            .bind(u64_to_db(order.totals.promo_discount, "promo_discount")?)
            .bind(u64_to_db(order.totals.delivery_fee, "delivery_fee")?)
            .bind(u64_to_db(order.totals.total, "total")?)
            .bind(order.status.as_str())
            .bind(SqlxTimestamp::from(order.created_at))
            .execute(&mut **tx)
            .await?;

        for line in &order.lines {
            query(CREATE_ORDER_LINE_SQL)
                .bind(line.uuid)
                .bind(order.uuid)
                .bind(line.product)
                .bind(i64::from(line.quantity))
                .bind(u64_to_db(line.unit_price, "unit_price")?)
                .execute(&mut **tx)
                .await?;
        }

        Ok(())
    }

    pub(crate) async fn get_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: Uuid,
    ) -> Result<Order, sqlx::Error> {
        let mut order = query_as::<Postgres, Order>(GET_ORDER_SQL)
            .bind(order)
            .fetch_one(&mut **tx)
            .await?;

        let lines = query_as::<Postgres, OrderLine>(GET_ORDER_LINES_SQL)
            .bind(order.uuid)
            .fetch_all(&mut **tx)
            .await?;

        order.lines = lines;

        Ok(order)
    }

    /// Current status, locked against concurrent transitions.
    pub(crate) async fn get_status_for_update(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: Uuid,
    ) -> Result<OrderStatus, sqlx::Error> {
        let row = query(GET_STATUS_FOR_UPDATE_SQL)
            .bind(order)
            .fetch_one(&mut **tx)
            .await?;

        try_get_variant(&row, "status", OrderStatus::parse)
    }

    pub(crate) async fn set_status(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: Uuid,
        status: OrderStatus,
    ) -> Result<(), sqlx::Error> {
        query(SET_STATUS_SQL)
            .bind(order)
            .bind(status.as_str())
            .execute(&mut **tx)
            .await?;

        Ok(())
    }
}

impl<'r> FromRow<'r, PgRow> for ProductRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: row.try_get("uuid")?,
            name: row.try_get("name")?,
            unit_price: try_get_u64(row, "unit_price")?,
            kind: try_get_variant(row, "kind", ProductKind::parse)?,
            stock: try_get_opt_u32(row, "stock")?,
            active: row.try_get("active")?,
            sort_order: row.try_get("sort_order")?,
        })
    }
}

impl<'r> FromRow<'r, PgRow> for Order {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: row.try_get("uuid")?,
            event: row.try_get("event_uuid")?,
            number: try_get_u64(row, "number")?,
            code: row.try_get("code")?,
            customer: Customer {
                name: row.try_get("customer_name")?,
                email: row.try_get("customer_email")?,
                phone: row.try_get("customer_phone")?,
            },
            fulfilment: try_get_variant(row, "fulfilment", Fulfilment::parse)?,
            slot: row.try_get("slot_uuid")?,
            payment: try_get_variant(row, "payment_method", PaymentMethod::parse)?,
            payment_reference: row.try_get("payment_reference")?,
            totals: Totals {
                subtotal: try_get_u64(row, "subtotal")?,
                tiered_discount: try_get_u64(row, "tiered_discount")?,
                promo_discount: try_get_u64(row, "promo_discount")?,
                delivery_fee: try_get_u64(row, "delivery_fee")?,
                total: try_get_u64(row, "total")?,
            },
            status: try_get_variant(row, "status", OrderStatus::parse)?,
            lines: Vec::new(),
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for OrderLine {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: row.try_get("uuid")?,
            product: row.try_get("product_uuid")?,
            quantity: try_get_u32(row, "quantity")?,
            unit_price: try_get_u64(row, "unit_price")?,
        })
    }
}
