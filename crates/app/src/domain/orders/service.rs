//! Orders service.
//!
//! The submission path runs in a single transaction: lock the product rows
//! and the slot row, re-read current allocations under those locks, then
//! validate, price and write. Two rival submissions for the last unit
//! serialize on the row locks, so exactly one of them can win.

use async_trait::async_trait;
use barrique::{cart, promo, status::OrderStatus};
use jiff::Timestamp;
use mockall::automock;
use uuid::Uuid;

use crate::{
    database::Db,
    domain::{
        events::repository::PgEventsRepository,
        orders::{
            errors::OrdersServiceError,
            models::{Order, OrderSubmission},
            repository::PgOrdersRepository,
            submission::{self, SubmissionSnapshot},
        },
        promos::repository::PgPromoCodesRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgOrdersService {
    db: Db,
    repository: PgOrdersRepository,
    events: PgEventsRepository,
    promos: PgPromoCodesRepository,
}

impl PgOrdersService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgOrdersRepository::new(),
            events: PgEventsRepository::new(),
            promos: PgPromoCodesRepository::new(),
        }
    }
}

#[async_trait]
impl OrdersService for PgOrdersService {
    async fn submit_order(
        &self,
        event: Uuid,
        submission: OrderSubmission,
    ) -> Result<Order, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let event_record = match self.events.get_event(&mut tx, event).await {
            Ok(record) => record,
            Err(sqlx::Error::RowNotFound) => return Err(OrdersServiceError::UnknownEvent),
            Err(error) => return Err(error.into()),
        };

        // Reject malformed submissions before taking any lock.
        submission::validate(&submission, &event_record)?;

        let requested: Vec<Uuid> = cart::merged(&submission.lines)
            .iter()
            .map(|line| line.product)
            .collect();

        let products = self
            .repository
            .lock_products(&mut tx, event, &requested)
            .await?;

        let allocated = self
            .repository
            .allocated_quantities(&mut tx, &requested)
            .await?;

        let slot = match submission.slot {
            Some(slot) => self.repository.lock_slot(&mut tx, event, slot).await?,
            None => None,
        };

        let promo = match &submission.promo_code {
            Some(code) => {
                self.promos
                    .find_code(&mut tx, event, &promo::normalize(code))
                    .await?
            }
            None => None,
        };

        let snapshot = SubmissionSnapshot {
            event: event_record,
            products,
            allocated,
            slot,
            promo,
        };

        let priced = submission::price_submission(&submission, &snapshot)?;

        let number = self.repository.next_order_number(&mut tx).await?;
        let order = Order::assemble(event, number, submission, priced, Timestamp::now());

        self.repository.create_order(&mut tx, &order).await?;

        tx.commit().await?;

        tracing::info!(
            order = %order.uuid,
            code = %order.code,
            total = order.totals.total,
            "order accepted"
        );

        Ok(order)
    }

    async fn set_status(
        &self,
        order: Uuid,
        status: OrderStatus,
    ) -> Result<Order, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let current = self.repository.get_status_for_update(&mut tx, order).await?;
        let next = current.transition(status)?;

        self.repository.set_status(&mut tx, order, next).await?;

        let updated = self.repository.get_order(&mut tx, order).await?;

        tx.commit().await?;

        tracing::info!(order = %order, from = current.as_str(), to = next.as_str(), "order status changed");

        Ok(updated)
    }

    async fn get_order(&self, order: Uuid) -> Result<Order, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let order = self.repository.get_order(&mut tx, order).await?;

        tx.commit().await?;

        Ok(order)
    }
}

#[automock]
#[async_trait]
pub trait OrdersService: Send + Sync {
    /// Validate, price and persist a submission.
    ///
    /// The server recomputes every amount from the catalogue; client-sent
    /// prices are never trusted. On success the order is `Pending` and its
    /// stock and slot reservation are committed.
    async fn submit_order(
        &self,
        event: Uuid,
        submission: OrderSubmission,
    ) -> Result<Order, OrdersServiceError>;

    /// Move an order along its lifecycle, enforcing transition legality.
    async fn set_status(&self, order: Uuid, status: OrderStatus)
    -> Result<Order, OrdersServiceError>;

    /// Fetch one order with its lines.
    async fn get_order(&self, order: Uuid) -> Result<Order, OrdersServiceError>;
}
