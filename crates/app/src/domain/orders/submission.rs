//! Submission pricing pipeline
//!
//! The pure middle of the order writer: given the submission and a snapshot
//! of the rows read (and locked) inside the transaction, validate the
//! fields, decide availability and produce the authoritative pricing. Both
//! the Postgres service and the in-memory test store run this exact
//! pipeline, so the decision logic cannot drift between them.

use std::collections::HashMap;

use barrique::{availability, availability::LineAvailability, cart, pricing, promo};
use uuid::Uuid;

use crate::domain::{
    catalogue::models::ProductRecord,
    events::models::Event,
    orders::{
        errors::OrdersServiceError,
        models::{NewOrderLine, OrderSubmission, SlotOccupancy},
    },
    promos::models::PromoCodeRecord,
};

/// The rows backing one submission, read under row locks.
#[derive(Debug, Clone)]
pub(crate) struct SubmissionSnapshot {
    pub event: Event,
    /// Locked product rows for the requested products. Missing entries mean
    /// the product does not exist for this event.
    pub products: Vec<ProductRecord>,
    /// Units already allocated to non-cancelled orders, per product.
    pub allocated: HashMap<Uuid, u64>,
    /// Locked occupancy of the requested slot; `None` when no slot was
    /// requested or the slot does not exist.
    pub slot: Option<SlotOccupancy>,
    /// Lookup result for the supplied promo code.
    pub promo: Option<PromoCodeRecord>,
}

/// The output of the pipeline: captured-price lines and the authoritative
/// totals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PricedCart {
    pub lines: Vec<NewOrderLine>,
    pub totals: pricing::Totals,
}

/// Field-level validation, run before anything is locked or written.
pub(crate) fn validate(
    submission: &OrderSubmission,
    event: &Event,
) -> Result<(), OrdersServiceError> {
    if submission.customer.name.trim().is_empty() {
        return Err(OrdersServiceError::Validation("customer name is required"));
    }

    let email = submission.customer.email.trim();
    if email.is_empty() || !email.contains('@') {
        return Err(OrdersServiceError::Validation("customer email is invalid"));
    }

    if submission.lines.is_empty() {
        return Err(OrdersServiceError::Validation("cart is empty"));
    }

    if submission.lines.iter().any(|line| line.quantity == 0) {
        return Err(OrdersServiceError::Validation(
            "line quantities must be positive",
        ));
    }

    if submission.fulfilment == pricing::Fulfilment::Delivery && !event.delivery_enabled {
        return Err(OrdersServiceError::Validation(
            "delivery is not offered for this event",
        ));
    }

    if submission.fulfilment == pricing::Fulfilment::OnSite && submission.slot.is_some() {
        return Err(OrdersServiceError::Validation(
            "on-site orders take no fulfilment slot",
        ));
    }

    Ok(())
}

/// Validate, availability-check and price a submission against its
/// snapshot.
pub(crate) fn price_submission(
    submission: &OrderSubmission,
    snapshot: &SubmissionSnapshot,
) -> Result<PricedCart, OrdersServiceError> {
    validate(submission, &snapshot.event)?;

    let requested = cart::merged(&submission.lines);

    // Resolve every line against the locked product rows; a product missing
    // from the snapshot no longer exists (or was deactivated) for the event.
    let mut resolved = Vec::with_capacity(requested.len());

    for line in &requested {
        let product = snapshot
            .products
            .iter()
            .find(|p| p.uuid == line.product && p.active)
            .ok_or(OrdersServiceError::UnknownProduct(line.product))?;

        resolved.push((product, line.quantity));
    }

    if let Some(slot) = submission.slot
        && snapshot.slot.is_none()
    {
        return Err(OrdersServiceError::UnknownSlot(slot));
    }

    let line_availability: Vec<LineAvailability> = resolved
        .iter()
        .map(|(product, quantity)| LineAvailability {
            product: product.uuid,
            requested: *quantity,
            available: product.stock.map(|stock| {
                let allocated = snapshot.allocated.get(&product.uuid).copied().unwrap_or(0);

                u32::try_from(u64::from(stock).saturating_sub(allocated)).unwrap_or(u32::MAX)
            }),
        })
        .collect();

    availability::check(
        &line_availability,
        snapshot.slot.map(|slot| slot.availability()),
    )?;

    let promo_discount = match &submission.promo_code {
        Some(_) => promo::validate(snapshot.promo.as_ref().map(PromoCodeRecord::as_promo).as_ref())?,
        None => 0,
    };

    let priced: Vec<pricing::PricedLine> = resolved
        .iter()
        .map(|(product, quantity)| product.priced_line(*quantity))
        .collect();

    let totals = pricing::compute_totals(
        &priced,
        &snapshot.event.pricing_config(),
        submission.fulfilment,
        promo_discount,
    );

    let lines = resolved
        .into_iter()
        .map(|(product, quantity)| NewOrderLine {
            product: product.uuid,
            quantity,
            unit_price: product.unit_price,
        })
        .collect();

    Ok(PricedCart { lines, totals })
}
