//! Availability
//!
//! The decision half of the availability check. Carts live client-side for
//! an unbounded time, so the quantities they carry may be stale; callers
//! re-read current stock and slot usage (from the set of non-cancelled
//! orders) and this module decides whether the submission still fits. The
//! same decision runs twice: as a courtesy before submission and
//! authoritatively inside the order-creation transaction.

use thiserror::Error;
use uuid::Uuid;

/// A cart line joined with the product's current availability.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineAvailability {
    /// Product being requested.
    pub product: Uuid,

    /// Requested quantity.
    pub requested: u32,

    /// Units still unallocated to any non-cancelled order; `None` means the
    /// product has unlimited stock.
    pub available: Option<u32>,
}

/// A slot's current remaining capacity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotAvailability {
    /// Slot being requested.
    pub slot: Uuid,

    /// Configured capacity minus the count of non-cancelled orders already
    /// referencing the slot.
    pub remaining: i64,
}

impl SlotAvailability {
    /// A slot with remaining capacity ≤ 0 rejects new orders.
    pub fn is_full(&self) -> bool {
        self.remaining <= 0
    }
}

/// Why a submission cannot be satisfied.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum AvailabilityError {
    /// A line asks for more units than the product has left. Carries the
    /// current availability so the caller can re-offer the reduced quantity.
    #[error("insufficient stock for product {product}: {available} available")]
    InsufficientStock {
        /// The product that cannot be satisfied.
        product: Uuid,
        /// Units still available for it.
        available: u32,
    },

    /// The chosen slot has no remaining capacity.
    #[error("slot {slot} is full")]
    SlotFull {
        /// The slot that is full.
        slot: Uuid,
    },
}

/// Decide whether a submission fits current stock and slot capacity.
///
/// Each order consumes exactly one slot capacity unit regardless of cart
/// size. The first failing line wins; lines are checked in cart order.
pub fn check(
    lines: &[LineAvailability],
    slot: Option<SlotAvailability>,
) -> Result<(), AvailabilityError> {
    for line in lines {
        if let Some(available) = line.available
            && line.requested > available
        {
            return Err(AvailabilityError::InsufficientStock {
                product: line.product,
                available,
            });
        }
    }

    if let Some(slot) = slot
        && slot.is_full()
    {
        return Err(AvailabilityError::SlotFull { slot: slot.slot });
    }

    Ok(())
}
