//! Catalogue models

use barrique::{
    availability::SlotAvailability,
    pricing::{PricedLine, ProductKind},
};
use jiff::Timestamp;
use uuid::Uuid;

use crate::domain::events::models::Event;

/// A product row as stored, before any availability derivation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductRecord {
    pub uuid: Uuid,
    pub name: String,
    pub unit_price: u64,
    pub kind: ProductKind,
    /// `None` means unlimited stock.
    pub stock: Option<u32>,
    pub active: bool,
    pub sort_order: i32,
}

impl ProductRecord {
    /// Resolve a requested quantity into a line for the pricing engine,
    /// capturing the current unit price.
    pub fn priced_line(&self, quantity: u32) -> PricedLine {
        PricedLine {
            unit_price: self.unit_price,
            quantity,
            kind: self.kind,
        }
    }
}

/// A product as presented to browsing customers: current availability
/// derived from the non-cancelled orders, inactive products filtered out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogueProduct {
    pub uuid: Uuid,
    pub name: String,
    pub unit_price: u64,
    pub kind: ProductKind,
    /// Units still unallocated; `None` means unlimited.
    pub available: Option<u32>,
    pub sort_order: i32,
}

/// A fulfilment slot with its derived remaining capacity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogueSlot {
    pub uuid: Uuid,
    pub starts_at: Timestamp,
    pub ends_at: Timestamp,
    pub capacity: u32,
    /// Capacity minus the count of non-cancelled orders on this slot. Can
    /// go negative after a capacity reduction.
    pub remaining: i64,
}

impl CatalogueSlot {
    /// A full slot rejects new orders.
    pub fn is_full(&self) -> bool {
        self.remaining <= 0
    }

    /// The slot's state for the availability decision.
    pub fn availability(&self) -> SlotAvailability {
        SlotAvailability {
            slot: self.uuid,
            remaining: self.remaining,
        }
    }
}

/// Everything a customer needs to build a cart.
#[derive(Debug, Clone, PartialEq)]
pub struct Catalogue {
    pub event: Event,
    pub products: Vec<CatalogueProduct>,
    pub slots: Vec<CatalogueSlot>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slot(remaining: i64) -> CatalogueSlot {
        CatalogueSlot {
            uuid: Uuid::now_v7(),
            starts_at: Timestamp::UNIX_EPOCH,
            ends_at: Timestamp::UNIX_EPOCH,
            capacity: 10,
            remaining,
        }
    }

    #[test]
    fn slot_is_full_at_zero_remaining() {
        assert!(slot(0).is_full());
        assert!(slot(-1).is_full());
        assert!(!slot(1).is_full());
    }

    #[test]
    fn priced_line_captures_the_current_price() {
        let product = ProductRecord {
            uuid: Uuid::now_v7(),
            name: "Côtes du Rhône 2022".to_string(),
            unit_price: 1150,
            kind: ProductKind::Standard,
            stock: Some(60),
            active: true,
            sort_order: 1,
        };

        let line = product.priced_line(3);

        assert_eq!(line.unit_price, 1150);
        assert_eq!(line.quantity, 3);
        assert_eq!(line.kind, ProductKind::Standard);
    }
}
