//! Event models

use barrique::pricing::{PricingConfig, TieredDiscount};
use jiff::Timestamp;
use uuid::Uuid;

/// A time-boxed fundraising sale. Products, slots, promo codes and orders
/// all belong to exactly one event.
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    pub uuid: Uuid,
    pub name: String,
    pub tiered_discount_enabled: bool,
    pub bundle_size: u32,
    pub delivery_enabled: bool,
    pub delivery_fee: u64,
    pub created_at: Timestamp,
}

impl Event {
    /// The event's pricing settings as the engine's parameter object.
    pub fn pricing_config(&self) -> PricingConfig {
        PricingConfig {
            tiered_discount: self.tiered_discount_enabled.then_some(TieredDiscount {
                bundle_size: self.bundle_size,
            }),
            delivery_fee: self.delivery_fee,
        }
    }
}

/// New Event Model
#[derive(Debug, Clone, PartialEq)]
pub struct NewEvent {
    pub uuid: Uuid,
    pub name: String,
    pub tiered_discount_enabled: bool,
    pub bundle_size: u32,
    pub delivery_enabled: bool,
    pub delivery_fee: u64,
}
