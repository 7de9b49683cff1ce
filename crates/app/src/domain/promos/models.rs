//! Promo code models

use jiff::Timestamp;
use uuid::Uuid;

/// A promo code row.
#[derive(Debug, Clone, PartialEq)]
pub struct PromoCodeRecord {
    pub uuid: Uuid,
    pub event: Uuid,
    pub code: String,
    pub discount: u64,
    pub active: bool,
    pub created_at: Timestamp,
}

impl PromoCodeRecord {
    /// The validation view of this row.
    pub fn as_promo(&self) -> barrique::promo::PromoCode {
        barrique::promo::PromoCode {
            code: self.code.clone(),
            discount: self.discount,
            active: self.active,
        }
    }
}

/// New promo code data.
#[derive(Debug, Clone, PartialEq)]
pub struct NewPromoCode {
    pub uuid: Uuid,
    pub code: String,
    pub discount: u64,
}
