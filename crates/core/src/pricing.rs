//! Pricing
//!
//! Pure cart pricing: subtotal, tiered "N for N−1" quantity discount, flat
//! promotional discount and delivery fee. All amounts are integer minor
//! currency units (cents); the same inputs always produce the same totals,
//! so the engine is safe to re-run on every cart change in a live UI and
//! again, authoritatively, at submission time.

use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};
use serde::{Deserialize, Serialize};

/// What kind of catalogue entry a product is.
///
/// The kind decides tiered-discount eligibility: standard items and bundled
/// menus count towards the bundle threshold, raffle tickets and add-ons do
/// not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductKind {
    /// A standard catalogue item (a bottle, a case).
    Standard,

    /// A bundled menu of several items sold as one line.
    Menu,

    /// A raffle ticket.
    RaffleTicket,

    /// An add-on to another purchase (gift wrap, glasses).
    AddOn,
}

impl ProductKind {
    /// Whether lines of this kind count towards the tiered discount.
    pub fn discount_eligible(self) -> bool {
        match self {
            Self::Standard | Self::Menu => true,
            Self::RaffleTicket | Self::AddOn => false,
        }
    }

    /// Database/text representation.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Menu => "menu",
            Self::RaffleTicket => "raffle_ticket",
            Self::AddOn => "add_on",
        }
    }

    /// Parse the database/text representation.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "standard" => Some(Self::Standard),
            "menu" => Some(Self::Menu),
            "raffle_ticket" => Some(Self::RaffleTicket),
            "add_on" => Some(Self::AddOn),
            _ => None,
        }
    }
}

/// How the order is fulfilled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Fulfilment {
    /// Collected by the customer during a pickup slot.
    Pickup,

    /// Delivered to the customer during a delivery slot.
    Delivery,

    /// Consumed on site during the event itself.
    OnSite,
}

impl Fulfilment {
    /// Database/text representation.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pickup => "pickup",
            Self::Delivery => "delivery",
            Self::OnSite => "on_site",
        }
    }

    /// Parse the database/text representation.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "pickup" => Some(Self::Pickup),
            "delivery" => Some(Self::Delivery),
            "on_site" => Some(Self::OnSite),
            _ => None,
        }
    }
}

/// Tiered "N for N−1" discount settings: every full bundle of `bundle_size`
/// eligible units earns one average-priced unit free.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TieredDiscount {
    /// Units per bundle (the `N` in "N for N−1"); 10 and 12 are the usual
    /// configurations. Values below 2 disable the discount.
    pub bundle_size: u32,
}

/// Event-level pricing settings, passed explicitly so the engine stays pure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PricingConfig {
    /// Tiered quantity discount, when the event runs one.
    pub tiered_discount: Option<TieredDiscount>,

    /// Flat delivery fee in cents, charged only for delivery fulfilment.
    pub delivery_fee: u64,
}

/// A cart line resolved against the catalogue: quantity plus the unit price
/// and kind in effect at pricing time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PricedLine {
    /// Unit price in cents.
    pub unit_price: u64,

    /// Requested quantity.
    pub quantity: u32,

    /// Product kind, for discount eligibility.
    pub kind: ProductKind,
}

/// The full pricing breakdown of a cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Totals {
    /// Σ unit price × quantity, in cents.
    pub subtotal: u64,

    /// Tiered quantity discount, in cents.
    pub tiered_discount: u64,

    /// Flat promotional-code discount, in cents.
    pub promo_discount: u64,

    /// Delivery fee, in cents.
    pub delivery_fee: u64,

    /// max(0, subtotal − tiered + fee − promo), in cents.
    pub total: u64,
}

/// Price a cart.
///
/// `promo_discount` is the flat amount of an already-validated promotional
/// code (zero when none was applied); it is independent of and additive with
/// the tiered discount. The total is floored at zero.
pub fn compute_totals(
    lines: &[PricedLine],
    config: &PricingConfig,
    fulfilment: Fulfilment,
    promo_discount: u64,
) -> Totals {
    let subtotal: u64 = lines
        .iter()
        .map(|line| line.unit_price.saturating_mul(u64::from(line.quantity)))
        .sum();

    let tiered_discount = config
        .tiered_discount
        .map_or(0, |tier| tiered_discount(lines, tier.bundle_size));

    let delivery_fee = match fulfilment {
        Fulfilment::Delivery => config.delivery_fee,
        Fulfilment::Pickup | Fulfilment::OnSite => 0,
    };

    let total = subtotal
        .saturating_sub(tiered_discount)
        .saturating_add(delivery_fee)
        .saturating_sub(promo_discount);

    Totals {
        subtotal,
        tiered_discount,
        promo_discount,
        delivery_fee,
        total,
    }
}

/// The tiered discount for a cart, in cents.
///
/// With `total_qty` eligible units and bundle size `N`, `total_qty / N`
/// average-priced units come free. The discount is the free units times the
/// average eligible unit price, rounded half-up to the nearest *whole*
/// currency unit — deliberately coarser than cent precision, so it reads
/// cleanly on a receipt. The rational arithmetic is exact; only the final
/// rounding loses precision.
fn tiered_discount(lines: &[PricedLine], bundle_size: u32) -> u64 {
    if bundle_size < 2 {
        return 0;
    }

    let eligible = lines.iter().filter(|line| line.kind.discount_eligible());

    let total_qty: u64 = eligible
        .clone()
        .map(|line| u64::from(line.quantity))
        .sum();

    let eligible_subtotal: u64 = eligible
        .map(|line| line.unit_price.saturating_mul(u64::from(line.quantity)))
        .sum();

    let free_units = total_qty / u64::from(bundle_size);

    if free_units == 0 {
        return 0;
    }

    let whole_units = (Decimal::from(free_units) * Decimal::from(eligible_subtotal)
        / Decimal::from(total_qty)
        / Decimal::from(100_u32))
    .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);

    (whole_units * Decimal::from(100_u32))
        .to_u64()
        .unwrap_or_default()
}
