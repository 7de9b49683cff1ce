//! Cart lines
//!
//! A cart is client-owned and untrusted: it arrives at submission time as a
//! flat list of product/quantity pairs, possibly stale and possibly holding
//! the same product more than once. The helpers here normalise it before
//! pricing and availability checks.

use uuid::Uuid;

/// A single requested product/quantity pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CartLine {
    /// Product being requested.
    pub product: Uuid,

    /// Requested quantity of that product.
    pub quantity: u32,
}

impl CartLine {
    /// Create a new cart line.
    pub fn new(product: Uuid, quantity: u32) -> Self {
        Self { product, quantity }
    }
}

/// Collapse duplicate products into single lines, preserving first-seen
/// order and summing quantities (saturating).
pub fn merged(lines: &[CartLine]) -> Vec<CartLine> {
    let mut out: Vec<CartLine> = Vec::with_capacity(lines.len());

    for line in lines {
        match out.iter_mut().find(|l| l.product == line.product) {
            Some(existing) => {
                existing.quantity = existing.quantity.saturating_add(line.quantity);
            }
            None => out.push(*line),
        }
    }

    out
}

/// Total quantity across all lines.
pub fn total_quantity(lines: &[CartLine]) -> u64 {
    lines.iter().map(|l| u64::from(l.quantity)).sum()
}
