//! Barrique
//!
//! Barrique is the pricing and reservation engine behind a time-boxed
//! fundraising sale: carts are priced under a tiered quantity discount and an
//! optional promotional code, and submissions are checked against product
//! stock and fulfilment-slot capacity. Everything in this crate is pure and
//! synchronous; persistence and transport live in the companion crates.

pub mod availability;
pub mod cart;
pub mod codes;
pub mod payment;
pub mod pricing;
pub mod promo;
pub mod status;
