//! Promo code endpoints

pub(crate) mod validate;
