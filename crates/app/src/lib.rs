//! Barrique application services and persistence.
//!
//! PostgreSQL-backed catalogue, promo-code and order services around the
//! pure engine in the `barrique` crate.

pub mod context;
pub mod database;
pub mod domain;

#[cfg(test)]
mod test;
