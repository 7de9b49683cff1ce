//! Barrique domain concerns

pub mod catalogue;
pub mod events;
pub mod orders;
pub mod promos;

pub(crate) mod rows;
