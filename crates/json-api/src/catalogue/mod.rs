//! Catalogue endpoints

pub(crate) mod errors;
pub(crate) mod get;
