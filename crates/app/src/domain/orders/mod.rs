//! Orders

pub mod errors;
pub mod models;
pub(crate) mod repository;
pub mod service;
pub(crate) mod submission;

pub use errors::OrdersServiceError;
pub use service::*;
