//! Order endpoints

pub(crate) mod create;
pub(crate) mod errors;
pub(crate) mod get;
