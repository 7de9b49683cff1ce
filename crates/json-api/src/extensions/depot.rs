//! Depot access helpers.

use std::any::Any;

use salvo::prelude::{Depot, StatusError};

/// Fetch injected state from the depot.
///
/// The router injects `State` on every route, so a missing entry is a
/// wiring bug in this server, not something the customer caused; it
/// surfaces as a plain 500.
pub(crate) trait DepotExt {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError>;
}

impl DepotExt for Depot {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError> {
        self.obtain::<T>()
            .map_err(|_missing| StatusError::internal_server_error())
    }
}
