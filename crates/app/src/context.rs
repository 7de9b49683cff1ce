//! App Context

use std::sync::Arc;

use thiserror::Error;

use crate::{
    database::{self, Db},
    domain::{
        catalogue::{CatalogueService, PgCatalogueService},
        events::{EventsService, PgEventsService},
        orders::{OrdersService, PgOrdersService},
        promos::{PgPromoCodesService, PromoCodesService},
    },
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),
}

#[derive(Clone)]
pub struct AppContext {
    pub catalogue: Arc<dyn CatalogueService>,
    pub events: Arc<dyn EventsService>,
    pub orders: Arc<dyn OrdersService>,
    pub promos: Arc<dyn PromoCodesService>,
}

impl AppContext {
    /// Build application context from a database URL.
    ///
    /// # Errors
    ///
    /// Returns an error when establishing a database connection fails.
    pub async fn from_database_url(url: &str) -> Result<Self, AppInitError> {
        let pool = database::connect(url)
            .await
            .map_err(AppInitError::Database)?;

        let db = Db::new(pool);

        Ok(Self {
            catalogue: Arc::new(PgCatalogueService::new(db.clone())),
            events: Arc::new(PgEventsService::new(db.clone())),
            orders: Arc::new(PgOrdersService::new(db.clone())),
            promos: Arc::new(PgPromoCodesService::new(db)),
        })
    }
}
