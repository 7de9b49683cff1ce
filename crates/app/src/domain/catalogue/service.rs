//! Catalogue service.

use async_trait::async_trait;
use mockall::automock;
use uuid::Uuid;

use crate::{
    database::Db,
    domain::{
        catalogue::{errors::CatalogueServiceError, models::Catalogue,
            repository::PgCatalogueRepository},
        events::repository::PgEventsRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgCatalogueService {
    db: Db,
    events_repository: PgEventsRepository,
    repository: PgCatalogueRepository,
}

impl PgCatalogueService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            events_repository: PgEventsRepository::new(),
            repository: PgCatalogueRepository::new(),
        }
    }
}

#[async_trait]
impl CatalogueService for PgCatalogueService {
    async fn get_catalogue(&self, event: Uuid) -> Result<Catalogue, CatalogueServiceError> {
        let mut tx = self.db.begin().await?;

        let event = self.events_repository.get_event(&mut tx, event).await?;
        let products = self.repository.list_products(&mut tx, event.uuid).await?;
        let slots = self.repository.list_slots(&mut tx, event.uuid).await?;

        tx.commit().await?;

        Ok(Catalogue {
            event,
            products,
            slots,
        })
    }
}

#[automock]
#[async_trait]
pub trait CatalogueService: Send + Sync {
    /// The event's active products and slots, with availability derived
    /// from the current set of non-cancelled orders.
    async fn get_catalogue(&self, event: Uuid) -> Result<Catalogue, CatalogueServiceError>;
}
