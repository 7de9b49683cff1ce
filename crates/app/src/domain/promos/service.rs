//! Promo codes service.

use async_trait::async_trait;
use barrique::promo;
use mockall::automock;
use uuid::Uuid;

use crate::{
    database::Db,
    domain::{
        events::repository::PgEventsRepository,
        promos::{
            errors::PromoCodesServiceError,
            models::{NewPromoCode, PromoCodeRecord},
            repository::PgPromoCodesRepository,
        },
    },
};

#[derive(Debug, Clone)]
pub struct PgPromoCodesService {
    db: Db,
    repository: PgPromoCodesRepository,
    events: PgEventsRepository,
}

impl PgPromoCodesService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgPromoCodesRepository::new(),
            events: PgEventsRepository::new(),
        }
    }
}

#[async_trait]
impl PromoCodesService for PgPromoCodesService {
    async fn validate_code(&self, event: Uuid, code: &str) -> Result<u64, PromoCodesServiceError> {
        let mut tx = self.db.begin().await?;

        // An unknown event is its own answer, not "code not found".
        match self.events.get_event(&mut tx, event).await {
            Ok(_) => {}
            Err(sqlx::Error::RowNotFound) => return Err(PromoCodesServiceError::UnknownEvent),
            Err(error) => return Err(error.into()),
        }

        let found = self
            .repository
            .find_code(&mut tx, event, &promo::normalize(code))
            .await?;

        tx.commit().await?;

        let discount = promo::validate(found.map(|record| record.as_promo()).as_ref())?;

        Ok(discount)
    }

    async fn create_code(
        &self,
        event: Uuid,
        code: NewPromoCode,
    ) -> Result<PromoCodeRecord, PromoCodesServiceError> {
        let mut tx = self.db.begin().await?;

        let created = self.repository.create_code(&mut tx, event, &code).await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn deactivate_code(&self, event: Uuid, code: &str) -> Result<(), PromoCodesServiceError> {
        let mut tx = self.db.begin().await?;

        let rows_affected = self
            .repository
            .deactivate_code(&mut tx, event, &promo::normalize(code))
            .await?;

        if rows_affected == 0 {
            return Err(PromoCodesServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }

    async fn list_codes(&self, event: Uuid) -> Result<Vec<PromoCodeRecord>, PromoCodesServiceError> {
        let mut tx = self.db.begin().await?;

        let codes = self.repository.list_codes(&mut tx, event).await?;

        tx.commit().await?;

        Ok(codes)
    }
}

#[automock]
#[async_trait]
pub trait PromoCodesService: Send + Sync {
    /// Validate a customer-entered code and return its discount in cents.
    ///
    /// Read-only: codes are reusable coupons, never consumed.
    async fn validate_code(&self, event: Uuid, code: &str) -> Result<u64, PromoCodesServiceError>;

    /// Create a new code for an event.
    async fn create_code(
        &self,
        event: Uuid,
        code: NewPromoCode,
    ) -> Result<PromoCodeRecord, PromoCodesServiceError>;

    /// Deactivate a code; it keeps its history but stops validating.
    async fn deactivate_code(&self, event: Uuid, code: &str) -> Result<(), PromoCodesServiceError>;

    /// All codes for an event, active or not.
    async fn list_codes(&self, event: Uuid) -> Result<Vec<PromoCodeRecord>, PromoCodesServiceError>;
}
