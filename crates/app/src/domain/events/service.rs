//! Events service

use async_trait::async_trait;
use mockall::automock;
use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error as ThisError;
use uuid::Uuid;

use crate::{
    database::Db,
    domain::events::{
        models::{Event, NewEvent},
        repository::PgEventsRepository,
    },
};

#[derive(Debug, ThisError)]
pub enum EventsServiceError {
    #[error("event already exists")]
    AlreadyExists,

    #[error("event not found")]
    NotFound,

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for EventsServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::UniqueViolation) => Self::AlreadyExists,
            _ => Self::Sql(error),
        }
    }
}

#[derive(Debug, Clone)]
pub struct PgEventsService {
    db: Db,
    repository: PgEventsRepository,
}

impl PgEventsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgEventsRepository::new(),
        }
    }
}

#[async_trait]
impl EventsService for PgEventsService {
    async fn get_event(&self, uuid: Uuid) -> Result<Event, EventsServiceError> {
        let mut tx = self.db.begin().await?;

        let event = self.repository.get_event(&mut tx, uuid).await?;

        tx.commit().await?;

        Ok(event)
    }

    async fn create_event(&self, event: NewEvent) -> Result<Event, EventsServiceError> {
        let mut tx = self.db.begin().await?;

        self.repository.create_event(&mut tx, &event).await?;
        let created = self.repository.get_event(&mut tx, event.uuid).await?;

        tx.commit().await?;

        Ok(created)
    }
}

#[automock]
#[async_trait]
pub trait EventsService: Send + Sync {
    /// Retrieve a single event.
    async fn get_event(&self, uuid: Uuid) -> Result<Event, EventsServiceError>;

    /// Create a new sale event.
    async fn create_event(&self, event: NewEvent) -> Result<Event, EventsServiceError>;
}
