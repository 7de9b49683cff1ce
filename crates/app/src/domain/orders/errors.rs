//! Orders service errors.

use barrique::{availability::AvailabilityError, promo::PromoError, status::InvalidTransition};
use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error as ThisError;
use uuid::Uuid;

#[derive(Debug, ThisError)]
pub enum OrdersServiceError {
    /// Malformed or missing submission fields; rejected before any write.
    #[error("invalid submission: {0}")]
    Validation(&'static str),

    /// The referenced event does not exist.
    #[error("event not found")]
    UnknownEvent,

    /// A cart line references a product that does not exist (or is no
    /// longer active) for this event.
    #[error("unknown product {0}")]
    UnknownProduct(Uuid),

    /// The referenced slot does not exist for this event.
    #[error("unknown slot {0}")]
    UnknownSlot(Uuid),

    /// Stock or slot capacity cannot satisfy the submission.
    #[error(transparent)]
    Unavailable(#[from] AvailabilityError),

    /// The supplied promo code did not validate.
    #[error(transparent)]
    Promo(#[from] PromoError),

    /// An illegal status transition was requested.
    #[error(transparent)]
    Status(#[from] InvalidTransition),

    /// The order does not exist.
    #[error("order not found")]
    NotFound,

    /// The write lost a race against a concurrent submission.
    #[error("submission conflicted with a concurrent write")]
    Conflict(#[source] Error),

    #[error("storage error")]
    Sql(#[source] Error),
}

enum SqlFailure {
    NotFound,
    Conflict,
    Other,
}

impl From<Error> for OrdersServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        let failure = match error.as_database_error() {
            // Serialization failures and deadlocks mean another submission
            // won the race; unique violations can only come from the
            // sequence-derived identifiers, same story.
            Some(db) if matches!(db.code().as_deref(), Some("40001" | "40P01")) => {
                SqlFailure::Conflict
            }
            Some(db) => match db.kind() {
                ErrorKind::UniqueViolation => SqlFailure::Conflict,
                ErrorKind::ForeignKeyViolation => SqlFailure::NotFound,
                _ => SqlFailure::Other,
            },
            None => SqlFailure::Other,
        };

        match failure {
            SqlFailure::NotFound => Self::NotFound,
            SqlFailure::Conflict => Self::Conflict(error),
            SqlFailure::Other => Self::Sql(error),
        }
    }
}
