//! Promo code service errors.

use barrique::promo::PromoError;
use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum PromoCodesServiceError {
    /// Another code with the same normalized form exists for this event.
    #[error("promo code already exists")]
    AlreadyExists,

    /// The referenced event does not exist.
    #[error("event not found")]
    UnknownEvent,

    /// The code does not exist for this event.
    #[error("promo code not found")]
    NotFound,

    /// The code exists but did not validate.
    #[error(transparent)]
    Invalid(#[from] PromoError),

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for PromoCodesServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::UniqueViolation) => Self::AlreadyExists,
            Some(ErrorKind::ForeignKeyViolation) => Self::UnknownEvent,
            _ => Self::Sql(error),
        }
    }
}
