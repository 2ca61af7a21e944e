//! Businesses service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

use crate::domain::plans::models::PlanLimit;

#[derive(Debug, Error)]
pub enum BusinessesServiceError {
    #[error("route name already exists")]
    AlreadyExists,

    #[error("business not found")]
    NotFound,

    #[error("related resource not found")]
    InvalidReference,

    #[error("missing required data")]
    MissingRequiredData,

    #[error("invalid data")]
    InvalidData,

    #[error("route name must be a lower-case slug")]
    InvalidRouteName,

    #[error("user is not allowed to create businesses")]
    NotAllowed,

    #[error("plan limit exceeded")]
    PlanLimitExceeded(#[from] PlanLimit),

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for BusinessesServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::UniqueViolation) => Self::AlreadyExists,
            Some(ErrorKind::ForeignKeyViolation) => Self::InvalidReference,
            Some(ErrorKind::NotNullViolation) => Self::MissingRequiredData,
            Some(ErrorKind::CheckViolation) => Self::InvalidData,
            Some(ErrorKind::Other | _) | None => Self::Sql(error),
        }
    }
}
