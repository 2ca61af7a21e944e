//! Posts service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

use crate::domain::plans::models::PlanLimit;

#[derive(Debug, Error)]
pub enum PostsServiceError {
    #[error("post already exists")]
    AlreadyExists,

    #[error("post not found")]
    NotFound,

    #[error("business not found")]
    BusinessNotFound,

    #[error("related resource not found")]
    InvalidReference,

    #[error("missing required data")]
    MissingRequiredData,

    #[error("invalid data")]
    InvalidData,

    #[error("plan limit exceeded")]
    PlanLimitExceeded(#[from] PlanLimit),

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for PostsServiceError {
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
