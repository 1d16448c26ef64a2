//! Candidate store errors.

use std::num::TryFromIntError;

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

/// Candidate store failures.
#[derive(Debug, Error)]
pub enum CandidateStoreError {
    /// No candidate has the requested UUID.
    #[error("candidate not found")]
    NotFound,

    /// The stored version no longer matches the expected one, or the candidate is no
    /// longer pending. Nothing was written.
    #[error("candidate was modified concurrently")]
    Conflict,

    /// Contact email already used by another candidate.
    #[error("a candidate with this contact email already exists")]
    DuplicateEmail,

    /// A required column was null.
    #[error("missing required data")]
    MissingRequiredData,

    /// A table check rejected the row.
    #[error("invalid data")]
    InvalidData,

    /// Any other database failure.
    #[error("storage error")]
    Sql(#[source] Error),

    /// A stored number did not fit its Rust type.
    #[error("numeric value out of range")]
    OutOfRange(#[from] TryFromIntError),
}

impl From<Error> for CandidateStoreError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::UniqueViolation) => Self::DuplicateEmail,
            Some(ErrorKind::NotNullViolation) => Self::MissingRequiredData,
            Some(ErrorKind::CheckViolation) => Self::InvalidData,
            Some(ErrorKind::ForeignKeyViolation | ErrorKind::Other | _) | None => Self::Sql(error),
        }
    }
}
