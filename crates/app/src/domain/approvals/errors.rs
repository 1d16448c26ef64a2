//! Approval service errors.

use thiserror::Error;

use crate::{billing::BillingServiceError, domain::candidates::CandidateStoreError};

/// Terminal outcomes of an approval decision other than success.
#[derive(Debug, Error)]
pub enum ApprovalServiceError {
    /// No candidate has the requested UUID.
    #[error("candidate not found")]
    NotFound,

    /// The candidate was no longer pending when this call reached its decisive check.
    /// Nothing was written by this call.
    #[error("candidate already processed")]
    AlreadyProcessed,

    /// The provider could not be created. The candidate was left untouched.
    #[error("billing service unavailable")]
    BillingUnavailable(#[source] BillingServiceError),

    /// Storage failed for a reason other than not-found or a lost race.
    #[error("candidate storage failed")]
    Storage(#[source] CandidateStoreError),
}

impl ApprovalServiceError {
    /// Whether the whole approval may succeed if attempted again later.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::BillingUnavailable(_))
    }
}

impl From<BillingServiceError> for ApprovalServiceError {
    fn from(error: BillingServiceError) -> Self {
        Self::BillingUnavailable(error)
    }
}

impl From<CandidateStoreError> for ApprovalServiceError {
    fn from(error: CandidateStoreError) -> Self {
        match error {
            CandidateStoreError::NotFound => Self::NotFound,
            CandidateStoreError::Conflict => Self::AlreadyProcessed,
            other => Self::Storage(other),
        }
    }
}
