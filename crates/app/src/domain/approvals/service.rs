//! Approvals Service

use std::{
    fmt::{Debug, Formatter, Result as FmtResult},
    sync::Arc,
};

use async_trait::async_trait;
use mockall::automock;
use tracing::{Span, info, warn};

use crate::{
    billing::BillingClient,
    domain::{
        approvals::errors::ApprovalServiceError,
        candidates::{
            CandidateStore, CandidateStoreError,
            data::CandidateMutation,
            records::{CandidateRecord, CandidateUuid},
        },
    },
};

/// Moves pending candidates to a terminal state, at most once per candidate.
///
/// The only coordination between concurrent callers (including other processes) is the
/// store's version-guarded update. Nothing is locked and nothing is retried here.
#[derive(Clone)]
pub struct CandidateApprovalService {
    store: Arc<dyn CandidateStore>,
    billing: Arc<dyn BillingClient>,
}

impl CandidateApprovalService {
    /// Service over the given store and billing client.
    #[must_use]
    pub fn new(store: Arc<dyn CandidateStore>, billing: Arc<dyn BillingClient>) -> Self {
        Self { store, billing }
    }

    async fn load_pending(
        &self,
        candidate: CandidateUuid,
    ) -> Result<CandidateRecord, ApprovalServiceError> {
        let current = self.store.load(candidate).await?;

        if current.status.is_terminal() {
            info!(status = %current.status, "candidate already processed");

            return Err(ApprovalServiceError::AlreadyProcessed);
        }

        Ok(current)
    }
}

impl Debug for CandidateApprovalService {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("CandidateApprovalService")
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl ApprovalService for CandidateApprovalService {
    #[tracing::instrument(
        name = "approvals.service.approve",
        skip(self),
        fields(
            candidate_uuid = %candidate,
            provider_id = tracing::field::Empty
        ),
        err
    )]
    async fn approve(
        &self,
        candidate: CandidateUuid,
    ) -> Result<CandidateRecord, ApprovalServiceError> {
        let current = self.load_pending(candidate).await?;

        let provider_id = self.billing.create_provider(&current.company_name).await?;

        Span::current().record("provider_id", tracing::field::display(provider_id));

        match self
            .store
            .conditional_update(
                candidate,
                current.version,
                CandidateMutation::approve(provider_id),
            )
            .await
        {
            Ok(updated) => {
                info!(version = updated.version, "approved candidate");

                Ok(updated)
            }
            Err(CandidateStoreError::Conflict) => {
                // The provider created above is left unreferenced.
                warn!(%provider_id, "candidate changed during approval, discarding provider");

                Err(ApprovalServiceError::AlreadyProcessed)
            }
            Err(error) => Err(error.into()),
        }
    }

    #[tracing::instrument(
        name = "approvals.service.reject",
        skip(self, reason),
        fields(candidate_uuid = %candidate, has_reason = reason.is_some()),
        err
    )]
    async fn reject(
        &self,
        candidate: CandidateUuid,
        reason: Option<String>,
    ) -> Result<CandidateRecord, ApprovalServiceError> {
        let current = self.load_pending(candidate).await?;

        let updated = self
            .store
            .conditional_update(candidate, current.version, CandidateMutation::reject(reason))
            .await?;

        info!(version = updated.version, "rejected candidate");

        Ok(updated)
    }
}

#[automock]
#[async_trait]
/// Candidate approval decisions.
pub trait ApprovalService: Send + Sync {
    /// Creates the candidate's provider in billing, then marks it approved.
    ///
    /// Fails with [`ApprovalServiceError::AlreadyProcessed`] if the candidate is not
    /// pending, or stopped being pending while the provider was being created.
    async fn approve(
        &self,
        candidate: CandidateUuid,
    ) -> Result<CandidateRecord, ApprovalServiceError>;

    /// Marks a pending candidate rejected, with an optional reason.
    async fn reject(
        &self,
        candidate: CandidateUuid,
        reason: Option<String>,
    ) -> Result<CandidateRecord, ApprovalServiceError>;
}
