//! Candidate store.

use async_trait::async_trait;
use mockall::automock;
use tracing::debug;

use crate::{
    database::Db,
    domain::candidates::{
        errors::CandidateStoreError,
        data::{CandidateFilter, CandidateMutation, CandidatePage, NewCandidate},
        records::{CandidateRecord, CandidateUuid},
        repository::PgCandidatesRepository,
    },
};

/// `PostgreSQL`-backed [`CandidateStore`].
#[derive(Debug, Clone)]
pub struct PgCandidateStore {
    db: Db,
    repository: PgCandidatesRepository,
}

impl PgCandidateStore {
    /// Store over the given pool.
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgCandidatesRepository::new(),
        }
    }
}

#[async_trait]
impl CandidateStore for PgCandidateStore {
    async fn load(&self, candidate: CandidateUuid) -> Result<CandidateRecord, CandidateStoreError> {
        let mut tx = self.db.begin_transaction().await?;

        let record = self.repository.get_candidate(&mut tx, candidate).await?;

        tx.commit().await?;

        Ok(record)
    }

    #[tracing::instrument(
        name = "candidates.store.conditional_update",
        skip(self, mutation),
        fields(candidate_uuid = %candidate, status = %mutation.status),
        err
    )]
    async fn conditional_update(
        &self,
        candidate: CandidateUuid,
        expected_version: u64,
        mutation: CandidateMutation,
    ) -> Result<CandidateRecord, CandidateStoreError> {
        let mut tx = self.db.begin_transaction().await?;

        let updated = self
            .repository
            .update_candidate(&mut tx, candidate, expected_version, mutation)
            .await?;

        let Some(updated) = updated else {
            debug!(expected_version, "version or status guard did not match");

            return Err(CandidateStoreError::Conflict);
        };

        tx.commit().await?;

        Ok(updated)
    }

    async fn create(&self, candidate: NewCandidate) -> Result<CandidateRecord, CandidateStoreError> {
        let mut tx = self.db.begin_transaction().await?;

        let created = self.repository.create_candidate(&mut tx, candidate).await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn list(
        &self,
        filter: CandidateFilter,
        limit: u32,
        offset: u32,
    ) -> Result<CandidatePage, CandidateStoreError> {
        let mut tx = self.db.begin_snapshot_transaction().await?;

        let items = self
            .repository
            .list_candidates(&mut tx, filter, limit, offset)
            .await?;

        let total = self.repository.count_candidates(&mut tx, filter).await?;

        tx.commit().await?;

        Ok(CandidatePage {
            items,
            total: u64::try_from(total)?,
        })
    }
}

#[automock]
#[async_trait]
/// Durable candidate access with an optimistic-locking update primitive.
pub trait CandidateStore: Send + Sync {
    /// Reads the current row, including its version.
    async fn load(&self, candidate: CandidateUuid) -> Result<CandidateRecord, CandidateStoreError>;

    /// Applies `mutation` and bumps the version by one, in a single statement guarded
    /// by `expected_version` and the row still being pending.
    ///
    /// Returns [`CandidateStoreError::Conflict`] without writing anything when the
    /// stored version differs, the row is already approved or rejected, or the row is
    /// gone.
    async fn conditional_update(
        &self,
        candidate: CandidateUuid,
        expected_version: u64,
        mutation: CandidateMutation,
    ) -> Result<CandidateRecord, CandidateStoreError>;

    /// Inserts a new pending candidate at version 1.
    async fn create(&self, candidate: NewCandidate) -> Result<CandidateRecord, CandidateStoreError>;

    /// Lists candidates matching `filter`, newest first.
    async fn list(
        &self,
        filter: CandidateFilter,
        limit: u32,
        offset: u32,
    ) -> Result<CandidatePage, CandidateStoreError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{
        domain::candidates::records::{CandidateStatus, Product, ProviderId},
        test::{TestContext, helpers::new_candidate},
    };

    use super::*;

    #[tokio::test]
    async fn create_candidate_starts_pending_at_version_one() -> TestResult {
        let ctx = TestContext::new().await;
        let new = new_candidate("Grove & Sons", "grove@example.com");
        let uuid = new.uuid;

        let candidate = ctx.store.create(new).await?;

        assert_eq!(candidate.uuid, uuid);
        assert_eq!(candidate.status, CandidateStatus::Pending);
        assert_eq!(candidate.version, 1);
        assert!(candidate.provider_id.is_none());
        assert!(candidate.rejection_reason.is_none());
        assert_eq!(candidate.products, vec![Product::Orange, Product::Grapefruit]);

        Ok(())
    }

    #[tokio::test]
    async fn create_candidate_duplicate_email_ignores_case() -> TestResult {
        let ctx = TestContext::new().await;

        ctx.store
            .create(new_candidate("Grove & Sons", "grove@example.com"))
            .await?;

        let result = ctx
            .store
            .create(new_candidate("Other Grove", "GROVE@example.com"))
            .await;

        assert!(
            matches!(result, Err(CandidateStoreError::DuplicateEmail)),
            "expected DuplicateEmail, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn create_candidate_rejects_zero_trucks() {
        let ctx = TestContext::new().await;

        let mut new = new_candidate("Empty Fleet", "fleet@example.com");
        new.truck_count = 0;

        let result = ctx.store.create(new).await;

        assert!(
            matches!(result, Err(CandidateStoreError::InvalidData)),
            "expected InvalidData, got {result:?}"
        );
    }

    #[tokio::test]
    async fn load_unknown_uuid_returns_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx.store.load(CandidateUuid::new()).await;

        assert!(
            matches!(result, Err(CandidateStoreError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn conditional_update_applies_mutation_and_bumps_version() -> TestResult {
        let ctx = TestContext::new().await;

        let created = ctx
            .store
            .create(new_candidate("Grove & Sons", "grove@example.com"))
            .await?;

        let updated = ctx
            .store
            .conditional_update(
                created.uuid,
                created.version,
                CandidateMutation::approve(ProviderId::new(41)),
            )
            .await?;

        assert_eq!(updated.status, CandidateStatus::Approved);
        assert_eq!(updated.provider_id, Some(ProviderId::new(41)));
        assert_eq!(updated.version, created.version + 1);
        assert!(updated.updated_at >= created.updated_at);
        assert_eq!(updated.created_at, created.created_at);

        let loaded = ctx.store.load(created.uuid).await?;

        assert_eq!(loaded, updated);

        Ok(())
    }

    #[tokio::test]
    async fn conditional_update_stale_version_conflicts_without_writing() -> TestResult {
        let ctx = TestContext::new().await;

        let created = ctx
            .store
            .create(new_candidate("Grove & Sons", "grove@example.com"))
            .await?;

        ctx.store
            .conditional_update(
                created.uuid,
                created.version,
                CandidateMutation::reject(Some("late paperwork".to_string())),
            )
            .await?;

        let result = ctx
            .store
            .conditional_update(
                created.uuid,
                created.version,
                CandidateMutation::approve(ProviderId::new(7)),
            )
            .await;

        assert!(
            matches!(result, Err(CandidateStoreError::Conflict)),
            "expected Conflict, got {result:?}"
        );

        let loaded = ctx.store.load(created.uuid).await?;

        assert_eq!(loaded.status, CandidateStatus::Rejected);
        assert_eq!(loaded.version, 2);
        assert!(loaded.provider_id.is_none());
        assert_eq!(loaded.rejection_reason.as_deref(), Some("late paperwork"));

        Ok(())
    }

    #[tokio::test]
    async fn conditional_update_unknown_uuid_conflicts() {
        let ctx = TestContext::new().await;

        let result = ctx
            .store
            .conditional_update(CandidateUuid::new(), 1, CandidateMutation::reject(None))
            .await;

        assert!(
            matches!(result, Err(CandidateStoreError::Conflict)),
            "expected Conflict, got {result:?}"
        );
    }

    #[tokio::test]
    async fn conditional_update_on_rejected_candidate_conflicts_at_current_version() -> TestResult {
        let ctx = TestContext::new().await;

        let created = ctx
            .store
            .create(new_candidate("Grove & Sons", "grove@example.com"))
            .await?;

        let rejected = ctx
            .store
            .conditional_update(
                created.uuid,
                created.version,
                CandidateMutation::reject(Some("no cold storage".to_string())),
            )
            .await?;

        assert_eq!(rejected.version, created.version + 1);

        let result = ctx
            .store
            .conditional_update(
                rejected.uuid,
                rejected.version,
                CandidateMutation::approve(ProviderId::new(9)),
            )
            .await;

        assert!(
            matches!(result, Err(CandidateStoreError::Conflict)),
            "expected Conflict, got {result:?}"
        );

        let loaded = ctx.store.load(created.uuid).await?;

        assert_eq!(loaded, rejected);

        Ok(())
    }

    #[tokio::test]
    async fn conditional_update_on_approved_candidate_conflicts_at_current_version() -> TestResult {
        let ctx = TestContext::new().await;

        let created = ctx
            .store
            .create(new_candidate("Grove & Sons", "grove@example.com"))
            .await?;

        let approved = ctx
            .store
            .conditional_update(
                created.uuid,
                created.version,
                CandidateMutation::approve(ProviderId::new(4)),
            )
            .await?;

        for mutation in [
            CandidateMutation::reject(Some("changed our mind".to_string())),
            CandidateMutation::approve(ProviderId::new(5)),
        ] {
            let result = ctx
                .store
                .conditional_update(approved.uuid, approved.version, mutation)
                .await;

            assert!(
                matches!(result, Err(CandidateStoreError::Conflict)),
                "expected Conflict, got {result:?}"
            );
        }

        let loaded = ctx.store.load(created.uuid).await?;

        assert_eq!(loaded, approved);
        assert_eq!(loaded.provider_id, Some(ProviderId::new(4)));
        assert_eq!(loaded.version, 2);

        Ok(())
    }

    #[tokio::test]
    async fn list_filters_by_status_and_product() -> TestResult {
        let ctx = TestContext::new().await;

        let citrus = ctx
            .store
            .create(new_candidate("Citrus Co", "citrus@example.com"))
            .await?;

        let mut mandarin_only = new_candidate("Mandarin Ltd", "mandarin@example.com");
        mandarin_only.products = vec![Product::Mandarin];

        let mandarin = ctx.store.create(mandarin_only).await?;

        ctx.store
            .conditional_update(
                mandarin.uuid,
                mandarin.version,
                CandidateMutation::approve(ProviderId::new(3)),
            )
            .await?;

        let pending = ctx
            .store
            .list(
                CandidateFilter {
                    status: Some(CandidateStatus::Pending),
                    product: None,
                },
                10,
                0,
            )
            .await?;

        assert_eq!(pending.total, 1);
        assert_eq!(
            pending.items.iter().map(|c| c.uuid).collect::<Vec<_>>(),
            vec![citrus.uuid]
        );

        let mandarins = ctx
            .store
            .list(
                CandidateFilter {
                    status: None,
                    product: Some(Product::Mandarin),
                },
                10,
                0,
            )
            .await?;

        assert_eq!(mandarins.total, 1);
        assert_eq!(
            mandarins.items.first().map(|c| c.uuid),
            Some(mandarin.uuid)
        );

        let everything = ctx.store.list(CandidateFilter::default(), 10, 0).await?;

        assert_eq!(everything.total, 2);

        Ok(())
    }

    #[tokio::test]
    async fn list_total_ignores_paging() -> TestResult {
        let ctx = TestContext::new().await;

        for n in 0..5 {
            ctx.store
                .create(new_candidate(
                    &format!("Grove {n}"),
                    &format!("grove{n}@example.com"),
                ))
                .await?;
        }

        let page = ctx.store.list(CandidateFilter::default(), 2, 4).await?;

        assert_eq!(page.total, 5);
        assert_eq!(page.items.len(), 1);

        let past_end = ctx.store.list(CandidateFilter::default(), 2, 10).await?;

        assert_eq!(past_end.total, 5);
        assert!(past_end.items.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn create_candidate_stores_each_product_once() -> TestResult {
        let ctx = TestContext::new().await;

        let mut new = new_candidate("Grove & Sons", "grove@example.com");
        new.products = vec![Product::Clementine, Product::Orange, Product::Clementine];

        let created = ctx.store.create(new).await?;

        let stored: Vec<String> =
            sqlx::query_scalar("SELECT products FROM candidates WHERE uuid = $1")
                .bind(created.uuid.into_uuid())
                .fetch_one(ctx.db.pool())
                .await?;

        assert_eq!(stored, vec!["clementine".to_string(), "orange".to_string()]);
        assert_eq!(created.products, vec![Product::Clementine, Product::Orange]);

        Ok(())
    }

    #[tokio::test]
    async fn create_candidate_stores_company_name_verbatim() -> TestResult {
        let ctx = TestContext::new().await;

        ctx.store
            .create(new_candidate("Grove'; DROP TABLE candidates; --", "x@example.com"))
            .await?;

        let page = ctx.store.list(CandidateFilter::default(), 10, 0).await?;

        assert_eq!(page.total, 1);
        assert_eq!(
            page.items.first().map(|c| c.company_name.as_str()),
            Some("Grove'; DROP TABLE candidates; --")
        );

        Ok(())
    }
}
