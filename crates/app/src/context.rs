//! App Context

use std::{
    fmt::{Debug, Formatter, Result as FmtResult},
    sync::Arc,
};

use thiserror::Error;

use crate::{
    billing::HttpBillingClient,
    config::{BillingConfig, DatabaseConfig},
    database::{self, Db},
    domain::{
        approvals::{ApprovalService, CandidateApprovalService},
        candidates::{CandidateStore, PgCandidateStore},
    },
};

/// Failures while wiring the application together.
#[derive(Debug, Error)]
pub enum AppInitError {
    /// The database pool could not connect.
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),

    /// The HTTP client could not be built.
    #[error("failed to build billing client")]
    BillingClient(#[source] reqwest::Error),
}

/// Application services built from configuration.
#[derive(Clone)]
pub struct AppContext {
    /// Candidate store
    pub candidates: Arc<dyn CandidateStore>,

    /// Approval service over the same store
    pub approvals: Arc<dyn ApprovalService>,
}

impl Debug for AppContext {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("AppContext").finish_non_exhaustive()
    }
}

impl AppContext {
    /// Build application context from database and billing settings.
    ///
    /// # Errors
    ///
    /// Returns an error when connecting to the database or building the billing client fails.
    pub async fn from_config(
        database: &DatabaseConfig,
        billing: &BillingConfig,
    ) -> Result<Self, AppInitError> {
        let pool = database::connect(&database.database_url, database.database_max_connections)
            .await
            .map_err(AppInitError::Database)?;

        let billing =
            HttpBillingClient::new(&billing.client_config()).map_err(AppInitError::BillingClient)?;

        let candidates: Arc<dyn CandidateStore> = Arc::new(PgCandidateStore::new(Db::new(pool)));

        Ok(Self {
            approvals: Arc::new(CandidateApprovalService::new(
                candidates.clone(),
                Arc::new(billing),
            )),
            candidates,
        })
    }
}
