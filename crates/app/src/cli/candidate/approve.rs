use clap::Args;
use onboarding_app::{
    config::{BillingConfig, DatabaseConfig},
    context::AppContext,
    domain::{approvals::ApprovalServiceError, candidates::records::CandidateUuid},
};

use super::print_candidate;

#[derive(Debug, Args)]
pub(crate) struct ApproveCandidateArgs {
    #[command(flatten)]
    database: DatabaseConfig,

    #[command(flatten)]
    billing: BillingConfig,

    /// Candidate UUID
    #[arg(long)]
    uuid: CandidateUuid,
}

pub(crate) async fn run(args: &ApproveCandidateArgs) -> Result<(), String> {
    let app = AppContext::from_config(&args.database, &args.billing)
        .await
        .map_err(|error| format!("failed to initialize: {error}"))?;

    let candidate = app
        .approvals
        .approve(args.uuid)
        .await
        .map_err(|error| describe(args.uuid, &error))?;

    print_candidate(&candidate);

    Ok(())
}

fn describe(candidate: CandidateUuid, error: &ApprovalServiceError) -> String {
    match error {
        ApprovalServiceError::BillingUnavailable(source) => {
            format!("failed to approve candidate {candidate}: {error} ({source}); safe to retry later")
        }
        ApprovalServiceError::Storage(source) => {
            format!("failed to approve candidate {candidate}: {error} ({source})")
        }
        ApprovalServiceError::NotFound | ApprovalServiceError::AlreadyProcessed => {
            format!("failed to approve candidate {candidate}: {error}")
        }
    }
}
