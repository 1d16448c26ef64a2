use clap::Args;
use onboarding_app::{
    config::{BillingConfig, DatabaseConfig},
    context::AppContext,
    domain::candidates::records::CandidateUuid,
};

use super::print_candidate;

#[derive(Debug, Args)]
pub(crate) struct RejectCandidateArgs {
    #[command(flatten)]
    database: DatabaseConfig,

    #[command(flatten)]
    billing: BillingConfig,

    /// Candidate UUID
    #[arg(long)]
    uuid: CandidateUuid,

    /// Reason recorded with the rejection
    #[arg(long)]
    reason: Option<String>,
}

pub(crate) async fn run(args: RejectCandidateArgs) -> Result<(), String> {
    let app = AppContext::from_config(&args.database, &args.billing)
        .await
        .map_err(|error| format!("failed to initialize: {error}"))?;

    let candidate = app
        .approvals
        .reject(args.uuid, args.reason)
        .await
        .map_err(|error| format!("failed to reject candidate {}: {error}", args.uuid))?;

    print_candidate(&candidate);

    Ok(())
}
