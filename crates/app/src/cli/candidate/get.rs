use clap::Args;
use onboarding_app::{
    config::DatabaseConfig,
    domain::candidates::{CandidateStore, records::CandidateUuid},
};

use super::{connect_store, print_candidate};

#[derive(Debug, Args)]
pub(crate) struct GetCandidateArgs {
    #[command(flatten)]
    database: DatabaseConfig,

    /// Candidate UUID
    #[arg(long)]
    uuid: CandidateUuid,
}

pub(crate) async fn run(args: &GetCandidateArgs) -> Result<(), String> {
    let store = connect_store(&args.database).await?;

    let candidate = store
        .load(args.uuid)
        .await
        .map_err(|error| format!("failed to load candidate {}: {error}", args.uuid))?;

    print_candidate(&candidate);

    Ok(())
}
