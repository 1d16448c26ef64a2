use clap::{Args, Subcommand};
use onboarding_app::{
    config::DatabaseConfig,
    database::{self, Db},
    domain::candidates::{PgCandidateStore, records::CandidateRecord},
};

mod approve;
mod create;
mod get;
mod list;
mod reject;

#[derive(Debug, Args)]
pub(crate) struct CandidateCommand {
    #[command(subcommand)]
    command: CandidateSubcommand,
}

#[derive(Debug, Subcommand)]
enum CandidateSubcommand {
    /// Register a new pending candidate
    Create(create::CreateCandidateArgs),
    /// Show one candidate
    Get(get::GetCandidateArgs),
    /// List candidates
    List(list::ListCandidatesArgs),
    /// Approve a pending candidate and create its billing provider
    Approve(approve::ApproveCandidateArgs),
    /// Reject a pending candidate
    Reject(reject::RejectCandidateArgs),
}

pub(crate) async fn run(command: CandidateCommand) -> Result<(), String> {
    match command.command {
        CandidateSubcommand::Create(args) => create::run(args).await,
        CandidateSubcommand::Get(args) => get::run(&args).await,
        CandidateSubcommand::List(args) => list::run(&args).await,
        CandidateSubcommand::Approve(args) => approve::run(&args).await,
        CandidateSubcommand::Reject(args) => reject::run(args).await,
    }
}

async fn connect_store(config: &DatabaseConfig) -> Result<PgCandidateStore, String> {
    let pool = database::connect(&config.database_url, config.database_max_connections)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    Ok(PgCandidateStore::new(Db::new(pool)))
}

fn print_candidate(candidate: &CandidateRecord) {
    let products = candidate
        .products
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(",");

    println!("candidate_uuid: {}", candidate.uuid);
    println!("company_name: {}", candidate.company_name);
    println!("contact_email: {}", candidate.contact_email);
    println!("phone: {}", candidate.phone.as_deref().unwrap_or("none"));
    println!("products: {products}");
    println!("truck_count: {}", candidate.truck_count);
    println!("capacity_tons_per_day: {}", candidate.capacity_tons_per_day);
    println!("location: {}", candidate.location.as_deref().unwrap_or("none"));
    println!("status: {}", candidate.status);
    println!(
        "provider_id: {}",
        candidate
            .provider_id
            .map_or_else(|| "none".to_string(), |value| value.to_string())
    );
    if let Some(reason) = candidate.rejection_reason.as_deref() {
        println!("rejection_reason: {reason}");
    }
    println!("version: {}", candidate.version);
    println!("created_at: {}", candidate.created_at);
    println!("updated_at: {}", candidate.updated_at);
}
