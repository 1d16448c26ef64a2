use clap::Args;
use onboarding_app::{
    config::DatabaseConfig,
    domain::candidates::{
        CandidateStore,
        data::NewCandidate,
        records::{CandidateUuid, Product},
    },
};

use super::{connect_store, print_candidate};

#[derive(Debug, Args)]
pub(crate) struct CreateCandidateArgs {
    #[command(flatten)]
    database: DatabaseConfig,

    /// Company display name
    #[arg(long)]
    company_name: String,

    /// Contact email; must be unique
    #[arg(long)]
    contact_email: String,

    /// Contact phone number
    #[arg(long)]
    phone: Option<String>,

    /// Delivered product; repeat for several
    #[arg(long = "product", required = true)]
    products: Vec<Product>,

    /// Number of trucks in the fleet
    #[arg(long)]
    truck_count: u32,

    /// Daily delivery capacity in tons
    #[arg(long)]
    capacity_tons_per_day: u32,

    /// Location description
    #[arg(long)]
    location: Option<String>,
}

pub(crate) async fn run(args: CreateCandidateArgs) -> Result<(), String> {
    if args.company_name.trim().is_empty() {
        return Err("company-name cannot be empty".to_string());
    }

    if !args.contact_email.contains('@') {
        return Err("contact-email must be an email address".to_string());
    }

    let store = connect_store(&args.database).await?;

    let candidate = store
        .create(NewCandidate {
            uuid: CandidateUuid::new(),
            company_name: args.company_name,
            contact_email: args.contact_email,
            phone: args.phone,
            products: args.products,
            truck_count: args.truck_count,
            capacity_tons_per_day: args.capacity_tons_per_day,
            location: args.location,
        })
        .await
        .map_err(|error| format!("failed to create candidate: {error}"))?;

    print_candidate(&candidate);

    Ok(())
}
