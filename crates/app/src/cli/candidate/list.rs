use clap::Args;
use onboarding_app::{
    config::DatabaseConfig,
    domain::candidates::{
        CandidateStore,
        data::CandidateFilter,
        records::{CandidateStatus, Product},
    },
};

use super::{connect_store, print_candidate};

#[derive(Debug, Args)]
pub(crate) struct ListCandidatesArgs {
    #[command(flatten)]
    database: DatabaseConfig,

    /// Only candidates in this status (pending, approved, rejected)
    #[arg(long)]
    status: Option<CandidateStatus>,

    /// Only candidates delivering this product
    #[arg(long)]
    product: Option<Product>,

    /// Page size
    #[arg(long, default_value_t = 20)]
    limit: u32,

    /// Rows to skip
    #[arg(long, default_value_t = 0)]
    offset: u32,
}

pub(crate) async fn run(args: &ListCandidatesArgs) -> Result<(), String> {
    let store = connect_store(&args.database).await?;

    let page = store
        .list(
            CandidateFilter {
                status: args.status,
                product: args.product,
            },
            args.limit,
            args.offset,
        )
        .await
        .map_err(|error| format!("failed to list candidates: {error}"))?;

    println!("total: {}", page.total);

    for candidate in &page.items {
        println!();
        print_candidate(candidate);
    }

    Ok(())
}
