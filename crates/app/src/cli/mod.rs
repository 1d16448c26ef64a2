use clap::{Parser, Subcommand};
use onboarding_app::config::LoggingConfig;

mod candidate;
mod db;

#[derive(Debug, Parser)]
#[command(name = "onboarding-app", about = "Provider onboarding CLI", long_about = None)]
pub(crate) struct Cli {
    #[command(flatten)]
    pub(crate) logging: LoggingConfig,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    Candidate(candidate::CandidateCommand),
    Db(db::DbCommand),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        match self.command {
            Commands::Candidate(command) => candidate::run(command).await,
            Commands::Db(command) => db::run(command).await,
        }
    }
}
