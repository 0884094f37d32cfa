use crate::commands::{
    run_ask, run_compare, run_estimate, run_insights, run_recommend, AskArgs, CatalogArgs,
    CompareArgs, EstimateArgs, RecommendArgs,
};
use crate::server;
use clap::{Args, Parser, Subcommand};
use policy_advisor::error::AppError;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "Policy Advisor",
    about = "Recommend insurance policies, quote premiums, and run the advisor HTTP service",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Recommend a policy and shortlist for a customer profile
    Recommend(RecommendArgs),
    /// Quote an annual premium without consulting the catalog
    Estimate(EstimateArgs),
    /// Summarise the catalog by type, age, and region
    Insights(CatalogArgs),
    /// Compare two catalog policies by position
    Compare(CompareArgs),
    /// Ask the assistant a free-form insurance question
    Ask(AskArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    /// Override the configured catalog CSV path
    #[arg(long)]
    pub(crate) catalog: Option<PathBuf>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        // The HTTP generator blocks, so generator-backed commands leave the async runtime.
        Command::Recommend(args) => blocking(move || run_recommend(args)).await,
        Command::Ask(args) => blocking(move || run_ask(args)).await,
        Command::Estimate(args) => run_estimate(args),
        Command::Insights(args) => run_insights(args),
        Command::Compare(args) => run_compare(args),
    }
}

async fn blocking<F>(task: F) -> Result<(), AppError>
where
    F: FnOnce() -> Result<(), AppError> + Send + 'static,
{
    tokio::task::spawn_blocking(task)
        .await
        .map_err(|err| AppError::Io(std::io::Error::new(std::io::ErrorKind::Other, err)))?
}
