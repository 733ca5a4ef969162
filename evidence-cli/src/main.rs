use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

mod commands;

#[derive(Parser)]
#[command(
    name = "evidence-cli",
    about = "Search PubMed for evidence on supplements, herbs and conditions",
    long_about = "A CLI for the evidence-search pipeline: spelling-aware PubMed \
                  searches with date and study-type filters, curated condition \
                  queries and an optional AI-assisted fallback"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// API key for NCBI E-utilities
    #[arg(long, env = "NCBI_API_KEY", global = true)]
    api_key: Option<String>,

    /// Email for NCBI requests (recommended)
    #[arg(long, env = "NCBI_EMAIL", global = true)]
    email: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Search PubMed with spelling suggestions and filters
    Search(commands::search::Search),
    /// Search a curated condition category (cancer, neurological, ...)
    Condition(commands::condition::Condition),
    /// Ask the AI-assisted fallback about a topic
    Fallback(commands::fallback::Fallback),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr),
        )
        .with(tracing_subscriber::EnvFilter::new(filter))
        .init();

    let api_key = cli.api_key.as_deref();
    let email = cli.email.as_deref();

    match &cli.command {
        Commands::Search(cmd) => cmd.execute_with_config(api_key, email).await,
        Commands::Condition(cmd) => cmd.execute_with_config(api_key, email).await,
        Commands::Fallback(cmd) => cmd.execute_with_config(api_key, email).await,
    }
}
