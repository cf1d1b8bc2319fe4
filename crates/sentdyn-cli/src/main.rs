mod analyze;

use clap::{CommandFactory, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::analyze::AnalyzeArgs;

#[derive(Debug, Parser)]
#[command(name = "sentdyn-cli")]
#[command(about = "Sentiment Dynamics command line interface")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Analyze text and print sentiment, keywords and entities as JSON
    Analyze(AnalyzeArgs),
    /// List the available sentiment engines
    Engines,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = sentdyn_core::load_app_config()?;
    // stdout carries the JSON result; logs go to stderr.
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Some(Commands::Analyze(args)) => analyze::run_analyze(&config, args).await?,
        Some(Commands::Engines) => print!("{}", analyze::engines_listing()),
        None => Cli::command().print_help()?,
    }

    Ok(())
}
