mod commands;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cinema_client::{AppContext, Config};

use commands::{Command, Output};

#[derive(Debug, Parser)]
#[command(name = "cinema", version)]
#[command(about = "Browse movies, book seats and manage the cinema back office")]
struct Args {
    /// Base URL of the cinema API (overrides CINEMA_API_URL)
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = Config::from_env().context("invalid configuration")?;
    if let Some(api_url) = args.api_url {
        config = config.with_base_url(api_url);
    }

    // Логи идут в stderr, чтобы не мешать выводу команд
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&config.app.rust_log))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    debug!("Using cinema API at {}", config.api.base_url);

    let mut ctx = AppContext::new(config).context("failed to initialise the API client")?;
    commands::run(&mut ctx, args.command, Output::new(args.json)).await
}
