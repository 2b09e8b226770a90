use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use recall_core::RecallConfig;

mod commands;
mod output;

#[derive(Parser)]
#[command(
    name = "recall",
    version,
    about = "Browse and search a local knowledge base of project episodes"
)]
struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Output format
    #[arg(long, global = true, default_value = "text")]
    format: output::OutputFormat,

    /// Path to the knowledge base JSON document
    #[arg(long, global = true, env = "RECALL_STORE")]
    store: Option<PathBuf>,

    #[command(subcommand)]
    command: commands::Commands,
}

fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = RecallConfig::from_env()
        .context("Invalid configuration")?
        .with_store_path(cli.store.clone());
    tracing::debug!(store = %config.store_path.display(), "using knowledge base");

    match &cli.command {
        commands::Commands::Init(args) => commands::init::run(args, &config),
        commands::Commands::Summary => commands::summary::run(&config, cli.format),
        commands::Commands::Search(args) => commands::search::run(args, &config, cli.format),
        commands::Commands::List => commands::list::run(&config, cli.format),
        commands::Commands::Categories(args) => {
            commands::categories::run(args, &config, cli.format)
        }
        commands::Commands::Show(args) => commands::show::run(args, &config, cli.format),
        commands::Commands::Add(args) => commands::add::run(args, &config, cli.format),
        commands::Commands::Mcp => commands::mcp::run(&config),
        commands::Commands::Version => commands::version::run(),
    }
}
