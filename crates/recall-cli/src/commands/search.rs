use anyhow::Result;
use clap::Args;

use recall_core::RecallConfig;

use crate::output::format::format_hits;
use crate::output::OutputFormat;

#[derive(Args)]
pub struct SearchArgs {
    /// Search query (matched against titles, content, and entities)
    pub query: String,

    /// Maximum number of results (default: RECALL_SEARCH_LIMIT or 10)
    #[arg(short = 'n', long)]
    pub limit: Option<usize>,
}

pub fn run(args: &SearchArgs, config: &RecallConfig, format: OutputFormat) -> Result<()> {
    if args.query.trim().is_empty() {
        eprintln!("Search query must not be empty.");
        return Ok(());
    }

    let engine = super::open_engine(config)?;
    let limit = args.limit.unwrap_or(config.search_limit);
    let hits = engine.search(&args.query, limit);

    if hits.is_empty() {
        eprintln!("No results found for '{}'", args.query);
        if matches!(format, OutputFormat::Json) {
            println!("[]");
        }
        return Ok(());
    }

    let max_score = engine.weights().max_score();
    println!("{}", format_hits(&hits, &args.query, max_score, format));
    Ok(())
}
