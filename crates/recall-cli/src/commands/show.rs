use anyhow::Result;
use clap::Args;

use recall_core::error::CoreError;
use recall_core::RecallConfig;
use recall_query::QueryError;

use crate::output::format::format_episode_full;
use crate::output::OutputFormat;

#[derive(Args)]
pub struct ShowArgs {
    /// Episode id, id prefix, or 1-based position as listed
    pub selector: String,
}

pub fn run(args: &ShowArgs, config: &RecallConfig, format: OutputFormat) -> Result<()> {
    let engine = super::open_engine(config)?;

    match engine.show(&args.selector) {
        Ok(episode) => println!("{}", format_episode_full(episode, format)),
        Err(QueryError::Core(CoreError::NotFound { id })) if engine.knowledge().is_empty() => {
            eprintln!("Episode '{id}' not found. The knowledge base has no episodes.");
        }
        Err(QueryError::Core(CoreError::NotFound { id })) => {
            eprintln!(
                "Episode '{id}' not found. Available positions: 1-{}",
                engine.knowledge().len()
            );
        }
        Err(e) => return Err(e.into()),
    }
    Ok(())
}
