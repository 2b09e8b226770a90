use anyhow::Result;

use recall_core::RecallConfig;

use crate::output::format::format_episode_list;
use crate::output::OutputFormat;

pub fn run(config: &RecallConfig, format: OutputFormat) -> Result<()> {
    let engine = super::open_engine(config)?;
    let episodes: Vec<_> = engine.knowledge().episodes.iter().collect();
    println!("{}", format_episode_list(&episodes, format));
    Ok(())
}
