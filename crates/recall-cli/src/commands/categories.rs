use anyhow::Result;
use clap::Args;

use recall_core::RecallConfig;
use recall_query::QueryError;

use crate::output::format::{format_categories, format_episode_list};
use crate::output::OutputFormat;

#[derive(Args)]
pub struct CategoriesArgs {
    /// Show the episodes of this category instead of the category list
    pub name: Option<String>,
}

pub fn run(args: &CategoriesArgs, config: &RecallConfig, format: OutputFormat) -> Result<()> {
    let engine = super::open_engine(config)?;

    let Some(name) = &args.name else {
        print!("{}", format_categories(&engine.categories(), format));
        if matches!(format, OutputFormat::Json) {
            println!();
        }
        return Ok(());
    };

    match engine.category(name) {
        Ok(episodes) => {
            println!("{}", format_episode_list(&episodes, format));
        }
        Err(QueryError::UnknownCategory(_)) => {
            eprintln!("Category '{name}' not found. Available categories:");
            for group in engine.categories() {
                eprintln!("  {}", group.category);
            }
        }
        Err(e) => return Err(e.into()),
    }
    Ok(())
}
