use anyhow::{Context, Result};
use clap::Args;

use recall_core::storage::JsonStore;
use recall_core::RecallConfig;

#[derive(Args)]
pub struct InitArgs {
    /// Overwrite an existing knowledge base with the default episodes
    #[arg(long)]
    pub force: bool,
}

pub fn run(args: &InitArgs, config: &RecallConfig) -> Result<()> {
    let store = JsonStore::new(&config.store_path);

    if store.exists() && !args.force {
        println!(
            "Knowledge base already exists at {}.",
            store.path().display()
        );
        println!("Use --force to reset it to the default episodes.");
        return Ok(());
    }

    let kb = store
        .reseed()
        .context("Failed to write the default knowledge base")?;

    println!(
        "Knowledge base created at {} with {} episodes.",
        store.path().display(),
        kb.len()
    );
    println!();
    println!("Next steps:");
    println!("  recall summary                 Overview by category");
    println!("  recall search \"<query>\"        Keyword search");
    println!("  recall add insight ...         Record new knowledge");
    Ok(())
}
