pub mod add;
pub mod categories;
pub mod init;
pub mod list;
pub mod mcp;
pub mod search;
pub mod show;
pub mod summary;
pub mod version;

use anyhow::{Context, Result};
use clap::Subcommand;

use recall_core::RecallConfig;
use recall_query::KnowledgeEngine;

#[derive(Subcommand)]
pub enum Commands {
    /// Create the knowledge base with the default episodes
    Init(init::InitArgs),
    /// Show totals and the episode titles per category
    Summary,
    /// Search episodes by keywords
    Search(search::SearchArgs),
    /// Print every episode in full
    List,
    /// List categories, or the episodes of one category
    Categories(categories::CategoriesArgs),
    /// Show a single episode
    Show(show::ShowArgs),
    /// Record a new episode
    Add(add::AddArgs),
    /// Serve the knowledge base over MCP (stdio)
    Mcp,
    /// Print version information
    Version,
}

/// Open the configured knowledge base, seeding it on first use.
pub(crate) fn open_engine(config: &RecallConfig) -> Result<KnowledgeEngine> {
    KnowledgeEngine::open(&config.store_path).with_context(|| {
        format!(
            "Failed to open knowledge base at {}",
            config.store_path.display()
        )
    })
}
