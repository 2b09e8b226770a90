use anyhow::{Context, Result};

use recall_core::RecallConfig;

pub fn run(config: &RecallConfig) -> Result<()> {
    // Validate (and seed) the store up front so a broken file fails before the handshake.
    super::open_engine(config)?;

    let store_path = config.store_path.clone();
    let rt = tokio::runtime::Runtime::new().context("Failed to create async runtime")?;
    rt.block_on(async {
        recall_mcp::run_stdio(store_path)
            .await
            .map_err(|e| anyhow::anyhow!("MCP server error: {e}"))
    })
}
