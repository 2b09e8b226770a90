use anyhow::Result;

use recall_core::RecallConfig;

use crate::output::format::format_summary;
use crate::output::OutputFormat;

pub fn run(config: &RecallConfig, format: OutputFormat) -> Result<()> {
    let engine = super::open_engine(config)?;
    let groups = engine.categories();
    print!("{}", format_summary(engine.knowledge(), &groups, format));
    if matches!(format, OutputFormat::Json) {
        println!();
    }
    Ok(())
}
