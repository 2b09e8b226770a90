use anyhow::Result;

pub fn run() -> Result<()> {
    println!("recall {}", env!("CARGO_PKG_VERSION"));
    Ok(())
}
