use anyhow::Context;
use std::path::Path;

pub fn run(sheet: &Path, port: u16, no_open: bool) -> anyhow::Result<()> {
    let runtime = tokio::runtime::Runtime::new().context("failed to start runtime")?;
    runtime.block_on(deliveries_server::serve(
        sheet.to_path_buf(),
        port,
        !no_open,
    ))
}
