use crate::output::print_json;
use anyhow::Context;
use deliveries_core::sheet::LocalSheet;
use std::path::Path;

pub fn run(sheet: &Path, json: bool) -> anyhow::Result<()> {
    let created = if sheet.exists() {
        false
    } else {
        LocalSheet::create(sheet).context("failed to create sheet file")?;
        true
    };

    if json {
        print_json(&serde_json::json!({
            "sheet": sheet.display().to_string(),
            "created": created,
        }))?;
    } else if created {
        println!("Created {}", sheet.display());
    } else {
        println!("Sheet already exists at {}", sheet.display());
    }
    Ok(())
}
