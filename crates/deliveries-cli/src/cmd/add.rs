use crate::output::print_json;
use anyhow::Context;
use deliveries_core::date;
use deliveries_core::row::{sheet_row_number, DeliveryRow};
use deliveries_core::sheet::LocalSheet;
use deliveries_core::store::SheetStore;
use deliveries_core::types::{Frequency, Priority, Status};
use std::path::Path;
use std::str::FromStr;

pub fn run(
    sheet: &Path,
    due: Option<&str>,
    frequency: Option<&str>,
    status: Option<&str>,
    priority: Option<&str>,
    notes: &str,
    json: bool,
) -> anyhow::Result<()> {
    let due = match due.map(str::trim) {
        Some(text) if !text.is_empty() => Some(date::parse_due(text)?),
        _ => None,
    };
    let frequency = match frequency.map(str::trim) {
        Some(label) if !label.is_empty() => Frequency::from_str(label)?.as_str().to_string(),
        _ => String::new(),
    };
    let status = match status.map(str::trim) {
        Some(s) if !s.is_empty() => Status::from_str(s)?,
        _ => Status::NotStarted,
    };
    let priority = match priority.map(str::trim) {
        Some(p) if !p.is_empty() => Priority::from_str(p)?,
        _ => Priority::Medium,
    };

    let row = DeliveryRow {
        due,
        due_text: due.map(date::format_due).unwrap_or_default(),
        frequency,
        done: false,
        status: status.to_string(),
        priority: priority.to_string(),
        notes: notes.to_string(),
    };

    let mut store = LocalSheet::open(sheet);
    let existing = store.load().context("failed to load sheet")?.len();
    store
        .append_row(&row.to_cells())
        .context("failed to append row")?;
    let row_number = sheet_row_number(existing);

    if json {
        print_json(&serde_json::json!({ "row_number": row_number, "row": row }))?;
    } else {
        println!("Added delivery at row {row_number}");
    }
    Ok(())
}
