use crate::output::{print_deliveries, print_json};
use deliveries_core::row::{sorted_by_due, Snapshot};
use deliveries_core::sheet::LocalSheet;
use deliveries_core::store::SheetStore;
use deliveries_core::Result as CoreResult;
use std::path::Path;

pub fn run(sheet: &Path, sort_due: bool, json: bool) -> anyhow::Result<()> {
    let snapshot = load_snapshot(sheet)?;

    for warning in &snapshot.warnings {
        eprintln!(
            "warning: row {}: {}",
            warning.row_number, warning.message
        );
    }

    if json {
        print_json(&snapshot)?;
        return Ok(());
    }

    if snapshot.rows.is_empty() {
        println!("No deliveries tracked.");
        return Ok(());
    }

    let order: Vec<usize> = if sort_due {
        sorted_by_due(&snapshot.rows)
    } else {
        (0..snapshot.rows.len()).collect()
    };

    print_deliveries(&snapshot.rows, &order);
    Ok(())
}

pub fn load_snapshot(sheet: &Path) -> CoreResult<Snapshot> {
    let store = LocalSheet::open(sheet);
    let records = store.load()?;
    Ok(Snapshot::from_records(&records))
}
