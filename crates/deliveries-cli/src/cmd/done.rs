use crate::cmd::list::load_snapshot;
use crate::output::print_json;
use anyhow::bail;
use deliveries_core::sheet::LocalSheet;
use deliveries_core::store::commit_plan;
use deliveries_core::sync::diff_and_plan;
use std::path::Path;

/// Mark the given sheet rows done and run one full sync cycle: load the
/// snapshot, apply the ticks as an edited view, diff, and write back. A
/// recognized frequency advances the due date and resets the row; anything
/// else is surfaced as a warning and the row is left alone.
pub fn run(sheet: &Path, rows: &[u32], json: bool) -> anyhow::Result<()> {
    let original = load_snapshot(sheet)?;

    let mut edited = original.rows.clone();
    for &row_number in rows {
        let Some(index) = (row_number as usize).checked_sub(2) else {
            bail!("row {row_number} is not a data row (data starts at row 2)");
        };
        let Some(row) = edited.get_mut(index) else {
            bail!(
                "row {row_number} out of range (sheet has {} data rows)",
                edited.len()
            );
        };
        row.done = true;
    }

    let plan = diff_and_plan(&original.rows, &edited);
    let mut store = LocalSheet::open(sheet);
    let outcome = commit_plan(&mut store, &plan);

    if json {
        print_json(&serde_json::json!({
            "ops": plan.ops,
            "warnings": plan.warnings,
            "reports": outcome.reports,
            "failed": outcome.failed(),
            "reload": outcome.reload,
        }))?;
        return Ok(());
    }

    for warning in &plan.warnings {
        eprintln!("warning: {warning}");
    }
    for report in outcome.reports.iter().filter(|r| !r.ok()) {
        eprintln!(
            "warning: row {}, column {}: {}",
            report.row_number,
            report.column,
            report.error.as_deref().unwrap_or("write failed")
        );
    }

    let applied = outcome.reports.len() - outcome.failed();
    let rescheduled = plan.ops.len() / 3;
    if plan.ops.is_empty() {
        println!("Nothing to reschedule.");
    } else {
        println!(
            "Rescheduled {rescheduled} delivery(ies), {applied}/{} write(s) applied",
            outcome.reports.len()
        );
    }
    Ok(())
}
