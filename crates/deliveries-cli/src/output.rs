use deliveries_core::date;
use deliveries_core::row::{format_done, sheet_row_number, DeliveryRow};
use serde::Serialize;

pub fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{}", json);
    Ok(())
}

/// The fixed columns of the deliveries table, sheet row number first.
const COLUMNS: [&str; 7] = ["ROW", "DUE", "FREQUENCY", "DONE", "STATUS", "PRIORITY", "NOTES"];

fn delivery_cells(index: usize, row: &DeliveryRow) -> [String; 7] {
    [
        sheet_row_number(index).to_string(),
        row.due
            .map(date::format_due)
            .unwrap_or_else(|| row.due_text.clone()),
        row.frequency.clone(),
        format_done(row.done).to_string(),
        row.status.clone(),
        row.priority.clone(),
        row.notes.clone(),
    ]
}

fn format_line(widths: &[usize; 7], cells: &[String; 7]) -> String {
    let padded: Vec<String> = widths
        .iter()
        .zip(cells)
        .map(|(&w, cell)| format!("{cell:<width$}", width = w))
        .collect();
    padded.join("  ")
}

/// Render deliveries as an aligned text table. `order` holds snapshot
/// indices, so a sorted view still shows the original sheet row numbers.
pub fn render_deliveries(rows: &[DeliveryRow], order: &[usize]) -> String {
    let table: Vec<[String; 7]> = order.iter().map(|&i| delivery_cells(i, &rows[i])).collect();

    let mut widths: [usize; 7] = COLUMNS.map(str::len);
    for cells in &table {
        for (w, cell) in widths.iter_mut().zip(cells) {
            *w = (*w).max(cell.len());
        }
    }

    let header = COLUMNS.map(String::from);
    let rule = widths.map(|w| "-".repeat(w));
    let mut lines = vec![format_line(&widths, &header), format_line(&widths, &rule)];
    for cells in &table {
        lines.push(format_line(&widths, cells));
    }
    lines.join("\n")
}

pub fn print_deliveries(rows: &[DeliveryRow], order: &[usize]) {
    println!("{}", render_deliveries(rows, order));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(due: Option<&str>, notes: &str) -> DeliveryRow {
        DeliveryRow {
            due: due.map(|d| date::parse_due(d).unwrap()),
            due_text: due.unwrap_or("soonish").to_string(),
            frequency: "weekly".to_string(),
            done: false,
            status: "Not started".to_string(),
            priority: "Low".to_string(),
            notes: notes.to_string(),
        }
    }

    #[test]
    fn renders_header_rule_and_aligned_rows() {
        let rows = vec![row(Some("2024-03-15"), "leave at door")];
        let out = render_deliveries(&rows, &[0]);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("ROW  DUE"));
        assert!(lines[1].starts_with("---  ----------"));
        assert!(lines[2].starts_with("2    2024-03-15"));
        assert!(lines[2].contains("leave at door"));
    }

    #[test]
    fn order_reorders_but_keeps_sheet_row_numbers() {
        let rows = vec![row(Some("2024-05-01"), "a"), row(Some("2024-03-15"), "b")];
        let out = render_deliveries(&rows, &[1, 0]);
        let lines: Vec<&str> = out.lines().collect();
        assert!(lines[2].starts_with("3    2024-03-15"));
        assert!(lines[3].starts_with("2    2024-05-01"));
    }

    #[test]
    fn unparseable_due_shows_raw_text() {
        let rows = vec![row(None, "")];
        let out = render_deliveries(&rows, &[0]);
        assert!(out.contains("soonish"));
    }
}
