use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::date;

/// Canonical column order of the deliveries sheet. The header row occupies
/// sheet row 1; data rows start at row 2.
pub const HEADER: [&str; 6] = ["Due", "Frequency", "Done", "Status", "Priority", "Notes"];

pub fn canonical_header() -> Vec<String> {
    HEADER.iter().map(|s| s.to_string()).collect()
}

/// Map a 0-based snapshot index to its 1-based sheet row number.
///
/// Row identity is purely positional, so this mapping is recomputed from
/// the load-time index on every cycle and never cached across reloads.
pub fn sheet_row_number(index: usize) -> u32 {
    index as u32 + 2
}

// ---------------------------------------------------------------------------
// DeliveryRow
// ---------------------------------------------------------------------------

/// One tracked delivery, normalized from the store's raw string cells.
///
/// `done` is a trigger, not a record: ticking it requests a reschedule and
/// the sync engine resets it to false once the due date has advanced.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeliveryRow {
    /// Parsed due date; `None` when the cell is empty or unparseable.
    /// Rows without a date are excluded from sorting and rescheduling.
    pub due: Option<NaiveDate>,
    /// Original due cell text, so unparseable values round-trip unchanged.
    pub due_text: String,
    /// Raw frequency label; interpreted by the recurrence engine.
    pub frequency: String,
    pub done: bool,
    pub status: String,
    pub priority: String,
    pub notes: String,
}

impl DeliveryRow {
    /// Raw cells in sheet column order, for `append_row`.
    pub fn to_cells(&self) -> Vec<String> {
        let due = match self.due {
            Some(d) => date::format_due(d),
            None => self.due_text.clone(),
        };
        vec![
            due,
            self.frequency.clone(),
            format_done(self.done).to_string(),
            self.status.clone(),
            self.priority.clone(),
            self.notes.clone(),
        ]
    }
}

/// The store keeps booleans as text ("TRUE"/"FALSE"); normalize once at
/// the adapter boundary so the engines never compare stringified booleans.
pub fn parse_done(text: &str) -> bool {
    matches!(
        text.trim().to_ascii_lowercase().as_str(),
        "true" | "1" | "yes" | "x"
    )
}

pub fn format_done(done: bool) -> &'static str {
    if done {
        "TRUE"
    } else {
        "FALSE"
    }
}

// ---------------------------------------------------------------------------
// Snapshot
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParseWarning {
    pub row_number: u32,
    pub message: String,
}

/// Immutable copy of all rows as of one load. A second snapshot of the same
/// shape (the edited view) is produced by the presentation layer; the sync
/// engine consumes both and discards them after planning.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Snapshot {
    pub rows: Vec<DeliveryRow>,
    /// Malformed due dates, reported per row instead of failing the load.
    #[serde(default)]
    pub warnings: Vec<ParseWarning>,
}

impl Snapshot {
    pub fn from_records(records: &[Vec<String>]) -> Snapshot {
        let mut rows = Vec::with_capacity(records.len());
        let mut warnings = Vec::new();

        for (i, cells) in records.iter().enumerate() {
            let cell =
                |c: usize| -> String { cells.get(c).map(|s| s.trim()).unwrap_or("").to_string() };

            let due_text = cell(0);
            let due = if due_text.is_empty() {
                None
            } else {
                match date::parse_due(&due_text) {
                    Ok(d) => Some(d),
                    Err(_) => {
                        warnings.push(ParseWarning {
                            row_number: sheet_row_number(i),
                            message: format!("unparseable due date '{due_text}'"),
                        });
                        None
                    }
                }
            };

            rows.push(DeliveryRow {
                due,
                due_text,
                frequency: cell(1),
                done: parse_done(&cell(2)),
                status: cell(3),
                priority: cell(4),
                notes: cell(5),
            });
        }

        Snapshot { rows, warnings }
    }
}

/// Display ordering by due date. Returns snapshot indices; rows without a
/// parseable date sort after all dated rows, in their original order.
pub fn sorted_by_due(rows: &[DeliveryRow]) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..rows.len()).collect();
    indices.sort_by_key(|&i| (rows[i].due.is_none(), rows[i].due));
    indices
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn record(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn normalizes_string_booleans() {
        assert!(parse_done("TRUE"));
        assert!(parse_done("true"));
        assert!(parse_done(" 1 "));
        assert!(parse_done("Yes"));
        assert!(!parse_done("FALSE"));
        assert!(!parse_done(""));
        assert!(!parse_done("maybe"));
    }

    #[test]
    fn snapshot_parses_rows() {
        let snapshot = Snapshot::from_records(&[record(&[
            "2024-03-15",
            "quarterly",
            "FALSE",
            "In progress",
            "High",
            "call ahead",
        ])]);
        assert!(snapshot.warnings.is_empty());
        let row = &snapshot.rows[0];
        assert_eq!(row.due, chrono::NaiveDate::from_ymd_opt(2024, 3, 15));
        assert!(!row.done);
        assert_eq!(row.status, "In progress");
        assert_eq!(row.notes, "call ahead");
    }

    #[test]
    fn malformed_due_date_warns_but_keeps_row() {
        let snapshot = Snapshot::from_records(&[
            record(&["soonish", "weekly", "FALSE", "", "", ""]),
            record(&["2024-01-02", "weekly", "FALSE", "", "", ""]),
        ]);
        assert_eq!(snapshot.rows.len(), 2);
        assert_eq!(snapshot.rows[0].due, None);
        assert_eq!(snapshot.rows[0].due_text, "soonish");
        assert_eq!(snapshot.warnings.len(), 1);
        assert_eq!(snapshot.warnings[0].row_number, 2);
    }

    #[test]
    fn short_records_pad_with_empty_cells() {
        let snapshot = Snapshot::from_records(&[record(&["2024-01-02", "weekly"])]);
        let row = &snapshot.rows[0];
        assert!(!row.done);
        assert_eq!(row.notes, "");
    }

    #[test]
    fn empty_due_is_not_a_warning() {
        let snapshot = Snapshot::from_records(&[record(&["", "weekly", "FALSE", "", "", ""])]);
        assert_eq!(snapshot.rows[0].due, None);
        assert!(snapshot.warnings.is_empty());
    }

    #[test]
    fn sheet_row_numbers_start_at_two() {
        assert_eq!(sheet_row_number(0), 2);
        assert_eq!(sheet_row_number(3), 5);
    }

    #[test]
    fn sorted_by_due_puts_undated_rows_last() {
        let snapshot = Snapshot::from_records(&[
            record(&["", "", "FALSE", "", "", "no date"]),
            record(&["2024-05-01", "", "FALSE", "", "", "later"]),
            record(&["2024-01-01", "", "FALSE", "", "", "sooner"]),
        ]);
        assert_eq!(sorted_by_due(&snapshot.rows), vec![2, 1, 0]);
    }

    #[test]
    fn to_cells_uses_canonical_date_form() {
        let snapshot = Snapshot::from_records(&[record(&[
            "15/03/2024",
            "monthly",
            "TRUE",
            "Completed",
            "Low",
            "",
        ])]);
        let cells = snapshot.rows[0].to_cells();
        assert_eq!(cells[0], "2024-03-15");
        assert_eq!(cells[2], "TRUE");
    }
}
