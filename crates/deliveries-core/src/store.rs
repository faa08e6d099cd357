use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::row::sheet_row_number;
use crate::sync::{Column, SyncPlan};

// ---------------------------------------------------------------------------
// SheetStore
// ---------------------------------------------------------------------------

/// The tabular store behind the tracker. Rows are 1-based with the header
/// at row 1; columns are 1-based in canonical header order. Each write
/// targets one cell and is applied independently.
pub trait SheetStore {
    /// All data records (header excluded), as raw string cells.
    fn load(&self) -> Result<Vec<Vec<String>>>;

    /// Update a single cell. `row_number` ≥ 2, `column_index` ≥ 1.
    fn write_cell(&mut self, row_number: u32, column_index: u32, value: &str) -> Result<()>;

    /// Append a record after the last data row.
    fn append_row(&mut self, values: &[String]) -> Result<()>;
}

// ---------------------------------------------------------------------------
// Commit
// ---------------------------------------------------------------------------

/// Result of one attempted write, with row/column context for reporting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpReport {
    pub row_number: u32,
    pub column: Column,
    pub error: Option<String>,
}

impl OpReport {
    pub fn ok(&self) -> bool {
        self.error.is_none()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CommitOutcome {
    pub reports: Vec<OpReport>,
    /// Set when at least one write landed: the caller's snapshot is stale
    /// and must be reloaded before the next diff cycle. One flag per batch,
    /// no matter how many ops succeeded.
    pub reload: bool,
}

impl CommitOutcome {
    pub fn failed(&self) -> usize {
        self.reports.iter().filter(|r| !r.ok()).count()
    }
}

/// Issue a plan's write ops against the store, strictly in order, one at a
/// time. Failures are isolated per op: a failed write is reported with its
/// row and column and the remaining ops are still attempted. This function
/// itself never errors; failure handling belongs to the caller via the
/// reports.
pub fn commit_plan(store: &mut dyn SheetStore, plan: &SyncPlan) -> CommitOutcome {
    let mut outcome = CommitOutcome::default();

    for op in &plan.ops {
        let row_number = sheet_row_number(op.row);
        let error = match store.write_cell(row_number, op.column.index(), &op.value) {
            Ok(()) => {
                outcome.reload = true;
                None
            }
            Err(e) => {
                tracing::warn!(row = row_number, column = %op.column, "write failed: {e}");
                Some(e.to_string())
            }
        };
        outcome.reports.push(OpReport {
            row_number,
            column: op.column,
            error,
        });
    }

    outcome
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DeliveryError;
    use crate::sync::WriteOp;

    /// In-memory store that rejects writes to one column, for failure
    /// isolation tests.
    struct FlakyStore {
        rejected: Option<Column>,
        writes: Vec<(u32, u32, String)>,
    }

    impl FlakyStore {
        fn new(rejected: Option<Column>) -> Self {
            Self {
                rejected,
                writes: Vec::new(),
            }
        }
    }

    impl SheetStore for FlakyStore {
        fn load(&self) -> Result<Vec<Vec<String>>> {
            Ok(Vec::new())
        }

        fn write_cell(&mut self, row_number: u32, column_index: u32, value: &str) -> Result<()> {
            if self.rejected.map(Column::index) == Some(column_index) {
                return Err(DeliveryError::InvalidColumn(column_index));
            }
            self.writes.push((row_number, column_index, value.to_string()));
            Ok(())
        }

        fn append_row(&mut self, _values: &[String]) -> Result<()> {
            Ok(())
        }
    }

    fn plan_with(ops: Vec<WriteOp>) -> SyncPlan {
        SyncPlan {
            ops,
            warnings: Vec::new(),
        }
    }

    #[test]
    fn empty_plan_commits_without_reload() {
        let mut store = FlakyStore::new(None);
        let outcome = commit_plan(&mut store, &plan_with(Vec::new()));
        assert!(outcome.reports.is_empty());
        assert!(!outcome.reload);
    }

    #[test]
    fn ops_are_applied_in_order_with_sheet_numbering() {
        let mut store = FlakyStore::new(None);
        let plan = plan_with(vec![
            WriteOp {
                row: 0,
                column: Column::Status,
                value: "Not started".to_string(),
            },
            WriteOp {
                row: 3,
                column: Column::Notes,
                value: "n".to_string(),
            },
        ]);
        let outcome = commit_plan(&mut store, &plan);
        assert_eq!(
            store.writes,
            vec![
                (2, 4, "Not started".to_string()),
                (5, 6, "n".to_string()),
            ]
        );
        assert!(outcome.reload);
        assert_eq!(outcome.failed(), 0);
    }

    #[test]
    fn failed_op_does_not_block_later_ops() {
        let mut store = FlakyStore::new(Some(Column::Notes));
        let plan = plan_with(vec![
            WriteOp {
                row: 3,
                column: Column::Notes,
                value: "dropped".to_string(),
            },
            WriteOp {
                row: 3,
                column: Column::Priority,
                value: "High".to_string(),
            },
        ]);
        let outcome = commit_plan(&mut store, &plan);

        assert_eq!(outcome.reports.len(), 2);
        assert!(!outcome.reports[0].ok());
        assert_eq!(outcome.reports[0].row_number, 5);
        assert_eq!(outcome.reports[0].column, Column::Notes);
        assert!(outcome.reports[1].ok());
        assert_eq!(store.writes, vec![(5, 5, "High".to_string())]);
        assert_eq!(outcome.failed(), 1);
    }

    #[test]
    fn reload_is_set_once_per_batch() {
        let mut store = FlakyStore::new(None);
        let plan = plan_with(vec![
            WriteOp {
                row: 0,
                column: Column::Status,
                value: "a".to_string(),
            },
            WriteOp {
                row: 1,
                column: Column::Status,
                value: "b".to_string(),
            },
        ]);
        let outcome = commit_plan(&mut store, &plan);
        assert!(outcome.reload);
    }

    #[test]
    fn all_ops_failing_requests_no_reload() {
        let mut store = FlakyStore::new(Some(Column::Status));
        let plan = plan_with(vec![WriteOp {
            row: 0,
            column: Column::Status,
            value: "a".to_string(),
        }]);
        let outcome = commit_plan(&mut store, &plan);
        assert!(!outcome.reload);
        assert_eq!(outcome.failed(), 1);
    }
}
