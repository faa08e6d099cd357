use serde::{Deserialize, Serialize};
use std::fmt;

use crate::date;
use crate::error::DeliveryError;
use crate::recurrence;
use crate::row::{format_done, sheet_row_number, DeliveryRow};
use crate::types::Status;

// ---------------------------------------------------------------------------
// Column
// ---------------------------------------------------------------------------

/// Sheet columns, in header order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Column {
    Due,
    Frequency,
    Done,
    Status,
    Priority,
    Notes,
}

impl Column {
    pub fn as_str(self) -> &'static str {
        match self {
            Column::Due => "Due",
            Column::Frequency => "Frequency",
            Column::Done => "Done",
            Column::Status => "Status",
            Column::Priority => "Priority",
            Column::Notes => "Notes",
        }
    }

    /// 1-based sheet column index, matching the canonical header order.
    pub fn index(self) -> u32 {
        self as u32 + 1
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Column {
    type Err = DeliveryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "due" => Ok(Column::Due),
            "frequency" => Ok(Column::Frequency),
            "done" => Ok(Column::Done),
            "status" => Ok(Column::Status),
            "priority" => Ok(Column::Priority),
            "notes" => Ok(Column::Notes),
            _ => Err(DeliveryError::UnknownColumn(s.trim().to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Plan types
// ---------------------------------------------------------------------------

/// A single targeted cell update. `row` is the 0-based snapshot index;
/// the commit step maps it to a sheet row number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WriteOp {
    pub row: usize,
    pub column: Column,
    pub value: String,
}

/// Non-fatal findings surfaced to the operator. Report-and-continue: a
/// warning on one row never stops processing of the others.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SyncWarning {
    /// Done tick with a frequency the offset table does not know.
    /// The tick is left unresolved for the operator to notice.
    NoReschedule { row_number: u32, label: String },
    /// Done tick on a row with no usable due date.
    MissingDueDate { row_number: u32 },
}

impl fmt::Display for SyncWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyncWarning::NoReschedule { row_number, label } => write!(
                f,
                "row {row_number}: no reschedule rule for frequency '{label}', tick left unresolved"
            ),
            SyncWarning::MissingDueDate { row_number } => {
                write!(f, "row {row_number}: no usable due date, cannot reschedule")
            }
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SyncPlan {
    pub ops: Vec<WriteOp>,
    pub warnings: Vec<SyncWarning>,
}

// ---------------------------------------------------------------------------
// Diff
// ---------------------------------------------------------------------------

/// Diff an edited snapshot against the last-loaded one and plan the minimal
/// set of cell writes. Stateless; ops come out in row order, then sheet
/// column order within a row.
///
/// Per row:
/// 1. A done tick (false → true edge) triggers the recurrence rule against
///    the *original* due date. On success exactly three ops are planned —
///    new due date, status reset, done cleared — and the row is considered
///    fully handled; simultaneous edits to other fields of that row are
///    overridden by the reschedule.
/// 2. Otherwise the free-editable fields (Status, Priority, Notes) are
///    compared as strings, one independent op per changed field.
///
/// Rows beyond either snapshot's bounds are ignored; additions go through
/// `SheetStore::append_row`, not this path.
pub fn diff_and_plan(original: &[DeliveryRow], edited: &[DeliveryRow]) -> SyncPlan {
    let mut plan = SyncPlan::default();

    for (i, (old, new)) in original.iter().zip(edited.iter()).enumerate() {
        if new.done && !old.done && plan_reschedule(&mut plan, i, old, new) {
            continue;
        }

        for (column, old_value, new_value) in [
            (Column::Status, &old.status, &new.status),
            (Column::Priority, &old.priority, &new.priority),
            (Column::Notes, &old.notes, &new.notes),
        ] {
            if old_value != new_value {
                plan.ops.push(WriteOp {
                    row: i,
                    column,
                    value: new_value.clone(),
                });
            }
        }
    }

    plan
}

/// Returns true when the row was fully handled by a successful reschedule.
fn plan_reschedule(plan: &mut SyncPlan, i: usize, old: &DeliveryRow, new: &DeliveryRow) -> bool {
    let Some(due) = old.due else {
        plan.warnings.push(SyncWarning::MissingDueDate {
            row_number: sheet_row_number(i),
        });
        return false;
    };

    match recurrence::next_due(due, &new.frequency) {
        Ok(next) => {
            plan.ops.push(WriteOp {
                row: i,
                column: Column::Due,
                value: date::format_due(next),
            });
            plan.ops.push(WriteOp {
                row: i,
                column: Column::Status,
                value: Status::NotStarted.to_string(),
            });
            plan.ops.push(WriteOp {
                row: i,
                column: Column::Done,
                value: format_done(false).to_string(),
            });
            true
        }
        Err(err) => {
            // The tick is not written back: after reload it reverts in the
            // view and the operator sees nothing advanced.
            plan.warnings.push(SyncWarning::NoReschedule {
                row_number: sheet_row_number(i),
                label: err.0,
            });
            false
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
