use chrono::{Days, Months, NaiveDate};
use std::str::FromStr;
use thiserror::Error;

use crate::types::Frequency;

/// The frequency label carries no reschedule rule (empty, unrecognized, or
/// the advanced date would leave chrono's representable range). The caller
/// must leave the due date and status untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("no reschedule rule for frequency '{0}'")]
pub struct NoReschedule(pub String);

/// Compute the next due date for a completed delivery.
///
/// Offset table: weekly → +7 days, monthly → +1 calendar month,
/// quarterly → +3, semesterly → +6. Month arithmetic is calendar-aware:
/// Jan 31 + 1 month lands on the last valid day of February.
pub fn next_due(due: NaiveDate, frequency_label: &str) -> Result<NaiveDate, NoReschedule> {
    let frequency = Frequency::from_str(frequency_label)
        .map_err(|_| NoReschedule(frequency_label.trim().to_string()))?;
    advance(due, frequency).ok_or_else(|| NoReschedule(frequency_label.trim().to_string()))
}

/// Calendar-aware advance by one recurrence interval.
/// `None` only when the result would overflow chrono's date range.
pub fn advance(due: NaiveDate, frequency: Frequency) -> Option<NaiveDate> {
    match frequency {
        Frequency::Weekly => due.checked_add_days(Days::new(7)),
        Frequency::Monthly => due.checked_add_months(Months::new(1)),
        Frequency::Quarterly => due.checked_add_months(Months::new(3)),
        Frequency::Semesterly => due.checked_add_months(Months::new(6)),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
