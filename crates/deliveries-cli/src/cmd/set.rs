use crate::output::print_json;
use anyhow::Context;
use deliveries_core::date;
use deliveries_core::row::{format_done, parse_done};
use deliveries_core::sheet::LocalSheet;
use deliveries_core::store::SheetStore;
use deliveries_core::sync::Column;
use deliveries_core::types::Frequency;
use std::path::Path;
use std::str::FromStr;

pub fn run(sheet: &Path, row: u32, column: &str, value: &str, json: bool) -> anyhow::Result<()> {
    let column = Column::from_str(column)?;
    let value = canonicalize(column, value)?;

    let mut store = LocalSheet::open(sheet);
    store
        .write_cell(row, column.index(), &value)
        .with_context(|| format!("failed to update row {row}, column {column}"))?;

    if json {
        print_json(&serde_json::json!({
            "row_number": row,
            "column": column,
            "value": value,
        }))?;
    } else {
        println!("Updated row {row}: {column} = {value}");
    }
    Ok(())
}

/// Validate and canonicalize per column before writing. Status, Priority
/// and Notes stay free text; dates, booleans and frequency labels are
/// normalized so the stored cells keep their canonical forms.
fn canonicalize(column: Column, value: &str) -> anyhow::Result<String> {
    let canonical = match column {
        Column::Due => {
            if value.trim().is_empty() {
                String::new()
            } else {
                date::format_due(date::parse_due(value)?)
            }
        }
        Column::Done => format_done(parse_done(value)).to_string(),
        Column::Frequency => {
            if value.trim().is_empty() {
                String::new()
            } else {
                Frequency::from_str(value)?.as_str().to_string()
            }
        }
        Column::Status | Column::Priority | Column::Notes => value.to_string(),
    };
    Ok(canonical)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn due_is_canonicalized_to_iso() {
        assert_eq!(canonicalize(Column::Due, "15/03/2024").unwrap(), "2024-03-15");
        assert!(canonicalize(Column::Due, "someday").is_err());
    }

    #[test]
    fn done_is_normalized() {
        assert_eq!(canonicalize(Column::Done, "yes").unwrap(), "TRUE");
        assert_eq!(canonicalize(Column::Done, "nope").unwrap(), "FALSE");
    }

    #[test]
    fn frequency_is_validated_but_clearable() {
        assert_eq!(
            canonicalize(Column::Frequency, " Monthly ").unwrap(),
            "monthly"
        );
        assert_eq!(canonicalize(Column::Frequency, "").unwrap(), "");
        assert!(canonicalize(Column::Frequency, "fortnightly").is_err());
    }

    #[test]
    fn notes_pass_through() {
        assert_eq!(canonicalize(Column::Notes, " as is ").unwrap(), " as is ");
    }
}
