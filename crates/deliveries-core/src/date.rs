use crate::error::{DeliveryError, Result};
use chrono::NaiveDate;

/// Accepted due-date formats, tried in order. Ambiguous numeric dates are
/// read day-first ("03/04/2024" is 3 April, not 4 March).
const FORMATS: &[&str] = &["%Y-%m-%d", "%d/%m/%Y", "%d-%m-%Y", "%d.%m.%Y"];

pub fn parse_due(text: &str) -> Result<NaiveDate> {
    let trimmed = text.trim();
    for fmt in FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, fmt) {
            return Ok(date);
        }
    }
    Err(DeliveryError::DateParse(trimmed.to_string()))
}

/// Canonical write-back form: ISO calendar date.
pub fn format_due(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn parses_iso() {
        assert_eq!(parse_due("2024-03-15").unwrap(), d(2024, 3, 15));
    }

    #[test]
    fn parses_day_first() {
        assert_eq!(parse_due("03/04/2024").unwrap(), d(2024, 4, 3));
        assert_eq!(parse_due("15-03-2024").unwrap(), d(2024, 3, 15));
        assert_eq!(parse_due("1.2.2024").unwrap(), d(2024, 2, 1));
    }

    #[test]
    fn trims_whitespace() {
        assert_eq!(parse_due("  2024-03-15 ").unwrap(), d(2024, 3, 15));
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse_due("next tuesday").is_err());
        assert!(parse_due("2024-13-01").is_err());
        assert!(parse_due("").is_err());
    }

    #[test]
    fn formats_iso() {
        assert_eq!(format_due(d(2024, 6, 15)), "2024-06-15");
    }

    #[test]
    fn roundtrips_through_canonical_form() {
        let date = parse_due("31/01/2024").unwrap();
        assert_eq!(parse_due(&format_due(date)).unwrap(), date);
    }
}
