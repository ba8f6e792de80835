//! Calendar validation of timestamp literals.
//!
//! The grammar pins the structural shape of a timestamp -- field widths,
//! month 01-12, day 01-31, time ranges -- but a context-free grammar
//! cannot relate the day to the month's actual length or to leap years.
//! This pass closes that gap. It runs over the terminals of the parse
//! tree and stops at the first violation: one bad timestamp is enough to
//! classify a file, and good files must have none at all.

use crate::diagnostic::Diagnostic;
use crate::recognizer::{Terminal, TerminalKind};
use crate::tree::Walk;

/// Maximum day per month in a non-leap year.
const MONTH_DAY_MAXIMUMS: [u32; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

const YEAR_POSITION: usize = 0;
const MONTH_POSITION: usize = 5;
const DAY_POSITION: usize = 8;
/// Literals shorter than "YYYY-MM-DD" carry no day component.
const DAY_RESOLUTION_MIN_LENGTH: usize = 10;

/// Gregorian (proleptic) leap-year rule, per RFC-3339.
pub fn is_leap_year(year: u32) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

fn field(text: &str, position: usize, length: usize) -> Result<u32, String> {
    text.get(position..position + length)
        .and_then(|s| s.parse().ok())
        .ok_or_else(|| format!("invalid timestamp field: {}", text))
}

/// Validate the day-of-month semantics of a timestamp literal.
///
/// Literals below day resolution (year or year-month precision) are
/// skipped; the grammar guarantees a normalized "YYYY-MM-DD" prefix for
/// anything longer, so the field offsets are fixed.
pub fn validate_literal(text: &str) -> Result<(), String> {
    if text.len() < DAY_RESOLUTION_MIN_LENGTH {
        return Ok(());
    }
    let year = field(text, YEAR_POSITION, 4)?;
    let month = field(text, MONTH_POSITION, 2)?;
    let day = field(text, DAY_POSITION, 2)?;

    let maximum = if is_leap_year(year) && month == 2 {
        29
    } else {
        *MONTH_DAY_MAXIMUMS
            .get(month as usize - 1)
            .ok_or_else(|| format!("invalid timestamp field: {}", text))?
    };
    if day > maximum {
        return Err(format!("invalid day number: {}", text));
    }
    Ok(())
}

/// Terminal visitor for the semantic pass: timestamps are validated,
/// everything else is ignored. A violation stops the walk.
pub fn check_terminal(terminal: &Terminal<'_>) -> Walk {
    match terminal.kind {
        TerminalKind::Timestamp => match validate_literal(terminal.text) {
            Ok(()) => Walk::Continue,
            Err(message) => Walk::Stop(Diagnostic::at(terminal.line, terminal.column, message)),
        },
        TerminalKind::Other => Walk::Continue,
    }
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leap_year_rule() {
        assert!(is_leap_year(2024));
        assert!(is_leap_year(2000));
        assert!(is_leap_year(1600));
        assert!(!is_leap_year(2023));
        assert!(!is_leap_year(1900));
        assert!(!is_leap_year(2100));
    }

    #[test]
    fn short_literals_are_never_validated() {
        // Year and year-month precision cannot carry an invalid day.
        assert!(validate_literal("2023T").is_ok());
        assert!(validate_literal("2023-02T").is_ok());
        assert!(validate_literal("9999-99T").is_ok());
    }

    #[test]
    fn leap_day_in_leap_year_is_valid() {
        assert!(validate_literal("2024-02-29").is_ok());
        assert!(validate_literal("2024-02-29T00:00:00Z").is_ok());
        assert!(validate_literal("2000-02-29").is_ok());
    }

    #[test]
    fn leap_day_outside_leap_year_is_invalid() {
        let err = validate_literal("2023-02-29T00:00:00Z").unwrap_err();
        assert_eq!(err, "invalid day number: 2023-02-29T00:00:00Z");
        assert!(validate_literal("1900-02-29").is_err());
        assert!(validate_literal("2100-02-29").is_err());
    }

    #[test]
    fn century_leap_years_divisible_by_400_allow_feb_29() {
        assert!(validate_literal("1600-02-29").is_ok());
        assert!(validate_literal("2400-02-29").is_ok());
    }

    #[test]
    fn every_month_boundary_holds() {
        let maximums = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];
        for (month, max) in maximums.iter().enumerate() {
            let month = month + 1;
            let at_max = format!("2023-{:02}-{:02}", month, max);
            assert!(validate_literal(&at_max).is_ok(), "{}", at_max);
            if *max < 31 {
                let over = format!("2023-{:02}-{:02}", month, max + 1);
                assert!(validate_literal(&over).is_err(), "{}", over);
            }
        }
    }

    #[test]
    fn feb_30_is_invalid_even_in_leap_years() {
        assert!(validate_literal("2024-02-30").is_err());
    }

    #[test]
    fn check_terminal_stops_on_bad_timestamp() {
        let terminal = Terminal {
            kind: TerminalKind::Timestamp,
            line: 4,
            column: 2,
            text: "2023-02-29",
        };
        match check_terminal(&terminal) {
            Walk::Stop(d) => {
                assert_eq!((d.line, d.column), (4, 2));
                assert!(d.message.contains("2023-02-29"));
            }
            Walk::Continue => panic!("expected a stop"),
        }
    }

    #[test]
    fn check_terminal_ignores_non_timestamps() {
        let terminal = Terminal {
            kind: TerminalKind::Other,
            line: 1,
            column: 0,
            text: "2023-02-29", // a string that merely looks like one
        };
        assert!(matches!(check_terminal(&terminal), Walk::Continue));
    }
}
