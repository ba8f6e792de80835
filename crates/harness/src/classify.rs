//! The classification contract.
//!
//! A GOOD file must come through the pipeline with zero collected
//! errors; a BAD file must produce at least one. The verdict carries
//! the full error list on mismatch so a failure is diagnosable without
//! re-running.

use crate::corpus::{Label, TestCase};
use crate::pipeline::ParseOutcome;
use std::path::PathBuf;

/// The classification result for one test case.
#[derive(Debug, Clone)]
pub struct Verdict {
    pub path: PathBuf,
    pub label: Label,
    /// `None` when the outcome matched the label; otherwise the failure
    /// diagnostic text.
    pub failure: Option<String>,
}

impl Verdict {
    pub fn passed(&self) -> bool {
        self.failure.is_none()
    }
}

/// Compare a pipeline outcome against the case's expected label.
pub fn classify(case: &TestCase, outcome: &ParseOutcome) -> Verdict {
    let failure = match case.label {
        Label::Good if !outcome.is_clean() => {
            let detail: Vec<String> = outcome.errors.iter().map(|e| e.to_string()).collect();
            Some(format!("unexpected errors:\n  {}", detail.join("\n  ")))
        }
        Label::Bad if outcome.is_clean() => {
            Some("expected at least one error, got none".to_owned())
        }
        _ => None,
    };
    Verdict {
        path: case.path.clone(),
        label: case.label,
        failure,
    }
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use ionconform_core::Diagnostic;

    fn case(label: Label) -> TestCase {
        TestCase {
            path: PathBuf::from("corpus/x.ion"),
            label,
        }
    }

    fn clean() -> ParseOutcome {
        ParseOutcome {
            errors: vec![],
            decode_failed: false,
        }
    }

    fn dirty() -> ParseOutcome {
        ParseOutcome {
            errors: vec![
                Diagnostic::at(1, 0, "unexpected token ']'"),
                Diagnostic::at(2, 4, "invalid day number: 2023-02-29"),
            ],
            decode_failed: false,
        }
    }

    #[test]
    fn good_with_no_errors_passes() {
        assert!(classify(&case(Label::Good), &clean()).passed());
    }

    #[test]
    fn good_with_errors_fails_with_full_detail() {
        let verdict = classify(&case(Label::Good), &dirty());
        let failure = verdict.failure.unwrap();
        assert!(failure.contains("line 1:0 - unexpected token ']'"));
        assert!(failure.contains("line 2:4 - invalid day number: 2023-02-29"));
    }

    #[test]
    fn bad_with_errors_passes() {
        assert!(classify(&case(Label::Bad), &dirty()).passed());
    }

    #[test]
    fn bad_with_no_errors_fails() {
        let verdict = classify(&case(Label::Bad), &clean());
        assert_eq!(
            verdict.failure.as_deref(),
            Some("expected at least one error, got none")
        );
    }
}
