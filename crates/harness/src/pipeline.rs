//! The per-file pipeline: decode, recognize, semantic walk.
//!
//! Strictly sequential within one file -- decoding completes before the
//! recognizer runs, recognition completes before the semantic walk.
//! Every defect ends up in the outcome's error list; nothing escapes as
//! a fault during normal operation.

use std::path::Path;

use ionconform_core::decode::decode_utf8;
use ionconform_core::timestamp;
use ionconform_core::{Diagnostic, Recognizer};

/// Everything the classifier needs about one file: the collected errors
/// and whether decoding failed outright. Transient, never persisted.
#[derive(Debug, Clone)]
pub struct ParseOutcome {
    pub errors: Vec<Diagnostic>,
    pub decode_failed: bool,
}

impl ParseOutcome {
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }

    fn decoding_failure(diagnostic: Diagnostic) -> Self {
        ParseOutcome {
            errors: vec![diagnostic],
            decode_failed: true,
        }
    }
}

/// Run the pipeline over raw bytes.
///
/// A decoding failure short-circuits: the recognizer never sees a byte
/// stream that is not reliably positioned, and the outcome carries
/// exactly one error. Otherwise syntax errors accumulate through
/// recognition and at most one semantic error is appended by the
/// timestamp walk.
pub fn check_bytes<R: Recognizer>(bytes: &[u8], recognizer: &R) -> ParseOutcome {
    let text = match decode_utf8(bytes) {
        Ok(text) => text,
        Err(diagnostic) => return ParseOutcome::decoding_failure(diagnostic),
    };

    let mut errors = Vec::new();
    match recognizer.recognize(text, &mut errors) {
        Ok(tree) => {
            // The walk runs even over a degraded tree; bad files often
            // carry both syntax and semantic defects.
            if let Some(diagnostic) =
                recognizer.walk_terminals(&tree, &mut timestamp::check_terminal)
            {
                errors.push(diagnostic);
            }
        }
        Err(diagnostic) => errors.push(diagnostic),
    }
    ParseOutcome {
        errors,
        decode_failed: false,
    }
}

/// Run the pipeline over a file on disk. An unreadable file becomes a
/// position-less diagnostic rather than aborting the corpus run.
pub fn check_file<R: Recognizer>(path: &Path, recognizer: &R) -> ParseOutcome {
    match std::fs::read(path) {
        Ok(bytes) => check_bytes(&bytes, recognizer),
        Err(e) => ParseOutcome {
            errors: vec![Diagnostic::positionless(format!(
                "cannot read {}: {}",
                path.display(),
                e
            ))],
            decode_failed: false,
        },
    }
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use ionconform_core::TextRecognizer;

    fn outcome(bytes: &[u8]) -> ParseOutcome {
        check_bytes(bytes, &TextRecognizer::new())
    }

    #[test]
    fn empty_document_is_clean() {
        let out = outcome(b"");
        assert!(out.is_clean());
        assert!(!out.decode_failed);
    }

    #[test]
    fn well_formed_document_is_clean() {
        let out = outcome(b"$ion_1_0\n{a: [1, 2], when: 2024-02-29}\n");
        assert!(out.is_clean(), "{:?}", out.errors);
    }

    #[test]
    fn invalid_utf8_short_circuits_with_one_error() {
        let out = outcome(b"{a: \xff}");
        assert!(out.decode_failed);
        assert_eq!(out.errors.len(), 1);
        assert!(out.errors[0].message.contains("malformed UTF-8"));
    }

    #[test]
    fn syntax_errors_accumulate() {
        let out = outcome(b"[1 2] {a 1}");
        assert!(out.errors.len() >= 2, "{:?}", out.errors);
        assert!(!out.decode_failed);
    }

    #[test]
    fn semantic_error_is_first_violation_only() {
        // Two calendar-invalid timestamps; the walk stops at the first.
        let out = outcome(b"2023-02-29 2023-04-31");
        assert_eq!(out.errors.len(), 1, "{:?}", out.errors);
        assert!(out.errors[0].message.contains("2023-02-29"));
    }

    #[test]
    fn leap_day_in_leap_year_is_clean() {
        assert!(outcome(b"2024-02-29T00:00:00Z").is_clean());
    }

    #[test]
    fn syntax_and_semantic_defects_both_surface() {
        let out = outcome(b"[1 2] 2023-02-29");
        assert!(out.errors.len() >= 2, "{:?}", out.errors);
    }

    #[test]
    fn pipeline_is_idempotent() {
        let bytes = b"{a: 2023-02-29}";
        let first = outcome(bytes);
        let second = outcome(bytes);
        assert_eq!(first.errors, second.errors);
    }
}
