//! Strict UTF-8 decoding.
//!
//! The Ion text format is defined over UTF-8; an encoding violation is
//! itself a category of malformed input. Decoding must therefore fail
//! loudly rather than substitute U+FFFD or drop bytes, and a failure
//! short-circuits the rest of the pipeline for that file -- the byte
//! stream is no longer reliably positioned, so no recognizer runs.

use crate::diagnostic::Diagnostic;

/// Decode `bytes` as UTF-8, refusing malformed input.
///
/// On failure returns one position-less [`Diagnostic`] naming the byte
/// offset of the first defect.
pub fn decode_utf8(bytes: &[u8]) -> Result<&str, Diagnostic> {
    std::str::from_utf8(bytes).map_err(|e| {
        Diagnostic::positionless(format!(
            "malformed UTF-8 at byte offset {}",
            e.valid_up_to()
        ))
    })
}
