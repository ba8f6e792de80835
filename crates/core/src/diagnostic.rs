use serde::{Deserialize, Serialize};

/// Sentinel for "no position": decoding failures and recognizer crashes
/// happen before any reliable line/column exists.
pub const NO_POSITION: i32 = -1;

/// A single recognition defect: a syntax error from the lexer or parser,
/// a semantic error from the timestamp validator, or a decoding failure.
/// Immutable once created; collected in discovery order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Diagnostic {
    /// 1-based line, or [`NO_POSITION`].
    pub line: i32,
    /// 0-based character offset within the line, or [`NO_POSITION`].
    pub column: i32,
    pub message: String,
}

impl Diagnostic {
    /// A diagnostic attributed to a source position.
    pub fn at(line: u32, column: u32, message: impl Into<String>) -> Self {
        Diagnostic {
            line: line as i32,
            column: column as i32,
            message: message.into(),
        }
    }

    /// A diagnostic with no usable position (decoding defects, recognizer
    /// failures outside the token stream).
    pub fn positionless(message: impl Into<String>) -> Self {
        Diagnostic {
            line: NO_POSITION,
            column: NO_POSITION,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "line {}:{} - {}", self.line, self.column, self.message)
    }
}
