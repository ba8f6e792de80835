//! ionconform-core: Ion text recognizer core library.
//!
//! Provides the pieces a conformance harness needs to decide whether a
//! document is well-formed Ion text:
//!
//! - [`decode::decode_utf8`] -- strict UTF-8 decoding (malformed input is an
//!   error, never a replacement character)
//! - [`lexer::lex`] / [`parser::parse`] -- error-collecting tokenizer and
//!   recovering recursive-descent parser
//! - [`Recognizer`] -- the capability trait that lets the harness run
//!   against any tokenizer/parser pair; [`TextRecognizer`] is the
//!   reference implementation
//! - [`timestamp`] -- calendar validation of timestamp literals, the one
//!   semantic rule the grammar cannot express structurally
//!
//! No value model is built here. The recognizer reports acceptance or
//! rejection through collected [`Diagnostic`] records; it never
//! materializes a decoded document.

pub mod decode;
pub mod diagnostic;
pub mod lexer;
pub mod parser;
pub mod recognizer;
pub mod timestamp;
pub mod tree;

// ── Convenience re-exports: key types ────────────────────────────────

pub use diagnostic::{Diagnostic, NO_POSITION};
pub use lexer::{Token, TokenKind};
pub use recognizer::{Recognizer, Terminal, TerminalKind, TextRecognizer};
pub use tree::{Rule, Tree, Walk};
