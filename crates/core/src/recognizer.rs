//! The recognizer capability boundary.
//!
//! The conformance harness never inspects a parse tree's shape; it only
//! needs (1) "tokenize and parse, telling me every syntax error" and
//! (2) "let me visit every terminal of whatever tree came back". The
//! [`Recognizer`] trait captures exactly that, so a generated parser or
//! a different hand-written one can be substituted without touching the
//! harness. [`TextRecognizer`] is the reference implementation backed
//! by [`crate::lexer`] and [`crate::parser`].

use crate::diagnostic::Diagnostic;
use crate::lexer::{self, TokenKind};
use crate::parser;
use crate::tree::{Tree, Walk};

/// Terminal classification the harness cares about. Everything that is
/// not a timestamp is opaque to the semantic pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminalKind {
    Timestamp,
    Other,
}

/// A recognizer-independent view of one terminal node.
#[derive(Debug)]
pub struct Terminal<'a> {
    pub kind: TerminalKind,
    pub line: u32,
    pub column: u32,
    pub text: &'a str,
}

pub trait Recognizer {
    type Tree;

    /// Tokenize and parse `source` from the top-level rule, appending
    /// every syntax error to `errors` and recovering where possible.
    ///
    /// `Err` is reserved for an unrecoverable failure of the recognizer
    /// itself -- the pipeline converts it into a single diagnostic
    /// rather than letting it abort the whole corpus run.
    fn recognize(
        &self,
        source: &str,
        errors: &mut Vec<Diagnostic>,
    ) -> Result<Self::Tree, Diagnostic>;

    /// Visit every terminal of `tree` in source order. Returns the
    /// diagnostic of the first [`Walk::Stop`], if any.
    fn walk_terminals(
        &self,
        tree: &Self::Tree,
        visit: &mut dyn FnMut(&Terminal<'_>) -> Walk,
    ) -> Option<Diagnostic>;
}

/// The built-in Ion text recognizer. Fully recovering: it never fails
/// outright, so `recognize` always returns `Ok`.
#[derive(Debug, Default)]
pub struct TextRecognizer;

impl TextRecognizer {
    pub fn new() -> Self {
        TextRecognizer
    }
}

impl Recognizer for TextRecognizer {
    type Tree = Tree;

    fn recognize(&self, source: &str, errors: &mut Vec<Diagnostic>) -> Result<Tree, Diagnostic> {
        let tokens = lexer::lex(source, errors);
        Ok(parser::parse(&tokens, errors))
    }

    fn walk_terminals(
        &self,
        tree: &Tree,
        visit: &mut dyn FnMut(&Terminal<'_>) -> Walk,
    ) -> Option<Diagnostic> {
        tree.walk_terminals(&mut |token| {
            let kind = match token.kind {
                TokenKind::Timestamp => TerminalKind::Timestamp,
                _ => TerminalKind::Other,
            };
            visit(&Terminal {
                kind,
                line: token.line,
                column: token.column,
                text: &token.text,
            })
        })
    }
}
