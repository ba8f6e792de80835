//! Recovering recursive-descent parser for Ion text.
//!
//! The single entry point is [`parse`], which always produces a tree --
//! possibly partial when the input is defective -- and appends every
//! syntax error to the shared collector. Recovery is local: an
//! unexpected token is reported, skipped, and parsing resumes at the
//! same nesting level, so one file can surface many independent
//! defects.
//!
//! Grammar, from the top-level rule down:
//!
//! ```text
//! document  : value* EOF
//! value     : annotation* (scalar | list | sexp | struct)
//! annotation: (symbol | quoted_symbol) '::'
//! list      : '[' (value (',' value)* ','?)? ']'
//! sexp      : '(' (value | operator)* ')'
//! struct    : '{' (field (',' field)* ','?)? '}'
//! field     : field_name ':' value
//! ```

use crate::diagnostic::Diagnostic;
use crate::lexer::{Token, TokenKind};
use crate::tree::{Rule, Tree};

/// Parse a token stream from the top-level rule, appending syntax
/// errors to `errors`. The returned tree is degraded but well-formed
/// when errors occurred; walking it is always safe.
pub fn parse(tokens: &[Token], errors: &mut Vec<Diagnostic>) -> Tree {
    let mut p = Parser {
        tokens,
        pos: 0,
        errors,
    };
    p.parse_document()
}

struct Parser<'a, 'e> {
    tokens: &'a [Token],
    pos: usize,
    errors: &'e mut Vec<Diagnostic>,
}

impl Parser<'_, '_> {
    fn cur(&self) -> &Token {
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    fn kind(&self) -> TokenKind {
        self.cur().kind
    }

    fn kind_at(&self, offset: usize) -> TokenKind {
        self.tokens[(self.pos + offset).min(self.tokens.len() - 1)].kind
    }

    fn advance(&mut self) -> Token {
        let t = self.cur().clone();
        if self.pos < self.tokens.len() - 1 {
            self.pos += 1;
        }
        t
    }

    fn take_leaf(&mut self) -> Tree {
        Tree::Leaf(self.advance())
    }

    fn err_here(&mut self, message: impl Into<String>) {
        let (line, column) = (self.cur().line, self.cur().column);
        self.errors.push(Diagnostic::at(line, column, message.into()));
    }

    fn parse_document(&mut self) -> Tree {
        let mut children = Vec::new();
        while self.kind() != TokenKind::Eof {
            if let Some(value) = self.parse_annotated_value(false) {
                children.push(value);
            }
        }
        Tree::node(Rule::Document, children)
    }

    /// One annotated value. Returns `None` only when nothing at all was
    /// parsed (the offending token has already been reported and
    /// skipped), so callers always make progress.
    fn parse_annotated_value(&mut self, in_sexp: bool) -> Option<Tree> {
        let mut parts = Vec::new();
        while matches!(self.kind(), TokenKind::Symbol | TokenKind::QuotedSymbol)
            && self.kind_at(1) == TokenKind::DoubleColon
        {
            let symbol = self.take_leaf();
            let marker = self.take_leaf();
            parts.push(Tree::node(Rule::Annotation, vec![symbol, marker]));
        }

        match self.parse_value(in_sexp) {
            Some(value) => {
                if parts.is_empty() {
                    Some(value)
                } else {
                    parts.push(value);
                    Some(Tree::node(Rule::Value, parts))
                }
            }
            None if parts.is_empty() => None,
            // Keep the annotation terminals even though the value is gone.
            None => Some(Tree::node(Rule::Value, parts)),
        }
    }

    fn parse_value(&mut self, in_sexp: bool) -> Option<Tree> {
        match self.kind() {
            TokenKind::Null
            | TokenKind::Bool
            | TokenKind::Int
            | TokenKind::Float
            | TokenKind::Decimal
            | TokenKind::Timestamp
            | TokenKind::Symbol
            | TokenKind::QuotedSymbol
            | TokenKind::String
            | TokenKind::LongString
            | TokenKind::Blob
            | TokenKind::Clob => Some(self.take_leaf()),
            TokenKind::LBracket => Some(self.parse_list()),
            TokenKind::LParen => Some(self.parse_sexp()),
            TokenKind::LBrace => Some(self.parse_struct()),
            TokenKind::Operator if in_sexp => Some(self.take_leaf()),
            TokenKind::Eof => {
                self.err_here("expected value, got end of input");
                None
            }
            _ => {
                let text = self.cur().text.clone();
                self.err_here(format!("unexpected token '{}'", text));
                self.advance();
                None
            }
        }
    }

    fn parse_list(&mut self) -> Tree {
        let mut children = vec![self.take_leaf()]; // '['
        loop {
            match self.kind() {
                TokenKind::RBracket => {
                    children.push(self.take_leaf());
                    break;
                }
                TokenKind::Eof => {
                    self.err_here("expected ']' before end of input");
                    break;
                }
                TokenKind::Comma => {
                    self.err_here("unexpected token ','");
                    self.advance();
                }
                _ => {
                    if let Some(value) = self.parse_annotated_value(false) {
                        children.push(value);
                    }
                    match self.kind() {
                        TokenKind::Comma => children.push(self.take_leaf()),
                        TokenKind::RBracket | TokenKind::Eof => {}
                        _ => {
                            let text = self.cur().text.clone();
                            self.err_here(format!("expected ',' or ']', got '{}'", text));
                        }
                    }
                }
            }
        }
        Tree::node(Rule::List, children)
    }

    fn parse_sexp(&mut self) -> Tree {
        let mut children = vec![self.take_leaf()]; // '('
        loop {
            match self.kind() {
                TokenKind::RParen => {
                    children.push(self.take_leaf());
                    break;
                }
                TokenKind::Eof => {
                    self.err_here("expected ')' before end of input");
                    break;
                }
                TokenKind::Operator => children.push(self.take_leaf()),
                _ => {
                    if let Some(value) = self.parse_annotated_value(true) {
                        children.push(value);
                    }
                }
            }
        }
        Tree::node(Rule::Sexp, children)
    }

    fn parse_struct(&mut self) -> Tree {
        let mut children = vec![self.take_leaf()]; // '{'
        loop {
            match self.kind() {
                TokenKind::RBrace => {
                    children.push(self.take_leaf());
                    break;
                }
                TokenKind::Eof => {
                    self.err_here("expected '}' before end of input");
                    break;
                }
                TokenKind::Comma => {
                    self.err_here("unexpected token ','");
                    self.advance();
                }
                TokenKind::Symbol
                | TokenKind::QuotedSymbol
                | TokenKind::String
                | TokenKind::LongString => {
                    children.push(self.parse_field());
                    match self.kind() {
                        TokenKind::Comma => children.push(self.take_leaf()),
                        TokenKind::RBrace | TokenKind::Eof => {}
                        _ => {
                            let text = self.cur().text.clone();
                            self.err_here(format!("expected ',' or '}}', got '{}'", text));
                        }
                    }
                }
                _ => {
                    let text = self.cur().text.clone();
                    self.err_here(format!("expected field name, got '{}'", text));
                    self.advance();
                }
            }
        }
        Tree::node(Rule::Struct, children)
    }

    fn parse_field(&mut self) -> Tree {
        let mut parts = vec![self.take_leaf()]; // field name
        if self.kind() == TokenKind::Colon {
            parts.push(self.take_leaf());
            if let Some(value) = self.parse_annotated_value(false) {
                parts.push(value);
            }
        } else {
            self.err_here("expected ':' after field name");
        }
        Tree::node(Rule::Field, parts)
    }
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer;
    use crate::tree::Walk;

    /// Helper: lex + parse, returning the tree and all collected errors.
    fn recognize(src: &str) -> (Tree, Vec<Diagnostic>) {
        let mut errors = Vec::new();
        let tokens = lexer::lex(src, &mut errors);
        let tree = parse(&tokens, &mut errors);
        (tree, errors)
    }

    fn terminal_texts(tree: &Tree) -> Vec<String> {
        let mut out = Vec::new();
        tree.walk_terminals(&mut |t| {
            out.push(t.text.clone());
            Walk::Continue
        });
        out
    }

    #[test]
    fn empty_document_has_no_errors() {
        let (tree, errors) = recognize("");
        assert!(errors.is_empty());
        assert_eq!(tree, Tree::node(Rule::Document, vec![]));
    }

    #[test]
    fn top_level_scalars_parse_clean() {
        let (_, errors) = recognize("null true 42 3.14 \"s\" sym 2024-02-29");
        assert!(errors.is_empty(), "{:?}", errors);
    }

    #[test]
    fn nested_containers_parse_clean() {
        let (tree, errors) = recognize("{a: [1, 2, {b: (x + y)}], c: ann::3}");
        assert!(errors.is_empty(), "{:?}", errors);
        let texts = terminal_texts(&tree);
        assert!(texts.contains(&"ann".to_string()));
        assert!(texts.contains(&"+".to_string()));
    }

    #[test]
    fn trailing_commas_are_accepted() {
        let (_, errors) = recognize("[1, 2,] {a: 1,}");
        assert!(errors.is_empty(), "{:?}", errors);
    }

    #[test]
    fn unclosed_list_reports_an_error() {
        let (_, errors) = recognize("[1, 2");
        assert_eq!(errors.len(), 1);
        assert!(errors[0].message.contains("']'"));
    }

    #[test]
    fn missing_comma_in_list_reports_an_error() {
        let (_, errors) = recognize("[1 2]");
        assert_eq!(errors.len(), 1);
        assert!(errors[0].message.contains("expected ','"));
    }

    #[test]
    fn struct_field_without_colon_reports_an_error() {
        let (_, errors) = recognize("{name \"x\"}");
        assert!(!errors.is_empty());
        assert!(errors[0].message.contains("':'"));
    }

    #[test]
    fn operator_outside_sexp_is_an_error() {
        let (_, errors) = recognize("+ 1");
        assert_eq!(errors.len(), 1);
        assert!(errors[0].message.contains("unexpected token '+'"));
    }

    #[test]
    fn operators_inside_sexp_are_fine() {
        let (_, errors) = recognize("(a + b - c)");
        assert!(errors.is_empty(), "{:?}", errors);
    }

    #[test]
    fn errors_accumulate_across_constructs() {
        let (_, errors) = recognize("[1 2] {a 1}");
        assert!(errors.len() >= 2, "{:?}", errors);
    }

    #[test]
    fn degraded_tree_still_walks() {
        let (tree, errors) = recognize("[2024-02-29, ");
        assert!(!errors.is_empty());
        let texts = terminal_texts(&tree);
        assert!(texts.contains(&"2024-02-29".to_string()));
    }

    #[test]
    fn annotation_without_value_is_reported_but_kept() {
        let (tree, errors) = recognize("ann::");
        assert_eq!(errors.len(), 1);
        assert!(terminal_texts(&tree).contains(&"ann".to_string()));
    }

    #[test]
    fn version_marker_is_a_plain_symbol() {
        let (_, errors) = recognize("$ion_1_0 {a: 1}");
        assert!(errors.is_empty(), "{:?}", errors);
    }
}
