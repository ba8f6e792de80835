//! Parse tree and terminal traversal.
//!
//! The tree keeps every token the parser consumed, punctuation included,
//! so a post-parse walk sees the same terminals the recognizer did. The
//! walk is driven by a visitor that returns [`Walk`]; `Stop` ends the
//! traversal immediately and surfaces its payload, which is how the
//! semantic pass implements "first violation wins" without unwinding.

use crate::diagnostic::Diagnostic;
use crate::lexer::Token;

/// Grammar rule that produced an interior node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    Document,
    Value,
    Annotation,
    List,
    Sexp,
    Struct,
    Field,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Tree {
    Node { rule: Rule, children: Vec<Tree> },
    Leaf(Token),
}

/// Visitor control for [`Tree::walk_terminals`].
#[derive(Debug)]
pub enum Walk {
    Continue,
    Stop(Diagnostic),
}

impl Tree {
    pub fn node(rule: Rule, children: Vec<Tree>) -> Tree {
        Tree::Node { rule, children }
    }

    /// Visit every terminal in source order, stopping at the first
    /// [`Walk::Stop`] and returning its diagnostic.
    pub fn walk_terminals(&self, visit: &mut dyn FnMut(&Token) -> Walk) -> Option<Diagnostic> {
        match self {
            Tree::Leaf(token) => match visit(token) {
                Walk::Continue => None,
                Walk::Stop(d) => Some(d),
            },
            Tree::Node { children, .. } => {
                for child in children {
                    if let Some(d) = child.walk_terminals(visit) {
                        return Some(d);
                    }
                }
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::TokenKind;

    fn leaf(text: &str) -> Tree {
        Tree::Leaf(Token {
            kind: TokenKind::Symbol,
            line: 1,
            column: 0,
            text: text.to_owned(),
        })
    }

    #[test]
    fn walks_all_terminals_in_order() {
        let tree = Tree::node(
            Rule::Document,
            vec![
                leaf("a"),
                Tree::node(Rule::List, vec![leaf("b"), leaf("c")]),
                leaf("d"),
            ],
        );
        let mut seen = Vec::new();
        let result = tree.walk_terminals(&mut |t| {
            seen.push(t.text.clone());
            Walk::Continue
        });
        assert!(result.is_none());
        assert_eq!(seen, vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn stop_short_circuits_remaining_terminals() {
        let tree = Tree::node(
            Rule::Document,
            vec![leaf("a"), leaf("bad"), leaf("never-visited")],
        );
        let mut seen = Vec::new();
        let result = tree.walk_terminals(&mut |t| {
            seen.push(t.text.clone());
            if t.text == "bad" {
                Walk::Stop(Diagnostic::at(t.line, t.column, "stopped here"))
            } else {
                Walk::Continue
            }
        });
        assert_eq!(result.unwrap().message, "stopped here");
        assert_eq!(seen, vec!["a", "bad"]);
    }
}
