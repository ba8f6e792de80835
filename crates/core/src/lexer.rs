//! Error-collecting tokenizer for Ion text.
//!
//! Unlike a fail-fast lexer, every defect is appended to the shared
//! diagnostic collector and scanning continues, so a single file can
//! report all of its lexical problems. Tokens carry their kind, 1-based
//! line, 0-based column, and the raw source lexeme.
//!
//! The timestamp rule enforces the structural shape a grammar can
//! express (field widths, month 01-12, day 01-31, time component
//! ranges, mandatory offset). The calendar cross-field rule -- day of
//! month against month length and leap years -- is left to the semantic
//! validator in [`crate::timestamp`].

use crate::diagnostic::Diagnostic;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Null,
    Bool,
    Int,
    Float,
    Decimal,
    Timestamp,
    Symbol,
    QuotedSymbol,
    String,
    LongString,
    Blob,
    Clob,
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    LParen,
    RParen,
    Comma,
    Colon,
    DoubleColon,
    /// Single operator character; only meaningful inside an s-expression.
    Operator,
    Eof,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    /// 1-based source line of the first character.
    pub line: u32,
    /// 0-based character offset within that line.
    pub column: u32,
    /// The raw lexeme as written, quotes and all.
    pub text: String,
}

/// Tokenize `src`, appending every lexical defect to `errors`.
///
/// Always returns a token stream terminated by a single [`TokenKind::Eof`]
/// token; defective input yields fewer value tokens, never a panic.
pub fn lex(src: &str, errors: &mut Vec<Diagnostic>) -> Vec<Token> {
    let mut lx = Lexer {
        chars: src.chars().collect(),
        pos: 0,
        line: 1,
        line_start: 0,
        tokens: Vec::new(),
        errors,
    };
    lx.run();
    lx.tokens
}

const NULL_TYPES: &[&str] = &[
    "null", "bool", "int", "float", "decimal", "timestamp", "string", "symbol", "blob", "clob",
    "struct", "list", "sexp",
];

/// Characters that may legally follow a number or timestamp.
fn is_stop_char(c: Option<char>) -> bool {
    match c {
        None => true,
        Some(c) => {
            c.is_whitespace()
                || matches!(
                    c,
                    ',' | ']' | '}' | ')' | '[' | '{' | '(' | '"' | '\'' | '/'
                )
        }
    }
}

fn is_operator_char(c: char) -> bool {
    matches!(
        c,
        '!' | '#' | '%' | '&' | '*' | '+' | '-' | '.' | ';' | '<' | '=' | '>' | '?' | '@' | '^'
            | '`' | '|' | '~'
    )
}

fn is_identifier_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_' || c == '$'
}

fn is_identifier_part(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '$'
}

struct Lexer<'a> {
    chars: Vec<char>,
    pos: usize,
    line: u32,
    line_start: usize,
    tokens: Vec<Token>,
    errors: &'a mut Vec<Diagnostic>,
}

impl Lexer<'_> {
    fn cur(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn at(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).copied()
    }

    fn col(&self) -> u32 {
        (self.pos - self.line_start) as u32
    }

    /// Consume one character, tracking line boundaries.
    fn bump(&mut self) {
        if self.cur() == Some('\n') {
            self.line += 1;
            self.line_start = self.pos + 1;
        }
        self.pos += 1;
    }

    fn error(&mut self, line: u32, column: u32, message: impl Into<String>) {
        self.errors.push(Diagnostic::at(line, column, message));
    }

    fn push(&mut self, kind: TokenKind, start: usize, line: u32, column: u32) {
        let text: String = self.chars[start..self.pos].iter().collect();
        self.tokens.push(Token {
            kind,
            line,
            column,
            text,
        });
    }

    fn push_punct(&mut self, kind: TokenKind, len: usize) {
        let start = self.pos;
        let (line, column) = (self.line, self.col());
        for _ in 0..len {
            self.bump();
        }
        self.push(kind, start, line, column);
    }

    fn run(&mut self) {
        loop {
            let c = match self.cur() {
                Some(c) => c,
                None => break,
            };

            if c.is_whitespace() {
                self.bump();
                continue;
            }

            // Line comment
            if c == '/' && self.at(1) == Some('/') {
                while self.cur().is_some() && self.cur() != Some('\n') {
                    self.bump();
                }
                continue;
            }

            // Block comment
            if c == '/' && self.at(1) == Some('*') {
                let (line, column) = (self.line, self.col());
                self.bump();
                self.bump();
                loop {
                    match self.cur() {
                        None => {
                            self.error(line, column, "unterminated block comment");
                            break;
                        }
                        Some('*') if self.at(1) == Some('/') => {
                            self.bump();
                            self.bump();
                            break;
                        }
                        Some(_) => self.bump(),
                    }
                }
                continue;
            }

            match c {
                '"' => self.short_string(),
                '\'' => {
                    if self.at(1) == Some('\'') && self.at(2) == Some('\'') {
                        self.long_string();
                    } else {
                        self.quoted_symbol();
                    }
                }
                '{' => {
                    if self.at(1) == Some('{') {
                        self.lob();
                    } else {
                        self.push_punct(TokenKind::LBrace, 1);
                    }
                }
                '}' => self.push_punct(TokenKind::RBrace, 1),
                '[' => self.push_punct(TokenKind::LBracket, 1),
                ']' => self.push_punct(TokenKind::RBracket, 1),
                '(' => self.push_punct(TokenKind::LParen, 1),
                ')' => self.push_punct(TokenKind::RParen, 1),
                ',' => self.push_punct(TokenKind::Comma, 1),
                ':' => {
                    if self.at(1) == Some(':') {
                        self.push_punct(TokenKind::DoubleColon, 2);
                    } else {
                        self.push_punct(TokenKind::Colon, 1);
                    }
                }
                _ if c.is_ascii_digit() => self.number_or_timestamp(),
                '-' if self.at(1).is_some_and(|n| n.is_ascii_digit()) => self.number(),
                _ if is_identifier_start(c) => self.identifier(),
                _ if is_operator_char(c) => self.push_punct(TokenKind::Operator, 1),
                other => {
                    let (line, column) = (self.line, self.col());
                    self.error(line, column, format!("unexpected character '{}'", other));
                    self.bump();
                }
            }
        }

        let (line, column) = (self.line, self.col());
        self.tokens.push(Token {
            kind: TokenKind::Eof,
            line,
            column,
            text: String::new(),
        });
    }

    // ── Numbers and timestamps ───────────────────────────────────────

    fn number_or_timestamp(&mut self) {
        // Four digits followed by '-' or 'T' can only start a timestamp.
        let four_digits = (0..4).all(|i| self.at(i).is_some_and(|c| c.is_ascii_digit()));
        if four_digits && matches!(self.at(4), Some('-') | Some('T')) {
            self.timestamp();
        } else {
            self.number();
        }
    }

    /// Consume `n` ASCII digits and return their value, or None.
    fn digits(&mut self, n: usize) -> Option<u32> {
        let mut value = 0u32;
        for i in 0..n {
            let c = self.at(i)?;
            let d = c.to_digit(10)?;
            value = value * 10 + d;
        }
        for _ in 0..n {
            self.bump();
        }
        Some(value)
    }

    /// Structural timestamp scan. Emits at most one error per literal and
    /// pushes no token when the shape is invalid, so the semantic
    /// validator only ever sees grammar-shaped literals.
    fn timestamp(&mut self) {
        let start = self.pos;
        let (line, column) = (self.line, self.col());

        let ok = self.timestamp_body();
        if ok && is_stop_char(self.cur()) {
            self.push(TokenKind::Timestamp, start, line, column);
        } else {
            self.error(line, column, "invalid timestamp");
            // Swallow the rest of the literal to avoid cascading errors.
            while self
                .cur()
                .is_some_and(|c| c.is_ascii_alphanumeric() || matches!(c, ':' | '+' | '-' | '.'))
            {
                self.bump();
            }
        }
    }

    fn timestamp_body(&mut self) -> bool {
        // Year is guaranteed by the caller's lookahead.
        if self.digits(4).is_none() {
            return false;
        }
        match self.cur() {
            // Year precision: "2007T"
            Some('T') => {
                self.bump();
                true
            }
            Some('-') => {
                self.bump();
                match self.digits(2) {
                    Some(m) if (1..=12).contains(&m) => {}
                    _ => return false,
                }
                match self.cur() {
                    // Month precision requires the trailing 'T': "2007-02T"
                    Some('T') => {
                        self.bump();
                        true
                    }
                    Some('-') => {
                        self.bump();
                        match self.digits(2) {
                            Some(d) if (1..=31).contains(&d) => {}
                            _ => return false,
                        }
                        if self.cur() == Some('T') {
                            self.bump();
                            if self.cur().is_some_and(|c| c.is_ascii_digit()) {
                                return self.timestamp_time();
                            }
                        }
                        true
                    }
                    _ => false,
                }
            }
            _ => false,
        }
    }

    fn timestamp_time(&mut self) -> bool {
        match self.digits(2) {
            Some(h) if h <= 23 => {}
            _ => return false,
        }
        if self.cur() != Some(':') {
            return false;
        }
        self.bump();
        match self.digits(2) {
            Some(m) if m <= 59 => {}
            _ => return false,
        }
        if self.cur() == Some(':') {
            self.bump();
            match self.digits(2) {
                Some(s) if s <= 59 => {}
                _ => return false,
            }
            if self.cur() == Some('.') {
                self.bump();
                if !self.cur().is_some_and(|c| c.is_ascii_digit()) {
                    return false;
                }
                while self.cur().is_some_and(|c| c.is_ascii_digit()) {
                    self.bump();
                }
            }
        }
        // A time component always carries an offset.
        match self.cur() {
            Some('Z') | Some('z') => {
                self.bump();
                true
            }
            Some('+') | Some('-') => {
                self.bump();
                match self.digits(2) {
                    Some(h) if h <= 23 => {}
                    _ => return false,
                }
                if self.cur() != Some(':') {
                    return false;
                }
                self.bump();
                matches!(self.digits(2), Some(m) if m <= 59)
            }
            _ => false,
        }
    }

    fn number(&mut self) {
        let start = self.pos;
        let (line, column) = (self.line, self.col());

        if self.cur() == Some('-') {
            self.bump();
        }

        // Hex and binary radix forms
        if self.cur() == Some('0') && matches!(self.at(1), Some('x') | Some('X')) {
            self.bump();
            self.bump();
            let mut any = false;
            while self.cur().is_some_and(|c| c.is_ascii_hexdigit()) {
                self.bump();
                any = true;
            }
            if any && is_stop_char(self.cur()) {
                self.push(TokenKind::Int, start, line, column);
            } else {
                self.bad_number(line, column);
            }
            return;
        }
        if self.cur() == Some('0') && matches!(self.at(1), Some('b') | Some('B')) {
            self.bump();
            self.bump();
            let mut any = false;
            while matches!(self.cur(), Some('0') | Some('1')) {
                self.bump();
                any = true;
            }
            if any && is_stop_char(self.cur()) {
                self.push(TokenKind::Int, start, line, column);
            } else {
                self.bad_number(line, column);
            }
            return;
        }

        let int_start = self.pos;
        while self.cur().is_some_and(|c| c.is_ascii_digit()) {
            self.bump();
        }
        let int_len = self.pos - int_start;
        let leading_zero = int_len > 1 && self.chars[int_start] == '0';

        let mut has_dot = false;
        if self.cur() == Some('.') && !self.at(1).is_some_and(is_identifier_start) {
            has_dot = true;
            self.bump();
            while self.cur().is_some_and(|c| c.is_ascii_digit()) {
                self.bump();
            }
        }

        let kind = match self.cur() {
            Some('e') | Some('E') => {
                if !self.exponent() {
                    self.bad_number(line, column);
                    return;
                }
                TokenKind::Float
            }
            Some('d') | Some('D') => {
                if !self.exponent() {
                    self.bad_number(line, column);
                    return;
                }
                TokenKind::Decimal
            }
            _ if has_dot => TokenKind::Decimal,
            _ => TokenKind::Int,
        };

        if !is_stop_char(self.cur()) {
            self.bad_number(line, column);
            return;
        }
        if leading_zero {
            self.error(line, column, "invalid leading zeros in number");
        }
        self.push(kind, start, line, column);
    }

    /// Consume an exponent marker plus its signed digits.
    fn exponent(&mut self) -> bool {
        self.bump();
        if matches!(self.cur(), Some('+') | Some('-')) {
            self.bump();
        }
        let mut any = false;
        while self.cur().is_some_and(|c| c.is_ascii_digit()) {
            self.bump();
            any = true;
        }
        any
    }

    fn bad_number(&mut self, line: u32, column: u32) {
        self.error(line, column, "invalid numeric literal");
        while self
            .cur()
            .is_some_and(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '+' | '-'))
        {
            self.bump();
        }
    }

    // ── Identifiers and keywords ─────────────────────────────────────

    fn identifier(&mut self) {
        let start = self.pos;
        let (line, column) = (self.line, self.col());
        while self.cur().is_some_and(is_identifier_part) {
            self.bump();
        }
        let word: String = self.chars[start..self.pos].iter().collect();

        match word.as_str() {
            "null" => {
                if self.cur() == Some('.') {
                    self.bump();
                    let suffix_start = self.pos;
                    while self.cur().is_some_and(|c| c.is_ascii_alphabetic()) {
                        self.bump();
                    }
                    let suffix: String = self.chars[suffix_start..self.pos].iter().collect();
                    if !NULL_TYPES.contains(&suffix.as_str()) {
                        self.error(line, column, format!("invalid null type 'null.{}'", suffix));
                        return;
                    }
                }
                self.push(TokenKind::Null, start, line, column);
            }
            "true" | "false" => self.push(TokenKind::Bool, start, line, column),
            "nan" => self.push(TokenKind::Float, start, line, column),
            _ => self.push(TokenKind::Symbol, start, line, column),
        }
    }

    // ── Quoted forms ─────────────────────────────────────────────────

    fn short_string(&mut self) {
        let start = self.pos;
        let (line, column) = (self.line, self.col());
        self.bump();
        loop {
            match self.cur() {
                None | Some('\n') => {
                    self.error(line, column, "unterminated string");
                    return;
                }
                Some('"') => {
                    self.bump();
                    break;
                }
                Some('\\') => self.escape(),
                Some(_) => self.bump(),
            }
        }
        self.push(TokenKind::String, start, line, column);
    }

    fn long_string(&mut self) {
        let start = self.pos;
        let (line, column) = (self.line, self.col());
        self.bump();
        self.bump();
        self.bump();
        loop {
            match self.cur() {
                None => {
                    self.error(line, column, "unterminated long string");
                    return;
                }
                Some('\'') if self.at(1) == Some('\'') && self.at(2) == Some('\'') => {
                    self.bump();
                    self.bump();
                    self.bump();
                    break;
                }
                Some('\\') => self.escape(),
                Some(_) => self.bump(),
            }
        }
        self.push(TokenKind::LongString, start, line, column);
    }

    fn quoted_symbol(&mut self) {
        let start = self.pos;
        let (line, column) = (self.line, self.col());
        self.bump();
        loop {
            match self.cur() {
                None | Some('\n') => {
                    self.error(line, column, "unterminated quoted symbol");
                    return;
                }
                Some('\'') => {
                    self.bump();
                    break;
                }
                Some('\\') => self.escape(),
                Some(_) => self.bump(),
            }
        }
        self.push(TokenKind::QuotedSymbol, start, line, column);
    }

    /// Consume a backslash escape, reporting invalid forms without
    /// abandoning the surrounding quoted token.
    fn escape(&mut self) {
        let (line, column) = (self.line, self.col());
        self.bump();
        match self.cur() {
            Some('"') | Some('\\') | Some('/') | Some('\'') | Some('?') | Some('0')
            | Some('a') | Some('b') | Some('t') | Some('n') | Some('f') | Some('r')
            | Some('v') => self.bump(),
            // Escaped newline: line continuation
            Some('\n') => self.bump(),
            Some('\r') => {
                self.bump();
                if self.cur() == Some('\n') {
                    self.bump();
                }
            }
            Some('x') => self.hex_escape(line, column, 2),
            Some('u') => self.hex_escape(line, column, 4),
            Some('U') => self.hex_escape(line, column, 8),
            Some(other) => {
                self.error(line, column, format!("invalid escape sequence '\\{}'", other));
                self.bump();
            }
            None => self.error(line, column, "invalid escape sequence at end of input"),
        }
    }

    fn hex_escape(&mut self, line: u32, column: u32, width: usize) {
        self.bump();
        for _ in 0..width {
            if self.cur().is_some_and(|c| c.is_ascii_hexdigit()) {
                self.bump();
            } else {
                self.error(line, column, "invalid hex digits in escape sequence");
                return;
            }
        }
    }

    // ── Blobs and clobs ──────────────────────────────────────────────

    fn lob(&mut self) {
        let start = self.pos;
        let (line, column) = (self.line, self.col());
        self.bump();
        self.bump();
        while self.cur().is_some_and(|c| c.is_whitespace()) {
            self.bump();
        }

        let is_clob = self.cur() == Some('"')
            || (self.cur() == Some('\'') && self.at(1) == Some('\'') && self.at(2) == Some('\''));
        if is_clob {
            let before = self.tokens.len();
            if self.cur() == Some('"') {
                self.short_string();
            } else {
                self.long_string();
            }
            // The string scanner pushed its own token; replace it with the
            // whole clob once the closing braces are seen.
            self.tokens.truncate(before);
        } else {
            loop {
                match self.cur() {
                    None => {
                        self.error(line, column, "unterminated blob");
                        return;
                    }
                    Some('}') if self.at(1) == Some('}') => break,
                    Some(c)
                        if c.is_ascii_alphanumeric()
                            || matches!(c, '+' | '/' | '=')
                            || c.is_whitespace() =>
                    {
                        self.bump()
                    }
                    Some(other) => {
                        self.error(
                            self.line,
                            self.col(),
                            format!("invalid base64 character '{}'", other),
                        );
                        self.bump();
                    }
                }
            }
        }

        while self.cur().is_some_and(|c| c.is_whitespace()) {
            self.bump();
        }
        if self.cur() == Some('}') && self.at(1) == Some('}') {
            self.bump();
            self.bump();
            let kind = if is_clob {
                TokenKind::Clob
            } else {
                TokenKind::Blob
            };
            self.push(kind, start, line, column);
        } else {
            self.error(line, column, "unterminated blob");
        }
    }
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────
