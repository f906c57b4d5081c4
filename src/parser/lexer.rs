//! Lexical scanner for Modula-2
//!
//! The lexer reads characters from an [`Infile`] and produces one token at a
//! time with one token of lookahead. Lexeme text is captured through the
//! source's mark/read protocol, so tokens themselves carry no payload.
//!
//! No lexical error aborts scanning: a malformed literal becomes a
//! `MALFORMED_*` token, an illegal character becomes `UNKNOWN`, and in both
//! cases a diagnostic is reported and scanning continues.

use smol_str::SmolStr;
use tracing::trace;

use super::source::{EOT, Infile, SourceError};
use super::token::{Token, token_for_lexeme};
use crate::base::TextSize;
use crate::diagnostics::{Code, Reporter};
use crate::options::{Dialect, Options};

/// Identifiers longer than this are reported, but keep their full text
pub const MAX_IDENT_LENGTH: usize = 32;

/// Block comments nested deeper than this are reported once per comment
pub const COMMENT_NESTING_LIMIT: usize = 100;

/// Outcome of the most recent scan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LexerStatus {
    #[default]
    Success,
    /// The last symbol scanned raised at least one lexical error
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Symbol {
    token: Token,
    lexeme: SmolStr,
    line: u32,
    column: u32,
}

impl Symbol {
    fn start() -> Self {
        Self {
            token: Token::UNKNOWN,
            lexeme: SmolStr::default(),
            line: 1,
            column: 1,
        }
    }
}

/// Scanner switches taken from the option snapshot
#[derive(Debug, Clone, Copy)]
struct ScanOptions {
    escapes: bool,
    synonyms: bool,
    octal_literals: bool,
    lowline_identifiers: bool,
    debug: bool,
}

impl ScanOptions {
    fn new(options: &Options) -> Self {
        Self {
            escapes: options.dialect == Dialect::Ext,
            synonyms: options.capabilities.synonyms,
            octal_literals: options.capabilities.octal_literals,
            lowline_identifiers: options.capabilities.lowline_identifiers,
            debug: options.diagnostics.lexer_debug,
        }
    }
}

pub struct Lexer<'a> {
    infile: Infile,
    options: ScanOptions,
    reporter: Reporter<'a>,
    current: Symbol,
    lookahead: Symbol,
    second: Option<Symbol>,
    status: LexerStatus,
}

impl<'a> Lexer<'a> {
    /// Create a lexer over `infile` and scan the first lookahead symbol
    pub fn new(infile: Infile, options: &Options, reporter: Reporter<'a>) -> Self {
        let mut lexer = Self {
            infile,
            options: ScanOptions::new(options),
            reporter,
            current: Symbol::start(),
            lookahead: Symbol::start(),
            second: None,
            status: LexerStatus::Success,
        };
        lexer.lookahead = lexer.scan_symbol();
        lexer
    }

    /// Open `path` and create a lexer over it
    pub fn open(
        path: impl AsRef<std::path::Path>,
        options: &Options,
        reporter: Reporter<'a>,
    ) -> Result<Self, SourceError> {
        let infile = Infile::open(path)?;
        Ok(Self::new(infile, options, reporter))
    }

    /// Consume the lookahead symbol and return the new lookahead token
    pub fn read_symbol(&mut self) -> Token {
        let next = match self.second.take() {
            Some(symbol) => symbol,
            None => self.scan_symbol(),
        };
        self.current = std::mem::replace(&mut self.lookahead, next);
        self.lookahead.token
    }

    /// The lookahead token, without consuming it
    pub fn peek_symbol(&self) -> Token {
        self.lookahead.token
    }

    /// The token after the lookahead token, without consuming anything.
    ///
    /// Diagnostics for the second symbol are reported when it is scanned,
    /// which may be before the lookahead symbol is consumed.
    pub fn peek_second_symbol(&mut self) -> Token {
        if let Some(symbol) = &self.second {
            return symbol.token;
        }
        let symbol = self.scan_symbol();
        let token = symbol.token;
        self.second = Some(symbol);
        token
    }

    /// The most recently consumed token
    pub fn current_token(&self) -> Token {
        self.current.token
    }

    pub fn current_lexeme(&self) -> &str {
        &self.current.lexeme
    }

    pub fn lookahead_lexeme(&self) -> &str {
        &self.lookahead.lexeme
    }

    pub fn current_line(&self) -> u32 {
        self.current.line
    }

    pub fn current_column(&self) -> u32 {
        self.current.column
    }

    pub fn lookahead_line(&self) -> u32 {
        self.lookahead.line
    }

    pub fn lookahead_column(&self) -> u32 {
        self.lookahead.column
    }

    pub fn status(&self) -> LexerStatus {
        self.status
    }

    pub fn filename(&self) -> &str {
        self.infile.filename()
    }

    /// The reporter shared by lexer and parser
    pub fn reporter(&mut self) -> &mut Reporter<'a> {
        &mut self.reporter
    }

    pub fn error_count(&self) -> usize {
        self.reporter.error_count()
    }

    pub fn warning_count(&self) -> usize {
        self.reporter.warning_count()
    }

    // =========================================================================
    // SCANNING
    // =========================================================================

    fn scan_symbol(&mut self) -> Symbol {
        let errors_before = self.reporter.error_count();
        let symbol = self.scan();
        self.status = if self.reporter.error_count() > errors_before {
            LexerStatus::Error
        } else {
            LexerStatus::Success
        };
        if self.options.debug {
            trace!(
                "[LEXER] {}:{} {:?} {:?}",
                symbol.line,
                symbol.column,
                symbol.token,
                symbol.lexeme.as_str()
            );
        }
        symbol
    }

    fn scan(&mut self) -> Symbol {
        loop {
            self.skip_whitespace();

            let line = self.infile.line();
            let column = self.infile.column();
            let ch = self.infile.next_char();
            let la2 = self.infile.la2_char();

            if ch == EOT && self.infile.is_eof() {
                return Symbol {
                    token: Token::EOF,
                    lexeme: SmolStr::default(),
                    line,
                    column,
                };
            }

            // trivia
            if ch == '(' && la2 == '*' {
                self.skip_block_comment();
                continue;
            }
            if ch == '?' && la2 == '<' && column == 1 {
                self.skip_disabled_section();
                continue;
            }

            self.infile.mark_lexeme();
            let token = match ch {
                'a'..='z' | 'A'..='Z' => self.scan_identifier(line, column),
                '0'..='9' => self.scan_number(line, column),
                '\'' | '"' => self.scan_string(line, column),
                '<' if la2 == '*' => self.scan_pragma(line, column),
                _ => self.scan_special_symbol(line, column),
            };
            let lexeme = self.infile.read_marked_lexeme().unwrap_or_default();
            return Symbol {
                token,
                lexeme,
                line,
                column,
            };
        }
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.infile.next_char(), ' ' | '\t' | '\n') {
            self.infile.read_char();
        }
    }

    fn is_ident_char(&self, ch: char) -> bool {
        ch.is_ascii_alphanumeric() || (ch == '_' && self.options.lowline_identifiers)
    }

    fn scan_identifier(&mut self, line: u32, column: u32) -> Token {
        let start = self.infile.offset();
        while self.is_ident_char(self.infile.next_char()) {
            self.infile.read_char();
        }

        let lexeme = self.infile.text_since(start);
        if let Some(resword) = token_for_lexeme(lexeme, lexeme.len()) {
            return resword;
        }
        if lexeme.len() > MAX_IDENT_LENGTH {
            self.reporter
                .emit_error_w_lex(Code::E0110, line, column, self.infile.text_since(start));
        }
        Token::IDENT
    }

    fn scan_number(&mut self, line: u32, column: u32) -> Token {
        let start = self.infile.offset();
        let mut decimal = true;
        loop {
            match self.infile.next_char() {
                '0'..='9' => {}
                'A'..='F' => decimal = false,
                _ => break,
            }
            self.infile.read_char();
        }

        if self.infile.next_char() == 'H' {
            self.infile.read_char();
            return Token::INTEGER;
        }

        if decimal {
            if self.infile.next_char() == '.' && self.infile.la2_char() != '.' {
                return self.scan_real_tail(line, column, start);
            }
            return Token::INTEGER;
        }

        // octal and character code literals end in a hex digit
        if self.options.octal_literals {
            let digits = self.infile.text_since(start);
            let (body, suffix) = digits.split_at(digits.len() - 1);
            if !body.is_empty() && body.bytes().all(|b| (b'0'..=b'7').contains(&b)) {
                match suffix {
                    "B" => return Token::INTEGER,
                    "C" => return Token::CHAR,
                    _ => {}
                }
            }
        }

        self.reporter
            .emit_error_w_lex(Code::E0108, line, column, self.infile.text_since(start));
        Token::MALFORMED_INTEGER
    }

    /// Scan `.digits (E [+-] digits)?` after the integral part of a real
    fn scan_real_tail(&mut self, line: u32, column: u32, start: TextSize) -> Token {
        self.infile.read_char();
        while self.infile.next_char().is_ascii_digit() {
            self.infile.read_char();
        }
        if self.infile.next_char() != 'E' {
            return Token::REAL;
        }
        self.infile.read_char();
        if matches!(self.infile.next_char(), '+' | '-') {
            self.infile.read_char();
        }
        if !self.infile.next_char().is_ascii_digit() {
            self.reporter
                .emit_error_w_lex(Code::E0109, line, column, self.infile.text_since(start));
            return Token::MALFORMED_REAL;
        }
        while self.infile.next_char().is_ascii_digit() {
            self.infile.read_char();
        }
        Token::REAL
    }

    fn scan_string(&mut self, line: u32, column: u32) -> Token {
        let delimiter = self.infile.read_char();
        let mut malformed = false;
        loop {
            let ch = self.infile.next_char();
            if ch == delimiter {
                self.infile.read_char();
                break;
            }
            if ch == '\n' {
                self.reporter.emit_error_w_pos(Code::E0104, line, column);
                return Token::MALFORMED_STRING;
            }
            if ch == EOT && self.infile.is_eof() {
                self.reporter.emit_error_w_pos(Code::E0105, line, column);
                return Token::MALFORMED_STRING;
            }
            if ch == '\\' && self.options.escapes {
                let escape_line = self.infile.line();
                let escape_column = self.infile.column();
                self.infile.read_char();
                let escaped = self.infile.next_char();
                if escaped == '\n' || (escaped == EOT && self.infile.is_eof()) {
                    // the unterminated string is reported on the next pass
                    continue;
                }
                if matches!(escaped, 'n' | 't' | '\\' | '\'' | '"' | '0') {
                    self.infile.read_char();
                } else {
                    self.reporter.emit_error_w_chr(
                        Code::E0106,
                        escape_line,
                        escape_column,
                        escaped,
                    );
                    malformed = true;
                }
                continue;
            }
            self.infile.read_char();
        }
        if malformed {
            Token::MALFORMED_STRING
        } else {
            Token::STRING
        }
    }

    fn scan_pragma(&mut self, line: u32, column: u32) -> Token {
        self.infile.read_char();
        self.infile.read_char();
        loop {
            let ch = self.infile.next_char();
            if ch == '*' && self.infile.la2_char() == '>' {
                self.infile.read_char();
                self.infile.read_char();
                return Token::PRAGMA;
            }
            if ch == EOT && self.infile.is_eof() {
                self.reporter.emit_error_w_pos(Code::E0107, line, column);
                return Token::PRAGMA;
            }
            self.infile.read_char();
        }
    }

    fn scan_special_symbol(&mut self, line: u32, column: u32) -> Token {
        let ch = self.infile.read_char();
        let next = self.infile.next_char();
        match ch {
            '+' => Token::PLUS,
            '-' => Token::MINUS,
            '=' => Token::EQ,
            '#' => Token::NOT_EQ,
            '*' => Token::STAR,
            '/' => Token::SLASH,
            ',' => Token::COMMA,
            ';' => Token::SEMICOLON,
            '^' => Token::CARET,
            '|' => Token::PIPE,
            '(' => Token::L_PAREN,
            ')' => Token::R_PAREN,
            '[' => Token::L_BRACKET,
            ']' => Token::R_BRACKET,
            '{' => Token::L_BRACE,
            '}' => Token::R_BRACE,
            ':' if next == '=' => self.take(Token::COLON_EQ),
            ':' => Token::COLON,
            '.' if next == '.' => self.take(Token::DOT_DOT),
            '.' => Token::DOT,
            '<' if next == '=' => self.take(Token::LT_EQ),
            '<' if next == '>' && self.options.synonyms => self.take(Token::NOT_EQ),
            '<' => Token::LT,
            '>' if next == '=' => self.take(Token::GT_EQ),
            '>' => Token::GT,
            '&' if self.options.synonyms => Token::AND_KW,
            '~' if self.options.synonyms => Token::NOT_KW,
            _ => {
                self.reporter.emit_error_w_chr(Code::E0102, line, column, ch);
                Token::UNKNOWN
            }
        }
    }

    /// Consume the second character of a two-character symbol
    fn take(&mut self, token: Token) -> Token {
        self.infile.read_char();
        token
    }

    fn skip_block_comment(&mut self) {
        let line = self.infile.line();
        let column = self.infile.column();
        self.infile.read_char();
        self.infile.read_char();

        let mut depth = 1usize;
        let mut limit_reported = false;
        while depth > 0 {
            let ch = self.infile.next_char();
            let la2 = self.infile.la2_char();
            if ch == EOT && self.infile.is_eof() {
                self.reporter.emit_error_w_pos(Code::E0103, line, column);
                return;
            }
            if ch == '(' && la2 == '*' {
                let nested_line = self.infile.line();
                let nested_column = self.infile.column();
                self.infile.read_char();
                self.infile.read_char();
                depth += 1;
                if depth > COMMENT_NESTING_LIMIT && !limit_reported {
                    self.reporter
                        .emit_error_w_pos(Code::E0111, nested_line, nested_column);
                    limit_reported = true;
                }
            } else if ch == '*' && la2 == ')' {
                self.infile.read_char();
                self.infile.read_char();
                depth -= 1;
            } else {
                self.infile.read_char();
            }
        }
    }

    /// Skip from a `?<` line up to and including the next `>?` line
    fn skip_disabled_section(&mut self) {
        let first_line = self.infile.line();
        let mut last_line = first_line;
        self.skip_rest_of_line();
        loop {
            if self.infile.is_eof() {
                break;
            }
            last_line = self.infile.line();
            let closes = self.infile.next_char() == '>' && self.infile.la2_char() == '?';
            self.skip_rest_of_line();
            if closes {
                break;
            }
        }
        self.reporter
            .emit_warning_w_range(Code::W0101, first_line, last_line);
    }

    fn skip_rest_of_line(&mut self) {
        loop {
            let ch = self.infile.read_char();
            if ch == '\n' || (ch == EOT && self.infile.is_eof()) {
                return;
            }
        }
    }
}
