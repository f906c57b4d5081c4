//! Diagnostic values and their rendering
//!
//! A [`Diagnostic`] carries a code plus whatever context was available at
//! the point of detection:
//! - source position or line range
//! - offending character, lexeme or token
//! - the expected token or set of tokens
//! - the offending source line (verbose mode)

use smol_str::SmolStr;
use std::fmt;

use super::codes::{Code, Severity};
use crate::base::{LineRange, Position};
use crate::parser::{Token, TokenSet};

/// What the parser expected instead of the offending token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expected {
    Token(Token),
    Set(TokenSet),
}

/// A reported warning or error
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub code: Code,
    pub position: Option<Position>,
    pub lines: Option<LineRange>,
    pub offending_char: Option<char>,
    pub offending_lexeme: Option<SmolStr>,
    pub offending_token: Option<Token>,
    pub expected: Option<Expected>,
    pub source_line: Option<SmolStr>,
}

impl Diagnostic {
    /// Create a diagnostic carrying only a code
    pub fn new(code: Code) -> Self {
        Self {
            code,
            position: None,
            lines: None,
            offending_char: None,
            offending_lexeme: None,
            offending_token: None,
            expected: None,
            source_line: None,
        }
    }

    /// Create a builder for a diagnostic with context
    pub fn builder(code: Code) -> DiagnosticBuilder {
        DiagnosticBuilder::new(code)
    }

    pub fn severity(&self) -> Severity {
        self.code.severity()
    }

    pub fn is_error(&self) -> bool {
        self.code.is_error()
    }

    /// The expected tokens, in declaration order
    pub fn expected_tokens(&self) -> Vec<Token> {
        match self.expected {
            Some(Expected::Token(token)) => vec![token],
            Some(Expected::Set(set)) => set.iter().collect(),
            None => Vec::new(),
        }
    }

    fn render_message(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(token) = self.offending_token {
            write!(f, "unexpected {}", token.category())?;
            if token.name() != token.category() {
                write!(f, " {}", token.name())?;
            }
            if let Some(lexeme) = &self.offending_lexeme {
                write!(f, " \"{}\"", lexeme)?;
            }
            return write!(f, " found");
        }

        f.write_str(self.code.message().unwrap_or("unknown diagnostic"))?;
        if let Some(ch) = self.offending_char {
            write!(f, " '{}'", ch.escape_default())?;
        }
        if let Some(lexeme) = &self.offending_lexeme {
            write!(f, " \"{}\"", lexeme)?;
        }
        Ok(())
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.severity(), self.code)?;
        if let Some(position) = self.position {
            write!(f, " at {}", position)?;
        } else if let Some(lines) = self.lines {
            write!(f, " at {}", lines)?;
        }
        f.write_str(": ")?;
        self.render_message(f)?;

        match self.expected {
            Some(Expected::Token(token)) => write!(f, "\n  expected {}", token.name())?,
            Some(Expected::Set(set)) => {
                f.write_str("\n  expected ")?;
                let names: Vec<&str> = set.iter().map(Token::name).collect();
                match names.split_last() {
                    Some((last, [])) => f.write_str(last)?,
                    Some((last, rest)) => write!(f, "{} or {}", rest.join(", "), last)?,
                    None => f.write_str("nothing")?,
                }
            }
            None => {}
        }

        if let Some(line) = &self.source_line {
            write!(f, "\n  | {}", line)?;
        }
        Ok(())
    }
}

/// Builder for diagnostics with context
pub struct DiagnosticBuilder {
    diagnostic: Diagnostic,
}

impl DiagnosticBuilder {
    pub fn new(code: Code) -> Self {
        Self {
            diagnostic: Diagnostic::new(code),
        }
    }

    pub fn position(mut self, position: Position) -> Self {
        self.diagnostic.position = Some(position);
        self
    }

    pub fn at(self, line: u32, column: u32) -> Self {
        self.position(Position::new(line, column))
    }

    pub fn lines(mut self, lines: LineRange) -> Self {
        self.diagnostic.lines = Some(lines);
        self
    }

    pub fn offending_char(mut self, ch: char) -> Self {
        self.diagnostic.offending_char = Some(ch);
        self
    }

    pub fn offending_lexeme(mut self, lexeme: impl Into<SmolStr>) -> Self {
        self.diagnostic.offending_lexeme = Some(lexeme.into());
        self
    }

    pub fn offending_token(mut self, token: Token) -> Self {
        self.diagnostic.offending_token = Some(token);
        self
    }

    pub fn expected_token(mut self, token: Token) -> Self {
        self.diagnostic.expected = Some(Expected::Token(token));
        self
    }

    /// Expect a set of tokens; a singleton set renders as a single token
    pub fn expected_set(mut self, set: TokenSet) -> Self {
        let mut members = set.iter();
        self.diagnostic.expected = match (members.next(), members.next()) {
            (Some(only), None) => Some(Expected::Token(only)),
            _ => Some(Expected::Set(set)),
        };
        self
    }

    pub fn source_line(mut self, line: impl Into<SmolStr>) -> Self {
        self.diagnostic.source_line = Some(line.into());
        self
    }

    pub fn build(self) -> Diagnostic {
        self.diagnostic
    }
}
