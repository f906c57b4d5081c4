//! Emission helpers used by the lexer and parser
//!
//! The reporter turns detection-site context into [`Diagnostic`] values,
//! hands them to a sink immediately and keeps error and warning counts for
//! the final parse status.

use smol_str::SmolStr;

use super::codes::Code;
use super::diagnostic::{Diagnostic, DiagnosticBuilder};
use super::sink::DiagnosticSink;
use crate::base::{LineRange, Position};
use crate::parser::source::{MAX_COLUMNS, SourceLines};
use crate::parser::{Token, TokenSet};

pub struct Reporter<'a> {
    sink: &'a mut dyn DiagnosticSink,
    lines: Option<SourceLines>,
    error_count: usize,
    warning_count: usize,
}

impl<'a> Reporter<'a> {
    pub fn new(sink: &'a mut dyn DiagnosticSink) -> Self {
        Self {
            sink,
            lines: None,
            error_count: 0,
            warning_count: 0,
        }
    }

    /// Echo the offending source line with every positioned diagnostic
    pub fn with_source_lines(mut self, lines: SourceLines) -> Self {
        self.lines = Some(lines);
        self
    }

    pub fn error_count(&self) -> usize {
        self.error_count
    }

    pub fn warning_count(&self) -> usize {
        self.warning_count
    }

    /// Deliver a diagnostic to the sink
    pub fn report(&mut self, diagnostic: Diagnostic) {
        if diagnostic.is_error() {
            self.error_count += 1;
        } else {
            self.warning_count += 1;
        }
        self.sink.emit(diagnostic);
    }

    fn positioned(&self, code: Code, line: u32, column: u32) -> DiagnosticBuilder {
        let builder = Diagnostic::builder(code).position(Position::new(line, column));
        match self.lines.as_ref().and_then(|lines| lines.line(line)) {
            Some(text) => {
                let echo: SmolStr = text.chars().take(MAX_COLUMNS).collect();
                builder.source_line(echo)
            }
            None => builder,
        }
    }

    pub fn emit_error(&mut self, code: Code) {
        self.report(Diagnostic::new(code));
    }

    pub fn emit_error_w_offending_str(&mut self, code: Code, offending: &str) {
        self.report(Diagnostic::builder(code).offending_lexeme(offending).build());
    }

    pub fn emit_error_w_pos(&mut self, code: Code, line: u32, column: u32) {
        let diagnostic = self.positioned(code, line, column).build();
        self.report(diagnostic);
    }

    pub fn emit_error_w_chr(&mut self, code: Code, line: u32, column: u32, offending: char) {
        let diagnostic = self
            .positioned(code, line, column)
            .offending_char(offending)
            .build();
        self.report(diagnostic);
    }

    pub fn emit_error_w_lex(&mut self, code: Code, line: u32, column: u32, offending: &str) {
        let diagnostic = self
            .positioned(code, line, column)
            .offending_lexeme(offending)
            .build();
        self.report(diagnostic);
    }

    pub fn emit_syntax_error_w_token(
        &mut self,
        line: u32,
        column: u32,
        unexpected: Token,
        offending: &str,
        expected: Token,
    ) {
        let diagnostic = self
            .positioned(Code::E0201, line, column)
            .offending_token(unexpected)
            .offending_lexeme(offending)
            .expected_token(expected)
            .build();
        self.report(diagnostic);
    }

    pub fn emit_syntax_error_w_set(
        &mut self,
        line: u32,
        column: u32,
        unexpected: Token,
        offending: &str,
        expected: TokenSet,
    ) {
        let diagnostic = self
            .positioned(Code::E0201, line, column)
            .offending_token(unexpected)
            .offending_lexeme(offending)
            .expected_set(expected)
            .build();
        self.report(diagnostic);
    }

    pub fn emit_warning_w_pos(&mut self, code: Code, line: u32, column: u32) {
        let diagnostic = self.positioned(code, line, column).build();
        self.report(diagnostic);
    }

    pub fn emit_warning_w_range(&mut self, code: Code, first_line: u32, last_line: u32) {
        let diagnostic = Diagnostic::builder(code)
            .lines(LineRange::new(first_line, last_line))
            .build();
        self.report(diagnostic);
    }
}
