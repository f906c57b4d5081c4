//! Destinations for emitted diagnostics

use std::io::{self, Write};

use super::diagnostic::Diagnostic;

/// Receives diagnostics as they are emitted, in source order
pub trait DiagnosticSink {
    fn emit(&mut self, diagnostic: Diagnostic);
}

/// Writes rendered diagnostics to standard error, prefixed with the filename
#[derive(Debug, Default)]
pub struct ConsoleSink {
    filename: Option<String>,
}

impl ConsoleSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn for_file(filename: impl Into<String>) -> Self {
        Self {
            filename: Some(filename.into()),
        }
    }
}

impl DiagnosticSink for ConsoleSink {
    fn emit(&mut self, diagnostic: Diagnostic) {
        let mut stderr = io::stderr().lock();
        let result = match &self.filename {
            Some(filename) => writeln!(stderr, "{}: {}", filename, diagnostic),
            None => writeln!(stderr, "{}", diagnostic),
        };
        if let Err(err) = result {
            tracing::warn!("failed to write diagnostic: {}", err);
        }
    }
}

/// Stores diagnostics for later inspection
#[derive(Debug, Default, Clone)]
pub struct CollectingSink {
    diagnostics: Vec<Diagnostic>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(|d| d.is_error())
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(|d| !d.is_error())
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

impl DiagnosticSink for CollectingSink {
    fn emit(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }
}

impl<S: DiagnosticSink + ?Sized> DiagnosticSink for &mut S {
    fn emit(&mut self, diagnostic: Diagnostic) {
        (**self).emit(diagnostic);
    }
}
