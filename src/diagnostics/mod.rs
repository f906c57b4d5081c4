//! Diagnostics for the m2front toolchain
//!
//! This module provides:
//! - [`Code`] - categorised warning and error codes (option, lexical,
//!   syntax, semantic)
//! - [`Diagnostic`] - a code plus its detection context, with rendering
//! - [`DiagnosticSink`] - where emitted diagnostics go
//! - [`Reporter`] - the emission helpers used by the lexer and parser

mod codes;
mod diagnostic;
mod reporter;
mod sink;

pub use codes::{Code, Severity, diag_msg_text};
pub use diagnostic::{Diagnostic, DiagnosticBuilder, Expected};
pub use reporter::Reporter;
pub use sink::{CollectingSink, ConsoleSink, DiagnosticSink};
