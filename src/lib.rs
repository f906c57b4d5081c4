//! # m2front
//!
//! Front end for a multi-dialect Modula-2 compiler: scanner, predictive
//! parser and schema-checked syntax tree, with structured diagnostics.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! parser      → Infile, Lexer, Production tables, recursive-descent Parser
//!   ↓
//! ast         → AstNode, AstNodeType, tree-shape schema
//!   ↓
//! diagnostics → Code, Diagnostic, Reporter, sinks
//!   ↓
//! options     → Dialect, capabilities, argument resolution
//!   ↓
//! base        → Position, LineRange, TextRange/TextSize
//! ```

// ============================================================================
// MODULES (dependency order: base → options → diagnostics → ast → parser)
// ============================================================================

/// Foundation types: positions and text ranges
pub mod base;

/// Dialects, capability toggles and command line style option resolution
pub mod options;

/// Diagnostic codes, rendering and sinks
pub mod diagnostics;

/// Syntax tree nodes and the shape schema they are checked against
pub mod ast;

/// Character source, lexer, grammar tables and parser entry points
pub mod parser;

// Re-export commonly needed items
pub use ast::{AstNode, AstNodeType};
pub use base::{LineRange, Position, TextRange, TextSize};
pub use diagnostics::{Code, Diagnostic, DiagnosticSink};
pub use options::{Dialect, Options};
pub use parser::{
    Parse, ParseFailure, check_syntax, parse_definition, parse_definition_source, parse_files,
    Token, parse_implementation, parse_implementation_source,
};
