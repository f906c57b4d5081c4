//! Scanner and predictive parser for Modula-2
//!
//! ## Architecture
//!
//! ```text
//! Source file
//!     ↓
//! Infile       → characters with lookahead, lexeme marks, positions
//!     ↓
//! Lexer        → tokens with one and two symbol lookahead
//!     ↓
//! Parser       → FIRST/FOLLOW driven descent over `Production` tables
//!     ↓
//! AstNode      → schema-checked syntax tree
//! ```
//!
//! Lexical and syntax problems are reported through a
//! [`Reporter`](crate::diagnostics::Reporter) and never abort a parse. The
//! entry points turn the outcome into a root node or a [`ParseFailure`].

#[allow(clippy::module_inception)]
mod parser;

mod batch;
mod lexer;
mod productions;
pub mod source;
mod token;
mod token_set;

pub use batch::{FileOutcome, parse_files};
pub use lexer::{COMMENT_NESTING_LIMIT, Lexer, LexerStatus, MAX_IDENT_LENGTH};
pub use productions::{Production, ProductionContext};
pub use source::{EOT, Infile, SourceError};
pub use token::{Token, token_for_lexeme};
pub use token_set::TokenSet;

use std::path::Path;

use smol_str::SmolStr;
use thiserror::Error;
use tracing::debug;

use crate::ast::{AstNode, AstNodeType};
use crate::diagnostics::{DiagnosticSink, Reporter};
use crate::options::Options;
use parser::Parser;

/// Outcome of parsing one compilation unit
#[derive(Debug, Clone)]
pub struct Parse {
    /// `ROOT` node, or the empty node if the module header was unusable
    pub root: AstNode,
    pub error_count: usize,
    pub warning_count: usize,
}

impl Parse {
    /// Whether the unit parsed without errors
    pub fn ok(&self) -> bool {
        self.error_count == 0 && !self.root.is_empty()
    }

    /// The module node below `ROOT`
    pub fn module(&self) -> Option<&AstNode> {
        self.root.subnode(2)
    }

    fn into_result(self) -> Result<AstNode, ParseFailure> {
        if self.ok() {
            Ok(self.root)
        } else {
            Err(ParseFailure::Syntax {
                errors: self.error_count.max(1),
            })
        }
    }
}

/// Why an entry point produced no tree
#[derive(Debug, Error)]
pub enum ParseFailure {
    #[error(transparent)]
    Source(#[from] SourceError),

    /// Diagnostics describing the problems have already been emitted
    #[error("{errors} error(s) in compilation unit")]
    Syntax { errors: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Unit {
    Definition,
    Implementation,
}

// ============================================================================
// ENTRY POINTS
// ============================================================================

/// Parse the definition module at `path`
pub fn parse_definition(
    path: impl AsRef<Path>,
    options: &Options,
    sink: &mut dyn DiagnosticSink,
) -> Result<AstNode, ParseFailure> {
    let infile = Infile::open(path)?;
    run(infile, options, sink, Unit::Definition).into_result()
}

/// Parse the implementation or program module at `path`
pub fn parse_implementation(
    path: impl AsRef<Path>,
    options: &Options,
    sink: &mut dyn DiagnosticSink,
) -> Result<AstNode, ParseFailure> {
    let infile = Infile::open(path)?;
    run(infile, options, sink, Unit::Implementation).into_result()
}

/// Check the syntax of the compilation unit at `path` without keeping a tree
///
/// Files named `*.def` are checked as definition modules, anything else as
/// an implementation or program module.
pub fn check_syntax(
    path: impl AsRef<Path>,
    options: &Options,
    sink: &mut dyn DiagnosticSink,
) -> Result<(), ParseFailure> {
    let path = path.as_ref();
    let unit = unit_for_path(path);
    let infile = Infile::open(path)?;
    run(infile, options, sink, unit).into_result().map(|_| ())
}

/// Parse definition module text, keeping the tree even when errors occurred
pub fn parse_definition_source(
    filename: &str,
    text: &str,
    options: &Options,
    sink: &mut dyn DiagnosticSink,
) -> Result<Parse, SourceError> {
    let infile = Infile::from_source(filename, text)?;
    Ok(run(infile, options, sink, Unit::Definition))
}

/// Parse implementation or program module text, keeping the tree even when
/// errors occurred
pub fn parse_implementation_source(
    filename: &str,
    text: &str,
    options: &Options,
    sink: &mut dyn DiagnosticSink,
) -> Result<Parse, SourceError> {
    let infile = Infile::from_source(filename, text)?;
    Ok(run(infile, options, sink, Unit::Implementation))
}

fn unit_for_path(path: &Path) -> Unit {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("def") => Unit::Definition,
        _ => Unit::Implementation,
    }
}

fn run(infile: Infile, options: &Options, sink: &mut dyn DiagnosticSink, unit: Unit) -> Parse {
    let filename = SmolStr::new(infile.filename());
    let mut reporter = Reporter::new(sink);
    if options.diagnostics.verbose {
        reporter = reporter.with_source_lines(infile.lines());
    }

    let lexer = Lexer::new(infile, options, reporter);
    let mut parser = Parser::new(lexer, options);
    let module = match unit {
        Unit::Definition => parser.parse_definition_unit(),
        Unit::Implementation => parser.parse_implementation_unit(),
    };

    let error_count = parser.error_count();
    let warning_count = parser.warning_count();
    let root = build_root(filename.clone(), options, module);
    debug!(
        "[PARSER] {}: {} error(s), {} warning(s), {} unexplained degradation(s)",
        filename,
        error_count,
        warning_count,
        parser.unexplained_degradations()
    );

    Parse {
        root,
        error_count,
        warning_count,
    }
}

/// `ROOT (FILENAME, OPTIONS, module)`, or the empty node without a module
fn build_root(filename: SmolStr, options: &Options, module: AstNode) -> AstNode {
    if module.is_empty() {
        return AstNode::empty();
    }
    AstNode::new_terminal(AstNodeType::FILENAME, filename)
        .and_then(|filename| {
            let settings = AstNode::new_terminal_list(AstNodeType::OPTIONS, options.setting_terms())?;
            AstNode::new_branch(AstNodeType::ROOT, vec![filename, settings, module])
        })
        .unwrap_or_else(|err| {
            debug!("[PARSER] root not built: {}", err);
            AstNode::empty()
        })
}
