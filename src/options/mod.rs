//! Dialect and capability options
//!
//! [`Options`] is an immutable snapshot handed to the lexer and parser for
//! the duration of one parse. It is built from dialect defaults and,
//! optionally, from command line arguments via [`parse_args`].
//!
//! ## Dialect defaults
//!
//! | capability          | PIM3/PIM4 | PIM `--safer` | EXT |
//! |---------------------|-----------|---------------|-----|
//! | synonyms            | on        | off           | off |
//! | octal literals      | on        | off           | off |
//! | explicit cast       | off       | on            | on  |
//! | coroutines          | on        | off           | off |
//! | variant records     | on        | off           | off |
//! | local modules       | on        | off           | off |
//! | lowline identifiers | off       | off           | on  |
//! | TO DO statement     | off       | off           | on  |
//! | CONST parameters    | off       | off           | on  |

mod args;

pub use args::{ArgumentToken, Invocation, Request, parse_args};

use args::Capability;
use indexmap::IndexMap;
use std::fmt;
use thiserror::Error;

use crate::diagnostics::Code;
use crate::parser::ProductionContext;

/// Language dialect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Dialect {
    /// Programming in Modula-2, 3rd edition
    Pim3,
    /// Programming in Modula-2, 4th edition
    #[default]
    Pim4,
    /// Extended mode with select features of the revised language
    Ext,
}

impl Dialect {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pim3 => "pim3",
            Self::Pim4 => "pim4",
            Self::Ext => "ext",
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Language capabilities that vary with the dialect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Capabilities {
    /// `&`, `~` and `<>` as synonyms of `AND`, `NOT` and `#`
    pub synonyms: bool,
    /// Octal `17B` and character code `101C` literals
    pub octal_literals: bool,
    pub explicit_cast: bool,
    pub coroutines: bool,
    pub variant_records: bool,
    pub local_modules: bool,
    /// `_` within identifiers
    pub lowline_identifiers: bool,
    pub to_do_statement: bool,
    /// `CONST` formal parameter attribute
    pub const_parameters: bool,
}

impl Capabilities {
    fn pim() -> Self {
        Self {
            synonyms: true,
            octal_literals: true,
            explicit_cast: false,
            coroutines: true,
            variant_records: true,
            local_modules: true,
            lowline_identifiers: false,
            to_do_statement: false,
            const_parameters: false,
        }
    }

    fn safer() -> Self {
        Self {
            synonyms: false,
            octal_literals: false,
            explicit_cast: true,
            coroutines: false,
            variant_records: false,
            local_modules: false,
            lowline_identifiers: false,
            to_do_statement: false,
            const_parameters: false,
        }
    }

    fn ext() -> Self {
        Self {
            lowline_identifiers: true,
            to_do_statement: true,
            const_parameters: true,
            ..Self::safer()
        }
    }
}

/// An output product of a compilation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Product {
    Ast,
    Graph,
    Xlat,
    Obj,
}

impl Product {
    fn only(self) -> Products {
        let mut products = Products::default();
        products.set(self, true);
        products
    }
}

/// Which products a compilation generates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Products {
    pub ast: bool,
    pub graph: bool,
    pub xlat: bool,
    pub obj: bool,
}

impl Products {
    pub fn set(&mut self, product: Product, on: bool) {
        match product {
            Product::Ast => self.ast = on,
            Product::Graph => self.graph = on,
            Product::Xlat => self.xlat = on,
            Product::Obj => self.obj = on,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum IdentifierMode {
    #[default]
    Verbatim,
    Transliterate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CommentMode {
    #[default]
    Preserve,
    Strip,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct DiagnosticOptions {
    /// Echo the offending source line with each diagnostic
    pub verbose: bool,
    /// Trace every symbol the lexer produces
    pub lexer_debug: bool,
    /// Trace production entry and resynchronisation in the parser
    pub parser_debug: bool,
    pub show_settings: bool,
    /// Accept errant semicolons without a warning
    pub errant_semicolons: bool,
}

/// Errors raised while resolving options, before any parse starts
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OptionsError {
    #[error("invalid option: {0}")]
    InvalidOption(String),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("invalid filename: {0}")]
    InvalidFilename(String),

    #[error("option {second} conflicts with {first}")]
    Conflict { first: String, second: String },
}

impl OptionsError {
    fn conflict(first: &str, second: &str) -> Self {
        Self::Conflict {
            first: first.to_string(),
            second: second.to_string(),
        }
    }

    /// The diagnostic code reported for this error
    pub fn code(&self) -> Code {
        match self {
            Self::InvalidOption(_) => Code::E0001,
            Self::InvalidArgument(_) => Code::E0002,
            Self::InvalidFilename(_) => Code::E0004,
            Self::Conflict { .. } => Code::E0006,
        }
    }
}

/// Immutable option snapshot for one parse
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Options {
    pub dialect: Dialect,
    pub safer: bool,
    pub compliant: bool,
    pub capabilities: Capabilities,
    pub syntax_only: bool,
    pub products: Products,
    pub identifiers: IdentifierMode,
    pub comments: CommentMode,
    pub diagnostics: DiagnosticOptions,
}

impl Default for Options {
    fn default() -> Self {
        Self::for_dialect(Dialect::default())
    }
}

impl Options {
    /// Defaults for a dialect
    pub fn for_dialect(dialect: Dialect) -> Self {
        let capabilities = match dialect {
            Dialect::Pim3 | Dialect::Pim4 => Capabilities::pim(),
            Dialect::Ext => Capabilities::ext(),
        };
        Self {
            dialect,
            safer: false,
            compliant: false,
            capabilities,
            syntax_only: false,
            products: Products {
                xlat: true,
                ..Products::default()
            },
            identifiers: IdentifierMode::default(),
            comments: CommentMode::default(),
            diagnostics: DiagnosticOptions::default(),
        }
    }

    /// Resolve options from command line style arguments.
    ///
    /// Source file and information request arguments are not options and
    /// are rejected; use [`parse_args`] for a full command line.
    pub fn from_args<I, S>(args: I) -> Result<Self, OptionsError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let args: Vec<S> = args.into_iter().collect();
        if let Some(arg) = args.iter().map(|arg| arg.as_ref()).find(|arg| {
            let token = ArgumentToken::classify(arg);
            token == ArgumentToken::SourceFile || token.is_info_request()
        }) {
            return Err(OptionsError::InvalidArgument(arg.to_string()));
        }
        parse_args(args).map(|invocation| invocation.options)
    }

    /// The option projection consulted by the grammar tables
    pub fn production_context(&self) -> ProductionContext {
        ProductionContext {
            const_parameters: self.capabilities.const_parameters,
            variant_records: self.capabilities.variant_records,
        }
    }

    fn apply_safer(&mut self) {
        self.safer = true;
        self.capabilities = Capabilities::safer();
    }

    fn set_capability(&mut self, capability: Capability, on: bool) {
        let caps = &mut self.capabilities;
        match capability {
            Capability::Synonyms => caps.synonyms = on,
            Capability::OctalLiterals => caps.octal_literals = on,
            Capability::ExplicitCast => caps.explicit_cast = on,
            Capability::Coroutines => caps.coroutines = on,
            Capability::VariantRecords => caps.variant_records = on,
            Capability::LocalModules => caps.local_modules = on,
            Capability::LowlineIdentifiers => caps.lowline_identifiers = on,
            Capability::ToDoStatement => caps.to_do_statement = on,
        }
    }

    /// Setting names and values, in display order
    pub fn settings(&self) -> IndexMap<&'static str, String> {
        let on_off = |on: bool| if on { "on" } else { "off" }.to_string();
        let caps = &self.capabilities;
        let mut settings = IndexMap::new();
        settings.insert("dialect", self.dialect.to_string());
        settings.insert("safer", on_off(self.safer));
        settings.insert("compliant", on_off(self.compliant));
        settings.insert("synonyms", on_off(caps.synonyms));
        settings.insert("octal-literals", on_off(caps.octal_literals));
        settings.insert("explicit-cast", on_off(caps.explicit_cast));
        settings.insert("coroutines", on_off(caps.coroutines));
        settings.insert("variant-records", on_off(caps.variant_records));
        settings.insert("local-modules", on_off(caps.local_modules));
        settings.insert("lowline-identifiers", on_off(caps.lowline_identifiers));
        settings.insert("to-do-statement", on_off(caps.to_do_statement));
        settings.insert("const-parameters", on_off(caps.const_parameters));
        settings.insert("syntax-only", on_off(self.syntax_only));
        settings.insert("ast", on_off(self.products.ast));
        settings.insert("graph", on_off(self.products.graph));
        settings.insert("xlat", on_off(self.products.xlat));
        settings.insert("obj", on_off(self.products.obj));
        settings.insert(
            "identifiers",
            match self.identifiers {
                IdentifierMode::Verbatim => "verbatim",
                IdentifierMode::Transliterate => "transliterate",
            }
            .to_string(),
        );
        settings.insert(
            "comments",
            match self.comments {
                CommentMode::Preserve => "preserve",
                CommentMode::Strip => "strip",
            }
            .to_string(),
        );
        settings.insert("verbose", on_off(self.diagnostics.verbose));
        settings.insert("errant-semicolons", on_off(self.diagnostics.errant_semicolons));
        settings
    }

    /// Settings rendered as `name=value` terms, as stored in the tree's
    /// `OPTIONS` node
    pub fn setting_terms(&self) -> Vec<smol_str::SmolStr> {
        self.settings()
            .iter()
            .map(|(name, value)| smol_str::format_smolstr!("{}={}", name, value))
            .collect()
    }
}

impl fmt::Display for Options {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (name, value) in self.settings() {
            writeln!(f, "{:<20} {}", name, value)?;
        }
        Ok(())
    }
}
