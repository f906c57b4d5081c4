//! Command line argument lexer
//!
//! Each argument is classified as a whole by a logos-generated lexer; an
//! argument the lexer does not match completely is `Unknown`.

use logos::Logos;
use std::path::PathBuf;

use super::{CommentMode, Dialect, IdentifierMode, Options, OptionsError, Product};

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArgumentToken {
    Unknown,

    // =========================================================================
    // INFORMATION
    // =========================================================================
    #[token("--help")]
    #[token("-h")]
    Help,
    #[token("--version")]
    #[token("-V")]
    Version,
    #[token("--license")]
    License,

    // =========================================================================
    // DIALECTS
    // =========================================================================
    #[token("--pim3")]
    Pim3,
    #[token("--pim4")]
    Pim4,
    #[token("--ext")]
    Ext,
    #[token("--safer")]
    Safer,
    #[token("--compliant")]
    Compliant,

    // =========================================================================
    // PRODUCTS
    // =========================================================================
    #[token("--syntax-only")]
    SyntaxOnly,
    #[token("--ast-only")]
    AstOnly,
    #[token("--graph-only")]
    GraphOnly,
    #[token("--xlat-only")]
    XlatOnly,
    #[token("--obj-only")]
    ObjOnly,
    #[token("--ast")]
    Ast,
    #[token("--no-ast")]
    NoAst,
    #[token("--graph")]
    Graph,
    #[token("--no-graph")]
    NoGraph,
    #[token("--xlat")]
    Xlat,
    #[token("--no-xlat")]
    NoXlat,
    #[token("--obj")]
    Obj,
    #[token("--no-obj")]
    NoObj,

    // =========================================================================
    // IDENTIFIERS AND COMMENTS
    // =========================================================================
    #[token("--use-identifiers-verbatim")]
    UseIdentifiersVerbatim,
    #[token("--transliterate-identifiers")]
    TransliterateIdentifiers,
    #[token("--preserve-comments")]
    PreserveComments,
    #[token("--strip-comments")]
    StripComments,

    // =========================================================================
    // CAPABILITIES
    // =========================================================================
    #[token("--synonyms")]
    Synonyms,
    #[token("--no-synonyms")]
    NoSynonyms,
    #[token("--octal-literals")]
    OctalLiterals,
    #[token("--no-octal-literals")]
    NoOctalLiterals,
    #[token("--explicit-cast")]
    ExplicitCast,
    #[token("--no-explicit-cast")]
    NoExplicitCast,
    #[token("--coroutines")]
    Coroutines,
    #[token("--no-coroutines")]
    NoCoroutines,
    #[token("--variant-records")]
    VariantRecords,
    #[token("--no-variant-records")]
    NoVariantRecords,
    #[token("--local-modules")]
    LocalModules,
    #[token("--no-local-modules")]
    NoLocalModules,
    #[token("--lowline-identifiers")]
    LowlineIdentifiers,
    #[token("--no-lowline-identifiers")]
    NoLowlineIdentifiers,
    #[token("--to-do-statement")]
    ToDoStatement,
    #[token("--no-to-do-statement")]
    NoToDoStatement,

    // =========================================================================
    // DIAGNOSTICS
    // =========================================================================
    #[token("--verbose")]
    #[token("-v")]
    Verbose,
    #[token("--lexer-debug")]
    LexerDebug,
    #[token("--parser-debug")]
    ParserDebug,
    #[token("--show-settings")]
    ShowSettings,
    #[token("--errant-semicolons")]
    ErrantSemicolons,

    #[regex(r"[^-\s][^\s]*")]
    SourceFile,
}

impl ArgumentToken {
    /// Classify one complete argument
    pub fn classify(arg: &str) -> ArgumentToken {
        let mut lexer = ArgumentToken::lexer(arg);
        match lexer.next() {
            Some(Ok(token)) if lexer.span().len() == arg.len() => token,
            _ => ArgumentToken::Unknown,
        }
    }

    pub fn is_info_request(self) -> bool {
        matches!(self, Self::Help | Self::Version | Self::License)
    }

    pub fn is_dialect_option(self) -> bool {
        matches!(self, Self::Pim3 | Self::Pim4 | Self::Ext)
    }

    pub fn is_dialect_qualifier_option(self) -> bool {
        matches!(self, Self::Safer | Self::Compliant)
    }

    pub fn is_single_product_option(self) -> bool {
        matches!(
            self,
            Self::SyntaxOnly | Self::AstOnly | Self::GraphOnly | Self::XlatOnly | Self::ObjOnly
        )
    }

    pub fn is_multiple_products_option(self) -> bool {
        matches!(
            self,
            Self::Ast
                | Self::NoAst
                | Self::Graph
                | Self::NoGraph
                | Self::Xlat
                | Self::NoXlat
                | Self::Obj
                | Self::NoObj
        )
    }

    pub fn is_product_option(self) -> bool {
        self.is_single_product_option() || self.is_multiple_products_option()
    }

    pub fn is_identifier_option(self) -> bool {
        matches!(
            self,
            Self::UseIdentifiersVerbatim | Self::TransliterateIdentifiers
        )
    }

    pub fn is_comment_option(self) -> bool {
        matches!(self, Self::PreserveComments | Self::StripComments)
    }

    pub fn is_capability_option(self) -> bool {
        self.capability().is_some()
    }

    pub fn is_diagnostics_option(self) -> bool {
        matches!(
            self,
            Self::Verbose
                | Self::LexerDebug
                | Self::ParserDebug
                | Self::ShowSettings
                | Self::ErrantSemicolons
        )
    }

    /// The capability a toggle option sets, and the value it sets it to
    fn capability(self) -> Option<(Capability, bool)> {
        let toggle = match self {
            Self::Synonyms => (Capability::Synonyms, true),
            Self::NoSynonyms => (Capability::Synonyms, false),
            Self::OctalLiterals => (Capability::OctalLiterals, true),
            Self::NoOctalLiterals => (Capability::OctalLiterals, false),
            Self::ExplicitCast => (Capability::ExplicitCast, true),
            Self::NoExplicitCast => (Capability::ExplicitCast, false),
            Self::Coroutines => (Capability::Coroutines, true),
            Self::NoCoroutines => (Capability::Coroutines, false),
            Self::VariantRecords => (Capability::VariantRecords, true),
            Self::NoVariantRecords => (Capability::VariantRecords, false),
            Self::LocalModules => (Capability::LocalModules, true),
            Self::NoLocalModules => (Capability::LocalModules, false),
            Self::LowlineIdentifiers => (Capability::LowlineIdentifiers, true),
            Self::NoLowlineIdentifiers => (Capability::LowlineIdentifiers, false),
            Self::ToDoStatement => (Capability::ToDoStatement, true),
            Self::NoToDoStatement => (Capability::ToDoStatement, false),
            _ => return None,
        };
        Some(toggle)
    }

    /// The product a multiple-products option sets, and the value it sets
    fn product_toggle(self) -> Option<(Product, bool)> {
        let toggle = match self {
            Self::Ast => (Product::Ast, true),
            Self::NoAst => (Product::Ast, false),
            Self::Graph => (Product::Graph, true),
            Self::NoGraph => (Product::Graph, false),
            Self::Xlat => (Product::Xlat, true),
            Self::NoXlat => (Product::Xlat, false),
            Self::Obj => (Product::Obj, true),
            Self::NoObj => (Product::Obj, false),
            _ => return None,
        };
        Some(toggle)
    }
}

/// Capabilities that can be toggled from the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(super) enum Capability {
    Synonyms,
    OctalLiterals,
    ExplicitCast,
    Coroutines,
    VariantRecords,
    LocalModules,
    LowlineIdentifiers,
    ToDoStatement,
}

/// What the command line asks for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    Help,
    Version,
    License,
    Compile { sources: Vec<PathBuf> },
}

/// A fully resolved command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub request: Request,
    pub options: Options,
}

/// Resolve a command line into a request and an option snapshot.
///
/// Contradicting options are an error; no option silently wins over another.
pub fn parse_args<I, S>(args: I) -> Result<Invocation, OptionsError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut resolver = Resolver::default();
    for arg in args {
        resolver.accept(arg.as_ref())?;
    }
    resolver.finish()
}

#[derive(Default)]
struct Resolver {
    info: Option<ArgumentToken>,
    dialect: Option<(ArgumentToken, String)>,
    qualifier: Option<(ArgumentToken, String)>,
    single_product: Option<(ArgumentToken, String)>,
    product_toggles: Vec<(Product, bool, String)>,
    identifiers: Option<(IdentifierMode, String)>,
    comments: Option<(CommentMode, String)>,
    capabilities: Vec<(Capability, bool, String)>,
    diagnostics: Vec<ArgumentToken>,
    sources: Vec<PathBuf>,
}

impl Resolver {
    fn accept(&mut self, arg: &str) -> Result<(), OptionsError> {
        let token = ArgumentToken::classify(arg);

        if token.is_info_request() {
            self.info.get_or_insert(token);
        } else if token.is_dialect_option() {
            set_once(&mut self.dialect, token, arg)?;
        } else if token.is_dialect_qualifier_option() {
            set_once(&mut self.qualifier, token, arg)?;
        } else if token.is_single_product_option() {
            if let Some((_, _, previous)) = self.product_toggles.first() {
                return Err(OptionsError::conflict(previous, arg));
            }
            set_once(&mut self.single_product, token, arg)?;
        } else if let Some((product, on)) = token.product_toggle() {
            if let Some((_, previous)) = &self.single_product {
                return Err(OptionsError::conflict(previous, arg));
            }
            if let Some((_, _, previous)) =
                self.product_toggles.iter().find(|(p, v, _)| *p == product && *v != on)
            {
                return Err(OptionsError::conflict(previous, arg));
            }
            self.product_toggles.push((product, on, arg.to_string()));
        } else if token.is_identifier_option() {
            let mode = match token {
                ArgumentToken::TransliterateIdentifiers => IdentifierMode::Transliterate,
                _ => IdentifierMode::Verbatim,
            };
            set_once(&mut self.identifiers, mode, arg)?;
        } else if token.is_comment_option() {
            let mode = match token {
                ArgumentToken::StripComments => CommentMode::Strip,
                _ => CommentMode::Preserve,
            };
            set_once(&mut self.comments, mode, arg)?;
        } else if let Some((capability, on)) = token.capability() {
            if let Some((_, _, previous)) = self
                .capabilities
                .iter()
                .find(|(c, v, _)| *c == capability && *v != on)
            {
                return Err(OptionsError::conflict(previous, arg));
            }
            self.capabilities.push((capability, on, arg.to_string()));
        } else if token.is_diagnostics_option() {
            self.diagnostics.push(token);
        } else if token == ArgumentToken::SourceFile {
            if !has_source_suffix(arg) {
                return Err(OptionsError::InvalidFilename(arg.to_string()));
            }
            self.sources.push(PathBuf::from(arg));
        } else {
            return Err(OptionsError::InvalidOption(arg.to_string()));
        }
        Ok(())
    }

    fn finish(self) -> Result<Invocation, OptionsError> {
        let dialect = match self.dialect.as_ref().map(|(t, _)| *t) {
            Some(ArgumentToken::Pim3) => Dialect::Pim3,
            Some(ArgumentToken::Ext) => Dialect::Ext,
            _ => Dialect::Pim4,
        };

        let mut options = Options::for_dialect(dialect);
        if let Some((qualifier, arg)) = &self.qualifier {
            if dialect == Dialect::Ext {
                let dialect_arg = self
                    .dialect
                    .as_ref()
                    .map(|(_, a)| a.as_str())
                    .unwrap_or("--ext");
                return Err(OptionsError::conflict(dialect_arg, arg));
            }
            match qualifier {
                ArgumentToken::Safer => options.apply_safer(),
                _ => options.compliant = true,
            }
        }

        for (capability, on, _) in &self.capabilities {
            options.set_capability(*capability, *on);
        }

        if let Some((kind, _)) = self.single_product {
            options.products = match kind {
                ArgumentToken::AstOnly => Product::Ast.only(),
                ArgumentToken::GraphOnly => Product::Graph.only(),
                ArgumentToken::XlatOnly => Product::Xlat.only(),
                ArgumentToken::ObjOnly => Product::Obj.only(),
                _ => Default::default(),
            };
            options.syntax_only = kind == ArgumentToken::SyntaxOnly;
        }
        for (product, on, _) in &self.product_toggles {
            options.products.set(*product, *on);
        }

        if let Some((mode, _)) = self.identifiers {
            options.identifiers = mode;
        }
        if let Some((mode, _)) = self.comments {
            options.comments = mode;
        }
        for token in &self.diagnostics {
            match token {
                ArgumentToken::Verbose => options.diagnostics.verbose = true,
                ArgumentToken::LexerDebug => options.diagnostics.lexer_debug = true,
                ArgumentToken::ParserDebug => options.diagnostics.parser_debug = true,
                ArgumentToken::ShowSettings => options.diagnostics.show_settings = true,
                ArgumentToken::ErrantSemicolons => options.diagnostics.errant_semicolons = true,
                _ => {}
            }
        }

        tracing::debug!(
            "[OPTIONS] dialect={} safer={} compliant={}",
            options.dialect,
            options.safer,
            options.compliant
        );

        let request = match self.info {
            Some(ArgumentToken::Help) => Request::Help,
            Some(ArgumentToken::Version) => Request::Version,
            Some(ArgumentToken::License) => Request::License,
            _ => Request::Compile {
                sources: self.sources,
            },
        };
        Ok(Invocation { request, options })
    }
}

fn set_once<T: Copy + PartialEq>(
    slot: &mut Option<(T, String)>,
    value: T,
    arg: &str,
) -> Result<(), OptionsError> {
    if let Some((existing, previous)) = slot.as_ref() {
        if *existing == value {
            return Ok(());
        }
        return Err(OptionsError::conflict(previous, arg));
    }
    *slot = Some((value, arg.to_string()));
    Ok(())
}

fn has_source_suffix(arg: &str) -> bool {
    [".def", ".mod", ".DEF", ".MOD"]
        .iter()
        .any(|suffix| arg.len() > suffix.len() && arg.ends_with(suffix))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_whole_argument() {
        assert_eq!(ArgumentToken::classify("--pim3"), ArgumentToken::Pim3);
        assert_eq!(ArgumentToken::classify("-v"), ArgumentToken::Verbose);
        assert_eq!(ArgumentToken::classify("--no-ast"), ArgumentToken::NoAst);
        assert_eq!(ArgumentToken::classify("Foo.mod"), ArgumentToken::SourceFile);
        assert_eq!(ArgumentToken::classify("--pim3x"), ArgumentToken::Unknown);
        assert_eq!(ArgumentToken::classify("--bogus"), ArgumentToken::Unknown);
    }

    #[test]
    fn test_option_groups() {
        assert!(ArgumentToken::Safer.is_dialect_qualifier_option());
        assert!(ArgumentToken::XlatOnly.is_product_option());
        assert!(ArgumentToken::NoObj.is_multiple_products_option());
        assert!(ArgumentToken::NoCoroutines.is_capability_option());
        assert!(!ArgumentToken::Verbose.is_capability_option());
    }

    #[test]
    fn test_compile_request_collects_sources() {
        let invocation = parse_args(["--pim3", "Foo.def", "Foo.mod"]).unwrap();
        assert_eq!(invocation.options.dialect, Dialect::Pim3);
        assert_eq!(
            invocation.request,
            Request::Compile {
                sources: vec![PathBuf::from("Foo.def"), PathBuf::from("Foo.mod")]
            }
        );
    }

    #[test]
    fn test_info_request_wins_over_compile() {
        let invocation = parse_args(["Foo.mod", "--version"]).unwrap();
        assert_eq!(invocation.request, Request::Version);
    }

    #[test]
    fn test_invalid_filename() {
        assert_eq!(
            parse_args(["Foo.txt"]).unwrap_err(),
            OptionsError::InvalidFilename("Foo.txt".to_string())
        );
    }
}
