//! Parallel parsing of independent compilation units

use std::path::{Path, PathBuf};

use rayon::prelude::*;
use tracing::debug;

use super::{
    ParseFailure, Unit, check_syntax, parse_definition, parse_implementation, unit_for_path,
};
use crate::ast::AstNode;
use crate::diagnostics::{CollectingSink, Diagnostic};
use crate::options::Options;

/// Result of parsing one file in a batch
#[derive(Debug)]
pub struct FileOutcome {
    pub path: PathBuf,
    pub result: Result<AstNode, ParseFailure>,
    /// Diagnostics for this file, in source order
    pub diagnostics: Vec<Diagnostic>,
}

impl FileOutcome {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

/// Parse every file in parallel, choosing the unit kind from the extension
///
/// Each file gets its own lexer, parser and sink. Outcomes are returned in
/// the order of `paths`. With `syntax_only` set in the options, trees are
/// checked and then dropped.
pub fn parse_files<P>(paths: &[P], options: &Options) -> Vec<FileOutcome>
where
    P: AsRef<Path> + Sync,
{
    debug!("[BATCH] parsing {} file(s)", paths.len());
    paths
        .par_iter()
        .map(|path| parse_one(path.as_ref(), options))
        .collect()
}

fn parse_one(path: &Path, options: &Options) -> FileOutcome {
    let mut sink = CollectingSink::new();
    let result = if options.syntax_only {
        check_syntax(path, options, &mut sink).map(|()| AstNode::empty())
    } else {
        match unit_for_path(path) {
            Unit::Definition => parse_definition(path, options, &mut sink),
            Unit::Implementation => parse_implementation(path, options, &mut sink),
        }
    };
    FileOutcome {
        path: path.to_path_buf(),
        result,
        diagnostics: sink.into_diagnostics(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::AstNodeType;
    use crate::parser::SourceError;
    use std::fs;

    #[test]
    fn test_parse_files_keeps_order_and_isolates_diagnostics() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("Good.def");
        let bad = dir.path().join("Bad.mod");
        let missing = dir.path().join("Missing.mod");
        fs::write(&good, "DEFINITION MODULE Good;\nCONST n = 1;\nEND Good.\n").unwrap();
        fs::write(&bad, "MODULE Bad;\nBEGIN\n  x := \nEND Bad.\n").unwrap();

        let outcomes = parse_files(&[&good, &bad, &missing], &Options::default());
        assert_eq!(outcomes.len(), 3);

        assert_eq!(outcomes[0].path, good);
        assert!(outcomes[0].is_ok());
        assert!(outcomes[0].diagnostics.is_empty());
        let root = outcomes[0].result.as_ref().unwrap();
        assert_eq!(root.node_type(), AstNodeType::ROOT);

        assert!(matches!(outcomes[1].result, Err(ParseFailure::Syntax { .. })));
        assert!(!outcomes[1].diagnostics.is_empty());

        assert!(matches!(
            outcomes[2].result,
            Err(ParseFailure::Source(SourceError::NotFound { .. }))
        ));
        assert!(outcomes[2].diagnostics.is_empty());
    }

    #[test]
    fn test_syntax_only_drops_trees() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("M.mod");
        fs::write(&path, "MODULE M;\nEND M.\n").unwrap();
        let mut options = Options::default();
        options.syntax_only = true;

        let outcomes = parse_files(&[path], &options);
        assert!(outcomes[0].is_ok());
        assert!(outcomes[0].result.as_ref().unwrap().is_empty());
    }
}
