//! File based entry points

use std::fs;

use m2front::diagnostics::CollectingSink;
use m2front::parser::SourceError;
use m2front::{AstNode, AstNodeType, Options, ParseFailure};
use m2front::{check_syntax, parse_definition, parse_files, parse_implementation};

use crate::support::fixtures::{HELLO_MOD, LISTS_DEF};

#[test]
fn test_parse_definition_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("Lists.def");
    fs::write(&path, LISTS_DEF).unwrap();

    let mut sink = CollectingSink::new();
    let root = parse_definition(&path, &Options::default(), &mut sink).unwrap();
    assert!(sink.is_empty());
    assert_eq!(root.node_type(), AstNodeType::ROOT);
    let filename = path.to_string_lossy();
    assert_eq!(root.subnode(0).and_then(AstNode::value), Some(filename.as_ref()));
    assert_eq!(root.subnode(2).map(AstNode::node_type), Some(AstNodeType::DEFMOD));
}

#[test]
fn test_parse_implementation_accepts_program_modules() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("Hello.mod");
    fs::write(&path, HELLO_MOD).unwrap();

    let mut sink = CollectingSink::new();
    let root = parse_implementation(&path, &Options::default(), &mut sink).unwrap();
    assert_eq!(root.subnode(2).map(AstNode::node_type), Some(AstNodeType::PGMMOD));
}

#[test]
fn test_syntax_errors_fail_the_entry_point() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("Broken.mod");
    fs::write(&path, "MODULE Broken;\nBEGIN\n  x := \nEND Broken.\n").unwrap();

    let mut sink = CollectingSink::new();
    let result = parse_implementation(&path, &Options::default(), &mut sink);
    assert!(matches!(result, Err(ParseFailure::Syntax { errors: 1 })));
    assert_eq!(sink.errors().count(), 1);
}

#[test]
fn test_missing_file_reports_no_diagnostics() {
    let dir = tempfile::tempdir().unwrap();
    let mut sink = CollectingSink::new();
    let result = parse_definition(dir.path().join("Nope.def"), &Options::default(), &mut sink);
    assert!(matches!(
        result,
        Err(ParseFailure::Source(SourceError::NotFound { .. }))
    ));
    assert!(sink.is_empty());
}

#[test]
fn test_check_syntax_picks_unit_from_extension() {
    let dir = tempfile::tempdir().unwrap();
    let def = dir.path().join("Lists.def");
    let program = dir.path().join("Lists.mod");
    fs::write(&def, LISTS_DEF).unwrap();
    fs::write(&program, LISTS_DEF).unwrap();

    let mut sink = CollectingSink::new();
    assert!(check_syntax(&def, &Options::default(), &mut sink).is_ok());
    assert!(sink.is_empty());

    let mut sink = CollectingSink::new();
    assert!(check_syntax(&program, &Options::default(), &mut sink).is_err());
    assert!(!sink.is_empty());
}

#[test]
fn test_verbose_diagnostics_echo_source_line() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("Echo.mod");
    fs::write(&path, "MODULE Echo;\nBEGIN\n  a := 1\n  b := 2\nEND Echo.\n").unwrap();
    let mut options = Options::default();
    options.diagnostics.verbose = true;

    let mut sink = CollectingSink::new();
    let _ = parse_implementation(&path, &options, &mut sink);
    let diagnostic = &sink.diagnostics()[0];
    assert_eq!(diagnostic.source_line.as_deref(), Some("  b := 2"));
}

#[test]
fn test_batch_matches_single_file_results() {
    let dir = tempfile::tempdir().unwrap();
    let def = dir.path().join("Lists.def");
    let program = dir.path().join("Hello.mod");
    fs::write(&def, LISTS_DEF).unwrap();
    fs::write(&program, HELLO_MOD).unwrap();

    let outcomes = parse_files(&[def.clone(), program.clone()], &Options::default());
    assert!(outcomes.iter().all(|o| o.is_ok() && o.diagnostics.is_empty()));

    let mut sink = CollectingSink::new();
    let single = parse_definition(&def, &Options::default(), &mut sink).unwrap();
    assert_eq!(outcomes[0].result.as_ref().unwrap(), &single);
}
