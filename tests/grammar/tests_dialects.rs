//! Grammar differences driven by dialect and capability options

use m2front::{AstNodeType, Code, Dialect, Options, Token};

use crate::support::fixtures::{BUFFERS_EXT_MOD, STRINGS_EXT_DEF};
use crate::support::parse_helpers::{parse_def, parse_def_with, parse_mod, parse_mod_with};

fn ext() -> Options {
    Options::for_dialect(Dialect::Ext)
}

#[test]
fn test_const_parameters_under_ext() {
    let parsed = parse_def_with(STRINGS_EXT_DEF, &ext());
    parsed.assert_clean();
    assert!(parsed.module_text().contains(concat!(
        r#"(PROCDEF (IDENT "Length") (FPARAMLIST (FPARAMS (IDENTLIST "s") "#,
        r#"(CONSTP (OPENARRAY (IDENT "CHAR"))))) (IDENT "CARDINAL"))"#,
    )));
}

#[test]
fn test_const_parameters_rejected_under_pim() {
    let parsed = parse_def(STRINGS_EXT_DEF);
    assert_eq!(parsed.codes().first(), Some(&Code::E0201));
    assert_eq!(parsed.diagnostics[0].expected_tokens(), vec![Token::R_PAREN]);
    assert!(!parsed.parse.ok());
}

#[test]
fn test_var_size_record_under_ext() {
    let parsed = parse_mod_with(BUFFERS_EXT_MOD, &ext());
    parsed.assert_clean();
    assert!(parsed.module_text().contains(concat!(
        r#"(TYPEDECL (IDENT "Buffer") (VSREC "#,
        r#"(FIELDLISTSEQ (FIELDLIST (IDENTLIST "size") (IDENT "CARDINAL"))) "#,
        r#"(VSFIELD (IDENT "data") (IDENT "size") (IDENT "CHAR"))))"#,
    )));
}

#[test]
fn test_var_size_record_rejected_under_pim() {
    let parsed = parse_mod(BUFFERS_EXT_MOD);
    assert!(parsed.codes().contains(&Code::E0201));
    assert_eq!(parsed.count(AstNodeType::VSREC), 0);
}

#[test]
fn test_extensible_record_under_ext() {
    let parsed = parse_def_with(
        "DEFINITION MODULE Shapes;\nTYPE Circle = RECORD (Shapes.Shape) r : REAL END;\nEND Shapes.\n",
        &ext(),
    );
    parsed.assert_clean();
    assert!(parsed.module_text().contains(concat!(
        r#"(EXTREC (QUALIDENT "Shapes" "Shape") "#,
        r#"(FIELDLISTSEQ (FIELDLIST (IDENTLIST "r") (IDENT "REAL"))))"#,
    )));
}

#[test]
fn test_variant_part_rejected_under_ext() {
    let parsed = parse_def_with(
        "DEFINITION MODULE T;\nTYPE R = RECORD CASE k : K OF 1 : a : CHAR END END;\nEND T.\n",
        &ext(),
    );
    assert!(parsed.codes().contains(&Code::E0201));
    assert_eq!(parsed.count(AstNodeType::VFLIST), 0);
}

#[test]
fn test_lowline_identifiers_follow_dialect() {
    let body = "MODULE M;\nBEGIN\n  my_var := 1\nEND M.\n";
    let parsed = parse_mod_with(body, &ext());
    parsed.assert_clean();
    assert_eq!(
        parsed.statements(),
        vec![r#"(ASSIGN (IDENT "my_var") (INTVAL "1"))"#.to_string()]
    );

    let parsed = parse_mod(body);
    assert!(parsed.codes().contains(&Code::E0102));
}

#[test]
fn test_synonyms_follow_capabilities() {
    let body = "MODULE M;\nBEGIN\n  b := (x <> y) & ~z\nEND M.\n";
    let parsed = parse_mod(body);
    parsed.assert_clean();
    assert_eq!(
        parsed.statements(),
        vec![
            r#"(ASSIGN (IDENT "b") (AND (NEQ (IDENT "x") (IDENT "y")) (NOT (IDENT "z"))))"#
                .to_string()
        ]
    );

    let parsed = parse_mod_with(body, &ext());
    assert!(!parsed.parse.ok());
}
