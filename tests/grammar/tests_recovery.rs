//! Error recovery: diagnostics are reported and parsing carries on

use m2front::{AstNodeType, Code, Token};

use crate::support::parse_helpers::{parse_body, parse_mod};

#[test]
fn test_missing_semicolon_between_statements() {
    let parsed = parse_body("  a := 1\n  b := 2;\n  c := 3");
    assert_eq!(parsed.codes(), vec![Code::E0201]);
    let diagnostic = &parsed.diagnostics[0];
    assert_eq!(diagnostic.offending_token, Some(Token::IDENT));
    assert_eq!(diagnostic.expected_tokens(), vec![Token::SEMICOLON]);
    assert_eq!(diagnostic.position.map(|p| (p.line, p.column)), Some((4, 3)));
    assert_eq!(parsed.statements().len(), 3);
    assert!(!parsed.parse.root.is_empty());
}

#[test]
fn test_unterminated_string_resumes_on_next_line() {
    let parsed = parse_body("  s := 'abc;\n  t := 1");
    assert_eq!(parsed.codes(), vec![Code::E0104, Code::E0201]);
    assert_eq!(
        parsed.statements(),
        vec![
            r#"(ASSIGN (IDENT "s") (QUOTEDVAL "'abc;"))"#.to_string(),
            r#"(ASSIGN (IDENT "t") (INTVAL "1"))"#.to_string(),
        ]
    );
}

#[test]
fn test_missing_operand_drops_only_that_statement() {
    let parsed = parse_body("  x := ;\n  y := 2");
    assert_eq!(parsed.codes(), vec![Code::E0201]);
    assert_eq!(
        parsed.statements(),
        vec![r#"(ASSIGN (IDENT "y") (INTVAL "2"))"#.to_string()]
    );
}

#[test]
fn test_unknown_character() {
    let parsed = parse_body("  x := 1 $ 2");
    assert_eq!(parsed.codes(), vec![Code::E0102, Code::E0201]);
    assert_eq!(parsed.diagnostics[0].offending_char, Some('$'));
    assert_eq!(
        parsed.statements(),
        vec![r#"(ASSIGN (IDENT "x") (INTVAL "1"))"#.to_string()]
    );
}

#[test]
fn test_missing_module_end() {
    let parsed = parse_mod("MODULE M;\nBEGIN\n  x := 1\n");
    assert!(parsed.parse.error_count >= 1);
    assert!(parsed.codes().iter().all(|code| *code == Code::E0201));
    assert_eq!(parsed.count(AstNodeType::PGMMOD), 1);
    assert_eq!(parsed.count(AstNodeType::ASSIGN), 1);
    assert!(!parsed.parse.ok());
}

#[test]
fn test_procedure_end_identifier_mismatch() {
    let parsed = parse_mod("MODULE M;\nPROCEDURE P;\nEND Q;\nEND M.\n");
    assert_eq!(parsed.codes(), vec![Code::E0301]);
    let diagnostic = &parsed.diagnostics[0];
    assert_eq!(diagnostic.offending_lexeme.as_deref(), Some("Q"));
    assert_eq!(diagnostic.position.map(|p| (p.line, p.column)), Some((3, 5)));
    assert_eq!(parsed.count(AstNodeType::PROC), 1);
}

#[test]
fn test_diagnostics_are_in_source_order() {
    let parsed = parse_mod(
        "MODULE M;\nVAR a : ;\nBEGIN\n  a := 1\n  b := (2;\n  c := 'x\nEND M.\n",
    );
    assert!(parsed.diagnostics.len() >= 4, "{:?}", parsed.codes());
    let positions: Vec<(u32, u32)> = parsed
        .diagnostics
        .iter()
        .map(|d| d.position.map(|p| (p.line, p.column)).unwrap_or_default())
        .collect();
    let mut sorted = positions.clone();
    sorted.sort();
    assert_eq!(positions, sorted);
    assert!(parsed.codes().contains(&Code::E0104));
}

#[test]
fn test_comments_and_disabled_code_are_invisible() {
    let parsed = parse_mod(
        "MODULE M; (* header (* nested *) *)\nBEGIN\n?<\n  junk junk\n>?\n  x := 1 (* trailing *)\nEND M.\n",
    );
    assert_eq!(parsed.codes(), vec![Code::W0101]);
    assert_eq!(parsed.diagnostics[0].lines.map(|l| (l.first, l.last)), Some((3, 5)));
    assert_eq!(
        parsed.statements(),
        vec![r#"(ASSIGN (IDENT "x") (INTVAL "1"))"#.to_string()]
    );
    assert!(parsed.parse.ok());
}

#[test]
fn test_pragmas_leave_accepted_values_intact() {
    let parsed = parse_body("  a <*p*> := 1 <*q*>;\n  s := 'x' <*r*>;\n  r.f <*s*> := 2.5");
    parsed.assert_clean();
    assert_eq!(
        parsed.statements(),
        vec![
            r#"(ASSIGN (IDENT "a") (INTVAL "1"))"#.to_string(),
            r#"(ASSIGN (IDENT "s") (QUOTEDVAL "'x'"))"#.to_string(),
            r#"(ASSIGN (QUALIDENT "r" "f") (REALVAL "2.5"))"#.to_string(),
        ]
    );
    assert!(!parsed.module_text().contains("<*"));
}

#[test]
fn test_end_identifier_mismatch_before_pragma() {
    let parsed = parse_mod("MODULE Alpha;\nEND Beta <*p*>.\n");
    assert_eq!(parsed.codes(), vec![Code::E0301]);
    let position = parsed.diagnostics[0].position.map(|p| (p.line, p.column));
    assert_eq!(position, Some((2, 5)));
}
