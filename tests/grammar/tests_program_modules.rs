//! Statement, expression and module shapes for program modules

use m2front::AstNodeType;
use rstest::rstest;

use crate::support::fixtures::{HELLO_MOD, OUTER_MOD};
use crate::support::parse_helpers::{parse_body, parse_mod};

#[test]
fn test_hello_program() {
    let parsed = parse_mod(HELLO_MOD);
    parsed.assert_clean();
    assert_eq!(
        parsed.module_text(),
        concat!(
            r#"(PGMMOD (IDENT "Hello") EMPTY "#,
            r#"(IMPLIST (UNQIMP (IDENT "InOut") (IDENTLIST "WriteString" "WriteLn"))) "#,
            r#"(BLOCK EMPTY (STMTSEQ "#,
            r#"(PCALL (IDENT "WriteString") (ARGS (QUOTEDVAL "'Hello'"))) "#,
            r#"(PCALL (IDENT "WriteLn") EMPTY))))"#,
        )
    );
}

#[test]
fn test_local_module_with_priority_and_export() {
    let parsed = parse_mod(OUTER_MOD);
    parsed.assert_clean();
    assert_eq!(
        parsed.module_text(),
        concat!(
            r#"(PGMMOD (IDENT "Outer") EMPTY EMPTY (BLOCK (DECLLIST "#,
            r#"(MODDECL (IDENT "Inner") (INTVAL "2") "#,
            r#"(IMPLIST (IMPORT (IDENTLIST "Outer"))) "#,
            r#"(QUALEXP (IDENTLIST "Get")) "#,
            r#"(BLOCK (DECLLIST (PROC (PROCDEF (IDENT "Get") EMPTY (IDENT "INTEGER")) "#,
            r#"(BLOCK EMPTY (STMTSEQ (RETURN (INTVAL "1")))))) EMPTY))) EMPTY))"#,
        )
    );
}

#[test]
fn test_module_priority() {
    let parsed = parse_mod("IMPLEMENTATION MODULE Devices [4];\nEND Devices.\n");
    parsed.assert_clean();
    assert_eq!(
        parsed.module_text(),
        r#"(IMPMOD (IDENT "Devices") (INTVAL "4") EMPTY (BLOCK EMPTY EMPTY))"#
    );
}

#[rstest]
#[case(
    "FOR i := 1 TO 10 BY 2 DO sum := sum + i END",
    r#"(FORTO (IDENT "i") (INTVAL "1") (INTVAL "10") (INTVAL "2") (STMTSEQ (ASSIGN (IDENT "sum") (PLUS (IDENT "sum") (IDENT "i")))))"#
)]
#[case(
    "FOR i := n TO 0 DO END",
    r#"(FORTO (IDENT "i") (IDENT "n") (INTVAL "0") EMPTY EMPTY)"#
)]
#[case(
    "IF sum > 10 THEN sum := 10 ELSIF sum = 0 THEN sum := 1 ELSE RETURN END",
    concat!(
        r#"(IF (GT (IDENT "sum") (INTVAL "10")) (STMTSEQ (ASSIGN (IDENT "sum") (INTVAL "10"))) "#,
        r#"(ELSIFSEQ (ELSIF (EQ (IDENT "sum") (INTVAL "0")) (STMTSEQ (ASSIGN (IDENT "sum") (INTVAL "1"))))) "#,
        r#"(STMTSEQ (RETURN EMPTY)))"#,
    )
)]
#[case(
    "CASE i OF 1, 3..5 : sum := 0 | 2 : EXIT ELSE sum := 2 END",
    concat!(
        r#"(SWITCH (IDENT "i") (CASELIST "#,
        r#"(CASE (CLABELLIST (CLABELS (INTVAL "1") EMPTY) (CLABELS (INTVAL "3") (INTVAL "5"))) "#,
        r#"(STMTSEQ (ASSIGN (IDENT "sum") (INTVAL "0")))) "#,
        r#"(CASE (CLABELLIST (CLABELS (INTVAL "2") EMPTY)) (STMTSEQ (EXIT)))) "#,
        r#"(STMTSEQ (ASSIGN (IDENT "sum") (INTVAL "2"))))"#,
    )
)]
#[case(
    "WHILE i > 0 DO i := i - 1 END",
    r#"(WHILE (GT (IDENT "i") (INTVAL "0")) (STMTSEQ (ASSIGN (IDENT "i") (MINUS (IDENT "i") (INTVAL "1")))))"#
)]
#[case(
    "REPEAT i := i + 1 UNTIL i = 10",
    r#"(REPEAT (STMTSEQ (ASSIGN (IDENT "i") (PLUS (IDENT "i") (INTVAL "1")))) (EQ (IDENT "i") (INTVAL "10")))"#
)]
#[case("LOOP EXIT END", "(LOOP (STMTSEQ (EXIT)))")]
#[case(
    "WITH r DO f := 1 END",
    r#"(WITH (IDENT "r") (STMTSEQ (ASSIGN (IDENT "f") (INTVAL "1"))))"#
)]
#[case("RETURN x * 2", r#"(RETURN (ASTERISK (IDENT "x") (INTVAL "2")))"#)]
fn test_statement_shapes(#[case] body: &str, #[case] expected: &str) {
    let parsed = parse_body(body);
    let statements = parsed.statements();
    assert_eq!(statements, vec![expected.to_string()], "{:?}", parsed.codes());
}

#[rstest]
#[case(
    "x := a + b * c - d",
    r#"(ASSIGN (IDENT "x") (MINUS (PLUS (IDENT "a") (ASTERISK (IDENT "b") (IDENT "c"))) (IDENT "d")))"#
)]
#[case(
    "ok := NOT p OR (q AND r)",
    r#"(ASSIGN (IDENT "ok") (OR (NOT (IDENT "p")) (AND (IDENT "q") (IDENT "r"))))"#
)]
#[case("y := -a * b", r#"(ASSIGN (IDENT "y") (NEG (ASTERISK (IDENT "a") (IDENT "b"))))"#)]
#[case("y := +a", r#"(ASSIGN (IDENT "y") (IDENT "a"))"#)]
#[case("b := x IN s", r#"(ASSIGN (IDENT "b") (IN (IDENT "x") (IDENT "s")))"#)]
#[case("b := i # 0", r#"(ASSIGN (IDENT "b") (NEQ (IDENT "i") (INTVAL "0")))"#)]
#[case("b := i <= j", r#"(ASSIGN (IDENT "b") (LTEQ (IDENT "i") (IDENT "j")))"#)]
#[case(
    "q := n DIV 2 MOD 3",
    r#"(ASSIGN (IDENT "q") (MOD (DIV (IDENT "n") (INTVAL "2")) (INTVAL "3")))"#
)]
#[case("f := 1.5E3 / r", r#"(ASSIGN (IDENT "f") (SOLIDUS (REALVAL "1.5E3") (IDENT "r")))"#)]
#[case("n := Max(a, b)", r#"(ASSIGN (IDENT "n") (FCALL (IDENT "Max") (ARGS (IDENT "a") (IDENT "b"))))"#)]
#[case("n := Random()", r#"(ASSIGN (IDENT "n") (FCALL (IDENT "Random") EMPTY))"#)]
#[case("s := {}", r#"(ASSIGN (IDENT "s") (SETVAL EMPTY EMPTY))"#)]
#[case(
    "s := CharSet{'a'..'z', '_'}",
    r#"(ASSIGN (IDENT "s") (SETVAL (ELEMLIST (RANGE (QUOTEDVAL "'a'") (QUOTEDVAL "'z'")) (QUOTEDVAL "'_'")) (IDENT "CharSet")))"#
)]
fn test_expression_shapes(#[case] body: &str, #[case] expected: &str) {
    let parsed = parse_body(body);
    parsed.assert_clean();
    assert_eq!(parsed.statements(), vec![expected.to_string()]);
}

#[rstest]
#[case("r.f := 1", r#"(ASSIGN (QUALIDENT "r" "f") (INTVAL "1"))"#)]
#[case("p^ := 0", r#"(ASSIGN (DEREF (IDENT "p")) (INTVAL "0"))"#)]
#[case(
    "p^.next[i, j].val := 0",
    concat!(
        r#"(ASSIGN (FIELD (INDEX (FIELD (DEREF (IDENT "p")) (IDENT "next")) "#,
        r#"(ARGS (IDENT "i") (IDENT "j"))) (IDENT "val")) (INTVAL "0"))"#,
    )
)]
#[case("Lists.Append(l)", r#"(PCALL (QUALIDENT "Lists" "Append") (ARGS (IDENT "l")))"#)]
fn test_designator_shapes(#[case] body: &str, #[case] expected: &str) {
    let parsed = parse_body(body);
    parsed.assert_clean();
    assert_eq!(parsed.statements(), vec![expected.to_string()]);
}

#[test]
fn test_procedure_declaration_with_locals() {
    let parsed = parse_mod(
        "MODULE M;\nPROCEDURE Swap(VAR a, b : INTEGER);\nVAR t : INTEGER;\nBEGIN\n  t := a; a := b; b := t\nEND Swap;\nEND M.\n",
    );
    parsed.assert_clean();
    assert_eq!(parsed.count(AstNodeType::PROC), 1);
    assert_eq!(parsed.count(AstNodeType::ASSIGN), 3);
    assert!(parsed.module_text().contains(
        r#"(PROCDEF (IDENT "Swap") (FPARAMLIST (FPARAMS (IDENTLIST "a" "b") (VARP (IDENT "INTEGER")))) EMPTY)"#
    ));
}
