//! Tree shapes produced for definition modules

use m2front::AstNodeType;
use rstest::rstest;

use crate::support::fixtures::{LISTS_DEF, SHAPES_PIM_DEF};
use crate::support::parse_helpers::parse_def;

#[test]
fn test_lists_definition_tree() {
    let parsed = parse_def(LISTS_DEF);
    parsed.assert_clean();
    assert_eq!(
        parsed.module_text(),
        concat!(
            r#"(DEFMOD (IDENT "Lists") "#,
            r#"(IMPLIST (IMPORT (IDENTLIST "Storage")) "#,
            r#"(UNQIMP (IDENT "SYSTEM") (IDENTLIST "ADDRESS" "WORD"))) "#,
            r#"(DEFLIST (CONSTDEF (IDENT "Max") (INTVAL "100")) "#,
            r#"(TYPEDEF (IDENT "List") EMPTY) "#,
            r#"(TYPEDEF (IDENT "Index") (SUBR (INTVAL "0") (IDENT "Max") EMPTY)) "#,
            r#"(VARDECL (IDENTLIST "head") (IDENT "List")) "#,
            r#"(PROCDEF (IDENT "Append") "#,
            r#"(FPARAMLIST (FPARAMS (IDENTLIST "l") (VARP (IDENT "List"))) "#,
            r#"(FPARAMS (IDENTLIST "x") (IDENT "INTEGER"))) "#,
            r#"(IDENT "BOOLEAN"))))"#,
        )
    );
}

#[test]
fn test_empty_definition_module() {
    let parsed = parse_def("DEFINITION MODULE Empty;\nEND Empty.\n");
    parsed.assert_clean();
    assert_eq!(parsed.module_text(), r#"(DEFMOD (IDENT "Empty") EMPTY EMPTY)"#);
}

#[rstest]
#[case("Color = (red, green, blue)", r#"(ENUM (IDENTLIST "red" "green" "blue"))"#)]
#[case("Bits = SET OF [0..15]", r#"(SET (SUBR (INTVAL "0") (INTVAL "15") EMPTY))"#)]
#[case("Small = INTEGER[0..9]", r#"(SUBR (INTVAL "0") (INTVAL "9") (IDENT "INTEGER"))"#)]
#[case("Ref = SYSTEM.ADDRESS", r#"(QUALIDENT "SYSTEM" "ADDRESS")"#)]
#[case("Ptr = POINTER TO Node", r#"(POINTER (IDENT "Node"))"#)]
#[case(
    "Grid = ARRAY Color, [1..3] OF REAL",
    r#"(ARRAY (INDEXLIST (IDENT "Color") (SUBR (INTVAL "1") (INTVAL "3") EMPTY)) (IDENT "REAL"))"#
)]
#[case(
    "Pred = PROCEDURE (INTEGER, VAR ARRAY OF CHAR) : BOOLEAN",
    r#"(PROCTYPE (FTYPELIST (IDENT "INTEGER") (VARP (OPENARRAY (IDENT "CHAR")))) (IDENT "BOOLEAN"))"#
)]
#[case("Thunk = PROCEDURE", "(PROCTYPE EMPTY EMPTY)")]
fn test_type_definitions(#[case] definition: &str, #[case] expected: &str) {
    let text = format!("DEFINITION MODULE T;\nTYPE {};\nEND T.\n", definition);
    let parsed = parse_def(&text);
    parsed.assert_clean();
    let module = parsed.parse.module().unwrap();
    let typedef = module.subnode(2).and_then(|defs| defs.subnode(0)).unwrap();
    assert_eq!(typedef.node_type(), AstNodeType::TYPEDEF);
    assert_eq!(typedef.subnode(1).unwrap().to_string(), expected);
}

#[test]
fn test_variant_record_under_pim() {
    let parsed = parse_def(SHAPES_PIM_DEF);
    parsed.assert_clean();
    let text = parsed.module_text();
    assert!(
        text.contains(r#"(TYPEDEF (IDENT "Point") (RECORD (FIELDLISTSEQ (FIELDLIST (IDENTLIST "x" "y") (IDENT "REAL")))))"#),
        "{}",
        text
    );
    assert!(
        text.contains(concat!(
            r#"(VRNTREC (VFLISTSEQ (FIELDLIST (IDENTLIST "x" "y") (IDENT "INTEGER")) "#,
            r#"(VFLIST (IDENT "kind") (IDENT "Kind") (VARIANTLIST "#,
            r#"(VARIANT (CLABELLIST (CLABELS (IDENT "circle") EMPTY)) "#,
            r#"(VFLISTSEQ (FIELDLIST (IDENTLIST "r") (IDENT "REAL")))) "#,
            r#"(VARIANT (CLABELLIST (CLABELS (IDENT "square") EMPTY)) "#,
            r#"(VFLISTSEQ (FIELDLIST (IDENTLIST "side") (IDENT "REAL"))))) EMPTY)))"#,
        )),
        "{}",
        text
    );
}

#[test]
fn test_multiple_sections_flatten_into_deflist() {
    let parsed = parse_def(
        "DEFINITION MODULE T;\nCONST a = 1; b = 'x';\nVAR p, q : CHAR; r : INTEGER;\nPROCEDURE Init;\nEND T.\n",
    );
    parsed.assert_clean();
    let module = parsed.parse.module().unwrap();
    let kinds: Vec<AstNodeType> = module
        .subnode(2)
        .unwrap()
        .subnodes()
        .iter()
        .map(|n| n.node_type())
        .collect();
    assert_eq!(
        kinds,
        vec![
            AstNodeType::CONSTDEF,
            AstNodeType::CONSTDEF,
            AstNodeType::VARDECL,
            AstNodeType::VARDECL,
            AstNodeType::PROCDEF,
        ]
    );
}
