//! Parse helpers that collect diagnostics alongside the tree.

use m2front::diagnostics::CollectingSink;
use m2front::{
    AstNode, AstNodeType, Code, Diagnostic, Options, Parse, parse_definition_source,
    parse_implementation_source,
};

pub struct Parsed {
    pub parse: Parse,
    pub diagnostics: Vec<Diagnostic>,
}

impl Parsed {
    pub fn codes(&self) -> Vec<Code> {
        self.diagnostics.iter().map(|d| d.code).collect()
    }

    /// S-expression of the module node, or `EMPTY`
    pub fn module_text(&self) -> String {
        self.parse
            .module()
            .map(AstNode::to_string)
            .unwrap_or_else(|| "EMPTY".to_string())
    }

    pub fn count(&self, node_type: AstNodeType) -> usize {
        self.parse
            .root
            .walk()
            .filter(|n| n.node_type() == node_type)
            .count()
    }

    /// Top level statements of a program module body, rendered
    pub fn statements(&self) -> Vec<String> {
        self.parse
            .module()
            .and_then(|module| module.subnode(3))
            .and_then(|block| block.subnode(1))
            .map(|seq| seq.subnodes().iter().map(AstNode::to_string).collect())
            .unwrap_or_default()
    }

    pub fn assert_clean(&self) {
        assert!(
            self.diagnostics.is_empty(),
            "expected no diagnostics, got:\n{}",
            self.diagnostics
                .iter()
                .map(|d| format!("  {}", d))
                .collect::<Vec<_>>()
                .join("\n")
        );
        assert!(self.parse.ok());
    }
}

pub fn parse_def_with(text: &str, options: &Options) -> Parsed {
    let mut sink = CollectingSink::new();
    let parse = parse_definition_source("Test.def", text, options, &mut sink).unwrap();
    Parsed {
        parse,
        diagnostics: sink.into_diagnostics(),
    }
}

pub fn parse_mod_with(text: &str, options: &Options) -> Parsed {
    let mut sink = CollectingSink::new();
    let parse = parse_implementation_source("Test.mod", text, options, &mut sink).unwrap();
    Parsed {
        parse,
        diagnostics: sink.into_diagnostics(),
    }
}

pub fn parse_def(text: &str) -> Parsed {
    parse_def_with(text, &Options::default())
}

pub fn parse_mod(text: &str) -> Parsed {
    parse_mod_with(text, &Options::default())
}

/// Parse `body` as the statement part of a program module
pub fn parse_body(body: &str) -> Parsed {
    parse_mod(&format!("MODULE T;\nBEGIN\n{}\nEND T.\n", body))
}
