//! Syntax tree node types
//!
//! Declaration order groups the types: non-terminal types first, then the
//! terminal (identifier, literal and compilation parameter) types.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
#[allow(non_camel_case_types)]
pub enum AstNodeType {
    EMPTY = 0,
    ROOT,

    // =========================================================================
    // DEFINITION MODULE
    // =========================================================================
    DEFMOD,
    IMPLIST,
    IMPORT,
    UNQIMP,
    DEFLIST,

    CONSTDEF,
    TYPEDEF,
    PROCDEF,

    SUBR,
    ENUM,
    SET,
    ARRAY,
    RECORD,
    POINTER,
    PROCTYPE,

    EXTREC,
    VRNTREC,

    INDEXLIST,

    FIELDLISTSEQ,
    FIELDLIST,
    VFLISTSEQ,
    VFLIST,
    VARIANTLIST,
    VARIANT,
    CLABELLIST,
    CLABELS,

    FTYPELIST,
    OPENARRAY,
    CONSTP,
    VARP,
    FPARAMLIST,
    FPARAMS,

    // =========================================================================
    // IMPLEMENTATION AND PROGRAM MODULE
    // =========================================================================
    IMPMOD,
    PGMMOD,
    BLOCK,
    DECLLIST,

    TYPEDECL,
    VARDECL,
    PROC,
    MODDECL,

    VSREC,
    VSFIELD,

    EXPORT,
    QUALEXP,

    STMTSEQ,

    ASSIGN,
    PCALL,
    RETURN,
    WITH,
    IF,
    SWITCH,
    LOOP,
    WHILE,
    REPEAT,
    FORTO,
    EXIT,

    ARGS,

    ELSIFSEQ,
    ELSIF,
    CASELIST,
    CASE,
    ELEMLIST,
    RANGE,

    // Designator selectors
    FIELD,
    INDEX,
    DEREF,

    // =========================================================================
    // EXPRESSIONS
    // =========================================================================
    NEG,
    NOT,

    EQ,
    NEQ,
    LT,
    LTEQ,
    GT,
    GTEQ,
    IN,
    PLUS,
    MINUS,
    OR,
    ASTERISK,
    SOLIDUS,
    DIV,
    MOD,
    AND,

    FCALL,
    SETVAL,

    // =========================================================================
    // TERMINALS
    // =========================================================================
    IDENT,
    QUALIDENT,

    INTVAL,
    REALVAL,
    CHRVAL,
    QUOTEDVAL,

    IDENTLIST,

    FILENAME,
    OPTIONS,
}

impl AstNodeType {
    pub const ALL: &'static [AstNodeType] = &[
        Self::EMPTY,
        Self::ROOT,
        Self::DEFMOD,
        Self::IMPLIST,
        Self::IMPORT,
        Self::UNQIMP,
        Self::DEFLIST,
        Self::CONSTDEF,
        Self::TYPEDEF,
        Self::PROCDEF,
        Self::SUBR,
        Self::ENUM,
        Self::SET,
        Self::ARRAY,
        Self::RECORD,
        Self::POINTER,
        Self::PROCTYPE,
        Self::EXTREC,
        Self::VRNTREC,
        Self::INDEXLIST,
        Self::FIELDLISTSEQ,
        Self::FIELDLIST,
        Self::VFLISTSEQ,
        Self::VFLIST,
        Self::VARIANTLIST,
        Self::VARIANT,
        Self::CLABELLIST,
        Self::CLABELS,
        Self::FTYPELIST,
        Self::OPENARRAY,
        Self::CONSTP,
        Self::VARP,
        Self::FPARAMLIST,
        Self::FPARAMS,
        Self::IMPMOD,
        Self::PGMMOD,
        Self::BLOCK,
        Self::DECLLIST,
        Self::TYPEDECL,
        Self::VARDECL,
        Self::PROC,
        Self::MODDECL,
        Self::VSREC,
        Self::VSFIELD,
        Self::EXPORT,
        Self::QUALEXP,
        Self::STMTSEQ,
        Self::ASSIGN,
        Self::PCALL,
        Self::RETURN,
        Self::WITH,
        Self::IF,
        Self::SWITCH,
        Self::LOOP,
        Self::WHILE,
        Self::REPEAT,
        Self::FORTO,
        Self::EXIT,
        Self::ARGS,
        Self::ELSIFSEQ,
        Self::ELSIF,
        Self::CASELIST,
        Self::CASE,
        Self::ELEMLIST,
        Self::RANGE,
        Self::FIELD,
        Self::INDEX,
        Self::DEREF,
        Self::NEG,
        Self::NOT,
        Self::EQ,
        Self::NEQ,
        Self::LT,
        Self::LTEQ,
        Self::GT,
        Self::GTEQ,
        Self::IN,
        Self::PLUS,
        Self::MINUS,
        Self::OR,
        Self::ASTERISK,
        Self::SOLIDUS,
        Self::DIV,
        Self::MOD,
        Self::AND,
        Self::FCALL,
        Self::SETVAL,
        Self::IDENT,
        Self::QUALIDENT,
        Self::INTVAL,
        Self::REALVAL,
        Self::CHRVAL,
        Self::QUOTEDVAL,
        Self::IDENTLIST,
        Self::FILENAME,
        Self::OPTIONS,
    ];

    /// Look up a node type by its raw discriminant
    pub fn from_raw(raw: u8) -> Option<AstNodeType> {
        Self::ALL.get(raw as usize).copied()
    }

    /// Whether `raw` is the discriminant of a node type
    pub fn is_valid_raw(raw: u8) -> bool {
        Self::from_raw(raw).is_some()
    }

    /// Canonical display name, as used in tree dumps
    pub fn name(self) -> &'static str {
        match self {
            Self::EMPTY => "EMPTY",
            Self::ROOT => "ROOT",
            Self::DEFMOD => "DEFMOD",
            Self::IMPLIST => "IMPLIST",
            Self::IMPORT => "IMPORT",
            Self::UNQIMP => "UNQIMP",
            Self::DEFLIST => "DEFLIST",
            Self::CONSTDEF => "CONSTDEF",
            Self::TYPEDEF => "TYPEDEF",
            Self::PROCDEF => "PROCDEF",
            Self::SUBR => "SUBR",
            Self::ENUM => "ENUM",
            Self::SET => "SET",
            Self::ARRAY => "ARRAY",
            Self::RECORD => "RECORD",
            Self::POINTER => "POINTER",
            Self::PROCTYPE => "PROCTYPE",
            Self::EXTREC => "EXTREC",
            Self::VRNTREC => "VRNTREC",
            Self::INDEXLIST => "INDEXLIST",
            Self::FIELDLISTSEQ => "FIELDLISTSEQ",
            Self::FIELDLIST => "FIELDLIST",
            Self::VFLISTSEQ => "VFLISTSEQ",
            Self::VFLIST => "VFLIST",
            Self::VARIANTLIST => "VARIANTLIST",
            Self::VARIANT => "VARIANT",
            Self::CLABELLIST => "CLABELLIST",
            Self::CLABELS => "CLABELS",
            Self::FTYPELIST => "FTYPELIST",
            Self::OPENARRAY => "OPENARRAY",
            Self::CONSTP => "CONSTP",
            Self::VARP => "VARP",
            Self::FPARAMLIST => "FPARAMLIST",
            Self::FPARAMS => "FPARAMS",
            Self::IMPMOD => "IMPMOD",
            Self::PGMMOD => "PGMMOD",
            Self::BLOCK => "BLOCK",
            Self::DECLLIST => "DECLLIST",
            Self::TYPEDECL => "TYPEDECL",
            Self::VARDECL => "VARDECL",
            Self::PROC => "PROC",
            Self::MODDECL => "MODDECL",
            Self::VSREC => "VSREC",
            Self::VSFIELD => "VSFIELD",
            Self::EXPORT => "EXPORT",
            Self::QUALEXP => "QUALEXP",
            Self::STMTSEQ => "STMTSEQ",
            Self::ASSIGN => "ASSIGN",
            Self::PCALL => "PCALL",
            Self::RETURN => "RETURN",
            Self::WITH => "WITH",
            Self::IF => "IF",
            Self::SWITCH => "SWITCH",
            Self::LOOP => "LOOP",
            Self::WHILE => "WHILE",
            Self::REPEAT => "REPEAT",
            Self::FORTO => "FORTO",
            Self::EXIT => "EXIT",
            Self::ARGS => "ARGS",
            Self::ELSIFSEQ => "ELSIFSEQ",
            Self::ELSIF => "ELSIF",
            Self::CASELIST => "CASELIST",
            Self::CASE => "CASE",
            Self::ELEMLIST => "ELEMLIST",
            Self::RANGE => "RANGE",
            Self::FIELD => "FIELD",
            Self::INDEX => "INDEX",
            Self::DEREF => "DEREF",
            Self::NEG => "NEG",
            Self::NOT => "NOT",
            Self::EQ => "EQ",
            Self::NEQ => "NEQ",
            Self::LT => "LT",
            Self::LTEQ => "LTEQ",
            Self::GT => "GT",
            Self::GTEQ => "GTEQ",
            Self::IN => "IN",
            Self::PLUS => "PLUS",
            Self::MINUS => "MINUS",
            Self::OR => "OR",
            Self::ASTERISK => "ASTERISK",
            Self::SOLIDUS => "SOLIDUS",
            Self::DIV => "DIV",
            Self::MOD => "MOD",
            Self::AND => "AND",
            Self::FCALL => "FCALL",
            Self::SETVAL => "SETVAL",
            Self::IDENT => "IDENT",
            Self::QUALIDENT => "QUALIDENT",
            Self::INTVAL => "INTVAL",
            Self::REALVAL => "REALVAL",
            Self::CHRVAL => "CHRVAL",
            Self::QUOTEDVAL => "QUOTEDVAL",
            Self::IDENTLIST => "IDENTLIST",
            Self::FILENAME => "FILENAME",
            Self::OPTIONS => "OPTIONS",
        }
    }
}

impl fmt::Display for AstNodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_matches_discriminants() {
        for (index, ty) in AstNodeType::ALL.iter().enumerate() {
            assert_eq!(*ty as usize, index, "{ty} out of order");
            assert_eq!(AstNodeType::from_raw(index as u8), Some(*ty));
        }
        let past_end = AstNodeType::ALL.len() as u8;
        assert!(!AstNodeType::is_valid_raw(past_end));
    }
}
