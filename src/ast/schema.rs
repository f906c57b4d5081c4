//! The syntax tree schema
//!
//! A static table that declares, for every node type, the shape of a legal
//! node: how many subnodes or values it holds and which node types may
//! appear at each subnode index. Constructors and mutators in
//! [`super::node`] consult it before building anything.

use super::node_type::AstNodeType::{self, *};

// =============================================================================
// NODE TYPE GROUPS
// =============================================================================

const TYPE_IDENT: &[AstNodeType] = &[IDENT, QUALIDENT];

const DESIGNATOR: &[AstNodeType] = &[IDENT, QUALIDENT, FIELD, INDEX, DEREF];

const EXPRESSION: &[AstNodeType] = &[
    IDENT, QUALIDENT, FIELD, INDEX, DEREF, NEG, NOT, EQ, NEQ, LT, LTEQ, GT, GTEQ, IN, PLUS, MINUS,
    OR, ASTERISK, SOLIDUS, DIV, MOD, AND, FCALL, SETVAL, INTVAL, REALVAL, CHRVAL, QUOTEDVAL,
];

const ELEMENT: &[AstNodeType] = &[
    IDENT, QUALIDENT, FIELD, INDEX, DEREF, NEG, NOT, EQ, NEQ, LT, LTEQ, GT, GTEQ, IN, PLUS, MINUS,
    OR, ASTERISK, SOLIDUS, DIV, MOD, AND, FCALL, SETVAL, INTVAL, REALVAL, CHRVAL, QUOTEDVAL, RANGE,
];

const TYPE: &[AstNodeType] = &[
    IDENT, QUALIDENT, SUBR, ENUM, SET, ARRAY, RECORD, EXTREC, VRNTREC, POINTER, PROCTYPE,
];

const TYPE_DECL_TAIL: &[AstNodeType] = &[
    IDENT, QUALIDENT, SUBR, ENUM, SET, ARRAY, RECORD, EXTREC, VRNTREC, POINTER, PROCTYPE, VSREC,
];

const COUNTABLE: &[AstNodeType] = &[IDENT, QUALIDENT, SUBR, ENUM];

const FORMAL_TYPE: &[AstNodeType] = &[IDENT, QUALIDENT, OPENARRAY, CONSTP, VARP];

const SIMPLE_FORMAL_TYPE: &[AstNodeType] = &[IDENT, QUALIDENT, OPENARRAY];

const MODULE: &[AstNodeType] = &[DEFMOD, IMPMOD, PGMMOD];

const IMPORT_KIND: &[AstNodeType] = &[IMPORT, UNQIMP];

const EXPORT_KIND: &[AstNodeType] = &[EXPORT, QUALEXP];

const DEFINITION: &[AstNodeType] = &[CONSTDEF, TYPEDEF, VARDECL, PROCDEF];

const DECLARATION: &[AstNodeType] = &[CONSTDEF, TYPEDECL, VARDECL, PROC, MODDECL];

const STATEMENT: &[AstNodeType] = &[
    ASSIGN, PCALL, RETURN, WITH, IF, SWITCH, LOOP, WHILE, REPEAT, FORTO, EXIT,
];

const VARIANT_FIELD_LIST: &[AstNodeType] = &[FIELDLIST, VFLIST];

// =============================================================================
// SHAPES
// =============================================================================

/// One subnode position of a branch node
#[derive(Debug, Clone, Copy)]
pub struct Slot {
    pub types: &'static [AstNodeType],
    /// An optional slot also accepts `EMPTY`
    pub optional: bool,
}

impl Slot {
    const fn req(types: &'static [AstNodeType]) -> Slot {
        Slot {
            types,
            optional: false,
        }
    }

    const fn opt(types: &'static [AstNodeType]) -> Slot {
        Slot {
            types,
            optional: true,
        }
    }

    pub fn accepts(&self, ty: AstNodeType) -> bool {
        (self.optional && ty == EMPTY) || self.types.contains(&ty)
    }
}

/// The legal shape of a node type
#[derive(Debug, Clone, Copy)]
pub enum Shape {
    Empty,
    /// Fixed arity, one slot per subnode
    Branch(&'static [Slot]),
    /// Open-ended, homogeneous subnodes
    List {
        min: usize,
        members: &'static [AstNodeType],
    },
    /// Exactly one value
    Terminal,
    /// Open-ended list of values
    TerminalList { min: usize },
}

macro_rules! branch {
    ($($slot:expr),* $(,)?) => {
        Shape::Branch(const { &[$($slot),*] })
    };
}

const EXPR: Slot = Slot::req(EXPRESSION);
const OPT_EXPR: Slot = Slot::opt(EXPRESSION);
const OPT_STMTSEQ: Slot = Slot::opt(&[STMTSEQ]);
const BINARY: Shape = branch![EXPR, EXPR];
const UNARY: Shape = branch![EXPR];

const fn list(members: &'static [AstNodeType]) -> Shape {
    Shape::List { min: 1, members }
}

/// The schema entry for a node type
pub fn shape(ty: AstNodeType) -> Shape {
    match ty {
        EMPTY => Shape::Empty,
        ROOT => branch![
            Slot::req(&[FILENAME]),
            Slot::req(&[OPTIONS]),
            Slot::req(MODULE),
        ],

        // Definition modules
        DEFMOD => branch![
            Slot::req(&[IDENT]),
            Slot::opt(&[IMPLIST]),
            Slot::opt(&[DEFLIST]),
        ],
        IMPLIST => list(IMPORT_KIND),
        IMPORT => branch![Slot::req(&[IDENTLIST])],
        UNQIMP => branch![Slot::req(&[IDENT]), Slot::req(&[IDENTLIST])],
        DEFLIST => list(DEFINITION),
        CONSTDEF => branch![Slot::req(&[IDENT]), EXPR],
        TYPEDEF => branch![Slot::req(&[IDENT]), Slot::opt(TYPE)],
        PROCDEF => branch![
            Slot::req(&[IDENT]),
            Slot::opt(&[FPARAMLIST]),
            Slot::opt(TYPE_IDENT),
        ],

        // Types
        SUBR => branch![EXPR, EXPR, Slot::opt(TYPE_IDENT)],
        ENUM => branch![Slot::req(&[IDENTLIST])],
        SET => branch![Slot::req(COUNTABLE)],
        ARRAY => branch![Slot::req(&[INDEXLIST]), Slot::req(TYPE)],
        RECORD => branch![Slot::opt(&[FIELDLISTSEQ])],
        POINTER => branch![Slot::req(TYPE)],
        PROCTYPE => branch![Slot::opt(&[FTYPELIST]), Slot::opt(TYPE_IDENT)],
        EXTREC => branch![Slot::req(TYPE_IDENT), Slot::opt(&[FIELDLISTSEQ])],
        VRNTREC => branch![Slot::opt(&[VFLISTSEQ])],
        INDEXLIST => list(COUNTABLE),

        // Records
        FIELDLISTSEQ => list(&[FIELDLIST]),
        FIELDLIST => branch![Slot::req(&[IDENTLIST]), Slot::req(TYPE)],
        VFLISTSEQ => list(VARIANT_FIELD_LIST),
        VFLIST => branch![
            Slot::opt(&[IDENT]),
            Slot::req(TYPE_IDENT),
            Slot::opt(&[VARIANTLIST]),
            Slot::opt(&[VFLISTSEQ]),
        ],
        VARIANTLIST => list(&[VARIANT]),
        VARIANT => branch![Slot::req(&[CLABELLIST]), Slot::opt(&[VFLISTSEQ])],
        CLABELLIST => list(&[CLABELS]),
        CLABELS => branch![EXPR, OPT_EXPR],

        // Formal parameters
        FTYPELIST => list(FORMAL_TYPE),
        OPENARRAY => branch![Slot::req(TYPE_IDENT)],
        CONSTP | VARP => branch![Slot::req(SIMPLE_FORMAL_TYPE)],
        FPARAMLIST => list(&[FPARAMS]),
        FPARAMS => branch![Slot::req(&[IDENTLIST]), Slot::req(FORMAL_TYPE)],

        // Implementation and program modules
        IMPMOD | PGMMOD => branch![
            Slot::req(&[IDENT]),
            OPT_EXPR,
            Slot::opt(&[IMPLIST]),
            Slot::req(&[BLOCK]),
        ],
        BLOCK => branch![Slot::opt(&[DECLLIST]), OPT_STMTSEQ],
        DECLLIST => list(DECLARATION),
        TYPEDECL => branch![Slot::req(&[IDENT]), Slot::req(TYPE_DECL_TAIL)],
        VARDECL => branch![Slot::req(&[IDENTLIST]), Slot::req(TYPE)],
        PROC => branch![Slot::req(&[PROCDEF]), Slot::req(&[BLOCK])],
        MODDECL => branch![
            Slot::req(&[IDENT]),
            OPT_EXPR,
            Slot::opt(&[IMPLIST]),
            Slot::opt(EXPORT_KIND),
            Slot::req(&[BLOCK]),
        ],
        VSREC => branch![Slot::opt(&[FIELDLISTSEQ]), Slot::req(&[VSFIELD])],
        VSFIELD => branch![
            Slot::req(&[IDENT]),
            Slot::req(&[IDENT]),
            Slot::req(TYPE_IDENT),
        ],
        EXPORT | QUALEXP => branch![Slot::req(&[IDENTLIST])],

        // Statements
        STMTSEQ => list(STATEMENT),
        ASSIGN => branch![Slot::req(DESIGNATOR), EXPR],
        PCALL => branch![Slot::req(DESIGNATOR), Slot::opt(&[ARGS])],
        RETURN => branch![OPT_EXPR],
        WITH => branch![Slot::req(DESIGNATOR), OPT_STMTSEQ],
        IF => branch![EXPR, OPT_STMTSEQ, Slot::opt(&[ELSIFSEQ]), OPT_STMTSEQ],
        SWITCH => branch![EXPR, Slot::opt(&[CASELIST]), OPT_STMTSEQ],
        LOOP => branch![OPT_STMTSEQ],
        WHILE => branch![EXPR, OPT_STMTSEQ],
        REPEAT => branch![OPT_STMTSEQ, EXPR],
        FORTO => branch![Slot::req(&[IDENT]), EXPR, EXPR, OPT_EXPR, OPT_STMTSEQ],
        EXIT => Shape::Branch(&[]),
        ARGS => list(EXPRESSION),
        ELSIFSEQ => list(&[ELSIF]),
        ELSIF => branch![EXPR, OPT_STMTSEQ],
        CASELIST => list(&[CASE]),
        CASE => branch![Slot::req(&[CLABELLIST]), OPT_STMTSEQ],
        ELEMLIST => list(ELEMENT),
        RANGE => BINARY,

        // Designators
        FIELD => branch![Slot::req(DESIGNATOR), Slot::req(&[IDENT])],
        INDEX => branch![Slot::req(DESIGNATOR), Slot::req(&[ARGS])],
        DEREF => branch![Slot::req(DESIGNATOR)],

        // Expressions
        NEG | NOT => UNARY,
        EQ | NEQ | LT | LTEQ | GT | GTEQ | IN | PLUS | MINUS | OR | ASTERISK | SOLIDUS | DIV
        | MOD | AND => BINARY,
        FCALL => branch![Slot::req(DESIGNATOR), Slot::opt(&[ARGS])],
        SETVAL => branch![Slot::opt(&[ELEMLIST]), Slot::opt(TYPE_IDENT)],

        // Terminals
        IDENT | INTVAL | REALVAL | CHRVAL | QUOTEDVAL | FILENAME => Shape::Terminal,
        QUALIDENT => Shape::TerminalList { min: 2 },
        IDENTLIST => Shape::TerminalList { min: 1 },
        OPTIONS => Shape::TerminalList { min: 0 },
    }
}

impl AstNodeType {
    /// Whether nodes of this type hold values rather than subnodes
    pub fn is_terminal(self) -> bool {
        matches!(shape(self), Shape::Terminal | Shape::TerminalList { .. })
    }

    /// Whether nodes of this type hold subnodes; `EMPTY` counts as one
    pub fn is_nonterminal(self) -> bool {
        !self.is_terminal()
    }

    /// Whether nodes of this type hold an open-ended list of subnodes
    pub fn is_list(self) -> bool {
        matches!(shape(self), Shape::List { .. })
    }

    /// Legal number of subnodes (or values), as `(min, max)`; `max` is `None`
    /// for open-ended types
    pub fn subnode_count_range(self) -> (usize, Option<usize>) {
        match shape(self) {
            Shape::Empty => (0, Some(0)),
            Shape::Branch(slots) => (slots.len(), Some(slots.len())),
            Shape::List { min, .. } | Shape::TerminalList { min } => (min, None),
            Shape::Terminal => (1, Some(1)),
        }
    }

    pub fn is_legal_subnode_count(self, count: usize) -> bool {
        let (min, max) = self.subnode_count_range();
        count >= min && max.is_none_or(|max| count <= max)
    }

    /// Whether `subnode` may appear at `index` in a node of this type
    pub fn is_legal_subnode_type(self, subnode: AstNodeType, index: usize) -> bool {
        match shape(self) {
            Shape::Branch(slots) => slots.get(index).is_some_and(|slot| slot.accepts(subnode)),
            Shape::List { members, .. } => members.contains(&subnode),
            Shape::Empty | Shape::Terminal | Shape::TerminalList { .. } => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_classification() {
        assert!(IDENT.is_terminal());
        assert!(QUALIDENT.is_terminal());
        assert!(!QUALIDENT.is_list());
        assert!(STMTSEQ.is_list());
        assert!(STMTSEQ.is_nonterminal());
        assert!(EMPTY.is_nonterminal());
    }

    #[test]
    fn test_count_ranges() {
        assert_eq!(DEFMOD.subnode_count_range(), (3, Some(3)));
        assert_eq!(EXIT.subnode_count_range(), (0, Some(0)));
        assert_eq!(QUALIDENT.subnode_count_range(), (2, None));
        assert_eq!(OPTIONS.subnode_count_range(), (0, None));
        assert!(IDENTLIST.is_legal_subnode_count(40));
        assert!(!IDENTLIST.is_legal_subnode_count(0));
        assert!(!IF.is_legal_subnode_count(3));
    }

    #[test]
    fn test_slot_rules() {
        assert!(DEFMOD.is_legal_subnode_type(IDENT, 0));
        assert!(!DEFMOD.is_legal_subnode_type(QUALIDENT, 0));
        assert!(DEFMOD.is_legal_subnode_type(EMPTY, 1));
        assert!(!DEFMOD.is_legal_subnode_type(EMPTY, 0));
        assert!(!DEFMOD.is_legal_subnode_type(IDENT, 3));
        assert!(STMTSEQ.is_legal_subnode_type(EXIT, 17));
        assert!(!STMTSEQ.is_legal_subnode_type(EMPTY, 0));
        assert!(TYPEDECL.is_legal_subnode_type(VSREC, 1));
        assert!(!TYPEDEF.is_legal_subnode_type(VSREC, 1));
        assert!(!IDENT.is_legal_subnode_type(IDENT, 0));
    }

    #[test]
    fn test_every_type_has_a_shape_consistent_with_classification() {
        for ty in AstNodeType::ALL.iter().copied() {
            let (min, max) = ty.subnode_count_range();
            assert!(max.is_none_or(|max| min <= max), "{ty}");
            if ty.is_list() {
                assert!(max.is_none(), "{ty}");
            }
        }
    }
}
