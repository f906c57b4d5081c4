//! Grammar productions
//!
//! One [`Production`] per non-terminal of the grammar, with its FIRST and
//! FOLLOW sets. The parser consults FIRST to pick an alternative and FOLLOW
//! to resynchronize after a syntax error.
//!
//! Two options change the grammar. With const parameters enabled, `CONST` is
//! a formal parameter attribute, which widens some FIRST sets. With variant
//! records disabled, records are extensible and variable-size record types
//! become available, which changes FOLLOW for everything that can end a type.
//! [`ProductionContext`] carries those two switches; every other production
//! has the same sets in all contexts.

use super::token::Token;
use super::token_set::TokenSet;

/// The option switches that select between alternate FIRST/FOLLOW sets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProductionContext {
    pub const_parameters: bool,
    pub variant_records: bool,
}

impl Default for ProductionContext {
    /// PIM4 defaults
    fn default() -> Self {
        Self {
            const_parameters: false,
            variant_records: true,
        }
    }
}

impl ProductionContext {
    /// Every combination of the two switches
    pub const ALL: [ProductionContext; 4] = [
        ProductionContext {
            const_parameters: false,
            variant_records: false,
        },
        ProductionContext {
            const_parameters: false,
            variant_records: true,
        },
        ProductionContext {
            const_parameters: true,
            variant_records: false,
        },
        ProductionContext {
            const_parameters: true,
            variant_records: true,
        },
    ];
}

/// Non-terminals of the grammar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(non_camel_case_types)]
pub enum Production {
    // =========================================================================
    // MODULES AND IMPORTS
    // =========================================================================
    /// `DEFINITION MODULE Ident ; import* definition* END Ident .`
    DEFINITION_MODULE,
    IMPORT,
    QUALIFIED_IMPORT,
    UNQUALIFIED_IMPORT,
    IDENT_LIST,
    DEFINITION,
    CONST_DEFINITION,
    TYPE_DEFINITION,

    // =========================================================================
    // TYPES
    // =========================================================================
    /// Any type constructor
    TYPE,
    DERIVED_OR_SUBRANGE_TYPE,
    QUALIDENT,
    RANGE,
    ENUM_TYPE,
    SET_TYPE,
    COUNTABLE_TYPE,
    ARRAY_TYPE,
    /// `RECORD ( ( qualident ) )? fieldListSequence END`
    EXTENSIBLE_RECORD_TYPE,
    FIELD_LIST_SEQUENCE,
    FIELD_LIST,
    /// `RECORD variantFieldListSeq END`
    VARIANT_RECORD_TYPE,
    VARIANT_FIELD_LIST_SEQ,
    VARIANT_FIELD_LIST,
    VARIANT_FIELDS,
    VARIANT,
    CASE_LABEL_LIST,
    CASE_LABELS,
    POINTER_TYPE,
    PROCEDURE_TYPE,
    FORMAL_TYPE,
    SIMPLE_FORMAL_TYPE,
    ATTRIBUTED_FORMAL_TYPE,
    PROCEDURE_HEADER,
    PROCEDURE_SIGNATURE,
    FORMAL_PARAM_LIST,
    FORMAL_PARAMS,
    SIMPLE_FORMAL_PARAMS,
    ATTRIB_FORMAL_PARAMS,

    // =========================================================================
    // IMPLEMENTATION AND PROGRAM MODULES
    // =========================================================================
    /// `IMPLEMENTATION programModule`
    IMPLEMENTATION_MODULE,
    /// `MODULE Ident modulePriority? ; import* block Ident .`
    PROGRAM_MODULE,
    MODULE_PRIORITY,
    BLOCK,
    DECLARATION,
    TYPE_DECLARATION,
    TYPE_DECLARATION_TAIL,
    /// `VAR RECORD fieldListSequence IN Ident : ARRAY Ident OF qualident END`
    VAR_SIZE_RECORD_TYPE,
    VARIABLE_DECLARATION,
    PROCEDURE_DECLARATION,
    MODULE_DECLARATION,
    EXPORT,

    // =========================================================================
    // STATEMENTS
    // =========================================================================
    STATEMENT_SEQUENCE,
    /// Any statement, including `EXIT`
    STATEMENT,
    ASSIGNMENT_OR_PROC_CALL,
    ACTUAL_PARAMETERS,
    EXPRESSION_LIST,
    RETURN_STATEMENT,
    WITH_STATEMENT,
    IF_STATEMENT,
    CASE_STATEMENT,
    CASE,
    LOOP_STATEMENT,
    WHILE_STATEMENT,
    REPEAT_STATEMENT,
    FOR_STATEMENT,

    // =========================================================================
    // EXPRESSIONS
    // =========================================================================
    DESIGNATOR,
    SELECTOR,
    EXPRESSION,
    SIMPLE_EXPRESSION,
    TERM,
    SIMPLE_TERM,
    FACTOR,
    /// A designator in an expression, possibly a call or a typed set value
    DESIGNATOR_OR_FUNC_CALL,
    SET_VALUE,
    ELEMENT,
}

impl Production {
    pub const ALL: [Production; 73] = [
        Production::DEFINITION_MODULE,
        Production::IMPORT,
        Production::QUALIFIED_IMPORT,
        Production::UNQUALIFIED_IMPORT,
        Production::IDENT_LIST,
        Production::DEFINITION,
        Production::CONST_DEFINITION,
        Production::TYPE_DEFINITION,
        Production::TYPE,
        Production::DERIVED_OR_SUBRANGE_TYPE,
        Production::QUALIDENT,
        Production::RANGE,
        Production::ENUM_TYPE,
        Production::SET_TYPE,
        Production::COUNTABLE_TYPE,
        Production::ARRAY_TYPE,
        Production::EXTENSIBLE_RECORD_TYPE,
        Production::FIELD_LIST_SEQUENCE,
        Production::FIELD_LIST,
        Production::VARIANT_RECORD_TYPE,
        Production::VARIANT_FIELD_LIST_SEQ,
        Production::VARIANT_FIELD_LIST,
        Production::VARIANT_FIELDS,
        Production::VARIANT,
        Production::CASE_LABEL_LIST,
        Production::CASE_LABELS,
        Production::POINTER_TYPE,
        Production::PROCEDURE_TYPE,
        Production::FORMAL_TYPE,
        Production::SIMPLE_FORMAL_TYPE,
        Production::ATTRIBUTED_FORMAL_TYPE,
        Production::PROCEDURE_HEADER,
        Production::PROCEDURE_SIGNATURE,
        Production::FORMAL_PARAM_LIST,
        Production::FORMAL_PARAMS,
        Production::SIMPLE_FORMAL_PARAMS,
        Production::ATTRIB_FORMAL_PARAMS,
        Production::IMPLEMENTATION_MODULE,
        Production::PROGRAM_MODULE,
        Production::MODULE_PRIORITY,
        Production::BLOCK,
        Production::DECLARATION,
        Production::TYPE_DECLARATION,
        Production::TYPE_DECLARATION_TAIL,
        Production::VAR_SIZE_RECORD_TYPE,
        Production::VARIABLE_DECLARATION,
        Production::PROCEDURE_DECLARATION,
        Production::MODULE_DECLARATION,
        Production::EXPORT,
        Production::STATEMENT_SEQUENCE,
        Production::STATEMENT,
        Production::ASSIGNMENT_OR_PROC_CALL,
        Production::ACTUAL_PARAMETERS,
        Production::EXPRESSION_LIST,
        Production::RETURN_STATEMENT,
        Production::WITH_STATEMENT,
        Production::IF_STATEMENT,
        Production::CASE_STATEMENT,
        Production::CASE,
        Production::LOOP_STATEMENT,
        Production::WHILE_STATEMENT,
        Production::REPEAT_STATEMENT,
        Production::FOR_STATEMENT,
        Production::DESIGNATOR,
        Production::SELECTOR,
        Production::EXPRESSION,
        Production::SIMPLE_EXPRESSION,
        Production::TERM,
        Production::SIMPLE_TERM,
        Production::FACTOR,
        Production::DESIGNATOR_OR_FUNC_CALL,
        Production::SET_VALUE,
        Production::ELEMENT,
    ];

    /// The rule name as written in the grammar
    pub fn name(self) -> &'static str {
        match self {
            Self::DEFINITION_MODULE => "definitionModule",
            Self::IMPORT => "import",
            Self::QUALIFIED_IMPORT => "qualifiedImport",
            Self::UNQUALIFIED_IMPORT => "unqualifiedImport",
            Self::IDENT_LIST => "identList",
            Self::DEFINITION => "definition",
            Self::CONST_DEFINITION => "constDefinition",
            Self::TYPE_DEFINITION => "typeDefinition",
            Self::TYPE => "type",
            Self::DERIVED_OR_SUBRANGE_TYPE => "derivedOrSubrangeType",
            Self::QUALIDENT => "qualident",
            Self::RANGE => "range",
            Self::ENUM_TYPE => "enumType",
            Self::SET_TYPE => "setType",
            Self::COUNTABLE_TYPE => "countableType",
            Self::ARRAY_TYPE => "arrayType",
            Self::EXTENSIBLE_RECORD_TYPE => "extensibleRecordType",
            Self::FIELD_LIST_SEQUENCE => "fieldListSequence",
            Self::FIELD_LIST => "fieldList",
            Self::VARIANT_RECORD_TYPE => "variantRecordType",
            Self::VARIANT_FIELD_LIST_SEQ => "variantFieldListSeq",
            Self::VARIANT_FIELD_LIST => "variantFieldList",
            Self::VARIANT_FIELDS => "variantFields",
            Self::VARIANT => "variant",
            Self::CASE_LABEL_LIST => "caseLabelList",
            Self::CASE_LABELS => "caseLabels",
            Self::POINTER_TYPE => "pointerType",
            Self::PROCEDURE_TYPE => "procedureType",
            Self::FORMAL_TYPE => "formalType",
            Self::SIMPLE_FORMAL_TYPE => "simpleFormalType",
            Self::ATTRIBUTED_FORMAL_TYPE => "attributedFormalType",
            Self::PROCEDURE_HEADER => "procedureHeader",
            Self::PROCEDURE_SIGNATURE => "procedureSignature",
            Self::FORMAL_PARAM_LIST => "formalParamList",
            Self::FORMAL_PARAMS => "formalParams",
            Self::SIMPLE_FORMAL_PARAMS => "simpleFormalParams",
            Self::ATTRIB_FORMAL_PARAMS => "attribFormalParams",
            Self::IMPLEMENTATION_MODULE => "implementationModule",
            Self::PROGRAM_MODULE => "programModule",
            Self::MODULE_PRIORITY => "modulePriority",
            Self::BLOCK => "block",
            Self::DECLARATION => "declaration",
            Self::TYPE_DECLARATION => "typeDeclaration",
            Self::TYPE_DECLARATION_TAIL => "typeDeclarationTail",
            Self::VAR_SIZE_RECORD_TYPE => "varSizeRecordType",
            Self::VARIABLE_DECLARATION => "variableDeclaration",
            Self::PROCEDURE_DECLARATION => "procedureDeclaration",
            Self::MODULE_DECLARATION => "moduleDeclaration",
            Self::EXPORT => "export",
            Self::STATEMENT_SEQUENCE => "statementSequence",
            Self::STATEMENT => "statement",
            Self::ASSIGNMENT_OR_PROC_CALL => "assignmentOrProcCall",
            Self::ACTUAL_PARAMETERS => "actualParameters",
            Self::EXPRESSION_LIST => "expressionList",
            Self::RETURN_STATEMENT => "returnStatement",
            Self::WITH_STATEMENT => "withStatement",
            Self::IF_STATEMENT => "ifStatement",
            Self::CASE_STATEMENT => "caseStatement",
            Self::CASE => "case",
            Self::LOOP_STATEMENT => "loopStatement",
            Self::WHILE_STATEMENT => "whileStatement",
            Self::REPEAT_STATEMENT => "repeatStatement",
            Self::FOR_STATEMENT => "forStatement",
            Self::DESIGNATOR => "designator",
            Self::SELECTOR => "selector",
            Self::EXPRESSION => "expression",
            Self::SIMPLE_EXPRESSION => "simpleExpression",
            Self::TERM => "term",
            Self::SIMPLE_TERM => "simpleTerm",
            Self::FACTOR => "factor",
            Self::DESIGNATOR_OR_FUNC_CALL => "designatorOrFuncCall",
            Self::SET_VALUE => "setValue",
            Self::ELEMENT => "element",
        }
    }

    /// Check if FIRST or FOLLOW depends on the const-parameter switch
    pub fn is_const_param_dependent(self) -> bool {
        matches!(
            self,
            Self::FORMAL_TYPE
                | Self::ATTRIBUTED_FORMAL_TYPE
                | Self::FORMAL_PARAM_LIST
                | Self::FORMAL_PARAMS
                | Self::ATTRIB_FORMAL_PARAMS
        )
    }

    /// Check if FIRST or FOLLOW depends on the variant-record switch
    pub fn is_variant_record_dependent(self) -> bool {
        matches!(
            self,
            Self::TYPE
                | Self::DERIVED_OR_SUBRANGE_TYPE
                | Self::RANGE
                | Self::ENUM_TYPE
                | Self::SET_TYPE
                | Self::COUNTABLE_TYPE
                | Self::ARRAY_TYPE
                | Self::FIELD_LIST
                | Self::POINTER_TYPE
                | Self::PROCEDURE_TYPE
                | Self::TYPE_DECLARATION_TAIL
        )
    }

    pub fn is_option_dependent(self) -> bool {
        self.is_const_param_dependent() || self.is_variant_record_dependent()
    }

    /// FIRST set of this production under `ctx`
    pub fn first(self, ctx: ProductionContext) -> TokenSet {
        match self {
            Self::DEFINITION_MODULE => FIRST_DEFINITION_MODULE,
            Self::IMPORT => FIRST_IMPORT,
            Self::QUALIFIED_IMPORT => FIRST_QUALIFIED_IMPORT,
            Self::UNQUALIFIED_IMPORT => FIRST_UNQUALIFIED_IMPORT,
            Self::IDENT_LIST => FIRST_IDENT_LIST,
            Self::DEFINITION => FIRST_DEFINITION,
            Self::CONST_DEFINITION => FIRST_CONST_DEFINITION,
            Self::TYPE_DEFINITION => FIRST_TYPE_DEFINITION,
            Self::TYPE => FIRST_TYPE,
            Self::DERIVED_OR_SUBRANGE_TYPE => FIRST_DERIVED_OR_SUBRANGE_TYPE,
            Self::QUALIDENT => FIRST_QUALIDENT,
            Self::RANGE => FIRST_RANGE,
            Self::ENUM_TYPE => FIRST_ENUM_TYPE,
            Self::SET_TYPE => FIRST_SET_TYPE,
            Self::COUNTABLE_TYPE => FIRST_COUNTABLE_TYPE,
            Self::ARRAY_TYPE => FIRST_ARRAY_TYPE,
            Self::EXTENSIBLE_RECORD_TYPE => FIRST_EXTENSIBLE_RECORD_TYPE,
            Self::FIELD_LIST_SEQUENCE => FIRST_FIELD_LIST_SEQUENCE,
            Self::FIELD_LIST => FIRST_FIELD_LIST,
            Self::VARIANT_RECORD_TYPE => FIRST_VARIANT_RECORD_TYPE,
            Self::VARIANT_FIELD_LIST_SEQ => FIRST_VARIANT_FIELD_LIST_SEQ,
            Self::VARIANT_FIELD_LIST => FIRST_VARIANT_FIELD_LIST,
            Self::VARIANT_FIELDS => FIRST_VARIANT_FIELDS,
            Self::VARIANT => FIRST_VARIANT,
            Self::CASE_LABEL_LIST => FIRST_CASE_LABEL_LIST,
            Self::CASE_LABELS => FIRST_CASE_LABELS,
            Self::POINTER_TYPE => FIRST_POINTER_TYPE,
            Self::PROCEDURE_TYPE => FIRST_PROCEDURE_TYPE,
            Self::FORMAL_TYPE if ctx.const_parameters => FIRST_FORMAL_TYPE_CONST_PARAMS,
            Self::FORMAL_TYPE => FIRST_FORMAL_TYPE,
            Self::SIMPLE_FORMAL_TYPE => FIRST_SIMPLE_FORMAL_TYPE,
            Self::ATTRIBUTED_FORMAL_TYPE if ctx.const_parameters => {
                FIRST_ATTRIBUTED_FORMAL_TYPE_CONST_PARAMS
            }
            Self::ATTRIBUTED_FORMAL_TYPE => FIRST_ATTRIBUTED_FORMAL_TYPE,
            Self::PROCEDURE_HEADER => FIRST_PROCEDURE_HEADER,
            Self::PROCEDURE_SIGNATURE => FIRST_PROCEDURE_SIGNATURE,
            Self::FORMAL_PARAM_LIST if ctx.const_parameters => FIRST_FORMAL_PARAM_LIST_CONST_PARAMS,
            Self::FORMAL_PARAM_LIST => FIRST_FORMAL_PARAM_LIST,
            Self::FORMAL_PARAMS if ctx.const_parameters => FIRST_FORMAL_PARAMS_CONST_PARAMS,
            Self::FORMAL_PARAMS => FIRST_FORMAL_PARAMS,
            Self::SIMPLE_FORMAL_PARAMS => FIRST_SIMPLE_FORMAL_PARAMS,
            Self::ATTRIB_FORMAL_PARAMS if ctx.const_parameters => {
                FIRST_ATTRIB_FORMAL_PARAMS_CONST_PARAMS
            }
            Self::ATTRIB_FORMAL_PARAMS => FIRST_ATTRIB_FORMAL_PARAMS,
            Self::IMPLEMENTATION_MODULE => FIRST_IMPLEMENTATION_MODULE,
            Self::PROGRAM_MODULE => FIRST_PROGRAM_MODULE,
            Self::MODULE_PRIORITY => FIRST_MODULE_PRIORITY,
            Self::BLOCK => FIRST_BLOCK,
            Self::DECLARATION => FIRST_DECLARATION,
            Self::TYPE_DECLARATION => FIRST_TYPE_DECLARATION,
            Self::TYPE_DECLARATION_TAIL if !ctx.variant_records => {
                FIRST_TYPE_DECLARATION_TAIL_EXTENSIBLE_RECORDS
            }
            Self::TYPE_DECLARATION_TAIL => FIRST_TYPE_DECLARATION_TAIL,
            Self::VAR_SIZE_RECORD_TYPE => FIRST_VAR_SIZE_RECORD_TYPE,
            Self::VARIABLE_DECLARATION => FIRST_VARIABLE_DECLARATION,
            Self::PROCEDURE_DECLARATION => FIRST_PROCEDURE_DECLARATION,
            Self::MODULE_DECLARATION => FIRST_MODULE_DECLARATION,
            Self::EXPORT => FIRST_EXPORT,
            Self::STATEMENT_SEQUENCE => FIRST_STATEMENT_SEQUENCE,
            Self::STATEMENT => FIRST_STATEMENT,
            Self::ASSIGNMENT_OR_PROC_CALL => FIRST_ASSIGNMENT_OR_PROC_CALL,
            Self::ACTUAL_PARAMETERS => FIRST_ACTUAL_PARAMETERS,
            Self::EXPRESSION_LIST => FIRST_EXPRESSION_LIST,
            Self::RETURN_STATEMENT => FIRST_RETURN_STATEMENT,
            Self::WITH_STATEMENT => FIRST_WITH_STATEMENT,
            Self::IF_STATEMENT => FIRST_IF_STATEMENT,
            Self::CASE_STATEMENT => FIRST_CASE_STATEMENT,
            Self::CASE => FIRST_CASE,
            Self::LOOP_STATEMENT => FIRST_LOOP_STATEMENT,
            Self::WHILE_STATEMENT => FIRST_WHILE_STATEMENT,
            Self::REPEAT_STATEMENT => FIRST_REPEAT_STATEMENT,
            Self::FOR_STATEMENT => FIRST_FOR_STATEMENT,
            Self::DESIGNATOR => FIRST_DESIGNATOR,
            Self::SELECTOR => FIRST_SELECTOR,
            Self::EXPRESSION => FIRST_EXPRESSION,
            Self::SIMPLE_EXPRESSION => FIRST_SIMPLE_EXPRESSION,
            Self::TERM => FIRST_TERM,
            Self::SIMPLE_TERM => FIRST_SIMPLE_TERM,
            Self::FACTOR => FIRST_FACTOR,
            Self::DESIGNATOR_OR_FUNC_CALL => FIRST_DESIGNATOR_OR_FUNC_CALL,
            Self::SET_VALUE => FIRST_SET_VALUE,
            Self::ELEMENT => FIRST_ELEMENT,
        }
    }

    /// FOLLOW set of this production under `ctx`
    pub fn follow(self, ctx: ProductionContext) -> TokenSet {
        match self {
            Self::DEFINITION_MODULE => FOLLOW_DEFINITION_MODULE,
            Self::IMPORT => FOLLOW_IMPORT,
            Self::QUALIFIED_IMPORT => FOLLOW_QUALIFIED_IMPORT,
            Self::UNQUALIFIED_IMPORT => FOLLOW_UNQUALIFIED_IMPORT,
            Self::IDENT_LIST => FOLLOW_IDENT_LIST,
            Self::DEFINITION => FOLLOW_DEFINITION,
            Self::CONST_DEFINITION => FOLLOW_CONST_DEFINITION,
            Self::TYPE_DEFINITION => FOLLOW_TYPE_DEFINITION,
            Self::TYPE if !ctx.variant_records => FOLLOW_TYPE_EXTENSIBLE_RECORDS,
            Self::TYPE => FOLLOW_TYPE,
            Self::DERIVED_OR_SUBRANGE_TYPE if !ctx.variant_records => {
                FOLLOW_DERIVED_OR_SUBRANGE_TYPE_EXTENSIBLE_RECORDS
            }
            Self::DERIVED_OR_SUBRANGE_TYPE => FOLLOW_DERIVED_OR_SUBRANGE_TYPE,
            Self::QUALIDENT => FOLLOW_QUALIDENT,
            Self::RANGE if !ctx.variant_records => FOLLOW_RANGE_EXTENSIBLE_RECORDS,
            Self::RANGE => FOLLOW_RANGE,
            Self::ENUM_TYPE if !ctx.variant_records => FOLLOW_ENUM_TYPE_EXTENSIBLE_RECORDS,
            Self::ENUM_TYPE => FOLLOW_ENUM_TYPE,
            Self::SET_TYPE if !ctx.variant_records => FOLLOW_SET_TYPE_EXTENSIBLE_RECORDS,
            Self::SET_TYPE => FOLLOW_SET_TYPE,
            Self::COUNTABLE_TYPE if !ctx.variant_records => {
                FOLLOW_COUNTABLE_TYPE_EXTENSIBLE_RECORDS
            }
            Self::COUNTABLE_TYPE => FOLLOW_COUNTABLE_TYPE,
            Self::ARRAY_TYPE if !ctx.variant_records => FOLLOW_ARRAY_TYPE_EXTENSIBLE_RECORDS,
            Self::ARRAY_TYPE => FOLLOW_ARRAY_TYPE,
            Self::EXTENSIBLE_RECORD_TYPE => FOLLOW_EXTENSIBLE_RECORD_TYPE,
            Self::FIELD_LIST_SEQUENCE => FOLLOW_FIELD_LIST_SEQUENCE,
            Self::FIELD_LIST if !ctx.variant_records => FOLLOW_FIELD_LIST_EXTENSIBLE_RECORDS,
            Self::FIELD_LIST => FOLLOW_FIELD_LIST,
            Self::VARIANT_RECORD_TYPE => FOLLOW_VARIANT_RECORD_TYPE,
            Self::VARIANT_FIELD_LIST_SEQ => FOLLOW_VARIANT_FIELD_LIST_SEQ,
            Self::VARIANT_FIELD_LIST => FOLLOW_VARIANT_FIELD_LIST,
            Self::VARIANT_FIELDS => FOLLOW_VARIANT_FIELDS,
            Self::VARIANT => FOLLOW_VARIANT,
            Self::CASE_LABEL_LIST => FOLLOW_CASE_LABEL_LIST,
            Self::CASE_LABELS => FOLLOW_CASE_LABELS,
            Self::POINTER_TYPE if !ctx.variant_records => FOLLOW_POINTER_TYPE_EXTENSIBLE_RECORDS,
            Self::POINTER_TYPE => FOLLOW_POINTER_TYPE,
            Self::PROCEDURE_TYPE if !ctx.variant_records => {
                FOLLOW_PROCEDURE_TYPE_EXTENSIBLE_RECORDS
            }
            Self::PROCEDURE_TYPE => FOLLOW_PROCEDURE_TYPE,
            Self::FORMAL_TYPE => FOLLOW_FORMAL_TYPE,
            Self::SIMPLE_FORMAL_TYPE => FOLLOW_SIMPLE_FORMAL_TYPE,
            Self::ATTRIBUTED_FORMAL_TYPE => FOLLOW_ATTRIBUTED_FORMAL_TYPE,
            Self::PROCEDURE_HEADER => FOLLOW_PROCEDURE_HEADER,
            Self::PROCEDURE_SIGNATURE => FOLLOW_PROCEDURE_SIGNATURE,
            Self::FORMAL_PARAM_LIST => FOLLOW_FORMAL_PARAM_LIST,
            Self::FORMAL_PARAMS => FOLLOW_FORMAL_PARAMS,
            Self::SIMPLE_FORMAL_PARAMS => FOLLOW_SIMPLE_FORMAL_PARAMS,
            Self::ATTRIB_FORMAL_PARAMS => FOLLOW_ATTRIB_FORMAL_PARAMS,
            Self::IMPLEMENTATION_MODULE => FOLLOW_IMPLEMENTATION_MODULE,
            Self::PROGRAM_MODULE => FOLLOW_PROGRAM_MODULE,
            Self::MODULE_PRIORITY => FOLLOW_MODULE_PRIORITY,
            Self::BLOCK => FOLLOW_BLOCK,
            Self::DECLARATION => FOLLOW_DECLARATION,
            Self::TYPE_DECLARATION => FOLLOW_TYPE_DECLARATION,
            Self::TYPE_DECLARATION_TAIL => FOLLOW_TYPE_DECLARATION_TAIL,
            Self::VAR_SIZE_RECORD_TYPE => FOLLOW_VAR_SIZE_RECORD_TYPE,
            Self::VARIABLE_DECLARATION => FOLLOW_VARIABLE_DECLARATION,
            Self::PROCEDURE_DECLARATION => FOLLOW_PROCEDURE_DECLARATION,
            Self::MODULE_DECLARATION => FOLLOW_MODULE_DECLARATION,
            Self::EXPORT => FOLLOW_EXPORT,
            Self::STATEMENT_SEQUENCE => FOLLOW_STATEMENT_SEQUENCE,
            Self::STATEMENT => FOLLOW_STATEMENT,
            Self::ASSIGNMENT_OR_PROC_CALL => FOLLOW_ASSIGNMENT_OR_PROC_CALL,
            Self::ACTUAL_PARAMETERS => FOLLOW_ACTUAL_PARAMETERS,
            Self::EXPRESSION_LIST => FOLLOW_EXPRESSION_LIST,
            Self::RETURN_STATEMENT => FOLLOW_RETURN_STATEMENT,
            Self::WITH_STATEMENT => FOLLOW_WITH_STATEMENT,
            Self::IF_STATEMENT => FOLLOW_IF_STATEMENT,
            Self::CASE_STATEMENT => FOLLOW_CASE_STATEMENT,
            Self::CASE => FOLLOW_CASE,
            Self::LOOP_STATEMENT => FOLLOW_LOOP_STATEMENT,
            Self::WHILE_STATEMENT => FOLLOW_WHILE_STATEMENT,
            Self::REPEAT_STATEMENT => FOLLOW_REPEAT_STATEMENT,
            Self::FOR_STATEMENT => FOLLOW_FOR_STATEMENT,
            Self::DESIGNATOR => FOLLOW_DESIGNATOR,
            Self::SELECTOR => FOLLOW_SELECTOR,
            Self::EXPRESSION => FOLLOW_EXPRESSION,
            Self::SIMPLE_EXPRESSION => FOLLOW_SIMPLE_EXPRESSION,
            Self::TERM => FOLLOW_TERM,
            Self::SIMPLE_TERM => FOLLOW_SIMPLE_TERM,
            Self::FACTOR => FOLLOW_FACTOR,
            Self::DESIGNATOR_OR_FUNC_CALL => FOLLOW_DESIGNATOR_OR_FUNC_CALL,
            Self::SET_VALUE => FOLLOW_SET_VALUE,
            Self::ELEMENT => FOLLOW_ELEMENT,
        }
    }
}

// =============================================================================
// FIRST SETS
// =============================================================================

const FIRST_DEFINITION_MODULE: TokenSet = TokenSet::new(&[Token::DEFINITION_KW]);

const FIRST_IMPORT: TokenSet = TokenSet::new(&[Token::FROM_KW, Token::IMPORT_KW]);

const FIRST_QUALIFIED_IMPORT: TokenSet = TokenSet::new(&[Token::IMPORT_KW]);

const FIRST_UNQUALIFIED_IMPORT: TokenSet = TokenSet::new(&[Token::FROM_KW]);

const FIRST_IDENT_LIST: TokenSet = FIRST_QUALIDENT;

const FIRST_DEFINITION: TokenSet = TokenSet::new(&[
    Token::CONST_KW,
    Token::PROCEDURE_KW,
    Token::TYPE_KW,
    Token::VAR_KW,
]);

const FIRST_CONST_DEFINITION: TokenSet = FIRST_QUALIDENT;

const FIRST_TYPE_DEFINITION: TokenSet = FIRST_QUALIDENT;

const FIRST_TYPE: TokenSet = TokenSet::new(&[
    Token::ARRAY_KW,
    Token::POINTER_KW,
    Token::PROCEDURE_KW,
    Token::RECORD_KW,
    Token::SET_KW,
    Token::IDENT,
    Token::L_PAREN,
    Token::L_BRACKET,
]);

const FIRST_DERIVED_OR_SUBRANGE_TYPE: TokenSet = TokenSet::new(&[Token::IDENT, Token::L_BRACKET]);

const FIRST_QUALIDENT: TokenSet = TokenSet::new(&[Token::IDENT]);

const FIRST_RANGE: TokenSet = TokenSet::new(&[Token::L_BRACKET]);

const FIRST_ENUM_TYPE: TokenSet = TokenSet::new(&[Token::L_PAREN]);

const FIRST_SET_TYPE: TokenSet = TokenSet::new(&[Token::SET_KW]);

const FIRST_COUNTABLE_TYPE: TokenSet = TokenSet::new(&[
    Token::IDENT,
    Token::L_PAREN,
    Token::L_BRACKET,
]);

const FIRST_ARRAY_TYPE: TokenSet = TokenSet::new(&[Token::ARRAY_KW]);

const FIRST_EXTENSIBLE_RECORD_TYPE: TokenSet = TokenSet::new(&[Token::RECORD_KW]);

const FIRST_FIELD_LIST_SEQUENCE: TokenSet = FIRST_QUALIDENT;

const FIRST_FIELD_LIST: TokenSet = FIRST_QUALIDENT;

const FIRST_VARIANT_RECORD_TYPE: TokenSet = FIRST_EXTENSIBLE_RECORD_TYPE;

const FIRST_VARIANT_FIELD_LIST_SEQ: TokenSet = TokenSet::new(&[Token::CASE_KW, Token::IDENT]);

const FIRST_VARIANT_FIELD_LIST: TokenSet = FIRST_VARIANT_FIELD_LIST_SEQ;

const FIRST_VARIANT_FIELDS: TokenSet = FIRST_CASE_STATEMENT;

const FIRST_VARIANT: TokenSet = FIRST_EXPRESSION;

const FIRST_CASE_LABEL_LIST: TokenSet = FIRST_EXPRESSION;

const FIRST_CASE_LABELS: TokenSet = FIRST_EXPRESSION;

const FIRST_POINTER_TYPE: TokenSet = TokenSet::new(&[Token::POINTER_KW]);

const FIRST_PROCEDURE_TYPE: TokenSet = FIRST_PROCEDURE_HEADER;

const FIRST_FORMAL_TYPE: TokenSet = TokenSet::new(&[Token::ARRAY_KW, Token::VAR_KW, Token::IDENT]);

const FIRST_FORMAL_TYPE_CONST_PARAMS: TokenSet = TokenSet::new(&[
    Token::ARRAY_KW,
    Token::CONST_KW,
    Token::VAR_KW,
    Token::IDENT,
]);

const FIRST_SIMPLE_FORMAL_TYPE: TokenSet = TokenSet::new(&[Token::ARRAY_KW, Token::IDENT]);

const FIRST_ATTRIBUTED_FORMAL_TYPE: TokenSet = TokenSet::new(&[Token::VAR_KW]);

const FIRST_ATTRIBUTED_FORMAL_TYPE_CONST_PARAMS: TokenSet = TokenSet::new(&[
    Token::CONST_KW,
    Token::VAR_KW,
]);

const FIRST_PROCEDURE_HEADER: TokenSet = TokenSet::new(&[Token::PROCEDURE_KW]);

const FIRST_PROCEDURE_SIGNATURE: TokenSet = FIRST_QUALIDENT;

const FIRST_FORMAL_PARAM_LIST: TokenSet = TokenSet::new(&[Token::VAR_KW, Token::IDENT]);

const FIRST_FORMAL_PARAM_LIST_CONST_PARAMS: TokenSet = TokenSet::new(&[
    Token::CONST_KW,
    Token::VAR_KW,
    Token::IDENT,
]);

const FIRST_FORMAL_PARAMS: TokenSet = FIRST_FORMAL_PARAM_LIST;

const FIRST_FORMAL_PARAMS_CONST_PARAMS: TokenSet = FIRST_FORMAL_PARAM_LIST_CONST_PARAMS;

const FIRST_SIMPLE_FORMAL_PARAMS: TokenSet = FIRST_QUALIDENT;

const FIRST_ATTRIB_FORMAL_PARAMS: TokenSet = FIRST_ATTRIBUTED_FORMAL_TYPE;

const FIRST_ATTRIB_FORMAL_PARAMS_CONST_PARAMS: TokenSet = FIRST_ATTRIBUTED_FORMAL_TYPE_CONST_PARAMS;

const FIRST_IMPLEMENTATION_MODULE: TokenSet = TokenSet::new(&[Token::IMPLEMENTATION_KW]);

const FIRST_PROGRAM_MODULE: TokenSet = TokenSet::new(&[Token::MODULE_KW]);

const FIRST_MODULE_PRIORITY: TokenSet = FIRST_RANGE;

const FIRST_BLOCK: TokenSet = TokenSet::new(&[
    Token::BEGIN_KW,
    Token::CONST_KW,
    Token::END_KW,
    Token::MODULE_KW,
    Token::PROCEDURE_KW,
    Token::TYPE_KW,
    Token::VAR_KW,
]);

const FIRST_DECLARATION: TokenSet = TokenSet::new(&[
    Token::CONST_KW,
    Token::MODULE_KW,
    Token::PROCEDURE_KW,
    Token::TYPE_KW,
    Token::VAR_KW,
]);

const FIRST_TYPE_DECLARATION: TokenSet = FIRST_QUALIDENT;

const FIRST_TYPE_DECLARATION_TAIL: TokenSet = FIRST_TYPE;

const FIRST_TYPE_DECLARATION_TAIL_EXTENSIBLE_RECORDS: TokenSet = TokenSet::new(&[
    Token::ARRAY_KW,
    Token::POINTER_KW,
    Token::PROCEDURE_KW,
    Token::RECORD_KW,
    Token::SET_KW,
    Token::VAR_KW,
    Token::IDENT,
    Token::L_PAREN,
    Token::L_BRACKET,
]);

const FIRST_VAR_SIZE_RECORD_TYPE: TokenSet = FIRST_ATTRIBUTED_FORMAL_TYPE;

const FIRST_VARIABLE_DECLARATION: TokenSet = FIRST_QUALIDENT;

const FIRST_PROCEDURE_DECLARATION: TokenSet = FIRST_PROCEDURE_HEADER;

const FIRST_MODULE_DECLARATION: TokenSet = FIRST_PROGRAM_MODULE;

const FIRST_EXPORT: TokenSet = TokenSet::new(&[Token::EXPORT_KW]);

const FIRST_STATEMENT_SEQUENCE: TokenSet = TokenSet::new(&[
    Token::CASE_KW,
    Token::EXIT_KW,
    Token::FOR_KW,
    Token::IF_KW,
    Token::LOOP_KW,
    Token::REPEAT_KW,
    Token::RETURN_KW,
    Token::WHILE_KW,
    Token::WITH_KW,
    Token::IDENT,
]);

const FIRST_STATEMENT: TokenSet = FIRST_STATEMENT_SEQUENCE;

const FIRST_ASSIGNMENT_OR_PROC_CALL: TokenSet = FIRST_QUALIDENT;

const FIRST_ACTUAL_PARAMETERS: TokenSet = FIRST_ENUM_TYPE;

const FIRST_EXPRESSION_LIST: TokenSet = FIRST_EXPRESSION;

const FIRST_RETURN_STATEMENT: TokenSet = TokenSet::new(&[Token::RETURN_KW]);

const FIRST_WITH_STATEMENT: TokenSet = TokenSet::new(&[Token::WITH_KW]);

const FIRST_IF_STATEMENT: TokenSet = TokenSet::new(&[Token::IF_KW]);

const FIRST_CASE_STATEMENT: TokenSet = TokenSet::new(&[Token::CASE_KW]);

const FIRST_CASE: TokenSet = FIRST_EXPRESSION;

const FIRST_LOOP_STATEMENT: TokenSet = TokenSet::new(&[Token::LOOP_KW]);

const FIRST_WHILE_STATEMENT: TokenSet = TokenSet::new(&[Token::WHILE_KW]);

const FIRST_REPEAT_STATEMENT: TokenSet = TokenSet::new(&[Token::REPEAT_KW]);

const FIRST_FOR_STATEMENT: TokenSet = TokenSet::new(&[Token::FOR_KW]);

const FIRST_DESIGNATOR: TokenSet = FIRST_QUALIDENT;

const FIRST_SELECTOR: TokenSet = TokenSet::new(&[Token::DOT, Token::CARET, Token::L_BRACKET]);

const FIRST_EXPRESSION: TokenSet = TokenSet::new(&[
    Token::NOT_KW,
    Token::IDENT,
    Token::STRING,
    Token::INTEGER,
    Token::REAL,
    Token::CHAR,
    Token::PLUS,
    Token::MINUS,
    Token::L_PAREN,
    Token::L_BRACE,
]);

const FIRST_SIMPLE_EXPRESSION: TokenSet = FIRST_EXPRESSION;

const FIRST_TERM: TokenSet = TokenSet::new(&[
    Token::NOT_KW,
    Token::IDENT,
    Token::STRING,
    Token::INTEGER,
    Token::REAL,
    Token::CHAR,
    Token::L_PAREN,
    Token::L_BRACE,
]);

const FIRST_SIMPLE_TERM: TokenSet = FIRST_TERM;

const FIRST_FACTOR: TokenSet = TokenSet::new(&[
    Token::IDENT,
    Token::STRING,
    Token::INTEGER,
    Token::REAL,
    Token::CHAR,
    Token::L_PAREN,
    Token::L_BRACE,
]);

const FIRST_DESIGNATOR_OR_FUNC_CALL: TokenSet = FIRST_QUALIDENT;

const FIRST_SET_VALUE: TokenSet = TokenSet::new(&[Token::L_BRACE]);

const FIRST_ELEMENT: TokenSet = FIRST_EXPRESSION;

// =============================================================================
// FOLLOW SETS
// =============================================================================

const FOLLOW_DEFINITION_MODULE: TokenSet = TokenSet::new(&[Token::EOF]);

const FOLLOW_IMPORT: TokenSet = TokenSet::new(&[
    Token::BEGIN_KW,
    Token::CONST_KW,
    Token::END_KW,
    Token::EXPORT_KW,
    Token::FROM_KW,
    Token::IMPORT_KW,
    Token::MODULE_KW,
    Token::PROCEDURE_KW,
    Token::TYPE_KW,
    Token::VAR_KW,
]);

const FOLLOW_QUALIFIED_IMPORT: TokenSet = FOLLOW_IMPORT;

const FOLLOW_UNQUALIFIED_IMPORT: TokenSet = FOLLOW_IMPORT;

const FOLLOW_IDENT_LIST: TokenSet = TokenSet::new(&[
    Token::COLON,
    Token::SEMICOLON,
    Token::R_PAREN,
]);

const FOLLOW_DEFINITION: TokenSet = TokenSet::new(&[
    Token::CONST_KW,
    Token::END_KW,
    Token::PROCEDURE_KW,
    Token::TYPE_KW,
    Token::VAR_KW,
]);

const FOLLOW_CONST_DEFINITION: TokenSet = TokenSet::new(&[Token::SEMICOLON]);

const FOLLOW_TYPE_DEFINITION: TokenSet = FOLLOW_CONST_DEFINITION;

const FOLLOW_TYPE: TokenSet = TokenSet::new(&[
    Token::ELSE_KW,
    Token::END_KW,
    Token::SEMICOLON,
    Token::PIPE,
]);

const FOLLOW_TYPE_EXTENSIBLE_RECORDS: TokenSet = TokenSet::new(&[
    Token::END_KW,
    Token::IN_KW,
    Token::SEMICOLON,
]);

const FOLLOW_DERIVED_OR_SUBRANGE_TYPE: TokenSet = FOLLOW_TYPE;

const FOLLOW_DERIVED_OR_SUBRANGE_TYPE_EXTENSIBLE_RECORDS: TokenSet = FOLLOW_TYPE_EXTENSIBLE_RECORDS;

const FOLLOW_QUALIDENT: TokenSet = TokenSet::new(&[
    Token::AND_KW,
    Token::BY_KW,
    Token::DIV_KW,
    Token::DO_KW,
    Token::ELSE_KW,
    Token::ELSIF_KW,
    Token::END_KW,
    Token::IN_KW,
    Token::MOD_KW,
    Token::OF_KW,
    Token::OR_KW,
    Token::THEN_KW,
    Token::TO_KW,
    Token::UNTIL_KW,
    Token::PLUS,
    Token::MINUS,
    Token::EQ,
    Token::NOT_EQ,
    Token::LT,
    Token::LT_EQ,
    Token::GT,
    Token::GT_EQ,
    Token::STAR,
    Token::SLASH,
    Token::COLON_EQ,
    Token::COMMA,
    Token::DOT,
    Token::COLON,
    Token::SEMICOLON,
    Token::DOT_DOT,
    Token::CARET,
    Token::PIPE,
    Token::L_PAREN,
    Token::R_PAREN,
    Token::L_BRACKET,
    Token::R_BRACKET,
    Token::L_BRACE,
    Token::R_BRACE,
]);

const FOLLOW_RANGE: TokenSet = TokenSet::new(&[
    Token::ELSE_KW,
    Token::END_KW,
    Token::OF_KW,
    Token::COMMA,
    Token::SEMICOLON,
    Token::PIPE,
]);

const FOLLOW_RANGE_EXTENSIBLE_RECORDS: TokenSet = TokenSet::new(&[
    Token::END_KW,
    Token::IN_KW,
    Token::OF_KW,
    Token::COMMA,
    Token::SEMICOLON,
]);

const FOLLOW_ENUM_TYPE: TokenSet = FOLLOW_RANGE;

const FOLLOW_ENUM_TYPE_EXTENSIBLE_RECORDS: TokenSet = FOLLOW_RANGE_EXTENSIBLE_RECORDS;

const FOLLOW_SET_TYPE: TokenSet = FOLLOW_TYPE;

const FOLLOW_SET_TYPE_EXTENSIBLE_RECORDS: TokenSet = FOLLOW_TYPE_EXTENSIBLE_RECORDS;

const FOLLOW_COUNTABLE_TYPE: TokenSet = FOLLOW_RANGE;

const FOLLOW_COUNTABLE_TYPE_EXTENSIBLE_RECORDS: TokenSet = FOLLOW_RANGE_EXTENSIBLE_RECORDS;

const FOLLOW_ARRAY_TYPE: TokenSet = FOLLOW_TYPE;

const FOLLOW_ARRAY_TYPE_EXTENSIBLE_RECORDS: TokenSet = FOLLOW_TYPE_EXTENSIBLE_RECORDS;

const FOLLOW_EXTENSIBLE_RECORD_TYPE: TokenSet = FOLLOW_TYPE_EXTENSIBLE_RECORDS;

const FOLLOW_FIELD_LIST_SEQUENCE: TokenSet = TokenSet::new(&[Token::END_KW, Token::IN_KW]);

const FOLLOW_FIELD_LIST: TokenSet = FOLLOW_TYPE;

const FOLLOW_FIELD_LIST_EXTENSIBLE_RECORDS: TokenSet = FOLLOW_TYPE_EXTENSIBLE_RECORDS;

const FOLLOW_VARIANT_RECORD_TYPE: TokenSet = FOLLOW_TYPE;

const FOLLOW_VARIANT_FIELD_LIST_SEQ: TokenSet = TokenSet::new(&[
    Token::ELSE_KW,
    Token::END_KW,
    Token::PIPE,
]);

const FOLLOW_VARIANT_FIELD_LIST: TokenSet = FOLLOW_TYPE;

const FOLLOW_VARIANT_FIELDS: TokenSet = FOLLOW_TYPE;

const FOLLOW_VARIANT: TokenSet = FOLLOW_VARIANT_FIELD_LIST_SEQ;

const FOLLOW_CASE_LABEL_LIST: TokenSet = TokenSet::new(&[Token::COLON]);

const FOLLOW_CASE_LABELS: TokenSet = TokenSet::new(&[Token::COMMA, Token::COLON]);

const FOLLOW_POINTER_TYPE: TokenSet = FOLLOW_TYPE;

const FOLLOW_POINTER_TYPE_EXTENSIBLE_RECORDS: TokenSet = FOLLOW_TYPE_EXTENSIBLE_RECORDS;

const FOLLOW_PROCEDURE_TYPE: TokenSet = FOLLOW_TYPE;

const FOLLOW_PROCEDURE_TYPE_EXTENSIBLE_RECORDS: TokenSet = FOLLOW_TYPE_EXTENSIBLE_RECORDS;

const FOLLOW_FORMAL_TYPE: TokenSet = TokenSet::new(&[Token::COMMA, Token::R_PAREN]);

const FOLLOW_SIMPLE_FORMAL_TYPE: TokenSet = TokenSet::new(&[
    Token::COMMA,
    Token::SEMICOLON,
    Token::R_PAREN,
]);

const FOLLOW_ATTRIBUTED_FORMAL_TYPE: TokenSet = FOLLOW_FORMAL_TYPE;

const FOLLOW_PROCEDURE_HEADER: TokenSet = FOLLOW_CONST_DEFINITION;

const FOLLOW_PROCEDURE_SIGNATURE: TokenSet = FOLLOW_CONST_DEFINITION;

const FOLLOW_FORMAL_PARAM_LIST: TokenSet = TokenSet::new(&[Token::R_PAREN]);

const FOLLOW_FORMAL_PARAMS: TokenSet = TokenSet::new(&[Token::SEMICOLON, Token::R_PAREN]);

const FOLLOW_SIMPLE_FORMAL_PARAMS: TokenSet = FOLLOW_FORMAL_PARAMS;

const FOLLOW_ATTRIB_FORMAL_PARAMS: TokenSet = FOLLOW_FORMAL_PARAMS;

const FOLLOW_IMPLEMENTATION_MODULE: TokenSet = FOLLOW_DEFINITION_MODULE;

const FOLLOW_PROGRAM_MODULE: TokenSet = FOLLOW_DEFINITION_MODULE;

const FOLLOW_MODULE_PRIORITY: TokenSet = FOLLOW_CONST_DEFINITION;

const FOLLOW_BLOCK: TokenSet = FIRST_QUALIDENT;

const FOLLOW_DECLARATION: TokenSet = FIRST_BLOCK;

const FOLLOW_TYPE_DECLARATION: TokenSet = FOLLOW_CONST_DEFINITION;

const FOLLOW_TYPE_DECLARATION_TAIL: TokenSet = FOLLOW_CONST_DEFINITION;

const FOLLOW_VAR_SIZE_RECORD_TYPE: TokenSet = FOLLOW_CONST_DEFINITION;

const FOLLOW_VARIABLE_DECLARATION: TokenSet = FOLLOW_CONST_DEFINITION;

const FOLLOW_PROCEDURE_DECLARATION: TokenSet = FOLLOW_CONST_DEFINITION;

const FOLLOW_MODULE_DECLARATION: TokenSet = FOLLOW_CONST_DEFINITION;

const FOLLOW_EXPORT: TokenSet = FIRST_BLOCK;

const FOLLOW_STATEMENT_SEQUENCE: TokenSet = TokenSet::new(&[
    Token::ELSE_KW,
    Token::ELSIF_KW,
    Token::END_KW,
    Token::UNTIL_KW,
    Token::PIPE,
]);

const FOLLOW_STATEMENT: TokenSet = TokenSet::new(&[
    Token::ELSE_KW,
    Token::ELSIF_KW,
    Token::END_KW,
    Token::UNTIL_KW,
    Token::SEMICOLON,
    Token::PIPE,
]);

const FOLLOW_ASSIGNMENT_OR_PROC_CALL: TokenSet = FOLLOW_STATEMENT;

const FOLLOW_ACTUAL_PARAMETERS: TokenSet = FOLLOW_FACTOR;

const FOLLOW_EXPRESSION_LIST: TokenSet = TokenSet::new(&[Token::R_PAREN, Token::R_BRACKET]);

const FOLLOW_RETURN_STATEMENT: TokenSet = FOLLOW_STATEMENT;

const FOLLOW_WITH_STATEMENT: TokenSet = FOLLOW_STATEMENT;

const FOLLOW_IF_STATEMENT: TokenSet = FOLLOW_STATEMENT;

const FOLLOW_CASE_STATEMENT: TokenSet = FOLLOW_STATEMENT;

const FOLLOW_CASE: TokenSet = FOLLOW_VARIANT_FIELD_LIST_SEQ;

const FOLLOW_LOOP_STATEMENT: TokenSet = FOLLOW_STATEMENT;

const FOLLOW_WHILE_STATEMENT: TokenSet = FOLLOW_STATEMENT;

const FOLLOW_REPEAT_STATEMENT: TokenSet = FOLLOW_STATEMENT;

const FOLLOW_FOR_STATEMENT: TokenSet = FOLLOW_STATEMENT;

const FOLLOW_DESIGNATOR: TokenSet = TokenSet::new(&[
    Token::AND_KW,
    Token::BY_KW,
    Token::DIV_KW,
    Token::DO_KW,
    Token::ELSE_KW,
    Token::ELSIF_KW,
    Token::END_KW,
    Token::IN_KW,
    Token::MOD_KW,
    Token::OF_KW,
    Token::OR_KW,
    Token::THEN_KW,
    Token::TO_KW,
    Token::UNTIL_KW,
    Token::PLUS,
    Token::MINUS,
    Token::EQ,
    Token::NOT_EQ,
    Token::LT,
    Token::LT_EQ,
    Token::GT,
    Token::GT_EQ,
    Token::STAR,
    Token::SLASH,
    Token::COLON_EQ,
    Token::COMMA,
    Token::COLON,
    Token::SEMICOLON,
    Token::DOT_DOT,
    Token::PIPE,
    Token::L_PAREN,
    Token::R_PAREN,
    Token::R_BRACKET,
    Token::L_BRACE,
    Token::R_BRACE,
]);

const FOLLOW_SELECTOR: TokenSet = FOLLOW_QUALIDENT;

const FOLLOW_EXPRESSION: TokenSet = TokenSet::new(&[
    Token::BY_KW,
    Token::DO_KW,
    Token::ELSE_KW,
    Token::ELSIF_KW,
    Token::END_KW,
    Token::OF_KW,
    Token::THEN_KW,
    Token::TO_KW,
    Token::UNTIL_KW,
    Token::COMMA,
    Token::COLON,
    Token::SEMICOLON,
    Token::DOT_DOT,
    Token::PIPE,
    Token::R_PAREN,
    Token::R_BRACKET,
    Token::R_BRACE,
]);

const FOLLOW_SIMPLE_EXPRESSION: TokenSet = TokenSet::new(&[
    Token::BY_KW,
    Token::DO_KW,
    Token::ELSE_KW,
    Token::ELSIF_KW,
    Token::END_KW,
    Token::IN_KW,
    Token::OF_KW,
    Token::THEN_KW,
    Token::TO_KW,
    Token::UNTIL_KW,
    Token::EQ,
    Token::NOT_EQ,
    Token::LT,
    Token::LT_EQ,
    Token::GT,
    Token::GT_EQ,
    Token::COMMA,
    Token::COLON,
    Token::SEMICOLON,
    Token::DOT_DOT,
    Token::PIPE,
    Token::R_PAREN,
    Token::R_BRACKET,
    Token::R_BRACE,
]);

const FOLLOW_TERM: TokenSet = TokenSet::new(&[
    Token::BY_KW,
    Token::DO_KW,
    Token::ELSE_KW,
    Token::ELSIF_KW,
    Token::END_KW,
    Token::IN_KW,
    Token::OF_KW,
    Token::OR_KW,
    Token::THEN_KW,
    Token::TO_KW,
    Token::UNTIL_KW,
    Token::PLUS,
    Token::MINUS,
    Token::EQ,
    Token::NOT_EQ,
    Token::LT,
    Token::LT_EQ,
    Token::GT,
    Token::GT_EQ,
    Token::COMMA,
    Token::COLON,
    Token::SEMICOLON,
    Token::DOT_DOT,
    Token::PIPE,
    Token::R_PAREN,
    Token::R_BRACKET,
    Token::R_BRACE,
]);

const FOLLOW_SIMPLE_TERM: TokenSet = FOLLOW_FACTOR;

const FOLLOW_FACTOR: TokenSet = TokenSet::new(&[
    Token::AND_KW,
    Token::BY_KW,
    Token::DIV_KW,
    Token::DO_KW,
    Token::ELSE_KW,
    Token::ELSIF_KW,
    Token::END_KW,
    Token::IN_KW,
    Token::MOD_KW,
    Token::OF_KW,
    Token::OR_KW,
    Token::THEN_KW,
    Token::TO_KW,
    Token::UNTIL_KW,
    Token::PLUS,
    Token::MINUS,
    Token::EQ,
    Token::NOT_EQ,
    Token::LT,
    Token::LT_EQ,
    Token::GT,
    Token::GT_EQ,
    Token::STAR,
    Token::SLASH,
    Token::COMMA,
    Token::COLON,
    Token::SEMICOLON,
    Token::DOT_DOT,
    Token::PIPE,
    Token::R_PAREN,
    Token::R_BRACKET,
    Token::R_BRACE,
]);

const FOLLOW_DESIGNATOR_OR_FUNC_CALL: TokenSet = FOLLOW_FACTOR;

const FOLLOW_SET_VALUE: TokenSet = FOLLOW_FACTOR;

const FOLLOW_ELEMENT: TokenSet = TokenSet::new(&[Token::COMMA, Token::R_BRACE]);

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const PIM: ProductionContext = ProductionContext {
        const_parameters: false,
        variant_records: true,
    };
    const EXT: ProductionContext = ProductionContext {
        const_parameters: true,
        variant_records: false,
    };

    fn assert_disjoint(alternatives: &[Production], ctx: ProductionContext) {
        for (i, a) in alternatives.iter().enumerate() {
            for b in &alternatives[i + 1..] {
                assert!(
                    a.first(ctx).is_disjoint(b.first(ctx)),
                    "{} and {} overlap under {:?}",
                    a.name(),
                    b.name(),
                    ctx
                );
            }
        }
    }

    #[test]
    fn test_every_first_and_follow_is_non_empty() {
        for ctx in ProductionContext::ALL {
            for production in Production::ALL {
                assert!(!production.first(ctx).is_empty(), "{}", production.name());
                assert!(!production.follow(ctx).is_empty(), "{}", production.name());
            }
        }
    }

    #[test]
    fn test_independent_productions_are_invariant() {
        for production in Production::ALL
            .into_iter()
            .filter(|p| !p.is_option_dependent())
        {
            let first = production.first(PIM);
            let follow = production.follow(PIM);
            for ctx in ProductionContext::ALL {
                assert_eq!(production.first(ctx), first, "{}", production.name());
                assert_eq!(production.follow(ctx), follow, "{}", production.name());
            }
        }
    }

    #[test]
    fn test_dependence_flags_match_table_variation() {
        for production in Production::ALL {
            let varies = ProductionContext::ALL.iter().any(|&ctx| {
                production.first(ctx) != production.first(PIM)
                    || production.follow(ctx) != production.follow(PIM)
            });
            assert_eq!(varies, production.is_option_dependent(), "{}", production.name());
        }
    }

    #[test]
    fn test_const_param_productions_differ_in_first() {
        for production in Production::ALL
            .into_iter()
            .filter(|p| p.is_const_param_dependent())
        {
            for variant_records in [false, true] {
                let off = ProductionContext {
                    const_parameters: false,
                    variant_records,
                };
                let on = ProductionContext {
                    const_parameters: true,
                    variant_records,
                };
                assert!(!production.first(off).contains(Token::CONST_KW));
                assert!(production.first(on).contains(Token::CONST_KW));
                assert_eq!(production.follow(off), production.follow(on));
            }
        }
    }

    #[test]
    fn test_variant_record_productions_differ() {
        for production in Production::ALL
            .into_iter()
            .filter(|p| p.is_variant_record_dependent())
        {
            for const_parameters in [false, true] {
                let variant = ProductionContext {
                    const_parameters,
                    variant_records: true,
                };
                let extensible = ProductionContext {
                    const_parameters,
                    variant_records: false,
                };
                assert!(
                    production.first(variant) != production.first(extensible)
                        || production.follow(variant) != production.follow(extensible),
                    "{}",
                    production.name()
                );
            }
        }
    }

    #[test]
    fn test_type_follow_tracks_record_flavour() {
        let variant = Production::TYPE.follow(PIM);
        assert!(variant.contains(Token::PIPE));
        assert!(variant.contains(Token::ELSE_KW));
        assert!(!variant.contains(Token::IN_KW));

        let extensible = Production::TYPE.follow(EXT);
        assert!(extensible.contains(Token::IN_KW));
        assert!(!extensible.contains(Token::PIPE));

        assert!(!Production::TYPE_DECLARATION_TAIL.first(PIM).contains(Token::VAR_KW));
        assert!(Production::TYPE_DECLARATION_TAIL.first(EXT).contains(Token::VAR_KW));
    }

    #[rstest]
    #[case::pim(PIM)]
    #[case::ext(EXT)]
    #[case::pim_const_params(ProductionContext { const_parameters: true, variant_records: true })]
    #[case::ext_no_const_params(ProductionContext { const_parameters: false, variant_records: false })]
    fn test_alternatives_are_disjoint(#[case] ctx: ProductionContext) {
        use Production::*;

        let record = if ctx.variant_records {
            VARIANT_RECORD_TYPE
        } else {
            EXTENSIBLE_RECORD_TYPE
        };
        assert_disjoint(&[QUALIFIED_IMPORT, UNQUALIFIED_IMPORT], ctx);
        assert_disjoint(
            &[
                DERIVED_OR_SUBRANGE_TYPE,
                ENUM_TYPE,
                SET_TYPE,
                ARRAY_TYPE,
                record,
                POINTER_TYPE,
                PROCEDURE_TYPE,
            ],
            ctx,
        );
        assert_disjoint(&[RANGE, ENUM_TYPE, QUALIDENT], ctx);
        assert_disjoint(&[FIELD_LIST, VARIANT_FIELDS], ctx);
        assert_disjoint(&[SIMPLE_FORMAL_TYPE, ATTRIBUTED_FORMAL_TYPE], ctx);
        assert_disjoint(&[SIMPLE_FORMAL_PARAMS, ATTRIB_FORMAL_PARAMS], ctx);
        assert_disjoint(&[PROCEDURE_DECLARATION, MODULE_DECLARATION], ctx);
        assert_disjoint(
            &[
                ASSIGNMENT_OR_PROC_CALL,
                RETURN_STATEMENT,
                WITH_STATEMENT,
                IF_STATEMENT,
                CASE_STATEMENT,
                LOOP_STATEMENT,
                WHILE_STATEMENT,
                REPEAT_STATEMENT,
                FOR_STATEMENT,
            ],
            ctx,
        );
        assert_disjoint(&[SET_VALUE, DESIGNATOR_OR_FUNC_CALL], ctx);
        assert_disjoint(&[SET_VALUE, ACTUAL_PARAMETERS], ctx);
        if !ctx.variant_records {
            assert_disjoint(&[TYPE, VAR_SIZE_RECORD_TYPE], ctx);
        }
    }

    #[test]
    fn test_statement_first_includes_exit() {
        let first = Production::STATEMENT.first(PIM);
        assert!(first.contains(Token::EXIT_KW));
        for production in [Production::ASSIGNMENT_OR_PROC_CALL, Production::FOR_STATEMENT] {
            assert!(!production.first(PIM).contains(Token::EXIT_KW));
        }
    }

    #[test]
    fn test_names() {
        assert_eq!(Production::DEFINITION_MODULE.name(), "definitionModule");
        assert_eq!(Production::VARIANT_FIELD_LIST_SEQ.name(), "variantFieldListSeq");
        assert_eq!(Production::DESIGNATOR_OR_FUNC_CALL.name(), "designatorOrFuncCall");
    }
}
