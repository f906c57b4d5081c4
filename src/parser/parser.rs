//! Recursive descent parser for Modula-2
//!
//! One method per grammar production. At each decision point the lookahead
//! is tested against the FIRST sets from [`super::productions`]; when nothing
//! matches, a syntax error is reported and input is skipped until the
//! lookahead is in the production's FOLLOW set. Parse methods never fail:
//! a production that could not be recognized yields the empty node, and a
//! node whose required parts are missing degrades to the empty node as well,
//! so outer productions can carry on.
//!
//! Pragmas are skipped as trivia. Malformed literals have already been
//! reported by the lexer and are treated like their well-formed kind.

use std::cell::Cell;

use smol_str::SmolStr;
use tracing::{debug, error, trace};

use super::lexer::Lexer;
use super::productions::{Production, ProductionContext};
use super::token::Token;
use super::token_set::TokenSet;
use crate::ast::AstNode;
use crate::ast::AstNodeType::{self, *};
use crate::diagnostics::Code;
use crate::options::Options;

pub struct Parser<'a> {
    lexer: Lexer<'a>,
    accepted: Accepted,
    /// Nodes dropped while no error had been reported
    unexplained_degradations: Cell<usize>,
    ctx: ProductionContext,
    errant_semicolons: bool,
    debug: bool,
}

/// The symbol most recently consumed by the parser, captured before any
/// trailing pragmas are skipped
#[derive(Debug, Default)]
struct Accepted {
    lexeme: SmolStr,
    line: u32,
    column: u32,
}

impl<'a> Parser<'a> {
    pub fn new(lexer: Lexer<'a>, options: &Options) -> Self {
        Self {
            lexer,
            accepted: Accepted::default(),
            unexplained_degradations: Cell::new(0),
            ctx: options.production_context(),
            errant_semicolons: options.diagnostics.errant_semicolons,
            debug: options.diagnostics.parser_debug,
        }
    }

    pub fn error_count(&self) -> usize {
        self.lexer.error_count()
    }

    pub fn warning_count(&self) -> usize {
        self.lexer.warning_count()
    }

    /// Nodes that failed schema validation although no error explains them
    pub fn unexplained_degradations(&self) -> usize {
        self.unexplained_degradations.get()
    }

    /// Parse a definition module followed by end of input
    pub fn parse_definition_unit(&mut self) -> AstNode {
        let module = self.definition_module();
        self.expect_end_of_input();
        module
    }

    /// Parse an implementation or program module followed by end of input
    pub fn parse_implementation_unit(&mut self) -> AstNode {
        let implementation = self.first(Production::IMPLEMENTATION_MODULE);
        let program = self.first(Production::PROGRAM_MODULE);
        let mut la = self.la();
        if !implementation.union(program).contains(la) {
            self.error_expected_set(implementation.union(program));
            self.skip_to(implementation.union(program));
            la = self.la();
        }
        let module = if implementation.contains(la) {
            self.implementation_module()
        } else if program.contains(la) {
            self.program_module(PGMMOD)
        } else {
            AstNode::empty()
        };
        self.expect_end_of_input();
        module
    }

    // =========================================================================
    // LOOKAHEAD AND MATCHING
    // =========================================================================

    /// The lookahead token, skipping pragmas
    fn la(&mut self) -> Token {
        while self.lexer.peek_symbol() == Token::PRAGMA {
            self.lexer.read_symbol();
        }
        self.lexer.peek_symbol().as_well_formed()
    }

    /// Consume the lookahead symbol and return the new lookahead token
    fn consume(&mut self) -> Token {
        self.lexer.read_symbol();
        self.accepted = Accepted {
            lexeme: SmolStr::new(self.lexer.current_lexeme()),
            line: self.lexer.current_line(),
            column: self.lexer.current_column(),
        };
        self.la()
    }

    /// Lexeme of the last consumed symbol
    fn lexeme(&self) -> SmolStr {
        self.accepted.lexeme.clone()
    }

    /// Position of the last consumed symbol
    fn accepted_position(&self) -> (u32, u32) {
        (self.accepted.line, self.accepted.column)
    }

    fn first(&self, production: Production) -> TokenSet {
        production.first(self.ctx)
    }

    fn follow(&self, production: Production) -> TokenSet {
        production.follow(self.ctx)
    }

    fn starts(&mut self, production: Production) -> bool {
        let la = self.la();
        self.first(production).contains(la)
    }

    fn enter(&mut self, production: Production) {
        if self.debug {
            let la = self.la();
            trace!(
                "[PARSER] {} at {}:{} lookahead {}",
                production.name(),
                self.lexer.lookahead_line(),
                self.lexer.lookahead_column(),
                la
            );
        }
    }

    /// Consume `token` or report it as expected and skip to `resync`
    fn expect(&mut self, token: Token, resync: TokenSet) -> bool {
        if self.la() == token {
            self.consume();
            return true;
        }
        self.error_expected_token(token);
        self.skip_to(resync);
        false
    }

    /// Consume an identifier and return its lexeme
    fn expect_ident(&mut self, resync: TokenSet) -> Option<SmolStr> {
        if self.expect(Token::IDENT, resync) {
            Some(self.lexeme())
        } else {
            None
        }
    }

    /// Discard input until the lookahead is in `set` or at end of input
    fn skip_to(&mut self, set: TokenSet) {
        let mut skipped = 0usize;
        let mut la = self.la();
        while !set.contains(la) && la != Token::EOF {
            la = self.consume();
            skipped += 1;
        }
        if self.debug && skipped > 0 {
            debug!(
                "[PARSER] resynchronized after {} symbols at {}:{}",
                skipped,
                self.lexer.lookahead_line(),
                self.lexer.lookahead_column()
            );
        }
    }

    /// Report a production with no matching alternative and resynchronize
    fn no_alternative(&mut self, production: Production) -> AstNode {
        let first = self.first(production);
        let follow = self.follow(production);
        self.error_expected_set(first);
        self.skip_to(follow);
        AstNode::empty()
    }

    fn expect_end_of_input(&mut self) {
        if self.la() != Token::EOF {
            self.error_expected_token(Token::EOF);
        }
    }

    // =========================================================================
    // DIAGNOSTICS
    // =========================================================================

    fn error_expected_token(&mut self, expected: Token) {
        let line = self.lexer.lookahead_line();
        let column = self.lexer.lookahead_column();
        let unexpected = self.lexer.peek_symbol();
        let lexeme = SmolStr::new(self.lexer.lookahead_lexeme());
        self.lexer
            .reporter()
            .emit_syntax_error_w_token(line, column, unexpected, &lexeme, expected);
    }

    fn error_expected_set(&mut self, expected: TokenSet) {
        let line = self.lexer.lookahead_line();
        let column = self.lexer.lookahead_column();
        let unexpected = self.lexer.peek_symbol();
        let lexeme = SmolStr::new(self.lexer.lookahead_lexeme());
        self.lexer
            .reporter()
            .emit_syntax_error_w_set(line, column, unexpected, &lexeme, expected);
    }

    /// Semicolon and empty-sequence warnings, unless errant semicolons are tolerated
    fn warn_errant(&mut self, code: Code, line: u32, column: u32) {
        if !self.errant_semicolons {
            self.lexer.reporter().emit_warning_w_pos(code, line, column);
        }
    }

    /// Report a closing identifier that does not repeat the opening one
    fn check_end_ident(&mut self, opening: Option<&SmolStr>, closing: Option<&SmolStr>) {
        let (Some(opening), Some(closing)) = (opening, closing) else {
            return;
        };
        if opening != closing {
            let (line, column) = self.accepted_position();
            self.lexer
                .reporter()
                .emit_error_w_lex(Code::E0301, line, column, closing);
        }
    }

    // =========================================================================
    // NODE CONSTRUCTION
    // =========================================================================

    fn branch(&self, node_type: AstNodeType, subnodes: Vec<AstNode>) -> AstNode {
        AstNode::new_branch(node_type, subnodes).unwrap_or_else(|err| self.degraded(err))
    }

    /// Build a list node from the non-empty members, or the empty node
    fn list(&self, node_type: AstNodeType, members: Vec<AstNode>) -> AstNode {
        let members: Vec<AstNode> = members.into_iter().filter(|m| !m.is_empty()).collect();
        if members.is_empty() {
            return AstNode::empty();
        }
        AstNode::new_list(node_type, members).unwrap_or_else(|err| self.degraded(err))
    }

    fn terminal(&self, node_type: AstNodeType, value: SmolStr) -> AstNode {
        AstNode::new_terminal(node_type, value).unwrap_or_else(|err| self.degraded(err))
    }

    fn ident_node(&self, ident: Option<SmolStr>) -> AstNode {
        match ident {
            Some(ident) => self.terminal(IDENT, ident),
            None => AstNode::empty(),
        }
    }

    fn degraded(&self, err: crate::ast::NodeError) -> AstNode {
        if self.error_count() == 0 {
            self.unexplained_degradations
                .set(self.unexplained_degradations.get() + 1);
            error!(
                "[PARSER] {}:{}: node dropped without a reported error: {}",
                self.lexer.filename(),
                self.accepted.line,
                err
            );
        } else if self.debug {
            debug!("[PARSER] degraded node: {}", err);
        }
        AstNode::empty()
    }

    // =========================================================================
    // DEFINITION MODULES
    // =========================================================================

    /// definitionModule := DEFINITION MODULE Ident ';' import* definition* END Ident '.'
    fn definition_module(&mut self) -> AstNode {
        self.enter(Production::DEFINITION_MODULE);
        let body = self
            .first(Production::IMPORT)
            .union(self.first(Production::DEFINITION))
            .with(Token::END_KW);

        self.expect(Token::DEFINITION_KW, TokenSet::new(&[Token::MODULE_KW]));
        self.expect(Token::MODULE_KW, TokenSet::new(&[Token::IDENT]));
        let module_ident = self.expect_ident(body.with(Token::SEMICOLON));
        if self.la() == Token::SEMICOLON {
            self.consume();
        } else {
            self.error_expected_token(Token::SEMICOLON);
            self.skip_to(body);
        }

        let imports = self.imports();
        let mut definitions = Vec::new();
        while self.starts(Production::DEFINITION) {
            definitions.extend(self.definition());
        }

        let follow = self.follow(Production::DEFINITION_MODULE);
        if self.expect(Token::END_KW, follow.with(Token::IDENT)) || self.la() == Token::IDENT {
            let end_ident = self.expect_ident(follow.with(Token::DOT));
            self.check_end_ident(module_ident.as_ref(), end_ident.as_ref());
            self.expect(Token::DOT, follow);
        }

        let ident = self.ident_node(module_ident);
        let definitions = self.list(DEFLIST, definitions);
        self.branch(DEFMOD, vec![ident, imports, definitions])
    }

    /// import*, as an IMPLIST or the empty node
    fn imports(&mut self) -> AstNode {
        let mut imports = Vec::new();
        while self.starts(Production::IMPORT) {
            imports.push(self.import());
        }
        self.list(IMPLIST, imports)
    }

    /// import := qualifiedImport | unqualifiedImport
    fn import(&mut self) -> AstNode {
        self.enter(Production::IMPORT);
        if self.starts(Production::QUALIFIED_IMPORT) {
            self.qualified_import()
        } else if self.starts(Production::UNQUALIFIED_IMPORT) {
            self.unqualified_import()
        } else {
            self.no_alternative(Production::IMPORT)
        }
    }

    /// qualifiedImport := IMPORT identList ';'
    fn qualified_import(&mut self) -> AstNode {
        self.enter(Production::QUALIFIED_IMPORT);
        let follow = self.follow(Production::QUALIFIED_IMPORT);
        self.consume();
        let idents = self.ident_list();
        if !self.expect(Token::SEMICOLON, follow) {
            return AstNode::empty();
        }
        self.branch(IMPORT, vec![idents])
    }

    /// unqualifiedImport := FROM Ident IMPORT identList ';'
    fn unqualified_import(&mut self) -> AstNode {
        self.enter(Production::UNQUALIFIED_IMPORT);
        let follow = self.follow(Production::UNQUALIFIED_IMPORT);
        self.consume();
        let Some(module) = self.expect_ident(follow) else {
            return AstNode::empty();
        };
        if !self.expect(Token::IMPORT_KW, follow) {
            return AstNode::empty();
        }
        let idents = self.ident_list();
        if !self.expect(Token::SEMICOLON, follow) {
            return AstNode::empty();
        }
        let module = self.terminal(IDENT, module);
        self.branch(UNQIMP, vec![module, idents])
    }

    /// identList := Ident (',' Ident)*
    fn ident_list(&mut self) -> AstNode {
        self.enter(Production::IDENT_LIST);
        let follow = self.follow(Production::IDENT_LIST);
        let mut idents = Vec::new();
        if let Some(ident) = self.expect_ident(follow.with(Token::COMMA)) {
            idents.push(ident);
        }
        while self.la() == Token::COMMA {
            self.consume();
            if let Some(ident) = self.expect_ident(follow.with(Token::COMMA)) {
                idents.push(ident);
            }
        }
        if idents.is_empty() {
            return AstNode::empty();
        }
        AstNode::new_terminal_list(IDENTLIST, idents).unwrap_or_else(|err| self.degraded(err))
    }

    /// definition := CONST (constDefinition ';')* | TYPE (typeDefinition ';')*
    ///             | VAR (variableDeclaration ';')* | procedureHeader ';'
    fn definition(&mut self) -> Vec<AstNode> {
        self.enter(Production::DEFINITION);
        let follow = self.follow(Production::DEFINITION);
        let mut definitions = Vec::new();
        match self.la() {
            Token::CONST_KW => {
                self.consume();
                while self.starts(Production::CONST_DEFINITION) {
                    definitions.push(self.const_definition());
                    self.expect(Token::SEMICOLON, follow.with(Token::IDENT));
                }
            }
            Token::TYPE_KW => {
                self.consume();
                while self.starts(Production::TYPE_DEFINITION) {
                    definitions.push(self.type_definition());
                    self.expect(Token::SEMICOLON, follow.with(Token::IDENT));
                }
            }
            Token::VAR_KW => {
                self.consume();
                while self.starts(Production::VARIABLE_DECLARATION) {
                    definitions.push(self.variable_declaration());
                    self.expect(Token::SEMICOLON, follow.with(Token::IDENT));
                }
            }
            Token::PROCEDURE_KW => {
                definitions.push(self.procedure_header());
                self.expect(Token::SEMICOLON, follow);
            }
            _ => definitions.push(self.no_alternative(Production::DEFINITION)),
        }
        definitions
    }

    /// constDefinition := Ident '=' expression
    fn const_definition(&mut self) -> AstNode {
        self.enter(Production::CONST_DEFINITION);
        let follow = self.follow(Production::CONST_DEFINITION);
        let ident = self.expect_ident(follow);
        if ident.is_none() || !self.expect(Token::EQ, follow) {
            return AstNode::empty();
        }
        let ident = self.ident_node(ident);
        let value = self.expression();
        self.branch(CONSTDEF, vec![ident, value])
    }

    /// typeDefinition := Ident ('=' type)?
    fn type_definition(&mut self) -> AstNode {
        self.enter(Production::TYPE_DEFINITION);
        let follow = self.follow(Production::TYPE_DEFINITION);
        let Some(ident) = self.expect_ident(follow) else {
            return AstNode::empty();
        };
        let ident = self.terminal(IDENT, ident);
        let ty = if self.la() == Token::EQ {
            self.consume();
            self.type_()
        } else {
            AstNode::empty()
        };
        self.branch(TYPEDEF, vec![ident, ty])
    }

    // =========================================================================
    // TYPES
    // =========================================================================

    /// type := derivedOrSubrangeType | enumType | setType | arrayType
    ///       | recordType | pointerType | procedureType
    fn type_(&mut self) -> AstNode {
        self.enter(Production::TYPE);
        if self.starts(Production::DERIVED_OR_SUBRANGE_TYPE) {
            self.derived_or_subrange_type()
        } else if self.starts(Production::ENUM_TYPE) {
            self.enum_type()
        } else if self.starts(Production::SET_TYPE) {
            self.set_type()
        } else if self.starts(Production::ARRAY_TYPE) {
            self.array_type()
        } else if self.la() == Token::RECORD_KW {
            if self.ctx.variant_records {
                self.variant_record_type()
            } else {
                self.extensible_record_type()
            }
        } else if self.starts(Production::POINTER_TYPE) {
            self.pointer_type()
        } else if self.starts(Production::PROCEDURE_TYPE) {
            self.procedure_type()
        } else {
            self.no_alternative(Production::TYPE)
        }
    }

    /// derivedOrSubrangeType := qualident range? | range
    fn derived_or_subrange_type(&mut self) -> AstNode {
        self.enter(Production::DERIVED_OR_SUBRANGE_TYPE);
        if self.la() != Token::IDENT {
            return self.subrange(AstNode::empty());
        }
        let base = self.qualident();
        if self.la() == Token::L_BRACKET {
            self.subrange(base)
        } else {
            base
        }
    }

    /// A `range`, built as SUBR with the given base type
    fn subrange(&mut self, base: AstNode) -> AstNode {
        match self.range() {
            Some((low, high)) => self.branch(SUBR, vec![low, high, base]),
            None => AstNode::empty(),
        }
    }

    /// qualident := Ident ('.' Ident)*
    fn qualident(&mut self) -> AstNode {
        self.enter(Production::QUALIDENT);
        let follow = self.follow(Production::QUALIDENT);
        let Some(first) = self.expect_ident(follow) else {
            return AstNode::empty();
        };
        let mut parts = vec![first];
        while self.la() == Token::DOT && self.lexer.peek_second_symbol() == Token::IDENT {
            self.consume();
            self.consume();
            parts.push(self.lexeme());
        }
        if parts.len() == 1 {
            let ident = parts.pop().unwrap_or_default();
            return self.terminal(IDENT, ident);
        }
        AstNode::new_terminal_list(QUALIDENT, parts).unwrap_or_else(|err| self.degraded(err))
    }

    /// range := '[' expression '..' expression ']'
    fn range(&mut self) -> Option<(AstNode, AstNode)> {
        self.enter(Production::RANGE);
        let follow = self.follow(Production::RANGE);
        if !self.expect(Token::L_BRACKET, follow) {
            return None;
        }
        let low = self.expression();
        if !self.expect(Token::DOT_DOT, follow) {
            return None;
        }
        let high = self.expression();
        if !self.expect(Token::R_BRACKET, follow) {
            return None;
        }
        Some((low, high))
    }

    /// enumType := '(' identList ')'
    fn enum_type(&mut self) -> AstNode {
        self.enter(Production::ENUM_TYPE);
        let follow = self.follow(Production::ENUM_TYPE);
        self.consume();
        let values = self.ident_list();
        if !self.expect(Token::R_PAREN, follow) {
            return AstNode::empty();
        }
        self.branch(ENUM, vec![values])
    }

    /// setType := SET OF countableType
    fn set_type(&mut self) -> AstNode {
        self.enter(Production::SET_TYPE);
        let follow = self.follow(Production::SET_TYPE);
        self.consume();
        if !self.expect(Token::OF_KW, follow) {
            return AstNode::empty();
        }
        let base = self.countable_type();
        self.branch(SET, vec![base])
    }

    /// countableType := range | enumType | qualident range?
    fn countable_type(&mut self) -> AstNode {
        self.enter(Production::COUNTABLE_TYPE);
        if self.starts(Production::RANGE) {
            self.subrange(AstNode::empty())
        } else if self.starts(Production::ENUM_TYPE) {
            self.enum_type()
        } else if self.starts(Production::QUALIDENT) {
            let base = self.qualident();
            if self.la() == Token::L_BRACKET {
                self.subrange(base)
            } else {
                base
            }
        } else {
            self.no_alternative(Production::COUNTABLE_TYPE)
        }
    }

    /// arrayType := ARRAY countableType (',' countableType)* OF type
    fn array_type(&mut self) -> AstNode {
        self.enter(Production::ARRAY_TYPE);
        let follow = self.follow(Production::ARRAY_TYPE);
        self.consume();
        let mut indices = vec![self.countable_type()];
        while self.la() == Token::COMMA {
            self.consume();
            indices.push(self.countable_type());
        }
        if !self.expect(Token::OF_KW, follow) {
            return AstNode::empty();
        }
        let indices = self.list(INDEXLIST, indices);
        let element = self.type_();
        self.branch(ARRAY, vec![indices, element])
    }

    /// extensibleRecordType := RECORD ('(' qualident ')')? fieldListSequence END
    fn extensible_record_type(&mut self) -> AstNode {
        self.enter(Production::EXTENSIBLE_RECORD_TYPE);
        let follow = self.follow(Production::EXTENSIBLE_RECORD_TYPE);
        self.consume();
        let base = if self.la() == Token::L_PAREN {
            self.consume();
            let base = self.qualident();
            if !self.expect(Token::R_PAREN, follow) {
                return AstNode::empty();
            }
            Some(base)
        } else {
            None
        };
        let fields = self.field_list_sequence();
        if !self.expect(Token::END_KW, follow) {
            return AstNode::empty();
        }
        match base {
            Some(base) => self.branch(EXTREC, vec![base, fields]),
            None => self.branch(RECORD, vec![fields]),
        }
    }

    /// fieldListSequence := fieldList (';' fieldList)*
    fn field_list_sequence(&mut self) -> AstNode {
        self.enter(Production::FIELD_LIST_SEQUENCE);
        let follow = self.follow(Production::FIELD_LIST_SEQUENCE);
        if follow.contains(self.la()) {
            let (line, column) = (self.lexer.lookahead_line(), self.lexer.lookahead_column());
            self.warn_errant(Code::W0202, line, column);
            return AstNode::empty();
        }
        let mut fields = vec![self.field_list()];
        while self.la() == Token::SEMICOLON {
            self.consume();
            if follow.contains(self.la()) {
                let (line, column) = self.accepted_position();
                self.warn_errant(Code::W0201, line, column);
                break;
            }
            fields.push(self.field_list());
        }
        self.list(FIELDLISTSEQ, fields)
    }

    /// fieldList := identList ':' type
    fn field_list(&mut self) -> AstNode {
        self.enter(Production::FIELD_LIST);
        let follow = self.follow(Production::FIELD_LIST);
        if !self.starts(Production::FIELD_LIST) {
            return self.no_alternative(Production::FIELD_LIST);
        }
        let idents = self.ident_list();
        if !self.expect(Token::COLON, follow) {
            return AstNode::empty();
        }
        let ty = self.type_();
        self.branch(FIELDLIST, vec![idents, ty])
    }

    /// variantRecordType := RECORD variantFieldListSeq END
    ///
    /// A record without variant parts is built as a plain RECORD.
    fn variant_record_type(&mut self) -> AstNode {
        self.enter(Production::VARIANT_RECORD_TYPE);
        let follow = self.follow(Production::VARIANT_RECORD_TYPE);
        self.consume();
        let fields = self.variant_field_list_seq();
        if !self.expect(Token::END_KW, follow) {
            return AstNode::empty();
        }
        let plain = fields.iter().all(|f| f.node_type() == FIELDLIST);
        if plain {
            let fields = self.list(FIELDLISTSEQ, fields);
            self.branch(RECORD, vec![fields])
        } else {
            let fields = self.list(VFLISTSEQ, fields);
            self.branch(VRNTREC, vec![fields])
        }
    }

    /// variantFieldListSeq := variantFieldList (';' variantFieldList)*
    fn variant_field_list_seq(&mut self) -> Vec<AstNode> {
        self.enter(Production::VARIANT_FIELD_LIST_SEQ);
        let follow = self.follow(Production::VARIANT_FIELD_LIST_SEQ);
        if follow.contains(self.la()) {
            let (line, column) = (self.lexer.lookahead_line(), self.lexer.lookahead_column());
            self.warn_errant(Code::W0202, line, column);
            return Vec::new();
        }
        let mut fields = vec![self.variant_field_list()];
        while self.la() == Token::SEMICOLON {
            self.consume();
            if follow.contains(self.la()) {
                let (line, column) = self.accepted_position();
                self.warn_errant(Code::W0201, line, column);
                break;
            }
            fields.push(self.variant_field_list());
        }
        fields.retain(|f| !f.is_empty());
        fields
    }

    /// variantFieldList := fieldList | variantFields
    fn variant_field_list(&mut self) -> AstNode {
        self.enter(Production::VARIANT_FIELD_LIST);
        if self.starts(Production::FIELD_LIST) {
            self.field_list()
        } else if self.starts(Production::VARIANT_FIELDS) {
            self.variant_fields()
        } else {
            self.no_alternative(Production::VARIANT_FIELD_LIST)
        }
    }

    /// variantFields := CASE Ident? ':' qualident OF variant ('|' variant)*
    ///                  (ELSE variantFieldListSeq)? END
    fn variant_fields(&mut self) -> AstNode {
        self.enter(Production::VARIANT_FIELDS);
        let follow = self.follow(Production::VARIANT_FIELDS);
        self.consume();
        let tag = if self.la() == Token::IDENT {
            self.consume();
            let tag = self.lexeme();
            self.terminal(IDENT, tag)
        } else {
            AstNode::empty()
        };
        if !self.expect(Token::COLON, follow) {
            return AstNode::empty();
        }
        let tag_type = self.qualident();
        if !self.expect(Token::OF_KW, follow) {
            return AstNode::empty();
        }

        let mut variants = Vec::new();
        loop {
            if self.starts(Production::VARIANT) {
                variants.push(self.variant());
            }
            if self.la() != Token::PIPE {
                break;
            }
            self.consume();
        }

        let otherwise = if self.la() == Token::ELSE_KW {
            self.consume();
            let fields = self.variant_field_list_seq();
            self.list(VFLISTSEQ, fields)
        } else {
            AstNode::empty()
        };
        if !self.expect(Token::END_KW, follow) {
            return AstNode::empty();
        }
        let variants = self.list(VARIANTLIST, variants);
        self.branch(VFLIST, vec![tag, tag_type, variants, otherwise])
    }

    /// variant := caseLabelList ':' variantFieldListSeq
    fn variant(&mut self) -> AstNode {
        self.enter(Production::VARIANT);
        let follow = self.follow(Production::VARIANT);
        let labels = self.case_label_list();
        if !self.expect(Token::COLON, follow) {
            return AstNode::empty();
        }
        let fields = self.variant_field_list_seq();
        let fields = self.list(VFLISTSEQ, fields);
        self.branch(VARIANT, vec![labels, fields])
    }

    /// caseLabelList := caseLabels (',' caseLabels)*
    fn case_label_list(&mut self) -> AstNode {
        self.enter(Production::CASE_LABEL_LIST);
        let mut labels = vec![self.case_labels()];
        while self.la() == Token::COMMA {
            self.consume();
            labels.push(self.case_labels());
        }
        self.list(CLABELLIST, labels)
    }

    /// caseLabels := expression ('..' expression)?
    fn case_labels(&mut self) -> AstNode {
        self.enter(Production::CASE_LABELS);
        let low = self.expression();
        let high = if self.la() == Token::DOT_DOT {
            self.consume();
            self.expression()
        } else {
            AstNode::empty()
        };
        self.branch(CLABELS, vec![low, high])
    }

    /// pointerType := POINTER TO type
    fn pointer_type(&mut self) -> AstNode {
        self.enter(Production::POINTER_TYPE);
        let follow = self.follow(Production::POINTER_TYPE);
        self.consume();
        if !self.expect(Token::TO_KW, follow) {
            return AstNode::empty();
        }
        let target = self.type_();
        self.branch(POINTER, vec![target])
    }

    /// procedureType := PROCEDURE ('(' (formalType (',' formalType)*)? ')')? (':' qualident)?
    fn procedure_type(&mut self) -> AstNode {
        self.enter(Production::PROCEDURE_TYPE);
        let follow = self.follow(Production::PROCEDURE_TYPE);
        self.consume();
        let mut formals = Vec::new();
        if self.la() == Token::L_PAREN {
            self.consume();
            if self.starts(Production::FORMAL_TYPE) {
                formals.push(self.formal_type());
                while self.la() == Token::COMMA {
                    self.consume();
                    formals.push(self.formal_type());
                }
            }
            if !self.expect(Token::R_PAREN, follow.with(Token::COLON)) && self.la() != Token::COLON
            {
                return AstNode::empty();
            }
        }
        let result = if self.la() == Token::COLON {
            self.consume();
            self.qualident()
        } else {
            AstNode::empty()
        };
        let formals = self.list(FTYPELIST, formals);
        self.branch(PROCTYPE, vec![formals, result])
    }

    /// formalType := simpleFormalType | attributedFormalType
    fn formal_type(&mut self) -> AstNode {
        self.enter(Production::FORMAL_TYPE);
        if self.starts(Production::SIMPLE_FORMAL_TYPE) {
            self.simple_formal_type()
        } else if self.starts(Production::ATTRIBUTED_FORMAL_TYPE) {
            self.attributed_formal_type()
        } else {
            self.no_alternative(Production::FORMAL_TYPE)
        }
    }

    /// simpleFormalType := (ARRAY OF)? qualident
    fn simple_formal_type(&mut self) -> AstNode {
        self.enter(Production::SIMPLE_FORMAL_TYPE);
        let follow = self.follow(Production::SIMPLE_FORMAL_TYPE);
        if self.la() == Token::ARRAY_KW {
            self.consume();
            if !self.expect(Token::OF_KW, follow) {
                return AstNode::empty();
            }
            let element = self.qualident();
            return self.branch(OPENARRAY, vec![element]);
        }
        self.qualident()
    }

    /// attributedFormalType := (CONST | VAR) simpleFormalType
    fn attributed_formal_type(&mut self) -> AstNode {
        self.enter(Production::ATTRIBUTED_FORMAL_TYPE);
        let attribute = if self.la() == Token::CONST_KW {
            CONSTP
        } else {
            VARP
        };
        self.consume();
        let ty = self.simple_formal_type();
        self.branch(attribute, vec![ty])
    }

    /// procedureHeader := PROCEDURE procedureSignature
    fn procedure_header(&mut self) -> AstNode {
        self.enter(Production::PROCEDURE_HEADER);
        self.consume();
        self.procedure_signature()
    }

    /// procedureSignature := Ident ('(' formalParamList? ')' (':' qualident)?)?
    fn procedure_signature(&mut self) -> AstNode {
        self.enter(Production::PROCEDURE_SIGNATURE);
        let follow = self.follow(Production::PROCEDURE_SIGNATURE);
        let Some(name) = self.expect_ident(follow) else {
            return AstNode::empty();
        };
        let name = self.terminal(IDENT, name);
        let mut params = AstNode::empty();
        let mut result = AstNode::empty();
        if self.la() == Token::L_PAREN {
            self.consume();
            if self.starts(Production::FORMAL_PARAM_LIST) {
                params = self.formal_param_list();
            }
            if !self.expect(Token::R_PAREN, follow) {
                return AstNode::empty();
            }
            if self.la() == Token::COLON {
                self.consume();
                result = self.qualident();
            }
        }
        self.branch(PROCDEF, vec![name, params, result])
    }

    /// formalParamList := formalParams (';' formalParams)*
    fn formal_param_list(&mut self) -> AstNode {
        self.enter(Production::FORMAL_PARAM_LIST);
        let follow = self.follow(Production::FORMAL_PARAM_LIST);
        let mut params = vec![self.formal_params()];
        while self.la() == Token::SEMICOLON {
            self.consume();
            if follow.contains(self.la()) {
                let (line, column) = self.accepted_position();
                self.warn_errant(Code::W0203, line, column);
                break;
            }
            params.push(self.formal_params());
        }
        self.list(FPARAMLIST, params)
    }

    /// formalParams := simpleFormalParams | attribFormalParams
    fn formal_params(&mut self) -> AstNode {
        self.enter(Production::FORMAL_PARAMS);
        if self.starts(Production::SIMPLE_FORMAL_PARAMS) {
            self.simple_formal_params(None)
        } else if self.starts(Production::ATTRIB_FORMAL_PARAMS) {
            self.attrib_formal_params()
        } else {
            self.no_alternative(Production::FORMAL_PARAMS)
        }
    }

    /// simpleFormalParams := identList ':' simpleFormalType
    fn simple_formal_params(&mut self, attribute: Option<AstNodeType>) -> AstNode {
        self.enter(Production::SIMPLE_FORMAL_PARAMS);
        let follow = self.follow(Production::SIMPLE_FORMAL_PARAMS);
        let idents = self.ident_list();
        if !self.expect(Token::COLON, follow) {
            return AstNode::empty();
        }
        let mut ty = self.simple_formal_type();
        if let Some(attribute) = attribute {
            ty = self.branch(attribute, vec![ty]);
        }
        self.branch(FPARAMS, vec![idents, ty])
    }

    /// attribFormalParams := (CONST | VAR) simpleFormalParams
    fn attrib_formal_params(&mut self) -> AstNode {
        self.enter(Production::ATTRIB_FORMAL_PARAMS);
        let attribute = if self.la() == Token::CONST_KW {
            CONSTP
        } else {
            VARP
        };
        self.consume();
        self.simple_formal_params(Some(attribute))
    }

    // =========================================================================
    // IMPLEMENTATION AND PROGRAM MODULES
    // =========================================================================

    /// implementationModule := IMPLEMENTATION programModule
    fn implementation_module(&mut self) -> AstNode {
        self.enter(Production::IMPLEMENTATION_MODULE);
        self.consume();
        self.program_module(IMPMOD)
    }

    /// programModule := MODULE Ident modulePriority? ';' import* block Ident '.'
    fn program_module(&mut self, node_type: AstNodeType) -> AstNode {
        self.enter(Production::PROGRAM_MODULE);
        let follow = self.follow(Production::PROGRAM_MODULE);
        let body = self
            .first(Production::IMPORT)
            .union(self.first(Production::BLOCK));

        self.expect(Token::MODULE_KW, TokenSet::new(&[Token::IDENT]));
        let module_ident = self.expect_ident(body.with(Token::SEMICOLON).with(Token::L_BRACKET));
        let priority = if self.starts(Production::MODULE_PRIORITY) {
            self.module_priority()
        } else {
            AstNode::empty()
        };
        if self.la() == Token::SEMICOLON {
            self.consume();
        } else {
            self.error_expected_token(Token::SEMICOLON);
            self.skip_to(body);
        }

        let imports = self.imports();
        let block = self.block();
        let end_ident = self.expect_ident(follow.with(Token::DOT));
        self.check_end_ident(module_ident.as_ref(), end_ident.as_ref());
        if end_ident.is_some() {
            self.expect(Token::DOT, follow);
        }

        let ident = self.ident_node(module_ident);
        self.branch(node_type, vec![ident, priority, imports, block])
    }

    /// modulePriority := '[' expression ']'
    fn module_priority(&mut self) -> AstNode {
        self.enter(Production::MODULE_PRIORITY);
        let follow = self.follow(Production::MODULE_PRIORITY);
        self.consume();
        let priority = self.expression();
        if !self.expect(Token::R_BRACKET, follow) {
            return AstNode::empty();
        }
        priority
    }

    /// block := declaration* (BEGIN statementSequence)? END
    fn block(&mut self) -> AstNode {
        self.enter(Production::BLOCK);
        let follow = self.follow(Production::BLOCK);
        let mut declarations = Vec::new();
        while self.starts(Production::DECLARATION) {
            declarations.extend(self.declaration());
        }
        let statements = if self.la() == Token::BEGIN_KW {
            self.consume();
            self.statement_sequence()
        } else {
            AstNode::empty()
        };
        self.expect(Token::END_KW, follow);
        let declarations = self.list(DECLLIST, declarations);
        self.branch(BLOCK, vec![declarations, statements])
    }

    /// declaration := CONST (constDefinition ';')* | TYPE (typeDeclaration ';')*
    ///              | VAR (variableDeclaration ';')* | procedureDeclaration ';'
    ///              | moduleDeclaration ';'
    fn declaration(&mut self) -> Vec<AstNode> {
        self.enter(Production::DECLARATION);
        let follow = self.follow(Production::DECLARATION);
        let mut declarations = Vec::new();
        match self.la() {
            Token::CONST_KW => {
                self.consume();
                while self.starts(Production::CONST_DEFINITION) {
                    declarations.push(self.const_definition());
                    self.expect(Token::SEMICOLON, follow.with(Token::IDENT));
                }
            }
            Token::TYPE_KW => {
                self.consume();
                while self.starts(Production::TYPE_DECLARATION) {
                    declarations.push(self.type_declaration());
                    self.expect(Token::SEMICOLON, follow.with(Token::IDENT));
                }
            }
            Token::VAR_KW => {
                self.consume();
                while self.starts(Production::VARIABLE_DECLARATION) {
                    declarations.push(self.variable_declaration());
                    self.expect(Token::SEMICOLON, follow.with(Token::IDENT));
                }
            }
            Token::PROCEDURE_KW => {
                declarations.push(self.procedure_declaration());
                self.expect(Token::SEMICOLON, follow);
            }
            Token::MODULE_KW => {
                declarations.push(self.module_declaration());
                self.expect(Token::SEMICOLON, follow);
            }
            _ => declarations.push(self.no_alternative(Production::DECLARATION)),
        }
        declarations
    }

    /// typeDeclaration := Ident '=' typeDeclarationTail
    fn type_declaration(&mut self) -> AstNode {
        self.enter(Production::TYPE_DECLARATION);
        let follow = self.follow(Production::TYPE_DECLARATION);
        let ident = self.expect_ident(follow);
        if ident.is_none() || !self.expect(Token::EQ, follow) {
            return AstNode::empty();
        }
        let ident = self.ident_node(ident);
        let tail = self.type_declaration_tail();
        self.branch(TYPEDECL, vec![ident, tail])
    }

    /// typeDeclarationTail := type | varSizeRecordType
    fn type_declaration_tail(&mut self) -> AstNode {
        self.enter(Production::TYPE_DECLARATION_TAIL);
        if self.starts(Production::TYPE) {
            self.type_()
        } else if self.starts(Production::TYPE_DECLARATION_TAIL) {
            self.var_size_record_type()
        } else {
            self.no_alternative(Production::TYPE_DECLARATION_TAIL)
        }
    }

    /// varSizeRecordType := VAR RECORD fieldListSequence
    ///                      IN Ident ':' ARRAY Ident OF qualident END
    fn var_size_record_type(&mut self) -> AstNode {
        self.enter(Production::VAR_SIZE_RECORD_TYPE);
        let follow = self.follow(Production::VAR_SIZE_RECORD_TYPE);
        self.consume();
        if !self.expect(Token::RECORD_KW, follow) {
            return AstNode::empty();
        }
        let fields = self.field_list_sequence();
        if !self.expect(Token::IN_KW, follow) {
            return AstNode::empty();
        }
        let Some(field) = self.expect_ident(follow) else {
            return AstNode::empty();
        };
        if !self.expect(Token::COLON, follow) || !self.expect(Token::ARRAY_KW, follow) {
            return AstNode::empty();
        }
        let Some(size) = self.expect_ident(follow) else {
            return AstNode::empty();
        };
        if !self.expect(Token::OF_KW, follow) {
            return AstNode::empty();
        }
        let element = self.qualident();
        if !self.expect(Token::END_KW, follow) {
            return AstNode::empty();
        }
        let field = self.terminal(IDENT, field);
        let size = self.terminal(IDENT, size);
        let indeterminate = self.branch(VSFIELD, vec![field, size, element]);
        self.branch(VSREC, vec![fields, indeterminate])
    }

    /// variableDeclaration := identList ':' type
    fn variable_declaration(&mut self) -> AstNode {
        self.enter(Production::VARIABLE_DECLARATION);
        let follow = self.follow(Production::VARIABLE_DECLARATION);
        let idents = self.ident_list();
        if !self.expect(Token::COLON, follow) {
            return AstNode::empty();
        }
        let ty = self.type_();
        self.branch(VARDECL, vec![idents, ty])
    }

    /// procedureDeclaration := procedureHeader ';' block Ident
    fn procedure_declaration(&mut self) -> AstNode {
        self.enter(Production::PROCEDURE_DECLARATION);
        let follow = self.follow(Production::PROCEDURE_DECLARATION);
        let header = self.procedure_header();
        let name = header
            .subnode(0)
            .and_then(AstNode::value)
            .map(SmolStr::new);
        if !self.expect(Token::SEMICOLON, self.first(Production::BLOCK))
            && !self.starts(Production::BLOCK)
        {
            return AstNode::empty();
        }
        let body = self.block();
        let end_ident = self.expect_ident(follow);
        self.check_end_ident(name.as_ref(), end_ident.as_ref());
        self.branch(PROC, vec![header, body])
    }

    /// moduleDeclaration := MODULE Ident modulePriority? ';' import* export? block Ident
    fn module_declaration(&mut self) -> AstNode {
        self.enter(Production::MODULE_DECLARATION);
        let follow = self.follow(Production::MODULE_DECLARATION);
        let body = self
            .first(Production::IMPORT)
            .union(self.first(Production::EXPORT))
            .union(self.first(Production::BLOCK));

        self.consume();
        let module_ident = self.expect_ident(body.with(Token::SEMICOLON).with(Token::L_BRACKET));
        let priority = if self.starts(Production::MODULE_PRIORITY) {
            self.module_priority()
        } else {
            AstNode::empty()
        };
        if self.la() == Token::SEMICOLON {
            self.consume();
        } else {
            self.error_expected_token(Token::SEMICOLON);
            self.skip_to(body);
        }

        let imports = self.imports();
        let export = if self.starts(Production::EXPORT) {
            self.export()
        } else {
            AstNode::empty()
        };
        let block = self.block();
        let end_ident = self.expect_ident(follow);
        self.check_end_ident(module_ident.as_ref(), end_ident.as_ref());

        let ident = self.ident_node(module_ident);
        self.branch(MODDECL, vec![ident, priority, imports, export, block])
    }

    /// export := EXPORT QUALIFIED? identList ';'
    fn export(&mut self) -> AstNode {
        self.enter(Production::EXPORT);
        let follow = self.follow(Production::EXPORT);
        self.consume();
        let node_type = if self.la() == Token::QUALIFIED_KW {
            self.consume();
            QUALEXP
        } else {
            EXPORT
        };
        let idents = self.ident_list();
        if !self.expect(Token::SEMICOLON, follow) {
            return AstNode::empty();
        }
        self.branch(node_type, vec![idents])
    }

    // =========================================================================
    // STATEMENTS
    // =========================================================================

    /// statementSequence := statement (';' statement)*
    fn statement_sequence(&mut self) -> AstNode {
        self.enter(Production::STATEMENT_SEQUENCE);
        let follow = self.follow(Production::STATEMENT_SEQUENCE);
        if follow.contains(self.la()) {
            let (line, column) = (self.lexer.lookahead_line(), self.lexer.lookahead_column());
            self.warn_errant(Code::W0205, line, column);
            return AstNode::empty();
        }

        let mut statements = vec![self.statement()];
        loop {
            let la = self.la();
            if la == Token::SEMICOLON {
                self.consume();
                if follow.contains(self.la()) {
                    let (line, column) = self.accepted_position();
                    self.warn_errant(Code::W0204, line, column);
                    break;
                }
                statements.push(self.statement());
            } else if self.first(Production::STATEMENT).contains(la) {
                self.error_expected_token(Token::SEMICOLON);
                statements.push(self.statement());
            } else {
                break;
            }
        }
        self.list(STMTSEQ, statements)
    }

    /// statement := assignmentOrProcCall | returnStatement | withStatement
    ///            | ifStatement | caseStatement | loopStatement | whileStatement
    ///            | repeatStatement | forStatement | EXIT
    fn statement(&mut self) -> AstNode {
        self.enter(Production::STATEMENT);
        match self.la() {
            Token::IDENT => self.assignment_or_proc_call(),
            Token::RETURN_KW => self.return_statement(),
            Token::WITH_KW => self.with_statement(),
            Token::IF_KW => self.if_statement(),
            Token::CASE_KW => self.case_statement(),
            Token::LOOP_KW => self.loop_statement(),
            Token::WHILE_KW => self.while_statement(),
            Token::REPEAT_KW => self.repeat_statement(),
            Token::FOR_KW => self.for_statement(),
            Token::EXIT_KW => {
                self.consume();
                self.branch(EXIT, Vec::new())
            }
            _ => self.no_alternative(Production::STATEMENT),
        }
    }

    /// assignmentOrProcCall := designator (':=' expression | actualParameters)?
    fn assignment_or_proc_call(&mut self) -> AstNode {
        self.enter(Production::ASSIGNMENT_OR_PROC_CALL);
        let target = self.designator();
        if self.la() == Token::COLON_EQ {
            self.consume();
            let value = self.expression();
            return self.branch(ASSIGN, vec![target, value]);
        }
        let args = if self.starts(Production::ACTUAL_PARAMETERS) {
            self.actual_parameters()
        } else {
            AstNode::empty()
        };
        self.branch(PCALL, vec![target, args])
    }

    /// actualParameters := '(' expressionList? ')'
    fn actual_parameters(&mut self) -> AstNode {
        self.enter(Production::ACTUAL_PARAMETERS);
        let follow = self.follow(Production::ACTUAL_PARAMETERS);
        self.consume();
        let args = if self.starts(Production::EXPRESSION_LIST) {
            self.expression_list()
        } else {
            Vec::new()
        };
        if !self.expect(Token::R_PAREN, follow) {
            return AstNode::empty();
        }
        self.list(ARGS, args)
    }

    /// expressionList := expression (',' expression)*
    fn expression_list(&mut self) -> Vec<AstNode> {
        self.enter(Production::EXPRESSION_LIST);
        let mut expressions = vec![self.expression()];
        while self.la() == Token::COMMA {
            self.consume();
            expressions.push(self.expression());
        }
        expressions
    }

    /// returnStatement := RETURN expression?
    fn return_statement(&mut self) -> AstNode {
        self.enter(Production::RETURN_STATEMENT);
        self.consume();
        let value = if self.starts(Production::EXPRESSION) {
            self.expression()
        } else {
            AstNode::empty()
        };
        self.branch(RETURN, vec![value])
    }

    /// withStatement := WITH designator DO statementSequence END
    fn with_statement(&mut self) -> AstNode {
        self.enter(Production::WITH_STATEMENT);
        let follow = self.follow(Production::WITH_STATEMENT);
        self.consume();
        let record = self.designator();
        if !self.expect(Token::DO_KW, follow) {
            return AstNode::empty();
        }
        let body = self.statement_sequence();
        if !self.expect(Token::END_KW, follow) {
            return AstNode::empty();
        }
        self.branch(WITH, vec![record, body])
    }

    /// ifStatement := IF expression THEN statementSequence
    ///                (ELSIF expression THEN statementSequence)*
    ///                (ELSE statementSequence)? END
    fn if_statement(&mut self) -> AstNode {
        self.enter(Production::IF_STATEMENT);
        let follow = self.follow(Production::IF_STATEMENT);
        self.consume();
        let condition = self.expression();
        if !self.expect(Token::THEN_KW, follow) {
            return AstNode::empty();
        }
        let then_branch = self.statement_sequence();

        let mut elsifs = Vec::new();
        while self.la() == Token::ELSIF_KW {
            self.consume();
            let condition = self.expression();
            if !self.expect(Token::THEN_KW, follow) {
                return AstNode::empty();
            }
            let body = self.statement_sequence();
            elsifs.push(self.branch(ELSIF, vec![condition, body]));
        }

        let else_branch = if self.la() == Token::ELSE_KW {
            self.consume();
            self.statement_sequence()
        } else {
            AstNode::empty()
        };
        if !self.expect(Token::END_KW, follow) {
            return AstNode::empty();
        }
        let elsifs = self.list(ELSIFSEQ, elsifs);
        self.branch(IF, vec![condition, then_branch, elsifs, else_branch])
    }

    /// caseStatement := CASE expression OF case ('|' case)* (ELSE statementSequence)? END
    fn case_statement(&mut self) -> AstNode {
        self.enter(Production::CASE_STATEMENT);
        let follow = self.follow(Production::CASE_STATEMENT);
        self.consume();
        let selector = self.expression();
        if !self.expect(Token::OF_KW, follow) {
            return AstNode::empty();
        }

        let mut cases = Vec::new();
        loop {
            if self.starts(Production::CASE) {
                cases.push(self.case());
            }
            if self.la() != Token::PIPE {
                break;
            }
            self.consume();
        }

        let otherwise = if self.la() == Token::ELSE_KW {
            self.consume();
            self.statement_sequence()
        } else {
            AstNode::empty()
        };
        if !self.expect(Token::END_KW, follow) {
            return AstNode::empty();
        }
        let cases = self.list(CASELIST, cases);
        self.branch(SWITCH, vec![selector, cases, otherwise])
    }

    /// case := caseLabelList ':' statementSequence
    fn case(&mut self) -> AstNode {
        self.enter(Production::CASE);
        let follow = self.follow(Production::CASE);
        let labels = self.case_label_list();
        if !self.expect(Token::COLON, follow) {
            return AstNode::empty();
        }
        let body = self.statement_sequence();
        self.branch(CASE, vec![labels, body])
    }

    /// loopStatement := LOOP statementSequence END
    fn loop_statement(&mut self) -> AstNode {
        self.enter(Production::LOOP_STATEMENT);
        let follow = self.follow(Production::LOOP_STATEMENT);
        self.consume();
        let body = self.statement_sequence();
        if !self.expect(Token::END_KW, follow) {
            return AstNode::empty();
        }
        self.branch(LOOP, vec![body])
    }

    /// whileStatement := WHILE expression DO statementSequence END
    fn while_statement(&mut self) -> AstNode {
        self.enter(Production::WHILE_STATEMENT);
        let follow = self.follow(Production::WHILE_STATEMENT);
        self.consume();
        let condition = self.expression();
        if !self.expect(Token::DO_KW, follow) {
            return AstNode::empty();
        }
        let body = self.statement_sequence();
        if !self.expect(Token::END_KW, follow) {
            return AstNode::empty();
        }
        self.branch(WHILE, vec![condition, body])
    }

    /// repeatStatement := REPEAT statementSequence UNTIL expression
    fn repeat_statement(&mut self) -> AstNode {
        self.enter(Production::REPEAT_STATEMENT);
        let follow = self.follow(Production::REPEAT_STATEMENT);
        self.consume();
        let body = self.statement_sequence();
        if !self.expect(Token::UNTIL_KW, follow) {
            return AstNode::empty();
        }
        let condition = self.expression();
        self.branch(REPEAT, vec![body, condition])
    }

    /// forStatement := FOR Ident ':=' expression TO expression (BY expression)?
    ///                 DO statementSequence END
    fn for_statement(&mut self) -> AstNode {
        self.enter(Production::FOR_STATEMENT);
        let follow = self.follow(Production::FOR_STATEMENT);
        self.consume();
        let Some(control) = self.expect_ident(follow) else {
            return AstNode::empty();
        };
        if !self.expect(Token::COLON_EQ, follow) {
            return AstNode::empty();
        }
        let start = self.expression();
        if !self.expect(Token::TO_KW, follow) {
            return AstNode::empty();
        }
        let end = self.expression();
        let step = if self.la() == Token::BY_KW {
            self.consume();
            self.expression()
        } else {
            AstNode::empty()
        };
        if !self.expect(Token::DO_KW, follow) {
            return AstNode::empty();
        }
        let body = self.statement_sequence();
        if !self.expect(Token::END_KW, follow) {
            return AstNode::empty();
        }
        let control = self.terminal(IDENT, control);
        self.branch(FORTO, vec![control, start, end, step, body])
    }

    // =========================================================================
    // DESIGNATORS AND EXPRESSIONS
    // =========================================================================

    /// designator := qualident selector*
    fn designator(&mut self) -> AstNode {
        self.enter(Production::DESIGNATOR);
        let follow = self.follow(Production::DESIGNATOR);
        let mut designator = self.qualident();
        loop {
            match self.la() {
                Token::CARET => {
                    self.consume();
                    designator = self.branch(DEREF, vec![designator]);
                }
                Token::DOT => {
                    self.consume();
                    let field = self.expect_ident(follow);
                    let field = self.ident_node(field);
                    designator = self.branch(FIELD, vec![designator, field]);
                }
                Token::L_BRACKET => {
                    self.consume();
                    let indices = self.expression_list();
                    if !self.expect(Token::R_BRACKET, follow) {
                        return AstNode::empty();
                    }
                    let indices = self.list(ARGS, indices);
                    designator = self.branch(INDEX, vec![designator, indices]);
                }
                _ => return designator,
            }
        }
    }

    /// expression := simpleExpression (relation simpleExpression)?
    fn expression(&mut self) -> AstNode {
        self.enter(Production::EXPRESSION);
        let left = self.simple_expression();
        let operator = match self.la() {
            Token::EQ => EQ,
            Token::NOT_EQ => NEQ,
            Token::LT => LT,
            Token::LT_EQ => LTEQ,
            Token::GT => GT,
            Token::GT_EQ => GTEQ,
            Token::IN_KW => IN,
            _ => return left,
        };
        self.consume();
        let right = self.simple_expression();
        self.branch(operator, vec![left, right])
    }

    /// simpleExpression := ('+' | '-')? term (('+' | '-' | OR) term)*
    fn simple_expression(&mut self) -> AstNode {
        self.enter(Production::SIMPLE_EXPRESSION);
        let mut left = match self.la() {
            Token::PLUS => {
                self.consume();
                self.term()
            }
            Token::MINUS => {
                self.consume();
                let operand = self.term();
                self.branch(NEG, vec![operand])
            }
            _ => self.term(),
        };
        loop {
            let operator = match self.la() {
                Token::PLUS => PLUS,
                Token::MINUS => MINUS,
                Token::OR_KW => OR,
                _ => return left,
            };
            self.consume();
            let right = self.term();
            left = self.branch(operator, vec![left, right]);
        }
    }

    /// term := simpleTerm (('*' | '/' | DIV | MOD | AND) simpleTerm)*
    fn term(&mut self) -> AstNode {
        self.enter(Production::TERM);
        let mut left = self.simple_term();
        loop {
            let operator = match self.la() {
                Token::STAR => ASTERISK,
                Token::SLASH => SOLIDUS,
                Token::DIV_KW => DIV,
                Token::MOD_KW => MOD,
                Token::AND_KW => AND,
                _ => return left,
            };
            self.consume();
            let right = self.simple_term();
            left = self.branch(operator, vec![left, right]);
        }
    }

    /// simpleTerm := NOT? factor
    fn simple_term(&mut self) -> AstNode {
        self.enter(Production::SIMPLE_TERM);
        if self.la() == Token::NOT_KW {
            self.consume();
            let operand = self.factor();
            return self.branch(NOT, vec![operand]);
        }
        self.factor()
    }

    /// factor := literal | setValue | designatorOrFuncCall | '(' expression ')'
    fn factor(&mut self) -> AstNode {
        self.enter(Production::FACTOR);
        let literal = match self.la() {
            Token::INTEGER => Some(INTVAL),
            Token::REAL => Some(REALVAL),
            Token::CHAR => Some(CHRVAL),
            Token::STRING => Some(QUOTEDVAL),
            _ => None,
        };
        if let Some(node_type) = literal {
            self.consume();
            let value = self.lexeme();
            return self.terminal(node_type, value);
        }

        if self.starts(Production::SET_VALUE) {
            let elements = self.set_value();
            self.branch(SETVAL, vec![elements, AstNode::empty()])
        } else if self.starts(Production::DESIGNATOR_OR_FUNC_CALL) {
            self.designator_or_func_call()
        } else if self.la() == Token::L_PAREN {
            let follow = self.follow(Production::FACTOR);
            self.consume();
            let inner = self.expression();
            if !self.expect(Token::R_PAREN, follow) {
                return AstNode::empty();
            }
            inner
        } else {
            self.no_alternative(Production::FACTOR)
        }
    }

    /// designatorOrFuncCall := designator (setValue | actualParameters)?
    fn designator_or_func_call(&mut self) -> AstNode {
        self.enter(Production::DESIGNATOR_OR_FUNC_CALL);
        let designator = self.designator();
        if self.starts(Production::SET_VALUE) {
            let elements = self.set_value();
            self.branch(SETVAL, vec![elements, designator])
        } else if self.starts(Production::ACTUAL_PARAMETERS) {
            let args = self.actual_parameters();
            self.branch(FCALL, vec![designator, args])
        } else {
            designator
        }
    }

    /// setValue := '{' (element (',' element)*)? '}', as an ELEMLIST or the empty node
    fn set_value(&mut self) -> AstNode {
        self.enter(Production::SET_VALUE);
        let follow = self.follow(Production::SET_VALUE);
        self.consume();
        let mut elements = Vec::new();
        if self.starts(Production::ELEMENT) {
            elements.push(self.element());
            while self.la() == Token::COMMA {
                self.consume();
                elements.push(self.element());
            }
        }
        if !self.expect(Token::R_BRACE, follow) {
            return AstNode::empty();
        }
        self.list(ELEMLIST, elements)
    }

    /// element := expression ('..' expression)?
    fn element(&mut self) -> AstNode {
        self.enter(Production::ELEMENT);
        let low = self.expression();
        if self.la() != Token::DOT_DOT {
            return low;
        }
        self.consume();
        let high = self.expression();
        self.branch(RANGE, vec![low, high])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::{CollectingSink, Reporter};
    use crate::options::Dialect;
    use crate::parser::source::Infile;
    use rstest::rstest;

    fn parse_with(text: &str, options: &Options) -> (AstNode, usize, usize) {
        let mut sink = CollectingSink::new();
        let infile = Infile::from_source("T.mod", text).unwrap();
        let lexer = Lexer::new(infile, options, Reporter::new(&mut sink));
        let mut parser = Parser::new(lexer, options);
        let module = parser.parse_implementation_unit();
        (module, parser.error_count(), parser.unexplained_degradations())
    }

    #[rstest]
    #[case::empty_record(Dialect::Pim4, "MODULE M;\nTYPE R = RECORD END;\nEND M.\n")]
    #[case::empty_body(Dialect::Pim4, "MODULE M;\nBEGIN\nEND M.\n")]
    #[case::bare_case(
        Dialect::Pim4,
        "MODULE M;\nBEGIN\n  CASE x OF ELSE END;\n  p();\n  s := {}\nEND M.\n"
    )]
    #[case::empty_variant(
        Dialect::Pim4,
        "MODULE M;\nTYPE T = RECORD CASE k : BOOLEAN OF TRUE : | FALSE : x : INTEGER END END;\nEND M.\n"
    )]
    #[case::var_size_record(
        Dialect::Ext,
        "MODULE M;\nTYPE V = VAR RECORD n : INTEGER IN data : ARRAY n OF CHAR END;\nEND M.\n"
    )]
    fn test_warning_only_input_loses_no_nodes(#[case] dialect: Dialect, #[case] text: &str) {
        let (module, errors, unexplained) = parse_with(text, &Options::for_dialect(dialect));
        assert_eq!(errors, 0);
        assert_eq!(unexplained, 0);
        assert_eq!(module.node_type(), PGMMOD);
    }

    #[test]
    fn test_schema_mismatch_without_error_is_counted() {
        let mut sink = CollectingSink::new();
        let options = Options::default();
        let infile = Infile::from_source("T.mod", "MODULE M;\nEND M.\n").unwrap();
        let lexer = Lexer::new(infile, &options, Reporter::new(&mut sink));
        let parser = Parser::new(lexer, &options);
        assert!(parser.branch(CONSTDEF, Vec::new()).is_empty());
        assert_eq!(parser.unexplained_degradations(), 1);
    }

    #[test]
    fn test_pragma_after_terminal_keeps_its_lexeme() {
        let (module, errors, _) =
            parse_with("MODULE M;\nBEGIN\n  a <*p*> := 1 <*q*>\nEND M.\n", &Options::default());
        assert_eq!(errors, 0);
        let text = module.to_string();
        assert!(text.contains(r#"(ASSIGN (IDENT "a") (INTVAL "1"))"#), "{text}");
    }
}
