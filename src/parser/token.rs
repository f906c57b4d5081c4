//! Terminal symbols of Modula-2
//!
//! This enum defines every token the scanner can produce. Tokens carry no
//! payload; the text of a token occurrence is tracked by the lexer as the
//! current or lookahead lexeme.
//!
//! Declaration order matters: classification predicates compare against
//! group boundaries, and token sets print their members in this order.

use rustc_hash::FxHashMap;
use std::fmt;
use std::sync::LazyLock;

/// All terminal symbols of the supported Modula-2 dialects
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u16)]
#[allow(non_camel_case_types)]
pub enum Token {
    /// Invalid input, e.g. an illegal character
    UNKNOWN = 0,

    // =========================================================================
    // RESERVED WORDS
    // =========================================================================
    AND_KW,
    ARRAY_KW,
    BEGIN_KW,
    BY_KW,
    CASE_KW,
    CONST_KW,
    DEFINITION_KW,
    DIV_KW,
    DO_KW,
    ELSE_KW,
    ELSIF_KW,
    END_KW,
    EXIT_KW,
    EXPORT_KW,
    FOR_KW,
    FROM_KW,
    IF_KW,
    IMPLEMENTATION_KW,
    IMPORT_KW,
    IN_KW,
    LOOP_KW,
    MOD_KW,
    MODULE_KW,
    NOT_KW,
    OF_KW,
    OR_KW,
    POINTER_KW,
    PROCEDURE_KW,
    QUALIFIED_KW,
    RECORD_KW,
    REPEAT_KW,
    RETURN_KW,
    SET_KW,
    THEN_KW,
    TO_KW,
    TYPE_KW,
    UNTIL_KW,
    VAR_KW,
    WHILE_KW,
    WITH_KW,

    // =========================================================================
    // IDENTIFIERS AND LITERALS
    // =========================================================================
    IDENT,
    STRING,  // 'abc' or "abc"
    INTEGER, // 42, 0FFH, 17B
    REAL,    // 3.14, 1.0E-5
    CHAR,    // 101C

    // Literals that failed a well-formedness rule (already reported)
    MALFORMED_STRING,
    MALFORMED_INTEGER,
    MALFORMED_REAL,

    PRAGMA, // <* ... *>

    // =========================================================================
    // SPECIAL SYMBOLS
    // =========================================================================
    PLUS,      // +
    MINUS,     // -
    EQ,        // =
    NOT_EQ,    // # (synonym <>)
    LT,        // <
    LT_EQ,     // <=
    GT,        // >
    GT_EQ,     // >=
    STAR,      // *
    SLASH,     // /
    COLON_EQ,  // :=
    COMMA,     // ,
    DOT,       // .
    COLON,     // :
    SEMICOLON, // ;
    DOT_DOT,   // ..
    CARET,     // ^
    PIPE,      // |
    L_PAREN,   // (
    R_PAREN,   // )
    L_BRACKET, // [
    R_BRACKET, // ]
    L_BRACE,   // {
    R_BRACE,   // }

    /// End-of-input sentinel
    EOF,
}

/// Maximum number of tokens a `TokenSet` can represent
pub(crate) const TOKEN_COUNT: usize = Token::EOF as usize + 1;

static RESWORDS: LazyLock<FxHashMap<&'static str, Token>> = LazyLock::new(|| {
    Token::ALL
        .iter()
        .copied()
        .filter(|token| token.is_resword())
        .filter_map(|token| token.lexeme_for_resword().map(|lexeme| (lexeme, token)))
        .collect()
});

impl Token {
    /// Every token, in declaration order
    pub const ALL: [Token; TOKEN_COUNT] = [
        Token::UNKNOWN,
        Token::AND_KW,
        Token::ARRAY_KW,
        Token::BEGIN_KW,
        Token::BY_KW,
        Token::CASE_KW,
        Token::CONST_KW,
        Token::DEFINITION_KW,
        Token::DIV_KW,
        Token::DO_KW,
        Token::ELSE_KW,
        Token::ELSIF_KW,
        Token::END_KW,
        Token::EXIT_KW,
        Token::EXPORT_KW,
        Token::FOR_KW,
        Token::FROM_KW,
        Token::IF_KW,
        Token::IMPLEMENTATION_KW,
        Token::IMPORT_KW,
        Token::IN_KW,
        Token::LOOP_KW,
        Token::MOD_KW,
        Token::MODULE_KW,
        Token::NOT_KW,
        Token::OF_KW,
        Token::OR_KW,
        Token::POINTER_KW,
        Token::PROCEDURE_KW,
        Token::QUALIFIED_KW,
        Token::RECORD_KW,
        Token::REPEAT_KW,
        Token::RETURN_KW,
        Token::SET_KW,
        Token::THEN_KW,
        Token::TO_KW,
        Token::TYPE_KW,
        Token::UNTIL_KW,
        Token::VAR_KW,
        Token::WHILE_KW,
        Token::WITH_KW,
        Token::IDENT,
        Token::STRING,
        Token::INTEGER,
        Token::REAL,
        Token::CHAR,
        Token::MALFORMED_STRING,
        Token::MALFORMED_INTEGER,
        Token::MALFORMED_REAL,
        Token::PRAGMA,
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
        Token::EOF,
    ];

    /// Look up a token by its raw discriminant
    pub fn from_u16(raw: u16) -> Option<Token> {
        Self::ALL.get(raw as usize).copied()
    }

    /// Check if this token represents valid input
    pub fn is_valid(self) -> bool {
        self != Self::UNKNOWN
    }

    /// Check if this is a reserved word
    pub fn is_resword(self) -> bool {
        (self as u16) >= (Self::AND_KW as u16) && (self as u16) <= (Self::WITH_KW as u16)
    }

    /// Check if this is a well-formed literal
    pub fn is_literal(self) -> bool {
        matches!(self, Self::STRING | Self::INTEGER | Self::REAL | Self::CHAR)
    }

    /// Check if this is a literal that failed a well-formedness rule
    pub fn is_malformed_literal(self) -> bool {
        matches!(
            self,
            Self::MALFORMED_STRING | Self::MALFORMED_INTEGER | Self::MALFORMED_REAL
        )
    }

    /// Check if this is a special symbol (operator or punctuation)
    pub fn is_special_symbol(self) -> bool {
        (self as u16) >= (Self::PLUS as u16) && (self as u16) <= (Self::R_BRACE as u16)
    }

    /// Map a malformed literal to the literal kind it was meant to be.
    ///
    /// The lexer has already reported the malformation, so the parser treats
    /// the token as its well-formed counterpart to avoid a second diagnostic.
    pub fn as_well_formed(self) -> Token {
        match self {
            Self::MALFORMED_STRING => Self::STRING,
            Self::MALFORMED_INTEGER => Self::INTEGER,
            Self::MALFORMED_REAL => Self::REAL,
            other => other,
        }
    }

    /// The canonical spelling of a reserved word
    pub fn lexeme_for_resword(self) -> Option<&'static str> {
        let lexeme = match self {
            Self::AND_KW => "AND",
            Self::ARRAY_KW => "ARRAY",
            Self::BEGIN_KW => "BEGIN",
            Self::BY_KW => "BY",
            Self::CASE_KW => "CASE",
            Self::CONST_KW => "CONST",
            Self::DEFINITION_KW => "DEFINITION",
            Self::DIV_KW => "DIV",
            Self::DO_KW => "DO",
            Self::ELSE_KW => "ELSE",
            Self::ELSIF_KW => "ELSIF",
            Self::END_KW => "END",
            Self::EXIT_KW => "EXIT",
            Self::EXPORT_KW => "EXPORT",
            Self::FOR_KW => "FOR",
            Self::FROM_KW => "FROM",
            Self::IF_KW => "IF",
            Self::IMPLEMENTATION_KW => "IMPLEMENTATION",
            Self::IMPORT_KW => "IMPORT",
            Self::IN_KW => "IN",
            Self::LOOP_KW => "LOOP",
            Self::MOD_KW => "MOD",
            Self::MODULE_KW => "MODULE",
            Self::NOT_KW => "NOT",
            Self::OF_KW => "OF",
            Self::OR_KW => "OR",
            Self::POINTER_KW => "POINTER",
            Self::PROCEDURE_KW => "PROCEDURE",
            Self::QUALIFIED_KW => "QUALIFIED",
            Self::RECORD_KW => "RECORD",
            Self::REPEAT_KW => "REPEAT",
            Self::RETURN_KW => "RETURN",
            Self::SET_KW => "SET",
            Self::THEN_KW => "THEN",
            Self::TO_KW => "TO",
            Self::TYPE_KW => "TYPE",
            Self::UNTIL_KW => "UNTIL",
            Self::VAR_KW => "VAR",
            Self::WHILE_KW => "WHILE",
            Self::WITH_KW => "WITH",
            _ => return None,
        };
        Some(lexeme)
    }

    /// The canonical spelling of a special symbol
    pub fn lexeme_for_special_symbol(self) -> Option<&'static str> {
        let lexeme = match self {
            Self::PLUS => "+",
            Self::MINUS => "-",
            Self::EQ => "=",
            Self::NOT_EQ => "#",
            Self::LT => "<",
            Self::LT_EQ => "<=",
            Self::GT => ">",
            Self::GT_EQ => ">=",
            Self::STAR => "*",
            Self::SLASH => "/",
            Self::COLON_EQ => ":=",
            Self::COMMA => ",",
            Self::DOT => ".",
            Self::COLON => ":",
            Self::SEMICOLON => ";",
            Self::DOT_DOT => "..",
            Self::CARET => "^",
            Self::PIPE => "|",
            Self::L_PAREN => "(",
            Self::R_PAREN => ")",
            Self::L_BRACKET => "[",
            Self::R_BRACKET => "]",
            Self::L_BRACE => "{",
            Self::R_BRACE => "}",
            _ => return None,
        };
        Some(lexeme)
    }

    /// The canonical spelling of a reserved word or special symbol
    pub fn lexeme(self) -> Option<&'static str> {
        self.lexeme_for_resword()
            .or_else(|| self.lexeme_for_special_symbol())
    }

    /// A human readable name, used in diagnostics
    pub fn name(self) -> &'static str {
        match self {
            Self::UNKNOWN => "unknown token",
            Self::IDENT => "identifier",
            Self::STRING => "string literal",
            Self::INTEGER => "integer literal",
            Self::REAL => "real literal",
            Self::CHAR => "character code literal",
            Self::MALFORMED_STRING => "malformed string literal",
            Self::MALFORMED_INTEGER => "malformed integer literal",
            Self::MALFORMED_REAL => "malformed real literal",
            Self::PRAGMA => "pragma",
            Self::EOF => "end of file",
            Self::PLUS => "'+'",
            Self::MINUS => "'-'",
            Self::EQ => "'='",
            Self::NOT_EQ => "'#'",
            Self::LT => "'<'",
            Self::LT_EQ => "'<='",
            Self::GT => "'>'",
            Self::GT_EQ => "'>='",
            Self::STAR => "'*'",
            Self::SLASH => "'/'",
            Self::COLON_EQ => "':='",
            Self::COMMA => "','",
            Self::DOT => "'.'",
            Self::COLON => "':'",
            Self::SEMICOLON => "';'",
            Self::DOT_DOT => "'..'",
            Self::CARET => "'^'",
            Self::PIPE => "'|'",
            Self::L_PAREN => "'('",
            Self::R_PAREN => "')'",
            Self::L_BRACKET => "'['",
            Self::R_BRACKET => "']'",
            Self::L_BRACE => "'{'",
            Self::R_BRACE => "'}'",
            resword => resword.lexeme_for_resword().unwrap_or("reserved word"),
        }
    }

    /// The group this token belongs to, used in syntax error messages
    pub fn category(self) -> &'static str {
        if self.is_resword() {
            "reserved word"
        } else if self.is_literal() {
            "literal"
        } else if self.is_malformed_literal() {
            "malformed literal"
        } else if self.is_special_symbol() {
            "special symbol"
        } else {
            match self {
                Self::IDENT => "identifier",
                Self::PRAGMA => "pragma",
                Self::EOF => "end of file",
                _ => "unknown token",
            }
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Look up the reserved word spelled by the first `length` bytes of `lexeme`.
///
/// The match is exact and case-sensitive; `None` means the text is not a
/// reserved word (it may still be an identifier).
pub fn token_for_lexeme(lexeme: &str, length: usize) -> Option<Token> {
    let candidate = lexeme.get(..length)?;
    RESWORDS.get(candidate).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_is_in_declaration_order() {
        for (index, token) in Token::ALL.iter().enumerate() {
            assert_eq!(*token as usize, index, "{:?} out of order", token);
        }
    }

    #[test]
    fn test_resword_round_trip() {
        for token in Token::ALL.iter().copied().filter(|t| t.is_resword()) {
            let lexeme = token.lexeme_for_resword().unwrap();
            let found = token_for_lexeme(lexeme, lexeme.len());
            assert_eq!(found, Some(token));
            assert!(found.unwrap().is_resword());
        }
    }

    #[test]
    fn test_resword_lookup_is_case_and_length_sensitive() {
        assert_eq!(token_for_lexeme("begin", 5), None);
        assert_eq!(token_for_lexeme("BEGINNING", 5), Some(Token::BEGIN_KW));
        assert_eq!(token_for_lexeme("BEGINNING", 9), None);
        assert_eq!(token_for_lexeme("END", 10), None);
        assert_eq!(token_for_lexeme("TO", 2), Some(Token::TO_KW));
    }

    #[test]
    fn test_classification_groups_are_disjoint() {
        for token in Token::ALL {
            let groups = [
                token.is_resword(),
                token.is_literal(),
                token.is_malformed_literal(),
                token.is_special_symbol(),
            ];
            assert!(groups.iter().filter(|g| **g).count() <= 1, "{:?}", token);
        }
    }

    #[test]
    fn test_names() {
        assert_eq!(Token::END_KW.name(), "END");
        assert_eq!(Token::SEMICOLON.name(), "';'");
        assert_eq!(Token::EOF.name(), "end of file");
        assert_eq!(Token::IDENT.category(), "identifier");
        assert_eq!(Token::DOT_DOT.lexeme(), Some(".."));
        assert_eq!(Token::IDENT.lexeme(), None);
    }

    #[test]
    fn test_as_well_formed() {
        assert_eq!(Token::MALFORMED_REAL.as_well_formed(), Token::REAL);
        assert_eq!(Token::IDENT.as_well_formed(), Token::IDENT);
    }
}
