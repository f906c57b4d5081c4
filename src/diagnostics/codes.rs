//! Diagnostic code definitions
//!
//! Codes follow a naming convention: {severity}{category}{number}
//! - x00xx: Option errors (argument and configuration problems)
//! - x01xx: Lexical warnings and errors
//! - x02xx: Syntax warnings and errors
//! - x03xx: Semantic errors
//!
//! The leading letter is `E` for errors and `W` for warnings, so the
//! severity of a diagnostic is a static property of its code.

use std::fmt;

/// Diagnostic codes for the scanner, parser and option resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Code {
    /// Not a valid diagnostic code
    Unknown,

    // =========================================================================
    // E00xx: Option errors
    // =========================================================================
    /// Unrecognised option
    E0001,
    /// Option argument missing or invalid
    E0002,
    /// No input filename given
    E0003,
    /// Filename has no recognised suffix
    E0004,
    /// Input file does not exist or cannot be read
    E0005,
    /// Two options contradict each other
    E0006,

    // =========================================================================
    // x01xx: Lexical warnings and errors
    // =========================================================================
    /// Disabled code section skipped
    W0101,
    /// Invalid input character
    E0102,
    /// End of file in block comment
    E0103,
    /// Newline in string literal
    E0104,
    /// End of file in string literal
    E0105,
    /// Invalid escape sequence
    E0106,
    /// End of file in pragma
    E0107,
    /// Missing suffix in number literal
    E0108,
    /// Missing exponent in real literal
    E0109,
    /// Identifier exceeds maximum length
    E0110,
    /// Block comment nesting limit exceeded
    E0111,

    // =========================================================================
    // x02xx: Syntax warnings and errors
    // =========================================================================
    /// Unexpected token
    E0201,
    /// Semicolon after field list sequence
    W0201,
    /// Empty field list sequence
    W0202,
    /// Semicolon after formal parameter list
    W0203,
    /// Semicolon after statement sequence
    W0204,
    /// Empty statement sequence
    W0205,

    // =========================================================================
    // E03xx: Semantic errors
    // =========================================================================
    /// Closing identifier does not match the opening identifier
    E0301,
}

impl Code {
    /// Every valid code, in category order
    pub const ALL: &'static [Code] = &[
        Code::E0001,
        Code::E0002,
        Code::E0003,
        Code::E0004,
        Code::E0005,
        Code::E0006,
        Code::W0101,
        Code::E0102,
        Code::E0103,
        Code::E0104,
        Code::E0105,
        Code::E0106,
        Code::E0107,
        Code::E0108,
        Code::E0109,
        Code::E0110,
        Code::E0111,
        Code::E0201,
        Code::W0201,
        Code::W0202,
        Code::W0203,
        Code::W0204,
        Code::W0205,
        Code::E0301,
    ];

    /// Get the string representation of the code (e.g., "E0201")
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unknown => "E0000",
            // Option
            Self::E0001 => "E0001",
            Self::E0002 => "E0002",
            Self::E0003 => "E0003",
            Self::E0004 => "E0004",
            Self::E0005 => "E0005",
            Self::E0006 => "E0006",
            // Lexical
            Self::W0101 => "W0101",
            Self::E0102 => "E0102",
            Self::E0103 => "E0103",
            Self::E0104 => "E0104",
            Self::E0105 => "E0105",
            Self::E0106 => "E0106",
            Self::E0107 => "E0107",
            Self::E0108 => "E0108",
            Self::E0109 => "E0109",
            Self::E0110 => "E0110",
            Self::E0111 => "E0111",
            // Syntax
            Self::E0201 => "E0201",
            Self::W0201 => "W0201",
            Self::W0202 => "W0202",
            Self::W0203 => "W0203",
            Self::W0204 => "W0204",
            Self::W0205 => "W0205",
            // Semantic
            Self::E0301 => "E0301",
        }
    }

    pub fn is_valid(&self) -> bool {
        *self != Self::Unknown
    }

    pub fn is_warning(&self) -> bool {
        self.as_str().starts_with('W')
    }

    pub fn is_error(&self) -> bool {
        self.is_valid() && !self.is_warning()
    }

    /// Severity implied by the code
    pub fn severity(&self) -> Severity {
        if self.is_warning() {
            Severity::Warning
        } else {
            Severity::Error
        }
    }

    pub fn is_option_error(&self) -> bool {
        matches!(
            self,
            Self::E0001 | Self::E0002 | Self::E0003 | Self::E0004 | Self::E0005 | Self::E0006
        )
    }

    pub fn is_lexical_error(&self) -> bool {
        matches!(
            self,
            Self::W0101
                | Self::E0102
                | Self::E0103
                | Self::E0104
                | Self::E0105
                | Self::E0106
                | Self::E0107
                | Self::E0108
                | Self::E0109
                | Self::E0110
                | Self::E0111
        )
    }

    pub fn is_syntax_error(&self) -> bool {
        matches!(
            self,
            Self::E0201 | Self::W0201 | Self::W0202 | Self::W0203 | Self::W0204 | Self::W0205
        )
    }

    pub fn is_semantic_error(&self) -> bool {
        matches!(self, Self::E0301)
    }

    /// Get a brief description of the code's category
    pub fn category_description(&self) -> &'static str {
        if self.is_option_error() {
            "option error"
        } else if self.is_lexical_error() {
            "lexical error"
        } else if self.is_syntax_error() {
            "syntax error"
        } else if self.is_semantic_error() {
            "semantic error"
        } else {
            "unknown"
        }
    }

    /// Human readable message text; `None` for [`Code::Unknown`]
    pub fn message(&self) -> Option<&'static str> {
        diag_msg_text(*self)
    }
}

/// Human readable message text for a code.
///
/// Returns `None` for [`Code::Unknown`]; callers treat that as a bug, not
/// as something to show a user.
pub fn diag_msg_text(code: Code) -> Option<&'static str> {
    let text = match code {
        Code::Unknown => return None,
        Code::E0001 => "invalid option",
        Code::E0002 => "invalid argument",
        Code::E0003 => "missing filename",
        Code::E0004 => "invalid filename",
        Code::E0005 => "input file not found",
        Code::E0006 => "conflicting options",
        Code::W0101 => "disabled code section skipped",
        Code::E0102 => "invalid input character",
        Code::E0103 => "end of file in block comment",
        Code::E0104 => "new line in string literal",
        Code::E0105 => "end of file in string literal",
        Code::E0106 => "invalid escape sequence",
        Code::E0107 => "end of file in pragma",
        Code::E0108 => "missing suffix in number literal",
        Code::E0109 => "missing exponent in real number literal",
        Code::E0110 => "identifier exceeds maximum length",
        Code::E0111 => "maximum comment nesting level exceeded",
        Code::E0201 => "unexpected token",
        Code::W0201 => "semicolon after field list sequence",
        Code::W0202 => "empty field list sequence",
        Code::W0203 => "semicolon after formal parameter list",
        Code::W0204 => "semicolon after statement sequence",
        Code::W0205 => "empty statement sequence",
        Code::E0301 => "closing identifier does not match",
    };
    Some(text)
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Severity level for diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Severity {
    #[default]
    Error,
    Warning,
}

impl Severity {
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warning => "warning",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_as_str() {
        assert_eq!(Code::E0201.as_str(), "E0201");
        assert_eq!(Code::W0101.as_str(), "W0101");
    }

    #[test]
    fn test_code_display() {
        assert_eq!(format!("{}", Code::E0110), "E0110");
    }

    #[test]
    fn test_categories_partition_valid_codes() {
        for code in Code::ALL {
            let memberships = [
                code.is_option_error(),
                code.is_lexical_error(),
                code.is_syntax_error(),
                code.is_semantic_error(),
            ];
            assert_eq!(
                memberships.iter().filter(|m| **m).count(),
                1,
                "{code} must be in exactly one category"
            );
            assert!(diag_msg_text(*code).is_some());
        }
    }

    #[test]
    fn test_unknown_code_has_no_text() {
        assert_eq!(diag_msg_text(Code::Unknown), None);
        assert!(!Code::Unknown.is_error());
        assert_eq!(Code::Unknown.category_description(), "unknown");
    }

    #[test]
    fn test_severity_is_implied_by_code() {
        assert_eq!(Code::W0204.severity(), Severity::Warning);
        assert_eq!(Code::E0201.severity(), Severity::Error);
        assert!(Code::E0102.is_error());
        assert!(Code::W0101.is_warning());
    }
}
