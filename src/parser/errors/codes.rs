//! Error code definitions for parser diagnostics
//!
//! Error codes follow a naming convention: E{category}{number}
//! - E01xx: Lexical errors (invalid tokens)
//! - E02xx: Structural errors (semicolons, delimiters, `end` pairing)
//! - E03xx: Declaration errors
//! - E04xx: Expression errors
//! - E05xx: Context clause and design unit errors
//! - E06xx: Statement errors
//! - E09xx: Generic/fallback errors

use std::fmt;

/// Error codes for parser diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub enum ErrorCode {
    // =========================================================================
    // E01xx: Lexical errors (invalid tokens)
    // =========================================================================
    /// Invalid or unexpected character in source
    E0101,
    /// Unterminated string literal
    E0102,
    /// Unterminated block comment
    E0103,
    /// Invalid numeric literal
    E0104,
    /// Compiler directive that needs a preprocessor
    E0105,

    // =========================================================================
    // E02xx: Structural errors
    // =========================================================================
    /// Missing semicolon
    E0201,
    /// Unclosed parenthesis `(`
    E0202,
    /// Unclosed bracket `[` or brace `{`
    E0203,
    /// `end` with nothing to close
    E0204,
    /// Closing label does not match the opened declaration
    E0205,
    /// Input ended inside a construct
    E0206,
    /// Construct not closed by its `end`
    E0207,

    // =========================================================================
    // E03xx: Declaration errors
    // =========================================================================
    /// Missing identifier/name
    E0301,
    /// Invalid declaration
    E0302,
    /// Invalid interface (port/generic/parameter) declaration
    E0303,
    /// Invalid type definition
    E0304,
    /// Missing type mark
    E0305,

    // =========================================================================
    // E04xx: Expression errors
    // =========================================================================
    /// Invalid expression
    E0401,
    /// Logical operators mixed without parentheses
    E0402,
    /// Missing expression where expected
    E0403,
    /// Invalid association element
    E0404,

    // =========================================================================
    // E05xx: Context clauses and design units
    // =========================================================================
    /// Invalid library clause
    E0501,
    /// Invalid use clause
    E0502,
    /// Design unit kind not supported
    E0503,

    // =========================================================================
    // E06xx: Statement errors
    // =========================================================================
    /// Invalid sequential statement
    E0601,
    /// Invalid concurrent statement
    E0602,
    /// Invalid module item
    E0603,

    // =========================================================================
    // E09xx: Generic/fallback errors
    // =========================================================================
    /// Unexpected token in current context
    E0901,
    /// Expected a specific token
    E0902,
    /// Brackets or blocks nested past the parser's depth limit
    E0903,
    /// Internal parser error
    E0999,
}

impl ErrorCode {
    /// Get the string representation of the error code (e.g., "E0201")
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::E0101 => "E0101",
            Self::E0102 => "E0102",
            Self::E0103 => "E0103",
            Self::E0104 => "E0104",
            Self::E0105 => "E0105",
            Self::E0201 => "E0201",
            Self::E0202 => "E0202",
            Self::E0203 => "E0203",
            Self::E0204 => "E0204",
            Self::E0205 => "E0205",
            Self::E0206 => "E0206",
            Self::E0207 => "E0207",
            Self::E0301 => "E0301",
            Self::E0302 => "E0302",
            Self::E0303 => "E0303",
            Self::E0304 => "E0304",
            Self::E0305 => "E0305",
            Self::E0401 => "E0401",
            Self::E0402 => "E0402",
            Self::E0403 => "E0403",
            Self::E0404 => "E0404",
            Self::E0501 => "E0501",
            Self::E0502 => "E0502",
            Self::E0503 => "E0503",
            Self::E0601 => "E0601",
            Self::E0602 => "E0602",
            Self::E0603 => "E0603",
            Self::E0901 => "E0901",
            Self::E0902 => "E0902",
            Self::E0903 => "E0903",
            Self::E0999 => "E0999",
        }
    }

    /// Get a short description of the error category
    pub fn category_description(&self) -> &'static str {
        match self {
            Self::E0101 | Self::E0102 | Self::E0103 | Self::E0104 | Self::E0105 => "lexical error",
            Self::E0201
            | Self::E0202
            | Self::E0203
            | Self::E0204
            | Self::E0205
            | Self::E0206
            | Self::E0207 => "structural error",
            Self::E0301 | Self::E0302 | Self::E0303 | Self::E0304 | Self::E0305 => {
                "declaration error"
            }
            Self::E0401 | Self::E0402 | Self::E0403 | Self::E0404 => "expression error",
            Self::E0501 | Self::E0502 | Self::E0503 => "design unit error",
            Self::E0601 | Self::E0602 | Self::E0603 => "statement error",
            Self::E0901 | Self::E0902 | Self::E0903 | Self::E0999 => "syntax error",
        }
    }

    /// Get the default message template for this error code
    pub fn default_message(&self) -> &'static str {
        match self {
            Self::E0101 => "invalid character",
            Self::E0102 => "unterminated string literal",
            Self::E0103 => "unterminated block comment",
            Self::E0104 => "invalid numeric literal",
            Self::E0105 => "unsupported compiler directive",
            Self::E0201 => "missing semicolon",
            Self::E0202 => "unclosed parenthesis",
            Self::E0203 => "unclosed bracket",
            Self::E0204 => "unmatched 'end'",
            Self::E0205 => "mismatched closing label",
            Self::E0206 => "unexpected end of file",
            Self::E0207 => "unclosed block",
            Self::E0301 => "missing identifier",
            Self::E0302 => "invalid declaration",
            Self::E0303 => "invalid interface declaration",
            Self::E0304 => "invalid type definition",
            Self::E0305 => "missing type mark",
            Self::E0401 => "invalid expression",
            Self::E0402 => "mixed logical operators",
            Self::E0403 => "expected expression",
            Self::E0404 => "invalid association",
            Self::E0501 => "invalid library clause",
            Self::E0502 => "invalid use clause",
            Self::E0503 => "unsupported design unit",
            Self::E0601 => "invalid sequential statement",
            Self::E0602 => "invalid concurrent statement",
            Self::E0603 => "invalid module item",
            Self::E0901 => "unexpected token",
            Self::E0902 => "expected token",
            Self::E0903 => "nested too deeply",
            Self::E0999 => "internal parser error",
        }
    }

    /// Lexical errors come from the tokenizer, everything else from the grammar
    pub fn is_lexical(&self) -> bool {
        matches!(
            self,
            Self::E0101 | Self::E0102 | Self::E0103 | Self::E0104 | Self::E0105
        )
    }

    /// Check if this is a structural error (delimiter or block pairing)
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            Self::E0201
                | Self::E0202
                | Self::E0203
                | Self::E0204
                | Self::E0205
                | Self::E0206
                | Self::E0207
        )
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_as_str() {
        assert_eq!(ErrorCode::E0201.as_str(), "E0201");
        assert_eq!(ErrorCode::E0901.as_str(), "E0901");
    }

    #[test]
    fn test_error_code_display() {
        assert_eq!(format!("{}", ErrorCode::E0204), "E0204");
    }

    #[test]
    fn test_error_code_default_message() {
        assert_eq!(ErrorCode::E0201.default_message(), "missing semicolon");
        assert_eq!(ErrorCode::E0102.default_message(), "unterminated string literal");
    }

    #[test]
    fn test_error_code_category() {
        assert_eq!(ErrorCode::E0101.category_description(), "lexical error");
        assert_eq!(ErrorCode::E0205.category_description(), "structural error");
        assert_eq!(ErrorCode::E0402.category_description(), "expression error");
    }

    #[test]
    fn test_is_lexical() {
        assert!(ErrorCode::E0102.is_lexical());
        assert!(ErrorCode::E0105.is_lexical());
        assert!(!ErrorCode::E0204.is_lexical());
        assert!(!ErrorCode::E0901.is_lexical());
    }

    #[test]
    fn test_is_structural() {
        assert!(ErrorCode::E0201.is_structural());
        assert!(ErrorCode::E0204.is_structural());
        assert!(!ErrorCode::E0301.is_structural());
    }
}
