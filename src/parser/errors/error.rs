//! Syntax error type
//!
//! Carries:
//! - Error codes for categorization
//! - Hints/suggestions for fixes
//! - Related source locations

use rowan::{TextRange, TextSize};
use thiserror::Error;

use super::codes::ErrorCode;
use super::context::ParseContext;

/// Related location information for an error
///
/// Used to point to related source locations, e.g.,
/// "process opened here" pointing to the unclosed `process` keyword.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelatedInfo {
    /// Description of this related location
    pub message: String,
    /// Source range
    pub range: TextRange,
}

impl RelatedInfo {
    pub fn new(message: impl Into<String>, range: TextRange) -> Self {
        Self {
            message: message.into(),
            range,
        }
    }
}

/// A lexical or syntax error reported by a front-end
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{code}: {message}")]
pub struct SyntaxError {
    /// Human-readable error message
    pub message: String,
    /// Source location
    pub range: TextRange,
    /// Categorized error code
    pub code: ErrorCode,
    /// Optional suggestion for fixing the error
    pub hint: Option<String>,
    /// Related source locations
    pub related: Vec<RelatedInfo>,
}

impl SyntaxError {
    pub fn new(message: impl Into<String>, range: TextRange, code: ErrorCode) -> Self {
        Self {
            message: message.into(),
            range,
            code,
            hint: None,
            related: vec![],
        }
    }

    /// Create an error at a specific offset with zero-width range
    pub fn at_offset(message: impl Into<String>, offset: TextSize, code: ErrorCode) -> Self {
        Self::new(message, TextRange::empty(offset), code)
    }

    /// Error message of the form "unexpected X in port clause, expected ..."
    pub fn in_context(
        found: &str,
        context: ParseContext,
        range: TextRange,
        code: ErrorCode,
    ) -> Self {
        let message = format!(
            "unexpected {} {}, expected {}",
            found,
            context.description(),
            context.expected_description()
        );
        Self::new(message, range, code)
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    pub fn with_related(mut self, info: RelatedInfo) -> Self {
        self.related.push(info);
        self
    }

    pub fn is_lexical(&self) -> bool {
        self.code.is_lexical()
    }

    /// Format the error with its hint for display
    pub fn format(&self) -> String {
        let mut result = format!("{}: {}", self.code, self.message);
        if let Some(hint) = &self.hint {
            result.push_str(&format!("\n  hint: {}", hint));
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_syntax_error_new() {
        let err = SyntaxError::new(
            "expected ';'",
            TextRange::new(TextSize::new(10), TextSize::new(11)),
            ErrorCode::E0201,
        );

        assert_eq!(err.message, "expected ';'");
        assert_eq!(err.code, ErrorCode::E0201);
        assert!(err.hint.is_none());
        assert!(err.related.is_empty());
        assert!(!err.is_lexical());
    }

    #[test]
    fn test_syntax_error_with_related() {
        let err = SyntaxError::new(
            "missing 'end process'",
            TextRange::empty(TextSize::new(50)),
            ErrorCode::E0207,
        )
        .with_related(RelatedInfo::new(
            "process opened here",
            TextRange::new(TextSize::new(10), TextSize::new(17)),
        ));

        assert_eq!(err.related.len(), 1);
        assert_eq!(err.related[0].message, "process opened here");
    }

    #[test]
    fn test_in_context_message() {
        let err = SyntaxError::in_context(
            "'begin'",
            ParseContext::PortClause,
            TextRange::empty(TextSize::new(3)),
            ErrorCode::E0901,
        );
        assert!(err.message.contains("'begin'"));
        assert!(err.message.contains("in port clause"));
        assert!(err.message.contains("expected"));
    }

    #[test]
    fn test_format_and_display() {
        let err = SyntaxError::new(
            "expected ';'",
            TextRange::empty(TextSize::new(10)),
            ErrorCode::E0201,
        )
        .with_hint("add ';' at the end of the declaration");

        assert_eq!(err.to_string(), "E0201: expected ';'");
        let formatted = err.format();
        assert!(formatted.contains("hint"));
        assert!(formatted.contains("add ';'"));
    }
}
