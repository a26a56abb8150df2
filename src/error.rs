//! Error types of the public API.
//!
//! - [`ParseException`]: the one failure a caller sees for bad input, lexical
//!   or syntactic, or for a source file that cannot be read
//! - [`ConfigurationError`]: a dialect that cannot be selected or has no
//!   front-end
//! - [`InternalBuilderError`]: a tree shape the AST builder cannot map; a
//!   defect, never caused by the input
//!
//! [`HdlError`] wraps all three.

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::base::{LineIndex, TextRange};
use crate::language::Language;
use crate::parser::{ErrorCode, SyntaxError, SyntaxKind};

/// What went wrong while reading a source unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParseErrorKind {
    /// A character sequence the lexer does not recognise
    Lexical,
    /// A token sequence the grammar does not accept
    Syntax,
    /// The source file could not be read
    Io,
}

/// A location in a source unit. Lines and columns are 1-based.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct SourceLocation {
    pub file: Option<PathBuf>,
    pub line: usize,
    pub column: usize,
    /// Byte offset
    pub offset: usize,
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.file {
            Some(file) => write!(f, "{}:{}:{}", file.display(), self.line, self.column),
            None => write!(f, "{}:{}", self.line, self.column),
        }
    }
}

/// The specific error behind a [`ParseException`]
#[derive(Debug, Error)]
pub enum ParseCause {
    #[error(transparent)]
    Syntax(SyntaxError),
    #[error(transparent)]
    Io(io::Error),
}

/// Failure to parse one source unit
#[derive(Debug, Error)]
#[error("{location}: {message}")]
pub struct ParseException {
    pub kind: ParseErrorKind,
    pub message: String,
    pub location: SourceLocation,
    pub code: Option<ErrorCode>,
    pub hint: Option<String>,
    #[source]
    pub cause: Option<ParseCause>,
}

impl ParseException {
    /// Locate a front-end error in `source`
    pub fn from_syntax(error: SyntaxError, source: &str, file: Option<&Path>) -> Self {
        let index = LineIndex::new(source);
        let start = error.range.start();
        let line_col = index.line_col(start);
        let kind = if error.is_lexical() {
            ParseErrorKind::Lexical
        } else {
            ParseErrorKind::Syntax
        };
        Self {
            kind,
            message: error.message.clone(),
            location: SourceLocation {
                file: file.map(Path::to_path_buf),
                line: line_col.line as usize + 1,
                column: line_col.col as usize + 1,
                offset: u32::from(start) as usize,
            },
            code: Some(error.code),
            hint: error.hint.clone(),
            cause: Some(ParseCause::Syntax(error)),
        }
    }

    pub fn io(error: io::Error, file: &Path) -> Self {
        Self {
            kind: ParseErrorKind::Io,
            message: format!("cannot read {}: {error}", file.display()),
            location: SourceLocation {
                file: Some(file.to_path_buf()),
                ..SourceLocation::default()
            },
            code: None,
            hint: None,
            cause: Some(ParseCause::Io(error)),
        }
    }

    /// The front-end error, when there is one
    pub fn syntax_error(&self) -> Option<&SyntaxError> {
        match &self.cause {
            Some(ParseCause::Syntax(err)) => Some(err),
            _ => None,
        }
    }
}

/// Invalid dialect selection
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    #[error("no front-end for {0}")]
    UnsupportedDialect(Language),

    #[error("unknown dialect '{0}'")]
    UnknownDialect(String),

    #[error("no dialect for file extension '{0}'")]
    UnknownExtension(String),
}

/// The AST builder met a tree it cannot map.
///
/// The front-end only produces trees the builder understands, so this always
/// points at a defect in the crate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("internal builder error: {message} (at {node:?} {range:?})")]
pub struct InternalBuilderError {
    pub message: String,
    pub node: SyntaxKind,
    pub range: TextRange,
}

impl InternalBuilderError {
    pub fn new(message: impl Into<String>, node: SyntaxKind, range: TextRange) -> Self {
        Self {
            message: message.into(),
            node,
            range,
        }
    }
}

/// Any failure of the public API
#[derive(Debug, Error)]
pub enum HdlError {
    #[error(transparent)]
    Parse(#[from] ParseException),

    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error(transparent)]
    Internal(#[from] InternalBuilderError),
}

impl HdlError {
    pub fn is_parse_error(&self) -> bool {
        matches!(self, Self::Parse(_))
    }

    pub fn as_parse(&self) -> Option<&ParseException> {
        match self {
            Self::Parse(err) => Some(err),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base::TextSize;

    #[test]
    fn test_location_is_one_based() {
        let source = "library ieee;\nuse ieee.x;\n  @";
        let offset = source.find('@').unwrap() as u32;
        let err = SyntaxError::new(
            "invalid character '@'",
            TextRange::at(TextSize::new(offset), TextSize::new(1)),
            ErrorCode::E0101,
        );
        let exc = ParseException::from_syntax(err, source, Some(Path::new("a.vhd")));
        assert_eq!(exc.kind, ParseErrorKind::Lexical);
        assert_eq!(exc.location.line, 3);
        assert_eq!(exc.location.column, 3);
        assert_eq!(exc.location.offset, offset as usize);
        assert_eq!(exc.to_string(), "a.vhd:3:3: invalid character '@'");
        assert_eq!(exc.syntax_error().map(|e| e.code), Some(ErrorCode::E0101));
    }

    #[test]
    fn test_syntax_kind_and_hint() {
        let err = SyntaxError::new("expected ';'", TextRange::empty(TextSize::new(0)), ErrorCode::E0201)
            .with_hint("add ';'");
        let exc = ParseException::from_syntax(err, "x", None);
        assert_eq!(exc.kind, ParseErrorKind::Syntax);
        assert_eq!(exc.hint.as_deref(), Some("add ';'"));
        assert_eq!(exc.to_string(), "1:1: expected ';'");
    }

    #[test]
    fn test_hdl_error_classification() {
        let err: HdlError = ConfigurationError::UnsupportedDialect(Language::SystemVerilog).into();
        assert!(!err.is_parse_error());
        assert_eq!(err.to_string(), "no front-end for systemverilog");

        let io = ParseException::io(
            io::Error::new(io::ErrorKind::NotFound, "gone"),
            Path::new("missing.vhd"),
        );
        let err: HdlError = io.into();
        assert!(err.is_parse_error());
        assert_eq!(err.as_parse().map(|e| e.kind), Some(ParseErrorKind::Io));
    }
}
