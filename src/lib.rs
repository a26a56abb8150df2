//! # hdl-convertor
//!
//! VHDL and Verilog front-ends that build one language-agnostic syntax tree.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! serialize → canonical VHDL text (and JSON) for trees
//!   ↓
//! builder   → CST to hdl_ast lowering, one per dialect
//!   ↓
//! hdl_ast   → shared tree: objects, statements, expressions
//!   ↓
//! parser    → Logos lexers, recursive-descent grammars, rowan CST
//!   ↓
//! base      → Primitives (LineIndex, Span, TextRange)
//! ```
//!
//! ## Usage
//!
//! ```
//! use hdlconv::{HdlObject, Language};
//!
//! let result = hdlconv::parse("entity blinky is end entity;", Language::Vhdl)?;
//! assert!(matches!(result.objs[0], HdlObject::ModuleDec(_)));
//! # Ok::<(), hdlconv::HdlError>(())
//! ```

// ============================================================================
// MODULES (dependency order: base → parser → hdl_ast → builder → serialize)
// ============================================================================

/// Foundation types: LineIndex, Span, TextRange
pub mod base;

/// Parser: Logos lexers, recursive-descent grammars, rowan CST
pub mod parser;

/// Language-agnostic syntax tree
pub mod hdl_ast;

mod builder;

/// Public error types
pub mod error;

/// Dialect selection
pub mod language;

/// Per-call configuration
pub mod options;

/// Canonical text output
pub mod serialize;

use std::path::{Path, PathBuf};

use rayon::prelude::*;
use tracing::debug;

// Re-export foundation types
pub use base::{LineCol, LineIndex, Position, Span, TextRange, TextSize};

pub use error::{
    ConfigurationError, HdlError, InternalBuilderError, ParseCause, ParseErrorKind,
    ParseException, SourceLocation,
};
pub use hdl_ast::*;
pub use language::Language;
pub use options::ParseOptions;
pub use serialize::{ToHdlText, serialize};

#[cfg(feature = "json")]
pub use serialize::to_json;

/// Where a source unit comes from
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Source<'a> {
    Text(&'a str),
    File(&'a Path),
}

impl<'a> From<&'a str> for Source<'a> {
    fn from(text: &'a str) -> Self {
        Self::Text(text)
    }
}

impl<'a> From<&'a String> for Source<'a> {
    fn from(text: &'a String) -> Self {
        Self::Text(text)
    }
}

impl<'a> From<&'a Path> for Source<'a> {
    fn from(path: &'a Path) -> Self {
        Self::File(path)
    }
}

impl<'a> From<&'a PathBuf> for Source<'a> {
    fn from(path: &'a PathBuf) -> Self {
        Self::File(path)
    }
}

/// Parse one source unit with default options
pub fn parse<'a>(source: impl Into<Source<'a>>, language: Language) -> Result<ParseResult, HdlError> {
    parse_with(source, &ParseOptions::new(language))
}

/// Parse one source unit.
///
/// The first lexical or syntax error aborts the unit; no partial tree is
/// returned. A dialect without a front-end is rejected before any input is
/// read.
pub fn parse_with<'a>(
    source: impl Into<Source<'a>>,
    options: &ParseOptions,
) -> Result<ParseResult, HdlError> {
    if options.language == Language::SystemVerilog {
        return Err(ConfigurationError::UnsupportedDialect(options.language).into());
    }
    match source.into() {
        Source::Text(text) => parse_text(text, options),
        Source::File(path) => {
            let text = std::fs::read_to_string(path).map_err(|e| ParseException::io(e, path))?;
            let options = options.clone().with_file(path);
            parse_text(&text, &options)
        }
    }
}

/// Read and parse one file
pub fn parse_file(path: impl AsRef<Path>, language: Language) -> Result<ParseResult, HdlError> {
    parse_with(path.as_ref(), &ParseOptions::new(language))
}

/// Parse independent files in parallel. Results come back in input order.
pub fn parse_files<P>(paths: &[P], language: Language) -> Vec<Result<ParseResult, HdlError>>
where
    P: AsRef<Path> + Sync,
{
    paths
        .par_iter()
        .map(|path| parse_file(path, language))
        .collect()
}

fn parse_text(text: &str, options: &ParseOptions) -> Result<ParseResult, HdlError> {
    let file = options.file.as_deref();
    debug!(
        "parsing {} source ({} bytes) from {}",
        options.language,
        text.len(),
        file.map_or_else(|| "<text>".to_string(), |f| f.display().to_string())
    );
    let parsed = match options.language {
        Language::Vhdl => parser::parse_vhdl(text),
        Language::Verilog => parser::parse_verilog(text),
        Language::SystemVerilog => {
            return Err(ConfigurationError::UnsupportedDialect(options.language).into());
        }
    }
    .map_err(|e| ParseException::from_syntax(e, text, file))?;
    let result = builder::build(&parsed, text, options.language, options.collect_docs)?;
    debug!("built {} top-level objects", result.objs.len());
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_systemverilog_is_a_configuration_error() {
        let err = parse("module m; endmodule", Language::SystemVerilog).unwrap_err();
        assert!(matches!(
            err,
            HdlError::Configuration(ConfigurationError::UnsupportedDialect(Language::SystemVerilog))
        ));
    }

    #[test]
    fn test_syntax_error_is_a_parse_exception() {
        let err = parse("entity is end;", Language::Vhdl).unwrap_err();
        assert!(err.is_parse_error());
        let exc = err.as_parse().unwrap();
        assert_eq!(exc.kind, ParseErrorKind::Syntax);
        assert_eq!(exc.location.line, 1);
    }

    #[test]
    fn test_missing_file_is_an_io_error() {
        let err = parse_file("no/such/file.vhd", Language::Vhdl).unwrap_err();
        assert_eq!(err.as_parse().map(|e| e.kind), Some(ParseErrorKind::Io));
    }

    #[test]
    fn test_options_control_docs() {
        let source = "-- Blinks\nentity blinky is end;\n";
        let with_docs = parse(source, Language::Vhdl).unwrap();
        assert_eq!(with_docs.objs[0].doc(), Some(" Blinks\n"));
        let options = ParseOptions::new(Language::Vhdl).with_collect_docs(false);
        let without = parse_with(source, &options).unwrap();
        assert_eq!(without.objs[0].doc(), None);
    }

    #[test]
    fn test_result_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ParseResult>();
        assert_send_sync::<HdlError>();
    }
}
