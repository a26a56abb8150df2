//! AST builders: lower a dialect CST into the shared [`crate::hdl_ast`] model.
//!
//! Each dialect has its own builder module; both only read the tree through
//! the typed wrappers and helpers in [`crate::parser::ast`]. A builder never
//! repairs input. A tree shape it does not expect is reported as an
//! [`InternalBuilderError`].

pub(crate) mod literal;
mod verilog;
mod vhdl;

pub(crate) use vhdl::InterfaceRole;

use crate::base::LineIndex;
use crate::error::InternalBuilderError;
use crate::hdl_ast::{HdlPosition, ParseResult};
use crate::language::Language;
use crate::parser::ast::{doc_comment, significant_range};
use crate::parser::{Parse, SyntaxKind, SyntaxNode, SyntaxToken};

pub(crate) type BuildResult<T> = Result<T, InternalBuilderError>;

/// State shared by every lowering function of one build
pub(crate) struct BuildContext {
    line_index: LineIndex,
    collect_docs: bool,
}

impl BuildContext {
    pub fn new(source: &str, collect_docs: bool) -> Self {
        Self {
            line_index: LineIndex::new(source),
            collect_docs,
        }
    }

    /// Span of the node without its leading trivia
    pub fn position(&self, node: &SyntaxNode) -> HdlPosition {
        HdlPosition::new(self.line_index.span(significant_range(node)))
    }

    pub fn token_position(&self, token: &SyntaxToken) -> HdlPosition {
        HdlPosition::new(self.line_index.span(token.text_range()))
    }

    pub fn doc(&self, node: &SyntaxNode) -> Option<String> {
        if self.collect_docs {
            doc_comment(node)
        } else {
            None
        }
    }
}

/// Lower a parsed source unit.
pub fn build(
    parse: &Parse,
    source: &str,
    language: Language,
    collect_docs: bool,
) -> Result<ParseResult, InternalBuilderError> {
    let ctx = BuildContext::new(source, collect_docs);
    let root = parse.syntax();
    let objs = match language {
        Language::Vhdl => vhdl::design_file(&ctx, &root)?,
        Language::Verilog => verilog::source_text(&ctx, &root)?,
        Language::SystemVerilog => {
            return Err(unexpected(&root, "no builder for systemverilog"));
        }
    };
    Ok(ParseResult { language, objs })
}

/// A required child is absent
pub(crate) fn missing(node: &SyntaxNode, what: &str) -> InternalBuilderError {
    InternalBuilderError::new(
        format!("missing {what} in {:?}", node.kind()),
        node.kind(),
        node.text_range(),
    )
}

pub(crate) fn unexpected(node: &SyntaxNode, message: impl Into<String>) -> InternalBuilderError {
    InternalBuilderError::new(message, node.kind(), node.text_range())
}

/// Child nodes that carry meaning: labels and attribute instances are
/// read separately or dropped.
pub(crate) fn operands(node: &SyntaxNode) -> impl Iterator<Item = SyntaxNode> {
    node.children().filter(|n| {
        !matches!(n.kind(), SyntaxKind::LABEL | SyntaxKind::ATTRIBUTE_INSTANCE)
    })
}

/// The `n`th operand, or an error naming what was expected there
pub(crate) fn operand(node: &SyntaxNode, n: usize, what: &str) -> BuildResult<SyntaxNode> {
    operands(node).nth(n).ok_or_else(|| missing(node, what))
}
