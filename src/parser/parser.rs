//! Recursive descent parser core
//!
//! Builds a rowan GreenNode tree from tokens. Trivia is attached in front of
//! the next significant token, so the CST stays lossless. There is no error
//! recovery: the first [`SyntaxError`] aborts the parse and the partially
//! built tree is dropped.

use rowan::{Checkpoint, GreenNode, GreenNodeBuilder, TextRange, TextSize};

use super::errors::{ErrorCode, ParseContext, SyntaxError};
use super::grammar::{self, GrammarParser};
use super::lexer::{Token, check_tokens, tokenize_verilog, tokenize_vhdl};
use super::syntax_kind::SyntaxKind;

/// Deepest nesting of expressions and statement blocks the grammar follows
pub const MAX_NESTING_DEPTH: usize = 128;

/// Result type of every grammar rule
pub type PResult<T = ()> = Result<T, SyntaxError>;

/// Parse result containing the green tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parse {
    pub green: GreenNode,
}

impl Parse {
    /// Get the root syntax node
    pub fn syntax(&self) -> super::SyntaxNode {
        super::SyntaxNode::new_root(self.green.clone())
    }
}

/// Parse VHDL source code into a CST
pub fn parse_vhdl(input: &str) -> Result<Parse, SyntaxError> {
    let tokens = tokenize_vhdl(input);
    check_tokens(&tokens)?;
    let mut parser = Parser::new(&tokens);
    grammar::vhdl::design_file(&mut parser)?;
    Ok(parser.finish())
}

/// Parse Verilog source code into a CST
pub fn parse_verilog(input: &str) -> Result<Parse, SyntaxError> {
    let tokens = tokenize_verilog(input);
    check_tokens(&tokens)?;
    let mut parser = Parser::new(&tokens);
    grammar::verilog::source_text(&mut parser)?;
    Ok(parser.finish())
}

/// The parser state
pub(crate) struct Parser<'t, 'a> {
    tokens: &'t [Token<'a>],
    pos: usize,
    builder: GreenNodeBuilder<'static>,
    contexts: Vec<ParseContext>,
    depth: usize,
}

impl<'t, 'a> Parser<'t, 'a> {
    pub(crate) fn new(tokens: &'t [Token<'a>]) -> Self {
        Self {
            tokens,
            pos: 0,
            builder: GreenNodeBuilder::new(),
            contexts: Vec::new(),
            depth: 0,
        }
    }

    pub(crate) fn finish(self) -> Parse {
        Parse {
            green: self.builder.finish(),
        }
    }

    /// Index of the nth significant token at or after `pos`
    fn significant(&self, n: usize) -> Option<usize> {
        self.tokens
            .iter()
            .enumerate()
            .skip(self.pos)
            .filter(|(_, t)| !t.kind.is_trivia())
            .nth(n)
            .map(|(idx, _)| idx)
    }

    fn current(&self) -> Option<&Token<'a>> {
        self.significant(0).map(|idx| &self.tokens[idx])
    }

    fn eof_range(&self) -> TextRange {
        let end = self
            .tokens
            .last()
            .map(|t| t.range().end())
            .unwrap_or_else(|| TextSize::new(0));
        TextRange::empty(end)
    }

    fn context(&self) -> ParseContext {
        self.contexts.last().copied().unwrap_or_default()
    }
}

impl GrammarParser for Parser<'_, '_> {
    // =========================================================================
    // Token inspection
    // =========================================================================

    fn current_kind(&self) -> SyntaxKind {
        self.current().map(|t| t.kind).unwrap_or(SyntaxKind::ERROR)
    }

    fn current_text(&self) -> &str {
        self.current().map(|t| t.text).unwrap_or("")
    }

    fn current_range(&self) -> TextRange {
        self.current()
            .map(|t| t.range())
            .unwrap_or_else(|| self.eof_range())
    }

    fn at_eof(&self) -> bool {
        self.current().is_none()
    }

    fn nth(&self, n: usize) -> SyntaxKind {
        self.significant(n)
            .map(|idx| self.tokens[idx].kind)
            .unwrap_or(SyntaxKind::ERROR)
    }

    fn nth_text(&self, n: usize) -> &str {
        self.significant(n).map(|idx| self.tokens[idx].text).unwrap_or("")
    }

    // =========================================================================
    // Token consumption
    // =========================================================================

    fn bump(&mut self) {
        let Some(target) = self.significant(0) else {
            return;
        };
        while self.pos <= target {
            let token = &self.tokens[self.pos];
            self.builder.token(token.kind.into(), token.text);
            self.pos += 1;
        }
    }

    fn bump_remap(&mut self, kind: SyntaxKind) {
        let Some(target) = self.significant(0) else {
            return;
        };
        while self.pos < target {
            let token = &self.tokens[self.pos];
            self.builder.token(token.kind.into(), token.text);
            self.pos += 1;
        }
        self.builder.token(kind.into(), self.tokens[target].text);
        self.pos += 1;
    }

    fn flush_trivia(&mut self) {
        while let Some(token) = self.tokens.get(self.pos) {
            if !token.kind.is_trivia() {
                break;
            }
            self.builder.token(token.kind.into(), token.text);
            self.pos += 1;
        }
    }

    // =========================================================================
    // Node building
    // =========================================================================

    fn start_node(&mut self, kind: SyntaxKind) {
        self.builder.start_node(kind.into());
    }

    fn finish_node(&mut self) {
        self.builder.finish_node();
    }

    fn checkpoint(&self) -> Checkpoint {
        self.builder.checkpoint()
    }

    fn start_node_at(&mut self, checkpoint: Checkpoint, kind: SyntaxKind) {
        self.builder.start_node_at(checkpoint, kind.into());
    }

    // =========================================================================
    // Nesting
    // =========================================================================

    fn enter_nesting(&mut self) -> PResult {
        if self.depth >= MAX_NESTING_DEPTH {
            return Err(self.error(
                ErrorCode::E0903,
                format!("nested more than {MAX_NESTING_DEPTH} levels deep"),
            ));
        }
        self.depth += 1;
        Ok(())
    }

    fn exit_nesting(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    // =========================================================================
    // Errors
    // =========================================================================

    fn push_context(&mut self, context: ParseContext) {
        self.contexts.push(context);
    }

    fn pop_context(&mut self) {
        self.contexts.pop();
    }

    fn error(&self, code: ErrorCode, message: impl Into<String>) -> SyntaxError {
        let message = format!("{} {}", message.into(), self.context().description());
        SyntaxError::new(message, self.current_range(), code)
    }

    fn expected(&self, what: &str) -> SyntaxError {
        let found = self.current_kind().display_name();
        let code = if self.at_eof() {
            ErrorCode::E0206
        } else if what == "';'" {
            ErrorCode::E0201
        } else {
            ErrorCode::E0902
        };
        self.error(code, format!("expected {what}, found {found}"))
    }

    fn unexpected(&self, code: ErrorCode) -> SyntaxError {
        if self.at_eof() {
            return self.expected(self.context().expected_description());
        }
        let found = format!("{} '{}'", self.current_kind().display_name(), self.current_text());
        let found = if self.current_kind().is_keyword() || self.current_kind().is_punct() {
            self.current_kind().display_name()
        } else {
            found
        };
        SyntaxError::in_context(&found, self.context(), self.current_range(), code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::SyntaxNode;

    fn significant_kinds(node: &SyntaxNode) -> Vec<SyntaxKind> {
        node.descendants_with_tokens()
            .filter_map(|e| e.into_token())
            .map(|t| t.kind())
            .filter(|k| !k.is_trivia())
            .collect()
    }

    #[test]
    fn test_parse_is_lossless() {
        let input = "-- header\nlibrary ieee; -- trailing\n\nuse ieee.std_logic_1164.all;\n";
        let parse = parse_vhdl(input).unwrap();
        assert_eq!(parse.syntax().text().to_string(), input);
    }

    #[test]
    fn test_bump_attaches_leading_trivia() {
        let tokens = tokenize_vhdl("  library  x ;");
        let mut p = Parser::new(&tokens);
        p.start_node(SyntaxKind::SOURCE_FILE);
        assert_eq!(p.current_kind(), SyntaxKind::LIBRARY_KW);
        assert_eq!(p.nth(1), SyntaxKind::IDENT);
        assert_eq!(p.nth_text(1), "x");
        p.bump();
        p.bump();
        p.bump();
        assert!(p.at_eof());
        p.flush_trivia();
        p.finish_node();
        let root = p.finish().syntax();
        assert_eq!(root.text().to_string(), "  library  x ;");
        assert_eq!(
            significant_kinds(&root),
            vec![SyntaxKind::LIBRARY_KW, SyntaxKind::IDENT, SyntaxKind::SEMICOLON]
        );
    }

    #[test]
    fn test_expected_at_eof_reports_end_of_file() {
        let tokens = tokenize_vhdl("library ");
        let mut p = Parser::new(&tokens);
        p.start_node(SyntaxKind::SOURCE_FILE);
        p.bump();
        let err = p.expected("identifier");
        assert_eq!(err.code, ErrorCode::E0206);
        assert!(err.message.contains("end of file"));
        assert_eq!(err.range, TextRange::empty(TextSize::new(8)));
    }

    #[test]
    fn test_expected_semicolon_code() {
        let tokens = tokenize_vhdl("library ieee use");
        let mut p = Parser::new(&tokens);
        p.start_node(SyntaxKind::SOURCE_FILE);
        p.bump();
        p.bump();
        let err = p.expected("';'");
        assert_eq!(err.code, ErrorCode::E0201);
        assert!(err.message.contains("found 'use'"));
    }

    #[test]
    fn test_checkpoint_wraps_previous_node() {
        let tokens = tokenize_vhdl("a + b");
        let mut p = Parser::new(&tokens);
        p.start_node(SyntaxKind::SOURCE_FILE);
        let cp = p.checkpoint();
        p.start_node(SyntaxKind::NAME_REF);
        p.bump();
        p.finish_node();
        p.start_node_at(cp, SyntaxKind::BINARY_EXPR);
        p.bump();
        p.start_node(SyntaxKind::NAME_REF);
        p.bump();
        p.finish_node();
        p.finish_node();
        p.finish_node();
        let root = p.finish().syntax();
        let binary = root.first_child().unwrap();
        assert_eq!(binary.kind(), SyntaxKind::BINARY_EXPR);
        assert_eq!(binary.children().count(), 2);
    }
}
