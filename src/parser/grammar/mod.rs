//! Grammar modules for VHDL and Verilog parsing
//!
//! - `vhdl` - VHDL-2008 design files (context clauses, design units, statements)
//! - `verilog` - Verilog-2005 source text (modules, items, procedural code)
//!
//! The parsing functions are generic over [`GrammarParser`] so they only see
//! the token/node interface, never the parser's internals.

pub mod verilog;
pub mod vhdl;

use rowan::{Checkpoint, TextRange};

use super::errors::{ErrorCode, ParseContext, SyntaxError};
use super::parser::PResult;
use super::syntax_kind::SyntaxKind;

/// Interface between the grammar rules and the parser core
pub trait GrammarParser {
    // Token inspection (all skip trivia)
    fn current_kind(&self) -> SyntaxKind;
    fn current_text(&self) -> &str;
    fn current_range(&self) -> TextRange;
    fn at_eof(&self) -> bool;
    /// Peek at the kind of the nth significant token ahead
    fn nth(&self, n: usize) -> SyntaxKind;
    fn nth_text(&self, n: usize) -> &str;

    // Token consumption
    fn bump(&mut self);
    /// Consume the current token, recording it under another kind
    fn bump_remap(&mut self, kind: SyntaxKind);
    fn flush_trivia(&mut self);

    // Node building
    fn start_node(&mut self, kind: SyntaxKind);
    fn finish_node(&mut self);
    fn checkpoint(&self) -> Checkpoint;
    fn start_node_at(&mut self, checkpoint: Checkpoint, kind: SyntaxKind);

    // Nesting
    /// Enter a parenthesised expression or nested statement block; fails
    /// with E0903 once the depth limit is reached
    fn enter_nesting(&mut self) -> PResult;
    fn exit_nesting(&mut self);

    // Errors
    fn push_context(&mut self, context: ParseContext);
    fn pop_context(&mut self);
    fn error(&self, code: ErrorCode, message: impl Into<String>) -> SyntaxError;
    fn expected(&self, what: &str) -> SyntaxError;
    fn unexpected(&self, code: ErrorCode) -> SyntaxError;

    fn at(&self, kind: SyntaxKind) -> bool {
        self.current_kind() == kind
    }

    fn at_any(&self, kinds: &[SyntaxKind]) -> bool {
        kinds.contains(&self.current_kind())
    }

    fn eat(&mut self, kind: SyntaxKind) -> bool {
        if self.at(kind) {
            self.bump();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: SyntaxKind) -> PResult {
        if self.eat(kind) {
            Ok(())
        } else {
            Err(self.expected(&kind.display_name()))
        }
    }

    /// Consume an identifier or fail with "missing identifier"
    fn expect_ident(&mut self) -> PResult {
        if self.current_kind().is_ident() {
            self.bump();
            Ok(())
        } else {
            let found = self.current_kind().display_name();
            Err(self.error(
                ErrorCode::E0301,
                format!("expected identifier, found {found}"),
            ))
        }
    }
}
