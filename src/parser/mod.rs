//! Rowan-based parser front-ends for VHDL and Verilog
//!
//! Both dialects share one pipeline:
//! - **logos** for lexing
//! - **rowan** for the CST (Concrete Syntax Tree)
//!
//! The CST is lossless: whitespace, comments and directives stay in the tree
//! as trivia, so doc comments and source ranges can be recovered later.
//!
//! ## Architecture
//!
//! ```text
//! Source Text
//!     ↓
//! Lexer (logos) → Tokens with SyntaxKind
//!     ↓
//! Parser → GreenNode tree (immutable, cheap to clone)
//!     ↓
//! SyntaxNode (rowan) → CST with parent pointers
//!     ↓
//! AST layer → Typed wrappers over SyntaxNode
//!     ↓
//! Builder → hdl_ast model
//! ```
//!
//! A front-end either produces a complete tree or the first [`SyntaxError`];
//! it never returns a partial tree.

#[allow(clippy::module_inception)]
mod parser;

pub mod ast;
pub mod errors;
pub mod grammar;
pub mod keywords;
mod lexer;
mod syntax_kind;

pub use errors::{ErrorCode, ParseContext, SyntaxError};
pub use lexer::{Token, tokenize_verilog, tokenize_vhdl};
pub use parser::{MAX_NESTING_DEPTH, PResult, Parse, parse_verilog, parse_vhdl};
pub use syntax_kind::{HdlLanguage, SyntaxElement, SyntaxKind, SyntaxNode, SyntaxToken};

/// Re-export rowan types for convenience
pub use rowan::{GreenNode, TextRange, TextSize};
