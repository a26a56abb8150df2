//! Logos-based lexers for VHDL and Verilog
//!
//! Both lexers are lossless: every byte of the input ends up in exactly one
//! [`Token`], trivia included. Input the lexer cannot classify becomes an
//! [`SyntaxKind::ERROR`] token; [`check_tokens`] turns the first one into a
//! lexical [`SyntaxError`].

mod verilog;
mod vhdl;

pub use verilog::VerilogLexer;
pub use vhdl::VhdlLexer;

use rowan::{TextRange, TextSize};

use super::SyntaxKind;
use super::errors::{ErrorCode, SyntaxError};

/// A token with its kind, text, and position
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: SyntaxKind,
    pub text: &'a str,
    pub offset: TextSize,
}

impl Token<'_> {
    pub fn range(&self) -> TextRange {
        TextRange::at(self.offset, TextSize::of(self.text))
    }
}

/// Tokenize VHDL source into a Vec
pub fn tokenize_vhdl(input: &str) -> Vec<Token<'_>> {
    VhdlLexer::new(input).collect()
}

/// Tokenize Verilog source into a Vec
pub fn tokenize_verilog(input: &str) -> Vec<Token<'_>> {
    VerilogLexer::new(input).collect()
}

/// Fail on the first token the lexer could not classify.
pub fn check_tokens(tokens: &[Token<'_>]) -> Result<(), SyntaxError> {
    match tokens.iter().find(|t| t.kind == SyntaxKind::ERROR) {
        Some(token) => Err(lexical_error(token)),
        None => Ok(()),
    }
}

fn lexical_error(token: &Token<'_>) -> SyntaxError {
    let first_line = token.text.lines().next().unwrap_or(token.text);
    let (code, message) = if token.text.starts_with('"') {
        (ErrorCode::E0102, "unterminated string literal".to_string())
    } else if token.text.starts_with("/*") {
        (ErrorCode::E0103, "unterminated block comment".to_string())
    } else if token.text.starts_with('`') {
        (
            ErrorCode::E0105,
            format!("unsupported compiler directive '{first_line}'"),
        )
    } else if token.text.starts_with(|c: char| c.is_ascii_digit()) {
        (
            ErrorCode::E0104,
            format!("invalid numeric literal '{first_line}'"),
        )
    } else {
        let ch = token.text.chars().next().unwrap_or(' ');
        (ErrorCode::E0101, format!("invalid character '{ch}'"))
    };
    let error = SyntaxError::new(message, token.range(), code);
    match code {
        ErrorCode::E0102 => error.with_hint("string literals must close on the same line"),
        ErrorCode::E0105 => error.with_hint("run a preprocessor before parsing"),
        _ => error,
    }
}
