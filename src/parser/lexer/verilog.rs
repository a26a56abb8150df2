//! Verilog tokenizer

use logos::Logos;
use rowan::TextSize;

use super::Token;
use crate::parser::SyntaxKind;
use crate::parser::keywords::verilog_keyword;

/// Lexer wrapping the logos-generated Verilog tokenizer
pub struct VerilogLexer<'a> {
    inner: logos::Lexer<'a, VerilogToken>,
    offset: u32,
}

impl<'a> VerilogLexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            inner: VerilogToken::lexer(input),
            offset: 0,
        }
    }
}

impl<'a> Iterator for VerilogLexer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let logos_token = self.inner.next()?;
        let text = self.inner.slice();
        let offset = TextSize::new(self.offset);
        self.offset += text.len() as u32;

        let kind = match logos_token {
            Ok(VerilogToken::Ident) => verilog_keyword(text).unwrap_or(SyntaxKind::IDENT),
            Ok(t) => t.into(),
            Err(()) => SyntaxKind::ERROR,
        };

        Some(Token { kind, text, offset })
    }
}

/// Logos token enum - maps to SyntaxKind
#[derive(Logos, Debug, Clone, Copy, PartialEq)]
enum VerilogToken {
    // =========================================================================
    // TRIVIA
    // =========================================================================
    #[regex(r"[ \t\r\n\x0B\x0C]+")]
    Whitespace,

    #[regex(r"//[^\n]*")]
    LineComment,

    #[regex(r"/\*([^*]|\*+[^*/])*\*+/")]
    BlockComment,

    #[regex(r"/\*([^*]|\*+[^*/])*\**")]
    UnterminatedComment,

    /// Directives that carry no structure; macros are left to a preprocessor
    #[regex(r"`(timescale|default_nettype|resetall|celldefine|endcelldefine|unconnected_drive|nounconnected_drive)[^\n]*")]
    Directive,

    // =========================================================================
    // IDENTIFIERS AND LITERALS
    // =========================================================================
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_$]*")]
    Ident,

    #[regex(r"\\[^ \t\r\n]+")]
    EscapedIdent,

    #[regex(r"\$[a-zA-Z0-9_$]+")]
    SystemIdent,

    #[regex(r"[0-9][0-9_]*")]
    Integer,

    #[regex(r"[0-9][0-9_]*\.[0-9][0-9_]*([eE][+-]?[0-9][0-9_]*)?")]
    #[regex(r"[0-9][0-9_]*[eE][+-]?[0-9][0-9_]*")]
    Real,

    /// Base and digits of a based number; a size is the preceding `Integer`
    #[regex(r"'[sS]?[bBoOdDhH][ \t]*[0-9a-fA-FxXzZ?_]+")]
    Based,

    #[regex(r#""([^"\\\n]|\\.)*""#)]
    String,

    #[regex(r#""([^"\\\n]|\\.)*"#)]
    UnterminatedString,

    // =========================================================================
    // OPERATORS (longest first)
    // =========================================================================
    #[token("===")]
    EqEqEq,
    #[token("!==")]
    BangEqEq,
    #[token("<<<")]
    AShl,
    #[token(">>>")]
    AShr,
    #[token("==")]
    EqEq,
    #[token("!=")]
    BangEq,
    #[token("<=")]
    LtEq,
    #[token(">=")]
    GtEq,
    #[token("&&")]
    AmpAmp,
    #[token("||")]
    BarBar,
    #[token("<<")]
    Shl,
    #[token(">>")]
    Shr,
    #[token("**")]
    StarStar,
    #[token("~&")]
    TildeAmp,
    #[token("~|")]
    TildeBar,
    #[token("~^")]
    #[token("^~")]
    TildeCaret,
    #[token("+:")]
    PlusColon,
    #[token("-:")]
    MinusColon,

    // =========================================================================
    // SINGLE-CHARACTER PUNCTUATION
    // =========================================================================
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token(";")]
    Semicolon,
    #[token(":")]
    Colon,
    #[token(",")]
    Comma,
    #[token(".")]
    Dot,
    #[token("#")]
    Hash,
    #[token("@")]
    At,
    #[token("=")]
    Eq,
    #[token("<")]
    Lt,
    #[token(">")]
    Gt,
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("%")]
    Percent,
    #[token("&")]
    Amp,
    #[token("|")]
    Bar,
    #[token("^")]
    Caret,
    #[token("~")]
    Tilde,
    #[token("!")]
    Bang,
    #[token("?")]
    Question,
}

impl From<VerilogToken> for SyntaxKind {
    fn from(token: VerilogToken) -> Self {
        match token {
            VerilogToken::Whitespace => SyntaxKind::WHITESPACE,
            VerilogToken::LineComment => SyntaxKind::LINE_COMMENT,
            VerilogToken::BlockComment => SyntaxKind::BLOCK_COMMENT,
            VerilogToken::Directive => SyntaxKind::DIRECTIVE,
            VerilogToken::UnterminatedComment | VerilogToken::UnterminatedString => {
                SyntaxKind::ERROR
            }
            VerilogToken::Ident => SyntaxKind::IDENT,
            VerilogToken::EscapedIdent => SyntaxKind::EXTENDED_IDENT,
            VerilogToken::SystemIdent => SyntaxKind::SYSTEM_IDENT,
            VerilogToken::Integer => SyntaxKind::INTEGER,
            VerilogToken::Real => SyntaxKind::REAL,
            VerilogToken::Based => SyntaxKind::BASED_LITERAL,
            VerilogToken::String => SyntaxKind::STRING,
            VerilogToken::EqEqEq => SyntaxKind::EQ_EQ_EQ,
            VerilogToken::BangEqEq => SyntaxKind::BANG_EQ_EQ,
            VerilogToken::AShl => SyntaxKind::ASHL,
            VerilogToken::AShr => SyntaxKind::ASHR,
            VerilogToken::EqEq => SyntaxKind::EQ_EQ,
            VerilogToken::BangEq => SyntaxKind::BANG_EQ,
            VerilogToken::LtEq => SyntaxKind::LT_EQ,
            VerilogToken::GtEq => SyntaxKind::GT_EQ,
            VerilogToken::AmpAmp => SyntaxKind::AMP_AMP,
            VerilogToken::BarBar => SyntaxKind::BAR_BAR,
            VerilogToken::Shl => SyntaxKind::SHL,
            VerilogToken::Shr => SyntaxKind::SHR,
            VerilogToken::StarStar => SyntaxKind::STAR_STAR,
            VerilogToken::TildeAmp => SyntaxKind::TILDE_AMP,
            VerilogToken::TildeBar => SyntaxKind::TILDE_BAR,
            VerilogToken::TildeCaret => SyntaxKind::TILDE_CARET,
            VerilogToken::PlusColon => SyntaxKind::PLUS_COLON,
            VerilogToken::MinusColon => SyntaxKind::MINUS_COLON,
            VerilogToken::LParen => SyntaxKind::L_PAREN,
            VerilogToken::RParen => SyntaxKind::R_PAREN,
            VerilogToken::LBracket => SyntaxKind::L_BRACKET,
            VerilogToken::RBracket => SyntaxKind::R_BRACKET,
            VerilogToken::LBrace => SyntaxKind::L_BRACE,
            VerilogToken::RBrace => SyntaxKind::R_BRACE,
            VerilogToken::Semicolon => SyntaxKind::SEMICOLON,
            VerilogToken::Colon => SyntaxKind::COLON,
            VerilogToken::Comma => SyntaxKind::COMMA,
            VerilogToken::Dot => SyntaxKind::DOT,
            VerilogToken::Hash => SyntaxKind::HASH,
            VerilogToken::At => SyntaxKind::AT,
            VerilogToken::Eq => SyntaxKind::EQ,
            VerilogToken::Lt => SyntaxKind::LT,
            VerilogToken::Gt => SyntaxKind::GT,
            VerilogToken::Plus => SyntaxKind::PLUS,
            VerilogToken::Minus => SyntaxKind::MINUS,
            VerilogToken::Star => SyntaxKind::STAR,
            VerilogToken::Slash => SyntaxKind::SLASH,
            VerilogToken::Percent => SyntaxKind::PERCENT,
            VerilogToken::Amp => SyntaxKind::AMP,
            VerilogToken::Bar => SyntaxKind::BAR,
            VerilogToken::Caret => SyntaxKind::CARET,
            VerilogToken::Tilde => SyntaxKind::TILDE,
            VerilogToken::Bang => SyntaxKind::BANG,
            VerilogToken::Question => SyntaxKind::QUESTION,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str) -> Vec<SyntaxKind> {
        VerilogLexer::new(input)
            .map(|t| t.kind)
            .filter(|k| !k.is_trivia())
            .collect()
    }

    #[test]
    fn test_lex_module_header() {
        assert_eq!(
            kinds("module top(input clk);"),
            vec![
                SyntaxKind::MODULE_KW,
                SyntaxKind::IDENT,
                SyntaxKind::L_PAREN,
                SyntaxKind::INPUT_KW,
                SyntaxKind::IDENT,
                SyntaxKind::R_PAREN,
                SyntaxKind::SEMICOLON
            ]
        );
    }

    #[test]
    fn test_lex_keywords_are_case_sensitive() {
        assert_eq!(kinds("Module"), vec![SyntaxKind::IDENT]);
    }

    #[test]
    fn test_lex_based_numbers() {
        let tokens: Vec<_> = VerilogLexer::new("8'hFF 'b1 4 'sd3 12").collect();
        let significant: Vec<_> = tokens.iter().filter(|t| !t.kind.is_trivia()).collect();
        assert_eq!(significant[0].kind, SyntaxKind::INTEGER);
        assert_eq!(significant[0].text, "8");
        assert_eq!(significant[1].kind, SyntaxKind::BASED_LITERAL);
        assert_eq!(significant[1].text, "'hFF");
        assert_eq!(significant[2].kind, SyntaxKind::BASED_LITERAL);
        assert_eq!(significant[3].kind, SyntaxKind::INTEGER);
        assert_eq!(significant[4].kind, SyntaxKind::BASED_LITERAL);
        assert_eq!(significant[4].text, "'sd3");
        assert_eq!(significant[5].kind, SyntaxKind::INTEGER);
        assert_eq!(significant[5].text, "12");
    }

    #[test]
    fn test_lex_decimal_before_whitespace() {
        let tokens: Vec<_> = VerilogLexer::new("3 + 1").collect();
        let all: Vec<_> = tokens.iter().map(|t| t.kind).collect();
        assert_eq!(
            all,
            vec![
                SyntaxKind::INTEGER,
                SyntaxKind::WHITESPACE,
                SyntaxKind::PLUS,
                SyntaxKind::WHITESPACE,
                SyntaxKind::INTEGER
            ]
        );
        assert_eq!(tokens[0].text, "3");
        assert_eq!(
            kinds("#10 y"),
            vec![SyntaxKind::HASH, SyntaxKind::INTEGER, SyntaxKind::IDENT]
        );
        assert_eq!(
            kinds("[7 : 0]"),
            vec![
                SyntaxKind::L_BRACKET,
                SyntaxKind::INTEGER,
                SyntaxKind::COLON,
                SyntaxKind::INTEGER,
                SyntaxKind::R_BRACKET
            ]
        );
        assert_eq!(
            kinds("parameter W = 8\t;"),
            vec![
                SyntaxKind::PARAMETER_KW,
                SyntaxKind::IDENT,
                SyntaxKind::EQ,
                SyntaxKind::INTEGER,
                SyntaxKind::SEMICOLON
            ]
        );
    }

    #[test]
    fn test_lex_size_is_separate_from_base() {
        let tokens: Vec<_> = VerilogLexer::new("8 'hFF").collect();
        assert_eq!(tokens[0].kind, SyntaxKind::INTEGER);
        assert_eq!(tokens[1].kind, SyntaxKind::WHITESPACE);
        assert_eq!(tokens[2].kind, SyntaxKind::BASED_LITERAL);
        assert_eq!(tokens[2].text, "'hFF");

        let tokens: Vec<_> = VerilogLexer::new("'hz").collect();
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind, SyntaxKind::BASED_LITERAL);

        let tokens: Vec<_> = VerilogLexer::new("4'b0").collect();
        assert_eq!(tokens.len(), 2);
        assert_eq!((tokens[0].kind, tokens[0].text), (SyntaxKind::INTEGER, "4"));
        assert_eq!((tokens[1].kind, tokens[1].text), (SyntaxKind::BASED_LITERAL, "'b0"));
    }

    #[test]
    fn test_lex_operators() {
        assert_eq!(
            kinds("=== !== <<< >>> ~& ^~ +: <="),
            vec![
                SyntaxKind::EQ_EQ_EQ,
                SyntaxKind::BANG_EQ_EQ,
                SyntaxKind::ASHL,
                SyntaxKind::ASHR,
                SyntaxKind::TILDE_AMP,
                SyntaxKind::TILDE_CARET,
                SyntaxKind::PLUS_COLON,
                SyntaxKind::LT_EQ
            ]
        );
    }

    #[test]
    fn test_lex_system_task_and_directive() {
        let tokens: Vec<_> = VerilogLexer::new("`timescale 1ns/1ps\n$display").collect();
        assert_eq!(tokens[0].kind, SyntaxKind::DIRECTIVE);
        assert_eq!(tokens[0].text, "`timescale 1ns/1ps");
        assert_eq!(tokens[2].kind, SyntaxKind::SYSTEM_IDENT);
    }

    #[test]
    fn test_lex_escaped_identifier() {
        let tokens: Vec<_> = VerilogLexer::new("\\bus[0] ").collect();
        assert_eq!(tokens[0].kind, SyntaxKind::EXTENDED_IDENT);
        assert_eq!(tokens[0].text, "\\bus[0]");
    }
}
