//! VHDL tokenizer

use logos::Logos;
use rowan::TextSize;

use super::Token;
use crate::parser::SyntaxKind;
use crate::parser::keywords::vhdl_keyword;

/// Lexer wrapping the logos-generated VHDL tokenizer
///
/// Resolves the two things a context-free regex cannot: reserved words
/// (case-insensitive) and the apostrophe, which is either an attribute tick
/// (`clk'event`) or the start of a character literal (`'0'`).
pub struct VhdlLexer<'a> {
    inner: logos::Lexer<'a, VhdlToken>,
    offset: u32,
    prev: Option<SyntaxKind>,
}

impl<'a> VhdlLexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            inner: VhdlToken::lexer(input),
            offset: 0,
            prev: None,
        }
    }

    /// A tick after a name-like token is an attribute tick; anywhere else
    /// `'c'` is a character literal.
    fn tick_starts_char_literal(&self) -> Option<usize> {
        let follows_name = matches!(
            self.prev,
            Some(
                SyntaxKind::IDENT
                    | SyntaxKind::EXTENDED_IDENT
                    | SyntaxKind::R_PAREN
                    | SyntaxKind::R_BRACKET
                    | SyntaxKind::ALL_KW
            )
        );
        if follows_name {
            return None;
        }
        let mut chars = self.inner.remainder().chars();
        let ch = chars.next()?;
        (chars.next()? == '\'').then(|| ch.len_utf8() + 1)
    }
}

impl<'a> Iterator for VhdlLexer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let logos_token = self.inner.next()?;

        let kind = match logos_token {
            Ok(VhdlToken::Tick) => match self.tick_starts_char_literal() {
                Some(len) => {
                    self.inner.bump(len);
                    SyntaxKind::CHAR_LITERAL
                }
                None => SyntaxKind::TICK,
            },
            Ok(VhdlToken::Ident) => {
                vhdl_keyword(self.inner.slice()).unwrap_or(SyntaxKind::IDENT)
            }
            Ok(t) => t.into(),
            Err(()) => SyntaxKind::ERROR,
        };

        let text = self.inner.slice();
        let offset = TextSize::new(self.offset);
        self.offset += text.len() as u32;
        if !kind.is_trivia() {
            self.prev = Some(kind);
        }

        Some(Token { kind, text, offset })
    }
}

/// Logos token enum - maps to SyntaxKind
#[derive(Logos, Debug, Clone, Copy, PartialEq)]
enum VhdlToken {
    // =========================================================================
    // TRIVIA
    // =========================================================================
    #[regex(r"[ \t\r\n\x0B\x0C]+")]
    Whitespace,

    #[regex(r"--[^\n]*")]
    LineComment,

    #[regex(r"/\*([^*]|\*+[^*/])*\*+/")]
    BlockComment,

    #[regex(r"/\*([^*]|\*+[^*/])*\**")]
    UnterminatedComment,

    // =========================================================================
    // IDENTIFIERS AND LITERALS
    // =========================================================================
    #[regex(r"[a-zA-Z][a-zA-Z0-9_]*")]
    Ident,

    #[regex(r"\\([^\\\n]|\\\\)*\\")]
    ExtendedIdent,

    #[regex(r"[0-9][0-9_]*([eE]\+?[0-9][0-9_]*)?")]
    Integer,

    #[regex(r"[0-9][0-9_]*\.[0-9][0-9_]*([eE][+-]?[0-9][0-9_]*)?")]
    Real,

    #[regex(r"[0-9][0-9_]*#[0-9a-fA-F_]+(\.[0-9a-fA-F_]+)?#([eE][+-]?[0-9]+)?")]
    Based,

    #[regex(r#"([0-9][0-9_]*)?[uUsS]?[bBoOxXdD]"[^"\n]*""#)]
    BitString,

    #[regex(r#""([^"\n]|"")*""#)]
    String,

    #[regex(r#""([^"\n]|"")*"#)]
    UnterminatedString,

    // =========================================================================
    // COMPOUND DELIMITERS
    // =========================================================================
    #[token("=>")]
    FatArrow,
    #[token(":=")]
    ColonEq,
    #[token("/=")]
    SlashEq,
    #[token("<=")]
    LtEq,
    #[token(">=")]
    GtEq,
    #[token("<>")]
    Box,
    #[token("**")]
    StarStar,

    // =========================================================================
    // DELIMITERS
    // =========================================================================
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token(";")]
    Semicolon,
    #[token(":")]
    Colon,
    #[token(",")]
    Comma,
    #[token(".")]
    Dot,
    #[token("'")]
    Tick,
    #[token("&")]
    Amp,
    #[token("|")]
    Bar,
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
}

impl From<VhdlToken> for SyntaxKind {
    fn from(token: VhdlToken) -> Self {
        match token {
            VhdlToken::Whitespace => SyntaxKind::WHITESPACE,
            VhdlToken::LineComment => SyntaxKind::LINE_COMMENT,
            VhdlToken::BlockComment => SyntaxKind::BLOCK_COMMENT,
            VhdlToken::UnterminatedComment | VhdlToken::UnterminatedString => SyntaxKind::ERROR,
            VhdlToken::Ident => SyntaxKind::IDENT,
            VhdlToken::ExtendedIdent => SyntaxKind::EXTENDED_IDENT,
            VhdlToken::Integer => SyntaxKind::INTEGER,
            VhdlToken::Real => SyntaxKind::REAL,
            VhdlToken::Based => SyntaxKind::BASED_LITERAL,
            VhdlToken::BitString => SyntaxKind::BIT_STRING,
            VhdlToken::String => SyntaxKind::STRING,
            VhdlToken::FatArrow => SyntaxKind::FAT_ARROW,
            VhdlToken::ColonEq => SyntaxKind::COLON_EQ,
            VhdlToken::SlashEq => SyntaxKind::SLASH_EQ,
            VhdlToken::LtEq => SyntaxKind::LT_EQ,
            VhdlToken::GtEq => SyntaxKind::GT_EQ,
            VhdlToken::Box => SyntaxKind::BOX,
            VhdlToken::StarStar => SyntaxKind::STAR_STAR,
            VhdlToken::LParen => SyntaxKind::L_PAREN,
            VhdlToken::RParen => SyntaxKind::R_PAREN,
            VhdlToken::LBracket => SyntaxKind::L_BRACKET,
            VhdlToken::RBracket => SyntaxKind::R_BRACKET,
            VhdlToken::Semicolon => SyntaxKind::SEMICOLON,
            VhdlToken::Colon => SyntaxKind::COLON,
            VhdlToken::Comma => SyntaxKind::COMMA,
            VhdlToken::Dot => SyntaxKind::DOT,
            VhdlToken::Tick => SyntaxKind::TICK,
            VhdlToken::Amp => SyntaxKind::AMP,
            VhdlToken::Bar => SyntaxKind::BAR,
            VhdlToken::Eq => SyntaxKind::EQ,
            VhdlToken::Lt => SyntaxKind::LT,
            VhdlToken::Gt => SyntaxKind::GT,
            VhdlToken::Plus => SyntaxKind::PLUS,
            VhdlToken::Minus => SyntaxKind::MINUS,
            VhdlToken::Star => SyntaxKind::STAR,
            VhdlToken::Slash => SyntaxKind::SLASH,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str) -> Vec<SyntaxKind> {
        VhdlLexer::new(input)
            .map(|t| t.kind)
            .filter(|k| !k.is_trivia())
            .collect()
    }

    #[test]
    fn test_lex_entity_header() {
        let tokens: Vec<_> = VhdlLexer::new("ENTITY mux IS").collect();
        assert_eq!(tokens.len(), 5);
        assert_eq!(tokens[0].kind, SyntaxKind::ENTITY_KW);
        assert_eq!(tokens[1].kind, SyntaxKind::WHITESPACE);
        assert_eq!(tokens[2].kind, SyntaxKind::IDENT);
        assert_eq!(tokens[2].text, "mux");
        assert_eq!(tokens[4].kind, SyntaxKind::IS_KW);
    }

    #[test]
    fn test_lex_char_literal_vs_attribute_tick() {
        assert_eq!(
            kinds("s <= '1';"),
            vec![
                SyntaxKind::IDENT,
                SyntaxKind::LT_EQ,
                SyntaxKind::CHAR_LITERAL,
                SyntaxKind::SEMICOLON
            ]
        );
        assert_eq!(
            kinds("clk'event"),
            vec![SyntaxKind::IDENT, SyntaxKind::TICK, SyntaxKind::IDENT]
        );
    }

    #[test]
    fn test_lex_qualified_char_after_name() {
        // character'('a') : tick, paren, char literal, paren
        assert_eq!(
            kinds("character'('a')"),
            vec![
                SyntaxKind::IDENT,
                SyntaxKind::TICK,
                SyntaxKind::L_PAREN,
                SyntaxKind::CHAR_LITERAL,
                SyntaxKind::R_PAREN
            ]
        );
    }

    #[test]
    fn test_lex_char_literal_tick_character() {
        let tokens: Vec<_> = VhdlLexer::new("(''')").collect();
        assert_eq!(tokens[1].kind, SyntaxKind::CHAR_LITERAL);
        assert_eq!(tokens[1].text, "'''");
    }

    #[test]
    fn test_lex_numbers() {
        assert_eq!(
            kinds("42 1_000 3.14 1.0e-9 16#FF# 2#1010_1010# 1e3"),
            vec![
                SyntaxKind::INTEGER,
                SyntaxKind::INTEGER,
                SyntaxKind::REAL,
                SyntaxKind::REAL,
                SyntaxKind::BASED_LITERAL,
                SyntaxKind::BASED_LITERAL,
                SyntaxKind::INTEGER
            ]
        );
    }

    #[test]
    fn test_lex_bit_strings() {
        assert_eq!(
            kinds("x\"FF\" B\"1010\" 8ux\"0F\""),
            vec![
                SyntaxKind::BIT_STRING,
                SyntaxKind::BIT_STRING,
                SyntaxKind::BIT_STRING
            ]
        );
    }

    #[test]
    fn test_lex_string_with_doubled_quote() {
        let tokens: Vec<_> = VhdlLexer::new("\"say \"\"hi\"\"\"").collect();
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind, SyntaxKind::STRING);
    }

    #[test]
    fn test_lex_comments() {
        let tokens: Vec<_> = VhdlLexer::new("-- comment\n/* block */end").collect();
        assert_eq!(tokens[0].kind, SyntaxKind::LINE_COMMENT);
        assert_eq!(tokens[1].kind, SyntaxKind::WHITESPACE);
        assert_eq!(tokens[2].kind, SyntaxKind::BLOCK_COMMENT);
        assert_eq!(tokens[3].kind, SyntaxKind::END_KW);
    }

    #[test]
    fn test_lex_extended_identifier() {
        assert_eq!(kinds("\\my sig\\"), vec![SyntaxKind::EXTENDED_IDENT]);
    }

    #[test]
    fn test_lex_compound_delimiters() {
        assert_eq!(
            kinds("=> := /= <= >= <> **"),
            vec![
                SyntaxKind::FAT_ARROW,
                SyntaxKind::COLON_EQ,
                SyntaxKind::SLASH_EQ,
                SyntaxKind::LT_EQ,
                SyntaxKind::GT_EQ,
                SyntaxKind::BOX,
                SyntaxKind::STAR_STAR
            ]
        );
    }

    #[test]
    fn test_lex_unterminated_string_is_error() {
        assert_eq!(kinds("\"abc\n"), vec![SyntaxKind::ERROR]);
    }
}
