//! Verilog expressions
//!
//! Binary operators are parsed by precedence climbing; all of them are left
//! associative. The conditional operator sits above them and nests to the
//! right.

use crate::parser::errors::{ErrorCode, ParseContext};
use crate::parser::grammar::GrammarParser;
use crate::parser::parser::PResult;
use crate::parser::syntax_kind::SyntaxKind;

/// Binding power of a binary operator, higher binds tighter
fn infix_binding_power(kind: SyntaxKind) -> Option<u8> {
    let bp = match kind {
        SyntaxKind::BAR_BAR => 1,
        SyntaxKind::AMP_AMP => 2,
        SyntaxKind::BAR => 3,
        SyntaxKind::CARET | SyntaxKind::TILDE_CARET => 4,
        SyntaxKind::AMP => 5,
        SyntaxKind::EQ_EQ | SyntaxKind::BANG_EQ | SyntaxKind::EQ_EQ_EQ | SyntaxKind::BANG_EQ_EQ => 6,
        SyntaxKind::LT | SyntaxKind::LT_EQ | SyntaxKind::GT | SyntaxKind::GT_EQ => 7,
        SyntaxKind::SHL | SyntaxKind::SHR | SyntaxKind::ASHL | SyntaxKind::ASHR => 8,
        SyntaxKind::PLUS | SyntaxKind::MINUS => 9,
        SyntaxKind::STAR | SyntaxKind::SLASH | SyntaxKind::PERCENT => 10,
        SyntaxKind::STAR_STAR => 11,
        _ => return None,
    };
    Some(bp)
}

const UNARY_OPS: &[SyntaxKind] = &[
    SyntaxKind::PLUS,
    SyntaxKind::MINUS,
    SyntaxKind::BANG,
    SyntaxKind::TILDE,
    SyntaxKind::AMP,
    SyntaxKind::TILDE_AMP,
    SyntaxKind::BAR,
    SyntaxKind::TILDE_BAR,
    SyntaxKind::CARET,
    SyntaxKind::TILDE_CARET,
];

/// Expression = Binary ('?' Expression ':' Expression)?
pub fn expression<P: GrammarParser>(p: &mut P) -> PResult {
    p.push_context(ParseContext::Expression);
    p.enter_nesting()?;
    let cp = p.checkpoint();
    binary(p, 1)?;
    if p.at(SyntaxKind::QUESTION) {
        p.start_node_at(cp, SyntaxKind::TERNARY_EXPR);
        p.bump();
        expression(p)?;
        p.expect(SyntaxKind::COLON)?;
        expression(p)?;
        p.finish_node();
    }
    p.exit_nesting();
    p.pop_context();
    Ok(())
}

fn binary<P: GrammarParser>(p: &mut P, min_bp: u8) -> PResult {
    let cp = p.checkpoint();
    unary(p)?;
    while let Some(bp) = infix_binding_power(p.current_kind()) {
        if bp < min_bp {
            break;
        }
        p.start_node_at(cp, SyntaxKind::BINARY_EXPR);
        p.bump();
        binary(p, bp + 1)?;
        p.finish_node();
    }
    Ok(())
}

fn unary<P: GrammarParser>(p: &mut P) -> PResult {
    if p.at_any(UNARY_OPS) {
        p.enter_nesting()?;
        p.start_node(SyntaxKind::UNARY_EXPR);
        p.bump();
        unary(p)?;
        p.finish_node();
        p.exit_nesting();
        Ok(())
    } else {
        primary(p)
    }
}

/// Primary = Number | String | HierName Select* | Call | Concat | '(' Expression ')'
pub(crate) fn primary<P: GrammarParser>(p: &mut P) -> PResult {
    match p.current_kind() {
        SyntaxKind::INTEGER | SyntaxKind::REAL | SyntaxKind::BASED_LITERAL | SyntaxKind::STRING => {
            p.start_node(SyntaxKind::LITERAL);
            // a size and its based digits form one number: `8'hFF`, `8 'hFF`
            let sized = p.at(SyntaxKind::INTEGER) && p.nth(1) == SyntaxKind::BASED_LITERAL;
            p.bump();
            if sized {
                p.bump();
            }
            p.finish_node();
            Ok(())
        }
        SyntaxKind::SYSTEM_IDENT => {
            let cp = p.checkpoint();
            p.start_node(SyntaxKind::NAME_REF);
            p.bump();
            p.finish_node();
            if p.at(SyntaxKind::L_PAREN) {
                p.start_node_at(cp, SyntaxKind::CALL_EXPR);
                arg_list(p)?;
                p.finish_node();
            }
            Ok(())
        }
        SyntaxKind::L_PAREN => {
            p.start_node(SyntaxKind::PAREN_EXPR);
            p.bump();
            expression(p)?;
            p.expect(SyntaxKind::R_PAREN)?;
            p.finish_node();
            Ok(())
        }
        SyntaxKind::L_BRACE => concatenation(p),
        kind if kind.is_ident() => {
            let cp = p.checkpoint();
            hierarchical_name(p)?;
            if p.at(SyntaxKind::L_PAREN) {
                p.start_node_at(cp, SyntaxKind::CALL_EXPR);
                arg_list(p)?;
                p.finish_node();
            }
            Ok(())
        }
        _ if p.at_eof() => Err(p.expected("expression")),
        _ => {
            let found = p.current_kind().display_name();
            Err(p.error(ErrorCode::E0403, format!("expected expression, found {found}")))
        }
    }
}

/// HierName = Ident ('.' Ident | '[' Expression ((':' | '+:' | '-:') Expression)? ']')*
fn hierarchical_name<P: GrammarParser>(p: &mut P) -> PResult {
    let cp = p.checkpoint();
    p.start_node(SyntaxKind::NAME_REF);
    p.expect_ident()?;
    p.finish_node();
    loop {
        match p.current_kind() {
            SyntaxKind::DOT => {
                p.start_node_at(cp, SyntaxKind::SELECTED_NAME);
                p.bump();
                p.expect_ident()?;
                p.finish_node();
            }
            SyntaxKind::L_BRACKET => {
                p.start_node_at(cp, SyntaxKind::INDEX_EXPR);
                p.bump();
                expression(p)?;
                if p.at_any(&[
                    SyntaxKind::COLON,
                    SyntaxKind::PLUS_COLON,
                    SyntaxKind::MINUS_COLON,
                ]) {
                    p.bump();
                    expression(p)?;
                }
                if !p.eat(SyntaxKind::R_BRACKET) {
                    let found = p.current_kind().display_name();
                    return Err(p.error(
                        ErrorCode::E0203,
                        format!("expected ']', found {found}"),
                    ));
                }
                p.finish_node();
            }
            _ => return Ok(()),
        }
    }
}

/// Concat = '{' Expression (',' Expression)* '}'
/// Repl = '{' Expression Concat '}'
fn concatenation<P: GrammarParser>(p: &mut P) -> PResult {
    let cp = p.checkpoint();
    p.bump(); // {
    expression(p)?;
    let kind = if p.at(SyntaxKind::L_BRACE) {
        concatenation(p)?;
        SyntaxKind::REPL_EXPR
    } else {
        while p.eat(SyntaxKind::COMMA) {
            expression(p)?;
        }
        SyntaxKind::CONCAT_EXPR
    };
    if !p.eat(SyntaxKind::R_BRACE) {
        let found = p.current_kind().display_name();
        return Err(p.error(
            ErrorCode::E0203,
            format!("expected '}}', found {found}"),
        ));
    }
    p.start_node_at(cp, kind);
    p.finish_node();
    Ok(())
}

/// Target of an assignment: a hierarchical name with selects, or a concatenation
pub(crate) fn lvalue<P: GrammarParser>(p: &mut P) -> PResult {
    if p.at(SyntaxKind::L_BRACE) {
        concatenation(p)
    } else {
        hierarchical_name(p)
    }
}

/// ArgList = '(' (Expression (',' Expression)*)? ')'
pub(crate) fn arg_list<P: GrammarParser>(p: &mut P) -> PResult {
    p.start_node(SyntaxKind::ARG_LIST);
    p.bump(); // (
    if !p.at(SyntaxKind::R_PAREN) {
        loop {
            expression(p)?;
            if !p.eat(SyntaxKind::COMMA) {
                break;
            }
        }
    }
    p.expect(SyntaxKind::R_PAREN)?;
    p.finish_node();
    Ok(())
}
