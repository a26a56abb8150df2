//! Verilog procedural statements

use super::close_keyword;
use super::expressions::{arg_list, expression, lvalue, primary};
use super::items::{at_local_declaration, local_declaration};
use super::attribute_instances;
use crate::parser::errors::{ErrorCode, ParseContext};
use crate::parser::grammar::GrammarParser;
use crate::parser::parser::PResult;
use crate::parser::syntax_kind::SyntaxKind;

/// Statement = AttributeInstance* (SeqBlock | If | Case | Loop | TimingControl
///             Statement | Assignment | TaskCall | Disable | ';')
pub fn statement<P: GrammarParser>(p: &mut P) -> PResult {
    p.push_context(ParseContext::ProceduralStatement);
    p.enter_nesting()?;
    attribute_instances(p)?;
    match p.current_kind() {
        SyntaxKind::BEGIN_KW => seq_block(p)?,
        SyntaxKind::IF_KW => if_stmt(p)?,
        SyntaxKind::CASE_KW | SyntaxKind::CASEX_KW | SyntaxKind::CASEZ_KW => case_stmt(p)?,
        SyntaxKind::FOR_KW => for_stmt(p)?,
        SyntaxKind::WHILE_KW => guarded_stmt(p, SyntaxKind::WHILE_LOOP)?,
        SyntaxKind::REPEAT_KW => guarded_stmt(p, SyntaxKind::REPEAT_STMT)?,
        SyntaxKind::WAIT_KW => guarded_stmt(p, SyntaxKind::WAIT_STMT)?,
        SyntaxKind::FOREVER_KW => {
            p.start_node(SyntaxKind::FOREVER_STMT);
            p.bump();
            statement(p)?;
            p.finish_node();
        }
        SyntaxKind::DISABLE_KW => {
            p.start_node(SyntaxKind::DISABLE_STMT);
            p.bump();
            p.expect_ident()?;
            p.expect(SyntaxKind::SEMICOLON)?;
            p.finish_node();
        }
        SyntaxKind::HASH => {
            p.start_node(SyntaxKind::TIMING_STMT);
            delay_control(p)?;
            statement(p)?;
            p.finish_node();
        }
        SyntaxKind::AT => {
            p.start_node(SyntaxKind::TIMING_STMT);
            event_control(p)?;
            statement(p)?;
            p.finish_node();
        }
        SyntaxKind::SEMICOLON => {
            p.start_node(SyntaxKind::NULL_STMT);
            p.bump();
            p.finish_node();
        }
        SyntaxKind::SYSTEM_IDENT => {
            p.start_node(SyntaxKind::CALL_STMT);
            primary(p)?;
            p.expect(SyntaxKind::SEMICOLON)?;
            p.finish_node();
        }
        kind if kind.is_ident() || kind == SyntaxKind::L_BRACE => assignment_or_call(p)?,
        _ => return Err(p.unexpected(ErrorCode::E0601)),
    }
    p.exit_nesting();
    p.pop_context();
    Ok(())
}

fn assignment_or_call<P: GrammarParser>(p: &mut P) -> PResult {
    let cp = p.checkpoint();
    lvalue(p)?;
    match p.current_kind() {
        SyntaxKind::EQ | SyntaxKind::LT_EQ => {
            p.start_node_at(cp, SyntaxKind::ASSIGNMENT);
            p.bump();
            match p.current_kind() {
                SyntaxKind::HASH => delay_control(p)?,
                SyntaxKind::AT => event_control(p)?,
                _ => {}
            }
            expression(p)?;
            p.expect(SyntaxKind::SEMICOLON)?;
            p.finish_node();
        }
        SyntaxKind::L_PAREN => {
            p.start_node_at(cp, SyntaxKind::CALL_EXPR);
            arg_list(p)?;
            p.finish_node();
            p.start_node_at(cp, SyntaxKind::CALL_STMT);
            p.expect(SyntaxKind::SEMICOLON)?;
            p.finish_node();
        }
        SyntaxKind::SEMICOLON => {
            p.start_node_at(cp, SyntaxKind::CALL_STMT);
            p.bump();
            p.finish_node();
        }
        _ => return Err(p.expected("'=' or '<='")),
    }
    Ok(())
}

/// Assignment without terminator, as used in `for` headers
pub(crate) fn simple_assignment<P: GrammarParser>(p: &mut P) -> PResult {
    p.start_node(SyntaxKind::ASSIGNMENT);
    lvalue(p)?;
    p.expect(SyntaxKind::EQ)?;
    expression(p)?;
    p.finish_node();
    Ok(())
}

/// SeqBlock = 'begin' (':' Ident LocalDeclaration*)? Statement* 'end'
fn seq_block<P: GrammarParser>(p: &mut P) -> PResult {
    p.start_node(SyntaxKind::SEQ_BLOCK);
    let opened = p.current_range();
    p.bump(); // begin
    if p.eat(SyntaxKind::COLON) {
        p.expect_ident()?;
        while at_local_declaration(p) {
            local_declaration(p)?;
        }
    }
    p.start_node(SyntaxKind::STMT_LIST);
    while !p.at_eof() && !p.at(SyntaxKind::END_KW) {
        statement(p)?;
    }
    p.finish_node();
    close_keyword(p, SyntaxKind::END_KW, "begin-end block", opened)?;
    p.finish_node();
    Ok(())
}

/// If = 'if' '(' Expression ')' Statement ('else' Statement)?
fn if_stmt<P: GrammarParser>(p: &mut P) -> PResult {
    p.start_node(SyntaxKind::IF_STMT);
    p.bump(); // if
    paren_expression(p)?;
    statement(p)?;
    if p.at(SyntaxKind::ELSE_KW) {
        p.start_node(SyntaxKind::ELSE_CLAUSE);
        p.bump();
        statement(p)?;
        p.finish_node();
    }
    p.finish_node();
    Ok(())
}

/// Case = ('case' | 'casex' | 'casez') '(' Expression ')' CaseItem+ 'endcase'
/// CaseItem = Expression (',' Expression)* ':' Statement | 'default' ':'? Statement
fn case_stmt<P: GrammarParser>(p: &mut P) -> PResult {
    p.start_node(SyntaxKind::CASE_STMT);
    let opened = p.current_range();
    p.bump(); // case / casex / casez
    paren_expression(p)?;
    while !p.at_eof() && !p.at(SyntaxKind::ENDCASE_KW) {
        p.start_node(SyntaxKind::CASE_ALT);
        if p.eat(SyntaxKind::DEFAULT_KW) {
            p.eat(SyntaxKind::COLON);
        } else {
            p.start_node(SyntaxKind::CHOICES);
            loop {
                expression(p)?;
                if !p.eat(SyntaxKind::COMMA) {
                    break;
                }
            }
            p.finish_node();
            p.expect(SyntaxKind::COLON)?;
        }
        statement(p)?;
        p.finish_node();
    }
    close_keyword(p, SyntaxKind::ENDCASE_KW, "case statement", opened)?;
    p.finish_node();
    Ok(())
}

/// For = 'for' '(' Assignment ';' Expression ';' Assignment ')' Statement
fn for_stmt<P: GrammarParser>(p: &mut P) -> PResult {
    p.start_node(SyntaxKind::FOR_STMT);
    p.bump(); // for
    p.expect(SyntaxKind::L_PAREN)?;
    simple_assignment(p)?;
    p.expect(SyntaxKind::SEMICOLON)?;
    expression(p)?;
    p.expect(SyntaxKind::SEMICOLON)?;
    simple_assignment(p)?;
    p.expect(SyntaxKind::R_PAREN)?;
    statement(p)?;
    p.finish_node();
    Ok(())
}

/// ('while' | 'repeat' | 'wait') '(' Expression ')' Statement
fn guarded_stmt<P: GrammarParser>(p: &mut P, kind: SyntaxKind) -> PResult {
    p.start_node(kind);
    p.bump();
    paren_expression(p)?;
    statement(p)?;
    p.finish_node();
    Ok(())
}

fn paren_expression<P: GrammarParser>(p: &mut P) -> PResult {
    p.expect(SyntaxKind::L_PAREN)?;
    expression(p)?;
    p.expect(SyntaxKind::R_PAREN)
}

/// DelayControl = '#' (Number | Ident | '(' Expression ')')
pub(crate) fn delay_control<P: GrammarParser>(p: &mut P) -> PResult {
    p.start_node(SyntaxKind::DELAY_CONTROL);
    p.bump(); // #
    primary(p)?;
    p.finish_node();
    Ok(())
}

/// EventControl = '@' ('*' | '(' '*' ')' | Ident | '(' EventExpr (('or' | ',') EventExpr)* ')')
/// EventExpr = ('posedge' | 'negedge')? Expression
pub(crate) fn event_control<P: GrammarParser>(p: &mut P) -> PResult {
    p.start_node(SyntaxKind::EVENT_CONTROL);
    p.bump(); // @
    if p.eat(SyntaxKind::STAR) {
        p.finish_node();
        return Ok(());
    }
    if !p.at(SyntaxKind::L_PAREN) {
        primary(p)?;
        p.finish_node();
        return Ok(());
    }
    p.bump(); // (
    if p.at(SyntaxKind::STAR) && p.nth(1) == SyntaxKind::R_PAREN {
        p.bump();
    } else {
        loop {
            p.start_node(SyntaxKind::EVENT_EXPR);
            let _ = p.eat(SyntaxKind::POSEDGE_KW) || p.eat(SyntaxKind::NEGEDGE_KW);
            expression(p)?;
            p.finish_node();
            if !p.eat(SyntaxKind::OR_KW) && !p.eat(SyntaxKind::COMMA) {
                break;
            }
        }
    }
    p.expect(SyntaxKind::R_PAREN)?;
    p.finish_node();
    Ok(())
}
