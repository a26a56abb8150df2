//! Verilog module items
//!
//! Declarations, continuous assignments, procedural blocks, instances,
//! functions, tasks and generate constructs.

use rowan::TextRange;

use super::expressions::{expression, lvalue, primary};
use super::statements::{delay_control, simple_assignment, statement};
use super::{at_direction, attribute_instances, close_keyword, port_list};
use crate::parser::errors::{ErrorCode, ParseContext, RelatedInfo};
use crate::parser::grammar::GrammarParser;
use crate::parser::parser::PResult;
use crate::parser::syntax_kind::SyntaxKind;

const NET_TYPES: &[SyntaxKind] = &[
    SyntaxKind::WIRE_KW,
    SyntaxKind::TRI_KW,
    SyntaxKind::WAND_KW,
    SyntaxKind::WOR_KW,
    SyntaxKind::SUPPLY0_KW,
    SyntaxKind::SUPPLY1_KW,
];

const VARIABLE_TYPES: &[SyntaxKind] = &[
    SyntaxKind::REG_KW,
    SyntaxKind::INTEGER_KW,
    SyntaxKind::REAL_KW,
    SyntaxKind::TIME_KW,
];

const GATE_TYPES: &[SyntaxKind] = &[
    SyntaxKind::AND_KW,
    SyntaxKind::OR_KW,
    SyntaxKind::NAND_KW,
    SyntaxKind::NOR_KW,
    SyntaxKind::XOR_KW,
    SyntaxKind::XNOR_KW,
    SyntaxKind::NOT_KW,
    SyntaxKind::BUF_KW,
];

/// ModuleItem = AttributeInstance* (Declaration | ContinuousAssign | Always
///              | Initial | Instance | Function | Task | Generate)
pub fn module_item<P: GrammarParser>(p: &mut P) -> PResult {
    attribute_instances(p)?;
    let kind = p.current_kind();
    match kind {
        _ if at_direction(p) => {
            port_decl_body(p)?;
            p.expect(SyntaxKind::SEMICOLON)
        }
        _ if p.at_any(NET_TYPES) => net_decl(p),
        _ if p.at_any(VARIABLE_TYPES) => reg_decl(p),
        SyntaxKind::PARAMETER_KW | SyntaxKind::LOCALPARAM_KW => {
            param_decl_body(p, false)?;
            p.expect(SyntaxKind::SEMICOLON)
        }
        SyntaxKind::GENVAR_KW => genvar_decl(p),
        SyntaxKind::ASSIGN_KW => cont_assign(p),
        SyntaxKind::ALWAYS_KW => procedural_block(p, SyntaxKind::ALWAYS_BLOCK),
        SyntaxKind::INITIAL_KW => procedural_block(p, SyntaxKind::INITIAL_BLOCK),
        SyntaxKind::FUNCTION_KW => function_decl(p),
        SyntaxKind::TASK_KW => task_decl(p),
        SyntaxKind::GENERATE_KW => generate_region(p),
        SyntaxKind::FOR_KW => gen_for(p),
        SyntaxKind::IF_KW => gen_if(p),
        SyntaxKind::BEGIN_KW => gen_block(p),
        _ if p.at_any(GATE_TYPES) || kind.is_ident() => module_inst(p),
        SyntaxKind::CASE_KW => Err(p.error(
            ErrorCode::E0603,
            "case generate constructs are not supported",
        )),
        _ => Err(p.unexpected(ErrorCode::E0603)),
    }
}

/// PortDecl = Direction NetType? 'signed'? Dimension? DeclAssign (',' DeclAssign)*
///
/// Names after a comma stay in the same declaration until the next
/// direction keyword.
pub(crate) fn port_decl_body<P: GrammarParser>(p: &mut P) -> PResult {
    p.start_node(SyntaxKind::PORT_DECL);
    p.bump(); // input / output / inout
    if p.at_any(NET_TYPES) || p.at_any(VARIABLE_TYPES) {
        p.bump();
    }
    p.eat(SyntaxKind::SIGNED_KW);
    if p.at(SyntaxKind::L_BRACKET) {
        dimension(p)?;
    }
    decl_assign(p)?;
    while p.at(SyntaxKind::COMMA) && p.nth(1).is_ident() {
        p.bump();
        decl_assign(p)?;
    }
    p.finish_node();
    Ok(())
}

/// ParamDecl = ('parameter' | 'localparam') 'signed'? (Dimension | VarType)?
///             DeclAssign (',' DeclAssign)*
///
/// Inside `#( )` the keyword may be omitted after the first entry.
pub(crate) fn param_decl_body<P: GrammarParser>(p: &mut P, in_port_list: bool) -> PResult {
    p.start_node(SyntaxKind::PARAM_DECL);
    if !p.eat(SyntaxKind::PARAMETER_KW) && !p.eat(SyntaxKind::LOCALPARAM_KW) && !in_port_list {
        return Err(p.expected("'parameter'"));
    }
    p.eat(SyntaxKind::SIGNED_KW);
    if p.at(SyntaxKind::L_BRACKET) {
        dimension(p)?;
    } else if p.at_any(VARIABLE_TYPES) {
        p.bump();
    }
    decl_assign(p)?;
    while p.at(SyntaxKind::COMMA) && p.nth(1).is_ident() {
        p.bump();
        decl_assign(p)?;
    }
    p.finish_node();
    Ok(())
}

/// DeclAssign = Ident Dimension* ('=' Expression)?
fn decl_assign<P: GrammarParser>(p: &mut P) -> PResult {
    p.start_node(SyntaxKind::DECL_ASSIGN);
    p.expect_ident()?;
    while p.at(SyntaxKind::L_BRACKET) {
        dimension(p)?;
    }
    if p.eat(SyntaxKind::EQ) {
        expression(p)?;
    }
    p.finish_node();
    Ok(())
}

/// Dimension = '[' Expression ':' Expression ']'
pub(crate) fn dimension<P: GrammarParser>(p: &mut P) -> PResult {
    p.start_node(SyntaxKind::DIMENSION);
    let opened = p.current_range();
    p.bump(); // [
    expression(p)?;
    p.expect(SyntaxKind::COLON)?;
    expression(p)?;
    if !p.eat(SyntaxKind::R_BRACKET) {
        let found = p.current_kind().display_name();
        return Err(p
            .error(ErrorCode::E0203, format!("expected ']', found {found}"))
            .with_related(RelatedInfo::new("'[' opened here", opened)));
    }
    p.finish_node();
    Ok(())
}

/// NetDecl = NetType 'signed'? Dimension? Delay? DeclAssign (',' DeclAssign)* ';'
fn net_decl<P: GrammarParser>(p: &mut P) -> PResult {
    p.start_node(SyntaxKind::NET_DECL);
    p.bump();
    p.eat(SyntaxKind::SIGNED_KW);
    if p.at(SyntaxKind::L_BRACKET) {
        dimension(p)?;
    }
    if p.at(SyntaxKind::HASH) {
        delay_control(p)?;
    }
    decl_assign_list(p)?;
    p.expect(SyntaxKind::SEMICOLON)?;
    p.finish_node();
    Ok(())
}

/// RegDecl = ('reg' | 'integer' | 'real' | 'time') 'signed'? Dimension?
///           DeclAssign (',' DeclAssign)* ';'
pub(crate) fn reg_decl<P: GrammarParser>(p: &mut P) -> PResult {
    p.start_node(SyntaxKind::REG_DECL);
    p.bump();
    p.eat(SyntaxKind::SIGNED_KW);
    if p.at(SyntaxKind::L_BRACKET) {
        dimension(p)?;
    }
    decl_assign_list(p)?;
    p.expect(SyntaxKind::SEMICOLON)?;
    p.finish_node();
    Ok(())
}

fn decl_assign_list<P: GrammarParser>(p: &mut P) -> PResult {
    loop {
        decl_assign(p)?;
        if !p.eat(SyntaxKind::COMMA) {
            return Ok(());
        }
    }
}

/// GenvarDecl = 'genvar' Ident (',' Ident)* ';'
fn genvar_decl<P: GrammarParser>(p: &mut P) -> PResult {
    p.start_node(SyntaxKind::GENVAR_DECL);
    p.bump();
    loop {
        p.expect_ident()?;
        if !p.eat(SyntaxKind::COMMA) {
            break;
        }
    }
    p.expect(SyntaxKind::SEMICOLON)?;
    p.finish_node();
    Ok(())
}

/// ContinuousAssign = 'assign' Delay? Assignment (',' Assignment)* ';'
fn cont_assign<P: GrammarParser>(p: &mut P) -> PResult {
    p.start_node(SyntaxKind::CONT_ASSIGN);
    p.bump(); // assign
    if p.at(SyntaxKind::HASH) {
        delay_control(p)?;
    }
    loop {
        p.start_node(SyntaxKind::ASSIGNMENT);
        lvalue(p)?;
        p.expect(SyntaxKind::EQ)?;
        expression(p)?;
        p.finish_node();
        if !p.eat(SyntaxKind::COMMA) {
            break;
        }
    }
    p.expect(SyntaxKind::SEMICOLON)?;
    p.finish_node();
    Ok(())
}

/// Always = 'always' Statement; Initial = 'initial' Statement
fn procedural_block<P: GrammarParser>(p: &mut P, kind: SyntaxKind) -> PResult {
    p.start_node(kind);
    p.bump();
    statement(p)?;
    p.finish_node();
    Ok(())
}

/// ModuleInst = ModuleName ParamValues? Instance (',' Instance)* ';'
/// Instance = Ident? Dimension? '(' Connections ')'
///
/// Gate primitives share this shape; their instance name is optional.
fn module_inst<P: GrammarParser>(p: &mut P) -> PResult {
    p.start_node(SyntaxKind::MODULE_INST);
    p.bump(); // module name or gate keyword
    if p.at(SyntaxKind::HASH) {
        p.start_node(SyntaxKind::PARAM_VALUES);
        p.bump();
        if p.at(SyntaxKind::L_PAREN) {
            connections(p)?;
        } else {
            primary(p)?;
        }
        p.finish_node();
    }
    loop {
        p.start_node(SyntaxKind::INSTANCE);
        if p.current_kind().is_ident() {
            p.bump();
        }
        if p.at(SyntaxKind::L_BRACKET) {
            dimension(p)?;
        }
        if !p.at(SyntaxKind::L_PAREN) {
            return Err(p.expected("'('"));
        }
        connections(p)?;
        p.finish_node();
        if !p.eat(SyntaxKind::COMMA) {
            break;
        }
    }
    p.expect(SyntaxKind::SEMICOLON)?;
    p.finish_node();
    Ok(())
}

/// Connections = '(' (Connection (',' Connection)*)? ')'
/// Connection = '.' Ident '(' Expression? ')' | Expression?
fn connections<P: GrammarParser>(p: &mut P) -> PResult {
    p.push_context(ParseContext::AssociationList);
    p.bump(); // (
    if !p.at(SyntaxKind::R_PAREN) {
        loop {
            if p.at(SyntaxKind::DOT) {
                p.start_node(SyntaxKind::NAMED_CONNECTION);
                p.bump();
                p.expect_ident()?;
                p.expect(SyntaxKind::L_PAREN)?;
                if !p.at(SyntaxKind::R_PAREN) {
                    expression(p)?;
                }
                p.expect(SyntaxKind::R_PAREN)?;
                p.finish_node();
            } else if !p.at_any(&[SyntaxKind::COMMA, SyntaxKind::R_PAREN]) {
                expression(p)?;
            }
            if !p.eat(SyntaxKind::COMMA) {
                break;
            }
        }
    }
    p.expect(SyntaxKind::R_PAREN)?;
    p.pop_context();
    Ok(())
}

/// Declarations allowed in functions, tasks and named blocks
pub(crate) fn at_local_declaration<P: GrammarParser>(p: &P) -> bool {
    at_direction(p)
        || p.at_any(VARIABLE_TYPES)
        || p.at_any(&[SyntaxKind::PARAMETER_KW, SyntaxKind::LOCALPARAM_KW])
}

pub(crate) fn local_declaration<P: GrammarParser>(p: &mut P) -> PResult {
    if at_direction(p) {
        port_decl_body(p)?;
        p.expect(SyntaxKind::SEMICOLON)
    } else if p.at_any(VARIABLE_TYPES) {
        reg_decl(p)
    } else {
        param_decl_body(p, false)?;
        p.expect(SyntaxKind::SEMICOLON)
    }
}

/// Function = 'function' 'automatic'? 'signed'? (Dimension | VarType)? Ident
///            PortList? ';' LocalDeclaration* Statement* 'endfunction'
fn function_decl<P: GrammarParser>(p: &mut P) -> PResult {
    p.start_node(SyntaxKind::FUNCTION_DECL);
    let opened = p.current_range();
    p.bump(); // function
    p.eat(SyntaxKind::AUTOMATIC_KW);
    p.eat(SyntaxKind::SIGNED_KW);
    if p.at(SyntaxKind::L_BRACKET) {
        dimension(p)?;
    } else if p.at_any(&[
        SyntaxKind::INTEGER_KW,
        SyntaxKind::REAL_KW,
        SyntaxKind::TIME_KW,
    ]) {
        p.bump();
    }
    subroutine_tail(p, SyntaxKind::ENDFUNCTION_KW, "function", opened)?;
    p.finish_node();
    Ok(())
}

/// Task = 'task' 'automatic'? Ident PortList? ';' LocalDeclaration*
///        Statement* 'endtask'
fn task_decl<P: GrammarParser>(p: &mut P) -> PResult {
    p.start_node(SyntaxKind::TASK_DECL);
    let opened = p.current_range();
    p.bump(); // task
    p.eat(SyntaxKind::AUTOMATIC_KW);
    subroutine_tail(p, SyntaxKind::ENDTASK_KW, "task", opened)?;
    p.finish_node();
    Ok(())
}

fn subroutine_tail<P: GrammarParser>(
    p: &mut P,
    closer: SyntaxKind,
    what: &str,
    opened: TextRange,
) -> PResult {
    p.expect_ident()?;
    if p.at(SyntaxKind::L_PAREN) {
        port_list(p)?;
    }
    p.expect(SyntaxKind::SEMICOLON)?;
    while at_local_declaration(p) {
        local_declaration(p)?;
    }
    p.start_node(SyntaxKind::STMT_LIST);
    while !p.at_eof() && !p.at(closer) {
        statement(p)?;
    }
    p.finish_node();
    close_keyword(p, closer, what, opened)
}

/// Generate = 'generate' ModuleItem* 'endgenerate'
fn generate_region<P: GrammarParser>(p: &mut P) -> PResult {
    p.start_node(SyntaxKind::GENERATE_REGION);
    let opened = p.current_range();
    p.bump();
    while !p.at_eof() && !p.at(SyntaxKind::ENDGENERATE_KW) {
        module_item(p)?;
    }
    close_keyword(p, SyntaxKind::ENDGENERATE_KW, "generate region", opened)?;
    p.finish_node();
    Ok(())
}

/// GenFor = 'for' '(' Assignment ';' Expression ';' Assignment ')' ModuleItem
fn gen_for<P: GrammarParser>(p: &mut P) -> PResult {
    p.start_node(SyntaxKind::GEN_FOR);
    p.bump(); // for
    p.expect(SyntaxKind::L_PAREN)?;
    simple_assignment(p)?;
    p.expect(SyntaxKind::SEMICOLON)?;
    expression(p)?;
    p.expect(SyntaxKind::SEMICOLON)?;
    simple_assignment(p)?;
    p.expect(SyntaxKind::R_PAREN)?;
    module_item(p)?;
    p.finish_node();
    Ok(())
}

/// GenIf = 'if' '(' Expression ')' ModuleItem ('else' ModuleItem)?
fn gen_if<P: GrammarParser>(p: &mut P) -> PResult {
    p.start_node(SyntaxKind::GEN_IF);
    p.bump(); // if
    p.expect(SyntaxKind::L_PAREN)?;
    expression(p)?;
    p.expect(SyntaxKind::R_PAREN)?;
    module_item(p)?;
    if p.at(SyntaxKind::ELSE_KW) {
        p.start_node(SyntaxKind::ELSE_CLAUSE);
        p.bump();
        module_item(p)?;
        p.finish_node();
    }
    p.finish_node();
    Ok(())
}

/// GenBlock = 'begin' (':' Ident)? ModuleItem* 'end'
fn gen_block<P: GrammarParser>(p: &mut P) -> PResult {
    p.start_node(SyntaxKind::GEN_BLOCK);
    let opened = p.current_range();
    p.bump(); // begin
    if p.eat(SyntaxKind::COLON) {
        p.expect_ident()?;
    }
    while !p.at_eof() && !p.at(SyntaxKind::END_KW) {
        module_item(p)?;
    }
    close_keyword(p, SyntaxKind::END_KW, "generate block", opened)?;
    p.finish_node();
    Ok(())
}
