//! VHDL declarations
//!
//! Declarative parts of entities, architectures, packages, processes and
//! subprograms, plus interface lists for generics, ports and parameters.

use super::expressions::{discrete_range, expression, name};
use super::statements::sequential_statements;
use super::{Block, declared_name, end_block, generic_clause, port_clause, use_clause};
use crate::parser::errors::{ErrorCode, ParseContext};
use crate::parser::grammar::GrammarParser;
use crate::parser::parser::PResult;
use crate::parser::syntax_kind::SyntaxKind;

/// DeclarativePart = DeclarativeItem*  (until 'begin' or 'end')
pub fn declarative_part<P: GrammarParser>(p: &mut P, context: ParseContext) -> PResult {
    p.push_context(context);
    p.start_node(SyntaxKind::DECL_LIST);
    while !p.at_eof() && !p.at_any(&[SyntaxKind::BEGIN_KW, SyntaxKind::END_KW]) {
        declarative_item(p)?;
    }
    p.finish_node();
    p.pop_context();
    Ok(())
}

/// Tokens that can open a declarative item
pub(crate) fn at_declaration_start<P: GrammarParser>(p: &P) -> bool {
    p.at_any(&[
        SyntaxKind::CONSTANT_KW,
        SyntaxKind::SIGNAL_KW,
        SyntaxKind::VARIABLE_KW,
        SyntaxKind::SHARED_KW,
        SyntaxKind::TYPE_KW,
        SyntaxKind::SUBTYPE_KW,
        SyntaxKind::ALIAS_KW,
        SyntaxKind::COMPONENT_KW,
        SyntaxKind::FUNCTION_KW,
        SyntaxKind::PROCEDURE_KW,
        SyntaxKind::PURE_KW,
        SyntaxKind::IMPURE_KW,
        SyntaxKind::ATTRIBUTE_KW,
        SyntaxKind::USE_KW,
        SyntaxKind::FILE_KW,
    ])
}

fn declarative_item<P: GrammarParser>(p: &mut P) -> PResult {
    match p.current_kind() {
        SyntaxKind::CONSTANT_KW => object_decl(p, SyntaxKind::CONSTANT_DECL),
        SyntaxKind::SIGNAL_KW => object_decl(p, SyntaxKind::SIGNAL_DECL),
        SyntaxKind::VARIABLE_KW | SyntaxKind::SHARED_KW => {
            object_decl(p, SyntaxKind::VARIABLE_DECL)
        }
        SyntaxKind::TYPE_KW => type_decl(p),
        SyntaxKind::SUBTYPE_KW => subtype_decl(p),
        SyntaxKind::ALIAS_KW => alias_decl(p),
        SyntaxKind::COMPONENT_KW => component_decl(p),
        SyntaxKind::FUNCTION_KW
        | SyntaxKind::PROCEDURE_KW
        | SyntaxKind::PURE_KW
        | SyntaxKind::IMPURE_KW => subprogram(p),
        SyntaxKind::ATTRIBUTE_KW if p.nth(2) == SyntaxKind::COLON => attribute_decl(p),
        SyntaxKind::ATTRIBUTE_KW => attribute_spec(p),
        SyntaxKind::USE_KW => use_clause(p),
        SyntaxKind::FILE_KW | SyntaxKind::GROUP_KW | SyntaxKind::DISCONNECT_KW => {
            let what = p.current_kind().display_name();
            Err(p.error(
                ErrorCode::E0302,
                format!("{what} declarations are not supported"),
            ))
        }
        _ => Err(p.unexpected(ErrorCode::E0302)),
    }
}

/// ObjectDecl = ('constant' | 'signal' | 'shared'? 'variable') IdentList ':'
///              SubtypeIndication ('register' | 'bus')? (':=' Expression)? ';'
fn object_decl<P: GrammarParser>(p: &mut P, kind: SyntaxKind) -> PResult {
    p.start_node(kind);
    p.eat(SyntaxKind::SHARED_KW);
    p.bump(); // constant / signal / variable
    ident_list(p)?;
    p.expect(SyntaxKind::COLON)?;
    subtype_indication(p)?;
    if kind == SyntaxKind::SIGNAL_DECL {
        let _ = p.eat(SyntaxKind::REGISTER_KW) || p.eat(SyntaxKind::BUS_KW);
    }
    if p.eat(SyntaxKind::COLON_EQ) {
        expression(p)?;
    }
    p.expect(SyntaxKind::SEMICOLON)?;
    p.finish_node();
    Ok(())
}

/// IdentList = Ident (',' Ident)*
pub(crate) fn ident_list<P: GrammarParser>(p: &mut P) -> PResult {
    p.start_node(SyntaxKind::IDENT_LIST);
    p.expect_ident()?;
    while p.eat(SyntaxKind::COMMA) {
        p.expect_ident()?;
    }
    p.finish_node();
    Ok(())
}

/// SubtypeIndication = ResolutionName? TypeMark ('range' Range)?
///
/// The type mark is a name, so an index constraint such as
/// `std_logic_vector(7 downto 0)` arrives as a call node.
pub fn subtype_indication<P: GrammarParser>(p: &mut P) -> PResult {
    let cp = p.checkpoint();
    if !p.current_kind().is_ident() {
        let found = p.current_kind().display_name();
        return Err(p.error(ErrorCode::E0305, format!("expected type mark, found {found}")));
    }
    name(p)?;
    if p.current_kind().is_ident() {
        // `resolved std_ulogic`: the first name was a resolution function
        p.start_node_at(cp, SyntaxKind::RESOLVED_TYPE);
        subtype_indication(p)?;
        p.finish_node();
    } else if p.at(SyntaxKind::RANGE_KW) {
        p.start_node_at(cp, SyntaxKind::CONSTRAINED_TYPE);
        p.bump(); // range
        if !p.eat(SyntaxKind::BOX) {
            discrete_range(p)?;
        }
        p.finish_node();
    }
    Ok(())
}

/// TypeDecl = 'type' Ident ('is' TypeDefinition)? ';'
fn type_decl<P: GrammarParser>(p: &mut P) -> PResult {
    p.start_node(SyntaxKind::TYPE_DECL);
    p.bump(); // type
    let name = declared_name(p)?;
    if p.eat(SyntaxKind::IS_KW) {
        p.push_context(ParseContext::TypeDefinition);
        type_definition(p, &name)?;
        p.pop_context();
    }
    p.expect(SyntaxKind::SEMICOLON)?;
    p.finish_node();
    Ok(())
}

fn type_definition<P: GrammarParser>(p: &mut P, type_name: &str) -> PResult {
    match p.current_kind() {
        SyntaxKind::L_PAREN => enum_def(p),
        SyntaxKind::RANGE_KW => range_or_physical_def(p, type_name),
        SyntaxKind::ARRAY_KW => array_def(p),
        SyntaxKind::RECORD_KW => record_def(p, type_name),
        SyntaxKind::ACCESS_KW => {
            p.start_node(SyntaxKind::ACCESS_DEF);
            p.bump();
            subtype_indication(p)?;
            p.finish_node();
            Ok(())
        }
        SyntaxKind::FILE_KW => {
            p.start_node(SyntaxKind::FILE_DEF);
            p.bump();
            p.expect(SyntaxKind::OF_KW)?;
            name(p)?;
            p.finish_node();
            Ok(())
        }
        _ => Err(p.unexpected(ErrorCode::E0304)),
    }
}

/// EnumDef = '(' (Ident | CharLiteral) (',' (Ident | CharLiteral))* ')'
fn enum_def<P: GrammarParser>(p: &mut P) -> PResult {
    p.start_node(SyntaxKind::ENUM_DEF);
    p.bump(); // (
    loop {
        if p.current_kind().is_ident() || p.at(SyntaxKind::CHAR_LITERAL) {
            p.bump();
        } else {
            return Err(p.error(ErrorCode::E0304, "expected enumeration literal"));
        }
        if !p.eat(SyntaxKind::COMMA) {
            break;
        }
    }
    p.expect(SyntaxKind::R_PAREN)?;
    p.finish_node();
    Ok(())
}

/// RangeDef = 'range' Range
/// PhysicalDef = 'range' Range 'units' Ident ';' UnitDecl* 'end' 'units' Ident?
fn range_or_physical_def<P: GrammarParser>(p: &mut P, type_name: &str) -> PResult {
    let cp = p.checkpoint();
    let opened = p.current_range();
    p.bump(); // range
    discrete_range(p)?;
    if !p.at(SyntaxKind::UNITS_KW) {
        p.start_node_at(cp, SyntaxKind::RANGE_DEF);
        p.finish_node();
        return Ok(());
    }
    p.start_node_at(cp, SyntaxKind::PHYSICAL_DEF);
    p.bump(); // units
    p.expect_ident()?;
    p.expect(SyntaxKind::SEMICOLON)?;
    while p.current_kind().is_ident() {
        p.start_node(SyntaxKind::UNIT_DECL);
        p.bump();
        p.expect(SyntaxKind::EQ)?;
        expression(p)?;
        p.expect(SyntaxKind::SEMICOLON)?;
        p.finish_node();
    }
    let block = Block::new("units", type_name, opened).closed_by_required(&[SyntaxKind::UNITS_KW]);
    end_block(p, &block, true)?;
    p.finish_node();
    Ok(())
}

/// ArrayDef = 'array' '(' DiscreteRange (',' DiscreteRange)* ')' 'of' SubtypeIndication
fn array_def<P: GrammarParser>(p: &mut P) -> PResult {
    p.start_node(SyntaxKind::ARRAY_DEF);
    p.bump(); // array
    p.start_node(SyntaxKind::INDEX_LIST);
    p.expect(SyntaxKind::L_PAREN)?;
    loop {
        discrete_range(p)?;
        if !p.eat(SyntaxKind::COMMA) {
            break;
        }
    }
    p.expect(SyntaxKind::R_PAREN)?;
    p.finish_node();
    p.expect(SyntaxKind::OF_KW)?;
    subtype_indication(p)?;
    p.finish_node();
    Ok(())
}

/// RecordDef = 'record' (IdentList ':' SubtypeIndication ';')+ 'end' 'record' Ident?
fn record_def<P: GrammarParser>(p: &mut P, type_name: &str) -> PResult {
    p.start_node(SyntaxKind::RECORD_DEF);
    let opened = p.current_range();
    p.bump(); // record
    while p.current_kind().is_ident() {
        p.start_node(SyntaxKind::RECORD_ELEMENT);
        ident_list(p)?;
        p.expect(SyntaxKind::COLON)?;
        subtype_indication(p)?;
        p.expect(SyntaxKind::SEMICOLON)?;
        p.finish_node();
    }
    let block = Block::new("record", type_name, opened).closed_by_required(&[SyntaxKind::RECORD_KW]);
    end_block(p, &block, true)?;
    p.finish_node();
    Ok(())
}

/// SubtypeDecl = 'subtype' Ident 'is' SubtypeIndication ';'
fn subtype_decl<P: GrammarParser>(p: &mut P) -> PResult {
    p.start_node(SyntaxKind::SUBTYPE_DECL);
    p.bump(); // subtype
    p.expect_ident()?;
    p.expect(SyntaxKind::IS_KW)?;
    subtype_indication(p)?;
    p.expect(SyntaxKind::SEMICOLON)?;
    p.finish_node();
    Ok(())
}

/// AliasDecl = 'alias' Designator (':' SubtypeIndication)? 'is' Name ';'
fn alias_decl<P: GrammarParser>(p: &mut P) -> PResult {
    p.start_node(SyntaxKind::ALIAS_DECL);
    p.bump(); // alias
    if p.current_kind().is_ident() || p.at_any(&[SyntaxKind::CHAR_LITERAL, SyntaxKind::STRING]) {
        p.bump();
    } else {
        return Err(p.error(ErrorCode::E0301, "expected alias designator"));
    }
    if p.eat(SyntaxKind::COLON) {
        subtype_indication(p)?;
    }
    p.expect(SyntaxKind::IS_KW)?;
    name(p)?;
    p.expect(SyntaxKind::SEMICOLON)?;
    p.finish_node();
    Ok(())
}

/// ComponentDecl = 'component' Ident 'is'? GenericClause? PortClause?
///                 'end' 'component' Ident? ';'
fn component_decl<P: GrammarParser>(p: &mut P) -> PResult {
    p.start_node(SyntaxKind::COMPONENT_DECL);
    let opened = p.current_range();
    p.bump(); // component
    let name = declared_name(p)?;
    p.eat(SyntaxKind::IS_KW);
    if p.at(SyntaxKind::GENERIC_KW) {
        generic_clause(p)?;
    }
    if p.at(SyntaxKind::PORT_KW) {
        port_clause(p)?;
    }
    let block =
        Block::new("component", &name, opened).closed_by_required(&[SyntaxKind::COMPONENT_KW]);
    end_block(p, &block, false)?;
    p.finish_node();
    Ok(())
}

/// Subprogram = ('pure' | 'impure')? 'function' Designator InterfaceList?
///              'return' TypeMark SubprogramTail
///            | 'procedure' Designator InterfaceList? SubprogramTail
/// SubprogramTail = ';' | 'is' DeclarativePart 'begin' SequentialStatements
///                  'end' ('function' | 'procedure')? Designator? ';'
fn subprogram<P: GrammarParser>(p: &mut P) -> PResult {
    p.start_node(SyntaxKind::SUBPROGRAM_DECL);
    let opened = p.current_range();
    let is_function = p.at_any(&[
        SyntaxKind::FUNCTION_KW,
        SyntaxKind::PURE_KW,
        SyntaxKind::IMPURE_KW,
    ]);
    if p.eat(SyntaxKind::PURE_KW) || p.eat(SyntaxKind::IMPURE_KW) {
        p.expect(SyntaxKind::FUNCTION_KW)?;
    } else {
        p.bump(); // function / procedure
    }

    let designator = p.current_text().to_string();
    if p.current_kind().is_ident() || p.at(SyntaxKind::STRING) {
        p.bump();
    } else {
        return Err(p.error(ErrorCode::E0301, "expected subprogram designator"));
    }

    if p.at(SyntaxKind::L_PAREN) {
        p.push_context(ParseContext::ParameterList);
        interface_list(p)?;
        p.pop_context();
    }
    if is_function {
        p.expect(SyntaxKind::RETURN_KW)?;
        name(p)?;
    }

    if p.eat(SyntaxKind::IS_KW) {
        declarative_part(p, ParseContext::SubprogramBody)?;
        p.expect(SyntaxKind::BEGIN_KW)?;
        p.push_context(ParseContext::SubprogramBody);
        sequential_statements(p, &[SyntaxKind::END_KW])?;
        p.pop_context();
        let block = if is_function {
            Block::new("function", &designator, opened).closed_by(&[SyntaxKind::FUNCTION_KW])
        } else {
            Block::new("procedure", &designator, opened).closed_by(&[SyntaxKind::PROCEDURE_KW])
        };
        end_block(p, &block, false)?;
    } else {
        p.expect(SyntaxKind::SEMICOLON)?;
    }
    p.finish_node();
    Ok(())
}

/// AttributeDecl = 'attribute' Ident ':' TypeMark ';'
fn attribute_decl<P: GrammarParser>(p: &mut P) -> PResult {
    p.start_node(SyntaxKind::ATTRIBUTE_DECL);
    p.bump(); // attribute
    p.expect_ident()?;
    p.expect(SyntaxKind::COLON)?;
    name(p)?;
    p.expect(SyntaxKind::SEMICOLON)?;
    p.finish_node();
    Ok(())
}

/// AttributeSpec = 'attribute' Ident 'of' (IdentList | 'others' | 'all') ':'
///                 EntityClass 'is' Expression ';'
fn attribute_spec<P: GrammarParser>(p: &mut P) -> PResult {
    p.start_node(SyntaxKind::ATTRIBUTE_SPEC);
    p.bump(); // attribute
    p.expect_ident()?;
    p.expect(SyntaxKind::OF_KW)?;
    if !p.eat(SyntaxKind::OTHERS_KW) && !p.eat(SyntaxKind::ALL_KW) {
        ident_list(p)?;
    }
    p.expect(SyntaxKind::COLON)?;
    // entity class: signal, entity, label, component, ... (keyword or identifier)
    if p.current_kind().is_keyword() || p.current_kind().is_ident() {
        p.bump();
    } else {
        return Err(p.error(ErrorCode::E0302, "expected entity class"));
    }
    p.expect(SyntaxKind::IS_KW)?;
    expression(p)?;
    p.expect(SyntaxKind::SEMICOLON)?;
    p.finish_node();
    Ok(())
}

/// InterfaceList = '(' InterfaceDecl (';' InterfaceDecl)* ')'
pub fn interface_list<P: GrammarParser>(p: &mut P) -> PResult {
    p.start_node(SyntaxKind::INTERFACE_LIST);
    p.expect(SyntaxKind::L_PAREN)?;
    loop {
        interface_decl(p)?;
        if !p.eat(SyntaxKind::SEMICOLON) {
            break;
        }
    }
    if !p.at(SyntaxKind::R_PAREN) {
        let found = p.current_kind().display_name();
        return Err(p
            .error(ErrorCode::E0202, format!("expected ')' or ';', found {found}"))
            .with_hint("interface declarations are separated by ';'"));
    }
    p.bump();
    p.finish_node();
    Ok(())
}

/// InterfaceDecl = ('signal' | 'variable' | 'constant')? IdentList ':' Mode?
///                 SubtypeIndication 'bus'? (':=' Expression)?
fn interface_decl<P: GrammarParser>(p: &mut P) -> PResult {
    p.start_node(SyntaxKind::INTERFACE_DECL);
    let _ = p.eat(SyntaxKind::SIGNAL_KW)
        || p.eat(SyntaxKind::VARIABLE_KW)
        || p.eat(SyntaxKind::CONSTANT_KW);
    if !p.current_kind().is_ident() {
        let found = p.current_kind().display_name();
        return Err(p.error(
            ErrorCode::E0303,
            format!("expected interface name, found {found}"),
        ));
    }
    ident_list(p)?;
    p.expect(SyntaxKind::COLON)?;
    let _ = p.eat(SyntaxKind::IN_KW)
        || p.eat(SyntaxKind::OUT_KW)
        || p.eat(SyntaxKind::INOUT_KW)
        || p.eat(SyntaxKind::BUFFER_KW)
        || p.eat(SyntaxKind::LINKAGE_KW);
    subtype_indication(p)?;
    p.eat(SyntaxKind::BUS_KW);
    if p.eat(SyntaxKind::COLON_EQ) {
        expression(p)?;
    }
    p.finish_node();
    Ok(())
}
