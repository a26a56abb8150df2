//! VHDL concurrent and sequential statements
//!
//! Every statement begins with a checkpoint taken before its optional label,
//! so the LABEL node ends up inside the statement node.

use rowan::Checkpoint;

use super::declarations::{at_declaration_start, declarative_part};
use super::expressions::{arg_list, choices, discrete_range, expression, name, target};
use super::{Block, end_block, opt_label};
use crate::parser::errors::{ErrorCode, ParseContext};
use crate::parser::grammar::GrammarParser;
use crate::parser::parser::PResult;
use crate::parser::syntax_kind::SyntaxKind;

// =============================================================================
// Concurrent statements
// =============================================================================

/// ConcurrentStatements = ConcurrentStatement*  (until a token in `stop`)
pub fn concurrent_statements<P: GrammarParser>(p: &mut P, stop: &[SyntaxKind]) -> PResult {
    p.push_context(ParseContext::ConcurrentStatements);
    p.enter_nesting()?;
    p.start_node(SyntaxKind::STMT_LIST);
    while !p.at_eof() && !p.at_any(stop) {
        concurrent_statement(p)?;
    }
    p.finish_node();
    p.exit_nesting();
    p.pop_context();
    Ok(())
}

fn concurrent_statement<P: GrammarParser>(p: &mut P) -> PResult {
    let cp = p.checkpoint();
    let label = opt_label(p);
    match p.current_kind() {
        SyntaxKind::PROCESS_KW | SyntaxKind::POSTPONED_KW => process_stmt(p, cp, label.as_deref()),
        SyntaxKind::FOR_KW => {
            require_label(p, label.is_some(), "generate statement")?;
            for_generate(p, cp, label.as_deref())
        }
        SyntaxKind::IF_KW => {
            require_label(p, label.is_some(), "generate statement")?;
            if_generate(p, cp, label.as_deref())
        }
        SyntaxKind::WITH_KW => selected_assign(p, cp),
        SyntaxKind::ASSERT_KW => assert_stmt(p, cp),
        SyntaxKind::COMPONENT_KW | SyntaxKind::ENTITY_KW | SyntaxKind::CONFIGURATION_KW => {
            require_label(p, label.is_some(), "instantiation")?;
            p.start_node_at(cp, SyntaxKind::COMPONENT_INST);
            p.bump(); // component / entity / configuration
            name(p)?;
            instance_tail(p)?;
            p.finish_node();
            Ok(())
        }
        SyntaxKind::BLOCK_KW | SyntaxKind::CASE_KW => {
            let what = p.current_kind().display_name();
            Err(p.error(
                ErrorCode::E0602,
                format!("{what} statements are not supported"),
            ))
        }
        kind if kind.is_ident() || kind == SyntaxKind::L_PAREN => {
            target(p)?;
            match p.current_kind() {
                SyntaxKind::LT_EQ => {
                    p.start_node_at(cp, SyntaxKind::SIGNAL_ASSIGN);
                    signal_assign_tail(p)?;
                    p.finish_node();
                }
                SyntaxKind::GENERIC_KW | SyntaxKind::PORT_KW => {
                    require_label(p, label.is_some(), "instantiation")?;
                    p.start_node_at(cp, SyntaxKind::COMPONENT_INST);
                    instance_tail(p)?;
                    p.finish_node();
                }
                SyntaxKind::SEMICOLON if label.is_some() => {
                    p.start_node_at(cp, SyntaxKind::COMPONENT_INST);
                    p.bump();
                    p.finish_node();
                }
                SyntaxKind::SEMICOLON => {
                    p.start_node_at(cp, SyntaxKind::CALL_STMT);
                    p.bump();
                    p.finish_node();
                }
                _ => return Err(p.expected("'<='")),
            }
            Ok(())
        }
        _ => Err(p.unexpected(ErrorCode::E0602)),
    }
}

fn require_label<P: GrammarParser>(p: &P, labeled: bool, what: &str) -> PResult {
    if labeled {
        Ok(())
    } else {
        Err(p
            .error(ErrorCode::E0602, format!("{what} requires a label"))
            .with_hint("write 'label: ...'"))
    }
}

/// Process = 'postponed'? 'process' SensitivityList? 'is'? DeclarativePart
///           'begin' SequentialStatements 'end' 'postponed'? 'process' Label? ';'
fn process_stmt<P: GrammarParser>(p: &mut P, cp: Checkpoint, label: Option<&str>) -> PResult {
    p.push_context(ParseContext::ProcessBody);
    p.start_node_at(cp, SyntaxKind::PROCESS_STMT);
    let opened = p.current_range();
    p.eat(SyntaxKind::POSTPONED_KW);
    p.expect(SyntaxKind::PROCESS_KW)?;
    if p.at(SyntaxKind::L_PAREN) {
        p.start_node(SyntaxKind::SENSITIVITY_LIST);
        p.bump();
        if !p.eat(SyntaxKind::ALL_KW) {
            loop {
                name(p)?;
                if !p.eat(SyntaxKind::COMMA) {
                    break;
                }
            }
        }
        p.expect(SyntaxKind::R_PAREN)?;
        p.finish_node();
    }
    p.eat(SyntaxKind::IS_KW);
    declarative_part(p, ParseContext::ProcessBody)?;
    p.expect(SyntaxKind::BEGIN_KW)?;
    sequential_statements(p, &[SyntaxKind::END_KW])?;
    let block =
        Block::unnamed("process", label, opened).closed_by_required(&[SyntaxKind::PROCESS_KW]);
    end_block(p, &block, false)?;
    p.finish_node();
    p.pop_context();
    Ok(())
}

/// ForGenerate = Label 'for' Ident 'in' DiscreteRange 'generate' GenerateBody
///               'end' 'generate' Label? ';'
fn for_generate<P: GrammarParser>(p: &mut P, cp: Checkpoint, label: Option<&str>) -> PResult {
    p.start_node_at(cp, SyntaxKind::FOR_GENERATE);
    let opened = p.current_range();
    p.bump(); // for
    p.expect_ident()?;
    p.expect(SyntaxKind::IN_KW)?;
    discrete_range(p)?;
    p.expect(SyntaxKind::GENERATE_KW)?;
    generate_body(p)?;
    let block =
        Block::unnamed("generate", label, opened).closed_by_required(&[SyntaxKind::GENERATE_KW]);
    end_block(p, &block, false)?;
    p.finish_node();
    Ok(())
}

/// IfGenerate = Label 'if' Expression 'generate' GenerateBody
///              ('elsif' Expression 'generate' GenerateBody)*
///              ('else' 'generate' GenerateBody)? 'end' 'generate' Label? ';'
fn if_generate<P: GrammarParser>(p: &mut P, cp: Checkpoint, label: Option<&str>) -> PResult {
    p.start_node_at(cp, SyntaxKind::IF_GENERATE);
    let opened = p.current_range();
    p.bump(); // if
    expression(p)?;
    p.expect(SyntaxKind::GENERATE_KW)?;
    generate_body(p)?;
    while p.at(SyntaxKind::ELSIF_KW) {
        p.start_node(SyntaxKind::ELSIF_CLAUSE);
        p.bump();
        expression(p)?;
        p.expect(SyntaxKind::GENERATE_KW)?;
        generate_body(p)?;
        p.finish_node();
    }
    if p.at(SyntaxKind::ELSE_KW) {
        p.start_node(SyntaxKind::ELSE_CLAUSE);
        p.bump();
        p.expect(SyntaxKind::GENERATE_KW)?;
        generate_body(p)?;
        p.finish_node();
    }
    let block =
        Block::unnamed("generate", label, opened).closed_by_required(&[SyntaxKind::GENERATE_KW]);
    end_block(p, &block, false)?;
    p.finish_node();
    Ok(())
}

/// GenerateBody = (DeclarativePart 'begin')? ConcurrentStatements
fn generate_body<P: GrammarParser>(p: &mut P) -> PResult {
    if at_declaration_start(p) || p.at(SyntaxKind::BEGIN_KW) {
        declarative_part(p, ParseContext::DeclarativePart)?;
        p.expect(SyntaxKind::BEGIN_KW)?;
    }
    concurrent_statements(
        p,
        &[SyntaxKind::END_KW, SyntaxKind::ELSIF_KW, SyntaxKind::ELSE_KW],
    )
}

/// SelectedAssign = 'with' Expression 'select' Target '<=' DelayMechanism?
///                  SelectedWaveform (',' SelectedWaveform)* ';'
/// SelectedWaveform = Waveform 'when' Choices
fn selected_assign<P: GrammarParser>(p: &mut P, cp: Checkpoint) -> PResult {
    p.start_node_at(cp, SyntaxKind::SELECTED_ASSIGN);
    p.bump(); // with
    expression(p)?;
    p.expect(SyntaxKind::SELECT_KW)?;
    target(p)?;
    p.expect(SyntaxKind::LT_EQ)?;
    delay_mechanism(p)?;
    loop {
        p.start_node(SyntaxKind::SELECTED_WAVEFORM);
        waveform(p, false)?;
        p.expect(SyntaxKind::WHEN_KW)?;
        choices(p)?;
        p.finish_node();
        if !p.eat(SyntaxKind::COMMA) {
            break;
        }
    }
    p.expect(SyntaxKind::SEMICOLON)?;
    p.finish_node();
    Ok(())
}

/// InstanceTail = GenericMap? PortMap? ';'
fn instance_tail<P: GrammarParser>(p: &mut P) -> PResult {
    if p.at(SyntaxKind::GENERIC_KW) {
        p.start_node(SyntaxKind::GENERIC_MAP);
        p.bump();
        p.expect(SyntaxKind::MAP_KW)?;
        association_list(p)?;
        p.finish_node();
    }
    if p.at(SyntaxKind::PORT_KW) {
        p.start_node(SyntaxKind::PORT_MAP);
        p.bump();
        p.expect(SyntaxKind::MAP_KW)?;
        association_list(p)?;
        p.finish_node();
    }
    p.expect(SyntaxKind::SEMICOLON)
}

fn association_list<P: GrammarParser>(p: &mut P) -> PResult {
    if p.at(SyntaxKind::L_PAREN) {
        arg_list(p)
    } else {
        Err(p.expected("'('"))
    }
}

/// SignalAssignTail = '<=' 'guarded'? DelayMechanism? Waveform
///                    ('when' Expression ('else' Waveform)?)* ';'
fn signal_assign_tail<P: GrammarParser>(p: &mut P) -> PResult {
    p.bump(); // <=
    p.eat(SyntaxKind::GUARDED_KW);
    delay_mechanism(p)?;
    waveform(p, true)?;
    while p.eat(SyntaxKind::WHEN_KW) {
        expression(p)?;
        if p.eat(SyntaxKind::ELSE_KW) {
            waveform(p, true)?;
        } else {
            break;
        }
    }
    p.expect(SyntaxKind::SEMICOLON)
}

/// DelayMechanism = 'transport' | ('reject' Expression)? 'inertial'
fn delay_mechanism<P: GrammarParser>(p: &mut P) -> PResult {
    if p.eat(SyntaxKind::TRANSPORT_KW) {
        return Ok(());
    }
    if p.eat(SyntaxKind::REJECT_KW) {
        expression(p)?;
        p.expect(SyntaxKind::INERTIAL_KW)?;
        return Ok(());
    }
    p.eat(SyntaxKind::INERTIAL_KW);
    Ok(())
}

/// Waveform = 'unaffected' | WaveformElement (',' WaveformElement)*
/// WaveformElement = Expression ('after' Expression)?
///
/// Inside a selected assignment a comma starts the next alternative, so
/// only one element is read there.
fn waveform<P: GrammarParser>(p: &mut P, multiple: bool) -> PResult {
    p.start_node(SyntaxKind::WAVEFORM);
    if !p.eat(SyntaxKind::UNAFFECTED_KW) {
        loop {
            p.start_node(SyntaxKind::WAVEFORM_ELEMENT);
            expression(p)?;
            if p.eat(SyntaxKind::AFTER_KW) {
                expression(p)?;
            }
            p.finish_node();
            if !multiple || !p.eat(SyntaxKind::COMMA) {
                break;
            }
        }
    }
    p.finish_node();
    Ok(())
}

/// Assert = 'assert' Expression ('report' Expression)? ('severity' Expression)? ';'
fn assert_stmt<P: GrammarParser>(p: &mut P, cp: Checkpoint) -> PResult {
    p.start_node_at(cp, SyntaxKind::ASSERT_STMT);
    p.bump(); // assert
    expression(p)?;
    if p.eat(SyntaxKind::REPORT_KW) {
        expression(p)?;
    }
    if p.eat(SyntaxKind::SEVERITY_KW) {
        expression(p)?;
    }
    p.expect(SyntaxKind::SEMICOLON)?;
    p.finish_node();
    Ok(())
}

// =============================================================================
// Sequential statements
// =============================================================================

/// SequentialStatements = SequentialStatement*  (until a token in `stop`)
pub fn sequential_statements<P: GrammarParser>(p: &mut P, stop: &[SyntaxKind]) -> PResult {
    p.push_context(ParseContext::SequentialStatements);
    p.enter_nesting()?;
    p.start_node(SyntaxKind::STMT_LIST);
    while !p.at_eof() && !p.at_any(stop) {
        sequential_statement(p)?;
    }
    p.finish_node();
    p.exit_nesting();
    p.pop_context();
    Ok(())
}

fn sequential_statement<P: GrammarParser>(p: &mut P) -> PResult {
    let cp = p.checkpoint();
    let label = opt_label(p);
    let label = label.as_deref();
    match p.current_kind() {
        SyntaxKind::IF_KW => if_stmt(p, cp, label),
        SyntaxKind::CASE_KW => case_stmt(p, cp, label),
        SyntaxKind::FOR_KW | SyntaxKind::WHILE_KW | SyntaxKind::LOOP_KW => {
            loop_stmt(p, cp, label)
        }
        SyntaxKind::NEXT_KW => loop_control(p, cp, SyntaxKind::NEXT_STMT),
        SyntaxKind::EXIT_KW => loop_control(p, cp, SyntaxKind::EXIT_STMT),
        SyntaxKind::RETURN_KW => {
            p.start_node_at(cp, SyntaxKind::RETURN_STMT);
            p.bump();
            if !p.at(SyntaxKind::SEMICOLON) {
                expression(p)?;
            }
            p.expect(SyntaxKind::SEMICOLON)?;
            p.finish_node();
            Ok(())
        }
        SyntaxKind::NULL_KW => {
            p.start_node_at(cp, SyntaxKind::NULL_STMT);
            p.bump();
            p.expect(SyntaxKind::SEMICOLON)?;
            p.finish_node();
            Ok(())
        }
        SyntaxKind::WAIT_KW => wait_stmt(p, cp),
        SyntaxKind::ASSERT_KW => assert_stmt(p, cp),
        SyntaxKind::REPORT_KW => {
            p.start_node_at(cp, SyntaxKind::REPORT_STMT);
            p.bump();
            expression(p)?;
            if p.eat(SyntaxKind::SEVERITY_KW) {
                expression(p)?;
            }
            p.expect(SyntaxKind::SEMICOLON)?;
            p.finish_node();
            Ok(())
        }
        kind if kind.is_ident() || kind == SyntaxKind::L_PAREN => {
            target(p)?;
            match p.current_kind() {
                SyntaxKind::LT_EQ => {
                    p.start_node_at(cp, SyntaxKind::SIGNAL_ASSIGN);
                    signal_assign_tail(p)?;
                    p.finish_node();
                }
                SyntaxKind::COLON_EQ => {
                    p.start_node_at(cp, SyntaxKind::VARIABLE_ASSIGN);
                    p.bump();
                    expression(p)?;
                    while p.eat(SyntaxKind::WHEN_KW) {
                        expression(p)?;
                        if p.eat(SyntaxKind::ELSE_KW) {
                            expression(p)?;
                        } else {
                            break;
                        }
                    }
                    p.expect(SyntaxKind::SEMICOLON)?;
                    p.finish_node();
                }
                SyntaxKind::SEMICOLON => {
                    p.start_node_at(cp, SyntaxKind::CALL_STMT);
                    p.bump();
                    p.finish_node();
                }
                _ => return Err(p.expected("'<=' or ':='")),
            }
            Ok(())
        }
        _ => Err(p.unexpected(ErrorCode::E0601)),
    }
}

/// If = 'if' Expression 'then' SequentialStatements
///      ('elsif' Expression 'then' SequentialStatements)*
///      ('else' SequentialStatements)? 'end' 'if' Label? ';'
fn if_stmt<P: GrammarParser>(p: &mut P, cp: Checkpoint, label: Option<&str>) -> PResult {
    p.start_node_at(cp, SyntaxKind::IF_STMT);
    let opened = p.current_range();
    let branch_end = [SyntaxKind::ELSIF_KW, SyntaxKind::ELSE_KW, SyntaxKind::END_KW];
    p.bump(); // if
    expression(p)?;
    p.expect(SyntaxKind::THEN_KW)?;
    sequential_statements(p, &branch_end)?;
    while p.at(SyntaxKind::ELSIF_KW) {
        p.start_node(SyntaxKind::ELSIF_CLAUSE);
        p.bump();
        expression(p)?;
        p.expect(SyntaxKind::THEN_KW)?;
        sequential_statements(p, &branch_end)?;
        p.finish_node();
    }
    if p.at(SyntaxKind::ELSE_KW) {
        p.start_node(SyntaxKind::ELSE_CLAUSE);
        p.bump();
        sequential_statements(p, &[SyntaxKind::END_KW])?;
        p.finish_node();
    }
    let block = Block::unnamed("if", label, opened).closed_by_required(&[SyntaxKind::IF_KW]);
    end_block(p, &block, false)?;
    p.finish_node();
    Ok(())
}

/// Case = 'case' Expression 'is' CaseAlternative+ 'end' 'case' Label? ';'
/// CaseAlternative = 'when' Choices '=>' SequentialStatements
fn case_stmt<P: GrammarParser>(p: &mut P, cp: Checkpoint, label: Option<&str>) -> PResult {
    p.start_node_at(cp, SyntaxKind::CASE_STMT);
    let opened = p.current_range();
    p.bump(); // case
    expression(p)?;
    p.expect(SyntaxKind::IS_KW)?;
    while p.at(SyntaxKind::WHEN_KW) {
        p.start_node(SyntaxKind::CASE_ALT);
        p.bump();
        choices(p)?;
        p.expect(SyntaxKind::FAT_ARROW)?;
        sequential_statements(p, &[SyntaxKind::WHEN_KW, SyntaxKind::END_KW])?;
        p.finish_node();
    }
    let block = Block::unnamed("case", label, opened).closed_by_required(&[SyntaxKind::CASE_KW]);
    end_block(p, &block, false)?;
    p.finish_node();
    Ok(())
}

/// Loop = ('for' Ident 'in' DiscreteRange | 'while' Expression)? 'loop'
///        SequentialStatements 'end' 'loop' Label? ';'
fn loop_stmt<P: GrammarParser>(p: &mut P, cp: Checkpoint, label: Option<&str>) -> PResult {
    let opened = p.current_range();
    match p.current_kind() {
        SyntaxKind::FOR_KW => {
            p.start_node_at(cp, SyntaxKind::FOR_LOOP);
            p.bump();
            p.expect_ident()?;
            p.expect(SyntaxKind::IN_KW)?;
            discrete_range(p)?;
        }
        SyntaxKind::WHILE_KW => {
            p.start_node_at(cp, SyntaxKind::WHILE_LOOP);
            p.bump();
            expression(p)?;
        }
        _ => p.start_node_at(cp, SyntaxKind::LOOP_STMT),
    }
    p.expect(SyntaxKind::LOOP_KW)?;
    sequential_statements(p, &[SyntaxKind::END_KW])?;
    let block = Block::unnamed("loop", label, opened).closed_by_required(&[SyntaxKind::LOOP_KW]);
    end_block(p, &block, false)?;
    p.finish_node();
    Ok(())
}

/// Next/Exit = ('next' | 'exit') Ident? ('when' Expression)? ';'
fn loop_control<P: GrammarParser>(p: &mut P, cp: Checkpoint, kind: SyntaxKind) -> PResult {
    p.start_node_at(cp, kind);
    p.bump();
    if p.current_kind().is_ident() {
        p.bump();
    }
    if p.eat(SyntaxKind::WHEN_KW) {
        expression(p)?;
    }
    p.expect(SyntaxKind::SEMICOLON)?;
    p.finish_node();
    Ok(())
}

/// Wait = 'wait' ('on' Name (',' Name)*)? ('until' Expression)? ('for' Expression)? ';'
fn wait_stmt<P: GrammarParser>(p: &mut P, cp: Checkpoint) -> PResult {
    p.start_node_at(cp, SyntaxKind::WAIT_STMT);
    p.bump(); // wait
    if p.eat(SyntaxKind::ON_KW) {
        p.start_node(SyntaxKind::SENSITIVITY_LIST);
        loop {
            name(p)?;
            if !p.eat(SyntaxKind::COMMA) {
                break;
            }
        }
        p.finish_node();
    }
    if p.eat(SyntaxKind::UNTIL_KW) {
        expression(p)?;
    }
    if p.eat(SyntaxKind::FOR_KW) {
        expression(p)?;
    }
    p.expect(SyntaxKind::SEMICOLON)?;
    p.finish_node();
    Ok(())
}
