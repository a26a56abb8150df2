//! VHDL expressions and names
//!
//! ```text
//! expression  → relation (logical_op relation)*     (one operator kind only)
//! relation    → shift_expr (rel_op shift_expr)?
//! shift_expr  → simple_expr (shift_op simple_expr)?
//! simple_expr → sign? term (adding_op term)*
//! term        → factor (mul_op factor)*
//! factor      → primary ('**' primary)? | ('abs' | 'not' | logical_op) primary
//! ```

use rowan::{Checkpoint, TextRange};

use crate::parser::errors::{ErrorCode, ParseContext, RelatedInfo};
use crate::parser::grammar::GrammarParser;
use crate::parser::parser::PResult;
use crate::parser::syntax_kind::SyntaxKind;

const LOGICAL_OPS: &[SyntaxKind] = &[
    SyntaxKind::AND_KW,
    SyntaxKind::OR_KW,
    SyntaxKind::XOR_KW,
    SyntaxKind::XNOR_KW,
    SyntaxKind::NAND_KW,
    SyntaxKind::NOR_KW,
];

const RELATIONAL_OPS: &[SyntaxKind] = &[
    SyntaxKind::EQ,
    SyntaxKind::SLASH_EQ,
    SyntaxKind::LT,
    SyntaxKind::LT_EQ,
    SyntaxKind::GT,
    SyntaxKind::GT_EQ,
];

const SHIFT_OPS: &[SyntaxKind] = &[
    SyntaxKind::SLL_KW,
    SyntaxKind::SRL_KW,
    SyntaxKind::SLA_KW,
    SyntaxKind::SRA_KW,
    SyntaxKind::ROL_KW,
    SyntaxKind::ROR_KW,
];

const ADDING_OPS: &[SyntaxKind] = &[SyntaxKind::PLUS, SyntaxKind::MINUS, SyntaxKind::AMP];

const MULTIPLYING_OPS: &[SyntaxKind] = &[
    SyntaxKind::STAR,
    SyntaxKind::SLASH,
    SyntaxKind::MOD_KW,
    SyntaxKind::REM_KW,
];

/// Expression = Relation (LogicalOp Relation)*
///
/// A chain may only repeat one logical operator, and `nand`/`nor` may not
/// be chained at all.
pub fn expression<P: GrammarParser>(p: &mut P) -> PResult {
    p.push_context(ParseContext::Expression);
    p.enter_nesting()?;
    let cp = p.checkpoint();
    relation(p)?;
    let mut chain: Option<SyntaxKind> = None;
    while p.at_any(LOGICAL_OPS) {
        let op = p.current_kind();
        match chain {
            Some(prev) if prev != op => {
                return Err(p
                    .error(
                        ErrorCode::E0402,
                        format!(
                            "cannot mix {} and {} without parentheses",
                            prev.display_name(),
                            op.display_name()
                        ),
                    )
                    .with_hint("add parentheses to make the grouping explicit"));
            }
            Some(prev) if matches!(prev, SyntaxKind::NAND_KW | SyntaxKind::NOR_KW) => {
                return Err(p.error(
                    ErrorCode::E0402,
                    format!("{} is not associative", op.display_name()),
                ));
            }
            _ => {}
        }
        chain = Some(op);
        p.start_node_at(cp, SyntaxKind::BINARY_EXPR);
        p.bump();
        relation(p)?;
        p.finish_node();
    }
    p.exit_nesting();
    p.pop_context();
    Ok(())
}

fn relation<P: GrammarParser>(p: &mut P) -> PResult {
    let cp = p.checkpoint();
    shift_expr(p)?;
    if p.at_any(RELATIONAL_OPS) {
        p.start_node_at(cp, SyntaxKind::BINARY_EXPR);
        p.bump();
        shift_expr(p)?;
        p.finish_node();
    }
    Ok(())
}

fn shift_expr<P: GrammarParser>(p: &mut P) -> PResult {
    let cp = p.checkpoint();
    simple_expr(p)?;
    if p.at_any(SHIFT_OPS) {
        p.start_node_at(cp, SyntaxKind::BINARY_EXPR);
        p.bump();
        simple_expr(p)?;
        p.finish_node();
    }
    Ok(())
}

fn simple_expr<P: GrammarParser>(p: &mut P) -> PResult {
    let cp = p.checkpoint();
    if p.at_any(&[SyntaxKind::PLUS, SyntaxKind::MINUS]) {
        p.start_node(SyntaxKind::UNARY_EXPR);
        p.bump();
        term(p)?;
        p.finish_node();
    } else {
        term(p)?;
    }
    while p.at_any(ADDING_OPS) {
        p.start_node_at(cp, SyntaxKind::BINARY_EXPR);
        p.bump();
        term(p)?;
        p.finish_node();
    }
    Ok(())
}

fn term<P: GrammarParser>(p: &mut P) -> PResult {
    let cp = p.checkpoint();
    factor(p)?;
    while p.at_any(MULTIPLYING_OPS) {
        p.start_node_at(cp, SyntaxKind::BINARY_EXPR);
        p.bump();
        factor(p)?;
        p.finish_node();
    }
    Ok(())
}

fn factor<P: GrammarParser>(p: &mut P) -> PResult {
    if p.at_any(&[SyntaxKind::ABS_KW, SyntaxKind::NOT_KW]) || p.at_any(LOGICAL_OPS) {
        p.start_node(SyntaxKind::UNARY_EXPR);
        p.bump();
        primary(p)?;
        p.finish_node();
        return Ok(());
    }
    let cp = p.checkpoint();
    primary(p)?;
    if p.at(SyntaxKind::STAR_STAR) {
        p.start_node_at(cp, SyntaxKind::BINARY_EXPR);
        p.bump();
        primary(p)?;
        p.finish_node();
    }
    Ok(())
}

fn primary<P: GrammarParser>(p: &mut P) -> PResult {
    match p.current_kind() {
        SyntaxKind::INTEGER | SyntaxKind::REAL | SyntaxKind::BASED_LITERAL => {
            let cp = p.checkpoint();
            literal(p);
            if p.current_kind().is_ident() {
                // 10 ns
                p.start_node_at(cp, SyntaxKind::PHYSICAL_LITERAL);
                p.bump();
                p.finish_node();
            }
            Ok(())
        }
        SyntaxKind::STRING if p.nth(1) == SyntaxKind::L_PAREN => name(p),
        SyntaxKind::STRING
        | SyntaxKind::BIT_STRING
        | SyntaxKind::CHAR_LITERAL
        | SyntaxKind::NULL_KW
        | SyntaxKind::OPEN_KW => {
            literal(p);
            Ok(())
        }
        SyntaxKind::L_PAREN => paren_or_aggregate(p),
        kind if kind.is_ident() => name(p),
        SyntaxKind::NEW_KW => Err(p.error(ErrorCode::E0401, "allocators are not supported")),
        _ if p.at_eof() => Err(p.expected("expression")),
        _ => {
            let found = p.current_kind().display_name();
            Err(p.error(ErrorCode::E0403, format!("expected expression, found {found}")))
        }
    }
}

fn literal<P: GrammarParser>(p: &mut P) {
    p.start_node(SyntaxKind::LITERAL);
    p.bump();
    p.finish_node();
}

/// Name = (Ident | OperatorSymbol) NameSuffix*
/// NameSuffix = '.' Suffix | ArgList | "'" Aggregate | "'" AttributeDesignator
pub fn name<P: GrammarParser>(p: &mut P) -> PResult {
    let cp = p.checkpoint();
    if p.current_kind().is_ident() || p.at(SyntaxKind::STRING) {
        p.start_node(SyntaxKind::NAME_REF);
        p.bump();
        p.finish_node();
    } else {
        let found = p.current_kind().display_name();
        return Err(p.error(ErrorCode::E0301, format!("expected name, found {found}")));
    }
    name_suffixes(p, cp)
}

fn name_suffixes<P: GrammarParser>(p: &mut P, cp: Checkpoint) -> PResult {
    loop {
        match p.current_kind() {
            SyntaxKind::DOT => {
                p.start_node_at(cp, SyntaxKind::SELECTED_NAME);
                p.bump();
                let suffix = p.current_kind();
                if suffix.is_ident()
                    || matches!(
                        suffix,
                        SyntaxKind::ALL_KW | SyntaxKind::CHAR_LITERAL | SyntaxKind::STRING
                    )
                {
                    p.bump();
                } else {
                    return Err(p.expected("identifier or 'all'"));
                }
                p.finish_node();
            }
            SyntaxKind::L_PAREN => {
                p.start_node_at(cp, SyntaxKind::CALL_EXPR);
                arg_list(p)?;
                p.finish_node();
            }
            SyntaxKind::TICK if p.nth(1) == SyntaxKind::L_PAREN => {
                p.start_node_at(cp, SyntaxKind::QUALIFIED_EXPR);
                p.bump();
                paren_or_aggregate(p)?;
                p.finish_node();
            }
            SyntaxKind::TICK => {
                p.start_node_at(cp, SyntaxKind::ATTRIBUTE_NAME);
                p.bump();
                let designator = p.current_kind();
                if designator.is_ident()
                    || matches!(designator, SyntaxKind::RANGE_KW | SyntaxKind::SUBTYPE_KW)
                {
                    p.bump();
                } else {
                    return Err(p.expected("attribute name"));
                }
                p.finish_node();
            }
            _ => return Ok(()),
        }
    }
}

/// ArgList = '(' Element (',' Element)* ')'
pub(crate) fn arg_list<P: GrammarParser>(p: &mut P) -> PResult {
    p.push_context(ParseContext::AssociationList);
    p.start_node(SyntaxKind::ARG_LIST);
    let opened = p.current_range();
    p.bump(); // (
    loop {
        element(p)?;
        if !p.eat(SyntaxKind::COMMA) {
            break;
        }
    }
    close_paren(p, opened)?;
    p.finish_node();
    p.pop_context();
    Ok(())
}

fn close_paren<P: GrammarParser>(p: &mut P, opened: TextRange) -> PResult {
    if p.eat(SyntaxKind::R_PAREN) {
        return Ok(());
    }
    let found = p.current_kind().display_name();
    let code = if p.at_eof() {
        ErrorCode::E0206
    } else {
        ErrorCode::E0202
    };
    Err(p
        .error(code, format!("expected ')', found {found}"))
        .with_related(RelatedInfo::new("'(' opened here", opened)))
}

/// Element = (Choice ('|' Choice)* '=>')? Expression
fn element<P: GrammarParser>(p: &mut P) -> PResult {
    let cp = p.checkpoint();
    let others = choice(p)?;
    if p.at_any(&[SyntaxKind::BAR, SyntaxKind::FAT_ARROW]) {
        named_element_tail(p, cp)
    } else if others {
        Err(p
            .error(ErrorCode::E0404, "'others' must be followed by '=>'")
            .with_hint("write 'others => value'"))
    } else {
        p.start_node_at(cp, SyntaxKind::ELEMENT);
        p.finish_node();
        Ok(())
    }
}

fn named_element_tail<P: GrammarParser>(p: &mut P, cp: Checkpoint) -> PResult {
    p.start_node_at(cp, SyntaxKind::CHOICES);
    while p.eat(SyntaxKind::BAR) {
        choice(p)?;
    }
    p.finish_node();
    p.start_node_at(cp, SyntaxKind::ELEMENT);
    p.expect(SyntaxKind::FAT_ARROW)?;
    expression(p)?;
    p.finish_node();
    Ok(())
}

/// Choice = 'others' | DiscreteRange; returns whether it was `others`
fn choice<P: GrammarParser>(p: &mut P) -> PResult<bool> {
    if p.at(SyntaxKind::OTHERS_KW) {
        literal(p);
        Ok(true)
    } else {
        discrete_range(p)?;
        Ok(false)
    }
}

/// Choices = Choice ('|' Choice)*, used by case alternatives and selected
/// waveforms
pub(crate) fn choices<P: GrammarParser>(p: &mut P) -> PResult {
    p.start_node(SyntaxKind::CHOICES);
    loop {
        choice(p)?;
        if !p.eat(SyntaxKind::BAR) {
            break;
        }
    }
    p.finish_node();
    Ok(())
}

/// '(' Expression ')' or an aggregate
fn paren_or_aggregate<P: GrammarParser>(p: &mut P) -> PResult {
    let cp = p.checkpoint();
    let opened = p.current_range();
    p.bump(); // (
    let first = p.checkpoint();
    let others = choice(p)?;
    if p.at_any(&[SyntaxKind::BAR, SyntaxKind::FAT_ARROW]) {
        named_element_tail(p, first)?;
    } else if others {
        return Err(p
            .error(ErrorCode::E0404, "'others' must be followed by '=>'")
            .with_hint("write 'others => value'"));
    } else if p.at(SyntaxKind::R_PAREN) {
        p.bump();
        p.start_node_at(cp, SyntaxKind::PAREN_EXPR);
        p.finish_node();
        return Ok(());
    } else {
        p.start_node_at(first, SyntaxKind::ELEMENT);
        p.finish_node();
    }
    while p.eat(SyntaxKind::COMMA) {
        element(p)?;
    }
    close_paren(p, opened)?;
    p.start_node_at(cp, SyntaxKind::AGGREGATE);
    p.finish_node();
    Ok(())
}

/// DiscreteRange = Expression (('to' | 'downto') Expression)?
///               | Name 'range' (Range | '<>')
pub fn discrete_range<P: GrammarParser>(p: &mut P) -> PResult {
    let cp = p.checkpoint();
    expression(p)?;
    if p.at_any(&[SyntaxKind::TO_KW, SyntaxKind::DOWNTO_KW]) {
        p.start_node_at(cp, SyntaxKind::RANGE_EXPR);
        p.bump();
        expression(p)?;
        p.finish_node();
    } else if p.at(SyntaxKind::RANGE_KW) {
        p.start_node_at(cp, SyntaxKind::CONSTRAINED_TYPE);
        p.bump();
        if !p.eat(SyntaxKind::BOX) {
            discrete_range(p)?;
        }
        p.finish_node();
    }
    Ok(())
}

/// Target of an assignment: a name or an aggregate
pub(crate) fn target<P: GrammarParser>(p: &mut P) -> PResult {
    if p.at(SyntaxKind::L_PAREN) {
        paren_or_aggregate(p)
    } else {
        name(p)
    }
}
