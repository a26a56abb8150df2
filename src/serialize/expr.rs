//! Expressions as VHDL text.
//!
//! Every operand that is itself an operator application is parenthesised,
//! so the text never depends on operator precedence.

use crate::builder::literal::digit_width;
use crate::hdl_ast::{HdlExpr, HdlOp, HdlOpType, HdlValueInt};

pub(crate) fn expr(e: &HdlExpr) -> String {
    match e {
        HdlExpr::Id(name) => name.to_string(),
        HdlExpr::Int(value) => int_literal(value),
        HdlExpr::Float(text) => text.to_string(),
        HdlExpr::Str(text) => format!("\"{}\"", text.replace('"', "\"\"")),
        HdlExpr::Char(ch) => format!("'{ch}'"),
        HdlExpr::Physical { value, unit } => format!("{} {unit}", expr(value)),
        HdlExpr::TypeBits { range, signed } => type_bits(range.as_deref(), *signed),
        HdlExpr::Aggregate(items) => format!("({})", list(items)),
        HdlExpr::Op(op) => operation(op),
        HdlExpr::Others => "OTHERS".to_string(),
        HdlExpr::Open => "OPEN".to_string(),
        HdlExpr::All => "ALL".to_string(),
        HdlExpr::Null => "NULL".to_string(),
        HdlExpr::Unbounded => "<>".to_string(),
    }
}

/// Comma separated
pub(crate) fn list(items: &[HdlExpr]) -> String {
    items.iter().map(expr).collect::<Vec<_>>().join(", ")
}

/// `|` separated case choices
pub(crate) fn choices(items: &[HdlExpr]) -> String {
    items.iter().map(expr).collect::<Vec<_>>().join(" | ")
}

/// Decimal digits stay bare, other unsized bases use based notation and
/// sized literals become bit strings. A bit string only carries its width
/// when that differs from the digit count.
pub(crate) fn int_literal(value: &HdlValueInt) -> String {
    let digits = value.value.to_ascii_uppercase();
    match (value.bits, digit_width(value.base)) {
        (Some(bits), Some(width)) => {
            let letter = match value.base {
                2 => 'B',
                8 => 'O',
                _ => 'X',
            };
            if bits as usize == width as usize * value.value.len() {
                format!("{letter}\"{digits}\"")
            } else {
                format!("{bits}{letter}\"{digits}\"")
            }
        }
        (Some(bits), None) => format!("{bits}D\"{digits}\""),
        (None, _) if value.base == 10 => digits,
        (None, _) => format!("{}#{digits}#", value.base),
    }
}

fn type_bits(range: Option<&HdlExpr>, signed: bool) -> String {
    match (range, signed) {
        (None, false) => "std_logic".to_string(),
        (None, true) => "signed".to_string(),
        (Some(range), false) => format!("std_logic_vector({})", expr(range)),
        (Some(range), true) => format!("signed({})", expr(range)),
    }
}

/// Operand position: wrap anything that is not a primary
fn operand(e: &HdlExpr) -> String {
    match e.op_type() {
        Some(op) if needs_parens(op) => format!("({})", expr(e)),
        _ => expr(e),
    }
}

fn needs_parens(op: HdlOpType) -> bool {
    op.is_unary()
        || op.is_infix()
        || matches!(
            op,
            HdlOpType::Ternary
                | HdlOpType::Downto
                | HdlOpType::To
                | HdlOpType::Range
                | HdlOpType::MapAssociation
                | HdlOpType::Waveform
                | HdlOpType::After
                | HdlOpType::Resolved
        )
}

fn unary_prefix(op: HdlOpType) -> &'static str {
    match op {
        HdlOpType::Neg => "-",
        HdlOpType::Plus => "+",
        HdlOpType::Abs => "ABS ",
        HdlOpType::AndReduce => "AND ",
        HdlOpType::OrReduce => "OR ",
        HdlOpType::XorReduce => "XOR ",
        HdlOpType::NandReduce => "NAND ",
        HdlOpType::NorReduce => "NOR ",
        HdlOpType::XnorReduce => "XNOR ",
        _ => "NOT ",
    }
}

fn infix_symbol(op: HdlOpType) -> &'static str {
    match op {
        HdlOpType::Add => "+",
        HdlOpType::Sub => "-",
        HdlOpType::Mul => "*",
        HdlOpType::Div => "/",
        HdlOpType::Mod => "MOD",
        HdlOpType::Rem => "REM",
        HdlOpType::Pow => "**",
        HdlOpType::Concat => "&",
        HdlOpType::And | HdlOpType::LogAnd => "AND",
        HdlOpType::Or | HdlOpType::LogOr => "OR",
        HdlOpType::Xor => "XOR",
        HdlOpType::Nand => "NAND",
        HdlOpType::Nor => "NOR",
        HdlOpType::Xnor => "XNOR",
        HdlOpType::Eq | HdlOpType::CaseEq => "=",
        HdlOpType::Neq | HdlOpType::CaseNeq => "/=",
        HdlOpType::Lt => "<",
        HdlOpType::Le => "<=",
        HdlOpType::Gt => ">",
        HdlOpType::Ge => ">=",
        HdlOpType::Sll => "SLL",
        HdlOpType::Srl => "SRL",
        HdlOpType::Sla => "SLA",
        HdlOpType::Sra => "SRA",
        HdlOpType::Rol => "ROL",
        _ => "ROR",
    }
}

fn operation(op: &HdlOp) -> String {
    use HdlOpType as Op;
    match (op.fn_, op.ops.as_slice()) {
        (f, [x]) if f.is_unary() => format!("{}{}", unary_prefix(f), operand(x)),
        (f, [l, r]) if f.is_infix() => {
            format!("{} {} {}", operand(l), infix_symbol(f), operand(r))
        }
        (Op::Downto, [l, r]) => format!("{} DOWNTO {}", expr(l), expr(r)),
        (Op::To, [l, r]) => format!("{} TO {}", expr(l), expr(r)),
        (Op::Range, [l, r]) => format!("{} RANGE {}", expr(l), expr(r)),
        (Op::Index, [prefix, index]) => format!("{}({})", operand(prefix), expr(index)),
        (Op::Call, [callee]) => operand(callee),
        (Op::Call, [callee, args @ ..]) => format!("{}({})", operand(callee), list(args)),
        (Op::Dot, [l, r]) => format!("{}.{}", operand(l), expr(r)),
        (Op::Apostrophe, [l, r]) => format!("{}'{}", operand(l), expr(r)),
        (Op::MapAssociation, [l, r]) => format!("{} => {}", expr(l), expr(r)),
        (Op::Rising, [x]) => format!("rising_edge({})", expr(x)),
        (Op::Falling, [x]) => format!("falling_edge({})", expr(x)),
        (Op::PartSelectPost, [base, width]) => format!(
            "{} + {} - 1 DOWNTO {}",
            operand(base),
            operand(width),
            operand(base)
        ),
        (Op::PartSelectPre, [base, width]) => format!(
            "{} DOWNTO {} - {} + 1",
            operand(base),
            operand(base),
            operand(width)
        ),
        (Op::ReplConcat, [count, value]) => {
            format!("(0 TO {} - 1 => {})", operand(count), expr(value))
        }
        (Op::Resolved, [l, r]) => format!("{} {}", expr(l), expr(r)),
        (Op::Waveform, items) => list(items),
        (Op::After, [value, delay]) => format!("{} AFTER {}", expr(value), expr(delay)),
        (Op::Ternary, [cond, if_true, if_false]) => {
            let else_text = match if_false.op_type() {
                Some(Op::Ternary) => expr(if_false),
                _ => branch(if_false),
            };
            format!("{} WHEN {} ELSE {else_text}", branch(if_true), expr(cond))
        }
        // arity no builder produces
        (f, ops) => format!("{f:?}({})", list(ops)),
    }
}

/// A conditional branch value; waveforms and delays read fine unwrapped
fn branch(e: &HdlExpr) -> String {
    match e.op_type() {
        Some(HdlOpType::Waveform | HdlOpType::After) => expr(e),
        _ => operand(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hdl_ast::HdlName;
    use rstest::rstest;

    fn id(name: &str) -> HdlExpr {
        HdlExpr::Id(HdlName::vhdl(name))
    }

    fn int(value: &str, base: u32, bits: Option<u32>) -> HdlValueInt {
        HdlValueInt {
            value: value.into(),
            base,
            bits,
        }
    }

    #[rstest]
    #[case(int("42", 10, None), "42")]
    #[case(int("ff", 16, None), "16#FF#")]
    #[case(int("ff", 16, Some(8)), "X\"FF\"")]
    #[case(int("f", 16, Some(12)), "12X\"F\"")]
    #[case(int("10z", 2, Some(3)), "B\"10Z\"")]
    #[case(int("0", 2, Some(4)), "4B\"0\"")]
    #[case(int("17", 8, Some(6)), "O\"17\"")]
    #[case(int("255", 10, Some(8)), "8D\"255\"")]
    fn test_int_literal(#[case] value: HdlValueInt, #[case] expected: &str) {
        assert_eq!(int_literal(&value), expected);
    }

    #[test]
    fn test_nested_operators_are_parenthesised() {
        let e = HdlExpr::binary(
            HdlOpType::Mul,
            HdlExpr::binary(HdlOpType::Add, id("a"), id("b")),
            HdlExpr::unary(HdlOpType::Neg, id("c")),
        );
        assert_eq!(expr(&e), "(a + b) * (-c)");
    }

    #[test]
    fn test_names_and_calls() {
        let call = HdlExpr::op(HdlOpType::Call, vec![id("f"), id("x"), id("y")]);
        assert_eq!(expr(&call), "f(x, y)");
        let index = HdlExpr::binary(
            HdlOpType::Index,
            id("v"),
            HdlExpr::binary(
                HdlOpType::Downto,
                HdlExpr::Int(HdlValueInt::decimal(7)),
                HdlExpr::Int(HdlValueInt::decimal(0)),
            ),
        );
        assert_eq!(expr(&index), "v(7 DOWNTO 0)");
        let attr = HdlExpr::binary(HdlOpType::Apostrophe, id("s"), id("length"));
        assert_eq!(expr(&attr), "s'length");
        let qualified = HdlExpr::binary(
            HdlOpType::Apostrophe,
            id("word"),
            HdlExpr::Aggregate(vec![HdlExpr::binary(
                HdlOpType::MapAssociation,
                HdlExpr::Others,
                HdlExpr::Char('0'),
            )]),
        );
        assert_eq!(expr(&qualified), "word'(OTHERS => '0')");
    }

    #[test]
    fn test_ternary_chains_stay_flat() {
        let e = HdlExpr::op(
            HdlOpType::Ternary,
            vec![
                id("c1"),
                id("a"),
                HdlExpr::op(HdlOpType::Ternary, vec![id("c2"), id("b"), id("c")]),
            ],
        );
        assert_eq!(expr(&e), "a WHEN c1 ELSE b WHEN c2 ELSE c");
    }

    #[test]
    fn test_literals() {
        assert_eq!(expr(&HdlExpr::Str("say \"hi\"".into())), "\"say \"\"hi\"\"\"");
        assert_eq!(expr(&HdlExpr::Char('1')), "'1'");
        let time = HdlExpr::Physical {
            value: Box::new(HdlExpr::Int(HdlValueInt::decimal(10))),
            unit: HdlName::vhdl("ns"),
        };
        assert_eq!(expr(&time), "10 ns");
        assert_eq!(expr(&HdlExpr::TypeBits { range: None, signed: false }), "std_logic");
    }
}
