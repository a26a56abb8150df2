//! Expressions shared by every dialect

use smol_str::SmolStr;

use super::HdlName;

/// An integer literal.
///
/// `value` holds the digits in `base` with separators removed and lowercased
/// (`"ff"` for `16#FF#`, `"01zx"` for `b"01ZX"`), so literals with `x`/`z`
/// digits stay representable. `bits` is the declared width of sized literals
/// (`8'hFF`, `x"FF"`).
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct HdlValueInt {
    pub value: SmolStr,
    pub base: u32,
    pub bits: Option<u32>,
}

impl HdlValueInt {
    pub fn decimal(value: u64) -> Self {
        Self {
            value: SmolStr::new(value.to_string()),
            base: 10,
            bits: None,
        }
    }

    /// Numeric value, if every digit is valid in the base and it fits
    pub fn as_u128(&self) -> Option<u128> {
        u128::from_str_radix(&self.value, self.base).ok()
    }
}

/// Operator of an [`HdlOp`]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub enum HdlOpType {
    // unary
    Neg,
    Plus,
    Not,
    BitNot,
    Abs,
    AndReduce,
    OrReduce,
    XorReduce,
    NandReduce,
    NorReduce,
    XnorReduce,

    // arithmetic
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Rem,
    Pow,
    Concat,
    ReplConcat,

    // logical and bitwise
    And,
    Or,
    Xor,
    Nand,
    Nor,
    Xnor,
    LogAnd,
    LogOr,

    // relational
    Eq,
    Neq,
    CaseEq,
    CaseNeq,
    Lt,
    Le,
    Gt,
    Ge,

    // shifts and rotations
    Sll,
    Srl,
    Sla,
    Sra,
    Rol,
    Ror,

    // structural
    Ternary,
    Downto,
    To,
    Range,
    Index,
    Call,
    Dot,
    Apostrophe,
    MapAssociation,
    Rising,
    Falling,
    PartSelectPost,
    PartSelectPre,
    Resolved,
    Waveform,
    After,
}

impl HdlOpType {
    pub fn is_unary(self) -> bool {
        matches!(
            self,
            Self::Neg
                | Self::Plus
                | Self::Not
                | Self::BitNot
                | Self::Abs
                | Self::AndReduce
                | Self::OrReduce
                | Self::XorReduce
                | Self::NandReduce
                | Self::NorReduce
                | Self::XnorReduce
        )
    }

    /// Operators written infix between two operands
    pub fn is_infix(self) -> bool {
        matches!(
            self,
            Self::Add
                | Self::Sub
                | Self::Mul
                | Self::Div
                | Self::Mod
                | Self::Rem
                | Self::Pow
                | Self::Concat
                | Self::And
                | Self::Or
                | Self::Xor
                | Self::Nand
                | Self::Nor
                | Self::Xnor
                | Self::LogAnd
                | Self::LogOr
                | Self::Eq
                | Self::Neq
                | Self::CaseEq
                | Self::CaseNeq
                | Self::Lt
                | Self::Le
                | Self::Gt
                | Self::Ge
                | Self::Sll
                | Self::Srl
                | Self::Sla
                | Self::Sra
                | Self::Rol
                | Self::Ror
        )
    }
}

/// An operator applied to its operands
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct HdlOp {
    pub fn_: HdlOpType,
    pub ops: Vec<HdlExpr>,
}

/// Any expression, type mark or range
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub enum HdlExpr {
    Id(HdlName),
    Int(HdlValueInt),
    /// Real literal, kept as written
    Float(SmolStr),
    /// String literal contents without the quotes
    Str(SmolStr),
    Char(char),
    /// `10 ns`
    Physical {
        value: Box<HdlExpr>,
        unit: HdlName,
    },
    /// Verilog vector type: `wire signed [7:0]`
    TypeBits {
        range: Option<Box<HdlExpr>>,
        signed: bool,
    },
    Aggregate(Vec<HdlExpr>),
    Op(HdlOp),
    Others,
    Open,
    All,
    Null,
    /// `<>`
    Unbounded,
}

impl HdlExpr {
    pub fn id(name: HdlName) -> Self {
        Self::Id(name)
    }

    pub fn op(fn_: HdlOpType, ops: Vec<HdlExpr>) -> Self {
        Self::Op(HdlOp { fn_, ops })
    }

    pub fn unary(fn_: HdlOpType, operand: HdlExpr) -> Self {
        Self::op(fn_, vec![operand])
    }

    pub fn binary(fn_: HdlOpType, lhs: HdlExpr, rhs: HdlExpr) -> Self {
        Self::op(fn_, vec![lhs, rhs])
    }

    pub fn as_id(&self) -> Option<&HdlName> {
        match self {
            Self::Id(name) => Some(name),
            _ => None,
        }
    }

    pub fn as_op(&self) -> Option<&HdlOp> {
        match self {
            Self::Op(op) => Some(op),
            _ => None,
        }
    }

    /// Operator type when this is an operator application
    pub fn op_type(&self) -> Option<HdlOpType> {
        self.as_op().map(|op| op.fn_)
    }
}
