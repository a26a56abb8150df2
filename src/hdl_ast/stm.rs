//! Statements

use super::{HdlExpr, HdlName, HdlObject};

/// `process`/`always` versus `initial`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub enum HdlProcessKind {
    Process,
    Initial,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub enum HdlCaseKind {
    Case,
    Casex,
    Casez,
    /// VHDL selected signal assignment
    Select,
}

/// One `when`/`case` alternative
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct HdlCaseAlt {
    pub choices: Vec<HdlExpr>,
    pub body: Vec<HdlStm>,
}

/// How a generate statement repeats or selects its body
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub enum HdlGenerateScheme {
    ForIn {
        var: HdlName,
        range: HdlExpr,
    },
    For {
        init: Box<HdlStm>,
        cond: HdlExpr,
        step: Box<HdlStm>,
    },
    If {
        cond: HdlExpr,
    },
}

/// Concurrent and sequential statements
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub enum HdlStm {
    Assign {
        dst: HdlExpr,
        src: HdlExpr,
        is_blocking: bool,
        time_delay: Option<HdlExpr>,
        label: Option<HdlName>,
    },
    Process {
        label: Option<HdlName>,
        kind: HdlProcessKind,
        /// `None` when the process has no sensitivity list
        sensitivity: Option<Vec<HdlExpr>>,
        objs: Vec<HdlObject>,
        body: Vec<HdlStm>,
    },
    If {
        label: Option<HdlName>,
        cond: HdlExpr,
        if_true: Vec<HdlStm>,
        elifs: Vec<(HdlExpr, Vec<HdlStm>)>,
        if_false: Option<Vec<HdlStm>>,
    },
    Case {
        label: Option<HdlName>,
        kind: HdlCaseKind,
        switch_on: HdlExpr,
        cases: Vec<HdlCaseAlt>,
        default: Option<Vec<HdlStm>>,
    },
    ForIn {
        label: Option<HdlName>,
        var: HdlName,
        range: HdlExpr,
        body: Vec<HdlStm>,
    },
    For {
        label: Option<HdlName>,
        init: Box<HdlStm>,
        cond: HdlExpr,
        step: Box<HdlStm>,
        body: Vec<HdlStm>,
    },
    /// `cond == None` loops forever
    While {
        label: Option<HdlName>,
        cond: Option<HdlExpr>,
        body: Vec<HdlStm>,
    },
    Repeat {
        count: HdlExpr,
        body: Vec<HdlStm>,
    },
    Wait {
        sensitivity: Vec<HdlExpr>,
        condition: Option<HdlExpr>,
        timeout: Option<HdlExpr>,
    },
    Return(Option<HdlExpr>),
    /// VHDL `exit`, Verilog `disable`
    Break {
        label: Option<HdlName>,
        cond: Option<HdlExpr>,
    },
    /// VHDL `next`
    Continue {
        label: Option<HdlName>,
        cond: Option<HdlExpr>,
    },
    Nop,
    Assert {
        cond: HdlExpr,
        report: Option<HdlExpr>,
        severity: Option<HdlExpr>,
    },
    Report {
        report: HdlExpr,
        severity: Option<HdlExpr>,
    },
    Call(HdlExpr),
    Block {
        label: Option<HdlName>,
        objs: Vec<HdlObject>,
        body: Vec<HdlStm>,
    },
    Generate {
        label: Option<HdlName>,
        scheme: HdlGenerateScheme,
        objs: Vec<HdlObject>,
        else_objs: Vec<HdlObject>,
    },
}

impl HdlStm {
    pub fn label(&self) -> Option<&HdlName> {
        match self {
            Self::Assign { label, .. }
            | Self::Process { label, .. }
            | Self::If { label, .. }
            | Self::Case { label, .. }
            | Self::ForIn { label, .. }
            | Self::For { label, .. }
            | Self::While { label, .. }
            | Self::Block { label, .. }
            | Self::Generate { label, .. } => label.as_ref(),
            _ => None,
        }
    }
}
