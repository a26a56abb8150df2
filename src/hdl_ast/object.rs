//! Declarations and design units

use super::{HdlExpr, HdlName, HdlPosition, HdlStm};

/// `library ieee;`
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct HdlLibrary {
    pub name: HdlName,
    pub position: HdlPosition,
}

/// `use ieee.std_logic_1164.all;`
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct HdlUse {
    pub path: Vec<HdlName>,
    /// Set by a trailing `.all`, which is not part of `path`
    pub wildcard: bool,
    pub position: HdlPosition,
}

/// VHDL package (`declaration_only`) or package body
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct HdlNamespace {
    pub name: HdlName,
    pub declaration_only: bool,
    pub body: Vec<HdlObject>,
    pub doc: Option<String>,
    pub position: HdlPosition,
}

/// Interface of a design unit: VHDL entity or component, Verilog module header
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct HdlModuleDec {
    pub name: HdlName,
    pub params: Vec<HdlIdDef>,
    pub ports: Vec<HdlIdDef>,
    pub objs: Vec<HdlObject>,
    pub doc: Option<String>,
    pub position: HdlPosition,
}

/// Implementation of a design unit.
///
/// A VHDL architecture has a `name` and refers to its entity through
/// `module_name`; a Verilog module has no separate name and carries its
/// header in `dec`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct HdlModuleDef {
    pub name: Option<HdlName>,
    pub module_name: HdlName,
    pub dec: Option<HdlModuleDec>,
    pub objs: Vec<HdlObject>,
    pub doc: Option<String>,
    pub position: HdlPosition,
}

/// Object class of an [`HdlIdDef`]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub enum HdlIdKind {
    Signal,
    Variable,
    SharedVariable,
    Constant,
    Alias,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub enum HdlDirection {
    /// Not a port
    Internal,
    In,
    Out,
    Inout,
    Buffer,
    Linkage,
    /// Non-ANSI Verilog port whose direction was never declared
    Unknown,
}

/// A named object: signal, variable, constant, alias, port, generic, net,
/// reg or parameter
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct HdlIdDef {
    pub name: HdlName,
    pub kind: HdlIdKind,
    /// `None` for untyped Verilog parameters and aliases without a subtype
    pub type_: Option<HdlExpr>,
    pub value: Option<HdlExpr>,
    pub direction: HdlDirection,
    pub position: HdlPosition,
}

impl HdlIdDef {
    pub fn new(name: HdlName, kind: HdlIdKind, type_: Option<HdlExpr>) -> Self {
        Self {
            name,
            kind,
            type_,
            value: None,
            direction: HdlDirection::Internal,
            position: HdlPosition::default(),
        }
    }
}

/// One record field
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct HdlRecordField {
    pub name: HdlName,
    pub type_: HdlExpr,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub enum HdlTypeSpec {
    /// Identifiers and character literals
    Enum(Vec<HdlExpr>),
    Range(HdlExpr),
    Physical {
        range: HdlExpr,
        base_unit: HdlName,
        units: Vec<(HdlName, HdlExpr)>,
    },
    Array {
        indexes: Vec<HdlExpr>,
        element: HdlExpr,
    },
    Record(Vec<HdlRecordField>),
    Access(HdlExpr),
    File(HdlExpr),
    Subtype(HdlExpr),
    /// `type node;`
    Incomplete,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct HdlTypeDef {
    pub name: HdlName,
    pub is_subtype: bool,
    pub spec: HdlTypeSpec,
    pub doc: Option<String>,
    pub position: HdlPosition,
}

/// Function, procedure or task
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct HdlFunctionDef {
    pub name: HdlName,
    pub is_procedure: bool,
    /// Designator is an operator symbol such as `"+"`
    pub is_operator: bool,
    pub is_pure: bool,
    pub params: Vec<HdlIdDef>,
    pub return_type: Option<HdlExpr>,
    /// Declaration without a body
    pub is_declaration_only: bool,
    pub objs: Vec<HdlObject>,
    pub body: Vec<HdlStm>,
    pub doc: Option<String>,
    pub position: HdlPosition,
}

/// Component, entity, module or gate instance
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct HdlCompInst {
    /// Instance label; unnamed gate instances have none
    pub name: Option<HdlName>,
    pub module_name: HdlExpr,
    pub param_map: Vec<HdlExpr>,
    pub port_map: Vec<HdlExpr>,
    pub position: HdlPosition,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub enum HdlAttributeKind {
    Declaration {
        type_: HdlExpr,
    },
    Specification {
        /// Names, `Others` or `All`
        targets: Vec<HdlExpr>,
        entity_class: HdlName,
        value: HdlExpr,
    },
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct HdlAttribute {
    pub name: HdlName,
    pub kind: HdlAttributeKind,
    pub position: HdlPosition,
}

/// Members of files and declarative regions
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub enum HdlObject {
    Library(HdlLibrary),
    Use(HdlUse),
    Namespace(HdlNamespace),
    ModuleDec(HdlModuleDec),
    ModuleDef(HdlModuleDef),
    IdDef(HdlIdDef),
    TypeDef(HdlTypeDef),
    FunctionDef(HdlFunctionDef),
    CompInst(HdlCompInst),
    Attribute(HdlAttribute),
    Stm(HdlStm),
}

impl HdlObject {
    /// Declared name, if the object declares one
    pub fn name(&self) -> Option<&HdlName> {
        match self {
            Self::Library(lib) => Some(&lib.name),
            Self::Use(_) => None,
            Self::Namespace(ns) => Some(&ns.name),
            Self::ModuleDec(dec) => Some(&dec.name),
            Self::ModuleDef(def) => def.name.as_ref().or(Some(&def.module_name)),
            Self::IdDef(id) => Some(&id.name),
            Self::TypeDef(ty) => Some(&ty.name),
            Self::FunctionDef(func) => Some(&func.name),
            Self::CompInst(inst) => inst.name.as_ref(),
            Self::Attribute(attr) => Some(&attr.name),
            Self::Stm(stm) => stm.label(),
        }
    }

    /// Collected doc comment
    pub fn doc(&self) -> Option<&str> {
        match self {
            Self::Namespace(ns) => ns.doc.as_deref(),
            Self::ModuleDec(dec) => dec.doc.as_deref(),
            Self::ModuleDef(def) => def.doc.as_deref(),
            Self::TypeDef(ty) => ty.doc.as_deref(),
            Self::FunctionDef(func) => func.doc.as_deref(),
            _ => None,
        }
    }

    pub fn position(&self) -> Option<HdlPosition> {
        match self {
            Self::Library(lib) => Some(lib.position),
            Self::Use(u) => Some(u.position),
            Self::Namespace(ns) => Some(ns.position),
            Self::ModuleDec(dec) => Some(dec.position),
            Self::ModuleDef(def) => Some(def.position),
            Self::IdDef(id) => Some(id.position),
            Self::TypeDef(ty) => Some(ty.position),
            Self::FunctionDef(func) => Some(func.position),
            Self::CompInst(inst) => Some(inst.position),
            Self::Attribute(attr) => Some(attr.position),
            Self::Stm(_) => None,
        }
    }
}
