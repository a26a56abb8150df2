//! Language-agnostic HDL syntax tree.
//!
//! Every dialect builds into this one closed set of types, so a consumer
//! written against it works for VHDL and Verilog alike.
//!
//! ```text
//! ParseResult
//! └── objs: Vec<HdlObject>   (source order)
//!     ├── Library / Use
//!     ├── Namespace          (package, package body)
//!     ├── ModuleDec          (entity, component, module header)
//!     ├── ModuleDef          (architecture, module)
//!     └── ...                (IdDef, TypeDef, FunctionDef, CompInst, Stm)
//! ```
//!
//! Structural equality ignores source positions.

mod expr;
mod name;
mod object;
mod stm;

pub use expr::{HdlExpr, HdlOp, HdlOpType, HdlValueInt};
pub use name::{HdlName, HdlPosition};
pub use object::{
    HdlAttribute, HdlAttributeKind, HdlCompInst, HdlDirection, HdlFunctionDef, HdlIdDef,
    HdlIdKind, HdlLibrary, HdlModuleDec, HdlModuleDef, HdlNamespace, HdlObject, HdlRecordField,
    HdlTypeDef, HdlTypeSpec, HdlUse,
};
pub use stm::{HdlCaseAlt, HdlCaseKind, HdlGenerateScheme, HdlProcessKind, HdlStm};

use crate::language::Language;

/// Everything parsed from one source unit
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct ParseResult {
    pub language: Language,
    pub objs: Vec<HdlObject>,
}

impl ParseResult {
    pub fn new(language: Language) -> Self {
        Self {
            language,
            objs: Vec::new(),
        }
    }

    /// First top-level object with the given name
    pub fn find(&self, name: &str) -> Option<&HdlObject> {
        self.objs
            .iter()
            .find(|obj| obj.name().is_some_and(|n| *n == *name))
    }
}

#[cfg(test)]
mod tests;
