//! Canonical VHDL text for HDL trees.
//!
//! Output is VHDL-2008 with upper-case keywords, four-space indentation
//! and every nested operator parenthesised. Identifiers keep their source
//! spelling and doc comments come back as `--` lines. Serialization is
//! total: Verilog trees print too, using the nearest VHDL construct.
//!
//! For a tree built from VHDL, parsing the output again yields an equal
//! tree (positions aside).
//!
//! ```ignore
//! let result = hdlconv::parse(source, Language::Vhdl)?;
//! let text = hdlconv::serialize(&result);
//! ```

mod expr;
mod printer;
mod vhdl;

use crate::hdl_ast::{HdlExpr, HdlObject, HdlStm, ParseResult};
use printer::Printer;

/// Anything that has a canonical VHDL rendering
pub trait ToHdlText {
    fn to_hdl_text(&self) -> String;
}

impl ToHdlText for ParseResult {
    fn to_hdl_text(&self) -> String {
        let mut printer = Printer::new();
        printer.design_file(&self.objs);
        printer.finish()
    }
}

impl ToHdlText for HdlObject {
    fn to_hdl_text(&self) -> String {
        let mut printer = Printer::new();
        printer.design_unit(self);
        printer.finish()
    }
}

/// Statements print in sequential form unless they only exist
/// concurrently (processes, generates).
impl ToHdlText for HdlStm {
    fn to_hdl_text(&self) -> String {
        let mut printer = Printer::new();
        printer.sequential(self);
        printer.finish()
    }
}

/// A bare expression, without a trailing newline
impl ToHdlText for HdlExpr {
    fn to_hdl_text(&self) -> String {
        expr::expr(self)
    }
}

pub fn serialize<T: ToHdlText + ?Sized>(node: &T) -> String {
    node.to_hdl_text()
}

/// The tree as pretty-printed JSON
#[cfg(feature = "json")]
pub fn to_json(result: &ParseResult) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(result)
}

#[cfg(test)]
mod tests;
