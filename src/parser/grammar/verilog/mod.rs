//! Verilog-2005 grammar
//!
//! ```text
//! source_text → (attribute_instance* module)*
//! module      → 'module' ident param_ports? ports? ';' module_item* 'endmodule'
//! ```
//!
//! Compiler directives other than the structural no-ops are rejected by the
//! lexer; the grammar never sees macro text.

mod expressions;
mod items;
mod statements;

pub use expressions::expression;
pub use items::module_item;
pub use statements::statement;

use rowan::TextRange;

use super::GrammarParser;
use crate::parser::errors::{ErrorCode, ParseContext, RelatedInfo, SyntaxError};
use crate::parser::parser::PResult;
use crate::parser::syntax_kind::SyntaxKind;

/// SourceText = (AttributeInstance* ModuleDecl)*
pub fn source_text<P: GrammarParser>(p: &mut P) -> PResult {
    p.start_node(SyntaxKind::SOURCE_FILE);
    while !p.at_eof() {
        attribute_instances(p)?;
        match p.current_kind() {
            SyntaxKind::MODULE_KW => module_decl(p)?,
            SyntaxKind::ENDMODULE_KW => {
                return Err(SyntaxError::new(
                    "unmatched 'endmodule': no module is open",
                    p.current_range(),
                    ErrorCode::E0204,
                ));
            }
            _ => return Err(p.unexpected(ErrorCode::E0503)),
        }
    }
    p.flush_trivia();
    p.finish_node();
    Ok(())
}

/// ModuleDecl = 'module' Ident ParamPortList? PortList? ';' ModuleItem* 'endmodule'
fn module_decl<P: GrammarParser>(p: &mut P) -> PResult {
    p.push_context(ParseContext::ModuleHeader);
    p.start_node(SyntaxKind::MODULE_DECL);
    let opened = p.current_range();
    p.bump(); // module
    p.expect_ident()?;
    if p.at(SyntaxKind::HASH) {
        param_port_list(p)?;
    }
    if p.at(SyntaxKind::L_PAREN) {
        port_list(p)?;
    }
    p.expect(SyntaxKind::SEMICOLON)?;
    p.pop_context();

    p.push_context(ParseContext::ModuleItem);
    while !p.at_eof() && !p.at(SyntaxKind::ENDMODULE_KW) {
        module_item(p)?;
    }
    close_keyword(p, SyntaxKind::ENDMODULE_KW, "module", opened)?;
    p.pop_context();
    p.finish_node();
    Ok(())
}

/// ParamPortList = '#' '(' ParamDecl (',' ParamDecl)* ')'
fn param_port_list<P: GrammarParser>(p: &mut P) -> PResult {
    p.start_node(SyntaxKind::PARAM_PORT_LIST);
    p.bump(); // #
    p.expect(SyntaxKind::L_PAREN)?;
    if !p.at(SyntaxKind::R_PAREN) {
        loop {
            items::param_decl_body(p, true)?;
            if !p.eat(SyntaxKind::COMMA) {
                break;
            }
        }
    }
    p.expect(SyntaxKind::R_PAREN)?;
    p.finish_node();
    Ok(())
}

/// PortList = '(' (PortDecl (',' PortDecl)* | Ident (',' Ident)*)? ')'
///
/// The first entry decides the style: a direction keyword starts an ANSI
/// list, a bare identifier a non-ANSI one whose directions come later in the
/// module body.
pub(crate) fn port_list<P: GrammarParser>(p: &mut P) -> PResult {
    p.start_node(SyntaxKind::PORT_LIST);
    p.bump(); // (
    if p.at(SyntaxKind::R_PAREN) {
        p.bump();
        p.finish_node();
        return Ok(());
    }
    attribute_instances(p)?;
    if at_direction(p) {
        loop {
            items::port_decl_body(p)?;
            if !p.eat(SyntaxKind::COMMA) {
                break;
            }
            attribute_instances(p)?;
            if !at_direction(p) {
                return Err(p
                    .error(ErrorCode::E0303, "expected port direction")
                    .with_hint("ANSI and non-ANSI port styles cannot be mixed"));
            }
        }
    } else {
        loop {
            if !p.current_kind().is_ident() {
                let found = p.current_kind().display_name();
                return Err(p.error(
                    ErrorCode::E0303,
                    format!("expected port name, found {found}"),
                ));
            }
            p.bump();
            if !p.eat(SyntaxKind::COMMA) {
                break;
            }
        }
    }
    p.expect(SyntaxKind::R_PAREN)?;
    p.finish_node();
    Ok(())
}

pub(crate) fn at_direction<P: GrammarParser>(p: &P) -> bool {
    p.at_any(&[
        SyntaxKind::INPUT_KW,
        SyntaxKind::OUTPUT_KW,
        SyntaxKind::INOUT_KW,
    ])
}

/// AttributeInstance = '(*' AttrSpec (',' AttrSpec)* '*)'
///
/// Kept in the tree, dropped by the AST builder.
pub(crate) fn attribute_instances<P: GrammarParser>(p: &mut P) -> PResult {
    while p.at(SyntaxKind::L_PAREN) && p.nth(1) == SyntaxKind::STAR {
        p.start_node(SyntaxKind::ATTRIBUTE_INSTANCE);
        let opened = p.current_range();
        p.bump();
        p.bump();
        while !(p.at(SyntaxKind::STAR) && p.nth(1) == SyntaxKind::R_PAREN) {
            if p.at_eof() {
                return Err(p
                    .error(ErrorCode::E0206, "unterminated attribute instance")
                    .with_related(RelatedInfo::new("'(*' opened here", opened)));
            }
            p.bump();
        }
        p.bump();
        p.bump();
        p.finish_node();
    }
    Ok(())
}

/// Consume a closing keyword such as `endmodule`, reporting the opener when
/// the input ends first.
pub(crate) fn close_keyword<P: GrammarParser>(
    p: &mut P,
    closer: SyntaxKind,
    what: &str,
    opened: TextRange,
) -> PResult {
    if p.eat(closer) {
        return Ok(());
    }
    let err = if p.at_eof() {
        p.error(
            ErrorCode::E0207,
            format!("missing {} for {what}", closer.display_name()),
        )
    } else {
        p.expected(&closer.display_name())
    };
    Err(err.with_related(RelatedInfo::new(format!("{what} opened here"), opened)))
}
