//! VHDL-2008 grammar
//!
//! ```text
//! design_file   → (library_clause | use_clause | design_unit)*
//! design_unit   → entity | architecture | package | package body
//! ```
//!
//! Ambiguities resolved syntactically:
//! - `name(...)` is recorded as a call node; index, slice, function call and
//!   type conversion are not told apart here.
//! - `label: name;` in a concurrent region is a component instantiation.
//! - A numeric literal followed by an identifier is a physical literal.

mod declarations;
mod expressions;
mod statements;

pub use declarations::{declarative_part, interface_list, subtype_indication};
pub use expressions::{discrete_range, expression, name};
pub use statements::{concurrent_statements, sequential_statements};

use rowan::TextRange;

use super::GrammarParser;
use crate::parser::errors::{ErrorCode, ParseContext, RelatedInfo, SyntaxError};
use crate::parser::parser::PResult;
use crate::parser::syntax_kind::SyntaxKind;

/// DesignFile = (ContextItem | DesignUnit)*
pub fn design_file<P: GrammarParser>(p: &mut P) -> PResult {
    p.start_node(SyntaxKind::SOURCE_FILE);
    while !p.at_eof() {
        design_item(p)?;
    }
    p.flush_trivia();
    p.finish_node();
    Ok(())
}

fn design_item<P: GrammarParser>(p: &mut P) -> PResult {
    match p.current_kind() {
        SyntaxKind::LIBRARY_KW => library_clause(p),
        SyntaxKind::USE_KW => use_clause(p),
        SyntaxKind::ENTITY_KW => entity_decl(p),
        SyntaxKind::ARCHITECTURE_KW => architecture_body(p),
        SyntaxKind::PACKAGE_KW if p.nth(1) == SyntaxKind::BODY_KW => package_body(p),
        SyntaxKind::PACKAGE_KW => package_decl(p),
        SyntaxKind::CONFIGURATION_KW | SyntaxKind::CONTEXT_KW => {
            let what = p.current_kind().display_name();
            Err(p.error(
                ErrorCode::E0503,
                format!("{what} declarations are not supported"),
            ))
        }
        SyntaxKind::END_KW => Err(unmatched_end(p)),
        _ => Err(p.unexpected(ErrorCode::E0901)),
    }
}

/// LibraryClause = 'library' Ident (',' Ident)* ';'
fn library_clause<P: GrammarParser>(p: &mut P) -> PResult {
    p.push_context(ParseContext::ContextClause);
    p.start_node(SyntaxKind::LIBRARY_CLAUSE);
    p.bump(); // library
    loop {
        if !p.current_kind().is_ident() {
            return Err(p.error(ErrorCode::E0501, "expected library name"));
        }
        p.bump();
        if !p.eat(SyntaxKind::COMMA) {
            break;
        }
    }
    p.expect(SyntaxKind::SEMICOLON)?;
    p.finish_node();
    p.pop_context();
    Ok(())
}

/// UseClause = 'use' SelectedName (',' SelectedName)* ';'
pub fn use_clause<P: GrammarParser>(p: &mut P) -> PResult {
    p.push_context(ParseContext::ContextClause);
    p.start_node(SyntaxKind::USE_CLAUSE);
    p.bump(); // use
    loop {
        if !p.current_kind().is_ident() {
            return Err(p.error(ErrorCode::E0502, "expected selected name"));
        }
        if p.nth(1) != SyntaxKind::DOT {
            return Err(p
                .error(ErrorCode::E0502, "use clause requires a selected name")
                .with_hint("write 'use library_name.package_name.all;'"));
        }
        name(p)?;
        if !p.eat(SyntaxKind::COMMA) {
            break;
        }
    }
    p.expect(SyntaxKind::SEMICOLON)?;
    p.finish_node();
    p.pop_context();
    Ok(())
}

/// Entity = 'entity' Ident 'is' GenericClause? PortClause? DeclarativePart
///          ('begin' ConcurrentStatements)? 'end' 'entity'? Ident? ';'
fn entity_decl<P: GrammarParser>(p: &mut P) -> PResult {
    p.push_context(ParseContext::EntityDeclaration);
    p.start_node(SyntaxKind::ENTITY_DECL);
    let opened = p.current_range();
    p.bump(); // entity
    let name = declared_name(p)?;
    p.expect(SyntaxKind::IS_KW)?;
    if p.at(SyntaxKind::GENERIC_KW) {
        generic_clause(p)?;
    }
    if p.at(SyntaxKind::PORT_KW) {
        port_clause(p)?;
    }
    declarative_part(p, ParseContext::EntityDeclaration)?;
    if p.eat(SyntaxKind::BEGIN_KW) {
        concurrent_statements(p, &[SyntaxKind::END_KW])?;
    }
    let block = Block::new("entity", &name, opened).closed_by(&[SyntaxKind::ENTITY_KW]);
    end_block(p, &block, false)?;
    p.finish_node();
    p.pop_context();
    Ok(())
}

/// Architecture = 'architecture' Ident 'of' Name 'is' DeclarativePart
///                'begin' ConcurrentStatements 'end' 'architecture'? Ident? ';'
fn architecture_body<P: GrammarParser>(p: &mut P) -> PResult {
    p.push_context(ParseContext::ArchitectureBody);
    p.start_node(SyntaxKind::ARCHITECTURE_BODY);
    let opened = p.current_range();
    p.bump(); // architecture
    let name = declared_name(p)?;
    p.expect(SyntaxKind::OF_KW)?;
    p.start_node(SyntaxKind::NAME_REF);
    p.expect_ident()?;
    p.finish_node();
    p.expect(SyntaxKind::IS_KW)?;
    declarative_part(p, ParseContext::ArchitectureBody)?;
    p.expect(SyntaxKind::BEGIN_KW)?;
    concurrent_statements(p, &[SyntaxKind::END_KW])?;
    let block =
        Block::new("architecture", &name, opened).closed_by(&[SyntaxKind::ARCHITECTURE_KW]);
    end_block(p, &block, false)?;
    p.finish_node();
    p.pop_context();
    Ok(())
}

/// Package = 'package' Ident 'is' DeclarativePart 'end' 'package'? Ident? ';'
fn package_decl<P: GrammarParser>(p: &mut P) -> PResult {
    p.push_context(ParseContext::PackageDeclaration);
    p.start_node(SyntaxKind::PACKAGE_DECL);
    let opened = p.current_range();
    p.bump(); // package
    let name = declared_name(p)?;
    p.expect(SyntaxKind::IS_KW)?;
    declarative_part(p, ParseContext::PackageDeclaration)?;
    let block = Block::new("package", &name, opened).closed_by(&[SyntaxKind::PACKAGE_KW]);
    end_block(p, &block, false)?;
    p.finish_node();
    p.pop_context();
    Ok(())
}

/// PackageBody = 'package' 'body' Ident 'is' DeclarativePart
///               'end' ('package' 'body')? Ident? ';'
fn package_body<P: GrammarParser>(p: &mut P) -> PResult {
    p.push_context(ParseContext::PackageBody);
    p.start_node(SyntaxKind::PACKAGE_BODY);
    let opened = p.current_range();
    p.bump(); // package
    p.bump(); // body
    let name = declared_name(p)?;
    p.expect(SyntaxKind::IS_KW)?;
    declarative_part(p, ParseContext::PackageBody)?;
    let block = Block::new("package body", &name, opened)
        .closed_by(&[SyntaxKind::PACKAGE_KW, SyntaxKind::BODY_KW]);
    end_block(p, &block, false)?;
    p.finish_node();
    p.pop_context();
    Ok(())
}

/// GenericClause = 'generic' InterfaceList ';'
pub fn generic_clause<P: GrammarParser>(p: &mut P) -> PResult {
    p.push_context(ParseContext::GenericClause);
    p.start_node(SyntaxKind::GENERIC_CLAUSE);
    p.bump(); // generic
    interface_list(p)?;
    p.expect(SyntaxKind::SEMICOLON)?;
    p.finish_node();
    p.pop_context();
    Ok(())
}

/// PortClause = 'port' InterfaceList ';'
pub fn port_clause<P: GrammarParser>(p: &mut P) -> PResult {
    p.push_context(ParseContext::PortClause);
    p.start_node(SyntaxKind::PORT_CLAUSE);
    p.bump(); // port
    interface_list(p)?;
    p.expect(SyntaxKind::SEMICOLON)?;
    p.finish_node();
    p.pop_context();
    Ok(())
}

// =============================================================================
// Shared helpers
// =============================================================================

/// Consume the declared identifier and return its spelling for the
/// closing-label check.
pub(crate) fn declared_name<P: GrammarParser>(p: &mut P) -> PResult<String> {
    let text = p.current_text().to_string();
    p.expect_ident()?;
    Ok(text)
}

/// Label = Ident ':'
pub(crate) fn opt_label<P: GrammarParser>(p: &mut P) -> Option<String> {
    if p.current_kind().is_ident() && p.nth(1) == SyntaxKind::COLON {
        let text = p.current_text().to_string();
        p.start_node(SyntaxKind::LABEL);
        p.bump();
        p.bump();
        p.finish_node();
        Some(text)
    } else {
        None
    }
}

/// An open construct waiting for its `end`
pub(crate) struct Block<'n> {
    what: &'static str,
    name: Option<&'n str>,
    opened: TextRange,
    closers: &'static [SyntaxKind],
    closer_required: bool,
}

impl<'n> Block<'n> {
    pub(crate) fn new(what: &'static str, name: &'n str, opened: TextRange) -> Self {
        Self {
            what,
            name: Some(name),
            opened,
            closers: &[],
            closer_required: false,
        }
    }

    pub(crate) fn unnamed(what: &'static str, name: Option<&'n str>, opened: TextRange) -> Self {
        Self {
            what,
            name,
            opened,
            closers: &[],
            closer_required: false,
        }
    }

    /// Optional keywords after `end` (`end entity`)
    pub(crate) fn closed_by(mut self, closers: &'static [SyntaxKind]) -> Self {
        self.closers = closers;
        self
    }

    /// Mandatory keywords after `end` (`end process`)
    pub(crate) fn closed_by_required(mut self, closers: &'static [SyntaxKind]) -> Self {
        self.closers = closers;
        self.closer_required = true;
        self
    }

    fn describe(&self) -> String {
        match self.name {
            Some(name) => format!("{} '{}'", self.what, name),
            None => self.what.to_string(),
        }
    }
}

fn is_block_keyword(kind: SyntaxKind) -> bool {
    matches!(
        kind,
        SyntaxKind::ENTITY_KW
            | SyntaxKind::ARCHITECTURE_KW
            | SyntaxKind::PACKAGE_KW
            | SyntaxKind::PROCESS_KW
            | SyntaxKind::IF_KW
            | SyntaxKind::CASE_KW
            | SyntaxKind::LOOP_KW
            | SyntaxKind::GENERATE_KW
            | SyntaxKind::COMPONENT_KW
            | SyntaxKind::RECORD_KW
            | SyntaxKind::UNITS_KW
            | SyntaxKind::FUNCTION_KW
            | SyntaxKind::PROCEDURE_KW
            | SyntaxKind::BLOCK_KW
            | SyntaxKind::CONFIGURATION_KW
            | SyntaxKind::CONTEXT_KW
            | SyntaxKind::BODY_KW
    )
}

fn names_match(closing: &str, declared: &str) -> bool {
    if closing.starts_with('\\') || closing.starts_with('"') {
        closing == declared
    } else {
        closing.eq_ignore_ascii_case(declared)
    }
}

/// 'end' Closers? Label? ';'?
pub(crate) fn end_block<P: GrammarParser>(
    p: &mut P,
    block: &Block<'_>,
    terminated_by_parent: bool,
) -> PResult {
    if !p.at(SyntaxKind::END_KW) {
        let err = if p.at_eof() {
            p.error(ErrorCode::E0207, format!("missing 'end' for {}", block.describe()))
        } else {
            p.unexpected(ErrorCode::E0901)
        };
        return Err(err.with_related(RelatedInfo::new(
            format!("{} opened here", block.what),
            block.opened,
        )));
    }
    let end_range = p.current_range();
    p.bump(); // end

    let closer = p.current_kind();
    if block.closers.first() == Some(&closer) {
        for &kind in block.closers {
            p.expect(kind)?;
        }
    } else if is_block_keyword(closer) || block.closer_required {
        if !is_block_keyword(closer) {
            let expected = block.closers.first().map(|k| k.display_name()).unwrap_or_default();
            return Err(p.expected(&expected));
        }
        let message = format!(
            "'end {}' does not close the open {}",
            p.current_text(),
            block.describe()
        );
        return Err(SyntaxError::new(
            message,
            end_range.cover(p.current_range()),
            ErrorCode::E0204,
        )
        .with_related(RelatedInfo::new(
            format!("{} opened here", block.what),
            block.opened,
        )));
    }

    let label_kind = p.current_kind();
    if label_kind.is_ident() || label_kind == SyntaxKind::STRING {
        let closing = p.current_text().to_string();
        match block.name {
            Some(declared) if names_match(&closing, declared) => p.bump(),
            Some(declared) => {
                return Err(p
                    .error(
                        ErrorCode::E0205,
                        format!("closing label '{closing}' does not match '{declared}'"),
                    )
                    .with_related(RelatedInfo::new(
                        format!("{} opened here", block.what),
                        block.opened,
                    )));
            }
            None => {
                return Err(p.error(
                    ErrorCode::E0205,
                    format!("closing label '{closing}' on an unlabeled {}", block.what),
                ));
            }
        }
    }

    if !terminated_by_parent {
        p.expect(SyntaxKind::SEMICOLON)?;
    }
    Ok(())
}

fn unmatched_end<P: GrammarParser>(p: &P) -> SyntaxError {
    SyntaxError::new(
        "unmatched 'end': no design unit is open",
        p.current_range(),
        ErrorCode::E0204,
    )
}

#[cfg(test)]
mod tests;
