//! Typed AST wrappers over the untyped rowan CST.
//!
//! Design units and the few nodes the builders inspect by role get a
//! wrapper with named accessors. Everything below that is reached through
//! the free helpers at the end of the module, which work on any node.

use rowan::{NodeOrToken, TextRange};

use super::syntax_kind::SyntaxKind;
use super::{SyntaxNode, SyntaxToken};

/// Trait for AST nodes that wrap a SyntaxNode
pub trait AstNode: Sized {
    fn can_cast(kind: SyntaxKind) -> bool;
    fn cast(node: SyntaxNode) -> Option<Self>;
    fn syntax(&self) -> &SyntaxNode;

    /// Doc comment written directly above the node
    fn doc_comment(&self) -> Option<String> {
        doc_comment(self.syntax())
    }
}

// ============================================================================
// Helper macros
// ============================================================================

macro_rules! ast_node {
    ($name:ident, $kind:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub struct $name(SyntaxNode);

        impl AstNode for $name {
            fn can_cast(kind: SyntaxKind) -> bool {
                kind == SyntaxKind::$kind
            }

            fn cast(node: SyntaxNode) -> Option<Self> {
                if Self::can_cast(node.kind()) {
                    Some(Self(node))
                } else {
                    None
                }
            }

            fn syntax(&self) -> &SyntaxNode {
                &self.0
            }
        }
    };
}

// ============================================================================
// Root
// ============================================================================

ast_node!(SourceFile, SOURCE_FILE);

impl SourceFile {
    pub fn items(&self) -> impl Iterator<Item = DesignItem> + '_ {
        self.0.children().filter_map(DesignItem::cast)
    }
}

/// Top-level member of a design file
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DesignItem {
    Library(LibraryClause),
    Use(UseClause),
    Entity(EntityDecl),
    Architecture(ArchitectureBody),
    Package(PackageDecl),
    PackageBody(PackageBody),
    Module(ModuleDecl),
}

impl AstNode for DesignItem {
    fn can_cast(kind: SyntaxKind) -> bool {
        matches!(
            kind,
            SyntaxKind::LIBRARY_CLAUSE
                | SyntaxKind::USE_CLAUSE
                | SyntaxKind::ENTITY_DECL
                | SyntaxKind::ARCHITECTURE_BODY
                | SyntaxKind::PACKAGE_DECL
                | SyntaxKind::PACKAGE_BODY
                | SyntaxKind::MODULE_DECL
        )
    }

    fn cast(node: SyntaxNode) -> Option<Self> {
        match node.kind() {
            SyntaxKind::LIBRARY_CLAUSE => Some(Self::Library(LibraryClause(node))),
            SyntaxKind::USE_CLAUSE => Some(Self::Use(UseClause(node))),
            SyntaxKind::ENTITY_DECL => Some(Self::Entity(EntityDecl(node))),
            SyntaxKind::ARCHITECTURE_BODY => Some(Self::Architecture(ArchitectureBody(node))),
            SyntaxKind::PACKAGE_DECL => Some(Self::Package(PackageDecl(node))),
            SyntaxKind::PACKAGE_BODY => Some(Self::PackageBody(PackageBody(node))),
            SyntaxKind::MODULE_DECL => Some(Self::Module(ModuleDecl(node))),
            _ => None,
        }
    }

    fn syntax(&self) -> &SyntaxNode {
        match self {
            Self::Library(n) => n.syntax(),
            Self::Use(n) => n.syntax(),
            Self::Entity(n) => n.syntax(),
            Self::Architecture(n) => n.syntax(),
            Self::Package(n) => n.syntax(),
            Self::PackageBody(n) => n.syntax(),
            Self::Module(n) => n.syntax(),
        }
    }
}

// ============================================================================
// VHDL context clauses
// ============================================================================

ast_node!(LibraryClause, LIBRARY_CLAUSE);

impl LibraryClause {
    pub fn names(&self) -> impl Iterator<Item = SyntaxToken> + '_ {
        ident_tokens(&self.0)
    }
}

ast_node!(UseClause, USE_CLAUSE);

impl UseClause {
    /// The selected names, one per comma-separated entry
    pub fn names(&self) -> impl Iterator<Item = SyntaxNode> + '_ {
        self.0.children()
    }
}

// ============================================================================
// VHDL design units
// ============================================================================

ast_node!(EntityDecl, ENTITY_DECL);

impl EntityDecl {
    pub fn name(&self) -> Option<SyntaxToken> {
        ident_tokens(&self.0).next()
    }

    pub fn generics(&self) -> Option<InterfaceList> {
        clause_list(&self.0, SyntaxKind::GENERIC_CLAUSE)
    }

    pub fn ports(&self) -> Option<InterfaceList> {
        clause_list(&self.0, SyntaxKind::PORT_CLAUSE)
    }

    pub fn declarations(&self) -> Option<SyntaxNode> {
        child(&self.0, SyntaxKind::DECL_LIST)
    }

    pub fn statements(&self) -> Option<SyntaxNode> {
        child(&self.0, SyntaxKind::STMT_LIST)
    }
}

ast_node!(ArchitectureBody, ARCHITECTURE_BODY);

impl ArchitectureBody {
    pub fn name(&self) -> Option<SyntaxToken> {
        ident_tokens(&self.0).next()
    }

    /// Name of the implemented entity
    pub fn entity_name(&self) -> Option<SyntaxToken> {
        child(&self.0, SyntaxKind::NAME_REF).and_then(|n| first_token(&n))
    }

    pub fn declarations(&self) -> Option<SyntaxNode> {
        child(&self.0, SyntaxKind::DECL_LIST)
    }

    pub fn statements(&self) -> Option<SyntaxNode> {
        child(&self.0, SyntaxKind::STMT_LIST)
    }
}

ast_node!(PackageDecl, PACKAGE_DECL);

impl PackageDecl {
    pub fn name(&self) -> Option<SyntaxToken> {
        ident_tokens(&self.0).next()
    }

    pub fn declarations(&self) -> Option<SyntaxNode> {
        child(&self.0, SyntaxKind::DECL_LIST)
    }
}

ast_node!(PackageBody, PACKAGE_BODY);

impl PackageBody {
    pub fn name(&self) -> Option<SyntaxToken> {
        ident_tokens(&self.0).next()
    }

    pub fn declarations(&self) -> Option<SyntaxNode> {
        child(&self.0, SyntaxKind::DECL_LIST)
    }
}

ast_node!(ComponentDecl, COMPONENT_DECL);

impl ComponentDecl {
    pub fn name(&self) -> Option<SyntaxToken> {
        ident_tokens(&self.0).next()
    }

    pub fn generics(&self) -> Option<InterfaceList> {
        clause_list(&self.0, SyntaxKind::GENERIC_CLAUSE)
    }

    pub fn ports(&self) -> Option<InterfaceList> {
        clause_list(&self.0, SyntaxKind::PORT_CLAUSE)
    }
}

ast_node!(InterfaceList, INTERFACE_LIST);

impl InterfaceList {
    pub fn decls(&self) -> impl Iterator<Item = InterfaceDecl> + '_ {
        self.0.children().filter_map(InterfaceDecl::cast)
    }
}

ast_node!(InterfaceDecl, INTERFACE_DECL);

impl InterfaceDecl {
    /// `signal`, `variable` or `constant` when written
    pub fn class(&self) -> Option<SyntaxKind> {
        significant_tokens(&self.0).map(|t| t.kind()).find(|k| {
            matches!(
                k,
                SyntaxKind::SIGNAL_KW | SyntaxKind::VARIABLE_KW | SyntaxKind::CONSTANT_KW
            )
        })
    }

    /// `in`, `out`, `inout`, `buffer` or `linkage` when written
    pub fn mode(&self) -> Option<SyntaxKind> {
        significant_tokens(&self.0).map(|t| t.kind()).find(|k| {
            matches!(
                k,
                SyntaxKind::IN_KW
                    | SyntaxKind::OUT_KW
                    | SyntaxKind::INOUT_KW
                    | SyntaxKind::BUFFER_KW
                    | SyntaxKind::LINKAGE_KW
            )
        })
    }

    pub fn names(&self) -> Vec<SyntaxToken> {
        child(&self.0, SyntaxKind::IDENT_LIST)
            .map(|list| ident_tokens(&list).collect())
            .unwrap_or_default()
    }

    pub fn subtype(&self) -> Option<SyntaxNode> {
        self.0.children().find(|n| n.kind() != SyntaxKind::IDENT_LIST)
    }

    pub fn default_value(&self) -> Option<SyntaxNode> {
        node_after(&self.0, SyntaxKind::COLON_EQ)
    }
}

// ============================================================================
// Verilog modules
// ============================================================================

ast_node!(ModuleDecl, MODULE_DECL);

impl ModuleDecl {
    pub fn name(&self) -> Option<SyntaxToken> {
        ident_tokens(&self.0).next()
    }

    /// PARAM_DECL nodes of the `#( )` list
    pub fn param_ports(&self) -> Vec<SyntaxNode> {
        child(&self.0, SyntaxKind::PARAM_PORT_LIST)
            .map(|list| children(&list, SyntaxKind::PARAM_DECL).collect())
            .unwrap_or_default()
    }

    pub fn port_list(&self) -> Option<PortList> {
        self.0.children().find_map(PortList::cast)
    }

    /// Module items after the header
    pub fn items(&self) -> impl Iterator<Item = SyntaxNode> + '_ {
        self.0.children().filter(|n| {
            !matches!(
                n.kind(),
                SyntaxKind::PARAM_PORT_LIST | SyntaxKind::PORT_LIST | SyntaxKind::ATTRIBUTE_INSTANCE
            )
        })
    }
}

ast_node!(PortList, PORT_LIST);

impl PortList {
    /// ANSI lists declare their ports inline
    pub fn is_ansi(&self) -> bool {
        child(&self.0, SyntaxKind::PORT_DECL).is_some()
    }

    pub fn port_decls(&self) -> impl Iterator<Item = SyntaxNode> + '_ {
        children(&self.0, SyntaxKind::PORT_DECL)
    }

    /// Port names of a non-ANSI list
    pub fn names(&self) -> impl Iterator<Item = SyntaxToken> + '_ {
        ident_tokens(&self.0)
    }
}

// ============================================================================
// Free helpers
// ============================================================================

fn clause_list(node: &SyntaxNode, clause: SyntaxKind) -> Option<InterfaceList> {
    child(node, clause).and_then(|c| c.children().find_map(InterfaceList::cast))
}

/// First direct child node of the given kind
pub fn child(node: &SyntaxNode, kind: SyntaxKind) -> Option<SyntaxNode> {
    node.children().find(|n| n.kind() == kind)
}

/// Direct child nodes of the given kind
pub fn children(node: &SyntaxNode, kind: SyntaxKind) -> impl Iterator<Item = SyntaxNode> {
    node.children().filter(move |n| n.kind() == kind)
}

/// Direct child tokens that are not trivia
pub fn significant_tokens(node: &SyntaxNode) -> impl Iterator<Item = SyntaxToken> {
    node.children_with_tokens()
        .filter_map(NodeOrToken::into_token)
        .filter(|t| !t.kind().is_trivia())
}

/// First direct token of the given kind
pub fn token(node: &SyntaxNode, kind: SyntaxKind) -> Option<SyntaxToken> {
    significant_tokens(node).find(|t| t.kind() == kind)
}

pub fn has_token(node: &SyntaxNode, kind: SyntaxKind) -> bool {
    token(node, kind).is_some()
}

/// Direct identifier tokens, plain or extended
pub fn ident_tokens(node: &SyntaxNode) -> impl Iterator<Item = SyntaxToken> {
    significant_tokens(node).filter(|t| t.kind().is_ident())
}

/// First significant token anywhere below the node
pub fn first_token(node: &SyntaxNode) -> Option<SyntaxToken> {
    node.descendants_with_tokens()
        .filter_map(NodeOrToken::into_token)
        .find(|t| !t.kind().is_trivia())
}

/// The child node that directly follows a token of the given kind
pub fn node_after(node: &SyntaxNode, kind: SyntaxKind) -> Option<SyntaxNode> {
    let mut seen = false;
    for element in node.children_with_tokens() {
        match element {
            NodeOrToken::Token(t) if t.kind() == kind => seen = true,
            NodeOrToken::Node(n) if seen => return Some(n),
            _ => {}
        }
    }
    None
}

/// Range from the first significant token to the end of the node.
///
/// Nodes own the trivia in front of their first token; this leaves it out.
pub fn significant_range(node: &SyntaxNode) -> TextRange {
    let range = node.text_range();
    match first_token(node) {
        Some(t) => TextRange::new(t.text_range().start(), range.end()),
        None => range,
    }
}

/// Collect the line comments written directly above a node.
///
/// A comment belongs to the run only when it sits on its own line; a blank
/// line or a block comment starts a new run. The comment markers are
/// stripped and each line keeps its trailing newline.
pub fn doc_comment(node: &SyntaxNode) -> Option<String> {
    let leading = node
        .descendants_with_tokens()
        .filter_map(NodeOrToken::into_token)
        .take_while(|t| t.kind().is_trivia());

    let texts: Vec<_> = leading.collect();
    let mut lines: Vec<&str> = Vec::new();
    let mut at_line_start = node.first_token().is_none_or(|t| t.prev_token().is_none());
    for t in &texts {
        match t.kind() {
            SyntaxKind::WHITESPACE => {
                let newlines = t.text().matches('\n').count();
                if newlines > 1 {
                    lines.clear();
                }
                if newlines > 0 {
                    at_line_start = true;
                }
            }
            SyntaxKind::LINE_COMMENT => {
                if at_line_start {
                    lines.push(strip_comment_marker(t.text()));
                } else {
                    lines.clear();
                }
                at_line_start = false;
            }
            _ => {
                lines.clear();
                at_line_start = false;
            }
        }
    }
    if lines.is_empty() {
        return None;
    }
    let mut doc = String::new();
    for line in lines {
        doc.push_str(line);
        doc.push('\n');
    }
    Some(doc)
}

fn strip_comment_marker(text: &str) -> &str {
    let text = text.trim_end_matches(['\r', '\n']);
    text.strip_prefix("--")
        .or_else(|| text.strip_prefix("//"))
        .unwrap_or(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{parse_verilog, parse_vhdl};

    fn vhdl_items(source: &str) -> Vec<DesignItem> {
        let parse = parse_vhdl(source).expect("valid VHDL");
        let file = SourceFile::cast(parse.syntax()).expect("root");
        file.items().collect()
    }

    #[test]
    fn test_design_items_in_order() {
        let items = vhdl_items(
            "library ieee;\nuse ieee.std_logic_1164.all;\nentity e is end;\narchitecture rtl of e is begin end;\n",
        );
        assert!(matches!(items[0], DesignItem::Library(_)));
        assert!(matches!(items[1], DesignItem::Use(_)));
        assert!(matches!(items[2], DesignItem::Entity(_)));
        let DesignItem::Architecture(arch) = &items[3] else {
            panic!("expected architecture");
        };
        assert_eq!(arch.name().unwrap().text(), "rtl");
        assert_eq!(arch.entity_name().unwrap().text(), "e");
    }

    #[test]
    fn test_interface_accessors() {
        let items = vhdl_items(
            "entity e is\n  generic (N : natural := 4);\n  port (signal a, b : in bit; y : out bit);\nend entity e;\n",
        );
        let DesignItem::Entity(entity) = &items[0] else {
            panic!("expected entity");
        };
        assert_eq!(entity.name().unwrap().text(), "e");
        let generic = entity.generics().unwrap().decls().next().unwrap();
        assert_eq!(generic.mode(), None);
        assert!(generic.default_value().is_some());

        let ports: Vec<_> = entity.ports().unwrap().decls().collect();
        assert_eq!(ports.len(), 2);
        assert_eq!(ports[0].class(), Some(SyntaxKind::SIGNAL_KW));
        assert_eq!(ports[0].mode(), Some(SyntaxKind::IN_KW));
        let names: Vec<_> = ports[0].names().iter().map(|t| t.text().to_string()).collect();
        assert_eq!(names, ["a", "b"]);
        assert_eq!(ports[1].subtype().unwrap().kind(), SyntaxKind::NAME_REF);
    }

    #[test]
    fn test_doc_comment_collects_own_line_comments() {
        let items = vhdl_items(
            "library ieee; -- trailing\n\n-- unrelated\n\n-- Adder entity\n--   two inputs\nentity adder is end;\n",
        );
        assert_eq!(items[0].doc_comment(), None);
        assert_eq!(
            items[1].doc_comment().as_deref(),
            Some(" Adder entity\n   two inputs\n")
        );
    }

    #[test]
    fn test_doc_comment_ignores_trailing_comment() {
        let items = vhdl_items("library ieee; -- not a doc\nentity e is end;\n");
        assert_eq!(items[1].doc_comment(), None);
    }

    #[test]
    fn test_significant_range_skips_trivia() {
        let source = "-- header\nlibrary ieee;";
        let items = vhdl_items(source);
        let range = significant_range(items[0].syntax());
        assert_eq!(&source[range], "library ieee;");
    }

    #[test]
    fn test_module_accessors() {
        let parse = parse_verilog("module m #(parameter W = 4) (a, b);\n  input a;\n  output b;\nendmodule\n")
            .expect("valid Verilog");
        let file = SourceFile::cast(parse.syntax()).unwrap();
        let DesignItem::Module(module) = file.items().next().unwrap() else {
            panic!("expected module");
        };
        assert_eq!(module.name().unwrap().text(), "m");
        assert_eq!(module.param_ports().len(), 1);
        let ports = module.port_list().unwrap();
        assert!(!ports.is_ansi());
        assert_eq!(ports.names().count(), 2);
        assert_eq!(module.items().count(), 2);
    }

    #[test]
    fn test_node_after() {
        let items = vhdl_items("package p is constant C : integer := 8; end package;\n");
        let DesignItem::Package(pkg) = &items[0] else {
            panic!("expected package");
        };
        let decl = pkg.declarations().unwrap().children().next().unwrap();
        let value = node_after(&decl, SyntaxKind::COLON_EQ).unwrap();
        assert_eq!(value.kind(), SyntaxKind::LITERAL);
        assert_eq!(value.text().to_string().trim(), "8");
    }
}
