//! Parse context tracking for context-aware error messages
//!
//! The parser maintains a stack of contexts so an error can say where in
//! the design it happened ("in port clause", "in process body").

/// Represents the current parsing context
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ParseContext {
    /// At the top level of a file
    #[default]
    TopLevel,
    /// Inside a library or use clause
    ContextClause,

    // VHDL design units
    /// Entity header and declarative part
    EntityDeclaration,
    /// Architecture declarative part and statements
    ArchitectureBody,
    /// Package declaration
    PackageDeclaration,
    /// Package body
    PackageBody,
    /// Generic clause
    GenericClause,
    /// Port clause
    PortClause,
    /// Subprogram parameter list
    ParameterList,
    /// Any declarative part
    DeclarativePart,
    /// Type definition
    TypeDefinition,

    // Statements
    /// Process declarative part and statements
    ProcessBody,
    /// Subprogram body
    SubprogramBody,
    /// Sequential statement list
    SequentialStatements,
    /// Concurrent statement list
    ConcurrentStatements,

    // Expressions
    /// Parsing an expression
    Expression,
    /// Association or aggregate element list
    AssociationList,

    // Verilog
    /// Module header with parameter and port lists
    ModuleHeader,
    /// Module body item
    ModuleItem,
    /// Procedural statement inside always/initial/task/function
    ProceduralStatement,
}

impl ParseContext {
    /// Get a human-readable description of this context for error messages
    pub fn description(&self) -> &'static str {
        match self {
            Self::TopLevel => "at top level",
            Self::ContextClause => "in context clause",
            Self::EntityDeclaration => "in entity declaration",
            Self::ArchitectureBody => "in architecture body",
            Self::PackageDeclaration => "in package declaration",
            Self::PackageBody => "in package body",
            Self::GenericClause => "in generic clause",
            Self::PortClause => "in port clause",
            Self::ParameterList => "in parameter list",
            Self::DeclarativePart => "in declarative part",
            Self::TypeDefinition => "in type definition",
            Self::ProcessBody => "in process body",
            Self::SubprogramBody => "in subprogram body",
            Self::SequentialStatements => "in sequential statements",
            Self::ConcurrentStatements => "in concurrent statements",
            Self::Expression => "in expression",
            Self::AssociationList => "in association list",
            Self::ModuleHeader => "in module header",
            Self::ModuleItem => "in module body",
            Self::ProceduralStatement => "in procedural statement",
        }
    }

    /// Get a description of what tokens are expected in this context
    pub fn expected_description(&self) -> &'static str {
        match self {
            Self::TopLevel => "a library clause, use clause or design unit",
            Self::ContextClause => "a library or selected name",
            Self::EntityDeclaration => "a generic clause, port clause, declaration or 'end'",
            Self::ArchitectureBody | Self::ConcurrentStatements => {
                "a concurrent statement (process, assignment, instantiation, generate) or 'end'"
            }
            Self::PackageDeclaration | Self::PackageBody | Self::DeclarativePart => {
                "a declaration (constant, signal, type, subprogram, component) or 'end'"
            }
            Self::GenericClause | Self::PortClause | Self::ParameterList => {
                "an interface declaration"
            }
            Self::TypeDefinition => "a type definition (range, array, record, enumeration)",
            Self::ProcessBody | Self::SubprogramBody | Self::SequentialStatements => {
                "a sequential statement or 'end'"
            }
            Self::Expression => "an expression (literal, name, or operator)",
            Self::AssociationList => "an association element",
            Self::ModuleHeader => "a parameter or port declaration",
            Self::ModuleItem => "a declaration, assignment, always/initial block, instance or 'endmodule'",
            Self::ProceduralStatement => "a procedural statement",
        }
    }

    /// Check if this context belongs to the Verilog grammar
    pub fn is_verilog(&self) -> bool {
        matches!(
            self,
            Self::ModuleHeader | Self::ModuleItem | Self::ProceduralStatement
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_description() {
        assert_eq!(ParseContext::TopLevel.description(), "at top level");
        assert_eq!(ParseContext::PortClause.description(), "in port clause");
        assert_eq!(ParseContext::ModuleItem.description(), "in module body");
    }

    #[test]
    fn test_context_expected_description() {
        assert!(
            ParseContext::ArchitectureBody
                .expected_description()
                .contains("process")
        );
        assert!(ParseContext::PortClause.expected_description().contains("interface"));
    }

    #[test]
    fn test_default_context() {
        assert_eq!(ParseContext::default(), ParseContext::TopLevel);
    }

    #[test]
    fn test_is_verilog() {
        assert!(ParseContext::ModuleHeader.is_verilog());
        assert!(!ParseContext::PackageBody.is_verilog());
    }
}
