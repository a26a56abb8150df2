//! Syntax kinds for the Rowan-based CST
//!
//! One kind space is shared by the VHDL and Verilog front-ends. Keywords that
//! are spelled the same in both languages (`if`, `case`, `begin`, `and`...)
//! map to the same kind; the keyword tables decide which ones each lexer
//! recognizes.

/// All syntax kinds (tokens and nodes) of both HDL front-ends
///
/// Tokens are leaf nodes (identifiers, keywords, punctuation).
/// Nodes are composite (design units, declarations, statements, expressions).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u16)]
#[allow(non_camel_case_types)]
pub enum SyntaxKind {
    // =========================================================================
    // TRIVIA
    // =========================================================================
    WHITESPACE = 0,
    LINE_COMMENT,
    BLOCK_COMMENT,
    DIRECTIVE, // `timescale and friends, kept verbatim

    // =========================================================================
    // LITERALS
    // =========================================================================
    IDENT,
    EXTENDED_IDENT, // \foo bar\ (VHDL) or \foo+bar (Verilog escaped)
    SYSTEM_IDENT,   // $display
    INTEGER,        // 42, 1e3
    REAL,           // 3.14, 1.0e-9
    BASED_LITERAL,  // 16#FF# or 8'hFF
    BIT_STRING,     // x"FF", 8ub"1010"
    STRING,         // "text"
    CHAR_LITERAL,   // 'a'

    // =========================================================================
    // PUNCTUATION
    // =========================================================================
    L_PAREN,
    R_PAREN,
    L_BRACKET,
    R_BRACKET,
    L_BRACE,
    R_BRACE,
    SEMICOLON,
    COLON,
    COMMA,
    DOT,
    TICK,
    AMP,
    BAR,
    EQ,
    EQ_EQ,
    EQ_EQ_EQ,
    BANG_EQ,
    BANG_EQ_EQ,
    SLASH_EQ,
    LT,
    LT_EQ,
    GT,
    GT_EQ,
    BOX,
    COLON_EQ,
    FAT_ARROW,
    PLUS,
    MINUS,
    STAR,
    SLASH,
    PERCENT,
    STAR_STAR,
    HASH,
    AT,
    QUESTION,
    BANG,
    TILDE,
    CARET,
    TILDE_AMP,
    TILDE_BAR,
    TILDE_CARET,
    AMP_AMP,
    BAR_BAR,
    SHL,
    SHR,
    ASHL,
    ASHR,
    PLUS_COLON,
    MINUS_COLON,

    // =========================================================================
    // KEYWORDS (VHDL, plus the ones Verilog shares)
    // =========================================================================
    ABS_KW,
    ACCESS_KW,
    AFTER_KW,
    ALIAS_KW,
    ALL_KW,
    AND_KW,
    ARCHITECTURE_KW,
    ARRAY_KW,
    ASSERT_KW,
    ATTRIBUTE_KW,
    BEGIN_KW,
    BLOCK_KW,
    BODY_KW,
    BUFFER_KW,
    BUS_KW,
    CASE_KW,
    COMPONENT_KW,
    CONFIGURATION_KW,
    CONSTANT_KW,
    CONTEXT_KW,
    DISCONNECT_KW,
    DOWNTO_KW,
    ELSE_KW,
    ELSIF_KW,
    END_KW,
    ENTITY_KW,
    EXIT_KW,
    FILE_KW,
    FOR_KW,
    FUNCTION_KW,
    GENERATE_KW,
    GENERIC_KW,
    GROUP_KW,
    GUARDED_KW,
    IF_KW,
    IMPURE_KW,
    IN_KW,
    INERTIAL_KW,
    INOUT_KW,
    IS_KW,
    LABEL_KW,
    LIBRARY_KW,
    LINKAGE_KW,
    LITERAL_KW,
    LOOP_KW,
    MAP_KW,
    MOD_KW,
    NAND_KW,
    NEW_KW,
    NEXT_KW,
    NOR_KW,
    NOT_KW,
    NULL_KW,
    OF_KW,
    ON_KW,
    OPEN_KW,
    OR_KW,
    OTHERS_KW,
    OUT_KW,
    PACKAGE_KW,
    PORT_KW,
    POSTPONED_KW,
    PROCEDURE_KW,
    PROCESS_KW,
    PURE_KW,
    RANGE_KW,
    RECORD_KW,
    REGISTER_KW,
    REJECT_KW,
    REM_KW,
    REPORT_KW,
    RETURN_KW,
    ROL_KW,
    ROR_KW,
    SELECT_KW,
    SEVERITY_KW,
    SHARED_KW,
    SIGNAL_KW,
    SLA_KW,
    SLL_KW,
    SRA_KW,
    SRL_KW,
    SUBTYPE_KW,
    THEN_KW,
    TO_KW,
    TRANSPORT_KW,
    TYPE_KW,
    UNAFFECTED_KW,
    UNITS_KW,
    UNTIL_KW,
    USE_KW,
    VARIABLE_KW,
    WAIT_KW,
    WHEN_KW,
    WHILE_KW,
    WITH_KW,
    XNOR_KW,
    XOR_KW,

    // =========================================================================
    // KEYWORDS (Verilog only)
    // =========================================================================
    ALWAYS_KW,
    ASSIGN_KW,
    AUTOMATIC_KW,
    BUF_KW,
    CASEX_KW,
    CASEZ_KW,
    DEFAULT_KW,
    DISABLE_KW,
    ENDCASE_KW,
    ENDFUNCTION_KW,
    ENDGENERATE_KW,
    ENDMODULE_KW,
    ENDTASK_KW,
    FOREVER_KW,
    GENVAR_KW,
    INITIAL_KW,
    INPUT_KW,
    INTEGER_KW,
    LOCALPARAM_KW,
    MODULE_KW,
    NEGEDGE_KW,
    OUTPUT_KW,
    PARAMETER_KW,
    POSEDGE_KW,
    REAL_KW,
    REG_KW,
    REPEAT_KW,
    SIGNED_KW,
    SUPPLY0_KW,
    SUPPLY1_KW,
    TASK_KW,
    TIME_KW,
    TRI_KW,
    UNSIGNED_KW,
    WAND_KW,
    WIRE_KW,
    WOR_KW,

    // =========================================================================
    // NODES (shared)
    // =========================================================================
    SOURCE_FILE,
    LABEL,
    IDENT_LIST,
    DECL_LIST,
    STMT_LIST,

    // =========================================================================
    // NODES (VHDL design units and declarations)
    // =========================================================================
    LIBRARY_CLAUSE,
    USE_CLAUSE,
    ENTITY_DECL,
    ARCHITECTURE_BODY,
    PACKAGE_DECL,
    PACKAGE_BODY,
    GENERIC_CLAUSE,
    PORT_CLAUSE,
    INTERFACE_LIST,
    INTERFACE_DECL,
    CONSTANT_DECL,
    SIGNAL_DECL,
    VARIABLE_DECL,
    ALIAS_DECL,
    TYPE_DECL,
    SUBTYPE_DECL,
    ENUM_DEF,
    RANGE_DEF,
    PHYSICAL_DEF,
    UNIT_DECL,
    ARRAY_DEF,
    INDEX_LIST,
    RECORD_DEF,
    RECORD_ELEMENT,
    ACCESS_DEF,
    FILE_DEF,
    COMPONENT_DECL,
    SUBPROGRAM_DECL,
    ATTRIBUTE_DECL,
    ATTRIBUTE_SPEC,

    // =========================================================================
    // NODES (statements)
    // =========================================================================
    PROCESS_STMT,
    SENSITIVITY_LIST,
    SIGNAL_ASSIGN,
    VARIABLE_ASSIGN,
    SELECTED_ASSIGN,
    SELECTED_WAVEFORM,
    WAVEFORM,
    WAVEFORM_ELEMENT,
    COMPONENT_INST,
    GENERIC_MAP,
    PORT_MAP,
    FOR_GENERATE,
    IF_GENERATE,
    IF_STMT,
    ELSIF_CLAUSE,
    ELSE_CLAUSE,
    CASE_STMT,
    CASE_ALT,
    CHOICES,
    FOR_LOOP,
    WHILE_LOOP,
    LOOP_STMT,
    NEXT_STMT,
    EXIT_STMT,
    RETURN_STMT,
    NULL_STMT,
    WAIT_STMT,
    ASSERT_STMT,
    REPORT_STMT,
    CALL_STMT,

    // =========================================================================
    // NODES (expressions)
    // =========================================================================
    BINARY_EXPR,
    UNARY_EXPR,
    PAREN_EXPR,
    AGGREGATE,
    ELEMENT,
    ARG_LIST,
    RANGE_EXPR,
    CONSTRAINED_TYPE,
    RESOLVED_TYPE,
    LITERAL,
    PHYSICAL_LITERAL,
    NAME_REF,
    SELECTED_NAME,
    CALL_EXPR,
    ATTRIBUTE_NAME,
    QUALIFIED_EXPR,
    TERNARY_EXPR,
    CONCAT_EXPR,
    REPL_EXPR,
    INDEX_EXPR,

    // =========================================================================
    // NODES (Verilog)
    // =========================================================================
    MODULE_DECL,
    PARAM_PORT_LIST,
    PORT_LIST,
    PORT_DECL,
    NET_DECL,
    REG_DECL,
    PARAM_DECL,
    GENVAR_DECL,
    DECL_ASSIGN,
    DIMENSION,
    CONT_ASSIGN,
    ASSIGNMENT,
    ALWAYS_BLOCK,
    INITIAL_BLOCK,
    EVENT_CONTROL,
    EVENT_EXPR,
    DELAY_CONTROL,
    TIMING_STMT,
    SEQ_BLOCK,
    FOR_STMT,
    REPEAT_STMT,
    FOREVER_STMT,
    DISABLE_STMT,
    MODULE_INST,
    PARAM_VALUES,
    INSTANCE,
    NAMED_CONNECTION,
    FUNCTION_DECL,
    TASK_DECL,
    GENERATE_REGION,
    GEN_FOR,
    GEN_IF,
    GEN_BLOCK,
    ATTRIBUTE_INSTANCE,

    // Special
    ERROR,

    #[doc(hidden)]
    __LAST,
}

impl SyntaxKind {
    /// Check if this is a trivia token (whitespace, comment or directive)
    pub fn is_trivia(self) -> bool {
        matches!(
            self,
            Self::WHITESPACE | Self::LINE_COMMENT | Self::BLOCK_COMMENT | Self::DIRECTIVE
        )
    }

    /// Check if this is a keyword of either language
    pub fn is_keyword(self) -> bool {
        (self as u16) >= (Self::ABS_KW as u16) && (self as u16) <= (Self::WOR_KW as u16)
    }

    /// Check if this is a punctuation token
    pub fn is_punct(self) -> bool {
        (self as u16) >= (Self::L_PAREN as u16) && (self as u16) <= (Self::MINUS_COLON as u16)
    }

    /// Check if this is a literal token
    pub fn is_literal(self) -> bool {
        matches!(
            self,
            Self::INTEGER
                | Self::REAL
                | Self::BASED_LITERAL
                | Self::BIT_STRING
                | Self::STRING
                | Self::CHAR_LITERAL
        )
    }

    /// Identifier-like tokens that can name a declaration
    pub fn is_ident(self) -> bool {
        matches!(self, Self::IDENT | Self::EXTENDED_IDENT)
    }

    /// Punctuation spelling, if this is a fixed-text token
    pub fn punct_text(self) -> Option<&'static str> {
        let text = match self {
            Self::L_PAREN => "(",
            Self::R_PAREN => ")",
            Self::L_BRACKET => "[",
            Self::R_BRACKET => "]",
            Self::L_BRACE => "{",
            Self::R_BRACE => "}",
            Self::SEMICOLON => ";",
            Self::COLON => ":",
            Self::COMMA => ",",
            Self::DOT => ".",
            Self::TICK => "'",
            Self::AMP => "&",
            Self::BAR => "|",
            Self::EQ => "=",
            Self::EQ_EQ => "==",
            Self::EQ_EQ_EQ => "===",
            Self::BANG_EQ => "!=",
            Self::BANG_EQ_EQ => "!==",
            Self::SLASH_EQ => "/=",
            Self::LT => "<",
            Self::LT_EQ => "<=",
            Self::GT => ">",
            Self::GT_EQ => ">=",
            Self::BOX => "<>",
            Self::COLON_EQ => ":=",
            Self::FAT_ARROW => "=>",
            Self::PLUS => "+",
            Self::MINUS => "-",
            Self::STAR => "*",
            Self::SLASH => "/",
            Self::PERCENT => "%",
            Self::STAR_STAR => "**",
            Self::HASH => "#",
            Self::AT => "@",
            Self::QUESTION => "?",
            Self::BANG => "!",
            Self::TILDE => "~",
            Self::CARET => "^",
            Self::TILDE_AMP => "~&",
            Self::TILDE_BAR => "~|",
            Self::TILDE_CARET => "~^",
            Self::AMP_AMP => "&&",
            Self::BAR_BAR => "||",
            Self::SHL => "<<",
            Self::SHR => ">>",
            Self::ASHL => "<<<",
            Self::ASHR => ">>>",
            Self::PLUS_COLON => "+:",
            Self::MINUS_COLON => "-:",
            _ => return None,
        };
        Some(text)
    }

    /// Human-readable name used in diagnostics: `';'`, `'entity'`, `identifier`
    pub fn display_name(self) -> String {
        if let Some(text) = self.punct_text() {
            return format!("'{text}'");
        }
        if self.is_keyword() {
            let debug = format!("{self:?}");
            let word = debug.trim_end_matches("_KW").to_ascii_lowercase();
            return format!("'{word}'");
        }
        match self {
            Self::IDENT | Self::EXTENDED_IDENT => "identifier".to_string(),
            Self::SYSTEM_IDENT => "system task".to_string(),
            Self::INTEGER | Self::REAL | Self::BASED_LITERAL => "number".to_string(),
            Self::BIT_STRING => "bit string".to_string(),
            Self::STRING => "string".to_string(),
            Self::CHAR_LITERAL => "character literal".to_string(),
            Self::ERROR => "end of file".to_string(),
            other => format!("{other:?}").to_ascii_lowercase().replace('_', " "),
        }
    }
}

impl From<SyntaxKind> for rowan::SyntaxKind {
    fn from(kind: SyntaxKind) -> Self {
        Self(kind as u16)
    }
}

impl From<rowan::SyntaxKind> for SyntaxKind {
    fn from(raw: rowan::SyntaxKind) -> Self {
        assert!(raw.0 < SyntaxKind::__LAST as u16);
        // Safety: we control all syntax kinds and check bounds above
        unsafe { std::mem::transmute::<u16, SyntaxKind>(raw.0) }
    }
}

/// Language definition for Rowan
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum HdlLanguage {}

impl rowan::Language for HdlLanguage {
    type Kind = SyntaxKind;

    fn kind_from_raw(raw: rowan::SyntaxKind) -> Self::Kind {
        raw.into()
    }

    fn kind_to_raw(kind: Self::Kind) -> rowan::SyntaxKind {
        kind.into()
    }
}

/// Type aliases for convenience
pub type SyntaxNode = rowan::SyntaxNode<HdlLanguage>;
pub type SyntaxToken = rowan::SyntaxToken<HdlLanguage>;
pub type SyntaxElement = rowan::SyntaxElement<HdlLanguage>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name_keyword() {
        assert_eq!(SyntaxKind::ENTITY_KW.display_name(), "'entity'");
        assert_eq!(SyntaxKind::ENDMODULE_KW.display_name(), "'endmodule'");
    }

    #[test]
    fn test_display_name_punct_and_tokens() {
        assert_eq!(SyntaxKind::SEMICOLON.display_name(), "';'");
        assert_eq!(SyntaxKind::FAT_ARROW.display_name(), "'=>'");
        assert_eq!(SyntaxKind::IDENT.display_name(), "identifier");
        assert_eq!(SyntaxKind::ERROR.display_name(), "end of file");
    }

    #[test]
    fn test_kind_ranges() {
        assert!(SyntaxKind::ABS_KW.is_keyword());
        assert!(SyntaxKind::WOR_KW.is_keyword());
        assert!(!SyntaxKind::SOURCE_FILE.is_keyword());
        assert!(SyntaxKind::MINUS_COLON.is_punct());
        assert!(!SyntaxKind::IDENT.is_punct());
        assert!(SyntaxKind::DIRECTIVE.is_trivia());
    }

    #[test]
    fn test_rowan_roundtrip() {
        let raw: rowan::SyntaxKind = SyntaxKind::PROCESS_STMT.into();
        assert_eq!(SyntaxKind::from(raw), SyntaxKind::PROCESS_STMT);
    }
}
