//! Reserved word tables
//!
//! Built lazily on first use and never mutated afterwards, so concurrent
//! parses share them without locking. VHDL words are looked up
//! case-insensitively, Verilog words case-sensitively.

use std::sync::LazyLock;

use rustc_hash::FxHashMap;

use super::SyntaxKind;

/// VHDL-2008 reserved words the grammar understands.
pub const VHDL_KEYWORDS: &[(&str, SyntaxKind)] = &[
    ("abs", SyntaxKind::ABS_KW),
    ("access", SyntaxKind::ACCESS_KW),
    ("after", SyntaxKind::AFTER_KW),
    ("alias", SyntaxKind::ALIAS_KW),
    ("all", SyntaxKind::ALL_KW),
    ("and", SyntaxKind::AND_KW),
    ("architecture", SyntaxKind::ARCHITECTURE_KW),
    ("array", SyntaxKind::ARRAY_KW),
    ("assert", SyntaxKind::ASSERT_KW),
    ("attribute", SyntaxKind::ATTRIBUTE_KW),
    ("begin", SyntaxKind::BEGIN_KW),
    ("block", SyntaxKind::BLOCK_KW),
    ("body", SyntaxKind::BODY_KW),
    ("buffer", SyntaxKind::BUFFER_KW),
    ("bus", SyntaxKind::BUS_KW),
    ("case", SyntaxKind::CASE_KW),
    ("component", SyntaxKind::COMPONENT_KW),
    ("configuration", SyntaxKind::CONFIGURATION_KW),
    ("constant", SyntaxKind::CONSTANT_KW),
    ("context", SyntaxKind::CONTEXT_KW),
    ("disconnect", SyntaxKind::DISCONNECT_KW),
    ("downto", SyntaxKind::DOWNTO_KW),
    ("else", SyntaxKind::ELSE_KW),
    ("elsif", SyntaxKind::ELSIF_KW),
    ("end", SyntaxKind::END_KW),
    ("entity", SyntaxKind::ENTITY_KW),
    ("exit", SyntaxKind::EXIT_KW),
    ("file", SyntaxKind::FILE_KW),
    ("for", SyntaxKind::FOR_KW),
    ("function", SyntaxKind::FUNCTION_KW),
    ("generate", SyntaxKind::GENERATE_KW),
    ("generic", SyntaxKind::GENERIC_KW),
    ("group", SyntaxKind::GROUP_KW),
    ("guarded", SyntaxKind::GUARDED_KW),
    ("if", SyntaxKind::IF_KW),
    ("impure", SyntaxKind::IMPURE_KW),
    ("in", SyntaxKind::IN_KW),
    ("inertial", SyntaxKind::INERTIAL_KW),
    ("inout", SyntaxKind::INOUT_KW),
    ("is", SyntaxKind::IS_KW),
    ("label", SyntaxKind::LABEL_KW),
    ("library", SyntaxKind::LIBRARY_KW),
    ("linkage", SyntaxKind::LINKAGE_KW),
    ("literal", SyntaxKind::LITERAL_KW),
    ("loop", SyntaxKind::LOOP_KW),
    ("map", SyntaxKind::MAP_KW),
    ("mod", SyntaxKind::MOD_KW),
    ("nand", SyntaxKind::NAND_KW),
    ("new", SyntaxKind::NEW_KW),
    ("next", SyntaxKind::NEXT_KW),
    ("nor", SyntaxKind::NOR_KW),
    ("not", SyntaxKind::NOT_KW),
    ("null", SyntaxKind::NULL_KW),
    ("of", SyntaxKind::OF_KW),
    ("on", SyntaxKind::ON_KW),
    ("open", SyntaxKind::OPEN_KW),
    ("or", SyntaxKind::OR_KW),
    ("others", SyntaxKind::OTHERS_KW),
    ("out", SyntaxKind::OUT_KW),
    ("package", SyntaxKind::PACKAGE_KW),
    ("port", SyntaxKind::PORT_KW),
    ("postponed", SyntaxKind::POSTPONED_KW),
    ("procedure", SyntaxKind::PROCEDURE_KW),
    ("process", SyntaxKind::PROCESS_KW),
    ("pure", SyntaxKind::PURE_KW),
    ("range", SyntaxKind::RANGE_KW),
    ("record", SyntaxKind::RECORD_KW),
    ("register", SyntaxKind::REGISTER_KW),
    ("reject", SyntaxKind::REJECT_KW),
    ("rem", SyntaxKind::REM_KW),
    ("report", SyntaxKind::REPORT_KW),
    ("return", SyntaxKind::RETURN_KW),
    ("rol", SyntaxKind::ROL_KW),
    ("ror", SyntaxKind::ROR_KW),
    ("select", SyntaxKind::SELECT_KW),
    ("severity", SyntaxKind::SEVERITY_KW),
    ("shared", SyntaxKind::SHARED_KW),
    ("signal", SyntaxKind::SIGNAL_KW),
    ("sla", SyntaxKind::SLA_KW),
    ("sll", SyntaxKind::SLL_KW),
    ("sra", SyntaxKind::SRA_KW),
    ("srl", SyntaxKind::SRL_KW),
    ("subtype", SyntaxKind::SUBTYPE_KW),
    ("then", SyntaxKind::THEN_KW),
    ("to", SyntaxKind::TO_KW),
    ("transport", SyntaxKind::TRANSPORT_KW),
    ("type", SyntaxKind::TYPE_KW),
    ("unaffected", SyntaxKind::UNAFFECTED_KW),
    ("units", SyntaxKind::UNITS_KW),
    ("until", SyntaxKind::UNTIL_KW),
    ("use", SyntaxKind::USE_KW),
    ("variable", SyntaxKind::VARIABLE_KW),
    ("wait", SyntaxKind::WAIT_KW),
    ("when", SyntaxKind::WHEN_KW),
    ("while", SyntaxKind::WHILE_KW),
    ("with", SyntaxKind::WITH_KW),
    ("xnor", SyntaxKind::XNOR_KW),
    ("xor", SyntaxKind::XOR_KW),
];

/// Verilog-2005 reserved words the grammar understands.
pub const VERILOG_KEYWORDS: &[(&str, SyntaxKind)] = &[
    ("always", SyntaxKind::ALWAYS_KW),
    ("and", SyntaxKind::AND_KW),
    ("assign", SyntaxKind::ASSIGN_KW),
    ("automatic", SyntaxKind::AUTOMATIC_KW),
    ("begin", SyntaxKind::BEGIN_KW),
    ("buf", SyntaxKind::BUF_KW),
    ("case", SyntaxKind::CASE_KW),
    ("casex", SyntaxKind::CASEX_KW),
    ("casez", SyntaxKind::CASEZ_KW),
    ("default", SyntaxKind::DEFAULT_KW),
    ("disable", SyntaxKind::DISABLE_KW),
    ("else", SyntaxKind::ELSE_KW),
    ("end", SyntaxKind::END_KW),
    ("endcase", SyntaxKind::ENDCASE_KW),
    ("endfunction", SyntaxKind::ENDFUNCTION_KW),
    ("endgenerate", SyntaxKind::ENDGENERATE_KW),
    ("endmodule", SyntaxKind::ENDMODULE_KW),
    ("endtask", SyntaxKind::ENDTASK_KW),
    ("for", SyntaxKind::FOR_KW),
    ("forever", SyntaxKind::FOREVER_KW),
    ("function", SyntaxKind::FUNCTION_KW),
    ("generate", SyntaxKind::GENERATE_KW),
    ("genvar", SyntaxKind::GENVAR_KW),
    ("if", SyntaxKind::IF_KW),
    ("initial", SyntaxKind::INITIAL_KW),
    ("inout", SyntaxKind::INOUT_KW),
    ("input", SyntaxKind::INPUT_KW),
    ("integer", SyntaxKind::INTEGER_KW),
    ("localparam", SyntaxKind::LOCALPARAM_KW),
    ("macromodule", SyntaxKind::MODULE_KW),
    ("module", SyntaxKind::MODULE_KW),
    ("nand", SyntaxKind::NAND_KW),
    ("negedge", SyntaxKind::NEGEDGE_KW),
    ("nor", SyntaxKind::NOR_KW),
    ("not", SyntaxKind::NOT_KW),
    ("or", SyntaxKind::OR_KW),
    ("output", SyntaxKind::OUTPUT_KW),
    ("parameter", SyntaxKind::PARAMETER_KW),
    ("posedge", SyntaxKind::POSEDGE_KW),
    ("real", SyntaxKind::REAL_KW),
    ("reg", SyntaxKind::REG_KW),
    ("repeat", SyntaxKind::REPEAT_KW),
    ("signed", SyntaxKind::SIGNED_KW),
    ("supply0", SyntaxKind::SUPPLY0_KW),
    ("supply1", SyntaxKind::SUPPLY1_KW),
    ("task", SyntaxKind::TASK_KW),
    ("time", SyntaxKind::TIME_KW),
    ("tri", SyntaxKind::TRI_KW),
    ("unsigned", SyntaxKind::UNSIGNED_KW),
    ("wait", SyntaxKind::WAIT_KW),
    ("wand", SyntaxKind::WAND_KW),
    ("while", SyntaxKind::WHILE_KW),
    ("wire", SyntaxKind::WIRE_KW),
    ("wor", SyntaxKind::WOR_KW),
    ("xnor", SyntaxKind::XNOR_KW),
    ("xor", SyntaxKind::XOR_KW),
];

static VHDL_TABLE: LazyLock<FxHashMap<&'static str, SyntaxKind>> =
    LazyLock::new(|| VHDL_KEYWORDS.iter().copied().collect());

static VERILOG_TABLE: LazyLock<FxHashMap<&'static str, SyntaxKind>> =
    LazyLock::new(|| VERILOG_KEYWORDS.iter().copied().collect());

/// Look up a VHDL basic identifier; VHDL reserved words ignore case.
pub fn vhdl_keyword(word: &str) -> Option<SyntaxKind> {
    if word.bytes().any(|b| b.is_ascii_uppercase()) {
        VHDL_TABLE.get(word.to_ascii_lowercase().as_str()).copied()
    } else {
        VHDL_TABLE.get(word).copied()
    }
}

/// Look up a Verilog identifier; Verilog reserved words are lowercase only.
pub fn verilog_keyword(word: &str) -> Option<SyntaxKind> {
    VERILOG_TABLE.get(word).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vhdl_lookup_ignores_case() {
        assert_eq!(vhdl_keyword("entity"), Some(SyntaxKind::ENTITY_KW));
        assert_eq!(vhdl_keyword("ENTITY"), Some(SyntaxKind::ENTITY_KW));
        assert_eq!(vhdl_keyword("EnTiTy"), Some(SyntaxKind::ENTITY_KW));
        assert_eq!(vhdl_keyword("std_logic"), None);
    }

    #[test]
    fn test_verilog_lookup_is_case_sensitive() {
        assert_eq!(verilog_keyword("module"), Some(SyntaxKind::MODULE_KW));
        assert_eq!(verilog_keyword("Module"), None);
        assert_eq!(verilog_keyword("entity"), None);
    }

    #[test]
    fn test_tables_have_no_duplicates() {
        assert_eq!(VHDL_TABLE.len(), VHDL_KEYWORDS.len());
        assert_eq!(VERILOG_TABLE.len(), VERILOG_KEYWORDS.len());
    }
}
