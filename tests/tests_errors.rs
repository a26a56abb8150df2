//! Failure reporting: every bad input yields exactly one error, never a tree.

#[path = "helpers/mod.rs"]
mod helpers;

use std::path::Path;

use hdlconv::parser::ErrorCode;
use hdlconv::{ConfigurationError, HdlError, Language, ParseErrorKind, ParseException};
use helpers::fixtures::fixture;
use rstest::rstest;

fn parse_error(source: &str, language: Language) -> ParseException {
    match hdlconv::parse(source, language) {
        Ok(result) => panic!("expected a parse error, got {result:?}"),
        Err(HdlError::Parse(err)) => err,
        Err(other) => panic!("expected a parse error, got {other}"),
    }
}

#[rstest]
#[case::unterminated_string(
    "entity e is\n  generic (s : string := \"abc);\nend;\n",
    ParseErrorKind::Lexical,
    ErrorCode::E0102,
    2
)]
#[case::invalid_character("entity e is\nend;\n@\n", ParseErrorKind::Lexical, ErrorCode::E0101, 3)]
#[case::unmatched_end("library ieee;\nend;\n", ParseErrorKind::Syntax, ErrorCode::E0204, 2)]
#[case::mismatched_closing_label(
    "entity e is\nend entity f;\n",
    ParseErrorKind::Syntax,
    ErrorCode::E0205,
    2
)]
#[case::mixed_logical_operators(
    "architecture a of e is\nbegin\n  y <= a and b or c;\nend;\n",
    ParseErrorKind::Syntax,
    ErrorCode::E0402,
    3
)]
fn test_vhdl_errors(
    #[case] source: &str,
    #[case] kind: ParseErrorKind,
    #[case] code: ErrorCode,
    #[case] line: usize,
) {
    let err = parse_error(source, Language::Vhdl);
    assert_eq!(err.kind, kind, "{err}");
    assert_eq!(err.code, Some(code), "{err}");
    assert_eq!(err.location.line, line, "{err}");
    assert!(err.location.column >= 1);
    assert_eq!(err.location.file, None);
}

#[test]
fn test_parenthesised_logical_operators_are_accepted() {
    let source = "architecture a of e is\nbegin\n  y <= (a and b) or c;\nend;\n";
    assert!(hdlconv::parse(source, Language::Vhdl).is_ok());
}

#[rstest]
#[case::missing_semicolon("module m;\n  always @(posedge clk) q <= d\nendmodule\n", 3)]
#[case::missing_endmodule("module m;\n  wire a;\n", 3)]
#[case::unterminated_comment("module m;\n/* never closed\nendmodule\n", 2)]
fn test_verilog_errors(#[case] source: &str, #[case] max_line: usize) {
    let err = parse_error(source, Language::Verilog);
    assert!(err.code.is_some(), "{err}");
    assert!(err.location.line >= 1 && err.location.line <= max_line, "{err}");
    assert!(err.to_string().contains(&format!("{}:", err.location.line)));
}

#[rstest]
#[case::vhdl(
    Language::Vhdl,
    format!("architecture rtl of e is\nbegin\n  y <= {}a{};\nend;\n", "(".repeat(20_000), ")".repeat(20_000))
)]
#[case::verilog(
    Language::Verilog,
    format!("module m;\n  assign y = {}a{};\nendmodule\n", "(".repeat(20_000), ")".repeat(20_000))
)]
fn test_deeply_nested_expression_fails_cleanly(#[case] language: Language, #[case] source: String) {
    let err = parse_error(&source, language);
    assert_eq!(err.kind, ParseErrorKind::Syntax, "{err}");
    assert_eq!(err.code, Some(ErrorCode::E0903), "{err}");
    assert_eq!(err.location.line, 3, "{err}");
}

#[test]
fn test_verilog_decimals_before_whitespace_parse() {
    let source = "module m;\n  parameter W = 8 ;\n  wire [7 : 0] a;\n  assign a = 3 + 1;\n  initial #10 a = 8 'hFF;\nendmodule\n";
    assert!(hdlconv::parse(source, Language::Verilog).is_ok());
}

#[test]
fn test_malformed_vhdl_file() {
    let path = fixture("malformed/malformed.vhdl");
    let err = hdlconv::parse_file(&path, Language::Vhdl).unwrap_err();
    let err = err.as_parse().expect("a parse error");
    assert_eq!(err.kind, ParseErrorKind::Syntax);
    assert_eq!(err.location.file.as_deref(), Some(path.as_path()));
    // the port list is still open when `end` shows up
    assert!((7..=9).contains(&err.location.line), "{err}");
    assert!(err.to_string().starts_with(&path.display().to_string()));
}

#[test]
fn test_malformed_verilog_file() {
    let path = fixture("malformed/unterminated.v");
    let err = hdlconv::parse_file(&path, Language::Verilog).unwrap_err();
    assert!(err.is_parse_error(), "{err}");
}

#[test]
fn test_error_carries_its_cause() {
    use std::error::Error;

    let err = parse_error("entity e is\nend entity f;\n", Language::Vhdl);
    let syntax = err.syntax_error().expect("front-end error");
    assert_eq!(syntax.code, ErrorCode::E0205);
    assert!(err.source().is_some());
}

// ============================================================================
// Configuration
// ============================================================================

#[test]
fn test_systemverilog_is_rejected_before_reading() {
    let err = hdlconv::parse_file("does/not/exist.sv", Language::SystemVerilog).unwrap_err();
    assert!(matches!(
        err,
        HdlError::Configuration(ConfigurationError::UnsupportedDialect(Language::SystemVerilog))
    ));
    assert!(!err.is_parse_error());
}

#[test]
fn test_unknown_extension() {
    assert_eq!(
        Language::from_path(Path::new("notes.txt")),
        Err(ConfigurationError::UnknownExtension("txt".to_string()))
    );
    assert_eq!(Language::from_path(Path::new("top.vhd")), Ok(Language::Vhdl));
    assert_eq!(Language::from_path(Path::new("top.sv")), Ok(Language::SystemVerilog));
}

#[test]
fn test_unknown_dialect_name() {
    let err = "ada".parse::<Language>().unwrap_err();
    assert_eq!(err.to_string(), "unknown dialect 'ada'");
}
