//! Integration tests for the errors module

use super::*;
use rowan::{TextRange, TextSize};

#[test]
fn test_error_module_exports() {
    let _code = ErrorCode::E0201;
    let _context = ParseContext::TopLevel;
    let _err = SyntaxError::new(
        "test error",
        TextRange::empty(TextSize::new(0)),
        ErrorCode::E0901,
    );
}

#[test]
fn test_complete_error_workflow() {
    // a process opened at 10..17 and never closed
    let opened = TextRange::new(TextSize::new(10), TextSize::new(17));
    let at_eof = TextRange::empty(TextSize::new(80));

    let err = SyntaxError::new("expected 'end process'", at_eof, ErrorCode::E0207)
        .with_hint("close the process with 'end process;'")
        .with_related(RelatedInfo::new("process opened here", opened));

    assert_eq!(err.code, ErrorCode::E0207);
    assert!(err.code.is_structural());
    assert!(err.hint.is_some());
    assert_eq!(err.related[0].range, opened);
}

#[test]
fn test_error_code_exhaustiveness() {
    let codes = [
        ErrorCode::E0101,
        ErrorCode::E0102,
        ErrorCode::E0103,
        ErrorCode::E0104,
        ErrorCode::E0105,
        ErrorCode::E0201,
        ErrorCode::E0202,
        ErrorCode::E0203,
        ErrorCode::E0204,
        ErrorCode::E0205,
        ErrorCode::E0206,
        ErrorCode::E0207,
        ErrorCode::E0301,
        ErrorCode::E0302,
        ErrorCode::E0303,
        ErrorCode::E0304,
        ErrorCode::E0305,
        ErrorCode::E0401,
        ErrorCode::E0402,
        ErrorCode::E0403,
        ErrorCode::E0404,
        ErrorCode::E0501,
        ErrorCode::E0502,
        ErrorCode::E0503,
        ErrorCode::E0601,
        ErrorCode::E0602,
        ErrorCode::E0603,
        ErrorCode::E0901,
        ErrorCode::E0902,
        ErrorCode::E0903,
        ErrorCode::E0999,
    ];

    for code in codes {
        assert!(!code.default_message().is_empty(), "code {:?} has no message", code);
        assert!(
            !code.category_description().is_empty(),
            "code {:?} has no category",
            code
        );
        let s = code.as_str();
        assert!(s.starts_with('E'), "code {:?} doesn't start with E", code);
        assert_eq!(s.len(), 5, "code {:?} should be 5 chars", code);
        assert_eq!(code.is_lexical(), s.starts_with("E01"));
    }
}

#[test]
fn test_error_at_offset() {
    let err = SyntaxError::at_offset("test", TextSize::new(42), ErrorCode::E0901);

    assert_eq!(err.range.start(), TextSize::new(42));
    assert_eq!(err.range.end(), TextSize::new(42));
}
