use rustc_hash::FxHashSet;

use super::*;
use crate::base::Span;

#[test]
fn test_vhdl_names_fold_case() {
    assert_eq!(HdlName::vhdl("WIDTH"), HdlName::vhdl("width"));
    assert_eq!(HdlName::vhdl("Components_Pkg"), "components_pkg");
    assert_eq!(HdlName::vhdl("WIDTH").as_str(), "WIDTH");
    assert_eq!(HdlName::vhdl("WIDTH").key(), "width");
}

#[test]
fn test_extended_and_verilog_names_keep_case() {
    assert_ne!(HdlName::vhdl("\\Foo\\"), HdlName::vhdl("\\foo\\"));
    assert_ne!(HdlName::exact("Clk"), HdlName::exact("clk"));
    assert_ne!(HdlName::exact("Clk"), "clk");
    assert!(HdlName::exact("clk").is_case_sensitive());
    assert!(!HdlName::vhdl("clk").is_case_sensitive());
}

#[test]
fn test_names_hash_by_key() {
    let mut set = FxHashSet::default();
    set.insert(HdlName::vhdl("Data"));
    assert!(set.contains(&HdlName::vhdl("DATA")));
    assert!(!set.contains(&HdlName::exact("DATA")));
}

#[test]
fn test_folded_and_exact_names_never_equal() {
    for (vhdl, exact) in [("FOO", "foo"), ("foo", "FOO"), ("foo", "foo")] {
        assert_ne!(HdlName::vhdl(vhdl), HdlName::exact(exact));
        assert_ne!(HdlName::exact(exact), HdlName::vhdl(vhdl));
    }
    assert_eq!(HdlName::vhdl("\\foo\\"), HdlName::exact("\\foo\\"));

    let mut set = FxHashSet::default();
    set.insert(HdlName::exact("foo"));
    assert!(!set.contains(&HdlName::vhdl("foo")));
    assert!(set.contains(&HdlName::exact("foo")));
}

#[test]
fn test_position_ignored_by_equality() {
    let mut a = HdlLibrary {
        name: HdlName::vhdl("ieee"),
        position: HdlPosition::default(),
    };
    let b = HdlLibrary {
        name: HdlName::vhdl("IEEE"),
        position: HdlPosition::new(Span::from_coords(3, 0, 3, 13)),
    };
    assert_eq!(a, b);
    a.name = HdlName::vhdl("work");
    assert_ne!(a, b);
}

#[test]
fn test_int_value() {
    let hex = HdlValueInt {
        value: "ff".into(),
        base: 16,
        bits: Some(8),
    };
    assert_eq!(hex.as_u128(), Some(255));
    let unknown = HdlValueInt {
        value: "1x0z".into(),
        base: 2,
        bits: Some(4),
    };
    assert_eq!(unknown.as_u128(), None);
    assert_eq!(HdlValueInt::decimal(8).as_u128(), Some(8));
}

#[test]
fn test_find_by_name() {
    let mut result = ParseResult::new(crate::Language::Vhdl);
    result.objs.push(HdlObject::Use(HdlUse {
        path: vec![HdlName::vhdl("ieee"), HdlName::vhdl("std_logic_1164")],
        wildcard: true,
        position: HdlPosition::default(),
    }));
    result.objs.push(HdlObject::Namespace(HdlNamespace {
        name: HdlName::vhdl("Util_Pkg"),
        declaration_only: true,
        body: vec![],
        doc: None,
        position: HdlPosition::default(),
    }));
    assert!(matches!(result.find("util_pkg"), Some(HdlObject::Namespace(_))));
    assert!(result.find("ieee").is_none());
}

#[test]
fn test_expr_helpers() {
    let e = HdlExpr::binary(
        HdlOpType::Add,
        HdlExpr::id(HdlName::vhdl("a")),
        HdlExpr::Int(HdlValueInt::decimal(1)),
    );
    assert_eq!(e.op_type(), Some(HdlOpType::Add));
    assert!(HdlOpType::Add.is_infix());
    assert!(HdlOpType::Neg.is_unary());
    assert!(!HdlOpType::Index.is_infix());
    assert_eq!(
        e.as_op().and_then(|op| op.ops[0].as_id()).map(|n| n.as_str()),
        Some("a")
    );
}
