//! End-to-end behaviour of `parse` on whole design files.

#[path = "helpers/mod.rs"]
mod helpers;

use hdlconv::{
    HdlDirection, HdlExpr, HdlIdKind, HdlName, HdlObject, HdlOpType, HdlStm, HdlTypeSpec,
    HdlValueInt, Language,
};
use helpers::fixtures::parse_fixture;
use helpers::tree_assertions::{module_decs, namespace_at, object_at, top_level_names};

fn vhdl(source: &str) -> hdlconv::ParseResult {
    hdlconv::parse(source, Language::Vhdl).unwrap_or_else(|e| panic!("{e}"))
}

// ============================================================================
// Ordering
// ============================================================================

#[test]
fn test_objects_follow_source_order() {
    let result = vhdl("library ieee;\nuse ieee.std_logic_1164.all;\npackage p is\nend package;\n");
    assert_eq!(result.language, Language::Vhdl);
    assert_eq!(result.objs.len(), 3);
    assert!(matches!(object_at(&result, 0), HdlObject::Library(lib) if lib.name == "ieee"));
    let HdlObject::Use(clause) = object_at(&result, 1) else {
        panic!("expected a use clause second");
    };
    assert_eq!(clause.path, vec![HdlName::vhdl("ieee"), HdlName::vhdl("std_logic_1164")]);
    assert!(clause.wildcard);
    let ns = namespace_at(&result, 2);
    assert_eq!(ns.name, "p");
    assert!(ns.body.is_empty());
}

#[test]
fn test_constants_package() {
    let result = vhdl(
        "library ieee; package constants_pkg is constant WIDTH: integer := 8; end package;",
    );
    assert!(matches!(object_at(&result, 0), HdlObject::Library(lib) if lib.name == "ieee"));
    let Some(HdlObject::Namespace(ns)) = result.objs.last() else {
        panic!("expected the package last");
    };
    assert_eq!(ns.name, "constants_pkg");
    assert!(ns.declaration_only);
    let [HdlObject::IdDef(width)] = ns.body.as_slice() else {
        panic!("expected one constant, got {:?}", ns.body);
    };
    assert_eq!(width.name, "WIDTH");
    assert_eq!(width.kind, HdlIdKind::Constant);
    assert_eq!(width.type_, Some(HdlExpr::Id(HdlName::vhdl("integer"))));
    assert_eq!(width.value, Some(HdlExpr::Int(HdlValueInt::decimal(8))));
}

#[test]
fn test_library_clause_with_several_names() {
    let result = vhdl("library a, b;\n");
    assert_eq!(top_level_names(&result), vec!["a", "b"]);
}

#[test]
fn test_package_after_four_context_clauses() {
    let result = parse_fixture("vhdl/package_constants.vhd");
    assert_eq!(result.objs.len(), 5);
    let ns = namespace_at(&result, 4);
    assert_eq!(ns.name, "constants_pkg");

    let constants: Vec<_> = ns
        .body
        .iter()
        .map(|obj| match obj {
            HdlObject::IdDef(def) => (def.name.as_str(), def.kind),
            other => panic!("expected constants only, found {other:?}"),
        })
        .collect();
    assert_eq!(
        constants,
        vec![
            ("WIDTH", HdlIdKind::Constant),
            ("DEPTH", HdlIdKind::Constant),
            ("RESET_VALUE", HdlIdKind::Constant),
            ("CLK_PERIOD", HdlIdKind::Constant),
        ]
    );
    let HdlObject::IdDef(period) = &ns.body[3] else {
        unreachable!()
    };
    assert_eq!(
        period.value,
        Some(HdlExpr::Physical {
            value: Box::new(HdlExpr::Int(HdlValueInt::decimal(10))),
            unit: HdlName::vhdl("ns"),
        })
    );
}

#[test]
fn test_components_package() {
    let result = parse_fixture("vhdl/package_component.vhd");
    let ns = namespace_at(&result, 4);
    assert_eq!(ns.name, "components_pkg");

    let components = module_decs(&ns.body);
    assert_eq!(components.len(), 2);
    let ram = components[0];
    assert_eq!(ram.name, "ram");
    assert_eq!(ram.params.len(), 2);
    assert_eq!(ram.params[1].value, Some(HdlExpr::Id(HdlName::vhdl("WIDTH"))));
    let directions: Vec<_> = ram.ports.iter().map(|p| p.direction).collect();
    assert_eq!(
        directions,
        vec![
            HdlDirection::In,
            HdlDirection::In,
            HdlDirection::In,
            HdlDirection::In,
            HdlDirection::Out,
        ]
    );
    let mux = components[1];
    assert_eq!(mux.name, "mux");
    assert!(mux.params.is_empty());
    let names: Vec<_> = mux.ports.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["a", "b", "c", "d", "sel", "y"]);
}

#[test]
fn test_package_without_context_clauses() {
    let result = parse_fixture("vhdl/package_array_const.vhd");
    assert_eq!(result.objs.len(), 2);

    let decl = namespace_at(&result, 0);
    assert_eq!(decl.name, "array_const_pkg");
    assert_eq!(decl.doc.as_deref(), Some(" Lookup tables shared by the test benches\n"));
    assert_eq!(decl.body.len(), 4);
    let HdlObject::TypeDef(array) = &decl.body[0] else {
        panic!("expected the array type first");
    };
    let HdlTypeSpec::Array { indexes, element } = &array.spec else {
        panic!("expected an array type, found {:?}", array.spec);
    };
    assert_eq!(indexes.len(), 1);
    assert_eq!(element, &HdlExpr::Id(HdlName::vhdl("integer")));
    let HdlObject::IdDef(primes) = &decl.body[1] else {
        panic!("expected a constant");
    };
    assert!(matches!(&primes.value, Some(HdlExpr::Aggregate(items)) if items.len() == 5));
    let HdlObject::FunctionDef(lookup) = &decl.body[3] else {
        panic!("expected a function declaration");
    };
    assert!(lookup.is_declaration_only);
    assert_eq!(lookup.params.len(), 2);

    let body = namespace_at(&result, 1);
    assert!(!body.declaration_only);
    let [HdlObject::FunctionDef(lookup)] = body.body.as_slice() else {
        panic!("expected the function body");
    };
    assert!(!lookup.is_declaration_only);
    assert!(lookup.is_pure);
    assert!(matches!(lookup.body[0], HdlStm::If { .. }));
    assert!(matches!(lookup.body[1], HdlStm::Return(Some(_))));
}

// ============================================================================
// Design units
// ============================================================================

#[test]
fn test_ram_design() {
    let result = parse_fixture("vhdl/ram.vhd");
    assert!(matches!(object_at(&result, 0), HdlObject::Library(lib) if lib.name == "ieee"));
    assert_eq!(top_level_names(&result), vec!["ieee", "-", "-", "ram", "rtl"]);

    let HdlObject::ModuleDec(entity) = object_at(&result, 3) else {
        panic!("expected the entity");
    };
    assert_eq!(entity.doc.as_deref(), Some(" Single-port synchronous RAM\n"));
    assert_eq!(entity.params.len(), 2);
    assert_eq!(entity.ports.len(), 5);
    let start = entity.position.span().expect("position").start;
    assert_eq!(start.line, 5);

    let HdlObject::ModuleDef(arch) = object_at(&result, 4) else {
        panic!("expected the architecture");
    };
    assert_eq!(arch.module_name, "ram");
    assert_eq!(arch.dec, None);
    let Some(HdlObject::Stm(HdlStm::Process { label, sensitivity, body, .. })) = arch.objs.last()
    else {
        panic!("expected a process last");
    };
    assert_eq!(label.as_ref().map(HdlName::as_str), Some("write_port"));
    assert_eq!(sensitivity, &Some(vec![HdlExpr::Id(HdlName::vhdl("clk"))]));
    assert_eq!(body.len(), 1);
}

#[test]
fn test_structural_adder() {
    let result = parse_fixture("vhdl/fourbit_adder.vhd");
    assert_eq!(
        top_level_names(&result),
        vec!["ieee", "-", "full_adder", "rtl", "ieee", "-", "fourbit_adder", "structural"]
    );
    let HdlObject::ModuleDef(arch) = object_at(&result, 7) else {
        panic!("expected the structural architecture");
    };
    let instances: Vec<_> = arch
        .objs
        .iter()
        .filter_map(|obj| match obj {
            HdlObject::CompInst(inst) => Some(inst),
            _ => None,
        })
        .collect();
    let [last] = instances.as_slice() else {
        panic!("expected one direct instance");
    };
    assert_eq!(last.name.as_ref().map(HdlName::as_str), Some("last"));
    assert_eq!(last.module_name.op_type(), Some(HdlOpType::Dot));
    assert_eq!(last.port_map.len(), 5);
    assert_eq!(last.port_map[3], HdlExpr::Open);

    let generate = arch
        .objs
        .iter()
        .find_map(|obj| match obj {
            HdlObject::Stm(stm @ HdlStm::Generate { .. }) => Some(stm),
            _ => None,
        })
        .expect("generate statement");
    let HdlStm::Generate { label, objs, .. } = generate else {
        unreachable!()
    };
    assert_eq!(label.as_ref().map(HdlName::as_str), Some("stages"));
    let [HdlObject::CompInst(fa)] = objs.as_slice() else {
        panic!("expected one instance per iteration");
    };
    assert_eq!(fa.module_name, HdlExpr::Id(HdlName::vhdl("full_adder")));
    assert_eq!(fa.port_map.len(), 5);
    assert!(fa.port_map.iter().all(|m| m.op_type() == Some(HdlOpType::MapAssociation)));
}

#[test]
fn test_vhdl_names_fold_case() {
    let result = vhdl("ENTITY Top_Level IS END ENTITY;\nARCHITECTURE RTL OF top_level IS BEGIN END;\n");
    let HdlObject::ModuleDec(entity) = object_at(&result, 0) else {
        panic!("expected an entity");
    };
    assert_eq!(entity.name, "top_level");
    assert_eq!(entity.name.as_str(), "Top_Level");
    let HdlObject::ModuleDef(arch) = object_at(&result, 1) else {
        panic!("expected an architecture");
    };
    assert_eq!(arch.module_name, entity.name);
    assert_eq!(arch.name, Some(HdlName::vhdl("rtl")));
}

#[test]
fn test_verilog_names_keep_case() {
    let result = hdlconv::parse("module Top;\nendmodule\n", Language::Verilog)
        .unwrap_or_else(|e| panic!("{e}"));
    let name = object_at(&result, 0).name().expect("module name");
    assert_eq!(*name, "Top");
    assert_ne!(*name, "top");
    assert!(name.is_case_sensitive());
}

#[test]
fn test_parsing_is_repeatable() {
    let first = parse_fixture("vhdl/fourbit_adder.vhd");
    let second = parse_fixture("vhdl/fourbit_adder.vhd");
    assert_eq!(first, second);
}

// ============================================================================
// Verilog
// ============================================================================

#[test]
fn test_verilog_counter() {
    let result = parse_fixture("verilog/counter.v");
    assert_eq!(result.language, Language::Verilog);
    let [HdlObject::ModuleDef(def)] = result.objs.as_slice() else {
        panic!("expected one module");
    };
    assert_eq!(def.doc.as_deref(), Some(" Loadable up-counter\n"));
    let dec = def.dec.as_ref().expect("module header");
    assert_eq!(dec.params.len(), 2);
    let ports: Vec<_> = dec.ports.iter().map(|p| (p.name.as_str(), p.direction)).collect();
    assert_eq!(
        ports,
        vec![
            ("clk", HdlDirection::In),
            ("rst_n", HdlDirection::In),
            ("load", HdlDirection::In),
            ("d", HdlDirection::In),
            ("q", HdlDirection::Out),
            ("wrap", HdlDirection::Out),
        ]
    );
    assert_eq!(def.objs.len(), 2);
    let HdlObject::Stm(HdlStm::Assign { src, is_blocking, .. }) = &def.objs[0] else {
        panic!("expected a continuous assignment");
    };
    assert!(is_blocking);
    assert_eq!(src.op_type(), Some(HdlOpType::AndReduce));
    let HdlObject::Stm(HdlStm::Process { sensitivity, body, .. }) = &def.objs[1] else {
        panic!("expected an always block");
    };
    assert_eq!(sensitivity.as_ref().map(Vec::len), Some(2));
    let [HdlStm::If { elifs, if_false, .. }] = body.as_slice() else {
        panic!("expected one if chain");
    };
    assert_eq!(elifs.len(), 1);
    assert!(if_false.is_some());
}

#[test]
fn test_verilog_gates_and_generate() {
    let result = parse_fixture("verilog/gates.v");
    let [HdlObject::ModuleDef(def)] = result.objs.as_slice() else {
        panic!("expected one module");
    };
    let dec = def.dec.as_ref().expect("module header");
    let ports: Vec<_> = dec
        .ports
        .iter()
        .map(|p| (p.name.as_str(), p.direction, p.kind))
        .collect();
    assert_eq!(
        ports,
        vec![
            ("a", HdlDirection::In, HdlIdKind::Signal),
            ("b", HdlDirection::In, HdlIdKind::Signal),
            ("y", HdlDirection::Out, HdlIdKind::Signal),
            ("z", HdlDirection::Out, HdlIdKind::Signal),
        ]
    );
    let gates: Vec<_> = def
        .objs
        .iter()
        .filter_map(|obj| match obj {
            HdlObject::CompInst(inst) => inst.name.as_ref().map(HdlName::as_str),
            _ => None,
        })
        .collect();
    assert_eq!(gates, vec!["g1", "g2", "g3"]);
    assert!(def.objs.iter().any(|obj| matches!(
        obj,
        HdlObject::Stm(HdlStm::Generate { label: Some(l), .. }) if *l == "bits"
    )));
}

#[test]
fn test_verilog_fsm() {
    let result = parse_fixture("verilog/fsm.v");
    let [HdlObject::ModuleDef(def)] = result.objs.as_slice() else {
        panic!("expected one module");
    };
    let locals: Vec<_> = def
        .objs
        .iter()
        .filter_map(|obj| match obj {
            HdlObject::IdDef(id) if id.kind == HdlIdKind::Constant => Some(id.name.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(locals, vec!["IDLE", "RUN", "DONE"]);

    let function = def
        .objs
        .iter()
        .find_map(|obj| match obj {
            HdlObject::FunctionDef(f) => Some(f),
            _ => None,
        })
        .expect("function");
    assert_eq!(function.name, "next_state");
    assert_eq!(function.params.len(), 2);
    let [HdlStm::Case { cases, default, .. }] = function.body.as_slice() else {
        panic!("expected a case statement, found {:?}", function.body);
    };
    assert_eq!(cases.len(), 2);
    assert!(default.is_some());

    let Some(HdlObject::Stm(HdlStm::Process { kind, sensitivity, body, .. })) = def.objs.last()
    else {
        panic!("expected the initial block last");
    };
    assert_eq!(*kind, hdlconv::HdlProcessKind::Initial);
    assert_eq!(*sensitivity, None);
    assert!(matches!(body.last(), Some(HdlStm::Call(_))));
}
