use crate::parser::errors::ErrorCode;
use crate::parser::{SyntaxKind, SyntaxNode, parse_vhdl};

fn parse_ok(input: &str) -> SyntaxNode {
    match parse_vhdl(input) {
        Ok(parse) => parse.syntax(),
        Err(err) => panic!("unexpected error: {}", err.format()),
    }
}

fn find(root: &SyntaxNode, kind: SyntaxKind) -> SyntaxNode {
    root.descendants()
        .find(|n| n.kind() == kind)
        .unwrap_or_else(|| panic!("no {kind:?} node in tree"))
}

fn count(root: &SyntaxNode, kind: SyntaxKind) -> usize {
    root.descendants().filter(|n| n.kind() == kind).count()
}

#[test]
fn test_context_items_and_package() {
    let root = parse_ok(
        "library ieee;\nuse ieee.std_logic_1164.all;\n\
         package constants_pkg is\n  constant WIDTH : integer := 8;\nend package;\n",
    );
    let kinds: Vec<_> = root.children().map(|n| n.kind()).collect();
    assert_eq!(
        kinds,
        vec![
            SyntaxKind::LIBRARY_CLAUSE,
            SyntaxKind::USE_CLAUSE,
            SyntaxKind::PACKAGE_DECL
        ]
    );
    assert_eq!(count(&root, SyntaxKind::CONSTANT_DECL), 1);
}

#[test]
fn test_use_clause_selected_name_nesting() {
    let root = parse_ok("use ieee.numeric_std.all;");
    let use_clause = find(&root, SyntaxKind::USE_CLAUSE);
    let outer = use_clause.first_child().unwrap();
    assert_eq!(outer.kind(), SyntaxKind::SELECTED_NAME);
    assert_eq!(outer.first_child().unwrap().kind(), SyntaxKind::SELECTED_NAME);
}

#[test]
fn test_entity_with_generics_and_ports() {
    let root = parse_ok(
        "entity counter is\n\
           generic (N : natural := 8);\n\
           port (clk, rst : in std_logic; q : out std_logic_vector(N-1 downto 0));\n\
         end entity counter;",
    );
    let entity = find(&root, SyntaxKind::ENTITY_DECL);
    assert_eq!(count(&entity, SyntaxKind::GENERIC_CLAUSE), 1);
    assert_eq!(count(&entity, SyntaxKind::PORT_CLAUSE), 1);
    assert_eq!(count(&entity, SyntaxKind::INTERFACE_DECL), 3);
    assert_eq!(count(&entity, SyntaxKind::RANGE_EXPR), 1);
}

#[test]
fn test_architecture_with_process() {
    let root = parse_ok(
        "architecture rtl of counter is\n\
           signal cnt : unsigned(7 downto 0);\n\
         begin\n\
           tick: process (clk)\n\
           begin\n\
             if rising_edge(clk) then\n\
               cnt <= cnt + 1;\n\
             end if;\n\
           end process tick;\n\
           q <= std_logic_vector(cnt);\n\
         end architecture;",
    );
    let arch = find(&root, SyntaxKind::ARCHITECTURE_BODY);
    assert_eq!(count(&arch, SyntaxKind::SIGNAL_DECL), 1);
    let process = find(&arch, SyntaxKind::PROCESS_STMT);
    assert_eq!(process.first_child().unwrap().kind(), SyntaxKind::LABEL);
    assert_eq!(count(&process, SyntaxKind::SENSITIVITY_LIST), 1);
    assert_eq!(count(&process, SyntaxKind::IF_STMT), 1);
    assert_eq!(count(&arch, SyntaxKind::SIGNAL_ASSIGN), 2);
}

#[test]
fn test_type_declarations() {
    let root = parse_ok(
        "package types is\n\
           type state_t is (IDLE, RUN, 'X');\n\
           type small is range 0 to 15;\n\
           type mem_t is array (0 to 15) of std_logic_vector(7 downto 0);\n\
           type pair is record a, b : integer; end record pair;\n\
           type dur is range 0 to 1000 units fs; ps = 1000 fs; end units;\n\
           subtype byte is std_logic_vector(7 downto 0);\n\
         end package;",
    );
    assert_eq!(count(&root, SyntaxKind::ENUM_DEF), 1);
    assert_eq!(count(&root, SyntaxKind::RANGE_DEF), 1);
    assert_eq!(count(&root, SyntaxKind::ARRAY_DEF), 1);
    assert_eq!(count(&root, SyntaxKind::RECORD_ELEMENT), 1);
    assert_eq!(count(&root, SyntaxKind::PHYSICAL_DEF), 1);
    assert_eq!(count(&root, SyntaxKind::UNIT_DECL), 1);
    assert_eq!(count(&root, SyntaxKind::SUBTYPE_DECL), 1);
}

#[test]
fn test_component_and_subprograms() {
    let root = parse_ok(
        "package p is\n\
           component adder is\n\
             port (a, b : in integer; s : out integer);\n\
           end component;\n\
           function max(a, b : integer) return integer;\n\
         end package;\n\
         package body p is\n\
           function max(a, b : integer) return integer is\n\
           begin\n\
             if a > b then return a; else return b; end if;\n\
           end function max;\n\
         end package body p;",
    );
    assert_eq!(count(&root, SyntaxKind::COMPONENT_DECL), 1);
    assert_eq!(count(&root, SyntaxKind::SUBPROGRAM_DECL), 2);
    assert_eq!(count(&root, SyntaxKind::RETURN_STMT), 2);
    assert_eq!(count(&root, SyntaxKind::PACKAGE_BODY), 1);
}

#[test]
fn test_selected_and_conditional_assignments() {
    let root = parse_ok(
        "architecture a of e is begin\n\
           with sel select y <= a when \"00\", b when \"01\" | \"10\", c when others;\n\
           z <= a when en = '1' else 'Z';\n\
         end;",
    );
    let selected = find(&root, SyntaxKind::SELECTED_ASSIGN);
    assert_eq!(count(&selected, SyntaxKind::SELECTED_WAVEFORM), 3);
    let conditional = find(&root, SyntaxKind::SIGNAL_ASSIGN);
    assert_eq!(count(&conditional, SyntaxKind::WAVEFORM), 2);
}

#[test]
fn test_component_instantiation() {
    let root = parse_ok(
        "architecture a of e is begin\n\
           u0: adder generic map (W => 8) port map (a => x, b => y, s => open);\n\
           u1: entity work.adder port map (x, y, s);\n\
         end;",
    );
    assert_eq!(count(&root, SyntaxKind::COMPONENT_INST), 2);
    assert_eq!(count(&root, SyntaxKind::GENERIC_MAP), 1);
    assert_eq!(count(&root, SyntaxKind::PORT_MAP), 2);
    assert_eq!(count(&root, SyntaxKind::CHOICES), 4);
}

#[test]
fn test_generate_statements() {
    let root = parse_ok(
        "architecture a of e is begin\n\
           g: for i in 0 to 3 generate\n\
             y(i) <= x(i);\n\
           end generate g;\n\
           h: if W > 8 generate\n\
             signal t : bit;\n\
           begin\n\
             t <= '1';\n\
           else generate\n\
             z <= '0';\n\
           end generate;\n\
         end;",
    );
    assert_eq!(count(&root, SyntaxKind::FOR_GENERATE), 1);
    let if_gen = find(&root, SyntaxKind::IF_GENERATE);
    assert_eq!(count(&if_gen, SyntaxKind::DECL_LIST), 1);
    assert_eq!(count(&if_gen, SyntaxKind::ELSE_CLAUSE), 1);
}

#[test]
fn test_sequential_statements() {
    let root = parse_ok(
        "architecture a of e is begin\n\
           process\n\
             variable v : integer := 0;\n\
           begin\n\
             case s is\n\
               when 0 | 1 => v := 1;\n\
               when others => null;\n\
             end case;\n\
             for i in 0 to 7 loop next when i = 3; end loop;\n\
             while v < 10 loop v := v + 1; exit; end loop;\n\
             wait on clk until clk = '1' for 10 ns;\n\
             assert v = 10 report \"bad\" severity error;\n\
             report \"done\";\n\
             do_it(v);\n\
             wait;\n\
           end process;\n\
         end;",
    );
    assert_eq!(count(&root, SyntaxKind::CASE_ALT), 2);
    assert_eq!(count(&root, SyntaxKind::FOR_LOOP), 1);
    assert_eq!(count(&root, SyntaxKind::WHILE_LOOP), 1);
    assert_eq!(count(&root, SyntaxKind::NEXT_STMT), 1);
    assert_eq!(count(&root, SyntaxKind::EXIT_STMT), 1);
    assert_eq!(count(&root, SyntaxKind::WAIT_STMT), 2);
    assert_eq!(count(&root, SyntaxKind::PHYSICAL_LITERAL), 1);
    assert_eq!(count(&root, SyntaxKind::ASSERT_STMT), 1);
    assert_eq!(count(&root, SyntaxKind::REPORT_STMT), 1);
    assert_eq!(count(&root, SyntaxKind::CALL_STMT), 1);
    assert_eq!(count(&root, SyntaxKind::VARIABLE_ASSIGN), 2);
}

#[test]
fn test_expression_precedence() {
    let root = parse_ok("package p is constant c : integer := a + b * c ** 2; end;");
    let decl = find(&root, SyntaxKind::CONSTANT_DECL);
    let top = decl
        .children()
        .find(|n| n.kind() == SyntaxKind::BINARY_EXPR)
        .unwrap();
    let ops: Vec<_> = top
        .children_with_tokens()
        .filter_map(|e| e.into_token())
        .map(|t| t.kind())
        .filter(|k| !k.is_trivia())
        .collect();
    assert_eq!(ops, vec![SyntaxKind::PLUS]);
    assert_eq!(count(&top, SyntaxKind::BINARY_EXPR), 3);
}

#[test]
fn test_aggregate_and_paren() {
    let root = parse_ok(
        "package p is\n\
           constant z : word := (others => '0');\n\
           constant q : integer := (1 + 2) * 3;\n\
           constant r : pair := (1, 2);\n\
         end;",
    );
    assert_eq!(count(&root, SyntaxKind::AGGREGATE), 2);
    assert_eq!(count(&root, SyntaxKind::PAREN_EXPR), 1);
    assert_eq!(count(&root, SyntaxKind::ELEMENT), 3);
}

#[test]
fn test_attribute_and_qualified_names() {
    let root = parse_ok(
        "package p is\n\
           constant n : integer := v'length;\n\
           constant m : word := word'(others => '1');\n\
           attribute keep : boolean;\n\
           attribute keep of sig : signal is true;\n\
         end;",
    );
    assert_eq!(count(&root, SyntaxKind::ATTRIBUTE_NAME), 1);
    assert_eq!(count(&root, SyntaxKind::QUALIFIED_EXPR), 1);
    assert_eq!(count(&root, SyntaxKind::ATTRIBUTE_DECL), 1);
    assert_eq!(count(&root, SyntaxKind::ATTRIBUTE_SPEC), 1);
}

#[test]
fn test_mixed_logical_operators_rejected() {
    let err = parse_vhdl("package p is constant c : boolean := a and b or c; end;").unwrap_err();
    assert_eq!(err.code, ErrorCode::E0402);
}

#[test]
fn test_missing_semicolon() {
    let err = parse_vhdl("library ieee\nuse ieee.std_logic_1164.all;").unwrap_err();
    assert_eq!(err.code, ErrorCode::E0201);
}

#[test]
fn test_unmatched_end() {
    let err = parse_vhdl("end;").unwrap_err();
    assert_eq!(err.code, ErrorCode::E0204);
}

#[test]
fn test_wrong_closer_keyword() {
    let err = parse_vhdl("entity e is end architecture;").unwrap_err();
    assert_eq!(err.code, ErrorCode::E0204);
    assert_eq!(err.related.len(), 1);
}

#[test]
fn test_mismatched_closing_label() {
    let err = parse_vhdl("entity e is end entity f;").unwrap_err();
    assert_eq!(err.code, ErrorCode::E0205);
}

#[test]
fn test_closing_label_ignores_case() {
    parse_ok("ENTITY Counter IS END ENTITY counter;");
}

#[test]
fn test_unclosed_block_at_eof() {
    let err = parse_vhdl("architecture a of e is begin\n").unwrap_err();
    assert_eq!(err.code, ErrorCode::E0207);
    assert!(err.message.contains("architecture 'a'"));
}

#[test]
fn test_configuration_rejected() {
    let err = parse_vhdl("configuration c of e is for rtl end for; end;").unwrap_err();
    assert_eq!(err.code, ErrorCode::E0503);
}

#[test]
fn test_generate_requires_label() {
    let err = parse_vhdl("architecture a of e is begin for i in 0 to 1 generate end generate; end;")
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::E0602);
}

#[test]
fn test_positional_others_rejected() {
    let err = parse_vhdl("package p is constant z : word := (others); end;").unwrap_err();
    assert_eq!(err.code, ErrorCode::E0404);
}

fn nested_parens(depth: usize) -> String {
    format!(
        "architecture rtl of e is begin y <= {}a{}; end;",
        "(".repeat(depth),
        ")".repeat(depth)
    )
}

#[test]
fn test_deep_parentheses_rejected() {
    let err = parse_vhdl(&nested_parens(10_000)).unwrap_err();
    assert_eq!(err.code, ErrorCode::E0903);
    assert!(err.message.contains("in expression"), "{}", err.message);
}

#[test]
fn test_moderate_parentheses_accepted() {
    let root = parse_ok(&nested_parens(60));
    assert_eq!(count(&root, SyntaxKind::PAREN_EXPR), 60);
}

#[test]
fn test_deep_if_nesting_rejected() {
    let depth = 5_000;
    let source = format!(
        "architecture rtl of e is begin process begin {} y <= a; {} end process; end;",
        "if c then ".repeat(depth),
        "end if; ".repeat(depth)
    );
    let err = parse_vhdl(&source).unwrap_err();
    assert_eq!(err.code, ErrorCode::E0903);
}
