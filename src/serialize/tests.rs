use super::*;
use crate::hdl_ast::{HdlName, HdlOpType};
use crate::language::Language;

fn vhdl(source: &str) -> ParseResult {
    crate::parse(source, Language::Vhdl).unwrap_or_else(|e| panic!("{e}"))
}

fn verilog(source: &str) -> ParseResult {
    crate::parse(source, Language::Verilog).unwrap_or_else(|e| panic!("{e}"))
}

/// Covers every VHDL construct the serializer has a dedicated form for
const DESIGN: &str = r#"library ieee;
use ieee.std_logic_1164.all;
use ieee.numeric_std.all;

-- Shared declarations
package defs is
  constant WIDTH : integer := 8;
  type state_t is (IDLE, RUN, '0');
  type mem_t is array (0 to 15) of std_logic_vector(7 downto 0);
  type word_vec is array (natural range <>) of bit;
  type pair is record
    lo, hi : integer;
  end record;
  type time_t is range 0 to 1000
    units
      ps;
      ns = 1000 ps;
    end units;
  subtype byte is integer range 0 to 255;
  type node;
  type node_ptr is access node;
  shared variable hits : integer;
  alias msb : bit is word(7);
  attribute keep : boolean;
  attribute keep of hits : variable is true;
  function clog2(n : natural) return natural;
  component adder is
    generic (N : natural);
    port (a, b : in bit; s : out bit);
  end component;
end package;

package body defs is
  function clog2(n : natural) return natural is
    variable r : natural := 0;
  begin
    while 2 ** r < n loop
      r := r + 1;
    end loop;
    return r;
  end function;
  procedure tick(signal clk : out bit; count : inout integer) is
  begin
    null;
  end procedure;
end package body;

entity top is
  generic (N : integer := 4);
  port (clk, rst : in std_logic; sel : in std_logic_vector(1 downto 0);
        q : out std_logic_vector(N - 1 downto 0));
end entity;

architecture rtl of top is
  signal x, y : bit;
  signal count : unsigned(3 downto 0) := (others => '0');
begin
  reg: process (clk, rst)
    variable tmp : integer;
  begin
    if rst = '1' then
      count <= (others => '0');
    elsif rising_edge(clk) then
      case sel is
        when "00" => count <= count + 1;
        when "01" | "10" => count <= count - 1;
        when others => null;
      end case;
    end if;
  end process;
  waiter: process
  begin
    for i in 0 to 3 loop
      next when i = 1;
      exit;
    end loop;
    wait until clk = '1' for 10 ns;
    report "tick" severity note;
    wait;
  end process;
  y <= x when sel = "00" else not x;
  x <= '1' when rst = '1';
  with sel select q <= x"0" when "00", x"F" when others;
  u0: adder generic map (N => 8) port map (a => x, b => y, s => open);
  g: for i in 0 to 3 generate
    signal t : bit;
  begin
    t <= x;
  end generate;
  c: if N > 2 generate
    y <= x;
  elsif N = 1 generate
    y <= '0';
  else generate
    y <= '1';
  end generate;
  assert N > 0 report "bad width" severity error;
end architecture;
"#;

#[test]
fn test_canonical_entity_and_architecture() {
    let result = vhdl(
        "library ieee;\nuse ieee.std_logic_1164.all;\n\n-- Two-input gate\n\
         entity gate is\n  generic (n : integer := 4);\n  \
         port (a, b : in std_logic; y : out std_logic);\nend entity;\n\n\
         architecture rtl of gate is\n  signal t : std_logic;\nbegin\n  \
         t <= a and b;\n  y <= not t after 1 ns;\nend architecture;\n",
    );
    let expected = "\
LIBRARY ieee;
USE ieee.std_logic_1164.ALL;

-- Two-input gate
ENTITY gate IS
    GENERIC (
        n : integer := 4
    );
    PORT (
        a : IN std_logic;
        b : IN std_logic;
        y : OUT std_logic
    );
END ENTITY;

ARCHITECTURE rtl OF gate IS
    SIGNAL t : std_logic;
BEGIN
    t <= a AND b;
    y <= NOT t AFTER 1 ns;
END ARCHITECTURE;
";
    assert_eq!(serialize(&result), expected);
}

#[test]
fn test_round_trip_reproduces_tree() {
    let first = vhdl(DESIGN);
    let text = serialize(&first);
    let second = vhdl(&text);
    assert_eq!(first, second, "re-parsed text:\n{text}");
}

#[test]
fn test_output_is_a_fixed_point() {
    let text = serialize(&vhdl(DESIGN));
    assert_eq!(serialize(&vhdl(&text)), text);
}

#[test]
fn test_output_is_deterministic() {
    let result = vhdl(DESIGN);
    assert_eq!(serialize(&result), serialize(&result.clone()));
}

#[test]
fn test_generate_chains_and_selected_assignment() {
    let text = serialize(&vhdl(DESIGN));
    assert!(text.contains("    c: IF N > 2 GENERATE\n        y <= x;\n    ELSIF N = 1 GENERATE\n"));
    assert!(text.contains("    ELSE GENERATE\n        y <= '1';\n    END GENERATE;\n"));
    assert!(text.contains(
        "    WITH sel SELECT q <=\n        X\"0\" WHEN \"00\",\n        X\"F\" WHEN OTHERS;\n"
    ));
    assert!(text.contains("    y <= x WHEN sel = \"00\" ELSE (NOT x);\n"));
    assert!(text.contains("    x <= '1' WHEN rst = '1';\n"));
    assert!(text.contains("    u0: adder\n        GENERIC MAP (N => 8)\n"));
}

#[test]
fn test_physical_type_and_subprograms() {
    let text = serialize(&vhdl(DESIGN));
    assert!(text.contains(
        "    TYPE time_t IS RANGE 0 TO 1000\n        UNITS\n            ps;\n            \
         ns = 1000 ps;\n        END UNITS;\n"
    ));
    assert!(text.contains("    PROCEDURE tick (SIGNAL clk : OUT bit; count : INOUT integer) IS\n"));
    assert!(text.contains("        WHILE (2 ** r) < n LOOP\n"));
}

#[test]
fn test_single_nodes() {
    let result = vhdl(DESIGN);
    let Some(HdlObject::ModuleDef(arch)) = result.objs.last() else {
        panic!("expected the architecture last");
    };
    let HdlObject::Stm(stm) = arch.objs.last().expect("statements") else {
        panic!("expected a statement");
    };
    assert_eq!(
        serialize(stm),
        "ASSERT N > 0 REPORT \"bad width\" SEVERITY error;\n"
    );

    let expr = HdlExpr::binary(
        HdlOpType::Sub,
        HdlExpr::Id(HdlName::vhdl("a")),
        HdlExpr::binary(
            HdlOpType::Sub,
            HdlExpr::Id(HdlName::vhdl("b")),
            HdlExpr::Id(HdlName::vhdl("c")),
        ),
    );
    assert_eq!(serialize(&expr), "a - (b - c)");
}

#[test]
fn test_verilog_prints_as_vhdl() {
    let text = serialize(&verilog(
        "module counter #(parameter W = 4) (input clk, output reg [W-1:0] q);\n\
         always @(posedge clk) q <= q + 1;\nendmodule\n",
    ));
    assert!(text.contains("ENTITY counter IS\n"), "{text}");
    assert!(text.contains("\nARCHITECTURE rtl OF counter IS\n"), "{text}");
    assert!(text.contains("PROCESS (rising_edge(clk))\n"), "{text}");
    assert!(text.contains("q <= q + 1;\n"), "{text}");
}

#[test]
fn test_verilog_loops_and_initial() {
    let text = serialize(&verilog(
        "module t;\n  integer i;\n  reg [3:0] r;\n  initial begin\n    \
         for (i = 0; i < 4; i = i + 1) r[i] = 1'b0;\n  end\nendmodule\n",
    ));
    assert!(text.contains("i := 0;\n"), "{text}");
    assert!(text.contains("WHILE i < 4 LOOP\n"), "{text}");
    assert!(text.contains("r(i) := B\"0\";\n"), "{text}");
    assert!(text.contains("i := i + 1;\n"), "{text}");
    assert!(text.contains("WAIT;\n"), "{text}");
}

#[cfg(feature = "json")]
#[test]
fn test_json_dump() {
    let json = to_json(&vhdl("entity e is end;\n")).expect("serializable");
    assert!(json.contains("\"language\": \"Vhdl\""), "{json}");
    assert!(json.contains("\"ModuleDec\""), "{json}");
}
