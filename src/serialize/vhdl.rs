//! Design units, declarations and statements as VHDL-2008 text.
//!
//! Verilog trees take the same path: a module prints as an entity plus an
//! architecture, `always` as a process, and constructs VHDL lacks are
//! rendered as their closest equivalent.

use super::expr::{choices, expr, list};
use super::printer::Printer;
use crate::builder::InterfaceRole;
use crate::hdl_ast::{
    HdlAttribute, HdlAttributeKind, HdlCaseAlt, HdlCaseKind, HdlCompInst, HdlDirection, HdlExpr,
    HdlFunctionDef, HdlGenerateScheme, HdlIdDef, HdlIdKind, HdlModuleDec, HdlModuleDef, HdlName,
    HdlNamespace, HdlObject, HdlOpType, HdlProcessKind, HdlStm, HdlTypeDef, HdlTypeSpec,
};

/// Architecture name for modules that have none
const DEFAULT_ARCHITECTURE: &str = "rtl";

fn labeled(label: Option<&HdlName>, text: &str) -> String {
    match label {
        Some(label) => format!("{label}: {text}"),
        None => text.to_string(),
    }
}

fn is_context_item(obj: &HdlObject) -> bool {
    matches!(obj, HdlObject::Library(_) | HdlObject::Use(_))
}

fn is_statement(obj: &HdlObject) -> bool {
    matches!(obj, HdlObject::Stm(_) | HdlObject::CompInst(_))
}

/// Declarations first, then statements, each in source order
fn split_region(objs: &[HdlObject]) -> (Vec<&HdlObject>, Vec<&HdlObject>) {
    objs.iter().partition(|obj| !is_statement(obj))
}

fn kind_keyword(kind: HdlIdKind) -> &'static str {
    match kind {
        HdlIdKind::Signal => "SIGNAL",
        HdlIdKind::Variable => "VARIABLE",
        HdlIdKind::SharedVariable => "SHARED VARIABLE",
        HdlIdKind::Constant => "CONSTANT",
        HdlIdKind::Alias => "ALIAS",
    }
}

fn mode_keyword(direction: HdlDirection) -> Option<&'static str> {
    match direction {
        HdlDirection::In => Some("IN"),
        HdlDirection::Out => Some("OUT"),
        HdlDirection::Inout => Some("INOUT"),
        HdlDirection::Buffer => Some("BUFFER"),
        HdlDirection::Linkage => Some("LINKAGE"),
        HdlDirection::Internal | HdlDirection::Unknown => None,
    }
}

/// One interface element. The class is only written when it differs from
/// what the position implies; an `IN` mode is implied for generics and
/// function parameters.
fn interface_decl(def: &HdlIdDef, role: InterfaceRole) -> String {
    let mut text = String::new();
    if def.kind != role.default_kind(def.direction) {
        text.push_str(kind_keyword(def.kind));
        text.push(' ');
    }
    text.push_str(def.name.as_str());
    text.push_str(" :");
    let show_mode = match role {
        InterfaceRole::Port | InterfaceRole::ProcedureParam => true,
        InterfaceRole::Generic | InterfaceRole::FunctionParam => def.direction != HdlDirection::In,
    };
    if let Some(mode) = mode_keyword(def.direction).filter(|_| show_mode) {
        text.push(' ');
        text.push_str(mode);
    }
    text.push(' ');
    text.push_str(&subtype_text(def));
    if let Some(value) = &def.value {
        text.push_str(" := ");
        text.push_str(&expr(value));
    }
    text
}

/// Untyped Verilog parameters read as integers and untyped nets as bits
fn subtype_text(def: &HdlIdDef) -> String {
    match (&def.type_, def.kind) {
        (Some(type_), _) => expr(type_),
        (None, HdlIdKind::Constant) => "integer".to_string(),
        (None, _) => "std_logic".to_string(),
    }
}

fn object_decl(def: &HdlIdDef) -> String {
    let subtype = match (&def.type_, def.kind) {
        (None, HdlIdKind::Alias) => String::new(),
        _ => format!(" : {}", subtype_text(def)),
    };
    match (def.kind, &def.value) {
        (HdlIdKind::Alias, Some(value)) => {
            format!("ALIAS {}{subtype} IS {};", def.name, expr(value))
        }
        (kind, Some(value)) => format!(
            "{} {}{subtype} := {};",
            kind_keyword(kind),
            def.name,
            expr(value)
        ),
        (kind, None) => format!("{} {}{subtype};", kind_keyword(kind), def.name),
    }
}

fn attribute(attr: &HdlAttribute) -> String {
    match &attr.kind {
        HdlAttributeKind::Declaration { type_ } => {
            format!("ATTRIBUTE {} : {};", attr.name, expr(type_))
        }
        HdlAttributeKind::Specification {
            targets,
            entity_class,
            value,
        } => format!(
            "ATTRIBUTE {} OF {} : {} IS {};",
            attr.name,
            list(targets),
            entity_class.as_str().to_ascii_uppercase(),
            expr(value)
        ),
    }
}

/// `dst <= value [AFTER delay]`
fn waveform(src: &HdlExpr, time_delay: Option<&HdlExpr>) -> String {
    match time_delay {
        Some(delay) => format!("{} AFTER {}", expr(src), expr(delay)),
        None => expr(src),
    }
}

/// Target and waveform of a body that is exactly one unlabeled signal
/// assignment
fn single_signal_assign(body: &[HdlStm]) -> Option<(&HdlExpr, String)> {
    match body {
        [
            HdlStm::Assign {
                dst,
                src,
                is_blocking: false,
                time_delay,
                label: None,
            },
        ] => Some((dst, waveform(src, time_delay.as_ref()))),
        _ => None,
    }
}

/// An if chain without `else` whose branches all drive one target is a
/// conditional signal assignment.
fn conditional_assign(
    cond: &HdlExpr,
    if_true: &[HdlStm],
    elifs: &[(HdlExpr, Vec<HdlStm>)],
) -> Option<String> {
    let (dst, value) = single_signal_assign(if_true)?;
    let mut text = format!("{} <= {value} WHEN {}", expr(dst), expr(cond));
    for (cond, body) in elifs {
        let (target, value) = single_signal_assign(body)?;
        if target != dst {
            return None;
        }
        text.push_str(&format!(" ELSE {value} WHEN {}", expr(cond)));
    }
    text.push(';');
    Some(text)
}

/// Arms of a case whose alternatives all drive one target, for a selected
/// signal assignment
fn selected_arms<'a>(
    cases: &'a [HdlCaseAlt],
    default: Option<&'a [HdlStm]>,
) -> Option<(&'a HdlExpr, Vec<String>)> {
    let mut target: Option<&HdlExpr> = None;
    let mut arms = Vec::new();
    let alternatives = cases
        .iter()
        .map(|alt| (Some(alt.choices.as_slice()), alt.body.as_slice()))
        .chain(default.map(|body| (None, body)));
    for (alt_choices, body) in alternatives {
        let (dst, value) = single_signal_assign(body)?;
        if target.is_some_and(|t| t != dst) {
            return None;
        }
        target = Some(dst);
        let when = alt_choices.map_or_else(|| "OTHERS".to_string(), choices);
        arms.push(format!("{value} WHEN {when}"));
    }
    Some((target?, arms))
}

impl Printer {
    fn doc(&mut self, doc: Option<&str>) {
        for line in doc.into_iter().flat_map(str::lines) {
            self.write_line(&format!("--{line}"));
        }
    }

    // ========================================================================
    // Design units
    // ========================================================================

    /// Top-level objects, a blank line between units. Consecutive context
    /// clauses stay together.
    pub fn design_file(&mut self, objs: &[HdlObject]) {
        let mut previous: Option<&HdlObject> = None;
        for obj in objs {
            if previous.is_some_and(|prev| !(is_context_item(prev) && is_context_item(obj))) {
                self.write_blank_line();
            }
            self.design_unit(obj);
            previous = Some(obj);
        }
    }

    pub fn design_unit(&mut self, obj: &HdlObject) {
        match obj {
            HdlObject::ModuleDec(dec) => self.entity(dec, None),
            other => self.declaration(other),
        }
    }

    fn entity(&mut self, dec: &HdlModuleDec, doc: Option<&str>) {
        self.doc(doc.or(dec.doc.as_deref()));
        self.write_line(&format!("ENTITY {} IS", dec.name));
        self.indented(|p| p.interface_clauses(dec));
        let (decls, stmts) = split_region(&dec.objs);
        self.indented(|p| p.declarations(&decls));
        if !stmts.is_empty() {
            self.write_line("BEGIN");
            self.indented(|p| p.concurrent_region(&stmts));
        }
        self.write_line("END ENTITY;");
    }

    fn component(&mut self, dec: &HdlModuleDec) {
        self.doc(dec.doc.as_deref());
        self.write_line(&format!("COMPONENT {} IS", dec.name));
        self.indented(|p| p.interface_clauses(dec));
        self.write_line("END COMPONENT;");
    }

    fn interface_clauses(&mut self, dec: &HdlModuleDec) {
        if !dec.params.is_empty() {
            self.interface_clause("GENERIC", &dec.params, InterfaceRole::Generic);
        }
        if !dec.ports.is_empty() {
            self.interface_clause("PORT", &dec.ports, InterfaceRole::Port);
        }
    }

    fn interface_clause(&mut self, keyword: &str, defs: &[HdlIdDef], role: InterfaceRole) {
        self.write_line(&format!("{keyword} ("));
        self.indented(|p| {
            for (i, def) in defs.iter().enumerate() {
                let separator = if i + 1 < defs.len() { ";" } else { "" };
                p.write_line(&format!("{}{separator}", interface_decl(def, role)));
            }
        });
        self.write_line(");");
    }

    /// A VHDL architecture, or a Verilog module split into entity and
    /// architecture
    fn module_def(&mut self, def: &HdlModuleDef) {
        match &def.dec {
            Some(dec) => {
                self.entity(dec, def.doc.as_deref());
                self.write_blank_line();
            }
            None => self.doc(def.doc.as_deref()),
        }
        let arch = def.name.as_ref().map_or(DEFAULT_ARCHITECTURE, HdlName::as_str);
        self.write_line(&format!("ARCHITECTURE {arch} OF {} IS", def.module_name));
        let (decls, stmts) = split_region(&def.objs);
        self.indented(|p| p.declarations(&decls));
        self.write_line("BEGIN");
        self.indented(|p| p.concurrent_region(&stmts));
        self.write_line("END ARCHITECTURE;");
    }

    fn package(&mut self, ns: &HdlNamespace) {
        self.doc(ns.doc.as_deref());
        let (header, footer) = if ns.declaration_only {
            (format!("PACKAGE {} IS", ns.name), "END PACKAGE;")
        } else {
            (format!("PACKAGE BODY {} IS", ns.name), "END PACKAGE BODY;")
        };
        self.write_line(&header);
        let decls: Vec<_> = ns.body.iter().collect();
        self.indented(|p| p.declarations(&decls));
        self.write_line(footer);
    }

    // ========================================================================
    // Declarations
    // ========================================================================

    fn declarations(&mut self, objs: &[&HdlObject]) {
        for obj in objs {
            self.declaration(obj);
        }
    }

    pub fn declaration(&mut self, obj: &HdlObject) {
        match obj {
            HdlObject::Library(lib) => self.write_line(&format!("LIBRARY {};", lib.name)),
            HdlObject::Use(clause) => {
                let mut path = clause
                    .path
                    .iter()
                    .map(HdlName::as_str)
                    .collect::<Vec<_>>()
                    .join(".");
                if clause.wildcard {
                    path.push_str(".ALL");
                }
                self.write_line(&format!("USE {path};"));
            }
            HdlObject::Namespace(ns) => self.package(ns),
            HdlObject::ModuleDec(dec) => self.component(dec),
            HdlObject::ModuleDef(def) => self.module_def(def),
            HdlObject::IdDef(def) => self.write_line(&object_decl(def)),
            HdlObject::TypeDef(ty) => self.type_decl(ty),
            HdlObject::FunctionDef(func) => self.subprogram(func),
            HdlObject::Attribute(attr) => self.write_line(&attribute(attr)),
            HdlObject::CompInst(inst) => self.instance(inst),
            HdlObject::Stm(stm) => self.concurrent(stm),
        }
    }

    fn type_decl(&mut self, ty: &HdlTypeDef) {
        self.doc(ty.doc.as_deref());
        let name = &ty.name;
        match &ty.spec {
            HdlTypeSpec::Enum(literals) => {
                self.write_line(&format!("TYPE {name} IS ({});", list(literals)));
            }
            HdlTypeSpec::Range(range) => {
                self.write_line(&format!("TYPE {name} IS RANGE {};", expr(range)));
            }
            HdlTypeSpec::Physical {
                range,
                base_unit,
                units,
            } => {
                self.write_line(&format!("TYPE {name} IS RANGE {}", expr(range)));
                self.indented(|p| {
                    p.write_line("UNITS");
                    p.indented(|p| {
                        p.write_line(&format!("{base_unit};"));
                        for (unit, value) in units {
                            p.write_line(&format!("{unit} = {};", expr(value)));
                        }
                    });
                    p.write_line("END UNITS;");
                });
            }
            HdlTypeSpec::Array { indexes, element } => {
                self.write_line(&format!(
                    "TYPE {name} IS ARRAY ({}) OF {};",
                    list(indexes),
                    expr(element)
                ));
            }
            HdlTypeSpec::Record(fields) => {
                self.write_line(&format!("TYPE {name} IS RECORD"));
                self.indented(|p| {
                    for field in fields {
                        p.write_line(&format!("{} : {};", field.name, expr(&field.type_)));
                    }
                });
                self.write_line("END RECORD;");
            }
            HdlTypeSpec::Access(target) => {
                self.write_line(&format!("TYPE {name} IS ACCESS {};", expr(target)));
            }
            HdlTypeSpec::File(element) => {
                self.write_line(&format!("TYPE {name} IS FILE OF {};", expr(element)));
            }
            HdlTypeSpec::Subtype(indication) => {
                self.write_line(&format!("SUBTYPE {name} IS {};", expr(indication)));
            }
            HdlTypeSpec::Incomplete => self.write_line(&format!("TYPE {name};")),
        }
    }

    fn subprogram(&mut self, func: &HdlFunctionDef) {
        self.doc(func.doc.as_deref());
        let designator = if func.is_operator {
            format!("\"{}\"", func.name)
        } else {
            func.name.to_string()
        };
        let (role, mut header, footer) = if func.is_procedure {
            (
                InterfaceRole::ProcedureParam,
                format!("PROCEDURE {designator}"),
                "END PROCEDURE;",
            )
        } else {
            let purity = if func.is_pure { "" } else { "IMPURE " };
            (
                InterfaceRole::FunctionParam,
                format!("{purity}FUNCTION {designator}"),
                "END FUNCTION;",
            )
        };
        if !func.params.is_empty() {
            let params: Vec<_> = func.params.iter().map(|p| interface_decl(p, role)).collect();
            header.push_str(&format!(" ({})", params.join("; ")));
        }
        if let Some(ret) = &func.return_type {
            header.push_str(&format!(" RETURN {}", expr(ret)));
        }
        if func.is_declaration_only {
            self.write_line(&format!("{header};"));
            return;
        }
        self.write_line(&format!("{header} IS"));
        let decls: Vec<_> = func.objs.iter().collect();
        self.indented(|p| p.declarations(&decls));
        self.write_line("BEGIN");
        self.indented(|p| p.sequential_region(&func.body));
        self.write_line(footer);
    }

    // ========================================================================
    // Concurrent statements
    // ========================================================================

    fn concurrent_region(&mut self, stmts: &[&HdlObject]) {
        for obj in stmts {
            self.declaration(obj);
        }
    }

    fn instance(&mut self, inst: &HdlCompInst) {
        let unit = match inst.module_name.op_type() {
            Some(HdlOpType::Dot) => format!("ENTITY {}", expr(&inst.module_name)),
            _ => expr(&inst.module_name),
        };
        let head = labeled(inst.name.as_ref(), &unit);
        if inst.param_map.is_empty() && inst.port_map.is_empty() {
            self.write_line(&format!("{head};"));
            return;
        }
        self.write_line(&head);
        self.indented(|p| {
            if !inst.param_map.is_empty() {
                let end = if inst.port_map.is_empty() { ";" } else { "" };
                p.write_line(&format!("GENERIC MAP ({}){end}", list(&inst.param_map)));
            }
            if !inst.port_map.is_empty() {
                p.write_line(&format!("PORT MAP ({});", list(&inst.port_map)));
            }
        });
    }

    pub fn concurrent(&mut self, stm: &HdlStm) {
        match stm {
            HdlStm::If {
                label,
                cond,
                if_true,
                elifs,
                if_false: None,
            } => match conditional_assign(cond, if_true, elifs) {
                Some(text) => self.write_line(&labeled(label.as_ref(), &text)),
                None => self.sequential(stm),
            },
            HdlStm::Process {
                label,
                kind,
                sensitivity,
                objs,
                body,
            } => {
                let mut header = labeled(label.as_ref(), "PROCESS");
                if let Some(signals) = sensitivity {
                    header.push_str(&format!(" ({})", list(signals)));
                }
                self.write_line(&header);
                let decls: Vec<_> = objs.iter().collect();
                self.indented(|p| p.declarations(&decls));
                self.write_line("BEGIN");
                self.indented(|p| {
                    p.sequential_region(body);
                    if *kind == HdlProcessKind::Initial {
                        p.write_line("WAIT;");
                    }
                });
                self.write_line("END PROCESS;");
            }
            HdlStm::Generate {
                label,
                scheme,
                objs,
                else_objs,
            } => self.generate(label.as_ref(), scheme, objs, else_objs),
            other => self.sequential(other),
        }
    }

    fn generate(
        &mut self,
        label: Option<&HdlName>,
        scheme: &HdlGenerateScheme,
        objs: &[HdlObject],
        else_objs: &[HdlObject],
    ) {
        let header = match scheme {
            HdlGenerateScheme::ForIn { var, range } => {
                format!("FOR {var} IN {} GENERATE", expr(range))
            }
            HdlGenerateScheme::For { init, cond, step } => format!(
                "FOR ({}; {}; {}) GENERATE",
                inline_statement(init),
                expr(cond),
                inline_statement(step)
            ),
            HdlGenerateScheme::If { cond } => format!("IF {} GENERATE", expr(cond)),
        };
        self.write_line(&labeled(label, &header));
        self.generate_body(objs);
        let mut rest = else_objs;
        while !rest.is_empty() {
            match rest {
                [
                    HdlObject::Stm(HdlStm::Generate {
                        label: None,
                        scheme: HdlGenerateScheme::If { cond },
                        objs,
                        else_objs,
                    }),
                ] => {
                    self.write_line(&format!("ELSIF {} GENERATE", expr(cond)));
                    self.generate_body(objs);
                    rest = else_objs;
                }
                _ => {
                    self.write_line("ELSE GENERATE");
                    self.generate_body(rest);
                    rest = &[];
                }
            }
        }
        self.write_line("END GENERATE;");
    }

    fn generate_body(&mut self, objs: &[HdlObject]) {
        let (decls, stmts) = split_region(objs);
        if !decls.is_empty() {
            self.indented(|p| p.declarations(&decls));
            self.write_line("BEGIN");
        }
        self.indented(|p| p.concurrent_region(&stmts));
    }

    // ========================================================================
    // Sequential statements
    // ========================================================================

    fn sequential_region(&mut self, stmts: &[HdlStm]) {
        for stm in stmts {
            self.sequential(stm);
        }
    }

    pub fn sequential(&mut self, stm: &HdlStm) {
        match stm {
            HdlStm::Assign {
                dst,
                src,
                is_blocking,
                time_delay,
                label,
            } => {
                let op = if *is_blocking { ":=" } else { "<=" };
                let text = format!("{} {op} {};", expr(dst), waveform(src, time_delay.as_ref()));
                self.write_line(&labeled(label.as_ref(), &text));
            }
            HdlStm::If {
                label,
                cond,
                if_true,
                elifs,
                if_false,
            } => {
                self.write_line(&labeled(label.as_ref(), &format!("IF {} THEN", expr(cond))));
                self.indented(|p| p.sequential_region(if_true));
                for (cond, body) in elifs {
                    self.write_line(&format!("ELSIF {} THEN", expr(cond)));
                    self.indented(|p| p.sequential_region(body));
                }
                if let Some(body) = if_false {
                    self.write_line("ELSE");
                    self.indented(|p| p.sequential_region(body));
                }
                self.write_line("END IF;");
            }
            HdlStm::Case {
                label,
                kind,
                switch_on,
                cases,
                default,
            } => self.case(label.as_ref(), *kind, switch_on, cases, default.as_deref()),
            HdlStm::ForIn {
                label,
                var,
                range,
                body,
            } => {
                let header = format!("FOR {var} IN {} LOOP", expr(range));
                self.loop_body(label.as_ref(), &header, body, None);
            }
            HdlStm::For {
                label,
                init,
                cond,
                step,
                body,
            } => {
                self.sequential(init);
                let header = format!("WHILE {} LOOP", expr(cond));
                self.loop_body(label.as_ref(), &header, body, Some(&**step));
            }
            HdlStm::While { label, cond, body } => {
                let header = match cond {
                    Some(cond) => format!("WHILE {} LOOP", expr(cond)),
                    None => "LOOP".to_string(),
                };
                self.loop_body(label.as_ref(), &header, body, None);
            }
            HdlStm::Repeat { count, body } => {
                let header = format!("FOR i IN 1 TO {} LOOP", expr(count));
                self.loop_body(None, &header, body, None);
            }
            HdlStm::Wait {
                sensitivity,
                condition,
                timeout,
            } => {
                let mut text = "WAIT".to_string();
                if !sensitivity.is_empty() {
                    text.push_str(&format!(" ON {}", list(sensitivity)));
                }
                if let Some(cond) = condition {
                    text.push_str(&format!(" UNTIL {}", expr(cond)));
                }
                if let Some(timeout) = timeout {
                    text.push_str(&format!(" FOR {}", expr(timeout)));
                }
                text.push(';');
                self.write_line(&text);
            }
            HdlStm::Return(value) => match value {
                Some(value) => self.write_line(&format!("RETURN {};", expr(value))),
                None => self.write_line("RETURN;"),
            },
            HdlStm::Break { label, cond } => self.loop_control("EXIT", label.as_ref(), cond.as_ref()),
            HdlStm::Continue { label, cond } => {
                self.loop_control("NEXT", label.as_ref(), cond.as_ref())
            }
            HdlStm::Nop => self.write_line("NULL;"),
            HdlStm::Assert {
                cond,
                report,
                severity,
            } => {
                let mut text = format!("ASSERT {}", expr(cond));
                if let Some(report) = report {
                    text.push_str(&format!(" REPORT {}", expr(report)));
                }
                if let Some(severity) = severity {
                    text.push_str(&format!(" SEVERITY {}", expr(severity)));
                }
                text.push(';');
                self.write_line(&text);
            }
            HdlStm::Report { report, severity } => {
                let mut text = format!("REPORT {}", expr(report));
                if let Some(severity) = severity {
                    text.push_str(&format!(" SEVERITY {}", expr(severity)));
                }
                text.push(';');
                self.write_line(&text);
            }
            HdlStm::Call(call) => self.write_line(&format!("{};", expr(call))),
            HdlStm::Block { label, objs, body } => {
                self.write_line(&labeled(label.as_ref(), "BLOCK"));
                let (decls, stmts) = split_region(objs);
                self.indented(|p| p.declarations(&decls));
                self.write_line("BEGIN");
                self.indented(|p| {
                    p.concurrent_region(&stmts);
                    p.sequential_region(body);
                });
                self.write_line("END BLOCK;");
            }
            HdlStm::Process { .. } | HdlStm::Generate { .. } => self.concurrent(stm),
        }
    }

    fn case(
        &mut self,
        label: Option<&HdlName>,
        kind: HdlCaseKind,
        switch_on: &HdlExpr,
        cases: &[HdlCaseAlt],
        default: Option<&[HdlStm]>,
    ) {
        if kind == HdlCaseKind::Select {
            if let Some((dst, arms)) = selected_arms(cases, default) {
                let header = format!("WITH {} SELECT {} <=", expr(switch_on), expr(dst));
                self.write_line(&labeled(label, &header));
                self.indented(|p| {
                    for (i, arm) in arms.iter().enumerate() {
                        let end = if i + 1 < arms.len() { "," } else { ";" };
                        p.write_line(&format!("{arm}{end}"));
                    }
                });
                return;
            }
        }
        let keyword = match kind {
            HdlCaseKind::Casex | HdlCaseKind::Casez => "CASE?",
            HdlCaseKind::Case | HdlCaseKind::Select => "CASE",
        };
        self.write_line(&labeled(label, &format!("{keyword} {} IS", expr(switch_on))));
        self.indented(|p| {
            for alt in cases {
                p.write_line(&format!("WHEN {} =>", choices(&alt.choices)));
                p.indented(|p| p.sequential_region(&alt.body));
            }
            if let Some(body) = default {
                p.write_line("WHEN OTHERS =>");
                p.indented(|p| p.sequential_region(body));
            }
        });
        self.write_line("END CASE;");
    }

    fn loop_body(
        &mut self,
        label: Option<&HdlName>,
        header: &str,
        body: &[HdlStm],
        step: Option<&HdlStm>,
    ) {
        self.write_line(&labeled(label, header));
        self.indented(|p| {
            p.sequential_region(body);
            if let Some(step) = step {
                p.sequential(step);
            }
        });
        self.write_line("END LOOP;");
    }

    fn loop_control(&mut self, keyword: &str, label: Option<&HdlName>, cond: Option<&HdlExpr>) {
        let mut text = keyword.to_string();
        if let Some(label) = label {
            text.push_str(&format!(" {label}"));
        }
        if let Some(cond) = cond {
            text.push_str(&format!(" WHEN {}", expr(cond)));
        }
        text.push(';');
        self.write_line(&text);
    }
}

/// A loop header statement on one line, without its `;`
fn inline_statement(stm: &HdlStm) -> String {
    let mut printer = Printer::new();
    printer.sequential(stm);
    printer
        .finish()
        .trim_end()
        .trim_end_matches(';')
        .to_string()
}
