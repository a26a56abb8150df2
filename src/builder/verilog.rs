//! Verilog lowering
//!
//! A module becomes one [`HdlModuleDef`] whose `dec` holds the header.
//! Non-ANSI port lists are completed from the declarations in the module
//! body, so the result looks the same for both header styles.

use indexmap::IndexMap;
use tracing::trace;

use super::literal;
use super::{BuildContext, BuildResult, missing, operand, operands, unexpected};
use crate::hdl_ast::{
    HdlCaseAlt, HdlCaseKind, HdlCompInst, HdlDirection, HdlExpr, HdlFunctionDef,
    HdlGenerateScheme, HdlIdDef, HdlIdKind, HdlModuleDec, HdlModuleDef, HdlName, HdlObject,
    HdlOpType, HdlProcessKind, HdlStm,
};
use crate::parser::ast::{
    AstNode, DesignItem, ModuleDecl, PortList, SourceFile, child, children, has_token,
    ident_tokens, node_after, significant_tokens,
};
use crate::parser::{SyntaxKind, SyntaxNode, SyntaxToken};

fn name(token: &SyntaxToken) -> HdlName {
    HdlName::exact(token.text())
}

fn first_name(node: &SyntaxNode, what: &str) -> BuildResult<HdlName> {
    ident_tokens(node)
        .next()
        .map(|t| name(&t))
        .ok_or_else(|| missing(node, what))
}

fn is_variable_type(kind: SyntaxKind) -> bool {
    matches!(
        kind,
        SyntaxKind::REG_KW | SyntaxKind::INTEGER_KW | SyntaxKind::REAL_KW | SyntaxKind::TIME_KW
    )
}

/// `integer`, `real` and `time` name a type of their own
fn is_builtin_type(kind: SyntaxKind) -> bool {
    matches!(
        kind,
        SyntaxKind::INTEGER_KW | SyntaxKind::REAL_KW | SyntaxKind::TIME_KW
    )
}

/// Untyped, unsigned and scalar
fn is_default_type(type_: &Option<HdlExpr>) -> bool {
    matches!(
        type_,
        None | Some(HdlExpr::TypeBits {
            range: None,
            signed: false
        })
    )
}

pub(super) fn source_text(ctx: &BuildContext, root: &SyntaxNode) -> BuildResult<Vec<HdlObject>> {
    let file =
        SourceFile::cast(root.clone()).ok_or_else(|| unexpected(root, "expected a source file"))?;
    let mut objs = Vec::new();
    for item in file.items() {
        match item {
            DesignItem::Module(module) => objs.push(HdlObject::ModuleDef(module_decl(ctx, &module)?)),
            other => {
                return Err(unexpected(other.syntax(), "VHDL design unit in a Verilog tree"));
            }
        }
    }
    Ok(objs)
}

// ============================================================================
// Modules and declarations
// ============================================================================

/// Declarations collected while walking a module or generate body
struct Scope {
    /// Module ports in header order; `None` inside generate bodies
    ports: Option<IndexMap<HdlName, HdlIdDef>>,
    params: Vec<HdlIdDef>,
    objs: Vec<HdlObject>,
}

impl Scope {
    fn with_ports() -> Self {
        Self {
            ports: Some(IndexMap::new()),
            params: Vec::new(),
            objs: Vec::new(),
        }
    }

    fn nested() -> Self {
        Self {
            ports: None,
            params: Vec::new(),
            objs: Vec::new(),
        }
    }

    /// Complete a port from a body declaration; hands the declaration back
    /// when it is not a port.
    fn merge_port(&mut self, def: HdlIdDef, is_direction: bool) -> Option<HdlIdDef> {
        let Some(ports) = self.ports.as_mut() else {
            return Some(def);
        };
        match ports.get_mut(&def.name) {
            Some(port) => {
                if is_direction {
                    port.direction = def.direction;
                }
                if def.kind == HdlIdKind::Variable {
                    port.kind = HdlIdKind::Variable;
                }
                if is_default_type(&port.type_) {
                    port.type_ = def.type_;
                }
                if def.value.is_some() {
                    port.value = def.value;
                }
                None
            }
            None if is_direction => {
                ports.insert(def.name.clone(), def);
                None
            }
            None => Some(def),
        }
    }
}

fn module_decl(ctx: &BuildContext, module: &ModuleDecl) -> BuildResult<HdlModuleDef> {
    let node = module.syntax();
    let module_name = name(&module.name().ok_or_else(|| missing(node, "module name"))?);
    trace!("[VERILOG_BUILD] module '{}'", module_name);

    let mut scope = Scope::with_ports();
    for decl in module.param_ports() {
        scope.params.extend(param_decl(ctx, &decl, HdlDirection::In)?);
    }
    if let Some(list) = module.port_list() {
        port_list(ctx, &list, &mut scope)?;
    }
    for item in module.items() {
        module_item(ctx, &item, &mut scope)?;
    }

    let position = ctx.position(node);
    let ports = scope.ports.unwrap_or_default().into_values().collect();
    Ok(HdlModuleDef {
        name: None,
        module_name: module_name.clone(),
        dec: Some(HdlModuleDec {
            name: module_name,
            params: scope.params,
            ports,
            objs: Vec::new(),
            doc: None,
            position,
        }),
        objs: scope.objs,
        doc: ctx.doc(node),
        position,
    })
}

fn port_list(ctx: &BuildContext, list: &PortList, scope: &mut Scope) -> BuildResult<()> {
    if list.is_ansi() {
        for decl in list.port_decls() {
            for def in port_decl(ctx, &decl)? {
                scope.merge_port(def, true);
            }
        }
        return Ok(());
    }
    let ports = scope.ports.get_or_insert_with(IndexMap::new);
    for token in list.names() {
        let mut def = HdlIdDef::new(name(&token), HdlIdKind::Signal, None);
        def.direction = HdlDirection::Unknown;
        def.position = ctx.token_position(&token);
        ports.insert(def.name.clone(), def);
    }
    Ok(())
}

fn module_item(ctx: &BuildContext, node: &SyntaxNode, scope: &mut Scope) -> BuildResult<()> {
    match node.kind() {
        SyntaxKind::PORT_DECL => {
            for def in port_decl(ctx, node)? {
                if let Some(def) = scope.merge_port(def, true) {
                    scope.objs.push(HdlObject::IdDef(def));
                }
            }
        }
        SyntaxKind::NET_DECL | SyntaxKind::REG_DECL => {
            for def in variable_decl(ctx, node)? {
                if let Some(def) = scope.merge_port(def, false) {
                    scope.objs.push(HdlObject::IdDef(def));
                }
            }
        }
        SyntaxKind::PARAM_DECL => {
            if has_token(node, SyntaxKind::LOCALPARAM_KW) || scope.ports.is_none() {
                let defs = param_decl(ctx, node, HdlDirection::Internal)?;
                scope.objs.extend(defs.into_iter().map(HdlObject::IdDef));
            } else {
                scope.params.extend(param_decl(ctx, node, HdlDirection::In)?);
            }
        }
        SyntaxKind::GENVAR_DECL => {
            let position = ctx.position(node);
            for token in ident_tokens(node) {
                let mut def = HdlIdDef::new(
                    name(&token),
                    HdlIdKind::Variable,
                    Some(HdlExpr::Id(HdlName::exact("genvar"))),
                );
                def.position = position;
                scope.objs.push(HdlObject::IdDef(def));
            }
        }
        SyntaxKind::CONT_ASSIGN => {
            let time_delay = child(node, SyntaxKind::DELAY_CONTROL)
                .map(|d| delay(&d))
                .transpose()?;
            for assignment in children(node, SyntaxKind::ASSIGNMENT) {
                scope.objs.push(HdlObject::Stm(HdlStm::Assign {
                    dst: expr(&operand(&assignment, 0, "assignment target")?)?,
                    src: expr(&operand(&assignment, 1, "assigned value")?)?,
                    is_blocking: false,
                    time_delay: time_delay.clone(),
                    label: None,
                }));
            }
        }
        SyntaxKind::ALWAYS_BLOCK => scope.objs.push(HdlObject::Stm(always_block(ctx, node)?)),
        SyntaxKind::INITIAL_BLOCK => {
            scope.objs.push(HdlObject::Stm(HdlStm::Process {
                label: None,
                kind: HdlProcessKind::Initial,
                sensitivity: None,
                objs: Vec::new(),
                body: statements(ctx, &operand(node, 0, "statement")?)?,
            }));
        }
        SyntaxKind::MODULE_INST => {
            scope
                .objs
                .extend(module_inst(ctx, node)?.into_iter().map(HdlObject::CompInst));
        }
        SyntaxKind::FUNCTION_DECL | SyntaxKind::TASK_DECL => {
            scope.objs.push(HdlObject::FunctionDef(subroutine(ctx, node)?));
        }
        SyntaxKind::GENERATE_REGION => {
            for item in operands(node) {
                module_item(ctx, &item, scope)?;
            }
        }
        SyntaxKind::GEN_BLOCK => match ident_tokens(node).next() {
            Some(label) => scope.objs.push(HdlObject::Stm(HdlStm::Block {
                label: Some(name(&label)),
                objs: generate_items(ctx, node)?,
                body: Vec::new(),
            })),
            None => {
                for item in operands(node) {
                    module_item(ctx, &item, scope)?;
                }
            }
        },
        SyntaxKind::GEN_FOR | SyntaxKind::GEN_IF => {
            scope.objs.push(HdlObject::Stm(generate(ctx, node)?));
        }
        _ => return Err(unexpected(node, "unexpected module item")),
    }
    Ok(())
}

fn dimension(node: &SyntaxNode) -> BuildResult<HdlExpr> {
    Ok(HdlExpr::binary(
        HdlOpType::Downto,
        expr(&operand(node, 0, "msb")?)?,
        expr(&operand(node, 1, "lsb")?)?,
    ))
}

/// Packed type of a port, net or variable declaration
fn declared_type(node: &SyntaxNode) -> BuildResult<HdlExpr> {
    if let Some(builtin) = significant_tokens(node).find(|t| is_builtin_type(t.kind())) {
        return Ok(HdlExpr::Id(name(&builtin)));
    }
    let range = child(node, SyntaxKind::DIMENSION)
        .map(|d| dimension(&d).map(Box::new))
        .transpose()?;
    Ok(HdlExpr::TypeBits {
        range,
        signed: has_token(node, SyntaxKind::SIGNED_KW),
    })
}

/// One entry of a declaration list: name, unpacked dimensions folded into
/// the type, and the initial value.
fn decl_assign(
    ctx: &BuildContext,
    node: &SyntaxNode,
    type_: Option<HdlExpr>,
    kind: HdlIdKind,
    direction: HdlDirection,
) -> BuildResult<HdlIdDef> {
    let mut type_ = type_;
    for dim in children(node, SyntaxKind::DIMENSION) {
        let array_of = type_.take().unwrap_or(HdlExpr::TypeBits {
            range: None,
            signed: false,
        });
        type_ = Some(HdlExpr::binary(HdlOpType::Index, array_of, dimension(&dim)?));
    }
    let value = node_after(node, SyntaxKind::EQ)
        .map(|v| expr(&v))
        .transpose()?;
    Ok(HdlIdDef {
        name: first_name(node, "declared name")?,
        kind,
        type_,
        value,
        direction,
        position: ctx.position(node),
    })
}

fn port_decl(ctx: &BuildContext, node: &SyntaxNode) -> BuildResult<Vec<HdlIdDef>> {
    let direction = match significant_tokens(node).next().map(|t| t.kind()) {
        Some(SyntaxKind::INPUT_KW) => HdlDirection::In,
        Some(SyntaxKind::OUTPUT_KW) => HdlDirection::Out,
        Some(SyntaxKind::INOUT_KW) => HdlDirection::Inout,
        _ => return Err(missing(node, "port direction")),
    };
    let kind = if significant_tokens(node).any(|t| is_variable_type(t.kind())) {
        HdlIdKind::Variable
    } else {
        HdlIdKind::Signal
    };
    let type_ = declared_type(node)?;
    children(node, SyntaxKind::DECL_ASSIGN)
        .map(|d| decl_assign(ctx, &d, Some(type_.clone()), kind, direction))
        .collect()
}

/// `wire`, `reg`, `integer`, ... declarations
fn variable_decl(ctx: &BuildContext, node: &SyntaxNode) -> BuildResult<Vec<HdlIdDef>> {
    let kind = if node.kind() == SyntaxKind::REG_DECL {
        HdlIdKind::Variable
    } else {
        HdlIdKind::Signal
    };
    let type_ = declared_type(node)?;
    children(node, SyntaxKind::DECL_ASSIGN)
        .map(|d| decl_assign(ctx, &d, Some(type_.clone()), kind, HdlDirection::Internal))
        .collect()
}

fn param_decl(
    ctx: &BuildContext,
    node: &SyntaxNode,
    direction: HdlDirection,
) -> BuildResult<Vec<HdlIdDef>> {
    let signed = has_token(node, SyntaxKind::SIGNED_KW);
    let type_ = if let Some(var) = significant_tokens(node).find(|t| is_variable_type(t.kind())) {
        Some(HdlExpr::Id(name(&var)))
    } else if let Some(dim) = child(node, SyntaxKind::DIMENSION) {
        Some(HdlExpr::TypeBits {
            range: Some(Box::new(dimension(&dim)?)),
            signed,
        })
    } else if signed {
        Some(HdlExpr::TypeBits {
            range: None,
            signed: true,
        })
    } else {
        None
    };
    children(node, SyntaxKind::DECL_ASSIGN)
        .map(|d| decl_assign(ctx, &d, type_.clone(), HdlIdKind::Constant, direction))
        .collect()
}

fn local_declarations(ctx: &BuildContext, node: &SyntaxNode) -> BuildResult<Vec<HdlObject>> {
    let mut objs = Vec::new();
    for decl in node.children() {
        let defs = match decl.kind() {
            SyntaxKind::REG_DECL => variable_decl(ctx, &decl)?,
            SyntaxKind::PARAM_DECL => param_decl(ctx, &decl, HdlDirection::Internal)?,
            _ => continue,
        };
        objs.extend(defs.into_iter().map(HdlObject::IdDef));
    }
    Ok(objs)
}

// ============================================================================
// Processes, instances and subroutines
// ============================================================================

fn always_block(ctx: &BuildContext, node: &SyntaxNode) -> BuildResult<HdlStm> {
    let stmt = operand(node, 0, "statement")?;
    let event = (stmt.kind() == SyntaxKind::TIMING_STMT)
        .then(|| child(&stmt, SyntaxKind::EVENT_CONTROL))
        .flatten();
    let (sensitivity, body) = match event {
        Some(event) => (
            Some(events(&event)?),
            statements(ctx, &operand(&stmt, 1, "statement")?)?,
        ),
        None => (None, statements(ctx, &stmt)?),
    };
    Ok(HdlStm::Process {
        label: None,
        kind: HdlProcessKind::Process,
        sensitivity,
        objs: Vec::new(),
        body,
    })
}

/// Port or parameter connections: `.name(expr)` pairs or positional
/// expressions
fn connections(node: &SyntaxNode) -> BuildResult<Vec<HdlExpr>> {
    let mut out = Vec::new();
    for conn in operands(node).filter(|n| n.kind() != SyntaxKind::DIMENSION) {
        if conn.kind() == SyntaxKind::NAMED_CONNECTION {
            let formal = HdlExpr::Id(first_name(&conn, "port name")?);
            let actual = match operands(&conn).next() {
                Some(value) => expr(&value)?,
                None => HdlExpr::Open,
            };
            out.push(HdlExpr::binary(HdlOpType::MapAssociation, formal, actual));
        } else {
            out.push(expr(&conn)?);
        }
    }
    Ok(out)
}

fn module_inst(ctx: &BuildContext, node: &SyntaxNode) -> BuildResult<Vec<HdlCompInst>> {
    let unit = significant_tokens(node)
        .next()
        .ok_or_else(|| missing(node, "module name"))?;
    let module_name = HdlExpr::Id(name(&unit));
    let param_map = match child(node, SyntaxKind::PARAM_VALUES) {
        Some(values) => connections(&values)?,
        None => Vec::new(),
    };
    children(node, SyntaxKind::INSTANCE)
        .map(|inst| {
            Ok(HdlCompInst {
                name: ident_tokens(&inst).next().map(|t| name(&t)),
                module_name: module_name.clone(),
                param_map: param_map.clone(),
                port_map: connections(&inst)?,
                position: ctx.position(&inst),
            })
        })
        .collect()
}

fn subroutine(ctx: &BuildContext, node: &SyntaxNode) -> BuildResult<HdlFunctionDef> {
    let is_procedure = node.kind() == SyntaxKind::TASK_DECL;
    let func_name = first_name(node, "subroutine name")?;
    trace!("[VERILOG_BUILD] subroutine '{}'", func_name);

    let return_type = if is_procedure {
        None
    } else if let Some(builtin) = significant_tokens(node).find(|t| is_builtin_type(t.kind())) {
        Some(HdlExpr::Id(name(&builtin)))
    } else {
        let range = child(node, SyntaxKind::DIMENSION)
            .map(|d| dimension(&d).map(Box::new))
            .transpose()?;
        Some(HdlExpr::TypeBits {
            range,
            signed: has_token(node, SyntaxKind::SIGNED_KW),
        })
    };

    // Arguments are the header ports plus the direction declarations
    // in the body
    let mut args = Scope::with_ports();
    if let Some(list) = node.children().find_map(PortList::cast) {
        port_list(ctx, &list, &mut args)?;
    }
    let mut objs = Vec::new();
    for decl in node.children() {
        match decl.kind() {
            SyntaxKind::PORT_DECL => {
                for def in port_decl(ctx, &decl)? {
                    args.merge_port(def, true);
                }
            }
            SyntaxKind::REG_DECL => {
                for def in variable_decl(ctx, &decl)? {
                    if let Some(def) = args.merge_port(def, false) {
                        objs.push(HdlObject::IdDef(def));
                    }
                }
            }
            SyntaxKind::PARAM_DECL => objs.extend(
                param_decl(ctx, &decl, HdlDirection::Internal)?
                    .into_iter()
                    .map(HdlObject::IdDef),
            ),
            _ => {}
        }
    }

    let body = match child(node, SyntaxKind::STMT_LIST) {
        Some(list) => statement_list(ctx, &list)?,
        None => Vec::new(),
    };
    Ok(HdlFunctionDef {
        name: func_name,
        is_procedure,
        is_operator: false,
        is_pure: true,
        params: args.ports.unwrap_or_default().into_values().collect(),
        return_type,
        is_declaration_only: false,
        objs,
        body,
        doc: ctx.doc(node),
        position: ctx.position(node),
    })
}

// ============================================================================
// Generate constructs
// ============================================================================

/// Items of a generate body, lowered in their own scope
fn generate_items(ctx: &BuildContext, node: &SyntaxNode) -> BuildResult<Vec<HdlObject>> {
    let mut scope = Scope::nested();
    for item in operands(node) {
        module_item(ctx, &item, &mut scope)?;
    }
    Ok(scope.objs)
}

/// The item governed by a generate scheme; a `begin : name` block lends
/// its label to the construct.
fn generate_body(
    ctx: &BuildContext,
    item: &SyntaxNode,
) -> BuildResult<(Option<HdlName>, Vec<HdlObject>)> {
    if item.kind() == SyntaxKind::GEN_BLOCK {
        let label = ident_tokens(item).next().map(|t| name(&t));
        return Ok((label, generate_items(ctx, item)?));
    }
    let mut scope = Scope::nested();
    module_item(ctx, item, &mut scope)?;
    Ok((None, scope.objs))
}

fn generate(ctx: &BuildContext, node: &SyntaxNode) -> BuildResult<HdlStm> {
    if node.kind() == SyntaxKind::GEN_FOR {
        let (label, objs) = generate_body(ctx, &operand(node, 3, "generate item")?)?;
        return Ok(HdlStm::Generate {
            label,
            scheme: HdlGenerateScheme::For {
                init: Box::new(assignment(&operand(node, 0, "loop initialization")?)?),
                cond: expr(&operand(node, 1, "loop condition")?)?,
                step: Box::new(assignment(&operand(node, 2, "loop step")?)?),
            },
            objs,
            else_objs: Vec::new(),
        });
    }

    let (label, objs) = generate_body(ctx, &operand(node, 1, "generate item")?)?;
    let else_objs = match child(node, SyntaxKind::ELSE_CLAUSE) {
        Some(clause) => generate_body(ctx, &operand(&clause, 0, "generate item")?)?.1,
        None => Vec::new(),
    };
    Ok(HdlStm::Generate {
        label,
        scheme: HdlGenerateScheme::If {
            cond: expr(&operand(node, 0, "generate condition")?)?,
        },
        objs,
        else_objs,
    })
}

// ============================================================================
// Statements
// ============================================================================

fn statements(ctx: &BuildContext, node: &SyntaxNode) -> BuildResult<Vec<HdlStm>> {
    let mut out = Vec::new();
    statement(ctx, node, &mut out)?;
    Ok(out)
}

fn statement_list(ctx: &BuildContext, list: &SyntaxNode) -> BuildResult<Vec<HdlStm>> {
    let mut out = Vec::new();
    for stmt in operands(list) {
        statement(ctx, &stmt, &mut out)?;
    }
    Ok(out)
}

/// Statement guarded by a wait or timing control; a bare `;` adds nothing
fn guarded(ctx: &BuildContext, node: &SyntaxNode, out: &mut Vec<HdlStm>) -> BuildResult<()> {
    let inner = operand(node, 1, "statement")?;
    if inner.kind() != SyntaxKind::NULL_STMT {
        statement(ctx, &inner, out)?;
    }
    Ok(())
}

/// Lower one statement. Unnamed blocks are spliced into `out`; timing
/// controls become a `Wait` followed by the controlled statement.
fn statement(ctx: &BuildContext, node: &SyntaxNode, out: &mut Vec<HdlStm>) -> BuildResult<()> {
    let stm = match node.kind() {
        SyntaxKind::SEQ_BLOCK => {
            let body = match child(node, SyntaxKind::STMT_LIST) {
                Some(list) => statement_list(ctx, &list)?,
                None => Vec::new(),
            };
            match ident_tokens(node).next() {
                Some(label) => HdlStm::Block {
                    label: Some(name(&label)),
                    objs: local_declarations(ctx, node)?,
                    body,
                },
                None => {
                    out.extend(body);
                    return Ok(());
                }
            }
        }
        SyntaxKind::IF_STMT => if_stmt(ctx, node)?,
        SyntaxKind::CASE_STMT => {
            let kind = match significant_tokens(node).next().map(|t| t.kind()) {
                Some(SyntaxKind::CASEX_KW) => HdlCaseKind::Casex,
                Some(SyntaxKind::CASEZ_KW) => HdlCaseKind::Casez,
                _ => HdlCaseKind::Case,
            };
            let mut cases = Vec::new();
            let mut default = None;
            for alternative in children(node, SyntaxKind::CASE_ALT) {
                let body = operands(&alternative)
                    .find(|n| n.kind() != SyntaxKind::CHOICES)
                    .ok_or_else(|| missing(&alternative, "statement"))?;
                let body = statements(ctx, &body)?;
                match child(&alternative, SyntaxKind::CHOICES) {
                    Some(choices) => cases.push(HdlCaseAlt {
                        choices: choices
                            .children()
                            .map(|c| expr(&c))
                            .collect::<BuildResult<_>>()?,
                        body,
                    }),
                    None => default = Some(body),
                }
            }
            HdlStm::Case {
                label: None,
                kind,
                switch_on: expr(&operand(node, 0, "case expression")?)?,
                cases,
                default,
            }
        }
        SyntaxKind::FOR_STMT => HdlStm::For {
            label: None,
            init: Box::new(assignment(&operand(node, 0, "loop initialization")?)?),
            cond: expr(&operand(node, 1, "loop condition")?)?,
            step: Box::new(assignment(&operand(node, 2, "loop step")?)?),
            body: statements(ctx, &operand(node, 3, "loop body")?)?,
        },
        SyntaxKind::WHILE_LOOP => HdlStm::While {
            label: None,
            cond: Some(expr(&operand(node, 0, "loop condition")?)?),
            body: statements(ctx, &operand(node, 1, "loop body")?)?,
        },
        SyntaxKind::FOREVER_STMT => HdlStm::While {
            label: None,
            cond: None,
            body: statements(ctx, &operand(node, 0, "loop body")?)?,
        },
        SyntaxKind::REPEAT_STMT => HdlStm::Repeat {
            count: expr(&operand(node, 0, "repeat count")?)?,
            body: statements(ctx, &operand(node, 1, "loop body")?)?,
        },
        SyntaxKind::WAIT_STMT => {
            out.push(HdlStm::Wait {
                sensitivity: Vec::new(),
                condition: Some(expr(&operand(node, 0, "wait condition")?)?),
                timeout: None,
            });
            return guarded(ctx, node, out);
        }
        SyntaxKind::TIMING_STMT => {
            let control = operand(node, 0, "timing control")?;
            out.push(timing_wait(&control)?);
            return guarded(ctx, node, out);
        }
        SyntaxKind::DISABLE_STMT => HdlStm::Break {
            label: Some(first_name(node, "disabled block")?),
            cond: None,
        },
        SyntaxKind::NULL_STMT => HdlStm::Nop,
        SyntaxKind::CALL_STMT => {
            let call = operand(node, 0, "call")?;
            match call.kind() {
                SyntaxKind::CALL_EXPR => HdlStm::Call(expr(&call)?),
                _ => HdlStm::Call(HdlExpr::op(HdlOpType::Call, vec![expr(&call)?])),
            }
        }
        SyntaxKind::ASSIGNMENT => {
            let dst = expr(&operand(node, 0, "assignment target")?)?;
            let value = operands(node)
                .last()
                .ok_or_else(|| missing(node, "assigned value"))?;
            let mut time_delay = None;
            if let Some(control) = child(node, SyntaxKind::DELAY_CONTROL) {
                time_delay = Some(delay(&control)?);
            }
            if let Some(control) = child(node, SyntaxKind::EVENT_CONTROL) {
                out.push(timing_wait(&control)?);
            }
            HdlStm::Assign {
                dst,
                src: expr(&value)?,
                is_blocking: has_token(node, SyntaxKind::EQ),
                time_delay,
                label: None,
            }
        }
        _ => return Err(unexpected(node, "unexpected statement")),
    };
    out.push(stm);
    Ok(())
}

/// `else if` chains flatten into `elifs`
fn if_stmt(ctx: &BuildContext, node: &SyntaxNode) -> BuildResult<HdlStm> {
    let cond = expr(&operand(node, 0, "condition")?)?;
    let if_true = statements(ctx, &operand(node, 1, "statement")?)?;
    let mut elifs = Vec::new();
    let mut if_false = None;
    let mut clause = child(node, SyntaxKind::ELSE_CLAUSE);
    while let Some(current) = clause.take() {
        let inner = operand(&current, 0, "statement")?;
        if inner.kind() == SyntaxKind::IF_STMT {
            elifs.push((
                expr(&operand(&inner, 0, "condition")?)?,
                statements(ctx, &operand(&inner, 1, "statement")?)?,
            ));
            clause = child(&inner, SyntaxKind::ELSE_CLAUSE);
        } else {
            if_false = Some(statements(ctx, &inner)?);
        }
    }
    Ok(HdlStm::If {
        label: None,
        cond,
        if_true,
        elifs,
        if_false,
    })
}

/// Blocking assignment of a `for` header
fn assignment(node: &SyntaxNode) -> BuildResult<HdlStm> {
    Ok(HdlStm::Assign {
        dst: expr(&operand(node, 0, "assignment target")?)?,
        src: expr(&operand(node, 1, "assigned value")?)?,
        is_blocking: true,
        time_delay: None,
        label: None,
    })
}

fn delay(control: &SyntaxNode) -> BuildResult<HdlExpr> {
    expr(&operand(control, 0, "delay value")?)
}

fn timing_wait(control: &SyntaxNode) -> BuildResult<HdlStm> {
    match control.kind() {
        SyntaxKind::DELAY_CONTROL => Ok(HdlStm::Wait {
            sensitivity: Vec::new(),
            condition: None,
            timeout: Some(delay(control)?),
        }),
        SyntaxKind::EVENT_CONTROL => Ok(HdlStm::Wait {
            sensitivity: events(control)?,
            condition: None,
            timeout: None,
        }),
        _ => Err(unexpected(control, "expected a timing control")),
    }
}

/// `@*` and `@(*)` mean every signal read
fn events(control: &SyntaxNode) -> BuildResult<Vec<HdlExpr>> {
    let mut out = Vec::new();
    for event in control.children() {
        if event.kind() != SyntaxKind::EVENT_EXPR {
            out.push(expr(&event)?);
            continue;
        }
        let value = expr(&operand(&event, 0, "event expression")?)?;
        out.push(if has_token(&event, SyntaxKind::POSEDGE_KW) {
            HdlExpr::unary(HdlOpType::Rising, value)
        } else if has_token(&event, SyntaxKind::NEGEDGE_KW) {
            HdlExpr::unary(HdlOpType::Falling, value)
        } else {
            value
        });
    }
    if out.is_empty() {
        out.push(HdlExpr::All);
    }
    Ok(out)
}

// ============================================================================
// Expressions
// ============================================================================

fn binary_op(kind: SyntaxKind) -> Option<HdlOpType> {
    let op = match kind {
        SyntaxKind::BAR_BAR => HdlOpType::LogOr,
        SyntaxKind::AMP_AMP => HdlOpType::LogAnd,
        SyntaxKind::BAR => HdlOpType::Or,
        SyntaxKind::CARET => HdlOpType::Xor,
        SyntaxKind::TILDE_CARET => HdlOpType::Xnor,
        SyntaxKind::AMP => HdlOpType::And,
        SyntaxKind::EQ_EQ => HdlOpType::Eq,
        SyntaxKind::BANG_EQ => HdlOpType::Neq,
        SyntaxKind::EQ_EQ_EQ => HdlOpType::CaseEq,
        SyntaxKind::BANG_EQ_EQ => HdlOpType::CaseNeq,
        SyntaxKind::LT => HdlOpType::Lt,
        SyntaxKind::LT_EQ => HdlOpType::Le,
        SyntaxKind::GT => HdlOpType::Gt,
        SyntaxKind::GT_EQ => HdlOpType::Ge,
        SyntaxKind::SHL => HdlOpType::Sll,
        SyntaxKind::SHR => HdlOpType::Srl,
        SyntaxKind::ASHL => HdlOpType::Sla,
        SyntaxKind::ASHR => HdlOpType::Sra,
        SyntaxKind::PLUS => HdlOpType::Add,
        SyntaxKind::MINUS => HdlOpType::Sub,
        SyntaxKind::STAR => HdlOpType::Mul,
        SyntaxKind::SLASH => HdlOpType::Div,
        SyntaxKind::PERCENT => HdlOpType::Mod,
        SyntaxKind::STAR_STAR => HdlOpType::Pow,
        _ => return None,
    };
    Some(op)
}

fn unary_op(kind: SyntaxKind) -> Option<HdlOpType> {
    let op = match kind {
        SyntaxKind::PLUS => HdlOpType::Plus,
        SyntaxKind::MINUS => HdlOpType::Neg,
        SyntaxKind::BANG => HdlOpType::Not,
        SyntaxKind::TILDE => HdlOpType::BitNot,
        SyntaxKind::AMP => HdlOpType::AndReduce,
        SyntaxKind::TILDE_AMP => HdlOpType::NandReduce,
        SyntaxKind::BAR => HdlOpType::OrReduce,
        SyntaxKind::TILDE_BAR => HdlOpType::NorReduce,
        SyntaxKind::CARET => HdlOpType::XorReduce,
        SyntaxKind::TILDE_CARET => HdlOpType::XnorReduce,
        _ => return None,
    };
    Some(op)
}

fn operator(node: &SyntaxNode, map: fn(SyntaxKind) -> Option<HdlOpType>) -> BuildResult<HdlOpType> {
    significant_tokens(node)
        .find_map(|t| map(t.kind()))
        .ok_or_else(|| missing(node, "operator"))
}

fn literal_value(node: &SyntaxNode) -> BuildResult<HdlExpr> {
    let mut tokens = significant_tokens(node);
    let token = tokens.next().ok_or_else(|| missing(node, "literal"))?;
    let text = token.text();
    let value = match token.kind() {
        SyntaxKind::INTEGER => match tokens.next() {
            Some(based) if based.kind() == SyntaxKind::BASED_LITERAL => HdlExpr::Int(
                literal::verilog_based(&format!("{text}{}", based.text()))
                    .ok_or_else(|| unexpected(node, "malformed based number"))?,
            ),
            _ => HdlExpr::Int(literal::decimal(text)),
        },
        SyntaxKind::REAL => HdlExpr::Float(text.into()),
        SyntaxKind::BASED_LITERAL => HdlExpr::Int(
            literal::verilog_based(text)
                .ok_or_else(|| unexpected(node, "malformed based number"))?,
        ),
        SyntaxKind::STRING => HdlExpr::Str(literal::verilog_string(text)),
        _ => return Err(unexpected(node, "unexpected literal")),
    };
    Ok(value)
}

pub(super) fn expr(node: &SyntaxNode) -> BuildResult<HdlExpr> {
    let nth = |n: usize| -> BuildResult<HdlExpr> { expr(&operand(node, n, "operand")?) };
    let value = match node.kind() {
        SyntaxKind::LITERAL => literal_value(node)?,
        SyntaxKind::NAME_REF => {
            let token = significant_tokens(node)
                .next()
                .ok_or_else(|| missing(node, "name"))?;
            HdlExpr::Id(name(&token))
        }
        SyntaxKind::SELECTED_NAME => {
            let member = significant_tokens(node)
                .last()
                .ok_or_else(|| missing(node, "member name"))?;
            HdlExpr::binary(HdlOpType::Dot, nth(0)?, HdlExpr::Id(name(&member)))
        }
        SyntaxKind::INDEX_EXPR => {
            let select = if has_token(node, SyntaxKind::PLUS_COLON) {
                HdlExpr::binary(HdlOpType::PartSelectPost, nth(1)?, nth(2)?)
            } else if has_token(node, SyntaxKind::MINUS_COLON) {
                HdlExpr::binary(HdlOpType::PartSelectPre, nth(1)?, nth(2)?)
            } else if has_token(node, SyntaxKind::COLON) {
                HdlExpr::binary(HdlOpType::Downto, nth(1)?, nth(2)?)
            } else {
                nth(1)?
            };
            HdlExpr::binary(HdlOpType::Index, nth(0)?, select)
        }
        SyntaxKind::CALL_EXPR => {
            let mut ops = vec![nth(0)?];
            if let Some(args) = child(node, SyntaxKind::ARG_LIST) {
                for arg in args.children() {
                    ops.push(expr(&arg)?);
                }
            }
            HdlExpr::op(HdlOpType::Call, ops)
        }
        SyntaxKind::PAREN_EXPR => nth(0)?,
        SyntaxKind::CONCAT_EXPR => {
            let mut parts = operands(node);
            let first = parts.next().ok_or_else(|| missing(node, "element"))?;
            let mut value = expr(&first)?;
            for part in parts {
                value = HdlExpr::binary(HdlOpType::Concat, value, expr(&part)?);
            }
            value
        }
        SyntaxKind::REPL_EXPR => HdlExpr::binary(HdlOpType::ReplConcat, nth(0)?, nth(1)?),
        SyntaxKind::BINARY_EXPR => HdlExpr::binary(operator(node, binary_op)?, nth(0)?, nth(1)?),
        SyntaxKind::UNARY_EXPR => HdlExpr::unary(operator(node, unary_op)?, nth(0)?),
        SyntaxKind::TERNARY_EXPR => {
            HdlExpr::op(HdlOpType::Ternary, vec![nth(0)?, nth(1)?, nth(2)?])
        }
        _ => return Err(unexpected(node, "unexpected expression")),
    };
    Ok(value)
}
