//! VHDL lowering
//!
//! Identifiers fold case through [`HdlName::vhdl`]. Multi-name declarations
//! (`signal a, b : bit;`, `library ieee, work;`) expand into one object per
//! name, in source order.

use rowan::NodeOrToken;
use tracing::trace;

use super::literal;
use super::{BuildContext, BuildResult, missing, operand, operands, unexpected};
use crate::hdl_ast::{
    HdlAttribute, HdlAttributeKind, HdlCaseAlt, HdlCaseKind, HdlCompInst, HdlDirection, HdlExpr,
    HdlFunctionDef, HdlGenerateScheme, HdlIdDef, HdlIdKind, HdlLibrary, HdlModuleDec,
    HdlModuleDef, HdlName, HdlNamespace, HdlObject, HdlOpType, HdlProcessKind, HdlRecordField,
    HdlStm, HdlTypeDef, HdlTypeSpec, HdlUse,
};
use crate::parser::SyntaxKind;
use crate::parser::ast::{
    AstNode, ComponentDecl, DesignItem, EntityDecl, InterfaceList, SourceFile, child, children,
    has_token, ident_tokens, node_after, significant_tokens,
};
use crate::parser::{SyntaxNode, SyntaxToken};

/// Where an interface list appears; decides the object class of entries
/// written without `signal`, `variable` or `constant`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum InterfaceRole {
    Generic,
    Port,
    FunctionParam,
    ProcedureParam,
}

impl InterfaceRole {
    pub fn default_kind(self, direction: HdlDirection) -> HdlIdKind {
        match self {
            Self::Generic | Self::FunctionParam => HdlIdKind::Constant,
            Self::Port => HdlIdKind::Signal,
            Self::ProcedureParam => match direction {
                HdlDirection::In => HdlIdKind::Constant,
                _ => HdlIdKind::Variable,
            },
        }
    }
}

fn name(token: &SyntaxToken) -> HdlName {
    HdlName::vhdl(token.text())
}

fn first_name(node: &SyntaxNode, what: &str) -> BuildResult<HdlName> {
    ident_tokens(node)
        .next()
        .map(|t| name(&t))
        .ok_or_else(|| missing(node, what))
}

fn label(node: &SyntaxNode) -> Option<HdlName> {
    child(node, SyntaxKind::LABEL)
        .and_then(|l| ident_tokens(&l).next())
        .map(|t| name(&t))
}

fn opt_expr(node: Option<SyntaxNode>) -> BuildResult<Option<HdlExpr>> {
    node.map(|n| expr(&n)).transpose()
}

fn required_after(node: &SyntaxNode, token: SyntaxKind, what: &str) -> BuildResult<HdlExpr> {
    let target = node_after(node, token).ok_or_else(|| missing(node, what))?;
    expr(&target)
}

// ============================================================================
// Design units
// ============================================================================

pub(super) fn design_file(ctx: &BuildContext, root: &SyntaxNode) -> BuildResult<Vec<HdlObject>> {
    let file =
        SourceFile::cast(root.clone()).ok_or_else(|| unexpected(root, "expected a source file"))?;
    let mut objs = Vec::new();
    for item in file.items() {
        match item {
            DesignItem::Library(clause) => {
                let position = ctx.position(clause.syntax());
                objs.extend(clause.names().map(|t| {
                    HdlObject::Library(HdlLibrary {
                        name: name(&t),
                        position,
                    })
                }));
            }
            DesignItem::Use(clause) => use_clause(ctx, clause.syntax(), &mut objs)?,
            DesignItem::Entity(entity) => {
                objs.push(HdlObject::ModuleDec(entity_decl(ctx, &entity)?));
            }
            DesignItem::Architecture(arch) => {
                let node = arch.syntax();
                let arch_name = arch.name().ok_or_else(|| missing(node, "architecture name"))?;
                let entity = arch
                    .entity_name()
                    .ok_or_else(|| missing(node, "entity name"))?;
                let mut body = declarations(ctx, arch.declarations())?;
                body.extend(concurrent_statements(ctx, arch.statements())?);
                trace!("[VHDL_BUILD] architecture '{}' of '{}'", arch_name.text(), entity.text());
                objs.push(HdlObject::ModuleDef(HdlModuleDef {
                    name: Some(name(&arch_name)),
                    module_name: name(&entity),
                    dec: None,
                    objs: body,
                    doc: ctx.doc(node),
                    position: ctx.position(node),
                }));
            }
            DesignItem::Package(pkg) => {
                let node = pkg.syntax();
                let pkg_name = pkg.name().ok_or_else(|| missing(node, "package name"))?;
                trace!("[VHDL_BUILD] package '{}'", pkg_name.text());
                objs.push(HdlObject::Namespace(HdlNamespace {
                    name: name(&pkg_name),
                    declaration_only: true,
                    body: declarations(ctx, pkg.declarations())?,
                    doc: ctx.doc(node),
                    position: ctx.position(node),
                }));
            }
            DesignItem::PackageBody(body) => {
                let node = body.syntax();
                let body_name = body.name().ok_or_else(|| missing(node, "package body name"))?;
                trace!("[VHDL_BUILD] package body '{}'", body_name.text());
                objs.push(HdlObject::Namespace(HdlNamespace {
                    name: name(&body_name),
                    declaration_only: false,
                    body: declarations(ctx, body.declarations())?,
                    doc: ctx.doc(node),
                    position: ctx.position(node),
                }));
            }
            DesignItem::Module(module) => {
                return Err(unexpected(module.syntax(), "Verilog module in a VHDL tree"));
            }
        }
    }
    Ok(objs)
}

fn use_clause(ctx: &BuildContext, node: &SyntaxNode, out: &mut Vec<HdlObject>) -> BuildResult<()> {
    let position = ctx.position(node);
    for selected in node.children() {
        let mut path = Vec::new();
        let wildcard = selected_path(&selected, &mut path)?;
        out.push(HdlObject::Use(HdlUse {
            path,
            wildcard,
            position,
        }));
    }
    Ok(())
}

/// Flatten `a.b.c` into `path`; returns whether it ends in `.all`
fn selected_path(node: &SyntaxNode, path: &mut Vec<HdlName>) -> BuildResult<bool> {
    match node.kind() {
        SyntaxKind::NAME_REF => {
            let token = significant_tokens(node)
                .next()
                .ok_or_else(|| missing(node, "name"))?;
            path.push(name(&token));
            Ok(false)
        }
        SyntaxKind::SELECTED_NAME => {
            selected_path(&operand(node, 0, "prefix")?, path)?;
            let suffix = significant_tokens(node)
                .last()
                .ok_or_else(|| missing(node, "suffix"))?;
            if suffix.kind() == SyntaxKind::ALL_KW {
                return Ok(true);
            }
            path.push(name(&suffix));
            Ok(false)
        }
        _ => Err(unexpected(node, "expected a selected name in a use clause")),
    }
}

fn entity_decl(ctx: &BuildContext, entity: &EntityDecl) -> BuildResult<HdlModuleDec> {
    let node = entity.syntax();
    let entity_name = entity.name().ok_or_else(|| missing(node, "entity name"))?;
    trace!("[VHDL_BUILD] entity '{}'", entity_name.text());
    let mut objs = declarations(ctx, entity.declarations())?;
    objs.extend(concurrent_statements(ctx, entity.statements())?);
    Ok(HdlModuleDec {
        name: name(&entity_name),
        params: opt_interface_list(ctx, entity.generics(), InterfaceRole::Generic)?,
        ports: opt_interface_list(ctx, entity.ports(), InterfaceRole::Port)?,
        objs,
        doc: ctx.doc(node),
        position: ctx.position(node),
    })
}

fn component_decl(ctx: &BuildContext, component: &ComponentDecl) -> BuildResult<HdlModuleDec> {
    let node = component.syntax();
    let component_name = component
        .name()
        .ok_or_else(|| missing(node, "component name"))?;
    trace!("[VHDL_BUILD] component '{}'", component_name.text());
    Ok(HdlModuleDec {
        name: name(&component_name),
        params: opt_interface_list(ctx, component.generics(), InterfaceRole::Generic)?,
        ports: opt_interface_list(ctx, component.ports(), InterfaceRole::Port)?,
        objs: Vec::new(),
        doc: ctx.doc(node),
        position: ctx.position(node),
    })
}

fn opt_interface_list(
    ctx: &BuildContext,
    list: Option<InterfaceList>,
    role: InterfaceRole,
) -> BuildResult<Vec<HdlIdDef>> {
    match list {
        Some(list) => interface_list(ctx, &list, role),
        None => Ok(Vec::new()),
    }
}

fn interface_list(
    ctx: &BuildContext,
    list: &InterfaceList,
    role: InterfaceRole,
) -> BuildResult<Vec<HdlIdDef>> {
    let mut defs = Vec::new();
    for decl in list.decls() {
        let node = decl.syntax();
        let direction = match decl.mode() {
            Some(SyntaxKind::OUT_KW) => HdlDirection::Out,
            Some(SyntaxKind::INOUT_KW) => HdlDirection::Inout,
            Some(SyntaxKind::BUFFER_KW) => HdlDirection::Buffer,
            Some(SyntaxKind::LINKAGE_KW) => HdlDirection::Linkage,
            _ => HdlDirection::In,
        };
        let kind = match decl.class() {
            Some(SyntaxKind::SIGNAL_KW) => HdlIdKind::Signal,
            Some(SyntaxKind::VARIABLE_KW) => HdlIdKind::Variable,
            Some(SyntaxKind::CONSTANT_KW) => HdlIdKind::Constant,
            _ => role.default_kind(direction),
        };
        let subtype = decl.subtype().ok_or_else(|| missing(node, "subtype"))?;
        let type_ = expr(&subtype)?;
        let value = opt_expr(decl.default_value())?;
        let position = ctx.position(node);
        for token in decl.names() {
            defs.push(HdlIdDef {
                name: name(&token),
                kind,
                type_: Some(type_.clone()),
                value: value.clone(),
                direction,
                position,
            });
        }
    }
    Ok(defs)
}

// ============================================================================
// Declarations
// ============================================================================

fn declarations(ctx: &BuildContext, list: Option<SyntaxNode>) -> BuildResult<Vec<HdlObject>> {
    let mut out = Vec::new();
    for node in list.iter().flat_map(|l| l.children()) {
        declaration(ctx, &node, &mut out)?;
    }
    Ok(out)
}

fn declaration(ctx: &BuildContext, node: &SyntaxNode, out: &mut Vec<HdlObject>) -> BuildResult<()> {
    match node.kind() {
        SyntaxKind::CONSTANT_DECL => object_decl(ctx, node, HdlIdKind::Constant, out),
        SyntaxKind::SIGNAL_DECL => object_decl(ctx, node, HdlIdKind::Signal, out),
        SyntaxKind::VARIABLE_DECL => {
            let kind = if has_token(node, SyntaxKind::SHARED_KW) {
                HdlIdKind::SharedVariable
            } else {
                HdlIdKind::Variable
            };
            object_decl(ctx, node, kind, out)
        }
        SyntaxKind::TYPE_DECL => {
            out.push(HdlObject::TypeDef(type_decl(ctx, node)?));
            Ok(())
        }
        SyntaxKind::SUBTYPE_DECL => {
            let subtype = operand(node, 0, "subtype indication")?;
            out.push(HdlObject::TypeDef(HdlTypeDef {
                name: first_name(node, "subtype name")?,
                is_subtype: true,
                spec: HdlTypeSpec::Subtype(expr(&subtype)?),
                doc: ctx.doc(node),
                position: ctx.position(node),
            }));
            Ok(())
        }
        SyntaxKind::ALIAS_DECL => {
            out.push(HdlObject::IdDef(alias_decl(ctx, node)?));
            Ok(())
        }
        SyntaxKind::COMPONENT_DECL => {
            let component =
                ComponentDecl::cast(node.clone()).ok_or_else(|| unexpected(node, "component"))?;
            out.push(HdlObject::ModuleDec(component_decl(ctx, &component)?));
            Ok(())
        }
        SyntaxKind::SUBPROGRAM_DECL => {
            out.push(HdlObject::FunctionDef(subprogram(ctx, node)?));
            Ok(())
        }
        SyntaxKind::ATTRIBUTE_DECL => {
            let type_ = expr(&operand(node, 0, "attribute type")?)?;
            out.push(HdlObject::Attribute(HdlAttribute {
                name: first_name(node, "attribute name")?,
                kind: HdlAttributeKind::Declaration { type_ },
                position: ctx.position(node),
            }));
            Ok(())
        }
        SyntaxKind::ATTRIBUTE_SPEC => {
            out.push(HdlObject::Attribute(attribute_spec(ctx, node)?));
            Ok(())
        }
        SyntaxKind::USE_CLAUSE => use_clause(ctx, node, out),
        _ => Err(unexpected(node, "unexpected declaration")),
    }
}

fn ident_list(node: &SyntaxNode) -> BuildResult<Vec<HdlName>> {
    let list =
        child(node, SyntaxKind::IDENT_LIST).ok_or_else(|| missing(node, "identifier list"))?;
    Ok(ident_tokens(&list).map(|t| name(&t)).collect())
}

/// The subtype indication that follows an identifier list
fn declared_subtype(node: &SyntaxNode) -> BuildResult<HdlExpr> {
    let subtype = node
        .children()
        .find(|n| n.kind() != SyntaxKind::IDENT_LIST)
        .ok_or_else(|| missing(node, "subtype indication"))?;
    expr(&subtype)
}

fn object_decl(
    ctx: &BuildContext,
    node: &SyntaxNode,
    kind: HdlIdKind,
    out: &mut Vec<HdlObject>,
) -> BuildResult<()> {
    let type_ = declared_subtype(node)?;
    let value = opt_expr(node_after(node, SyntaxKind::COLON_EQ))?;
    let position = ctx.position(node);
    for name in ident_list(node)? {
        out.push(HdlObject::IdDef(HdlIdDef {
            name,
            kind,
            type_: Some(type_.clone()),
            value: value.clone(),
            direction: HdlDirection::Internal,
            position,
        }));
    }
    Ok(())
}

fn type_decl(ctx: &BuildContext, node: &SyntaxNode) -> BuildResult<HdlTypeDef> {
    let type_name = first_name(node, "type name")?;
    trace!("[VHDL_BUILD] type '{}'", type_name);
    let spec = match node.children().next() {
        Some(def) => type_definition(&def)?,
        None => HdlTypeSpec::Incomplete,
    };
    Ok(HdlTypeDef {
        name: type_name,
        is_subtype: false,
        spec,
        doc: ctx.doc(node),
        position: ctx.position(node),
    })
}

fn type_definition(def: &SyntaxNode) -> BuildResult<HdlTypeSpec> {
    match def.kind() {
        SyntaxKind::ENUM_DEF => {
            let mut literals = Vec::new();
            for token in significant_tokens(def) {
                if token.kind().is_ident() {
                    literals.push(HdlExpr::Id(name(&token)));
                } else if token.kind() == SyntaxKind::CHAR_LITERAL {
                    let ch = literal::vhdl_char(token.text())
                        .ok_or_else(|| unexpected(def, "malformed character literal"))?;
                    literals.push(HdlExpr::Char(ch));
                }
            }
            Ok(HdlTypeSpec::Enum(literals))
        }
        SyntaxKind::RANGE_DEF => Ok(HdlTypeSpec::Range(expr(&operand(def, 0, "range")?)?)),
        SyntaxKind::PHYSICAL_DEF => {
            let range = expr(&operand(def, 0, "range")?)?;
            let base_unit = first_name(def, "base unit")?;
            let mut units = Vec::new();
            for unit in children(def, SyntaxKind::UNIT_DECL) {
                let value = expr(&operand(&unit, 0, "unit value")?)?;
                units.push((first_name(&unit, "unit name")?, value));
            }
            Ok(HdlTypeSpec::Physical {
                range,
                base_unit,
                units,
            })
        }
        SyntaxKind::ARRAY_DEF => {
            let index_list =
                child(def, SyntaxKind::INDEX_LIST).ok_or_else(|| missing(def, "index list"))?;
            let indexes = index_list
                .children()
                .map(|n| expr(&n))
                .collect::<BuildResult<Vec<_>>>()?;
            let element = required_after(def, SyntaxKind::OF_KW, "element subtype")?;
            Ok(HdlTypeSpec::Array { indexes, element })
        }
        SyntaxKind::RECORD_DEF => {
            let mut fields = Vec::new();
            for element in children(def, SyntaxKind::RECORD_ELEMENT) {
                let type_ = declared_subtype(&element)?;
                for name in ident_list(&element)? {
                    fields.push(HdlRecordField {
                        name,
                        type_: type_.clone(),
                    });
                }
            }
            Ok(HdlTypeSpec::Record(fields))
        }
        SyntaxKind::ACCESS_DEF => Ok(HdlTypeSpec::Access(expr(&operand(def, 0, "subtype")?)?)),
        SyntaxKind::FILE_DEF => Ok(HdlTypeSpec::File(expr(&operand(def, 0, "type mark")?)?)),
        _ => Err(unexpected(def, "unexpected type definition")),
    }
}

fn alias_decl(ctx: &BuildContext, node: &SyntaxNode) -> BuildResult<HdlIdDef> {
    let designator = significant_tokens(node)
        .nth(1)
        .ok_or_else(|| missing(node, "alias designator"))?;
    Ok(HdlIdDef {
        name: name(&designator),
        kind: HdlIdKind::Alias,
        type_: opt_expr(node_after(node, SyntaxKind::COLON))?,
        value: Some(required_after(node, SyntaxKind::IS_KW, "aliased name")?),
        direction: HdlDirection::Internal,
        position: ctx.position(node),
    })
}

fn subprogram(ctx: &BuildContext, node: &SyntaxNode) -> BuildResult<HdlFunctionDef> {
    let is_procedure = has_token(node, SyntaxKind::PROCEDURE_KW);
    let designator = significant_tokens(node)
        .find(|t| t.kind().is_ident() || t.kind() == SyntaxKind::STRING)
        .ok_or_else(|| missing(node, "subprogram designator"))?;
    let is_operator = designator.kind() == SyntaxKind::STRING;
    let func_name = if is_operator {
        HdlName::vhdl(literal::vhdl_string(designator.text()))
    } else {
        name(&designator)
    };
    trace!("[VHDL_BUILD] subprogram '{}'", func_name);

    let role = if is_procedure {
        InterfaceRole::ProcedureParam
    } else {
        InterfaceRole::FunctionParam
    };
    let params = opt_interface_list(
        ctx,
        node.children().find_map(InterfaceList::cast),
        role,
    )?;
    let return_type = if is_procedure {
        None
    } else {
        Some(required_after(node, SyntaxKind::RETURN_KW, "return type")?)
    };

    Ok(HdlFunctionDef {
        name: func_name,
        is_procedure,
        is_operator,
        is_pure: !has_token(node, SyntaxKind::IMPURE_KW),
        params,
        return_type,
        is_declaration_only: !has_token(node, SyntaxKind::IS_KW),
        objs: declarations(ctx, child(node, SyntaxKind::DECL_LIST))?,
        body: sequential_statements(ctx, child(node, SyntaxKind::STMT_LIST))?,
        doc: ctx.doc(node),
        position: ctx.position(node),
    })
}

fn attribute_spec(ctx: &BuildContext, node: &SyntaxNode) -> BuildResult<HdlAttribute> {
    let targets = if has_token(node, SyntaxKind::OTHERS_KW) {
        vec![HdlExpr::Others]
    } else if has_token(node, SyntaxKind::ALL_KW) {
        vec![HdlExpr::All]
    } else {
        ident_list(node)?.into_iter().map(HdlExpr::Id).collect()
    };
    let entity_class = significant_tokens(node)
        .skip_while(|t| t.kind() != SyntaxKind::COLON)
        .nth(1)
        .ok_or_else(|| missing(node, "entity class"))?;
    Ok(HdlAttribute {
        name: first_name(node, "attribute name")?,
        kind: HdlAttributeKind::Specification {
            targets,
            entity_class: name(&entity_class),
            value: required_after(node, SyntaxKind::IS_KW, "attribute value")?,
        },
        position: ctx.position(node),
    })
}

// ============================================================================
// Concurrent statements
// ============================================================================

fn concurrent_statements(
    ctx: &BuildContext,
    list: Option<SyntaxNode>,
) -> BuildResult<Vec<HdlObject>> {
    list.iter()
        .flat_map(|l| l.children())
        .map(|node| concurrent(ctx, &node))
        .collect()
}

fn concurrent(ctx: &BuildContext, node: &SyntaxNode) -> BuildResult<HdlObject> {
    let label = label(node);
    let stm = match node.kind() {
        SyntaxKind::PROCESS_STMT => {
            let sensitivity = child(node, SyntaxKind::SENSITIVITY_LIST)
                .map(|list| sensitivity_list(&list))
                .transpose()?;
            HdlStm::Process {
                label,
                kind: HdlProcessKind::Process,
                sensitivity,
                objs: declarations(ctx, child(node, SyntaxKind::DECL_LIST))?,
                body: sequential_statements(ctx, child(node, SyntaxKind::STMT_LIST))?,
            }
        }
        SyntaxKind::SIGNAL_ASSIGN => conditional_assign(node, label, false)?,
        SyntaxKind::SELECTED_ASSIGN => selected_assign(node, label)?,
        SyntaxKind::COMPONENT_INST => {
            return Ok(HdlObject::CompInst(instance(ctx, node, label)?));
        }
        SyntaxKind::CALL_STMT => HdlStm::Call(expr(&operand(node, 0, "procedure call")?)?),
        SyntaxKind::ASSERT_STMT => assert_stmt(node)?,
        SyntaxKind::FOR_GENERATE => HdlStm::Generate {
            label,
            scheme: HdlGenerateScheme::ForIn {
                var: first_name(node, "generate parameter")?,
                range: required_after(node, SyntaxKind::IN_KW, "generate range")?,
            },
            objs: generate_body(ctx, node)?,
            else_objs: Vec::new(),
        },
        SyntaxKind::IF_GENERATE => {
            let clauses: Vec<_> = node
                .children()
                .filter(|n| matches!(n.kind(), SyntaxKind::ELSIF_CLAUSE | SyntaxKind::ELSE_CLAUSE))
                .collect();
            HdlStm::Generate {
                label,
                scheme: HdlGenerateScheme::If {
                    cond: expr(&operand(node, 0, "generate condition")?)?,
                },
                objs: generate_body(ctx, node)?,
                else_objs: generate_else(ctx, &clauses)?,
            }
        }
        _ => return Err(unexpected(node, "unexpected concurrent statement")),
    };
    Ok(HdlObject::Stm(stm))
}

fn sensitivity_list(list: &SyntaxNode) -> BuildResult<Vec<HdlExpr>> {
    if has_token(list, SyntaxKind::ALL_KW) {
        return Ok(vec![HdlExpr::All]);
    }
    list.children().map(|n| expr(&n)).collect()
}

/// Declarations, then statements, of a generate body
fn generate_body(ctx: &BuildContext, node: &SyntaxNode) -> BuildResult<Vec<HdlObject>> {
    let mut objs = declarations(ctx, child(node, SyntaxKind::DECL_LIST))?;
    objs.extend(concurrent_statements(ctx, child(node, SyntaxKind::STMT_LIST))?);
    Ok(objs)
}

/// `elsif` branches nest as unlabeled if-generates in the else part
fn generate_else(ctx: &BuildContext, clauses: &[SyntaxNode]) -> BuildResult<Vec<HdlObject>> {
    let Some((clause, rest)) = clauses.split_first() else {
        return Ok(Vec::new());
    };
    if clause.kind() == SyntaxKind::ELSE_CLAUSE {
        return generate_body(ctx, clause);
    }
    Ok(vec![HdlObject::Stm(HdlStm::Generate {
        label: None,
        scheme: HdlGenerateScheme::If {
            cond: expr(&operand(clause, 0, "generate condition")?)?,
        },
        objs: generate_body(ctx, clause)?,
        else_objs: generate_else(ctx, rest)?,
    })])
}

fn instance(
    ctx: &BuildContext,
    node: &SyntaxNode,
    label: Option<HdlName>,
) -> BuildResult<HdlCompInst> {
    let unit = operands(node)
        .find(|n| !matches!(n.kind(), SyntaxKind::GENERIC_MAP | SyntaxKind::PORT_MAP))
        .ok_or_else(|| missing(node, "instantiated unit"))?;
    let map = |kind: SyntaxKind| -> BuildResult<Vec<HdlExpr>> {
        match child(node, kind).and_then(|m| child(&m, SyntaxKind::ARG_LIST)) {
            Some(list) => associations(&list),
            None => Ok(Vec::new()),
        }
    };
    Ok(HdlCompInst {
        name: label,
        module_name: expr(&unit)?,
        param_map: map(SyntaxKind::GENERIC_MAP)?,
        port_map: map(SyntaxKind::PORT_MAP)?,
        position: ctx.position(node),
    })
}

fn assert_stmt(node: &SyntaxNode) -> BuildResult<HdlStm> {
    Ok(HdlStm::Assert {
        cond: expr(&operand(node, 0, "assertion condition")?)?,
        report: opt_expr(node_after(node, SyntaxKind::REPORT_KW))?,
        severity: opt_expr(node_after(node, SyntaxKind::SEVERITY_KW))?,
    })
}

// ============================================================================
// Assignments
// ============================================================================

enum Arm {
    Value(SyntaxNode),
    Cond(SyntaxNode),
}

/// Split an assignment into its target and the alternating
/// value / condition sequence that follows it.
fn assign_arms(node: &SyntaxNode) -> BuildResult<(SyntaxNode, Vec<Arm>)> {
    let mut target = None;
    let mut arms = Vec::new();
    let mut last = None;
    for element in node.children_with_tokens() {
        match element {
            NodeOrToken::Token(t) if !t.kind().is_trivia() => last = Some(t.kind()),
            NodeOrToken::Token(_) => {}
            NodeOrToken::Node(n) if n.kind() == SyntaxKind::LABEL => {}
            NodeOrToken::Node(n) if target.is_none() => target = Some(n),
            NodeOrToken::Node(n) => match last {
                Some(SyntaxKind::WHEN_KW) => arms.push(Arm::Cond(n)),
                // pulse rejection limit, not part of the model
                Some(SyntaxKind::REJECT_KW) => {}
                _ => arms.push(Arm::Value(n)),
            },
        }
    }
    let target = target.ok_or_else(|| missing(node, "assignment target"))?;
    Ok((target, arms))
}

/// Source and delay of a plain assignment
fn assigned_value(node: &SyntaxNode, blocking: bool) -> BuildResult<(HdlExpr, Option<HdlExpr>)> {
    if blocking {
        return Ok((expr(node)?, None));
    }
    let elements: Vec<_> = children(node, SyntaxKind::WAVEFORM_ELEMENT).collect();
    match elements.as_slice() {
        [single] => Ok((
            expr(&operand(single, 0, "waveform value")?)?,
            opt_expr(node_after(single, SyntaxKind::AFTER_KW))?,
        )),
        _ => Ok((waveform(node)?, None)),
    }
}

/// A waveform as one expression, for the branches of a conditional
fn branch_value(node: &SyntaxNode, blocking: bool) -> BuildResult<HdlExpr> {
    if blocking {
        expr(node)
    } else {
        waveform(node)
    }
}

fn waveform(node: &SyntaxNode) -> BuildResult<HdlExpr> {
    if has_token(node, SyntaxKind::UNAFFECTED_KW) {
        return Ok(HdlExpr::Id(HdlName::vhdl("unaffected")));
    }
    let mut elements = Vec::new();
    for element in children(node, SyntaxKind::WAVEFORM_ELEMENT) {
        let value = expr(&operand(&element, 0, "waveform value")?)?;
        elements.push(match node_after(&element, SyntaxKind::AFTER_KW) {
            Some(delay) => HdlExpr::binary(HdlOpType::After, value, expr(&delay)?),
            None => value,
        });
    }
    match elements.len() {
        0 => Err(missing(node, "waveform element")),
        1 => Ok(elements.remove(0)),
        _ => Ok(HdlExpr::op(HdlOpType::Waveform, elements)),
    }
}

/// Plain, conditional with final `else` (nested ternary), or conditional
/// without it (if chain)
fn conditional_assign(
    node: &SyntaxNode,
    label: Option<HdlName>,
    blocking: bool,
) -> BuildResult<HdlStm> {
    let (target, arms) = assign_arms(node)?;
    let dst = expr(&target)?;

    let mut branches = Vec::new();
    let mut otherwise = None;
    for chunk in arms.chunks(2) {
        match chunk {
            [Arm::Value(value), Arm::Cond(cond)] => branches.push((value, cond)),
            [Arm::Value(value)] => otherwise = Some(value),
            _ => return Err(unexpected(node, "malformed conditional assignment")),
        }
    }

    let simple = |value: &SyntaxNode, label: Option<HdlName>| -> BuildResult<HdlStm> {
        let (src, time_delay) = assigned_value(value, blocking)?;
        Ok(HdlStm::Assign {
            dst: dst.clone(),
            src,
            is_blocking: blocking,
            time_delay,
            label,
        })
    };

    match otherwise {
        Some(value) if branches.is_empty() => simple(value, label),
        Some(value) => {
            let mut src = branch_value(value, blocking)?;
            for (value, cond) in branches.into_iter().rev() {
                src = HdlExpr::op(
                    HdlOpType::Ternary,
                    vec![expr(cond)?, branch_value(value, blocking)?, src],
                );
            }
            Ok(HdlStm::Assign {
                dst,
                src,
                is_blocking: blocking,
                time_delay: None,
                label,
            })
        }
        None => {
            let mut branches = branches.into_iter();
            let (value, cond) = branches
                .next()
                .ok_or_else(|| missing(node, "assigned value"))?;
            let cond = expr(cond)?;
            let if_true = vec![simple(value, None)?];
            let elifs = branches
                .map(|(value, cond)| Ok((expr(cond)?, vec![simple(value, None)?])))
                .collect::<BuildResult<Vec<_>>>()?;
            Ok(HdlStm::If {
                label,
                cond,
                if_true,
                elifs,
                if_false: None,
            })
        }
    }
}

fn selected_assign(node: &SyntaxNode, label: Option<HdlName>) -> BuildResult<HdlStm> {
    let switch_on = expr(&operand(node, 0, "selector")?)?;
    let dst = required_after(node, SyntaxKind::SELECT_KW, "assignment target")?;
    let mut cases = Vec::new();
    let mut default = None;
    for alternative in children(node, SyntaxKind::SELECTED_WAVEFORM) {
        let wave = child(&alternative, SyntaxKind::WAVEFORM)
            .ok_or_else(|| missing(&alternative, "waveform"))?;
        let choice_list = child(&alternative, SyntaxKind::CHOICES)
            .ok_or_else(|| missing(&alternative, "choices"))?;
        let (src, time_delay) = assigned_value(&wave, false)?;
        let body = vec![HdlStm::Assign {
            dst: dst.clone(),
            src,
            is_blocking: false,
            time_delay,
            label: None,
        }];
        let choices = choices(&choice_list)?;
        if choices.contains(&HdlExpr::Others) {
            default = Some(body);
        } else {
            cases.push(HdlCaseAlt { choices, body });
        }
    }
    Ok(HdlStm::Case {
        label,
        kind: HdlCaseKind::Select,
        switch_on,
        cases,
        default,
    })
}

// ============================================================================
// Sequential statements
// ============================================================================

fn sequential_statements(ctx: &BuildContext, list: Option<SyntaxNode>) -> BuildResult<Vec<HdlStm>> {
    list.iter()
        .flat_map(|l| l.children())
        .map(|node| sequential(ctx, &node))
        .collect()
}

fn body_of(ctx: &BuildContext, node: &SyntaxNode) -> BuildResult<Vec<HdlStm>> {
    sequential_statements(ctx, child(node, SyntaxKind::STMT_LIST))
}

fn sequential(ctx: &BuildContext, node: &SyntaxNode) -> BuildResult<HdlStm> {
    let label = label(node);
    let stm = match node.kind() {
        SyntaxKind::SIGNAL_ASSIGN => conditional_assign(node, label, false)?,
        SyntaxKind::VARIABLE_ASSIGN => conditional_assign(node, label, true)?,
        SyntaxKind::IF_STMT => {
            let elifs = children(node, SyntaxKind::ELSIF_CLAUSE)
                .map(|clause| {
                    Ok((
                        expr(&operand(&clause, 0, "condition")?)?,
                        body_of(ctx, &clause)?,
                    ))
                })
                .collect::<BuildResult<Vec<_>>>()?;
            let if_false = child(node, SyntaxKind::ELSE_CLAUSE)
                .map(|clause| body_of(ctx, &clause))
                .transpose()?;
            HdlStm::If {
                label,
                cond: expr(&operand(node, 0, "condition")?)?,
                if_true: body_of(ctx, node)?,
                elifs,
                if_false,
            }
        }
        SyntaxKind::CASE_STMT => {
            let mut cases = Vec::new();
            let mut default = None;
            for alternative in children(node, SyntaxKind::CASE_ALT) {
                let choice_list = child(&alternative, SyntaxKind::CHOICES)
                    .ok_or_else(|| missing(&alternative, "choices"))?;
                let choices = choices(&choice_list)?;
                let body = body_of(ctx, &alternative)?;
                if choices.contains(&HdlExpr::Others) {
                    default = Some(body);
                } else {
                    cases.push(HdlCaseAlt { choices, body });
                }
            }
            HdlStm::Case {
                label,
                kind: HdlCaseKind::Case,
                switch_on: expr(&operand(node, 0, "case selector")?)?,
                cases,
                default,
            }
        }
        SyntaxKind::FOR_LOOP => HdlStm::ForIn {
            label,
            var: first_name(node, "loop parameter")?,
            range: required_after(node, SyntaxKind::IN_KW, "loop range")?,
            body: body_of(ctx, node)?,
        },
        SyntaxKind::WHILE_LOOP => HdlStm::While {
            label,
            cond: Some(expr(&operand(node, 0, "loop condition")?)?),
            body: body_of(ctx, node)?,
        },
        SyntaxKind::LOOP_STMT => HdlStm::While {
            label,
            cond: None,
            body: body_of(ctx, node)?,
        },
        SyntaxKind::NEXT_STMT => HdlStm::Continue {
            label: ident_tokens(node).next().map(|t| name(&t)),
            cond: opt_expr(node_after(node, SyntaxKind::WHEN_KW))?,
        },
        SyntaxKind::EXIT_STMT => HdlStm::Break {
            label: ident_tokens(node).next().map(|t| name(&t)),
            cond: opt_expr(node_after(node, SyntaxKind::WHEN_KW))?,
        },
        SyntaxKind::RETURN_STMT => HdlStm::Return(opt_expr(operands(node).next())?),
        SyntaxKind::NULL_STMT => HdlStm::Nop,
        SyntaxKind::WAIT_STMT => {
            let sensitivity = match child(node, SyntaxKind::SENSITIVITY_LIST) {
                Some(list) => sensitivity_list(&list)?,
                None => Vec::new(),
            };
            HdlStm::Wait {
                sensitivity,
                condition: opt_expr(node_after(node, SyntaxKind::UNTIL_KW))?,
                timeout: opt_expr(node_after(node, SyntaxKind::FOR_KW))?,
            }
        }
        SyntaxKind::ASSERT_STMT => assert_stmt(node)?,
        SyntaxKind::REPORT_STMT => HdlStm::Report {
            report: expr(&operand(node, 0, "report message")?)?,
            severity: opt_expr(node_after(node, SyntaxKind::SEVERITY_KW))?,
        },
        SyntaxKind::CALL_STMT => HdlStm::Call(expr(&operand(node, 0, "procedure call")?)?),
        _ => return Err(unexpected(node, "unexpected sequential statement")),
    };
    Ok(stm)
}

// ============================================================================
// Expressions
// ============================================================================

fn choices(node: &SyntaxNode) -> BuildResult<Vec<HdlExpr>> {
    node.children().map(|n| expr(&n)).collect()
}

/// Elements of an association list or aggregate; a named element becomes
/// one `formal => actual` association per choice.
fn associations(node: &SyntaxNode) -> BuildResult<Vec<HdlExpr>> {
    let mut out = Vec::new();
    for element in children(node, SyntaxKind::ELEMENT) {
        match child(&element, SyntaxKind::CHOICES) {
            Some(choice_list) => {
                let actual = required_after(&element, SyntaxKind::FAT_ARROW, "associated value")?;
                for formal in choices(&choice_list)? {
                    out.push(HdlExpr::binary(
                        HdlOpType::MapAssociation,
                        formal,
                        actual.clone(),
                    ));
                }
            }
            None => out.push(expr(&operand(&element, 0, "element value")?)?),
        }
    }
    Ok(out)
}

fn binary_op(kind: SyntaxKind) -> Option<HdlOpType> {
    let op = match kind {
        SyntaxKind::AND_KW => HdlOpType::And,
        SyntaxKind::OR_KW => HdlOpType::Or,
        SyntaxKind::XOR_KW => HdlOpType::Xor,
        SyntaxKind::XNOR_KW => HdlOpType::Xnor,
        SyntaxKind::NAND_KW => HdlOpType::Nand,
        SyntaxKind::NOR_KW => HdlOpType::Nor,
        SyntaxKind::EQ => HdlOpType::Eq,
        SyntaxKind::SLASH_EQ => HdlOpType::Neq,
        SyntaxKind::LT => HdlOpType::Lt,
        SyntaxKind::LT_EQ => HdlOpType::Le,
        SyntaxKind::GT => HdlOpType::Gt,
        SyntaxKind::GT_EQ => HdlOpType::Ge,
        SyntaxKind::SLL_KW => HdlOpType::Sll,
        SyntaxKind::SRL_KW => HdlOpType::Srl,
        SyntaxKind::SLA_KW => HdlOpType::Sla,
        SyntaxKind::SRA_KW => HdlOpType::Sra,
        SyntaxKind::ROL_KW => HdlOpType::Rol,
        SyntaxKind::ROR_KW => HdlOpType::Ror,
        SyntaxKind::PLUS => HdlOpType::Add,
        SyntaxKind::MINUS => HdlOpType::Sub,
        SyntaxKind::AMP => HdlOpType::Concat,
        SyntaxKind::STAR => HdlOpType::Mul,
        SyntaxKind::SLASH => HdlOpType::Div,
        SyntaxKind::MOD_KW => HdlOpType::Mod,
        SyntaxKind::REM_KW => HdlOpType::Rem,
        SyntaxKind::STAR_STAR => HdlOpType::Pow,
        _ => return None,
    };
    Some(op)
}

fn unary_op(kind: SyntaxKind) -> Option<HdlOpType> {
    let op = match kind {
        SyntaxKind::MINUS => HdlOpType::Neg,
        SyntaxKind::PLUS => HdlOpType::Plus,
        SyntaxKind::NOT_KW => HdlOpType::Not,
        SyntaxKind::ABS_KW => HdlOpType::Abs,
        SyntaxKind::AND_KW => HdlOpType::AndReduce,
        SyntaxKind::OR_KW => HdlOpType::OrReduce,
        SyntaxKind::XOR_KW => HdlOpType::XorReduce,
        SyntaxKind::NAND_KW => HdlOpType::NandReduce,
        SyntaxKind::NOR_KW => HdlOpType::NorReduce,
        SyntaxKind::XNOR_KW => HdlOpType::XnorReduce,
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
    let token = significant_tokens(node)
        .next()
        .ok_or_else(|| missing(node, "literal"))?;
    let text = token.text();
    let value = match token.kind() {
        SyntaxKind::INTEGER => HdlExpr::Int(literal::decimal(text)),
        SyntaxKind::REAL => HdlExpr::Float(text.into()),
        SyntaxKind::BASED_LITERAL => match literal::vhdl_based(text) {
            Some(value) => HdlExpr::Int(value),
            None => HdlExpr::Float(text.into()),
        },
        SyntaxKind::BIT_STRING => HdlExpr::Int(
            literal::vhdl_bit_string(text)
                .ok_or_else(|| unexpected(node, "malformed bit string"))?,
        ),
        SyntaxKind::STRING => HdlExpr::Str(literal::vhdl_string(text)),
        SyntaxKind::CHAR_LITERAL => HdlExpr::Char(
            literal::vhdl_char(text).ok_or_else(|| unexpected(node, "malformed character"))?,
        ),
        SyntaxKind::NULL_KW => HdlExpr::Null,
        SyntaxKind::OPEN_KW => HdlExpr::Open,
        SyntaxKind::OTHERS_KW => HdlExpr::Others,
        _ => return Err(unexpected(node, "unexpected literal")),
    };
    Ok(value)
}

/// Lower an expression, name, range or subtype indication.
pub(super) fn expr(node: &SyntaxNode) -> BuildResult<HdlExpr> {
    let lhs = || operand(node, 0, "operand");
    let rhs = || operand(node, 1, "operand");
    let value = match node.kind() {
        SyntaxKind::LITERAL => literal_value(node)?,
        SyntaxKind::PHYSICAL_LITERAL => HdlExpr::Physical {
            value: Box::new(expr(&lhs()?)?),
            unit: first_name(node, "unit")?,
        },
        SyntaxKind::NAME_REF => {
            let token = significant_tokens(node)
                .next()
                .ok_or_else(|| missing(node, "name"))?;
            HdlExpr::Id(name(&token))
        }
        SyntaxKind::SELECTED_NAME => {
            let suffix = significant_tokens(node)
                .last()
                .ok_or_else(|| missing(node, "suffix"))?;
            let suffix = match suffix.kind() {
                SyntaxKind::ALL_KW => HdlExpr::All,
                SyntaxKind::CHAR_LITERAL => HdlExpr::Char(
                    literal::vhdl_char(suffix.text())
                        .ok_or_else(|| unexpected(node, "malformed character"))?,
                ),
                _ => HdlExpr::Id(name(&suffix)),
            };
            HdlExpr::binary(HdlOpType::Dot, expr(&lhs()?)?, suffix)
        }
        SyntaxKind::CALL_EXPR => {
            let prefix = expr(&lhs()?)?;
            let args =
                child(node, SyntaxKind::ARG_LIST).ok_or_else(|| missing(node, "arguments"))?;
            let elements: Vec<_> = children(&args, SyntaxKind::ELEMENT).collect();
            match elements.as_slice() {
                [single] if child(single, SyntaxKind::CHOICES).is_none() => HdlExpr::binary(
                    HdlOpType::Index,
                    prefix,
                    expr(&operand(single, 0, "index")?)?,
                ),
                _ => {
                    let mut ops = vec![prefix];
                    ops.extend(associations(&args)?);
                    HdlExpr::op(HdlOpType::Call, ops)
                }
            }
        }
        SyntaxKind::ATTRIBUTE_NAME => {
            let designator = significant_tokens(node)
                .last()
                .ok_or_else(|| missing(node, "attribute designator"))?;
            HdlExpr::binary(HdlOpType::Apostrophe, expr(&lhs()?)?, HdlExpr::Id(name(&designator)))
        }
        SyntaxKind::QUALIFIED_EXPR => {
            let inner = rhs()?;
            let value = match inner.kind() {
                SyntaxKind::PAREN_EXPR => {
                    HdlExpr::Aggregate(vec![expr(&operand(&inner, 0, "operand")?)?])
                }
                SyntaxKind::AGGREGATE => expr(&inner)?,
                _ => return Err(unexpected(&inner, "unexpected qualified operand")),
            };
            HdlExpr::binary(HdlOpType::Apostrophe, expr(&lhs()?)?, value)
        }
        SyntaxKind::PAREN_EXPR => expr(&lhs()?)?,
        SyntaxKind::AGGREGATE => HdlExpr::Aggregate(associations(node)?),
        SyntaxKind::BINARY_EXPR => {
            HdlExpr::binary(operator(node, binary_op)?, expr(&lhs()?)?, expr(&rhs()?)?)
        }
        SyntaxKind::UNARY_EXPR => HdlExpr::unary(operator(node, unary_op)?, expr(&lhs()?)?),
        SyntaxKind::RANGE_EXPR => {
            let direction = if has_token(node, SyntaxKind::DOWNTO_KW) {
                HdlOpType::Downto
            } else {
                HdlOpType::To
            };
            HdlExpr::binary(direction, expr(&lhs()?)?, expr(&rhs()?)?)
        }
        SyntaxKind::CONSTRAINED_TYPE => {
            let constraint = if has_token(node, SyntaxKind::BOX) {
                HdlExpr::Unbounded
            } else {
                expr(&rhs()?)?
            };
            HdlExpr::binary(HdlOpType::Range, expr(&lhs()?)?, constraint)
        }
        SyntaxKind::RESOLVED_TYPE => {
            HdlExpr::binary(HdlOpType::Resolved, expr(&lhs()?)?, expr(&rhs()?)?)
        }
        _ => return Err(unexpected(node, "unexpected expression")),
    };
    Ok(value)
}
