//! Assertions over parse results.

use hdlconv::{HdlModuleDec, HdlNamespace, HdlObject, ParseResult};

/// The top-level object at `index`, with its kind spelled out on failure.
pub fn object_at(result: &ParseResult, index: usize) -> &HdlObject {
    result.objs.get(index).unwrap_or_else(|| {
        panic!(
            "expected an object at index {index}, found {} objects",
            result.objs.len()
        )
    })
}

pub fn namespace_at(result: &ParseResult, index: usize) -> &HdlNamespace {
    match object_at(result, index) {
        HdlObject::Namespace(ns) => ns,
        other => panic!("expected a package at index {index}, found {other:?}"),
    }
}

/// Entity or component declarations directly under `objs`
pub fn module_decs(objs: &[HdlObject]) -> Vec<&HdlModuleDec> {
    objs.iter()
        .filter_map(|obj| match obj {
            HdlObject::ModuleDec(dec) => Some(dec),
            _ => None,
        })
        .collect()
}

/// Names of the top-level objects, `-` for anonymous ones
pub fn top_level_names(result: &ParseResult) -> Vec<String> {
    result
        .objs
        .iter()
        .map(|obj| obj.name().map_or_else(|| "-".to_string(), |n| n.to_string()))
        .collect()
}
