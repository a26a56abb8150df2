//! Identifiers and source positions

use std::fmt;
use std::hash::{Hash, Hasher};

use smol_str::SmolStr;

use crate::base::Span;

/// An identifier as written in the source.
///
/// Equality and hashing go through a comparison key: ASCII-lowercased for
/// VHDL basic identifiers, the exact spelling for VHDL extended identifiers
/// and everything Verilog. The original spelling is kept for output.
///
/// A case-folded name never equals a case-sensitive one, whatever the
/// spelling, so `vhdl("foo") != exact("foo")` in either order. Comparing a
/// name against a `str` follows the name's own rule.
#[derive(Clone, Debug)]
pub struct HdlName {
    text: SmolStr,
    key: SmolStr,
    folded: bool,
}

impl HdlName {
    /// A VHDL identifier: basic identifiers fold case, `\extended\` ones do not.
    pub fn vhdl(text: impl Into<SmolStr>) -> Self {
        let text = text.into();
        if text.starts_with('\\') {
            return Self::exact(text);
        }
        let key = if text.bytes().any(|b| b.is_ascii_uppercase()) {
            SmolStr::new(text.to_ascii_lowercase())
        } else {
            text.clone()
        };
        Self {
            text,
            key,
            folded: true,
        }
    }

    /// A case-sensitive identifier (Verilog, escaped names).
    pub fn exact(text: impl Into<SmolStr>) -> Self {
        let text = text.into();
        Self {
            key: text.clone(),
            text,
            folded: false,
        }
    }

    /// Source spelling
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Comparison key
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn is_case_sensitive(&self) -> bool {
        !self.folded
    }
}

impl PartialEq for HdlName {
    fn eq(&self, other: &Self) -> bool {
        self.folded == other.folded && self.key == other.key
    }
}

impl Eq for HdlName {}

impl Hash for HdlName {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.folded.hash(state);
        self.key.hash(state);
    }
}

impl PartialEq<str> for HdlName {
    fn eq(&self, other: &str) -> bool {
        if self.folded {
            self.text.eq_ignore_ascii_case(other)
        } else {
            self.text == other
        }
    }
}

impl PartialEq<&str> for HdlName {
    fn eq(&self, other: &&str) -> bool {
        *self == **other
    }
}

impl fmt::Display for HdlName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

#[cfg(feature = "json")]
impl serde::Serialize for HdlName {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.text)
    }
}

/// Where a declaration came from.
///
/// Location metadata never takes part in structural equality, so two trees
/// parsed from differently formatted sources still compare equal.
#[derive(Clone, Copy, Debug, Default)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct HdlPosition(pub Option<Span>);

impl HdlPosition {
    pub fn new(span: Span) -> Self {
        Self(Some(span))
    }

    pub fn span(&self) -> Option<Span> {
        self.0
    }
}

impl PartialEq for HdlPosition {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

impl Eq for HdlPosition {}

impl Hash for HdlPosition {
    fn hash<H: Hasher>(&self, _state: &mut H) {}
}
