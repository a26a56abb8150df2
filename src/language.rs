//! Dialect selection

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::error::ConfigurationError;

/// An HDL dialect
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub enum Language {
    Vhdl,
    Verilog,
    /// Recognised, but there is no front-end for it
    SystemVerilog,
}

impl Language {
    pub const ALL: [Language; 3] = [Self::Vhdl, Self::Verilog, Self::SystemVerilog];

    pub fn name(self) -> &'static str {
        match self {
            Self::Vhdl => "vhdl",
            Self::Verilog => "verilog",
            Self::SystemVerilog => "systemverilog",
        }
    }

    /// Map a file extension (without the dot) to a dialect
    pub fn from_extension(ext: &str) -> Result<Self, ConfigurationError> {
        match ext.to_ascii_lowercase().as_str() {
            "vhd" | "vhdl" => Ok(Self::Vhdl),
            "v" => Ok(Self::Verilog),
            "sv" | "svh" => Ok(Self::SystemVerilog),
            _ => Err(ConfigurationError::UnknownExtension(ext.to_string())),
        }
    }

    pub fn from_path(path: &Path) -> Result<Self, ConfigurationError> {
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or_default();
        Self::from_extension(ext)
    }

    /// Identifiers compare case-sensitively in this dialect
    pub fn is_case_sensitive(self) -> bool {
        !matches!(self, Self::Vhdl)
    }
}

impl FromStr for Language {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "vhdl" => Ok(Self::Vhdl),
            "verilog" => Ok(Self::Verilog),
            "systemverilog" | "sv" => Ok(Self::SystemVerilog),
            _ => Err(ConfigurationError::UnknownDialect(s.to_string())),
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
