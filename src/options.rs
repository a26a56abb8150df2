//! Per-call parse configuration

use std::path::{Path, PathBuf};

use crate::language::Language;

/// How one source unit is parsed.
///
/// ```
/// use hdlconv::{Language, ParseOptions};
///
/// let options = ParseOptions::new(Language::Vhdl)
///     .with_file("rtl/top.vhd")
///     .with_collect_docs(false);
/// assert_eq!(options.language, Language::Vhdl);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseOptions {
    pub language: Language,
    /// Reported in error locations; also the file read by [`crate::parse_file`]
    pub file: Option<PathBuf>,
    /// Keep the line comments written above design units, components,
    /// types and subprograms
    pub collect_docs: bool,
}

impl ParseOptions {
    pub fn new(language: Language) -> Self {
        Self {
            language,
            file: None,
            collect_docs: true,
        }
    }

    /// Options for a file, with the dialect taken from its extension
    pub fn for_path(path: impl AsRef<Path>) -> Result<Self, crate::ConfigurationError> {
        let path = path.as_ref();
        Ok(Self::new(Language::from_path(path)?).with_file(path))
    }

    pub fn with_language(mut self, language: Language) -> Self {
        self.language = language;
        self
    }

    pub fn with_file(mut self, file: impl Into<PathBuf>) -> Self {
        self.file = Some(file.into());
        self
    }

    pub fn with_collect_docs(mut self, collect_docs: bool) -> Self {
        self.collect_docs = collect_docs;
        self
    }
}

impl From<Language> for ParseOptions {
    fn from(language: Language) -> Self {
        Self::new(language)
    }
}
