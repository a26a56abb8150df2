//! Paths to the sources under `tests/data`.

use std::path::{Path, PathBuf};

use hdlconv::{Language, ParseResult};
use walkdir::WalkDir;

pub fn data_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests").join("data")
}

pub fn fixture(relative: &str) -> PathBuf {
    data_dir().join(relative)
}

/// Parse a well-formed fixture, panicking with the error message otherwise.
pub fn parse_fixture(relative: &str) -> ParseResult {
    let path = fixture(relative);
    let language = Language::from_path(&path)
        .unwrap_or_else(|e| panic!("{}: {e}", path.display()));
    hdlconv::parse_file(&path, language).unwrap_or_else(|e| panic!("{e}"))
}

/// Every HDL source below `subdir`, sorted by path
pub fn sources_in(subdir: &str) -> Vec<PathBuf> {
    let mut paths: Vec<PathBuf> = WalkDir::new(data_dir().join(subdir))
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| Language::from_path(path).is_ok())
        .collect();
    paths.sort();
    paths
}

/// The golden text next to `source`, if there is one
pub fn golden_for(source: &Path) -> Option<PathBuf> {
    let mut name = source.file_name()?.to_os_string();
    name.push(".ref");
    let golden = source.with_file_name(name);
    golden.is_file().then_some(golden)
}
