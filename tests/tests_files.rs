//! File-based entry points: `parse_file`, `parse_files` and `Source::File`.

#[path = "helpers/mod.rs"]
mod helpers;

use std::fs;
use std::path::PathBuf;

use hdlconv::{HdlObject, Language, ParseErrorKind, ParseOptions, Source};
use helpers::fixtures::{fixture, sources_in};
use tempfile::TempDir;

fn write_sources(dir: &TempDir, count: usize) -> Vec<PathBuf> {
    (0..count)
        .map(|i| {
            let path = dir.path().join(format!("unit_{i}.vhd"));
            let text = format!(
                "entity unit_{i} is\n  port (d : in bit_vector({i} downto 0));\nend entity;\n"
            );
            fs::write(&path, text).expect("write source");
            path
        })
        .collect()
}

#[test]
fn test_parse_files_keeps_input_order() {
    let dir = TempDir::new().expect("temp dir");
    let paths = write_sources(&dir, 16);
    let results = hdlconv::parse_files(&paths, Language::Vhdl);
    assert_eq!(results.len(), paths.len());
    for (i, result) in results.into_iter().enumerate() {
        let result = result.unwrap_or_else(|e| panic!("{e}"));
        let [HdlObject::ModuleDec(entity)] = result.objs.as_slice() else {
            panic!("expected one entity in unit_{i}");
        };
        assert_eq!(entity.name, format!("unit_{i}").as_str());
    }
}

#[test]
fn test_parse_files_matches_sequential_parsing() {
    let paths = sources_in("vhdl");
    let parallel = hdlconv::parse_files(&paths, Language::Vhdl);
    for (path, result) in paths.iter().zip(parallel) {
        let sequential = hdlconv::parse_file(path, Language::Vhdl).unwrap_or_else(|e| panic!("{e}"));
        assert_eq!(
            result.unwrap_or_else(|e| panic!("{e}")),
            sequential,
            "{}",
            path.display()
        );
    }
}

#[test]
fn test_one_bad_file_does_not_affect_the_others() {
    let dir = TempDir::new().expect("temp dir");
    let mut paths = write_sources(&dir, 2);
    paths.insert(1, dir.path().join("missing.vhd"));
    paths.push(fixture("malformed/malformed.vhdl"));

    let results = hdlconv::parse_files(&paths, Language::Vhdl);
    assert!(results[0].is_ok());
    assert_eq!(
        results[1].as_ref().err().and_then(|e| e.as_parse()).map(|e| e.kind),
        Some(ParseErrorKind::Io)
    );
    assert!(results[2].is_ok());
    assert_eq!(
        results[3].as_ref().err().and_then(|e| e.as_parse()).map(|e| e.kind),
        Some(ParseErrorKind::Syntax)
    );
}

#[test]
fn test_file_source_matches_text_source() {
    let path = fixture("vhdl/mux.vhd");
    let text = fs::read_to_string(&path).expect("read fixture");
    let from_file = hdlconv::parse(Source::File(&path), Language::Vhdl).unwrap_or_else(|e| panic!("{e}"));
    let from_text = hdlconv::parse(&text, Language::Vhdl).unwrap_or_else(|e| panic!("{e}"));
    assert_eq!(from_file, from_text);
}

#[test]
fn test_error_names_the_file() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("bad.v");
    fs::write(&path, "module m(\n").expect("write source");
    let options = ParseOptions::new(Language::Verilog);
    let err = hdlconv::parse_with(&path, &options).unwrap_err();
    let err = err.as_parse().expect("a parse error");
    assert_eq!(err.location.file.as_deref(), Some(path.as_path()));
}

#[test]
fn test_missing_file_is_an_io_error() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("gone.vhd");
    let err = hdlconv::parse_file(&path, Language::Vhdl).unwrap_err();
    let err = err.as_parse().expect("a parse error");
    assert_eq!(err.kind, ParseErrorKind::Io);
    assert_eq!(err.code, None);
    assert!(err.message.contains("gone.vhd"), "{}", err.message);
}
