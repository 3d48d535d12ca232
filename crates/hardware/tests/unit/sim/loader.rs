//! Program and configuration loading from disk.

use std::io::Write;

use pretty_assertions::assert_eq;
use rstest::rstest;
use tempfile::NamedTempFile;

use o3sim_core::common::{ParseErrorKind, SimError};
use o3sim_core::isa::{DecodedInstruction, Opcode};
use o3sim_core::sim::{load_config, load_program};

fn temp_file(suffix: &str, contents: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn test_loads_assembly_listing() {
    let file = temp_file(".s", "li r1, 2\nadd r2, r1, r1 # double\n");
    let program = load_program(file.path()).unwrap();
    assert_eq!(
        program,
        vec![
            DecodedInstruction::li(1, 2),
            DecodedInstruction::r(Opcode::Add, 2, 1, 1)
        ]
    );
}

#[test]
fn test_loads_json_program() {
    let file = temp_file(
        ".JSON",
        r#"[
            { "opcode": "li", "rd": 1, "imm": 7 },
            { "opcode": "mov", "rd": 2, "rs1": 1 },
            { "opcode": "nop" }
        ]"#,
    );
    let program = load_program(file.path()).unwrap();
    assert_eq!(
        program,
        vec![
            DecodedInstruction::li(1, 7),
            DecodedInstruction::mov(2, 1),
            DecodedInstruction::nop()
        ]
    );
}

fn missing(mnemonic: &str, field: &'static str) -> ParseErrorKind {
    ParseErrorKind::MissingField {
        mnemonic: mnemonic.to_string(),
        field,
    }
}

fn unexpected(mnemonic: &str, field: &'static str) -> ParseErrorKind {
    ParseErrorKind::UnexpectedField {
        mnemonic: mnemonic.to_string(),
        field,
    }
}

#[rstest]
#[case(r#"{ "opcode": "nop", "rd": 3 }"#, unexpected("nop", "rd"))]
#[case(r#"{ "opcode": "li", "rd": 4 }"#, missing("li", "imm"))]
#[case(r#"{ "opcode": "li", "rd": 4, "rs1": 3, "imm": 1 }"#, unexpected("li", "rs1"))]
#[case(r#"{ "opcode": "add", "rd": 1, "rs1": 2 }"#, missing("add", "rs2"))]
#[case(r#"{ "opcode": "mov", "rd": 1, "rs1": 2, "imm": 0 }"#, unexpected("mov", "imm"))]
fn test_json_fields_must_match_format(#[case] bad: &str, #[case] expected: ParseErrorKind) {
    let text = format!(r#"[{{ "opcode": "li", "rd": 3, "imm": 9 }}, {bad}]"#);
    let file = temp_file(".json", &text);
    match load_program(file.path()) {
        Err(SimError::MalformedInstruction { index, kind }) => {
            assert_eq!(index, 1);
            assert_eq!(kind, expected);
        }
        other => panic!("expected malformed instruction, got {other:?}"),
    }
}

#[test]
fn test_parse_error_carries_line() {
    let file = temp_file(".s", "nop\nnop\nfrobnicate r1\n");
    match load_program(file.path()) {
        Err(SimError::Parse(err)) => assert_eq!(err.line, 3),
        other => panic!("expected parse error, got {other:?}"),
    }
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("absent.s");
    assert!(matches!(load_program(&missing), Err(SimError::Io(_))));
}

#[test]
fn test_load_config_validates() {
    let good = temp_file(".json", r#"{ "scheduler": { "window_size": 4 } }"#);
    assert_eq!(load_config(good.path()).unwrap().scheduler.window_size, 4);

    let bad = temp_file(".json", r#"{ "scheduler": { "window_size": 0 } }"#);
    assert!(matches!(load_config(bad.path()), Err(SimError::Config(_))));

    let broken = temp_file(".json", "{ not json");
    assert!(matches!(load_config(broken.path()), Err(SimError::Json(_))));
}
