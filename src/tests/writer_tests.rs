//! Tests for emitter/writer.rs

use super::*;
use crate::emitter::render_unit;
use crate::model::{BaseType, CaseHandling, Enum, EnumValue, GenerationUnit};
use std::fs;

fn unit() -> GenerationUnit {
    GenerationUnit {
        package: "colors".to_string(),
        source: "color.go".to_string(),
        output: "color_genum.go".to_string(),
        needs_strings: false,
        enums: vec![Enum {
            type_name: "Color".to_string(),
            base_type: BaseType::Basic("int".to_string()),
            trim_prefix: "Color".to_string(),
            case: CaseHandling::Sensitive,
            values: vec![EnumValue {
                name: "ColorRed".to_string(),
                value: "0".to_string(),
            }],
        }],
    }
}

#[test]
fn test_write_output_keeps_single_trailing_newline() {
    let temp = tempfile::tempdir().expect("temp dir");
    let code = render_unit(&unit()).expect("render");
    let path = write_output(temp.path(), "color_genum.go", &code).expect("write");

    let written = fs::read_to_string(&path).expect("read back");
    assert_eq!(written, code);
    assert!(written.ends_with("}\n"));
    assert!(!written.ends_with("\n\n"));
    assert!(!written.starts_with(char::is_whitespace));
}

#[test]
fn test_write_output_truncates_existing_file() {
    let temp = tempfile::tempdir().expect("temp dir");
    fs::write(temp.path().join("out.go"), "a much longer previous body\n").expect("seed");
    let path = write_output(temp.path(), "out.go", "package x\n").expect("write");
    assert_eq!(path, temp.path().join("out.go"));
    assert_eq!(fs::read_to_string(&path).expect("read back"), "package x\n");
}

#[cfg(unix)]
#[test]
fn test_write_output_mode() {
    use std::os::unix::fs::PermissionsExt;

    let temp = tempfile::tempdir().expect("temp dir");
    let path = write_output(temp.path(), "mode.go", "package x\n").expect("write");
    let mode = fs::metadata(&path).expect("metadata").permissions().mode();
    assert_eq!(mode & 0o777 & !0o644, 0);
}
