use clap::Parser;

use super::args::CliArgs;
use crate::loader::LoadMode;
use std::path::PathBuf;

#[test]
fn parses_defaults() {
    let args = CliArgs::try_parse_from(["genum", "--file", "color.go"])
        .expect("default args should parse");

    assert_eq!(args.file, "color.go");
    assert_eq!(args.dir, PathBuf::from("."));
    assert!(!args.syntax_only);
    assert!(!args.list);
    assert!(args.directive_args.is_empty());
    assert_eq!(args.load_mode(), LoadMode::Full);
}

#[test]
fn parses_all_flags() {
    let args = CliArgs::try_parse_from([
        "genum",
        "--file",
        "role.go",
        "--dir",
        "pkg/model",
        "--syntax-only",
        "--list",
    ])
    .expect("flags should parse");

    assert_eq!(args.dir, PathBuf::from("pkg/model"));
    assert!(args.list);
    let config = args.loader_config();
    assert_eq!(config.target_file, "role.go");
    assert_eq!(config.dir, PathBuf::from("pkg/model"));
    assert_eq!(config.mode, LoadMode::Syntax);
}

#[test]
fn accepts_directive_arguments() {
    let args = CliArgs::try_parse_from([
        "genum",
        "--file",
        "color.go",
        "-type=Color",
        "-output=color_enum.go",
    ])
    .expect("directive arguments should be accepted");

    assert_eq!(args.directive_args, vec!["-type=Color", "-output=color_enum.go"]);
}
