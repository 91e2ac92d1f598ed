use clap::Parser;
use std::fs;

use super::args::CliArgs;
use super::driver;
use crate::error::GenumError;

fn args(dir: &std::path::Path, file: &str, extra: &[&str]) -> CliArgs {
    let mut argv = vec![
        "genum".to_string(),
        "--file".to_string(),
        file.to_string(),
        "--dir".to_string(),
        dir.display().to_string(),
    ];
    argv.extend(extra.iter().map(|arg| arg.to_string()));
    CliArgs::try_parse_from(argv).expect("args should parse")
}

#[test]
fn discover_does_not_write() {
    let temp = tempfile::tempdir().expect("temp dir");
    fs::write(
        temp.path().join("color.go"),
        "package colors\n\n//go:generate genum -type=Color\ntype Color int\n\nconst ColorRed Color = 1\n",
    )
    .expect("write source");

    let units = driver::discover(&args(temp.path(), "color.go", &[])).expect("discover");
    assert_eq!(units.len(), 1);
    assert_eq!(units[0].output, "color_genum.go");
    assert!(!temp.path().join("color_genum.go").exists());
}

#[test]
fn run_reports_missing_package() {
    let temp = tempfile::tempdir().expect("temp dir");
    let err = driver::run(&args(temp.path(), "color.go", &[])).expect_err("empty dir");
    assert!(matches!(err, GenumError::PackageNotFound));
}
