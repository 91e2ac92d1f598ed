//! Package loading: read, parse and check the Go files of one directory.
//!
//! Files are selected the way `go build` would for the configured
//! [`BuildContext`]: test files, `.`/`_` prefixed names, `_GOOS`/`_GOARCH`
//! suffixes for other platforms and unsatisfied build constraints are left
//! out.

use crate::build_tags::BuildContext;
use crate::error::GenumError;
use genum_checker::{TypeInfo, check_package};
use genum_parser::{ParserState, SourceFile};
use std::path::{Path, PathBuf};
use std::{fs, io};
use tracing::{Level, debug, span, warn};
use walkdir::WalkDir;

/// How much of the package to analyse.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LoadMode {
    /// Parse and type-check
    #[default]
    Full,
    /// Parse only; constants are matched lexically
    Syntax,
}

#[derive(Clone, Debug)]
pub struct LoaderConfig {
    pub dir: PathBuf,
    /// Base name of the file holding the directives (`$GOFILE`)
    pub target_file: String,
    pub mode: LoadMode,
    /// Platform used to evaluate file name suffixes and build constraints
    pub build: BuildContext,
}

/// A loaded package. Immutable once built.
pub struct Package {
    pub name: String,
    pub dir: PathBuf,
    pub files: Vec<SourceFile>,
    /// Index of the processed file in `files`
    pub target: usize,
    /// `None` in `LoadMode::Syntax`
    pub info: Option<TypeInfo>,
}

impl Package {
    pub fn target_file(&self) -> &SourceFile {
        &self.files[self.target]
    }

    pub fn target_file_name(&self) -> &str {
        &self.target_file().file_name
    }
}

/// Load the package in `config.dir`.
pub fn load_package(config: &LoaderConfig) -> Result<Package, GenumError> {
    let _span = span!(Level::DEBUG, "load_package", dir = %config.dir.display()).entered();

    let mut files = Vec::new();
    for path in go_files(&config.dir, &config.build)? {
        let text = fs::read_to_string(&path).map_err(|source| read_error(&path, source))?;
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        let file = parse_file(file_name, text);
        if !matches_constraint(&file, &config.build) {
            debug!(file = %file.file_name, "skipping file excluded by build constraint");
            continue;
        }
        files.push(file);
    }

    build_package(config.dir.clone(), files, &config.target_file, config.mode)
}

/// Assemble a package from already parsed files.
pub fn build_package(
    dir: PathBuf,
    files: Vec<SourceFile>,
    target_file: &str,
    mode: LoadMode,
) -> Result<Package, GenumError> {
    let mut names: Vec<String> = Vec::new();
    for file in &files {
        if !names.contains(&file.package.name) {
            names.push(file.package.name.clone());
        }
    }
    if names.len() > 1 {
        return Err(GenumError::MultiplePackages(names));
    }
    let Some(name) = names.pop() else {
        return Err(GenumError::PackageNotFound);
    };

    let Some(target) = files.iter().position(|file| file.file_name == target_file) else {
        return Err(GenumError::FileNotInPackage {
            file: target_file.to_string(),
            package: name,
        });
    };

    let info = match mode {
        LoadMode::Full => {
            let info = check_package(&files);
            for diag in info.diagnostics() {
                debug!(
                    file = %files[diag.file].file_name,
                    pos = diag.pos,
                    message = %diag.message,
                    "check diagnostic"
                );
            }
            Some(info)
        }
        LoadMode::Syntax => None,
    };

    debug!(package = %name, files = files.len(), "loaded package");
    Ok(Package {
        name,
        dir,
        files,
        target,
        info,
    })
}

/// Parse one file, logging (but otherwise tolerating) syntax errors.
pub fn parse_file(file_name: String, text: String) -> SourceFile {
    let mut parser = ParserState::new(file_name, text);
    let file = parser.parse_source_file();
    for diag in parser.get_diagnostics() {
        warn!(
            file = %file.file_name,
            line = diag.line,
            message = %diag.message,
            "syntax error"
        );
    }
    file
}

/// Non-test `.go` files directly inside `dir` whose name suffixes match
/// `build`, sorted by name.
fn go_files(dir: &Path, build: &BuildContext) -> Result<Vec<PathBuf>, GenumError> {
    let mut paths = Vec::new();
    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|err| read_error(dir, io::Error::from(err)))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        if !is_go_source(&name) {
            continue;
        }
        if !build.matches_file_name(&name) {
            debug!(file = %name, goos = %build.goos, goarch = %build.goarch, "skipping file for another platform");
            continue;
        }
        paths.push(entry.into_path());
    }
    Ok(paths)
}

/// Go ignores test files and names starting with `.` or `_`.
fn is_go_source(name: &str) -> bool {
    name.ends_with(".go") && !name.ends_with("_test.go") && !name.starts_with(['.', '_'])
}

/// Whether the header constraint of `file` holds. Malformed constraints
/// are reported and the file is kept.
fn matches_constraint(file: &SourceFile, build: &BuildContext) -> bool {
    match build.matches_header(file.header_comments()) {
        Some(matches) => matches,
        None => {
            warn!(file = %file.file_name, "malformed build constraint");
            true
        }
    }
}

fn read_error(path: &Path, source: io::Error) -> GenumError {
    GenumError::Read {
        path: path.display().to_string(),
        source,
    }
}

#[cfg(test)]
#[path = "tests/loader_tests.rs"]
mod loader_tests;
