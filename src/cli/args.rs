use clap::Parser;
use std::path::PathBuf;

use crate::build_tags::BuildContext;
use crate::loader::{LoadMode, LoaderConfig};

/// CLI arguments for the genum binary.
///
/// `go generate` runs the directive's command line (`genum -type=Color ...`)
/// with `$GOFILE` set to the file containing it. Those directive arguments
/// are accepted and ignored: directives are read from the source instead.
#[derive(Parser, Debug)]
#[command(
    name = "genum",
    version,
    about = "Generate String, IsValid and Parse helpers for Go enums"
)]
pub struct CliArgs {
    /// Base name of the Go file whose directives are processed.
    #[arg(long, env = "GOFILE")]
    pub file: String,

    /// Package directory.
    #[arg(long, default_value = ".")]
    pub dir: PathBuf,

    /// Skip type checking and match constants by their declared type name.
    #[arg(long = "syntax-only")]
    pub syntax_only: bool,

    /// Print the discovered generation units as JSON instead of writing files.
    #[arg(long)]
    pub list: bool,

    /// Arguments of the directive itself, as passed by `go generate`.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true, hide = true)]
    pub directive_args: Vec<String>,
}

impl CliArgs {
    pub fn load_mode(&self) -> LoadMode {
        if self.syntax_only {
            LoadMode::Syntax
        } else {
            LoadMode::Full
        }
    }

    pub fn loader_config(&self) -> LoaderConfig {
        LoaderConfig {
            dir: self.dir.clone(),
            target_file: self.file.clone(),
            mode: self.load_mode(),
            build: BuildContext::from_env(),
        }
    }
}
