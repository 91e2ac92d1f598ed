#![allow(clippy::print_stderr)]

use anyhow::{Context, Result};
use clap::Parser;

use genum::cli::args::CliArgs;
use genum::cli::driver;

fn main() {
    // GENUM_LOG / GENUM_LOG_FORMAT, see src/tracing_config.rs.
    genum::tracing_config::init_tracing();

    let args = CliArgs::parse();
    if let Err(err) = run(&args) {
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}

fn run(args: &CliArgs) -> Result<()> {
    if args.list {
        let units = driver::discover(args)?;
        let json =
            serde_json::to_string_pretty(&units).context("failed to serialize generation units")?;
        println!("{json}");
        return Ok(());
    }

    driver::run(args)?;
    Ok(())
}
