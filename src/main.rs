use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;

use aino_design::cli::Cli;

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    Ok(aino_design::run(cli)?)
}
