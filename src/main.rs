use anyhow::{Context, Result};
use clap::crate_version;
use env_logger::Builder;

use intsolve::commands;

pub fn main() -> Result<()> {
    let command = commands::build_cli();
    let command = command.version(crate_version!());
    let cli_matches = command.get_matches();

    Builder::new()
        .filter_level(commands::log_level(&cli_matches)?)
        .init();

    log::info!("intsolve starting");

    let stdout = std::io::stdout();
    commands::execute(&cli_matches, &mut stdout.lock()).context("Executing intsolve")
}
