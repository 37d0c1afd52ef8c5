//! `vigiapp`: mask, validate and look up VigiAPP form fields from the shell.
mod cli;
mod cmd;
mod error;
mod format;
mod io;
mod logging;
mod lookup_client;

use std::time::Duration;

use clap::Parser as _;

use cli::{Cli, Command};
pub use cli::{LookupTarget, OutputFormat, PathOrStdin};
use cmd::lookup::Endpoint;
use error::CliError;
use format::FormatMode;

fn main() {
    let cli = Cli::parse();
    logging::init(cli.quiet, cli.verbose, FormatMode::from(cli.format));

    if let Err(e) = run(&cli) {
        eprintln!("{e}");
        std::process::exit(e.exit_code());
    }
}

fn run(cli: &Cli) -> Result<(), CliError> {
    let endpoint = Endpoint {
        base_url: cli.base_url.clone(),
        timeout: Duration::from_secs(cli.timeout_secs),
    };

    match &cli.command {
        Command::Mask { kind, value } => cmd::mask::run((*kind).into(), value, &cli.format),
        Command::Validate {
            kind,
            value,
            required,
        } => cmd::validate::run(
            (*kind).into(),
            value,
            *required,
            &cli.format,
            cli.quiet,
            cli.verbose,
            cli.no_color,
        ),
        Command::Check { file } => {
            let content = io::read_input(file, cli.max_file_size)?;
            cmd::check::run(&content, &cli.format, cli.quiet, cli.verbose, cli.no_color)
        }
        Command::Fill { file } => {
            let content = io::read_input(file, cli.max_file_size)?;
            cmd::fill::run(&content, &endpoint)
        }
        Command::Lookup { target } => cmd::lookup::run(target, &endpoint),
    }
}
