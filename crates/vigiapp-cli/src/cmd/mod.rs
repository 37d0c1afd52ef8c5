//! Command modules for the `vigiapp` CLI.
//!
//! Each submodule implements one subcommand. Its `run` function takes the
//! parsed arguments and returns `Ok(())` on success or a
//! [`crate::error::CliError`] on failure.
pub mod check;
pub mod fill;
pub mod lookup;
pub mod mask;
pub mod validate;

use crate::error::CliError;

/// Maps a failed write to stdout or stderr to a [`CliError`].
pub(crate) fn write_failed(target: &str, e: &std::io::Error) -> CliError {
    CliError::IoError {
        source: target.to_owned(),
        detail: e.to_string(),
    }
}
