//! Process-wide logger setup.
//!
//! Log records go to stderr next to the diagnostics. The default level
//! follows `--quiet` / `--verbose`; `RUST_LOG` overrides it. With
//! `--format json` each record is a one-line JSON object so that stderr stays
//! NDJSON.
use std::io::Write as _;
use std::sync::Once;

use crate::format::FormatMode;

static INIT: Once = Once::new();

/// Default filter for the given verbosity flags.
pub fn default_filter(quiet: bool, verbose: bool) -> &'static str {
    if quiet {
        "error"
    } else if verbose {
        "info"
    } else {
        "warn"
    }
}

/// Installs the global logger. Later calls are no-ops.
pub fn init(quiet: bool, verbose: bool, mode: FormatMode) {
    INIT.call_once(|| {
        let mut builder = env_logger::Builder::from_env(
            env_logger::Env::default().default_filter_or(default_filter(quiet, verbose)),
        );

        builder.format(move |buf, record| match mode {
            FormatMode::Json => {
                let obj = serde_json::json!({
                    "level": record.level().to_string(),
                    "target": record.target(),
                    "msg": record.args().to_string(),
                });
                writeln!(buf, "{obj}")
            }
            FormatMode::Human => {
                writeln!(buf, "{} {}: {}", record.level(), record.target(), record.args())
            }
        });
        builder.target(env_logger::Target::Stderr);

        if let Err(e) = builder.try_init() {
            eprintln!("warning: logger already installed: {e}");
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quiet_keeps_only_errors() {
        assert_eq!(default_filter(true, false), "error");
    }

    #[test]
    fn verbose_shows_requests() {
        assert_eq!(default_filter(false, true), "info");
    }

    #[test]
    fn default_is_warn() {
        assert_eq!(default_filter(false, false), "warn");
    }

    #[test]
    fn init_twice_is_harmless() {
        init(false, false, FormatMode::Human);
        init(true, false, FormatMode::Json);
        log::debug!("logger installed");
    }
}
