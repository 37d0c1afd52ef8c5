//! Clap CLI definition: root struct, subcommands, and shared argument types.
use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use vigiapp_core::FieldKind;

/// A CLI argument that is either a filesystem path or the stdin sentinel `"-"`.
///
/// Parsing `"-"` yields [`PathOrStdin::Stdin`]; anything else yields
/// [`PathOrStdin::Path`].
#[derive(Clone, Debug)]
pub enum PathOrStdin {
    /// Read from standard input.
    Stdin,
    /// Read from the given filesystem path.
    Path(PathBuf),
}

impl std::str::FromStr for PathOrStdin {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "-" {
            Ok(PathOrStdin::Stdin)
        } else {
            Ok(PathOrStdin::Path(PathBuf::from(s)))
        }
    }
}

/// Output format for CLI commands.
///
/// `Human` emits colored lines to stderr and plain text to stdout.
/// `Json` emits NDJSON diagnostics to stderr and JSON objects to stdout.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable, optionally colored output (default).
    Human,
    /// Structured JSON / NDJSON output.
    Json,
}

/// Field kind as named on the command line.
///
/// The Portuguese names used by the application's forms are canonical; the
/// English kind codes are accepted as aliases.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum KindArg {
    /// Personal identity number, 11 digits.
    #[value(alias = "personal-id")]
    Cpf,
    /// Organization identity number, 14 digits.
    #[value(alias = "organization-id")]
    Cnpj,
    /// Phone number with area code, 10 or 11 digits.
    #[value(alias = "phone")]
    Telefone,
    /// Date, `DD/MM/YYYY`.
    #[value(alias = "date")]
    Data,
    /// Time, `HH:MM`.
    #[value(alias = "time")]
    Hora,
}

impl From<KindArg> for FieldKind {
    fn from(k: KindArg) -> Self {
        match k {
            KindArg::Cpf => FieldKind::PersonalId,
            KindArg::Cnpj => FieldKind::OrganizationId,
            KindArg::Telefone => FieldKind::Phone,
            KindArg::Data => FieldKind::Date,
            KindArg::Hora => FieldKind::Time,
        }
    }
}

/// Record to fetch with `vigiapp lookup`.
#[derive(Subcommand, Clone, Debug)]
pub enum LookupTarget {
    /// Fetch the person registered under a CPF.
    Person {
        /// CPF, with or without punctuation.
        #[arg(value_name = "CPF")]
        cpf: String,
    },
    /// Fetch the company registered under a CNPJ.
    Company {
        /// CNPJ, with or without punctuation.
        #[arg(value_name = "CNPJ")]
        cnpj: String,
    },
}

/// All top-level subcommands exposed by the `vigiapp` binary.
#[derive(Subcommand)]
pub enum Command {
    /// Apply the input mask for a field kind and print the result.
    Mask {
        /// Field kind.
        #[arg(value_name = "KIND")]
        kind: KindArg,
        /// Raw or partially formatted input.
        #[arg(value_name = "VALUE", allow_hyphen_values = true)]
        value: String,
    },

    /// Validate a single value; prints its stored form when valid.
    Validate {
        /// Field kind.
        #[arg(value_name = "KIND")]
        kind: KindArg,
        /// Value to validate.
        #[arg(value_name = "VALUE", allow_hyphen_values = true)]
        value: String,
        /// Treat an empty or incomplete value as an error.
        #[arg(long)]
        required: bool,
    },

    /// Check every field of a form document and report what blocks submit.
    Check {
        /// Path to a form document, or `-` for stdin.
        #[arg(value_name = "FILE")]
        file: PathOrStdin,
    },

    /// Fill a form document from the lookup service and print it.
    Fill {
        /// Path to a form document, or `-` for stdin.
        #[arg(value_name = "FILE")]
        file: PathOrStdin,
    },

    /// Fetch a person or company record from the lookup service.
    Lookup {
        /// What to look up.
        #[command(subcommand)]
        target: LookupTarget,
    },
}

/// Root CLI struct for the `vigiapp` binary.
///
/// All global flags are defined here and marked `global = true` so that clap
/// propagates them to every subcommand.
#[derive(Parser)]
#[command(
    name = "vigiapp",
    version,
    about = "VigiAPP form field toolkit",
    long_about = "Masks and validates VigiAPP form fields (CPF, CNPJ, telefone,\n\
                  data, hora), checks whole form documents, and fetches person\n\
                  and company records from the lookup service."
)]
pub struct Cli {
    /// Active subcommand.
    #[command(subcommand)]
    pub command: Command,

    /// Output format: human (default) or json.
    #[arg(long, short = 'f', default_value = "human", global = true)]
    pub format: OutputFormat,

    /// Suppress all stderr output except errors (incompatible with `--verbose`).
    #[arg(long, short = 'q', global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Increase stderr verbosity: timing and request logging
    /// (incompatible with `--quiet`).
    #[arg(long, short = 'v', global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Maximum input file size in bytes.
    ///
    /// Can also be set via the `VIGIAPP_MAX_FILE_SIZE` environment variable.
    /// Default: 1048576 (1 MiB).
    #[arg(
        long,
        global = true,
        env = "VIGIAPP_MAX_FILE_SIZE",
        default_value = "1048576"
    )]
    pub max_file_size: u64,

    /// Disable ANSI color codes in human output.
    ///
    /// Also respects the `NO_COLOR` environment variable per
    /// <https://no-color.org>.
    #[arg(long, global = true, env = "NO_COLOR")]
    pub no_color: bool,

    /// Base URL of the lookup service.
    #[arg(
        long,
        global = true,
        env = "VIGIAPP_BASE_URL",
        default_value = "http://localhost:5000"
    )]
    pub base_url: String,

    /// Lookup request timeout in seconds.
    #[arg(
        long,
        global = true,
        env = "VIGIAPP_TIMEOUT_SECS",
        default_value = "10"
    )]
    pub timeout_secs: u64,
}
