// src/cli.rs

//! CLI argument parsing using `clap`.
//!
//! Option parsing stops at the first non-option argument, so everything from
//! `COMMAND` onwards is passed to the command untouched. A lone `!` in front
//! of the command is the same as `-!`.

use std::ffi::OsString;

use clap::{Parser, ValueEnum};

use crate::engine::FATAL_EXIT_CODE;
use crate::errors::QueryError;
use crate::exec::CommandSpec;
use crate::types::{DelimitationMode, DisplayPolicy, StderrPolicy};

const LONG_ABOUT: &str = "\
Reads a list of files from stdin, pipes the contents of each file into the \
specified command and prints the name of the file if the command succeeds. \
The name of the file is exposed to the command via the environment variable \
QUERY_FILENAME.

Option parsing stops at the first non-option argument.";

const AFTER_HELP: &str = "\
Exit statuses:
 1     Fatal error encountered.
 2     Non-fatal error encountered.";

/// Command-line arguments for `query`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "query",
    version,
    about = "Print the names of files for which a command succeeds.",
    long_about = LONG_ABOUT,
    after_help = AFTER_HELP,
    override_usage = "query [OPTION] [!] COMMAND [ARGUMENT...]"
)]
pub struct CliArgs {
    /// Only print filenames when the COMMAND fails.
    #[arg(short = '!')]
    pub invert: bool,

    /// File names are delimited by null bytes.
    #[arg(short = '0', overrides_with_all = ["lines", "whitespace"])]
    pub null: bool,

    /// File names are line-delimited. This is the default behavior.
    #[arg(short = 'n', overrides_with_all = ["null", "whitespace"])]
    pub lines: bool,

    /// File names are delimited by ASCII whitespace.
    #[arg(short = 'w', overrides_with_all = ["null", "lines"])]
    pub whitespace: bool,

    /// Redirect stderr from the COMMAND to /dev/null.
    #[arg(short = 's')]
    pub silence_stderr: bool,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `QUERY_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Optional `!`, then the command to run and its arguments.
    #[arg(value_name = "COMMAND", trailing_var_arg = true, num_args = 0..)]
    pub command: Vec<OsString>,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Validated run configuration, immutable for the whole run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub mode: DelimitationMode,
    pub display: DisplayPolicy,
    pub stderr: StderrPolicy,
    pub command: CommandSpec,
}

impl TryFrom<CliArgs> for Invocation {
    type Error = QueryError;

    fn try_from(args: CliArgs) -> Result<Self, Self::Error> {
        // clap leaves at most one of the three set; the last flag wins.
        let mode = if args.null {
            DelimitationMode::NullByte
        } else if args.whitespace {
            DelimitationMode::Whitespace
        } else {
            DelimitationMode::default()
        };

        let mut argv = args.command;
        let mut invert = args.invert;
        if argv.first().is_some_and(|first| first == "!") {
            invert = true;
            argv.remove(0);
        }

        let command = CommandSpec::from_argv(argv).ok_or(QueryError::NoCommand)?;

        Ok(Self {
            mode,
            display: if invert {
                DisplayPolicy::OnFailure
            } else {
                DisplayPolicy::default()
            },
            stderr: if args.silence_stderr {
                StderrPolicy::Discard
            } else {
                StderrPolicy::default()
            },
            command,
        })
    }
}

/// Parse the process arguments.
///
/// Help and version requests exit with status 0. Usage errors exit with the
/// fatal status 1 rather than clap's default of 2, which this tool reserves
/// for non-fatal errors.
pub fn parse() -> CliArgs {
    CliArgs::try_parse().unwrap_or_else(|err| {
        let code = if err.use_stderr() { FATAL_EXIT_CODE } else { 0 };
        let _ = err.print();
        std::process::exit(code)
    })
}
