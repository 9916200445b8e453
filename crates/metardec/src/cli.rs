use std::fmt::Display;

use chrono::{DateTime, Utc};
use clap::{error::ErrorKind, CommandFactory, Parser};

/// Standard input filename
const STDIN_FILE: &str = "-";

const USAGE_SHORT: &str = r#"
This program reads METAR weather reports, one per line, and prints a human-readable summary of each.

See --help for more details.
"#;

const USAGE_LONG: &str = r#"
This program reads METAR weather reports, one per line, and prints a human-readable summary of each.

Station files from the NWS and other weather services are accepted as-is. A line of the form

    2024/03/20 08:50

is taken as the date line of the report which follows it. Blank lines are ignored.

    curl -s https://tgftp.nws.noaa.gov/data/observations/metar/stations/KLAX.TXT \
        | metardec

Reports carry only the day of the month. The year and month are inferred from the current UTC time, or from the --reference-time if given. Set the --reference-time when decoding archived reports.

Reports which cannot be decoded are skipped with a warning, and the program exits with status 2. With --strict, the first such report is an error.
"#;

/// Top-level program arguments
#[derive(Parser, Clone, Debug)]
#[command(version)]
#[command(about, long_about = None)]
#[command(after_help = USAGE_SHORT, after_long_help = USAGE_LONG)]
#[command(max_term_width = 100)]
pub struct Args {
    /// Verbosity level (-vvv for more)
    #[arg(short, long, default_value_t = 0, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Print NOTHING, not even decoded reports
    ///
    /// The exit status still reports success or failure.
    #[arg(short, long)]
    pub quiet: bool,

    /// Input file (or "-" for stdin)
    ///
    /// One METAR report per line, each optionally preceded by
    /// a date line.
    #[arg(long, default_value_t = STDIN_FILE.to_string())]
    pub file: String,

    /// Resolve report dates against this time (RFC 3339)
    ///
    /// Like "2024-03-31T00:00:00Z". Defaults to the current time.
    #[arg(long, value_parser = parse_reference_time)]
    pub reference_time: Option<DateTime<Utc>>,

    /// Print one line per report
    #[arg(short, long)]
    pub brief: bool,

    /// Stop at the first report which fails to decode
    #[arg(long)]
    pub strict: bool,
}

impl Args {
    /// Return true if the user requests input from stdin
    pub fn input_is_stdin(&self) -> bool {
        self.file == STDIN_FILE
    }
}

fn parse_reference_time(arg: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    DateTime::parse_from_rfc3339(arg).map(|dt| dt.with_timezone(&Utc))
}

/// A program-level error with exit code
#[derive(Debug)]
pub struct CliError {
    error: anyhow::Error,
    exit_code: i32,
}

impl CliError {
    /// Create new error with a custom exit code
    pub fn new(error: anyhow::Error, code: i32) -> CliError {
        CliError {
            error,
            exit_code: code,
        }
    }

    /// Print this error to the terminal
    ///
    /// Errors from clap are printed verbatim. Other types of errors
    /// are printed indirectly via clap's fancy formatter.
    pub fn print(&self) -> std::io::Result<()> {
        if let Some(e) = self.error.downcast_ref::<clap::Error>() {
            e.print()
        } else {
            Args::command()
                .error(ErrorKind::Format, self.to_string())
                .print()
        }
    }

    /// Print this error to the terminal and exit
    pub fn exit(&self) -> ! {
        drop(self.print());
        std::process::exit(self.exit_code);
    }
}

impl Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self.error)
    }
}

impl std::error::Error for CliError {}

impl From<anyhow::Error> for CliError {
    fn from(err: anyhow::Error) -> CliError {
        CliError::new(err, 1)
    }
}

impl From<clap::Error> for CliError {
    fn from(err: clap::Error) -> CliError {
        let code = if err.use_stderr() { 1 } else { 0 };
        CliError::new(err.into(), code)
    }
}
