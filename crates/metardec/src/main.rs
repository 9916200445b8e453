use std::io;

use anyhow::{anyhow, Context};
use clap::Parser;
use log::{info, LevelFilter};

use wxmetar::DecoderBuilder;

mod app;
mod cli;

use cli::{Args, CliError};

/// Exit status when some reports were skipped
const EXIT_SKIPPED: i32 = 2;

fn main() {
    match metardec() {
        Ok(()) => {}
        Err(cli_error) => cli_error.exit(),
    }
}

fn metardec() -> Result<(), CliError> {
    // Parse options and start logging
    let args = Args::try_parse()?;
    log_setup(&args);

    // create the decoder
    let mut builder = DecoderBuilder::new();
    if let Some(reference) = args.reference_time {
        info!("resolving report dates against {}", reference);
        builder.with_reference_time(reference);
    }
    let decoder = builder.build();

    // file setup: locks stdin in case we need it
    let stdin = io::stdin();
    let stdin_handle = stdin.lock();
    let inbuf = file_setup(&args, stdin_handle)?;

    let stdout = io::stdout();
    let mut stdout_handle = stdout.lock();
    let tally = app::run(&args, &decoder, inbuf, &mut stdout_handle)?;

    if tally.skipped > 0 {
        Err(CliError::new(
            anyhow!(
                "{} of {} report(s) could not be decoded",
                tally.skipped,
                tally.skipped + tally.decoded
            ),
            EXIT_SKIPPED,
        ))
    } else {
        Ok(())
    }
}

fn log_setup(args: &Args) {
    if args.quiet {
        // no logging
        return;
    } else if std::env::var_os("RUST_LOG").is_none() {
        // parameter controls
        let log_filter = match args.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        };

        pretty_env_logger::formatted_builder()
            .filter_module("wxmetar", log_filter)
            .filter_module("metardec", log_filter)
            .init();
    } else {
        // environment controls
        pretty_env_logger::init();
    }
}

fn file_setup<'stdin>(
    args: &Args,
    stdin: std::io::StdinLock<'stdin>,
) -> Result<Box<dyn io::BufRead + 'stdin>, anyhow::Error> {
    if args.input_is_stdin() {
        info!("METAR decoder reading standard input");
        if is_terminal(&std::io::stdin()) && !args.quiet {
            eprintln!("Enter one METAR report per line. Press Ctrl-D to finish.");
        }
        Ok(Box::new(io::BufReader::new(stdin)))
    } else {
        info!("METAR decoder reading file: \"{}\"", &args.file);
        Ok(Box::new(io::BufReader::new(
            std::fs::File::open(&args.file)
                .with_context(|| format!("Unable to open --file \"{}\"", args.file))?,
        )))
    }
}

#[cfg(not(target_os = "windows"))]
fn is_terminal<S>(stream: &S) -> bool
where
    S: std::os::fd::AsRawFd,
{
    terminal_size::terminal_size_using_fd(stream.as_raw_fd()).is_some()
}

#[cfg(target_os = "windows")]
fn is_terminal<S>(stream: &S) -> bool
where
    S: std::os::windows::io::AsRawHandle,
{
    terminal_size::terminal_size_using_handle(stream.as_raw_handle()).is_some()
}
