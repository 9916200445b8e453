//! Report reading loop
//!
//! Input is a sequence of lines. Each line is one of
//!
//! * blank, and ignored;
//! * a date line, like `2024/03/20 08:50`, which is held until
//!   the next report; or
//! * a METAR report.
//!
//! Each report is decoded and printed, or skipped with a
//! warning if it cannot be decoded.

use std::fmt;
use std::io::{BufRead, Write};

use anyhow::{anyhow, Context};
use log::{debug, info, warn};
use wxmetar::{Decoder, Observation, WindDirection};

use crate::cli::Args;

/// Outcome of a run
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Tally {
    /// Reports decoded
    pub decoded: usize,

    /// Reports which could not be decoded
    pub skipped: usize,
}

/// Run the application
///
/// Reads every line of `input`, decodes reports with the
/// `decoder`, and writes them to `output`. Fails on I/O errors.
/// With `--strict`, also fails on the first report which cannot
/// be decoded.
pub fn run<R, W>(
    args: &Args,
    decoder: &Decoder,
    input: R,
    output: &mut W,
) -> Result<Tally, anyhow::Error>
where
    R: BufRead,
    W: Write,
{
    let mut tally = Tally::default();
    let mut date_line: Option<String> = None;

    for (lineno, line) in input.lines().enumerate() {
        let lineno = lineno + 1;
        let line = line.with_context(|| format!("Unable to read line {}", lineno))?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if wxmetar::is_date_line(line) {
            if let Some(unused) = date_line.replace(line.to_owned()) {
                debug!("line {}: date line \"{}\" has no report", lineno, unused);
            }
            continue;
        }

        let decoded = match date_line.take() {
            Some(date) => decoder.decode_with_date(&date, line),
            None => decoder.decode(line),
        };

        match decoded {
            Ok(obs) => {
                tally.decoded += 1;
                if !args.quiet {
                    if args.brief {
                        writeln!(output, "{}", Brief(&obs))?;
                    } else {
                        writeln!(output, "{}", obs)?;
                    }
                }
            }
            Err(err) if args.strict => {
                return Err(anyhow!(err).context(format!("line {}", lineno)));
            }
            Err(err) => {
                warn!("line {}: skipped: {}", lineno, err);
                tally.skipped += 1;
            }
        }
    }

    info!(
        "decoded {} report(s), skipped {}",
        tally.decoded, tally.skipped
    );
    Ok(tally)
}

/// One-line summary of an observation
///
/// Station, time, wind, visibility, temperature / dew point,
/// and pressure. Missing groups are printed as `-`.
#[derive(Clone, Copy, Debug)]
pub struct Brief<'o>(pub &'o Observation);

impl fmt::Display for Brief<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let obs = self.0;

        write!(f, "{}", obs.station_id())?;
        match obs.observed_at() {
            Some(when) => write!(f, " {}", when.format("%d %H:%MZ"))?,
            None => f.write_str(" -")?,
        }

        match obs.wind() {
            Some(wind) if wind.is_calm() => f.write_str(" calm")?,
            Some(wind) => {
                match wind.direction() {
                    WindDirection::Degrees(deg) => write!(f, " {:03}°", deg)?,
                    WindDirection::Variable => f.write_str(" VRB")?,
                }
                write!(f, "/{}", wind.speed())?;
                if let Some(gust) = wind.gust() {
                    write!(f, "G{}", gust)?;
                }
                write!(f, " {}", wind.unit())?;
            }
            None => f.write_str(" -")?,
        }

        match obs.visibility() {
            Some(vis) if vis.is_cavok() => f.write_str(" CAVOK")?,
            Some(vis) => write!(
                f,
                " {}{}",
                if vis.less_than() { "<" } else { "" },
                vis.distance()
            )?,
            None => f.write_str(" -")?,
        }

        write!(f, " ")?;
        degrees(f, obs.temperature_most_precise_c())?;
        write!(f, "/")?;
        degrees(f, obs.dew_point_most_precise_c())?;

        match (obs.pressure_hpa(), obs.pressure_inhg()) {
            (Some(hpa), _) => write!(f, " {} hPa", hpa),
            (None, Some(inhg)) => write!(f, " {:.2} inHg", inhg),
            (None, None) => f.write_str(" -"),
        }
    }
}

fn degrees(f: &mut fmt::Formatter<'_>, celsius: Option<f32>) -> fmt::Result {
    match celsius {
        Some(c) => write!(f, "{}°C", c),
        None => f.write_str("-"),
    }
}
