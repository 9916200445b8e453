//! METAR report decoder

mod cursor;
mod groups;

use std::str::FromStr;

use chrono::{DateTime, Datelike, Duration, NaiveDateTime, TimeZone, Utc};
use log::{debug, trace};

use crate::builder::DecoderBuilder;
use crate::error::{GroupDecodeError, GroupFault, GroupKind, MalformedReason, ParseError};
use crate::grammar::{self, ReportModifier, ReportType};
use crate::observation::{Distance, Observation, Visibility, MAX_WEATHER_CONDITIONS};

use cursor::Cursor;
use groups::Pressure;

/// Format of the companion date line, like `2024/03/06 02:50`
const DATE_LINE_FORMAT: &str = "%Y/%m/%d %H:%M";

/// METAR report decoder
///
/// The decoder holds only its configuration. It is cheap to
/// copy and may be shared freely between threads. Create one
/// with a [`DecoderBuilder`], or use [`Decoder::default()`].
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use wxmetar::DecoderBuilder;
///
/// let decoder = DecoderBuilder::new()
///     .with_reference_time(Utc.with_ymd_and_hms(2024, 3, 10, 0, 0, 0).unwrap())
///     .build();
///
/// let obs = decoder.decode("KLAX 060250Z 34010KT 10SM CLR 14/M07 A3012").unwrap();
/// assert_eq!(
///     Utc.with_ymd_and_hms(2024, 3, 6, 2, 50, 0).unwrap(),
///     obs.observed_at().unwrap()
/// );
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Decoder {
    reference_time: Option<DateTime<Utc>>,
    max_weather_conditions: usize,
}

impl Decoder {
    /// Decode one METAR report line
    ///
    /// The observation's day of month is resolved against the
    /// decoder's reference time.
    pub fn decode(&self, report: &str) -> Result<Observation, ParseError> {
        let mut cursor = Cursor::new(report.trim());
        if cursor.is_empty() {
            return Err(malformed(MalformedReason::Empty, report));
        }

        let report_type = cursor.peek().and_then(|t| ReportType::from_str(t).ok());
        if report_type.is_some() {
            cursor.advance(1);
        }

        let station = cursor
            .next()
            .ok_or_else(|| malformed(MalformedReason::MissingStation, report))?;
        if !is_station_id(station) {
            return Err(malformed(MalformedReason::InvalidStation, report));
        }

        let mut obs = Observation::new(station, report);
        obs.report_type = report_type;

        self.decode_groups(&mut cursor, &mut obs)
            .map_err(|err| err.in_report(report))?;

        debug!(
            "decoder: {}: {} sky, {} weather, {} remarks",
            obs.station_id(),
            obs.sky_conditions().len(),
            obs.weather_conditions().len(),
            if obs.remarks().is_some() { "with" } else { "no" }
        );
        Ok(obs)
    }

    /// Decode one METAR report line with its companion date line
    ///
    /// The `date_line` has the form `YYYY/MM/DD HH:MM`, in UTC.
    /// It is retained as the
    /// [`record_date()`](crate::Observation::record_date) but
    /// does not affect the observation time, which is still
    /// resolved from the report body.
    pub fn decode_with_date(
        &self,
        date_line: &str,
        report: &str,
    ) -> Result<Observation, ParseError> {
        let date_line = date_line.trim();
        let record_date = parse_date_line(date_line)?;

        let mut obs = self.decode(report)?;
        obs.raw_date_line = Some(date_line.to_owned());
        obs.record_date = Some(record_date);
        Ok(obs)
    }

    /// Decode a one- or two-line record
    ///
    /// If `text` has two or more non-blank lines, the first is
    /// the date line and the second is the report. Otherwise
    /// the only line is the report.
    ///
    /// ```
    /// let obs = wxmetar::decode_record(
    ///     "2024/03/06 02:56\nKLAX 060250Z 34010KT 10SM CLR 14/M07 A3012\n",
    /// ).unwrap();
    /// assert_eq!("KLAX", obs.station_id());
    /// assert_eq!(Some("2024/03/06 02:56"), obs.raw_date_line());
    /// ```
    pub fn decode_record(&self, text: &str) -> Result<Observation, ParseError> {
        let mut lines = text.lines().filter(|l| !l.trim().is_empty());
        match (lines.next(), lines.next()) {
            (Some(date_line), Some(report)) => self.decode_with_date(date_line, report),
            (Some(report), None) => self.decode(report),
            (None, _) => Err(malformed(MalformedReason::Empty, text)),
        }
    }

    /// Fixed reference time, if any
    ///
    /// If `None`, the current UTC time is used.
    pub fn reference_time(&self) -> Option<DateTime<Utc>> {
        self.reference_time
    }

    /// Most present weather groups retained per report
    pub fn max_weather_conditions(&self) -> usize {
        self.max_weather_conditions
    }

    // Groups following the station identifier, in report order
    fn decode_groups(
        &self,
        cursor: &mut Cursor<'_>,
        obs: &mut Observation,
    ) -> Result<(), GroupDecodeError> {
        if let Some(tok) = cursor.next_if(groups::is_day_time) {
            let (day, hour, minute) =
                groups::decode_day_time(tok).map_err(fault(GroupKind::DateTime, tok))?;
            let reference = self.reference_time.unwrap_or_else(Utc::now);
            obs.observed_at = Some(
                resolve_day_time(day, hour, minute, reference)
                    .map_err(fault(GroupKind::DateTime, tok))?,
            );
            trace!("decoder: observed at {:?}", obs.observed_at);
        }

        if let Some(tok) = cursor.next_if(|t| ReportModifier::from_str(t).is_ok()) {
            obs.report_modifier = ReportModifier::from_str(tok).ok();
        }

        if let Some(tok) = cursor.next_if(groups::is_wind) {
            obs.wind = Some(groups::decode_wind(tok).map_err(fault(GroupKind::Wind, tok))?);
            trace!("decoder: wind \"{}\"", tok);
        }

        if let Some(tok) = cursor.next_if(groups::is_variable_wind) {
            let range =
                groups::decode_variable_wind(tok).map_err(fault(GroupKind::VariableWind, tok))?;
            match obs.wind.as_mut() {
                Some(wind) => wind.variable_range = Some(range),
                None => trace!("decoder: variable wind \"{}\" without wind group", tok),
            }
        }

        obs.visibility = decode_visibility(cursor)?;

        while let Some(tok) = cursor.next_if(groups::is_runway_visual_range) {
            let rvr = groups::decode_runway_visual_range(tok)
                .map_err(fault(GroupKind::RunwayVisualRange, tok))?;
            obs.runway_visual_ranges.push(rvr);
        }

        let max_weather = self.max_weather_conditions.min(MAX_WEATHER_CONDITIONS);
        while let Some(tok) = cursor.next_if(groups::is_weather) {
            match groups::decode_weather(tok) {
                Some(wx) if obs.weather_conditions.len() < max_weather => {
                    obs.weather_conditions.push(wx)
                }
                Some(_) => trace!("decoder: weather \"{}\" over limit", tok),
                None => trace!("decoder: weather \"{}\" has no phenomenon", tok),
            }
        }

        while let Some(tok) = cursor.next_if(groups::is_sky_condition) {
            let sky = groups::decode_sky_condition(tok).map_err(fault(GroupKind::Sky, tok))?;
            obs.sky_conditions.push(sky);
        }

        if let Some(tok) = cursor.next_if(groups::is_temperature) {
            let (temp, dewp) =
                groups::decode_temperature(tok).map_err(fault(GroupKind::Temperature, tok))?;
            obs.temperature = temp;
            obs.dew_point = dewp;
        }

        while let Some(tok) = cursor.next_if(groups::is_pressure) {
            let pressure = groups::decode_pressure(tok).map_err(fault(GroupKind::Pressure, tok))?;
            if let Pressure::Qnh(hpa) = pressure {
                obs.pressure_hpa = Some(hpa);
            }
            obs.pressure_inhg = Some(pressure.inhg());
        }

        if let Some(tok) = cursor.next_if(|t| t.eq_ignore_ascii_case(grammar::BECOMING)) {
            let mut trend = vec![tok];
            while let Some(tok) = cursor.next_if(|t| t != grammar::REMARKS) {
                trend.push(tok);
            }
            obs.becoming_trend = Some(trend.join(" "));
        }

        if cursor.next_if(|t| t == grammar::REMARKS).is_some() {
            let remarks = cursor.rest_of_line();
            if !remarks.is_empty() {
                obs.remarks = Some(remarks.to_owned());
            }
        }

        // remaining tokens, in any order
        while let Some(tok) = cursor.next() {
            if groups::is_precise_temperature(tok) {
                let (temp, dewp) = groups::decode_precise_temperature(tok)
                    .map_err(fault(GroupKind::PreciseTemperature, tok))?;
                obs.temperature_precise = Some(temp);
                obs.dew_point_precise = Some(dewp);
            } else if groups::is_obscuration(tok) {
                let layer = cursor.next_if(groups::is_obscured_layer);
                let obsc = groups::decode_obscuration(tok, layer)
                    .map_err(fault(GroupKind::Obscuration, layer.unwrap_or(tok)))?;
                obs.obscurations.push(obsc);
            } else if tok == grammar::NO_SIGNIFICANT_CHANGE {
                obs.is_no_significant_change = true;
            }
        }

        Ok(())
    }
}

impl Default for Decoder {
    fn default() -> Self {
        DecoderBuilder::new().build()
    }
}

impl From<&DecoderBuilder> for Decoder {
    fn from(cfg: &DecoderBuilder) -> Self {
        Self {
            reference_time: cfg.reference_time(),
            max_weather_conditions: cfg.max_weather_conditions(),
        }
    }
}

/// Decode one METAR report line with the default decoder
///
/// ```
/// let obs = wxmetar::decode("EGPF 280320Z 30008KT CAVOK 01/M03 Q1006").unwrap();
/// assert!(obs.visibility().unwrap().is_cavok());
/// assert_eq!(Some(1006), obs.pressure_hpa());
/// ```
pub fn decode(report: &str) -> Result<Observation, ParseError> {
    Decoder::default().decode(report)
}

/// Decode a report and its companion date line with the default decoder
pub fn decode_with_date(date_line: &str, report: &str) -> Result<Observation, ParseError> {
    Decoder::default().decode_with_date(date_line, report)
}

/// Decode a one- or two-line record with the default decoder
pub fn decode_record(text: &str) -> Result<Observation, ParseError> {
    Decoder::default().decode_record(text)
}

// Prevailing visibility, from zero, one, or two tokens
fn decode_visibility(cursor: &mut Cursor<'_>) -> Result<Option<Visibility>, GroupDecodeError> {
    let token = match cursor.peek() {
        Some(token) => token,
        None => return Ok(None),
    };

    if token == grammar::CAVOK {
        cursor.advance(1);
        return Ok(Some(Visibility::cavok()));
    }

    if token == grammar::VISIBILITY_10KM {
        cursor.advance(1);
        return Ok(Some(Visibility::new(Distance::Kilometers(10.0), false)));
    }

    if groups::has_distance_unit(token) {
        cursor.advance(1);
        return groups::decode_visibility_with_unit(None, token)
            .map(Some)
            .map_err(fault(GroupKind::Visibility, token));
    }

    if let Some(next) = cursor.peek_next() {
        if groups::has_distance_unit(next) && groups::is_whole_visibility(token) {
            cursor.advance(2);
            return groups::decode_visibility_with_unit(Some(token), next)
                .map(Some)
                .map_err(|cause| {
                    GroupDecodeError::new(
                        GroupKind::Visibility,
                        format!("{} {}", token, next),
                        cause,
                    )
                });
        }
    }

    if groups::is_visibility_meters(token) {
        cursor.advance(1);
        return groups::decode_visibility_meters(token)
            .map(Some)
            .map_err(fault(GroupKind::Visibility, token));
    }

    Ok(None)
}

// Resolve a day of month, hour, and minute to a timestamp
//
// If the day is later than the reference day, the reference
// steps back by exactly one day. The year and month come from
// the reference. Out-of-range fields overflow into the
// following month, hour, or day.
fn resolve_day_time(
    day: u32,
    hour: u32,
    minute: u32,
    reference: DateTime<Utc>,
) -> Result<DateTime<Utc>, GroupFault> {
    let mut reference = reference.date_naive();
    if day > reference.day() {
        reference = reference.pred_opt().ok_or(GroupFault::Number)?;
    }

    let offset = Duration::days(day as i64 - 1)
        + Duration::hours(hour as i64)
        + Duration::minutes(minute as i64);

    Utc.with_ymd_and_hms(reference.year(), reference.month(), 1, 0, 0, 0)
        .single()
        .and_then(|first| first.checked_add_signed(offset))
        .ok_or(GroupFault::Number)
}

fn parse_date_line(line: &str) -> Result<DateTime<Utc>, ParseError> {
    NaiveDateTime::parse_from_str(line, DATE_LINE_FORMAT)
        .map(|naive| Utc.from_utc_datetime(&naive))
        .map_err(|cause| ParseError::InvalidDate {
            line: line.to_owned(),
            cause,
        })
}

/// Is `line` a companion date line, like `2024/03/06 02:50`?
pub fn is_date_line(line: &str) -> bool {
    NaiveDateTime::parse_from_str(line.trim(), DATE_LINE_FORMAT).is_ok()
}

// Four ASCII alphanumerics, the first a letter
fn is_station_id(token: &str) -> bool {
    let bytes = token.as_bytes();
    bytes.len() == 4
        && bytes[0].is_ascii_alphabetic()
        && bytes.iter().all(|b| b.is_ascii_alphanumeric())
}

fn malformed(reason: MalformedReason, report: &str) -> ParseError {
    ParseError::Malformed {
        reason,
        report: report.to_owned(),
    }
}

fn fault(group: GroupKind, token: &str) -> impl FnOnce(GroupFault) -> GroupDecodeError + '_ {
    move |cause| GroupDecodeError::new(group, token, cause)
}
