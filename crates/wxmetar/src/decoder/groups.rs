//! Report group predicates and extractors
//!
//! Each group has a predicate (`is_*`), which decides whether
//! the token at the cursor belongs to the group, and an
//! extractor (`decode_*`), which converts the token into its
//! field(s). Extractors fail only when a token which satisfies
//! the predicate cannot be decoded.

use std::ops::Range;
use std::str::FromStr;

use lazy_static::lazy_static;
use regex::Regex;

use crate::error::GroupFault;
use crate::grammar::{
    self, ApproachDirection, Descriptor, Intensity, Phenomenon, RvrModifier, RvrTendency,
    SkyCover, SpeedUnit, WeatherCode,
};
use crate::observation::{
    Distance, Obscuration, RunwayVisualRange, SkyCondition, VariableRange, Visibility,
    WeatherCondition, Wind, WindDirection,
};

/// Inches of mercury per hectopascal
const INHG_PER_HPA: f32 = 0.02953;

lazy_static! {
    static ref VARIABLE_WIND: Regex = Regex::new(r"^\d{3}V\d{3}$").expect("bad wind regexp");
    static ref VISIBILITY_METERS: Regex =
        Regex::new(r"^M?\d+(N|NE|E|SE|S|SW|W|NW)?$").expect("bad visibility regexp");
    static ref PRECISE_TEMPERATURE: Regex =
        Regex::new(r"^T\d{8}$").expect("bad temperature regexp");
}

/// `DDHHMMZ`
pub fn is_day_time(token: &str) -> bool {
    token.ends_with('Z')
}

/// Day of month, hour, and minute
pub fn decode_day_time(token: &str) -> Result<(u32, u32, u32), GroupFault> {
    Ok((
        digits(token, 0..2)?,
        digits(token, 2..4)?,
        digits(token, 4..6)?,
    ))
}

/// `dddffKT`, `dddffGggKT`, `VRBff`, `dddffMPS`, …
pub fn is_wind(token: &str) -> bool {
    token.ends_with("KT")
        || token.ends_with("KTS")
        || token.ends_with("MPS")
        || token.starts_with(grammar::VARIABLE_WIND)
}

pub fn decode_wind(token: &str) -> Result<Wind, GroupFault> {
    let variable = token.starts_with(grammar::VARIABLE_WIND);
    let unit = if token.ends_with("KT")
        || token.ends_with("KTS")
        || (variable && !token.ends_with("MPS"))
    {
        SpeedUnit::Knots
    } else {
        SpeedUnit::MetersPerSecond
    };

    let direction = if variable {
        WindDirection::Variable
    } else {
        WindDirection::Degrees(digits(token, 0..3)?)
    };

    let width = speed_width(token, 3);
    let speed = digits(token, 3..3 + width)?;

    let gust_at = 3 + width;
    let gust = if token.get(gust_at..gust_at + 1) == Some("G") {
        let width = speed_width(token, gust_at + 1);
        Some(digits(token, gust_at + 1..gust_at + 1 + width)?)
    } else {
        None
    };

    Ok(Wind {
        direction,
        speed,
        gust,
        unit,
        variable_range: None,
    })
}

/// `dddVddd`
pub fn is_variable_wind(token: &str) -> bool {
    VARIABLE_WIND.is_match(token)
}

pub fn decode_variable_wind(token: &str) -> Result<VariableRange, GroupFault> {
    Ok(VariableRange::new(
        digits(token, 0..3)?,
        digits(token, 4..7)?,
    ))
}

/// Visibility with an explicit unit: `10SM`, `M1/4SM`, `1/2KM`
pub fn has_distance_unit(token: &str) -> bool {
    token.ends_with("SM") || token.ends_with("KM")
}

/// Whole part of a two-token visibility, like the `2` in `2 1/2SM`
pub fn is_whole_visibility(token: &str) -> bool {
    let body = token.strip_prefix('M').unwrap_or(token);
    !body.is_empty() && body.bytes().all(|b| b.is_ascii_digit())
}

/// Decode a visibility with unit from one or two tokens
///
/// `whole` is the unit-less token which precedes `with_unit`,
/// if any.
pub fn decode_visibility_with_unit(
    whole: Option<&str>,
    with_unit: &str,
) -> Result<Visibility, GroupFault> {
    let split = with_unit.len().saturating_sub(2);
    let (amount, unit) = (
        with_unit.get(..split).ok_or(GroupFault::Truncated)?,
        with_unit.get(split..).ok_or(GroupFault::Truncated)?,
    );

    let (less_than, value) = match whole {
        Some(whole) => {
            let (less_than, whole) = strip_less_than(whole);
            let whole: u32 = digits(whole, 0..whole.len())?;
            (less_than, whole as f32 + decode_amount(amount)?)
        }
        None => {
            let (less_than, amount) = strip_less_than(amount);
            (less_than, decode_amount(amount)?)
        }
    };

    let distance = if unit == "SM" {
        Distance::StatuteMiles(value)
    } else {
        Distance::Kilometers(value)
    };
    Ok(Visibility::new(distance, less_than))
}

/// Four-digit meters, with optional direction: `4000NE`
pub fn is_visibility_meters(token: &str) -> bool {
    VISIBILITY_METERS.is_match(token)
}

pub fn decode_visibility_meters(token: &str) -> Result<Visibility, GroupFault> {
    let (less_than, token) = strip_less_than(token);
    let end = token
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(token.len());
    let meters: f32 = digits(token, 0..end)?;
    Ok(Visibility::new(Distance::Meters(meters), less_than))
}

/// `R28L/2400V4000FT/U`
pub fn is_runway_visual_range(token: &str) -> bool {
    let mut bytes = token.bytes();
    bytes.next() == Some(b'R') && bytes.next().map_or(false, |b| b.is_ascii_digit())
}

pub fn decode_runway_visual_range(token: &str) -> Result<RunwayVisualRange, GroupFault> {
    let runway_number = digits(token, 1..3)?;

    let mut pos = 3;
    let approach_direction = if token.get(pos..pos + 1) == Some("/") {
        pos += 1;
        None
    } else {
        let dir = code::<ApproachDirection>(token, pos..pos + 1)?;
        if token.get(pos + 1..pos + 2) != Some("/") {
            return Err(GroupFault::UnknownCode);
        }
        pos += 2;
        Some(dir)
    };

    let mut modifier = rvr_modifier(token, pos);
    if modifier.is_some() {
        pos += 1;
    }

    let lowest = digits(token, pos..pos + 4)?;
    pos += 4;

    let highest = if token.get(pos..pos + 1) == Some("V") {
        pos += 1;
        if let Some(high_modifier) = rvr_modifier(token, pos) {
            modifier = modifier.or(Some(high_modifier));
            pos += 1;
        }
        let highest = digits(token, pos..pos + 4)?;
        pos += 4;
        Some(highest)
    } else {
        None
    };

    let in_feet = token.get(pos..pos + 2) == Some("FT");
    if in_feet {
        pos += 2;
    }
    if token.get(pos..pos + 1) == Some("/") {
        pos += 1;
    }

    let tendency = match token.get(pos..) {
        None | Some("") => None,
        Some(_) => Some(code::<RvrTendency>(token, pos..token.len())?),
    };

    Ok(RunwayVisualRange {
        runway_number,
        approach_direction,
        modifier,
        lowest,
        highest,
        in_feet,
        tendency,
    })
}

/// Present weather: `-SN`, `+TSRA`, `FZFG`, `RADZ`
pub fn is_weather(token: &str) -> bool {
    grammar::starts_weather_group(token)
}

/// Decode present weather
///
/// Returns `None` if the group has no phenomenon. Only the
/// first phenomenon is retained: `RADZ` decodes as rain.
pub fn decode_weather(token: &str) -> Option<WeatherCondition> {
    let (intensity, mut pos) = match token.get(0..1) {
        Some("-") => (Intensity::Light, 1),
        Some("+") => (Intensity::Heavy, 1),
        _ => (Intensity::Moderate, 0),
    };

    let descriptor: Option<Descriptor> = match grammar::weather_code_at(token, pos) {
        Some(WeatherCode::Descriptor(desc)) => {
            pos += 2;
            Some(desc)
        }
        _ => None,
    };

    match grammar::weather_code_at(token, pos) {
        Some(WeatherCode::Phenomenon(phenomenon)) => Some(WeatherCondition {
            intensity,
            descriptor,
            phenomenon,
        }),
        _ => None,
    }
}

/// `FEW008`, `BKN120AC`, `VV003`, `CLR`, `NSC`, …
pub fn is_sky_condition(token: &str) -> bool {
    grammar::sky_cover_prefix(token).is_some()
}

pub fn decode_sky_condition(token: &str) -> Result<SkyCondition, GroupFault> {
    let (cover, len) = grammar::sky_cover_prefix(token).ok_or(GroupFault::UnknownCode)?;
    if !cover.has_height() {
        return Ok(SkyCondition {
            cover,
            height: None,
            modifier: None,
        });
    }

    let height = layer_height(token, len)?;
    let modifier = if cover.is_layer() {
        token
            .get(len + 3..)
            .filter(|m| !m.is_empty())
            .map(str::to_owned)
    } else {
        None
    };

    Ok(SkyCondition {
        cover,
        height,
        modifier,
    })
}

/// `14/M07`, `/28`, `28/`
pub fn is_temperature(token: &str) -> bool {
    token.contains('/')
}

/// Temperature and dew point, whole °C
///
/// Trailing slashes mark missing values, so `15///` has no dew
/// point and `/////` has neither.
pub fn decode_temperature(token: &str) -> Result<(Option<f32>, Option<f32>), GroupFault> {
    let mut fields = token.trim_end_matches('/').split('/');
    let temp = fields.next().unwrap_or_default();
    let dewp = fields.next().unwrap_or_default();
    Ok((whole_degrees(temp)?, whole_degrees(dewp)?))
}

/// `A3012` or `Q1006`
pub fn is_pressure(token: &str) -> bool {
    let mut bytes = token.bytes();
    matches!(bytes.next(), Some(b'A') | Some(b'Q'))
        && bytes.next().map_or(false, |b| b.is_ascii_digit())
}

/// Altimeter or QNH
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Pressure {
    /// Altimeter, inHg
    Altimeter(f32),

    /// QNH, hPa
    Qnh(u16),
}

impl Pressure {
    /// Pressure in inches of mercury
    pub fn inhg(&self) -> f32 {
        match *self {
            Pressure::Altimeter(inhg) => inhg,
            Pressure::Qnh(hpa) => hpa as f32 * INHG_PER_HPA,
        }
    }
}

pub fn decode_pressure(token: &str) -> Result<Pressure, GroupFault> {
    let value: u16 = digits(token, 1..5)?;
    if token.starts_with('Q') {
        Ok(Pressure::Qnh(value))
    } else {
        Ok(Pressure::Altimeter(value as f32 / 100.0))
    }
}

/// `T01330117`
pub fn is_precise_temperature(token: &str) -> bool {
    PRECISE_TEMPERATURE.is_match(token)
}

/// Temperature and dew point, tenths °C
pub fn decode_precise_temperature(token: &str) -> Result<(f32, f32), GroupFault> {
    Ok((tenths(token, 1)?, tenths(token, 5)?))
}

/// Obscuration code, as a whole token: `FG`, `BR`, `HZ`, …
pub fn is_obscuration(token: &str) -> bool {
    Phenomenon::from_str(token).map_or(false, |p| p.is_obscuration())
}

/// Cloud layer which follows an obscuration: `SCT000`
pub fn is_obscured_layer(token: &str) -> bool {
    grammar::sky_cover_prefix(token).map_or(false, |(cover, _)| cover.is_layer())
}

pub fn decode_obscuration(token: &str, layer: Option<&str>) -> Result<Obscuration, GroupFault> {
    let phenomenon = Phenomenon::from_str(token).map_err(|_| GroupFault::UnknownCode)?;
    let (cover, height) = match layer {
        Some(layer) => {
            let (cover, len): (SkyCover, usize) =
                grammar::sky_cover_prefix(layer).ok_or(GroupFault::UnknownCode)?;
            (Some(cover), layer_height(layer, len)?)
        }
        None => (None, None),
    };
    Ok(Obscuration {
        phenomenon,
        cover,
        height,
    })
}

// Parse an unsigned integer from `token[range]`
//
// The field must be entirely ASCII digits.
fn digits<T>(token: &str, range: Range<usize>) -> Result<T, GroupFault>
where
    T: FromStr,
{
    let field = token.get(range).ok_or(GroupFault::Truncated)?;
    if field.is_empty() || !field.bytes().all(|b| b.is_ascii_digit()) {
        return Err(GroupFault::Number);
    }
    field.parse().map_err(|_| GroupFault::Number)
}

// Width of a speed field starting at `start`
//
// Speeds of 100 or more have three digits, so a digit in the
// third position selects the wide form.
fn speed_width(token: &str, start: usize) -> usize {
    match token.as_bytes().get(start + 2) {
        Some(b) if b.is_ascii_digit() => 3,
        _ => 2,
    }
}

// Decode a single-character (or longer) code at `range`
fn code<T>(token: &str, range: Range<usize>) -> Result<T, GroupFault>
where
    T: FromStr,
{
    token
        .get(range)
        .ok_or(GroupFault::Truncated)?
        .parse()
        .map_err(|_| GroupFault::UnknownCode)
}

fn rvr_modifier(token: &str, pos: usize) -> Option<RvrModifier> {
    token.get(pos..pos + 1)?.parse().ok()
}

fn strip_less_than(token: &str) -> (bool, &str) {
    match token.strip_prefix('M') {
        Some(rest) => (true, rest),
        None => (false, token),
    }
}

// A decimal (`10`, `2.5`) or a fraction (`1/4`)
fn decode_amount(amount: &str) -> Result<f32, GroupFault> {
    match amount.split_once('/') {
        Some((num, den)) => {
            let num: u32 = digits(num, 0..num.len())?;
            let den: u32 = digits(den, 0..den.len())?;
            if den == 0 {
                return Err(GroupFault::ZeroDenominator);
            }
            Ok(num as f32 / den as f32)
        }
        None => amount.parse().map_err(|_| GroupFault::Decimal),
    }
}

// Three-digit layer height at `start`; `///` is not observed
fn layer_height(token: &str, start: usize) -> Result<Option<u16>, GroupFault> {
    match token.get(start..start + 3) {
        Some("///") => Ok(None),
        Some(_) => Ok(Some(digits(token, start..start + 3)?)),
        None => Err(GroupFault::Truncated),
    }
}

// `M05`, `14`, `7`, or empty
fn whole_degrees(field: &str) -> Result<Option<f32>, GroupFault> {
    if field.is_empty() {
        Ok(None)
    } else if field.starts_with('M') {
        let magnitude: i16 = digits(field, 1..3)?;
        if field.len() > 3 {
            return Err(GroupFault::Number);
        }
        Ok(Some(-magnitude as f32))
    } else if field.len() > 2 {
        Err(GroupFault::Number)
    } else {
        let degrees: i16 = digits(field, 0..field.len())?;
        Ok(Some(degrees as f32))
    }
}

// Sign digit at `start`, then three digits of tenths
fn tenths(token: &str, start: usize) -> Result<f32, GroupFault> {
    let sign: u8 = digits(token, start..start + 1)?;
    let magnitude: u16 = digits(token, start + 1..start + 4)?;
    let value = magnitude as f32 / 10.0;
    Ok(if sign == 1 { -value } else { value })
}
