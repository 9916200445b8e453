//! Decoded METAR observations

mod rvr;
mod sky;
mod visibility;
mod weather;
mod wind;

use std::fmt;

use arrayvec::ArrayVec;
use chrono::{DateTime, Utc};

use crate::grammar::{ReportModifier, ReportType};

pub use rvr::RunwayVisualRange;
pub use sky::SkyCondition;
pub use visibility::{Distance, Visibility};
pub use weather::{Obscuration, WeatherCondition};
pub use wind::{VariableRange, Wind, WindDirection};

/// Most present weather groups in one report
pub const MAX_WEATHER_CONDITIONS: usize = 3;

/// A decoded METAR report
///
/// Every group is optional except the station identifier.
/// Groups which are absent from the report are `None` (or
/// empty), never zero.
///
/// ```
/// use assert_approx_eq::assert_approx_eq;
/// use wxmetar::{SkyCover, WindDirection};
///
/// let obs = wxmetar::decode("KLAX 060250Z 34010KT 10SM CLR 14/M07 A3012").unwrap();
/// assert_eq!("KLAX", obs.station_id());
///
/// let wind = obs.wind().unwrap();
/// assert_eq!(WindDirection::Degrees(340), wind.direction());
/// assert_eq!(10, wind.speed());
///
/// assert_eq!(SkyCover::Clear, obs.sky_conditions()[0].cover());
/// assert_eq!(Some(14.0), obs.temperature_c());
/// assert_eq!(Some(-7.0), obs.dew_point_c());
/// assert_approx_eq!(57.2f32, obs.temperature_f().unwrap(), 1.0e-4);
/// assert_approx_eq!(30.12f32, obs.pressure_inhg().unwrap());
/// ```
///
/// The whole-degree temperatures from the report body and the
/// tenth-degree temperatures from the remarks are both
/// retained. The `*_most_precise_c()` methods prefer the
/// latter.
#[derive(Clone, Debug, PartialEq)]
pub struct Observation {
    pub(crate) report_type: Option<ReportType>,
    pub(crate) station_id: String,
    pub(crate) observed_at: Option<DateTime<Utc>>,
    pub(crate) raw_date_line: Option<String>,
    pub(crate) record_date: Option<DateTime<Utc>>,
    pub(crate) report_modifier: Option<ReportModifier>,
    pub(crate) wind: Option<Wind>,
    pub(crate) visibility: Option<Visibility>,
    pub(crate) runway_visual_ranges: Vec<RunwayVisualRange>,
    pub(crate) weather_conditions: ArrayVec<WeatherCondition, MAX_WEATHER_CONDITIONS>,
    pub(crate) sky_conditions: Vec<SkyCondition>,
    pub(crate) obscurations: Vec<Obscuration>,
    pub(crate) temperature: Option<f32>,
    pub(crate) dew_point: Option<f32>,
    pub(crate) temperature_precise: Option<f32>,
    pub(crate) dew_point_precise: Option<f32>,
    pub(crate) pressure_inhg: Option<f32>,
    pub(crate) pressure_hpa: Option<u16>,
    pub(crate) is_no_significant_change: bool,
    pub(crate) becoming_trend: Option<String>,
    pub(crate) remarks: Option<String>,
    pub(crate) raw_report: String,
}

impl Observation {
    /// Empty observation for the given station
    pub(crate) fn new<S, R>(station_id: S, raw_report: R) -> Self
    where
        S: Into<String>,
        R: Into<String>,
    {
        Self {
            report_type: None,
            station_id: station_id.into(),
            observed_at: None,
            raw_date_line: None,
            record_date: None,
            report_modifier: None,
            wind: None,
            visibility: None,
            runway_visual_ranges: Vec::new(),
            weather_conditions: ArrayVec::new(),
            sky_conditions: Vec::new(),
            obscurations: Vec::new(),
            temperature: None,
            dew_point: None,
            temperature_precise: None,
            dew_point_precise: None,
            pressure_inhg: None,
            pressure_hpa: None,
            is_no_significant_change: false,
            becoming_trend: None,
            remarks: None,
            raw_report: raw_report.into(),
        }
    }

    /// `METAR` or `SPECI`, if the report was prefixed with one
    pub fn report_type(&self) -> Option<ReportType> {
        self.report_type
    }

    /// ICAO station identifier, like `KLAX`
    pub fn station_id(&self) -> &str {
        &self.station_id
    }

    /// Observation time
    ///
    /// The report carries only the day of month, hour, and
    /// minute. The year and month are inferred from the
    /// decoder's reference time. See
    /// [`DecoderBuilder::with_reference_time()`](crate::DecoderBuilder::with_reference_time).
    pub fn observed_at(&self) -> Option<DateTime<Utc>> {
        self.observed_at
    }

    /// Companion date line, verbatim
    pub fn raw_date_line(&self) -> Option<&str> {
        self.raw_date_line.as_deref()
    }

    /// Companion date line, parsed
    ///
    /// This is the time at which the report was *recorded*
    /// by the data feed. It does not affect
    /// [`observed_at()`](#method.observed_at).
    pub fn record_date(&self) -> Option<DateTime<Utc>> {
        self.record_date
    }

    /// `AUTO` or `COR`
    pub fn report_modifier(&self) -> Option<ReportModifier> {
        self.report_modifier
    }

    /// Surface wind
    pub fn wind(&self) -> Option<&Wind> {
        self.wind.as_ref()
    }

    /// Prevailing visibility
    pub fn visibility(&self) -> Option<&Visibility> {
        self.visibility.as_ref()
    }

    /// Runway visual ranges, in report order
    pub fn runway_visual_ranges(&self) -> &[RunwayVisualRange] {
        &self.runway_visual_ranges
    }

    /// Present weather, in report order
    ///
    /// At most [`MAX_WEATHER_CONDITIONS`] are retained.
    pub fn weather_conditions(&self) -> &[WeatherCondition] {
        &self.weather_conditions
    }

    /// Sky conditions, in report order
    pub fn sky_conditions(&self) -> &[SkyCondition] {
        &self.sky_conditions
    }

    /// Obscurations from the remarks, in report order
    pub fn obscurations(&self) -> &[Obscuration] {
        &self.obscurations
    }

    /// Temperature, whole °C, from the report body
    pub fn temperature_c(&self) -> Option<f32> {
        self.temperature
    }

    /// Dew point, whole °C, from the report body
    pub fn dew_point_c(&self) -> Option<f32> {
        self.dew_point
    }

    /// Temperature, tenths of °C, from the remarks
    pub fn temperature_precise_c(&self) -> Option<f32> {
        self.temperature_precise
    }

    /// Dew point, tenths of °C, from the remarks
    pub fn dew_point_precise_c(&self) -> Option<f32> {
        self.dew_point_precise
    }

    /// Most precise temperature available, °C
    pub fn temperature_most_precise_c(&self) -> Option<f32> {
        self.temperature_precise.or(self.temperature)
    }

    /// Most precise dew point available, °C
    pub fn dew_point_most_precise_c(&self) -> Option<f32> {
        self.dew_point_precise.or(self.dew_point)
    }

    /// Most precise temperature available, °F
    pub fn temperature_f(&self) -> Option<f32> {
        self.temperature_most_precise_c().map(celsius_to_fahrenheit)
    }

    /// Most precise dew point available, °F
    pub fn dew_point_f(&self) -> Option<f32> {
        self.dew_point_most_precise_c().map(celsius_to_fahrenheit)
    }

    /// Altimeter setting, inches of mercury
    ///
    /// Derived from the hectopascal value if the report
    /// carries only a `Q` group.
    pub fn pressure_inhg(&self) -> Option<f32> {
        self.pressure_inhg
    }

    /// QNH, hectopascals
    ///
    /// Only present if the report carries a `Q` group. It is
    /// not derived from an `A` group.
    pub fn pressure_hpa(&self) -> Option<u16> {
        self.pressure_hpa
    }

    /// `NOSIG`: no significant change expected
    pub fn is_no_significant_change(&self) -> bool {
        self.is_no_significant_change
    }

    /// `BECMG` trend clause, verbatim, like `BECMG 7000 HZ`
    pub fn becoming_trend(&self) -> Option<&str> {
        self.becoming_trend.as_deref()
    }

    /// Remarks, verbatim, without the leading `RMK`
    pub fn remarks(&self) -> Option<&str> {
        self.remarks.as_deref()
    }

    /// Report text, verbatim
    pub fn raw_report(&self) -> &str {
        &self.raw_report
    }

    /// Obtain the owned report text
    ///
    /// Destroys this object and releases the report
    pub fn release(self) -> String {
        self.raw_report
    }
}

impl fmt::Display for Observation {
    /// Multi-line, human-readable summary
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.station_id)?;
        if let Some(rtype) = self.report_type {
            write!(f, " {}", rtype)?;
        }
        if let Some(when) = self.observed_at {
            write!(f, ", observed {}", when.format("%Y-%m-%d %H:%M UTC"))?;
        }
        if let Some(modifier) = self.report_modifier {
            write!(f, " ({})", modifier)?;
        }
        writeln!(f)?;

        if let Some(wind) = &self.wind {
            writeln!(f, "  wind: {}", wind)?;
        }
        if let Some(vis) = &self.visibility {
            writeln!(f, "  visibility: {}", vis)?;
        }
        for rvr in &self.runway_visual_ranges {
            writeln!(f, "  visual range: {}", rvr)?;
        }
        if !self.weather_conditions.is_empty() {
            writeln!(f, "  weather: {}", join(&self.weather_conditions))?;
        }
        if !self.sky_conditions.is_empty() {
            writeln!(f, "  sky: {}", join(&self.sky_conditions))?;
        }
        if !self.obscurations.is_empty() {
            writeln!(f, "  obscured by: {}", join(&self.obscurations))?;
        }
        if let Some(temp) = self.temperature_most_precise_c() {
            writeln!(f, "  temperature: {:.1} °C ({:.1} °F)", temp, celsius_to_fahrenheit(temp))?;
        }
        if let Some(dewp) = self.dew_point_most_precise_c() {
            writeln!(f, "  dew point: {:.1} °C ({:.1} °F)", dewp, celsius_to_fahrenheit(dewp))?;
        }
        match (self.pressure_inhg, self.pressure_hpa) {
            (Some(inhg), Some(hpa)) => writeln!(f, "  pressure: {:.2} inHg ({} hPa)", inhg, hpa)?,
            (Some(inhg), None) => writeln!(f, "  pressure: {:.2} inHg", inhg)?,
            (None, Some(hpa)) => writeln!(f, "  pressure: {} hPa", hpa)?,
            (None, None) => {}
        }
        if self.is_no_significant_change {
            writeln!(f, "  trend: no significant change")?;
        }
        if let Some(trend) = &self.becoming_trend {
            writeln!(f, "  trend: {}", trend)?;
        }
        if let Some(remarks) = &self.remarks {
            writeln!(f, "  remarks: {}", remarks)?;
        }
        Ok(())
    }
}

fn celsius_to_fahrenheit(c: f32) -> f32 {
    c * 9.0 / 5.0 + 32.0
}

fn join<T: fmt::Display>(items: &[T]) -> String {
    items
        .iter()
        .map(|item| item.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
