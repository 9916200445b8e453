use chrono::{DateTime, Utc};

use crate::decoder::Decoder;
use crate::observation::MAX_WEATHER_CONDITIONS;

/// Builds a METAR decoder
///
/// The builder comes with a sensible set of default options,
/// and you may not need to change any of them.
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use wxmetar::DecoderBuilder;
///
/// let decoder = DecoderBuilder::new()
///     .with_reference_time(Utc.with_ymd_and_hms(2024, 3, 10, 0, 0, 0).unwrap())
///     .with_max_weather_conditions(2)
///     .build();
/// assert_eq!(2, decoder.max_weather_conditions());
/// ```
///
/// The API specified by the builder is part of this crate's
/// API. The actual default values are *not*, however, and
/// are subject to revision in any minor release. If you
/// care very strongly about a setting, be sure to configure
/// it here.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DecoderBuilder {
    reference_time: Option<DateTime<Utc>>,
    max_weather_conditions: usize,
}

impl DecoderBuilder {
    /// New decoder configuration with "sensible" defaults
    ///
    /// By default, observation times are resolved against the
    /// current UTC time, and up to three present weather
    /// groups are retained.
    pub fn new() -> Self {
        Self {
            reference_time: None,
            max_weather_conditions: MAX_WEATHER_CONDITIONS,
        }
    }

    /// Build a decoder
    ///
    /// The decoder is immutable and may be copied and shared
    /// between threads.
    pub fn build(&self) -> Decoder {
        Decoder::from(self)
    }

    /// Fixed reference time for observation dates
    ///
    /// METAR reports carry only the day of month. The year and
    /// month are taken from the reference time, which defaults
    /// to the current UTC time when each report is decoded.
    /// Set a fixed reference to decode archived reports, or to
    /// obtain reproducible results.
    pub fn with_reference_time(&mut self, reference: DateTime<Utc>) -> &mut Self {
        self.reference_time = Some(reference);
        self
    }

    /// Resolve observation dates against the current UTC time
    pub fn with_current_time(&mut self) -> &mut Self {
        self.reference_time = None;
        self
    }

    /// Most present weather groups to retain per report
    ///
    /// Groups in excess of this limit are still consumed but
    /// are not recorded. The limit is clamped to at most
    /// three.
    pub fn with_max_weather_conditions(&mut self, count: usize) -> &mut Self {
        self.max_weather_conditions = usize::clamp(count, 0, MAX_WEATHER_CONDITIONS);
        self
    }

    /// Fixed reference time, if any
    pub fn reference_time(&self) -> Option<DateTime<Utc>> {
        self.reference_time
    }

    /// Most present weather groups to retain per report
    pub fn max_weather_conditions(&self) -> usize {
        self.max_weather_conditions
    }
}

impl Default for DecoderBuilder {
    fn default() -> Self {
        Self::new()
    }
}
