//! # wxmetar: METAR Decoding
//!
//! This crate decodes
//! [METAR](https://en.wikipedia.org/wiki/METAR)
//! aviation routine weather reports into structured
//! observations. A METAR report is a single line of terse,
//! positionally-encoded text, like:
//!
//! ```txt
//! EGBJ 200850Z 23007G17KT 4000NE RADZ BKN009 BKN015 15/14 Q1006
//! ```
//!
//! which reads as: "Gloucestershire Airport, on the 20th at
//! 08:50 UTC. Wind from 230° at 7 knots, gusting to 17 knots.
//! Visibility 4000 meters. Rain. Broken clouds at 900 and
//! 1500 feet. Temperature 15 °C, dew point 14 °C. QNH 1006
//! hPa."
//!
//! ## Disclaimer
//!
//! This crate is dual-licensed MIT and Apache 2.0. Read these licenses
//! carefully as they may affect your rights.
//!
//! This crate has not been certified for flight planning or for any
//! other purpose. The author **strongly discourages** its use in any
//! safety-critical applications. Always consult an official weather
//! briefing before flight.
//!
//! ## Example
//!
//! Obtaining report text is beyond the scope of this crate.
//! Station files are available from many national weather
//! services. Each file holds a date line followed by the
//! report:
//!
//! ```txt
//! 2024/03/20 08:50
//! EGBJ 200850Z 23007G17KT 4000NE RADZ BKN009 BKN015 15/14 Q1006
//! ```
//!
//! Decode the report with a [`Decoder`]:
//!
//! ```
//! use chrono::{TimeZone, Utc};
//! use wxmetar::{DecoderBuilder, Distance, Phenomenon, SkyCover, WindDirection};
//!
//! # let station_file = "2024/03/20 08:50\nEGBJ 200850Z 23007G17KT 4000NE RADZ BKN009 BKN015 15/14 Q1006\n";
//! let decoder = DecoderBuilder::new()
//!     .with_reference_time(Utc.with_ymd_and_hms(2024, 3, 20, 9, 0, 0).unwrap())
//!     .build();
//!
//! // in actual implementations, handle this error gracefully!
//! let obs = decoder.decode_record(station_file).expect("bad report");
//! assert_eq!("EGBJ", obs.station_id());
//! assert_eq!(
//!     Utc.with_ymd_and_hms(2024, 3, 20, 8, 50, 0).unwrap(),
//!     obs.observed_at().unwrap()
//! );
//!
//! let wind = obs.wind().unwrap();
//! assert_eq!(WindDirection::Degrees(230), wind.direction());
//! assert_eq!(Some(17), wind.gust());
//!
//! assert_eq!(Distance::Meters(4000.0), obs.visibility().unwrap().distance());
//! assert_eq!(Phenomenon::Rain, obs.weather_conditions()[0].phenomenon());
//!
//! // sky conditions are reported in hundreds of feet
//! let sky = obs.sky_conditions();
//! assert_eq!(SkyCover::Broken, sky[0].cover());
//! assert_eq!(Some(900), sky[0].height_feet());
//! assert_eq!(Some(1500), sky[1].height_feet());
//!
//! assert_eq!(Some(15.0), obs.temperature_c());
//! assert_eq!(Some(1006), obs.pressure_hpa());
//! ```
//!
//! If you don't care about the reference time, the free
//! functions [`decode()`], [`decode_with_date()`], and
//! [`decode_record()`] use a default decoder which resolves
//! dates against the current UTC time.
//!
//! Every group except the station identifier is optional.
//! Groups which are missing from the report are `None`. A
//! report with a group that is recognized but cannot be
//! decoded, like a wind group of `340X0KT`, fails with a
//! [`ParseError`]. No partial observation is returned.
//!
//! All codes implement `Display`. The normal form is
//! human-readable, and the alternate form (`{:#}`) is the
//! METAR code.
//!
//! ```
//! # let obs = wxmetar::decode("EGBJ 200850Z 23007G17KT 4000NE RADZ BKN009 BKN015 15/14 Q1006").unwrap();
//! let sky = &obs.sky_conditions()[0];
//! assert_eq!("broken clouds at 900 ft", format!("{}", sky));
//! assert_eq!("BKN", format!("{:#}", sky.cover()));
//! ```
//!
//! ## Background
//!
//! METAR reports are issued by airports and automated weather
//! stations worldwide, usually every hour, and more often when
//! conditions change rapidly. The format is defined by the
//! WMO and ICAO, with regional variations: North American
//! stations report visibility in statute miles and pressure
//! in inches of mercury, while most other stations use meters
//! and hectopascals. This crate accepts both.
//!
//! Groups appear in a fixed order. Recognized groups are:
//!
//! * report type (`METAR`, `SPECI`) and station identifier
//! * day and time (`DDHHMMZ`)
//! * report modifier (`AUTO`, `COR`)
//! * wind and variable wind direction
//! * visibility and runway visual range
//! * present weather and sky condition
//! * temperature, dew point, and pressure
//! * `BECMG` trend, `NOSIG`, and remarks (`RMK`)
//!
//! Only the tenth-degree temperature group (`T01330117`) and
//! obscuration layers (`FG SCT000`) are decoded from the
//! remarks. The remarks text is retained verbatim.

mod builder;
mod decoder;
mod error;
mod grammar;
mod observation;

pub use builder::DecoderBuilder;
pub use decoder::{decode, decode_record, decode_with_date, is_date_line, Decoder};
pub use error::{GroupDecodeError, GroupFault, GroupKind, MalformedReason, ParseError};
pub use grammar::{
    ApproachDirection, Descriptor, Intensity, Phenomenon, ReportModifier, ReportType,
    RvrModifier, RvrTendency, SkyCover, SpeedUnit,
};
pub use observation::{
    Distance, Obscuration, Observation, RunwayVisualRange, SkyCondition, VariableRange,
    Visibility, WeatherCondition, Wind, WindDirection, MAX_WEATHER_CONDITIONS,
};
