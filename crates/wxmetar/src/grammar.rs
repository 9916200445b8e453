//! METAR lexical grammar
//!
//! The closed set of codes which the decoder recognizes. Every
//! code is a strongly-typed enum which converts from its METAR
//! code with `FromStr`, back to the code with `as_code_str()`,
//! and to a human-readable string with `as_display_str()` or
//! `Display`.
//!
//! ```
//! use wxmetar::{Descriptor, Phenomenon};
//!
//! let phen: Phenomenon = "FG".parse().unwrap();
//! assert_eq!(Phenomenon::Fog, phen);
//! assert_eq!("FG", phen.as_code_str());
//! assert_eq!("fog", format!("{}", phen));
//! assert_eq!("FG", format!("{:#}", phen));
//! assert!(phen.is_obscuration());
//!
//! assert_eq!("freezing", Descriptor::Freezing.as_display_str());
//! ```
//!
//! ## Present weather (Table 12-2)
//!
//! | Intensity  | Descriptor      | Precipitation        | Obscuration       | Other                 |
//! |------------|-----------------|----------------------|-------------------|-----------------------|
//! | `-` Light  | `MI` Shallow    | `DZ` Drizzle         | `BR` Mist         | `PO` Dust/sand whirls |
//! | Moderate   | `PR` Partial    | `RA` Rain            | `FG` Fog          | `SQ` Squalls          |
//! | `+` Heavy  | `BC` Patches    | `SN` Snow            | `FU` Smoke        | `FC` Funnel cloud     |
//! |            | `DR` Low drift  | `SG` Snow grains     | `VA` Volcanic ash | `SS` Sandstorm        |
//! |            | `BL` Blowing    | `IC` Ice crystals    | `DU` Dust         | `DS` Duststorm        |
//! |            | `SH` Showers    | `PL` Ice pellets     | `SA` Sand         |                       |
//! |            | `TS` Thunder    | `GR` Hail            | `HZ` Haze         |                       |
//! |            | `FZ` Freezing   | `GS` Small hail      | `PY` Spray        |                       |
//! |            |                 | `UP` Unknown precip. |                   |                       |

use std::fmt;

use phf::phf_map;
use strum::{EnumMessage, EnumProperty};

/// Ceiling and visibility OK
pub const CAVOK: &str = "CAVOK";

/// Horizontal visibility of 10 km or more
pub const VISIBILITY_10KM: &str = "9999";

/// Variable wind direction
pub const VARIABLE_WIND: &str = "VRB";

/// Start of the remarks section
pub const REMARKS: &str = "RMK";

/// Start of a "becoming" trend clause
pub const BECOMING: &str = "BECMG";

/// No significant change expected
pub const NO_SIGNIFICANT_CHANGE: &str = "NOSIG";

/// Type of report
///
/// Reports may be prefixed with `METAR` (a routine report) or
/// `SPECI` (a special, unscheduled report). Most data feeds omit
/// the prefix.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum_macros::EnumMessage, strum_macros::EnumString,
)]
pub enum ReportType {
    /// Routine report
    #[strum(serialize = "METAR", detailed_message = "routine report")]
    Metar,

    /// Special (unscheduled) report
    #[strum(serialize = "SPECI", detailed_message = "special report")]
    Special,
}

/// Report modifier
///
/// | Code   | Meaning                                          |
/// |--------|--------------------------------------------------|
/// | `AUTO` | fully automated, no human intervention           |
/// | `COR`  | corrected report                                 |
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum_macros::EnumMessage, strum_macros::EnumString,
)]
pub enum ReportModifier {
    /// Fully automated report with no human intervention
    #[strum(serialize = "AUTO", detailed_message = "automated")]
    Automated,

    /// Corrected report
    #[strum(serialize = "COR", detailed_message = "corrected")]
    Corrected,
}

/// Precipitation intensity
///
/// Moderate intensity has no code of its own: it is the
/// absence of a `-` or `+` prefix.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum_macros::EnumMessage,
    strum_macros::EnumString,
)]
pub enum Intensity {
    /// Light
    #[strum(serialize = "-", detailed_message = "light")]
    Light,

    /// Moderate (no prefix)
    #[default]
    #[strum(serialize = "", detailed_message = "moderate")]
    Moderate,

    /// Heavy
    #[strum(serialize = "+", detailed_message = "heavy")]
    Heavy,
}

/// Weather descriptor
///
/// A qualifier for the weather [`Phenomenon`] which follows it.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum_macros::EnumMessage,
    strum_macros::EnumString,
    strum_macros::EnumIter,
)]
pub enum Descriptor {
    /// Shallow
    #[strum(serialize = "MI", detailed_message = "shallow")]
    Shallow,

    /// Partial
    #[strum(serialize = "PR", detailed_message = "partial")]
    Partial,

    /// Patches
    #[strum(serialize = "BC", detailed_message = "patches of")]
    Patches,

    /// Low drifting
    #[strum(serialize = "DR", detailed_message = "low drifting")]
    LowDrifting,

    /// Blowing
    #[strum(serialize = "BL", detailed_message = "blowing")]
    Blowing,

    /// Shower(s)
    #[strum(serialize = "SH", detailed_message = "showers of")]
    Showers,

    /// Thunderstorm
    #[strum(serialize = "TS", detailed_message = "thunderstorm")]
    Thunderstorm,

    /// Freezing
    #[strum(serialize = "FZ", detailed_message = "freezing")]
    Freezing,
}

/// Weather phenomenon
///
/// Phenomena fall into three categories: precipitation,
/// obscurations, and "other." Obscurations may also appear in
/// the remarks section together with the layer they obscure.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum_macros::EnumMessage,
    strum_macros::EnumString,
    strum_macros::EnumProperty,
    strum_macros::EnumIter,
)]
pub enum Phenomenon {
    /// Drizzle
    #[strum(serialize = "DZ", detailed_message = "drizzle", props(category = "precipitation"))]
    Drizzle,

    /// Rain
    #[strum(serialize = "RA", detailed_message = "rain", props(category = "precipitation"))]
    Rain,

    /// Snow
    #[strum(serialize = "SN", detailed_message = "snow", props(category = "precipitation"))]
    Snow,

    /// Snow grains
    #[strum(
        serialize = "SG",
        detailed_message = "snow grains",
        props(category = "precipitation")
    )]
    SnowGrains,

    /// Ice crystals
    #[strum(
        serialize = "IC",
        detailed_message = "ice crystals",
        props(category = "precipitation")
    )]
    IceCrystals,

    /// Ice pellets
    #[strum(
        serialize = "PL",
        detailed_message = "ice pellets",
        props(category = "precipitation")
    )]
    IcePellets,

    /// Hail
    #[strum(serialize = "GR", detailed_message = "hail", props(category = "precipitation"))]
    Hail,

    /// Small hail and/or snow pellets
    #[strum(
        serialize = "GS",
        detailed_message = "small hail",
        props(category = "precipitation")
    )]
    SmallHail,

    /// Unknown precipitation (automated stations)
    #[strum(
        serialize = "UP",
        detailed_message = "unknown precipitation",
        props(category = "precipitation")
    )]
    UnknownPrecipitation,

    /// Mist
    #[strum(serialize = "BR", detailed_message = "mist", props(category = "obscuration"))]
    Mist,

    /// Fog
    #[strum(serialize = "FG", detailed_message = "fog", props(category = "obscuration"))]
    Fog,

    /// Smoke
    #[strum(serialize = "FU", detailed_message = "smoke", props(category = "obscuration"))]
    Smoke,

    /// Volcanic ash
    #[strum(
        serialize = "VA",
        detailed_message = "volcanic ash",
        props(category = "obscuration")
    )]
    VolcanicAsh,

    /// Widespread dust
    #[strum(
        serialize = "DU",
        detailed_message = "widespread dust",
        props(category = "obscuration")
    )]
    WidespreadDust,

    /// Sand
    #[strum(serialize = "SA", detailed_message = "sand", props(category = "obscuration"))]
    Sand,

    /// Haze
    #[strum(serialize = "HZ", detailed_message = "haze", props(category = "obscuration"))]
    Haze,

    /// Spray
    #[strum(serialize = "PY", detailed_message = "spray", props(category = "obscuration"))]
    Spray,

    /// Well-developed dust/sand whirls
    #[strum(
        serialize = "PO",
        detailed_message = "dust/sand whirls",
        props(category = "other")
    )]
    DustSandWhirls,

    /// Squalls
    #[strum(serialize = "SQ", detailed_message = "squalls", props(category = "other"))]
    Squalls,

    /// Funnel cloud, tornado, or waterspout
    #[strum(serialize = "FC", detailed_message = "funnel cloud", props(category = "other"))]
    FunnelCloud,

    /// Sandstorm
    #[strum(serialize = "SS", detailed_message = "sandstorm", props(category = "other"))]
    Sandstorm,

    /// Duststorm
    #[strum(serialize = "DS", detailed_message = "duststorm", props(category = "other"))]
    Duststorm,
}

/// Sky cover contraction
///
/// | Code  | Cover                                 | Height |
/// |-------|---------------------------------------|--------|
/// | `FEW` | 1–2 oktas                             | yes    |
/// | `SCT` | 3–4 oktas                             | yes    |
/// | `BKN` | 5–7 oktas                             | yes    |
/// | `OVC` | 8 oktas                               | yes    |
/// | `VV`  | vertical visibility into obscuration  | yes    |
/// | `CLR` | clear below 12,000 ft (automated)     | no     |
/// | `SKC` | sky clear (manual)                    | no     |
/// | `NSC` | no significant clouds                 | no     |
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum_macros::EnumMessage,
    strum_macros::EnumString,
    strum_macros::EnumIter,
)]
pub enum SkyCover {
    /// Few clouds
    #[strum(serialize = "FEW", detailed_message = "few clouds")]
    Few,

    /// Scattered clouds
    #[strum(serialize = "SCT", detailed_message = "scattered clouds")]
    Scattered,

    /// Broken clouds
    #[strum(serialize = "BKN", detailed_message = "broken clouds")]
    Broken,

    /// Overcast
    #[strum(serialize = "OVC", detailed_message = "overcast")]
    Overcast,

    /// Clear (automated station)
    #[strum(serialize = "CLR", detailed_message = "clear")]
    Clear,

    /// Sky clear (manual station)
    #[strum(serialize = "SKC", detailed_message = "sky clear")]
    SkyClear,

    /// Vertical visibility into an indefinite ceiling
    #[strum(serialize = "VV", detailed_message = "vertical visibility")]
    VerticalVisibility,

    /// No significant clouds
    #[strum(serialize = "NSC", detailed_message = "no significant clouds")]
    NoSignificantClouds,
}

/// Wind speed unit
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum_macros::EnumMessage, strum_macros::EnumString,
)]
pub enum SpeedUnit {
    /// Knots (`KT` or `KTS`)
    #[strum(serialize = "KT", detailed_message = "kt")]
    Knots,

    /// Meters per second (`MPS`)
    #[strum(serialize = "MPS", detailed_message = "m/s")]
    MetersPerSecond,
}

/// Runway approach direction (parallel runways)
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum_macros::EnumMessage, strum_macros::EnumString,
)]
pub enum ApproachDirection {
    /// Left
    #[strum(serialize = "L", detailed_message = "left")]
    Left,

    /// Right
    #[strum(serialize = "R", detailed_message = "right")]
    Right,

    /// Center
    #[strum(serialize = "C", detailed_message = "center")]
    Center,
}

/// Runway visual range beyond the instrument's limits
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum_macros::EnumMessage, strum_macros::EnumString,
)]
pub enum RvrModifier {
    /// More than the highest reportable value
    #[strum(serialize = "P", detailed_message = "more than")]
    AboveMax,

    /// Less than the lowest reportable value
    #[strum(serialize = "M", detailed_message = "less than")]
    BelowMin,
}

/// Runway visual range tendency
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum_macros::EnumMessage, strum_macros::EnumString,
)]
pub enum RvrTendency {
    /// Increasing
    #[strum(serialize = "U", detailed_message = "increasing")]
    Up,

    /// Decreasing
    #[strum(serialize = "D", detailed_message = "decreasing")]
    Down,

    /// No distinct change
    #[strum(serialize = "N", detailed_message = "no change")]
    NoChange,
}

macro_rules! impl_code_strings {
    ($($name:ident),+) => {
        $(
            impl $name {
                /// Human-readable string representation
                pub fn as_display_str(&self) -> &'static str {
                    self.get_detailed_message().unwrap_or_default()
                }

                /// METAR code
                pub fn as_code_str(&self) -> &'static str {
                    self.get_serializations()[0]
                }
            }

            impl AsRef<str> for $name {
                #[inline]
                fn as_ref(&self) -> &str {
                    self.as_code_str()
                }
            }

            impl fmt::Display for $name {
                /// Printable string
                ///
                /// * The normal form is human-readable, like "`fog`"
                /// * The alternate form is the METAR code, like "`FG`"
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    if f.alternate() {
                        self.as_code_str().fmt(f)
                    } else {
                        self.as_display_str().fmt(f)
                    }
                }
            }
        )+
    };
}

impl_code_strings!(
    ReportType,
    ReportModifier,
    Intensity,
    Descriptor,
    Phenomenon,
    SkyCover,
    SpeedUnit,
    ApproachDirection,
    RvrModifier,
    RvrTendency
);

impl Phenomenon {
    /// True for precipitation (`DZ`, `RA`, `SN`, …)
    pub fn is_precipitation(&self) -> bool {
        self.get_str("category") == Some("precipitation")
    }

    /// True for obscurations (`BR`, `FG`, `FU`, `VA`, `DU`, `SA`, `HZ`, `PY`)
    pub fn is_obscuration(&self) -> bool {
        self.get_str("category") == Some("obscuration")
    }
}

impl SkyCover {
    /// True if this contraction carries a layer height
    pub fn has_height(&self) -> bool {
        !matches!(
            self,
            SkyCover::Clear | SkyCover::SkyClear | SkyCover::NoSignificantClouds
        )
    }

    /// True if this contraction describes a cloud layer
    ///
    /// Cloud layers (`FEW`, `SCT`, `BKN`, `OVC`) may also be
    /// followed by a cloud-type modifier.
    pub fn is_layer(&self) -> bool {
        matches!(
            self,
            SkyCover::Few | SkyCover::Scattered | SkyCover::Broken | SkyCover::Overcast
        )
    }

    /// True for either of the "clear sky" contractions
    pub fn is_clear(&self) -> bool {
        matches!(self, SkyCover::Clear | SkyCover::SkyClear)
    }
}

/// A two-character present weather code
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum WeatherCode {
    Descriptor(Descriptor),
    Phenomenon(Phenomenon),
}

/// Present weather codebook
///
/// Every two-character code which may begin (or continue) a
/// present weather group.
static WEATHER_CODEBOOK: phf::Map<&'static str, WeatherCode> = phf_map! {
    // descriptors
    "MI" => WeatherCode::Descriptor(Descriptor::Shallow),
    "PR" => WeatherCode::Descriptor(Descriptor::Partial),
    "BC" => WeatherCode::Descriptor(Descriptor::Patches),
    "DR" => WeatherCode::Descriptor(Descriptor::LowDrifting),
    "BL" => WeatherCode::Descriptor(Descriptor::Blowing),
    "SH" => WeatherCode::Descriptor(Descriptor::Showers),
    "TS" => WeatherCode::Descriptor(Descriptor::Thunderstorm),
    "FZ" => WeatherCode::Descriptor(Descriptor::Freezing),

    // precipitation
    "DZ" => WeatherCode::Phenomenon(Phenomenon::Drizzle),
    "RA" => WeatherCode::Phenomenon(Phenomenon::Rain),
    "SN" => WeatherCode::Phenomenon(Phenomenon::Snow),
    "SG" => WeatherCode::Phenomenon(Phenomenon::SnowGrains),
    "IC" => WeatherCode::Phenomenon(Phenomenon::IceCrystals),
    "PL" => WeatherCode::Phenomenon(Phenomenon::IcePellets),
    "GR" => WeatherCode::Phenomenon(Phenomenon::Hail),
    "GS" => WeatherCode::Phenomenon(Phenomenon::SmallHail),
    "UP" => WeatherCode::Phenomenon(Phenomenon::UnknownPrecipitation),

    // obscurations
    "BR" => WeatherCode::Phenomenon(Phenomenon::Mist),
    "FG" => WeatherCode::Phenomenon(Phenomenon::Fog),
    "FU" => WeatherCode::Phenomenon(Phenomenon::Smoke),
    "VA" => WeatherCode::Phenomenon(Phenomenon::VolcanicAsh),
    "DU" => WeatherCode::Phenomenon(Phenomenon::WidespreadDust),
    "SA" => WeatherCode::Phenomenon(Phenomenon::Sand),
    "HZ" => WeatherCode::Phenomenon(Phenomenon::Haze),
    "PY" => WeatherCode::Phenomenon(Phenomenon::Spray),

    // other
    "PO" => WeatherCode::Phenomenon(Phenomenon::DustSandWhirls),
    "SQ" => WeatherCode::Phenomenon(Phenomenon::Squalls),
    "FC" => WeatherCode::Phenomenon(Phenomenon::FunnelCloud),
    "SS" => WeatherCode::Phenomenon(Phenomenon::Sandstorm),
    "DS" => WeatherCode::Phenomenon(Phenomenon::Duststorm),
};

/// Sky condition codebook
///
/// Keyed by the leading characters of the group: three for
/// most contractions, two for vertical visibility.
static SKY_CODEBOOK: phf::Map<&'static str, SkyCover> = phf_map! {
    "FEW" => SkyCover::Few,
    "SCT" => SkyCover::Scattered,
    "BKN" => SkyCover::Broken,
    "OVC" => SkyCover::Overcast,
    "CLR" => SkyCover::Clear,
    "SKC" => SkyCover::SkyClear,
    "NSC" => SkyCover::NoSignificantClouds,
    "VV" => SkyCover::VerticalVisibility,
};

/// Lookup a two-character weather code at `offset` in `token`
pub(crate) fn weather_code_at(token: &str, offset: usize) -> Option<WeatherCode> {
    WEATHER_CODEBOOK
        .get(token.get(offset..offset + 2)?)
        .cloned()
}

/// Does `token` begin a present weather group?
///
/// A weather group begins with an intensity or with any
/// descriptor or phenomenon code.
pub(crate) fn starts_weather_group(token: &str) -> bool {
    token.starts_with('-') || token.starts_with('+') || weather_code_at(token, 0).is_some()
}

/// Lookup the sky cover contraction which begins `token`
///
/// Returns the contraction and its length in characters.
pub(crate) fn sky_cover_prefix(token: &str) -> Option<(SkyCover, usize)> {
    token
        .get(0..3)
        .and_then(|code| SKY_CODEBOOK.get(code))
        .map(|cover| (*cover, 3))
        .or_else(|| {
            let cover = SKY_CODEBOOK.get(token.get(0..2)?)?;
            Some((*cover, 2))
        })
}
