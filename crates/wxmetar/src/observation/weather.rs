//! Present weather and obscurations

use std::fmt;

use crate::grammar::{Descriptor, Intensity, Phenomenon, SkyCover};

/// Present weather group
///
/// ```
/// use wxmetar::{Intensity, Phenomenon};
///
/// let obs = wxmetar::decode("LOWW 072050Z 15002KT 4000 -SN BR FEW008 M05/M06 Q1020").unwrap();
/// let wx = &obs.weather_conditions()[0];
/// assert_eq!(Intensity::Light, wx.intensity());
/// assert_eq!(Phenomenon::Snow, wx.phenomenon());
/// assert_eq!("light snow", wx.to_string());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct WeatherCondition {
    pub(crate) intensity: Intensity,
    pub(crate) descriptor: Option<Descriptor>,
    pub(crate) phenomenon: Phenomenon,
}

impl WeatherCondition {
    /// Intensity; `Moderate` when none is reported
    pub fn intensity(&self) -> Intensity {
        self.intensity
    }

    /// Descriptor, like `Showers` or `Freezing`
    pub fn descriptor(&self) -> Option<Descriptor> {
        self.descriptor
    }

    /// Weather phenomenon
    pub fn phenomenon(&self) -> Phenomenon {
        self.phenomenon
    }
}

impl fmt::Display for WeatherCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.intensity != Intensity::Moderate {
            write!(f, "{} ", self.intensity)?;
        }
        if let Some(desc) = self.descriptor {
            write!(f, "{} ", desc)?;
        }
        self.phenomenon.fmt(f)
    }
}

/// Obscuration reported in the remarks
///
/// An obscuring phenomenon, optionally with the sky layer it
/// obscures, like `FG SCT000`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Obscuration {
    pub(crate) phenomenon: Phenomenon,
    pub(crate) cover: Option<SkyCover>,
    pub(crate) height: Option<u16>,
}

impl Obscuration {
    /// Obscuring phenomenon
    pub fn phenomenon(&self) -> Phenomenon {
        self.phenomenon
    }

    /// Amount of sky obscured
    pub fn cover(&self) -> Option<SkyCover> {
        self.cover
    }

    /// Height of the obscured layer, in hundreds of feet
    pub fn height_hundreds_of_feet(&self) -> Option<u16> {
        self.height
    }
}

impl fmt::Display for Obscuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.phenomenon.fmt(f)?;
        if let Some(cover) = self.cover {
            write!(f, " ({}", cover)?;
            if let Some(height) = self.height {
                write!(f, " at {} ft", height as u32 * 100)?;
            }
            write!(f, ")")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let wx = WeatherCondition {
            intensity: Intensity::Heavy,
            descriptor: Some(Descriptor::Showers),
            phenomenon: Phenomenon::Rain,
        };
        assert_eq!("heavy showers of rain", wx.to_string());

        let wx = WeatherCondition {
            intensity: Intensity::Moderate,
            descriptor: None,
            phenomenon: Phenomenon::Mist,
        };
        assert_eq!("mist", wx.to_string());

        let obsc = Obscuration {
            phenomenon: Phenomenon::Fog,
            cover: Some(SkyCover::Scattered),
            height: Some(0),
        };
        assert_eq!("fog (scattered clouds at 0 ft)", obsc.to_string());
    }
}
