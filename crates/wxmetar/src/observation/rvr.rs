//! Runway visual range

use std::fmt;

use crate::grammar::{ApproachDirection, RvrModifier, RvrTendency};

/// Runway visual range group
///
/// Like `R28L/2400V4000FT/U`. Ranges are in feet when the
/// group carries an `FT` suffix and in meters otherwise.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RunwayVisualRange {
    pub(crate) runway_number: u8,
    pub(crate) approach_direction: Option<ApproachDirection>,
    pub(crate) modifier: Option<RvrModifier>,
    pub(crate) lowest: u16,
    pub(crate) highest: Option<u16>,
    pub(crate) in_feet: bool,
    pub(crate) tendency: Option<RvrTendency>,
}

impl RunwayVisualRange {
    /// Runway number, like `28`
    pub fn runway_number(&self) -> u8 {
        self.runway_number
    }

    /// Which of several parallel runways
    pub fn approach_direction(&self) -> Option<ApproachDirection> {
        self.approach_direction
    }

    /// Range is beyond the instrument's limits
    pub fn modifier(&self) -> Option<RvrModifier> {
        self.modifier
    }

    /// Lowest reportable range (or the only range)
    pub fn lowest_reportable(&self) -> u16 {
        self.lowest
    }

    /// Highest reportable range, if the range is variable
    pub fn highest_reportable(&self) -> Option<u16> {
        self.highest
    }

    /// True if ranges are in feet; false for meters
    pub fn in_feet(&self) -> bool {
        self.in_feet
    }

    /// Trend of the range
    pub fn tendency(&self) -> Option<RvrTendency> {
        self.tendency
    }
}

impl fmt::Display for RunwayVisualRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let unit = if self.in_feet { "ft" } else { "m" };

        write!(f, "runway {:02}", self.runway_number)?;
        if let Some(dir) = self.approach_direction {
            write!(f, "{:#}", dir)?;
        }
        write!(f, ": ")?;
        if let Some(modifier) = self.modifier {
            write!(f, "{} ", modifier)?;
        }
        write!(f, "{} {}", self.lowest, unit)?;
        if let Some(highest) = self.highest {
            write!(f, " to {} {}", highest, unit)?;
        }
        if let Some(tendency) = self.tendency {
            write!(f, ", {}", tendency)?;
        }
        Ok(())
    }
}
