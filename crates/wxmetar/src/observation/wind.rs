//! Surface wind

use std::fmt;

use crate::grammar::SpeedUnit;

/// Knots per meter per second
const KNOTS_PER_MPS: f32 = 1.943_844_5;

/// Wind direction
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum WindDirection {
    /// True direction the wind blows *from*, in degrees
    Degrees(u16),

    /// Variable direction (`VRB`)
    Variable,
}

/// Range of a variable wind direction (`dddVddd`)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct VariableRange {
    min: u16,
    max: u16,
}

impl VariableRange {
    pub(crate) fn new(min: u16, max: u16) -> Self {
        Self { min, max }
    }

    /// First bound, in degrees
    pub fn min(&self) -> u16 {
        self.min
    }

    /// Second bound, in degrees, clockwise from `min()`
    pub fn max(&self) -> u16 {
        self.max
    }
}

/// Surface wind group
///
/// Speeds are stored in the unit in which they were reported.
/// Use [`speed_knots()`](#method.speed_knots) or
/// [`speed_mps()`](#method.speed_mps) to normalize them.
///
/// A [`Variable`](WindDirection::Variable) direction without a
/// [`variable_range()`](#method.variable_range) indicates a
/// variability of 6 knots or less.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Wind {
    pub(crate) direction: WindDirection,
    pub(crate) speed: u16,
    pub(crate) gust: Option<u16>,
    pub(crate) unit: SpeedUnit,
    pub(crate) variable_range: Option<VariableRange>,
}

impl Wind {
    /// Direction the wind blows from
    pub fn direction(&self) -> WindDirection {
        self.direction
    }

    /// Sustained speed, in [`unit()`](#method.unit)
    pub fn speed(&self) -> u16 {
        self.speed
    }

    /// Gust speed, in [`unit()`](#method.unit)
    pub fn gust(&self) -> Option<u16> {
        self.gust
    }

    /// Unit of the reported speeds
    pub fn unit(&self) -> SpeedUnit {
        self.unit
    }

    /// Variable direction range, if reported
    pub fn variable_range(&self) -> Option<VariableRange> {
        self.variable_range
    }

    /// True if the wind is calm (zero speed)
    pub fn is_calm(&self) -> bool {
        self.speed == 0 && self.gust.is_none()
    }

    /// Sustained speed in knots
    pub fn speed_knots(&self) -> f32 {
        to_knots(self.speed, self.unit)
    }

    /// Sustained speed in meters per second
    pub fn speed_mps(&self) -> f32 {
        to_mps(self.speed, self.unit)
    }

    /// Gust speed in knots
    pub fn gust_knots(&self) -> Option<f32> {
        self.gust.map(|g| to_knots(g, self.unit))
    }

    /// Gust speed in meters per second
    pub fn gust_mps(&self) -> Option<f32> {
        self.gust.map(|g| to_mps(g, self.unit))
    }
}

impl fmt::Display for Wind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_calm() {
            return write!(f, "calm");
        }

        match self.direction {
            WindDirection::Degrees(deg) => write!(f, "from {:03}°", deg)?,
            WindDirection::Variable => write!(f, "variable")?,
        }
        write!(f, " at {} {}", self.speed, self.unit)?;
        if let Some(gust) = self.gust {
            write!(f, ", gusting to {} {}", gust, self.unit)?;
        }
        if let Some(range) = self.variable_range {
            write!(
                f,
                ", varying between {:03}° and {:03}°",
                range.min, range.max
            )?;
        }
        Ok(())
    }
}

fn to_knots(speed: u16, unit: SpeedUnit) -> f32 {
    match unit {
        SpeedUnit::Knots => speed as f32,
        SpeedUnit::MetersPerSecond => speed as f32 * KNOTS_PER_MPS,
    }
}

fn to_mps(speed: u16, unit: SpeedUnit) -> f32 {
    match unit {
        SpeedUnit::Knots => speed as f32 / KNOTS_PER_MPS,
        SpeedUnit::MetersPerSecond => speed as f32,
    }
}
