//! Prevailing visibility

use std::fmt;

const KM_PER_STATUTE_MILE: f32 = 1.609_344;

/// A visibility distance, in the unit it was reported in
///
/// Exactly one unit is populated for any report.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Distance {
    /// Statute miles (`SM`)
    StatuteMiles(f32),

    /// Kilometers (`KM`)
    Kilometers(f32),

    /// Meters (four bare digits)
    Meters(f32),
}

impl Distance {
    /// Distance in kilometers
    pub fn kilometers(&self) -> f32 {
        match *self {
            Distance::StatuteMiles(mi) => mi * KM_PER_STATUTE_MILE,
            Distance::Kilometers(km) => km,
            Distance::Meters(m) => m / 1000.0,
        }
    }

    /// Distance in statute miles
    pub fn statute_miles(&self) -> f32 {
        match *self {
            Distance::StatuteMiles(mi) => mi,
            _ => self.kilometers() / KM_PER_STATUTE_MILE,
        }
    }

    /// Distance in meters
    pub fn meters(&self) -> f32 {
        match *self {
            Distance::Meters(m) => m,
            _ => self.kilometers() * 1000.0,
        }
    }
}

impl fmt::Display for Distance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Distance::StatuteMiles(mi) => write!(f, "{} mi", mi),
            Distance::Kilometers(km) => write!(f, "{} km", km),
            Distance::Meters(m) => write!(f, "{} m", m),
        }
    }
}

/// Prevailing visibility group
///
/// ```
/// use wxmetar::Distance;
///
/// let obs = wxmetar::decode("KMYV 231200Z AUTO 00000KT M1/4SM FG VV003 03/03 A3027").unwrap();
/// let vis = obs.visibility().unwrap();
/// assert_eq!(Distance::StatuteMiles(0.25), vis.distance());
/// assert!(vis.less_than());
/// assert!(!vis.is_cavok());
/// assert_eq!("less than 0.25 mi", vis.to_string());
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Visibility {
    distance: Distance,
    less_than: bool,
    is_cavok: bool,
}

impl Visibility {
    pub(crate) fn new(distance: Distance, less_than: bool) -> Self {
        Self {
            distance,
            less_than,
            is_cavok: false,
        }
    }

    /// Ceiling and visibility OK
    ///
    /// Implies a visibility of 10 km or more.
    pub(crate) fn cavok() -> Self {
        Self {
            distance: Distance::Kilometers(10.0),
            less_than: false,
            is_cavok: true,
        }
    }

    /// Reported distance
    pub fn distance(&self) -> Distance {
        self.distance
    }

    /// True if visibility is *less than* the reported distance
    pub fn less_than(&self) -> bool {
        self.less_than
    }

    /// True if the report was `CAVOK`
    pub fn is_cavok(&self) -> bool {
        self.is_cavok
    }

    /// Visibility in kilometers
    pub fn kilometers(&self) -> f32 {
        self.distance.kilometers()
    }

    /// Visibility in statute miles
    pub fn statute_miles(&self) -> f32 {
        self.distance.statute_miles()
    }

    /// Visibility in meters
    pub fn meters(&self) -> f32 {
        self.distance.meters()
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_cavok {
            return write!(f, "{} or more (ceiling and visibility OK)", self.distance);
        }
        if self.less_than {
            write!(f, "less than ")?;
        }
        self.distance.fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn test_conversions() {
        let vis = Visibility::new(Distance::StatuteMiles(10.0), false);
        assert_approx_eq!(16.09344f32, vis.kilometers(), 1.0e-4);
        assert_approx_eq!(16093.44f32, vis.meters(), 1.0e-1);
        assert_approx_eq!(10.0f32, vis.statute_miles());

        let vis = Visibility::new(Distance::Meters(4000.0), false);
        assert_approx_eq!(4.0f32, vis.kilometers());
        assert_approx_eq!(2.48548f32, vis.statute_miles(), 1.0e-4);

        let vis = Visibility::cavok();
        assert_eq!(Distance::Kilometers(10.0), vis.distance());
        assert!(vis.is_cavok());
        assert!(!vis.less_than());
        assert_eq!("10 km or more (ceiling and visibility OK)", vis.to_string());
    }
}
