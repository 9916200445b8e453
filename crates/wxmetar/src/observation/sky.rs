//! Sky condition

use std::fmt;

use crate::grammar::SkyCover;

/// Sky condition group
///
/// Heights are reported in hundreds of feet above ground
/// level. A height of `///` (not observed) is recorded as
/// `None`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SkyCondition {
    pub(crate) cover: SkyCover,
    pub(crate) height: Option<u16>,
    pub(crate) modifier: Option<String>,
}

impl SkyCondition {
    /// Sky cover contraction
    pub fn cover(&self) -> SkyCover {
        self.cover
    }

    /// Layer base (or vertical visibility), in hundreds of feet
    pub fn height_hundreds_of_feet(&self) -> Option<u16> {
        self.height
    }

    /// Layer base (or vertical visibility), in feet
    pub fn height_feet(&self) -> Option<u32> {
        self.height.map(|h| h as u32 * 100)
    }

    /// Cloud type suffix, like `CB`, `TCU`, or `SC`
    ///
    /// Only cloud layers carry a modifier. The text is
    /// returned verbatim.
    pub fn modifier(&self) -> Option<&str> {
        self.modifier.as_deref()
    }
}

impl fmt::Display for SkyCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.cover.fmt(f)?;
        if let Some(ft) = self.height_feet() {
            write!(f, " at {} ft", ft)?;
        }
        if let Some(modifier) = &self.modifier {
            write!(f, " ({})", modifier)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let sky = SkyCondition {
            cover: SkyCover::Broken,
            height: Some(9),
            modifier: Some("CB".to_owned()),
        };
        assert_eq!(Some(900), sky.height_feet());
        assert_eq!("broken clouds at 900 ft (CB)", sky.to_string());

        let sky = SkyCondition {
            cover: SkyCover::Clear,
            height: None,
            modifier: None,
        };
        assert_eq!(None, sky.height_feet());
        assert_eq!("clear", sky.to_string());
    }
}
