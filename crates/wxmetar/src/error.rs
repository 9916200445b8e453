//! Decoding errors

use thiserror::Error;

/// Error decoding a METAR report
///
/// Any error is terminal for the report: no partial
/// [`Observation`](crate::Observation) is returned. Every
/// variant which concerns the report body carries the
/// verbatim report text so that callers may log it.
#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum ParseError {
    /// The report is empty or lacks a valid station identifier
    #[error("malformed METAR report ({reason}): \"{report}\"")]
    Malformed {
        /// What is wrong with the report
        reason: MalformedReason,

        /// Verbatim report text
        report: String,
    },

    /// The companion date line is not `YYYY/MM/DD HH:MM`
    #[error("invalid report date line \"{line}\": {cause}")]
    InvalidDate {
        /// Verbatim date line
        line: String,

        /// Underlying parse failure
        cause: chrono::ParseError,
    },

    /// A recognized group could not be decoded
    #[error("{source} in METAR report \"{report}\"")]
    GroupDecode {
        /// The failing group
        source: GroupDecodeError,

        /// Verbatim report text
        report: String,
    },
}

/// Reason for a [`ParseError::Malformed`]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum_macros::Display)]
pub enum MalformedReason {
    /// The report contains no tokens
    #[strum(to_string = "no tokens")]
    Empty,

    /// The report ends before the station identifier
    #[strum(to_string = "missing station identifier")]
    MissingStation,

    /// The station identifier is not four alphanumerics
    /// beginning with a letter
    #[strum(to_string = "invalid station identifier")]
    InvalidStation,
}

/// A group which matched its entry condition but failed to decode
///
/// ```
/// use wxmetar::{GroupDecodeError, GroupFault, GroupKind, ParseError};
///
/// let err = wxmetar::decode("KLAX 060250Z 340X0KT").unwrap_err();
/// match err {
///     ParseError::GroupDecode { source, .. } => {
///         assert_eq!(GroupKind::Wind, source.group());
///         assert_eq!("340X0KT", source.token());
///         assert_eq!(GroupFault::Number, source.cause());
///     }
///     _ => unreachable!(),
/// }
/// ```
#[derive(Error, Clone, Debug, PartialEq, Eq, Hash)]
#[error("{cause} in {group} group \"{token}\"")]
pub struct GroupDecodeError {
    group: GroupKind,
    token: String,
    cause: GroupFault,
}

impl GroupDecodeError {
    /// New error for the given `group` and offending `token`
    pub fn new<S>(group: GroupKind, token: S, cause: GroupFault) -> Self
    where
        S: Into<String>,
    {
        Self {
            group,
            token: token.into(),
            cause,
        }
    }

    /// Which group failed
    pub fn group(&self) -> GroupKind {
        self.group
    }

    /// The offending token(s)
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Why the group failed
    pub fn cause(&self) -> GroupFault {
        self.cause
    }

    /// Attach the verbatim report text
    pub(crate) fn in_report<S>(self, report: S) -> ParseError
    where
        S: Into<String>,
    {
        ParseError::GroupDecode {
            source: self,
            report: report.into(),
        }
    }
}

/// Report group
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum_macros::Display)]
pub enum GroupKind {
    /// `DDHHMMZ` observation time
    #[strum(to_string = "date/time")]
    DateTime,

    /// Wind direction, speed, and gust
    #[strum(to_string = "wind")]
    Wind,

    /// `dddVddd` variable wind direction
    #[strum(to_string = "variable wind")]
    VariableWind,

    /// Prevailing visibility
    #[strum(to_string = "visibility")]
    Visibility,

    /// Runway visual range
    #[strum(to_string = "runway visual range")]
    RunwayVisualRange,

    /// Present weather
    #[strum(to_string = "weather")]
    Weather,

    /// Sky condition
    #[strum(to_string = "sky condition")]
    Sky,

    /// Temperature and dew point
    #[strum(to_string = "temperature")]
    Temperature,

    /// Altimeter or QNH
    #[strum(to_string = "pressure")]
    Pressure,

    /// `Tsnnnsnnn` remarks temperature
    #[strum(to_string = "precise temperature")]
    PreciseTemperature,

    /// Obscuration layer in the remarks
    #[strum(to_string = "obscuration")]
    Obscuration,
}

/// Why a group failed to decode
#[derive(Error, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GroupFault {
    /// An integer field is not numeric
    #[error("invalid number")]
    Number,

    /// A decimal or fractional field is not numeric
    #[error("invalid decimal")]
    Decimal,

    /// The token is shorter than its fixed-width fields
    #[error("truncated")]
    Truncated,

    /// A fraction has a zero denominator
    #[error("zero denominator")]
    ZeroDenominator,

    /// A single-letter code is not recognized
    #[error("unrecognized code")]
    UnknownCode,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = GroupDecodeError::new(GroupKind::Wind, "340X0KT", GroupFault::Number);
        assert_eq!("invalid number in wind group \"340X0KT\"", err.to_string());

        let err = err.in_report("KLAX 060250Z 340X0KT");
        assert_eq!(
            "invalid number in wind group \"340X0KT\" in METAR report \"KLAX 060250Z 340X0KT\"",
            err.to_string()
        );

        let err = ParseError::Malformed {
            reason: MalformedReason::InvalidStation,
            report: "1234 060250Z".to_owned(),
        };
        assert_eq!(
            "malformed METAR report (invalid station identifier): \"1234 060250Z\"",
            err.to_string()
        );
    }
}
