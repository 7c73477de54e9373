use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use crate::error::Error;

/// How trigonometric function arguments are interpreted.
///
/// The mode is not stored anywhere in this crate; the caller passes it into
/// every evaluation, so flipping the UI toggle only affects subsequent
/// calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AngleMode {
    /// Trigonometric arguments are degrees and get converted before the
    /// underlying call
    Degrees,
    /// Trigonometric arguments are passed through unchanged
    Radians,
}

impl AngleMode {
    /// Convert a trigonometric argument to radians according to the mode.
    pub fn to_radians(self, arg: f64) -> f64 {
        match self {
            Self::Degrees => arg.to_radians(),
            Self::Radians => arg,
        }
    }
}

impl Default for AngleMode {
    /// Calculators start in degrees.
    fn default() -> Self {
        Self::Degrees
    }
}

impl Display for AngleMode {
    fn fmt(&self, fmt: &mut Formatter) -> fmt::Result {
        match self {
            Self::Degrees => write!(fmt, "DEG"),
            Self::Radians => write!(fmt, "RAD"),
        }
    }
}

impl FromStr for AngleMode {
    type Err = Error;

    /// Parse the strings a mode toggle produces, case-insensitively.
    ///
    /// # Examples
    ///
    /// ```
    /// use scieval::AngleMode;
    ///
    /// assert_eq!("deg".parse(), Ok(AngleMode::Degrees));
    /// assert_eq!("RAD".parse(), Ok(AngleMode::Radians));
    /// ```
    fn from_str(s: &str) -> Result<Self, Error> {
        match s.trim().to_ascii_lowercase().as_str() {
            "deg" | "degrees" => Ok(Self::Degrees),
            "rad" | "radians" => Ok(Self::Radians),
            other => Err(Error::Syntax(format!("angle mode must be 'DEG' or 'RAD', not '{}'", other))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::AngleMode;

    #[test]
    fn conversion() {
        assert_eq!(AngleMode::Degrees.to_radians(180.0), std::f64::consts::PI);
        assert_eq!(AngleMode::Radians.to_radians(180.0), 180.0);
        assert_eq!(AngleMode::Degrees.to_radians(0.0), 0.0);
    }

    #[test]
    fn default_is_degrees() {
        assert_eq!(AngleMode::default(), AngleMode::Degrees);
    }

    #[test]
    fn parse_and_display() {
        assert_eq!(" Degrees ".parse(), Ok(AngleMode::Degrees));
        assert_eq!("radians".parse(), Ok(AngleMode::Radians));
        assert!("grad".parse::<AngleMode>().is_err());

        assert_eq!(AngleMode::Degrees.to_string(), "DEG");
        assert_eq!(AngleMode::Radians.to_string(), "RAD");
    }
}
