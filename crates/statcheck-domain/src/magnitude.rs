//! Directions and magnitudes of change

use std::fmt;

/// Direction of a change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// The quantity went up
    Up,
    /// The quantity went down
    Down,
    /// No direction stated, or no change observed
    Unspecified,
}

impl Direction {
    /// Get the direction name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Unspecified => "unspecified",
        }
    }

    /// Direction of a signed delta; zero has no direction
    pub fn from_delta(delta: f64) -> Self {
        if delta > 0.0 {
            Direction::Up
        } else if delta < 0.0 {
            Direction::Down
        } else {
            Direction::Unspecified
        }
    }

    /// True when both are definite and point opposite ways
    pub fn opposes(&self, other: Direction) -> bool {
        matches!(
            (self, other),
            (Direction::Up, Direction::Down) | (Direction::Down, Direction::Up)
        )
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unit attached to an asserted or observed magnitude
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MagnitudeUnit {
    /// Relative change in percent ("50%")
    Percent,
    /// Absolute change of a rate in percentage points ("0.25%p")
    PercentPoint,
    /// Multiple of the baseline ("3배")
    Times,
    /// Absolute change in the series' own unit ("1.5조원", "300명")
    Absolute(String),
}

impl MagnitudeUnit {
    /// Suffix used when displaying a value
    pub fn suffix(&self) -> &str {
        match self {
            MagnitudeUnit::Percent => "%",
            MagnitudeUnit::PercentPoint => "%p",
            MagnitudeUnit::Times => "배",
            MagnitudeUnit::Absolute(unit) => unit,
        }
    }
}

/// A number with a unit
#[derive(Debug, Clone, PartialEq)]
pub struct Magnitude {
    /// Numeric value as written (50 for "50%")
    pub value: f64,
    /// Unit of the value
    pub unit: MagnitudeUnit,
}

impl Magnitude {
    /// Create a new magnitude
    pub fn new(value: f64, unit: MagnitudeUnit) -> Self {
        Self { value, unit }
    }

    /// Shorthand for a percent magnitude
    pub fn percent(value: f64) -> Self {
        Self::new(value, MagnitudeUnit::Percent)
    }
}

impl fmt::Display for Magnitude {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.value, self.unit.suffix())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_from_delta() {
        assert_eq!(Direction::from_delta(6.0), Direction::Up);
        assert_eq!(Direction::from_delta(-0.1), Direction::Down);
        assert_eq!(Direction::from_delta(0.0), Direction::Unspecified);
    }

    #[test]
    fn test_opposes() {
        assert!(Direction::Up.opposes(Direction::Down));
        assert!(!Direction::Up.opposes(Direction::Up));
        assert!(!Direction::Unspecified.opposes(Direction::Down));
    }

    #[test]
    fn test_magnitude_display() {
        assert_eq!(Magnitude::percent(50.0).to_string(), "50%");
        assert_eq!(Magnitude::new(3.0, MagnitudeUnit::Times).to_string(), "3배");
        assert_eq!(
            Magnitude::new(1.5, MagnitudeUnit::Absolute("조원".to_string())).to_string(),
            "1.5조원"
        );
    }
}
