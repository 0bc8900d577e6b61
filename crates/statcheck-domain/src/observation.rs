//! Observations - timestamped values within a series

use crate::error::ProviderError;
use chrono::NaiveDate;

/// One data point of a series
#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    /// Series the value belongs to
    pub series_id: String,
    /// Period the value is reported for (first day of the period)
    pub timestamp: NaiveDate,
    /// Reported value
    pub value: f64,
}

impl Observation {
    /// Create a new observation
    pub fn new(series_id: impl Into<String>, timestamp: NaiveDate, value: f64) -> Self {
        Self {
            series_id: series_id.into(),
            timestamp,
            value,
        }
    }
}

/// Check that a sequence is strictly ascending by timestamp
///
/// Out-of-order or duplicate timestamps mean the provider returned malformed
/// data, which is reported as [`ProviderError::Parse`].
pub fn check_ordering(observations: &[Observation]) -> Result<(), ProviderError> {
    for pair in observations.windows(2) {
        if pair[1].timestamp <= pair[0].timestamp {
            return Err(ProviderError::Parse(format!(
                "observations for '{}' not strictly ascending at {}",
                pair[1].series_id, pair[1].timestamp
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn obs(y: i32, value: f64) -> Observation {
        Observation::new("s", NaiveDate::from_ymd_opt(y, 1, 1).unwrap(), value)
    }

    #[test]
    fn test_ascending_ok() {
        assert!(check_ordering(&[obs(2020, 1.0), obs(2021, 2.0)]).is_ok());
        assert!(check_ordering(&[]).is_ok());
    }

    #[test]
    fn test_duplicate_rejected() {
        let result = check_ordering(&[obs(2020, 1.0), obs(2020, 2.0)]);
        assert!(matches!(result, Err(ProviderError::Parse(_))));
    }

    #[test]
    fn test_descending_rejected() {
        assert!(check_ordering(&[obs(2021, 1.0), obs(2020, 2.0)]).is_err());
    }
}
