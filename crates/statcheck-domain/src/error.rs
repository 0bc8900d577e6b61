//! Data provider failure taxonomy

use std::fmt;

/// Errors a data provider can report
///
/// The comparator absorbs every variant into `Coverage::None`; these never
/// abort a batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderError {
    /// Transport failure talking to the statistics portal
    Network(String),
    /// The response could not be interpreted as an observation sequence
    Parse(String),
    /// The portal refused the request because of rate limiting
    RateLimit,
    /// The call did not finish within the configured deadline
    Timeout,
}

impl ProviderError {
    /// Short machine-readable kind
    pub fn kind(&self) -> &'static str {
        match self {
            ProviderError::Network(_) => "network",
            ProviderError::Parse(_) => "parse",
            ProviderError::RateLimit => "rate_limit",
            ProviderError::Timeout => "timeout",
        }
    }
}

impl fmt::Display for ProviderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderError::Network(msg) => write!(f, "Network error: {}", msg),
            ProviderError::Parse(msg) => write!(f, "Parse error: {}", msg),
            ProviderError::RateLimit => write!(f, "Rate limit exceeded"),
            ProviderError::Timeout => write!(f, "Provider call timed out"),
        }
    }
}

impl std::error::Error for ProviderError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_and_kind() {
        let err = ProviderError::Network("connection refused".to_string());
        assert_eq!(err.kind(), "network");
        assert_eq!(err.to_string(), "Network error: connection refused");
        assert_eq!(ProviderError::Timeout.kind(), "timeout");
    }
}
