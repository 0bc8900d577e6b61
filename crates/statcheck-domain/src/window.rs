//! Time windows and date ranges

use chrono::NaiveDate;
use std::fmt;

/// A closed date range, used for series validity and resolved windows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DateRange {
    /// First day of the range (inclusive)
    pub start: NaiveDate,
    /// Last day of the range (inclusive)
    pub end: NaiveDate,
}

impl DateRange {
    /// Create a new range
    ///
    /// Returns `None` when `start > end`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Option<Self> {
        (start <= end).then_some(Self { start, end })
    }

    /// Check if a date falls inside the range
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// How a claim window relates to a series' valid range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowFit {
    /// The window lies fully inside the range
    Inside,
    /// The window partially overlaps the range
    Overlapping,
    /// No overlap at all
    Disjoint,
}

/// The period a claim talks about
///
/// Either bound may be open; an open bound is resolved later against the
/// series being checked (earliest valid date or most recent observation).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct TimeWindow {
    /// Start of the window, if stated
    pub start: Option<NaiveDate>,
    /// End of the window, if stated
    pub end: Option<NaiveDate>,
}

impl TimeWindow {
    /// A window with both bounds open
    pub fn open() -> Self {
        Self::default()
    }

    /// A window with both bounds stated
    pub fn bounded(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            start: Some(start),
            end: Some(end),
        }
    }

    /// A window with only a start
    pub fn from(start: NaiveDate) -> Self {
        Self {
            start: Some(start),
            end: None,
        }
    }

    /// A window with only an end
    pub fn until(end: NaiveDate) -> Self {
        Self {
            start: None,
            end: Some(end),
        }
    }

    /// True when neither bound is stated
    pub fn is_open(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }

    /// Classify the window against a range
    ///
    /// Open bounds take the range's own bound, so an open window fits any range.
    pub fn fit_within(&self, range: &DateRange) -> WindowFit {
        let start = self.start.unwrap_or(range.start);
        let end = self.end.unwrap_or(range.end);

        if start > end || end < range.start || start > range.end {
            return WindowFit::Disjoint;
        }
        if start >= range.start && end <= range.end {
            WindowFit::Inside
        } else {
            WindowFit::Overlapping
        }
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(start) = self.start {
            write!(f, "{}", start)?;
        }
        write!(f, "..")?;
        if let Some(end) = self.end {
            write!(f, "{}", end)?;
        }
        Ok(())
    }
}
