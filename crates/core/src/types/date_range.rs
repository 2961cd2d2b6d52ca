use chrono::{Days, NaiveDate, NaiveDateTime, NaiveTime};

use crate::error::CoreError;

/// Requested collection window, bounds optional. Dates are UTC calendar days.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Result<Self, CoreError> {
        if let (Some(start), Some(end)) = (start, end) {
            if start > end {
                return Err(CoreError::InvalidDateRange(format!(
                    "start {start} is after end {end}"
                )));
            }
        }
        Ok(DateRange { start, end })
    }

    /// Fill in absent bounds: start falls back to a date before the source
    /// platform existed, end to `today` (inclusive).
    pub fn resolve(&self, today: NaiveDate) -> ResolvedRange {
        let default_start = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap();
        ResolvedRange {
            start: self.start.unwrap_or(default_start),
            end: self.end.unwrap_or(today),
        }
    }
}

/// A collection window with both bounds present. `end` is an inclusive
/// calendar date: posts made any time on that day are retained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl ResolvedRange {
    pub fn epoch_bounds(&self) -> EpochBounds {
        let midnight = NaiveTime::MIN;
        let start = NaiveDateTime::new(self.start, midnight).and_utc().timestamp();
        let end_day = self
            .end
            .checked_add_days(Days::new(1))
            .unwrap_or(NaiveDate::MAX);
        let end_exclusive = NaiveDateTime::new(end_day, midnight).and_utc().timestamp();
        EpochBounds {
            start,
            end_exclusive,
        }
    }
}

/// Half-open epoch-second interval `[start, end_exclusive)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EpochBounds {
    pub start: i64,
    pub end_exclusive: i64,
}

impl EpochBounds {
    pub fn contains(&self, timestamp: i64) -> bool {
        timestamp >= self.start && timestamp < self.end_exclusive
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::DateRange;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn reject_inverted_range() {
        assert!(DateRange::new(Some(date(2021, 1, 1)), Some(date(2020, 1, 1))).is_err());
    }

    #[test]
    fn resolve_fills_absent_bounds() {
        let today = date(2023, 6, 15);
        let range = DateRange::new(None, None).unwrap().resolve(today);
        assert_eq!(range.start, date(2000, 1, 1));
        assert_eq!(range.end, today);
    }

    #[test]
    fn bounds_cover_whole_end_day() {
        let range = DateRange::new(Some(date(2020, 1, 1)), Some(date(2020, 1, 2)))
            .unwrap()
            .resolve(date(2023, 1, 1));
        let bounds = range.epoch_bounds();
        // 2020-01-01 00:00:00 UTC
        assert_eq!(bounds.start, 1_577_836_800);
        // exclusive instant is 2020-01-03 00:00:00 UTC
        assert_eq!(bounds.end_exclusive, 1_577_836_800 + 2 * 86_400);
    }

    #[test]
    fn contains_is_half_open() {
        let bounds = DateRange::new(Some(date(2020, 1, 1)), Some(date(2020, 1, 1)))
            .unwrap()
            .resolve(date(2023, 1, 1))
            .epoch_bounds();
        assert!(bounds.contains(bounds.start));
        assert!(bounds.contains(bounds.end_exclusive - 1));
        assert!(!bounds.contains(bounds.end_exclusive));
        assert!(!bounds.contains(bounds.start - 1));
    }

    #[test]
    fn single_day_window_spans_one_day() {
        let bounds = DateRange::new(Some(date(2020, 5, 5)), Some(date(2020, 5, 5)))
            .unwrap()
            .resolve(date(2023, 1, 1))
            .epoch_bounds();
        assert_eq!(bounds.end_exclusive - bounds.start, 86_400);
    }
}
