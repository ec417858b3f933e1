//! Calendar month used to attribute trips

use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};

use super::BudgetValidationError;

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// A calendar month in UTC, with a zero-based month (0 = January)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MonthPeriod {
    month: u32,
    year: i32,
}

impl MonthPeriod {
    /// Build a period from a zero-based month and a year
    pub fn new(month: u32, year: i32) -> Result<Self, BudgetValidationError> {
        if month > 11 {
            return Err(BudgetValidationError::InvalidMonth(month));
        }

        Ok(Self { month, year })
    }

    /// The month containing `timestamp`
    pub fn containing(timestamp: DateTime<Utc>) -> Self {
        Self {
            month: timestamp.month0(),
            year: timestamp.year(),
        }
    }

    pub fn current() -> Self {
        Self::containing(Utc::now())
    }

    /// Fill in whichever of month/year the caller left out from `now`
    pub fn resolve(
        month: Option<u32>,
        year: Option<i32>,
        now: DateTime<Utc>,
    ) -> Result<Self, BudgetValidationError> {
        let current = Self::containing(now);
        Self::new(
            month.unwrap_or(current.month),
            year.unwrap_or(current.year),
        )
    }

    /// Zero-based month
    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    /// True when `timestamp` falls inside this month
    pub fn contains(&self, timestamp: DateTime<Utc>) -> bool {
        Self::containing(timestamp) == *self
    }

    pub fn label(&self) -> String {
        format!("{} {}", MONTH_NAMES[self.month as usize], self.year)
    }
}

impl std::fmt::Display for MonthPeriod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_new_rejects_month_out_of_range() {
        assert!(MonthPeriod::new(0, 2024).is_ok());
        assert!(MonthPeriod::new(11, 2024).is_ok());
        assert_eq!(
            MonthPeriod::new(12, 2024),
            Err(BudgetValidationError::InvalidMonth(12))
        );
    }

    #[test]
    fn test_containing_uses_zero_based_month() {
        let ts = Utc.with_ymd_and_hms(2024, 3, 15, 12, 0, 0).unwrap();
        let period = MonthPeriod::containing(ts);

        assert_eq!(period.month(), 2);
        assert_eq!(period.year(), 2024);
        assert_eq!(period.to_string(), "2024-03");
        assert_eq!(period.label(), "March 2024");
    }

    #[test]
    fn test_contains_month_edges() {
        let march = MonthPeriod::new(2, 2024).unwrap();

        let first_instant = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap();
        let last_instant = Utc.with_ymd_and_hms(2024, 3, 31, 23, 59, 59).unwrap()
            + chrono::Duration::milliseconds(999);
        let next_month = Utc.with_ymd_and_hms(2024, 4, 1, 0, 0, 0).unwrap();
        let previous_month = first_instant - chrono::Duration::nanoseconds(1);

        assert!(march.contains(first_instant));
        assert!(march.contains(last_instant));
        assert!(!march.contains(next_month));
        assert!(!march.contains(previous_month));
    }

    #[test]
    fn test_contains_checks_year() {
        let march_2024 = MonthPeriod::new(2, 2024).unwrap();
        let march_2023 = Utc.with_ymd_and_hms(2023, 3, 10, 0, 0, 0).unwrap();
        assert!(!march_2024.contains(march_2023));
    }

    #[test]
    fn test_resolve_defaults() {
        let now = Utc.with_ymd_and_hms(2024, 7, 4, 9, 30, 0).unwrap();

        let both_default = MonthPeriod::resolve(None, None, now).unwrap();
        assert_eq!(both_default, MonthPeriod::new(6, 2024).unwrap());

        let explicit_month = MonthPeriod::resolve(Some(0), None, now).unwrap();
        assert_eq!(explicit_month, MonthPeriod::new(0, 2024).unwrap());

        let explicit_both = MonthPeriod::resolve(Some(11), Some(2023), now).unwrap();
        assert_eq!(explicit_both, MonthPeriod::new(11, 2023).unwrap());

        assert!(MonthPeriod::resolve(Some(12), None, now).is_err());
    }
}
