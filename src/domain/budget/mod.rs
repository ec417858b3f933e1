//! Budget accounting domain
//!
//! Derives monthly usage, budget status and alerts from a user's trips.
//! Everything here is pure: callers fetch the profile and trips, this
//! module does the arithmetic.

mod alert;
mod period;
mod status;
mod usage;

pub use alert::{
    BudgetAlert, AlertSeverity, EXCEEDED_THRESHOLD, MONITOR_THRESHOLD, NEARLY_EXCEEDED_THRESHOLD,
};
pub use period::MonthPeriod;
pub use status::BudgetStatus;
pub use usage::{monthly_usage, UsageSummary};

/// Budget validation errors
#[derive(Debug, Clone, PartialEq)]
pub enum BudgetValidationError {
    InvalidMonth(u32),
}

impl std::fmt::Display for BudgetValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidMonth(month) => {
                write!(f, "Month must be between 0 and 11, got {}", month)
            }
        }
    }
}

impl std::error::Error for BudgetValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_messages() {
        assert_eq!(
            BudgetValidationError::InvalidMonth(14).to_string(),
            "Month must be between 0 and 11, got 14"
        );
    }
}
