use serde::{Deserialize, Serialize};

use super::{BudgetAlert, MonthPeriod};
use crate::domain::user::{User, UserId};

/// Derived budget position of one user for one month; never persisted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetStatus {
    pub user_id: UserId,
    #[serde(flatten)]
    pub period: MonthPeriod,
    pub monthly_usage: f64,
    pub personal_budget: f64,
    pub monthly_fuel_limit: f64,
    pub is_driver: bool,
    /// The ceiling that applies to this user's role
    pub limit: f64,
    pub usage_percentage: f64,
    /// May be negative once the limit is exceeded
    pub remaining_budget: f64,
    pub is_over_budget: bool,
}

impl BudgetStatus {
    pub fn from_usage(user: &User, monthly_usage: f64, period: MonthPeriod) -> Self {
        let limit = user.applicable_limit();
        let usage_percentage = if limit == 0.0 {
            0.0
        } else {
            monthly_usage / limit * 100.0
        };

        Self {
            user_id: user.id().clone(),
            period,
            monthly_usage,
            personal_budget: user.personal_budget(),
            monthly_fuel_limit: user.monthly_fuel_limit(),
            is_driver: user.role().is_driver(),
            limit,
            usage_percentage,
            remaining_budget: limit - monthly_usage,
            is_over_budget: monthly_usage > limit,
        }
    }

    /// At most one alert, picked from the highest threshold crossed
    pub fn alert(&self) -> Option<BudgetAlert> {
        BudgetAlert::evaluate(self)
    }

    pub fn alerts(&self) -> Vec<BudgetAlert> {
        self.alert().into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::user::Role;

    fn citizen(budget: f64) -> User {
        User::new(
            UserId::new("citizen-1").unwrap(),
            "Ana",
            "ana@example.com",
            Role::Citizen,
        )
        .with_personal_budget(budget)
        .with_monthly_fuel_limit(9999.0)
    }

    fn driver(limit: f64) -> User {
        User::new(
            UserId::new("driver-1").unwrap(),
            "Bo",
            "bo@example.com",
            Role::Driver,
        )
        .with_personal_budget(1.0)
        .with_monthly_fuel_limit(limit)
    }

    fn period() -> MonthPeriod {
        MonthPeriod::new(2, 2024).unwrap()
    }

    #[test]
    fn test_citizen_uses_personal_budget() {
        let status = BudgetStatus::from_usage(&citizen(100.0), 75.0, period());

        assert!(!status.is_driver);
        assert_eq!(status.limit, 100.0);
        assert_eq!(status.usage_percentage, 75.0);
        assert_eq!(status.remaining_budget, 25.0);
        assert!(!status.is_over_budget);
        assert_eq!(status.alerts(), vec![BudgetAlert::MonitorSpending { usage_percentage: 75.0 }]);
    }

    #[test]
    fn test_driver_uses_fuel_limit() {
        let status = BudgetStatus::from_usage(&driver(200.0), 250.0, period());

        assert!(status.is_driver);
        assert_eq!(status.limit, 200.0);
        assert!(status.is_over_budget);
        assert_eq!(status.remaining_budget, -50.0);
        assert_eq!(status.usage_percentage, 125.0);

        let alert = status.alert().unwrap();
        assert_eq!(alert, BudgetAlert::Exceeded { overage: 50.0 });
        assert!(alert.message().contains("exceeded by 50.00"));
    }

    #[test]
    fn test_zero_limit() {
        let status = BudgetStatus::from_usage(&citizen(0.0), 30.0, period());

        assert_eq!(status.usage_percentage, 0.0);
        assert_eq!(status.remaining_budget, -30.0);
        assert!(status.is_over_budget);
        assert!(status.alerts().is_empty());

        let idle = BudgetStatus::from_usage(&citizen(0.0), 0.0, period());
        assert!(!idle.is_over_budget);
        assert_eq!(idle.remaining_budget, 0.0);
    }

    #[test]
    fn test_no_usage() {
        let status = BudgetStatus::from_usage(&citizen(100.0), 0.0, period());

        assert_eq!(status.monthly_usage, 0.0);
        assert_eq!(status.usage_percentage, 0.0);
        assert_eq!(status.remaining_budget, 100.0);
        assert!(status.alerts().is_empty());
    }

    #[test]
    fn test_serialization_flattens_period() {
        let status = BudgetStatus::from_usage(&citizen(100.0), 40.0, period());
        let json = serde_json::to_value(&status).unwrap();

        assert_eq!(json["user_id"], "citizen-1");
        assert_eq!(json["month"], 2);
        assert_eq!(json["year"], 2024);
        assert_eq!(json["usage_percentage"], 40.0);
        assert_eq!(json["is_over_budget"], false);
    }
}
