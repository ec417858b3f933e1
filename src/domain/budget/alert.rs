use serde::{Deserialize, Serialize};

use super::BudgetStatus;

/// Usage above this percentage means the budget is exceeded
pub const EXCEEDED_THRESHOLD: f64 = 100.0;
pub const NEARLY_EXCEEDED_THRESHOLD: f64 = 90.0;
pub const MONITOR_THRESHOLD: f64 = 75.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertSeverity {
    Info,
    Warning,
    Critical,
}

impl std::fmt::Display for AlertSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Info => write!(f, "info"),
            Self::Warning => write!(f, "warning"),
            Self::Critical => write!(f, "critical"),
        }
    }
}

/// Alert derived from a budget status
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BudgetAlert {
    /// Usage is above the limit; carries the amount over
    Exceeded { overage: f64 },
    NearlyExceeded { usage_percentage: f64 },
    MonitorSpending { usage_percentage: f64 },
}

impl BudgetAlert {
    /// Thresholds are checked from high to low so at most one alert fires
    pub fn evaluate(status: &BudgetStatus) -> Option<Self> {
        let percentage = status.usage_percentage;

        if percentage > EXCEEDED_THRESHOLD {
            Some(Self::Exceeded {
                overage: status.monthly_usage - status.limit,
            })
        } else if percentage >= NEARLY_EXCEEDED_THRESHOLD {
            Some(Self::NearlyExceeded {
                usage_percentage: percentage,
            })
        } else if percentage >= MONITOR_THRESHOLD {
            Some(Self::MonitorSpending {
                usage_percentage: percentage,
            })
        } else {
            None
        }
    }

    pub fn severity(&self) -> AlertSeverity {
        match self {
            Self::Exceeded { .. } => AlertSeverity::Critical,
            Self::NearlyExceeded { .. } => AlertSeverity::Warning,
            Self::MonitorSpending { .. } => AlertSeverity::Info,
        }
    }

    pub fn message(&self) -> String {
        match self {
            Self::Exceeded { overage } => format!(
                "Monthly budget exceeded by {:.2}. Consider reducing trips or fuel spending.",
                overage
            ),
            Self::NearlyExceeded { usage_percentage } => format!(
                "Monthly budget nearly exceeded: {:.0}% used.",
                usage_percentage
            ),
            Self::MonitorSpending { usage_percentage } => format!(
                "Monitor spending: {:.0}% of the monthly budget used.",
                usage_percentage
            ),
        }
    }
}

impl std::fmt::Display for BudgetAlert {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}
