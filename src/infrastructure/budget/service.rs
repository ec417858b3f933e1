//! Budget accounting service

use std::fmt::Debug;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use crate::domain::budget::{BudgetAlert, BudgetStatus, MonthPeriod, UsageSummary};
use crate::domain::session::Session;
use crate::domain::trip::TripRepository;
use crate::domain::user::{parse_user_id, UserId, UserRepository};
use crate::domain::DomainError;

#[async_trait]
pub trait BudgetServiceTrait: Send + Sync {
    /// Total trip cost for the month; month (0-11) and year default to now
    async fn monthly_usage(
        &self,
        user_id: &str,
        month: Option<u32>,
        year: Option<i32>,
    ) -> Result<f64, DomainError>;

    /// Like [`monthly_usage`](Self::monthly_usage) but reports 0 on any failure
    async fn monthly_usage_or_zero(&self, user_id: &str, month: Option<u32>, year: Option<i32>) -> f64 {
        match self.monthly_usage(user_id, month, year).await {
            Ok(usage) => usage,
            Err(error) => {
                warn!(user_id, error = %error, "Monthly usage unavailable, reporting 0");
                0.0
            }
        }
    }

    async fn usage_summary(
        &self,
        user_id: &str,
        month: Option<u32>,
        year: Option<i32>,
    ) -> Result<UsageSummary, DomainError>;

    /// Status for the current month; NotFound when the profile is missing
    async fn budget_status(&self, user_id: &str) -> Result<BudgetStatus, DomainError>;

    /// Zero or one alert for the current month
    async fn budget_alerts(&self, user_id: &str) -> Result<Vec<BudgetAlert>, DomainError> {
        Ok(self.budget_status(user_id).await?.alerts())
    }

    async fn session_usage(&self, session: &Session) -> f64 {
        let user_id = session.current_user_id();
        let user_id = user_id.as_ref().map(|id| id.as_str()).unwrap_or_default();
        self.monthly_usage_or_zero(user_id, None, None).await
    }

    async fn session_budget_status(&self, session: &Session) -> Result<BudgetStatus, DomainError> {
        let user_id = session
            .current_user_id()
            .ok_or_else(|| DomainError::invalid_argument("No user is signed in"))?;
        self.budget_status(user_id.as_str()).await
    }

    async fn session_budget_alerts(
        &self,
        session: &Session,
    ) -> Result<Vec<BudgetAlert>, DomainError> {
        Ok(self.session_budget_status(session).await?.alerts())
    }
}

pub struct BudgetService<U: UserRepository, T: TripRepository> {
    users: Arc<U>,
    trips: Arc<T>,
    clock: fn() -> DateTime<Utc>,
}

impl<U: UserRepository, T: TripRepository> Debug for BudgetService<U, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BudgetService").finish_non_exhaustive()
    }
}

impl<U: UserRepository, T: TripRepository> BudgetService<U, T> {
    pub fn new(users: Arc<U>, trips: Arc<T>) -> Self {
        Self {
            users,
            trips,
            clock: Utc::now,
        }
    }

    /// Replace the source of "now" used to pick the default month
    pub fn with_clock(mut self, clock: fn() -> DateTime<Utc>) -> Self {
        self.clock = clock;
        self
    }

    fn period(&self, month: Option<u32>, year: Option<i32>) -> Result<MonthPeriod, DomainError> {
        MonthPeriod::resolve(month, year, (self.clock)())
            .map_err(|e| DomainError::invalid_argument(e.to_string()))
    }

    async fn summarize(
        &self,
        user_id: &UserId,
        period: MonthPeriod,
    ) -> Result<UsageSummary, DomainError> {
        let trips = self.trips.list_by_user(user_id).await?;
        let summary = UsageSummary::from_trips(&trips, period);

        debug!(
            user_id = %user_id,
            period = %period,
            trips = summary.trip_count,
            total_cost = summary.total_cost,
            "Computed monthly usage"
        );
        Ok(summary)
    }
}

#[async_trait]
impl<U, T> BudgetServiceTrait for BudgetService<U, T>
where
    U: UserRepository + 'static,
    T: TripRepository + 'static,
{
    async fn monthly_usage(
        &self,
        user_id: &str,
        month: Option<u32>,
        year: Option<i32>,
    ) -> Result<f64, DomainError> {
        Ok(self.usage_summary(user_id, month, year).await?.total_cost)
    }

    async fn usage_summary(
        &self,
        user_id: &str,
        month: Option<u32>,
        year: Option<i32>,
    ) -> Result<UsageSummary, DomainError> {
        let user_id = parse_user_id(user_id)?;
        let period = self.period(month, year)?;

        self.summarize(&user_id, period).await
    }

    async fn budget_status(&self, user_id: &str) -> Result<BudgetStatus, DomainError> {
        let id = parse_user_id(user_id)?;
        let user = self
            .users
            .get(&id)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("User '{}' not found", id)))?;

        // One clock read: the status and its usage must cover the same month
        let period = self.period(None, None)?;
        let usage = self.summarize(&id, period).await?.total_cost;
        let status = BudgetStatus::from_usage(&user, usage, period);

        debug!(
            user_id = %id,
            usage = status.monthly_usage,
            limit = status.limit,
            percentage = status.usage_percentage,
            "Computed budget status"
        );
        Ok(status)
    }
}
