//! Request and response bodies for the tracking endpoints

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::budget::{AlertSeverity, BudgetAlert, MonthPeriod, UsageSummary};
use crate::domain::trip::GeoPoint;
use crate::domain::user::Role;
use crate::domain::vehicle::FuelType;
use crate::infrastructure::trip::RecordTripRequest;
use crate::infrastructure::user::CreateUserRequest;
use crate::infrastructure::vehicle::AddVehicleRequest;

/// Body for POST /v1/users
#[derive(Debug, Deserialize, Validate)]
pub struct CreateUserBody {
    #[validate(length(min = 1, max = 128))]
    pub id: String,
    #[validate(length(min = 1, max = 100))]
    pub display_name: String,
    #[validate(email)]
    pub email: String,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub company_id: Option<String>,
    #[serde(default)]
    #[validate(range(min = 0.0))]
    pub personal_budget: Option<f64>,
    #[serde(default)]
    #[validate(range(min = 0.0))]
    pub monthly_fuel_limit: Option<f64>,
}

impl CreateUserBody {
    pub fn into_request(self) -> CreateUserRequest {
        let mut request = CreateUserRequest::new(self.id, self.display_name, self.email)
            .with_role(self.role.as_deref().map(Role::from).unwrap_or_default());

        if let Some(company_id) = self.company_id {
            request = request.with_company(company_id);
        }
        if let Some(amount) = self.personal_budget {
            request = request.with_personal_budget(amount);
        }
        if let Some(amount) = self.monthly_fuel_limit {
            request = request.with_monthly_fuel_limit(amount);
        }

        request
    }
}

/// Body for the budget and fuel limit setters
#[derive(Debug, Deserialize, Validate)]
pub struct AmountBody {
    #[validate(range(min = 0.0))]
    pub amount: f64,
}

#[derive(Debug, Deserialize, Validate)]
pub struct AddVehicleBody {
    #[validate(length(min = 1, max = 50))]
    pub make: String,
    #[validate(length(min = 1, max = 50))]
    pub model: String,
    #[validate(range(min = 1900, max = 2100))]
    pub year: i32,
    pub fuel_type: FuelType,
    #[validate(length(min = 1, max = 20))]
    pub license_plate: String,
    #[serde(default)]
    pub activate: bool,
}

impl AddVehicleBody {
    pub fn into_request(self) -> AddVehicleRequest {
        let request = AddVehicleRequest::new(
            self.make,
            self.model,
            self.year,
            self.fuel_type,
            self.license_plate,
        );

        if self.activate {
            request.activated()
        } else {
            request
        }
    }
}

/// Body for POST /v1/users/{user_id}/trips
#[derive(Debug, Deserialize, Validate)]
pub struct RecordTripBody {
    /// Falls back to the user's active vehicle
    #[serde(default)]
    pub vehicle_id: Option<String>,
    pub start_time: DateTime<Utc>,
    pub start_location: GeoPoint,
    #[serde(default)]
    pub end_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub end_location: Option<GeoPoint>,
    #[serde(default)]
    #[validate(range(min = 0.0))]
    pub distance_km: f64,
    #[serde(default)]
    #[validate(range(min = 0.0))]
    pub fuel_used_liters: f64,
    #[serde(default)]
    #[validate(range(min = 0.0))]
    pub average_speed_kmh: f64,
    #[serde(default)]
    #[validate(range(min = 0.0))]
    pub max_speed_kmh: f64,
    #[serde(default)]
    #[validate(range(min = 0.0))]
    pub idle_time_minutes: f64,
    #[serde(default)]
    #[validate(range(min = 0.0))]
    pub cost: Option<f64>,
    #[serde(default)]
    pub is_manual_entry: bool,
}

impl RecordTripBody {
    pub fn into_request(self) -> RecordTripRequest {
        RecordTripRequest {
            vehicle_id: self.vehicle_id,
            start_time: self.start_time,
            start_location: self.start_location,
            end_time: self.end_time,
            end_location: self.end_location,
            distance_km: self.distance_km,
            fuel_used_liters: self.fuel_used_liters,
            average_speed_kmh: self.average_speed_kmh,
            max_speed_kmh: self.max_speed_kmh,
            idle_time_minutes: self.idle_time_minutes,
            cost: self.cost,
            is_manual_entry: self.is_manual_entry,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CompleteTripBody {
    /// Defaults to the time the request is handled
    #[serde(default)]
    pub end_time: Option<DateTime<Utc>>,
    pub end_location: GeoPoint,
}

/// `?month=&year=`; month is 0-based
#[derive(Debug, Default, Deserialize, Validate)]
pub struct PeriodQuery {
    #[validate(range(max = 11))]
    pub month: Option<u32>,
    pub year: Option<i32>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct StationQuery {
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: f64,
    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: f64,
    #[serde(default = "default_radius_km")]
    #[validate(range(min = 0.0, max = 100.0))]
    pub radius_km: f64,
}

fn default_radius_km() -> f64 {
    5.0
}

#[derive(Debug, Serialize)]
pub struct UsageResponse {
    pub user_id: String,
    pub label: String,
    pub cost_per_km: f64,
    #[serde(flatten)]
    pub summary: UsageSummary,
}

impl UsageResponse {
    pub fn new(user_id: impl Into<String>, summary: UsageSummary) -> Self {
        let label = MonthPeriod::new(summary.month, summary.year)
            .map(|period| period.label())
            .unwrap_or_default();

        Self {
            user_id: user_id.into(),
            label,
            cost_per_km: summary.cost_per_km(),
            summary,
        }
    }
}

/// An alert with its rendered message
#[derive(Debug, Serialize)]
pub struct AlertView {
    #[serde(flatten)]
    pub alert: BudgetAlert,
    pub severity: AlertSeverity,
    pub message: String,
}

impl From<BudgetAlert> for AlertView {
    fn from(alert: BudgetAlert) -> Self {
        Self {
            severity: alert.severity(),
            message: alert.message(),
            alert,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AlertsResponse {
    pub user_id: String,
    pub alerts: Vec<AlertView>,
}
