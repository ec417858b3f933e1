//! User profile entity and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::validation::{validate_user_id, UserValidationError};
use crate::domain::storage::{StorageEntity, StorageKey};

/// User identifier issued by the authentication provider
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(String);

impl UserId {
    /// Create a new UserId after validation
    pub fn new(id: impl Into<String>) -> Result<Self, UserValidationError> {
        let id = id.into();
        validate_user_id(&id)?;
        Ok(Self(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for UserId {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<UserId> for String {
    fn from(id: UserId) -> Self {
        id.0
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl StorageKey for UserId {
    fn as_str(&self) -> &str {
        &self.0
    }
}

/// Who the user is tracking fuel for
///
/// Stored as a plain string. Anything other than `driver`, including a
/// missing value, reads back as `Citizen`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Role {
    /// Private motorist spending against a personal budget
    #[default]
    Citizen,
    /// Company driver spending against a fleet fuel limit
    Driver,
}

impl Role {
    pub fn is_driver(&self) -> bool {
        matches!(self, Self::Driver)
    }
}

impl From<String> for Role {
    fn from(value: String) -> Self {
        Role::from(value.as_str())
    }
}

impl From<&str> for Role {
    fn from(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("driver") {
            Self::Driver
        } else {
            Self::Citizen
        }
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        role.to_string()
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Citizen => write!(f, "citizen"),
            Self::Driver => write!(f, "driver"),
        }
    }
}

/// User profile document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    id: UserId,
    display_name: String,
    email: String,
    #[serde(default)]
    role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    company_id: Option<String>,
    /// Monthly spending ceiling for citizens
    #[serde(default)]
    personal_budget: f64,
    /// Monthly fuel ceiling set by the driver's company
    #[serde(default)]
    monthly_fuel_limit: f64,
    created_at: DateTime<Utc>,
    #[serde(default = "Utc::now")]
    updated_at: DateTime<Utc>,
}

impl User {
    pub fn new(
        id: UserId,
        display_name: impl Into<String>,
        email: impl Into<String>,
        role: Role,
    ) -> Self {
        let now = Utc::now();

        Self {
            id,
            display_name: display_name.into(),
            email: email.into(),
            role,
            company_id: None,
            personal_budget: 0.0,
            monthly_fuel_limit: 0.0,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_company(mut self, company_id: impl Into<String>) -> Self {
        self.company_id = Some(company_id.into());
        self
    }

    pub fn with_personal_budget(mut self, amount: f64) -> Self {
        self.personal_budget = amount;
        self
    }

    pub fn with_monthly_fuel_limit(mut self, amount: f64) -> Self {
        self.monthly_fuel_limit = amount;
        self
    }

    // Getters

    pub fn id(&self) -> &UserId {
        &self.id
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn company_id(&self) -> Option<&str> {
        self.company_id.as_deref()
    }

    pub fn personal_budget(&self) -> f64 {
        self.personal_budget
    }

    pub fn monthly_fuel_limit(&self) -> f64 {
        self.monthly_fuel_limit
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// The ceiling that budget accounting compares usage against
    pub fn applicable_limit(&self) -> f64 {
        if self.role.is_driver() {
            self.monthly_fuel_limit
        } else {
            self.personal_budget
        }
    }

    // Mutators

    pub fn set_personal_budget(&mut self, amount: f64) {
        self.personal_budget = amount;
        self.touch();
    }

    pub fn set_monthly_fuel_limit(&mut self, amount: f64) {
        self.monthly_fuel_limit = amount;
        self.touch();
    }

    pub fn set_display_name(&mut self, display_name: impl Into<String>) {
        self.display_name = display_name.into();
        self.touch();
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

impl StorageEntity for User {
    type Key = UserId;
    const COLLECTION: &'static str = "users";

    fn key(&self) -> &Self::Key {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user_id(id: &str) -> UserId {
        UserId::new(id).unwrap()
    }

    #[test]
    fn test_user_id_validation() {
        assert!(UserId::new("abc123").is_ok());
        assert_eq!(UserId::new(""), Err(UserValidationError::EmptyId));
    }

    #[test]
    fn test_role_parsing() {
        assert_eq!(Role::from("driver"), Role::Driver);
        assert_eq!(Role::from("Driver"), Role::Driver);
        assert_eq!(Role::from("citizen"), Role::Citizen);
        assert_eq!(Role::from("fleet-manager"), Role::Citizen);
        assert_eq!(Role::from(""), Role::Citizen);
    }

    #[test]
    fn test_applicable_limit_follows_role() {
        let citizen = User::new(user_id("c1"), "Ana", "ana@example.com", Role::Citizen)
            .with_personal_budget(100.0)
            .with_monthly_fuel_limit(500.0);
        assert_eq!(citizen.applicable_limit(), 100.0);

        let driver = User::new(user_id("d1"), "Bo", "bo@example.com", Role::Driver)
            .with_personal_budget(100.0)
            .with_monthly_fuel_limit(500.0);
        assert_eq!(driver.applicable_limit(), 500.0);
    }

    #[test]
    fn test_deserialize_missing_role_and_budgets() {
        let json = r#"{
            "id": "u1",
            "display_name": "Ana",
            "email": "ana@example.com",
            "created_at": "2024-03-01T10:00:00Z"
        }"#;

        let user: User = serde_json::from_str(json).unwrap();
        assert_eq!(user.role(), Role::Citizen);
        assert_eq!(user.personal_budget(), 0.0);
        assert_eq!(user.monthly_fuel_limit(), 0.0);
        assert!(user.company_id().is_none());
    }

    #[test]
    fn test_deserialize_unknown_role_as_citizen() {
        let json = r#"{
            "id": "u1",
            "display_name": "Ana",
            "email": "ana@example.com",
            "role": "supervisor",
            "personal_budget": 80.0,
            "monthly_fuel_limit": 300.0,
            "created_at": "2024-03-01T10:00:00Z"
        }"#;

        let user: User = serde_json::from_str(json).unwrap();
        assert_eq!(user.role(), Role::Citizen);
        assert_eq!(user.applicable_limit(), 80.0);
    }

    #[test]
    fn test_role_round_trips_as_string() {
        let user = User::new(user_id("d1"), "Bo", "bo@example.com", Role::Driver)
            .with_company("acme-fleet");
        let value = serde_json::to_value(&user).unwrap();

        assert_eq!(value["role"], "driver");
        assert_eq!(value["company_id"], "acme-fleet");
    }

    #[test]
    fn test_setters_touch_updated_at() {
        let mut user = User::new(user_id("c1"), "Ana", "ana@example.com", Role::Citizen);
        let before = user.updated_at();

        user.set_personal_budget(120.0);

        assert_eq!(user.personal_budget(), 120.0);
        assert!(user.updated_at() >= before);
    }
}
