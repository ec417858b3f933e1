//! User profile service

use std::fmt::Debug;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::domain::user::{
    parse_user_id, validate_amount, validate_display_name, validate_email, Role, User,
    UserRepository,
};
use crate::domain::DomainError;

/// Request for creating a profile
#[derive(Debug, Clone)]
pub struct CreateUserRequest {
    pub id: String,
    pub display_name: String,
    pub email: String,
    pub role: Role,
    pub company_id: Option<String>,
    pub personal_budget: f64,
    pub monthly_fuel_limit: f64,
}

impl CreateUserRequest {
    pub fn new(
        id: impl Into<String>,
        display_name: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            email: email.into(),
            role: Role::Citizen,
            company_id: None,
            personal_budget: 0.0,
            monthly_fuel_limit: 0.0,
        }
    }

    pub fn with_role(mut self, role: Role) -> Self {
        self.role = role;
        self
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
}

#[async_trait]
pub trait UserServiceTrait: Send + Sync {
    async fn create(&self, request: CreateUserRequest) -> Result<User, DomainError>;

    /// NotFound when the profile does not exist
    async fn get(&self, id: &str) -> Result<User, DomainError>;

    async fn set_personal_budget(&self, id: &str, amount: f64) -> Result<User, DomainError>;

    async fn set_monthly_fuel_limit(&self, id: &str, amount: f64) -> Result<User, DomainError>;
}

pub struct UserService<R: UserRepository> {
    repository: Arc<R>,
}

impl<R: UserRepository> Debug for UserService<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserService").finish_non_exhaustive()
    }
}

impl<R: UserRepository> UserService<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    async fn fetch(&self, id: &str) -> Result<User, DomainError> {
        let user_id = parse_user_id(id)?;

        self.repository
            .get(&user_id)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("User '{}' not found", user_id)))
    }

    async fn update_profile<F>(&self, id: &str, apply: F) -> Result<User, DomainError>
    where
        F: FnOnce(&mut User) + Send,
    {
        let mut user = self.fetch(id).await?;
        apply(&mut user);
        self.repository.update(user).await
    }
}

#[async_trait]
impl<R: UserRepository + 'static> UserServiceTrait for UserService<R> {
    async fn create(&self, request: CreateUserRequest) -> Result<User, DomainError> {
        let user_id = parse_user_id(&request.id)?;

        validate_display_name(&request.display_name)
            .map_err(|e| DomainError::validation(e.to_string()))?;
        validate_email(&request.email).map_err(|e| DomainError::validation(e.to_string()))?;
        validate_amount(request.personal_budget)
            .map_err(|e| DomainError::validation(e.to_string()))?;
        validate_amount(request.monthly_fuel_limit)
            .map_err(|e| DomainError::validation(e.to_string()))?;

        if self.repository.get(&user_id).await?.is_some() {
            return Err(DomainError::conflict(format!(
                "User '{}' already exists",
                user_id
            )));
        }

        let mut user = User::new(user_id, request.display_name, request.email, request.role)
            .with_personal_budget(request.personal_budget)
            .with_monthly_fuel_limit(request.monthly_fuel_limit);

        if let Some(company_id) = request.company_id {
            user = user.with_company(company_id);
        }

        let user = self.repository.create(user).await?;
        info!(user_id = %user.id(), role = %user.role(), "Created user profile");
        Ok(user)
    }

    async fn get(&self, id: &str) -> Result<User, DomainError> {
        self.fetch(id).await
    }

    async fn set_personal_budget(&self, id: &str, amount: f64) -> Result<User, DomainError> {
        validate_amount(amount).map_err(|e| DomainError::validation(e.to_string()))?;

        let user = self
            .update_profile(id, |user| user.set_personal_budget(amount))
            .await?;
        info!(user_id = %user.id(), amount, "Updated personal budget");
        Ok(user)
    }

    async fn set_monthly_fuel_limit(&self, id: &str, amount: f64) -> Result<User, DomainError> {
        validate_amount(amount).map_err(|e| DomainError::validation(e.to_string()))?;

        let user = self
            .update_profile(id, |user| user.set_monthly_fuel_limit(amount))
            .await?;
        info!(user_id = %user.id(), amount, "Updated monthly fuel limit");
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::user::MockUserRepository;
    use crate::infrastructure::storage::InMemoryStorage;
    use crate::infrastructure::user::StorageUserRepository;

    fn create_service() -> UserService<StorageUserRepository> {
        let storage = Arc::new(InMemoryStorage::<User>::new());
        UserService::new(Arc::new(StorageUserRepository::new(storage)))
    }

    #[tokio::test]
    async fn test_create_user() {
        let service = create_service();

        let user = service
            .create(
                CreateUserRequest::new("driver-1", "Dana", "dana@fleet.example")
                    .with_role(Role::Driver)
                    .with_company("acme")
                    .with_monthly_fuel_limit(200.0),
            )
            .await
            .unwrap();

        assert_eq!(user.id().as_str(), "driver-1");
        assert!(user.role().is_driver());
        assert_eq!(user.company_id(), Some("acme"));
        assert_eq!(user.applicable_limit(), 200.0);
    }

    #[tokio::test]
    async fn test_create_duplicate() {
        let service = create_service();
        let request = CreateUserRequest::new("user-1", "Ana", "ana@example.com");

        service.create(request.clone()).await.unwrap();
        let result = service.create(request).await;

        assert!(matches!(result, Err(DomainError::Conflict { .. })));
    }

    #[tokio::test]
    async fn test_create_rejects_bad_input() {
        let service = create_service();

        let empty_id = service
            .create(CreateUserRequest::new("", "Ana", "ana@example.com"))
            .await;
        assert!(matches!(empty_id, Err(DomainError::InvalidArgument { .. })));

        let bad_email = service
            .create(CreateUserRequest::new("user-1", "Ana", "not-an-email"))
            .await;
        assert!(matches!(bad_email, Err(DomainError::Validation { .. })));

        let negative = service
            .create(
                CreateUserRequest::new("user-1", "Ana", "ana@example.com")
                    .with_personal_budget(-1.0),
            )
            .await;
        assert!(matches!(negative, Err(DomainError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_get_missing_user() {
        let service = create_service();

        let result = service.get("ghost").await;
        assert!(matches!(result, Err(DomainError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_set_budget_and_limit() {
        let service = create_service();
        service
            .create(CreateUserRequest::new("user-1", "Ana", "ana@example.com"))
            .await
            .unwrap();

        let user = service.set_personal_budget("user-1", 120.0).await.unwrap();
        assert_eq!(user.personal_budget(), 120.0);

        let user = service.set_monthly_fuel_limit("user-1", 300.0).await.unwrap();
        assert_eq!(user.monthly_fuel_limit(), 300.0);
        assert_eq!(user.personal_budget(), 120.0);

        let stored = service.get("user-1").await.unwrap();
        assert_eq!(stored.personal_budget(), 120.0);
        assert_eq!(stored.monthly_fuel_limit(), 300.0);
    }

    #[tokio::test]
    async fn test_set_budget_rejects_invalid_amounts() {
        let service = create_service();

        let result = service.set_personal_budget("user-1", f64::NAN).await;
        assert!(matches!(result, Err(DomainError::Validation { .. })));

        let result = service.set_monthly_fuel_limit("user-1", 10.0).await;
        assert!(matches!(result, Err(DomainError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_store_failure_propagates() {
        let mut repository = MockUserRepository::new();
        repository
            .expect_get()
            .returning(|_| Err(DomainError::storage("connection refused")));

        let service = UserService::new(Arc::new(repository));
        let result = service.get("user-1").await;

        assert!(matches!(result, Err(DomainError::Storage { .. })));
    }
}
