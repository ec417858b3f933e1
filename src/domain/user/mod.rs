//! User domain
//!
//! Profiles carry the role and the two monthly ceilings that budget
//! accounting reads.

mod entity;
mod repository;
mod validation;

pub use entity::{Role, User, UserId};
pub use repository::UserRepository;
pub use validation::{
    validate_amount, validate_display_name, validate_email, validate_user_id,
    UserValidationError,
};

#[cfg(test)]
pub use repository::MockUserRepository;

use crate::domain::DomainError;

/// Parse a caller-supplied user id, rejecting empty or malformed input
pub fn parse_user_id(raw: &str) -> Result<UserId, DomainError> {
    UserId::new(raw).map_err(|e| DomainError::invalid_argument(e.to_string()))
}
