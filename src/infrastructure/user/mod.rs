//! User profile infrastructure

mod repository;
mod service;

pub use repository::StorageUserRepository;
pub use service::{CreateUserRequest, UserService, UserServiceTrait};
