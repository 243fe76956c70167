//! User aggregate
//!
//! Contains the User entity, DTOs, and repository interface.

pub mod model;
pub mod repository;

pub use model::{CreateUserDto, UpdateUserDto, User};
pub use repository::UserRepository;
