//! User infrastructure module
//!
//! This module provides the storage implementations and the user service,
//! including the in-memory repository and the PostgreSQL repository.

mod postgres_repository;
mod repository;
mod service;

pub use postgres_repository::PostgresUserRepository;
pub use repository::InMemoryUserRepository;
pub use service::{CreateUserRequest, UpdateUserRequest, UserService};
