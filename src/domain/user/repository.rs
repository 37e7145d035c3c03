//! User repository trait

use async_trait::async_trait;
use std::fmt::Debug;

use super::entity::{NewUser, User, UserId};
use crate::domain::{DomainError, Page, PageRequest};

/// Repository trait for user storage
#[async_trait]
pub trait UserRepository: Send + Sync + Debug {
    /// Get a user by their ID
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, DomainError>;

    /// Check if any user has this email, exact match
    async fn exists_by_email(&self, email: &str) -> Result<bool, DomainError>;

    /// Fetch one page of users ordered by ascending ID
    async fn find_page(&self, request: &PageRequest) -> Result<Page<User>, DomainError>;

    /// Fetch one page of users whose first name, last name or email contains
    /// the text case-insensitively, ordered by ascending ID
    async fn search_page(
        &self,
        text: &str,
        request: &PageRequest,
    ) -> Result<Page<User>, DomainError>;

    /// List every user ordered by ascending ID
    async fn find_all(&self) -> Result<Vec<User>, DomainError>;

    /// Insert a new user, assigning its identifier
    async fn insert(&self, new_user: NewUser) -> Result<User, DomainError>;

    /// Update an existing user
    async fn update(&self, user: &User) -> Result<User, DomainError>;

    /// Delete a user, returning whether a record was removed
    async fn delete(&self, id: UserId) -> Result<bool, DomainError>;

    /// Count all users
    async fn count(&self) -> Result<u64, DomainError>;

    /// Check if a user ID exists
    async fn exists(&self, id: UserId) -> Result<bool, DomainError> {
        Ok(self.find_by_id(id).await?.is_some())
    }
}
