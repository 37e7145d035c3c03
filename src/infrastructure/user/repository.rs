//! In-memory user repository implementation

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::user::{NewUser, User, UserId, UserRepository};
use crate::domain::{DomainError, Page, PageRequest};

/// In-memory implementation of UserRepository
#[derive(Debug)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<HashMap<i64, User>>>,
    /// Index for email -> user ID lookup
    email_index: Arc<RwLock<HashMap<String, i64>>>,
    next_id: AtomicI64,
}

impl InMemoryUserRepository {
    /// Create a new empty repository
    pub fn new() -> Self {
        Self {
            users: Arc::new(RwLock::new(HashMap::new())),
            email_index: Arc::new(RwLock::new(HashMap::new())),
            next_id: AtomicI64::new(1),
        }
    }

    /// Create a repository with initial users
    pub fn with_users(users: Vec<User>) -> Self {
        let mut users_map = HashMap::new();
        let mut email_map = HashMap::new();
        let mut max_id = 0;

        for user in users {
            let id = user.id().value();
            max_id = max_id.max(id);
            email_map.insert(user.email().to_string(), id);
            users_map.insert(id, user);
        }

        Self {
            users: Arc::new(RwLock::new(users_map)),
            email_index: Arc::new(RwLock::new(email_map)),
            next_id: AtomicI64::new(max_id + 1),
        }
    }

    async fn sorted_users(&self) -> Vec<User> {
        let users = self.users.read().await;
        let mut all: Vec<User> = users.values().cloned().collect();
        all.sort_by_key(|u| u.id());
        all
    }
}

impl Default for InMemoryUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, DomainError> {
        let users = self.users.read().await;
        Ok(users.get(&id.value()).cloned())
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, DomainError> {
        let email_index = self.email_index.read().await;
        Ok(email_index.contains_key(email))
    }

    async fn find_page(&self, request: &PageRequest) -> Result<Page<User>, DomainError> {
        Ok(Page::from_complete(self.sorted_users().await, request))
    }

    async fn search_page(
        &self,
        text: &str,
        request: &PageRequest,
    ) -> Result<Page<User>, DomainError> {
        let needle = text.to_lowercase();
        let matches: Vec<User> = self
            .sorted_users()
            .await
            .into_iter()
            .filter(|u| {
                u.first_name().to_lowercase().contains(&needle)
                    || u.last_name().to_lowercase().contains(&needle)
                    || u.email().to_lowercase().contains(&needle)
            })
            .collect();

        Ok(Page::from_complete(matches, request))
    }

    async fn find_all(&self) -> Result<Vec<User>, DomainError> {
        Ok(self.sorted_users().await)
    }

    async fn insert(&self, new_user: NewUser) -> Result<User, DomainError> {
        let mut users = self.users.write().await;
        let mut email_index = self.email_index.write().await;

        if email_index.contains_key(&new_user.email) {
            return Err(DomainError::conflict("Email already exists"));
        }

        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let user = User::new(UserId::new(id), new_user);

        email_index.insert(user.email().to_string(), id);
        users.insert(id, user.clone());

        Ok(user)
    }

    async fn update(&self, user: &User) -> Result<User, DomainError> {
        let mut users = self.users.write().await;
        let mut email_index = self.email_index.write().await;

        let id = user.id().value();

        let Some(old_user) = users.get(&id) else {
            return Err(DomainError::not_found(format!("User '{}' not found", id)));
        };

        // If the email changed, check uniqueness and update the index
        let old_email = old_user.email().to_string();
        if old_email != user.email() {
            if email_index.contains_key(user.email()) {
                return Err(DomainError::conflict("Email already exists"));
            }

            email_index.remove(&old_email);
            email_index.insert(user.email().to_string(), id);
        }

        users.insert(id, user.clone());

        Ok(user.clone())
    }

    async fn delete(&self, id: UserId) -> Result<bool, DomainError> {
        let mut users = self.users.write().await;
        let mut email_index = self.email_index.write().await;

        if let Some(user) = users.remove(&id.value()) {
            email_index.remove(user.email());
            Ok(true)
        } else {
            Ok(false)
        }
    }

    async fn count(&self) -> Result<u64, DomainError> {
        let users = self.users.read().await;
        Ok(users.len() as u64)
    }
}
