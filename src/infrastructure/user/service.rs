//! User service with the create, read, search, update and delete flows

use std::sync::Arc;
use tracing::{debug, error, info};

use crate::domain::user::{NewUser, User, UserId, UserRepository, UserStatus};
use crate::domain::{DomainError, Page, PageRequest};

/// Request for creating a user
#[derive(Debug, Clone)]
pub struct CreateUserRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: Option<String>,
    /// Defaults to active when absent
    pub status: Option<UserStatus>,
}

/// Request for updating a user. Names, email and phone are overwritten;
/// the status only changes when one is provided.
#[derive(Debug, Clone)]
pub struct UpdateUserRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: Option<String>,
    pub status: Option<UserStatus>,
}

/// User management service
#[derive(Debug)]
pub struct UserService<R: UserRepository> {
    repository: Arc<R>,
}

impl<R: UserRepository> UserService<R> {
    /// Create a new user service
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Create a new user, rejecting duplicate emails
    pub async fn create(&self, request: CreateUserRequest) -> Result<User, DomainError> {
        info!("Creating new user");

        let exists = self
            .repository
            .exists_by_email(&request.email)
            .await
            .map_err(|e| Self::internal_error("Error creating user", e))?;

        if exists {
            return Err(DomainError::conflict("Email already exists"));
        }

        let new_user = NewUser {
            first_name: request.first_name,
            last_name: request.last_name,
            email: request.email,
            phone_number: request.phone_number,
            status: request.status.unwrap_or_default(),
        };

        self.repository
            .insert(new_user)
            .await
            .map_err(|e| Self::internal_error("Error creating user", e))
    }

    /// Get a user by ID
    pub async fn get(&self, id: i64) -> Result<User, DomainError> {
        debug!(id, "Getting user");

        self.repository
            .find_by_id(UserId::new(id))
            .await
            .map_err(|e| Self::internal_error("Error getting user", e))?
            .ok_or_else(|| DomainError::not_found("User not found"))
    }

    /// Fetch one page of users. A missing or blank search text lists
    /// everyone; otherwise the trimmed text is matched case-insensitively
    /// against first name, last name and email.
    pub async fn search(
        &self,
        search: Option<&str>,
        request: &PageRequest,
    ) -> Result<Page<User>, DomainError> {
        let trimmed = search.map(str::trim).filter(|text| !text.is_empty());

        let page = match trimmed {
            Some(text) => {
                debug!(text, "Searching users");
                self.repository.search_page(text, request).await
            }
            None => self.repository.find_page(request).await,
        }
        .map_err(|e| Self::internal_error("Error getting users", e))?;

        info!(total = page.total_elements(), "Found users");

        Ok(page)
    }

    /// Update an existing user
    pub async fn update(&self, id: i64, request: UpdateUserRequest) -> Result<User, DomainError> {
        info!(id, "Updating user");

        let mut user = self
            .repository
            .find_by_id(UserId::new(id))
            .await
            .map_err(|e| Self::internal_error("Error updating user", e))?
            .ok_or_else(|| DomainError::not_found("User not found"))?;

        // Reject the new email only when it belongs to another record
        if user.email() != request.email {
            let taken = self
                .repository
                .exists_by_email(&request.email)
                .await
                .map_err(|e| Self::internal_error("Error updating user", e))?;

            if taken {
                return Err(DomainError::conflict("Email already exists"));
            }
        }

        user.set_first_name(request.first_name);
        user.set_last_name(request.last_name);
        user.set_email(request.email);
        user.set_phone_number(request.phone_number);
        if let Some(status) = request.status {
            user.set_status(status);
        }

        self.repository
            .update(&user)
            .await
            .map_err(|e| Self::internal_error("Error updating user", e))
    }

    /// Delete a user
    pub async fn delete(&self, id: i64) -> Result<(), DomainError> {
        info!(id, "Deleting user");

        let user_id = UserId::new(id);

        let exists = self
            .repository
            .exists(user_id)
            .await
            .map_err(|e| Self::internal_error("Error deleting user", e))?;

        if !exists {
            return Err(DomainError::not_found("User not found"));
        }

        self.repository
            .delete(user_id)
            .await
            .map_err(|e| Self::internal_error("Error deleting user", e))?;

        Ok(())
    }

    /// Count all users
    pub async fn count(&self) -> Result<u64, DomainError> {
        self.repository.count().await
    }

    /// Log the failure detail and replace it with a generic operation
    /// message. Expected business outcomes pass through untouched.
    fn internal_error(operation: &'static str, err: DomainError) -> DomainError {
        match err {
            DomainError::NotFound { .. }
            | DomainError::Conflict { .. }
            | DomainError::Validation { .. } => err,
            other => {
                error!(error = %other, "{}", operation);
                DomainError::internal(operation)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::user::MockUserRepository;
    use crate::infrastructure::user::repository::InMemoryUserRepository;

    fn create_service() -> UserService<InMemoryUserRepository> {
        UserService::new(Arc::new(InMemoryUserRepository::new()))
    }

    fn make_request(first_name: &str, email: &str) -> CreateUserRequest {
        CreateUserRequest {
            first_name: first_name.to_string(),
            last_name: "Doe".to_string(),
            email: email.to_string(),
            phone_number: Some("1234567890".to_string()),
            status: None,
        }
    }

    fn make_update(first_name: &str, email: &str) -> UpdateUserRequest {
        UpdateUserRequest {
            first_name: first_name.to_string(),
            last_name: "Doe".to_string(),
            email: email.to_string(),
            phone_number: Some("1234567890".to_string()),
            status: None,
        }
    }

    fn default_page() -> PageRequest {
        PageRequest::new(0, 10).unwrap()
    }

    #[tokio::test]
    async fn test_create_defaults_to_active() {
        let service = create_service();

        let user = service
            .create(make_request("John", "john@example.com"))
            .await
            .unwrap();

        assert_eq!(user.status(), UserStatus::Active);
        assert_eq!(user.first_name(), "John");
        assert_eq!(user.id().value(), 1);
    }

    #[tokio::test]
    async fn test_create_keeps_requested_status() {
        let service = create_service();

        let mut request = make_request("John", "john@example.com");
        request.status = Some(UserStatus::Blocked);

        let user = service.create(request).await.unwrap();
        assert_eq!(user.status(), UserStatus::Blocked);
    }

    #[tokio::test]
    async fn test_create_duplicate_email() {
        let service = create_service();

        service
            .create(make_request("John", "john@example.com"))
            .await
            .unwrap();

        let result = service.create(make_request("Jane", "john@example.com")).await;
        assert!(
            matches!(result, Err(DomainError::Conflict { ref message }) if message == "Email already exists")
        );

        // The store is unchanged
        assert_eq!(service.count().await.unwrap(), 1);
        let survivor = service.get(1).await.unwrap();
        assert_eq!(survivor.first_name(), "John");
    }

    #[tokio::test]
    async fn test_get_missing_user() {
        let service = create_service();

        let result = service.get(42).await;
        assert!(
            matches!(result, Err(DomainError::NotFound { ref message }) if message == "User not found")
        );
    }

    #[tokio::test]
    async fn test_search_without_text_lists_everyone() {
        let service = create_service();
        service
            .create(make_request("John", "john@example.com"))
            .await
            .unwrap();
        service
            .create(make_request("Jane", "jane@example.com"))
            .await
            .unwrap();

        let all = service.search(None, &default_page()).await.unwrap();
        assert_eq!(all.total_elements(), 2);

        let blank = service.search(Some("   "), &default_page()).await.unwrap();
        assert_eq!(blank.total_elements(), 2);
    }

    #[tokio::test]
    async fn test_search_trims_and_matches_case_insensitively() {
        let service = create_service();
        service
            .create(make_request("John", "jd@example.com"))
            .await
            .unwrap();
        service
            .create(make_request("Alice", "johnny@example.com"))
            .await
            .unwrap();
        service
            .create(make_request("Bob", "bob@example.com"))
            .await
            .unwrap();

        let page = service
            .search(Some("  JOHN  "), &default_page())
            .await
            .unwrap();

        assert_eq!(page.total_elements(), 2);
        let names: Vec<&str> = page.items().iter().map(|u| u.first_name()).collect();
        assert_eq!(names, vec!["John", "Alice"]);
    }

    #[tokio::test]
    async fn test_update_missing_user() {
        let service = create_service();

        let result = service.update(42, make_update("John", "john@example.com")).await;
        assert!(
            matches!(result, Err(DomainError::NotFound { ref message }) if message == "User not found")
        );
    }

    #[tokio::test]
    async fn test_update_keeping_own_email() {
        let service = create_service();
        let user = service
            .create(make_request("John", "john@example.com"))
            .await
            .unwrap();

        let updated = service
            .update(user.id().value(), make_update("Johnny", "john@example.com"))
            .await
            .unwrap();

        assert_eq!(updated.first_name(), "Johnny");
        assert_eq!(updated.email(), "john@example.com");
    }

    #[tokio::test]
    async fn test_update_to_taken_email_leaves_record_unchanged() {
        let service = create_service();
        service
            .create(make_request("John", "john@example.com"))
            .await
            .unwrap();
        let jane = service
            .create(make_request("Jane", "jane@example.com"))
            .await
            .unwrap();

        let result = service
            .update(jane.id().value(), make_update("Janet", "john@example.com"))
            .await;
        assert!(matches!(result, Err(DomainError::Conflict { .. })));

        let unchanged = service.get(jane.id().value()).await.unwrap();
        assert_eq!(unchanged.first_name(), "Jane");
        assert_eq!(unchanged.email(), "jane@example.com");
        assert_eq!(unchanged.updated_at(), jane.updated_at());
    }

    #[tokio::test]
    async fn test_update_overwrites_fields_and_touches_timestamp() {
        let service = create_service();
        let user = service
            .create(make_request("John", "john@example.com"))
            .await
            .unwrap();

        std::thread::sleep(std::time::Duration::from_millis(10));

        let mut request = make_update("Johnny", "johnny@example.com");
        request.phone_number = None;

        let updated = service.update(user.id().value(), request).await.unwrap();

        assert_eq!(updated.first_name(), "Johnny");
        assert_eq!(updated.email(), "johnny@example.com");
        assert_eq!(updated.phone_number(), None);
        // Status untouched when the request carries none
        assert_eq!(updated.status(), UserStatus::Active);
        assert_eq!(updated.created_at(), user.created_at());
        assert!(updated.updated_at() > user.updated_at());
    }

    #[tokio::test]
    async fn test_update_applies_requested_status() {
        let service = create_service();
        let user = service
            .create(make_request("John", "john@example.com"))
            .await
            .unwrap();

        let mut request = make_update("John", "john@example.com");
        request.status = Some(UserStatus::Inactive);

        let updated = service.update(user.id().value(), request).await.unwrap();
        assert_eq!(updated.status(), UserStatus::Inactive);
    }

    #[tokio::test]
    async fn test_delete() {
        let service = create_service();
        let user = service
            .create(make_request("John", "john@example.com"))
            .await
            .unwrap();

        service.delete(user.id().value()).await.unwrap();

        assert_eq!(service.count().await.unwrap(), 0);
        assert!(service.get(user.id().value()).await.is_err());
    }

    #[tokio::test]
    async fn test_delete_missing_user_leaves_count_unchanged() {
        let service = create_service();
        service
            .create(make_request("John", "john@example.com"))
            .await
            .unwrap();

        let result = service.delete(42).await;
        assert!(
            matches!(result, Err(DomainError::NotFound { ref message }) if message == "User not found")
        );
        assert_eq!(service.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_storage_failures_are_masked_per_operation() {
        let repository = Arc::new(MockUserRepository::new());
        let service = UserService::new(repository.clone());
        repository.set_should_fail(true).await;

        let create = service.create(make_request("John", "john@example.com")).await;
        assert!(
            matches!(create, Err(DomainError::Internal { ref message }) if message == "Error creating user")
        );

        let get = service.get(1).await;
        assert!(
            matches!(get, Err(DomainError::Internal { ref message }) if message == "Error getting user")
        );

        let search = service.search(Some("john"), &default_page()).await;
        assert!(
            matches!(search, Err(DomainError::Internal { ref message }) if message == "Error getting users")
        );

        let update = service.update(1, make_update("John", "john@example.com")).await;
        assert!(
            matches!(update, Err(DomainError::Internal { ref message }) if message == "Error updating user")
        );

        let delete = service.delete(1).await;
        assert!(
            matches!(delete, Err(DomainError::Internal { ref message }) if message == "Error deleting user")
        );
    }
}
