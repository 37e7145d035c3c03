//! Application state for shared services

use std::sync::Arc;

use crate::domain::user::UserRepository;
use crate::domain::{DomainError, Page, PageRequest, User};
use crate::infrastructure::report::ReportService;
use crate::infrastructure::user::{CreateUserRequest, UpdateUserRequest, UserService};

/// Application state containing shared services using dynamic dispatch
#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<dyn UserServiceTrait>,
    pub report_service: Arc<dyn ReportServiceTrait>,
}

/// Trait for user service operations
#[async_trait::async_trait]
pub trait UserServiceTrait: Send + Sync {
    async fn create(&self, request: CreateUserRequest) -> Result<User, DomainError>;
    async fn get(&self, id: i64) -> Result<User, DomainError>;
    async fn search(
        &self,
        search: Option<&str>,
        request: &PageRequest,
    ) -> Result<Page<User>, DomainError>;
    async fn update(&self, id: i64, request: UpdateUserRequest) -> Result<User, DomainError>;
    async fn delete(&self, id: i64) -> Result<(), DomainError>;
    async fn count(&self) -> Result<u64, DomainError>;
}

/// Trait for report generation operations
#[async_trait::async_trait]
pub trait ReportServiceTrait: Send + Sync {
    async fn user_report_pdf(&self) -> Result<Vec<u8>, DomainError>;
    async fn user_report_excel(&self) -> Result<Vec<u8>, DomainError>;
}

// Implement traits for the actual services

#[async_trait::async_trait]
impl<R: UserRepository + 'static> UserServiceTrait for UserService<R> {
    async fn create(&self, request: CreateUserRequest) -> Result<User, DomainError> {
        UserService::create(self, request).await
    }

    async fn get(&self, id: i64) -> Result<User, DomainError> {
        UserService::get(self, id).await
    }

    async fn search(
        &self,
        search: Option<&str>,
        request: &PageRequest,
    ) -> Result<Page<User>, DomainError> {
        UserService::search(self, search, request).await
    }

    async fn update(&self, id: i64, request: UpdateUserRequest) -> Result<User, DomainError> {
        UserService::update(self, id, request).await
    }

    async fn delete(&self, id: i64) -> Result<(), DomainError> {
        UserService::delete(self, id).await
    }

    async fn count(&self) -> Result<u64, DomainError> {
        UserService::count(self).await
    }
}

#[async_trait::async_trait]
impl<R: UserRepository + 'static> ReportServiceTrait for ReportService<R> {
    async fn user_report_pdf(&self) -> Result<Vec<u8>, DomainError> {
        ReportService::user_report_pdf(self).await
    }

    async fn user_report_excel(&self) -> Result<Vec<u8>, DomainError> {
        ReportService::user_report_excel(self).await
    }
}

impl AppState {
    /// Create new application state with provided services
    pub fn new(
        user_service: Arc<dyn UserServiceTrait>,
        report_service: Arc<dyn ReportServiceTrait>,
    ) -> Self {
        Self {
            user_service,
            report_service,
        }
    }
}
