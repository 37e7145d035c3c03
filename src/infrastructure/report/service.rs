//! Report generation service

use std::sync::Arc;

use chrono::Utc;
use tracing::{error, info};

use super::{excel, pdf};
use crate::domain::user::{User, UserRepository};
use crate::domain::DomainError;

/// Column captions shared by both report renderers
pub(crate) const COLUMN_TITLES: [&str; 6] = [
    "ID",
    "First Name",
    "Last Name",
    "Email",
    "Phone Number",
    "Status",
];

/// Flattened user fields for report rendering
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserReportRow {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    /// Empty when the user has no phone number
    pub phone_number: String,
    pub status: String,
}

impl From<&User> for UserReportRow {
    fn from(user: &User) -> Self {
        Self {
            id: user.id().value(),
            first_name: user.first_name().to_string(),
            last_name: user.last_name().to_string(),
            email: user.email().to_string(),
            phone_number: user.phone_number().unwrap_or_default().to_string(),
            status: user.status().as_str().to_string(),
        }
    }
}

/// Read-only service rendering user reports
#[derive(Debug)]
pub struct ReportService<R: UserRepository> {
    repository: Arc<R>,
}

impl<R: UserRepository> ReportService<R> {
    /// Create a new report service
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Render every user into a PDF report
    pub async fn user_report_pdf(&self) -> Result<Vec<u8>, DomainError> {
        info!("Generating PDF user report");

        let rows = self.report_rows("Error generating PDF report").await?;

        pdf::render(&rows, Utc::now())
            .map_err(|e| Self::internal_error("Error generating PDF report", e))
    }

    /// Render every user into an Excel workbook
    pub async fn user_report_excel(&self) -> Result<Vec<u8>, DomainError> {
        info!("Generating Excel user report");

        let rows = self.report_rows("Error generating Excel report").await?;

        excel::render(&rows).map_err(|e| Self::internal_error("Error generating Excel report", e))
    }

    async fn report_rows(
        &self,
        operation: &'static str,
    ) -> Result<Vec<UserReportRow>, DomainError> {
        let users = self
            .repository
            .find_all()
            .await
            .map_err(|e| Self::internal_error(operation, e))?;

        Ok(users.iter().map(UserReportRow::from).collect())
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
    use crate::domain::user::{MockUserRepository, NewUser, UserStatus};
    use crate::infrastructure::user::InMemoryUserRepository;

    fn new_user(first_name: &str, email: &str, phone_number: Option<&str>) -> NewUser {
        NewUser {
            first_name: first_name.to_string(),
            last_name: "Doe".to_string(),
            email: email.to_string(),
            phone_number: phone_number.map(str::to_string),
            status: UserStatus::Active,
        }
    }

    async fn seeded_repository() -> Arc<InMemoryUserRepository> {
        let repository = Arc::new(InMemoryUserRepository::new());
        repository
            .insert(new_user("John", "john@example.com", Some("1234567890")))
            .await
            .unwrap();
        repository
            .insert(new_user("Jane", "jane@example.com", None))
            .await
            .unwrap();
        repository
    }

    #[tokio::test]
    async fn test_report_row_projection() {
        let repository = seeded_repository().await;
        let users = repository.find_all().await.unwrap();

        let rows: Vec<UserReportRow> = users.iter().map(UserReportRow::from).collect();

        assert_eq!(rows[0].id, 1);
        assert_eq!(rows[0].first_name, "John");
        assert_eq!(rows[0].phone_number, "1234567890");
        assert_eq!(rows[0].status, "ACTIVE");

        // Absent phone renders as an empty string
        assert_eq!(rows[1].phone_number, "");
    }

    #[tokio::test]
    async fn test_projection_is_stable_across_runs() {
        let repository = seeded_repository().await;
        let users = repository.find_all().await.unwrap();

        let first: Vec<UserReportRow> = users.iter().map(UserReportRow::from).collect();
        let second: Vec<UserReportRow> = users.iter().map(UserReportRow::from).collect();

        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_pdf_report_bytes() {
        let service = ReportService::new(seeded_repository().await);

        let bytes = service.user_report_pdf().await.unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[tokio::test]
    async fn test_excel_report_bytes() {
        let service = ReportService::new(seeded_repository().await);

        let bytes = service.user_report_excel().await.unwrap();
        // XLSX files are zip archives
        assert!(bytes.starts_with(b"PK"));
    }

    #[tokio::test]
    async fn test_report_generation_does_not_mutate_users() {
        let repository = seeded_repository().await;
        let service = ReportService::new(repository.clone());

        let before = repository.find_all().await.unwrap();

        service.user_report_pdf().await.unwrap();
        service.user_report_excel().await.unwrap();

        let after = repository.find_all().await.unwrap();
        assert_eq!(before, after);
        assert_eq!(repository.count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_storage_failures_are_masked_per_report() {
        let repository = Arc::new(MockUserRepository::new());
        let service = ReportService::new(repository.clone());
        repository.set_should_fail(true).await;

        let pdf = service.user_report_pdf().await;
        assert!(
            matches!(pdf, Err(DomainError::Internal { ref message }) if message == "Error generating PDF report")
        );

        let excel = service.user_report_excel().await;
        assert!(
            matches!(excel, Err(DomainError::Internal { ref message }) if message == "Error generating Excel report")
        );
    }
}
