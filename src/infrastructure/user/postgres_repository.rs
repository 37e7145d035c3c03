//! PostgreSQL user repository implementation

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{PgPool, Row};

use crate::domain::user::{NewUser, User, UserId, UserRepository, UserStatus};
use crate::domain::{DomainError, Page, PageRequest};

/// PostgreSQL implementation of UserRepository
#[derive(Debug, Clone)]
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    /// Create a new repository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, first_name, last_name, email, phone_number, status,
                   created_at, updated_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id.value())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to get user: {}", e)))?;

        row.as_ref().map(row_to_user).transpose()
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, DomainError> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)")
            .bind(email)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to check email: {}", e)))?;

        Ok(exists)
    }

    async fn find_page(&self, request: &PageRequest) -> Result<Page<User>, DomainError> {
        let total = self.count().await?;

        let rows = sqlx::query(
            r#"
            SELECT id, first_name, last_name, email, phone_number, status,
                   created_at, updated_at
            FROM users
            ORDER BY id
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(request.size() as i64)
        .bind(offset_param(request))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to list users: {}", e)))?;

        let users = rows.iter().map(row_to_user).collect::<Result<Vec<_>, _>>()?;

        Ok(Page::new(users, request, total))
    }

    async fn search_page(
        &self,
        text: &str,
        request: &PageRequest,
    ) -> Result<Page<User>, DomainError> {
        let pattern = search_pattern(text);

        let total: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM users
            WHERE LOWER(first_name) LIKE $1
               OR LOWER(last_name) LIKE $1
               OR LOWER(email) LIKE $1
            "#,
        )
        .bind(&pattern)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to count matching users: {}", e)))?;

        let rows = sqlx::query(
            r#"
            SELECT id, first_name, last_name, email, phone_number, status,
                   created_at, updated_at
            FROM users
            WHERE LOWER(first_name) LIKE $1
               OR LOWER(last_name) LIKE $1
               OR LOWER(email) LIKE $1
            ORDER BY id
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(&pattern)
        .bind(request.size() as i64)
        .bind(offset_param(request))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to search users: {}", e)))?;

        let users = rows.iter().map(row_to_user).collect::<Result<Vec<_>, _>>()?;

        Ok(Page::new(users, request, total as u64))
    }

    async fn find_all(&self) -> Result<Vec<User>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT id, first_name, last_name, email, phone_number, status,
                   created_at, updated_at
            FROM users
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to list users: {}", e)))?;

        rows.iter().map(row_to_user).collect()
    }

    async fn insert(&self, new_user: NewUser) -> Result<User, DomainError> {
        let now = Utc::now();

        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO users (first_name, last_name, email, phone_number, status,
                               created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id
            "#,
        )
        .bind(&new_user.first_name)
        .bind(&new_user.last_name)
        .bind(&new_user.email)
        .bind(&new_user.phone_number)
        .bind(new_user.status.as_str())
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            let msg = e.to_string();

            if msg.contains("duplicate key") || msg.contains("unique constraint") {
                DomainError::conflict("Email already exists")
            } else {
                DomainError::storage(format!("Failed to create user: {}", e))
            }
        })?;

        Ok(User::from_storage(
            UserId::new(id),
            new_user.first_name,
            new_user.last_name,
            new_user.email,
            new_user.phone_number,
            new_user.status,
            now,
            now,
        ))
    }

    async fn update(&self, user: &User) -> Result<User, DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET first_name = $2, last_name = $3, email = $4, phone_number = $5,
                status = $6, updated_at = $7
            WHERE id = $1
            "#,
        )
        .bind(user.id().value())
        .bind(user.first_name())
        .bind(user.last_name())
        .bind(user.email())
        .bind(user.phone_number())
        .bind(user.status().as_str())
        .bind(user.updated_at())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            let msg = e.to_string();

            if msg.contains("duplicate key") || msg.contains("unique constraint") {
                DomainError::conflict("Email already exists")
            } else {
                DomainError::storage(format!("Failed to update user: {}", e))
            }
        })?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found(format!(
                "User '{}' not found",
                user.id()
            )));
        }

        Ok(user.clone())
    }

    async fn delete(&self, id: UserId) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id.value())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to delete user: {}", e)))?;

        Ok(result.rows_affected() > 0)
    }

    async fn count(&self) -> Result<u64, DomainError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to count users: {}", e)))?;

        Ok(count as u64)
    }
}

fn row_to_user(row: &sqlx::postgres::PgRow) -> Result<User, DomainError> {
    let id: i64 = row.get("id");
    let first_name: String = row.get("first_name");
    let last_name: String = row.get("last_name");
    let email: String = row.get("email");
    let phone_number: Option<String> = row.get("phone_number");
    let status: String = row.get("status");
    let created_at: chrono::DateTime<chrono::Utc> = row.get("created_at");
    let updated_at: chrono::DateTime<chrono::Utc> = row.get("updated_at");

    Ok(User::from_storage(
        UserId::new(id),
        first_name,
        last_name,
        email,
        phone_number,
        str_to_status(&status)?,
        created_at,
        updated_at,
    ))
}

fn search_pattern(text: &str) -> String {
    format!("%{}%", text.to_lowercase())
}

/// LIMIT/OFFSET bind values are i64; offsets past that are beyond any
/// real table, so clamp instead of wrapping negative
fn offset_param(request: &PageRequest) -> i64 {
    i64::try_from(request.offset()).unwrap_or(i64::MAX)
}

fn str_to_status(s: &str) -> Result<UserStatus, DomainError> {
    match s {
        "ACTIVE" => Ok(UserStatus::Active),
        "INACTIVE" => Ok(UserStatus::Inactive),
        "BLOCKED" => Ok(UserStatus::Blocked),
        other => Err(DomainError::storage(format!(
            "Unknown user status '{}' in users table",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_conversion() {
        assert_eq!(str_to_status("ACTIVE").unwrap(), UserStatus::Active);
        assert_eq!(str_to_status("INACTIVE").unwrap(), UserStatus::Inactive);
        assert_eq!(str_to_status("BLOCKED").unwrap(), UserStatus::Blocked);
    }

    #[test]
    fn test_unknown_status_is_a_storage_error() {
        let result = str_to_status("SUSPENDED");
        assert!(
            matches!(result, Err(DomainError::Storage { ref message }) if message.contains("SUSPENDED"))
        );
    }

    #[test]
    fn test_offset_param_saturates() {
        let request = PageRequest::new(u32::MAX, u32::MAX).unwrap();
        assert_eq!(offset_param(&request), i64::MAX);

        let request = PageRequest::new(2, 10).unwrap();
        assert_eq!(offset_param(&request), 20);
    }

    #[test]
    fn test_search_pattern_lowercases_and_wraps() {
        assert_eq!(search_pattern("JOHN"), "%john%");
        assert_eq!(search_pattern("doe"), "%doe%");
    }
}
