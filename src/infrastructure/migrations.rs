//! Embedded database migrations.

use crate::domain::DomainError;
use sqlx::PgPool;
use tracing::{debug, info};

/// A single schema migration with forward and rollback SQL.
#[derive(Debug, Clone)]
pub struct Migration {
    version: i64,
    description: String,
    up: String,
    down: String,
}

impl Migration {
    pub fn new(
        version: i64,
        description: impl Into<String>,
        up: impl Into<String>,
        down: impl Into<String>,
    ) -> Self {
        Self {
            version,
            description: description.into(),
            up: up.into(),
            down: down.into(),
        }
    }

    pub fn version(&self) -> i64 {
        self.version
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn up(&self) -> &str {
        &self.up
    }

    pub fn down(&self) -> &str {
        &self.down
    }
}

/// Applies migrations against Postgres, tracking them in a `_migrations` table.
#[derive(Debug)]
pub struct PostgresMigrator {
    pool: PgPool,
}

impl PostgresMigrator {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn ensure_migrations_table(&self) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS _migrations (
                version BIGINT PRIMARY KEY,
                description TEXT NOT NULL,
                installed_on TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                success BOOLEAN NOT NULL DEFAULT TRUE
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to create migrations table: {}", e)))?;

        Ok(())
    }

    async fn is_applied(&self, version: i64) -> Result<bool, DomainError> {
        let applied: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM _migrations WHERE version = $1)")
                .bind(version)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| {
                    DomainError::storage(format!("Failed to check migration state: {}", e))
                })?;

        Ok(applied)
    }

    /// Runs a single migration if it has not been applied yet.
    pub async fn run_migration(&self, migration: &Migration) -> Result<(), DomainError> {
        self.ensure_migrations_table().await?;

        if self.is_applied(migration.version()).await? {
            debug!(
                version = migration.version(),
                "Migration already applied, skipping"
            );
            return Ok(());
        }

        info!(
            version = migration.version(),
            description = migration.description(),
            "Applying migration"
        );

        // Scripts may hold several commands, so skip the prepared path
        sqlx::raw_sql(migration.up())
            .execute(&self.pool)
            .await
            .map_err(|e| {
                DomainError::storage(format!(
                    "Migration {} failed: {}",
                    migration.version(),
                    e
                ))
            })?;

        sqlx::query("INSERT INTO _migrations (version, description) VALUES ($1, $2)")
            .bind(migration.version())
            .bind(migration.description())
            .execute(&self.pool)
            .await
            .map_err(|e| {
                DomainError::storage(format!("Failed to record migration: {}", e))
            })?;

        Ok(())
    }

    /// Runs every given migration in order.
    pub async fn run_all(&self, migrations: &[Migration]) -> Result<(), DomainError> {
        for migration in migrations {
            self.run_migration(migration).await?;
        }

        Ok(())
    }
}

/// All migrations for the user store, in application order.
pub fn user_migrations() -> Vec<Migration> {
    vec![Migration::new(
        1,
        "create users table",
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id BIGSERIAL PRIMARY KEY,
            first_name VARCHAR(50) NOT NULL,
            last_name VARCHAR(50) NOT NULL,
            email VARCHAR(100) NOT NULL UNIQUE,
            phone_number VARCHAR(20),
            status VARCHAR(20) NOT NULL DEFAULT 'ACTIVE',
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        );
        "#,
        "DROP TABLE IF EXISTS users;",
    )]
}

/// Brings the database schema up to date.
pub async fn run_user_migrations(pool: &PgPool) -> Result<(), DomainError> {
    let migrator = PostgresMigrator::new(pool.clone());
    migrator.run_all(&user_migrations()).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_migration_creation() {
        let migration = Migration::new(1, "create users table", "CREATE TABLE", "DROP TABLE");

        assert_eq!(migration.version(), 1);
        assert_eq!(migration.description(), "create users table");
        assert_eq!(migration.up(), "CREATE TABLE");
        assert_eq!(migration.down(), "DROP TABLE");
    }

    #[test]
    fn test_user_migrations_order() {
        let migrations = user_migrations();

        assert!(!migrations.is_empty());
        for window in migrations.windows(2) {
            assert!(window[0].version() < window[1].version());
        }
        assert_eq!(migrations[0].version(), 1);
    }

    #[test]
    fn test_user_migrations_content() {
        let migrations = user_migrations();
        let users = &migrations[0];

        assert!(users.up().contains("CREATE TABLE IF NOT EXISTS users"));
        // The unique constraint already maintains the email index
        assert!(users.up().contains("email VARCHAR(100) NOT NULL UNIQUE"));
        assert!(!users.up().contains("CREATE INDEX"));
        assert!(users.down().contains("DROP TABLE IF EXISTS users"));
    }
}
