//! User Management API
//!
//! A CRUD service for user records with support for:
//! - Paginated, case-insensitive search
//! - In-memory or PostgreSQL persistence
//! - PDF and Excel report exports

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;

use api::state::AppState;
use config::StorageBackend;
use domain::user::UserRepository;
use infrastructure::migrations::run_user_migrations;
use infrastructure::report::ReportService;
use infrastructure::user::{InMemoryUserRepository, PostgresUserRepository, UserService};
use tracing::info;

/// Create the application state with all services initialized
pub async fn create_app_state() -> anyhow::Result<AppState> {
    create_app_state_with_config(&AppConfig::default()).await
}

/// Create the application state with custom configuration
pub async fn create_app_state_with_config(config: &AppConfig) -> anyhow::Result<AppState> {
    match config.storage.backend {
        StorageBackend::Postgres => {
            let database_url = resolve_database_url(config)?;

            info!("Connecting to PostgreSQL...");
            let pool = sqlx::PgPool::connect(&database_url)
                .await
                .map_err(|e| anyhow::anyhow!("Failed to connect to PostgreSQL: {}", e))?;
            info!("PostgreSQL connection established");

            run_user_migrations(&pool).await?;

            Ok(build_state(Arc::new(PostgresUserRepository::new(pool))))
        }
        StorageBackend::InMemory => {
            info!("Using in-memory user store");
            Ok(build_state(Arc::new(InMemoryUserRepository::new())))
        }
    }
}

fn resolve_database_url(config: &AppConfig) -> anyhow::Result<String> {
    if !config.storage.database_url.is_empty() {
        return Ok(config.storage.database_url.clone());
    }

    std::env::var("DATABASE_URL").map_err(|_| {
        anyhow::anyhow!("DATABASE_URL environment variable is required for the postgres backend")
    })
}

fn build_state<R: UserRepository + 'static>(repository: Arc<R>) -> AppState {
    let user_service = Arc::new(UserService::new(repository.clone()));
    let report_service = Arc::new(ReportService::new(repository));

    AppState::new(user_service, report_service)
}
