//! User management endpoints

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::api::state::AppState;
use crate::api::types::{ApiError, ApiResponse, Json, Query};
use crate::domain::{validate_user_payload, PageRequest, User, UserStatus};
use crate::infrastructure::user::{CreateUserRequest, UpdateUserRequest};

const DEFAULT_PAGE: u32 = 0;
const DEFAULT_PAGE_SIZE: u32 = 10;

/// Incoming user fields, shared by create and update
///
/// Every field is optional at the wire level so that missing values reach
/// validation instead of failing deserialization.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPayload {
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub status: Option<UserStatus>,
}

impl UserPayload {
    /// Checks every field and merges the failures into one message
    fn validate(&self) -> Result<(), ApiError> {
        let failures = validate_user_payload(
            self.first_name.as_deref(),
            self.last_name.as_deref(),
            self.email.as_deref(),
            self.phone_number.as_deref(),
        );

        if failures.is_empty() {
            return Ok(());
        }

        let message = failures
            .iter()
            .map(|failure| failure.error.to_string())
            .collect::<Vec<_>>()
            .join(", ");

        Err(ApiError::bad_request(message))
    }

    pub fn into_create_request(self) -> Result<CreateUserRequest, ApiError> {
        self.validate()?;

        Ok(CreateUserRequest {
            first_name: self.first_name.unwrap_or_default(),
            last_name: self.last_name.unwrap_or_default(),
            email: self.email.unwrap_or_default(),
            phone_number: self.phone_number,
            status: self.status,
        })
    }

    pub fn into_update_request(self) -> Result<UpdateUserRequest, ApiError> {
        self.validate()?;

        Ok(UpdateUserRequest {
            first_name: self.first_name.unwrap_or_default(),
            last_name: self.last_name.unwrap_or_default(),
            email: self.email.unwrap_or_default(),
            phone_number: self.phone_number,
            status: self.status,
        })
    }
}

/// User representation returned to clients
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: Option<String>,
    pub status: UserStatus,
    pub created_at: String,
    pub updated_at: String,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id().value(),
            first_name: user.first_name().to_string(),
            last_name: user.last_name().to_string(),
            email: user.email().to_string(),
            phone_number: user.phone_number().map(str::to_string),
            status: user.status(),
            created_at: user.created_at().to_rfc3339(),
            updated_at: user.updated_at().to_rfc3339(),
        }
    }
}

/// Query parameters for the list endpoint
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListUsersQuery {
    pub search: Option<String>,
    pub page: Option<u32>,
    pub size: Option<u32>,
}

/// POST /api/v1/users
pub async fn create_user(
    State(state): State<AppState>,
    Json(payload): Json<UserPayload>,
) -> Result<ApiResponse<UserResponse>, ApiError> {
    debug!("Creating user");

    let request = payload.into_create_request()?;
    let user = state
        .user_service
        .create(request)
        .await
        .map_err(ApiError::from)?;

    Ok(ApiResponse::success(UserResponse::from(&user)))
}

/// GET /api/v1/users/:user_id
pub async fn get_user(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> Result<ApiResponse<UserResponse>, ApiError> {
    debug!(user_id, "Getting user");

    let user = state
        .user_service
        .get(user_id)
        .await
        .map_err(ApiError::from)?;

    Ok(ApiResponse::success(UserResponse::from(&user)))
}

/// GET /api/v1/users
///
/// Pagination totals travel in the `X-Total-Count` and `X-Total-Pages`
/// headers; the body carries the flat list of users for the page.
pub async fn list_users(
    State(state): State<AppState>,
    Query(query): Query<ListUsersQuery>,
) -> Result<impl IntoResponse, ApiError> {
    debug!(
        page = query.page.unwrap_or(DEFAULT_PAGE),
        size = query.size.unwrap_or(DEFAULT_PAGE_SIZE),
        "Listing users"
    );

    let request = PageRequest::new(
        query.page.unwrap_or(DEFAULT_PAGE),
        query.size.unwrap_or(DEFAULT_PAGE_SIZE),
    )
    .map_err(ApiError::from)?;

    let page = state
        .user_service
        .search(query.search.as_deref(), &request)
        .await
        .map_err(ApiError::from)?;

    let headers = [
        ("x-total-count", page.total_elements().to_string()),
        ("x-total-pages", page.total_pages().to_string()),
    ];
    let users: Vec<UserResponse> = page.items().iter().map(UserResponse::from).collect();

    Ok((headers, ApiResponse::success(users)))
}

/// PUT /api/v1/users/:user_id
pub async fn update_user(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
    Json(payload): Json<UserPayload>,
) -> Result<ApiResponse<UserResponse>, ApiError> {
    debug!(user_id, "Updating user");

    let request = payload.into_update_request()?;
    let user = state
        .user_service
        .update(user_id, request)
        .await
        .map_err(ApiError::from)?;

    Ok(ApiResponse::success(UserResponse::from(&user)))
}

/// DELETE /api/v1/users/:user_id
pub async fn delete_user(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> Result<ApiResponse<()>, ApiError> {
    debug!(user_id, "Deleting user");

    state
        .user_service
        .delete(user_id)
        .await
        .map_err(ApiError::from)?;

    Ok(ApiResponse::success_empty())
}
