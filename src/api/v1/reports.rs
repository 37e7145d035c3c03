//! Report download endpoints

use axum::extract::State;
use axum::http::header;
use axum::response::IntoResponse;
use chrono::{DateTime, Utc};
use tracing::debug;

use crate::api::state::AppState;
use crate::api::types::ApiError;

const PDF_CONTENT_TYPE: &str = "application/pdf";
const EXCEL_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// GET /api/v1/reports/users/pdf
pub async fn download_users_pdf(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ApiError> {
    debug!("Downloading PDF user report");

    let bytes = state
        .report_service
        .user_report_pdf()
        .await
        .map_err(ApiError::from)?;

    Ok(download_response(
        PDF_CONTENT_TYPE,
        report_filename("pdf", Utc::now()),
        bytes,
    ))
}

/// GET /api/v1/reports/users/excel
pub async fn download_users_excel(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ApiError> {
    debug!("Downloading Excel user report");

    let bytes = state
        .report_service
        .user_report_excel()
        .await
        .map_err(ApiError::from)?;

    Ok(download_response(
        EXCEL_CONTENT_TYPE,
        report_filename("xlsx", Utc::now()),
        bytes,
    ))
}

fn report_filename(extension: &str, date: DateTime<Utc>) -> String {
    format!("users_report_{}.{}", date.format("%Y%m%d"), extension)
}

fn download_response(
    content_type: &str,
    filename: String,
    bytes: Vec<u8>,
) -> impl IntoResponse {
    (
        [
            (header::CONTENT_TYPE, content_type.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", filename),
            ),
        ],
        bytes,
    )
}
