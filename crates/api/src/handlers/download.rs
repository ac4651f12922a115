//! Handler for `POST /download`: export an ad-hoc strategy payload.

use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;
use serde_json::Value;
use strategist_core::export::{self, ExportFile};
use strategist_core::validation;

use crate::error::AppResult;
use crate::extract::AppJson;

/// Request body for `POST /download`.
#[derive(Debug, Deserialize)]
pub struct DownloadRequest {
    /// Strategy payload to export. Must be a JSON object.
    #[serde(default)]
    pub data: Value,
    /// One of `pdf`, `csv`, `txt`.
    pub format: Option<String>,
}

/// POST /api/download
///
/// Render `data` in the requested format and return it as an attachment.
/// An unsupported format is rejected with 400 before anything is rendered.
pub async fn download(AppJson(input): AppJson<DownloadRequest>) -> AppResult<Response> {
    validation::require_fields(&[("format", input.format.is_some())])?;
    let format = input.format.unwrap_or_default();

    let file = export::export(&input.data, &format)?;

    tracing::info!(
        format = %format,
        filename = %file.filename,
        bytes = file.bytes.len(),
        "Export generated"
    );

    Ok(attachment(file))
}

/// Build a `200 OK` attachment response for a rendered export.
pub(crate) fn attachment(file: ExportFile) -> Response {
    (
        StatusCode::OK,
        [
            (CONTENT_TYPE, file.content_type.to_string()),
            (
                CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", file.filename),
            ),
        ],
        file.bytes,
    )
        .into_response()
}
