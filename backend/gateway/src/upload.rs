//! `POST /upload`: multipart JPEG upload in, plain-text inventory out.

use axum::{
    Json,
    extract::{Multipart, State, multipart::MultipartRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use objscan_detection::JPEG_MIME;
use objscan_logging::redact_sensitive_data;
use serde_json::json;
use tracing::{error, info, warn};

use crate::server::GatewayState;

/// Multipart field carrying the image.
pub const FILE_FIELD: &str = "file";

fn json_error(status: StatusCode, body: serde_json::Value) -> Response {
    (status, Json(body)).into_response()
}

fn plain_text(status: StatusCode, body: String) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        body,
    )
        .into_response()
}

/// The MIME essence of a content type: parameters dropped, lowercased.
fn mime_essence(content_type: &str) -> String {
    content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase()
}

/// Handler for `POST /upload`
pub async fn upload_and_analyze(
    State(state): State<GatewayState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Response {
    let Ok(mut multipart) = multipart else {
        return json_error(
            StatusCode::BAD_REQUEST,
            json!({ "error": "Missing form field 'file'" }),
        );
    };

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => {
                warn!(error = %e, "Rejected malformed multipart body");
                return json_error(e.status(), json!({ "error": e.body_text() }));
            }
        };
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let file_name = field.file_name().unwrap_or_default().to_string();
        if file_name.is_empty() {
            return json_error(StatusCode::BAD_REQUEST, json!({ "error": "No file selected" }));
        }

        let content_type = field.content_type().map(str::to_string);
        if content_type.as_deref().map(mime_essence).as_deref() != Some(JPEG_MIME) {
            return json_error(
                StatusCode::UNSUPPORTED_MEDIA_TYPE,
                json!({ "error": "Only image/jpeg is accepted", "got": content_type }),
            );
        }

        let bytes = match field.bytes().await {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!(error = %e, "Failed to read upload");
                return json_error(e.status(), json!({ "error": e.body_text() }));
            }
        };
        if bytes.is_empty() {
            return json_error(StatusCode::BAD_REQUEST, json!({ "error": "Empty upload" }));
        }

        info!(file_name = %file_name, size_bytes = bytes.len(), "Received upload");
        return match state.detector.analyze(&bytes).await {
            Ok(text) => plain_text(StatusCode::OK, text),
            Err(e) => {
                error!(kind = e.kind(), error = %redact_sensitive_data(&e.to_string()), "Analysis failed");
                plain_text(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("ERROR analyzing image:\n{e}"),
                )
            }
        };
    }

    json_error(
        StatusCode::BAD_REQUEST,
        json!({ "error": "Missing form field 'file'" }),
    )
}
