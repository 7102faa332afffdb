use std::sync::Arc;

use axum::Json;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use crate::infrastructure::observability::preview_text;
use crate::presentation::state::AppState;

use super::error::{ErrorResponse, NO_TEXT_PROVIDED, analysis_error_response, user_error};

const INLINE_SOURCE_NAME: &str = "inline-text";
const FILE_FIELD: &str = "file";

#[derive(Deserialize)]
pub struct AnalyzeTextRequest {
    #[serde(default)]
    pub text: Option<String>,
}

#[tracing::instrument(skip(state, request))]
pub async fn analyze_text_handler(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeTextRequest>,
) -> Response {
    let Some(text) = request.text.filter(|t| !t.trim().is_empty()) else {
        tracing::warn!("Analyze request without text");
        return user_error(NO_TEXT_PROVIDED);
    };

    tracing::debug!(text = %preview_text(&text), "Analyzing inline text");

    match Arc::clone(&state.analysis_service)
        .analyze_blocking(INLINE_SOURCE_NAME.to_string(), text)
        .await
    {
        Ok(payload) => (StatusCode::OK, Json(payload)).into_response(),
        Err(e) => analysis_error_response(e),
    }
}

#[tracing::instrument(skip(state, multipart))]
pub async fn analyze_file_handler(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Response {
    let (filename, data) = loop {
        let field = match multipart.next_field().await {
            Ok(Some(f)) => f,
            Ok(None) => {
                tracing::warn!("Analyze request with no file");
                return (
                    StatusCode::BAD_REQUEST,
                    Json(ErrorResponse {
                        error: "No file uploaded".to_string(),
                    }),
                )
                    .into_response();
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to read multipart");
                return (
                    StatusCode::BAD_REQUEST,
                    Json(ErrorResponse {
                        error: format!("Failed to read multipart: {}", e),
                    }),
                )
                    .into_response();
            }
        };

        if field.name() != Some(FILE_FIELD) && field.file_name().is_none() {
            continue;
        }

        let filename = field.file_name().unwrap_or_default().to_string();
        match field.bytes().await {
            Ok(d) => break (filename, d),
            Err(e) => {
                tracing::error!(error = %e, "Failed to read file bytes");
                return (
                    StatusCode::BAD_REQUEST,
                    Json(ErrorResponse {
                        error: format!("Failed to read file: {}", e),
                    }),
                )
                    .into_response();
            }
        }
    };

    tracing::debug!(filename = %filename, bytes = data.len(), "File data received");

    let text = match state.analysis_service.extract_text(&data, &filename).await {
        Ok(text) => text,
        Err(e) => return analysis_error_response(e),
    };

    match Arc::clone(&state.analysis_service)
        .analyze_blocking(filename, text)
        .await
    {
        Ok(payload) => (StatusCode::OK, Json(payload)).into_response(),
        Err(e) => analysis_error_response(e),
    }
}
