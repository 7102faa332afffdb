use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::application::services::AnalysisError;

pub const NO_TEXT_PROVIDED: &str = "No text provided";
pub const UNSUPPORTED_FILE: &str = "Unsupported file. Use .txt, .docx or .pdf";

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// User input problems are reported in the body of a 200 response; clients
/// tell them apart from results by the `error` field.
pub fn user_error(message: &str) -> Response {
    (
        StatusCode::OK,
        Json(ErrorResponse {
            error: message.to_string(),
        }),
    )
        .into_response()
}

pub fn analysis_error_response(error: AnalysisError) -> Response {
    match error {
        AnalysisError::UnsupportedFormat(filename) => {
            tracing::warn!(filename = %filename, "Unsupported file format");
            user_error(UNSUPPORTED_FILE)
        }
        other => {
            tracing::error!(error = %other, "Analysis failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: format!("Analysis failed: {}", other),
                }),
            )
                .into_response()
        }
    }
}
