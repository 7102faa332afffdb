use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use crate::application::services::DEFAULT_TOP_TERMS;
use crate::presentation::state::AppState;

use super::error::{NO_TEXT_PROVIDED, analysis_error_response, user_error};

#[derive(Serialize)]
pub struct CategoriesResponse {
    pub all_categories: Vec<String>,
    pub religious_categories: Vec<String>,
    pub non_religious_categories: Vec<String>,
    pub total: usize,
    pub religious_count: usize,
    pub non_religious_count: usize,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopTermsRequest {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub top_k: Option<usize>,
}

#[derive(Serialize)]
pub struct TopTermsResponse {
    pub terms: Vec<String>,
}

/// Category classifier labels partitioned by the religious allow-list.
pub async fn categories_handler(State(state): State<AppState>) -> impl IntoResponse {
    let breakdown = state.analysis_service.categories();

    (
        StatusCode::OK,
        Json(CategoriesResponse {
            total: breakdown.all.len(),
            religious_count: breakdown.religious.len(),
            non_religious_count: breakdown.non_religious.len(),
            all_categories: breakdown.all,
            religious_categories: breakdown.religious,
            non_religious_categories: breakdown.non_religious,
        }),
    )
}

#[tracing::instrument(skip(state, request))]
pub async fn top_terms_handler(
    State(state): State<AppState>,
    Json(request): Json<TopTermsRequest>,
) -> Response {
    let Some(text) = request.text.filter(|t| !t.trim().is_empty()) else {
        return user_error(NO_TEXT_PROVIDED);
    };
    let top_k = request.top_k.unwrap_or(DEFAULT_TOP_TERMS);

    match state.analysis_service.top_terms(&text, top_k) {
        Ok(terms) => (StatusCode::OK, Json(TopTermsResponse { terms })).into_response(),
        Err(e) => analysis_error_response(e),
    }
}
