mod helpers;

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;

use bias_detector::infrastructure::observability::REQUEST_ID_HEADER;
use bias_detector::presentation::{AppState, create_router};

use helpers::{FixedClassifier, analysis_service};

const BOUNDARY: &str = "X-TEST-BOUNDARY";
const TEST_MAX_UPLOAD_BYTES: usize = 1024 * 1024;

fn create_test_app() -> Router {
    let religion = Arc::new(FixedClassifier::new(
        &["askreddit", "islam", "christianity"],
        &[0.2, 0.5, 0.3],
    ));

    create_router(AppState {
        analysis_service: Arc::new(analysis_service(religion)),
        max_upload_bytes: TEST_MAX_UPLOAD_BYTES,
    })
}

fn json_request(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn multipart_request(field_name: &str, filename: Option<&str>, content: &str) -> Request<Body> {
    let disposition = match filename {
        Some(filename) => {
            format!("form-data; name=\"{field_name}\"; filename=\"{filename}\"")
        }
        None => format!("form-data; name=\"{field_name}\""),
    };
    let body = format!(
        "--{BOUNDARY}\r\nContent-Disposition: {disposition}\r\nContent-Type: text/plain\r\n\r\n{content}\r\n--{BOUNDARY}--\r\n"
    );

    Request::builder()
        .method("POST")
        .uri("/analyze-file")
        .header(
            "content-type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

#[tokio::test]
async fn given_running_server_when_health_check_then_returns_ok_status() {
    let app = create_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, serde_json::json!({"status": "ok"}));
}

#[tokio::test]
async fn given_blank_text_when_analyzing_text_then_returns_error_body() {
    let app = create_test_app();

    let response = app
        .oneshot(json_request("/analyze-text", r#"{"text": "   "}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        serde_json::json!({"error": "No text provided"})
    );
}

#[tokio::test]
async fn given_missing_text_field_when_analyzing_text_then_returns_error_body() {
    let app = create_test_app();

    let response = app
        .oneshot(json_request("/analyze-text", "{}"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["error"], "No text provided");
}

#[tokio::test]
async fn given_text_when_analyzing_text_then_returns_payload() {
    let app = create_test_app();

    let response = app
        .oneshot(json_request(
            "/analyze-text",
            r#"{"text": "I love Islam. I hate rain. Islam is peaceful."}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["filename"], "inline-text");
    assert_eq!(json["totalWords"], 9);
    assert_eq!(json["overallSentiment"], "positive");
    assert_eq!(json["predictedReligion"], "islam");
    assert_eq!(json["religionsDetected"], 1);
    assert!(json["religionProbabilities"].get("askreddit").is_none());
    assert_eq!(json["results"][0]["religion"], "islam");
    assert_eq!(json["results"][0]["totalMentions"], 2);
    assert!(json["uploadTime"].as_str().unwrap().ends_with('Z'));
}

#[tokio::test]
async fn given_text_file_when_analyzing_file_then_uses_filename_in_payload() {
    let app = create_test_app();

    let response = app
        .oneshot(multipart_request(
            "file",
            Some("sermon.txt"),
            "Christianity and prayer bring love.",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["filename"], "sermon.txt");
    assert_eq!(json["overallSentiment"], "positive");
    assert_eq!(json["results"][0]["religion"], "christianity");
}

#[tokio::test]
async fn given_unsupported_suffix_when_analyzing_file_then_returns_error_body() {
    let app = create_test_app();

    let response = app
        .oneshot(multipart_request("file", Some("notes.csv"), "a,b,c"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        serde_json::json!({"error": "Unsupported file. Use .txt, .docx or .pdf"})
    );
}

#[tokio::test]
async fn given_form_without_file_when_analyzing_file_then_returns_bad_request() {
    let app = create_test_app();

    let response = app
        .oneshot(multipart_request("comment", None, "just a note"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"], "No file uploaded");
}

#[tokio::test]
async fn given_corrupt_docx_when_analyzing_file_then_returns_server_error() {
    let app = create_test_app();

    let response = app
        .oneshot(multipart_request("file", Some("broken.docx"), "not a zip"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = body_json(response).await;
    assert!(json["error"].as_str().unwrap().starts_with("Analysis failed"));
}

#[tokio::test]
async fn given_loaded_models_when_listing_categories_then_partitions_labels() {
    let app = create_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/debug/categories")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["total"], 3);
    assert_eq!(json["religious_count"], 2);
    assert_eq!(json["non_religious_categories"], serde_json::json!(["askreddit"]));
}

#[tokio::test]
async fn given_text_and_limit_when_requesting_top_terms_then_returns_heaviest_terms() {
    let app = create_test_app();

    let response = app
        .oneshot(json_request(
            "/debug/top-terms",
            r#"{"text": "rain love love hate love", "topK": 2}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        serde_json::json!({"terms": ["love", "hate"]})
    );
}

#[tokio::test]
async fn given_request_id_header_when_calling_api_then_echoes_it() {
    let app = create_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .header(REQUEST_ID_HEADER, "req-42")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.headers()[REQUEST_ID_HEADER], "req-42");
}

#[tokio::test]
async fn given_no_request_id_when_calling_api_then_mints_one() {
    let app = create_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let minted = response.headers()[REQUEST_ID_HEADER].to_str().unwrap();
    assert!(uuid::Uuid::parse_str(minted).is_ok());
}

#[tokio::test]
async fn given_cross_origin_request_when_calling_api_then_allows_any_origin() {
    let app = create_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .header("origin", "http://localhost:3000")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.headers()["access-control-allow-origin"], "*");
}
