use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use rxverify::application::ports::{ExtractionClient, ExtractionClientError};
use rxverify::application::services::{
    MatchVerifier, VerificationService, EXTRACTION_FAILURE_SENTINEL,
};
use rxverify::domain::{PrescriptionImage, ReferenceCorpus};
use rxverify::infrastructure::llm::MockExtractionClient;
use rxverify::presentation::{create_router, AppState};

const BOUNDARY: &str = "rxverify-test-boundary";

struct FailingExtractionClient;

#[async_trait::async_trait]
impl ExtractionClient for FailingExtractionClient {
    async fn extract(
        &self,
        _image: &[u8],
        _prescription: &PrescriptionImage,
    ) -> Result<String, ExtractionClientError> {
        Err(ExtractionClientError::ApiRequestFailed(
            "connection refused".to_string(),
        ))
    }
}

fn test_corpus() -> ReferenceCorpus {
    ReferenceCorpus::new(vec![
        "Augmentin 625 Duo Tablet".to_string(),
        "Paracetamol 500mg".to_string(),
    ])
}

fn create_test_app<E>(extraction_client: E) -> Router
where
    E: ExtractionClient + 'static,
{
    let verification_service = Arc::new(VerificationService::new(
        Arc::new(extraction_client),
        Arc::new(test_corpus()),
        MatchVerifier::default(),
    ));

    create_router(AppState {
        verification_service,
    })
}

fn multipart_request(image: &[u8], mime: &str) -> Request<Body> {
    let mut body = Vec::new();
    body.extend_from_slice(
        format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"rx.jpg\"\r\nContent-Type: {mime}\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(image);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

    Request::builder()
        .method("POST")
        .uri("/api/extract_medicines")
        .header(
            "content-type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}

async fn response_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn given_running_server_when_health_check_then_returns_ok() {
    let app = create_test_app(MockExtractionClient::new("[]"));

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
}

#[tokio::test]
async fn given_well_formed_extraction_when_uploading_then_returns_statuses_per_item() {
    let app = create_test_app(MockExtractionClient::new(
        r#"[{"name":"Paracetamol 500mg","dosage":"1 tab"},{"name":"Xyzzyplex 999","dosage":""}]"#,
    ));

    let response = app
        .oneshot(multipart_request(b"fake-image-bytes", "image/jpeg"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = response_json(response).await;
    let medicines = json["medicines"].as_array().unwrap();
    assert_eq!(medicines.len(), 2);
    assert_eq!(medicines[0]["name"], "Paracetamol 500mg");
    assert_eq!(medicines[0]["dosage"], "1 tab");
    assert_eq!(medicines[0]["status"], "verified");
    assert_eq!(medicines[1]["name"], "Xyzzyplex 999");
    assert_eq!(medicines[1]["status"], "not_verified");
}

#[tokio::test]
async fn given_fenced_extraction_when_uploading_then_fences_are_stripped() {
    let app = create_test_app(MockExtractionClient::new(
        "```json\n[{\"name\":\"Augmentin 625 Duo Tablet\",\"dosage\":\"1 tab twice daily\"}]\n```",
    ));

    let response = app
        .oneshot(multipart_request(b"fake-image-bytes", "image/png"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = response_json(response).await;
    let medicines = json["medicines"].as_array().unwrap();
    assert_eq!(medicines.len(), 1);
    assert_eq!(medicines[0]["name"], "Augmentin 625 Duo Tablet");
    assert_eq!(medicines[0]["status"], "verified");
}

#[tokio::test]
async fn given_prose_extraction_when_uploading_then_returns_single_unverified_item() {
    let app = create_test_app(MockExtractionClient::new("I cannot read this image"));

    let response = app
        .oneshot(multipart_request(b"fake-image-bytes", "image/jpeg"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = response_json(response).await;
    let medicines = json["medicines"].as_array().unwrap();
    assert_eq!(medicines.len(), 1);
    assert_eq!(medicines[0]["name"], "I cannot read this image");
    assert_eq!(medicines[0]["dosage"], "");
    assert_eq!(medicines[0]["status"], "not_verified");
}

#[tokio::test]
async fn given_failing_oracle_when_uploading_then_degrades_to_sentinel_item() {
    let app = create_test_app(FailingExtractionClient);

    let response = app
        .oneshot(multipart_request(b"fake-image-bytes", "image/jpeg"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = response_json(response).await;
    let medicines = json["medicines"].as_array().unwrap();
    assert_eq!(medicines.len(), 1);
    assert_eq!(medicines[0]["name"], EXTRACTION_FAILURE_SENTINEL);
    assert_eq!(medicines[0]["status"], "not_verified");
}

#[tokio::test]
async fn given_empty_extraction_array_when_uploading_then_returns_empty_medicine_list() {
    let app = create_test_app(MockExtractionClient::new("[]"));

    let response = app
        .oneshot(multipart_request(b"fake-image-bytes", "image/jpeg"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = response_json(response).await;
    assert_eq!(json["medicines"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn given_no_file_when_uploading_then_returns_bad_request() {
    let app = create_test_app(MockExtractionClient::new("[]"));

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/extract_medicines")
                .header(
                    "content-type",
                    format!("multipart/form-data; boundary={BOUNDARY}"),
                )
                .body(Body::from(format!("--{BOUNDARY}--\r\n")))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn given_non_image_upload_when_uploading_then_returns_unsupported_media_type() {
    let app = create_test_app(MockExtractionClient::new("[]"));

    let response = app
        .oneshot(multipart_request(b"just text", "text/plain"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
}

#[tokio::test]
async fn given_request_without_id_when_any_endpoint_then_response_contains_request_id() {
    let app = create_test_app(MockExtractionClient::new("[]"));

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert!(response.headers().contains_key("x-request-id"));
}

#[tokio::test]
async fn given_request_with_id_when_any_endpoint_then_response_echoes_request_id() {
    let app = create_test_app(MockExtractionClient::new("[]"));

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .header("x-request-id", "test-id-123")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(
        response.headers().get("x-request-id").unwrap(),
        "test-id-123"
    );
}
