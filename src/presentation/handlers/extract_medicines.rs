use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;

use crate::application::ports::ExtractionClient;
use crate::domain::{ImageFormat, PrescriptionImage, VerifiedMedicine};
use crate::presentation::state::AppState;

#[derive(Serialize)]
pub struct ExtractMedicinesResponse {
    pub medicines: Vec<VerifiedMedicine>,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Accepts a multipart prescription image upload and returns the verified
/// medicine list. Pipeline degradation (oracle failure, unparseable output)
/// still responds 200; only malformed uploads are rejected.
#[tracing::instrument(skip(state, multipart))]
pub async fn extract_medicines_handler<E>(
    State(state): State<AppState<E>>,
    mut multipart: Multipart,
) -> impl IntoResponse
where
    E: ExtractionClient + 'static,
{
    let field = match multipart.next_field().await {
        Ok(Some(f)) => f,
        Ok(None) => {
            tracing::warn!("Extraction request with no file");
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

    let filename = field.file_name().unwrap_or("unknown").to_string();
    let mime = field.content_type().unwrap_or("application/octet-stream");

    tracing::debug!(filename = %filename, mime = %mime, "Processing prescription upload");

    let format = match ImageFormat::from_mime(mime) {
        Some(f) => f,
        None => {
            tracing::warn!(mime = %mime, "Unsupported image type");
            return (
                StatusCode::UNSUPPORTED_MEDIA_TYPE,
                Json(ErrorResponse {
                    error: format!("Unsupported image type: {}", mime),
                }),
            )
                .into_response();
        }
    };

    let data = match field.bytes().await {
        Ok(d) => d,
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
    };

    let prescription = PrescriptionImage::new(filename, format, data.len() as u64);
    let medicines = state
        .verification_service
        .process(&data, &prescription)
        .await;

    tracing::info!(
        medicine_count = medicines.len(),
        "Prescription processed"
    );

    (
        StatusCode::OK,
        Json(ExtractMedicinesResponse { medicines }),
    )
        .into_response()
}
