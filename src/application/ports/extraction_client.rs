use async_trait::async_trait;

use crate::domain::PrescriptionImage;

/// Boundary to the external vision-language oracle. Given the raw image bytes
/// and their declared format, returns the oracle's unstructured text response.
#[async_trait]
pub trait ExtractionClient: Send + Sync {
    async fn extract(
        &self,
        image: &[u8],
        prescription: &PrescriptionImage,
    ) -> Result<String, ExtractionClientError>;
}

#[derive(Debug, thiserror::Error)]
pub enum ExtractionClientError {
    #[error("api request failed: {0}")]
    ApiRequestFailed(String),
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}
