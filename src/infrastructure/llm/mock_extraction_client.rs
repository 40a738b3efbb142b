use crate::application::ports::{ExtractionClient, ExtractionClientError};
use crate::domain::PrescriptionImage;

/// Canned-response client for tests and offline development.
pub struct MockExtractionClient {
    response: String,
}

impl MockExtractionClient {
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            response: response.into(),
        }
    }
}

#[async_trait::async_trait]
impl ExtractionClient for MockExtractionClient {
    async fn extract(
        &self,
        _image: &[u8],
        _prescription: &PrescriptionImage,
    ) -> Result<String, ExtractionClientError> {
        Ok(self.response.clone())
    }
}
