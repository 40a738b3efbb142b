mod mock_extraction_client;
mod vlm_extraction_client;

pub use mock_extraction_client::MockExtractionClient;
pub use vlm_extraction_client::{VlmConfig, VlmExtractionClient, EXTRACTION_PROMPT};
