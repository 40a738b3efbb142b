mod extraction_client;

pub use extraction_client::{ExtractionClient, ExtractionClientError};
