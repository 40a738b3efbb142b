use std::sync::Arc;

use crate::application::ports::ExtractionClient;
use crate::domain::{PrescriptionImage, ReferenceCorpus, VerifiedMedicine};

use super::candidate_parser::parse_candidates;
use super::match_verifier::MatchVerifier;

/// Raw text substituted when the oracle call fails. Flows through the normal
/// parser fallback path, so an outage surfaces as a single not-verified item
/// rather than an error response.
pub const EXTRACTION_FAILURE_SENTINEL: &str = "Error contacting the vision model";

/// Composes extraction, parsing, and verification. The sole boundary exposed
/// to the HTTP layer; never fails per request.
pub struct VerificationService<E>
where
    E: ExtractionClient,
{
    extraction_client: Arc<E>,
    corpus: Arc<ReferenceCorpus>,
    verifier: MatchVerifier,
}

impl<E> VerificationService<E>
where
    E: ExtractionClient,
{
    pub fn new(
        extraction_client: Arc<E>,
        corpus: Arc<ReferenceCorpus>,
        verifier: MatchVerifier,
    ) -> Self {
        Self {
            extraction_client,
            corpus,
            verifier,
        }
    }

    #[tracing::instrument(
        skip(self, image),
        fields(
            filename = %prescription.filename,
            size_bytes = prescription.size_bytes
        )
    )]
    pub async fn process(
        &self,
        image: &[u8],
        prescription: &PrescriptionImage,
    ) -> Vec<VerifiedMedicine> {
        let raw = match self.extraction_client.extract(image, prescription).await {
            Ok(text) => text,
            Err(error) => {
                tracing::warn!(
                    error = %error,
                    "Extraction call failed, degrading to fallback candidate"
                );
                EXTRACTION_FAILURE_SENTINEL.to_string()
            }
        };

        let candidates = parse_candidates(&raw);
        tracing::debug!(candidate_count = candidates.len(), "Parsed extraction output");

        self.verifier.verify(candidates, &self.corpus)
    }
}
