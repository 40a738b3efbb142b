use std::sync::Arc;

use crate::application::ports::ExtractionClient;
use crate::application::services::VerificationService;

pub struct AppState<E>
where
    E: ExtractionClient,
{
    pub verification_service: Arc<VerificationService<E>>,
}

impl<E> Clone for AppState<E>
where
    E: ExtractionClient,
{
    fn clone(&self) -> Self {
        Self {
            verification_service: Arc::clone(&self.verification_service),
        }
    }
}
