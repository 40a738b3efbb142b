mod candidate;
mod prescription;
mod reference_corpus;
mod verification;

pub use candidate::Candidate;
pub use prescription::{ImageFormat, PrescriptionImage};
pub use reference_corpus::ReferenceCorpus;
pub use verification::{VerificationStatus, VerifiedMedicine};
