mod candidate_parser;
mod match_verifier;
mod similarity;
mod verification_service;

pub use candidate_parser::parse_candidates;
pub use match_verifier::{best_match, BestMatch, MatchVerifier, DEFAULT_THRESHOLD};
pub use similarity::weighted_ratio;
pub use verification_service::{VerificationService, EXTRACTION_FAILURE_SENTINEL};
