use crate::domain::{Candidate, ReferenceCorpus, VerificationStatus, VerifiedMedicine};

use super::similarity::weighted_ratio;

pub const DEFAULT_THRESHOLD: f64 = 80.0;

/// Classifies candidates against the reference corpus. Pure: no state is
/// retained between candidates or calls.
pub struct MatchVerifier {
    threshold: f64,
}

impl MatchVerifier {
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Order-preserving: the output has exactly one entry per candidate.
    pub fn verify(
        &self,
        candidates: Vec<Candidate>,
        corpus: &ReferenceCorpus,
    ) -> Vec<VerifiedMedicine> {
        candidates
            .into_iter()
            .map(|candidate| self.classify(candidate, corpus))
            .collect()
    }

    fn classify(&self, candidate: Candidate, corpus: &ReferenceCorpus) -> VerifiedMedicine {
        if let Some(status) = candidate.status {
            tracing::debug!(
                name = %candidate.name,
                status = ?status,
                "Candidate status preset by parser, skipping similarity scoring"
            );
            return VerifiedMedicine {
                name: candidate.name,
                dosage: candidate.dosage,
                status,
            };
        }

        if candidate.name.is_empty() {
            return VerifiedMedicine {
                name: candidate.name,
                dosage: candidate.dosage,
                status: VerificationStatus::NotVerified,
            };
        }

        let status = match best_match(&candidate.name, corpus.names()) {
            Some(best) if best.score >= self.threshold => {
                tracing::debug!(
                    name = %candidate.name,
                    matched_reference = %corpus.names()[best.index],
                    score = best.score,
                    "Candidate verified against reference corpus"
                );
                VerificationStatus::Verified
            }
            Some(best) => {
                tracing::debug!(
                    name = %candidate.name,
                    closest_reference = %corpus.names()[best.index],
                    score = best.score,
                    threshold = self.threshold,
                    "Best reference match below threshold"
                );
                VerificationStatus::NotVerified
            }
            None => VerificationStatus::NotVerified,
        };

        VerifiedMedicine {
            name: candidate.name,
            dosage: candidate.dosage,
            status,
        }
    }
}

impl Default for MatchVerifier {
    fn default() -> Self {
        Self::new(DEFAULT_THRESHOLD)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BestMatch {
    pub index: usize,
    pub score: f64,
}

/// Highest-scoring reference entry for `name`; on ties the first maximum in
/// corpus order wins (strict `>` never displaces an earlier equal score).
pub fn best_match(name: &str, references: &[String]) -> Option<BestMatch> {
    let mut best: Option<BestMatch> = None;
    for (index, reference) in references.iter().enumerate() {
        let score = weighted_ratio(name, reference);
        if best.as_ref().map_or(true, |b| score > b.score) {
            best = Some(BestMatch { index, score });
        }
    }
    best
}
