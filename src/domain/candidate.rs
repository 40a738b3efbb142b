use super::verification::VerificationStatus;

/// A parsed, not-yet-verified medicine name/dosage pair.
///
/// `status` is `None` for candidates produced from well-formed model output.
/// The parser's fallback path sets `Some(NotVerified)`, which downstream
/// verification must emit untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub name: String,
    pub dosage: String,
    pub status: Option<VerificationStatus>,
}

impl Candidate {
    pub fn new(name: String, dosage: String) -> Self {
        Self {
            name,
            dosage,
            status: None,
        }
    }

    /// Single-candidate fallback for unparseable model output. Pre-marked so
    /// it bypasses similarity scoring.
    pub fn unverified_fallback(name: String) -> Self {
        Self {
            name,
            dosage: String::new(),
            status: Some(VerificationStatus::NotVerified),
        }
    }
}
