//! # Case Kinds
//!
//! The fixed set of domain categories a case can belong to. The kind
//! determines the case's allowed statuses, required fields, and reference
//! number shape — all looked up through [`crate::policy`].

use serde::{Deserialize, Serialize};

/// The domain category of a case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CaseKind {
    /// Certificate applications (birth, residence, income, and similar).
    Certificate,
    /// Land-revenue service requests; the only kind carrying a payment
    /// sub-workflow.
    LandRevenue,
    /// Dispute-resolution cases progressing through review and hearing.
    DisputeResolution,
    /// Disaster incident reports handled by response teams.
    DisasterManagement,
    /// Applications to welfare schemes.
    SchemeApplication,
    /// Generic service requests.
    ServiceRequest,
}

impl CaseKind {
    /// All kinds as a slice.
    pub fn all() -> &'static [CaseKind] {
        &[
            Self::Certificate,
            Self::LandRevenue,
            Self::DisputeResolution,
            Self::DisasterManagement,
            Self::SchemeApplication,
            Self::ServiceRequest,
        ]
    }

    /// The canonical string name of this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Certificate => "Certificate",
            Self::LandRevenue => "LandRevenue",
            Self::DisputeResolution => "DisputeResolution",
            Self::DisasterManagement => "DisasterManagement",
            Self::SchemeApplication => "SchemeApplication",
            Self::ServiceRequest => "ServiceRequest",
        }
    }
}

impl std::fmt::Display for CaseKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_returns_six_kinds() {
        assert_eq!(CaseKind::all().len(), 6);
    }

    #[test]
    fn as_str_is_nonempty_and_unique() {
        let names: Vec<&str> = CaseKind::all().iter().map(|k| k.as_str()).collect();
        for name in &names {
            assert!(!name.is_empty());
        }
        let mut deduped = names.clone();
        deduped.sort_unstable();
        deduped.dedup();
        assert_eq!(deduped.len(), names.len());
    }

    #[test]
    fn display_matches_as_str() {
        for kind in CaseKind::all() {
            assert_eq!(format!("{kind}"), kind.as_str());
        }
    }
}
