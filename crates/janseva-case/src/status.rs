//! # Case Statuses
//!
//! The vocabulary of lifecycle statuses across all kinds. Which statuses
//! a given kind actually uses, and which of those are terminal, is policy
//! data in [`crate::policy`] — this module only defines the names.

use serde::{Deserialize, Serialize};

/// A lifecycle status.
///
/// Every kind starts at [`Pending`](CaseStatus::Pending). The remaining
/// variants are the union of the per-kind state sets; membership is
/// checked per kind by the policy table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CaseStatus {
    /// Awaiting first administrative action. Initial status for all kinds.
    Pending,
    /// A land-revenue case taken up for processing.
    InProcess,
    /// A dispute under initial review.
    InReview,
    /// A dispute hearing has been scheduled.
    Scheduled,
    /// Active handling is underway.
    InProgress,
    /// A disaster situation being monitored after initial response.
    Monitoring,
    /// Application granted. Terminal.
    Approved,
    /// Application or case rejected. Terminal.
    Rejected,
    /// Case resolved. Terminal.
    Resolved,
}

impl CaseStatus {
    /// The canonical string name of this status.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::InProcess => "InProcess",
            Self::InReview => "InReview",
            Self::Scheduled => "Scheduled",
            Self::InProgress => "InProgress",
            Self::Monitoring => "Monitoring",
            Self::Approved => "Approved",
            Self::Rejected => "Rejected",
            Self::Resolved => "Resolved",
        }
    }

    /// Parse a status from its canonical string name.
    ///
    /// Returns `None` for unknown names; the caller maps that to
    /// [`CaseError::InvalidStatus`](crate::CaseError::InvalidStatus) with
    /// the kind attached.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Pending" => Some(Self::Pending),
            "InProcess" => Some(Self::InProcess),
            "InReview" => Some(Self::InReview),
            "Scheduled" => Some(Self::Scheduled),
            "InProgress" => Some(Self::InProgress),
            "Monitoring" => Some(Self::Monitoring),
            "Approved" => Some(Self::Approved),
            "Rejected" => Some(Self::Rejected),
            "Resolved" => Some(Self::Resolved),
            _ => None,
        }
    }
}

impl std::fmt::Display for CaseStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: &[CaseStatus] = &[
        CaseStatus::Pending,
        CaseStatus::InProcess,
        CaseStatus::InReview,
        CaseStatus::Scheduled,
        CaseStatus::InProgress,
        CaseStatus::Monitoring,
        CaseStatus::Approved,
        CaseStatus::Rejected,
        CaseStatus::Resolved,
    ];

    #[test]
    fn parse_roundtrips_every_status() {
        for status in ALL {
            assert_eq!(CaseStatus::parse(status.as_str()), Some(*status));
        }
    }

    #[test]
    fn parse_rejects_unknown_and_wrong_case() {
        assert_eq!(CaseStatus::parse("Frobnicated"), None);
        assert_eq!(CaseStatus::parse("pending"), None);
        assert_eq!(CaseStatus::parse(""), None);
    }

    #[test]
    fn display_matches_as_str() {
        for status in ALL {
            assert_eq!(format!("{status}"), status.as_str());
        }
    }
}
