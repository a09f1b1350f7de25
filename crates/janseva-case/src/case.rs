//! # The Case Record
//!
//! The central entity tracked through the lifecycle. The engine treats
//! the kind-specific payload as an opaque JSON object — field shaping is
//! the transport layer's concern.

use serde::{Deserialize, Serialize};

use janseva_core::{CaseId, Timestamp, UserId};

use crate::kind::CaseKind;
use crate::payment::PaymentState;
use crate::status::CaseStatus;

/// Kind-specific outcome fields recorded by an administrator transition.
///
/// Which of these are populated depends on the kind and the target
/// status: a rejection carries a reason, a disaster resolution carries a
/// response text, a dispute scheduling carries a hearing date.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReviewOutcome {
    /// Why the case was rejected. Required on rejection.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rejection_reason: Option<String>,
    /// Optional approval comment.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    /// Response text recorded on resolution.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_text: Option<String>,
    /// Scheduled hearing date for dispute cases.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hearing_date: Option<Timestamp>,
    /// Team or mediator assigned to handle the case.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<String>,
}

/// A submitted case tracked through a status lifecycle.
///
/// ## Invariants
///
/// - `status` is always a member of the kind's declared state set, and
///   every case is created in `Pending`.
/// - `reference_number`, once assigned, never changes.
/// - `resolved_at` is set exactly once, when `status` first reaches a
///   terminal status for the kind.
/// - `reviewed_by` is `None` until the first administrator transition.
/// - `owner` never changes after creation.
/// - `payment` is present iff `kind` is [`CaseKind::LandRevenue`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Case {
    /// Opaque identifier, assigned at creation.
    pub id: CaseId,
    /// The domain category, fixed at creation.
    pub kind: CaseKind,
    /// The submitting user. Immutable.
    pub owner: UserId,
    /// Current lifecycle status.
    pub status: CaseStatus,
    /// Human-readable reference number, assigned exactly once at
    /// creation.
    pub reference_number: Option<String>,
    /// When the case was submitted.
    pub created_at: Timestamp,
    /// When the case reached a terminal status, if it has.
    pub resolved_at: Option<Timestamp>,
    /// The administrator who performed the most recent transition.
    pub reviewed_by: Option<UserId>,
    /// Outcome fields recorded by administrator transitions.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub review: Option<ReviewOutcome>,
    /// Kind-specific fields, opaque to the engine.
    pub payload: serde_json::Value,
    /// Payment sub-workflow state, land-revenue cases only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment: Option<PaymentState>,
}

impl Case {
    /// Construct a freshly submitted case in the `Pending` status.
    ///
    /// This is the only constructor; it pins the creation invariants —
    /// initial status, null review fields, null resolution timestamp.
    pub fn submitted(
        id: CaseId,
        kind: CaseKind,
        owner: UserId,
        payload: serde_json::Value,
        reference_number: String,
        payment: Option<PaymentState>,
        created_at: Timestamp,
    ) -> Self {
        Self {
            id,
            kind,
            owner,
            status: CaseStatus::Pending,
            reference_number: Some(reference_number),
            created_at,
            resolved_at: None,
            reviewed_by: None,
            review: None,
            payload,
            payment,
        }
    }

    /// A payload field as a trimmed string, if present and a string.
    pub fn payload_str(&self, field: &str) -> Option<&str> {
        self.payload
            .get(field)
            .and_then(|v| v.as_str())
            .map(str::trim)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use serde_json::json;

    fn created_at() -> Timestamp {
        Timestamp::from_utc(Utc.with_ymd_and_hms(2026, 2, 10, 9, 30, 0).unwrap())
    }

    fn certificate_case() -> Case {
        Case::submitted(
            CaseId::new(),
            CaseKind::Certificate,
            UserId::new(11),
            json!({"applicant_name": "Asha Rao", "certificate_type": "Residence"}),
            "CERT-20260210-0042".to_string(),
            None,
            created_at(),
        )
    }

    #[test]
    fn submitted_case_is_pending_with_null_review_fields() {
        let case = certificate_case();
        assert_eq!(case.status, CaseStatus::Pending);
        assert!(case.reference_number.is_some());
        assert!(case.resolved_at.is_none());
        assert!(case.reviewed_by.is_none());
        assert!(case.review.is_none());
    }

    #[test]
    fn payload_str_trims_and_filters_non_strings() {
        let case = Case::submitted(
            CaseId::new(),
            CaseKind::ServiceRequest,
            UserId::new(3),
            json!({"requester_name": "  Ravi Kumar ", "count": 7}),
            "SR-STR-20260210-0001".to_string(),
            None,
            created_at(),
        );
        assert_eq!(case.payload_str("requester_name"), Some("Ravi Kumar"));
        assert_eq!(case.payload_str("count"), None);
        assert_eq!(case.payload_str("missing"), None);
    }

    #[test]
    fn case_serde_roundtrip() {
        let case = certificate_case();
        let json_str = serde_json::to_string(&case).unwrap();
        let back: Case = serde_json::from_str(&json_str).unwrap();
        assert_eq!(back, case);
    }

    #[test]
    fn absent_payment_is_omitted_from_json() {
        let case = certificate_case();
        let json_str = serde_json::to_string(&case).unwrap();
        assert!(!json_str.contains("payment"));
    }
}
