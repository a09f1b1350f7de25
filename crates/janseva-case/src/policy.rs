//! # Per-Kind Policy Table
//!
//! One configuration entry per [`CaseKind`]: the declared state set,
//! terminal statuses, transition strictness, status-conditional required
//! fields, mandatory submission fields, and reference-number shape.
//!
//! The portal's five lifecycles differ in small, deliberate ways —
//! certificates demand a strictly Pending current status while disaster
//! reports only check set membership, land revenue allows rejection from
//! its InProcess detour, and scheme references carry no kind prefix.
//! Those differences are recorded here as data, not as per-kind code.

use crate::kind::CaseKind;
use crate::machine::TransitionInput;
use crate::status::CaseStatus;

/// How strictly a kind constrains the current status during a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionRule {
    /// The current status must be `Pending`. Certificates and scheme
    /// applications.
    FromPendingOnly,
    /// Any status in the declared set may be requested from any
    /// non-terminal current status. Disputes, disaster reports, and
    /// service requests check membership only.
    AnyNonTerminal,
    /// Land revenue: approval and the `InProcess` detour require a
    /// `Pending` current status, rejection is additionally allowed from
    /// `InProcess`, and nothing re-enters `Pending`.
    PendingExceptRejection,
}

/// A status-conditional field that must accompany a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequiredField {
    /// A non-empty reason must accompany rejection.
    RejectionReason,
    /// A non-empty response text must accompany resolution.
    ResponseText,
}

impl RequiredField {
    /// The field name reported in error messages.
    pub fn name(&self) -> &'static str {
        match self {
            Self::RejectionReason => "rejection_reason",
            Self::ResponseText => "response_text",
        }
    }

    /// Extract this field's value from a transition input.
    pub fn extract<'a>(&self, input: &'a TransitionInput) -> Option<&'a str> {
        match self {
            Self::RejectionReason => input.rejection_reason.as_deref(),
            Self::ResponseText => input.response_text.as_deref(),
        }
    }
}

/// The complete lifecycle policy for one case kind.
#[derive(Debug, Clone, Copy)]
pub struct KindPolicy {
    /// The kind this policy governs.
    pub kind: CaseKind,
    /// The declared state set. Requested statuses outside this set fail
    /// with `InvalidStatus`.
    pub allowed: &'static [CaseStatus],
    /// Statuses from which no further transition is permitted.
    pub terminal: &'static [CaseStatus],
    /// Current-status strictness applied during transitions.
    pub rule: TransitionRule,
    /// Fields that must be present when transitioning to a given status.
    pub required_on: &'static [(CaseStatus, RequiredField)],
    /// Payload fields that must be present and non-empty at submission.
    pub submit_fields: &'static [&'static str],
    /// The payload field acting as the reference-number discriminator
    /// (disaster type, dispute type, service type, scheme name).
    pub discriminator_field: Option<&'static str>,
    /// Fixed reference-number prefix. Scheme applications carry none —
    /// an inconsistency inherited from the portal, kept deliberately.
    pub reference_prefix: Option<&'static str>,
}

const POLICIES: &[KindPolicy] = &[
    KindPolicy {
        kind: CaseKind::Certificate,
        allowed: &[CaseStatus::Pending, CaseStatus::Approved, CaseStatus::Rejected],
        terminal: &[CaseStatus::Approved, CaseStatus::Rejected],
        rule: TransitionRule::FromPendingOnly,
        required_on: &[(CaseStatus::Rejected, RequiredField::RejectionReason)],
        submit_fields: &["applicant_name", "certificate_type"],
        discriminator_field: None,
        reference_prefix: Some("CERT"),
    },
    KindPolicy {
        kind: CaseKind::LandRevenue,
        allowed: &[
            CaseStatus::Pending,
            CaseStatus::InProcess,
            CaseStatus::Approved,
            CaseStatus::Rejected,
        ],
        terminal: &[CaseStatus::Approved, CaseStatus::Rejected],
        rule: TransitionRule::PendingExceptRejection,
        required_on: &[(CaseStatus::Rejected, RequiredField::RejectionReason)],
        submit_fields: &["applicant_name", "service_type"],
        discriminator_field: Some("service_type"),
        reference_prefix: Some("LR"),
    },
    KindPolicy {
        kind: CaseKind::DisputeResolution,
        allowed: &[
            CaseStatus::Pending,
            CaseStatus::InReview,
            CaseStatus::Scheduled,
            CaseStatus::InProgress,
            CaseStatus::Resolved,
            CaseStatus::Rejected,
        ],
        terminal: &[CaseStatus::Resolved, CaseStatus::Rejected],
        rule: TransitionRule::AnyNonTerminal,
        required_on: &[(CaseStatus::Rejected, RequiredField::RejectionReason)],
        submit_fields: &["complainant_name", "dispute_type"],
        discriminator_field: Some("dispute_type"),
        reference_prefix: Some("DR"),
    },
    KindPolicy {
        kind: CaseKind::DisasterManagement,
        allowed: &[
            CaseStatus::Pending,
            CaseStatus::InProgress,
            CaseStatus::Monitoring,
            CaseStatus::Resolved,
            CaseStatus::Rejected,
        ],
        terminal: &[CaseStatus::Resolved, CaseStatus::Rejected],
        rule: TransitionRule::AnyNonTerminal,
        required_on: &[
            (CaseStatus::Rejected, RequiredField::RejectionReason),
            (CaseStatus::Resolved, RequiredField::ResponseText),
        ],
        submit_fields: &["reporter_name", "disaster_type", "location"],
        discriminator_field: Some("disaster_type"),
        reference_prefix: Some("DM"),
    },
    KindPolicy {
        kind: CaseKind::SchemeApplication,
        allowed: &[CaseStatus::Pending, CaseStatus::Approved, CaseStatus::Rejected],
        terminal: &[CaseStatus::Approved, CaseStatus::Rejected],
        rule: TransitionRule::FromPendingOnly,
        required_on: &[(CaseStatus::Rejected, RequiredField::RejectionReason)],
        submit_fields: &["applicant_name", "scheme_name"],
        discriminator_field: Some("scheme_name"),
        reference_prefix: None,
    },
    KindPolicy {
        kind: CaseKind::ServiceRequest,
        allowed: &[CaseStatus::Pending, CaseStatus::Resolved],
        terminal: &[CaseStatus::Resolved],
        rule: TransitionRule::AnyNonTerminal,
        required_on: &[],
        submit_fields: &["requester_name", "service_type", "description"],
        discriminator_field: Some("service_type"),
        reference_prefix: Some("SR"),
    },
];

impl KindPolicy {
    /// The policy entry for a kind.
    pub fn for_kind(kind: CaseKind) -> &'static KindPolicy {
        // Table order matches the variant order; the match keeps the
        // lookup total.
        let index = match kind {
            CaseKind::Certificate => 0,
            CaseKind::LandRevenue => 1,
            CaseKind::DisputeResolution => 2,
            CaseKind::DisasterManagement => 3,
            CaseKind::SchemeApplication => 4,
            CaseKind::ServiceRequest => 5,
        };
        &POLICIES[index]
    }

    /// Whether a status is in this kind's declared state set.
    pub fn allows(&self, status: CaseStatus) -> bool {
        self.allowed.contains(&status)
    }

    /// Whether a status is terminal for this kind.
    pub fn is_terminal(&self, status: CaseStatus) -> bool {
        self.terminal.contains(&status)
    }

    /// The field required when transitioning to `status`, if any.
    pub fn required_field(&self, status: CaseStatus) -> Option<RequiredField> {
        self.required_on
            .iter()
            .find(|(s, _)| *s == status)
            .map(|(_, f)| *f)
    }
}
