//! # Case State Machine
//!
//! The single source of truth for which status transitions are legal,
//! per kind. [`transition`] is a pure function from the current case and
//! the requested change to either an updated case or a typed rejection —
//! it touches no storage and reads no ambient clock.

use janseva_core::{Timestamp, UserId};

use crate::case::{Case, ReviewOutcome};
use crate::error::CaseError;
use crate::policy::{KindPolicy, TransitionRule};
use crate::status::CaseStatus;

/// Kind-specific extra fields accompanying a transition request.
#[derive(Debug, Clone, Default)]
pub struct TransitionInput {
    /// Reason for rejection. Required when the target status is
    /// `Rejected`.
    pub rejection_reason: Option<String>,
    /// Optional approval comment.
    pub comment: Option<String>,
    /// Response text. Required when resolving a disaster report.
    pub response_text: Option<String>,
    /// Hearing date for dispute scheduling.
    pub hearing_date: Option<Timestamp>,
    /// Assigned team or mediator.
    pub assigned_to: Option<String>,
}

/// Validate and apply a status transition.
///
/// On success returns the updated case with `status` set, `reviewed_by`
/// recorded, and `resolved_at` stamped when the target status is terminal
/// for the kind. Persisting the result is the caller's responsibility.
///
/// # Errors
///
/// - [`CaseError::InvalidStatus`] when `requested` is outside the kind's
///   declared state set.
/// - [`CaseError::IllegalTransition`] when the kind's rule on the current
///   status is not met, or the case is already terminal.
/// - [`CaseError::MissingRequiredField`] when a status-conditional field
///   (rejection reason, response text) is absent or blank.
pub fn transition(
    case: &Case,
    requested: CaseStatus,
    reviewer: UserId,
    input: &TransitionInput,
    now: Timestamp,
) -> Result<Case, CaseError> {
    let policy = KindPolicy::for_kind(case.kind);

    if !policy.allows(requested) {
        return Err(CaseError::InvalidStatus {
            kind: case.kind,
            status: requested.as_str().to_string(),
        });
    }

    if policy.is_terminal(case.status) {
        return Err(CaseError::IllegalTransition {
            from: case.status.as_str().to_string(),
            to: requested.as_str().to_string(),
            reason: format!("case is already terminal at {}", case.status),
        });
    }

    check_rule(policy, case.status, requested)?;

    if let Some(field) = policy.required_field(requested) {
        let present = field.extract(input).is_some_and(|v| !v.trim().is_empty());
        if !present {
            return Err(CaseError::MissingRequiredField {
                status: requested,
                field: field.name(),
            });
        }
    }

    let mut updated = case.clone();
    updated.status = requested;
    updated.reviewed_by = Some(reviewer);
    updated.review = Some(merge_outcome(case.review.as_ref(), input));
    if policy.is_terminal(requested) {
        updated.resolved_at = Some(now);
    }
    Ok(updated)
}

/// Apply the kind's current-status strictness rule.
fn check_rule(
    policy: &KindPolicy,
    current: CaseStatus,
    requested: CaseStatus,
) -> Result<(), CaseError> {
    let illegal = |reason: String| CaseError::IllegalTransition {
        from: current.as_str().to_string(),
        to: requested.as_str().to_string(),
        reason,
    };

    match policy.rule {
        TransitionRule::FromPendingOnly => {
            if current != CaseStatus::Pending {
                return Err(illegal(format!(
                    "{} cases can only be reviewed while Pending",
                    policy.kind
                )));
            }
            Ok(())
        }
        TransitionRule::AnyNonTerminal => Ok(()),
        TransitionRule::PendingExceptRejection => match requested {
            CaseStatus::Rejected => {
                if current == CaseStatus::Pending || current == CaseStatus::InProcess {
                    Ok(())
                } else {
                    Err(illegal("rejection requires Pending or InProcess".to_string()))
                }
            }
            CaseStatus::Pending => {
                Err(illegal("cases cannot return to Pending".to_string()))
            }
            _ => {
                if current == CaseStatus::Pending {
                    Ok(())
                } else {
                    Err(illegal(format!("{requested} requires a Pending case")))
                }
            }
        },
    }
}

/// Fold transition input into the case's review record, keeping earlier
/// outcome fields that this transition does not touch.
fn merge_outcome(existing: Option<&ReviewOutcome>, input: &TransitionInput) -> ReviewOutcome {
    let mut outcome = existing.cloned().unwrap_or_default();
    if input.rejection_reason.is_some() {
        outcome.rejection_reason = input.rejection_reason.clone();
    }
    if input.comment.is_some() {
        outcome.comment = input.comment.clone();
    }
    if input.response_text.is_some() {
        outcome.response_text = input.response_text.clone();
    }
    if input.hearing_date.is_some() {
        outcome.hearing_date = input.hearing_date;
    }
    if input.assigned_to.is_some() {
        outcome.assigned_to = input.assigned_to.clone();
    }
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kind::CaseKind;
    use chrono::{TimeZone, Utc};
    use janseva_core::CaseId;
    use serde_json::json;

    fn ts(h: u32) -> Timestamp {
        Timestamp::from_utc(Utc.with_ymd_and_hms(2026, 2, 10, h, 0, 0).unwrap())
    }

    fn admin() -> UserId {
        UserId::new(900)
    }

    fn case_of(kind: CaseKind) -> Case {
        Case::submitted(
            CaseId::new(),
            kind,
            UserId::new(5),
            json!({"applicant_name": "Asha Rao"}),
            "REF-20260210-0001".to_string(),
            None,
            ts(9),
        )
    }

    fn reject_input() -> TransitionInput {
        TransitionInput {
            rejection_reason: Some("Incomplete documents".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn approve_pending_certificate() {
        let case = case_of(CaseKind::Certificate);
        let updated = transition(
            &case,
            CaseStatus::Approved,
            admin(),
            &TransitionInput {
                comment: Some("Verified against register".to_string()),
                ..Default::default()
            },
            ts(10),
        )
        .unwrap();
        assert_eq!(updated.status, CaseStatus::Approved);
        assert_eq!(updated.reviewed_by, Some(admin()));
        assert_eq!(updated.resolved_at, Some(ts(10)));
        assert_eq!(
            updated.review.unwrap().comment.as_deref(),
            Some("Verified against register")
        );
        // Input case untouched.
        assert_eq!(case.status, CaseStatus::Pending);
    }

    #[test]
    fn reject_without_reason_fails() {
        let case = case_of(CaseKind::Certificate);
        let err = transition(
            &case,
            CaseStatus::Rejected,
            admin(),
            &TransitionInput::default(),
            ts(10),
        )
        .unwrap_err();
        assert_eq!(
            err,
            CaseError::MissingRequiredField {
                status: CaseStatus::Rejected,
                field: "rejection_reason",
            }
        );
    }

    #[test]
    fn reject_with_blank_reason_fails() {
        let case = case_of(CaseKind::SchemeApplication);
        let err = transition(
            &case,
            CaseStatus::Rejected,
            admin(),
            &TransitionInput {
                rejection_reason: Some("   ".to_string()),
                ..Default::default()
            },
            ts(10),
        )
        .unwrap_err();
        assert!(matches!(err, CaseError::MissingRequiredField { .. }));
    }

    #[test]
    fn terminal_case_rejects_further_transitions() {
        let case = case_of(CaseKind::Certificate);
        let approved =
            transition(&case, CaseStatus::Approved, admin(), &TransitionInput::default(), ts(10))
                .unwrap();
        let err = transition(
            &approved,
            CaseStatus::Approved,
            admin(),
            &TransitionInput::default(),
            ts(11),
        )
        .unwrap_err();
        assert!(matches!(err, CaseError::IllegalTransition { .. }));
        // resolved_at was stamped once and survives the failed attempt.
        assert_eq!(approved.resolved_at, Some(ts(10)));
    }

    #[test]
    fn unknown_status_for_kind_fails_invalid_status() {
        let case = case_of(CaseKind::Certificate);
        let err = transition(
            &case,
            CaseStatus::Monitoring,
            admin(),
            &TransitionInput::default(),
            ts(10),
        )
        .unwrap_err();
        assert_eq!(
            err,
            CaseError::InvalidStatus {
                kind: CaseKind::Certificate,
                status: "Monitoring".to_string(),
            }
        );
    }

    // ── Land revenue asymmetry ───────────────────────────────────────

    #[test]
    fn land_revenue_in_process_from_pending() {
        let case = case_of(CaseKind::LandRevenue);
        let updated = transition(
            &case,
            CaseStatus::InProcess,
            admin(),
            &TransitionInput::default(),
            ts(10),
        )
        .unwrap();
        assert_eq!(updated.status, CaseStatus::InProcess);
        assert!(updated.resolved_at.is_none());
    }

    #[test]
    fn land_revenue_approval_requires_pending() {
        let case = case_of(CaseKind::LandRevenue);
        let in_process = transition(
            &case,
            CaseStatus::InProcess,
            admin(),
            &TransitionInput::default(),
            ts(10),
        )
        .unwrap();
        let err = transition(
            &in_process,
            CaseStatus::Approved,
            admin(),
            &TransitionInput::default(),
            ts(11),
        )
        .unwrap_err();
        assert!(matches!(err, CaseError::IllegalTransition { .. }));
    }

    #[test]
    fn land_revenue_rejection_allowed_from_in_process() {
        let case = case_of(CaseKind::LandRevenue);
        let in_process = transition(
            &case,
            CaseStatus::InProcess,
            admin(),
            &TransitionInput::default(),
            ts(10),
        )
        .unwrap();
        let rejected =
            transition(&in_process, CaseStatus::Rejected, admin(), &reject_input(), ts(11))
                .unwrap();
        assert_eq!(rejected.status, CaseStatus::Rejected);
        assert_eq!(rejected.resolved_at, Some(ts(11)));
    }

    #[test]
    fn land_revenue_cannot_return_to_pending() {
        let case = case_of(CaseKind::LandRevenue);
        let in_process = transition(
            &case,
            CaseStatus::InProcess,
            admin(),
            &TransitionInput::default(),
            ts(10),
        )
        .unwrap();
        let err = transition(
            &in_process,
            CaseStatus::Pending,
            admin(),
            &TransitionInput::default(),
            ts(11),
        )
        .unwrap_err();
        assert!(matches!(err, CaseError::IllegalTransition { .. }));
    }

    // ── Membership-only kinds ────────────────────────────────────────

    #[test]
    fn dispute_accepts_forward_statuses_without_ordering() {
        let case = case_of(CaseKind::DisputeResolution);
        // Jumping straight to InProgress is accepted; the portal only
        // forbids unknown statuses for this kind.
        let updated = transition(
            &case,
            CaseStatus::InProgress,
            admin(),
            &TransitionInput {
                assigned_to: Some("Mediation Panel 2".to_string()),
                ..Default::default()
            },
            ts(10),
        )
        .unwrap();
        assert_eq!(updated.status, CaseStatus::InProgress);
        assert!(updated.resolved_at.is_none());
    }

    #[test]
    fn dispute_scheduling_records_hearing_date() {
        let case = case_of(CaseKind::DisputeResolution);
        let hearing = ts(14);
        let updated = transition(
            &case,
            CaseStatus::Scheduled,
            admin(),
            &TransitionInput {
                hearing_date: Some(hearing),
                ..Default::default()
            },
            ts(10),
        )
        .unwrap();
        assert_eq!(updated.review.unwrap().hearing_date, Some(hearing));
    }

    #[test]
    fn disaster_resolution_requires_response_text() {
        let case = case_of(CaseKind::DisasterManagement);
        let err = transition(
            &case,
            CaseStatus::Resolved,
            admin(),
            &TransitionInput::default(),
            ts(10),
        )
        .unwrap_err();
        assert_eq!(
            err,
            CaseError::MissingRequiredField {
                status: CaseStatus::Resolved,
                field: "response_text",
            }
        );

        let resolved = transition(
            &case,
            CaseStatus::Resolved,
            admin(),
            &TransitionInput {
                response_text: Some("Relief camp established".to_string()),
                ..Default::default()
            },
            ts(11),
        )
        .unwrap();
        assert_eq!(resolved.status, CaseStatus::Resolved);
        assert_eq!(resolved.resolved_at, Some(ts(11)));
    }

    #[test]
    fn disaster_terminal_still_blocks_membership_kinds() {
        let case = case_of(CaseKind::DisasterManagement);
        let resolved = transition(
            &case,
            CaseStatus::Resolved,
            admin(),
            &TransitionInput {
                response_text: Some("Handled".to_string()),
                ..Default::default()
            },
            ts(10),
        )
        .unwrap();
        let err = transition(
            &resolved,
            CaseStatus::Monitoring,
            admin(),
            &TransitionInput::default(),
            ts(11),
        )
        .unwrap_err();
        assert!(matches!(err, CaseError::IllegalTransition { .. }));
    }

    #[test]
    fn service_request_pending_to_resolved() {
        let case = case_of(CaseKind::ServiceRequest);
        let resolved = transition(
            &case,
            CaseStatus::Resolved,
            admin(),
            &TransitionInput::default(),
            ts(10),
        )
        .unwrap();
        assert_eq!(resolved.status, CaseStatus::Resolved);
    }

    #[test]
    fn service_request_rejects_statuses_outside_its_set() {
        let case = case_of(CaseKind::ServiceRequest);
        let err = transition(
            &case,
            CaseStatus::Approved,
            admin(),
            &TransitionInput::default(),
            ts(10),
        )
        .unwrap_err();
        assert!(matches!(err, CaseError::InvalidStatus { .. }));
    }

    #[test]
    fn later_transitions_keep_earlier_outcome_fields() {
        let case = case_of(CaseKind::DisputeResolution);
        let scheduled = transition(
            &case,
            CaseStatus::Scheduled,
            admin(),
            &TransitionInput {
                hearing_date: Some(ts(14)),
                assigned_to: Some("Mediator A".to_string()),
                ..Default::default()
            },
            ts(10),
        )
        .unwrap();
        let resolved =
            transition(&scheduled, CaseStatus::Resolved, admin(), &TransitionInput::default(), ts(15))
                .unwrap();
        let review = resolved.review.unwrap();
        assert_eq!(review.hearing_date, Some(ts(14)));
        assert_eq!(review.assigned_to.as_deref(), Some("Mediator A"));
    }
}
