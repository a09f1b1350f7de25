//! # Error Taxonomy
//!
//! Structured errors for the case lifecycle engine. Every failure is
//! scoped to the single request that caused it and is returned to the
//! caller as a typed result — the engine never retries or coerces.

use thiserror::Error;

use crate::kind::CaseKind;
use crate::status::CaseStatus;

/// Errors produced by the case lifecycle engine.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CaseError {
    /// A required field on submission is missing or malformed.
    #[error("validation error: {0}")]
    Validation(String),

    /// The requested status is not in the kind's declared state set.
    #[error("status {status:?} is not valid for kind {kind}")]
    InvalidStatus {
        /// The case's kind.
        kind: CaseKind,
        /// The status string that was requested.
        status: String,
    },

    /// The current status does not permit the requested transition.
    #[error("illegal transition from {from} to {to}: {reason}")]
    IllegalTransition {
        /// Current status name.
        from: String,
        /// Requested status name.
        to: String,
        /// Reason the transition was rejected.
        reason: String,
    },

    /// A status-conditional required field is absent.
    #[error("field {field:?} is required when moving to {status}")]
    MissingRequiredField {
        /// The status being transitioned to.
        status: CaseStatus,
        /// Name of the missing field.
        field: &'static str,
    },

    /// No verified actor accompanies the request.
    #[error("no verified actor present")]
    Unauthenticated,

    /// The actor lacks the relationship or role the operation needs.
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// The referenced case does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// A persistence failure, passed through uninterpreted.
    #[error("infrastructure error: {0}")]
    Infrastructure(String),
}
