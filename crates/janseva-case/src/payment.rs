//! # Payment Sub-Workflow
//!
//! A one-shot payment confirmation attached to land-revenue cases. The
//! state here is deliberately small: an amount fixed at creation from the
//! fee schedule, and a `Pending → Paid` transition that can happen
//! exactly once. Who may confirm (owner or administrator) is decided by
//! [`crate::access`]; this module owns only the state rules.

use serde::{Deserialize, Serialize};

use janseva_core::Timestamp;

use crate::error::CaseError;

/// The payment status attached to a land-revenue case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentStatus {
    /// No fee applies; nothing to confirm.
    NotRequired,
    /// A fee is due and unconfirmed.
    Pending,
    /// The fee has been confirmed. Terminal.
    Paid,
}

impl PaymentStatus {
    /// The canonical string name of this status.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotRequired => "NotRequired",
            Self::Pending => "Pending",
            Self::Paid => "Paid",
        }
    }
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Payment state attached 1:1 to a land-revenue case.
///
/// ## Invariants
///
/// - `status` starts at `NotRequired` iff `amount_due == 0`, else
///   `Pending`.
/// - `Paid` is reachable exactly once, only from `Pending`.
/// - `transaction_reference` and `paid_at` are set once, on confirmation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentState {
    /// Fee amount in whole rupees, fixed at creation.
    pub amount_due: u64,
    /// Current payment status.
    pub status: PaymentStatus,
    /// Reference of the confirming transaction.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_reference: Option<String>,
    /// When the payment was confirmed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paid_at: Option<Timestamp>,
}

impl PaymentState {
    /// Initialize payment state from the service type's fee.
    pub fn initialize(amount_due: u64) -> Self {
        let status = if amount_due == 0 {
            PaymentStatus::NotRequired
        } else {
            PaymentStatus::Pending
        };
        Self {
            amount_due,
            status,
            transaction_reference: None,
            paid_at: None,
        }
    }

    /// Confirm the payment.
    ///
    /// A second confirmation attempt must fail rather than silently
    /// succeed — callers must not double-count payment.
    ///
    /// # Errors
    ///
    /// Returns [`CaseError::IllegalTransition`] unless the current status
    /// is `Pending`.
    pub fn confirm(
        &mut self,
        transaction_reference: impl Into<String>,
        now: Timestamp,
    ) -> Result<(), CaseError> {
        if self.status != PaymentStatus::Pending {
            return Err(CaseError::IllegalTransition {
                from: self.status.as_str().to_string(),
                to: PaymentStatus::Paid.as_str().to_string(),
                reason: "payment can only be confirmed while Pending".to_string(),
            });
        }
        self.status = PaymentStatus::Paid;
        self.transaction_reference = Some(transaction_reference.into());
        self.paid_at = Some(now);
        Ok(())
    }
}
