//! # Case Service
//!
//! Orchestrates the engine: validates submissions, asks the access
//! evaluator for permission, asks the state machine for transitions,
//! generates reference numbers, and persists through the [`CaseStore`].
//!
//! The service holds no case state of its own and is safe to share
//! across request-handling threads; the store's compare-and-swap update
//! keeps concurrent administrator transitions from overwriting each
//! other.

use parking_lot::Mutex;
use rand::Rng;
use serde::{Deserialize, Serialize};

use janseva_case::{
    access, machine, reference, Case, CaseError, CaseKind, CaseStatus, KindPolicy, PaymentState,
    TransitionInput,
};
use janseva_core::{Actor, CaseId, Clock};

use crate::fees::FeeSchedule;
use crate::store::{CaseStore, StoreError};

/// How many fresh random suffixes to try when the store reports a
/// reference-number collision.
const MAX_REFERENCE_ATTEMPTS: u32 = 5;

/// A submission intent: the kind and its opaque payload.
///
/// The reference-number discriminator (service type, dispute type,
/// disaster type, scheme name) is read from the payload field the kind's
/// policy names.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewCase {
    /// The domain category being submitted.
    pub kind: CaseKind,
    /// Kind-specific fields, opaque to the engine beyond the mandatory
    /// ones the policy table names.
    pub payload: serde_json::Value,
}

/// The single entry point for the portal's six verbs.
pub struct CaseService<S, C, R> {
    store: S,
    clock: C,
    rng: Mutex<R>,
    fees: FeeSchedule,
}

impl<S, C, R> CaseService<S, C, R>
where
    S: CaseStore,
    C: Clock,
    R: Rng + Send,
{
    /// A service over the given store, clock, and random source, with
    /// the built-in fee schedule.
    pub fn new(store: S, clock: C, rng: R) -> Self {
        Self::with_fee_schedule(store, clock, rng, FeeSchedule::default())
    }

    /// A service with an explicit fee schedule.
    pub fn with_fee_schedule(store: S, clock: C, rng: R, fees: FeeSchedule) -> Self {
        Self {
            store,
            clock,
            rng: Mutex::new(rng),
            fees,
        }
    }

    /// Submit a new case owned by the acting user.
    ///
    /// Validates the kind's mandatory payload fields, assigns a
    /// reference number (retrying on a store-reported collision), opens
    /// the payment workflow for land-revenue cases, and persists the
    /// case in `Pending`.
    pub fn submit(&self, actor: Option<&Actor>, new_case: NewCase) -> Result<Case, CaseError> {
        let actor = access::authenticate(actor)?;
        let policy = KindPolicy::for_kind(new_case.kind);
        validate_submission(policy, &new_case.payload)?;

        let discriminator = policy
            .discriminator_field
            .and_then(|field| payload_str(&new_case.payload, field).map(str::to_string));

        let payment = match new_case.kind {
            CaseKind::LandRevenue => {
                // The discriminator is the service type; validation above
                // guarantees it is present for this kind.
                let service_type = discriminator.as_deref().unwrap_or("");
                Some(PaymentState::initialize(self.fees.fee_for(service_type)))
            }
            _ => None,
        };

        let created_at = self.clock.now();
        for _ in 0..MAX_REFERENCE_ATTEMPTS {
            let reference_number = {
                let mut rng = self.rng.lock();
                reference::generate(
                    new_case.kind,
                    discriminator.as_deref(),
                    created_at,
                    &mut *rng,
                )?
            };
            let case = Case::submitted(
                CaseId::new(),
                new_case.kind,
                actor.user_id,
                new_case.payload.clone(),
                reference_number,
                payment.clone(),
                created_at,
            );
            match self.store.insert(case.clone()) {
                Ok(()) => {
                    tracing::info!(
                        case_id = %case.id,
                        kind = %case.kind,
                        owner = %case.owner,
                        reference = case.reference_number.as_deref().unwrap_or(""),
                        "case submitted"
                    );
                    return Ok(case);
                }
                Err(StoreError::DuplicateReference(reference)) => {
                    tracing::warn!(%reference, "reference collision, retrying");
                }
                Err(other) => return Err(other.into()),
            }
        }
        Err(CaseError::Infrastructure(
            "could not allocate a unique reference number".to_string(),
        ))
    }

    /// Read a single case with owner/administrator visibility.
    pub fn view(&self, actor: Option<&Actor>, id: CaseId) -> Result<Case, CaseError> {
        let actor = access::authenticate(actor)?;
        let case = self.load(id)?;
        if let Err(err) = access::ensure_can_view(&case, actor) {
            tracing::warn!(case_id = %id, actor = %actor.user_id, "view denied");
            return Err(err);
        }
        Ok(case)
    }

    /// The acting user's own cases, oldest first.
    pub fn list_mine(&self, actor: Option<&Actor>) -> Result<Vec<Case>, CaseError> {
        let actor = access::authenticate(actor)?;
        Ok(self.store.list_by_owner(actor.user_id)?)
    }

    /// Every case, optionally filtered by status. Administrators only.
    pub fn list_all(
        &self,
        actor: Option<&Actor>,
        status: Option<CaseStatus>,
    ) -> Result<Vec<Case>, CaseError> {
        let actor = access::authenticate(actor)?;
        access::ensure_administrator(actor)?;
        Ok(self.store.list_all(status)?)
    }

    /// Apply an administrator status transition.
    ///
    /// `requested` is the raw status string from the transport layer;
    /// unknown names fail with [`CaseError::InvalidStatus`]. The update
    /// is persisted compare-and-swap against the status the transition
    /// was computed from, so a lost race surfaces as
    /// [`CaseError::IllegalTransition`] instead of a silent overwrite.
    pub fn update_status(
        &self,
        actor: Option<&Actor>,
        id: CaseId,
        requested: &str,
        input: &TransitionInput,
    ) -> Result<Case, CaseError> {
        let actor = access::authenticate(actor)?;
        if let Err(err) = access::ensure_administrator(actor) {
            tracing::warn!(case_id = %id, actor = %actor.user_id, "transition denied");
            return Err(err);
        }
        let case = self.load(id)?;
        let requested_status =
            CaseStatus::parse(requested).ok_or_else(|| CaseError::InvalidStatus {
                kind: case.kind,
                status: requested.to_string(),
            })?;

        let updated = machine::transition(
            &case,
            requested_status,
            actor.user_id,
            input,
            self.clock.now(),
        )?;
        self.store
            .update_if_status(case.status, updated.clone())
            .map_err(|err| match err {
                StoreError::StatusConflict { found, .. } => CaseError::IllegalTransition {
                    from: found.as_str().to_string(),
                    to: requested_status.as_str().to_string(),
                    reason: "case was modified concurrently".to_string(),
                },
                other => other.into(),
            })?;
        tracing::info!(
            case_id = %id,
            from = %case.status,
            to = %updated.status,
            reviewer = %actor.user_id,
            "case status updated"
        );
        Ok(updated)
    }

    /// Confirm the payment attached to a land-revenue case.
    ///
    /// Open to the case owner and to administrators; fails
    /// [`CaseError::IllegalTransition`] unless the payment is `Pending`.
    pub fn confirm_payment(
        &self,
        actor: Option<&Actor>,
        id: CaseId,
        transaction_reference: &str,
    ) -> Result<Case, CaseError> {
        let actor = access::authenticate(actor)?;
        let case = self.load(id)?;
        access::ensure_can_confirm_payment(&case, actor)?;

        let mut updated = case.clone();
        let payment = updated.payment.as_mut().ok_or_else(|| {
            CaseError::Validation(format!("{} cases carry no payment workflow", case.kind))
        })?;
        payment.confirm(transaction_reference, self.clock.now())?;

        self.store.update_if_status(case.status, updated.clone())?;
        tracing::info!(
            case_id = %id,
            actor = %actor.user_id,
            "payment confirmed"
        );
        Ok(updated)
    }

    fn load(&self, id: CaseId) -> Result<Case, CaseError> {
        self.store
            .get(id)?
            .ok_or_else(|| CaseError::NotFound(id.to_string()))
    }
}

/// Check the kind's mandatory payload fields: each must be present as a
/// non-blank string.
fn validate_submission(
    policy: &KindPolicy,
    payload: &serde_json::Value,
) -> Result<(), CaseError> {
    if !payload.is_object() {
        return Err(CaseError::Validation(
            "submission payload must be a JSON object".to_string(),
        ));
    }
    for field in policy.submit_fields {
        if payload_str(payload, field).is_none() {
            return Err(CaseError::Validation(format!(
                "field {field:?} is required for {} submissions",
                policy.kind
            )));
        }
    }
    Ok(())
}

fn payload_str<'a>(payload: &'a serde_json::Value, field: &str) -> Option<&'a str> {
    payload
        .get(field)
        .and_then(|v| v.as_str())
        .map(str::trim)
        .filter(|s| !s.is_empty())
}
