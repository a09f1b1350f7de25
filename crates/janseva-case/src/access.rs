//! # Access Control Evaluator
//!
//! Decides read/write visibility per case. The rules are uniform across
//! kinds: owners always see their own cases, administrators see
//! everything, third parties see nothing; status transitions and the
//! all-cases listing are administrator actions; payment confirmation is
//! open to the owner or an administrator.

use janseva_core::Actor;

use crate::case::Case;
use crate::error::CaseError;

/// Require a verified actor.
///
/// Transport layers pass `None` when no valid credential accompanied the
/// request; the engine answers with [`CaseError::Unauthenticated`] rather
/// than guessing an identity.
pub fn authenticate(actor: Option<&Actor>) -> Result<&Actor, CaseError> {
    actor.ok_or(CaseError::Unauthenticated)
}

/// May the actor read this case?
///
/// # Errors
///
/// Returns [`CaseError::Forbidden`] when the actor is neither the owner
/// nor an administrator.
pub fn ensure_can_view(case: &Case, actor: &Actor) -> Result<(), CaseError> {
    if actor.user_id == case.owner || actor.is_administrator() {
        Ok(())
    } else {
        Err(CaseError::Forbidden(format!(
            "{} may not view case {}",
            actor.user_id, case.id
        )))
    }
}

/// Require the administrator role for a status transition or an
/// all-cases listing.
pub fn ensure_administrator(actor: &Actor) -> Result<(), CaseError> {
    if actor.is_administrator() {
        Ok(())
    } else {
        Err(CaseError::Forbidden(format!(
            "{} does not hold the administrator role",
            actor.user_id
        )))
    }
}

/// May the actor confirm payment on this case?
///
/// Open to the case owner and to administrators.
pub fn ensure_can_confirm_payment(case: &Case, actor: &Actor) -> Result<(), CaseError> {
    if actor.user_id == case.owner || actor.is_administrator() {
        Ok(())
    } else {
        Err(CaseError::Forbidden(format!(
            "{} may not confirm payment on case {}",
            actor.user_id, case.id
        )))
    }
}
