//! # Case Store
//!
//! The narrow persistence interface the engine reads and writes through.
//! The engine never depends on the storage technology; it needs `get`,
//! an insert that enforces reference-number uniqueness, a
//! compare-and-swap update keyed on `(case id, expected status)`, and
//! the two listing shapes.
//!
//! [`InMemoryCaseStore`] provides those guarantees behind a
//! `parking_lot::RwLock` and backs every test in this workspace.

use std::collections::{HashMap, HashSet};

use parking_lot::RwLock;
use thiserror::Error;

use janseva_case::{Case, CaseError, CaseStatus};
use janseva_core::{CaseId, UserId};

/// Persistence failures surfaced by a [`CaseStore`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// A case with this reference number already exists. The service
    /// retries with a fresh random suffix.
    #[error("reference number {0} already exists")]
    DuplicateReference(String),

    /// No case with this id exists.
    #[error("{0} does not exist")]
    NotFound(CaseId),

    /// The compare-and-swap update lost a race: the stored status no
    /// longer matches the one the update was computed against.
    #[error("{id} status changed concurrently: expected {expected}, found {found}")]
    StatusConflict {
        /// The case whose update was rejected.
        id: CaseId,
        /// The status the update was computed against.
        expected: CaseStatus,
        /// The status actually stored.
        found: CaseStatus,
    },

    /// Any other backend failure, passed through uninterpreted.
    #[error("storage backend error: {0}")]
    Backend(String),
}

impl From<StoreError> for CaseError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(id) => CaseError::NotFound(id.to_string()),
            StoreError::StatusConflict {
                expected, found, ..
            } => CaseError::IllegalTransition {
                from: found.as_str().to_string(),
                to: expected.as_str().to_string(),
                reason: "case was modified concurrently".to_string(),
            },
            StoreError::DuplicateReference(_) | StoreError::Backend(_) => {
                CaseError::Infrastructure(err.to_string())
            }
        }
    }
}

/// Durable record of cases, keyed by case id.
///
/// Implementations must serialize read-modify-write per case id:
/// [`update_if_status`](CaseStore::update_if_status) must reject an
/// update whose expected status no longer matches the stored one.
pub trait CaseStore: Send + Sync {
    /// Load a case by id.
    fn get(&self, id: CaseId) -> Result<Option<Case>, StoreError>;

    /// Persist a newly created case.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::DuplicateReference`] when another case
    /// already carries the same reference number.
    fn insert(&self, case: Case) -> Result<(), StoreError>;

    /// Replace a stored case, conditional on its current status.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::StatusConflict`] when the stored status
    /// differs from `expected`, and [`StoreError::NotFound`] when the
    /// case does not exist.
    fn update_if_status(&self, expected: CaseStatus, case: Case) -> Result<(), StoreError>;

    /// All cases owned by a user, oldest first.
    fn list_by_owner(&self, owner: UserId) -> Result<Vec<Case>, StoreError>;

    /// All cases, optionally filtered by status, oldest first.
    fn list_all(&self, status: Option<CaseStatus>) -> Result<Vec<Case>, StoreError>;
}

/// An in-memory [`CaseStore`] with reference-number uniqueness.
#[derive(Default)]
pub struct InMemoryCaseStore {
    cases: RwLock<HashMap<CaseId, Case>>,
    references: RwLock<HashSet<String>>,
}

impl InMemoryCaseStore {
    /// An empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn sorted(mut cases: Vec<Case>) -> Vec<Case> {
        cases.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| a.reference_number.cmp(&b.reference_number))
        });
        cases
    }
}

impl CaseStore for InMemoryCaseStore {
    fn get(&self, id: CaseId) -> Result<Option<Case>, StoreError> {
        Ok(self.cases.read().get(&id).cloned())
    }

    fn insert(&self, case: Case) -> Result<(), StoreError> {
        let mut references = self.references.write();
        if let Some(reference) = &case.reference_number {
            if !references.insert(reference.clone()) {
                return Err(StoreError::DuplicateReference(reference.clone()));
            }
        }
        self.cases.write().insert(case.id, case);
        Ok(())
    }

    fn update_if_status(&self, expected: CaseStatus, case: Case) -> Result<(), StoreError> {
        let mut cases = self.cases.write();
        let stored = cases.get_mut(&case.id).ok_or(StoreError::NotFound(case.id))?;
        if stored.status != expected {
            return Err(StoreError::StatusConflict {
                id: case.id,
                expected,
                found: stored.status,
            });
        }
        *stored = case;
        Ok(())
    }

    fn list_by_owner(&self, owner: UserId) -> Result<Vec<Case>, StoreError> {
        let cases = self.cases.read();
        Ok(Self::sorted(
            cases.values().filter(|c| c.owner == owner).cloned().collect(),
        ))
    }

    fn list_all(&self, status: Option<CaseStatus>) -> Result<Vec<Case>, StoreError> {
        let cases = self.cases.read();
        Ok(Self::sorted(
            cases
                .values()
                .filter(|c| status.map_or(true, |s| c.status == s))
                .cloned()
                .collect(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use janseva_case::CaseKind;
    use janseva_core::Timestamp;
    use serde_json::json;

    fn ts(minute: u32) -> Timestamp {
        Timestamp::from_utc(Utc.with_ymd_and_hms(2026, 2, 10, 9, minute, 0).unwrap())
    }

    fn case_with(reference: &str, owner: i64, minute: u32) -> Case {
        Case::submitted(
            CaseId::new(),
            CaseKind::Certificate,
            UserId::new(owner),
            json!({"applicant_name": "Asha Rao"}),
            reference.to_string(),
            None,
            ts(minute),
        )
    }

    #[test]
    fn insert_then_get() {
        let store = InMemoryCaseStore::new();
        let case = case_with("CERT-20260210-0001", 1, 0);
        store.insert(case.clone()).unwrap();
        assert_eq!(store.get(case.id).unwrap(), Some(case));
    }

    #[test]
    fn get_missing_is_none() {
        let store = InMemoryCaseStore::new();
        assert_eq!(store.get(CaseId::new()).unwrap(), None);
    }

    #[test]
    fn duplicate_reference_rejected() {
        let store = InMemoryCaseStore::new();
        store.insert(case_with("CERT-20260210-0001", 1, 0)).unwrap();
        let err = store
            .insert(case_with("CERT-20260210-0001", 2, 1))
            .unwrap_err();
        assert_eq!(
            err,
            StoreError::DuplicateReference("CERT-20260210-0001".to_string())
        );
    }

    #[test]
    fn update_if_status_applies_on_match() {
        let store = InMemoryCaseStore::new();
        let case = case_with("CERT-20260210-0001", 1, 0);
        store.insert(case.clone()).unwrap();

        let mut updated = case.clone();
        updated.status = CaseStatus::Approved;
        store.update_if_status(CaseStatus::Pending, updated).unwrap();
        assert_eq!(store.get(case.id).unwrap().unwrap().status, CaseStatus::Approved);
    }

    #[test]
    fn update_if_status_detects_lost_race() {
        let store = InMemoryCaseStore::new();
        let case = case_with("CERT-20260210-0001", 1, 0);
        store.insert(case.clone()).unwrap();

        let mut first = case.clone();
        first.status = CaseStatus::Approved;
        store.update_if_status(CaseStatus::Pending, first).unwrap();

        // A second transition computed against the stale Pending status.
        let mut second = case.clone();
        second.status = CaseStatus::Rejected;
        let err = store
            .update_if_status(CaseStatus::Pending, second)
            .unwrap_err();
        assert!(matches!(err, StoreError::StatusConflict { .. }));
    }

    #[test]
    fn update_missing_case_is_not_found() {
        let store = InMemoryCaseStore::new();
        let case = case_with("CERT-20260210-0001", 1, 0);
        let err = store
            .update_if_status(CaseStatus::Pending, case)
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
    }

    #[test]
    fn list_by_owner_filters_and_orders() {
        let store = InMemoryCaseStore::new();
        store.insert(case_with("CERT-20260210-0002", 1, 5)).unwrap();
        store.insert(case_with("CERT-20260210-0001", 1, 0)).unwrap();
        store.insert(case_with("CERT-20260210-0003", 2, 1)).unwrap();

        let mine = store.list_by_owner(UserId::new(1)).unwrap();
        assert_eq!(mine.len(), 2);
        assert!(mine[0].created_at < mine[1].created_at);
        assert!(mine.iter().all(|c| c.owner == UserId::new(1)));
    }

    #[test]
    fn list_all_optionally_filters_by_status() {
        let store = InMemoryCaseStore::new();
        let case = case_with("CERT-20260210-0001", 1, 0);
        store.insert(case.clone()).unwrap();
        store.insert(case_with("CERT-20260210-0002", 2, 1)).unwrap();

        let mut approved = case.clone();
        approved.status = CaseStatus::Approved;
        store.update_if_status(CaseStatus::Pending, approved).unwrap();

        assert_eq!(store.list_all(None).unwrap().len(), 2);
        let pending = store.list_all(Some(CaseStatus::Pending)).unwrap();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].owner, UserId::new(2));
    }

    #[test]
    fn store_error_maps_to_case_error() {
        let id = CaseId::new();
        assert!(matches!(
            CaseError::from(StoreError::NotFound(id)),
            CaseError::NotFound(_)
        ));
        assert!(matches!(
            CaseError::from(StoreError::Backend("down".to_string())),
            CaseError::Infrastructure(_)
        ));
        assert!(matches!(
            CaseError::from(StoreError::StatusConflict {
                id,
                expected: CaseStatus::Pending,
                found: CaseStatus::Approved,
            }),
            CaseError::IllegalTransition { .. }
        ));
    }
}
