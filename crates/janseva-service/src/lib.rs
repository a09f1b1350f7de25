//! # janseva-service — Orchestration
//!
//! Ties the engine to durable storage:
//!
//! - **Store** ([`store`]): The narrow [`CaseStore`] interface the engine
//!   persists through, with a compare-and-swap update so two concurrent
//!   administrator transitions cannot silently overwrite each other, and
//!   an in-memory implementation.
//!
//! - **Fees** ([`fees`]): The land-revenue fee schedule keyed by service
//!   type.
//!
//! - **Service** ([`service`]): [`CaseService`], the single entry point
//!   for the portal's six verbs — `submit`, `view`, `list_mine`,
//!   `list_all`, `update_status`, `confirm_payment`.

pub mod fees;
pub mod service;
pub mod store;

pub use fees::FeeSchedule;
pub use service::{CaseService, NewCase};
pub use store::{CaseStore, InMemoryCaseStore, StoreError};
