//! # janseva-core — Domain Primitives
//!
//! Foundation types shared by every crate in the Janseva stack:
//!
//! - **Identity** ([`identity`]): Newtype identifiers. A [`CaseId`] cannot
//!   be passed where a [`UserId`] is expected.
//!
//! - **Actor** ([`actor`]): The externally-verified identity attempting an
//!   operation. Credential verification happens upstream; this crate only
//!   consumes the resulting `(user id, roles)` pair.
//!
//! - **Temporal** ([`temporal`]): UTC-only, seconds-precision [`Timestamp`]
//!   and the injectable [`Clock`] abstraction. No module in the engine
//!   reads the ambient system clock directly.

pub mod actor;
pub mod identity;
pub mod temporal;

pub use actor::{Actor, Role};
pub use identity::{CaseId, UserId};
pub use temporal::{Clock, FixedClock, SystemClock, Timestamp};
