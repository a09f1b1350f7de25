//! # janseva-case — Case Lifecycle Engine
//!
//! The rules governing how a submitted case moves through states, who may
//! see it, how its reference number is derived, and how the optional
//! payment sub-workflow attaches to the land-revenue kind:
//!
//! - **Error** ([`error`]): The engine's error taxonomy.
//!
//! - **Kind** ([`kind`]) and **Status** ([`status`]): The fixed domain
//!   categories and the vocabulary of lifecycle statuses.
//!
//! - **Policy** ([`policy`]): The per-kind configuration table — allowed
//!   statuses, terminal statuses, transition strictness, and
//!   status-conditional required fields. Policy differences between kinds
//!   are data in this table, not scattered conditionals.
//!
//! - **Case** ([`case`]): The central record tracked through the lifecycle.
//!
//! - **Machine** ([`machine`]): Validates and applies status transitions.
//!   Pure computation; persistence belongs to the caller.
//!
//! - **Reference** ([`reference`]): Human-readable reference numbers,
//!   generated once at creation from an injected clock and random source.
//!
//! - **Payment** ([`payment`]): One-shot payment confirmation attached to
//!   land-revenue cases.
//!
//! - **Access** ([`access`]): Owner/administrator visibility rules.
//!
//! ## Design Choice: Validated Enum over Typestate
//!
//! Statuses are a validated enum checked at runtime against the kind's
//! policy table rather than typestate types. Cases are stored in databases
//! and shaped by transport layers where the state is not known at compile
//! time, and five kinds sharing one transition routine is the point of the
//! design — typestate would force a separate impl surface per kind.

pub mod access;
pub mod case;
pub mod error;
pub mod kind;
pub mod machine;
pub mod payment;
pub mod policy;
pub mod reference;
pub mod status;

pub use case::{Case, ReviewOutcome};
pub use error::CaseError;
pub use kind::CaseKind;
pub use machine::{transition, TransitionInput};
pub use payment::{PaymentState, PaymentStatus};
pub use policy::{KindPolicy, RequiredField, TransitionRule};
pub use status::CaseStatus;
