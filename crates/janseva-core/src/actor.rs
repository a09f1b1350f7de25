//! # Actor — Verified Identity
//!
//! The authenticated identity attempting an operation. Token verification
//! is an upstream concern; by the time an [`Actor`] exists, its user id
//! and roles have already been validated. The engine never sees
//! credentials, only this descriptor.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::identity::UserId;

/// A role held by a portal user.
///
/// The portal distinguishes exactly two roles: ordinary citizens who own
/// the cases they submit, and administrators who review and resolve them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Role {
    /// A registered resident submitting and tracking their own cases.
    Citizen,
    /// A reviewing official with visibility into every case.
    Administrator,
}

impl Role {
    /// The canonical string name of this role.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Citizen => "CITIZEN",
            Self::Administrator => "ADMINISTRATOR",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The verified `(user id, roles)` pair behind every request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    /// The authenticated user's id.
    pub user_id: UserId,
    /// Roles granted to this user.
    pub roles: BTreeSet<Role>,
}

impl Actor {
    /// An actor holding exactly the given roles.
    pub fn new(user_id: UserId, roles: impl IntoIterator<Item = Role>) -> Self {
        Self {
            user_id,
            roles: roles.into_iter().collect(),
        }
    }

    /// An ordinary citizen actor.
    pub fn citizen(user_id: UserId) -> Self {
        Self::new(user_id, [Role::Citizen])
    }

    /// An administrator actor.
    pub fn administrator(user_id: UserId) -> Self {
        Self::new(user_id, [Role::Citizen, Role::Administrator])
    }

    /// Whether this actor holds the administrator role.
    pub fn is_administrator(&self) -> bool {
        self.roles.contains(&Role::Administrator)
    }
}
