//! Authenticated caller identity
//!
//! Token validation happens upstream. By the time a gateway call is made the
//! caller has already been resolved to a user id, which the gateway trusts.

use serde::{Deserialize, Serialize};

/// Opaque user identifier issued by the identity provider
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An already-authenticated caller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    user_id: UserId,
}

impl Identity {
    /// Wrap a user id resolved by the session layer
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: UserId::new(user_id),
        }
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }
}
