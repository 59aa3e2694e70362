//! Per-request correlation
//!
//! Each gateway call runs under a `RequestContext`. Its request id is stamped
//! on every log event and error the call produces.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::identity::Identity;

/// Correlation id for one gateway call
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestId(String);

impl RequestId {
    /// Fresh time-ordered id
    pub fn generate() -> Self {
        Self(Uuid::now_v7().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for RequestId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Who is calling, and under which request id
///
/// There is no constructor without an `Identity`.
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub request_id: RequestId,
    pub identity: Identity,
}

impl RequestContext {
    pub fn new(identity: Identity) -> Self {
        Self {
            request_id: RequestId::generate(),
            identity,
        }
    }

    /// Reuse a request id issued upstream
    pub fn with_request_id(identity: Identity, request_id: RequestId) -> Self {
        Self {
            request_id,
            identity,
        }
    }

    pub fn user_id(&self) -> &str {
        self.identity.user_id().as_str()
    }
}
