//! Core types shared across CellTrack facilities
//!
//! This crate provides foundational types used by the error, logging and
//! gateway layers:
//!
//! - **Correlation**: RequestId, RequestContext
//! - **Identity**: the authenticated caller every gateway call carries
//! - **Sensitive data**: Sensitive<T> marker for automatic redaction
//! - **Schema constants**: Canonical field keys and event names

pub mod correlation;
pub mod identity;
pub mod schema;
pub mod sensitive;

pub use correlation::{RequestContext, RequestId};
pub use identity::{Identity, UserId};
pub use sensitive::Sensitive;
