//! CellTrack Engine - the query gateway
//!
//! Every operation takes a `RequestContext`, runs against the shared pool and
//! returns an `Envelope`. Failures never cross the boundary as `Err`: they
//! are logged in full and reduced to a stable code plus a generic message.

pub mod config;
pub mod gateway;

pub use config::{AppConfig, ConfigError};
pub use gateway::hierarchy::{CellNode, CompanyNode, SiteNode, ValueStreamNode};
pub use gateway::Gateway;
