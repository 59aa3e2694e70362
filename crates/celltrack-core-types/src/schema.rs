//! Field and event names shared by the logging macros, the gateway boundary
//! and the test capture layer

/// Module path of the emitting code
pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_OP: &str = "op";
/// One of the `EVENT_*` values
pub const FIELD_EVENT: &str = "event";
pub const FIELD_DURATION_MS: &str = "duration_ms";
pub const FIELD_REQUEST_ID: &str = "request_id";
pub const FIELD_USER_ID: &str = "user_id";

pub const FIELD_ERR_KIND: &str = "err.kind";
pub const FIELD_ERR_CODE: &str = "err.code";
pub const FIELD_ERR_DETAIL: &str = "err.detail";

pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";
