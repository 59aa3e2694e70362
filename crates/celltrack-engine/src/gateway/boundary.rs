//! The error boundary shared by every gateway operation
//!
//! Logs exactly one start event and one end or end_error event, tagged with
//! the request and user, and converts the result into an `Envelope`.

use celltrack_core::errors::{ExError, Result};
use celltrack_core::{log_op_end, log_op_error, log_op_start, Envelope};
use celltrack_core_types::RequestContext;
use std::future::Future;
use std::time::Instant;

/// Messages shown to the caller for each outcome
pub(crate) struct Messages {
    pub success: String,
    pub failure: String,
}

impl Messages {
    pub fn new(success: impl Into<String>, failure: impl Into<String>) -> Self {
        Self {
            success: success.into(),
            failure: failure.into(),
        }
    }
}

pub(crate) async fn guarded<T, Fut>(
    ctx: &RequestContext,
    op: &str,
    messages: Messages,
    work: Fut,
) -> Envelope<T>
where
    Fut: Future<Output = Result<T>>,
{
    log_op_start!(
        op,
        request_id = ctx.request_id.as_str(),
        user_id = ctx.user_id()
    );
    let start = Instant::now();

    match work.await {
        Ok(data) => {
            log_op_end!(
                op,
                duration_ms = start.elapsed().as_millis() as u64,
                request_id = ctx.request_id.as_str(),
                user_id = ctx.user_id()
            );
            Envelope::ok(messages.success, data)
        }
        Err(err) => {
            let err: ExError = err.with_op(op).with_request_id(ctx.request_id.clone());
            log_op_error!(
                op,
                err.clone(),
                duration_ms = start.elapsed().as_millis() as u64,
                request_id = ctx.request_id.as_str(),
                user_id = ctx.user_id()
            );
            Envelope::from_error(&err, messages.failure)
        }
    }
}

/// Upper-case the first character
pub(crate) fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
