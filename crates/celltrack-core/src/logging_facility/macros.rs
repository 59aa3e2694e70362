//! Operation logging macros
//!
//! One event per phase of an operation, each carrying `component`, `op` and
//! `event`. Extra `key = value` fields may follow and are passed to
//! `tracing` unchanged.

/// Operation entry
///
/// ```
/// # use celltrack_core::log_op_start;
/// log_op_start!("list_cells");
/// log_op_start!("get_cells", entity_id = "cell-1");
/// ```
#[macro_export]
macro_rules! log_op_start {
    ($op:expr $(, $($field:tt)+)?) => {
        $crate::__log::tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::__log::schema::EVENT_START,
            $($($field)+)?
        )
    };
}

/// Successful exit, with the elapsed time
///
/// ```
/// # use celltrack_core::log_op_end;
/// log_op_end!("list_cells", duration_ms = 42);
/// log_op_end!("list_cells", duration_ms = 42, rows = 3);
/// ```
#[macro_export]
macro_rules! log_op_end {
    ($op:expr, duration_ms = $duration:expr $(, $($field:tt)+)?) => {
        $crate::__log::tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::__log::schema::EVENT_END,
            duration_ms = $duration,
            $($($field)+)?
        )
    };
}

/// Failed exit
///
/// `$err` is anything convertible into `ExError`. Its kind, code and full
/// detail go on the log line; none of it reaches the caller's envelope.
///
/// ```
/// # use celltrack_core::log_op_error;
/// # use celltrack_core::errors::TrackerError;
/// let err = TrackerError::Internal { message: "boom".to_string() };
/// log_op_error!("get_cells", err, duration_ms = 10);
/// ```
#[macro_export]
macro_rules! log_op_error {
    ($op:expr, $err:expr, duration_ms = $duration:expr $(, $($field:tt)+)?) => {{
        let failure: $crate::errors::ExError = $err.into();
        $crate::__log::tracing::error!(
            component = module_path!(),
            op = $op,
            event = $crate::__log::schema::EVENT_END_ERROR,
            duration_ms = $duration,
            err.kind = ?failure.kind(),
            err.code = failure.code(),
            err.detail = %failure,
            $($($field)+)?
        )
    }};
}
