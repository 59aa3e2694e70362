//! Structured operation logging
//!
//! `init` installs the process subscriber for a `Profile`. The `log_op_*`
//! macros emit the start, end and end_error events every gateway operation
//! is expected to produce, and `test_capture` records those events so tests
//! can assert on them.
//!
//! ```rust
//! use celltrack_core::logging_facility::{init, Profile};
//!
//! init(Profile::Development);
//! ```

pub mod init;
pub mod macros;
pub mod test_capture;

pub use init::{init, Profile};
pub use test_capture::{init_test_capture, CapturedEvent, TestCapture};
