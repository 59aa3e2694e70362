//! Shift admission policy
//!
//! Whether a user may hold more than one active shift is a product decision,
//! so it is injected rather than hard-coded into the gateway.

use crate::errors::TrackerError;
use crate::model::Shift;

/// Decides whether a user may open a new shift
pub trait ShiftPolicy: Send + Sync {
    /// Check a shift start for `user_id`
    ///
    /// # Arguments
    /// * `user_id` - caller starting the shift
    /// * `active` - the user's shifts that are currently active
    ///
    /// # Returns
    /// * `Ok(())` - the shift may start
    /// * `Err(TrackerError)` - the start is refused
    fn admit_start(&self, user_id: &str, active: &[Shift]) -> Result<(), TrackerError>;
}

/// No restriction: any number of active shifts per user
///
/// This is the default. Nothing upstream guarantees one active shift per
/// user, so none is assumed.
///
/// # Example
/// ```
/// use celltrack_core::policy::{ShiftPolicy, UnrestrictedShiftPolicy};
///
/// assert!(UnrestrictedShiftPolicy.admit_start("u-1", &[]).is_ok());
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct UnrestrictedShiftPolicy;

impl ShiftPolicy for UnrestrictedShiftPolicy {
    fn admit_start(&self, _user_id: &str, _active: &[Shift]) -> Result<(), TrackerError> {
        Ok(())
    }
}

/// At most one active shift per user
#[derive(Debug, Clone, Copy, Default)]
pub struct SingleActiveShiftPolicy;

impl ShiftPolicy for SingleActiveShiftPolicy {
    fn admit_start(&self, user_id: &str, active: &[Shift]) -> Result<(), TrackerError> {
        match active.first() {
            Some(existing) => Err(TrackerError::ActiveShiftExists {
                user_id: user_id.to_string(),
                shift_id: existing.id.clone(),
            }),
            None => Ok(()),
        }
    }
}
