use celltrack_core_types::RequestId;
use thiserror::Error;

use crate::model::EntityKind;

/// Result type alias using ExError
pub type Result<T> = std::result::Result<T, ExError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code. The code is the only part of an
/// error that crosses the gateway boundary; messages stay in the operator
/// logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Structural/Validation
    InvalidInput,
    NotFound,
    ConstraintViolation,

    // State
    Conflict,
    Forbidden,

    // Integration/IO
    Io,
    Serialization,
    Persistence,
    Configuration,

    // Internal
    Internal,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            ExErrorKind::NotFound => "ERR_NOT_FOUND",
            ExErrorKind::ConstraintViolation => "ERR_CONSTRAINT_VIOLATION",
            ExErrorKind::Conflict => "ERR_CONFLICT",
            ExErrorKind::Forbidden => "ERR_FORBIDDEN",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
            ExErrorKind::Persistence => "ERR_PERSISTENCE",
            ExErrorKind::Configuration => "ERR_CONFIGURATION",
            ExErrorKind::Internal => "ERR_INTERNAL",
        }
    }
}

/// Canonical structured error type
///
/// Carries a classification for programmatic handling plus context for the
/// operator log line.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    entity: Option<EntityKind>,
    entity_id: Option<String>,
    request_id: Option<RequestId>,
    message: String,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            entity: None,
            entity_id: None,
            request_id: None,
            message: String::new(),
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add entity kind context
    pub fn with_entity(mut self, entity: EntityKind) -> Self {
        self.entity = Some(entity);
        self
    }

    /// Add entity ID context
    pub fn with_entity_id(mut self, id: impl Into<String>) -> Self {
        self.entity_id = Some(id.into());
        self
    }

    /// Add request ID context
    pub fn with_request_id(mut self, request_id: RequestId) -> Self {
        self.request_id = Some(request_id);
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    pub fn entity(&self) -> Option<EntityKind> {
        self.entity
    }

    pub fn entity_id(&self) -> Option<&str> {
        self.entity_id.as_deref()
    }

    pub fn request_id(&self) -> Option<&RequestId> {
        self.request_id.as_ref()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// True when the error means "no such row" rather than a failure
    pub fn is_not_found(&self) -> bool {
        self.kind == ExErrorKind::NotFound
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(entity) = self.entity {
            write!(f, " (entity: {})", entity)?;
        }
        if let Some(entity_id) = &self.entity_id {
            write!(f, " (entity_id: {})", entity_id)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {}

// ========== End Error Facility ==========

/// Domain error taxonomy for CellTrack operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TrackerError {
    /// No row with this id exists
    #[error("{entity} not found: {id}")]
    EntityNotFound { entity: EntityKind, id: String },

    /// A calendar date could not be parsed
    #[error("Invalid date '{value}': expected YYYY-MM-DD")]
    InvalidDate { value: String },

    /// A timestamp could not be parsed
    #[error("Invalid timestamp '{value}': expected RFC 3339")]
    InvalidTimestamp { value: String },

    /// Caller already has an active shift and the policy forbids another
    #[error("User {user_id} already has an active shift: {shift_id}")]
    ActiveShiftExists { user_id: String, shift_id: String },

    /// Shift was already closed
    #[error("Shift already ended: {shift_id}")]
    ShiftAlreadyEnded { shift_id: String },

    /// Shift belongs to a different user
    #[error("Shift {shift_id} does not belong to user {user_id}")]
    ShiftNotOwned { shift_id: String, user_id: String },

    /// Payload could not be (de)serialized
    #[error("Serialization error: {message}")]
    Serialization { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl From<TrackerError> for ExError {
    fn from(err: TrackerError) -> Self {
        match err {
            TrackerError::EntityNotFound { entity, id } => ExError::new(ExErrorKind::NotFound)
                .with_entity(entity)
                .with_entity_id(id)
                .with_message(format!("{} not found", entity)),
            TrackerError::InvalidDate { value } => ExError::new(ExErrorKind::InvalidInput)
                .with_message(format!("Invalid date '{}': expected YYYY-MM-DD", value)),
            TrackerError::InvalidTimestamp { value } => ExError::new(ExErrorKind::InvalidInput)
                .with_message(format!("Invalid timestamp '{}': expected RFC 3339", value)),
            TrackerError::ActiveShiftExists { user_id, shift_id } => {
                ExError::new(ExErrorKind::Conflict)
                    .with_entity(EntityKind::Shift)
                    .with_entity_id(shift_id)
                    .with_message(format!("User {} already has an active shift", user_id))
            }
            TrackerError::ShiftAlreadyEnded { shift_id } => ExError::new(ExErrorKind::Conflict)
                .with_entity(EntityKind::Shift)
                .with_entity_id(shift_id)
                .with_message("Shift already ended"),
            TrackerError::ShiftNotOwned { shift_id, user_id } => {
                ExError::new(ExErrorKind::Forbidden)
                    .with_entity(EntityKind::Shift)
                    .with_entity_id(shift_id)
                    .with_message(format!("Shift does not belong to user {}", user_id))
            }
            TrackerError::Serialization { message } => {
                ExError::new(ExErrorKind::Serialization).with_message(message)
            }
            TrackerError::Internal { message } => {
                ExError::new(ExErrorKind::Internal).with_message(message)
            }
        }
    }
}
