use serde::Serialize;
use uuid::Uuid;

use crate::model::vo::RequestStatus;

pub type RepairResult<T> = Result<T, RepairException>;

/// One rejected input field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// How a [`RepairException`] should be surfaced to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    NotFound,
    Conflict,
    Unavailable,
    Unauthorized,
    Internal,
}

#[derive(Debug, thiserror::Error)]
pub enum RepairException {
    #[error("Invalid input: {}", describe(.errors))]
    Validation { errors: Vec<FieldError> },

    #[error("There is no service request with id: {id}.")]
    RequestNotFound { id: Uuid },

    #[error("There is no work item with id: {work_id} in service request: {request_id}.")]
    WorkItemNotFound { request_id: Uuid, work_id: Uuid },

    #[error("There is no service request tracked by: {key}.")]
    TrackingNotFound { key: String },

    #[error("Service request status can't change from {from} to {to}.")]
    InvalidTransition { from: RequestStatus, to: RequestStatus },

    #[error("No free request number found after {attempts} attempts.")]
    IdentifierExhausted { attempts: usize },

    #[error("Service request: {id} kept changing concurrently, gave up after {attempts} attempts.")]
    ConcurrentModification { id: Uuid, attempts: usize },

    #[error("Invalid credentials.")]
    InvalidCredentials,

    #[error("Unauthorized: {reason}")]
    Unauthorized { reason: String },

    #[error("Repair internal error: {source}")]
    InternalError {
        #[source]
        source: anyhow::Error,
    },
}

impl RepairException {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            errors: vec![FieldError::new(field, message)],
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation { .. } | Self::InvalidTransition { .. } => ErrorKind::Validation,
            Self::RequestNotFound { .. }
            | Self::WorkItemNotFound { .. }
            | Self::TrackingNotFound { .. } => ErrorKind::NotFound,
            Self::ConcurrentModification { .. } => ErrorKind::Conflict,
            Self::IdentifierExhausted { .. } => ErrorKind::Unavailable,
            Self::InvalidCredentials | Self::Unauthorized { .. } => ErrorKind::Unauthorized,
            Self::InternalError { .. } => ErrorKind::Internal,
        }
    }

    /// Field level details, empty for anything but input errors.
    pub fn field_errors(&self) -> Vec<FieldError> {
        match self {
            Self::Validation { errors } => errors.clone(),
            Self::InvalidTransition { from, to } => vec![FieldError::new(
                "status",
                format!("transition from {from} to {to} is not allowed"),
            )],
            _ => vec![],
        }
    }
}

fn describe(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| format!("{}: {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join("; ")
}

impl From<anyhow::Error> for RepairException {
    fn from(e: anyhow::Error) -> Self {
        RepairException::InternalError { source: e }
    }
}

/// Collects field errors and fails once with all of them.
#[derive(Default)]
pub struct Validator {
    errors: Vec<FieldError>,
}

impl Validator {
    pub fn check(&mut self, ok: bool, field: &str, message: &str) -> &mut Self {
        if !ok {
            self.errors.push(FieldError::new(field, message));
        }
        self
    }

    pub fn require(&mut self, value: &str, field: &str, message: &str) -> &mut Self {
        self.check(!value.trim().is_empty(), field, message)
    }

    pub fn finish(&mut self) -> RepairResult<()> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(RepairException::Validation {
                errors: std::mem::take(&mut self.errors),
            })
        }
    }
}
