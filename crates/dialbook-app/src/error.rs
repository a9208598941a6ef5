//! # Application Error Type
//!
//! Unified error type surfaced to presentation collaborators.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                   Error Flow in Dialbook                        │
//! │                                                                 │
//! │  ValidationError (dialbook-core) ──┐                            │
//! │                                    ├──► AppError { code, msg }  │
//! │  DbError (dialbook-db) ────────────┘            │               │
//! │                                                 ▼               │
//! │  Presentation picks message text / retry UI by `code`;          │
//! │  this core only guarantees the kind is distinguishable.         │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Serializable so it can cross an IPC or FFI boundary as
//! `{ "code": "STORAGE_FAULT", "message": "..." }`.

use serde::Serialize;

use dialbook_core::ValidationError;
use dialbook_db::DbError;

/// Error returned from application entrypoints.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes surfaced to presentation collaborators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Record referenced by id no longer exists.
    NotFound,

    /// Input validation failed (empty name, malformed phone).
    ValidationError,

    /// Underlying persistence unavailable or constraint violated.
    StorageFault,
}

impl AppError {
    /// Creates a new application error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        AppError {
            code,
            message: message.into(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(message: impl Into<String>) -> Self {
        AppError::new(ErrorCode::NotFound, message)
    }

    /// Creates a storage fault.
    pub fn storage(message: impl Into<String>) -> Self {
        AppError::new(ErrorCode::StorageFault, message)
    }
}

/// Converts database errors to application errors.
///
/// Everything that is not a vanished id counts as a storage fault: the
/// store never retries, so the caller gets the fault exactly once.
impl From<DbError> for AppError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { .. } => AppError::not_found(err.to_string()),
            DbError::ConstraintViolation { .. }
            | DbError::ConnectionFailed(_)
            | DbError::MigrationFailed(_)
            | DbError::QueryFailed(_)
            | DbError::PoolExhausted
            | DbError::Internal(_) => AppError::storage(err.to_string()),
        }
    }
}

/// Converts validation errors to application errors.
impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        AppError::new(ErrorCode::ValidationError, err.to_string())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_db_error_mapping() {
        let err: AppError = DbError::not_found("Contact", 7).into();
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(err.message, "Contact not found: 7");

        let err: AppError = DbError::PoolExhausted.into();
        assert_eq!(err.code, ErrorCode::StorageFault);

        let err: AppError = DbError::QueryFailed("disk I/O error".into()).into();
        assert_eq!(err.code, ErrorCode::StorageFault);
    }

    #[test]
    fn test_validation_error_mapping() {
        let err: AppError = ValidationError::Required {
            field: "name".to_string(),
        }
        .into();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(err.message, "name is required");
    }
}
