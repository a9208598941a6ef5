//! # Error Types
//!
//! Domain-specific error types for dialbook-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                        Error Types                              │
//! │                                                                 │
//! │  dialbook-core errors (this file)                               │
//! │  └── ValidationError  - Input validation failures               │
//! │                                                                 │
//! │  dialbook-db errors (separate crate)                            │
//! │  └── DbError          - Storage faults, not-found               │
//! │                                                                 │
//! │  dialbook-app errors                                            │
//! │  └── AppError         - What presentation sees (serialized)     │
//! │                                                                 │
//! │  Flow: ValidationError → DbError → AppError → Presentation      │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

/// Input validation errors.
///
/// Presentation collaborators run these checks before submitting a contact;
/// the store itself persists whatever it is given.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Invalid format (e.g. phone that is not exactly nine digits).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

/// Convenience type alias for validation results.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Unit Tests
// =============================================================================
