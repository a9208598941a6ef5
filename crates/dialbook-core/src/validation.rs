//! # Validation Module
//!
//! Input validation for contact submissions.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                     Validation Layers                           │
//! │                                                                 │
//! │  Layer 1: Form widgets (out of scope)                           │
//! │  └── Immediate user feedback on keystrokes                      │
//! │           │                                                     │
//! │           ▼                                                     │
//! │  Layer 2: THIS MODULE - rule checks before submission           │
//! │           │                                                     │
//! │           ▼                                                     │
//! │  Layer 3: SQLite NOT NULL constraints                           │
//! │                                                                 │
//! │  The store never calls these checks itself: it persists         │
//! │  exactly what it is given.                                      │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::{ValidationError, ValidationResult};
use crate::types::Contact;
use crate::{MAX_NAME_CHARS, PHONE_DIGITS};

/// Validates a contact name.
///
/// ## Rules
/// - Must not be empty after trimming
/// - Must be at most [`MAX_NAME_CHARS`] characters
///
/// ## Example
/// ```rust
/// use dialbook_core::validation::validate_name;
///
/// assert!(validate_name("Ann").is_ok());
/// assert!(validate_name("   ").is_err());
/// ```
pub fn validate_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.chars().count() > MAX_NAME_CHARS {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: MAX_NAME_CHARS,
        });
    }

    Ok(())
}

/// Validates a phone number.
///
/// ## Rules
/// - Exactly [`PHONE_DIGITS`] characters
/// - ASCII digits only
pub fn validate_phone(phone: &str) -> ValidationResult<()> {
    if phone.len() != PHONE_DIGITS || !phone.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::InvalidFormat {
            field: "phone".to_string(),
            reason: format!("must be exactly {} digits", PHONE_DIGITS),
        });
    }

    Ok(())
}

/// Validates a full contact submission (name and phone).
pub fn validate_contact(contact: &Contact) -> ValidationResult<()> {
    validate_name(&contact.name)?;
    validate_phone(&contact.phone)?;
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
