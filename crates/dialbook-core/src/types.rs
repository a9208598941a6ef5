//! # Domain Types
//!
//! The contact record persisted by the store and displayed by the listing.
//!
//! ## Identity
//! Every contact has a single key:
//! - `id`: i64 assigned by SQLite on first insert - immutable thereafter,
//!   never reused, `0` (NEW_CONTACT_ID) until the record is persisted.

use serde::{Deserialize, Serialize};

use crate::NEW_CONTACT_ID;

// =============================================================================
// Contact
// =============================================================================

/// A person's entry in the contact list.
///
/// ## Field Notes
/// - `favourite` is stored as INTEGER 0/1 in SQLite and is the primary sort
///   key (descending) of the listing; `name` ascending breaks ties.
/// - The store persists these fields verbatim; validation is the
///   presentation collaborator's job (see [`crate::validation`]).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Contact {
    /// Unique identifier, assigned on first insert.
    pub id: i64,

    /// Display name, non-empty.
    pub name: String,

    /// Phone number, exactly nine ASCII digits.
    pub phone: String,

    /// Whether the contact is pinned to the top of the listing.
    pub favourite: bool,
}

impl Contact {
    /// Creates a not-yet-persisted contact with the sentinel id.
    ///
    /// ## Example
    /// ```rust
    /// use dialbook_core::Contact;
    ///
    /// let contact = Contact::new("Ann", "123456789");
    /// assert_eq!(contact.id, dialbook_core::NEW_CONTACT_ID);
    /// assert!(!contact.favourite);
    /// ```
    pub fn new(name: impl Into<String>, phone: impl Into<String>) -> Self {
        Contact {
            id: NEW_CONTACT_ID,
            name: name.into(),
            phone: phone.into(),
            favourite: false,
        }
    }

    /// Returns a copy of this contact with `favourite` set to the given value.
    ///
    /// The favourite-toggle entrypoints reduce to an update with this copy.
    pub fn with_favourite(&self, favourite: bool) -> Self {
        Contact {
            favourite,
            ..self.clone()
        }
    }

    /// Whether this contact has been persisted (has a real id).
    #[inline]
    pub fn is_persisted(&self) -> bool {
        self.id != NEW_CONTACT_ID
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_contact_uses_sentinel_id() {
        let contact = Contact::new("Ann", "123456789");
        assert_eq!(contact.id, NEW_CONTACT_ID);
        assert_eq!(contact.name, "Ann");
        assert_eq!(contact.phone, "123456789");
        assert!(!contact.favourite);
        assert!(!contact.is_persisted());
    }

    #[test]
    fn test_with_favourite_preserves_identity() {
        let contact = Contact {
            id: 7,
            name: "Bob".to_string(),
            phone: "987654321".to_string(),
            favourite: false,
        };

        let pinned = contact.with_favourite(true);
        assert!(pinned.favourite);
        assert_eq!(pinned.id, 7);
        assert_eq!(pinned.name, "Bob");

        let unpinned = pinned.with_favourite(false);
        assert_eq!(unpinned, contact);
    }
}
